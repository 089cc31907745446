use std::sync::Weak;

use agent_chat_model::ReplyList;
use tokio::select;
use tokio::sync::{mpsc, oneshot, watch};

use super::state::WidgetState;
use crate::error::{ChatError, WidgetClosedError};
use crate::input::Key;
use crate::message::Transcript;

/// Everything the widget's event loop reacts to.
#[derive(Debug)]
pub enum Command {
    Submit(String),
    SendRequested,
    KeyCommit(Key),
    SetInput(String),
    ReplySettled {
        request_id: u64,
        outcome: Result<ReplyList, ChatError>,
    },
    Snapshot(oneshot::Sender<Transcript>),
    Settle(oneshot::Sender<()>),
}

pub struct MailboxParts {
    pub mailbox: Mailbox,
    pub cmd_rx: mpsc::UnboundedReceiver<Command>,
    pub kill_rx: watch::Receiver<bool>,
}

pub struct Mailbox {
    cmd_tx: mpsc::UnboundedSender<Command>,
    kill_tx: watch::Sender<bool>,
}

impl Mailbox {
    #[inline]
    pub fn new() -> MailboxParts {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (kill_tx, kill_rx) = watch::channel(false);
        MailboxParts {
            mailbox: Mailbox { cmd_tx, kill_tx },
            cmd_rx,
            kill_rx,
        }
    }

    /// Posts a command, failing once the widget has been killed or its
    /// event loop has ended.
    #[inline]
    pub fn send(&self, cmd: Command) -> Result<(), WidgetClosedError> {
        if *self.kill_tx.borrow() {
            return Err(WidgetClosedError);
        }
        self.cmd_tx.send(cmd).map_err(|_| WidgetClosedError)
    }

    #[inline]
    pub fn kill(&self) {
        self.kill_tx.send_replace(true);
    }
}

/// Drives the widget until it is killed, its view port goes away, or
/// every handle has been dropped.
pub async fn run_widget(
    mailbox: Weak<Mailbox>,
    mut state: WidgetState,
    mut cmd_rx: mpsc::UnboundedReceiver<Command>,
    mut kill_rx: watch::Receiver<bool>,
) {
    debug!("started");
    state.greet();
    while !state.is_detached() {
        let cmd = select! {
            biased;

            _ = kill_rx.changed() => {
                break;
            }
            cmd = cmd_rx.recv() => {
                let Some(cmd) = cmd else {
                    break;
                };
                cmd
            }
        };
        trace!("received command: {cmd:?}");

        let proc_span = trace_span!("proc cmd");
        proc_span.in_scope(|| {
            state.handle(cmd, &mailbox);
        });
    }
    debug!("will terminate");
}
