mod builder;
mod mailbox;
mod state;

use std::sync::Arc;

use tokio::sync::oneshot;
use tracing::Instrument;

use crate::error::WidgetClosedError;
use crate::input::{InputDraft, Key};
use crate::message::Transcript;
pub use builder::ChatWidgetBuilder;
use mailbox::{Command, Mailbox, MailboxParts, run_widget};
use state::WidgetState;

/// A chat widget, which owns a transcript and a view port, and forwards
/// what the user types to the agent.
///
/// The widget runs as its own task. Every method on this handle just posts
/// a command to that task and returns immediately, so the caller is never
/// blocked by the network. Several messages can be awaiting replies at
/// once; replies are shown in the order they arrive.
///
/// Handles are cheap to clone. The widget is torn down when [`close`] is
/// called, when its view port stops being live, or when the last handle is
/// dropped. Replies arriving after that are discarded.
///
/// [`close`]: ChatWidget::close
#[derive(Clone)]
pub struct ChatWidget {
    mailbox: Arc<Mailbox>,
}

impl ChatWidget {
    /// Submits a message as if the user typed it and pressed send.
    ///
    /// Surrounding whitespace is trimmed. Blank messages are ignored.
    #[inline]
    pub fn submit_user_message<S: Into<String>>(
        &self,
        text: S,
    ) -> Result<(), WidgetClosedError> {
        self.mailbox.send(Command::Submit(text.into()))
    }

    /// Submits the current content of the input field.
    #[inline]
    pub fn on_send_requested(&self) -> Result<(), WidgetClosedError> {
        self.mailbox.send(Command::SendRequested)
    }

    /// Delivers a key press to the input field. [`Key::Enter`] submits
    /// the current content.
    #[inline]
    pub fn on_key_commit(&self, key: Key) -> Result<(), WidgetClosedError> {
        self.mailbox.send(Command::KeyCommit(key))
    }

    /// Replaces the content of the input field.
    #[inline]
    pub fn set_input<S: Into<String>>(
        &self,
        text: S,
    ) -> Result<(), WidgetClosedError> {
        self.mailbox.send(Command::SetInput(text.into()))
    }

    /// Returns a snapshot of the transcript, including every command sent
    /// before this call.
    pub async fn transcript(&self) -> Result<Transcript, WidgetClosedError> {
        let (tx, rx) = oneshot::channel();
        self.mailbox.send(Command::Snapshot(tx))?;
        rx.await.map_err(|_| WidgetClosedError)
    }

    /// Waits until no request is awaiting a reply.
    pub async fn settle(&self) -> Result<(), WidgetClosedError> {
        let (tx, rx) = oneshot::channel();
        self.mailbox.send(Command::Settle(tx))?;
        rx.await.map_err(|_| WidgetClosedError)
    }

    /// Tears the widget down.
    ///
    /// Outstanding requests are not aborted, but their replies will not
    /// be shown.
    #[inline]
    pub fn close(&self) {
        self.mailbox.kill();
    }
}

impl ChatWidget {
    fn spawn_from_builder(builder: ChatWidgetBuilder) -> Self {
        let ChatWidgetBuilder {
            client,
            view,
            sender_id,
            greeting,
            on_idle,
        } = builder;

        let state = WidgetState {
            client,
            sender_id,
            greeting,
            transcript: Default::default(),
            view,
            draft: InputDraft::default(),
            in_flight: 0,
            next_request_id: 1,
            settle_waiters: Default::default(),
            detached: false,
            on_idle,
        };

        let MailboxParts {
            mailbox,
            cmd_rx,
            kill_rx,
        } = Mailbox::new();
        let mailbox = Arc::new(mailbox);
        tokio::spawn(
            run_widget(Arc::downgrade(&mailbox), state, cmd_rx, kill_rx)
                .instrument(trace_span!("chat widget")),
        );
        Self { mailbox }
    }
}
