use std::sync::Weak;

use agent_chat_model::{AgentRequest, ReplyList};
use tokio::sync::oneshot;
use tracing::Instrument;

use super::mailbox::{Command, Mailbox};
use crate::agent_client::AgentClientHandle;
use crate::error::ChatError;
use crate::input::InputDraft;
use crate::message::{Message, Sender, Transcript};
use crate::view::ViewPort;

pub struct WidgetState {
    pub(super) client: AgentClientHandle,
    pub(super) sender_id: String,
    pub(super) greeting: Option<String>,
    pub(super) transcript: Transcript,
    pub(super) view: Box<dyn ViewPort>,
    pub(super) draft: InputDraft,
    pub(super) in_flight: usize,
    pub(super) next_request_id: u64,
    pub(super) settle_waiters: Vec<oneshot::Sender<()>>,
    pub(super) detached: bool,

    pub(super) on_idle: Option<Box<dyn Fn() + Send + Sync>>,
}

impl WidgetState {
    pub fn handle(&mut self, cmd: Command, mailbox: &Weak<Mailbox>) {
        match cmd {
            Command::Submit(text) => self.submit_user_message(&text, mailbox),
            Command::SendRequested => self.send_requested(mailbox),
            Command::KeyCommit(key) => {
                if self.draft.apply(key) {
                    self.send_requested(mailbox);
                }
            }
            Command::SetInput(text) => self.draft.set(text),
            Command::ReplySettled {
                request_id,
                outcome,
            } => self.reply_settled(request_id, outcome),
            Command::Snapshot(tx) => {
                tx.send(self.transcript.clone()).ok();
            }
            Command::Settle(tx) => {
                if self.in_flight == 0 {
                    tx.send(()).ok();
                } else {
                    self.settle_waiters.push(tx);
                }
            }
        }
    }

    #[inline]
    pub fn is_detached(&self) -> bool {
        self.detached
    }

    pub fn greet(&mut self) {
        if let Some(greeting) = self.greeting.take() {
            self.append_message(greeting, Sender::Bot);
        }
    }

    /// Appends a normal message and brings it into view.
    pub fn append_message<S: Into<String>>(&mut self, text: S, sender: Sender) {
        self.append(Message::normal(text, sender));
    }

    /// Appends an error notice and brings it into view.
    pub fn append_error<S: Into<String>>(&mut self, text: S) {
        self.append(Message::error(text));
    }

    fn append(&mut self, msg: Message) {
        if !self.check_view() {
            return;
        }
        self.view.render_message(&msg);
        self.view.scroll_to_latest();
        self.transcript.push(msg);
    }

    fn check_view(&mut self) -> bool {
        if !self.detached && !self.view.is_live() {
            debug!("view port is gone, detaching");
            self.detached = true;
        }
        !self.detached
    }

    fn send_requested(&mut self, mailbox: &Weak<Mailbox>) {
        let text = self.draft.as_str().to_owned();
        self.submit_user_message(&text, mailbox);
    }

    fn submit_user_message(&mut self, text: &str, mailbox: &Weak<Mailbox>) {
        let text = text.trim();
        if text.is_empty() {
            trace!("ignored empty input");
            return;
        }

        // The user line must be on screen before the request goes out.
        self.append_message(text, Sender::User);
        if self.detached {
            return;
        }
        self.draft.clear();
        self.view.clear_input();

        self.send_to_agent(text.to_owned(), mailbox);
    }

    fn send_to_agent(&mut self, text: String, mailbox: &Weak<Mailbox>) {
        let request_id = self.next_request_id;
        self.next_request_id += 1;
        self.in_flight += 1;

        let request = AgentRequest::new(self.sender_id.clone(), text);
        let client = self.client.clone();
        let mailbox = mailbox.clone();
        tokio::spawn(
            async move {
                let outcome = client.send(request).await;

                let Some(mailbox) = mailbox.upgrade() else {
                    debug!("widget is gone, discard the reply");
                    return;
                };
                let cmd = Command::ReplySettled {
                    request_id,
                    outcome,
                };
                if mailbox.send(cmd).is_err() {
                    debug!("widget has been closed, discard the reply");
                }
            }
            .instrument(trace_span!("send to agent", request_id)),
        );
    }

    fn reply_settled(
        &mut self,
        request_id: u64,
        outcome: Result<ReplyList, ChatError>,
    ) {
        trace!("request {request_id} settled");
        self.in_flight = self.in_flight.saturating_sub(1);

        match outcome {
            Ok(replies) => {
                for reply in &replies {
                    match reply.text() {
                        Some(text) => self.append_message(text, Sender::Bot),
                        None => {
                            // Images, buttons and other payloads end up
                            // here. Only text is rendered for now.
                            trace!("skipped a reply without text: {reply:?}");
                        }
                    }
                }
            }
            Err(err) => self.append_error(err.to_string()),
        }

        if self.in_flight == 0 {
            for waiter in self.settle_waiters.drain(..) {
                waiter.send(()).ok();
            }
            if let Some(on_idle) = &self.on_idle {
                on_idle();
            }
        }
    }
}
