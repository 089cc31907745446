//! A local fake agent for testing purpose.

mod preset;

use std::collections::{HashMap, VecDeque};
use std::error::Error as StdError;
use std::fmt::{self, Debug, Display, Formatter};
use std::sync::{Arc, Mutex};

use agent_chat_model::{
    AgentClient, AgentClientError, AgentReply, AgentRequest, ErrorKind,
    ReplyList,
};
use tokio::time::sleep;

pub use preset::*;

#[derive(Debug)]
pub struct Error {
    #[allow(dead_code)]
    message: &'static str,
    kind: ErrorKind,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(self, f)
    }
}

impl StdError for Error {}

impl AgentClientError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

#[derive(Default)]
struct Script {
    presets: HashMap<String, VecDeque<PresetReply>>,
    requests: Vec<AgentRequest>,
}

/// A local fake agent for testing purpose.
///
/// Before sending requests, you may script how the agent answers a given
/// message. Presets for the same message are consumed in the order they
/// were added. Messages without a preset are echoed back as
/// `"You said: <message>"`.
///
/// Clones share the same script, so a test can keep one clone around to
/// inspect the received requests after handing another one to the widget.
///
/// # Note
///
/// This type is not optimized for production use, you should only use it
/// for testing.
#[derive(Clone, Default)]
pub struct TestAgentClient {
    script: Arc<Mutex<Script>>,
}

impl TestAgentClient {
    /// Scripts the answer for the next request carrying `message`.
    pub fn on_message<S: Into<String>>(&self, message: S, preset: PresetReply) {
        let mut script = self.lock_script();
        script
            .presets
            .entry(message.into())
            .or_default()
            .push_back(preset);
    }

    /// Returns every request received so far, in arrival order.
    pub fn requests(&self) -> Vec<AgentRequest> {
        self.lock_script().requests.clone()
    }

    fn lock_script(&self) -> std::sync::MutexGuard<'_, Script> {
        // A panicking test thread must not hide the script from others.
        self.script.lock().unwrap_or_else(|err| err.into_inner())
    }

    fn take_preset(&self, req: &AgentRequest) -> PresetReply {
        let mut script = self.lock_script();
        script.requests.push(req.clone());
        script
            .presets
            .get_mut(&req.message)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| {
                PresetReply::with_replies([AgentReply {
                    recipient_id: Some(req.sender.clone()),
                    ..AgentReply::with_text(format!("You said: {}", req.message))
                }])
            })
    }
}

impl Debug for TestAgentClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestAgentClient").finish_non_exhaustive()
    }
}

impl AgentClient for TestAgentClient {
    type Error = crate::Error;

    fn send(
        &self,
        req: &AgentRequest,
    ) -> impl Future<Output = Result<ReplyList, Self::Error>> + Send + 'static
    {
        let preset = self.take_preset(req);
        async move {
            if let Some(delay) = preset.delay() {
                sleep(delay).await;
            }
            match preset.outcome {
                PresetOutcome::Replies(replies) => Ok(replies),
                PresetOutcome::Status(code) => Err(Error {
                    message: "scripted status",
                    kind: ErrorKind::HttpStatus(code),
                }),
                PresetOutcome::Unreachable => Err(Error {
                    message: "connection refused",
                    kind: ErrorKind::Transport,
                }),
            }
        }
    }
}
