//! Core logic of the chat widget: the transcript, the view port it renders
//! onto, and the event loop that forwards user messages to the agent.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

mod agent_client;
mod error;
mod input;
mod message;
pub mod view;
mod widget;

pub use error::{ChatError, WidgetClosedError};
pub use input::Key;
pub use message::{Message, MessageKind, Sender, Transcript};
pub use widget::{ChatWidget, ChatWidgetBuilder};

/// Re-exports of [`agent_chat_model`] crate.
pub mod model {
    pub use agent_chat_model::*;
}
