//! An out-of-the-box chat client for agents that expose a REST webhook.
//!
//! The crate includes a CLI tool for chatting in the terminal. And you can
//! also use it as a library to put the chat widget into your own host apps.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

mod config;
mod session;
pub mod terminal;

pub use config::{ConfigError, SessionConfig};
pub use session::{Session, SessionBuilder};

/// Re-exports of [`agent_chat_core`] crate.
pub mod core {
    pub use agent_chat_core::*;
}
