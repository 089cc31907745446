//! The wire protocol between the chat widget and a conversational agent.
//!
//! This crate describes what goes over the wire (a request carrying the
//! session's sender id and the user's text, and a list of reply objects
//! coming back) and the capability a transport must provide to deliver it.
//!
//! Types in this crate don't define any behavior, instead they are the
//! constraints that the client implementors should adhere to. The widget
//! itself lives in its own crate and only talks to an [`AgentClient`].

#![deny(missing_docs)]

mod client;
mod error;
mod reply;
mod request;

pub use client::*;
pub use error::*;
pub use reply::*;
pub use request::*;
