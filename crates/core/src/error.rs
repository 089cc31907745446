use std::error::Error;
use std::fmt::{self, Display, Formatter};

use agent_chat_model::ErrorKind;

/// Describes why an exchange with the agent produced no chat lines.
///
/// The `Display` output of this type is what the widget shows in its
/// transcript.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChatError {
    /// The agent answered with a non-success HTTP status.
    HttpStatus(u16),
    /// The agent answered, but with nothing in it.
    EmptyReply,
    /// The agent could not be reached, or its answer was unreadable.
    Transport,
}

impl From<ErrorKind> for ChatError {
    #[inline]
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::HttpStatus(code) => ChatError::HttpStatus(code),
            ErrorKind::Transport => ChatError::Transport,
        }
    }
}

impl Display for ChatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ChatError::HttpStatus(code) => write!(
                f,
                "Error: Could not reach the agent server (Status: {code})"
            ),
            ChatError::EmptyReply => write!(f, "Bot did not provide a response."),
            ChatError::Transport => {
                write!(f, "Error: Could not connect to the agent server.")
            }
        }
    }
}

impl Error for ChatError {}

/// A type of error which can be returned whenever a widget that has been
/// torn down is asked to do something.
pub struct WidgetClosedError;

impl fmt::Debug for WidgetClosedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetClosedError").finish()
    }
}

impl Display for WidgetClosedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        "the chat widget has been closed".fmt(f)
    }
}

impl Error for WidgetClosedError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notices() {
        assert_eq!(
            ChatError::from(ErrorKind::HttpStatus(500)).to_string(),
            "Error: Could not reach the agent server (Status: 500)"
        );
        assert_eq!(
            ChatError::from(ErrorKind::Transport).to_string(),
            "Error: Could not connect to the agent server."
        );
        assert_eq!(
            ChatError::EmptyReply.to_string(),
            "Bot did not provide a response."
        );
    }
}
