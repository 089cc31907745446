use std::fmt::{self, Display, Formatter};

/// The kind of error that occurred while talking to the agent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The agent answered, but with a non-success HTTP status.
    HttpStatus(u16),
    /// The request could not be completed, or the answer could not be
    /// understood (network failure, timeout, malformed body).
    Transport,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::HttpStatus(code) => write!(f, "HTTP status {code}"),
            ErrorKind::Transport => write!(f, "Transport error"),
        }
    }
}
