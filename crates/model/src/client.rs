use std::error::Error;

use crate::error::ErrorKind;
use crate::reply::ReplyList;
use crate::request::AgentRequest;

/// The error type for an agent client.
pub trait AgentClientError: Error + Send + Sync + 'static {
    /// Returns the kind of this error.
    fn kind(&self) -> ErrorKind;
}

/// A type that can deliver a message to the agent and bring back its
/// replies.
///
/// Once the client is created, it should behave like a stateless object.
/// It can still have internal state (connection pools, for example), but
/// callers should not rely on it, and the client should be prepared for
/// being dropped anytime.
pub trait AgentClient: Send + Sync {
    /// The error type that may be returned by the client.
    type Error: AgentClientError;

    /// Sends a request to the agent.
    ///
    /// The returned future must be independent of `self`, so that the
    /// caller can drive several requests at once.
    fn send(
        &self,
        req: &AgentRequest,
    ) -> impl Future<Output = Result<ReplyList, Self::Error>> + Send + 'static;
}
