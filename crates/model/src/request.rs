use serde::{Deserialize, Serialize};

/// A message to be delivered to the agent.
///
/// Serializes to the REST webhook body `{"sender": ..., "message": ...}`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgentRequest {
    /// Identifier grouping all messages of one chat session.
    pub sender: String,
    /// The user's text.
    pub message: String,
}

impl AgentRequest {
    /// Creates a request for the given sender and message.
    #[inline]
    pub fn new<S: Into<String>, M: Into<String>>(sender: S, message: M) -> Self {
        Self {
            sender: sender.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_wire_format() {
        let req = AgentRequest::new("user", "hello there");
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({ "sender": "user", "message": "hello there" })
        );
    }
}
