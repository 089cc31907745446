use std::time::Duration;

use agent_chat_model::AgentReply;
use serde::{Deserialize, Serialize};

/// How the fake agent answers a request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PresetOutcome {
    /// The agent answers with HTTP 200 and these reply objects.
    #[serde(rename = "replies")]
    Replies(Vec<AgentReply>),
    /// The agent answers with a non-success HTTP status.
    #[serde(rename = "status")]
    Status(u16),
    /// The agent cannot be reached at all.
    #[serde(rename = "unreachable")]
    Unreachable,
}

/// The preset answer for one message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetReply {
    /// What the agent answers.
    pub outcome: PresetOutcome,
    /// If set, the answer arrives after this many milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay_ms: Option<u64>,
}

impl PresetReply {
    /// Creates a successful reply carrying the given texts.
    #[inline]
    pub fn with_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_replies(texts.into_iter().map(AgentReply::with_text))
    }

    /// Creates a successful reply carrying the given reply objects.
    #[inline]
    pub fn with_replies(replies: impl IntoIterator<Item = AgentReply>) -> Self {
        Self {
            outcome: PresetOutcome::Replies(replies.into_iter().collect()),
            delay_ms: None,
        }
    }

    /// Creates a failed reply with the given HTTP status.
    #[inline]
    pub fn with_status(code: u16) -> Self {
        Self {
            outcome: PresetOutcome::Status(code),
            delay_ms: None,
        }
    }

    /// Creates a reply that simulates an unreachable agent.
    #[inline]
    pub fn unreachable() -> Self {
        Self {
            outcome: PresetOutcome::Unreachable,
            delay_ms: None,
        }
    }

    /// Delays the answer.
    #[inline]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        let millis = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self.delay_ms = Some(millis);
        self
    }

    #[inline]
    pub(crate) fn delay(&self) -> Option<Duration> {
        self.delay_ms.map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_load_fixture() {
        let fixture = json!([
            {
                "outcome": {
                    "type": "replies",
                    "data": [
                        { "recipient_id": "user", "text": "Hello!" },
                        { "recipient_id": "user", "image": "cat.png" }
                    ]
                },
                "delay_ms": 20
            },
            { "outcome": { "type": "status", "data": 503 } },
            { "outcome": { "type": "unreachable" } }
        ]);
        let presets: Vec<PresetReply> =
            serde_json::from_value(fixture).unwrap();

        assert_eq!(presets[0].delay(), Some(Duration::from_millis(20)));
        let PresetOutcome::Replies(replies) = &presets[0].outcome else {
            panic!("unexpected outcome: {:?}", presets[0].outcome);
        };
        assert_eq!(replies[0].text(), Some("Hello!"));
        assert_eq!(replies[1].text(), None);
        assert_eq!(presets[1], PresetReply::with_status(503));
        assert_eq!(presets[2], PresetReply::unreachable());
    }

    #[test]
    fn test_huge_delay_saturates() {
        let preset = PresetReply::unreachable().with_delay(Duration::MAX);
        assert_eq!(preset.delay_ms, Some(u64::MAX));

        let preset = PresetReply::unreachable()
            .with_delay(Duration::from_millis(1500));
        assert_eq!(preset.delay(), Some(Duration::from_millis(1500)));
    }
}
