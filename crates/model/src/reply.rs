use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// The list of replies the agent produced for one request.
pub type ReplyList = Vec<AgentReply>;

/// One reply object from the agent.
///
/// Only `text` is understood by the widget. Everything else the agent
/// sends (images, buttons, custom payloads) is preserved in
/// [`AgentReply::extra`] so that richer front ends can pick it up later.
///
/// Deserialization never fails on a well-formed JSON value. A `text` or
/// `recipient_id` that is not a string is kept in `extra`, and an element
/// that is not an object becomes an empty reply.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AgentReply {
    /// The reply text, if this is a text reply.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// The sender id the reply is addressed to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient_id: Option<String>,
    /// Any other fields of the reply object.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AgentReply {
    /// Creates a plain text reply.
    #[inline]
    pub fn with_text<S: Into<String>>(text: S) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    /// Returns the text of this reply if it carries a usable one.
    ///
    /// An empty string is not usable.
    #[inline]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref().filter(|text| !text.is_empty())
    }
}

impl From<Value> for AgentReply {
    fn from(value: Value) -> Self {
        let Value::Object(mut extra) = value else {
            return Self::default();
        };
        Self {
            text: take_string(&mut extra, "text"),
            recipient_id: take_string(&mut extra, "recipient_id"),
            extra,
        }
    }
}

impl<'de> Deserialize<'de> for AgentReply {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from)
    }
}

fn take_string(fields: &mut Map<String, Value>, key: &str) -> Option<String> {
    match fields.remove(key)? {
        Value::String(s) => Some(s),
        other => {
            fields.insert(key.to_owned(), other);
            None
        }
    }
}

/// Parses a webhook response body.
///
/// Only a body that is neither an array nor `null` is an error. Odd
/// elements inside the array are kept as replies without text.
///
/// A JSON `null` body is treated as an empty list.
pub fn parse_reply_list(body: &[u8]) -> serde_json::Result<ReplyList> {
    let replies: Option<ReplyList> = serde_json::from_slice(body)?;
    Ok(replies.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_parse_rasa_response() {
        let body = br#"[
            {"recipient_id": "user", "text": "Hello from the test server!"},
            {"recipient_id": "user", "image": "https://example.com/cat.png"}
        ]"#;
        let replies = parse_reply_list(body).unwrap();
        assert_eq!(replies.len(), 2);
        assert_eq!(replies[0].text(), Some("Hello from the test server!"));
        assert_eq!(replies[0].recipient_id.as_deref(), Some("user"));
        assert_eq!(replies[1].text(), None);
        assert_eq!(
            replies[1].extra.get("image"),
            Some(&json!("https://example.com/cat.png"))
        );
    }

    #[test]
    fn test_parse_null_and_empty() {
        assert!(parse_reply_list(b"null").unwrap().is_empty());
        assert!(parse_reply_list(b"[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_mixed_elements() {
        let body =
            br#"[{"text":"Hi"},{"text":{"rich":true}},"bare",{"text":5},{"text":"there"}]"#;
        let replies = parse_reply_list(body).unwrap();
        assert_eq!(replies.len(), 5);

        let texts: Vec<_> =
            replies.iter().filter_map(AgentReply::text).collect();
        assert_eq!(texts, ["Hi", "there"]);
        assert_eq!(replies[1].extra.get("text"), Some(&json!({ "rich": true })));
        assert_eq!(replies[2], AgentReply::default());
        assert_eq!(replies[3].extra.get("text"), Some(&json!(5)));
    }

    #[test]
    fn test_parse_malformed() {
        assert!(parse_reply_list(b"{\"text\": \"hi\"}").is_err());
        assert!(parse_reply_list(b"<html>").is_err());
    }

    #[test]
    fn test_empty_text_is_unusable() {
        let reply: AgentReply = serde_json::from_value(json!({ "text": "" }))
            .unwrap();
        assert_eq!(reply.text(), None);
    }
}
