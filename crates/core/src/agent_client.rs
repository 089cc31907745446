use std::pin::Pin;
use std::sync::Arc;

use agent_chat_model::{
    AgentClient, AgentClientError, AgentRequest, ReplyList,
};
use tracing::Instrument;

use crate::error::ChatError;

type SendResult = Result<ReplyList, ChatError>;
type BoxedSendFuture = Pin<Box<dyn Future<Output = SendResult> + Send>>;
type HandlerFn = Arc<dyn Fn(AgentRequest) -> BoxedSendFuture + Send + Sync>;

/// A wrapper around an agent client that provides a type-erased interface
/// for the widget, and folds every failure into a [`ChatError`].
#[derive(Clone)]
pub struct AgentClientHandle {
    handler_fn: HandlerFn,
}

impl AgentClientHandle {
    #[inline]
    pub fn new<C: AgentClient + 'static>(client: C) -> Self {
        // Erase `C` here, so that the widget doesn't need a generic
        // parameter.
        let handler_fn: HandlerFn = Arc::new(move |req| {
            let fut = client.send(&req);
            Box::pin(
                async move {
                    trace!("sending a request: {:?}", req);
                    let replies_or_err = fut.await;
                    handle_replies::<C>(replies_or_err)
                }
                .instrument(trace_span!("agent client req")),
            )
        });
        Self { handler_fn }
    }

    /// Sends a request and returns the replies.
    ///
    /// An empty reply list is reported as [`ChatError::EmptyReply`], so a
    /// successful result always has at least one element.
    #[inline]
    pub async fn send(&self, req: AgentRequest) -> SendResult {
        (self.handler_fn)(req).await
    }
}

fn handle_replies<C: AgentClient>(
    replies_or_err: Result<ReplyList, C::Error>,
) -> SendResult {
    let replies = match replies_or_err {
        Ok(replies) => replies,
        Err(err) => {
            error!("agent request failed ({}): {err}", err.kind());
            return Err(err.kind().into());
        }
    };

    if replies.is_empty() {
        warn!("agent produced no response");
        return Err(ChatError::EmptyReply);
    }

    trace!("got {} replies", replies.len());
    Ok(replies)
}

#[cfg(test)]
mod tests {
    use agent_chat_model::AgentReply;
    use agent_chat_test_client::{PresetReply, TestAgentClient};

    use super::*;

    #[tokio::test]
    async fn test_send_request() {
        let client = TestAgentClient::default();
        client.on_message("Hi", PresetReply::with_texts(["How ", "are you?"]));

        let handle = AgentClientHandle::new(client.clone());
        let replies = handle
            .send(AgentRequest::new("user", "Hi"))
            .await
            .unwrap();
        let texts: Vec<_> =
            replies.iter().filter_map(AgentReply::text).collect();
        assert_eq!(texts, ["How ", "are you?"]);
        assert_eq!(client.requests(), [AgentRequest::new("user", "Hi")]);
    }

    #[tokio::test]
    async fn test_error_handling() {
        let client = TestAgentClient::default();
        client.on_message("a", PresetReply::with_status(502));
        client.on_message("b", PresetReply::unreachable());
        client.on_message("c", PresetReply::with_texts(Vec::<String>::new()));

        let handle = AgentClientHandle::new(client);
        let send = |msg: &str| handle.send(AgentRequest::new("user", msg));
        assert_eq!(send("a").await, Err(ChatError::HttpStatus(502)));
        assert_eq!(send("b").await, Err(ChatError::Transport));
        assert_eq!(send("c").await, Err(ChatError::EmptyReply));
    }
}
