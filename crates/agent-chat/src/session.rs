use agent_chat_core::view::ViewPort;
use agent_chat_core::{
    ChatWidget, ChatWidgetBuilder, Key, Transcript, WidgetClosedError,
};
use agent_chat_rest_client::RestClient;

use crate::config::SessionConfig;

/// A session builder.
///
/// See [`Session`].
pub struct SessionBuilder {
    widget_builder: ChatWidgetBuilder,
}

impl SessionBuilder {
    /// Creates a session builder that talks to the agent described by
    /// `config` and renders onto `view`.
    pub fn new<V: ViewPort>(config: SessionConfig, view: V) -> Self {
        let client = RestClient::new(config.rest_config());
        debug!("agent endpoint: {}", client.config().endpoint());

        let mut widget_builder = ChatWidgetBuilder::new(client, view);
        if let Some(sender_id) = config.sender_id {
            widget_builder = widget_builder.with_sender_id(sender_id);
        }
        if let Some(greeting) = config.greeting {
            widget_builder = widget_builder.with_greeting(greeting);
        }
        Self { widget_builder }
    }

    /// Attaches a callback to be invoked when no reply is outstanding.
    #[inline]
    pub fn on_idle(
        mut self,
        on_idle: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        self.widget_builder = self.widget_builder.on_idle(on_idle);
        self
    }

    /// Builds a new session.
    #[inline]
    pub fn build(self) -> Session {
        Session {
            widget: self.widget_builder.build(),
        }
    }
}

/// A chat session, like a window that displays messages and has an input
/// box.
///
/// The session holds a widget wired to the REST agent client, and it is
/// basically a wrapper around [`ChatWidget`] for line-oriented front ends.
pub struct Session {
    widget: ChatWidget,
}

impl Session {
    /// Types a whole line into the input box and presses Enter.
    #[inline]
    pub fn send_line(&self, line: &str) -> Result<(), WidgetClosedError> {
        self.widget.set_input(line)?;
        self.widget.on_key_commit(Key::Enter)
    }

    /// Waits until every sent line has been answered.
    #[inline]
    pub async fn settle(&self) -> Result<(), WidgetClosedError> {
        self.widget.settle().await
    }

    /// Returns a snapshot of the transcript.
    #[inline]
    pub async fn transcript(&self) -> Result<Transcript, WidgetClosedError> {
        self.widget.transcript().await
    }

    /// Returns the underlying widget.
    #[inline]
    pub fn widget(&self) -> &ChatWidget {
        &self.widget
    }

    /// Ends the session.
    #[inline]
    pub fn close(&self) {
        self.widget.close();
    }
}

#[cfg(test)]
mod tests {
    use agent_chat_core::{Message, MessageKind, Sender};
    use tokio::net::TcpListener;

    use super::*;

    struct NullView;

    impl ViewPort for NullView {
        fn render_message(&mut self, _msg: &Message) {}

        fn scroll_to_latest(&mut self) {}
    }

    #[tokio::test]
    async fn test_unreachable_agent() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let config = SessionConfig {
            base_url: Some(base_url),
            greeting: Some("Hello!".to_owned()),
            ..Default::default()
        };
        let session = SessionBuilder::new(config, NullView).build();
        session.send_line("  hello\n").unwrap();
        session.send_line("   ").unwrap();
        session.settle().await.unwrap();

        let transcript = session.transcript().await.unwrap();
        let messages = transcript.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0], Message::bot("Hello!"));
        assert_eq!(messages[1], Message::user("hello"));
        assert_eq!(messages[2].sender(), Sender::Bot);
        assert_eq!(messages[2].kind(), MessageKind::Error);
        assert_eq!(
            messages[2].text(),
            "Error: Could not connect to the agent server."
        );

        session.close();
        assert!(session.send_line("bye").is_err());
    }
}
