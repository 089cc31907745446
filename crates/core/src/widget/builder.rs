use agent_chat_model::AgentClient;

use super::ChatWidget;
use crate::agent_client::AgentClientHandle;
use crate::view::ViewPort;

const DEFAULT_SENDER_ID: &str = "user";

/// [`ChatWidget`] builder.
pub struct ChatWidgetBuilder {
    pub(crate) client: AgentClientHandle,
    pub(crate) view: Box<dyn ViewPort>,
    pub(crate) sender_id: String,
    pub(crate) greeting: Option<String>,
    pub(crate) on_idle: Option<Box<dyn Fn() + Send + Sync>>,
}

impl ChatWidgetBuilder {
    /// Creates a new builder that talks to the agent through `client` and
    /// renders onto `view`.
    #[inline]
    pub fn new<C: AgentClient + 'static, V: ViewPort>(client: C, view: V) -> Self {
        Self {
            client: AgentClientHandle::new(client),
            view: Box::new(view),
            sender_id: DEFAULT_SENDER_ID.to_owned(),
            greeting: None,
            on_idle: None,
        }
    }

    /// Sets the sender id attached to every request of this session.
    /// Defaults to `"user"`.
    #[inline]
    pub fn with_sender_id<S: Into<String>>(mut self, sender_id: S) -> Self {
        self.sender_id = sender_id.into();
        self
    }

    /// Shows a bot message as soon as the widget starts.
    #[inline]
    pub fn with_greeting<S: Into<String>>(mut self, greeting: S) -> Self {
        self.greeting = Some(greeting.into());
        self
    }

    /// Attaches a callback to be invoked whenever the last outstanding
    /// request settles.
    #[inline]
    pub fn on_idle(
        mut self,
        on_idle: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        self.on_idle = Some(Box::new(on_idle));
        self
    }

    /// Builds the widget and starts its event loop.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a Tokio runtime.
    #[inline]
    pub fn build(self) -> ChatWidget {
        ChatWidget::spawn_from_builder(self)
    }
}
