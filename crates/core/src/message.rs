//! Transcript-related types.

/// Who a message is attributed to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sender {
    /// The person typing into the widget.
    User,
    /// The agent, or the widget speaking on its behalf.
    Bot,
}

/// How a message should be presented.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MessageKind {
    /// A regular chat line.
    #[default]
    Normal,
    /// A locally synthesized notice about a failed exchange.
    Error,
}

/// A message in the transcript.
///
/// Messages are immutable once created.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Message {
    text: String,
    sender: Sender,
    kind: MessageKind,
}

impl Message {
    /// Creates a normal message from the user.
    #[inline]
    pub fn user<S: Into<String>>(text: S) -> Self {
        Self::normal(text, Sender::User)
    }

    /// Creates a normal message from the agent.
    #[inline]
    pub fn bot<S: Into<String>>(text: S) -> Self {
        Self::normal(text, Sender::Bot)
    }

    /// Creates a normal message from the given sender.
    #[inline]
    pub fn normal<S: Into<String>>(text: S, sender: Sender) -> Self {
        Self {
            text: text.into(),
            sender,
            kind: MessageKind::Normal,
        }
    }

    /// Creates an error notice.
    #[inline]
    pub fn error<S: Into<String>>(text: S) -> Self {
        Self {
            text: text.into(),
            sender: Sender::Bot,
            kind: MessageKind::Error,
        }
    }

    /// Returns the text of this message.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the sender of this message.
    #[inline]
    pub fn sender(&self) -> Sender {
        self.sender
    }

    /// Returns the kind of this message.
    #[inline]
    pub fn kind(&self) -> MessageKind {
        self.kind
    }

    /// Returns `true` if this is an error notice.
    #[inline]
    pub fn is_error(&self) -> bool {
        self.kind == MessageKind::Error
    }
}

/// The ordered record of every message shown in one widget.
///
/// The widget only ever appends to its transcript. Values of this type
/// handed out to callers are snapshots.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct Transcript {
    items: Vec<Message>,
}

impl Transcript {
    #[inline]
    pub(crate) fn push(&mut self, msg: Message) {
        self.items.push(msg);
    }

    /// Returns all messages in display order.
    #[inline]
    pub fn messages(&self) -> &[Message] {
        &self.items
    }

    /// Returns an iterator over the messages in display order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.items.iter()
    }

    /// Returns the number of messages.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if nothing has been shown yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the most recent message.
    #[inline]
    pub fn last(&self) -> Option<&Message> {
        self.items.last()
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
