//! The surface a widget draws on.

use crate::message::Message;

/// A place where the widget renders its transcript.
///
/// The widget owns its view port and is the only one calling into it, so
/// implementations don't need any synchronization of their own. Browsers,
/// terminals and test recorders are all view ports.
pub trait ViewPort: Send + 'static {
    /// Renders a newly appended message.
    fn render_message(&mut self, msg: &Message);

    /// Makes the most recent message visible.
    fn scroll_to_latest(&mut self);

    /// Clears the input field after its content has been submitted.
    ///
    /// View ports without an input field of their own can ignore this.
    fn clear_input(&mut self) {}

    /// Returns whether the view still exists.
    ///
    /// The widget checks this before every mutation. Once a view port
    /// reports `false`, the widget tears itself down and drops whatever
    /// it was about to render.
    fn is_live(&self) -> bool {
        true
    }
}
