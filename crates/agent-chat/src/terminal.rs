//! A view port that prints the transcript to a terminal.

use std::io::{self, Stdout, Write};

use agent_chat_core::view::ViewPort;
use agent_chat_core::{Message, MessageKind, Sender};
use owo_colors::OwoColorize;

const BAR_CHAR: &str = "▎";

/// Prints each message as one line.
///
/// Terminals echo what the user types, so user messages are not printed
/// again unless [`TerminalView::with_user_echo`] is enabled.
///
/// The view stops being live as soon as writing to the terminal fails
/// (a closed pipe, for example).
pub struct TerminalView<W> {
    out: W,
    colored: bool,
    echo_user: bool,
    broken: bool,
}

impl TerminalView<Stdout> {
    /// Creates a colored view on the standard output.
    #[inline]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalView<W> {
    /// Creates a colored view on the given writer.
    #[inline]
    pub fn new(out: W) -> Self {
        Self {
            out,
            colored: true,
            echo_user: false,
            broken: false,
        }
    }

    /// Enables or disables ANSI colors.
    #[inline]
    pub fn with_colors(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    /// Enables or disables printing user messages.
    #[inline]
    pub fn with_user_echo(mut self, echo_user: bool) -> Self {
        self.echo_user = echo_user;
        self
    }

    /// Returns the underlying writer.
    #[inline]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, msg: &Message) -> io::Result<()> {
        let text = msg.text();
        match (msg.kind(), msg.sender(), self.colored) {
            (MessageKind::Error, _, true) => writeln!(
                self.out,
                "{}⚠️  {}",
                BAR_CHAR.bright_red(),
                text.red()
            ),
            (MessageKind::Error, _, false) => writeln!(self.out, "! {text}"),
            (MessageKind::Normal, Sender::Bot, true) => writeln!(
                self.out,
                "{}🤖 {}",
                BAR_CHAR.bright_cyan(),
                text.bright_white()
            ),
            (MessageKind::Normal, Sender::Bot, false) => {
                writeln!(self.out, "bot: {text}")
            }
            (MessageKind::Normal, Sender::User, true) => {
                writeln!(self.out, "{}{}", BAR_CHAR.bright_green(), text.dimmed())
            }
            (MessageKind::Normal, Sender::User, false) => {
                writeln!(self.out, "you: {text}")
            }
        }
    }

    fn fail(&mut self, err: io::Error) {
        warn!("terminal is not writable anymore: {err}");
        self.broken = true;
    }
}

impl<W: Write + Send + 'static> ViewPort for TerminalView<W> {
    fn render_message(&mut self, msg: &Message) {
        if msg.sender() == Sender::User
            && msg.kind() == MessageKind::Normal
            && !self.echo_user
        {
            return;
        }
        if let Err(err) = self.write_line(msg) {
            self.fail(err);
        }
    }

    fn scroll_to_latest(&mut self) {
        if let Err(err) = self.out.flush() {
            self.fail(err);
        }
    }

    fn is_live(&self) -> bool {
        !self.broken
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn render_all(mut view: TerminalView<Vec<u8>>, msgs: &[Message]) -> String {
        for msg in msgs {
            view.render_message(msg);
            view.scroll_to_latest();
        }
        String::from_utf8(view.into_inner()).unwrap()
    }

    #[test]
    fn test_plain_output() {
        let output = render_all(
            TerminalView::new(Vec::new()).with_colors(false),
            &[
                Message::user("hello"),
                Message::bot("Hi"),
                Message::error("Bot did not provide a response."),
            ],
        );
        assert_eq!(output, "bot: Hi\n! Bot did not provide a response.\n");
    }

    #[test]
    fn test_user_echo() {
        let output = render_all(
            TerminalView::new(Vec::new())
                .with_colors(false)
                .with_user_echo(true),
            &[Message::user("hello"), Message::bot("Hi")],
        );
        assert_eq!(output, "you: hello\nbot: Hi\n");
    }

    #[test]
    fn test_colored_output() {
        let output = render_all(
            TerminalView::new(Vec::new()),
            &[Message::bot("Hi"), Message::error("oops")],
        );
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("Hi") && lines[0].contains('\x1b'));
        assert!(lines[1].contains("oops"));
    }

    #[test]
    fn test_broken_pipe() {
        let mut view = TerminalView::new(ClosedPipe);
        assert!(view.is_live());
        view.render_message(&Message::bot("Hi"));
        assert!(!view.is_live());
    }
}
