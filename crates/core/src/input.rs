//! Input commands coming from the widget's text field.

/// A key press delivered to the widget's input field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Commits the current input, the same as clicking the send control.
    Enter,
    /// Types a character.
    Char(char),
    /// Deletes the last character.
    Backspace,
    /// Any other key, ignored by the widget.
    Other,
}

/// The content of the single-line input field.
#[derive(Clone, Debug, Default)]
pub(crate) struct InputDraft(String);

impl InputDraft {
    /// Applies a key press, returns `true` if the key commits the draft.
    pub fn apply(&mut self, key: Key) -> bool {
        match key {
            Key::Enter => return true,
            Key::Char(ch) if !ch.is_control() => self.0.push(ch),
            Key::Backspace => {
                self.0.pop();
            }
            Key::Char(_) | Key::Other => {}
        }
        false
    }

    #[inline]
    pub fn set(&mut self, text: String) {
        self.0 = text;
    }

    #[inline]
    pub fn clear(&mut self) {
        self.0.clear();
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editing() {
        let mut draft = InputDraft::default();
        for key in [
            Key::Char('h'),
            Key::Char('i'),
            Key::Backspace,
            Key::Char('o'),
            Key::Char('\n'),
            Key::Other,
        ] {
            assert!(!draft.apply(key));
        }
        assert_eq!(draft.as_str(), "ho");
        assert!(draft.apply(Key::Enter));
        assert_eq!(draft.as_str(), "ho");

        draft.set("replaced".to_owned());
        assert_eq!(draft.as_str(), "replaced");
        draft.clear();
        assert_eq!(draft.as_str(), "");
        assert!(!draft.apply(Key::Backspace));
    }
}
