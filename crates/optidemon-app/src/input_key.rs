//! Terminal-independent key events
//!
//! The TUI converts crossterm key events into [`InputKey`] at its boundary so
//! the application layer never depends on a terminal library.

/// A key press as the application sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKey {
    /// Printable character (Shift already applied)
    Char(char),
    /// Character with Ctrl held
    CharCtrl(char),

    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,

    Enter,
    Esc,
    Tab,
    BackTab,
    Backspace,
    Delete,

    /// Function key F1-F12
    F(u8),
}

impl InputKey {
    /// Whether this key triggers a run regardless of focus.
    pub fn is_run_trigger(&self) -> bool {
        matches!(self, InputKey::CharCtrl('r') | InputKey::F(5))
    }

    pub fn is_quit(&self) -> bool {
        matches!(self, InputKey::CharCtrl('c') | InputKey::CharCtrl('q'))
    }
}
