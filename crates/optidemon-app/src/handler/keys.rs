//! Key event handlers per focus

use crate::editor::EditorInput;
use crate::input_key::InputKey;
use crate::message::Message;
use crate::state::{AppState, Focus};

/// Convert key events to messages based on current focus
pub fn handle_key(state: &AppState, key: InputKey) -> Option<Message> {
    if key.is_quit() {
        return Some(Message::Quit);
    }
    if key.is_run_trigger() {
        return Some(Message::RunRequested);
    }
    if key == InputKey::CharCtrl('t') {
        return Some(Message::ToggleTheme);
    }

    match state.focus {
        Focus::Editor => handle_key_editor(key),
        Focus::Results => handle_key_results(key),
    }
}

fn handle_key_editor(key: InputKey) -> Option<Message> {
    let input = match key {
        InputKey::Esc => return Some(Message::FocusResults),
        InputKey::Char(c) => EditorInput::Insert(c),
        InputKey::Enter => EditorInput::Newline,
        InputKey::Backspace => EditorInput::Backspace,
        InputKey::Delete => EditorInput::Delete,
        InputKey::Left => EditorInput::Left,
        InputKey::Right => EditorInput::Right,
        InputKey::Up => EditorInput::Up,
        InputKey::Down => EditorInput::Down,
        InputKey::Home => EditorInput::Home,
        InputKey::End => EditorInput::End,
        InputKey::Tab => EditorInput::Indent,
        _ => return None,
    };
    Some(Message::Edit(input))
}

fn handle_key_results(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Tab | InputKey::BackTab | InputKey::Esc | InputKey::Char('i' | 'e') => {
            Some(Message::FocusEditor)
        }
        InputKey::Down | InputKey::Char('j') => Some(Message::SelectNextSlot),
        InputKey::Up | InputKey::Char('k') => Some(Message::SelectPreviousSlot),
        InputKey::PageUp => Some(Message::ScrollResultsUp),
        InputKey::PageDown => Some(Message::ScrollResultsDown),
        InputKey::Char('c' | 'y') | InputKey::Enter => Some(Message::CopySelectedSlot),
        InputKey::Char('q') => Some(Message::Quit),
        _ => None,
    }
}
