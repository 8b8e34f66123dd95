//! Main update function - handles state transitions (TEA pattern)

use crate::message::Message;
use crate::state::{AppState, Focus};

use super::{clipboard, keys::handle_key, pipeline, UpdateAction, UpdateResult};

/// Process a message and update state
/// Returns optional follow-up message and/or action
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        Message::Quit => {
            state.request_quit();
            UpdateResult::none()
        }

        Message::Key(key) => match handle_key(state, key) {
            Some(msg) => UpdateResult::message(msg),
            None => UpdateResult::none(),
        },

        Message::Tick => UpdateResult::none(),

        // ─────────────────────────────────────────────────────────
        // Editor
        // ─────────────────────────────────────────────────────────
        Message::Edit(input) => {
            state.editor.apply(input);
            UpdateResult::none()
        }

        Message::FocusEditor => {
            state.focus = Focus::Editor;
            UpdateResult::none()
        }

        Message::FocusResults => {
            state.focus = Focus::Results;
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Pipeline
        // ─────────────────────────────────────────────────────────
        Message::RunRequested => pipeline::handle_run_requested(state),
        Message::RunFinished { outcome } => pipeline::handle_run_finished(state, outcome),

        // ─────────────────────────────────────────────────────────
        // Results navigation
        // ─────────────────────────────────────────────────────────
        Message::SelectNextSlot => {
            let total = state.workspace.with(|ws| ws.results.total_slots());
            if state.selected_slot + 1 < total {
                state.selected_slot += 1;
            }
            // Back to following the selection
            state.results_scroll = 0;
            UpdateResult::none()
        }

        Message::SelectPreviousSlot => {
            state.selected_slot = state.selected_slot.saturating_sub(1);
            state.results_scroll = 0;
            UpdateResult::none()
        }

        Message::ScrollResultsUp => {
            state.results_scroll = state.results_scroll.saturating_sub(10);
            UpdateResult::none()
        }

        Message::ScrollResultsDown => {
            state.results_scroll = state.results_scroll.saturating_add(10);
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Copy action
        // ─────────────────────────────────────────────────────────
        Message::CopySelectedSlot => clipboard::handle_copy_selected(state),
        Message::CopySucceeded { slot, generation } => {
            clipboard::handle_copy_succeeded(state, slot, generation)
        }
        Message::CopyFailed { reason } => clipboard::handle_copy_failed(state, reason),
        Message::CopyAckExpired { generation } => clipboard::handle_copy_expired(state, generation),

        // ─────────────────────────────────────────────────────────
        // Theme
        // ─────────────────────────────────────────────────────────
        Message::ToggleTheme => {
            let theme = state.settings.ui.theme.toggled();
            state.settings.ui.theme = theme;
            tracing::info!("Theme switched to {}", theme.label());

            // Only the file layer is saved so CLI and env overrides stay one-off
            match &mut state.settings_file {
                Some(file) => {
                    file.settings.ui.theme = theme;
                    UpdateResult::action(UpdateAction::SaveSettings {
                        path: file.path.clone(),
                        settings: file.settings.clone(),
                    })
                }
                None => UpdateResult::none(),
            }
        }
    }
}
