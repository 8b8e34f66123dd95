//! Message types for the application (TEA pattern)

use optidemon_core::RunOutcome;

use crate::editor::EditorInput;
use crate::input_key::InputKey;
use crate::surface::SlotHandle;

/// All possible messages/actions in the application
#[derive(Debug, Clone)]
pub enum Message {
    /// Keyboard event from terminal
    Key(InputKey),

    /// Tick event for periodic updates
    Tick,

    /// Request to quit
    Quit,

    // ─────────────────────────────────────────────────────────
    // Editor
    // ─────────────────────────────────────────────────────────
    /// Edit the source buffer
    Edit(EditorInput),

    /// Move focus to the editor
    FocusEditor,

    /// Move focus to the results view
    FocusResults,

    // ─────────────────────────────────────────────────────────
    // Pipeline
    // ─────────────────────────────────────────────────────────
    /// Trigger a run with the editor's current contents
    RunRequested,

    /// The run task finished (busy flag already released)
    RunFinished { outcome: RunOutcome },

    // ─────────────────────────────────────────────────────────
    // Results navigation
    // ─────────────────────────────────────────────────────────
    SelectNextSlot,
    SelectPreviousSlot,
    ScrollResultsUp,
    ScrollResultsDown,

    // ─────────────────────────────────────────────────────────
    // Copy action
    // ─────────────────────────────────────────────────────────
    /// Copy the selected slot's text
    CopySelectedSlot,

    /// Clipboard write succeeded
    CopySucceeded { slot: SlotHandle, generation: u64 },

    /// Clipboard write failed
    CopyFailed { reason: String },

    /// The "Copied!" acknowledgement for `generation` has expired
    CopyAckExpired { generation: u64 },

    // ─────────────────────────────────────────────────────────
    // Theme
    // ─────────────────────────────────────────────────────────
    ToggleTheme,
}
