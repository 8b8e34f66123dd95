//! Application state (Model in TEA pattern)

use optidemon_core::RunOutcome;

use crate::config::{Settings, SettingsFile, ThemeMode};
use crate::editor::SourceEditor;
use crate::pipeline::BusyFlag;
use crate::surface::SlotHandle;
use crate::workspace::SharedWorkspace;

/// Which pane receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Editor,
    Results,
}

/// Whether the application keeps running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppLifecycle {
    #[default]
    Running,
    Quitting,
}

/// Active "Copied!" acknowledgement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyAck {
    pub slot: SlotHandle,
    pub generation: u64,
}

/// Complete application state (the Model in TEA)
#[derive(Debug)]
pub struct AppState {
    pub lifecycle: AppLifecycle,

    /// Editable source buffer, read when a run starts
    pub editor: SourceEditor,

    pub focus: Focus,

    /// Results area and run status, shared with the run task
    pub workspace: SharedWorkspace,

    /// Set while a run is in flight
    pub busy: BusyFlag,

    /// Flat index of the selected slot in the results view
    pub selected_slot: usize,

    /// Results view scroll offset (lines)
    pub results_scroll: u16,

    pub copy_ack: Option<CopyAck>,

    /// Bumped on every copy so stale revert timers are ignored
    pub copy_generation: u64,

    /// Transient note for the status bar (clipboard failures and the like)
    pub notice: Option<String>,

    pub last_outcome: Option<RunOutcome>,

    pub runs_started: u64,
    pub runs_finished: u64,

    pub settings: Settings,

    /// Config file layer that settings changes are written to
    pub settings_file: Option<SettingsFile>,
}

impl AppState {
    pub fn new(
        settings: Settings,
        settings_file: Option<SettingsFile>,
        editor: SourceEditor,
    ) -> Self {
        Self {
            lifecycle: AppLifecycle::Running,
            editor,
            focus: Focus::Editor,
            workspace: SharedWorkspace::new(),
            busy: BusyFlag::new(),
            selected_slot: 0,
            results_scroll: 0,
            copy_ack: None,
            copy_generation: 0,
            notice: None,
            last_outcome: None,
            runs_started: 0,
            runs_finished: 0,
            settings,
            settings_file,
        }
    }

    pub fn theme(&self) -> ThemeMode {
        self.settings.ui.theme
    }

    pub fn is_busy(&self) -> bool {
        self.busy.is_busy()
    }

    /// Whether the "Copied!" acknowledgement is showing on `slot`.
    pub fn is_copy_acknowledged(&self, slot: SlotHandle) -> bool {
        self.copy_ack.is_some_and(|ack| ack.slot == slot)
    }

    pub fn request_quit(&mut self) {
        self.lifecycle = AppLifecycle::Quitting;
    }

    pub fn should_quit(&self) -> bool {
        self.lifecycle == AppLifecycle::Quitting
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Settings::default(), None, SourceEditor::new())
    }
}
