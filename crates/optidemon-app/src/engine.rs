//! Engine - shared orchestration state for TUI and headless runners
//!
//! The Engine owns the TEA state, the message channel, the pipeline
//! controller and the clipboard, so both front ends drive the application the
//! same way: feed messages in, read state and events out.

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};
use tracing::info;

use optidemon_client::RemoteService;

use crate::actions::ActionContext;
use crate::clipboard::ClipboardWriter;
use crate::config::{Settings, SettingsFile, ThemeMode};
use crate::editor::SourceEditor;
use crate::engine_event::EngineEvent;
use crate::message::Message;
use crate::pipeline::PipelineController;
use crate::process;
use crate::signals;
use crate::state::AppState;
use crate::workspace::{PipelineEvent, SharedWorkspace};

/// Lightweight snapshot of state for change detection.
///
/// Captured before message processing, compared after to detect
/// what changed and emit appropriate EngineEvents.
#[derive(Debug, Clone, Copy, PartialEq)]
struct StateSnapshot {
    runs_started: u64,
    runs_finished: u64,
    theme: ThemeMode,
}

impl StateSnapshot {
    fn capture(state: &AppState) -> Self {
        Self {
            runs_started: state.runs_started,
            runs_finished: state.runs_finished,
            theme: state.theme(),
        }
    }
}

/// Orchestration engine for optidemon.
///
/// Generic over the remote service so tests can run it against a scripted
/// backend.
pub struct Engine<S> {
    /// TEA application state (the Model)
    pub state: AppState,

    /// Sender half of the unified message channel.
    /// Clone this to give to input sources (signal handler, key reader).
    pub msg_tx: mpsc::Sender<Message>,

    /// Receiver half of the unified message channel.
    pub msg_rx: mpsc::Receiver<Message>,

    context: ActionContext<S>,

    /// Event broadcaster for external consumers.
    event_tx: broadcast::Sender<EngineEvent>,
}

impl<S> Engine<S>
where
    S: RemoteService + Sync + 'static,
{
    /// Create an engine around `service`.
    ///
    /// `initial_source` pre-fills the editor. Theme changes are written to
    /// `settings_file` when one is given.
    pub fn new(
        service: S,
        settings: Settings,
        settings_file: Option<SettingsFile>,
        initial_source: Option<&str>,
        clipboard: Arc<dyn ClipboardWriter>,
    ) -> Self {
        let editor = initial_source
            .map(SourceEditor::from_text)
            .unwrap_or_default();
        let stage_timeout = settings.service.stage_timeout();
        let state = AppState::new(settings, settings_file, editor);

        let controller = PipelineController::new(Arc::new(service), state.busy.clone())
            .with_stage_timeout(stage_timeout);

        let (msg_tx, msg_rx) = mpsc::channel::<Message>(256);
        let (event_tx, _) = broadcast::channel(256);

        let context = ActionContext {
            msg_tx: msg_tx.clone(),
            controller: Arc::new(controller),
            workspace: state.workspace.clone(),
            clipboard,
        };

        Self {
            state,
            msg_tx,
            msg_rx,
            context,
            event_tx,
        }
    }

    /// Forward SIGINT/SIGTERM as `Message::Quit`.
    pub fn spawn_signal_handler(&self) {
        signals::spawn_signal_handler(self.msg_tx.clone());
    }

    /// Subscribe to engine events.
    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.event_tx.subscribe()
    }

    /// Follow pipeline progress without dropping events.
    pub fn follow_pipeline(&self) -> mpsc::UnboundedReceiver<PipelineEvent> {
        self.state.workspace.follow()
    }

    pub fn workspace(&self) -> &SharedWorkspace {
        &self.state.workspace
    }

    /// Process a single message through the TEA update cycle.
    pub fn process_message(&mut self, msg: Message) {
        let pre = StateSnapshot::capture(&self.state);

        // Outcome is consumed by update(), keep a copy for the event
        let finished = match &msg {
            Message::RunFinished { outcome } => Some(outcome.clone()),
            _ => None,
        };

        process::process_message(&mut self.state, msg, &self.context);

        let post = StateSnapshot::capture(&self.state);
        self.emit_events(&pre, &post, finished);
    }

    /// Drain and process all pending messages from the channel.
    ///
    /// Returns the number of messages processed.
    pub fn drain_pending_messages(&mut self) -> usize {
        let mut count = 0;
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.process_message(msg);
            count += 1;
        }
        count
    }

    /// Get a clone of the message sender for spawning input sources.
    pub fn msg_sender(&self) -> mpsc::Sender<Message> {
        self.msg_tx.clone()
    }

    pub fn should_quit(&self) -> bool {
        self.state.should_quit()
    }

    /// Announce shutdown to subscribers.
    ///
    /// A run still in flight is left to finish on its own task; nothing
    /// cancels it.
    pub fn shutdown(&mut self) {
        info!("Engine shutting down");
        self.emit(EngineEvent::Shutdown);
    }

    fn emit_events(
        &self,
        pre: &StateSnapshot,
        post: &StateSnapshot,
        finished: Option<optidemon_core::RunOutcome>,
    ) {
        if post.runs_started > pre.runs_started {
            self.emit(EngineEvent::RunStarted {
                run: post.runs_started,
            });
        }

        if post.runs_finished > pre.runs_finished {
            if let Some(outcome) = finished {
                self.emit(EngineEvent::RunFinished {
                    run: post.runs_finished,
                    outcome,
                });
            }
        }

        if post.theme != pre.theme {
            self.emit(EngineEvent::ThemeChanged { theme: post.theme });
        }
    }

    fn emit(&self, event: EngineEvent) {
        // No subscribers is fine
        let _ = self.event_tx.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::NullClipboard;
    use crate::input_key::InputKey;
    use optidemon_client::test_utils::ScriptedService;
    use optidemon_core::{PipelinePhase, RunOutcome, SectionKind};
    use std::time::Duration;

    fn engine(service: ScriptedService, source: &str) -> Engine<ScriptedService> {
        Engine::new(
            service,
            Settings::default(),
            None,
            Some(source),
            Arc::new(NullClipboard),
        )
    }

    /// Process messages until a run finishes.
    async fn run_to_completion(engine: &mut Engine<ScriptedService>) -> RunOutcome {
        loop {
            let msg = tokio::time::timeout(Duration::from_secs(5), engine.msg_rx.recv())
                .await
                .expect("run did not finish")
                .expect("channel closed");
            let outcome = match &msg {
                Message::RunFinished { outcome } => Some(outcome.clone()),
                _ => None,
            };
            engine.process_message(msg);
            if let Some(outcome) = outcome {
                return outcome;
            }
        }
    }

    #[tokio::test]
    async fn test_ctrl_r_runs_editor_contents() {
        let service = ScriptedService::new().with_test_cases(["assert f() is None"]);
        let mut engine = engine(service.clone(), "def f(): pass");
        let mut events = engine.subscribe();

        engine.process_message(Message::Key(InputKey::CharCtrl('r')));
        assert!(engine.state.is_busy());
        assert_eq!(events.try_recv().unwrap(), EngineEvent::RunStarted { run: 1 });

        let outcome = run_to_completion(&mut engine).await;
        assert!(outcome.is_success());
        assert!(!engine.state.is_busy());
        assert_eq!(
            events.try_recv().unwrap(),
            EngineEvent::RunFinished { run: 1, outcome }
        );

        let snapshot = engine.workspace().snapshot();
        assert_eq!(snapshot.phase, PipelinePhase::Success);
        assert_eq!(snapshot.results.slot_count(SectionKind::TestCases), 1);
    }

    #[tokio::test]
    async fn test_trigger_while_busy_is_ignored() {
        let service = ScriptedService::new().with_latency(Duration::from_millis(50));
        let mut engine = engine(service.clone(), "x = 1");

        engine.process_message(Message::RunRequested);
        engine.process_message(Message::RunRequested);
        engine.process_message(Message::Key(InputKey::F(5)));
        assert_eq!(engine.state.runs_started, 1);

        run_to_completion(&mut engine).await;
        assert_eq!(service.call_count(optidemon_core::Stage::GenerateTests), 1);

        // Busy released: a new trigger is accepted
        engine.process_message(Message::RunRequested);
        assert_eq!(engine.state.runs_started, 2);
        run_to_completion(&mut engine).await;
    }

    #[tokio::test]
    async fn test_blank_editor_fails_validation_without_calls() {
        let service = ScriptedService::new();
        let mut engine = engine(service.clone(), "   \n  ");

        engine.process_message(Message::RunRequested);
        let outcome = run_to_completion(&mut engine).await;

        assert!(matches!(outcome, RunOutcome::Failed { stage: None, .. }));
        assert!(service.calls().is_empty());
        assert_eq!(
            engine.workspace().error().as_deref(),
            Some(optidemon_core::EMPTY_SOURCE_MESSAGE)
        );
    }

    #[tokio::test]
    async fn test_theme_toggle_emits_event() {
        let mut engine = engine(ScriptedService::new(), "");
        let mut events = engine.subscribe();

        engine.process_message(Message::Key(InputKey::CharCtrl('t')));
        assert_eq!(engine.state.theme(), ThemeMode::Light);
        assert_eq!(
            events.try_recv().unwrap(),
            EngineEvent::ThemeChanged {
                theme: ThemeMode::Light
            }
        );
    }

    #[tokio::test]
    async fn test_quit_key() {
        let mut engine = engine(ScriptedService::new(), "");
        engine.process_message(Message::Key(InputKey::CharCtrl('q')));
        assert!(engine.should_quit());
    }
}
