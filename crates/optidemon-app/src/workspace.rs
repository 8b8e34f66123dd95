//! Shared workspace: the results area plus run status
//!
//! The pipeline task renders into the workspace while the front end reads it
//! to draw, so it lives behind a mutex. Every method takes the lock for the
//! duration of one synchronous update and never across an `.await`.
//! The front end and tests watch changes through
//! [`SharedWorkspace::subscribe`], which may lag. The headless runner needs
//! every event and uses [`SharedWorkspace::follow`].

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::{broadcast, mpsc};

use optidemon_core::prelude::*;
use optidemon_core::{PipelinePhase, SectionKind, SlotFooter};

use crate::results::ResultsArea;
use crate::surface::{DisplaySurface, SlotHandle, StatusSurface, ViewHandle};

/// Snapshot of everything the pipeline writes.
#[derive(Debug, Clone, Default)]
pub struct Workspace {
    pub results: ResultsArea,
    pub phase: PipelinePhase,
    /// Error banner text
    pub error: Option<String>,
}

/// Change notifications published by [`SharedWorkspace`].
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineEvent {
    ResultsCleared,
    PhaseChanged {
        from: PipelinePhase,
        to: PipelinePhase,
    },
    SectionOpened {
        section: SectionKind,
    },
    SlotRendered {
        slot: SlotHandle,
        label: String,
        text: String,
        footer: Option<SlotFooter>,
    },
    ErrorShown {
        message: String,
    },
}

/// Clonable handle to the workspace.
#[derive(Debug, Clone)]
pub struct SharedWorkspace {
    inner: Arc<Mutex<Workspace>>,
    events: broadcast::Sender<PipelineEvent>,
    followers: Arc<Mutex<Vec<mpsc::UnboundedSender<PipelineEvent>>>>,
}

impl Default for SharedWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedWorkspace {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(256);
        Self {
            inner: Arc::new(Mutex::new(Workspace::default())),
            events,
            followers: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Bounded feed; a slow receiver sees `Lagged` and loses events.
    pub fn subscribe(&self) -> broadcast::Receiver<PipelineEvent> {
        self.events.subscribe()
    }

    /// Unbounded feed that delivers every event published after the call.
    pub fn follow(&self) -> mpsc::UnboundedReceiver<PipelineEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.followers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(tx);
        rx
    }

    /// Run `f` against the current workspace without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&Workspace) -> R) -> R {
        f(&self.lock())
    }

    pub fn snapshot(&self) -> Workspace {
        self.lock().clone()
    }

    pub fn error(&self) -> Option<String> {
        self.lock().error.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Workspace> {
        // A panicking run must not take the display down with it
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn emit(&self, event: PipelineEvent) {
        self.followers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|tx| tx.send(event.clone()).is_ok());

        // No subscribers is fine
        let _ = self.events.send(event);
    }
}

impl DisplaySurface for SharedWorkspace {
    fn clear(&mut self) {
        self.lock().results.clear();
        self.emit(PipelineEvent::ResultsCleared);
    }

    fn open_section(&mut self, kind: SectionKind) {
        self.lock().results.open_section(kind);
        self.emit(PipelineEvent::SectionOpened { section: kind });
    }

    fn create_slot(&mut self, section: SectionKind, label: String) -> SlotHandle {
        self.lock().results.create_slot(section, label)
    }

    fn instantiate_read_only(&mut self, slot: SlotHandle, text: &str) -> Result<ViewHandle> {
        let (view, event) = {
            let mut ws = self.lock();
            let view = ws.results.instantiate_read_only(slot, text)?;
            let event = ws.results.slot(slot).map(|s| PipelineEvent::SlotRendered {
                slot,
                label: s.label.clone(),
                text: text.to_string(),
                footer: s.footer.clone(),
            });
            (view, event)
        };

        if let Some(event) = event {
            self.emit(event);
        }
        Ok(view)
    }

    fn set_footer(&mut self, slot: SlotHandle, footer: SlotFooter) -> Result<()> {
        self.lock().results.set_footer(slot, footer)
    }

    fn attach_copy_action(&mut self, view: ViewHandle) -> Result<()> {
        self.lock().results.attach_copy_action(view)
    }

    fn editable_value(&self, view: ViewHandle) -> Option<String> {
        self.lock().results.editable_value(view)
    }
}

impl StatusSurface for SharedWorkspace {
    fn phase(&self) -> PipelinePhase {
        self.lock().phase
    }

    fn set_phase(&mut self, phase: PipelinePhase) {
        let from = {
            let mut ws = self.lock();
            let from = ws.phase;
            if from == phase {
                return;
            }
            if !from.can_transition_to(phase) {
                warn!("Unexpected phase transition {:?} -> {:?}", from, phase);
            }
            ws.phase = phase;
            from
        };

        debug!("Phase {:?} -> {:?}", from, phase);
        self.emit(PipelineEvent::PhaseChanged { from, to: phase });
    }

    fn show_error(&mut self, message: &str) {
        self.lock().error = Some(message.to_string());
        self.emit(PipelineEvent::ErrorShown {
            message: message.to_string(),
        });
    }

    fn clear_error(&mut self) {
        self.lock().error = None;
    }
}
