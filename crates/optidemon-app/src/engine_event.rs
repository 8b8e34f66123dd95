//! Domain events emitted by the Engine for external consumers
//!
//! Pipeline-level detail (phases, slots, errors) is published by the
//! workspace itself; these events cover the application around it.

use optidemon_core::RunOutcome;

use crate::config::ThemeMode;

/// Events broadcast after each message processing cycle via
/// `Engine::subscribe()`.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// A run was accepted and its task spawned
    RunStarted { run: u64 },

    /// A run reached its terminal outcome
    RunFinished { run: u64, outcome: RunOutcome },

    /// The theme was toggled
    ThemeChanged { theme: ThemeMode },

    /// The engine is shutting down
    Shutdown,
}

impl EngineEvent {
    /// Event type as a string, for logging and serialization
    pub fn event_type(&self) -> &'static str {
        match self {
            EngineEvent::RunStarted { .. } => "run_started",
            EngineEvent::RunFinished { .. } => "run_finished",
            EngineEvent::ThemeChanged { .. } => "theme_changed",
            EngineEvent::Shutdown => "shutdown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_types() {
        assert_eq!(EngineEvent::RunStarted { run: 1 }.event_type(), "run_started");
        assert_eq!(EngineEvent::Shutdown.event_type(), "shutdown");
        assert_eq!(
            EngineEvent::ThemeChanged {
                theme: ThemeMode::Light
            }
            .event_type(),
            "theme_changed"
        );
    }
}
