//! Run trigger and completion handlers

use optidemon_core::RunOutcome;
use tracing::{debug, info};

use crate::state::AppState;

use super::{UpdateAction, UpdateResult};

/// Claim the busy flag and hand the editor contents to the run task.
///
/// A trigger while a run is active is dropped here, never queued.
pub fn handle_run_requested(state: &mut AppState) -> UpdateResult {
    let Some(guard) = state.busy.try_acquire() else {
        debug!("Run already in progress, ignoring trigger");
        return UpdateResult::none();
    };

    state.runs_started += 1;
    state.selected_slot = 0;
    state.results_scroll = 0;
    state.copy_ack = None;
    state.notice = None;

    UpdateResult::action(UpdateAction::RunPipeline {
        source: state.editor.value(),
        guard,
    })
}

pub fn handle_run_finished(state: &mut AppState, outcome: RunOutcome) -> UpdateResult {
    info!("Run finished: {:?}", outcome);
    state.runs_finished += 1;

    let total = state.workspace.with(|ws| ws.results.total_slots());
    if state.selected_slot >= total {
        state.selected_slot = total.saturating_sub(1);
    }

    state.last_outcome = Some(outcome);
    UpdateResult::none()
}
