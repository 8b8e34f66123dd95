//! Copy action handlers
//!
//! Independent of the run: nothing here reads or writes the busy flag.

use tracing::warn;

use crate::state::{AppState, CopyAck};
use crate::surface::{DisplaySurface, SlotHandle, ViewHandle};

use super::{UpdateAction, UpdateResult};

pub fn handle_copy_selected(state: &mut AppState) -> UpdateResult {
    // Only views with a copy action attached can be copied
    let copyable = state.workspace.with(|ws| {
        let slot = ws.results.slot_at(state.selected_slot)?;
        slot.view.as_ref().filter(|v| v.copyable)?;
        Some(slot.handle)
    });

    let Some(slot) = copyable else {
        return UpdateResult::none();
    };
    let Some(text) = state.workspace.editable_value(ViewHandle::new(slot)) else {
        return UpdateResult::none();
    };

    state.copy_generation += 1;
    UpdateResult::action(UpdateAction::CopyToClipboard {
        slot,
        text,
        generation: state.copy_generation,
    })
}

pub fn handle_copy_succeeded(state: &mut AppState, slot: SlotHandle, generation: u64) -> UpdateResult {
    // A newer copy already superseded this one
    if generation != state.copy_generation {
        return UpdateResult::none();
    }

    state.copy_ack = Some(CopyAck { slot, generation });
    state.notice = None;
    UpdateResult::action(UpdateAction::ScheduleCopyRevert {
        generation,
        delay: state.settings.ui.copy_ack(),
    })
}

pub fn handle_copy_failed(state: &mut AppState, reason: String) -> UpdateResult {
    warn!("Copy failed: {}", reason);
    state.copy_ack = None;
    state.notice = Some(format!("Copy failed: {}", reason));
    UpdateResult::none()
}

pub fn handle_copy_expired(state: &mut AppState, generation: u64) -> UpdateResult {
    if state.copy_ack.is_some_and(|ack| ack.generation == generation) {
        state.copy_ack = None;
    }
    UpdateResult::none()
}
