//! Positional rendering of artifacts into slots
//!
//! Slot `i` always receives item `i`. A failure on one slot is logged and
//! skipped so the remaining items still land in their own slots.

use optidemon_core::prelude::*;
use optidemon_core::{EvaluationResult, SectionKind, SlotFooter, TestCase};

use crate::surface::{DisplaySurface, SlotHandle};

/// Anything that can be shown in a result slot.
pub trait SlotContent {
    fn text(&self) -> &str;

    fn footer(&self) -> Option<SlotFooter> {
        None
    }
}

impl SlotContent for TestCase {
    fn text(&self) -> &str {
        TestCase::text(self)
    }
}

/// An evaluation result together with whether it was the fastest.
#[derive(Debug, Clone, Copy)]
pub struct RatedResult<'a> {
    pub result: &'a EvaluationResult,
    pub fastest: bool,
}

impl SlotContent for RatedResult<'_> {
    fn text(&self) -> &str {
        &self.result.code
    }

    fn footer(&self) -> Option<SlotFooter> {
        Some(self.result.footer(self.fastest))
    }
}

/// Create one slot per item in `section`, in order.
///
/// Only appends: slots of previously rendered sections are untouched, and an
/// empty `items` renders nothing. Returns the handles of the created slots.
pub fn render_slots<D, T, L>(
    display: &mut D,
    section: SectionKind,
    items: &[T],
    label_fn: L,
) -> Vec<SlotHandle>
where
    D: DisplaySurface + ?Sized,
    T: SlotContent,
    L: Fn(usize) -> String,
{
    let mut handles = Vec::with_capacity(items.len());

    for (index, item) in items.iter().enumerate() {
        let slot = display.create_slot(section, label_fn(index));

        if let Err(e) = fill_slot(display, slot, item) {
            warn!("Skipping {:?} slot {}: {}", section, index, e);
        }
        handles.push(slot);
    }

    debug!("Rendered {} {:?} slot(s)", handles.len(), section);
    handles
}

fn fill_slot<D, T>(display: &mut D, slot: SlotHandle, item: &T) -> Result<()>
where
    D: DisplaySurface + ?Sized,
    T: SlotContent,
{
    if let Some(footer) = item.footer() {
        display.set_footer(slot, footer)?;
    }
    let view = display.instantiate_read_only(slot, item.text())?;
    display.attach_copy_action(view)
}
