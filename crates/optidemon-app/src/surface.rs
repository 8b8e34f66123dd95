//! Display and status capabilities consumed by the pipeline
//!
//! The pipeline never touches a concrete widget. It renders through
//! [`DisplaySurface`] and reports lifecycle through [`StatusSurface`], so it
//! can be driven against the in-memory [`ResultsArea`](crate::ResultsArea),
//! the shared [`SharedWorkspace`](crate::SharedWorkspace), or a test fake.

use optidemon_core::prelude::*;
use optidemon_core::{PipelinePhase, SectionKind, SlotFooter};

/// Position of a slot in the results area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotHandle {
    pub section: SectionKind,
    pub index: usize,
}

impl SlotHandle {
    pub fn new(section: SectionKind, index: usize) -> Self {
        Self { section, index }
    }
}

/// A read-only code view materialized inside a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewHandle(SlotHandle);

impl ViewHandle {
    pub fn new(slot: SlotHandle) -> Self {
        Self(slot)
    }

    pub fn slot(&self) -> SlotHandle {
        self.0
    }
}

/// Where rendered artifacts go.
pub trait DisplaySurface {
    /// Drop every section and slot.
    fn clear(&mut self);

    /// Start a new section after the existing ones.
    fn open_section(&mut self, kind: SectionKind);

    /// Append an empty slot to the last section of `kind`.
    fn create_slot(&mut self, section: SectionKind, label: String) -> SlotHandle;

    /// Put a read-only view holding `text` into `slot`.
    ///
    /// Fails with [`Error::Render`] when the slot does not exist.
    fn instantiate_read_only(&mut self, slot: SlotHandle, text: &str) -> Result<ViewHandle>;

    fn set_footer(&mut self, slot: SlotHandle, footer: SlotFooter) -> Result<()>;

    /// Make the view copyable.
    fn attach_copy_action(&mut self, view: ViewHandle) -> Result<()>;

    /// Current text of a view.
    fn editable_value(&self, view: ViewHandle) -> Option<String>;
}

/// Busy/phase indication and the error banner.
pub trait StatusSurface {
    fn phase(&self) -> PipelinePhase;

    fn set_phase(&mut self, phase: PipelinePhase);

    fn show_error(&mut self, message: &str);

    fn clear_error(&mut self);
}
