//! In-memory results area
//!
//! Sections are kept in the order they were opened. Each section owns its
//! slots, and slots are only ever appended, so handing out positional
//! [`SlotHandle`]s is safe for the lifetime of a run.

use std::fmt::Write as _;

use optidemon_core::prelude::*;
use optidemon_core::{SectionKind, SlotFooter};

use crate::surface::{DisplaySurface, SlotHandle, ViewHandle};

/// Read-only code view inside a slot.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeView {
    pub text: String,
    pub copyable: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    pub handle: SlotHandle,
    pub label: String,
    pub view: Option<CodeView>,
    pub footer: Option<SlotFooter>,
}

impl Slot {
    /// Text of the view, if one was instantiated.
    pub fn text(&self) -> Option<&str> {
        self.view.as_ref().map(|v| v.text.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub kind: SectionKind,
    pub slots: Vec<Slot>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultsArea {
    sections: Vec<Section>,
}

impl ResultsArea {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, kind: SectionKind) -> Option<&Section> {
        self.sections.iter().rev().find(|s| s.kind == kind)
    }

    fn section_mut(&mut self, kind: SectionKind) -> Option<&mut Section> {
        self.sections.iter_mut().rev().find(|s| s.kind == kind)
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn slot(&self, handle: SlotHandle) -> Option<&Slot> {
        self.section(handle.section)?.slots.get(handle.index)
    }

    fn slot_mut(&mut self, handle: SlotHandle) -> Option<&mut Slot> {
        self.section_mut(handle.section)?.slots.get_mut(handle.index)
    }

    pub fn slot_count(&self, kind: SectionKind) -> usize {
        self.section(kind).map_or(0, |s| s.slots.len())
    }

    /// All slots across sections, in display order.
    pub fn slots(&self) -> impl Iterator<Item = &Slot> {
        self.sections.iter().flat_map(|s| s.slots.iter())
    }

    pub fn total_slots(&self) -> usize {
        self.sections.iter().map(|s| s.slots.len()).sum()
    }

    /// Slot at a flat display position.
    pub fn slot_at(&self, position: usize) -> Option<&Slot> {
        self.slots().nth(position)
    }

    /// Plain-text transcript of the area, one block per slot.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for (i, section) in self.sections.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            let _ = writeln!(out, "== {} ==", section.kind.title());
            for slot in &section.slots {
                let _ = writeln!(out, "-- {} --", slot.label);
                if let Some(text) = slot.text() {
                    let _ = writeln!(out, "{}", text);
                }
                if let Some(footer) = &slot.footer {
                    for line in footer.lines() {
                        let _ = writeln!(out, "{}", line);
                    }
                }
            }
        }
        out
    }

    fn missing(handle: SlotHandle) -> Error {
        Error::render(format!(
            "no slot {} in section {:?}",
            handle.index, handle.section
        ))
    }
}

impl DisplaySurface for ResultsArea {
    fn clear(&mut self) {
        self.sections.clear();
    }

    fn open_section(&mut self, kind: SectionKind) {
        self.sections.push(Section {
            kind,
            slots: Vec::new(),
        });
    }

    fn create_slot(&mut self, section: SectionKind, label: String) -> SlotHandle {
        if self.section(section).is_none() {
            self.open_section(section);
        }

        // open_section above guarantees the section exists
        let Some(target) = self.section_mut(section) else {
            return SlotHandle::new(section, 0);
        };

        let handle = SlotHandle::new(section, target.slots.len());
        target.slots.push(Slot {
            handle,
            label,
            view: None,
            footer: None,
        });
        handle
    }

    fn instantiate_read_only(&mut self, slot: SlotHandle, text: &str) -> Result<ViewHandle> {
        let target = self.slot_mut(slot).ok_or_else(|| Self::missing(slot))?;
        target.view = Some(CodeView {
            text: text.to_string(),
            copyable: false,
        });
        Ok(ViewHandle::new(slot))
    }

    fn set_footer(&mut self, slot: SlotHandle, footer: SlotFooter) -> Result<()> {
        let target = self.slot_mut(slot).ok_or_else(|| Self::missing(slot))?;
        target.footer = Some(footer);
        Ok(())
    }

    fn attach_copy_action(&mut self, view: ViewHandle) -> Result<()> {
        let slot = view.slot();
        let code_view = self
            .slot_mut(slot)
            .and_then(|s| s.view.as_mut())
            .ok_or_else(|| Self::missing(slot))?;
        code_view.copyable = true;
        Ok(())
    }

    fn editable_value(&self, view: ViewHandle) -> Option<String> {
        self.slot(view.slot())?.text().map(str::to_string)
    }
}
