//! Results view widget
//!
//! Renders the workspace: progress heading or error banner, then each section
//! with its labeled slots, code and footers. The selected slot is kept in view
//! and carries the copy hint or the "Copied!" acknowledgement.

use optidemon_app::surface::SlotHandle;
use optidemon_app::workspace::Workspace;
use optidemon_app::Slot;
use optidemon_core::SlotFooter;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::theme::{styles, Palette};

const EMPTY_HINT: &str = "Press Ctrl+R to generate tests and optimizations";
const COPIED: &str = "Copied!";
const COPY_HINT: &str = "[c] copy";
const INDENT: &str = "    ";

pub struct ResultsView<'a> {
    workspace: &'a Workspace,
    palette: &'a Palette,
    focused: bool,
    selected: usize,
    scroll: u16,
    copied: Option<SlotHandle>,
}

impl<'a> ResultsView<'a> {
    pub fn new(workspace: &'a Workspace, palette: &'a Palette) -> Self {
        Self {
            workspace,
            palette,
            focused: false,
            selected: 0,
            scroll: 0,
            copied: None,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Flat index of the selected slot
    pub fn selected(mut self, selected: usize) -> Self {
        self.selected = selected;
        self
    }

    pub fn scroll(mut self, scroll: u16) -> Self {
        self.scroll = scroll;
        self
    }

    /// Slot currently showing the copy acknowledgement
    pub fn copied(mut self, slot: Option<SlotHandle>) -> Self {
        self.copied = slot;
        self
    }

    /// Build the content lines and the line index of the selected slot's label.
    fn build_lines(&self) -> (Vec<Line<'a>>, Option<usize>) {
        let p = self.palette;
        let ws = self.workspace;
        let mut lines = Vec::new();
        let mut selected_line = None;

        if let Some(error) = &ws.error {
            lines.push(Line::from(vec![
                Span::styled("✗ ", styles::failure(p)),
                Span::styled(error.as_str(), styles::failure(p)),
            ]));
            lines.push(Line::default());
        }

        if let Some(heading) = ws.phase.progress_heading() {
            lines.push(Line::styled(heading, styles::accent_bold(p)));
            lines.push(Line::default());
        }

        if lines.is_empty() && ws.results.is_empty() {
            lines.push(Line::styled(EMPTY_HINT, styles::text_muted(p)));
            return (lines, None);
        }

        let mut position = 0;
        for section in ws.results.sections() {
            lines.push(Line::styled(
                format!("── {} ──", section.kind.title()),
                styles::accent_bold(p),
            ));
            for slot in &section.slots {
                let is_selected = position == self.selected;
                if is_selected {
                    selected_line = Some(lines.len());
                }
                lines.push(self.label_line(slot, is_selected));
                if let Some(text) = slot.text() {
                    lines.extend(
                        text.lines()
                            .map(|l| Line::styled(format!("{}{}", INDENT, l), styles::code(p))),
                    );
                }
                if let Some(footer) = &slot.footer {
                    lines.extend(self.footer_lines(footer));
                }
                lines.push(Line::default());
                position += 1;
            }
        }

        (lines, selected_line)
    }

    fn label_line(&self, slot: &Slot, is_selected: bool) -> Line<'a> {
        let p = self.palette;
        let marker = if is_selected { "▶ " } else { "  " };
        let label_style = if is_selected && self.focused {
            styles::focused_selected(p)
        } else if is_selected {
            styles::accent_bold(p)
        } else {
            styles::text_primary(p)
        };

        let mut spans = vec![
            Span::styled(marker, styles::accent(p)),
            Span::styled(slot.label.clone(), label_style),
        ];
        if self.copied == Some(slot.handle) {
            spans.push(Span::styled(format!("  {}", COPIED), styles::success(p)));
        } else if is_selected && self.focused && slot.view.as_ref().is_some_and(|v| v.copyable) {
            spans.push(Span::styled(format!("  {}", COPY_HINT), styles::text_muted(p)));
        }
        Line::from(spans)
    }

    fn footer_lines(&self, footer: &SlotFooter) -> Vec<Line<'a>> {
        let p = self.palette;
        let style = match footer {
            SlotFooter::Failure { .. } => styles::failure(p),
            SlotFooter::Runtime { fastest: true, .. } => styles::success(p),
            SlotFooter::Runtime { .. } => styles::text_secondary(p),
        };
        footer
            .lines()
            .into_iter()
            .map(|l| Line::styled(format!("{}{}", INDENT, l), style))
            .collect()
    }
}

/// Adjust `scroll` so `target` sits inside a window of `height` lines.
pub(crate) fn scroll_into_view(scroll: u16, target: Option<usize>, height: u16) -> u16 {
    let Some(target) = target else {
        return scroll;
    };
    let target = target as u16;
    if height == 0 || target < scroll {
        target
    } else if target >= scroll + height {
        target - height + 1
    } else {
        scroll
    }
}

impl Widget for ResultsView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let p = self.palette;
        let total = self.workspace.results.total_slots();
        let title = if total == 0 {
            " Results ".to_string()
        } else {
            format!(" Results ({}) ", total)
        };
        let block = styles::glass_block(p, self.focused)
            .title(Line::styled(title, styles::accent_bold(p)));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let (lines, selected_line) = self.build_lines();
        // Offset 0 follows the selection; PageUp/PageDown take over until it moves
        let scroll = if self.scroll == 0 {
            scroll_into_view(0, selected_line, inner.height)
        } else {
            self.scroll
        };

        Paragraph::new(lines)
            .style(Style::default().bg(p.card_bg))
            .scroll((scroll, 0))
            .render(inner, buf);
    }
}
