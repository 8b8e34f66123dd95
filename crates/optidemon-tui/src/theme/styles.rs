//! Semantic style builders.

use optidemon_core::PipelinePhase;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders};

use super::Palette;

// --- Text styles ---
pub fn text_primary(p: &Palette) -> Style {
    Style::default().fg(p.text_primary)
}

pub fn text_secondary(p: &Palette) -> Style {
    Style::default().fg(p.text_secondary)
}

pub fn text_muted(p: &Palette) -> Style {
    Style::default().fg(p.text_muted)
}

pub fn code(p: &Palette) -> Style {
    Style::default().fg(p.code)
}

// --- Accent styles ---
pub fn accent(p: &Palette) -> Style {
    Style::default().fg(p.accent)
}

pub fn accent_bold(p: &Palette) -> Style {
    accent(p).add_modifier(Modifier::BOLD)
}

pub fn keybinding(p: &Palette) -> Style {
    Style::default().fg(p.status_yellow)
}

// --- Status styles ---
pub fn success(p: &Palette) -> Style {
    Style::default().fg(p.status_green)
}

pub fn failure(p: &Palette) -> Style {
    Style::default().fg(p.status_red)
}

/// Focused + selected items
pub fn focused_selected(p: &Palette) -> Style {
    Style::default()
        .fg(p.contrast_fg)
        .bg(p.accent)
        .add_modifier(Modifier::BOLD)
}

// --- Block builders ---
pub fn glass_block(p: &Palette, focused: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(if focused {
            p.border_active
        } else {
            p.border_dim
        }))
        .style(Style::default().bg(p.card_bg))
}

// --- Phase indicator mapping ---

/// Returns `(icon, label, style)` for the given pipeline phase.
pub fn phase_indicator(p: &Palette, phase: PipelinePhase) -> (&'static str, &'static str, Style) {
    let style = match phase {
        PipelinePhase::Idle => text_muted(p),
        PipelinePhase::GeneratingTests
        | PipelinePhase::GeneratingOptimizations
        | PipelinePhase::Evaluating => Style::default()
            .fg(p.status_yellow)
            .add_modifier(Modifier::BOLD),
        PipelinePhase::Success => success(p).add_modifier(Modifier::BOLD),
        PipelinePhase::Error => failure(p).add_modifier(Modifier::BOLD),
    };
    let icon = match phase {
        PipelinePhase::Idle => "○",
        PipelinePhase::GeneratingTests
        | PipelinePhase::GeneratingOptimizations
        | PipelinePhase::Evaluating => "↻",
        PipelinePhase::Success => "●",
        PipelinePhase::Error => "✗",
    };
    (icon, phase.label(), style)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::palette::DARK;

    #[test]
    fn test_phase_indicator_labels() {
        let (icon, label, _) = phase_indicator(&DARK, PipelinePhase::Evaluating);
        assert_eq!(icon, "↻");
        assert_eq!(label, "Evaluating");

        let (_, _, style) = phase_indicator(&DARK, PipelinePhase::Error);
        assert_eq!(style.fg, Some(DARK.status_red));
    }
}
