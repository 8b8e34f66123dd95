//! Status bar widget
//!
//! Displays the pipeline phase, transient notices, the theme and the keys
//! available in the focused pane.

use optidemon_app::state::{AppState, Focus};
use optidemon_core::PipelinePhase;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::theme::{styles, Palette};

pub struct StatusBar<'a> {
    state: &'a AppState,
    phase: PipelinePhase,
    palette: &'a Palette,
}

impl<'a> StatusBar<'a> {
    pub fn new(state: &'a AppState, phase: PipelinePhase, palette: &'a Palette) -> Self {
        Self {
            state,
            phase,
            palette,
        }
    }

    fn left(&self) -> Line<'a> {
        let p = self.palette;
        let state = self.state;
        let (icon, label, style) = styles::phase_indicator(p, self.phase);
        let mut spans = vec![Span::styled(format!(" {} {}", icon, label), style)];

        if state.runs_finished > 0 {
            spans.push(Span::styled(
                format!(" │ runs: {}", state.runs_finished),
                styles::text_muted(p),
            ));
        }
        if let Some(notice) = &state.notice {
            spans.push(Span::styled(" │ ", styles::text_muted(p)));
            spans.push(Span::styled(notice.as_str(), styles::failure(p)));
        }
        Line::from(spans)
    }

    fn right(&self) -> Line<'static> {
        let p = self.palette;
        let hints: &[(&str, &str)] = match self.state.focus {
            Focus::Editor => &[("Esc", "results")],
            Focus::Results => &[("↑↓", "select"), ("c", "copy"), ("Tab", "edit")],
        };

        let mut spans = Vec::new();
        for (key, action) in hints {
            spans.push(Span::styled(key.to_string(), styles::keybinding(p)));
            spans.push(Span::styled(format!(" {}  ", action), styles::text_secondary(p)));
        }
        spans.push(Span::styled(
            format!("{} ", self.state.theme().label()),
            styles::text_muted(p),
        ));
        Line::from(spans)
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(self.palette.card_bg));

        let right = self.right();
        let right_width = (right.width() as u16).min(area.width / 2);
        let [left_area, right_area] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(right_width)]).areas(area);

        Paragraph::new(self.left()).render(left_area, buf);
        Paragraph::new(right)
            .alignment(Alignment::Right)
            .render(right_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;
    use crate::theme::palette::DARK;

    fn render(state: &AppState, phase: PipelinePhase) -> TestTerminal {
        let mut term = TestTerminal::new();
        term.render_widget(StatusBar::new(state, phase, &DARK), Rect::new(0, 0, 80, 1));
        term
    }

    #[test]
    fn test_shows_phase_label() {
        let state = AppState::default();
        let term = render(&state, PipelinePhase::GeneratingTests);
        assert!(term.line_contains(0, "↻ Generating tests"));
    }

    #[test]
    fn test_shows_notice() {
        let mut state = AppState::default();
        state.notice = Some("Copy failed: no tty".into());
        let term = render(&state, PipelinePhase::Success);
        assert!(term.line_contains(0, "● Done"));
        assert!(term.line_contains(0, "Copy failed: no tty"));
    }

    #[test]
    fn test_hints_follow_focus() {
        let mut state = AppState::default();
        let term = render(&state, PipelinePhase::Idle);
        assert!(term.line_contains(0, "Esc results"));
        assert!(term.line_contains(0, "dark"));

        state.focus = Focus::Results;
        let term = render(&state, PipelinePhase::Idle);
        assert!(term.line_contains(0, "c copy"));
    }
}
