//! Header bar widget
//!
//! Shows the app title, the backend endpoint, and the global keybindings.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::theme::{styles, Palette};

pub struct MainHeader<'a> {
    palette: &'a Palette,
    endpoint: &'a str,
}

impl<'a> MainHeader<'a> {
    pub fn new(palette: &'a Palette, endpoint: &'a str) -> Self {
        Self { palette, endpoint }
    }

    fn title(&self) -> Line<'a> {
        Line::from(vec![
            Span::styled(" optidemon", styles::accent_bold(self.palette)),
            Span::styled(" │ ", styles::text_muted(self.palette)),
            Span::styled(self.endpoint, styles::text_secondary(self.palette)),
        ])
    }

    fn hints(&self) -> Line<'static> {
        let p = self.palette;
        let mut spans = Vec::new();
        for (i, (key, action)) in [("Ctrl+R", "Run"), ("Ctrl+T", "Theme"), ("Ctrl+Q", "Quit")]
            .into_iter()
            .enumerate()
        {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(format!("[{}]", key), styles::keybinding(p)));
            spans.push(Span::styled(format!(" {}", action), styles::text_secondary(p)));
        }
        Line::from(spans)
    }
}

impl Widget for MainHeader<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(self.palette, false);
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let hints = self.hints();
        let hints_width = hints.width() as u16;

        // Drop the hints before truncating the title
        if inner.width < hints_width + 20 {
            Paragraph::new(self.title()).render(inner, buf);
            return;
        }

        let [title_area, hints_area] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(hints_width)]).areas(inner);
        Paragraph::new(self.title()).render(title_area, buf);
        Paragraph::new(hints)
            .alignment(Alignment::Right)
            .render(hints_area, buf);
    }
}
