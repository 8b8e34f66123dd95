//! Source editor pane
//!
//! Draws the editable buffer with a line-number gutter and keeps the cursor
//! row and column in view.

use optidemon_app::editor::SourceEditor;
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthChar;

use crate::theme::{styles, Palette};

const PLACEHOLDER: &str = "Type or paste code, then press Ctrl+R";

pub struct EditorPane<'a> {
    editor: &'a SourceEditor,
    palette: &'a Palette,
    focused: bool,
}

/// Where the text lands inside the pane for the current cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Viewport {
    text_area: Rect,
    gutter: Rect,
    row_offset: u16,
    col_offset: u16,
}

impl<'a> EditorPane<'a> {
    pub fn new(editor: &'a SourceEditor, palette: &'a Palette, focused: bool) -> Self {
        Self {
            editor,
            palette,
            focused,
        }
    }

    /// Terminal cursor position for `area`, when the pane has focus.
    pub fn cursor_position(&self, area: Rect) -> Option<Position> {
        if !self.focused {
            return None;
        }
        let vp = self.viewport(area)?;
        let (row, _) = self.editor.cursor();
        let x = vp.text_area.x + (self.cursor_display_col() as u16).saturating_sub(vp.col_offset);
        let y = vp.text_area.y + (row as u16).saturating_sub(vp.row_offset);
        Some(Position::new(x, y))
    }

    fn gutter_width(&self) -> u16 {
        let digits = self.editor.lines().len().to_string().len() as u16;
        digits.max(3) + 1
    }

    /// Display width of the text left of the cursor
    fn cursor_display_col(&self) -> usize {
        let (row, col) = self.editor.cursor();
        self.editor.lines()[row]
            .chars()
            .take(col)
            .map(|c| c.width().unwrap_or(0))
            .sum()
    }

    fn viewport(&self, area: Rect) -> Option<Viewport> {
        let inner = styles::glass_block(self.palette, self.focused).inner(area);
        let gutter_width = self.gutter_width();
        if inner.height == 0 || inner.width <= gutter_width {
            return None;
        }

        let gutter = Rect::new(inner.x, inner.y, gutter_width, inner.height);
        let text_area = Rect::new(
            inner.x + gutter_width,
            inner.y,
            inner.width - gutter_width,
            inner.height,
        );

        let (row, _) = self.editor.cursor();
        let row_offset = (row as u16).saturating_sub(text_area.height - 1);
        let col_offset = (self.cursor_display_col() as u16).saturating_sub(text_area.width - 1);

        Some(Viewport {
            text_area,
            gutter,
            row_offset,
            col_offset,
        })
    }
}

impl Widget for EditorPane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let p = self.palette;
        let block = styles::glass_block(p, self.focused)
            .title(Line::styled(" Source ", styles::accent_bold(p)));
        let Some(vp) = self.viewport(area) else {
            block.render(area, buf);
            return;
        };
        block.render(area, buf);

        let numbers: Vec<Line> = (1..=self.editor.lines().len())
            .map(|n| {
                Line::from(Span::styled(
                    format!("{:>width$} ", n, width = vp.gutter.width as usize - 1),
                    styles::text_muted(p),
                ))
            })
            .collect();
        Paragraph::new(numbers)
            .scroll((vp.row_offset, 0))
            .render(vp.gutter, buf);

        if self.editor.is_blank() && !self.focused {
            Paragraph::new(Line::styled(PLACEHOLDER, styles::text_muted(p))).render(vp.text_area, buf);
            return;
        }

        let lines: Vec<Line> = self
            .editor
            .lines()
            .iter()
            .map(|l| Line::styled(l.as_str(), styles::code(p)))
            .collect();
        Paragraph::new(lines)
            .scroll((vp.row_offset, vp.col_offset))
            .render(vp.text_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;
    use crate::theme::palette::DARK;

    #[test]
    fn test_renders_lines_with_numbers() {
        let editor = SourceEditor::from_text("def f():\n    return 1");
        let mut term = TestTerminal::new();
        term.render_widget(EditorPane::new(&editor, &DARK, true), Rect::new(0, 0, 40, 6));

        assert!(term.line_contains(0, "Source"));
        assert!(term.line_contains(1, "  1 def f():"));
        assert!(term.line_contains(2, "  2     return 1"));
    }

    #[test]
    fn test_cursor_follows_last_line() {
        let editor = SourceEditor::from_text("x = 1\ny = 22");
        let pane = EditorPane::new(&editor, &DARK, true);
        // border (1) + gutter (4) + "y = 22" (6)
        assert_eq!(
            pane.cursor_position(Rect::new(0, 0, 40, 6)),
            Some(Position::new(11, 2))
        );
    }

    #[test]
    fn test_no_cursor_without_focus() {
        let editor = SourceEditor::from_text("x");
        let pane = EditorPane::new(&editor, &DARK, false);
        assert_eq!(pane.cursor_position(Rect::new(0, 0, 40, 6)), None);
    }

    #[test]
    fn test_scrolls_to_keep_cursor_visible() {
        let text: Vec<String> = (1..=10).map(|i| format!("line{}", i)).collect();
        let editor = SourceEditor::from_text(&text.join("\n"));
        let mut term = TestTerminal::new();
        // 4 visible rows, cursor on row 10
        let area = Rect::new(0, 0, 40, 6);
        term.render_widget(EditorPane::new(&editor, &DARK, true), area);

        assert!(term.line_contains(4, " 10 line10"));
        assert!(!term.buffer_contains("line6"));
        assert_eq!(
            EditorPane::new(&editor, &DARK, true).cursor_position(area),
            Some(Position::new(11, 4))
        );
    }

    #[test]
    fn test_blank_unfocused_editor_shows_placeholder() {
        let editor = SourceEditor::new();
        let mut term = TestTerminal::new();
        term.render_widget(EditorPane::new(&editor, &DARK, false), Rect::new(0, 0, 60, 6));
        assert!(term.buffer_contains("Type or paste code"));
    }
}
