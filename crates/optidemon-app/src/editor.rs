//! Source editor buffer
//!
//! The one editable view of the application. It is created at startup
//! (optionally pre-filled from a file), lives in [`AppState`](crate::AppState)
//! for the whole session, and is read when a run is triggered.

/// Single editing operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorInput {
    Insert(char),
    Newline,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    /// Insert spaces up to the next indent stop
    Indent,
}

/// Indent width used by [`EditorInput::Indent`].
pub const INDENT_WIDTH: usize = 4;

/// Multi-line text buffer with a cursor.
///
/// The cursor column counts characters, not bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEditor {
    lines: Vec<String>,
    row: usize,
    col: usize,
}

impl Default for SourceEditor {
    fn default() -> Self {
        Self {
            lines: vec![String::new()],
            row: 0,
            col: 0,
        }
    }
}

impl SourceEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Editor holding `text` with the cursor at the end.
    pub fn from_text(text: &str) -> Self {
        let mut lines: Vec<String> = text.split('\n').map(|l| l.trim_end_matches('\r').to_string()).collect();
        if lines.is_empty() {
            lines.push(String::new());
        }
        let row = lines.len() - 1;
        let col = lines[row].chars().count();
        Self { lines, row, col }
    }

    /// Current buffer contents.
    pub fn value(&self) -> String {
        self.lines.join("\n")
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// `(row, column)` of the cursor.
    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    pub fn is_blank(&self) -> bool {
        self.lines.iter().all(|l| l.trim().is_empty())
    }

    pub fn apply(&mut self, input: EditorInput) {
        match input {
            EditorInput::Insert(c) => self.insert_char(c),
            EditorInput::Newline => self.newline(),
            EditorInput::Backspace => self.backspace(),
            EditorInput::Delete => self.delete(),
            EditorInput::Left => self.move_left(),
            EditorInput::Right => self.move_right(),
            EditorInput::Up => self.move_vertical(-1),
            EditorInput::Down => self.move_vertical(1),
            EditorInput::Home => self.col = 0,
            EditorInput::End => self.col = self.line_len(self.row),
            EditorInput::Indent => {
                let spaces = INDENT_WIDTH - (self.col % INDENT_WIDTH);
                for _ in 0..spaces {
                    self.insert_char(' ');
                }
            }
        }
    }

    fn line_len(&self, row: usize) -> usize {
        self.lines.get(row).map_or(0, |l| l.chars().count())
    }

    /// Byte offset of the cursor in the current line.
    fn byte_offset(&self) -> usize {
        let line = &self.lines[self.row];
        line.char_indices()
            .nth(self.col)
            .map_or(line.len(), |(i, _)| i)
    }

    fn insert_char(&mut self, c: char) {
        if c == '\n' {
            self.newline();
            return;
        }
        let offset = self.byte_offset();
        self.lines[self.row].insert(offset, c);
        self.col += 1;
    }

    fn newline(&mut self) {
        let offset = self.byte_offset();
        let rest = self.lines[self.row].split_off(offset);
        self.lines.insert(self.row + 1, rest);
        self.row += 1;
        self.col = 0;
    }

    fn backspace(&mut self) {
        if self.col > 0 {
            self.col -= 1;
            let offset = self.byte_offset();
            self.lines[self.row].remove(offset);
        } else if self.row > 0 {
            let current = self.lines.remove(self.row);
            self.row -= 1;
            self.col = self.line_len(self.row);
            self.lines[self.row].push_str(&current);
        }
    }

    fn delete(&mut self) {
        if self.col < self.line_len(self.row) {
            let offset = self.byte_offset();
            self.lines[self.row].remove(offset);
        } else if self.row + 1 < self.lines.len() {
            let next = self.lines.remove(self.row + 1);
            self.lines[self.row].push_str(&next);
        }
    }

    fn move_left(&mut self) {
        if self.col > 0 {
            self.col -= 1;
        } else if self.row > 0 {
            self.row -= 1;
            self.col = self.line_len(self.row);
        }
    }

    fn move_right(&mut self) {
        if self.col < self.line_len(self.row) {
            self.col += 1;
        } else if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = 0;
        }
    }

    fn move_vertical(&mut self, delta: isize) {
        let target = self.row as isize + delta;
        if target < 0 || target as usize >= self.lines.len() {
            return;
        }
        self.row = target as usize;
        self.col = self.col.min(self.line_len(self.row));
    }
}
