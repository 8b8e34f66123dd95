//! Screen layout definitions for the TUI
//!
//! Wide terminals put the editor and the results side by side; narrow ones
//! stack them.

use ratatui::layout::{Constraint, Layout, Rect};

/// Terminals at least this wide get the side-by-side layout
pub const WIDE_THRESHOLD: u16 = 100;

const HEADER_HEIGHT: u16 = 3;
const STATUS_HEIGHT: u16 = 1;

/// Screen areas for the main layout
#[derive(Debug, Clone, Copy)]
pub struct ScreenAreas {
    /// Title, endpoint and key hints
    pub header: Rect,

    /// Source editor pane
    pub editor: Rect,

    /// Results area (test cases and optimizations)
    pub results: Rect,

    /// One-line status bar
    pub status: Rect,
}

/// Split `area` into the main screen regions.
pub fn create(area: Rect) -> ScreenAreas {
    let [header, body, status] = Layout::vertical([
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Min(6),
        Constraint::Length(STATUS_HEIGHT),
    ])
    .areas(area);

    let [editor, results] = if area.width >= WIDE_THRESHOLD {
        Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)]).areas(body)
    } else {
        Layout::vertical([Constraint::Percentage(40), Constraint::Percentage(60)]).areas(body)
    };

    ScreenAreas {
        header,
        editor,
        results,
        status,
    }
}
