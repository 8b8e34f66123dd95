//! Widget components for the TUI

mod editor_pane;
mod header;
mod results_view;
mod status_bar;

pub use editor_pane::EditorPane;
pub use header::MainHeader;
pub use results_view::ResultsView;
pub use status_bar::StatusBar;
