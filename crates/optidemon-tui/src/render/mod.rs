//! Main render/view function (View in TEA pattern)


use optidemon_app::state::{AppState, Focus};
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

use crate::layout;
use crate::theme::Palette;
use crate::widgets::{EditorPane, MainHeader, ResultsView, StatusBar};

/// Render the complete UI (View function in TEA)
///
/// Reads a snapshot of the workspace, so a run progressing on another task
/// never blocks on a frame being drawn.
pub fn view(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    let palette = Palette::for_mode(state.theme());
    let workspace = state.workspace.snapshot();

    frame.render_widget(
        Block::default().style(Style::default().bg(palette.deepest_bg)),
        area,
    );

    let areas = layout::create(area);

    frame.render_widget(
        MainHeader::new(palette, &state.settings.service.base_url),
        areas.header,
    );

    let editor = EditorPane::new(&state.editor, palette, state.focus == Focus::Editor);
    if let Some(cursor) = editor.cursor_position(areas.editor) {
        frame.set_cursor_position(cursor);
    }
    frame.render_widget(editor, areas.editor);

    frame.render_widget(
        ResultsView::new(&workspace, palette)
            .focused(state.focus == Focus::Results)
            .selected(state.selected_slot)
            .scroll(state.results_scroll)
            .copied(state.copy_ack.map(|ack| ack.slot)),
        areas.results,
    );

    frame.render_widget(
        StatusBar::new(state, workspace.phase, palette),
        areas.status,
    );
}
