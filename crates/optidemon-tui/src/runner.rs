//! Main TUI runner - entry point and event loop

use std::sync::Arc;

use optidemon_app::config::LoadedSettings;
use optidemon_app::Engine;
use optidemon_client::RemoteService;
use optidemon_core::prelude::*;

use crate::clipboard::Osc52Clipboard;
use crate::{event, render, terminal};

/// Run the TUI against `service`, with the editor pre-filled from
/// `initial_source`.
pub async fn run_with_source<S>(
    service: S,
    loaded: LoadedSettings,
    initial_source: Option<String>,
) -> Result<()>
where
    S: RemoteService + Sync + 'static,
{
    terminal::install_panic_hook();

    let mut engine = Engine::new(
        service,
        loaded.settings,
        loaded.file,
        initial_source.as_deref(),
        Arc::new(Osc52Clipboard),
    );
    engine.spawn_signal_handler();
    info!(
        "TUI starting against {}",
        engine.state.settings.service.base_url
    );

    let mut term = ratatui::init();
    let result = run_loop(&mut term, &mut engine);

    engine.shutdown();
    ratatui::restore();

    result
}

fn run_loop<S>(terminal: &mut ratatui::DefaultTerminal, engine: &mut Engine<S>) -> Result<()>
where
    S: RemoteService + Sync + 'static,
{
    while !engine.should_quit() {
        // Run results, copy acks, signals
        engine.drain_pending_messages();

        terminal.draw(|frame| render::view(frame, &engine.state))?;

        if let Some(message) = event::poll()? {
            engine.process_message(message);
        }
    }

    Ok(())
}
