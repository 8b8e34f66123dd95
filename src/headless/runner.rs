//! Headless mode runner - one pipeline run without the TUI

use std::io::Write;
use std::sync::Arc;

use tracing::{info, warn};

use optidemon_app::clipboard::NullClipboard;
use optidemon_app::config::LoadedSettings;
use optidemon_app::{Engine, Message, PipelineEvent};
use optidemon_client::RemoteService;
use optidemon_core::prelude::*;
use optidemon_core::RunOutcome;

use super::HeadlessEvent;

/// Message reported when a signal stops the run early
const INTERRUPTED_MESSAGE: &str = "Interrupted";

/// Run the pipeline once over `source`, printing NDJSON events to stdout.
pub async fn run_headless<S>(service: S, loaded: LoadedSettings, source: String) -> Result<RunOutcome>
where
    S: RemoteService + Sync + 'static,
{
    info!("═══════════════════════════════════════════════════════");
    info!("optidemon starting in HEADLESS mode");
    info!("Endpoint: {}", loaded.settings.service.base_url);
    info!("═══════════════════════════════════════════════════════");

    // No config path: nothing in headless mode changes persisted settings
    let mut engine = Engine::new(
        service,
        loaded.settings,
        None,
        Some(&source),
        Arc::new(NullClipboard),
    );
    engine.spawn_signal_handler();

    let outcome = run_once(&mut engine, &mut std::io::stdout()).await;
    engine.shutdown();

    info!("optidemon headless mode exiting");
    outcome
}

/// Trigger one run on `engine` and stream its events to `out` until it ends.
pub async fn run_once<S, W>(engine: &mut Engine<S>, out: &mut W) -> Result<RunOutcome>
where
    S: RemoteService + Sync + 'static,
    W: Write,
{
    let mut pipeline = engine.follow_pipeline();
    engine.process_message(Message::RunRequested);

    let outcome = loop {
        tokio::select! {
            // Pipeline events are published before RunFinished is sent
            biased;

            event = pipeline.recv() => match event {
                Some(event) => forward(event, out),
                None => return Err(Error::ChannelClosed),
            },

            msg = engine.msg_rx.recv() => {
                let Some(msg) = msg else {
                    return Err(Error::ChannelClosed);
                };
                match msg {
                    Message::RunFinished { outcome } => {
                        engine.process_message(Message::RunFinished {
                            outcome: outcome.clone(),
                        });
                        break outcome;
                    }
                    Message::Quit => {
                        warn!("Quit requested during headless run");
                        engine.process_message(Message::Quit);
                        HeadlessEvent::Error {
                            message: INTERRUPTED_MESSAGE.to_string(),
                            timestamp: chrono::Utc::now().timestamp_millis(),
                        }
                        .emit_to(out);
                        break RunOutcome::Failed {
                            stage: None,
                            message: INTERRUPTED_MESSAGE.to_string(),
                        };
                    }
                    other => engine.process_message(other),
                }
            }
        }
    };

    // Anything published between the last poll and RunFinished
    while let Ok(event) = pipeline.try_recv() {
        forward(event, out);
    }

    HeadlessEvent::run_finished(outcome.clone()).emit_to(out);
    Ok(outcome)
}

fn forward<W: Write>(event: PipelineEvent, out: &mut W) {
    if let Some(event) = HeadlessEvent::from_pipeline(event) {
        event.emit_to(out);
    }
}
