//! Action handlers: UpdateAction dispatch and background task spawning

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error, warn};

use optidemon_client::RemoteService;
use optidemon_core::{PipelinePhase, RunOutcome};

use crate::clipboard::ClipboardWriter;
use crate::config;
use crate::message::Message;
use crate::pipeline::{BusyGuard, PipelineController};
use crate::surface::StatusSurface;
use crate::workspace::SharedWorkspace;
use crate::UpdateAction;

/// Message shown when the run task dies without producing an outcome.
const RUN_CRASHED_MESSAGE: &str = "Run aborted unexpectedly";

/// Everything background actions need, cloned into each spawned task.
pub struct ActionContext<S> {
    pub msg_tx: mpsc::Sender<Message>,
    pub controller: Arc<PipelineController<S>>,
    pub workspace: SharedWorkspace,
    pub clipboard: Arc<dyn ClipboardWriter>,
}

impl<S> Clone for ActionContext<S> {
    fn clone(&self) -> Self {
        Self {
            msg_tx: self.msg_tx.clone(),
            controller: self.controller.clone(),
            workspace: self.workspace.clone(),
            clipboard: self.clipboard.clone(),
        }
    }
}

/// Execute an action, spawning background work where needed
pub fn handle_action<S>(action: UpdateAction, ctx: &ActionContext<S>)
where
    S: RemoteService + Sync + 'static,
{
    match action {
        UpdateAction::RunPipeline { source, guard } => {
            spawn_run(source, guard, ctx.clone());
        }

        UpdateAction::CopyToClipboard {
            slot,
            text,
            generation,
        } => {
            // Written inline so the escape sequence never interleaves with a frame
            let msg = match ctx.clipboard.write_text(&text) {
                Ok(()) => {
                    debug!("Copied {} bytes from {:?}", text.len(), slot);
                    Message::CopySucceeded { slot, generation }
                }
                Err(e) => Message::CopyFailed {
                    reason: e.to_string(),
                },
            };
            if ctx.msg_tx.try_send(msg).is_err() {
                warn!("Message channel full, dropping copy result");
            }
        }

        UpdateAction::ScheduleCopyRevert { generation, delay } => {
            let msg_tx = ctx.msg_tx.clone();
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                let _ = msg_tx.send(Message::CopyAckExpired { generation }).await;
            });
        }

        UpdateAction::SaveSettings { path, settings } => {
            tokio::task::spawn_blocking(move || {
                if let Err(e) = config::save_settings(&path, &settings) {
                    warn!("Failed to save settings: {}", e);
                }
            });
        }
    }
}

/// Spawn the run and report its outcome.
///
/// The pipeline runs in its own task so a panic inside it still produces a
/// `RunFinished`. The guard travels into that task and is dropped on every
/// exit path.
fn spawn_run<S>(source: String, guard: BusyGuard, ctx: ActionContext<S>)
where
    S: RemoteService + Sync + 'static,
{
    tokio::spawn(async move {
        let controller = ctx.controller.clone();
        let mut surface = ctx.workspace.clone();
        let run = tokio::spawn(async move {
            controller
                .run_with_guard(guard, &source, &mut surface)
                .await
        });

        let outcome = match run.await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("Run task failed: {}", e);
                let mut workspace = ctx.workspace.clone();
                workspace.show_error(RUN_CRASHED_MESSAGE);
                if workspace.phase().is_active() {
                    workspace.set_phase(PipelinePhase::Error);
                }
                RunOutcome::Failed {
                    stage: None,
                    message: RUN_CRASHED_MESSAGE.to_string(),
                }
            }
        };

        if ctx.msg_tx.send(Message::RunFinished { outcome }).await.is_err() {
            debug!("Message channel closed before run finished");
        }
    });
}
