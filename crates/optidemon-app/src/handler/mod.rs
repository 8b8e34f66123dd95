//! Handler module - TEA update function and event handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch
//! - `keys`: Key event handlers per focus
//! - `pipeline`: Run trigger and completion
//! - `clipboard`: Copy action and its acknowledgement timer

pub(crate) mod clipboard;
pub(crate) mod keys;
pub(crate) mod pipeline;
pub(crate) mod update;


use std::path::PathBuf;
use std::time::Duration;

use crate::config::Settings;
use crate::message::Message;
use crate::pipeline::BusyGuard;
use crate::surface::SlotHandle;

// Re-export main entry point
pub use update::update;

/// Actions that the event loop should perform after update
#[derive(Debug)]
pub enum UpdateAction {
    /// Run the pipeline over `source`.
    ///
    /// The busy flag was claimed in `update()`, so a second trigger arriving
    /// before the task starts is already rejected.
    RunPipeline { source: String, guard: BusyGuard },

    /// Write `text` to the system clipboard
    CopyToClipboard {
        slot: SlotHandle,
        text: String,
        generation: u64,
    },

    /// Clear the "Copied!" acknowledgement after `delay`
    ScheduleCopyRevert { generation: u64, delay: Duration },

    /// Persist settings to disk
    SaveSettings { path: PathBuf, settings: Settings },
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Optional action for the event loop to perform
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            action: None,
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            action: Some(action),
        }
    }
}
