//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering
//!
//! Calls to collaborators (improve, save, export) are queued by `update` and
//! started on background threads by the effects layer; their results come
//! back as ordinary messages.

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use model::{Focus, Job, Model, ToastLevel};
pub use update::{Message, update};

use std::path::PathBuf;

use crate::document::SyncPolicy;
use crate::services::{JobRunner, Services};

/// Main application struct that owns the collaborators and runs the event loop.
pub struct App {
    file_path: PathBuf,
    services: Services,
    jobs: JobRunner<Message>,
    display_name: String,
    policy: SyncPolicy,
    config_global_path: Option<PathBuf>,
    config_local_path: Option<PathBuf>,
}

impl App {
    /// Create a new application saving to `file_path`.
    pub fn new(file_path: PathBuf, services: Services) -> Self {
        Self {
            file_path,
            services,
            jobs: JobRunner::new(),
            display_name: String::new(),
            policy: SyncPolicy::default(),
            config_global_path: None,
            config_local_path: None,
        }
    }

    /// Name shown in the contact header of the composed markdown.
    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    /// Choose whether form edits may overwrite hand-edited markdown.
    #[must_use]
    pub const fn with_sync_policy(mut self, policy: SyncPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set config paths to show in help.
    #[must_use]
    pub fn with_config_paths(
        mut self,
        global_path: Option<PathBuf>,
        local_path: Option<PathBuf>,
    ) -> Self {
        self.config_global_path = global_path;
        self.config_local_path = local_path;
        self
    }
}
