//! Config file watcher for live host-list reloads.
//!
//! The parent directory is watched, not the file, so saves that rename a
//! temp file over the config file are still seen.

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;

use crate::config::loader::load_config;
use crate::config::schema::ClientConfig;

/// Watches a config file and forwards validated, changed configurations.
pub struct ConfigWatcher {
    filter: ReloadFilter,
    update_tx: mpsc::UnboundedSender<ClientConfig>,
}

impl ConfigWatcher {
    /// `current` is the configuration already in effect; reloads equal to it
    /// are not forwarded.
    pub fn new(
        path: &Path,
        current: ClientConfig,
    ) -> (Self, mpsc::UnboundedReceiver<ClientConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();
        let filter = ReloadFilter {
            path: path.to_path_buf(),
            last: current,
        };
        (Self { filter, update_tx }, update_rx)
    }

    /// Start watching. Updates stop when the returned handle is dropped.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let Self {
            mut filter,
            update_tx,
        } = self;
        let watch_dir = filter.watch_dir();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if let Some(config) = filter.on_event(&event) {
                        let _ = update_tx.send(config);
                    }
                }
                Err(e) => tracing::error!(error = ?e, "Config watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&watch_dir, RecursiveMode::NonRecursive)?;

        tracing::info!(dir = ?watch_dir, "Config watcher started");
        Ok(watcher)
    }
}

/// Decides whether a filesystem event yields a new configuration.
struct ReloadFilter {
    path: PathBuf,
    last: ClientConfig,
}

impl ReloadFilter {
    fn watch_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    fn on_event(&mut self, event: &Event) -> Option<ClientConfig> {
        if !matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
            return None;
        }
        let file_name = self.path.file_name()?;
        if !event.paths.iter().any(|p| p.file_name() == Some(file_name)) {
            return None;
        }

        match load_config(&self.path) {
            Ok(config) if config == self.last => {
                tracing::debug!(path = ?self.path, "Config file touched without changes");
                None
            }
            Ok(config) => {
                tracing::info!(path = ?self.path, "Config file changed, reloading");
                self.last = config.clone();
                Some(config)
            }
            Err(e) => {
                tracing::error!(path = ?self.path, error = %e, "Failed to reload config, keeping current configuration");
                None
            }
        }
    }
}
