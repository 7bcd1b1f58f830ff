//! Config Poller: periodic reload with redraw on change.

use crate::config::loader::ConfigLoader;
use crate::render::Renderer;
use crate::state::ViewerState;
use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Counters reported when the poller stops
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollerStats {
    pub ticks: u64,
    pub reloads: u64,
}

/// Re-reads the configuration every `interval` until cancelled
pub struct ConfigPoller {
    loader: Arc<ConfigLoader>,
    state: Arc<ViewerState>,
    renderer: Arc<Renderer>,
    interval: Duration,
}

impl ConfigPoller {
    pub fn new(
        loader: Arc<ConfigLoader>,
        state: Arc<ViewerState>,
        renderer: Arc<Renderer>,
        interval: Duration,
    ) -> Self {
        Self {
            loader,
            state,
            renderer,
            interval,
        }
    }

    /// One poll tick. Returns `true` when new rules were installed, in which
    /// case the whole buffer has been redrawn with them.
    pub async fn tick(&self) -> bool {
        if !self.loader.load(&self.state.rules).await {
            return false;
        }

        info!(
            "configuration reloaded from {}",
            self.loader.source().describe()
        );
        if let Err(err) = self.renderer.render() {
            warn!("{:#}", anyhow::Error::new(err));
        }
        true
    }

    /// Tick every interval until `cancel` fires. The first tick happens one
    /// interval after start.
    pub async fn run(self, cancel: CancellationToken) -> PollerStats {
        let mut stats = PollerStats::default();

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(self.interval) => {}
            }

            stats.ticks += 1;
            if self.tick().await {
                stats.reloads += 1;
            }
        }

        debug!(
            "config poller stopped after {} tick(s), {} reload(s)",
            stats.ticks, stats.reloads
        );
        stats
    }

    /// Run on a background task
    pub fn spawn(self, cancel: CancellationToken) -> JoinHandle<PollerStats> {
        tokio::spawn(self.run(cancel))
    }
}
