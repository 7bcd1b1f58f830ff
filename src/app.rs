//! Application orchestration layer
//!
//! Wires the shared state, config loader, renderer, ingestion loop and config
//! poller together and owns the shutdown token they all observe.

use crate::config::{ConfigLoader, ConfigPoller, ConfigSource, FileConfigSource};
use crate::error::Result;
use crate::input::{open_input, IngestEnd, IngestReport, Ingestor};
use crate::options::ViewerOptions;
use crate::render::{Renderer, Screen};
use crate::state::ViewerState;
use log::{debug, info, warn};
use std::sync::Arc;
use tokio::io::AsyncBufRead;
use tokio_util::sync::CancellationToken;

/// Application orchestrator - coordinates components without duplicating their state
pub struct Application {
    options: ViewerOptions,
    state: Arc<ViewerState>,
    loader: Arc<ConfigLoader>,
    renderer: Arc<Renderer>,
    shutdown: CancellationToken,
}

impl Application {
    /// Application reading rules from `options.config_path`
    pub fn new(options: ViewerOptions, screen: Box<dyn Screen>) -> Self {
        let source = Box::new(FileConfigSource::new(options.config_path.clone()));
        Self::with_config_source(options, source, screen)
    }

    /// Application reading rules from an arbitrary source
    pub fn with_config_source(
        options: ViewerOptions,
        source: Box<dyn ConfigSource>,
        screen: Box<dyn Screen>,
    ) -> Self {
        let state = Arc::new(ViewerState::new());
        let renderer = Arc::new(Renderer::new(Arc::clone(&state), screen));
        Self {
            options,
            state,
            loader: Arc::new(ConfigLoader::new(source)),
            renderer,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn state(&self) -> Arc<ViewerState> {
        Arc::clone(&self.state)
    }

    /// Token that stops ingestion and polling when cancelled
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Open the configured input and run until shutdown.
    ///
    /// Failing to open an explicitly given input file is the only fatal error.
    pub async fn run(&self) -> Result<IngestReport> {
        let reader = open_input(self.options.input_path.as_deref()).await?;
        Ok(self.run_with_reader(reader).await)
    }

    /// Run against an already opened line source.
    ///
    /// Loads the initial rules (an unreadable config leaves the rules empty),
    /// starts the poller, and ingests until the source ends. Unless
    /// `exit_on_eof` is set, the poller keeps redrawing on config changes after
    /// input ends, until the shutdown token is cancelled.
    pub async fn run_with_reader<R>(&self, reader: R) -> IngestReport
    where
        R: AsyncBufRead + Unpin,
    {
        if !self.loader.load(&self.state.rules).await {
            info!(
                "no rules loaded from {}, showing all lines",
                self.loader.source().describe()
            );
        }

        let poller = ConfigPoller::new(
            Arc::clone(&self.loader),
            Arc::clone(&self.state),
            Arc::clone(&self.renderer),
            self.options.poll_interval,
        )
        .spawn(self.shutdown.child_token());

        let report = Ingestor::new(Arc::clone(&self.state), Arc::clone(&self.renderer))
            .run(reader, &self.shutdown)
            .await;

        match &report.end {
            IngestEnd::Cancelled => {}
            _ if self.options.exit_on_eof => self.shutdown.cancel(),
            _ => {
                info!(
                    "input finished after {} line(s); still watching {} until interrupted",
                    report.lines,
                    self.loader.source().describe()
                );
                self.shutdown.cancelled().await;
            }
        }

        match poller.await {
            Ok(stats) => debug!(
                "poller finished: {} tick(s), {} reload(s)",
                stats.ticks, stats.reloads
            ),
            Err(err) => warn!("config poller task failed: {err}"),
        }

        report
    }
}
