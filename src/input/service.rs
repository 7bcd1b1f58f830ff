//! Ingestion loop.
//!
//! Reads the input source line by line; each line is appended to the log
//! buffer and immediately followed by a full redraw on the same task, so the
//! new line is always visible in the very next frame.

use crate::error::TintlogError;
use crate::input::source::decode_line;
use crate::render::Renderer;
use crate::state::ViewerState;
use log::{debug, error, warn};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio_util::sync::CancellationToken;

/// Why the ingestion loop stopped
#[derive(Debug)]
pub enum IngestEnd {
    /// The source reported end-of-input
    EndOfInput,
    /// A read failed; no further lines are consumed
    Failed(TintlogError),
    /// Shutdown was requested
    Cancelled,
}

/// Summary returned when the ingestion loop stops
#[derive(Debug)]
pub struct IngestReport {
    pub lines: u64,
    pub end: IngestEnd,
}

/// Feeds input lines into the shared buffer and triggers redraws
pub struct Ingestor {
    state: Arc<ViewerState>,
    renderer: Arc<Renderer>,
}

impl Ingestor {
    pub fn new(state: Arc<ViewerState>, renderer: Arc<Renderer>) -> Self {
        Self { state, renderer }
    }

    /// Append one line and redraw. Output failures are logged, not propagated.
    pub fn ingest_line(&self, line: String) {
        self.state.buffer.append(line);
        if let Err(err) = self.renderer.render() {
            warn!("{:#}", anyhow::Error::new(err));
        }
    }

    /// Consume `reader` until end-of-input, a read error, or cancellation.
    pub async fn run<R>(&self, mut reader: R, cancel: &CancellationToken) -> IngestReport
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = 0u64;
        let mut raw = Vec::with_capacity(256);

        let end = loop {
            raw.clear();
            let read = tokio::select! {
                _ = cancel.cancelled() => break IngestEnd::Cancelled,
                read = reader.read_until(b'\n', &mut raw) => read,
            };

            match read {
                Ok(0) => break IngestEnd::EndOfInput,
                Ok(_) => {
                    self.ingest_line(decode_line(&raw));
                    lines += 1;
                }
                Err(source) => {
                    error!("failed to read input, ingestion stopped: {source}");
                    break IngestEnd::Failed(TintlogError::InputRead { source });
                }
            }
        };

        debug!("ingestion stopped after {lines} line(s): {end:?}");
        IngestReport { lines, end }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::screen::tests::RecordingScreen;
    use crate::rules::RuleSet;
    use std::collections::BTreeMap;
    use tokio::io::BufReader;

    fn ingestor(filter: &str) -> (Arc<ViewerState>, Ingestor, RecordingScreen) {
        let state = Arc::new(ViewerState::with_rules(RuleSet::new(filter, BTreeMap::new())));
        let recorder = RecordingScreen::new();
        let renderer = Arc::new(Renderer::new(Arc::clone(&state), Box::new(recorder.clone())));
        (Arc::clone(&state), Ingestor::new(state, renderer), recorder)
    }

    #[tokio::test]
    async fn test_each_line_is_appended_then_rendered() {
        let (state, ingestor, recorder) = ingestor("");
        let mock = tokio_test::io::Builder::new()
            .read(b"first\nsec")
            .read(b"ond\r\nthird")
            .build();

        let report = ingestor
            .run(BufReader::new(mock), &CancellationToken::new())
            .await;

        assert_eq!(report.lines, 3);
        assert!(matches!(report.end, IngestEnd::EndOfInput));
        assert_eq!(state.buffer.snapshot(), vec!["first", "second", "third"]);

        let frames = recorder.frames();
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[0], vec!["first"]);
        assert_eq!(frames[1], vec!["first", "second"]);
        assert_eq!(frames[2], vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_filtered_lines_are_buffered_but_hidden() {
        let (state, ingestor, recorder) = ingestor("keep");
        let mock = tokio_test::io::Builder::new()
            .read(b"keep me\ndrop me\n")
            .build();

        ingestor
            .run(BufReader::new(mock), &CancellationToken::new())
            .await;

        assert_eq!(state.buffer.len(), 2);
        assert_eq!(recorder.last_frame().unwrap(), vec!["keep me"]);
    }

    #[tokio::test]
    async fn test_read_error_stops_ingestion() {
        let (state, ingestor, _recorder) = ingestor("");
        let mock = tokio_test::io::Builder::new()
            .read(b"before\n")
            .read_error(std::io::Error::new(std::io::ErrorKind::Other, "device gone"))
            .build();

        let report = ingestor
            .run(BufReader::new(mock), &CancellationToken::new())
            .await;

        assert_eq!(report.lines, 1);
        match report.end {
            IngestEnd::Failed(TintlogError::InputRead { source }) => {
                assert_eq!(source.to_string(), "device gone");
            }
            other => panic!("expected read failure, got {other:?}"),
        }
        assert_eq!(state.buffer.snapshot(), vec!["before"]);
    }

    #[tokio::test]
    async fn test_cancellation_stops_waiting_reader() {
        let (_state, ingestor, recorder) = ingestor("");
        let cancel = CancellationToken::new();
        cancel.cancel();

        // Empty stdin-like source that never yields
        let (reader, _writer) = tokio::io::duplex(64);
        let report = ingestor.run(BufReader::new(reader), &cancel).await;

        assert_eq!(report.lines, 0);
        assert!(matches!(report.end, IngestEnd::Cancelled));
        assert_eq!(recorder.frame_count(), 0);
    }
}
