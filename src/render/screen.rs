//! Output devices the renderer draws frames onto.

use crate::error::{Result, TintlogError};
use ratatui::crossterm::cursor::MoveTo;
use ratatui::crossterm::queue;
use ratatui::crossterm::terminal::{Clear, ClearType};
use std::io::{self, BufWriter, Stdout, Write};

/// Core trait for presenting a rendered frame
pub trait Screen: Send {
    /// Replace everything currently displayed with `lines`, top to bottom.
    ///
    /// Lines may already contain color escape sequences.
    fn present(&mut self, lines: &[String]) -> Result<()>;
}

/// ANSI terminal output: home the cursor, clear the screen, print the lines.
pub struct TerminalScreen<W: Write + Send> {
    out: W,
}

impl TerminalScreen<BufWriter<Stdout>> {
    /// Screen writing to the process's standard output
    pub fn stdout() -> Self {
        Self::new(BufWriter::new(io::stdout()))
    }
}

impl<W: Write + Send> TerminalScreen<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn draw(&mut self, lines: &[String]) -> io::Result<()> {
        queue!(self.out, MoveTo(0, 0), Clear(ClearType::All))?;
        for line in lines {
            self.out.write_all(line.as_bytes())?;
            self.out.write_all(b"\n")?;
        }
        self.out.flush()
    }
}

impl<W: Write + Send> Screen for TerminalScreen<W> {
    fn present(&mut self, lines: &[String]) -> Result<()> {
        self.draw(lines)
            .map_err(|err| TintlogError::output("writing frame to terminal", err))
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use parking_lot::Mutex;
    use ratatui::crossterm::Command;
    use std::sync::Arc;

    /// Screen that records every presented frame
    #[derive(Clone, Default)]
    pub struct RecordingScreen {
        frames: Arc<Mutex<Vec<Vec<String>>>>,
    }

    impl RecordingScreen {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn frames(&self) -> Vec<Vec<String>> {
            self.frames.lock().clone()
        }

        pub fn frame_count(&self) -> usize {
            self.frames.lock().len()
        }

        pub fn last_frame(&self) -> Option<Vec<String>> {
            self.frames.lock().last().cloned()
        }
    }

    impl Screen for RecordingScreen {
        fn present(&mut self, lines: &[String]) -> Result<()> {
            self.frames.lock().push(lines.to_vec());
            Ok(())
        }
    }

    /// Writer that rejects every write
    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    fn clear_sequence() -> String {
        let mut expected = String::new();
        MoveTo(0, 0).write_ansi(&mut expected).unwrap();
        Clear(ClearType::All).write_ansi(&mut expected).unwrap();
        expected
    }

    #[test]
    fn test_terminal_screen_clears_then_prints_lines() {
        let mut screen = TerminalScreen::new(Vec::new());
        screen
            .present(&["first".to_string(), "second".to_string()])
            .unwrap();

        let written = String::from_utf8(screen.into_inner()).unwrap();
        assert_eq!(written, format!("{}first\nsecond\n", clear_sequence()));
    }

    #[test]
    fn test_empty_frame_only_clears() {
        let mut screen = TerminalScreen::new(Vec::new());
        screen.present(&[]).unwrap();

        let written = String::from_utf8(screen.into_inner()).unwrap();
        assert_eq!(written, clear_sequence());
    }

    #[test]
    fn test_write_failure_is_output_error() {
        let mut screen = TerminalScreen::new(ClosedPipe);
        let err = screen.present(&["line".to_string()]).unwrap_err();
        assert!(matches!(err, TintlogError::Output { .. }));
    }

    #[test]
    fn test_recording_screen_shares_frames_between_clones() {
        let recorder = RecordingScreen::new();
        let mut handle = recorder.clone();

        handle.present(&["a".to_string()]).unwrap();
        handle.present(&[]).unwrap();

        assert_eq!(recorder.frame_count(), 2);
        assert_eq!(recorder.frames()[0], vec!["a".to_string()]);
        assert_eq!(recorder.last_frame(), Some(Vec::new()));
    }
}
