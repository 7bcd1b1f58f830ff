//! Full-buffer redraw.
//!
//! Every render re-evaluates the entire retained history against the current
//! rules. Lock order within a render is fixed: the screen mutex first (so
//! frames reach the output in snapshot order), then a rules snapshot that is
//! released immediately, then the buffer read lock for one styling pass. The
//! frame is presented after the buffer lock is dropped.

use crate::error::Result;
use crate::render::highlight::LineStyler;
use crate::render::screen::Screen;
use crate::state::ViewerState;
use log::trace;
use parking_lot::Mutex;
use std::borrow::Cow;
use std::sync::Arc;

/// Redraws the filtered, colorized log buffer onto a [`Screen`]
pub struct Renderer {
    state: Arc<ViewerState>,
    screen: Mutex<Box<dyn Screen>>,
}

impl Renderer {
    pub fn new(state: Arc<ViewerState>, screen: Box<dyn Screen>) -> Self {
        Self {
            state,
            screen: Mutex::new(screen),
        }
    }

    /// Lines that would be displayed right now, styled, in arrival order
    pub fn compose_frame(&self) -> Vec<String> {
        let rules = self.state.rules.snapshot();
        let styler = LineStyler::new(&rules);

        self.state.buffer.with_lines(|lines| {
            lines
                .iter()
                .filter_map(|line| styler.style(line))
                .map(Cow::into_owned)
                .collect()
        })
    }

    /// Clear the screen and redraw every buffered line that passes the filter.
    ///
    /// Returns the number of lines displayed.
    pub fn render(&self) -> Result<usize> {
        let mut screen = self.screen.lock();
        let frame = self.compose_frame();
        screen.present(&frame)?;
        trace!("rendered {} line(s)", frame.len());
        Ok(frame.len())
    }
}
