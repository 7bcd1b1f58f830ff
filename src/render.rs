//! Rendering subsystem.
//!
//! Styling of individual lines lives in [`highlight`], the output device
//! abstraction in [`screen`], and the full-buffer redraw in [`service`].

pub mod highlight;
pub mod screen;
pub mod service;

pub use highlight::{highlight_line, reset_sequence, start_sequence, LineStyler};
pub use screen::{Screen, TerminalScreen};
pub use service::Renderer;
