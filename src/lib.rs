//! # tintlog - Live Log Filter and Colorizer
//!
//! A terminal log viewer that ingests a stream of text lines, keeps the full
//! history in memory, and redraws it on every new line or rules change: only
//! lines containing the configured filter are shown, and configured keywords
//! are colorized.
//!
//! ## Features
//!
//! - **Hot-reloaded rules**: The rules file is polled and every change is
//!   applied to the entire retained history, not just new input
//! - **Case-insensitive matching**: Filter and keywords match regardless of case
//! - **Deterministic highlighting**: Overlapping keywords resolve longest-first
//!   without nesting color markers
//!
//! ## Architecture
//!
//! - [`error`] - Centralized error types and handling
//! - [`options`] - Command-line surface
//! - [`rules`] - Rule Store: filter and keyword colors, swapped atomically
//! - [`buffer`] - Log Buffer: append-only line history
//! - [`config`] - Config source, loader and poller
//! - [`render`] - Line styling, output screens and the full redraw
//! - [`input`] - Input opening and the ingestion loop
//! - [`app`] - Application core and component coordination

// Core modules
pub mod error;
pub mod options;

// Shared state
pub mod buffer;
pub mod rules;
pub mod state;

// Subsystems
pub mod config;
pub mod input;
pub mod render;

// Core components
pub mod app;

// Re-export commonly used types for convenience
pub use error::{Result, TintlogError};

// Public API surface for external usage
pub use app::Application;
pub use buffer::LogBuffer;
pub use options::ViewerOptions;
pub use rules::{HighlightColor, RuleSet, RuleStore};
pub use state::ViewerState;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
