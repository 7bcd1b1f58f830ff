//! Input subsystem.
//!
//! Opening the line source lives in [`source`]; the ingestion loop that feeds
//! the log buffer and triggers redraws lives in [`service`].

pub mod service;
pub mod source;

pub use service::{IngestEnd, IngestReport, Ingestor};
pub use source::{decode_line, open_input, InputReader};
