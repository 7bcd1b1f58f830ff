//! Rules configuration: where it comes from, how it is parsed, and how it is
//! watched for changes.
//!
//! The configuration is a flat list of `key=value` lines. `filter=<text>` sets
//! the line filter; any other key registers a highlight keyword whose value
//! names its color.

pub mod loader;
pub mod poller;
pub mod source;

pub use loader::{parse_rules, ConfigLoader, LoadOutcome};
pub use poller::{ConfigPoller, PollerStats};
pub use source::{ConfigSource, FileConfigSource, MemoryConfigSource};
