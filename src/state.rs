//! Shared viewer state handed to the loader, poller, ingestion loop and renderer.

use crate::buffer::LogBuffer;
use crate::rules::{RuleSet, RuleStore};

/// The two independently locked containers every component works against.
///
/// No operation holds the rules lock and the buffer lock at the same time:
/// readers copy the rules out as a snapshot before touching the buffer.
#[derive(Debug, Default)]
pub struct ViewerState {
    pub rules: RuleStore,
    pub buffer: LogBuffer,
}

impl ViewerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(rules: RuleSet) -> Self {
        Self {
            rules: RuleStore::new(rules),
            buffer: LogBuffer::new(),
        }
    }
}
