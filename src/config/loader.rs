//! Config Loader: read, parse and atomically install rule sets.

use crate::config::source::{ConfigSource, FileConfigSource};
use crate::error::Result;
use crate::rules::{HighlightColor, RuleSet, RuleStore};
use log::{debug, warn};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Key that sets the line filter; every other key is a highlight keyword
pub const FILTER_KEY: &str = "filter";

/// Result of a successful configuration read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// New rules were parsed and installed
    Changed,
    /// Content was byte-identical to the last load; nothing was swapped
    Unchanged,
}

/// Parse `key=value` lines into a rule set.
///
/// Each line is split on its first `=`, and key and value are trimmed. Lines
/// without `=` are skipped. Later occurrences of a key overwrite earlier ones.
pub fn parse_rules(content: &str) -> RuleSet {
    let mut filter = String::new();
    let mut highlights = BTreeMap::new();

    for (index, line) in content.lines().enumerate() {
        let Some((key, value)) = line.split_once('=') else {
            if !line.trim().is_empty() {
                debug!("config line {} has no '=', skipped", index + 1);
            }
            continue;
        };

        let (key, value) = (key.trim(), value.trim());
        if key == FILTER_KEY {
            filter = value.to_string();
        } else if key.is_empty() {
            debug!("config line {} has an empty keyword, skipped", index + 1);
        } else {
            highlights.insert(key.to_string(), HighlightColor::from_name(value));
        }
    }

    RuleSet::new(filter, highlights)
}

/// Loads rule sets from a [`ConfigSource`] into a [`RuleStore`].
///
/// Remembers the last content it installed so that polling an unchanged
/// source never swaps rules or triggers a redraw.
pub struct ConfigLoader {
    source: Box<dyn ConfigSource>,
    last_content: Mutex<Option<Vec<u8>>>,
}

impl ConfigLoader {
    pub fn new(source: Box<dyn ConfigSource>) -> Self {
        Self {
            source,
            last_content: Mutex::new(None),
        }
    }

    /// Loader reading from a file path
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::new(Box::new(FileConfigSource::new(path)))
    }

    pub fn source(&self) -> &dyn ConfigSource {
        self.source.as_ref()
    }

    /// Read the source and install new rules if the content changed.
    ///
    /// On a read error the store and the remembered content are untouched.
    pub async fn try_load(&self, store: &RuleStore) -> Result<LoadOutcome> {
        let content = self.source.read().await?;

        let mut last = self.last_content.lock();
        if last.as_deref() == Some(content.as_slice()) {
            return Ok(LoadOutcome::Unchanged);
        }

        let rules = parse_rules(&String::from_utf8_lossy(&content));
        debug!(
            "parsed {} highlight keyword(s), filter {:?}",
            rules.keywords().len(),
            rules.filter()
        );
        store.replace(rules);
        *last = Some(content);

        Ok(LoadOutcome::Changed)
    }

    /// Like [`try_load`](Self::try_load), but reports failures to the log
    /// instead of returning them. Returns `true` only when rules were swapped.
    pub async fn load(&self, store: &RuleStore) -> bool {
        match self.try_load(store).await {
            Ok(LoadOutcome::Changed) => true,
            Ok(LoadOutcome::Unchanged) => false,
            Err(err) => {
                warn!("{:#}", anyhow::Error::new(err));
                false
            }
        }
    }
}
