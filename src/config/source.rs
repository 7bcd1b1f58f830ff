//! Configuration sources.

use crate::error::{Result, TintlogError};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::path::PathBuf;

/// Something the rules configuration can be read from.
///
/// Every call returns the complete current content; the loader decides whether
/// it differs from what was loaded last time.
#[async_trait]
pub trait ConfigSource: Send + Sync {
    /// Read the full configuration content
    async fn read(&self) -> Result<Vec<u8>>;

    /// Human-readable origin, used in diagnostics
    fn describe(&self) -> String;
}

/// Configuration stored in a file on disk
#[derive(Debug, Clone)]
pub struct FileConfigSource {
    path: PathBuf,
}

impl FileConfigSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ConfigSource for FileConfigSource {
    async fn read(&self) -> Result<Vec<u8>> {
        tokio::fs::read(&self.path)
            .await
            .map_err(|err| TintlogError::config_read(self.path.clone(), err))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Configuration held in memory and updated programmatically.
///
/// `None` content behaves like a missing file.
#[derive(Debug, Default)]
pub struct MemoryConfigSource {
    content: Mutex<Option<String>>,
}

impl MemoryConfigSource {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: Mutex::new(Some(content.into())),
        }
    }

    /// A source whose reads fail until content is set
    pub fn missing() -> Self {
        Self::default()
    }

    pub fn set(&self, content: impl Into<String>) {
        *self.content.lock() = Some(content.into());
    }

    pub fn clear(&self) {
        *self.content.lock() = None;
    }
}

#[async_trait]
impl ConfigSource for MemoryConfigSource {
    async fn read(&self) -> Result<Vec<u8>> {
        match self.content.lock().as_ref() {
            Some(content) => Ok(content.as_bytes().to_vec()),
            None => Err(TintlogError::config_read(
                self.describe(),
                std::io::Error::new(std::io::ErrorKind::NotFound, "no configuration set"),
            )),
        }
    }

    fn describe(&self) -> String {
        "<memory>".to_string()
    }
}

// Lets a caller keep updating a source after handing it to a loader
#[async_trait]
impl<S: ConfigSource + ?Sized> ConfigSource for std::sync::Arc<S> {
    async fn read(&self) -> Result<Vec<u8>> {
        (**self).read().await
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
