/*
 * source.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Where section content files come from.
 */

//! Content sources.
//!
//! A [`ContentSource`] hands out the raw text of a content file by name.
//! `Ok(None)` means the file does not exist, which is a normal state for a
//! site that only maintains some of its sections.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use tracing::trace;

use crate::config::CmsConfig;
use crate::error::SourceError;

#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Fetch the content file with the given stem (e.g. `special_offer`).
    async fn fetch(&self, name: &str) -> Result<Option<String>, SourceError>;
}

/// Reads `<base>/<name>.<extension>` from disk.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    base: PathBuf,
    extension: String,
    timeout: Option<Duration>,
}

impl DirectorySource {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self {
            base: base.into(),
            extension: "yml".to_string(),
            timeout: None,
        }
    }

    /// Directory, extension and timeout taken from the config.
    pub fn from_config(config: &CmsConfig) -> Self {
        Self::new(&config.data_dir)
            .with_extension(&config.extension)
            .with_timeout(config.fetch_timeout())
    }

    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.base.join(format!("{}.{}", name, self.extension))
    }
}

#[async_trait]
impl ContentSource for DirectorySource {
    async fn fetch(&self, name: &str) -> Result<Option<String>, SourceError> {
        let path = self.path_for(name);
        trace!(path = %path.display(), "reading content file");

        let read = tokio::fs::read(&path);
        let result = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, read).await.map_err(|_| {
                SourceError::Timeout {
                    name: name.to_string(),
                    millis: u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
                }
            })?,
            None => read.await,
        };

        match result {
            Ok(bytes) => String::from_utf8(bytes).map(Some).map_err(|_| SourceError::Utf8 {
                name: name.to_string(),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SourceError::Io {
                name: name.to_string(),
                source: e,
            }),
        }
    }
}

/// In-memory content keyed by file stem.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: HashMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, content: impl Into<String>) {
        self.files.insert(name.into(), content.into());
    }

    pub fn with(mut self, name: impl Into<String>, content: impl Into<String>) -> Self {
        self.insert(name, content);
        self
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MemorySource {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut source = MemorySource::new();
        for (name, content) in iter {
            source.insert(name, content);
        }
        source
    }
}

#[async_trait]
impl ContentSource for MemorySource {
    async fn fetch(&self, name: &str) -> Result<Option<String>, SourceError> {
        Ok(self.files.get(name).cloned())
    }
}
