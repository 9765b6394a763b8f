//! Fetch every section concurrently, then patch the page.

use cms_dom::{Document, Patch};
use cms_yaml::Value;
use futures::future::join_all;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::apply::apply_section;
use crate::config::CmsConfig;
use crate::error::Result;
use crate::section::Section;
use crate::source::ContentSource;

/// Decoded content for every section, `None` where nothing usable was
/// fetched.
#[derive(Debug, Clone, Default)]
pub struct SectionData {
    entries: Vec<(Section, Option<Value>)>,
}

impl SectionData {
    pub fn get(&self, section: Section) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(s, _)| *s == section)
            .and_then(|(_, value)| value.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = (Section, Option<&Value>)> {
        self.entries
            .iter()
            .map(|(section, value)| (*section, value.as_ref()))
    }
}

/// Per-section summary produced by [`Loader::check`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionStatus {
    pub section: Section,
    pub file: String,
    /// A content file was fetched.
    pub found: bool,
    /// The decoded content passes the section's presence check.
    pub valid: bool,
}

pub struct Loader<S> {
    source: S,
    config: CmsConfig,
}

impl<S: ContentSource> Loader<S> {
    pub fn new(source: S, config: CmsConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &CmsConfig {
        &self.config
    }

    /// Fetch and decode all sections at once. A failed fetch only affects
    /// its own section.
    pub async fn fetch_all(&self) -> SectionData {
        let fetches = Section::ALL.into_iter().map(|section| async move {
            let value = match self.source.fetch(section.file_stem()).await {
                Ok(Some(text)) => {
                    debug!(%section, bytes = text.len(), "decoding content");
                    Some(cms_yaml::decode(&text))
                }
                Ok(None) => {
                    debug!(%section, "no content file");
                    None
                }
                Err(e) => {
                    warn!(%section, error = %e, "could not load section");
                    None
                }
            };
            (section, value)
        });

        SectionData {
            entries: join_all(fetches).await,
        }
    }

    /// Patches for every section, computed against one snapshot.
    pub fn patches(&self, document: &Document, data: &SectionData) -> Vec<Patch> {
        data.iter()
            .flat_map(|(section, value)| apply_section(document, section, value, &self.config))
            .collect()
    }

    /// Fetch everything and patch `document` in place. Returns the patches
    /// that were applied.
    pub async fn load(&self, document: &mut Document) -> Result<Vec<Patch>> {
        let data = self.fetch_all().await;
        let patches = self.patches(document, &data);
        document.apply_all(&patches)?;
        info!(patches = patches.len(), "content loaded");
        Ok(patches)
    }

    /// Report which content files exist and pass their checks.
    pub async fn check(&self) -> Vec<SectionStatus> {
        let data = self.fetch_all().await;
        data.iter()
            .map(|(section, value)| SectionStatus {
                section,
                file: section.file_name(&self.config.extension),
                found: value.is_some(),
                valid: value.is_some_and(|value| section.accepts(value)),
            })
            .collect()
    }
}
