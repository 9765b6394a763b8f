/*
 * config.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Loader configuration read from cms.toml.
 */

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CmsError, Result};

/// Name of the config file looked up next to the site.
pub const CONFIG_FILE_NAME: &str = "cms.toml";

/// Loader settings. Every field has a default, so an empty file (or no
/// file at all) is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CmsConfig {
    /// Directory holding the per-section content files.
    pub data_dir: PathBuf,

    /// Content file extension, without the dot.
    pub extension: String,

    /// What to do when a section is missing or fails its presence check.
    pub fallback: FallbackPolicy,

    /// Per-file fetch timeout. No timeout when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetch_timeout_ms: Option<u64>,

    pub labels: Labels,

    /// Literals used when footer content leaves a part out.
    pub footer: FooterDefaults,
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("_data"),
            extension: "yml".to_string(),
            fallback: FallbackPolicy::default(),
            fetch_timeout_ms: None,
            labels: Labels::default(),
            footer: FooterDefaults::default(),
        }
    }
}

impl CmsConfig {
    /// Parse config text. `origin` is only used in error messages.
    pub fn from_toml_str(content: &str, origin: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| CmsError::ConfigParse {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content, path)?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Load `path` when given, else `cms.toml` in `dir` if it exists, else
    /// the defaults.
    pub fn discover(path: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            Self::load(&candidate)
        } else {
            debug!(dir = %dir.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    pub fn fetch_timeout(&self) -> Option<Duration> {
        self.fetch_timeout_ms.map(Duration::from_millis)
    }
}

/// Fallback behaviour for sections without usable content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FallbackPolicy {
    /// Leave the page's markup as it is.
    #[default]
    PreserveExisting,
    /// Apply the built-in default content instead.
    Defaults,
}

impl FallbackPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            FallbackPolicy::PreserveExisting => "preserve-existing",
            FallbackPolicy::Defaults => "defaults",
        }
    }
}

impl fmt::Display for FallbackPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FallbackPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "preserve-existing" => Ok(FallbackPolicy::PreserveExisting),
            "defaults" => Ok(FallbackPolicy::Defaults),
            other => Err(format!(
                "unknown fallback policy `{}` (expected `preserve-existing` or `defaults`)",
                other
            )),
        }
    }
}

/// Fixed strings written into the page alongside content values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    /// Heading kept above the phone list.
    pub phones_heading: String,
    /// Text before the developer link in the footer.
    pub attribution: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            phones_heading: "Τηλέφωνα".to_string(),
            attribution: "Κατασκευή - Φιλοξενία".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FooterDefaults {
    pub copyright: String,
    pub developer_name: String,
    pub developer_link: String,
}

impl Default for FooterDefaults {
    fn default() -> Self {
        Self {
            copyright: "© 2025 Mentor Zografos | Με επιφύλαξη κάθε νόμιμου δικαιώματος."
                .to_string(),
            developer_name: "mianagn".to_string(),
            developer_link: "https://mianagn.github.io".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config = CmsConfig::from_toml_str("", Path::new("cms.toml")).unwrap();
        assert_eq!(config, CmsConfig::default());
        assert_eq!(config.data_dir, PathBuf::from("_data"));
        assert_eq!(config.fallback, FallbackPolicy::PreserveExisting);
        assert_eq!(config.fetch_timeout(), None);
    }

    #[test]
    fn test_partial_tables_keep_other_defaults() {
        let config = CmsConfig::from_toml_str(
            r#"
fallback = "defaults"
fetch_timeout_ms = 250

[labels]
phones_heading = "Phones"
"#,
            Path::new("cms.toml"),
        )
        .unwrap();
        assert_eq!(config.fallback, FallbackPolicy::Defaults);
        assert_eq!(config.fetch_timeout(), Some(Duration::from_millis(250)));
        assert_eq!(config.labels.phones_heading, "Phones");
        assert_eq!(config.labels.attribution, Labels::default().attribution);
        assert_eq!(config.extension, "yml");
    }

    #[test]
    fn test_bad_policy_names_the_file() {
        let err = CmsConfig::from_toml_str("fallback = \"sometimes\"", Path::new("site/cms.toml"))
            .unwrap_err();
        assert!(err.to_string().contains("site/cms.toml"));
    }

    #[test]
    fn test_discover_reads_file_in_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "extension = \"yaml\"\n").unwrap();
        let config = CmsConfig::discover(None, dir.path()).unwrap();
        assert_eq!(config.extension, "yaml");

        let empty = tempfile::tempdir().unwrap();
        assert_eq!(CmsConfig::discover(None, empty.path()).unwrap(), CmsConfig::default());
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("defaults".parse(), Ok(FallbackPolicy::Defaults));
        assert!("none".parse::<FallbackPolicy>().is_err());
        assert_eq!(FallbackPolicy::PreserveExisting.to_string(), "preserve-existing");
    }
}
