//! # cms-core
//!
//! Loads per-section content files for the brochure site and turns them
//! into page patches.
//!
//! The pieces:
//!
//! - [`Section`] names the eight content sections and their presence checks.
//! - [`apply_section`] computes patches for one section from a decoded value.
//! - [`ContentSource`] fetches raw content; [`DirectorySource`] reads a data
//!   directory and [`MemorySource`] serves strings.
//! - [`Loader`] fetches every section concurrently and applies the result.
//!
//! ```rust
//! use cms_core::{CmsConfig, Section, apply_section};
//! use cms_dom::Document;
//!
//! let doc = Document::parse_html("<p class=\"hero-subtitle\">Old</p>");
//! let value = cms_yaml::decode("title: Hi\nsubtitle: New\n");
//! let patches = apply_section(&doc, Section::Hero, Some(&value), &CmsConfig::default());
//! assert_eq!(patches.len(), 2);
//! ```

pub mod apply;
pub mod config;
pub mod defaults;
pub mod error;
pub mod fields;
pub mod loader;
pub mod section;
pub mod source;

pub use apply::{HERO_TITLE_VARIABLE, apply_section};
pub use config::{CmsConfig, FallbackPolicy};
pub use error::{CmsError, Result, SourceError};
pub use fields::Fields;
pub use loader::{Loader, SectionData, SectionStatus};
pub use section::Section;
pub use source::{ContentSource, DirectorySource, MemorySource};
