//! Turning decoded section content into page patches.
//!
//! [`apply_section`] is a pure function of a document snapshot and a decoded
//! value. It never fails: content that is missing or malformed produces
//! fewer patches, never an error.

mod builder;
mod sections;

use cms_dom::{Document, Patch};
use cms_yaml::Value;
use tracing::debug;

use crate::config::{CmsConfig, FallbackPolicy};
use crate::defaults;
use crate::fields::Fields;
use crate::section::Section;
use builder::PatchBuilder;

pub use sections::HERO_TITLE_VARIABLE;

/// Compute the patches for one section.
///
/// `value` is `None` when the section's content file was missing or could
/// not be fetched. If there is no value, or it fails the section's
/// presence check, the configured [`FallbackPolicy`] decides what happens:
/// by default nothing is patched and the page keeps its markup. The special
/// offer is the exception; without enabled content the popup is hidden.
pub fn apply_section(
    document: &Document,
    section: Section,
    value: Option<&Value>,
    config: &CmsConfig,
) -> Vec<Patch> {
    let content = match value {
        Some(value) if section.accepts(value) => Some(value),
        Some(_) => {
            debug!(%section, "content failed its presence check");
            fallback(section, config)
        }
        None => fallback(section, config),
    };

    let mut out = PatchBuilder::new(document, section);
    let data = content.map(|value| Fields::new(section, value));
    match (section, data) {
        (Section::SpecialOffer, data) => sections::special_offer(&mut out, data),
        (_, None) => {}
        (Section::Site, Some(data)) => sections::site(&mut out, data),
        (Section::Hero, Some(data)) => sections::hero(&mut out, data),
        (Section::About, Some(data)) => sections::about(&mut out, data),
        (Section::Products, Some(data)) => sections::products(&mut out, data),
        (Section::Contact, Some(data)) => sections::contact(&mut out, data, config),
        (Section::Navigation, Some(data)) => sections::navigation(&mut out, data),
        (Section::Footer, Some(data)) => sections::footer(&mut out, data, config),
    }

    let patches = out.finish();
    debug!(%section, patches = patches.len(), "section applied");
    patches
}

fn fallback(section: Section, config: &CmsConfig) -> Option<&'static Value> {
    match config.fallback {
        FallbackPolicy::PreserveExisting => {
            debug!(%section, "keeping existing markup");
            None
        }
        FallbackPolicy::Defaults => {
            let value = defaults::fallback_for(section);
            debug!(%section, found = value.is_some(), "using built-in defaults");
            value
        }
    }
}
