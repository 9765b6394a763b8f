//! Built-in fallback content.

use cms_yaml::Value;
use once_cell::sync::Lazy;

use crate::section::Section;

static DEFAULTS_SOURCE: &str = include_str!("defaults.yml");

static DEFAULTS: Lazy<Value> = Lazy::new(|| cms_yaml::decode(DEFAULTS_SOURCE));

/// Default content for `section`, if there is any. Navigation and footer
/// have none.
pub fn fallback_for(section: Section) -> Option<&'static Value> {
    DEFAULTS.get(section.name())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_pass_their_checks() {
        for section in Section::ALL {
            if let Some(value) = fallback_for(section) {
                assert!(section.accepts(value), "defaults for {section} rejected");
            }
        }
    }

    #[test]
    fn test_sections_with_defaults() {
        let covered: Vec<_> = Section::ALL
            .into_iter()
            .filter(|section| fallback_for(*section).is_some())
            .collect();
        assert_eq!(
            covered,
            vec![
                Section::Site,
                Section::Hero,
                Section::About,
                Section::Products,
                Section::Contact,
                Section::SpecialOffer,
            ]
        );
    }

    #[test]
    fn test_offer_disabled_by_default() {
        let offer = fallback_for(Section::SpecialOffer).unwrap();
        assert_eq!(offer.get("enabled"), Some(&Value::Bool(false)));
        assert_eq!(
            fallback_for(Section::Site).and_then(|site| site.get("logo")),
            Some(&Value::from("/assets/logo.png"))
        );
    }
}
