//! The eight content sections of the page.

use std::fmt;
use std::str::FromStr;

use cms_yaml::Value;
use serde::{Deserialize, Serialize};

use crate::fields::Fields;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Section {
    Site,
    Hero,
    About,
    Products,
    Contact,
    Navigation,
    Footer,
    SpecialOffer,
}

impl Section {
    pub const ALL: [Section; 8] = [
        Section::Site,
        Section::Hero,
        Section::About,
        Section::Products,
        Section::Contact,
        Section::Navigation,
        Section::Footer,
        Section::SpecialOffer,
    ];

    /// Name used in logs, JSON output and the defaults table.
    pub fn name(self) -> &'static str {
        match self {
            Section::Site => "site",
            Section::Hero => "hero",
            Section::About => "about",
            Section::Products => "products",
            Section::Contact => "contact",
            Section::Navigation => "navigation",
            Section::Footer => "footer",
            Section::SpecialOffer => "specialOffer",
        }
    }

    /// Content file name without extension.
    pub fn file_stem(self) -> &'static str {
        match self {
            Section::SpecialOffer => "special_offer",
            other => other.name(),
        }
    }

    pub fn file_name(self, extension: &str) -> String {
        format!("{}.{}", self.file_stem(), extension)
    }

    /// The minimal-presence check a decoded value must pass before any of
    /// it is applied.
    pub fn accepts(self, value: &Value) -> bool {
        let fields = Fields::new(self, value);
        match self {
            Section::Site => fields.any_present(&["title", "description", "logo"]),
            Section::Hero | Section::About | Section::Products | Section::Contact => {
                fields.text("title").is_some()
            }
            Section::Navigation => fields.seq("items").is_some(),
            Section::Footer => {
                fields.any_present(&["copyright", "developer_name", "developer_link"])
            }
            Section::SpecialOffer => true,
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Section {
    type Err = String;

    /// Accepts either the section name or its file stem.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::ALL
            .into_iter()
            .find(|section| section.name() == s || section.file_stem() == s)
            .ok_or_else(|| format!("unknown section `{}`", s))
    }
}
