//! Items from the external game-item catalog

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Catalog collections the build form autocompletes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogCategory {
    Weapons,
    Armors,
    Talismans,
    Incantations,
}

impl CatalogCategory {
    pub const ALL: [CatalogCategory; 4] = [
        Self::Weapons,
        Self::Armors,
        Self::Talismans,
        Self::Incantations,
    ];

    /// Path segment used by the catalog API.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weapons => "weapons",
            Self::Armors => "armors",
            Self::Talismans => "talismans",
            Self::Incantations => "incantations",
        }
    }

    /// Category bound to a build form field, by input id.
    pub fn for_field(field_id: &str) -> Option<Self> {
        match field_id {
            "id_weapons" => Some(Self::Weapons),
            "id_armor" => Some(Self::Armors),
            "id_talismans" => Some(Self::Talismans),
            "id_spells" => Some(Self::Incantations),
            _ => None,
        }
    }
}

impl fmt::Display for CatalogCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CatalogCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weapons" => Ok(Self::Weapons),
            "armors" | "armor" => Ok(Self::Armors),
            "talismans" => Ok(Self::Talismans),
            "incantations" | "spells" => Ok(Self::Incantations),
            other => Err(DomainError::parse(format!(
                "Unknown catalog category: {}",
                other
            ))),
        }
    }
}

/// A named game item. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogItem {
    name: String,
    description: Option<String>,
    image_url: Option<String>,
}

impl CatalogItem {
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        image_url: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.filter(|d| !d.trim().is_empty()),
            image_url: image_url.filter(|u| !u.trim().is_empty()),
        }
    }

    /// Item with only a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name, None, None)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_fields_map_to_categories() {
        assert_eq!(
            CatalogCategory::for_field("id_weapons"),
            Some(CatalogCategory::Weapons)
        );
        assert_eq!(
            CatalogCategory::for_field("id_armor"),
            Some(CatalogCategory::Armors)
        );
        assert_eq!(
            CatalogCategory::for_field("id_spells"),
            Some(CatalogCategory::Incantations)
        );
        assert_eq!(CatalogCategory::for_field("id_title"), None);
    }

    #[test]
    fn category_parses_from_path_segment() {
        for category in CatalogCategory::ALL {
            assert_eq!(category.as_str().parse::<CatalogCategory>(), Ok(category));
        }
        assert!("ashes".parse::<CatalogCategory>().is_err());
    }

    #[test]
    fn blank_optional_fields_are_dropped() {
        let item = CatalogItem::new("Moonveil", Some("  ".into()), Some(String::new()));
        assert_eq!(item.description(), None);
        assert_eq!(item.image_url(), None);
    }

    #[test]
    fn category_serializes_as_path_segment() {
        let json = serde_json::to_string(&CatalogCategory::Incantations).unwrap();
        assert_eq!(json, "\"incantations\"");
        let parsed: CatalogCategory = serde_json::from_str("\"armors\"").unwrap();
        assert_eq!(parsed, CatalogCategory::Armors);
    }
}
