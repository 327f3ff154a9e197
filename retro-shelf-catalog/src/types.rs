//! Core record types: items, platforms, and the sync snapshot.
//!
//! Field names serialize in camelCase so snapshots stay interchangeable
//! with exports produced by earlier versions of the tracker.

use serde::{Deserialize, Serialize};

/// Snapshot format version written by [`Snapshot::new`].
pub const SNAPSHOT_VERSION: &str = "1";

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// A named partition of the local store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Games,
    Consoles,
    /// Reserved in the schema; no surface writes to it yet.
    Computers,
    Platforms,
}

impl Category {
    /// Every category present in the store schema.
    pub const ALL: [Category; 4] = [
        Category::Games,
        Category::Consoles,
        Category::Computers,
        Category::Platforms,
    ];

    /// The categories that hold [`Item`] records.
    pub const ITEMS: [Category; 2] = [Category::Games, Category::Consoles];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Games => "games",
            Self::Consoles => "consoles",
            Self::Computers => "computers",
            Self::Platforms => "platforms",
        }
    }

    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "games" | "game" => Some(Self::Games),
            "consoles" | "console" => Some(Self::Consoles),
            "computers" | "computer" => Some(Self::Computers),
            "platforms" | "platform" => Some(Self::Platforms),
            _ => None,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Item
// ---------------------------------------------------------------------------

/// A catalogued game or console/hardware record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Stable unique identifier, assigned once by the store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    /// References [`Platform::name`] by value. Not enforced at write time.
    #[serde(default)]
    pub platform: String,
    /// URL or `data:` URI with the embedded cover.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub price: f64,
    /// `DD/MM/YYYY`, validated on save.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acquired_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub developer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub is_wishlist: bool,
    #[serde(default)]
    pub is_validated: bool,
    /// Stamped when the item is checked, never recomputed afterwards.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validated_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Item {
    /// A fresh, unsaved item with only the required fields filled in.
    pub fn new(title: impl Into<String>, platform: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            platform: platform.into(),
            ..Self::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Platform
// ---------------------------------------------------------------------------

/// A platform registry entry. Names are unique case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Platform {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

impl Platform {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Full-database payload for export/import and cloud sync.
///
/// Import is a full replace: no merge, no per-field conflict resolution.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub games: Vec<Item>,
    #[serde(default)]
    pub consoles: Vec<Item>,
    #[serde(default)]
    pub platforms: Vec<Platform>,
}

impl Snapshot {
    pub fn new(games: Vec<Item>, consoles: Vec<Item>, platforms: Vec<Platform>) -> Self {
        Self {
            version: SNAPSHOT_VERSION.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            games,
            consoles,
            platforms,
        }
    }

    pub fn record_count(&self) -> usize {
        self.games.len() + self.consoles.len() + self.platforms.len()
    }
}

/// Generate a fresh record id.
pub fn new_record_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_round_trips_loose_names() {
        assert_eq!(Category::from_str_loose("Games"), Some(Category::Games));
        assert_eq!(Category::from_str_loose("console"), Some(Category::Consoles));
        assert_eq!(Category::from_str_loose("platforms"), Some(Category::Platforms));
        assert_eq!(Category::from_str_loose("cartridges"), None);
    }

    #[test]
    fn item_serializes_in_camel_case() {
        let mut item = Item::new("Sonic 2", "Mega Drive");
        item.is_wishlist = true;
        item.acquired_date = Some("01/06/2019".to_string());
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["isWishlist"], true);
        assert_eq!(json["acquiredDate"], "01/06/2019");
        // Unset optionals stay off the wire
        assert!(json.get("validatedDate").is_none());
    }

    #[test]
    fn snapshot_tolerates_missing_sections() {
        let snap: Snapshot = serde_json::from_str(r#"{"games":[{"title":"Rez"}]}"#).unwrap();
        assert_eq!(snap.games.len(), 1);
        assert!(snap.consoles.is_empty());
        assert!(snap.platforms.is_empty());
    }
}
