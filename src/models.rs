//! Catalog Models
//!
//! Data structures matching the catalog API. Field names follow the API so
//! a stored collection is the same JSON the API returned.

use serde::{Deserialize, Serialize};

/// List entry from a catalog page; carries only a name and a link to the detail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItemSummary {
    pub name: String,
    #[serde(rename = "url")]
    pub reference_url: String,
}

impl CatalogItemSummary {
    /// Catalog id embedded in the reference url, if there is one
    pub fn id(&self) -> Option<u32> {
        item_id_from_reference(&self.reference_url)
    }
}

/// One page of a catalog listing
#[derive(Debug, Clone, PartialEq)]
pub struct ListPage {
    pub total: u32,
    pub has_next: bool,
    pub items: Vec<CatalogItemSummary>,
}

/// Name plus API link, the API's shape for every cross-reference
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Sprites {
    pub front_default: Option<String>,
    pub front_shiny: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeSlot {
    pub slot: u32,
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

impl TypeSlot {
    pub fn type_name(&self) -> &str {
        &self.kind.name
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatEntry {
    pub base_stat: u32,
    pub effort: u32,
    pub stat: NamedResource,
}

impl StatEntry {
    pub fn stat_name(&self) -> &str {
        &self.stat.name
    }

    pub fn base_value(&self) -> u32 {
        self.base_stat
    }
}

/// Full catalog item; immutable once fetched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItemDetail {
    pub id: u32,
    pub name: String,
    pub height: u32,
    pub weight: u32,
    pub sprites: Sprites,
    pub types: Vec<TypeSlot>,
    pub stats: Vec<StatEntry>,
}

/// The persisted unit of a collection is the detail exactly as fetched
pub type CollectionEntry = CatalogItemDetail;

/// Shown when an item has no default sprite
pub const PLACEHOLDER_SPRITE: &str = "/placeholder.svg?height=128&width=128";

/// Stats shown on a card: (api name, label)
pub const CARD_STATS: &[(&str, &str)] = &[
    ("hp", "HP"),
    ("attack", "ATK"),
    ("defense", "DEF"),
];

impl CatalogItemDetail {
    /// Catalog number, e.g. `#025`
    pub fn display_number(&self) -> String {
        format!("#{:03}", self.id)
    }

    /// Name with its first letter capitalised
    pub fn display_name(&self) -> String {
        let mut chars = self.name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Base value of the named stat, 0 when the item doesn't list it
    pub fn base_stat(&self, name: &str) -> u32 {
        self.stats
            .iter()
            .find(|s| s.stat_name() == name)
            .map(StatEntry::base_value)
            .unwrap_or(0)
    }

    pub fn sprite_or_placeholder(&self) -> &str {
        self.sprites.front_default.as_deref().unwrap_or(PLACEHOLDER_SPRITE)
    }
}

/// What a card was handed: a bare list entry to resolve, or a full item
#[derive(Debug, Clone, PartialEq)]
pub enum CardSource {
    Summary(CatalogItemSummary),
    Detail(CatalogItemDetail),
}

/// Badge color for an elemental type
pub fn type_color(type_name: &str) -> &'static str {
    match type_name {
        "fire" => "#ef4444",
        "water" => "#3b82f6",
        "grass" => "#22c55e",
        "electric" => "#eab308",
        "psychic" => "#ec4899",
        "ice" => "#06b6d4",
        "dragon" => "#a855f7",
        "dark" => "#1f2937",
        "fairy" => "#f9a8d4",
        "normal" => "#9ca3af",
        "fighting" => "#b91c1c",
        "poison" => "#9333ea",
        "ground" => "#ca8a04",
        "flying" => "#818cf8",
        "bug" => "#4ade80",
        "rock" => "#854d0e",
        "ghost" => "#7e22ce",
        "steel" => "#6b7280",
        _ => "#9ca3af",
    }
}

/// Parse the item id out of a reference url such as
/// `https://pokeapi.co/api/v2/pokemon/25/`: the second-to-last `/` segment.
pub fn item_id_from_reference(url: &str) -> Option<u32> {
    let mut segments = url.rsplit('/');
    segments.next()?;
    segments
        .next()?
        .parse::<u32>()
        .ok()
        .filter(|id| *id > 0)
}
