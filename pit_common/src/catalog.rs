//! Read-only reference tables for items and enchantments.
//!
//! These are loaded once, from the same json files the game data is published
//! in, and only ever queried afterwards.

use crate::data::DataError;
use serde_derive::Deserialize;
use std::collections::HashMap;

/// One entry of the item table. Items with sub-types (wool colors, potion
/// kinds, etc) have one record per `meta`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ItemRecord {
  #[serde(rename = "type")]
  pub id:   i32,
  #[serde(default)]
  pub meta: i32,
  pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EnchantRecord {
  pub id:           i32,
  #[serde(rename = "displayName")]
  pub display_name: String,
}

/// All known items, grouped by id. The records for each id keep the order
/// they were given in, as the first one is used as the fallback name.
#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
  items: HashMap<i32, Vec<ItemRecord>>,
}

#[derive(Debug, Clone, Default)]
pub struct EnchantCatalog {
  enchants: Vec<EnchantRecord>,
}

impl ItemCatalog {
  pub fn new(records: impl IntoIterator<Item = ItemRecord>) -> Self {
    let mut items: HashMap<i32, Vec<ItemRecord>> = HashMap::new();
    for rec in records {
      items.entry(rec.id).or_default().push(rec);
    }
    ItemCatalog { items }
  }

  /// Parses a json array of `{ type, meta, name }` records.
  pub fn from_json(src: &str) -> Result<Self, DataError> {
    let records: Vec<ItemRecord> = serde_json::from_str(src)?;
    Ok(ItemCatalog::new(records))
  }

  /// Returns the name of the item with the given id and meta. If there is no
  /// item with that exact meta, this returns the first item with the same id.
  /// A `None` meta (a color, or no meta at all) never matches exactly.
  pub fn name_of(&self, id: i32, meta: Option<i32>) -> Option<&str> {
    let records = self.items.get(&id)?;
    meta
      .and_then(|meta| records.iter().find(|rec| rec.meta == meta))
      .or_else(|| records.first())
      .map(|rec| rec.name.as_str())
  }

  pub fn len(&self) -> usize { self.items.values().map(Vec::len).sum() }
  pub fn is_empty(&self) -> bool { self.items.is_empty() }
}

impl EnchantCatalog {
  pub fn new(enchants: Vec<EnchantRecord>) -> Self { EnchantCatalog { enchants } }

  /// Parses a json array of `{ id, displayName }` records. Other fields are
  /// ignored.
  pub fn from_json(src: &str) -> Result<Self, DataError> {
    Ok(EnchantCatalog::new(serde_json::from_str(src)?))
  }

  pub fn get(&self, id: i32) -> Option<&EnchantRecord> { self.enchants.iter().find(|e| e.id == id) }

  pub fn len(&self) -> usize { self.enchants.len() }
  pub fn is_empty(&self) -> bool { self.enchants.is_empty() }
}
