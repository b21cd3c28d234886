use crate::{
  catalog::{EnchantCatalog, ItemCatalog},
  item::Item,
  nbt::Tag,
  upgrade::UpgradeTables,
};
use std::{fs, io, path::Path};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
  #[error("could not read `{path}`: {err}")]
  Io { path: String, err: io::Error },
  #[error("invalid json: {0}")]
  Json(#[from] serde_json::Error),
}

/// All of the static game data. This is loaded once at startup, and then
/// shared (usually in an `Arc`) by everything that builds items.
#[derive(Debug, Clone, Default)]
pub struct GameData {
  pub items:    ItemCatalog,
  pub enchants: EnchantCatalog,
  pub upgrades: UpgradeTables,
}

impl GameData {
  /// Parses the three data files from json source.
  pub fn from_json(items: &str, enchants: &str, upgrades: &str) -> Result<Self, DataError> {
    Ok(GameData {
      items:    ItemCatalog::from_json(items)?,
      enchants: EnchantCatalog::from_json(enchants)?,
      upgrades: UpgradeTables::from_json(upgrades)?,
    })
  }

  /// Reads and parses the three data files.
  pub fn load(
    items: impl AsRef<Path>,
    enchants: impl AsRef<Path>,
    upgrades: impl AsRef<Path>,
  ) -> Result<Self, DataError> {
    let data = GameData::from_json(&read(items)?, &read(enchants)?, &read(upgrades)?)?;
    info!(
      "loaded {} items, {} enchantments and {} upgrades",
      data.items.len(),
      data.enchants.len(),
      data.upgrades.len()
    );
    Ok(data)
  }

  /// Builds an item from an item compound, using the catalogs in self.
  pub fn item_from_nbt(&self, tag: &Tag) -> Item {
    Item::from_nbt(tag, &self.items, &self.enchants)
  }
}

fn read(path: impl AsRef<Path>) -> Result<String, DataError> {
  let path = path.as_ref();
  fs::read_to_string(path).map_err(|err| DataError::Io { path: path.display().to_string(), err })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn from_json() {
    let data = GameData::from_json(
      r#"[{ "type": 1, "meta": 0, "name": "Stone" }]"#,
      r#"[{ "id": 16, "displayName": "Sharpness" }]"#,
      r#"{ "Pit": { "Upgrades": {} } }"#,
    )
    .unwrap();
    assert_eq!(data.items.len(), 1);
    assert_eq!(data.enchants.len(), 1);
    assert!(data.upgrades.is_empty());
    assert_eq!(data.item_from_nbt(&Tag::compound(&[("id", Tag::Short(1))])).name, "Stone");

    assert!(matches!(GameData::from_json("[]", "[]", "{}"), Err(DataError::Json(_))));
  }

  #[test]
  fn missing_file() {
    let err = GameData::load("/nonexistent/items.json", "", "").unwrap_err();
    assert!(matches!(&err, DataError::Io { path, .. } if path == "/nonexistent/items.json"));
  }
}
