use crate::{
  item::Item,
  util::{roman, Color},
  GameData,
};
use serde::de::{Deserialize, DeserializeOwned, Deserializer};
use serde_derive::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// A single purchase of an upgrade. Buying the same upgrade again adds
/// another entry with the same key.
///
/// Only the key has to be valid. The other fields are informational, so a
/// value of the wrong type is read as `None` instead of losing the entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlockEntry {
  pub key:       String,
  #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
  pub tier:      Option<u32>,
  /// Milliseconds since the epoch.
  #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
  pub timestamp: Option<u64>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
  D: Deserializer<'de>,
  T: DeserializeOwned,
{
  let v = Value::deserialize(deserializer)?;
  Ok(serde_json::from_value(v).ok())
}

impl UnlockEntry {
  pub fn new(key: impl Into<String>) -> Self {
    UnlockEntry { key: key.into(), tier: None, timestamp: None }
  }
}

/// A set of purchased upgrades. This can be the shop unlocks for a single
/// prestige, or the renown shop unlocks.
///
/// The tier of an upgrade is never stored. It is the number of entries with
/// that upgrade's key.
#[derive(Debug, Clone)]
pub struct UnlockCollection {
  data:    Arc<GameData>,
  entries: Vec<UnlockEntry>,
  /// The api output this collection was read from. Some upgrades show values
  /// from it in their description.
  api:     Value,
}

impl UnlockCollection {
  pub fn new(data: Arc<GameData>, entries: Vec<UnlockEntry>, api: Value) -> Self {
    UnlockCollection { data, entries, api }
  }

  /// Reads a raw json array of unlocks. Entries without a key are skipped, and
  /// anything other than an array is an empty collection.
  pub fn from_json(data: Arc<GameData>, raw: &Value, api: Value) -> Self {
    let entries = raw
      .as_array()
      .map(|arr| {
        arr
          .iter()
          .filter_map(|v| match serde_json::from_value(v.clone()) {
            Ok(entry) => Some(entry),
            Err(e) => {
              debug!("skipping invalid unlock {v}: {e}");
              None
            }
          })
          .collect()
      })
      .unwrap_or_default();
    UnlockCollection::new(data, entries, api)
  }

  pub fn entries(&self) -> &[UnlockEntry] { &self.entries }
  pub fn api(&self) -> &Value { &self.api }

  /// Returns true if the upgrade has been bought at least once.
  pub fn has(&self, key: &str) -> bool { self.entries.iter().any(|e| e.key == key) }

  /// Returns the tier of an upgrade. This is 0 if it has never been bought.
  pub fn tier_of(&self, key: &str) -> u32 {
    self.entries.iter().filter(|e| e.key == key).count() as u32
  }

  /// Returns every key in this collection once, in the order they were first
  /// bought.
  pub fn keys(&self) -> Vec<&str> {
    let mut keys: Vec<&str> = vec![];
    for e in &self.entries {
      if !keys.contains(&e.key.as_str()) {
        keys.push(&e.key);
      }
    }
    keys
  }

  /// Builds the item shown for an upgrade. This shows the description for the
  /// tier that is owned, and the item count is the tier. Upgrades that have
  /// not been bought are shown in red, and show the description of their
  /// first tier.
  ///
  /// Keys that are not a normal or renown upgrade produce an empty item.
  pub fn build_item(&self, key: &str) -> Item {
    let Some(def) = self.data.upgrades.definition(key) else {
      warn!("cannot build item for unknown upgrade `{key}`");
      return Item::empty();
    };
    let tier = self.tier_of(key);
    let up = def.resolve(i64::from(tier) - 1, Some(&self.api));
    let color = if tier > 0 { Color::Blue } else { Color::Red };
    let name = if tier > 0 && def.is_tiered() {
      format!("{color}{} {}", up.name, roman(tier))
    } else {
      format!("{color}{}", up.name)
    };
    Item::new(name, up.description, up.item.id, up.item.meta, tier as i32)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{item::Meta, upgrade::UpgradeTables};
  use pretty_assertions::assert_eq;
  use serde_json::json;

  fn data() -> Arc<GameData> {
    let upgrades = UpgradeTables::from_json(
      r#"{ "Pit": {
        "Upgrades": {
          "xp_boost": {
            "Name": "XP Boost",
            "Description": ["§7Earn §b+$% XP"],
            "Item": { "Id": 351, "Meta": 6 },
            "Levels": [10, 20, 30]
          },
          "autobuy": { "Name": "Autobuy", "Description": ["§7Buys things."], "Item": { "Id": 54 } }
        },
        "RenownUpgrades": {
          "tenacity": {
            "Name": "Tenacity",
            "Description": [["§7Heal 1"], ["§7Heal 2"]],
            "Item": { "Id": 376 },
            "Extra": { "Formatting": "Seperated" }
          },
          "armor": {
            "Name": "Armor Color",
            "Description": ["§7Color: #$"],
            "Item": { "Id": 300, "Meta": "$" },
            "Extra": { "Formatting": "ApiReference", "Ref": ["Pit", "profile", "color"], "Function": "toHex" }
          }
        }
      } }"#,
    )
    .unwrap();
    Arc::new(GameData { upgrades, ..Default::default() })
  }

  fn collection(keys: &[&str]) -> UnlockCollection {
    UnlockCollection::new(
      data(),
      keys.iter().map(|&k| UnlockEntry::new(k)).collect(),
      json!({ "profile": { "color": 0x3366ff } }),
    )
  }

  #[test]
  fn tiers() {
    let c = collection(&["xp_boost", "autobuy", "xp_boost", "tenacity", "xp_boost"]);
    assert_eq!(c.tier_of("xp_boost"), 3);
    assert_eq!(c.tier_of("autobuy"), 1);
    assert_eq!(c.tier_of("nothing"), 0);
    assert!(c.has("tenacity"));
    assert!(!c.has("armor"));
    assert_eq!(c.keys(), vec!["xp_boost", "autobuy", "tenacity"]);

    let reordered = collection(&["xp_boost", "xp_boost", "tenacity", "autobuy", "xp_boost"]);
    assert_eq!(reordered.tier_of("xp_boost"), 3);
  }

  #[test]
  fn build_tiered() {
    let c = collection(&["xp_boost", "xp_boost"]);
    assert_eq!(
      c.build_item("xp_boost"),
      Item::new("§9XP Boost II", vec!["§7Earn §b+20% XP".into()], 351, Some(Meta::Damage(6)), 2)
    );

    let c = collection(&[]);
    assert_eq!(
      c.build_item("xp_boost"),
      Item::new("§cXP Boost", vec!["§7Earn §b+10% XP".into()], 351, Some(Meta::Damage(6)), 0)
    );
  }

  #[test]
  fn build_untiered() {
    let c = collection(&["autobuy"]);
    assert_eq!(
      c.build_item("autobuy"),
      Item::new("§9Autobuy", vec!["§7Buys things.".into()], 54, None, 1)
    );
  }

  #[test]
  fn build_renown() {
    let c = collection(&["tenacity", "tenacity"]);
    assert_eq!(c.build_item("tenacity").name, "§9Tenacity II");
    assert_eq!(c.build_item("tenacity").desc, vec!["§7Heal 2".to_string()]);
    assert_eq!(collection(&[]).build_item("tenacity").desc, vec!["§7Heal 1".to_string()]);

    let item = c.build_item("armor");
    assert_eq!(item.name, "§cArmor Color");
    assert_eq!(item.desc, vec!["§7Color: #3366FF".to_string()]);
    assert_eq!(item.meta, Some(Meta::Color("3366FF".into())));
  }

  #[test]
  fn build_unknown() {
    assert_eq!(collection(&["nothing"]).build_item("nothing"), Item::empty());
  }

  #[test]
  fn from_json() {
    let raw = json!([
      { "key": "xp_boost", "tier": 0, "timestamp": 1600000000000_u64 },
      { "tier": 1 },
      { "key": "xp_boost", "tier": 1, "acquireDate": 5 },
    ]);
    let c = UnlockCollection::from_json(data(), &raw, Value::Null);
    assert_eq!(c.entries().len(), 2);
    assert_eq!(c.entries()[0].timestamp, Some(1600000000000));
    assert_eq!(c.tier_of("xp_boost"), 2);

    let c = UnlockCollection::from_json(data(), &json!({ "key": "xp_boost" }), Value::Null);
    assert!(c.entries().is_empty());
  }

  #[test]
  fn from_json_bad_fields() {
    let raw = json!([
      { "key": "xp_boost", "tier": 0, "timestamp": 1600000000000_u64 },
      { "key": "xp_boost", "tier": 1, "timestamp": 1.6e12 },
      { "key": "xp_boost", "tier": -1 },
      { "key": 5, "tier": 2 },
    ]);
    let c = UnlockCollection::from_json(data(), &raw, Value::Null);
    assert_eq!(c.tier_of("xp_boost"), 3);
    assert_eq!(c.entries()[1].tier, Some(1));
    assert_eq!(c.entries()[1].timestamp, None);
    assert_eq!(c.entries()[2].tier, None);
  }
}
