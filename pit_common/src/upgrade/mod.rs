//! Upgrade definitions, and resolving them at a given tier.
//!
//! Definitions are loaded from the game data json, where each one looks like
//! this:
//!
//! ```ignore
//! "xp_boost": {
//!   "Name": "XP Boost",
//!   "Description": ["§7Earn §b+$% XP §7from", "§7all sources."],
//!   "Item": { "Id": 351, "Meta": 6 },
//!   "Levels": [10, 20, 30, 40, 50, 60]
//! }
//! ```
//!
//! The optional `Extra.Formatting` field selects how the description changes
//! with the tier. That is parsed into a [`Strategy`] up front, so resolving a
//! definition never needs to look at strings.

use crate::{data::DataError, item::Meta};
use serde::de::{self, Deserialize, Deserializer};
use serde_derive::{Deserialize, Serialize};
use serde_json::Value;
use std::{collections::HashMap, fmt};
use thiserror::Error;

mod tier;

pub use tier::ResolvedDefinition;


/// The item shown for an upgrade in the shop.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayItem {
  #[serde(rename = "Id")]
  pub id:   i32,
  #[serde(rename = "Meta", default, skip_serializing_if = "Option::is_none")]
  pub meta: Option<Meta>,
}

/// A single entry of an upgrade's `Levels`. These are the numbers that get
/// substituted into the description, so they may be written as either numbers
/// or strings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Level {
  Number(f64),
  Text(String),
}

impl fmt::Display for Level {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      Self::Number(v) => write!(f, "{v}"),
      Self::Text(v) => write!(f, "{v}"),
    }
  }
}

/// A transform applied to a value read from the api, before it is placed in
/// the description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefFunction {
  /// Formats a number as a 6 digit hex color.
  Hex,
  /// A function we don't know about. The value is used as is.
  Other(String),
}

impl RefFunction {
  fn from_name(name: &str) -> Self {
    match name {
      "toHex" => RefFunction::Hex,
      _ => RefFunction::Other(name.into()),
    }
  }
}

/// How a description changes with the tier.
#[derive(Debug, Clone, PartialEq)]
pub enum Strategy {
  /// Each tier shows one more line. The first `1 + ignore_index` lines are
  /// always shown.
  Reveal { lines: Vec<String>, ignore_index: usize },
  /// Each tier has its own description.
  Separated { tiers: Vec<Vec<String>> },
  /// The first `$` in each line (and in a color meta) is replaced with a value
  /// from the api. `path` does not include the category (the first element of
  /// the `Ref` in the json).
  ApiReference {
    lines:    Vec<String>,
    category: String,
    path:     Vec<String>,
    function: Option<RefFunction>,
  },
  /// The first `$` in each line is replaced with the level for this tier.
  Levels { lines: Vec<String> },
}

/// A purchasable upgrade. These are shared by everything that displays
/// upgrades, and are never modified after loading.
#[derive(Debug, Clone, PartialEq)]
pub struct UpgradeDefinition {
  pub name:     String,
  pub item:     DisplayItem,
  pub levels:   Vec<Level>,
  pub strategy: Strategy,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
  #[error("`ApiReference` formatting needs a non-empty `Extra.Ref`")]
  MissingRef,
  #[error("invalid `Extra.Ref` segment: {0}")]
  InvalidRef(Value),
}

impl UpgradeDefinition {
  /// Returns true if this upgrade has multiple tiers. Tiered upgrades show
  /// their tier as a numeral after their name.
  pub fn is_tiered(&self) -> bool {
    self.levels.len() > 1
      || matches!(self.strategy, Strategy::Separated { .. } | Strategy::Reveal { .. })
  }
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawDefinition {
  name:        String,
  #[serde(default)]
  description: Vec<RawLines>,
  #[serde(default)]
  item:        DisplayItem,
  #[serde(default)]
  levels:      Vec<Level>,
  #[serde(default)]
  extra:       Option<RawExtra>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawExtra {
  formatting:   Option<String>,
  #[serde(rename = "Ref")]
  reference:    Option<Vec<Value>>,
  function:     Option<String>,
  ignore_index: Option<usize>,
}

/// A description entry. `Separated` descriptions are a list of lists, and
/// everything else is a list of lines.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawLines {
  Line(String),
  Lines(Vec<String>),
}

impl RawLines {
  fn into_vec(self) -> Vec<String> {
    match self {
      Self::Line(line) => vec![line],
      Self::Lines(lines) => lines,
    }
  }
}

fn flatten(description: Vec<RawLines>) -> Vec<String> {
  description.into_iter().flat_map(RawLines::into_vec).collect()
}

impl TryFrom<RawDefinition> for UpgradeDefinition {
  type Error = DefinitionError;

  fn try_from(raw: RawDefinition) -> Result<Self, DefinitionError> {
    let extra = raw.extra.unwrap_or(RawExtra {
      formatting:   None,
      reference:    None,
      function:     None,
      ignore_index: None,
    });
    let strategy = match extra.formatting.as_deref() {
      Some("Reveal") => Strategy::Reveal {
        lines:        flatten(raw.description),
        ignore_index: extra.ignore_index.unwrap_or(0),
      },
      // The game data spells it "Seperated".
      Some("Seperated" | "Separated") => Strategy::Separated {
        tiers: raw.description.into_iter().map(RawLines::into_vec).collect(),
      },
      Some("ApiReference") => {
        let mut segments = extra
          .reference
          .unwrap_or_default()
          .into_iter()
          .map(|v| match v {
            Value::String(s) => Ok(s),
            Value::Number(n) => Ok(n.to_string()),
            v => Err(DefinitionError::InvalidRef(v)),
          })
          .collect::<Result<Vec<_>, _>>()?
          .into_iter();
        let category = segments.next().ok_or(DefinitionError::MissingRef)?;
        Strategy::ApiReference {
          lines: flatten(raw.description),
          category,
          path: segments.collect(),
          function: extra.function.as_deref().map(RefFunction::from_name),
        }
      }
      _ => Strategy::Levels { lines: flatten(raw.description) },
    };
    Ok(UpgradeDefinition { name: raw.name, item: raw.item, levels: raw.levels, strategy })
  }
}

impl<'de> Deserialize<'de> for UpgradeDefinition {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: Deserializer<'de>,
  {
    let raw = RawDefinition::deserialize(deserializer)?;
    UpgradeDefinition::try_from(raw).map_err(de::Error::custom)
  }
}

/// All the upgrade tables from the game data.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpgradeTables {
  /// Upgrades bought with gold, which reset on prestige.
  #[serde(rename = "Upgrades", default)]
  pub upgrades:        HashMap<String, UpgradeDefinition>,
  /// Upgrades bought with renown, which are permanent.
  #[serde(rename = "RenownUpgrades", default)]
  pub renown_upgrades: HashMap<String, UpgradeDefinition>,
}

#[derive(Deserialize)]
struct GameDocument {
  #[serde(rename = "Pit")]
  pit: UpgradeTables,
}

impl UpgradeTables {
  /// Parses the game data document. The tables are stored under a top level
  /// `Pit` key, and anything else in the document is ignored.
  pub fn from_json(src: &str) -> Result<Self, DataError> {
    let doc: GameDocument = serde_json::from_str(src)?;
    Ok(doc.pit)
  }

  /// Finds the definition for the given key. Normal upgrades are checked
  /// before renown upgrades.
  pub fn definition(&self, key: &str) -> Option<&UpgradeDefinition> {
    self.upgrades.get(key).or_else(|| self.renown_upgrades.get(key))
  }

  pub fn len(&self) -> usize { self.upgrades.len() + self.renown_upgrades.len() }
  pub fn is_empty(&self) -> bool { self.len() == 0 }
}
