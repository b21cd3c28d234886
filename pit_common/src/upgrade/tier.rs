use super::{DisplayItem, Level, RefFunction, Strategy, UpgradeDefinition};
use crate::{item::Meta, path::get_ref, util::to_hex};
use serde_derive::Serialize;
use serde_json::Value;

/// The placeholder replaced by levels and api values.
const PLACEHOLDER: char = '$';

/// An upgrade definition with its description filled in for a single tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResolvedDefinition {
  pub name:        String,
  pub description: Vec<String>,
  pub item:        DisplayItem,
  /// False when the definition has no content for this tier (the tier is past
  /// the end of the description or levels, or the api value is missing). The
  /// description is still filled in as well as possible, with missing values
  /// replaced by nothing.
  pub defined:     bool,
}

impl UpgradeDefinition {
  /// Fills in the description for the given tier. Negative tiers are treated
  /// as tier 0. `api` is only used by [`Strategy::ApiReference`].
  ///
  /// This only reads from `self`, so the same definition can be resolved at
  /// any number of tiers at once.
  pub fn resolve(&self, tier: i64, api: Option<&Value>) -> ResolvedDefinition {
    let tier = usize::try_from(tier.max(0)).unwrap_or(usize::MAX);
    let mut item = self.item.clone();

    let (description, defined) = match &self.strategy {
      Strategy::Reveal { lines, ignore_index } => {
        let len = tier.saturating_add(1).saturating_add(*ignore_index);
        (lines.iter().take(len).cloned().collect(), len <= lines.len())
      }
      Strategy::Separated { tiers } => match tiers.get(tier) {
        Some(lines) => (lines.clone(), true),
        None => (vec![], false),
      },
      Strategy::ApiReference { lines, path, function, .. } => {
        let value = api_value(api, path, function.as_ref());
        if let Some(Meta::Color(color)) = &mut item.meta {
          *color = substitute(color, value.as_deref());
        }
        (substitute_all(lines, value.as_deref()), value.is_some())
      }
      Strategy::Levels { lines } => {
        let level = self.levels.get(tier).map(Level::to_string);
        let defined = level.is_some() || !lines.iter().any(|l| l.contains(PLACEHOLDER));
        (substitute_all(lines, level.as_deref()), defined)
      }
    };

    ResolvedDefinition { name: self.name.clone(), description, item, defined }
  }
}

/// Reads the value at `path` in the api, and formats it as a string.
fn api_value(
  api: Option<&Value>,
  path: &[String],
  function: Option<&RefFunction>,
) -> Option<String> {
  let value = get_ref(api, path)?;
  match function {
    Some(RefFunction::Hex) => value
      .as_u64()
      .or_else(|| value.as_f64().filter(|v| v.fract() == 0.0 && *v >= 0.0).map(|v| v as u64))
      .and_then(|v| u32::try_from(v).ok())
      .map(to_hex),
    Some(RefFunction::Other(_)) | None => match value {
      Value::String(s) => Some(s.clone()),
      Value::Number(n) => Some(n.to_string()),
      Value::Bool(b) => Some(b.to_string()),
      Value::Null | Value::Array(_) | Value::Object(_) => None,
    },
  }
}

/// Replaces the first placeholder in the line. A missing value removes the
/// placeholder.
fn substitute(line: &str, value: Option<&str>) -> String {
  line.replacen(PLACEHOLDER, value.unwrap_or(""), 1)
}

fn substitute_all(lines: &[String], value: Option<&str>) -> Vec<String> {
  lines.iter().map(|line| substitute(line, value)).collect()
}
