//! Decoding of the JSON form of nbt, as written by JavaScript nbt decoders.
//!
//! Every tag is wrapped in an object with a `type` and a `value`:
//!
//! ```ignore
//! { "type": "compound", "value": {
//!   "id":    { "type": "short", "value": 276 },
//!   "Lore":  { "type": "list", "value": { "type": "string", "value": ["a", "b"] } },
//!   "ench":  { "type": "list", "value": { "type": "compound", "value": [
//!     { "id": { "type": "short", "value": 16 }, "lvl": { "type": "short", "value": 2 } }
//!   ] } }
//! } }
//! ```
//!
//! List elements are not wrapped, as the list already stores their type. Longs
//! are stored as a `[high, low]` pair of ints.
//!
//! Only the root has to be valid. A compound entry or list element that
//! cannot be decoded is left out, so one bad field never hides the rest of
//! the tree.

use super::Tag;
use serde::de::{self, Deserialize, Deserializer};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum JsonError {
  #[error("expected an object with `type` and `value`, got {0}")]
  NotWrapped(Value),
  #[error("unknown tag type `{0}`")]
  UnknownType(String),
  #[error("invalid value for tag type `{ty}`: {value}")]
  InvalidValue { ty: String, value: Value },
}

impl Tag {
  /// Parses a wrapped tag (an object with `type` and `value`).
  pub fn from_json(v: &Value) -> Result<Tag, JsonError> {
    match (v.get("type").and_then(Value::as_str), v.get("value")) {
      (Some(ty), Some(value)) => Tag::from_typed_json(ty, value),
      _ => Err(JsonError::NotWrapped(v.clone())),
    }
  }

  fn from_typed_json(ty: &str, value: &Value) -> Result<Tag, JsonError> {
    let invalid = || JsonError::InvalidValue { ty: ty.into(), value: value.clone() };
    let int = |v: &Value| v.as_i64().ok_or_else(invalid);
    Ok(match ty {
      "byte" => Tag::Byte(int(value)?.try_into().map_err(|_| invalid())?),
      "short" => Tag::Short(int(value)?.try_into().map_err(|_| invalid())?),
      "int" => Tag::Int(int(value)?.try_into().map_err(|_| invalid())?),
      "long" => Tag::Long(json_long(value).ok_or_else(invalid)?),
      "float" => Tag::Float(value.as_f64().ok_or_else(invalid)? as f32),
      "double" => Tag::Double(value.as_f64().ok_or_else(invalid)?),
      "string" => Tag::String(value.as_str().ok_or_else(invalid)?.into()),
      "byteArray" => Tag::ByteArr(
        value
          .as_array()
          .ok_or_else(invalid)?
          .iter()
          .map(|v| v.as_i64().map(|v| v as u8))
          .collect::<Option<_>>()
          .ok_or_else(invalid)?,
      ),
      "intArray" => Tag::IntArray(
        value
          .as_array()
          .ok_or_else(invalid)?
          .iter()
          .map(|v| v.as_i64().and_then(|v| v.try_into().ok()))
          .collect::<Option<_>>()
          .ok_or_else(invalid)?,
      ),
      "longArray" => Tag::LongArray(
        value
          .as_array()
          .ok_or_else(invalid)?
          .iter()
          .map(json_long)
          .collect::<Option<_>>()
          .ok_or_else(invalid)?,
      ),
      "list" => {
        let inner_ty = value.get("type").and_then(Value::as_str).ok_or_else(invalid)?;
        let elems = value.get("value").and_then(Value::as_array).ok_or_else(invalid)?;
        if inner_ty == "end" {
          Tag::List(vec![])
        } else {
          Tag::List(
            elems
              .iter()
              .filter_map(|v| {
                Tag::from_typed_json(inner_ty, v)
                  .map_err(|e| debug!("dropping list element {v}: {e}"))
                  .ok()
              })
              .collect(),
          )
        }
      }
      "compound" => {
        let map = value.as_object().ok_or_else(invalid)?;
        let mut inner = HashMap::with_capacity(map.len());
        for (k, v) in map {
          match Tag::from_json(v) {
            Ok(tag) => {
              inner.insert(k.clone(), tag);
            }
            Err(e) => debug!("dropping compound entry `{k}`: {e}"),
          }
        }
        Tag::Compound(inner)
      }
      _ => return Err(JsonError::UnknownType(ty.into())),
    })
  }
}

fn json_long(v: &Value) -> Option<i64> {
  match v {
    Value::Number(n) => n.as_i64(),
    Value::Array(pair) if pair.len() == 2 => {
      let high = pair[0].as_i64()?;
      let low = pair[1].as_i64()?;
      Some((high << 32) | (low as u32 as i64))
    }
    _ => None,
  }
}

impl<'de> Deserialize<'de> for Tag {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: Deserializer<'de>,
  {
    let value = Value::deserialize(deserializer)?;
    Tag::from_json(&value).map_err(de::Error::custom)
  }
}
