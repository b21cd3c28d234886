//! Decoding of stored inventories.
//!
//! The api stores each inventory as a gzipped nbt compound, where the list `i`
//! holds one item compound per slot. In json responses the bytes are written
//! out as an array of signed bytes:
//!
//! ```ignore
//! "inv_contents": { "type": 0, "data": [31, -117, 8, 0, ...] }
//! ```

use crate::{
  nbt::{self, ParseError, Tag},
  path::get_ref,
  GameData, Item,
};
use serde::de::Deserialize;
use serde_derive::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InventoryError {
  #[error("invalid nbt: {0}")]
  Nbt(#[from] ParseError),
  #[error("invalid inventory json: {0}")]
  Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Deserialize)]
struct Blob {
  data: Vec<i8>,
}

/// Decodes an inventory from its nbt bytes (gzipped or not). Every slot is
/// kept, so empty slots show up as [`Item::empty`] at the right index. A root
/// without an `i` list is an empty inventory.
pub fn decode(bytes: &[u8], data: &GameData) -> Result<Vec<Item>, InventoryError> {
  let root = nbt::read(bytes)?;
  let slots = get_ref(Some(&root), &["i"]).and_then(Tag::as_list).unwrap_or_default();
  debug!("decoding inventory with {} slots", slots.len());
  Ok(slots.iter().map(|slot| data.item_from_nbt(slot)).collect())
}

/// Decodes an inventory from the `{ type, data }` object found in api json.
pub fn decode_json(v: &serde_json::Value, data: &GameData) -> Result<Vec<Item>, InventoryError> {
  let blob = Blob::deserialize(v)?;
  let bytes: Vec<u8> = blob.data.into_iter().map(|b| b as u8).collect();
  decode(&bytes, data)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::catalog::{ItemCatalog, ItemRecord};
  use flate2::{write::GzEncoder, Compression};
  use pretty_assertions::assert_eq;
  use serde_json::json;
  use std::io::Write;

  fn data() -> GameData {
    GameData {
      items: ItemCatalog::new(vec![ItemRecord { id: 276, meta: 0, name: "Diamond Sword".into() }]),
      ..Default::default()
    }
  }

  fn named(ty: u8, name: &str) -> Vec<u8> {
    let mut out = vec![ty];
    out.extend((name.len() as u16).to_be_bytes());
    out.extend(name.as_bytes());
    out
  }

  /// `{ i: [{}, { id: 276s, Count: 1b }] }`
  fn inventory() -> Vec<u8> {
    let mut out = named(10, "");
    out.extend(named(9, "i"));
    out.push(10);
    out.extend(2_i32.to_be_bytes());
    out.push(0);
    out.extend(named(2, "id"));
    out.extend(276_i16.to_be_bytes());
    out.extend(named(1, "Count"));
    out.push(1);
    out.push(0);
    out.push(0);
    let mut enc = GzEncoder::new(vec![], Compression::default());
    enc.write_all(&out).unwrap();
    enc.finish().unwrap()
  }

  #[test]
  fn decode_bytes() {
    let items = decode(&inventory(), &data()).unwrap();
    assert_eq!(items, vec![Item::empty(), Item::new("Diamond Sword", vec![], 276, None, 1)]);
  }

  #[test]
  fn decode_api_json() {
    let signed: Vec<i8> = inventory().into_iter().map(|b| b as i8).collect();
    let v = json!({ "type": 0, "data": signed });
    let items = decode_json(&v, &data()).unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[1].name, "Diamond Sword");

    assert!(matches!(decode_json(&json!({ "type": 0 }), &data()), Err(InventoryError::Json(_))));
    assert!(matches!(decode(&[99, 0, 0], &data()), Err(InventoryError::Nbt(_))));
  }

  #[test]
  fn no_slots() {
    let empty = named(10, "").into_iter().chain([0]).collect::<Vec<u8>>();
    assert_eq!(decode(&empty, &data()).unwrap(), vec![]);
  }
}
