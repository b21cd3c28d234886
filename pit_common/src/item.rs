use crate::{
  catalog::{EnchantCatalog, ItemCatalog},
  nbt::Tag,
  path::get_ref,
  util::{roman, to_hex, Color},
};
use serde::ser::{Serialize, SerializeMap, SerializeStruct, Serializer};
use serde_derive::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Leather helmet, chestplate, leggings and boots.
const LEATHER_ARMOR: RangeInclusive<i32> = 298..=301;
/// The color leather armor has when it was never dyed.
pub const DEFAULT_LEATHER_COLOR: &str = "A06540";

/// An item, ready to be displayed.
///
/// Empty inventory slots are represented by [`Item::empty`], which has an id
/// of 0 and nothing else set. It serializes to `{}`, so that consumers of the
/// json can tell an empty slot apart by its shape alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
  /// The custom name of the item, or its default name.
  pub name:  String,
  /// The item id. `0` is air.
  pub id:    i32,
  /// The damage value, or the dye color for leather armor.
  pub meta:  Option<Meta>,
  /// Lore lines, followed by one line per enchantment.
  pub desc:  Vec<String>,
  /// Stack size.
  pub count: i32,
}

/// Either a sub-type, or a color. Items only ever have one of these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Meta {
  Damage(i32),
  /// An uppercase, 6 digit hex color, without a `#`.
  Color(String),
}

impl Meta {
  pub fn damage(&self) -> Option<i32> {
    match self {
      Self::Damage(v) => Some(*v),
      Self::Color(_) => None,
    }
  }
}

impl Default for Item {
  fn default() -> Self { Item::empty() }
}

impl Item {
  pub fn new(
    name: impl Into<String>,
    desc: Vec<String>,
    id: i32,
    meta: Option<Meta>,
    count: i32,
  ) -> Self {
    Item { name: name.into(), id, meta, desc, count }
  }

  /// The empty item. This is what air (and any unreadable slot) turns into.
  pub const fn empty() -> Self {
    Item { name: String::new(), id: 0, meta: None, desc: vec![], count: 0 }
  }

  pub fn is_empty(&self) -> bool { self.id == 0 }

  /// Builds an item from an item compound, as stored in inventories. This
  /// never fails: anything missing or of the wrong type is treated as absent,
  /// and a slot without an id is [`Item::empty`].
  pub fn from_nbt(tag: &Tag, items: &ItemCatalog, enchants: &EnchantCatalog) -> Item {
    let root = Some(tag);
    let id = match get_ref(root, &["id"]).and_then(Tag::as_int).map(i32::try_from) {
      Some(Ok(id)) if id != 0 => id,
      _ => return Item::empty(),
    };

    let damage = get_ref(root, &["Damage"])
      .and_then(Tag::as_int)
      .filter(|&v| v != 0)
      .and_then(|v| i32::try_from(v).ok());
    let mut meta = damage.map(Meta::Damage).or_else(|| {
      get_ref(root, &["tag", "display", "color"])
        .and_then(Tag::as_int)
        .and_then(|v| u32::try_from(v).ok())
        .map(|v| Meta::Color(to_hex(v)))
    });
    if meta.is_none() && LEATHER_ARMOR.contains(&id) {
      meta = Some(Meta::Color(DEFAULT_LEATHER_COLOR.into()));
    }

    let name = get_ref(root, &["tag", "display", "Name"])
      .and_then(Tag::as_str)
      .filter(|name| !name.is_empty())
      .or_else(|| items.name_of(id, meta.as_ref().and_then(Meta::damage)))
      .unwrap_or_default()
      .to_string();

    let mut desc: Vec<String> = get_ref(root, &["tag", "display", "Lore"])
      .and_then(Tag::as_list)
      .unwrap_or_default()
      .iter()
      .filter_map(|line| line.as_str().map(String::from))
      .collect();
    if let Some(list) = get_ref(root, &["tag", "ench"]).and_then(Tag::as_list) {
      desc.extend(list.iter().filter_map(|ench| enchant_line(ench, enchants)));
    }

    let count = get_ref(root, &["Count"])
      .and_then(Tag::as_int)
      .and_then(|v| i32::try_from(v).ok())
      .unwrap_or(1);

    Item::new(name, desc, id, meta, count)
  }

  /// Builds an item from the json form of an item compound. See
  /// [`nbt`](crate::nbt) for that format. Invalid json is an empty item.
  pub fn from_json_node(
    v: &serde_json::Value,
    items: &ItemCatalog,
    enchants: &EnchantCatalog,
  ) -> Item {
    match Tag::from_json(v) {
      Ok(tag) => Item::from_nbt(&tag, items, enchants),
      Err(e) => {
        debug!("treating unreadable item as empty: {e}");
        Item::empty()
      }
    }
  }
}

/// Formats a single `{ id, lvl }` enchantment compound. Enchantments which are
/// not in the catalog have no line.
fn enchant_line(ench: &Tag, enchants: &EnchantCatalog) -> Option<String> {
  let id = get_ref(Some(ench), &["id"]).and_then(Tag::as_int)?;
  let info = enchants.get(i32::try_from(id).ok()?)?;
  let level = get_ref(Some(ench), &["lvl"]).and_then(Tag::as_int).unwrap_or(1);
  match u32::try_from(level) {
    Ok(level) if level > 1 => {
      Some(format!("{}{} {}", Color::Gray, info.display_name, roman(level)))
    }
    _ => Some(format!("{}{}", Color::Gray, info.display_name)),
  }
}

impl Serialize for Item {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    if self.is_empty() {
      let s = serializer.serialize_map(Some(0))?;
      return s.end();
    }
    let len = if self.meta.is_some() { 5 } else { 4 };
    let mut s = serializer.serialize_struct("Item", len)?;
    s.serialize_field("name", &self.name)?;
    s.serialize_field("id", &self.id)?;
    s.serialize_field("desc", &self.desc)?;
    if let Some(meta) = &self.meta {
      s.serialize_field("meta", meta)?;
    } else {
      s.skip_field("meta")?;
    }
    s.serialize_field("count", &self.count)?;
    s.end()
  }
}
