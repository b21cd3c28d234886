mod deserialize;
mod json;

pub use deserialize::{read, ParseError, MAX_DEPTH};
pub use json::JsonError;

use std::collections::HashMap;

/// This is a single tag. It does not contain a name, but has the actual data
/// for any of the nbt tags.
///
/// There is no `End` variant. That is only a marker in the binary format, and
/// a missing tag is represented with `Option<&Tag>` instead, so "absent" and
/// "present but empty" never get mixed up.
#[derive(Debug, Clone, PartialEq)]
pub enum Tag {
  Byte(i8),
  Short(i16),
  Int(i32),
  Long(i64),
  Float(f32),
  Double(f64),
  ByteArr(Vec<u8>),
  String(String),
  List(Vec<Tag>),                 // All elements must be the same type, and un-named.
  Compound(HashMap<String, Tag>), // Types can be any kind, and are named. Order is not defined.
  IntArray(Vec<i32>),
  LongArray(Vec<i64>),
}

impl Default for Tag {
  fn default() -> Self { Tag::Compound(HashMap::new()) }
}

impl Tag {
  /// A simpler way to construct compound tags inline.
  pub fn compound(value: &[(&str, Tag)]) -> Self {
    let mut inner = HashMap::new();
    for (name, tag) in value {
      inner.insert(name.to_string(), tag.clone());
    }
    Self::Compound(inner)
  }

  /// Returns the value of any integer tag, widened to an i64. Floating point
  /// tags are not converted.
  pub fn as_int(&self) -> Option<i64> {
    match self {
      Self::Byte(v) => Some(*v as i64),
      Self::Short(v) => Some(*v as i64),
      Self::Int(v) => Some(*v as i64),
      Self::Long(v) => Some(*v),
      _ => None,
    }
  }
  pub fn as_str(&self) -> Option<&str> {
    match self {
      Self::String(v) => Some(v),
      _ => None,
    }
  }
  pub fn as_list(&self) -> Option<&[Tag]> {
    match self {
      Self::List(v) => Some(v),
      _ => None,
    }
  }
  pub fn as_compound(&self) -> Option<&HashMap<String, Tag>> {
    match self {
      Self::Compound(v) => Some(v),
      _ => None,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_accessors() {
    let tag = Tag::compound(&[("id", Tag::Short(276)), ("name", Tag::String("Sword".into()))]);
    let map = tag.as_compound().unwrap();
    assert_eq!(map["id"].as_int(), Some(276));
    assert_eq!(map["id"].as_str(), None);
    assert_eq!(map["name"].as_str(), Some("Sword"));
    assert_eq!(Tag::Float(1.0).as_int(), None);
  }
}
