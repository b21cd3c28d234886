//! Optional traversal over nested data.
//!
//! Both nbt tags and raw api json are trees where any key might be missing.
//! [`get_ref`] walks a path through either of them, and returns `None` as soon
//! as a node is absent, instead of failing.
//!
//! ```
//! use pit_common::path::get_ref;
//! use serde_json::json;
//!
//! let api = json!({ "profile": { "cash": 1200, "unlocks": [{ "key": "xp_boost" }] } });
//! assert_eq!(get_ref(Some(&api), &["profile", "cash"]), Some(&json!(1200)));
//! assert_eq!(get_ref(Some(&api), &["profile", "unlocks", "0", "key"]), Some(&json!("xp_boost")));
//! assert_eq!(get_ref(Some(&api), &["profile", "missing", "cash"]), None);
//! assert_eq!(get_ref::<serde_json::Value, &str>(None, &["profile"]), None);
//! ```

use crate::nbt::Tag;
use serde_json::Value;

/// A tree node which can be indexed by a single path segment. Maps are
/// indexed by key, and lists are indexed by a decimal index.
pub trait Traverse {
  /// Returns the child at the given segment, if present.
  fn child(&self, segment: &str) -> Option<&Self>;
}

impl Traverse for Tag {
  fn child(&self, segment: &str) -> Option<&Self> {
    match self {
      Tag::Compound(map) => map.get(segment),
      Tag::List(list) => list.get(segment.parse::<usize>().ok()?),
      _ => None,
    }
  }
}

impl Traverse for Value {
  fn child(&self, segment: &str) -> Option<&Self> {
    match self {
      Value::Object(map) => map.get(segment),
      Value::Array(arr) => arr.get(segment.parse::<usize>().ok()?),
      _ => None,
    }
  }
}

/// Walks `path` from `root`, left to right. If the root or any node along the
/// way is absent, this returns `None`. An empty path returns the root.
pub fn get_ref<'a, T, S>(root: Option<&'a T>, path: &[S]) -> Option<&'a T>
where
  T: Traverse + ?Sized,
  S: AsRef<str>,
{
  let root = root?;
  match path {
    [] => Some(root),
    [segment] => root.child(segment.as_ref()),
    _ => path.iter().try_fold(root, |node, segment| node.child(segment.as_ref())),
  }
}
