use super::TomlValue;
use log::LevelFilter;
use std::str::FromStr;
use toml::Value;

impl TomlValue<'_> for LevelFilter {
  fn from_toml(v: &Value) -> Option<Self> { LevelFilter::from_str(v.as_str()?).ok() }
  fn name() -> String { "log level".into() }
}

/// Paths, mostly. These borrow from the config, so nothing is copied.
impl<'a> TomlValue<'a> for &'a str {
  fn from_toml(v: &'a Value) -> Option<Self> { v.as_str() }
  fn name() -> String { "string".into() }
}
