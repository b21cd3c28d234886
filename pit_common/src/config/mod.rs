//! The config file. Every key is read through [`Config::get`], which falls
//! back to the default config (compiled into the binary) whenever the user's
//! config is missing a key, or has a value of the wrong type.

use std::fs;
use toml::Value;

mod types;


pub struct Config {
  primary: Value,
  default: Value,
}

/// A type that can be read from the config.
pub trait TomlValue<'a> {
  /// If this current type matches the toml value, this returns Some(v).
  fn from_toml(v: &'a Value) -> Option<Self>
  where
    Self: Sized;

  /// Returns the name of this toml value (string, log level, etc).
  fn name() -> String
  where
    Self: Sized;
}

impl Config {
  /// Creates a new config for the given path. The default source is toml,
  /// which should be loaded with `include_str!`. When this is created, the
  /// default source will be written to `default_path`, so that users can view
  /// the default config as a reference. If the file cannot be written, a
  /// warning will be printed.
  pub fn new(path: &str, default_path: &str, default_src: &str) -> Self {
    fs::write(default_path, default_src).unwrap_or_else(|e| {
      warn!("could not write default configuration to disk at `{}`: {}", default_path, e);
    });
    Config { primary: Self::load_toml(path), default: Self::load_toml_src(default_src) }
  }
  /// Creates a new config, but with source strings, instead of paths. Nothing
  /// is written to disk.
  pub fn new_src(primary: &str, default_src: &str) -> Self {
    Config { primary: Self::load_toml_src(primary), default: Self::load_toml_src(default_src) }
  }

  fn load_toml(path: &str) -> Value {
    match fs::read_to_string(path) {
      Ok(src) => Self::load_toml_src(&src),
      Err(e) => {
        warn!("could not read config at `{}`, using defaults: {}", path, e);
        Self::empty()
      }
    }
  }
  fn load_toml_src(src: &str) -> Value {
    src.parse().unwrap_or_else(|e| {
      error!("error loading toml: {}", e);
      Self::empty()
    })
  }
  fn empty() -> Value { Value::Table(Default::default()) }

  /// Reads the value at the given key. Keys are split on dots, so
  /// `data.items` is the `items` key of the `[data]` table.
  ///
  /// If the value doesn't exist in the primary config (or the value is the
  /// wrong type), then the default config is used. If it doesn't exist there
  /// either, this panics, as every key should be present in the default.
  pub fn get<'a, T>(&'a self, key: &str) -> T
  where
    T: TomlValue<'a>,
  {
    match Self::get_val(&self.primary, key) {
      Some(val) => match T::from_toml(val) {
        Some(v) => v,
        None => {
          warn!("unexpected value at `{}`: {:?}, expected a {}", key, val, T::name());
          self.get_default(key)
        }
      },
      None => self.get_default(key),
    }
  }

  fn get_default<'a, T>(&'a self, key: &str) -> T
  where
    T: TomlValue<'a>,
  {
    let val = Self::get_val(&self.default, key);
    match val.and_then(T::from_toml) {
      Some(v) => v,
      None => {
        panic!("default had wrong type for key `{}`: {:?}, expected a {}", key, val, T::name())
      }
    }
  }

  fn get_val<'a>(toml: &'a Value, key: &str) -> Option<&'a Value> {
    key.split('.').try_fold(toml, |val, section| val.as_table()?.get(section))
  }
}
