//! Normalizes Pit save data and upgrade definitions into display items.
//!
//! Raw inventory slots come in as NBT (see [`nbt`]) and are turned into
//! [`Item`]s with [`Item::from_nbt`]. Purchased upgrades are collected into an
//! [`UnlockCollection`](unlock::UnlockCollection), which resolves each upgrade
//! definition at the tier the player owns.

#[macro_use]
extern crate log;

#[cfg(feature = "host")]
use log::LevelFilter;

pub mod catalog;
pub mod config;
pub mod data;
pub mod inventory;
pub mod item;
pub mod nbt;
pub mod path;
pub mod unlock;
pub mod upgrade;
pub mod util;

pub use data::GameData;
pub use item::{Item, Meta};

/// Installs a logger which prints to stderr, with a timestamp and a colored
/// level. `name` is the name of the binary.
#[cfg(feature = "host")]
pub fn init_with_level(_name: &str, level: LevelFilter) {
  use log::{Level, Metadata, Record};

  struct Logger;

  impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool { metadata.level() <= log::max_level() }

    fn log(&self, record: &Record) {
      if self.enabled(record.metadata()) {
        #[cfg(feature = "utclogs")]
        let now = chrono::Utc::now();
        #[cfg(not(feature = "utclogs"))]
        let now = chrono::Local::now();
        eprint!("{} ", now.format("%Y-%m-%d %H:%M:%S%.3f"));
        #[cfg(debug_assertions)]
        {
          if let Some(path) = record.module_path() {
            eprint!("{path}");
          }
          if let Some(line) = record.line() {
            eprint!(":{line}");
          }
          eprint!(" ");
        }
        match record.level() {
          Level::Trace => eprint!("[\x1b[36mTRACE\x1b[0m]"),
          Level::Debug => eprint!("[\x1b[34mDEBUG\x1b[0m]"),
          Level::Info => eprint!("[\x1b[32mINFO\x1b[0m]"),
          Level::Warn => eprint!("[\x1b[33mWARN\x1b[0m]"),
          Level::Error => eprint!("[\x1b[31m\x1b[1mERROR\x1b[0m]"),
        }
        eprintln!(" {}", record.args());
      }
    }

    fn flush(&self) {}
  }

  static LOGGER: Logger = Logger;
  // A logger may already be installed (tests, or a host binary with its own).
  if log::set_logger(&LOGGER).is_ok() {
    log::set_max_level(level);
  }
}
