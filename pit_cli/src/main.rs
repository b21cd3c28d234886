#[macro_use]
extern crate log;

use anyhow::Context;
use clap::{Parser, Subcommand};
use pit_common::{
  config::Config, inventory, path::get_ref, unlock::UnlockCollection, util::chat::strip_codes,
  GameData, Item,
};
use serde_json::Value;
use std::{fs, sync::Arc};

#[derive(Parser, Debug)]
#[clap(about, version, author)]
struct Args {
  /// The config file to load. Any keys missing from it are read from the
  /// default config, which is written to `pit-default.toml`.
  #[clap(long, default_value = "pit.toml")]
  config:  String,
  /// If set, formatting codes are removed from names and descriptions.
  #[clap(long)]
  plain:   bool,
  #[clap(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Decodes an nbt inventory (gzipped or not), and prints every slot.
  Inventory { path: String },
  /// Reads a profile from the api, and prints the shop item for every
  /// upgrade in one of its unlock lists.
  Unlocks {
    path:  String,
    /// The dotted path to the unlock list within the profile, such as
    /// `unlocks_3` or `renown_unlocks`.
    #[clap(long, default_value = "unlocks")]
    field: String,
  },
}

fn main() {
  let args = Args::parse();
  let config = Config::new(&args.config, "pit-default.toml", include_str!("default.toml"));

  let level = config.get("log-level");
  pit_common::init_with_level("cli", level);

  if let Err(e) = run(args, &config) {
    error!("{e:#}");
    std::process::exit(1);
  }
}

fn run(args: Args, config: &Config) -> anyhow::Result<()> {
  let data = Arc::new(GameData::load(
    config.get::<&str>("data.items"),
    config.get::<&str>("data.enchants"),
    config.get::<&str>("data.upgrades"),
  )?);

  let mut items = match args.command {
    Command::Inventory { path } => {
      let bytes = fs::read(&path).with_context(|| format!("could not read `{path}`"))?;
      inventory::decode(&bytes, &data)?
    }
    Command::Unlocks { path, field } => {
      let src = fs::read_to_string(&path).with_context(|| format!("could not read `{path}`"))?;
      let profile: Value = serde_json::from_str(&src)?;
      let sections: Vec<&str> = field.split('.').collect();
      let raw = get_ref(Some(&profile), &sections).cloned().unwrap_or_else(|| {
        warn!("profile has no `{field}`");
        Value::Null
      });
      let unlocks = UnlockCollection::from_json(data, &raw, profile);
      info!("found {} unlocks", unlocks.entries().len());
      unlocks.keys().into_iter().map(|key| unlocks.build_item(key)).collect::<Vec<Item>>()
    }
  };

  if args.plain {
    for item in &mut items {
      item.name = strip_codes(&item.name);
      item.desc = item.desc.iter().map(|line| strip_codes(line)).collect();
    }
  }
  println!("{}", serde_json::to_string_pretty(&items)?);
  Ok(())
}
