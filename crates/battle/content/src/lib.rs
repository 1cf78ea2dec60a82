//! Data-driven seed content for tournament stores.
//!
//! This crate loads the static reference data a fresh store starts from:
//! - the name catalog (data-driven via RON)
//! - the game roster with per-game caps and enrolled players (TOML)
//!
//! Content is copied into a store once; the engine never reads files.

pub mod loaders;

pub use loaders::{
    ContentFactory, GameEntry, GameRoster, NameCatalog, NameEntry, NameLoader, RosterLoader,
};
