//! HTTP boundary for the phase-1 name battle engine.
//!
//! The crate resolves the caller's identity and game id, validates wire
//! payloads, and delegates to [`battle_runtime::Phase1Engine`]. The binary in
//! `main.rs` is the composition root: configuration, logging, store seeding
//! and the listener.

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod logging;
pub mod routes;
pub mod wire;

pub use config::ServerConfig;
pub use error::ApiError;
pub use routes::{AppState, PLAYER_HEADER, router};
