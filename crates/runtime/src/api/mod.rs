//! Public engine API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! the services and repositories can stay focused on their own concerns.

pub mod engine;
pub mod errors;

pub use engine::{EngineConfig, NextBattle, Phase1Engine};
pub use errors::{EngineError, MissingEntity, Result};
