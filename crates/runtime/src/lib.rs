//! Phase-1 elimination engine over an injected tournament store.
//!
//! This crate wires the pure rules from `battle-core` to a store contract and
//! exposes [`Phase1Engine`] as the single entry point for callers. Each engine
//! operation is a short, bounded unit of work; all durable state lives in the
//! store.
//!
//! Modules are organized by responsibility:
//! - [`api`] exposes the engine façade and its error type
//! - [`services`] hosts the selector, recorder and progress reporter
//! - [`repository`] defines the store contract and the bundled stores
pub mod api;
pub mod repository;
pub mod services;

pub use api::{EngineConfig, EngineError, MissingEntity, NextBattle, Phase1Engine, Result};
pub use repository::{
    ExclusionInsert, MemoryStore, RepositoryError, TournamentStore, TournamentTransaction,
};
