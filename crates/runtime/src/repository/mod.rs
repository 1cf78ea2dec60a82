//! Repository layer for tournament data.
//!
//! The engine reads names, tournament states and bookkeeping through
//! [`TournamentStore`] and writes every battle through a single
//! [`TournamentTransaction`]. [`MemoryStore`] is the bundled implementation;
//! it can optionally mirror every commit to a JSON snapshot file.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use memory::MemoryStore;
pub use traits::{ExclusionInsert, TournamentStore, TournamentTransaction};
