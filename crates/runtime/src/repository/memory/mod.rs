//! In-memory store for tests, local runs and the snapshot-backed server.

mod store;
mod tables;
mod transaction;

pub use store::MemoryStore;
pub(crate) use tables::Tables;
