//! File-backed persistence for the in-memory store.

mod snapshot;

pub(crate) use snapshot::SnapshotFile;
