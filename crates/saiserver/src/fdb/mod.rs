//! FDB event cache.
//!
//! The driver reports MAC learning asynchronously. The cache folds those
//! events into one record per (MAC, bridge/VLAN) key so that FDB reads do
//! not query hardware.
//!
//! All mutation and all snapshots go through one lock. A notification batch
//! is applied under a single acquisition, so a snapshot sees either none or
//! all of a batch.

mod cache;
mod types;

pub use cache::FdbEventCache;
pub use types::{ApplySummary, FdbEventRecord, FdbKey, FdbRecord, FlushFilter, FlushScope};
