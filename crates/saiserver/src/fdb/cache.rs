//! The cache proper.

use super::types::{ApplySummary, FdbEventRecord, FdbKey, FdbRecord, FlushScope};
use log::{debug, info};
use parking_lot::Mutex;
use sai_native::ObjectId;
use std::collections::BTreeMap;

/// At most one bridge port per (MAC, bridge/VLAN) key.
///
/// LEARNED on a cached key replaces its port, so duplicates never
/// accumulate. MOVED and AGED on a key that is not cached are no-ops; the
/// entry may have aged out concurrently.
#[derive(Debug, Default)]
pub struct FdbEventCache {
    entries: Mutex<BTreeMap<FdbKey, ObjectId>>,
}

impl FdbEventCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a batch in delivery order under one lock acquisition.
    pub fn apply(&self, events: &[FdbEventRecord]) -> ApplySummary {
        let mut summary = ApplySummary::default();
        let mut entries = self.entries.lock();

        for event in events {
            match *event {
                FdbEventRecord::Learned {
                    key,
                    bridge_port_id,
                } => {
                    debug!("FDB learned {} on {}", key, bridge_port_id);
                    if entries.insert(key, bridge_port_id).is_some() {
                        summary.relearned += 1;
                    } else {
                        summary.learned += 1;
                    }
                }
                FdbEventRecord::Moved {
                    key,
                    bridge_port_id,
                } => match entries.get_mut(&key) {
                    Some(port) => {
                        debug!("FDB moved {} from {} to {}", key, port, bridge_port_id);
                        *port = bridge_port_id;
                        summary.moved += 1;
                    }
                    None => {
                        debug!("FDB move for uncached {}", key);
                        summary.missed += 1;
                    }
                },
                FdbEventRecord::Aged { key } => {
                    if entries.remove(&key).is_some() {
                        debug!("FDB aged {}", key);
                        summary.aged += 1;
                    } else {
                        debug!("FDB age for uncached {}", key);
                        summary.missed += 1;
                    }
                }
                FdbEventRecord::Flushed(filter) => {
                    let before = entries.len();
                    match filter.scope() {
                        FlushScope::All => entries.clear(),
                        scope => entries.retain(|key, port| !scope.matches(key, *port)),
                    }
                    let removed = before - entries.len();
                    info!(
                        "FDB flush {:?} removed {} entries",
                        filter.scope(),
                        removed
                    );
                    summary.flushed += removed;
                }
            }
        }
        summary
    }

    /// A point-in-time copy of every cached entry, ordered by key.
    pub fn snapshot(&self) -> Vec<FdbRecord> {
        self.entries
            .lock()
            .iter()
            .map(|(key, port)| FdbRecord {
                mac: key.mac,
                bv_id: key.bv_id,
                bridge_port_id: *port,
            })
            .collect()
    }

    pub fn get(&self, key: &FdbKey) -> Option<ObjectId> {
        self.entries.lock().get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}
