//! FDB cache types.

use sai_native::{FdbEntryKey, ObjectId};
use sai_types::MacAddress;
use std::fmt;

/// Identity of an FDB record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FdbKey {
    pub mac: MacAddress,
    pub bv_id: ObjectId,
}

impl FdbKey {
    pub fn new(mac: MacAddress, bv_id: ObjectId) -> Self {
        Self { mac, bv_id }
    }
}

impl From<&FdbEntryKey> for FdbKey {
    fn from(entry: &FdbEntryKey) -> Self {
        Self::new(entry.mac, entry.bv_id)
    }
}

impl fmt::Display for FdbKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.mac, self.bv_id)
    }
}

/// A cached FDB entry, in the shape returned to RPC callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FdbRecord {
    pub mac: MacAddress,
    pub bv_id: ObjectId,
    pub bridge_port_id: ObjectId,
}

/// Flush filter as carried by a FLUSHED event. A null id is a wildcard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlushFilter {
    pub bv_id: ObjectId,
    pub bridge_port_id: ObjectId,
}

/// The four flush cases; exactly one applies to any filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushScope {
    All,
    ByBridge(ObjectId),
    ByPort(ObjectId),
    ByBridgeAndPort {
        bv_id: ObjectId,
        bridge_port_id: ObjectId,
    },
}

impl FlushFilter {
    pub fn scope(&self) -> FlushScope {
        match (self.bv_id.is_null(), self.bridge_port_id.is_null()) {
            (true, true) => FlushScope::All,
            (false, true) => FlushScope::ByBridge(self.bv_id),
            (true, false) => FlushScope::ByPort(self.bridge_port_id),
            (false, false) => FlushScope::ByBridgeAndPort {
                bv_id: self.bv_id,
                bridge_port_id: self.bridge_port_id,
            },
        }
    }
}

impl FlushScope {
    pub fn matches(&self, key: &FdbKey, bridge_port_id: ObjectId) -> bool {
        match *self {
            FlushScope::All => true,
            FlushScope::ByBridge(bv_id) => key.bv_id == bv_id,
            FlushScope::ByPort(port) => bridge_port_id == port,
            FlushScope::ByBridgeAndPort {
                bv_id,
                bridge_port_id: port,
            } => key.bv_id == bv_id && bridge_port_id == port,
        }
    }
}

/// One validated cache transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FdbEventRecord {
    Learned { key: FdbKey, bridge_port_id: ObjectId },
    Moved { key: FdbKey, bridge_port_id: ObjectId },
    Aged { key: FdbKey },
    Flushed(FlushFilter),
}

/// What a batch did to the cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplySummary {
    pub learned: usize,
    /// LEARNED events that replaced the port of an existing key.
    pub relearned: usize,
    pub moved: usize,
    pub aged: usize,
    pub flushed: usize,
    /// MOVED or AGED events whose key was not cached.
    pub missed: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_flush_scope_covers_all_filters() {
        let bv = ObjectId::from_raw(0x26);
        let port = ObjectId::from_raw(0x3a);

        let cases = [
            (ObjectId::NULL, ObjectId::NULL, FlushScope::All),
            (bv, ObjectId::NULL, FlushScope::ByBridge(bv)),
            (ObjectId::NULL, port, FlushScope::ByPort(port)),
            (
                bv,
                port,
                FlushScope::ByBridgeAndPort {
                    bv_id: bv,
                    bridge_port_id: port,
                },
            ),
        ];
        for (bv_id, bridge_port_id, expected) in cases {
            let filter = FlushFilter {
                bv_id,
                bridge_port_id,
            };
            assert_eq!(filter.scope(), expected);
        }
    }

    #[test]
    fn test_flush_scope_matching() {
        let mac = MacAddress::new([0, 1, 2, 3, 4, 5]);
        let bv1 = ObjectId::from_raw(1);
        let bv2 = ObjectId::from_raw(2);
        let p1 = ObjectId::from_raw(10);
        let p2 = ObjectId::from_raw(20);
        let key = FdbKey::new(mac, bv1);

        assert!(FlushScope::All.matches(&key, p1));
        assert!(FlushScope::ByBridge(bv1).matches(&key, p2));
        assert!(!FlushScope::ByBridge(bv2).matches(&key, p1));
        assert!(FlushScope::ByPort(p1).matches(&key, p1));
        assert!(!FlushScope::ByPort(p2).matches(&key, p1));

        let both = FlushScope::ByBridgeAndPort {
            bv_id: bv1,
            bridge_port_id: p1,
        };
        assert!(both.matches(&key, p1));
        assert!(!both.matches(&key, p2));
        assert!(!both.matches(&FdbKey::new(mac, bv2), p1));
    }

    #[test]
    fn test_key_display() {
        let key = FdbKey::new(
            MacAddress::new([0, 0x11, 0x22, 0x33, 0x44, 0x55]),
            ObjectId::from_raw(1),
        );
        assert_eq!(key.to_string(), "00:11:22:33:44:55@0x0000000000000001");
    }
}
