//! SAI object identifiers, object types and entry keys.
//!
//! Most SAI objects are addressed by an opaque 64-bit handle returned from
//! create. A few (FDB, route and neighbor entries) are addressed by a
//! structured key instead; [`ObjectKey`] covers both.

use crate::api::SaiApi;
use sai_types::{IpAddress, IpPrefix, MacAddress};
use std::fmt;

/// Raw SAI object ID type (matches `sai_object_id_t` in C).
pub type RawObjectId = u64;

/// An opaque SAI object handle.
///
/// The driver is the only authority on whether a handle is valid. The RPC
/// wire carries handles as signed 64-bit integers; the conversion is a
/// plain bit reinterpretation in both directions.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(RawObjectId);

impl ObjectId {
    /// The null object ID (`SAI_NULL_OBJECT_ID`).
    pub const NULL: Self = ObjectId(0);

    pub const fn from_raw(raw: RawObjectId) -> Self {
        ObjectId(raw)
    }

    pub const fn as_raw(&self) -> RawObjectId {
        self.0
    }

    pub const fn is_null(&self) -> bool {
        self.0 == 0
    }

    /// Converts a wire handle.
    pub const fn from_wire(handle: i64) -> Self {
        ObjectId(handle as u64)
    }

    /// Converts to the wire handle.
    pub const fn to_wire(self) -> i64 {
        self.0 as i64
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId(0x{:016x})", self.0)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:016x}", self.0)
    }
}

macro_rules! object_types {
    ($($variant:ident => $name:literal, $api:ident;)*) => {
        /// SAI object types handled by the server.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum ObjectType {
            $($variant,)*
        }

        impl ObjectType {
            /// Every object type, in declaration order.
            pub const ALL: &'static [ObjectType] = &[$(ObjectType::$variant,)*];

            /// The SAI header name (`SAI_OBJECT_TYPE_*`).
            pub const fn name(&self) -> &'static str {
                match self {
                    $(ObjectType::$variant => concat!("SAI_OBJECT_TYPE_", $name),)*
                }
            }

            /// The API table that owns this object type.
            pub const fn api(&self) -> SaiApi {
                match self {
                    $(ObjectType::$variant => SaiApi::$api,)*
                }
            }
        }
    };
}

object_types! {
    Switch => "SWITCH", Switch;
    Port => "PORT", Port;
    Lag => "LAG", Lag;
    LagMember => "LAG_MEMBER", Lag;
    VirtualRouter => "VIRTUAL_ROUTER", VirtualRouter;
    RouterInterface => "ROUTER_INTERFACE", RouterInterface;
    NextHop => "NEXT_HOP", NextHop;
    NextHopGroup => "NEXT_HOP_GROUP", NextHopGroup;
    NextHopGroupMember => "NEXT_HOP_GROUP_MEMBER", NextHopGroup;
    RouteEntry => "ROUTE_ENTRY", Route;
    NeighborEntry => "NEIGHBOR_ENTRY", Neighbor;
    FdbEntry => "FDB_ENTRY", Fdb;
    FdbFlush => "FDB_FLUSH", Fdb;
    Vlan => "VLAN", Vlan;
    VlanMember => "VLAN_MEMBER", Vlan;
    Bridge => "BRIDGE", Bridge;
    BridgePort => "BRIDGE_PORT", Bridge;
    Stp => "STP", Stp;
    StpPort => "STP_PORT", Stp;
    MirrorSession => "MIRROR_SESSION", Mirror;
    Policer => "POLICER", Policer;
    Scheduler => "SCHEDULER", Scheduler;
    SchedulerGroup => "SCHEDULER_GROUP", SchedulerGroup;
    BufferPool => "BUFFER_POOL", Buffer;
    BufferProfile => "BUFFER_PROFILE", Buffer;
    IngressPriorityGroup => "INGRESS_PRIORITY_GROUP", Buffer;
    Queue => "QUEUE", Queue;
    Wred => "WRED", Wred;
    QosMap => "QOS_MAP", QosMap;
    Tunnel => "TUNNEL", Tunnel;
    TunnelTermTableEntry => "TUNNEL_TERM_TABLE_ENTRY", Tunnel;
    AclTable => "ACL_TABLE", Acl;
    AclEntry => "ACL_ENTRY", Acl;
    AclCounter => "ACL_COUNTER", Acl;
    AclTableGroup => "ACL_TABLE_GROUP", Acl;
    AclTableGroupMember => "ACL_TABLE_GROUP_MEMBER", Acl;
    DebugCounter => "DEBUG_COUNTER", DebugCounter;
    Hostif => "HOSTIF", Hostif;
    HostifTableEntry => "HOSTIF_TABLE_ENTRY", Hostif;
    HostifTrap => "HOSTIF_TRAP", Hostif;
    HostifTrapGroup => "HOSTIF_TRAP_GROUP", Hostif;
    SystemPort => "SYSTEM_PORT", SystemPort;
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Key of an FDB entry: MAC plus bridge or VLAN id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FdbEntryKey {
    pub switch_id: ObjectId,
    pub mac: MacAddress,
    pub bv_id: ObjectId,
}

/// Key of a route entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RouteEntryKey {
    pub switch_id: ObjectId,
    pub vr_id: ObjectId,
    pub destination: IpPrefix,
}

/// Key of a neighbor entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NeighborEntryKey {
    pub switch_id: ObjectId,
    pub rif_id: ObjectId,
    pub ip_address: IpAddress,
}

/// Objects addressed by key rather than by handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKey {
    Fdb(FdbEntryKey),
    Route(RouteEntryKey),
    Neighbor(NeighborEntryKey),
}

impl EntryKey {
    pub const fn object_type(&self) -> ObjectType {
        match self {
            EntryKey::Fdb(_) => ObjectType::FdbEntry,
            EntryKey::Route(_) => ObjectType::RouteEntry,
            EntryKey::Neighbor(_) => ObjectType::NeighborEntry,
        }
    }
}

/// Addresses a single object for remove, set and get.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKey {
    Oid(ObjectId),
    Entry(EntryKey),
}

impl From<ObjectId> for ObjectKey {
    fn from(oid: ObjectId) -> Self {
        ObjectKey::Oid(oid)
    }
}

impl From<EntryKey> for ObjectKey {
    fn from(entry: EntryKey) -> Self {
        ObjectKey::Entry(entry)
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectKey::Oid(oid) => oid.fmt(f),
            ObjectKey::Entry(EntryKey::Fdb(e)) => write!(f, "fdb({}, bv {})", e.mac, e.bv_id),
            ObjectKey::Entry(EntryKey::Route(e)) => {
                write!(f, "route({}, vr {})", e.destination, e.vr_id)
            }
            ObjectKey::Entry(EntryKey::Neighbor(e)) => {
                write!(f, "neighbor({}, rif {})", e.ip_address, e.rif_id)
            }
        }
    }
}
