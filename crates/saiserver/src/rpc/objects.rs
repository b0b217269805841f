//! Typed method names per object type.
//!
//! `create_<name>`, `remove_<name>`, `set_<name>_attribute` and
//! `get_<name>_attribute` map onto the generic verbs of [`SaiRpc`](super::SaiRpc).
//! Port and system-port reads are served by dedicated handlers, so their
//! generic get is not listed.

use sai_native::ObjectType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Create,
    Remove,
    Set,
    Get,
}

use Verb::{Create, Get, Remove, Set};

/// The verbs exposed for one object type.
#[derive(Debug, Clone, Copy)]
pub struct ObjectMethods {
    pub name: &'static str,
    pub object_type: ObjectType,
    pub verbs: &'static [Verb],
}

const CRUD: &[Verb] = &[Create, Remove, Set, Get];

macro_rules! methods {
    ($($name:literal => $object_type:ident, $verbs:expr;)*) => {
        &[$(ObjectMethods {
            name: $name,
            object_type: ObjectType::$object_type,
            verbs: $verbs,
        },)*]
    };
}

pub static OBJECT_METHODS: &[ObjectMethods] = methods! {
    "bridge" => Bridge, CRUD;
    "bridge_port" => BridgePort, CRUD;
    "vlan" => Vlan, CRUD;
    "vlan_member" => VlanMember, CRUD;
    "virtual_router" => VirtualRouter, CRUD;
    "router_interface" => RouterInterface, CRUD;
    "next_hop" => NextHop, CRUD;
    "next_hop_group" => NextHopGroup, CRUD;
    "next_hop_group_member" => NextHopGroupMember, CRUD;
    "lag" => Lag, CRUD;
    "lag_member" => LagMember, CRUD;
    "stp" => Stp, CRUD;
    "stp_port" => StpPort, CRUD;
    "mirror_session" => MirrorSession, CRUD;
    "policer" => Policer, CRUD;
    "scheduler" => Scheduler, CRUD;
    "scheduler_group" => SchedulerGroup, CRUD;
    "buffer_profile" => BufferProfile, CRUD;
    "buffer_pool" => BufferPool, CRUD;
    "wred" => Wred, CRUD;
    "tunnel" => Tunnel, CRUD;
    "tunnel_term_table_entry" => TunnelTermTableEntry, CRUD;
    "qos_map" => QosMap, CRUD;
    "acl_table" => AclTable, CRUD;
    "acl_entry" => AclEntry, CRUD;
    "acl_counter" => AclCounter, CRUD;
    "acl_table_group" => AclTableGroup, CRUD;
    "acl_table_group_member" => AclTableGroupMember, CRUD;
    "debug_counter" => DebugCounter, CRUD;
    "hostif" => Hostif, CRUD;
    "hostif_table_entry" => HostifTableEntry, CRUD;
    "hostif_trap" => HostifTrap, CRUD;
    "hostif_trap_group" => HostifTrapGroup, CRUD;
    "port" => Port, &[Set];
    "queue" => Queue, &[Set, Get];
    "ingress_priority_group" => IngressPriorityGroup, &[Set];
    "switch" => Switch, &[Set, Get];
    "fdb_entry" => FdbEntry, CRUD;
    "route_entry" => RouteEntry, CRUD;
    "neighbor_entry" => NeighborEntry, CRUD;
};

/// Splits a typed method name into its verb and object type.
pub fn resolve(method: &str) -> Option<(Verb, ObjectType)> {
    let (verb, name) = if let Some(name) = method.strip_prefix("create_") {
        (Create, name)
    } else if let Some(name) = method.strip_prefix("remove_") {
        (Remove, name)
    } else if let Some(rest) = method.strip_prefix("set_") {
        (Set, rest.strip_suffix("_attribute")?)
    } else if let Some(rest) = method.strip_prefix("get_") {
        (Get, rest.strip_suffix("_attribute")?)
    } else {
        return None;
    };

    OBJECT_METHODS
        .iter()
        .find(|methods| methods.name == name && methods.verbs.contains(&verb))
        .map(|methods| (verb, methods.object_type))
}

/// True for object types addressed by an entry key.
pub fn is_entry(object_type: ObjectType) -> bool {
    matches!(
        object_type,
        ObjectType::FdbEntry | ObjectType::RouteEntry | ObjectType::NeighborEntry
    )
}
