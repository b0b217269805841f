//! Per-object attribute tables.

use super::AclDataKind as D;
use super::AttrKind::*;
use super::AttrSchema;
use sai_native::{ids, ObjectType};

macro_rules! table {
    ($module:ident, $prefix:literal { $($name:ident: $kind:expr),* $(,)? }) => {
        &[$(AttrSchema {
            id: ids::$module::$name,
            name: concat!($prefix, stringify!($name)),
            kind: $kind,
        }),*]
    };
}

pub(super) static TABLES: &[(ObjectType, &[AttrSchema])] = &[
    (
        ObjectType::Switch,
        table!(switch, "SAI_SWITCH_ATTR_" {
            PORT_NUMBER: U32,
            PORT_LIST: ObjList,
            CPU_PORT: Oid,
            DEFAULT_VLAN_ID: Oid,
            DEFAULT_VIRTUAL_ROUTER_ID: Oid,
            DEFAULT_1Q_BRIDGE_ID: Oid,
            DEFAULT_TRAP_GROUP: Oid,
            TYPE: S32,
            NUMBER_OF_SYSTEM_PORTS: U32,
            SYSTEM_PORT_LIST: ObjList,
            OPER_STATUS: S32,
            SRC_MAC_ADDRESS: Mac,
            FDB_AGING_TIME: U32,
            FDB_UNICAST_MISS_PACKET_ACTION: S32,
            FDB_BROADCAST_MISS_PACKET_ACTION: S32,
            FDB_MULTICAST_MISS_PACKET_ACTION: S32,
            ECMP_DEFAULT_HASH_SEED: U32,
            LAG_DEFAULT_HASH_SEED: U32,
            SWITCH_SHELL_ENABLE: Bool,
            INIT_SWITCH: Bool,
        }),
    ),
    (
        ObjectType::Port,
        table!(port, "SAI_PORT_ATTR_" {
            TYPE: S32,
            OPER_STATUS: S32,
            QOS_NUMBER_OF_QUEUES: U32,
            QOS_QUEUE_LIST: ObjList,
            NUMBER_OF_INGRESS_PRIORITY_GROUPS: U32,
            INGRESS_PRIORITY_GROUP_LIST: ObjList,
            HW_LANE_LIST: U32List,
            SPEED: U32,
            FEC_MODE: S32,
            ADMIN_STATE: Bool,
            PORT_VLAN_ID: U16,
            DEFAULT_VLAN_PRIORITY: U8,
            INGRESS_ACL: Oid,
            EGRESS_ACL: Oid,
            MTU: U32,
            QOS_DEFAULT_TC: U8,
            QOS_DOT1P_TO_TC_MAP: Oid,
            QOS_DOT1P_TO_COLOR_MAP: Oid,
            QOS_DSCP_TO_TC_MAP: Oid,
            QOS_DSCP_TO_COLOR_MAP: Oid,
            QOS_TC_TO_QUEUE_MAP: Oid,
            QOS_TC_AND_COLOR_TO_DOT1P_MAP: Oid,
            QOS_TC_AND_COLOR_TO_DSCP_MAP: Oid,
            QOS_TC_TO_PRIORITY_GROUP_MAP: Oid,
            QOS_PFC_PRIORITY_TO_PRIORITY_GROUP_MAP: Oid,
            QOS_PFC_PRIORITY_TO_QUEUE_MAP: Oid,
            QOS_SCHEDULER_PROFILE_ID: Oid,
            QOS_INGRESS_BUFFER_PROFILE_LIST: ObjList,
            QOS_EGRESS_BUFFER_PROFILE_LIST: ObjList,
            PRIORITY_FLOW_CONTROL: U8,
            INGRESS_MIRROR_SESSION: ObjList,
            EGRESS_MIRROR_SESSION: ObjList,
            UPDATE_DSCP: Bool,
            PKT_TX_ENABLE: Bool,
        }),
    ),
    (
        ObjectType::Lag,
        table!(lag, "SAI_LAG_ATTR_" {
            PORT_LIST: ObjList,
            INGRESS_ACL: Oid,
            EGRESS_ACL: Oid,
            PORT_VLAN_ID: U16,
            DEFAULT_VLAN_PRIORITY: U8,
            DROP_UNTAGGED: Bool,
            DROP_TAGGED: Bool,
        }),
    ),
    (
        ObjectType::LagMember,
        table!(lag_member, "SAI_LAG_MEMBER_ATTR_" {
            LAG_ID: Oid,
            PORT_ID: Oid,
            EGRESS_DISABLE: Bool,
            INGRESS_DISABLE: Bool,
        }),
    ),
    (
        ObjectType::VirtualRouter,
        table!(virtual_router, "SAI_VIRTUAL_ROUTER_ATTR_" {
            ADMIN_V4_STATE: Bool,
            ADMIN_V6_STATE: Bool,
            SRC_MAC_ADDRESS: Mac,
            VIOLATION_TTL1_PACKET_ACTION: S32,
            VIOLATION_IP_OPTIONS_PACKET_ACTION: S32,
            UNKNOWN_L3_MULTICAST_PACKET_ACTION: S32,
        }),
    ),
    (
        ObjectType::RouterInterface,
        table!(router_interface, "SAI_ROUTER_INTERFACE_ATTR_" {
            VIRTUAL_ROUTER_ID: Oid,
            TYPE: S32,
            PORT_ID: Oid,
            VLAN_ID: Oid,
            OUTER_VLAN_ID: U16,
            BRIDGE_ID: Oid,
            SRC_MAC_ADDRESS: Mac,
            ADMIN_V4_STATE: Bool,
            ADMIN_V6_STATE: Bool,
            MTU: U32,
            INGRESS_ACL: Oid,
            EGRESS_ACL: Oid,
            NEIGHBOR_MISS_PACKET_ACTION: S32,
            LOOPBACK_PACKET_ACTION: S32,
        }),
    ),
    (
        ObjectType::NextHop,
        table!(next_hop, "SAI_NEXT_HOP_ATTR_" {
            TYPE: S32,
            IP: IpAddress,
            ROUTER_INTERFACE_ID: Oid,
            TUNNEL_ID: Oid,
            TUNNEL_VNI: U32,
            TUNNEL_MAC: Mac,
        }),
    ),
    (
        ObjectType::NextHopGroup,
        table!(next_hop_group, "SAI_NEXT_HOP_GROUP_ATTR_" {
            NEXT_HOP_COUNT: U32,
            NEXT_HOP_MEMBER_LIST: ObjList,
            TYPE: S32,
        }),
    ),
    (
        ObjectType::NextHopGroupMember,
        table!(next_hop_group_member, "SAI_NEXT_HOP_GROUP_MEMBER_ATTR_" {
            NEXT_HOP_GROUP_ID: Oid,
            NEXT_HOP_ID: Oid,
            WEIGHT: U32,
        }),
    ),
    (
        ObjectType::RouteEntry,
        table!(route_entry, "SAI_ROUTE_ENTRY_ATTR_" {
            PACKET_ACTION: S32,
            TRAP_PRIORITY: U8,
            NEXT_HOP_ID: Oid,
            META_DATA: U32,
        }),
    ),
    (
        ObjectType::NeighborEntry,
        table!(neighbor_entry, "SAI_NEIGHBOR_ENTRY_ATTR_" {
            DST_MAC_ADDRESS: Mac,
            PACKET_ACTION: S32,
            NO_HOST_ROUTE: Bool,
            META_DATA: U32,
        }),
    ),
    (
        ObjectType::FdbEntry,
        table!(fdb_entry, "SAI_FDB_ENTRY_ATTR_" {
            TYPE: S32,
            PACKET_ACTION: S32,
            USER_TRAP_ID: Oid,
            BRIDGE_PORT_ID: Oid,
            META_DATA: U32,
            ENDPOINT_IP: IpAddress,
        }),
    ),
    (
        ObjectType::FdbFlush,
        table!(fdb_flush, "SAI_FDB_FLUSH_ATTR_" {
            BRIDGE_PORT_ID: Oid,
            BV_ID: Oid,
            ENTRY_TYPE: S32,
        }),
    ),
    (
        ObjectType::Vlan,
        table!(vlan, "SAI_VLAN_ATTR_" {
            VLAN_ID: U16,
            MEMBER_LIST: ObjList,
            MAX_LEARNED_ADDRESSES: U32,
            STP_INSTANCE: Oid,
            LEARN_DISABLE: Bool,
            INGRESS_ACL: Oid,
            EGRESS_ACL: Oid,
            UNKNOWN_UNICAST_FLOOD_CONTROL_TYPE: S32,
            BROADCAST_FLOOD_CONTROL_TYPE: S32,
        }),
    ),
    (
        ObjectType::VlanMember,
        table!(vlan_member, "SAI_VLAN_MEMBER_ATTR_" {
            VLAN_ID: Oid,
            BRIDGE_PORT_ID: Oid,
            VLAN_TAGGING_MODE: S32,
        }),
    ),
    (
        ObjectType::Bridge,
        table!(bridge, "SAI_BRIDGE_ATTR_" {
            TYPE: S32,
            PORT_LIST: ObjList,
            MAX_LEARNED_ADDRESSES: U32,
            LEARN_DISABLE: Bool,
        }),
    ),
    (
        ObjectType::BridgePort,
        table!(bridge_port, "SAI_BRIDGE_PORT_ATTR_" {
            TYPE: S32,
            PORT_ID: Oid,
            TAGGING_MODE: S32,
            VLAN_ID: U16,
            RIF_ID: Oid,
            TUNNEL_ID: Oid,
            BRIDGE_ID: Oid,
            FDB_LEARNING_MODE: S32,
            MAX_LEARNED_ADDRESSES: U32,
            ADMIN_STATE: Bool,
            INGRESS_FILTERING: Bool,
            EGRESS_FILTERING: Bool,
        }),
    ),
    (
        ObjectType::Stp,
        table!(stp, "SAI_STP_ATTR_" {
            BRIDGE_ID: Oid,
            PORT_LIST: ObjList,
        }),
    ),
    (
        ObjectType::StpPort,
        table!(stp_port, "SAI_STP_PORT_ATTR_" {
            STP: Oid,
            BRIDGE_PORT: Oid,
            STATE: S32,
        }),
    ),
    (
        ObjectType::MirrorSession,
        table!(mirror_session, "SAI_MIRROR_SESSION_ATTR_" {
            TYPE: S32,
            MONITOR_PORT: Oid,
            TRUNCATE_SIZE: U16,
            SAMPLE_RATE: U32,
            CONGESTION_MODE: S32,
            TC: U8,
            VLAN_TPID: U16,
            VLAN_ID: U16,
            VLAN_PRI: U8,
            VLAN_CFI: U8,
            VLAN_HEADER_VALID: Bool,
            ERSPAN_ENCAPSULATION_TYPE: S32,
            IPHDR_VERSION: U8,
            TOS: U8,
            TTL: U8,
            SRC_IP_ADDRESS: IpAddress,
            DST_IP_ADDRESS: IpAddress,
            SRC_MAC_ADDRESS: Mac,
            DST_MAC_ADDRESS: Mac,
            GRE_PROTOCOL_TYPE: U16,
            POLICER: Oid,
        }),
    ),
    (
        ObjectType::Policer,
        table!(policer, "SAI_POLICER_ATTR_" {
            METER_TYPE: S32,
            MODE: S32,
            COLOR_SOURCE: S32,
            CBS: U64,
            CIR: U64,
            PBS: U64,
            PIR: U64,
            GREEN_PACKET_ACTION: S32,
            YELLOW_PACKET_ACTION: S32,
            RED_PACKET_ACTION: S32,
            ENABLE_COUNTER_PACKET_ACTION_LIST: S32List,
        }),
    ),
    (
        ObjectType::Scheduler,
        table!(scheduler, "SAI_SCHEDULER_ATTR_" {
            SCHEDULING_TYPE: S32,
            SCHEDULING_WEIGHT: U8,
            METER_TYPE: S32,
            MIN_BANDWIDTH_RATE: U64,
            MIN_BANDWIDTH_BURST_RATE: U64,
            MAX_BANDWIDTH_RATE: U64,
            MAX_BANDWIDTH_BURST_RATE: U64,
        }),
    ),
    (
        ObjectType::SchedulerGroup,
        table!(scheduler_group, "SAI_SCHEDULER_GROUP_ATTR_" {
            CHILD_COUNT: U32,
            CHILD_LIST: ObjList,
            PORT_ID: Oid,
            LEVEL: U8,
            MAX_CHILDS: U8,
            SCHEDULER_PROFILE_ID: Oid,
            PARENT_NODE: Oid,
        }),
    ),
    (
        ObjectType::BufferPool,
        table!(buffer_pool, "SAI_BUFFER_POOL_ATTR_" {
            SHARED_SIZE: U64,
            TYPE: S32,
            SIZE: U64,
            THRESHOLD_MODE: S32,
            XOFF_SIZE: U64,
        }),
    ),
    (
        ObjectType::BufferProfile,
        table!(buffer_profile, "SAI_BUFFER_PROFILE_ATTR_" {
            POOL_ID: Oid,
            BUFFER_SIZE: U64,
            THRESHOLD_MODE: S32,
            SHARED_DYNAMIC_TH: S8,
            SHARED_STATIC_TH: U64,
            XOFF_TH: U64,
            XON_TH: U64,
            XON_OFFSET_TH: U64,
        }),
    ),
    (
        ObjectType::IngressPriorityGroup,
        table!(ingress_priority_group, "SAI_INGRESS_PRIORITY_GROUP_ATTR_" {
            BUFFER_PROFILE: Oid,
            PORT: Oid,
            INDEX: U8,
        }),
    ),
    (
        ObjectType::Queue,
        table!(queue, "SAI_QUEUE_ATTR_" {
            TYPE: S32,
            PORT: Oid,
            INDEX: U8,
            PARENT_SCHEDULER_NODE: Oid,
            WRED_PROFILE_ID: Oid,
            BUFFER_PROFILE_ID: Oid,
            SCHEDULER_PROFILE_ID: Oid,
        }),
    ),
    (
        ObjectType::Wred,
        table!(wred, "SAI_WRED_ATTR_" {
            GREEN_ENABLE: Bool,
            GREEN_MIN_THRESHOLD: U32,
            GREEN_MAX_THRESHOLD: U32,
            GREEN_DROP_PROBABILITY: U32,
            YELLOW_ENABLE: Bool,
            YELLOW_MIN_THRESHOLD: U32,
            YELLOW_MAX_THRESHOLD: U32,
            YELLOW_DROP_PROBABILITY: U32,
            RED_ENABLE: Bool,
            RED_MIN_THRESHOLD: U32,
            RED_MAX_THRESHOLD: U32,
            RED_DROP_PROBABILITY: U32,
            WEIGHT: U8,
            ECN_MARK_MODE: S32,
        }),
    ),
    (
        ObjectType::QosMap,
        table!(qos_map, "SAI_QOS_MAP_ATTR_" {
            TYPE: S32,
            MAP_TO_VALUE_LIST: QosMapList,
        }),
    ),
    (
        ObjectType::Tunnel,
        table!(tunnel, "SAI_TUNNEL_ATTR_" {
            TYPE: S32,
            UNDERLAY_INTERFACE: Oid,
            OVERLAY_INTERFACE: Oid,
            ENCAP_SRC_IP: IpAddress,
            ENCAP_TTL_MODE: S32,
            ENCAP_TTL_VAL: U8,
            ENCAP_DSCP_MODE: S32,
            ENCAP_DSCP_VAL: U8,
            DECAP_TTL_MODE: S32,
            DECAP_DSCP_MODE: S32,
            ENCAP_ECN_MODE: S32,
            DECAP_ECN_MODE: S32,
        }),
    ),
    (
        ObjectType::TunnelTermTableEntry,
        table!(tunnel_term_table_entry, "SAI_TUNNEL_TERM_TABLE_ENTRY_ATTR_" {
            VR_ID: Oid,
            TYPE: S32,
            DST_IP: IpAddress,
            SRC_IP: IpAddress,
            TUNNEL_TYPE: S32,
            ACTION_TUNNEL_ID: Oid,
        }),
    ),
    (
        ObjectType::AclTable,
        table!(acl_table, "SAI_ACL_TABLE_ATTR_" {
            ACL_STAGE: S32,
            ACL_BIND_POINT_TYPE_LIST: S32List,
            SIZE: U32,
            ACL_ACTION_TYPE_LIST: S32List,
            FIELD_SRC_IPV6: Bool,
            FIELD_DST_IPV6: Bool,
            FIELD_SRC_MAC: Bool,
            FIELD_DST_MAC: Bool,
            FIELD_SRC_IP: Bool,
            FIELD_DST_IP: Bool,
            FIELD_IN_PORTS: Bool,
            FIELD_OUT_PORTS: Bool,
            FIELD_IN_PORT: Bool,
            FIELD_OUT_PORT: Bool,
            FIELD_OUTER_VLAN_ID: Bool,
            FIELD_L4_SRC_PORT: Bool,
            FIELD_L4_DST_PORT: Bool,
            FIELD_ETHER_TYPE: Bool,
            FIELD_IP_PROTOCOL: Bool,
            FIELD_DSCP: Bool,
            FIELD_TTL: Bool,
            FIELD_TCP_FLAGS: Bool,
            FIELD_ACL_IP_TYPE: Bool,
            FIELD_ACL_RANGE_TYPE: S32List,
        }),
    ),
    (
        ObjectType::AclEntry,
        table!(acl_entry, "SAI_ACL_ENTRY_ATTR_" {
            TABLE_ID: Oid,
            PRIORITY: U32,
            ADMIN_STATE: Bool,
            FIELD_SRC_IPV6: AclField(D::Ip6),
            FIELD_DST_IPV6: AclField(D::Ip6),
            FIELD_SRC_MAC: AclField(D::Mac),
            FIELD_DST_MAC: AclField(D::Mac),
            FIELD_SRC_IP: AclField(D::Ip4),
            FIELD_DST_IP: AclField(D::Ip4),
            FIELD_IN_PORTS: AclField(D::ObjList),
            FIELD_OUT_PORTS: AclField(D::ObjList),
            FIELD_IN_PORT: AclField(D::Oid),
            FIELD_OUT_PORT: AclField(D::Oid),
            FIELD_OUTER_VLAN_ID: AclField(D::U16),
            FIELD_L4_SRC_PORT: AclField(D::U16),
            FIELD_L4_DST_PORT: AclField(D::U16),
            FIELD_ETHER_TYPE: AclField(D::U16),
            FIELD_IP_PROTOCOL: AclField(D::U8),
            FIELD_DSCP: AclField(D::U8),
            FIELD_TTL: AclField(D::U8),
            FIELD_TCP_FLAGS: AclField(D::U8),
            FIELD_ACL_IP_TYPE: AclField(D::S32),
            ACTION_PACKET_ACTION: AclAction(D::S32),
            ACTION_REDIRECT: AclAction(D::Oid),
            ACTION_MIRROR_INGRESS: AclAction(D::ObjList),
            ACTION_MIRROR_EGRESS: AclAction(D::ObjList),
            ACTION_COUNTER: AclAction(D::Oid),
            ACTION_SET_POLICER: AclAction(D::Oid),
            ACTION_SET_TC: AclAction(D::U8),
            ACTION_SET_DSCP: AclAction(D::U8),
        }),
    ),
    (
        ObjectType::AclCounter,
        table!(acl_counter, "SAI_ACL_COUNTER_ATTR_" {
            TABLE_ID: Oid,
            ENABLE_PACKET_COUNT: Bool,
            ENABLE_BYTE_COUNT: Bool,
            PACKETS: U64,
            BYTES: U64,
        }),
    ),
    (
        ObjectType::AclTableGroup,
        table!(acl_table_group, "SAI_ACL_TABLE_GROUP_ATTR_" {
            ACL_STAGE: S32,
            ACL_BIND_POINT_TYPE_LIST: S32List,
            TYPE: S32,
            MEMBER_LIST: ObjList,
        }),
    ),
    (
        ObjectType::AclTableGroupMember,
        table!(acl_table_group_member, "SAI_ACL_TABLE_GROUP_MEMBER_ATTR_" {
            ACL_TABLE_GROUP_ID: Oid,
            ACL_TABLE_ID: Oid,
            PRIORITY: U32,
        }),
    ),
    (
        ObjectType::DebugCounter,
        table!(debug_counter, "SAI_DEBUG_COUNTER_ATTR_" {
            INDEX: U32,
            TYPE: S32,
            BIND_METHOD: S32,
            IN_DROP_REASON_LIST: S32List,
            OUT_DROP_REASON_LIST: S32List,
        }),
    ),
    (
        ObjectType::Hostif,
        table!(hostif, "SAI_HOSTIF_ATTR_" {
            TYPE: S32,
            OBJ_ID: Oid,
            NAME: CharData,
            OPER_STATUS: Bool,
            QUEUE: U32,
            VLAN_TAG: S32,
        }),
    ),
    (
        ObjectType::HostifTableEntry,
        table!(hostif_table_entry, "SAI_HOSTIF_TABLE_ENTRY_ATTR_" {
            TYPE: S32,
            OBJ_ID: Oid,
            TRAP_ID: Oid,
            CHANNEL_TYPE: S32,
            HOST_IF: Oid,
        }),
    ),
    (
        ObjectType::HostifTrap,
        table!(hostif_trap, "SAI_HOSTIF_TRAP_ATTR_" {
            TRAP_TYPE: S32,
            PACKET_ACTION: S32,
            TRAP_PRIORITY: U32,
            EXCLUDE_PORT_LIST: ObjList,
            TRAP_GROUP: Oid,
        }),
    ),
    (
        ObjectType::HostifTrapGroup,
        table!(hostif_trap_group, "SAI_HOSTIF_TRAP_GROUP_ATTR_" {
            ADMIN_STATE: Bool,
            QUEUE: U32,
            POLICER: Oid,
        }),
    ),
    (
        ObjectType::SystemPort,
        table!(system_port, "SAI_SYSTEM_PORT_ATTR_" {
            TYPE: S32,
            QOS_NUMBER_OF_VOQS: U32,
            QOS_VOQ_LIST: ObjList,
            PORT: Oid,
            ADMIN_STATE: Bool,
            CONFIG_INFO: SysPortConfig,
        }),
    ),
];
