//! Attribute identifiers and enum values.
//!
//! Identifiers are numbered per object type in the order the SAI headers
//! declare them. Only the attributes the server marshals are listed; a
//! vendor build replaces these with constants generated from its headers.

use crate::attr::{AttrId, StatId};

macro_rules! attr_ids {
    ($($name:ident),* $(,)?) => {
        attr_ids!(@step 0u32; $($name,)*);
    };
    (@step $n:expr; $head:ident, $($tail:ident,)*) => {
        pub const $head: AttrId = $n;
        attr_ids!(@step $n + 1u32; $($tail,)*);
    };
    (@step $n:expr;) => {};
}

pub mod switch {
    use super::*;
    attr_ids!(
        PORT_NUMBER,
        PORT_LIST,
        CPU_PORT,
        DEFAULT_VLAN_ID,
        DEFAULT_VIRTUAL_ROUTER_ID,
        DEFAULT_1Q_BRIDGE_ID,
        DEFAULT_TRAP_GROUP,
        TYPE,
        NUMBER_OF_SYSTEM_PORTS,
        SYSTEM_PORT_LIST,
        OPER_STATUS,
        SRC_MAC_ADDRESS,
        FDB_AGING_TIME,
        FDB_UNICAST_MISS_PACKET_ACTION,
        FDB_BROADCAST_MISS_PACKET_ACTION,
        FDB_MULTICAST_MISS_PACKET_ACTION,
        ECMP_DEFAULT_HASH_SEED,
        LAG_DEFAULT_HASH_SEED,
        SWITCH_SHELL_ENABLE,
        INIT_SWITCH,
    );

    /// `sai_switch_type_t`.
    pub const TYPE_NPU: i32 = 0;
    pub const TYPE_PHY: i32 = 1;
    pub const TYPE_VOQ: i32 = 2;
    pub const TYPE_FABRIC: i32 = 3;

    /// Switch stat ranges for debug-counter drop reasons.
    pub const STAT_IN_DROP_REASON_RANGE_BASE: StatId = 0x0000_1000;
    pub const STAT_OUT_DROP_REASON_RANGE_BASE: StatId = 0x0000_2000;
}

pub mod port {
    use super::*;
    attr_ids!(
        TYPE,
        OPER_STATUS,
        QOS_NUMBER_OF_QUEUES,
        QOS_QUEUE_LIST,
        NUMBER_OF_INGRESS_PRIORITY_GROUPS,
        INGRESS_PRIORITY_GROUP_LIST,
        HW_LANE_LIST,
        SPEED,
        FEC_MODE,
        ADMIN_STATE,
        PORT_VLAN_ID,
        DEFAULT_VLAN_PRIORITY,
        INGRESS_ACL,
        EGRESS_ACL,
        MTU,
        QOS_DEFAULT_TC,
        QOS_DOT1P_TO_TC_MAP,
        QOS_DOT1P_TO_COLOR_MAP,
        QOS_DSCP_TO_TC_MAP,
        QOS_DSCP_TO_COLOR_MAP,
        QOS_TC_TO_QUEUE_MAP,
        QOS_TC_AND_COLOR_TO_DOT1P_MAP,
        QOS_TC_AND_COLOR_TO_DSCP_MAP,
        QOS_TC_TO_PRIORITY_GROUP_MAP,
        QOS_PFC_PRIORITY_TO_PRIORITY_GROUP_MAP,
        QOS_PFC_PRIORITY_TO_QUEUE_MAP,
        QOS_SCHEDULER_PROFILE_ID,
        QOS_INGRESS_BUFFER_PROFILE_LIST,
        QOS_EGRESS_BUFFER_PROFILE_LIST,
        PRIORITY_FLOW_CONTROL,
        INGRESS_MIRROR_SESSION,
        EGRESS_MIRROR_SESSION,
        UPDATE_DSCP,
        PKT_TX_ENABLE,
    );

    /// `sai_port_type_t`.
    pub const TYPE_LOGICAL: i32 = 0;
    pub const TYPE_CPU: i32 = 1;

    /// `sai_port_oper_status_t`.
    pub const OPER_STATUS_UNKNOWN: i32 = 0;
    pub const OPER_STATUS_UP: i32 = 1;
    pub const OPER_STATUS_DOWN: i32 = 2;
    pub const OPER_STATUS_TESTING: i32 = 3;
    pub const OPER_STATUS_NOT_PRESENT: i32 = 4;
}

pub mod lag {
    use super::*;
    attr_ids!(
        PORT_LIST,
        INGRESS_ACL,
        EGRESS_ACL,
        PORT_VLAN_ID,
        DEFAULT_VLAN_PRIORITY,
        DROP_UNTAGGED,
        DROP_TAGGED,
    );
}

pub mod lag_member {
    use super::*;
    attr_ids!(LAG_ID, PORT_ID, EGRESS_DISABLE, INGRESS_DISABLE);
}

pub mod virtual_router {
    use super::*;
    attr_ids!(
        ADMIN_V4_STATE,
        ADMIN_V6_STATE,
        SRC_MAC_ADDRESS,
        VIOLATION_TTL1_PACKET_ACTION,
        VIOLATION_IP_OPTIONS_PACKET_ACTION,
        UNKNOWN_L3_MULTICAST_PACKET_ACTION,
    );
}

pub mod router_interface {
    use super::*;
    attr_ids!(
        VIRTUAL_ROUTER_ID,
        TYPE,
        PORT_ID,
        VLAN_ID,
        OUTER_VLAN_ID,
        BRIDGE_ID,
        SRC_MAC_ADDRESS,
        ADMIN_V4_STATE,
        ADMIN_V6_STATE,
        MTU,
        INGRESS_ACL,
        EGRESS_ACL,
        NEIGHBOR_MISS_PACKET_ACTION,
        LOOPBACK_PACKET_ACTION,
    );

    /// `sai_router_interface_type_t`.
    pub const TYPE_PORT: i32 = 0;
    pub const TYPE_VLAN: i32 = 1;
    pub const TYPE_LOOPBACK: i32 = 2;
}

pub mod next_hop {
    use super::*;
    attr_ids!(TYPE, IP, ROUTER_INTERFACE_ID, TUNNEL_ID, TUNNEL_VNI, TUNNEL_MAC);
}

pub mod next_hop_group {
    use super::*;
    attr_ids!(NEXT_HOP_COUNT, NEXT_HOP_MEMBER_LIST, TYPE);
}

pub mod next_hop_group_member {
    use super::*;
    attr_ids!(NEXT_HOP_GROUP_ID, NEXT_HOP_ID, WEIGHT);
}

pub mod route_entry {
    use super::*;
    attr_ids!(PACKET_ACTION, TRAP_PRIORITY, NEXT_HOP_ID, META_DATA);
}

pub mod neighbor_entry {
    use super::*;
    attr_ids!(DST_MAC_ADDRESS, PACKET_ACTION, NO_HOST_ROUTE, META_DATA);
}

pub mod fdb_entry {
    use super::*;
    attr_ids!(
        TYPE,
        PACKET_ACTION,
        USER_TRAP_ID,
        BRIDGE_PORT_ID,
        META_DATA,
        ENDPOINT_IP,
    );

    /// `sai_fdb_event_t`.
    pub const EVENT_LEARNED: i32 = 0;
    pub const EVENT_AGED: i32 = 1;
    pub const EVENT_MOVE: i32 = 2;
    pub const EVENT_FLUSHED: i32 = 3;

    /// `sai_fdb_entry_type_t`.
    pub const TYPE_DYNAMIC: i32 = 0;
    pub const TYPE_STATIC: i32 = 1;
}

pub mod fdb_flush {
    use super::*;
    attr_ids!(BRIDGE_PORT_ID, BV_ID, ENTRY_TYPE);

    /// `sai_fdb_flush_entry_type_t`.
    pub const ENTRY_TYPE_DYNAMIC: i32 = 0;
    pub const ENTRY_TYPE_STATIC: i32 = 1;
    pub const ENTRY_TYPE_ALL: i32 = 2;
}

pub mod vlan {
    use super::*;
    attr_ids!(
        VLAN_ID,
        MEMBER_LIST,
        MAX_LEARNED_ADDRESSES,
        STP_INSTANCE,
        LEARN_DISABLE,
        INGRESS_ACL,
        EGRESS_ACL,
        UNKNOWN_UNICAST_FLOOD_CONTROL_TYPE,
        BROADCAST_FLOOD_CONTROL_TYPE,
    );
}

pub mod vlan_member {
    use super::*;
    attr_ids!(VLAN_ID, BRIDGE_PORT_ID, VLAN_TAGGING_MODE);
}

pub mod bridge {
    use super::*;
    attr_ids!(TYPE, PORT_LIST, MAX_LEARNED_ADDRESSES, LEARN_DISABLE);

    /// `sai_bridge_type_t`.
    pub const TYPE_1Q: i32 = 0;
    pub const TYPE_1D: i32 = 1;
}

pub mod bridge_port {
    use super::*;
    attr_ids!(
        TYPE,
        PORT_ID,
        TAGGING_MODE,
        VLAN_ID,
        RIF_ID,
        TUNNEL_ID,
        BRIDGE_ID,
        FDB_LEARNING_MODE,
        MAX_LEARNED_ADDRESSES,
        ADMIN_STATE,
        INGRESS_FILTERING,
        EGRESS_FILTERING,
    );

    /// `sai_bridge_port_type_t`.
    pub const TYPE_PORT: i32 = 0;
}

pub mod stp {
    use super::*;
    attr_ids!(BRIDGE_ID, PORT_LIST);
}

pub mod stp_port {
    use super::*;
    attr_ids!(STP, BRIDGE_PORT, STATE);

    /// `sai_stp_port_state_t`.
    pub const STATE_LEARNING: i32 = 0;
    pub const STATE_FORWARDING: i32 = 1;
    pub const STATE_BLOCKING: i32 = 2;
}

pub mod mirror_session {
    use super::*;
    attr_ids!(
        TYPE,
        MONITOR_PORT,
        TRUNCATE_SIZE,
        SAMPLE_RATE,
        CONGESTION_MODE,
        TC,
        VLAN_TPID,
        VLAN_ID,
        VLAN_PRI,
        VLAN_CFI,
        VLAN_HEADER_VALID,
        ERSPAN_ENCAPSULATION_TYPE,
        IPHDR_VERSION,
        TOS,
        TTL,
        SRC_IP_ADDRESS,
        DST_IP_ADDRESS,
        SRC_MAC_ADDRESS,
        DST_MAC_ADDRESS,
        GRE_PROTOCOL_TYPE,
        POLICER,
    );
}

pub mod policer {
    use super::*;
    attr_ids!(
        METER_TYPE,
        MODE,
        COLOR_SOURCE,
        CBS,
        CIR,
        PBS,
        PIR,
        GREEN_PACKET_ACTION,
        YELLOW_PACKET_ACTION,
        RED_PACKET_ACTION,
        ENABLE_COUNTER_PACKET_ACTION_LIST,
    );
}

pub mod scheduler {
    use super::*;
    attr_ids!(
        SCHEDULING_TYPE,
        SCHEDULING_WEIGHT,
        METER_TYPE,
        MIN_BANDWIDTH_RATE,
        MIN_BANDWIDTH_BURST_RATE,
        MAX_BANDWIDTH_RATE,
        MAX_BANDWIDTH_BURST_RATE,
    );
}

pub mod scheduler_group {
    use super::*;
    attr_ids!(
        CHILD_COUNT,
        CHILD_LIST,
        PORT_ID,
        LEVEL,
        MAX_CHILDS,
        SCHEDULER_PROFILE_ID,
        PARENT_NODE,
    );
}

pub mod buffer_pool {
    use super::*;
    attr_ids!(SHARED_SIZE, TYPE, SIZE, THRESHOLD_MODE, XOFF_SIZE);
}

pub mod buffer_profile {
    use super::*;
    attr_ids!(
        POOL_ID,
        BUFFER_SIZE,
        THRESHOLD_MODE,
        SHARED_DYNAMIC_TH,
        SHARED_STATIC_TH,
        XOFF_TH,
        XON_TH,
        XON_OFFSET_TH,
    );
}

pub mod ingress_priority_group {
    use super::*;
    attr_ids!(BUFFER_PROFILE, PORT, INDEX);
}

pub mod queue {
    use super::*;
    attr_ids!(
        TYPE,
        PORT,
        INDEX,
        PARENT_SCHEDULER_NODE,
        WRED_PROFILE_ID,
        BUFFER_PROFILE_ID,
        SCHEDULER_PROFILE_ID,
    );
}

pub mod wred {
    use super::*;
    attr_ids!(
        GREEN_ENABLE,
        GREEN_MIN_THRESHOLD,
        GREEN_MAX_THRESHOLD,
        GREEN_DROP_PROBABILITY,
        YELLOW_ENABLE,
        YELLOW_MIN_THRESHOLD,
        YELLOW_MAX_THRESHOLD,
        YELLOW_DROP_PROBABILITY,
        RED_ENABLE,
        RED_MIN_THRESHOLD,
        RED_MAX_THRESHOLD,
        RED_DROP_PROBABILITY,
        WEIGHT,
        ECN_MARK_MODE,
    );
}

pub mod qos_map {
    use super::*;
    attr_ids!(TYPE, MAP_TO_VALUE_LIST);
}

pub mod tunnel {
    use super::*;
    attr_ids!(
        TYPE,
        UNDERLAY_INTERFACE,
        OVERLAY_INTERFACE,
        ENCAP_SRC_IP,
        ENCAP_TTL_MODE,
        ENCAP_TTL_VAL,
        ENCAP_DSCP_MODE,
        ENCAP_DSCP_VAL,
        DECAP_TTL_MODE,
        DECAP_DSCP_MODE,
        ENCAP_ECN_MODE,
        DECAP_ECN_MODE,
    );
}

pub mod tunnel_term_table_entry {
    use super::*;
    attr_ids!(VR_ID, TYPE, DST_IP, SRC_IP, TUNNEL_TYPE, ACTION_TUNNEL_ID);
}

pub mod acl_table {
    use super::*;
    attr_ids!(
        ACL_STAGE,
        ACL_BIND_POINT_TYPE_LIST,
        SIZE,
        ACL_ACTION_TYPE_LIST,
        FIELD_SRC_IPV6,
        FIELD_DST_IPV6,
        FIELD_SRC_MAC,
        FIELD_DST_MAC,
        FIELD_SRC_IP,
        FIELD_DST_IP,
        FIELD_IN_PORTS,
        FIELD_OUT_PORTS,
        FIELD_IN_PORT,
        FIELD_OUT_PORT,
        FIELD_OUTER_VLAN_ID,
        FIELD_L4_SRC_PORT,
        FIELD_L4_DST_PORT,
        FIELD_ETHER_TYPE,
        FIELD_IP_PROTOCOL,
        FIELD_DSCP,
        FIELD_TTL,
        FIELD_TCP_FLAGS,
        FIELD_ACL_IP_TYPE,
        FIELD_ACL_RANGE_TYPE,
    );
}

pub mod acl_entry {
    use super::*;
    attr_ids!(
        TABLE_ID,
        PRIORITY,
        ADMIN_STATE,
        FIELD_SRC_IPV6,
        FIELD_DST_IPV6,
        FIELD_SRC_MAC,
        FIELD_DST_MAC,
        FIELD_SRC_IP,
        FIELD_DST_IP,
        FIELD_IN_PORTS,
        FIELD_OUT_PORTS,
        FIELD_IN_PORT,
        FIELD_OUT_PORT,
        FIELD_OUTER_VLAN_ID,
        FIELD_L4_SRC_PORT,
        FIELD_L4_DST_PORT,
        FIELD_ETHER_TYPE,
        FIELD_IP_PROTOCOL,
        FIELD_DSCP,
        FIELD_TTL,
        FIELD_TCP_FLAGS,
        FIELD_ACL_IP_TYPE,
        ACTION_PACKET_ACTION,
        ACTION_REDIRECT,
        ACTION_MIRROR_INGRESS,
        ACTION_MIRROR_EGRESS,
        ACTION_COUNTER,
        ACTION_SET_POLICER,
        ACTION_SET_TC,
        ACTION_SET_DSCP,
    );
}

pub mod acl_counter {
    use super::*;
    attr_ids!(TABLE_ID, ENABLE_PACKET_COUNT, ENABLE_BYTE_COUNT, PACKETS, BYTES);
}

pub mod acl_table_group {
    use super::*;
    attr_ids!(ACL_STAGE, ACL_BIND_POINT_TYPE_LIST, TYPE, MEMBER_LIST);
}

pub mod acl_table_group_member {
    use super::*;
    attr_ids!(ACL_TABLE_GROUP_ID, ACL_TABLE_ID, PRIORITY);
}

pub mod debug_counter {
    use super::*;
    attr_ids!(INDEX, TYPE, BIND_METHOD, IN_DROP_REASON_LIST, OUT_DROP_REASON_LIST);

    /// `sai_debug_counter_type_t`.
    pub const TYPE_PORT_IN_DROP_REASONS: i32 = 0;
    pub const TYPE_PORT_OUT_DROP_REASONS: i32 = 1;
    pub const TYPE_SWITCH_IN_DROP_REASONS: i32 = 2;
    pub const TYPE_SWITCH_OUT_DROP_REASONS: i32 = 3;
}

pub mod hostif {
    use super::*;
    attr_ids!(TYPE, OBJ_ID, NAME, OPER_STATUS, QUEUE, VLAN_TAG);
}

pub mod hostif_table_entry {
    use super::*;
    attr_ids!(TYPE, OBJ_ID, TRAP_ID, CHANNEL_TYPE, HOST_IF);
}

pub mod hostif_trap {
    use super::*;
    attr_ids!(TRAP_TYPE, PACKET_ACTION, TRAP_PRIORITY, EXCLUDE_PORT_LIST, TRAP_GROUP);
}

pub mod hostif_trap_group {
    use super::*;
    attr_ids!(ADMIN_STATE, QUEUE, POLICER);
}

pub mod system_port {
    use super::*;
    attr_ids!(TYPE, QOS_NUMBER_OF_VOQS, QOS_VOQ_LIST, PORT, ADMIN_STATE, CONFIG_INFO);
}
