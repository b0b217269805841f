//! Wire representation of attributes and entry keys.
//!
//! Values are externally tagged JSON objects such as `{"u32": 9100}` or
//! `{"mac": "00:11:22:33:44:55"}`. Handles travel as signed 64-bit
//! integers, addresses as strings.

use sai_types::AddrFamily;
use serde::{Deserialize, Serialize};

/// A tagged wire value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireValue {
    #[serde(rename = "booldata")]
    Bool(bool),
    CharData(String),
    U8(u8),
    S8(i8),
    U16(u16),
    S16(i16),
    U32(u32),
    S32(i32),
    U64(u64),
    S64(i64),
    Mac(String),
    Ip4(String),
    Ip6(String),
    IpAddr(WireIpAddress),
    IpPrefix(WireIpPrefix),
    Oid(i64),
    ObjList(Vec<i64>),
    U8List(Vec<u8>),
    S32List(Vec<i32>),
    U32List(Vec<u32>),
    QosMap(Vec<WireQosMapEntry>),
    AclField(WireAclField),
    AclAction(WireAclAction),
    SysPortConfig(WireSystemPortConfig),
}

impl WireValue {
    /// The wire tag, for diagnostics.
    pub fn tag(&self) -> &'static str {
        match self {
            WireValue::Bool(_) => "booldata",
            WireValue::CharData(_) => "chardata",
            WireValue::U8(_) => "u8",
            WireValue::S8(_) => "s8",
            WireValue::U16(_) => "u16",
            WireValue::S16(_) => "s16",
            WireValue::U32(_) => "u32",
            WireValue::S32(_) => "s32",
            WireValue::U64(_) => "u64",
            WireValue::S64(_) => "s64",
            WireValue::Mac(_) => "mac",
            WireValue::Ip4(_) => "ip4",
            WireValue::Ip6(_) => "ip6",
            WireValue::IpAddr(_) => "ipaddr",
            WireValue::IpPrefix(_) => "ipprefix",
            WireValue::Oid(_) => "oid",
            WireValue::ObjList(_) => "objlist",
            WireValue::U8List(_) => "u8list",
            WireValue::S32List(_) => "s32list",
            WireValue::U32List(_) => "u32list",
            WireValue::QosMap(_) => "qosmap",
            WireValue::AclField(_) => "aclfield",
            WireValue::AclAction(_) => "aclaction",
            WireValue::SysPortConfig(_) => "sysportconfig",
        }
    }

    /// The integer carried by any integer tag, widened.
    pub fn as_integer(&self) -> Option<i128> {
        match *self {
            WireValue::U8(v) => Some(v.into()),
            WireValue::S8(v) => Some(v.into()),
            WireValue::U16(v) => Some(v.into()),
            WireValue::S16(v) => Some(v.into()),
            WireValue::U32(v) => Some(v.into()),
            WireValue::S32(v) => Some(v.into()),
            WireValue::U64(v) => Some(v.into()),
            WireValue::S64(v) => Some(v.into()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireIpAddress {
    pub family: AddrFamily,
    pub addr: String,
}

/// Prefix as address plus mask, both in the textual form of `family`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireIpPrefix {
    pub family: AddrFamily,
    pub addr: String,
    pub mask: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WireQosMapParams {
    pub tc: u8,
    pub dscp: u8,
    pub dot1p: u8,
    pub prio: u8,
    pub pg: u8,
    pub queue_index: u8,
    pub color: i32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireQosMapEntry {
    pub key: WireQosMapParams,
    pub value: WireQosMapParams,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireAclField {
    pub enable: bool,
    pub data: Box<WireValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mask: Option<Box<WireValue>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireAclAction {
    pub enable: bool,
    pub parameter: Box<WireValue>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WireSystemPortConfig {
    pub port_id: u32,
    pub attached_switch_id: u32,
    pub attached_core_index: u32,
    pub attached_core_port_index: u32,
    pub speed: u32,
    pub num_voq: u32,
}

/// One attribute on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireAttribute {
    pub id: u32,
    pub value: WireValue,
}

impl WireAttribute {
    pub fn new(id: u32, value: WireValue) -> Self {
        WireAttribute { id, value }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireFdbEntry {
    pub mac: String,
    pub bv_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireRouteEntry {
    pub vr_id: i64,
    pub destination: WireIpPrefix,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireNeighborEntry {
    pub rif_id: i64,
    pub ip_address: WireIpAddress,
}
