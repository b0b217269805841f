//! Attribute codec: wire attributes to native attributes and back.
//!
//! One generic routine interprets the schema table for every object type.
//! The schema kind selects the native variant; the wire tag is only checked
//! against it. Integers are accepted under any integer tag and range
//! checked against the kind.
//!
//! List buffers are owned by the [`Attribute`] values the codec returns, so
//! they are released together with the attribute array on every exit path
//! of the caller.

pub mod wire;

use crate::schema::{AclDataKind, AttrKind, AttrSchema, SchemaRegistry};
use log::warn;
use sai_native::{
    AclAction, AclData, AclField, AttrId, AttrValue, Attribute, EntryKey, FdbEntryKey,
    NativeList, NeighborEntryKey, ObjectId, ObjectType, QosMapEntry, QosMapParams,
    RouteEntryKey, SaiError, SaiResult, SaiStatus, SystemPortConfig, HOSTIF_NAME_SIZE,
};
use sai_types::{parse_ipv4, parse_ipv6, AddrFamily, IpAddress, IpPrefix, MacAddress};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use wire::{
    WireAclAction, WireAclField, WireAttribute, WireFdbEntry, WireIpAddress, WireIpPrefix,
    WireNeighborEntry, WireQosMapEntry, WireQosMapParams, WireRouteEntry, WireSystemPortConfig,
    WireValue,
};

/// Largest list buffer a get request may ask for, in elements.
pub const MAX_LIST_CAPACITY: usize = 1 << 16;

/// What to do with an attribute id the schema does not know.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnsupportedPolicy {
    /// Drop the attribute with a warning and continue.
    #[default]
    Skip,
    /// Fail the whole call before the driver is invoked.
    Strict,
}

impl fmt::Display for UnsupportedPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnsupportedPolicy::Skip => f.write_str("skip"),
            UnsupportedPolicy::Strict => f.write_str("strict"),
        }
    }
}

impl FromStr for UnsupportedPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "skip" => Ok(UnsupportedPolicy::Skip),
            "strict" => Ok(UnsupportedPolicy::Strict),
            other => Err(format!("unknown unsupported-attribute policy '{}'", other)),
        }
    }
}

/// Native attributes produced by an encode, plus the ids that were skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EncodedAttrs {
    attrs: Vec<Attribute>,
    skipped: Vec<AttrId>,
}

impl EncodedAttrs {
    pub fn attrs(&self) -> &[Attribute] {
        &self.attrs
    }

    pub fn attrs_mut(&mut self) -> &mut [Attribute] {
        &mut self.attrs
    }

    pub fn skipped(&self) -> &[AttrId] {
        &self.skipped
    }

    pub fn into_attrs(self) -> Vec<Attribute> {
        self.attrs
    }

    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }
}

/// Converts attributes for one server instance.
#[derive(Debug, Clone)]
pub struct AttributeCodec {
    registry: Arc<SchemaRegistry>,
    policy: UnsupportedPolicy,
}

impl AttributeCodec {
    pub fn new(registry: Arc<SchemaRegistry>, policy: UnsupportedPolicy) -> Self {
        AttributeCodec { registry, policy }
    }

    pub fn policy(&self) -> UnsupportedPolicy {
        self.policy
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// Resolves the schema of every requested id under the policy.
    ///
    /// Returns `(input index, schema)` for the ids that are kept, plus the
    /// skipped ids. In strict mode the first unknown id is an error and no
    /// schema is returned at all.
    fn resolve<'a>(
        &'a self,
        object_type: ObjectType,
        ids: impl Iterator<Item = AttrId>,
    ) -> SaiResult<(Vec<(usize, &'a AttrSchema)>, Vec<AttrId>)> {
        let mut resolved = Vec::new();
        let mut skipped = Vec::new();
        for (index, attr_id) in ids.enumerate() {
            match self.registry.lookup(object_type, attr_id) {
                Some(schema) => resolved.push((index, schema)),
                None if self.policy == UnsupportedPolicy::Strict => {
                    return Err(SaiError::UnsupportedAttribute {
                        object_type,
                        attr_id,
                        index,
                    });
                }
                None => {
                    warn!(
                        "Skipping unsupported attribute {} for {} (index {})",
                        attr_id, object_type, index
                    );
                    skipped.push(attr_id);
                }
            }
        }
        Ok((resolved, skipped))
    }

    /// Encodes an ordered list of wire attributes.
    ///
    /// Kept attributes keep their relative order, one native slot each.
    /// Any conversion failure fails the whole encode; nothing partial is
    /// returned.
    pub fn encode(
        &self,
        object_type: ObjectType,
        wire_attrs: &[WireAttribute],
    ) -> SaiResult<EncodedAttrs> {
        let (resolved, skipped) = self.resolve(object_type, wire_attrs.iter().map(|a| a.id))?;
        let mut attrs = Vec::with_capacity(resolved.len());
        for (index, schema) in resolved {
            let value = to_native(schema, index, &wire_attrs[index].value)?;
            attrs.push(Attribute::new(schema.id, value));
        }
        Ok(EncodedAttrs { attrs, skipped })
    }

    /// Encodes the single attribute of a set call.
    ///
    /// A set with an unknown id has nothing to apply, so it is always an
    /// error regardless of policy.
    pub fn encode_one(
        &self,
        object_type: ObjectType,
        wire_attr: &WireAttribute,
    ) -> SaiResult<Attribute> {
        let schema = self.registry.lookup(object_type, wire_attr.id).ok_or(
            SaiError::UnsupportedAttribute {
                object_type,
                attr_id: wire_attr.id,
                index: 0,
            },
        )?;
        let value = to_native(schema, 0, &wire_attr.value)?;
        Ok(Attribute::new(schema.id, value))
    }

    /// Builds the native slots for a get call.
    ///
    /// Each request is `(attr id, list capacity)`; the capacity is ignored
    /// for scalar kinds. List buffers are allocated here and fail with
    /// `ResourceExhausted` when they cannot be or when the capacity is
    /// above [`MAX_LIST_CAPACITY`].
    pub fn prepare_get(
        &self,
        object_type: ObjectType,
        requests: &[(AttrId, usize)],
    ) -> SaiResult<EncodedAttrs> {
        let (resolved, skipped) = self.resolve(object_type, requests.iter().map(|r| r.0))?;
        let mut attrs = Vec::with_capacity(resolved.len());
        for (index, schema) in resolved {
            let value = placeholder(schema, requests[index].1)?;
            attrs.push(Attribute::new(schema.id, value));
        }
        Ok(EncodedAttrs { attrs, skipped })
    }

    /// Decodes native attributes returned by a driver read.
    ///
    /// A non-success `status` short-circuits: the native slots are
    /// undefined after a failed call, so nothing is decoded.
    pub fn decode(
        &self,
        object_type: ObjectType,
        status: SaiStatus,
        attrs: &[Attribute],
    ) -> SaiResult<Vec<WireAttribute>> {
        status.into_result()?;
        let (resolved, _) = self.resolve(object_type, attrs.iter().map(|a| a.id))?;
        resolved
            .into_iter()
            .map(|(index, schema)| {
                to_wire(schema, index, &attrs[index].value)
                    .map(|value| WireAttribute::new(schema.id, value))
            })
            .collect()
    }

    /// Decodes a single native value of a known attribute.
    pub fn decode_value(
        &self,
        object_type: ObjectType,
        attr: &Attribute,
    ) -> SaiResult<WireValue> {
        let schema = self.registry.lookup(object_type, attr.id).ok_or(
            SaiError::UnsupportedAttribute {
                object_type,
                attr_id: attr.id,
                index: 0,
            },
        )?;
        to_wire(schema, 0, &attr.value)
    }
}

fn mismatch(schema: &AttrSchema, index: usize, found: &str) -> SaiError {
    SaiError::invalid_value(
        schema.id,
        index,
        format!("{} expects {}, got {}", schema.name, schema.kind, found),
    )
}

fn alloc_list<T: Clone + Default>(schema: &AttrSchema, items: &[T]) -> SaiResult<NativeList<T>> {
    NativeList::from_slice(items).map_err(|e| SaiError::ResourceExhausted {
        attr_id: schema.id,
        requested: e.requested,
    })
}

fn sized_list<T: Clone + Default>(schema: &AttrSchema, len: usize) -> SaiResult<NativeList<T>> {
    if len > MAX_LIST_CAPACITY {
        return Err(SaiError::ResourceExhausted {
            attr_id: schema.id,
            requested: len,
        });
    }
    NativeList::with_len(len).map_err(|e| SaiError::ResourceExhausted {
        attr_id: schema.id,
        requested: e.requested,
    })
}

/// Checks an integer against the range of `T`.
fn int<T: TryFrom<i128>>(schema: &AttrSchema, index: usize, value: &WireValue) -> SaiResult<T> {
    let n = value
        .as_integer()
        .ok_or_else(|| mismatch(schema, index, value.tag()))?;
    T::try_from(n).map_err(|_| {
        SaiError::invalid_value(
            schema.id,
            index,
            format!("{} out of range for {}", n, schema.name),
        )
    })
}

fn parse_mac(schema: &AttrSchema, index: usize, s: &str) -> SaiResult<MacAddress> {
    s.parse()
        .map_err(|e| SaiError::invalid_value(schema.id, index, format!("{}", e)))
}

fn parse_ip(
    schema: &AttrSchema,
    index: usize,
    family: AddrFamily,
    s: &str,
) -> SaiResult<IpAddress> {
    family
        .parse(s)
        .map_err(|e| SaiError::invalid_value(schema.id, index, format!("{}", e)))
}

fn to_native(schema: &AttrSchema, index: usize, value: &WireValue) -> SaiResult<AttrValue> {
    let native = match (schema.kind, value) {
        (AttrKind::Bool, WireValue::Bool(b)) => AttrValue::Bool(*b),
        (AttrKind::U8, v) => AttrValue::U8(int(schema, index, v)?),
        (AttrKind::S8, v) => AttrValue::S8(int(schema, index, v)?),
        (AttrKind::U16, v) => AttrValue::U16(int(schema, index, v)?),
        (AttrKind::S16, v) => AttrValue::S16(int(schema, index, v)?),
        (AttrKind::U32, v) => AttrValue::U32(int(schema, index, v)?),
        (AttrKind::S32, v) => AttrValue::S32(int(schema, index, v)?),
        (AttrKind::U64, v) => AttrValue::U64(int(schema, index, v)?),
        (AttrKind::S64, v) => AttrValue::S64(int(schema, index, v)?),
        (AttrKind::Mac, WireValue::Mac(s)) => AttrValue::Mac(parse_mac(schema, index, s)?),
        (AttrKind::Ip4, WireValue::Ip4(s)) => AttrValue::Ip4(
            parse_ipv4(s).map_err(|e| SaiError::invalid_value(schema.id, index, e.to_string()))?,
        ),
        (AttrKind::Ip6, WireValue::Ip6(s)) => AttrValue::Ip6(
            parse_ipv6(s).map_err(|e| SaiError::invalid_value(schema.id, index, e.to_string()))?,
        ),
        (AttrKind::IpAddress, WireValue::IpAddr(addr)) => {
            AttrValue::IpAddress(parse_ip(schema, index, addr.family, &addr.addr)?)
        }
        (AttrKind::IpAddress, WireValue::Ip4(s)) => {
            AttrValue::IpAddress(parse_ip(schema, index, AddrFamily::Ipv4, s)?)
        }
        (AttrKind::IpAddress, WireValue::Ip6(s)) => {
            AttrValue::IpAddress(parse_ip(schema, index, AddrFamily::Ipv6, s)?)
        }
        (AttrKind::IpPrefix, WireValue::IpPrefix(prefix)) => {
            let addr = parse_ip(schema, index, prefix.family, &prefix.addr)?;
            let mask = parse_ip(schema, index, prefix.family, &prefix.mask)?;
            AttrValue::IpPrefix(
                IpPrefix::new(addr, mask)
                    .map_err(|e| SaiError::invalid_value(schema.id, index, e.to_string()))?,
            )
        }
        (AttrKind::Oid, WireValue::Oid(handle)) => AttrValue::Oid(ObjectId::from_wire(*handle)),
        (AttrKind::CharData, WireValue::CharData(s)) => {
            let bytes = s.as_bytes();
            // One byte stays for the terminator.
            if bytes.len() >= HOSTIF_NAME_SIZE {
                return Err(SaiError::invalid_value(
                    schema.id,
                    index,
                    format!("'{}' longer than {} bytes", s, HOSTIF_NAME_SIZE - 1),
                ));
            }
            let mut buf = [0u8; HOSTIF_NAME_SIZE];
            buf[..bytes.len()].copy_from_slice(bytes);
            AttrValue::CharData(buf)
        }
        (AttrKind::ObjList, WireValue::ObjList(handles)) => {
            let oids: Vec<ObjectId> = handles.iter().map(|h| ObjectId::from_wire(*h)).collect();
            AttrValue::ObjList(alloc_list(schema, &oids)?)
        }
        (AttrKind::U8List, WireValue::U8List(items)) => {
            AttrValue::U8List(alloc_list(schema, items)?)
        }
        (AttrKind::S32List, WireValue::S32List(items)) => {
            AttrValue::S32List(alloc_list(schema, items)?)
        }
        (AttrKind::U32List, WireValue::U32List(items)) => {
            AttrValue::U32List(alloc_list(schema, items)?)
        }
        (AttrKind::QosMapList, WireValue::QosMap(entries)) => {
            let native: Vec<QosMapEntry> = entries
                .iter()
                .map(|e| QosMapEntry {
                    key: qos_params_to_native(&e.key),
                    value: qos_params_to_native(&e.value),
                })
                .collect();
            AttrValue::QosMapList(alloc_list(schema, &native)?)
        }
        (AttrKind::AclField(kind), WireValue::AclField(field)) => AttrValue::AclField(AclField {
            enable: field.enable,
            data: acl_data_to_native(schema, index, kind, &field.data)?,
            mask: field
                .mask
                .as_deref()
                .map(|mask| acl_data_to_native(schema, index, kind, mask))
                .transpose()?,
        }),
        (AttrKind::AclAction(kind), WireValue::AclAction(action)) => {
            AttrValue::AclAction(AclAction {
                enable: action.enable,
                parameter: acl_data_to_native(schema, index, kind, &action.parameter)?,
            })
        }
        (AttrKind::SysPortConfig, WireValue::SysPortConfig(c)) => {
            AttrValue::SysPortConfig(SystemPortConfig {
                port_id: c.port_id,
                attached_switch_id: c.attached_switch_id,
                attached_core_index: c.attached_core_index,
                attached_core_port_index: c.attached_core_port_index,
                speed: c.speed,
                num_voq: c.num_voq,
            })
        }
        (_, other) => return Err(mismatch(schema, index, other.tag())),
    };
    Ok(native)
}

fn qos_params_to_native(p: &WireQosMapParams) -> QosMapParams {
    QosMapParams {
        tc: p.tc,
        dscp: p.dscp,
        dot1p: p.dot1p,
        prio: p.prio,
        pg: p.pg,
        queue_index: p.queue_index,
        color: p.color,
    }
}

fn qos_params_to_wire(p: &QosMapParams) -> WireQosMapParams {
    WireQosMapParams {
        tc: p.tc,
        dscp: p.dscp,
        dot1p: p.dot1p,
        prio: p.prio,
        pg: p.pg,
        queue_index: p.queue_index,
        color: p.color,
    }
}

fn acl_data_to_native(
    schema: &AttrSchema,
    index: usize,
    kind: AclDataKind,
    value: &WireValue,
) -> SaiResult<AclData> {
    let data = match (kind, value) {
        (AclDataKind::U8, v) => AclData::U8(int(schema, index, v)?),
        (AclDataKind::U16, v) => AclData::U16(int(schema, index, v)?),
        (AclDataKind::U32, v) => AclData::U32(int(schema, index, v)?),
        (AclDataKind::S32, v) => AclData::S32(int(schema, index, v)?),
        (AclDataKind::Mac, WireValue::Mac(s)) => AclData::Mac(parse_mac(schema, index, s)?),
        (AclDataKind::Ip4, WireValue::Ip4(s)) => AclData::Ip4(
            parse_ipv4(s).map_err(|e| SaiError::invalid_value(schema.id, index, e.to_string()))?,
        ),
        (AclDataKind::Ip6, WireValue::Ip6(s)) => AclData::Ip6(
            parse_ipv6(s).map_err(|e| SaiError::invalid_value(schema.id, index, e.to_string()))?,
        ),
        (AclDataKind::Oid, WireValue::Oid(handle)) => AclData::Oid(ObjectId::from_wire(*handle)),
        (AclDataKind::ObjList, WireValue::ObjList(handles)) => {
            let oids: Vec<ObjectId> = handles.iter().map(|h| ObjectId::from_wire(*h)).collect();
            AclData::ObjList(alloc_list(schema, &oids)?)
        }
        (_, other) => return Err(mismatch(schema, index, other.tag())),
    };
    Ok(data)
}

fn acl_data_to_wire(
    schema: &AttrSchema,
    index: usize,
    kind: AclDataKind,
    data: &AclData,
) -> SaiResult<WireValue> {
    let value = match (kind, data) {
        (AclDataKind::U8, AclData::U8(v)) => WireValue::U8(*v),
        (AclDataKind::U16, AclData::U16(v)) => WireValue::U16(*v),
        (AclDataKind::U32, AclData::U32(v)) => WireValue::U32(*v),
        (AclDataKind::S32, AclData::S32(v)) => WireValue::S32(*v),
        (AclDataKind::Mac, AclData::Mac(mac)) => WireValue::Mac(mac.to_string()),
        (AclDataKind::Ip4, AclData::Ip4(addr)) => WireValue::Ip4(addr.to_string()),
        (AclDataKind::Ip6, AclData::Ip6(addr)) => WireValue::Ip6(addr.to_string()),
        (AclDataKind::Oid, AclData::Oid(oid)) => WireValue::Oid(oid.to_wire()),
        (AclDataKind::ObjList, AclData::ObjList(list)) => {
            WireValue::ObjList(list.as_slice().iter().map(|oid| oid.to_wire()).collect())
        }
        _ => return Err(mismatch(schema, index, "mismatched acl data")),
    };
    Ok(value)
}

fn acl_placeholder(schema: &AttrSchema, kind: AclDataKind, list_len: usize) -> SaiResult<AclData> {
    let data = match kind {
        AclDataKind::U8 => AclData::U8(0),
        AclDataKind::U16 => AclData::U16(0),
        AclDataKind::U32 => AclData::U32(0),
        AclDataKind::S32 => AclData::S32(0),
        AclDataKind::Mac => AclData::Mac(MacAddress::ZERO),
        AclDataKind::Ip4 => AclData::Ip4(std::net::Ipv4Addr::UNSPECIFIED),
        AclDataKind::Ip6 => AclData::Ip6(std::net::Ipv6Addr::UNSPECIFIED),
        AclDataKind::Oid => AclData::Oid(ObjectId::NULL),
        AclDataKind::ObjList => AclData::ObjList(sized_list(schema, list_len)?),
    };
    Ok(data)
}

/// An empty native slot of the schema kind, list buffers sized to `list_len`.
fn placeholder(schema: &AttrSchema, list_len: usize) -> SaiResult<AttrValue> {
    let value = match schema.kind {
        AttrKind::Bool => AttrValue::Bool(false),
        AttrKind::U8 => AttrValue::U8(0),
        AttrKind::S8 => AttrValue::S8(0),
        AttrKind::U16 => AttrValue::U16(0),
        AttrKind::S16 => AttrValue::S16(0),
        AttrKind::U32 => AttrValue::U32(0),
        AttrKind::S32 => AttrValue::S32(0),
        AttrKind::U64 => AttrValue::U64(0),
        AttrKind::S64 => AttrValue::S64(0),
        AttrKind::Mac => AttrValue::Mac(MacAddress::ZERO),
        AttrKind::Ip4 => AttrValue::Ip4(std::net::Ipv4Addr::UNSPECIFIED),
        AttrKind::Ip6 => AttrValue::Ip6(std::net::Ipv6Addr::UNSPECIFIED),
        AttrKind::IpAddress => AttrValue::IpAddress(IpAddress::V4(std::net::Ipv4Addr::UNSPECIFIED)),
        AttrKind::IpPrefix => {
            let zero = IpAddress::V4(std::net::Ipv4Addr::UNSPECIFIED);
            AttrValue::IpPrefix(
                IpPrefix::new(zero, zero)
                    .map_err(|e| SaiError::invalid_value(schema.id, 0, e.to_string()))?,
            )
        }
        AttrKind::Oid => AttrValue::Oid(ObjectId::NULL),
        AttrKind::CharData => AttrValue::CharData([0; HOSTIF_NAME_SIZE]),
        AttrKind::ObjList => AttrValue::ObjList(sized_list(schema, list_len)?),
        AttrKind::U8List => AttrValue::U8List(sized_list(schema, list_len)?),
        AttrKind::S32List => AttrValue::S32List(sized_list(schema, list_len)?),
        AttrKind::U32List => AttrValue::U32List(sized_list(schema, list_len)?),
        AttrKind::QosMapList => AttrValue::QosMapList(sized_list(schema, list_len)?),
        AttrKind::AclField(kind) => AttrValue::AclField(AclField {
            enable: false,
            data: acl_placeholder(schema, kind, list_len)?,
            mask: None,
        }),
        AttrKind::AclAction(kind) => AttrValue::AclAction(AclAction {
            enable: false,
            parameter: acl_placeholder(schema, kind, list_len)?,
        }),
        AttrKind::SysPortConfig => AttrValue::SysPortConfig(SystemPortConfig::default()),
    };
    Ok(value)
}

fn to_wire(schema: &AttrSchema, index: usize, value: &AttrValue) -> SaiResult<WireValue> {
    let wire = match (schema.kind, value) {
        (AttrKind::Bool, AttrValue::Bool(b)) => WireValue::Bool(*b),
        (AttrKind::U8, AttrValue::U8(v)) => WireValue::U8(*v),
        (AttrKind::S8, AttrValue::S8(v)) => WireValue::S8(*v),
        (AttrKind::U16, AttrValue::U16(v)) => WireValue::U16(*v),
        (AttrKind::S16, AttrValue::S16(v)) => WireValue::S16(*v),
        (AttrKind::U32, AttrValue::U32(v)) => WireValue::U32(*v),
        (AttrKind::S32, AttrValue::S32(v)) => WireValue::S32(*v),
        (AttrKind::U64, AttrValue::U64(v)) => WireValue::U64(*v),
        (AttrKind::S64, AttrValue::S64(v)) => WireValue::S64(*v),
        (AttrKind::Mac, AttrValue::Mac(mac)) => WireValue::Mac(mac.to_string()),
        (AttrKind::Ip4, AttrValue::Ip4(addr)) => WireValue::Ip4(addr.to_string()),
        (AttrKind::Ip6, AttrValue::Ip6(addr)) => WireValue::Ip6(addr.to_string()),
        (AttrKind::IpAddress, AttrValue::IpAddress(addr)) => WireValue::IpAddr(ip_to_wire(addr)),
        (AttrKind::IpPrefix, AttrValue::IpPrefix(prefix)) => {
            WireValue::IpPrefix(prefix_to_wire(prefix))
        }
        (AttrKind::Oid, AttrValue::Oid(oid)) => WireValue::Oid(oid.to_wire()),
        (AttrKind::CharData, AttrValue::CharData(buf)) => {
            let end = buf.iter().position(|b| *b == 0).unwrap_or(buf.len());
            WireValue::CharData(String::from_utf8_lossy(&buf[..end]).into_owned())
        }
        (AttrKind::ObjList, AttrValue::ObjList(list)) => {
            WireValue::ObjList(list.as_slice().iter().map(|oid| oid.to_wire()).collect())
        }
        (AttrKind::U8List, AttrValue::U8List(list)) => WireValue::U8List(list.as_slice().to_vec()),
        (AttrKind::S32List, AttrValue::S32List(list)) => {
            WireValue::S32List(list.as_slice().to_vec())
        }
        (AttrKind::U32List, AttrValue::U32List(list)) => {
            WireValue::U32List(list.as_slice().to_vec())
        }
        (AttrKind::QosMapList, AttrValue::QosMapList(list)) => WireValue::QosMap(
            list.as_slice()
                .iter()
                .map(|e| WireQosMapEntry {
                    key: qos_params_to_wire(&e.key),
                    value: qos_params_to_wire(&e.value),
                })
                .collect(),
        ),
        (AttrKind::AclField(kind), AttrValue::AclField(field)) => WireValue::AclField(WireAclField {
            enable: field.enable,
            data: Box::new(acl_data_to_wire(schema, index, kind, &field.data)?),
            mask: field
                .mask
                .as_ref()
                .map(|mask| acl_data_to_wire(schema, index, kind, mask).map(Box::new))
                .transpose()?,
        }),
        (AttrKind::AclAction(kind), AttrValue::AclAction(action)) => {
            WireValue::AclAction(WireAclAction {
                enable: action.enable,
                parameter: Box::new(acl_data_to_wire(schema, index, kind, &action.parameter)?),
            })
        }
        (AttrKind::SysPortConfig, AttrValue::SysPortConfig(c)) => {
            WireValue::SysPortConfig(WireSystemPortConfig {
                port_id: c.port_id,
                attached_switch_id: c.attached_switch_id,
                attached_core_index: c.attached_core_index,
                attached_core_port_index: c.attached_core_port_index,
                speed: c.speed,
                num_voq: c.num_voq,
            })
        }
        (_, other) => return Err(mismatch(schema, index, other.kind_name())),
    };
    Ok(wire)
}

pub fn ip_to_wire(addr: &IpAddress) -> WireIpAddress {
    WireIpAddress {
        family: addr.family(),
        addr: addr.to_string(),
    }
}

pub fn prefix_to_wire(prefix: &IpPrefix) -> WireIpPrefix {
    WireIpPrefix {
        family: prefix.family(),
        addr: prefix.addr().to_string(),
        mask: prefix.mask().to_string(),
    }
}

/// Parses an FDB entry key.
pub fn fdb_entry_key(switch_id: ObjectId, entry: &WireFdbEntry) -> SaiResult<EntryKey> {
    let mac = entry
        .mac
        .parse::<MacAddress>()
        .map_err(|e| SaiError::invalid_key(e.to_string()))?;
    Ok(EntryKey::Fdb(FdbEntryKey {
        switch_id,
        mac,
        bv_id: ObjectId::from_wire(entry.bv_id),
    }))
}

/// Parses a route entry key.
pub fn route_entry_key(switch_id: ObjectId, entry: &WireRouteEntry) -> SaiResult<EntryKey> {
    let family = entry.destination.family;
    let addr = family
        .parse(&entry.destination.addr)
        .map_err(|e| SaiError::invalid_key(e.to_string()))?;
    let mask = family
        .parse(&entry.destination.mask)
        .map_err(|e| SaiError::invalid_key(e.to_string()))?;
    let destination = IpPrefix::new(addr, mask).map_err(|e| SaiError::invalid_key(e.to_string()))?;
    Ok(EntryKey::Route(RouteEntryKey {
        switch_id,
        vr_id: ObjectId::from_wire(entry.vr_id),
        destination,
    }))
}

/// Parses a neighbor entry key.
pub fn neighbor_entry_key(switch_id: ObjectId, entry: &WireNeighborEntry) -> SaiResult<EntryKey> {
    let ip_address = entry
        .ip_address
        .family
        .parse(&entry.ip_address.addr)
        .map_err(|e| SaiError::invalid_key(e.to_string()))?;
    Ok(EntryKey::Neighbor(NeighborEntryKey {
        switch_id,
        rif_id: ObjectId::from_wire(entry.rif_id),
        ip_address,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sai_native::ids;

    fn codec(policy: UnsupportedPolicy) -> AttributeCodec {
        AttributeCodec::new(Arc::new(SchemaRegistry::new()), policy)
    }

    /// Encodes then decodes through a driver-shaped read of the same values.
    fn round_trip(object_type: ObjectType, attr: WireAttribute) -> WireAttribute {
        let codec = codec(UnsupportedPolicy::Strict);
        let encoded = codec.encode(object_type, &[attr]).unwrap();
        let mut decoded = codec
            .decode(object_type, SaiStatus::SUCCESS, encoded.attrs())
            .unwrap();
        assert_eq!(decoded.len(), 1);
        decoded.remove(0)
    }

    #[test]
    fn test_encode_preserves_order() {
        let codec = codec(UnsupportedPolicy::Skip);
        let wire = vec![
            WireAttribute::new(ids::port::MTU, WireValue::U32(9100)),
            WireAttribute::new(ids::port::ADMIN_STATE, WireValue::Bool(true)),
            WireAttribute::new(ids::port::PORT_VLAN_ID, WireValue::U16(100)),
        ];
        let encoded = codec.encode(ObjectType::Port, &wire).unwrap();
        let order: Vec<AttrId> = encoded.attrs().iter().map(|a| a.id).collect();
        assert_eq!(order, vec![ids::port::MTU, ids::port::ADMIN_STATE, ids::port::PORT_VLAN_ID]);
        assert!(encoded.skipped().is_empty());
    }

    #[test]
    fn test_skip_policy_drops_only_unknown_ids() {
        let codec = codec(UnsupportedPolicy::Skip);
        let wire = vec![
            WireAttribute::new(ids::port::MTU, WireValue::U32(9100)),
            WireAttribute::new(4242, WireValue::U32(1)),
            WireAttribute::new(ids::port::ADMIN_STATE, WireValue::Bool(true)),
        ];
        let encoded = codec.encode(ObjectType::Port, &wire).unwrap();
        assert_eq!(encoded.len(), 2);
        assert_eq!(encoded.skipped(), &[4242]);
        assert_eq!(encoded.attrs()[1].value, AttrValue::Bool(true));
    }

    #[test]
    fn test_strict_policy_fails_whole_encode() {
        let codec = codec(UnsupportedPolicy::Strict);
        let wire = vec![
            WireAttribute::new(ids::port::MTU, WireValue::U32(9100)),
            WireAttribute::new(4242, WireValue::U32(1)),
        ];
        let err = codec.encode(ObjectType::Port, &wire).unwrap_err();
        assert_eq!(
            err,
            SaiError::UnsupportedAttribute {
                object_type: ObjectType::Port,
                attr_id: 4242,
                index: 1,
            }
        );
        assert_eq!(err.status(), SaiStatus::attr_not_supported(1));
    }

    #[test]
    fn test_set_with_unknown_id_is_always_an_error() {
        let codec = codec(UnsupportedPolicy::Skip);
        let err = codec
            .encode_one(ObjectType::Vlan, &WireAttribute::new(999, WireValue::Bool(true)))
            .unwrap_err();
        assert!(matches!(err, SaiError::UnsupportedAttribute { attr_id: 999, .. }));
    }

    #[test]
    fn test_integer_coercion_uses_schema_kind() {
        let codec = codec(UnsupportedPolicy::Strict);
        // VLAN id is u16 in the schema; a s32 tag is accepted when in range.
        let attr = codec
            .encode_one(
                ObjectType::Vlan,
                &WireAttribute::new(ids::vlan::VLAN_ID, WireValue::S32(100)),
            )
            .unwrap();
        assert_eq!(attr.value, AttrValue::U16(100));

        let err = codec
            .encode_one(
                ObjectType::Vlan,
                &WireAttribute::new(ids::vlan::VLAN_ID, WireValue::U32(70_000)),
            )
            .unwrap_err();
        assert!(matches!(err, SaiError::InvalidValue { index: 0, .. }));
    }

    #[test]
    fn test_tag_mismatch_is_invalid_value() {
        let codec = codec(UnsupportedPolicy::Skip);
        let wire = vec![
            WireAttribute::new(ids::port::MTU, WireValue::U32(9100)),
            WireAttribute::new(ids::port::ADMIN_STATE, WireValue::Mac("00:11:22:33:44:55".into())),
        ];
        let err = codec.encode(ObjectType::Port, &wire).unwrap_err();
        assert_eq!(err.status(), SaiStatus::invalid_attr_value(1));
    }

    #[test]
    fn test_malformed_ipv4_is_rejected() {
        let codec = codec(UnsupportedPolicy::Strict);
        let attr = WireAttribute::new(
            ids::next_hop::IP,
            WireValue::IpAddr(WireIpAddress {
                family: AddrFamily::Ipv4,
                addr: "10.0.0.256".into(),
            }),
        );
        let err = codec.encode(ObjectType::NextHop, &[attr]).unwrap_err();
        assert!(matches!(err, SaiError::InvalidValue { .. }));
    }

    #[test]
    fn test_mac_boundaries_round_trip() {
        for mac in ["00:00:00:00:00:00", "ff:ff:ff:ff:ff:ff"] {
            let attr = WireAttribute::new(ids::switch::SRC_MAC_ADDRESS, WireValue::Mac(mac.into()));
            assert_eq!(round_trip(ObjectType::Switch, attr.clone()), attr);
        }
        // Uppercase input comes back canonical.
        let attr = WireAttribute::new(
            ids::switch::SRC_MAC_ADDRESS,
            WireValue::Mac("AA:BB:CC:DD:EE:FF".into()),
        );
        assert_eq!(
            round_trip(ObjectType::Switch, attr).value,
            WireValue::Mac("aa:bb:cc:dd:ee:ff".into())
        );
    }

    #[test]
    fn test_ipv4_boundaries_round_trip() {
        for addr in ["0.0.0.0", "255.255.255.255"] {
            let attr = WireAttribute::new(
                ids::tunnel::ENCAP_SRC_IP,
                WireValue::IpAddr(WireIpAddress {
                    family: AddrFamily::Ipv4,
                    addr: addr.into(),
                }),
            );
            assert_eq!(round_trip(ObjectType::Tunnel, attr.clone()), attr);
        }
    }

    #[test]
    fn test_object_list_round_trip() {
        let empty = WireAttribute::new(ids::lag::PORT_LIST, WireValue::ObjList(vec![]));
        assert_eq!(round_trip(ObjectType::Lag, empty.clone()), empty);

        let handles: Vec<i64> = (1..=1024).collect();
        let large = WireAttribute::new(ids::lag::PORT_LIST, WireValue::ObjList(handles));
        assert_eq!(round_trip(ObjectType::Lag, large.clone()), large);
    }

    #[test]
    fn test_acl_field_round_trip() {
        let attr = WireAttribute::new(
            ids::acl_entry::FIELD_SRC_IP,
            WireValue::AclField(WireAclField {
                enable: true,
                data: Box::new(WireValue::Ip4("10.1.0.0".into())),
                mask: Some(Box::new(WireValue::Ip4("255.255.0.0".into()))),
            }),
        );
        assert_eq!(round_trip(ObjectType::AclEntry, attr.clone()), attr);
    }

    #[test]
    fn test_hostif_name_limits() {
        let codec = codec(UnsupportedPolicy::Strict);
        let ok = WireAttribute::new(ids::hostif::NAME, WireValue::CharData("Ethernet0".into()));
        assert_eq!(round_trip(ObjectType::Hostif, ok.clone()), ok);

        let long = WireAttribute::new(ids::hostif::NAME, WireValue::CharData("x".repeat(32)));
        assert!(codec.encode(ObjectType::Hostif, &[long]).is_err());
    }

    fn ip(family: AddrFamily, addr: &str) -> WireValue {
        WireValue::IpAddr(WireIpAddress {
            family,
            addr: addr.into(),
        })
    }

    fn prefix(family: AddrFamily, addr: &str, mask: &str) -> WireValue {
        WireValue::IpPrefix(WireIpPrefix {
            family,
            addr: addr.into(),
            mask: mask.into(),
        })
    }

    /// Representative ACL data values, boundaries included.
    fn acl_samples(kind: AclDataKind) -> Vec<WireValue> {
        match kind {
            AclDataKind::U8 => vec![WireValue::U8(0), WireValue::U8(u8::MAX)],
            AclDataKind::U16 => vec![WireValue::U16(0), WireValue::U16(u16::MAX)],
            AclDataKind::U32 => vec![WireValue::U32(0), WireValue::U32(u32::MAX)],
            AclDataKind::S32 => vec![WireValue::S32(i32::MIN), WireValue::S32(i32::MAX)],
            AclDataKind::Mac => vec![
                WireValue::Mac("00:00:00:00:00:00".into()),
                WireValue::Mac("ff:ff:ff:ff:ff:ff".into()),
            ],
            AclDataKind::Ip4 => vec![
                WireValue::Ip4("0.0.0.0".into()),
                WireValue::Ip4("255.255.255.255".into()),
            ],
            AclDataKind::Ip6 => vec![
                WireValue::Ip6("::".into()),
                WireValue::Ip6("2001:db8::1".into()),
            ],
            AclDataKind::Oid => vec![WireValue::Oid(0), WireValue::Oid(i64::MAX)],
            AclDataKind::ObjList => {
                vec![WireValue::ObjList(vec![]), WireValue::ObjList(vec![1, 2])]
            }
        }
    }

    /// Representative wire values of an attribute kind, boundaries included.
    fn samples(kind: AttrKind) -> Vec<WireValue> {
        match kind {
            AttrKind::Bool => vec![WireValue::Bool(false), WireValue::Bool(true)],
            AttrKind::U8 => vec![WireValue::U8(0), WireValue::U8(u8::MAX)],
            AttrKind::S8 => vec![WireValue::S8(i8::MIN), WireValue::S8(i8::MAX)],
            AttrKind::U16 => vec![WireValue::U16(0), WireValue::U16(u16::MAX)],
            AttrKind::S16 => vec![WireValue::S16(i16::MIN), WireValue::S16(i16::MAX)],
            AttrKind::U32 => vec![WireValue::U32(0), WireValue::U32(u32::MAX)],
            AttrKind::S32 => vec![WireValue::S32(i32::MIN), WireValue::S32(i32::MAX)],
            AttrKind::U64 => vec![WireValue::U64(0), WireValue::U64(u64::MAX)],
            AttrKind::S64 => vec![WireValue::S64(i64::MIN), WireValue::S64(i64::MAX)],
            AttrKind::Mac => acl_samples(AclDataKind::Mac),
            AttrKind::Ip4 => acl_samples(AclDataKind::Ip4),
            AttrKind::Ip6 => acl_samples(AclDataKind::Ip6),
            AttrKind::IpAddress => vec![
                ip(AddrFamily::Ipv4, "0.0.0.0"),
                ip(AddrFamily::Ipv4, "255.255.255.255"),
                ip(AddrFamily::Ipv6, "fe80::1"),
            ],
            AttrKind::IpPrefix => vec![
                prefix(AddrFamily::Ipv4, "10.0.0.0", "255.0.0.0"),
                prefix(AddrFamily::Ipv4, "0.0.0.0", "0.0.0.0"),
                prefix(AddrFamily::Ipv6, "2001:db8::", "ffff:ffff::"),
            ],
            AttrKind::Oid => vec![
                WireValue::Oid(0),
                WireValue::Oid(-1),
                WireValue::Oid(i64::MAX),
            ],
            AttrKind::CharData => vec![
                WireValue::CharData(String::new()),
                WireValue::CharData("x".repeat(HOSTIF_NAME_SIZE - 1)),
            ],
            AttrKind::ObjList => {
                vec![WireValue::ObjList(vec![]), WireValue::ObjList(vec![1, -1])]
            }
            AttrKind::U8List => {
                vec![WireValue::U8List(vec![]), WireValue::U8List(vec![0, u8::MAX])]
            }
            AttrKind::S32List => vec![
                WireValue::S32List(vec![]),
                WireValue::S32List(vec![i32::MIN, i32::MAX]),
            ],
            AttrKind::U32List => vec![
                WireValue::U32List(vec![]),
                WireValue::U32List(vec![0, u32::MAX]),
            ],
            AttrKind::QosMapList => vec![
                WireValue::QosMap(vec![]),
                WireValue::QosMap(vec![WireQosMapEntry {
                    key: WireQosMapParams {
                        dscp: 63,
                        color: -1,
                        ..Default::default()
                    },
                    value: WireQosMapParams {
                        tc: u8::MAX,
                        queue_index: 7,
                        ..Default::default()
                    },
                }]),
            ],
            AttrKind::AclField(data) => acl_samples(data)
                .into_iter()
                .flat_map(|value| {
                    [
                        WireValue::AclField(WireAclField {
                            enable: true,
                            data: Box::new(value.clone()),
                            mask: Some(Box::new(value.clone())),
                        }),
                        WireValue::AclField(WireAclField {
                            enable: false,
                            data: Box::new(value),
                            mask: None,
                        }),
                    ]
                })
                .collect(),
            AttrKind::AclAction(data) => acl_samples(data)
                .into_iter()
                .map(|value| {
                    WireValue::AclAction(WireAclAction {
                        enable: true,
                        parameter: Box::new(value),
                    })
                })
                .collect(),
            AttrKind::SysPortConfig => vec![
                WireValue::SysPortConfig(WireSystemPortConfig::default()),
                WireValue::SysPortConfig(WireSystemPortConfig {
                    port_id: u32::MAX,
                    attached_switch_id: 1,
                    attached_core_index: 2,
                    attached_core_port_index: 3,
                    speed: 400_000,
                    num_voq: 8,
                }),
            ],
        }
    }

    #[test]
    fn test_every_declared_attribute_round_trips() {
        let registry = SchemaRegistry::new();
        let mut checked = 0;
        for object_type in ObjectType::ALL {
            for schema in registry.attributes(*object_type) {
                for value in samples(schema.kind) {
                    let attr = WireAttribute::new(schema.id, value);
                    assert_eq!(
                        round_trip(*object_type, attr.clone()),
                        attr,
                        "{} {}",
                        object_type,
                        schema.name
                    );
                    checked += 1;
                }
            }
        }
        assert!(checked >= registry.len() * 2);
    }

    #[test]
    fn test_prepare_get_sizes_lists() {
        let codec = codec(UnsupportedPolicy::Skip);
        let prepared = codec
            .prepare_get(
                ObjectType::Port,
                &[(ids::port::QOS_QUEUE_LIST, 8), (ids::port::MTU, 0)],
            )
            .unwrap();
        match &prepared.attrs()[0].value {
            AttrValue::ObjList(list) => assert_eq!(list.capacity(), 8),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(prepared.attrs()[1].value, AttrValue::U32(0));
    }

    #[test]
    fn test_prepare_get_reports_exhausted_buffer() {
        let codec = codec(UnsupportedPolicy::Skip);
        let requested = u32::MAX as usize + 1;
        let err = codec
            .prepare_get(ObjectType::Port, &[(ids::port::QOS_QUEUE_LIST, requested)])
            .unwrap_err();
        assert_eq!(
            err,
            SaiError::ResourceExhausted {
                attr_id: ids::port::QOS_QUEUE_LIST,
                requested,
            }
        );
        assert_eq!(err.status(), SaiStatus::NO_MEMORY);
    }

    #[test]
    fn test_prepare_get_caps_list_capacity() {
        let codec = codec(UnsupportedPolicy::Skip);
        let prepared = codec
            .prepare_get(ObjectType::Lag, &[(ids::lag::PORT_LIST, MAX_LIST_CAPACITY)])
            .unwrap();
        assert_eq!(prepared.len(), 1);

        let err = codec
            .prepare_get(ObjectType::Lag, &[(ids::lag::PORT_LIST, 50_000_000)])
            .unwrap_err();
        assert_eq!(
            err,
            SaiError::ResourceExhausted {
                attr_id: ids::lag::PORT_LIST,
                requested: 50_000_000,
            }
        );
    }

    #[test]
    fn test_decode_short_circuits_on_failure() {
        let codec = codec(UnsupportedPolicy::Skip);
        let attrs = vec![Attribute::new(ids::port::MTU, AttrValue::U32(9100))];
        let err = codec
            .decode(ObjectType::Port, SaiStatus::FAILURE, &attrs)
            .unwrap_err();
        assert_eq!(err, SaiError::driver(SaiStatus::FAILURE));
    }

    #[test]
    fn test_decode_rejects_native_kind_mismatch() {
        let codec = codec(UnsupportedPolicy::Skip);
        let attrs = vec![Attribute::new(ids::port::MTU, AttrValue::Bool(true))];
        let err = codec
            .decode(ObjectType::Port, SaiStatus::SUCCESS, &attrs)
            .unwrap_err();
        assert!(matches!(err, SaiError::InvalidValue { .. }));
    }

    #[test]
    fn test_entry_keys() {
        let switch_id = ObjectId::from_raw(1);
        let key = route_entry_key(
            switch_id,
            &WireRouteEntry {
                vr_id: 5,
                destination: WireIpPrefix {
                    family: AddrFamily::Ipv4,
                    addr: "10.0.0.0".into(),
                    mask: "255.0.0.0".into(),
                },
            },
        )
        .unwrap();
        let EntryKey::Route(route) = key else {
            panic!("expected route key");
        };
        assert_eq!(route.destination.prefix_len(), Some(8));

        let err = fdb_entry_key(
            switch_id,
            &WireFdbEntry {
                mac: "not-a-mac".into(),
                bv_id: 1,
            },
        )
        .unwrap_err();
        assert_eq!(err.status(), SaiStatus::INVALID_PARAMETER);
    }

    #[test]
    fn test_policy_parse() {
        assert_eq!("Strict".parse::<UnsupportedPolicy>(), Ok(UnsupportedPolicy::Strict));
        assert!("maybe".parse::<UnsupportedPolicy>().is_err());
        assert_eq!(UnsupportedPolicy::default(), UnsupportedPolicy::Skip);
    }
}
