//! Native attribute values.
//!
//! [`AttrValue`] is the Rust counterpart of `sai_attribute_value_t`: a closed
//! set of variants, one per primitive kind. List-valued attributes carry a
//! [`NativeList`], which owns its buffer. Dropping the attribute releases the
//! buffer, so list storage lives exactly as long as the attribute array that
//! was handed to the driver.

use crate::error::SaiStatus;
use crate::types::ObjectId;
use sai_types::{IpAddress, IpPrefix, MacAddress};
use std::net::{Ipv4Addr, Ipv6Addr};

/// Attribute identifier, scoped to an object type.
pub type AttrId = u32;

/// Statistic counter identifier, scoped to an object type.
pub type StatId = u32;

/// Size of the fixed character buffer used for host interface names.
pub const HOSTIF_NAME_SIZE: usize = 32;

/// A list buffer could not be allocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListAllocError {
    pub requested: usize,
}

/// A caller-owned list buffer with an explicit element count.
///
/// `count` starts equal to the allocated capacity. A driver filling the
/// list sets `count` to the number of valid elements; if the buffer is too
/// small it sets `count` to the required length and fails with
/// `SAI_STATUS_BUFFER_OVERFLOW`, leaving the buffer untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeList<T> {
    buf: Vec<T>,
    count: u32,
}

impl<T: Clone + Default> NativeList<T> {
    /// Allocates a zero-filled buffer of `len` elements.
    ///
    /// Allocation failure is reported instead of aborting the process.
    pub fn with_len(len: usize) -> Result<Self, ListAllocError> {
        let count = u32::try_from(len).map_err(|_| ListAllocError { requested: len })?;
        let mut buf = Vec::new();
        buf.try_reserve_exact(len)
            .map_err(|_| ListAllocError { requested: len })?;
        buf.resize(len, T::default());
        Ok(NativeList { buf, count })
    }

    /// Allocates a buffer holding a copy of `items`.
    pub fn from_slice(items: &[T]) -> Result<Self, ListAllocError> {
        let mut list = Self::with_len(items.len())?;
        list.buf.clone_from_slice(items);
        Ok(list)
    }

    /// Copies `items` into the buffer (driver side of a read).
    pub fn fill_from(&mut self, items: &[T]) -> Result<(), SaiStatus> {
        let needed = u32::try_from(items.len()).map_err(|_| SaiStatus::BUFFER_OVERFLOW)?;
        if items.len() > self.buf.len() {
            self.count = needed;
            return Err(SaiStatus::BUFFER_OVERFLOW);
        }
        self.buf[..items.len()].clone_from_slice(items);
        self.count = needed;
        Ok(())
    }
}

impl<T> NativeList<T> {
    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// The valid elements: the first `count`, bounded by the buffer.
    pub fn as_slice(&self) -> &[T] {
        let len = (self.count as usize).min(self.buf.len());
        &self.buf[..len]
    }
}

/// QoS map key or value fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QosMapParams {
    pub tc: u8,
    pub dscp: u8,
    pub dot1p: u8,
    pub prio: u8,
    pub pg: u8,
    pub queue_index: u8,
    pub color: i32,
}

/// One QoS map entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QosMapEntry {
    pub key: QosMapParams,
    pub value: QosMapParams,
}

/// System port configuration (`sai_system_port_config_t`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemPortConfig {
    pub port_id: u32,
    pub attached_switch_id: u32,
    pub attached_core_index: u32,
    pub attached_core_port_index: u32,
    pub speed: u32,
    pub num_voq: u32,
}

/// Data carried by an ACL field match or an ACL action parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum AclData {
    U8(u8),
    U16(u16),
    U32(u32),
    S32(i32),
    Mac(MacAddress),
    Ip4(Ipv4Addr),
    Ip6(Ipv6Addr),
    Oid(ObjectId),
    ObjList(NativeList<ObjectId>),
}

/// ACL field match: data plus optional mask.
#[derive(Debug, Clone, PartialEq)]
pub struct AclField {
    pub enable: bool,
    pub data: AclData,
    pub mask: Option<AclData>,
}

/// ACL action with its parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct AclAction {
    pub enable: bool,
    pub parameter: AclData,
}

/// A native attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Bool(bool),
    U8(u8),
    S8(i8),
    U16(u16),
    S16(i16),
    U32(u32),
    S32(i32),
    U64(u64),
    S64(i64),
    Mac(MacAddress),
    Ip4(Ipv4Addr),
    Ip6(Ipv6Addr),
    IpAddress(IpAddress),
    IpPrefix(IpPrefix),
    Oid(ObjectId),
    CharData([u8; HOSTIF_NAME_SIZE]),
    ObjList(NativeList<ObjectId>),
    U8List(NativeList<u8>),
    S32List(NativeList<i32>),
    U32List(NativeList<u32>),
    QosMapList(NativeList<QosMapEntry>),
    AclField(AclField),
    AclAction(AclAction),
    SysPortConfig(SystemPortConfig),
}

impl AttrValue {
    /// True for the variants backed by a [`NativeList`].
    pub fn is_list(&self) -> bool {
        matches!(
            self,
            AttrValue::ObjList(_)
                | AttrValue::U8List(_)
                | AttrValue::S32List(_)
                | AttrValue::U32List(_)
                | AttrValue::QosMapList(_)
        )
    }

    /// The element count of a list variant; after a `BUFFER_OVERFLOW` this
    /// is the length the driver needs.
    pub fn list_count(&self) -> Option<u32> {
        match self {
            AttrValue::ObjList(list) => Some(list.count()),
            AttrValue::U8List(list) => Some(list.count()),
            AttrValue::S32List(list) => Some(list.count()),
            AttrValue::U32List(list) => Some(list.count()),
            AttrValue::QosMapList(list) => Some(list.count()),
            _ => None,
        }
    }

    /// Short name of the variant, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            AttrValue::Bool(_) => "bool",
            AttrValue::U8(_) => "u8",
            AttrValue::S8(_) => "s8",
            AttrValue::U16(_) => "u16",
            AttrValue::S16(_) => "s16",
            AttrValue::U32(_) => "u32",
            AttrValue::S32(_) => "s32",
            AttrValue::U64(_) => "u64",
            AttrValue::S64(_) => "s64",
            AttrValue::Mac(_) => "mac",
            AttrValue::Ip4(_) => "ip4",
            AttrValue::Ip6(_) => "ip6",
            AttrValue::IpAddress(_) => "ipaddr",
            AttrValue::IpPrefix(_) => "ipprefix",
            AttrValue::Oid(_) => "oid",
            AttrValue::CharData(_) => "chardata",
            AttrValue::ObjList(_) => "objlist",
            AttrValue::U8List(_) => "u8list",
            AttrValue::S32List(_) => "s32list",
            AttrValue::U32List(_) => "u32list",
            AttrValue::QosMapList(_) => "qosmap",
            AttrValue::AclField(_) => "aclfield",
            AttrValue::AclAction(_) => "aclaction",
            AttrValue::SysPortConfig(_) => "sysportconfig",
        }
    }
}

/// A native attribute (`sai_attribute_t`).
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub id: AttrId,
    pub value: AttrValue,
}

impl Attribute {
    pub fn new(id: AttrId, value: AttrValue) -> Self {
        Attribute { id, value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_with_len_is_presized() {
        let list: NativeList<u32> = NativeList::with_len(8).unwrap();
        assert_eq!(list.count(), 8);
        assert_eq!(list.capacity(), 8);
        assert_eq!(list.as_slice(), &[0; 8]);
    }

    #[test]
    fn test_with_len_reports_oversized_request() {
        let requested = u32::MAX as usize + 1;
        let err = NativeList::<u64>::with_len(requested).unwrap_err();
        assert_eq!(err, ListAllocError { requested });
    }

    #[test]
    fn test_fill_from_sets_count() {
        let mut list: NativeList<u32> = NativeList::with_len(8).unwrap();
        list.fill_from(&[1, 2, 3]).unwrap();
        assert_eq!(list.count(), 3);
        assert_eq!(list.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn test_fill_from_overflow_reports_needed_count() {
        let mut list: NativeList<u32> = NativeList::with_len(2).unwrap();
        assert_eq!(list.fill_from(&[1, 2, 3]), Err(SaiStatus::BUFFER_OVERFLOW));
        assert_eq!(list.count(), 3);
        assert_eq!(list.capacity(), 2);
        // Count beyond capacity never exposes elements past the buffer.
        assert_eq!(list.as_slice(), &[0, 0]);
    }

    #[test]
    fn test_empty_list() {
        let list: NativeList<ObjectId> = NativeList::from_slice(&[]).unwrap();
        assert_eq!(list.count(), 0);
        assert!(list.as_slice().is_empty());
    }

    #[test]
    fn test_kind_name() {
        assert_eq!(AttrValue::Bool(true).kind_name(), "bool");
        let list = NativeList::from_slice(&[ObjectId::from_raw(1)]).unwrap();
        assert_eq!(AttrValue::ObjList(list).kind_name(), "objlist");
    }

    #[test]
    fn test_list_count() {
        let mut list: NativeList<u32> = NativeList::with_len(1).unwrap();
        let _ = list.fill_from(&[1, 2, 3, 4]);
        assert_eq!(AttrValue::U32List(list).list_count(), Some(4));
        assert_eq!(AttrValue::U32(4).list_count(), None);
    }
}
