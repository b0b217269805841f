//! Attribute schema registry.
//!
//! Maps `(object type, attribute id)` to the primitive kind of the value.
//! The kind decides how a wire value is converted; the tag the client put
//! on the wire value is only checked against it, never trusted instead of
//! it. An id missing from the table is unsupported, reported as `None`.

mod tables;

use sai_native::{AttrId, ObjectType};
use std::collections::HashMap;
use std::fmt;

/// Kind of the data inside an ACL field or action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AclDataKind {
    U8,
    U16,
    U32,
    S32,
    Mac,
    Ip4,
    Ip6,
    Oid,
    ObjList,
}

/// Primitive kind of an attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttrKind {
    Bool,
    U8,
    S8,
    U16,
    S16,
    U32,
    S32,
    U64,
    S64,
    Mac,
    Ip4,
    Ip6,
    IpAddress,
    IpPrefix,
    Oid,
    CharData,
    ObjList,
    U8List,
    S32List,
    U32List,
    QosMapList,
    AclField(AclDataKind),
    AclAction(AclDataKind),
    SysPortConfig,
}

impl AttrKind {
    /// True when reading the attribute needs a pre-sized list buffer.
    pub const fn is_list(&self) -> bool {
        matches!(
            self,
            AttrKind::ObjList
                | AttrKind::U8List
                | AttrKind::S32List
                | AttrKind::U32List
                | AttrKind::QosMapList
        )
    }
}

impl fmt::Display for AttrKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrKind::AclField(data) => write!(f, "aclfield({:?})", data),
            AttrKind::AclAction(data) => write!(f, "aclaction({:?})", data),
            other => write!(f, "{:?}", other),
        }
    }
}

/// Schema entry of one attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttrSchema {
    pub id: AttrId,
    pub name: &'static str,
    pub kind: AttrKind,
}

/// Immutable lookup table over every object type the server marshals.
///
/// Built once and shared; lookups need no synchronization.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    index: HashMap<(ObjectType, AttrId), AttrSchema>,
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaRegistry {
    pub fn new() -> Self {
        let index = tables::TABLES
            .iter()
            .flat_map(|(object_type, attrs)| {
                attrs
                    .iter()
                    .map(move |schema| ((*object_type, schema.id), *schema))
            })
            .collect();
        SchemaRegistry { index }
    }

    /// Looks up an attribute; `None` means unsupported.
    pub fn lookup(&self, object_type: ObjectType, attr_id: AttrId) -> Option<&AttrSchema> {
        self.index.get(&(object_type, attr_id))
    }

    /// True when the registry has a table for `object_type`.
    #[cfg(test)]
    pub(crate) fn has_object_type(&self, object_type: ObjectType) -> bool {
        tables::TABLES.iter().any(|(t, _)| *t == object_type)
    }

    /// Every attribute declared for `object_type`, in declaration order.
    #[cfg(test)]
    pub(crate) fn attributes(&self, object_type: ObjectType) -> &'static [AttrSchema] {
        tables::TABLES
            .iter()
            .find(|(t, _)| *t == object_type)
            .map(|(_, attrs)| *attrs)
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sai_native::ids;
    use std::collections::HashSet;

    #[test]
    fn test_lookup_known_attribute() {
        let registry = SchemaRegistry::new();
        let schema = registry
            .lookup(ObjectType::Port, ids::port::ADMIN_STATE)
            .unwrap();
        assert_eq!(schema.kind, AttrKind::Bool);
        assert_eq!(schema.name, "SAI_PORT_ATTR_ADMIN_STATE");
    }

    #[test]
    fn test_lookup_unknown_attribute_is_none() {
        let registry = SchemaRegistry::new();
        assert!(registry.lookup(ObjectType::Port, 9999).is_none());
        // Same id, object type without that many attributes.
        assert!(registry
            .lookup(ObjectType::Stp, ids::port::PKT_TX_ENABLE)
            .is_none());
    }

    #[test]
    fn test_same_id_differs_per_object_type() {
        let registry = SchemaRegistry::new();
        let vlan = registry.lookup(ObjectType::Vlan, ids::vlan::VLAN_ID).unwrap();
        let member = registry
            .lookup(ObjectType::VlanMember, ids::vlan_member::VLAN_ID)
            .unwrap();
        assert_eq!(vlan.kind, AttrKind::U16);
        assert_eq!(member.kind, AttrKind::Oid);
    }

    #[test]
    fn test_tables_have_unique_ids() {
        for (object_type, attrs) in tables::TABLES {
            let unique: HashSet<_> = attrs.iter().map(|a| a.id).collect();
            assert_eq!(unique.len(), attrs.len(), "{}", object_type);
        }
        let types: HashSet<_> = tables::TABLES.iter().map(|(t, _)| *t).collect();
        assert_eq!(types.len(), tables::TABLES.len());
    }

    #[test]
    fn test_every_object_type_has_a_table() {
        let registry = SchemaRegistry::new();
        for object_type in ObjectType::ALL {
            assert!(registry.has_object_type(*object_type), "{}", object_type);
            assert!(!registry.attributes(*object_type).is_empty(), "{}", object_type);
        }
    }

    #[test]
    fn test_list_kinds() {
        let registry = SchemaRegistry::new();
        let lanes = registry
            .lookup(ObjectType::Port, ids::port::HW_LANE_LIST)
            .unwrap();
        assert!(lanes.kind.is_list());
        let acl = registry
            .lookup(ObjectType::AclEntry, ids::acl_entry::FIELD_IN_PORTS)
            .unwrap();
        assert_eq!(acl.kind, AttrKind::AclField(AclDataKind::ObjList));
        assert!(!acl.kind.is_list());
    }
}
