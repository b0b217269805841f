//! SAI status codes and the error taxonomy of the RPC server.
//!
//! Driver calls report a raw [`SaiStatus`]. The server wraps failures into
//! [`SaiError`], which keeps the category of the failure (capability
//! unavailable, unsupported attribute, resource exhausted, driver rejection,
//! invalid wire value) while still being able to report the status code the
//! RPC caller receives.

use crate::api::SaiApi;
use crate::attr::AttrId;
use crate::types::ObjectType;
use std::fmt;
use thiserror::Error;

/// A SAI status code (`sai_status_t`).
///
/// Unlike a closed enum this keeps any raw value intact, so a status the
/// server does not know by name still reaches the RPC caller unchanged.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SaiStatus(i32);

impl SaiStatus {
    pub const SUCCESS: Self = SaiStatus(0);
    pub const FAILURE: Self = SaiStatus(-1);
    pub const NOT_SUPPORTED: Self = SaiStatus(-2);
    pub const NO_MEMORY: Self = SaiStatus(-3);
    pub const INSUFFICIENT_RESOURCES: Self = SaiStatus(-4);
    pub const INVALID_PARAMETER: Self = SaiStatus(-5);
    pub const ITEM_ALREADY_EXISTS: Self = SaiStatus(-6);
    pub const ITEM_NOT_FOUND: Self = SaiStatus(-7);
    pub const BUFFER_OVERFLOW: Self = SaiStatus(-8);
    pub const INVALID_PORT_NUMBER: Self = SaiStatus(-9);
    pub const INVALID_PORT_MEMBER: Self = SaiStatus(-10);
    pub const INVALID_VLAN_ID: Self = SaiStatus(-11);
    pub const UNINITIALIZED: Self = SaiStatus(-12);
    pub const TABLE_FULL: Self = SaiStatus(-13);
    pub const MANDATORY_ATTRIBUTE_MISSING: Self = SaiStatus(-14);
    pub const NOT_IMPLEMENTED: Self = SaiStatus(-15);
    pub const ADDR_NOT_FOUND: Self = SaiStatus(-16);
    pub const OBJECT_IN_USE: Self = SaiStatus(-17);
    pub const INVALID_OBJECT_TYPE: Self = SaiStatus(-18);
    pub const INVALID_OBJECT_ID: Self = SaiStatus(-19);
    pub const NOT_EXECUTED: Self = SaiStatus(-23);

    /// Bases of the attribute-indexed ranges. The attribute index is
    /// subtracted from the base, so `INVALID_ATTRIBUTE_0 - 1` names the
    /// attribute at index 1.
    pub const INVALID_ATTRIBUTE_0: Self = SaiStatus(0xFFFF_0000_u32 as i32);
    pub const INVALID_ATTR_VALUE_0: Self = SaiStatus(0xFFFE_0000_u32 as i32);
    pub const ATTR_NOT_IMPLEMENTED_0: Self = SaiStatus(0xFFFD_0000_u32 as i32);
    pub const UNKNOWN_ATTRIBUTE_0: Self = SaiStatus(0xFFFC_0000_u32 as i32);
    pub const ATTR_NOT_SUPPORTED_0: Self = SaiStatus(0xFFFB_0000_u32 as i32);

    const ATTR_RANGE_SIZE: i32 = 0x1_0000;

    /// Wraps a raw status code.
    pub const fn from_raw(status: i32) -> Self {
        SaiStatus(status)
    }

    pub const fn as_raw(&self) -> i32 {
        self.0
    }

    pub const fn is_success(&self) -> bool {
        self.0 == 0
    }

    /// `INVALID_ATTRIBUTE_0 - index`.
    pub fn invalid_attribute(index: usize) -> Self {
        Self::attr_indexed(Self::INVALID_ATTRIBUTE_0, index)
    }

    /// `INVALID_ATTR_VALUE_0 - index`.
    pub fn invalid_attr_value(index: usize) -> Self {
        Self::attr_indexed(Self::INVALID_ATTR_VALUE_0, index)
    }

    /// `ATTR_NOT_SUPPORTED_0 - index`.
    pub fn attr_not_supported(index: usize) -> Self {
        Self::attr_indexed(Self::ATTR_NOT_SUPPORTED_0, index)
    }

    fn attr_indexed(base: Self, index: usize) -> Self {
        let index = i32::try_from(index)
            .unwrap_or(Self::ATTR_RANGE_SIZE - 1)
            .min(Self::ATTR_RANGE_SIZE - 1);
        SaiStatus(base.0 - index)
    }

    /// Converts to a Result, returning Ok(()) for success.
    pub fn into_result(self) -> Result<(), SaiStatus> {
        if self.is_success() {
            Ok(())
        } else {
            Err(self)
        }
    }

    fn name(&self) -> Option<&'static str> {
        let name = match *self {
            Self::SUCCESS => "SAI_STATUS_SUCCESS",
            Self::FAILURE => "SAI_STATUS_FAILURE",
            Self::NOT_SUPPORTED => "SAI_STATUS_NOT_SUPPORTED",
            Self::NO_MEMORY => "SAI_STATUS_NO_MEMORY",
            Self::INSUFFICIENT_RESOURCES => "SAI_STATUS_INSUFFICIENT_RESOURCES",
            Self::INVALID_PARAMETER => "SAI_STATUS_INVALID_PARAMETER",
            Self::ITEM_ALREADY_EXISTS => "SAI_STATUS_ITEM_ALREADY_EXISTS",
            Self::ITEM_NOT_FOUND => "SAI_STATUS_ITEM_NOT_FOUND",
            Self::BUFFER_OVERFLOW => "SAI_STATUS_BUFFER_OVERFLOW",
            Self::INVALID_PORT_NUMBER => "SAI_STATUS_INVALID_PORT_NUMBER",
            Self::INVALID_PORT_MEMBER => "SAI_STATUS_INVALID_PORT_MEMBER",
            Self::INVALID_VLAN_ID => "SAI_STATUS_INVALID_VLAN_ID",
            Self::UNINITIALIZED => "SAI_STATUS_UNINITIALIZED",
            Self::TABLE_FULL => "SAI_STATUS_TABLE_FULL",
            Self::MANDATORY_ATTRIBUTE_MISSING => "SAI_STATUS_MANDATORY_ATTRIBUTE_MISSING",
            Self::NOT_IMPLEMENTED => "SAI_STATUS_NOT_IMPLEMENTED",
            Self::ADDR_NOT_FOUND => "SAI_STATUS_ADDR_NOT_FOUND",
            Self::OBJECT_IN_USE => "SAI_STATUS_OBJECT_IN_USE",
            Self::INVALID_OBJECT_TYPE => "SAI_STATUS_INVALID_OBJECT_TYPE",
            Self::INVALID_OBJECT_ID => "SAI_STATUS_INVALID_OBJECT_ID",
            Self::NOT_EXECUTED => "SAI_STATUS_NOT_EXECUTED",
            _ => return None,
        };
        Some(name)
    }

    fn attr_range(&self) -> Option<(&'static str, i32)> {
        let ranges = [
            (Self::INVALID_ATTRIBUTE_0, "SAI_STATUS_INVALID_ATTRIBUTE"),
            (Self::INVALID_ATTR_VALUE_0, "SAI_STATUS_INVALID_ATTR_VALUE"),
            (Self::ATTR_NOT_IMPLEMENTED_0, "SAI_STATUS_ATTR_NOT_IMPLEMENTED"),
            (Self::UNKNOWN_ATTRIBUTE_0, "SAI_STATUS_UNKNOWN_ATTRIBUTE"),
            (Self::ATTR_NOT_SUPPORTED_0, "SAI_STATUS_ATTR_NOT_SUPPORTED"),
        ];
        ranges.into_iter().find_map(|(base, name)| {
            let offset = base.0.wrapping_sub(self.0);
            (0..Self::ATTR_RANGE_SIZE)
                .contains(&offset)
                .then_some((name, offset))
        })
    }
}

impl Default for SaiStatus {
    fn default() -> Self {
        Self::SUCCESS
    }
}

impl fmt::Display for SaiStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = self.name() {
            return f.write_str(name);
        }
        if let Some((name, index)) = self.attr_range() {
            return write!(f, "{}_{}", name, index);
        }
        write!(f, "SAI_STATUS({})", self.0)
    }
}

impl fmt::Debug for SaiStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self, self.0)
    }
}

impl From<i32> for SaiStatus {
    fn from(raw: i32) -> Self {
        SaiStatus(raw)
    }
}

/// Error type for server operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SaiError {
    /// The driver could not provide the API table for a subsystem.
    #[error("{api} unavailable: {status}")]
    ApiUnavailable { api: SaiApi, status: SaiStatus },

    /// The attribute id is not known for the object type.
    #[error("attribute {attr_id} not supported for {object_type} (index {index})")]
    UnsupportedAttribute {
        object_type: ObjectType,
        attr_id: AttrId,
        index: usize,
    },

    /// A list buffer for the attribute could not be allocated.
    #[error("cannot allocate {requested} list elements for attribute {attr_id}")]
    ResourceExhausted { attr_id: AttrId, requested: usize },

    /// The native driver call returned a failure status.
    #[error("driver rejected the call: {status}")]
    Driver { status: SaiStatus },

    /// The wire value does not fit the schema kind of the attribute.
    #[error("invalid value for attribute {attr_id} (index {index}): {reason}")]
    InvalidValue {
        attr_id: AttrId,
        index: usize,
        reason: String,
    },

    /// An entry key (FDB, route or neighbor) could not be parsed.
    #[error("invalid entry key: {reason}")]
    InvalidKey { reason: String },
}

impl SaiError {
    pub fn driver(status: SaiStatus) -> Self {
        SaiError::Driver { status }
    }

    pub fn invalid_value(attr_id: AttrId, index: usize, reason: impl Into<String>) -> Self {
        SaiError::InvalidValue {
            attr_id,
            index,
            reason: reason.into(),
        }
    }

    pub fn invalid_key(reason: impl Into<String>) -> Self {
        SaiError::InvalidKey {
            reason: reason.into(),
        }
    }

    /// The status code reported to the RPC caller for this error.
    pub fn status(&self) -> SaiStatus {
        match self {
            SaiError::ApiUnavailable { status, .. } => *status,
            SaiError::UnsupportedAttribute { index, .. } => SaiStatus::attr_not_supported(*index),
            SaiError::ResourceExhausted { .. } => SaiStatus::NO_MEMORY,
            SaiError::Driver { status } => *status,
            SaiError::InvalidValue { index, .. } => SaiStatus::invalid_attr_value(*index),
            SaiError::InvalidKey { .. } => SaiStatus::INVALID_PARAMETER,
        }
    }
}

impl From<SaiStatus> for SaiError {
    fn from(status: SaiStatus) -> Self {
        SaiError::Driver { status }
    }
}

/// Result type for server operations.
pub type SaiResult<T> = Result<T, SaiError>;
