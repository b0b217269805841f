//! RPC operation handlers.
//!
//! Every handler is the same composition: confirm the API table, encode
//! through the codec, make one driver call, decode. Driver statuses pass
//! through unchanged and nothing is retried, except where a list read is
//! documented to re-size once on `BUFFER_OVERFLOW`.
//!
//! Handlers are synchronous; the transport calls them from any thread.

pub mod dispatch;
mod fdb;
pub mod objects;
mod stats;
mod switch;

pub use dispatch::{dispatch, DispatchError, Request, Response};
pub use fdb::WireFdbRecord;
pub use objects::{ObjectMethods, Verb, OBJECT_METHODS};
pub use stats::stats_object_type;

use crate::codec::wire::WireAttribute;
use crate::codec::AttributeCodec;
use crate::context::SwitchContext;
use log::{debug, error};
use sai_native::{
    AttrId, AttrValue, EntryKey, ObjectId, ObjectKey, ObjectType, SaiDriver, SaiError,
    SaiResult, SaiStatus,
};
use serde::{Serialize, Serializer};
use std::sync::Arc;

/// List capacity used when a caller does not size a list read.
pub const DEFAULT_LIST_CAPACITY: usize = 128;

fn serialize_status<S: Serializer>(status: &SaiStatus, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_i32(status.as_raw())
}

/// Decoded attributes of a read.
///
/// A read that fails part way returns what was decoded before the failure
/// with `complete = false` and the failing status.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeListResult {
    #[serde(serialize_with = "serialize_status")]
    pub status: SaiStatus,
    pub attributes: Vec<WireAttribute>,
    pub complete: bool,
}

impl AttributeListResult {
    pub fn complete(attributes: Vec<WireAttribute>) -> Self {
        Self {
            status: SaiStatus::SUCCESS,
            attributes,
            complete: true,
        }
    }

    pub fn partial(attributes: Vec<WireAttribute>, status: SaiStatus) -> Self {
        Self {
            status,
            attributes,
            complete: false,
        }
    }

    pub fn failed(status: SaiStatus) -> Self {
        Self::partial(Vec::new(), status)
    }

    fn from_steps(attributes: Vec<WireAttribute>, outcome: SaiResult<()>) -> Self {
        match outcome {
            Ok(()) => Self::complete(attributes),
            Err(e) => {
                error!("Read stopped after {} attributes: {}", attributes.len(), e);
                Self::partial(attributes, e.status())
            }
        }
    }
}

/// The handler surface over one switch.
#[derive(Clone)]
pub struct SaiRpc {
    context: Arc<SwitchContext>,
}

impl SaiRpc {
    pub fn new(context: Arc<SwitchContext>) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &SwitchContext {
        &self.context
    }

    fn driver(&self) -> &dyn SaiDriver {
        self.context.driver()
    }

    fn codec(&self) -> &AttributeCodec {
        self.context.codec()
    }

    /// Creates an object on the root switch.
    pub fn create_object(
        &self,
        object_type: ObjectType,
        attrs: &[WireAttribute],
    ) -> SaiResult<ObjectId> {
        debug!("create {} with {} attributes", object_type, attrs.len());
        self.context.api(object_type)?;
        let encoded = self.codec().encode(object_type, attrs)?;
        let oid = self
            .driver()
            .create_object(object_type, self.context.switch_id(), encoded.attrs())
            .map_err(|status| driver_failure("create", object_type, status))?;
        debug!("created {} {}", object_type, oid);
        Ok(oid)
    }

    pub fn create_entry(&self, key: &EntryKey, attrs: &[WireAttribute]) -> SaiResult<()> {
        let object_type = key.object_type();
        debug!("create {} with {} attributes", object_type, attrs.len());
        self.context.api(object_type)?;
        let encoded = self.codec().encode(object_type, attrs)?;
        self.driver()
            .create_entry(key, encoded.attrs())
            .map_err(|status| driver_failure("create", object_type, status))
    }

    pub fn remove_object(&self, object_type: ObjectType, oid: ObjectId) -> SaiResult<()> {
        debug!("remove {} {}", object_type, oid);
        self.context.api(object_type)?;
        self.driver()
            .remove(object_type, &ObjectKey::Oid(oid))
            .map_err(|status| driver_failure("remove", object_type, status))
    }

    pub fn remove_entry(&self, key: &EntryKey) -> SaiResult<()> {
        let object_type = key.object_type();
        debug!("remove {}", object_type);
        self.context.api(object_type)?;
        self.driver()
            .remove(object_type, &ObjectKey::Entry(*key))
            .map_err(|status| driver_failure("remove", object_type, status))
    }

    pub fn set_attribute(
        &self,
        object_type: ObjectType,
        key: &ObjectKey,
        attr: &WireAttribute,
    ) -> SaiResult<()> {
        debug!("set {} attribute {} on {}", object_type, attr.id, key);
        self.context.api(object_type)?;
        let native = self.codec().encode_one(object_type, attr)?;
        self.driver()
            .set_attribute(object_type, key, &native)
            .map_err(|status| driver_failure("set", object_type, status))
    }

    /// Reads `(attr id, list capacity)` pairs in one driver call.
    pub fn get_attributes(
        &self,
        object_type: ObjectType,
        key: &ObjectKey,
        requests: &[(AttrId, usize)],
    ) -> AttributeListResult {
        debug!("get {} attributes of {}", requests.len(), key);
        match self.read(object_type, key, requests) {
            Ok(attributes) => AttributeListResult::complete(attributes),
            Err(e) => {
                error!("get {} attributes failed: {}", object_type, e);
                AttributeListResult::failed(e.status())
            }
        }
    }

    fn read(
        &self,
        object_type: ObjectType,
        key: &ObjectKey,
        requests: &[(AttrId, usize)],
    ) -> SaiResult<Vec<WireAttribute>> {
        self.context.api(object_type)?;
        let mut encoded = self.codec().prepare_get(object_type, requests)?;
        let status = self
            .driver()
            .get_attributes(object_type, key, encoded.attrs_mut())
            .err()
            .unwrap_or(SaiStatus::SUCCESS);
        self.codec().decode(object_type, status, encoded.attrs())
    }

    /// Reads one attribute of an object and returns the native value.
    fn read_value(
        &self,
        object_type: ObjectType,
        oid: ObjectId,
        attr_id: AttrId,
        capacity: usize,
    ) -> SaiResult<AttrValue> {
        self.context.api(object_type)?;
        let mut encoded = self.codec().prepare_get(object_type, &[(attr_id, capacity)])?;
        self.driver()
            .get_attributes(object_type, &ObjectKey::Oid(oid), encoded.attrs_mut())
            .map_err(SaiError::driver)?;
        encoded
            .into_attrs()
            .pop()
            .map(|attr| attr.value)
            .ok_or(SaiError::UnsupportedAttribute {
                object_type,
                attr_id,
                index: 0,
            })
    }

    fn read_u32(&self, object_type: ObjectType, oid: ObjectId, attr_id: AttrId) -> SaiResult<u32> {
        match self.read_value(object_type, oid, attr_id, 0)? {
            AttrValue::U32(value) => Ok(value),
            other => Err(unexpected_kind(attr_id, "u32", &other)),
        }
    }

    fn read_s32(&self, object_type: ObjectType, oid: ObjectId, attr_id: AttrId) -> SaiResult<i32> {
        match self.read_value(object_type, oid, attr_id, 0)? {
            AttrValue::S32(value) => Ok(value),
            other => Err(unexpected_kind(attr_id, "s32", &other)),
        }
    }

    fn read_oid(
        &self,
        object_type: ObjectType,
        oid: ObjectId,
        attr_id: AttrId,
    ) -> SaiResult<ObjectId> {
        match self.read_value(object_type, oid, attr_id, 0)? {
            AttrValue::Oid(value) => Ok(value),
            other => Err(unexpected_kind(attr_id, "oid", &other)),
        }
    }

    fn read_oid_list(
        &self,
        object_type: ObjectType,
        oid: ObjectId,
        attr_id: AttrId,
        capacity: usize,
    ) -> SaiResult<Vec<ObjectId>> {
        match self.read_value(object_type, oid, attr_id, capacity)? {
            AttrValue::ObjList(list) => Ok(list.as_slice().to_vec()),
            other => Err(unexpected_kind(attr_id, "objlist", &other)),
        }
    }

    fn read_u32_list(
        &self,
        object_type: ObjectType,
        oid: ObjectId,
        attr_id: AttrId,
        capacity: usize,
    ) -> SaiResult<Vec<u32>> {
        match self.read_value(object_type, oid, attr_id, capacity)? {
            AttrValue::U32List(list) => Ok(list.as_slice().to_vec()),
            other => Err(unexpected_kind(attr_id, "u32list", &other)),
        }
    }
}

fn driver_failure(verb: &str, object_type: ObjectType, status: SaiStatus) -> SaiError {
    error!("Failed to {} {}: {}", verb, object_type, status);
    SaiError::driver(status)
}

fn unexpected_kind(attr_id: AttrId, expected: &str, found: &AttrValue) -> SaiError {
    SaiError::invalid_value(
        attr_id,
        0,
        format!("expected {}, driver returned {}", expected, found.kind_name()),
    )
}
