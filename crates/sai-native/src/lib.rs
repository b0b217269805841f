//! Native SAI object model for the SAI RPC server.
//!
//! This crate describes the vendor side of the server: the driver's status
//! codes, object handles and entry keys, the fixed-layout attribute values
//! with caller-owned list buffers, and the [`SaiDriver`] trait every vendor
//! binding implements.
//!
//! # Architecture
//!
//! - [`types`]: object handles, object types and entry keys
//! - [`attr`]: native attribute values and [`NativeList`] buffers
//! - [`ids`]: attribute identifiers and enum values per object type
//! - [`error`]: [`SaiStatus`] and the server error taxonomy
//! - [`driver`]: the driver and notification traits
//! - [`memory`]: [`MemoryDriver`], an in-memory driver
//!
//! # Example
//!
//! ```
//! use sai_native::{ids, AttrValue, Attribute, MemoryDriver, ObjectId, ObjectType, SaiDriver};
//!
//! let driver = MemoryDriver::default();
//! let switch_id = driver
//!     .create_object(
//!         ObjectType::Switch,
//!         ObjectId::NULL,
//!         &[Attribute::new(ids::switch::INIT_SWITCH, AttrValue::Bool(true))],
//!     )
//!     .unwrap();
//! assert!(!switch_id.is_null());
//! ```

pub mod api;
pub mod attr;
pub mod driver;
pub mod error;
pub mod ids;
pub mod memory;
pub mod types;

pub use api::SaiApi;
pub use attr::{
    AclAction, AclData, AclField, AttrId, AttrValue, Attribute, ListAllocError, NativeList,
    QosMapEntry, QosMapParams, StatId, SystemPortConfig, HOSTIF_NAME_SIZE,
};
pub use driver::{
    DriverResult, FdbEvent, FdbEventNotification, PortOperStatus, PortOperStatusNotification,
    ProfileCursor, ProfileServices, SaiDriver, SwitchNotifications,
};
pub use error::{SaiError, SaiResult, SaiStatus};
pub use memory::{MemoryDriver, MemoryDriverConfig};
pub use types::{
    EntryKey, FdbEntryKey, NeighborEntryKey, ObjectId, ObjectKey, ObjectType, RawObjectId,
    RouteEntryKey,
};
