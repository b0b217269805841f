//! The native driver seam.
//!
//! [`SaiDriver`] is the boundary between the server and a vendor SAI
//! implementation. Every call returns the raw driver status on failure; the
//! server never remaps it. Asynchronous events flow the other way through
//! [`SwitchNotifications`], invoked from driver-owned threads.

use crate::api::SaiApi;
use crate::attr::{Attribute, StatId};
use crate::error::SaiStatus;
use crate::ids;
use crate::types::{EntryKey, FdbEntryKey, ObjectId, ObjectKey, ObjectType};
use std::sync::Arc;

/// Result of a native driver call.
pub type DriverResult<T> = Result<T, SaiStatus>;

/// FDB event kinds (`sai_fdb_event_t`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FdbEvent {
    Learned,
    Aged,
    Moved,
    Flushed,
}

impl FdbEvent {
    /// Maps a raw event value, `None` for values the server does not know.
    pub const fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            ids::fdb_entry::EVENT_LEARNED => Some(FdbEvent::Learned),
            ids::fdb_entry::EVENT_AGED => Some(FdbEvent::Aged),
            ids::fdb_entry::EVENT_MOVE => Some(FdbEvent::Moved),
            ids::fdb_entry::EVENT_FLUSHED => Some(FdbEvent::Flushed),
            _ => None,
        }
    }

    pub const fn as_raw(&self) -> i32 {
        match self {
            FdbEvent::Learned => ids::fdb_entry::EVENT_LEARNED,
            FdbEvent::Aged => ids::fdb_entry::EVENT_AGED,
            FdbEvent::Moved => ids::fdb_entry::EVENT_MOVE,
            FdbEvent::Flushed => ids::fdb_entry::EVENT_FLUSHED,
        }
    }
}

/// Port operational status (`sai_port_oper_status_t`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortOperStatus {
    Unknown,
    Up,
    Down,
    Testing,
    NotPresent,
}

impl PortOperStatus {
    pub const fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            ids::port::OPER_STATUS_UNKNOWN => Some(PortOperStatus::Unknown),
            ids::port::OPER_STATUS_UP => Some(PortOperStatus::Up),
            ids::port::OPER_STATUS_DOWN => Some(PortOperStatus::Down),
            ids::port::OPER_STATUS_TESTING => Some(PortOperStatus::Testing),
            ids::port::OPER_STATUS_NOT_PRESENT => Some(PortOperStatus::NotPresent),
            _ => None,
        }
    }

    pub const fn as_raw(&self) -> i32 {
        match self {
            PortOperStatus::Unknown => ids::port::OPER_STATUS_UNKNOWN,
            PortOperStatus::Up => ids::port::OPER_STATUS_UP,
            PortOperStatus::Down => ids::port::OPER_STATUS_DOWN,
            PortOperStatus::Testing => ids::port::OPER_STATUS_TESTING,
            PortOperStatus::NotPresent => ids::port::OPER_STATUS_NOT_PRESENT,
        }
    }
}

/// One record of an FDB event notification (`sai_fdb_event_notification_data_t`).
///
/// The event kind stays raw: a driver may send values the server does not
/// know, and those must be reported rather than rejected at this layer.
#[derive(Debug, Clone, PartialEq)]
pub struct FdbEventNotification {
    pub event_type: i32,
    pub fdb_entry: FdbEntryKey,
    pub attrs: Vec<Attribute>,
}

/// One record of a port state change notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortOperStatusNotification {
    pub port_id: ObjectId,
    pub port_state: i32,
}

/// Callbacks the driver invokes asynchronously.
///
/// Implementations run on a driver thread and must not block beyond short
/// critical sections. None of them can fail back into the driver.
pub trait SwitchNotifications: Send + Sync {
    fn on_switch_state_change(&self, switch_id: ObjectId, status: i32);

    fn on_fdb_event(&self, events: &[FdbEventNotification]);

    fn on_port_state_change(&self, changes: &[PortOperStatusNotification]);

    fn on_switch_shutdown_request(&self, switch_id: ObjectId);
}

/// Restartable position in a profile walk.
///
/// Each caller owns its cursor, so two walks never interfere.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileCursor {
    last: Option<String>,
}

impl ProfileCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rewinds to the first key.
    pub fn reset(&mut self) {
        self.last = None;
    }

    /// The key most recently returned, if any.
    pub fn position(&self) -> Option<&str> {
        self.last.as_deref()
    }

    /// Advances past `key`.
    pub fn advance(&mut self, key: &str) {
        self.last = Some(key.to_string());
    }
}

/// Key/value services the driver reads at initialization.
pub trait ProfileServices: Send + Sync {
    fn get_value(&self, key: &str) -> Option<String>;

    /// Returns the entry after the cursor position, advancing the cursor.
    fn next_value(&self, cursor: &mut ProfileCursor) -> Option<(String, String)>;
}

/// A native SAI implementation.
pub trait SaiDriver: Send + Sync {
    /// `sai_query_api_version`: the encoded `major * 10000 + minor * 100 + rev`.
    fn api_version(&self) -> DriverResult<u64>;

    /// `sai_api_initialize`.
    fn initialize(&self, profile: Arc<dyn ProfileServices>) -> DriverResult<()>;

    /// `sai_api_query`: confirms the API table is available.
    fn api_query(&self, api: SaiApi) -> DriverResult<()>;

    /// Installs the notification callbacks. Replaces any earlier set.
    fn register_notifications(&self, handler: Arc<dyn SwitchNotifications>) -> DriverResult<()>;

    /// Creates an object addressed by handle. `switch_id` is null only when
    /// creating the switch itself.
    fn create_object(
        &self,
        object_type: ObjectType,
        switch_id: ObjectId,
        attrs: &[Attribute],
    ) -> DriverResult<ObjectId>;

    /// Creates an object addressed by key.
    fn create_entry(&self, key: &EntryKey, attrs: &[Attribute]) -> DriverResult<()>;

    fn remove(&self, object_type: ObjectType, key: &ObjectKey) -> DriverResult<()>;

    fn set_attribute(
        &self,
        object_type: ObjectType,
        key: &ObjectKey,
        attr: &Attribute,
    ) -> DriverResult<()>;

    /// Fills `attrs` in place. List values must be pre-sized by the caller.
    fn get_attributes(
        &self,
        object_type: ObjectType,
        key: &ObjectKey,
        attrs: &mut [Attribute],
    ) -> DriverResult<()>;

    /// Reads counters, one value per requested id.
    fn get_stats(
        &self,
        object_type: ObjectType,
        oid: ObjectId,
        counter_ids: &[StatId],
    ) -> DriverResult<Vec<u64>>;

    fn clear_stats(
        &self,
        object_type: ObjectType,
        oid: ObjectId,
        counter_ids: &[StatId],
    ) -> DriverResult<()>;

    fn clear_port_all_stats(&self, port_id: ObjectId) -> DriverResult<()>;

    fn flush_fdb_entries(&self, switch_id: ObjectId, attrs: &[Attribute]) -> DriverResult<()>;
}
