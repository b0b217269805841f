//! Driver notification handlers.
//!
//! The driver calls these from its own threads. FDB batches go to the
//! [`FdbEventCache`] as one unit; port state changes land in a
//! [`PortStatusTable`]; a shutdown request raises the [`ShutdownSignal`] the
//! binary waits on. Malformed records are logged and dropped, never
//! reported back to the driver.

use crate::fdb::{FdbEventCache, FdbEventRecord, FdbKey, FlushFilter};
use log::{debug, error, info, warn};
use parking_lot::RwLock;
use sai_native::{
    ids, AttrValue, FdbEvent, FdbEventNotification, ObjectId, PortOperStatus,
    PortOperStatusNotification, SwitchNotifications,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Notify;

/// Why a notification record was dropped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotificationError {
    #[error("unknown FDB event type {0}")]
    UnknownFdbEvent(i32),

    #[error("{event:?} for {key} carries no bridge port")]
    MissingBridgePort { event: FdbEvent, key: FdbKey },

    #[error("unknown oper status {status} for port {port_id}")]
    UnknownOperStatus { port_id: ObjectId, status: i32 },
}

/// Converts one driver record into a cache transition.
///
/// A flush limited to static entries yields `None`: the cache only holds
/// learned entries, which such a flush leaves in place.
pub fn fdb_record(
    notification: &FdbEventNotification,
) -> Result<Option<FdbEventRecord>, NotificationError> {
    let event = FdbEvent::from_raw(notification.event_type)
        .ok_or(NotificationError::UnknownFdbEvent(notification.event_type))?;
    let key = FdbKey::from(&notification.fdb_entry);
    let mut bridge_port = None;
    let mut entry_type = ids::fdb_entry::TYPE_DYNAMIC;
    for attr in &notification.attrs {
        match (attr.id, &attr.value) {
            (ids::fdb_entry::BRIDGE_PORT_ID, AttrValue::Oid(oid)) => bridge_port = Some(*oid),
            (ids::fdb_entry::TYPE, AttrValue::S32(value)) => entry_type = *value,
            _ => {}
        }
    }

    let record = match event {
        FdbEvent::Learned => FdbEventRecord::Learned {
            key,
            bridge_port_id: bridge_port
                .ok_or(NotificationError::MissingBridgePort { event, key })?,
        },
        FdbEvent::Moved => FdbEventRecord::Moved {
            key,
            bridge_port_id: bridge_port
                .ok_or(NotificationError::MissingBridgePort { event, key })?,
        },
        FdbEvent::Aged => FdbEventRecord::Aged { key },
        FdbEvent::Flushed if entry_type == ids::fdb_entry::TYPE_STATIC => return Ok(None),
        FdbEvent::Flushed => FdbEventRecord::Flushed(FlushFilter {
            bv_id: notification.fdb_entry.bv_id,
            bridge_port_id: bridge_port.unwrap_or(ObjectId::NULL),
        }),
    };
    Ok(Some(record))
}

/// Last reported oper status per port.
#[derive(Debug, Default)]
pub struct PortStatusTable {
    ports: RwLock<HashMap<ObjectId, PortOperStatus>>,
}

impl PortStatusTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a status, returning the previous one.
    pub fn update(&self, port_id: ObjectId, status: PortOperStatus) -> Option<PortOperStatus> {
        self.ports.write().insert(port_id, status)
    }

    pub fn get(&self, port_id: ObjectId) -> Option<PortOperStatus> {
        self.ports.read().get(&port_id).copied()
    }

    pub fn len(&self) -> usize {
        self.ports.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.ports.read().is_empty()
    }
}

/// Set once when the switch asks the server to shut down.
#[derive(Debug, Default)]
pub struct ShutdownSignal {
    requested: AtomicBool,
    notify: Notify,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&self) {
        self.requested.store(true, Ordering::SeqCst);
        self.notify.notify_waiters();
    }

    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }

    /// Resolves once [`request`](Self::request) has been called.
    pub async fn wait(&self) {
        let notified = self.notify.notified();
        tokio::pin!(notified);
        notified.as_mut().enable();
        if self.is_requested() {
            return;
        }
        notified.await;
    }
}

/// The callbacks registered with the driver.
pub struct NotificationHandler {
    fdb: Arc<FdbEventCache>,
    ports: Arc<PortStatusTable>,
    shutdown: Arc<ShutdownSignal>,
}

impl NotificationHandler {
    pub fn new(
        fdb: Arc<FdbEventCache>,
        ports: Arc<PortStatusTable>,
        shutdown: Arc<ShutdownSignal>,
    ) -> Self {
        Self {
            fdb,
            ports,
            shutdown,
        }
    }
}

impl SwitchNotifications for NotificationHandler {
    fn on_switch_state_change(&self, switch_id: ObjectId, status: i32) {
        info!("Switch {} state changed to {}", switch_id, status);
    }

    fn on_fdb_event(&self, events: &[FdbEventNotification]) {
        let mut records = Vec::with_capacity(events.len());
        for (index, notification) in events.iter().enumerate() {
            match fdb_record(notification) {
                Ok(Some(record)) => records.push(record),
                Ok(None) => debug!("Static-only flush leaves cached entries in place"),
                Err(e) => warn!("Dropping FDB event {} of {}: {}", index, events.len(), e),
            }
        }
        let summary = self.fdb.apply(&records);
        debug!("FDB event batch of {} applied: {:?}", events.len(), summary);
    }

    fn on_port_state_change(&self, changes: &[PortOperStatusNotification]) {
        for change in changes {
            let Some(status) = PortOperStatus::from_raw(change.port_state) else {
                let e = NotificationError::UnknownOperStatus {
                    port_id: change.port_id,
                    status: change.port_state,
                };
                warn!("Dropping port state change: {}", e);
                continue;
            };
            let previous = self.ports.update(change.port_id, status);
            info!(
                "Port {} oper status {:?} -> {:?}",
                change.port_id, previous, status
            );
        }
    }

    fn on_switch_shutdown_request(&self, switch_id: ObjectId) {
        error!("Switch {} requested shutdown", switch_id);
        self.shutdown.request();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sai_native::{Attribute, FdbEntryKey};
    use sai_types::MacAddress;

    const MAC: MacAddress = MacAddress::new([0x00, 0x11, 0x22, 0x33, 0x44, 0x55]);

    fn notification(event_type: i32, bv: u64, port: Option<u64>) -> FdbEventNotification {
        FdbEventNotification {
            event_type,
            fdb_entry: FdbEntryKey {
                switch_id: ObjectId::from_raw(1),
                mac: MAC,
                bv_id: ObjectId::from_raw(bv),
            },
            attrs: port
                .map(|p| {
                    vec![Attribute::new(
                        ids::fdb_entry::BRIDGE_PORT_ID,
                        AttrValue::Oid(ObjectId::from_raw(p)),
                    )]
                })
                .unwrap_or_default(),
        }
    }

    fn handler() -> (
        NotificationHandler,
        Arc<FdbEventCache>,
        Arc<PortStatusTable>,
        Arc<ShutdownSignal>,
    ) {
        let fdb = Arc::new(FdbEventCache::new());
        let ports = Arc::new(PortStatusTable::new());
        let shutdown = Arc::new(ShutdownSignal::new());
        let handler = NotificationHandler::new(fdb.clone(), ports.clone(), shutdown.clone());
        (handler, fdb, ports, shutdown)
    }

    #[test]
    fn test_learned_needs_bridge_port() {
        let err =
            fdb_record(&notification(ids::fdb_entry::EVENT_LEARNED, 2, None)).unwrap_err();
        assert!(matches!(
            err,
            NotificationError::MissingBridgePort {
                event: FdbEvent::Learned,
                ..
            }
        ));
    }

    #[test]
    fn test_flushed_without_port_is_bridge_scope() {
        let record =
            fdb_record(&notification(ids::fdb_entry::EVENT_FLUSHED, 2, None)).unwrap();
        assert_eq!(
            record,
            Some(FdbEventRecord::Flushed(FlushFilter {
                bv_id: ObjectId::from_raw(2),
                bridge_port_id: ObjectId::NULL,
            }))
        );
    }

    #[test]
    fn test_static_flush_keeps_learned_entries() {
        let (handler, fdb, _, _) = handler();
        handler.on_fdb_event(&[notification(ids::fdb_entry::EVENT_LEARNED, 2, Some(10))]);

        let mut flush = notification(ids::fdb_entry::EVENT_FLUSHED, 0, None);
        flush.attrs.push(Attribute::new(
            ids::fdb_entry::TYPE,
            AttrValue::S32(ids::fdb_entry::TYPE_STATIC),
        ));
        assert_eq!(fdb_record(&flush).unwrap(), None);

        handler.on_fdb_event(&[flush]);
        assert_eq!(fdb.len(), 1);
    }

    #[test]
    fn test_malformed_records_do_not_stop_the_batch() {
        let (handler, fdb, _, _) = handler();
        handler.on_fdb_event(&[
            notification(ids::fdb_entry::EVENT_LEARNED, 2, Some(10)),
            notification(42, 2, Some(10)),
            notification(ids::fdb_entry::EVENT_MOVE, 2, None),
            notification(ids::fdb_entry::EVENT_MOVE, 2, Some(11)),
        ]);
        assert_eq!(
            fdb.get(&FdbKey::new(MAC, ObjectId::from_raw(2))),
            Some(ObjectId::from_raw(11))
        );
        assert_eq!(fdb.len(), 1);
    }

    #[test]
    fn test_port_state_table() {
        let (handler, _, ports, _) = handler();
        let port = ObjectId::from_raw(0x1000);
        handler.on_port_state_change(&[
            PortOperStatusNotification {
                port_id: port,
                port_state: ids::port::OPER_STATUS_UP,
            },
            PortOperStatusNotification {
                port_id: ObjectId::from_raw(0x1001),
                port_state: 77,
            },
        ]);
        assert_eq!(ports.get(port), Some(PortOperStatus::Up));
        assert_eq!(ports.len(), 1);
    }

    #[tokio::test]
    async fn test_shutdown_request_wakes_waiter() {
        let (handler, _, _, shutdown) = handler();
        assert!(!shutdown.is_requested());

        let waiter = {
            let shutdown = shutdown.clone();
            tokio::spawn(async move { shutdown.wait().await })
        };
        tokio::task::yield_now().await;
        handler.on_switch_shutdown_request(ObjectId::from_raw(1));

        tokio::time::timeout(std::time::Duration::from_secs(1), waiter)
            .await
            .unwrap()
            .unwrap();
        assert!(shutdown.is_requested());
        // Already requested: returns immediately.
        shutdown.wait().await;
    }
}
