//! FDB list and flush.

use super::SaiRpc;
use crate::codec::wire::WireAttribute;
use crate::fdb::FdbRecord;
use log::{debug, info};
use sai_native::{ObjectType, SaiResult};
use serde::Serialize;

/// One cached FDB entry as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WireFdbRecord {
    pub mac: String,
    pub bv_id: i64,
    pub bridge_port_id: i64,
}

impl From<&FdbRecord> for WireFdbRecord {
    fn from(record: &FdbRecord) -> Self {
        WireFdbRecord {
            mac: record.mac.to_string(),
            bv_id: record.bv_id.to_wire(),
            bridge_port_id: record.bridge_port_id.to_wire(),
        }
    }
}

impl SaiRpc {
    /// Every entry learned from notifications, ordered by MAC then bridge.
    pub fn get_fdb_entries(&self) -> Vec<WireFdbRecord> {
        let entries: Vec<WireFdbRecord> = self
            .context
            .fdb()
            .snapshot()
            .iter()
            .map(WireFdbRecord::from)
            .collect();
        debug!("get_fdb_entries: {} entries", entries.len());
        entries
    }

    /// Asks the driver to flush. The cache follows through the FLUSHED
    /// notification the driver sends back.
    pub fn flush_fdb_entries(&self, attrs: &[WireAttribute]) -> SaiResult<()> {
        debug!("flush_fdb_entries with {} attributes", attrs.len());
        self.context.api(ObjectType::FdbFlush)?;
        let encoded = self.codec().encode(ObjectType::FdbFlush, attrs)?;
        self.driver()
            .flush_fdb_entries(self.context.switch_id(), encoded.attrs())
            .map_err(|status| super::driver_failure("flush", ObjectType::FdbFlush, status))?;
        info!("Flushed FDB entries");
        Ok(())
    }
}
