//! Counter reads and clears.

use super::SaiRpc;
use log::{debug, error};
use sai_native::{ids, AttrValue, ObjectId, ObjectType, SaiResult, StatId};

/// Object type behind the `<name>` of `get_<name>_stats` and
/// `clear_<name>_stats`.
pub fn stats_object_type(name: &str) -> Option<ObjectType> {
    match name {
        "vlan" => Some(ObjectType::Vlan),
        "port" => Some(ObjectType::Port),
        "queue" => Some(ObjectType::Queue),
        "buffer_pool" => Some(ObjectType::BufferPool),
        "pg" | "ingress_priority_group" => Some(ObjectType::IngressPriorityGroup),
        "policer" => Some(ObjectType::Policer),
        "switch" => Some(ObjectType::Switch),
        _ => None,
    }
}

impl SaiRpc {
    pub fn get_stats(
        &self,
        object_type: ObjectType,
        oid: ObjectId,
        counter_ids: &[StatId],
    ) -> SaiResult<Vec<u64>> {
        debug!("get {} stats of {}: {} counters", object_type, oid, counter_ids.len());
        self.context.api(object_type)?;
        self.driver()
            .get_stats(object_type, oid, counter_ids)
            .map_err(|status| super::driver_failure("read stats of", object_type, status))
    }

    pub fn clear_stats(
        &self,
        object_type: ObjectType,
        oid: ObjectId,
        counter_ids: &[StatId],
    ) -> SaiResult<()> {
        debug!("clear {} stats of {}: {} counters", object_type, oid, counter_ids.len());
        self.context.api(object_type)?;
        self.driver()
            .clear_stats(object_type, oid, counter_ids)
            .map_err(|status| super::driver_failure("clear stats of", object_type, status))
    }

    pub fn clear_port_all_stats(&self, port_id: ObjectId) -> SaiResult<()> {
        debug!("clear_port_all_stats {}", port_id);
        self.context.api(ObjectType::Port)?;
        self.driver()
            .clear_port_all_stats(port_id)
            .map_err(|status| super::driver_failure("clear stats of", ObjectType::Port, status))
    }

    /// Switch drop counter behind a debug counter. Any failure reads as 0.
    pub fn get_switch_stats_by_oid(&self, debug_counter: ObjectId) -> u64 {
        debug!("get_switch_stats_by_oid {}", debug_counter);
        match self.debug_counter_stat(debug_counter) {
            Ok(value) => value,
            Err(e) => {
                error!("Failed to read debug counter {}: {}", debug_counter, e);
                0
            }
        }
    }

    fn debug_counter_stat(&self, debug_counter: ObjectId) -> SaiResult<u64> {
        let counter_type =
            self.read_s32(ObjectType::DebugCounter, debug_counter, ids::debug_counter::TYPE)?;
        let base = match counter_type {
            ids::debug_counter::TYPE_SWITCH_IN_DROP_REASONS => {
                ids::switch::STAT_IN_DROP_REASON_RANGE_BASE
            }
            ids::debug_counter::TYPE_SWITCH_OUT_DROP_REASONS => {
                ids::switch::STAT_OUT_DROP_REASON_RANGE_BASE
            }
            other => {
                return Err(sai_native::SaiError::invalid_value(
                    ids::debug_counter::TYPE,
                    0,
                    format!("debug counter type {} has no switch stat", other),
                ))
            }
        };
        let index = match self.read_value(
            ObjectType::DebugCounter,
            debug_counter,
            ids::debug_counter::INDEX,
            0,
        )? {
            AttrValue::U32(index) => index,
            other => return Err(super::unexpected_kind(ids::debug_counter::INDEX, "u32", &other)),
        };

        let stat_id = base.checked_add(index).ok_or_else(|| {
            sai_native::SaiError::invalid_value(
                ids::debug_counter::INDEX,
                0,
                format!("debug counter index {} overflows the stat range", index),
            )
        })?;
        let values = self.get_stats(ObjectType::Switch, self.context.switch_id(), &[stat_id])?;
        Ok(values.first().copied().unwrap_or(0))
    }
}
