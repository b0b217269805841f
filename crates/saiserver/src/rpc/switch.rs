//! Switch, port and bridge read-outs that need more than one driver call.

use super::{AttributeListResult, SaiRpc};
use crate::codec::wire::WireAttribute;
use log::{debug, error, warn};
use sai_native::{
    ids, AttrId, AttrValue, Attribute, ObjectId, ObjectKey, ObjectType, SaiError, SaiResult,
    SaiStatus,
};

/// Initial size of the bridge port list read.
const BRIDGE_PORT_LIST_SIZE: usize = 128;
/// Lanes read per port; no port uses more.
const MAX_PORT_LANES: usize = 8;

impl SaiRpc {
    /// Reads a bridge's port list, re-sizing once when the driver reports
    /// more ports than the first buffer holds.
    pub fn get_bridge_port_list(&self, bridge_id: ObjectId) -> AttributeListResult {
        debug!("get_bridge_port_list {}", bridge_id);
        match self.read_list_resizing(
            ObjectType::Bridge,
            bridge_id,
            ids::bridge::PORT_LIST,
            BRIDGE_PORT_LIST_SIZE,
        ) {
            Ok(attributes) => AttributeListResult::complete(attributes),
            Err(e) => {
                error!("get_bridge_port_list {} failed: {}", bridge_id, e);
                AttributeListResult::failed(e.status())
            }
        }
    }

    fn read_list_resizing(
        &self,
        object_type: ObjectType,
        oid: ObjectId,
        attr_id: AttrId,
        capacity: usize,
    ) -> SaiResult<Vec<WireAttribute>> {
        self.context.api(object_type)?;
        let key = ObjectKey::Oid(oid);
        let mut encoded = self.codec().prepare_get(object_type, &[(attr_id, capacity)])?;
        let mut outcome = self
            .driver()
            .get_attributes(object_type, &key, encoded.attrs_mut());

        if outcome == Err(SaiStatus::BUFFER_OVERFLOW) {
            let needed = encoded
                .attrs()
                .first()
                .and_then(|attr| attr.value.list_count())
                .map_or(capacity, |count| count as usize);
            debug!(
                "{} attribute {} needs {} elements, retrying",
                object_type, attr_id, needed
            );
            encoded = self.codec().prepare_get(object_type, &[(attr_id, needed)])?;
            outcome = self
                .driver()
                .get_attributes(object_type, &key, encoded.attrs_mut());
        }

        let status = outcome.err().unwrap_or(SaiStatus::SUCCESS);
        self.codec().decode(object_type, status, encoded.attrs())
    }

    /// Queue list, priority group list, lanes, oper status and MTU of a port.
    pub fn get_port_attribute(&self, port_id: ObjectId) -> AttributeListResult {
        debug!("get_port_attribute {}", port_id);
        let mut attributes = Vec::new();
        let outcome = self.port_readout(port_id, &mut attributes);
        AttributeListResult::from_steps(attributes, outcome)
    }

    fn port_readout(&self, port_id: ObjectId, out: &mut Vec<WireAttribute>) -> SaiResult<()> {
        let port = ObjectKey::Oid(port_id);

        let queues = self.read_u32(ObjectType::Port, port_id, ids::port::QOS_NUMBER_OF_QUEUES)?;
        out.extend(self.read(
            ObjectType::Port,
            &port,
            &[(ids::port::QOS_QUEUE_LIST, queues as usize)],
        )?);

        let pgs = self.read_u32(
            ObjectType::Port,
            port_id,
            ids::port::NUMBER_OF_INGRESS_PRIORITY_GROUPS,
        )?;
        out.extend(self.read(
            ObjectType::Port,
            &port,
            &[(ids::port::INGRESS_PRIORITY_GROUP_LIST, pgs as usize)],
        )?);

        out.extend(self.read(
            ObjectType::Port,
            &port,
            &[(ids::port::HW_LANE_LIST, MAX_PORT_LANES)],
        )?);
        out.extend(self.read(ObjectType::Port, &port, &[(ids::port::OPER_STATUS, 0)])?);
        out.extend(self.read(ObjectType::Port, &port, &[(ids::port::MTU, 0)])?);
        Ok(())
    }

    /// VOQ list and configuration of a system port.
    pub fn get_system_port_attribute(&self, system_port: ObjectId) -> AttributeListResult {
        debug!("get_system_port_attribute {}", system_port);
        if system_port.is_null() {
            return AttributeListResult::failed(SaiStatus::INVALID_PARAMETER);
        }
        let mut attributes = Vec::new();
        let outcome = self.system_port_readout(system_port, &mut attributes);
        AttributeListResult::from_steps(attributes, outcome)
    }

    fn system_port_readout(
        &self,
        system_port: ObjectId,
        out: &mut Vec<WireAttribute>,
    ) -> SaiResult<()> {
        let key = ObjectKey::Oid(system_port);
        let voqs = self.read_u32(
            ObjectType::SystemPort,
            system_port,
            ids::system_port::QOS_NUMBER_OF_VOQS,
        )?;
        out.extend(self.read(
            ObjectType::SystemPort,
            &key,
            &[(ids::system_port::QOS_VOQ_LIST, voqs as usize)],
        )?);
        out.extend(self.read(
            ObjectType::SystemPort,
            &key,
            &[(ids::system_port::CONFIG_INFO, 0)],
        )?);
        Ok(())
    }

    pub fn get_vlan_id(&self, vlan: ObjectId) -> SaiResult<u16> {
        debug!("get_vlan_id {}", vlan);
        match self.read_value(ObjectType::Vlan, vlan, ids::vlan::VLAN_ID, 0)? {
            AttrValue::U16(vlan_id) => Ok(vlan_id),
            other => Err(super::unexpected_kind(ids::vlan::VLAN_ID, "u16", &other)),
        }
    }

    pub fn get_stp_port_state(&self, stp_port: ObjectId) -> SaiResult<i32> {
        debug!("get_stp_port_state {}", stp_port);
        self.read_s32(ObjectType::StpPort, stp_port, ids::stp_port::STATE)
    }

    pub fn set_stp_port_state(&self, stp_port: ObjectId, state: i32) -> SaiResult<()> {
        debug!("set_stp_port_state {} {}", stp_port, state);
        self.context.api(ObjectType::StpPort)?;
        let attr = Attribute::new(ids::stp_port::STATE, AttrValue::S32(state));
        self.driver()
            .set_attribute(ObjectType::StpPort, &ObjectKey::Oid(stp_port), &attr)
            .map_err(|status| super::driver_failure("set", ObjectType::StpPort, status))
    }

    fn switch_oid(&self, attr_id: AttrId) -> SaiResult<ObjectId> {
        self.read_oid(ObjectType::Switch, self.context.switch_id(), attr_id)
    }

    pub fn get_cpu_port_id(&self) -> SaiResult<ObjectId> {
        self.switch_oid(ids::switch::CPU_PORT)
    }

    pub fn get_default_router_id(&self) -> SaiResult<ObjectId> {
        self.switch_oid(ids::switch::DEFAULT_VIRTUAL_ROUTER_ID)
    }

    pub fn get_default_1q_bridge_id(&self) -> SaiResult<ObjectId> {
        self.switch_oid(ids::switch::DEFAULT_1Q_BRIDGE_ID)
    }

    pub fn get_default_vlan_id(&self) -> SaiResult<ObjectId> {
        self.switch_oid(ids::switch::DEFAULT_VLAN_ID)
    }

    pub fn get_default_trap_group(&self) -> SaiResult<ObjectId> {
        self.switch_oid(ids::switch::DEFAULT_TRAP_GROUP)
    }

    /// Front-panel ports of the switch, in driver order.
    pub fn get_port_list(&self) -> SaiResult<Vec<ObjectId>> {
        let switch_id = self.context.switch_id();
        let count = self.read_u32(ObjectType::Switch, switch_id, ids::switch::PORT_NUMBER)?;
        self.read_oid_list(
            ObjectType::Switch,
            switch_id,
            ids::switch::PORT_LIST,
            count as usize,
        )
    }

    /// Every switch port with its hardware lanes. Ports whose lanes cannot
    /// be read are left out.
    fn port_lanes(&self) -> SaiResult<Vec<(ObjectId, Vec<u32>)>> {
        let ports = self.get_port_list()?;
        let mut lanes = Vec::with_capacity(ports.len());
        for port in ports {
            match self.read_u32_list(
                ObjectType::Port,
                port,
                ids::port::HW_LANE_LIST,
                MAX_PORT_LANES,
            ) {
                Ok(port_lanes) => lanes.push((port, port_lanes)),
                Err(e) => warn!("Skipping port {}: lanes unreadable: {}", port, e),
            }
        }
        Ok(lanes)
    }

    /// The switch port behind a front-panel name, or NULL.
    pub fn get_port_id_by_front_port(&self, name: &str) -> SaiResult<ObjectId> {
        debug!("get_port_id_by_front_port {}", name);
        let lanes = self.port_lanes()?;
        Ok(self
            .context
            .port_map()
            .port_id_by_front_port(name, lanes.iter().map(|(oid, l)| (*oid, l.as_slice()))))
    }

    /// Switch ports ordered by front-panel number.
    pub fn get_port_list_by_front_port(&self) -> SaiResult<Vec<ObjectId>> {
        debug!("get_port_list_by_front_port");
        let lanes = self.port_lanes()?;
        Ok(self
            .context
            .port_map()
            .port_list_by_front_port(lanes.iter().map(|(oid, l)| (*oid, l.as_slice()))))
    }

    /// The system port configured with `port_id`. NULL when the switch is
    /// not a VOQ switch, the id is negative or no system port matches.
    pub fn get_sys_port_obj_id_by_port_id(&self, port_id: i32) -> ObjectId {
        debug!("get_sys_port_obj_id_by_port_id {}", port_id);
        let Ok(port_id) = u32::try_from(port_id) else {
            return ObjectId::NULL;
        };
        match self.find_system_port(port_id) {
            Ok(Some(oid)) => oid,
            Ok(None) => {
                error!("No system port with port id {}", port_id);
                ObjectId::NULL
            }
            Err(e) => {
                error!("System port lookup for {} failed: {}", port_id, e);
                ObjectId::NULL
            }
        }
    }

    fn find_system_port(&self, port_id: u32) -> SaiResult<Option<ObjectId>> {
        let switch_id = self.context.switch_id();
        let switch_type = self.read_s32(ObjectType::Switch, switch_id, ids::switch::TYPE)?;
        if switch_type != ids::switch::TYPE_VOQ {
            return Err(SaiError::driver(SaiStatus::NOT_SUPPORTED));
        }
        self.context.api(ObjectType::SystemPort)?;

        let count = self.read_u32(
            ObjectType::Switch,
            switch_id,
            ids::switch::NUMBER_OF_SYSTEM_PORTS,
        )?;
        let system_ports = self.read_oid_list(
            ObjectType::Switch,
            switch_id,
            ids::switch::SYSTEM_PORT_LIST,
            count as usize,
        )?;

        for system_port in system_ports {
            match self.read_value(
                ObjectType::SystemPort,
                system_port,
                ids::system_port::CONFIG_INFO,
                0,
            ) {
                Ok(AttrValue::SysPortConfig(config)) if config.port_id == port_id => {
                    return Ok(Some(system_port));
                }
                Ok(_) => {}
                Err(e) => warn!("Skipping system port {}: {}", system_port, e),
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::rpc_with;
    use super::*;
    use crate::codec::wire::WireValue;
    use pretty_assertions::assert_eq;
    use sai_native::{MemoryDriver, MemoryDriverConfig, SaiDriver};
    use std::sync::Arc;

    fn driver(front_ports: u32, switch_type: i32) -> Arc<MemoryDriver> {
        Arc::new(MemoryDriver::new(MemoryDriverConfig {
            front_ports,
            switch_type,
            ..Default::default()
        }))
    }

    #[test]
    fn test_bridge_port_list_retries_on_overflow() {
        let rpc = rpc_with(driver(130, ids::switch::TYPE_NPU));
        let bridge = rpc.get_default_1q_bridge_id().unwrap();
        let result = rpc.get_bridge_port_list(bridge);

        assert!(result.complete);
        let [WireAttribute {
            value: WireValue::ObjList(ports),
            ..
        }] = result.attributes.as_slice()
        else {
            panic!("expected one object list, got {:?}", result.attributes);
        };
        assert_eq!(ports.len(), 130);
    }

    #[test]
    fn test_bridge_port_list_of_small_bridge() {
        let rpc = rpc_with(driver(4, ids::switch::TYPE_NPU));
        let bridge = rpc.get_default_1q_bridge_id().unwrap();
        let result = rpc.get_bridge_port_list(bridge);
        assert_eq!(result.status, SaiStatus::SUCCESS);
        assert!(matches!(
            &result.attributes[0].value,
            WireValue::ObjList(ports) if ports.len() == 4
        ));
    }

    #[test]
    fn test_port_attribute_readout() {
        let rpc = rpc_with(driver(2, ids::switch::TYPE_NPU));
        let port = rpc.get_port_list().unwrap()[1];
        let result = rpc.get_port_attribute(port);

        assert!(result.complete);
        let order: Vec<AttrId> = result.attributes.iter().map(|a| a.id).collect();
        assert_eq!(
            order,
            vec![
                ids::port::QOS_QUEUE_LIST,
                ids::port::INGRESS_PRIORITY_GROUP_LIST,
                ids::port::HW_LANE_LIST,
                ids::port::OPER_STATUS,
                ids::port::MTU,
            ]
        );
        assert_eq!(
            result.attributes[2].value,
            WireValue::U32List(vec![5, 6, 7, 8])
        );
        assert_eq!(result.attributes[4].value, WireValue::U32(9100));
    }

    #[test]
    fn test_port_attribute_readout_on_cpu_port_is_partial() {
        let rpc = rpc_with(driver(2, ids::switch::TYPE_NPU));
        let cpu = rpc.get_cpu_port_id().unwrap();
        let result = rpc.get_port_attribute(cpu);
        // The CPU port has no queue count in the in-memory model.
        assert!(!result.complete);
        assert!(result.attributes.is_empty());
        assert_eq!(result.status, SaiStatus::invalid_attribute(0));
    }

    #[test]
    fn test_default_objects() {
        let memory = driver(2, ids::switch::TYPE_NPU);
        let rpc = rpc_with(memory.clone());
        for oid in [
            rpc.get_cpu_port_id().unwrap(),
            rpc.get_default_router_id().unwrap(),
            rpc.get_default_1q_bridge_id().unwrap(),
            rpc.get_default_vlan_id().unwrap(),
            rpc.get_default_trap_group().unwrap(),
        ] {
            assert!(memory.contains(&ObjectKey::Oid(oid)));
        }
        let vlan = rpc.get_default_vlan_id().unwrap();
        assert_eq!(rpc.get_vlan_id(vlan).unwrap(), 1);
    }

    #[test]
    fn test_stp_port_state() {
        let memory = driver(2, ids::switch::TYPE_NPU);
        let rpc = rpc_with(memory.clone());
        let stp_port = memory
            .create_object(
                ObjectType::StpPort,
                memory.switch_id(),
                &[Attribute::new(
                    ids::stp_port::STATE,
                    AttrValue::S32(ids::stp_port::STATE_BLOCKING),
                )],
            )
            .unwrap();
        assert_eq!(
            rpc.get_stp_port_state(stp_port).unwrap(),
            ids::stp_port::STATE_BLOCKING
        );
        rpc.set_stp_port_state(stp_port, ids::stp_port::STATE_FORWARDING)
            .unwrap();
        assert_eq!(
            rpc.get_stp_port_state(stp_port).unwrap(),
            ids::stp_port::STATE_FORWARDING
        );
    }

    #[test]
    fn test_sys_port_lookup_on_voq_switch() {
        let rpc = rpc_with(driver(4, ids::switch::TYPE_VOQ));
        let found = rpc.get_sys_port_obj_id_by_port_id(2);
        assert!(!found.is_null());

        let result = rpc.get_system_port_attribute(found);
        assert!(result.complete);
        assert!(matches!(
            &result.attributes[1].value,
            WireValue::SysPortConfig(config) if config.port_id == 2
        ));

        assert!(rpc.get_sys_port_obj_id_by_port_id(-1).is_null());
        assert!(rpc.get_sys_port_obj_id_by_port_id(40).is_null());
    }

    #[test]
    fn test_sys_port_lookup_needs_voq_switch() {
        let rpc = rpc_with(driver(4, ids::switch::TYPE_NPU));
        assert!(rpc.get_sys_port_obj_id_by_port_id(0).is_null());
    }
}
