//! In-memory SAI driver.
//!
//! `MemoryDriver` keeps every object as a map of attribute values and seeds
//! a realistic switch layout on switch create. It backs the server when no
//! vendor library is linked and drives the integration tests, which use the
//! hooks at the bottom of this file to inject failures, counters and
//! notifications.

use crate::api::SaiApi;
use crate::attr::{AttrId, AttrValue, Attribute, NativeList, StatId, SystemPortConfig};
use crate::driver::{
    DriverResult, FdbEventNotification, PortOperStatusNotification, ProfileCursor,
    ProfileServices, SaiDriver, SwitchNotifications,
};
use crate::error::SaiStatus;
use crate::ids;
use crate::types::{EntryKey, FdbEntryKey, ObjectId, ObjectKey, ObjectType};
use log::{debug, info, warn};
use parking_lot::{Mutex, RwLock};
use sai_types::MacAddress;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

/// Profile key overriding the number of front-panel ports.
pub const PROFILE_FRONT_PORTS: &str = "MEMORY_DRIVER_FRONT_PORTS";
/// Profile key selecting the switch type (`npu` or `voq`).
pub const PROFILE_SWITCH_TYPE: &str = "MEMORY_DRIVER_SWITCH_TYPE";

/// Default port speed in Mb/s.
const DEFAULT_PORT_SPEED: u32 = 100_000;
const DEFAULT_PORT_MTU: u32 = 9100;
const DEFAULT_FDB_AGING_TIME: u32 = 600;

/// Layout of the switch seeded on create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryDriverConfig {
    pub front_ports: u32,
    pub lanes_per_port: u32,
    pub queues_per_port: u32,
    pub priority_groups_per_port: u32,
    pub voqs_per_system_port: u32,
    pub switch_type: i32,
    pub api_version: u64,
}

impl Default for MemoryDriverConfig {
    fn default() -> Self {
        MemoryDriverConfig {
            front_ports: 32,
            lanes_per_port: 4,
            queues_per_port: 8,
            priority_groups_per_port: 8,
            voqs_per_system_port: 8,
            switch_type: ids::switch::TYPE_NPU,
            api_version: 11_301,
        }
    }
}

impl MemoryDriverConfig {
    /// Hardware lanes of front port `index`, numbered from 1.
    pub fn lanes_of(&self, index: u32) -> Vec<u32> {
        (0..self.lanes_per_port)
            .map(|lane| index * self.lanes_per_port + lane + 1)
            .collect()
    }
}

#[derive(Debug, Clone)]
struct StoredObject {
    object_type: ObjectType,
    attrs: BTreeMap<AttrId, AttrValue>,
}

#[derive(Default)]
struct State {
    objects: HashMap<ObjectKey, StoredObject>,
    counters: HashMap<(ObjectId, StatId), u64>,
    disabled_apis: HashSet<SaiApi>,
    pending_failure: Option<SaiStatus>,
    next_index: u64,
    next_debug_counter_index: u32,
    switch_id: ObjectId,
}

impl State {
    fn take_failure(&mut self) -> DriverResult<()> {
        match self.pending_failure.take() {
            Some(status) => Err(status),
            None => Ok(()),
        }
    }

    /// Allocates a handle whose top bits encode the object type.
    fn alloc(&mut self, object_type: ObjectType) -> ObjectId {
        self.next_index += 1;
        ObjectId::from_raw(((object_type as u64 + 1) << 48) | self.next_index)
    }

    fn insert(
        &mut self,
        oid: ObjectId,
        object_type: ObjectType,
        attrs: impl IntoIterator<Item = (AttrId, AttrValue)>,
    ) {
        self.objects.insert(
            ObjectKey::Oid(oid),
            StoredObject {
                object_type,
                attrs: attrs.into_iter().collect(),
            },
        );
    }

    fn object(&self, object_type: ObjectType, key: &ObjectKey) -> DriverResult<&StoredObject> {
        let stored = self.objects.get(key).ok_or_else(|| missing(key))?;
        if stored.object_type != object_type {
            return Err(SaiStatus::INVALID_OBJECT_TYPE);
        }
        Ok(stored)
    }

    fn object_mut(
        &mut self,
        object_type: ObjectType,
        key: &ObjectKey,
    ) -> DriverResult<&mut StoredObject> {
        let stored = self.objects.get_mut(key).ok_or_else(|| missing(key))?;
        if stored.object_type != object_type {
            return Err(SaiStatus::INVALID_OBJECT_TYPE);
        }
        Ok(stored)
    }

    fn oid_attr(&self, oid: ObjectId, attr_id: AttrId) -> Option<ObjectId> {
        match self.objects.get(&ObjectKey::Oid(oid))?.attrs.get(&attr_id)? {
            AttrValue::Oid(value) => Some(*value),
            _ => None,
        }
    }

    /// Adds or removes `member` in an object-list attribute of `owner`.
    fn update_member_list(
        &mut self,
        owner: ObjectId,
        attr_id: AttrId,
        member: ObjectId,
        add: bool,
    ) {
        let Some(stored) = self.objects.get_mut(&ObjectKey::Oid(owner)) else {
            return;
        };
        let mut members: Vec<ObjectId> = match stored.attrs.get(&attr_id) {
            Some(AttrValue::ObjList(list)) => list.as_slice().to_vec(),
            _ => Vec::new(),
        };
        members.retain(|oid| *oid != member);
        if add {
            members.push(member);
        }
        if let Ok(list) = NativeList::from_slice(&members) {
            stored.attrs.insert(attr_id, AttrValue::ObjList(list));
        }
    }

    fn seed_switch(
        &mut self,
        config: &MemoryDriverConfig,
        attrs: &[Attribute],
    ) -> DriverResult<ObjectId> {
        let switch_id = self.alloc(ObjectType::Switch);
        self.switch_id = switch_id;

        let src_mac = attrs
            .iter()
            .find_map(|attr| match (attr.id, &attr.value) {
                (ids::switch::SRC_MAC_ADDRESS, AttrValue::Mac(mac)) => Some(*mac),
                _ => None,
            })
            .unwrap_or(MacAddress::ZERO);

        let cpu_port = self.alloc(ObjectType::Port);
        self.insert(
            cpu_port,
            ObjectType::Port,
            [
                (ids::port::TYPE, AttrValue::S32(ids::port::TYPE_CPU)),
                (ids::port::OPER_STATUS, AttrValue::S32(ids::port::OPER_STATUS_UP)),
            ],
        );

        let mut ports = Vec::new();
        for index in 0..config.front_ports {
            ports.push(self.seed_port(config, index)?);
        }

        let vr = self.alloc(ObjectType::VirtualRouter);
        self.insert(
            vr,
            ObjectType::VirtualRouter,
            [
                (ids::virtual_router::ADMIN_V4_STATE, AttrValue::Bool(true)),
                (ids::virtual_router::ADMIN_V6_STATE, AttrValue::Bool(true)),
                (ids::virtual_router::SRC_MAC_ADDRESS, AttrValue::Mac(src_mac)),
            ],
        );

        let bridge = self.alloc(ObjectType::Bridge);
        let mut bridge_ports = Vec::new();
        for port in &ports {
            let bridge_port = self.alloc(ObjectType::BridgePort);
            self.insert(
                bridge_port,
                ObjectType::BridgePort,
                [
                    (ids::bridge_port::TYPE, AttrValue::S32(ids::bridge_port::TYPE_PORT)),
                    (ids::bridge_port::PORT_ID, AttrValue::Oid(*port)),
                    (ids::bridge_port::BRIDGE_ID, AttrValue::Oid(bridge)),
                    (ids::bridge_port::ADMIN_STATE, AttrValue::Bool(true)),
                ],
            );
            bridge_ports.push(bridge_port);
        }
        self.insert(
            bridge,
            ObjectType::Bridge,
            [
                (ids::bridge::TYPE, AttrValue::S32(ids::bridge::TYPE_1Q)),
                (ids::bridge::PORT_LIST, obj_list(&bridge_ports)?),
            ],
        );

        let vlan = self.alloc(ObjectType::Vlan);
        self.insert(
            vlan,
            ObjectType::Vlan,
            [
                (ids::vlan::VLAN_ID, AttrValue::U16(1)),
                (ids::vlan::MEMBER_LIST, obj_list(&[])?),
            ],
        );

        let trap_group = self.alloc(ObjectType::HostifTrapGroup);
        self.insert(
            trap_group,
            ObjectType::HostifTrapGroup,
            [
                (ids::hostif_trap_group::ADMIN_STATE, AttrValue::Bool(true)),
                (ids::hostif_trap_group::QUEUE, AttrValue::U32(0)),
            ],
        );

        let mut switch_attrs: BTreeMap<AttrId, AttrValue> = [
            (ids::switch::PORT_NUMBER, AttrValue::U32(config.front_ports)),
            (ids::switch::PORT_LIST, obj_list(&ports)?),
            (ids::switch::CPU_PORT, AttrValue::Oid(cpu_port)),
            (ids::switch::DEFAULT_VLAN_ID, AttrValue::Oid(vlan)),
            (ids::switch::DEFAULT_VIRTUAL_ROUTER_ID, AttrValue::Oid(vr)),
            (ids::switch::DEFAULT_1Q_BRIDGE_ID, AttrValue::Oid(bridge)),
            (ids::switch::DEFAULT_TRAP_GROUP, AttrValue::Oid(trap_group)),
            (ids::switch::TYPE, AttrValue::S32(config.switch_type)),
            (ids::switch::OPER_STATUS, AttrValue::S32(1)),
            (ids::switch::SRC_MAC_ADDRESS, AttrValue::Mac(src_mac)),
            (ids::switch::FDB_AGING_TIME, AttrValue::U32(DEFAULT_FDB_AGING_TIME)),
            (ids::switch::SWITCH_SHELL_ENABLE, AttrValue::Bool(false)),
        ]
        .into_iter()
        .collect();

        if config.switch_type == ids::switch::TYPE_VOQ {
            let mut system_ports = Vec::new();
            for (index, port) in (0u32..).zip(&ports) {
                let system_port = self.alloc(ObjectType::SystemPort);
                let mut voqs = Vec::new();
                for voq_index in 0..config.voqs_per_system_port {
                    let voq = self.alloc(ObjectType::Queue);
                    self.insert(
                        voq,
                        ObjectType::Queue,
                        [
                            (ids::queue::PORT, AttrValue::Oid(system_port)),
                            (ids::queue::INDEX, AttrValue::U8(voq_index as u8)),
                        ],
                    );
                    voqs.push(voq);
                }
                let config_info = SystemPortConfig {
                    port_id: index,
                    attached_switch_id: 0,
                    attached_core_index: 0,
                    attached_core_port_index: index,
                    speed: DEFAULT_PORT_SPEED,
                    num_voq: config.voqs_per_system_port,
                };
                self.insert(
                    system_port,
                    ObjectType::SystemPort,
                    [
                        (ids::system_port::PORT, AttrValue::Oid(*port)),
                        (
                            ids::system_port::QOS_NUMBER_OF_VOQS,
                            AttrValue::U32(config.voqs_per_system_port),
                        ),
                        (ids::system_port::QOS_VOQ_LIST, obj_list(&voqs)?),
                        (ids::system_port::ADMIN_STATE, AttrValue::Bool(true)),
                        (ids::system_port::CONFIG_INFO, AttrValue::SysPortConfig(config_info)),
                    ],
                );
                system_ports.push(system_port);
            }
            switch_attrs.insert(
                ids::switch::NUMBER_OF_SYSTEM_PORTS,
                AttrValue::U32(u32::try_from(system_ports.len()).unwrap_or(u32::MAX)),
            );
            switch_attrs.insert(ids::switch::SYSTEM_PORT_LIST, obj_list(&system_ports)?);
        }

        for attr in attrs {
            switch_attrs.insert(attr.id, attr.value.clone());
        }
        self.insert(switch_id, ObjectType::Switch, switch_attrs);

        info!(
            "Memory driver seeded switch {} with {} front ports",
            switch_id, config.front_ports
        );
        Ok(switch_id)
    }

    fn seed_port(&mut self, config: &MemoryDriverConfig, index: u32) -> DriverResult<ObjectId> {
        let port = self.alloc(ObjectType::Port);

        let mut queues = Vec::new();
        for queue_index in 0..config.queues_per_port {
            let queue = self.alloc(ObjectType::Queue);
            self.insert(
                queue,
                ObjectType::Queue,
                [
                    (ids::queue::PORT, AttrValue::Oid(port)),
                    (ids::queue::INDEX, AttrValue::U8(queue_index as u8)),
                ],
            );
            queues.push(queue);
        }

        let mut pgs = Vec::new();
        for pg_index in 0..config.priority_groups_per_port {
            let pg = self.alloc(ObjectType::IngressPriorityGroup);
            self.insert(
                pg,
                ObjectType::IngressPriorityGroup,
                [
                    (ids::ingress_priority_group::PORT, AttrValue::Oid(port)),
                    (ids::ingress_priority_group::INDEX, AttrValue::U8(pg_index as u8)),
                ],
            );
            pgs.push(pg);
        }

        let lanes = NativeList::from_slice(&config.lanes_of(index))
            .map_err(|_| SaiStatus::NO_MEMORY)?;
        self.insert(
            port,
            ObjectType::Port,
            [
                (ids::port::TYPE, AttrValue::S32(ids::port::TYPE_LOGICAL)),
                (ids::port::OPER_STATUS, AttrValue::S32(ids::port::OPER_STATUS_DOWN)),
                (ids::port::HW_LANE_LIST, AttrValue::U32List(lanes)),
                (ids::port::SPEED, AttrValue::U32(DEFAULT_PORT_SPEED)),
                (ids::port::ADMIN_STATE, AttrValue::Bool(false)),
                (ids::port::MTU, AttrValue::U32(DEFAULT_PORT_MTU)),
                (ids::port::PORT_VLAN_ID, AttrValue::U16(1)),
                (ids::port::QOS_NUMBER_OF_QUEUES, AttrValue::U32(config.queues_per_port)),
                (ids::port::QOS_QUEUE_LIST, obj_list(&queues)?),
                (
                    ids::port::NUMBER_OF_INGRESS_PRIORITY_GROUPS,
                    AttrValue::U32(config.priority_groups_per_port),
                ),
                (ids::port::INGRESS_PRIORITY_GROUP_LIST, obj_list(&pgs)?),
            ],
        );
        Ok(port)
    }
}

fn obj_list(oids: &[ObjectId]) -> DriverResult<AttrValue> {
    NativeList::from_slice(oids)
        .map(AttrValue::ObjList)
        .map_err(|_| SaiStatus::NO_MEMORY)
}

fn missing(key: &ObjectKey) -> SaiStatus {
    match key {
        ObjectKey::Oid(_) => SaiStatus::INVALID_OBJECT_ID,
        ObjectKey::Entry(_) => SaiStatus::ITEM_NOT_FOUND,
    }
}

fn entry_switch_id(key: &EntryKey) -> ObjectId {
    match key {
        EntryKey::Fdb(e) => e.switch_id,
        EntryKey::Route(e) => e.switch_id,
        EntryKey::Neighbor(e) => e.switch_id,
    }
}

/// Copies a stored value into a caller-provided slot.
///
/// List slots keep their buffer; the stored list is copied into it and an
/// undersized buffer reports `BUFFER_OVERFLOW` with the needed count.
fn fill_value(slot: &mut AttrValue, stored: &AttrValue) -> DriverResult<()> {
    if !stored.is_list() {
        *slot = stored.clone();
        return Ok(());
    }
    match (slot, stored) {
        (AttrValue::ObjList(dst), AttrValue::ObjList(src)) => dst.fill_from(src.as_slice()),
        (AttrValue::U8List(dst), AttrValue::U8List(src)) => dst.fill_from(src.as_slice()),
        (AttrValue::S32List(dst), AttrValue::S32List(src)) => dst.fill_from(src.as_slice()),
        (AttrValue::U32List(dst), AttrValue::U32List(src)) => dst.fill_from(src.as_slice()),
        (AttrValue::QosMapList(dst), AttrValue::QosMapList(src)) => dst.fill_from(src.as_slice()),
        _ => Err(SaiStatus::INVALID_PARAMETER),
    }
}

/// An in-memory [`SaiDriver`].
pub struct MemoryDriver {
    config: RwLock<MemoryDriverConfig>,
    state: Mutex<State>,
    notifications: RwLock<Option<Arc<dyn SwitchNotifications>>>,
}

impl Default for MemoryDriver {
    fn default() -> Self {
        Self::new(MemoryDriverConfig::default())
    }
}

impl MemoryDriver {
    pub fn new(config: MemoryDriverConfig) -> Self {
        MemoryDriver {
            config: RwLock::new(config),
            state: Mutex::new(State::default()),
            notifications: RwLock::new(None),
        }
    }

    pub fn config(&self) -> MemoryDriverConfig {
        self.config.read().clone()
    }

    /// The seeded switch, null before switch create.
    pub fn switch_id(&self) -> ObjectId {
        self.state.lock().switch_id
    }

    /// True when an object exists under `key`.
    pub fn contains(&self, key: &ObjectKey) -> bool {
        self.state.lock().objects.contains_key(key)
    }

    /// Sets a counter read back by `get_stats`.
    pub fn set_counter(&self, oid: ObjectId, counter_id: StatId, value: u64) {
        self.state.lock().counters.insert((oid, counter_id), value);
    }

    /// Makes the next driver call fail with `status`.
    pub fn fail_next(&self, status: SaiStatus) {
        self.state.lock().pending_failure = Some(status);
    }

    /// Makes `api_query` fail for `api`.
    pub fn disable_api(&self, api: SaiApi) {
        self.state.lock().disabled_apis.insert(api);
    }

    pub fn enable_api(&self, api: SaiApi) {
        self.state.lock().disabled_apis.remove(&api);
    }

    fn handler(&self) -> Option<Arc<dyn SwitchNotifications>> {
        self.notifications.read().clone()
    }

    /// Delivers an FDB event batch to the registered handler.
    pub fn emit_fdb_events(&self, events: &[FdbEventNotification]) {
        if let Some(handler) = self.handler() {
            handler.on_fdb_event(events);
        }
    }

    pub fn emit_port_state(&self, changes: &[PortOperStatusNotification]) {
        if let Some(handler) = self.handler() {
            handler.on_port_state_change(changes);
        }
    }

    pub fn emit_switch_state(&self, status: i32) {
        let switch_id = self.switch_id();
        if let Some(handler) = self.handler() {
            handler.on_switch_state_change(switch_id, status);
        }
    }

    pub fn emit_shutdown_request(&self) {
        let switch_id = self.switch_id();
        if let Some(handler) = self.handler() {
            handler.on_switch_shutdown_request(switch_id);
        }
    }

    fn check_switch(state: &State, switch_id: ObjectId) -> DriverResult<()> {
        if state.switch_id.is_null() || state.switch_id != switch_id {
            return Err(SaiStatus::INVALID_OBJECT_ID);
        }
        Ok(())
    }
}

impl SaiDriver for MemoryDriver {
    fn api_version(&self) -> DriverResult<u64> {
        Ok(self.config.read().api_version)
    }

    fn initialize(&self, profile: Arc<dyn ProfileServices>) -> DriverResult<()> {
        let mut cursor = ProfileCursor::new();
        while let Some((key, value)) = profile.next_value(&mut cursor) {
            debug!("Memory driver profile {}={}", key, value);
        }

        let mut config = self.config.write();
        if let Some(value) = profile.get_value(PROFILE_FRONT_PORTS) {
            match value.trim().parse::<u32>() {
                Ok(count) => config.front_ports = count,
                Err(_) => warn!("Ignoring {}={}: not a port count", PROFILE_FRONT_PORTS, value),
            }
        }
        if let Some(value) = profile.get_value(PROFILE_SWITCH_TYPE) {
            match value.trim().to_ascii_lowercase().as_str() {
                "npu" => config.switch_type = ids::switch::TYPE_NPU,
                "voq" => config.switch_type = ids::switch::TYPE_VOQ,
                other => warn!("Ignoring {}={}: unknown switch type", PROFILE_SWITCH_TYPE, other),
            }
        }
        Ok(())
    }

    fn api_query(&self, api: SaiApi) -> DriverResult<()> {
        if self.state.lock().disabled_apis.contains(&api) {
            return Err(SaiStatus::NOT_IMPLEMENTED);
        }
        Ok(())
    }

    fn register_notifications(&self, handler: Arc<dyn SwitchNotifications>) -> DriverResult<()> {
        *self.notifications.write() = Some(handler);
        Ok(())
    }

    fn create_object(
        &self,
        object_type: ObjectType,
        switch_id: ObjectId,
        attrs: &[Attribute],
    ) -> DriverResult<ObjectId> {
        let config = self.config();
        let mut state = self.state.lock();
        state.take_failure()?;

        if object_type == ObjectType::Switch {
            if !state.switch_id.is_null() {
                return Err(SaiStatus::ITEM_ALREADY_EXISTS);
            }
            return state.seed_switch(&config, attrs);
        }

        Self::check_switch(&state, switch_id)?;
        let oid = state.alloc(object_type);
        state.insert(
            oid,
            object_type,
            attrs.iter().map(|attr| (attr.id, attr.value.clone())),
        );

        if object_type == ObjectType::BridgePort {
            if let Some(bridge) = state.oid_attr(oid, ids::bridge_port::BRIDGE_ID) {
                state.update_member_list(bridge, ids::bridge::PORT_LIST, oid, true);
            }
        }
        // The driver owns debug counter indexes.
        if object_type == ObjectType::DebugCounter {
            let index = state.next_debug_counter_index;
            state.next_debug_counter_index += 1;
            if let Some(stored) = state.objects.get_mut(&ObjectKey::Oid(oid)) {
                stored
                    .attrs
                    .insert(ids::debug_counter::INDEX, AttrValue::U32(index));
            }
        }
        Ok(oid)
    }

    fn create_entry(&self, key: &EntryKey, attrs: &[Attribute]) -> DriverResult<()> {
        let mut state = self.state.lock();
        state.take_failure()?;
        Self::check_switch(&state, entry_switch_id(key))?;

        let object_key = ObjectKey::Entry(*key);
        if state.objects.contains_key(&object_key) {
            return Err(SaiStatus::ITEM_ALREADY_EXISTS);
        }
        state.objects.insert(
            object_key,
            StoredObject {
                object_type: key.object_type(),
                attrs: attrs.iter().map(|attr| (attr.id, attr.value.clone())).collect(),
            },
        );
        Ok(())
    }

    fn remove(&self, object_type: ObjectType, key: &ObjectKey) -> DriverResult<()> {
        let mut state = self.state.lock();
        state.take_failure()?;
        state.object(object_type, key)?;

        if let (ObjectType::BridgePort, ObjectKey::Oid(oid)) = (object_type, key) {
            if let Some(bridge) = state.oid_attr(*oid, ids::bridge_port::BRIDGE_ID) {
                state.update_member_list(bridge, ids::bridge::PORT_LIST, *oid, false);
            }
        }
        state.objects.remove(key);
        if let ObjectKey::Oid(oid) = key {
            state.counters.retain(|(counter_oid, _), _| counter_oid != oid);
        }
        Ok(())
    }

    fn set_attribute(
        &self,
        object_type: ObjectType,
        key: &ObjectKey,
        attr: &Attribute,
    ) -> DriverResult<()> {
        let mut changed = None;
        {
            let mut state = self.state.lock();
            state.take_failure()?;
            let stored = state.object_mut(object_type, key)?;
            stored.attrs.insert(attr.id, attr.value.clone());

            // Admin state drives the link in this model.
            if let (ObjectType::Port, ObjectKey::Oid(port_id), ids::port::ADMIN_STATE) =
                (object_type, key, attr.id)
            {
                if let AttrValue::Bool(up) = attr.value {
                    let port_state = if up {
                        ids::port::OPER_STATUS_UP
                    } else {
                        ids::port::OPER_STATUS_DOWN
                    };
                    let previous = stored
                        .attrs
                        .insert(ids::port::OPER_STATUS, AttrValue::S32(port_state));
                    if previous != Some(AttrValue::S32(port_state)) {
                        changed = Some(PortOperStatusNotification {
                            port_id: *port_id,
                            port_state,
                        });
                    }
                }
            }
        }

        if let Some(change) = changed {
            self.emit_port_state(&[change]);
        }
        Ok(())
    }

    fn get_attributes(
        &self,
        object_type: ObjectType,
        key: &ObjectKey,
        attrs: &mut [Attribute],
    ) -> DriverResult<()> {
        let mut state = self.state.lock();
        state.take_failure()?;
        let stored = state.object(object_type, key)?;

        for (index, attr) in attrs.iter_mut().enumerate() {
            let value = stored
                .attrs
                .get(&attr.id)
                .ok_or_else(|| SaiStatus::invalid_attribute(index))?;
            fill_value(&mut attr.value, value).map_err(|status| {
                if status == SaiStatus::BUFFER_OVERFLOW {
                    status
                } else {
                    SaiStatus::invalid_attr_value(index)
                }
            })?;
        }
        Ok(())
    }

    fn get_stats(
        &self,
        object_type: ObjectType,
        oid: ObjectId,
        counter_ids: &[StatId],
    ) -> DriverResult<Vec<u64>> {
        let mut state = self.state.lock();
        state.take_failure()?;
        state.object(object_type, &ObjectKey::Oid(oid))?;
        Ok(counter_ids
            .iter()
            .map(|id| state.counters.get(&(oid, *id)).copied().unwrap_or(0))
            .collect())
    }

    fn clear_stats(
        &self,
        object_type: ObjectType,
        oid: ObjectId,
        counter_ids: &[StatId],
    ) -> DriverResult<()> {
        let mut state = self.state.lock();
        state.take_failure()?;
        state.object(object_type, &ObjectKey::Oid(oid))?;
        for id in counter_ids {
            state.counters.remove(&(oid, *id));
        }
        Ok(())
    }

    fn clear_port_all_stats(&self, port_id: ObjectId) -> DriverResult<()> {
        let mut state = self.state.lock();
        state.take_failure()?;
        state.object(ObjectType::Port, &ObjectKey::Oid(port_id))?;
        state.counters.retain(|(oid, _), _| *oid != port_id);
        Ok(())
    }

    fn flush_fdb_entries(&self, switch_id: ObjectId, attrs: &[Attribute]) -> DriverResult<()> {
        let mut bridge_port = ObjectId::NULL;
        let mut bv_id = ObjectId::NULL;
        let mut entry_type = ids::fdb_flush::ENTRY_TYPE_DYNAMIC;
        for (index, attr) in attrs.iter().enumerate() {
            match (attr.id, &attr.value) {
                (ids::fdb_flush::BRIDGE_PORT_ID, AttrValue::Oid(oid)) => bridge_port = *oid,
                (ids::fdb_flush::BV_ID, AttrValue::Oid(oid)) => bv_id = *oid,
                (ids::fdb_flush::ENTRY_TYPE, AttrValue::S32(value)) => entry_type = *value,
                _ => return Err(SaiStatus::invalid_attribute(index)),
            }
        }

        let flushed = {
            let mut state = self.state.lock();
            state.take_failure()?;
            Self::check_switch(&state, switch_id)?;

            let before = state.objects.len();
            state.objects.retain(|key, stored| {
                let ObjectKey::Entry(EntryKey::Fdb(fdb)) = key else {
                    return true;
                };
                let port = match stored.attrs.get(&ids::fdb_entry::BRIDGE_PORT_ID) {
                    Some(AttrValue::Oid(oid)) => *oid,
                    _ => ObjectId::NULL,
                };
                let stored_type = match stored.attrs.get(&ids::fdb_entry::TYPE) {
                    Some(AttrValue::S32(value)) => *value,
                    _ => ids::fdb_entry::TYPE_DYNAMIC,
                };
                let type_matches = match entry_type {
                    ids::fdb_flush::ENTRY_TYPE_ALL => true,
                    ids::fdb_flush::ENTRY_TYPE_STATIC => stored_type == ids::fdb_entry::TYPE_STATIC,
                    _ => stored_type == ids::fdb_entry::TYPE_DYNAMIC,
                };
                let matches = type_matches
                    && (bv_id.is_null() || fdb.bv_id == bv_id)
                    && (bridge_port.is_null() || port == bridge_port);
                !matches
            });
            before - state.objects.len()
        };
        debug!(
            "Memory driver flushed {} FDB entries (bv {}, port {})",
            flushed, bv_id, bridge_port
        );

        let mut flush_attrs = Vec::new();
        if !bridge_port.is_null() {
            flush_attrs.push(Attribute::new(
                ids::fdb_entry::BRIDGE_PORT_ID,
                AttrValue::Oid(bridge_port),
            ));
        }
        if entry_type == ids::fdb_flush::ENTRY_TYPE_STATIC {
            flush_attrs.push(Attribute::new(
                ids::fdb_entry::TYPE,
                AttrValue::S32(ids::fdb_entry::TYPE_STATIC),
            ));
        }
        self.emit_fdb_events(&[FdbEventNotification {
            event_type: ids::fdb_entry::EVENT_FLUSHED,
            fdb_entry: FdbEntryKey {
                switch_id,
                mac: MacAddress::ZERO,
                bv_id,
            },
            attrs: flush_attrs,
        }]);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn small_driver() -> (MemoryDriver, ObjectId) {
        let driver = MemoryDriver::new(MemoryDriverConfig {
            front_ports: 4,
            ..Default::default()
        });
        let switch_id = driver
            .create_object(
                ObjectType::Switch,
                ObjectId::NULL,
                &[Attribute::new(ids::switch::INIT_SWITCH, AttrValue::Bool(true))],
            )
            .unwrap();
        (driver, switch_id)
    }

    fn get_oid_list(
        driver: &MemoryDriver,
        object_type: ObjectType,
        oid: ObjectId,
        attr_id: AttrId,
        len: usize,
    ) -> Vec<ObjectId> {
        let mut attrs = [Attribute::new(
            attr_id,
            AttrValue::ObjList(NativeList::with_len(len).unwrap()),
        )];
        driver
            .get_attributes(object_type, &ObjectKey::Oid(oid), &mut attrs)
            .unwrap();
        match &attrs[0].value {
            AttrValue::ObjList(list) => list.as_slice().to_vec(),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_switch_seeding() {
        let (driver, switch_id) = small_driver();
        assert_eq!(driver.switch_id(), switch_id);

        let ports = get_oid_list(
            &driver,
            ObjectType::Switch,
            switch_id,
            ids::switch::PORT_LIST,
            16,
        );
        assert_eq!(ports.len(), 4);

        let queues = get_oid_list(
            &driver,
            ObjectType::Port,
            ports[0],
            ids::port::QOS_QUEUE_LIST,
            8,
        );
        assert_eq!(queues.len(), 8);
    }

    #[test]
    fn test_second_switch_create_fails() {
        let (driver, _) = small_driver();
        let result = driver.create_object(ObjectType::Switch, ObjectId::NULL, &[]);
        assert_eq!(result, Err(SaiStatus::ITEM_ALREADY_EXISTS));
    }

    #[test]
    fn test_list_overflow_reports_count() {
        let (driver, switch_id) = small_driver();
        let mut attrs = [Attribute::new(
            ids::switch::PORT_LIST,
            AttrValue::ObjList(NativeList::with_len(2).unwrap()),
        )];
        let result =
            driver.get_attributes(ObjectType::Switch, &ObjectKey::Oid(switch_id), &mut attrs);
        assert_eq!(result, Err(SaiStatus::BUFFER_OVERFLOW));
        match &attrs[0].value {
            AttrValue::ObjList(list) => assert_eq!(list.count(), 4),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_missing_attribute_is_indexed() {
        let (driver, switch_id) = small_driver();
        let mut attrs = [
            Attribute::new(ids::switch::PORT_NUMBER, AttrValue::U32(0)),
            Attribute::new(ids::switch::ECMP_DEFAULT_HASH_SEED, AttrValue::U32(0)),
        ];
        let result =
            driver.get_attributes(ObjectType::Switch, &ObjectKey::Oid(switch_id), &mut attrs);
        assert_eq!(result, Err(SaiStatus::invalid_attribute(1)));
    }

    #[test]
    fn test_bridge_port_membership_follows_create_and_remove() {
        let (driver, switch_id) = small_driver();
        let bridge = driver
            .create_object(
                ObjectType::Bridge,
                switch_id,
                &[Attribute::new(ids::bridge::TYPE, AttrValue::S32(ids::bridge::TYPE_1D))],
            )
            .unwrap();
        let bridge_port = driver
            .create_object(
                ObjectType::BridgePort,
                switch_id,
                &[Attribute::new(ids::bridge_port::BRIDGE_ID, AttrValue::Oid(bridge))],
            )
            .unwrap();
        assert_eq!(
            get_oid_list(&driver, ObjectType::Bridge, bridge, ids::bridge::PORT_LIST, 4),
            vec![bridge_port]
        );

        driver
            .remove(ObjectType::BridgePort, &ObjectKey::Oid(bridge_port))
            .unwrap();
        assert!(
            get_oid_list(&driver, ObjectType::Bridge, bridge, ids::bridge::PORT_LIST, 4).is_empty()
        );
    }

    #[test]
    fn test_fail_next_applies_once() {
        let (driver, switch_id) = small_driver();
        driver.fail_next(SaiStatus::TABLE_FULL);
        let result = driver.create_object(ObjectType::Vlan, switch_id, &[]);
        assert_eq!(result, Err(SaiStatus::TABLE_FULL));
        assert!(driver.create_object(ObjectType::Vlan, switch_id, &[]).is_ok());
    }

    #[test]
    fn test_disabled_api() {
        let driver = MemoryDriver::default();
        driver.disable_api(SaiApi::Acl);
        assert_eq!(driver.api_query(SaiApi::Acl), Err(SaiStatus::NOT_IMPLEMENTED));
        assert_eq!(driver.api_query(SaiApi::Port), Ok(()));
        driver.enable_api(SaiApi::Acl);
        assert_eq!(driver.api_query(SaiApi::Acl), Ok(()));
    }

    #[test]
    fn test_counters() {
        let (driver, switch_id) = small_driver();
        let ports = get_oid_list(&driver, ObjectType::Switch, switch_id, ids::switch::PORT_LIST, 4);
        driver.set_counter(ports[0], 0, 42);
        driver.set_counter(ports[0], 1, 7);

        let values = driver.get_stats(ObjectType::Port, ports[0], &[0, 1, 2]).unwrap();
        assert_eq!(values, vec![42, 7, 0]);

        driver.clear_stats(ObjectType::Port, ports[0], &[0]).unwrap();
        assert_eq!(driver.get_stats(ObjectType::Port, ports[0], &[0, 1]).unwrap(), vec![0, 7]);

        driver.clear_port_all_stats(ports[0]).unwrap();
        assert_eq!(driver.get_stats(ObjectType::Port, ports[0], &[1]).unwrap(), vec![0]);
    }

    #[test]
    fn test_debug_counter_index_assigned() {
        let (driver, switch_id) = small_driver();
        let mut indexes = Vec::new();
        for _ in 0..2 {
            let counter = driver
                .create_object(
                    ObjectType::DebugCounter,
                    switch_id,
                    &[Attribute::new(
                        ids::debug_counter::TYPE,
                        AttrValue::S32(ids::debug_counter::TYPE_SWITCH_IN_DROP_REASONS),
                    )],
                )
                .unwrap();
            let mut attrs = [Attribute::new(ids::debug_counter::INDEX, AttrValue::U32(0))];
            driver
                .get_attributes(ObjectType::DebugCounter, &ObjectKey::Oid(counter), &mut attrs)
                .unwrap();
            indexes.push(attrs[0].value.clone());
        }
        assert_eq!(indexes, vec![AttrValue::U32(0), AttrValue::U32(1)]);
    }

    #[test]
    fn test_wrong_object_type() {
        let (driver, switch_id) = small_driver();
        let result = driver.get_stats(ObjectType::Queue, switch_id, &[0]);
        assert_eq!(result, Err(SaiStatus::INVALID_OBJECT_TYPE));
    }

    #[test]
    fn test_lanes_are_numbered_from_one() {
        let config = MemoryDriverConfig::default();
        assert_eq!(config.lanes_of(0), vec![1, 2, 3, 4]);
        assert_eq!(config.lanes_of(2), vec![9, 10, 11, 12]);
    }
}
