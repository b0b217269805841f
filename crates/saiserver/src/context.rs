//! Switch context: everything a request handler needs, built once.

use crate::codec::AttributeCodec;
use crate::config::ServerConfig;
use crate::error::Result;
use crate::fdb::FdbEventCache;
use crate::notify::{NotificationHandler, PortStatusTable, ShutdownSignal};
use crate::port_map::PortMap;
use crate::profile::ProfileMap;
use crate::schema::SchemaRegistry;
use log::{error, info};
use sai_native::{
    ids, AttrValue, Attribute, ObjectId, ObjectType, SaiApi, SaiDriver, SaiError, SaiResult,
};
use std::sync::Arc;

/// The bootstrapped switch and the state shared by every handler.
///
/// The switch id is fixed at bootstrap. The FDB cache is the only state
/// handlers and notifications both write to.
pub struct SwitchContext {
    driver: Arc<dyn SaiDriver>,
    switch_id: ObjectId,
    codec: AttributeCodec,
    fdb: Arc<FdbEventCache>,
    port_status: Arc<PortStatusTable>,
    shutdown: Arc<ShutdownSignal>,
    profile: Arc<ProfileMap>,
    port_map: PortMap,
}

impl SwitchContext {
    /// Initializes the driver and creates the switch.
    pub fn bootstrap(
        driver: Arc<dyn SaiDriver>,
        config: &ServerConfig,
        profile: ProfileMap,
        port_map: PortMap,
    ) -> Result<Self> {
        let src_mac = config.src_mac()?;
        let profile = Arc::new(profile);

        driver
            .initialize(profile.clone())
            .map_err(SaiError::driver)?;

        let version = driver.api_version().map_err(SaiError::driver)?;
        info!(
            "SAI API version {}.{}.{}",
            version / 10000,
            (version % 10000) / 100,
            version % 100
        );

        driver.api_query(SaiApi::Switch).map_err(|status| {
            error!("Switch API unavailable: {}", status);
            SaiError::ApiUnavailable {
                api: SaiApi::Switch,
                status,
            }
        })?;

        let fdb = Arc::new(FdbEventCache::new());
        let port_status = Arc::new(PortStatusTable::new());
        let shutdown = Arc::new(ShutdownSignal::new());
        let handler = NotificationHandler::new(fdb.clone(), port_status.clone(), shutdown.clone());
        driver
            .register_notifications(Arc::new(handler))
            .map_err(SaiError::driver)?;

        let attrs = [
            Attribute::new(ids::switch::INIT_SWITCH, AttrValue::Bool(true)),
            Attribute::new(ids::switch::SRC_MAC_ADDRESS, AttrValue::Mac(src_mac)),
        ];
        let switch_id = driver
            .create_object(ObjectType::Switch, ObjectId::NULL, &attrs)
            .map_err(|status| {
                error!("Failed to create switch: {}", status);
                SaiError::driver(status)
            })?;
        info!("Created switch {} with source MAC {}", switch_id, src_mac);

        let codec = AttributeCodec::new(
            Arc::new(SchemaRegistry::new()),
            config.codec.unsupported_policy,
        );

        Ok(Self {
            driver,
            switch_id,
            codec,
            fdb,
            port_status,
            shutdown,
            profile,
            port_map,
        })
    }

    pub fn driver(&self) -> &dyn SaiDriver {
        self.driver.as_ref()
    }

    pub fn switch_id(&self) -> ObjectId {
        self.switch_id
    }

    pub fn codec(&self) -> &AttributeCodec {
        &self.codec
    }

    pub fn fdb(&self) -> &FdbEventCache {
        &self.fdb
    }

    pub fn port_status(&self) -> &PortStatusTable {
        &self.port_status
    }

    pub fn shutdown(&self) -> Arc<ShutdownSignal> {
        self.shutdown.clone()
    }

    pub fn profile(&self) -> &ProfileMap {
        &self.profile
    }

    pub fn port_map(&self) -> &PortMap {
        &self.port_map
    }

    /// Confirms the API table of `object_type` is available.
    pub fn api(&self, object_type: ObjectType) -> SaiResult<()> {
        let api = object_type.api();
        self.driver
            .api_query(api)
            .map_err(|status| SaiError::ApiUnavailable { api, status })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServerError;
    use pretty_assertions::assert_eq;
    use sai_native::{MemoryDriver, MemoryDriverConfig, ObjectKey, SaiStatus};
    use sai_types::MacAddress;

    fn memory_driver() -> Arc<MemoryDriver> {
        Arc::new(MemoryDriver::new(MemoryDriverConfig {
            front_ports: 4,
            ..Default::default()
        }))
    }

    #[test]
    fn test_bootstrap_creates_switch() {
        let driver = memory_driver();
        let context = SwitchContext::bootstrap(
            driver.clone(),
            &ServerConfig::default(),
            ProfileMap::new(),
            PortMap::new(),
        )
        .unwrap();

        assert_eq!(context.switch_id(), driver.switch_id());
        let mut attrs = [Attribute::new(
            ids::switch::SRC_MAC_ADDRESS,
            AttrValue::Mac(MacAddress::ZERO),
        )];
        driver
            .get_attributes(
                ObjectType::Switch,
                &ObjectKey::Oid(context.switch_id()),
                &mut attrs,
            )
            .unwrap();
        assert_eq!(
            attrs[0].value,
            AttrValue::Mac(MacAddress::new([0x11, 0x22, 0x33, 0x44, 0x55, 0x66]))
        );
    }

    #[test]
    fn test_profile_reaches_driver() {
        let driver = memory_driver();
        let mut profile = ProfileMap::new();
        profile.insert(sai_native::memory::PROFILE_FRONT_PORTS, "2");
        SwitchContext::bootstrap(driver.clone(), &ServerConfig::default(), profile, PortMap::new())
            .unwrap();
        assert_eq!(driver.config().front_ports, 2);
    }

    #[test]
    fn test_switch_api_unavailable_is_fatal() {
        let driver = memory_driver();
        driver.disable_api(SaiApi::Switch);
        let result = SwitchContext::bootstrap(
            driver.clone(),
            &ServerConfig::default(),
            ProfileMap::new(),
            PortMap::new(),
        );
        assert!(matches!(
            result,
            Err(ServerError::Bootstrap(SaiError::ApiUnavailable {
                api: SaiApi::Switch,
                ..
            }))
        ));
        assert!(driver.switch_id().is_null());
    }

    #[test]
    fn test_switch_create_failure_is_fatal() {
        let driver = memory_driver();
        driver.fail_next(SaiStatus::INSUFFICIENT_RESOURCES);
        let result = SwitchContext::bootstrap(
            driver,
            &ServerConfig::default(),
            ProfileMap::new(),
            PortMap::new(),
        );
        let Err(ServerError::Bootstrap(err)) = result else {
            panic!("expected bootstrap failure");
        };
        assert_eq!(err.status(), SaiStatus::INSUFFICIENT_RESOURCES);
    }

    #[test]
    fn test_api_check() {
        let driver = memory_driver();
        let context = SwitchContext::bootstrap(
            driver.clone(),
            &ServerConfig::default(),
            ProfileMap::new(),
            PortMap::new(),
        )
        .unwrap();
        driver.disable_api(SaiApi::Acl);
        assert!(context.api(ObjectType::Vlan).is_ok());
        assert_eq!(
            context.api(ObjectType::AclEntry).unwrap_err().status(),
            SaiStatus::NOT_IMPLEMENTED
        );
    }
}
