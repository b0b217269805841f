//! Vendor diagnostic shell poller.
//!
//! Some drivers only keep their shell alive while `SWITCH_SHELL_ENABLE` is
//! re-asserted, so the server sets it on a fixed interval once enabled.

use crate::codec::wire::{WireAttribute, WireValue};
use crate::rpc::SaiRpc;
use log::{error, info};
use sai_native::{ids, ObjectKey, ObjectType};
use std::time::Duration;

/// Sets `SWITCH_SHELL_ENABLE` every `interval` after `start_delay`.
///
/// Returns after the first failed set.
pub async fn run_diag_shell(rpc: SaiRpc, start_delay: Duration, interval: Duration) {
    tokio::time::sleep(start_delay).await;
    info!("Enabling diagnostic shell every {:?}", interval);

    let switch = ObjectKey::Oid(rpc.context().switch_id());
    let attr = WireAttribute::new(ids::switch::SWITCH_SHELL_ENABLE, WireValue::Bool(true));
    let mut ticker = tokio::time::interval(interval);
    loop {
        ticker.tick().await;
        let rpc = rpc.clone();
        let attr = attr.clone();
        let outcome = tokio::task::spawn_blocking(move || {
            rpc.set_attribute(ObjectType::Switch, &switch, &attr)
        })
        .await;
        match outcome {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                error!("Failed to enable diagnostic shell: {}", e);
                return;
            }
            Err(e) => {
                error!("Diagnostic shell task failed: {}", e);
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use crate::context::SwitchContext;
    use crate::port_map::PortMap;
    use crate::profile::ProfileMap;
    use pretty_assertions::assert_eq;
    use sai_native::{AttrValue, Attribute, MemoryDriver, MemoryDriverConfig, SaiDriver, SaiStatus};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_poller_sets_shell_and_stops_on_failure() {
        let driver = Arc::new(MemoryDriver::new(MemoryDriverConfig {
            front_ports: 1,
            ..Default::default()
        }));
        let context = SwitchContext::bootstrap(
            driver.clone(),
            &ServerConfig::default(),
            ProfileMap::new(),
            PortMap::new(),
        )
        .unwrap();
        let rpc = SaiRpc::new(Arc::new(context));

        let poller = tokio::spawn(run_diag_shell(
            rpc,
            Duration::from_millis(1),
            Duration::from_millis(5),
        ));
        tokio::time::sleep(Duration::from_millis(30)).await;

        let mut attrs = [Attribute::new(
            ids::switch::SWITCH_SHELL_ENABLE,
            AttrValue::Bool(false),
        )];
        driver
            .get_attributes(
                ObjectType::Switch,
                &ObjectKey::Oid(driver.switch_id()),
                &mut attrs,
            )
            .unwrap();
        assert_eq!(attrs[0].value, AttrValue::Bool(true));

        driver.fail_next(SaiStatus::FAILURE);
        tokio::time::timeout(Duration::from_secs(5), poller)
            .await
            .unwrap()
            .unwrap();
    }
}
