//! Wait for shoots to reach a reconciled state

use std::time::Duration;

use garden_api::Shoot;
use garden_client::GardenClient;
use kube::Api;
use kube_runtime::wait::{await_condition, Condition};
use tracing::info;

use crate::{shoot_key, AccessError, Result};

/// Condition satisfied once a shoot reports successful reconciliation of its
/// current generation.
pub fn is_shoot_reconciled() -> impl Condition<Shoot> {
    |obj: Option<&Shoot>| obj.is_some_and(Shoot::is_reconcile_succeeded)
}

/// Watch the shoot until it reports successful reconciliation, bounded by
/// `timeout`. Returns the last observed object.
pub async fn wait_until_shoot_reconciled(
    garden: &GardenClient,
    shoot: &Shoot,
    timeout: Duration,
) -> Result<Shoot> {
    let (namespace, name) = shoot_key(shoot)?;
    let shoots: Api<Shoot> = Api::namespaced(garden.client().clone(), &namespace);

    info!(
        "Waiting up to {:?} for shoot {}/{} to be reconciled",
        timeout, namespace, name
    );

    let reconciled = tokio::time::timeout(
        timeout,
        await_condition(shoots, &name, is_shoot_reconciled()),
    )
    .await
    .map_err(|_| AccessError::WaitTimeout(timeout, format!("{namespace}/{name}")))??;

    reconciled.ok_or_else(|| AccessError::Gone(format!("{namespace}/{name}")))
}
