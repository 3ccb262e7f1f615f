//! Shoot access via time-boxed administrative credentials

use std::time::Duration;

use garden_api::authentication::{
    AdminKubeconfigRequest, KubeconfigRequestStatus, ADMIN_KUBECONFIG_SUBRESOURCE,
};
use garden_api::Shoot;
use garden_client::{kubeconfig_fingerprint, GardenClient, TargetClient, TargetClientOptions};
use kube::api::{Api, PostParams};
use tracing::debug;

use crate::{shoot_key, AccessError, Result};

/// Lifetime requested for issued admin kubeconfigs
pub const ADMIN_KUBECONFIG_EXPIRATION: Duration = Duration::from_secs(3600);

/// Request an admin kubeconfig for the shoot and build a client from it.
///
/// The returned client talks directly to the shoot API server using the
/// issued credential and has local response caching disabled. Dropping the
/// returned future cancels the in-flight request.
pub async fn shoot_client_from_admin_kubeconfig(
    garden: &GardenClient,
    shoot: &Shoot,
) -> Result<TargetClient> {
    let issued = issue_admin_kubeconfig(garden, shoot, ADMIN_KUBECONFIG_EXPIRATION).await?;
    let client = TargetClient::from_kubeconfig_bytes(
        &issued.kubeconfig.0,
        TargetClientOptions::default().disable_cache(),
    )
    .await?;
    Ok(client)
}

/// POST an admin kubeconfig request valid for `expiration` to the shoot's
/// `adminkubeconfig` subresource and return the issued status.
pub async fn issue_admin_kubeconfig(
    garden: &GardenClient,
    shoot: &Shoot,
    expiration: Duration,
) -> Result<KubeconfigRequestStatus> {
    let (namespace, name) = shoot_key(shoot)?;
    let shoots: Api<Shoot> = Api::namespaced(garden.client().clone(), &namespace);

    let request = AdminKubeconfigRequest::new(expiration);
    let issued: AdminKubeconfigRequest = shoots
        .create_subresource(
            ADMIN_KUBECONFIG_SUBRESOURCE,
            &name,
            &PostParams::default(),
            serde_json::to_vec(&request)?,
        )
        .await?;

    let status = issued
        .status
        .filter(|status| !status.kubeconfig.0.is_empty())
        .ok_or_else(|| AccessError::MissingCredential(format!("{namespace}/{name}")))?;

    debug!(
        "Issued admin kubeconfig for shoot {}/{} (fingerprint {})",
        namespace,
        name,
        kubeconfig_fingerprint(&status.kubeconfig.0)
    );

    Ok(status)
}
