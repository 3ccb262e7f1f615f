//! Shoot access via time-boxed read-only credentials
//!
//! Mirrors the admin flow against the `viewerkubeconfig` subresource. The
//! issued credential can read cluster state but not mutate it.

use std::time::Duration;

use garden_api::authentication::{
    KubeconfigRequestStatus, ViewerKubeconfigRequest, VIEWER_KUBECONFIG_SUBRESOURCE,
};
use garden_api::Shoot;
use garden_client::{kubeconfig_fingerprint, GardenClient, TargetClient, TargetClientOptions};
use kube::api::{Api, PostParams};
use tracing::debug;

use crate::admin_kubeconfig::ADMIN_KUBECONFIG_EXPIRATION;
use crate::{shoot_key, AccessError, Result};

/// Request a viewer kubeconfig for the shoot and build a client from it.
///
/// The returned client has local response caching disabled.
pub async fn shoot_client_from_viewer_kubeconfig(
    garden: &GardenClient,
    shoot: &Shoot,
) -> Result<TargetClient> {
    let issued = issue_viewer_kubeconfig(garden, shoot, ADMIN_KUBECONFIG_EXPIRATION).await?;
    let client = TargetClient::from_kubeconfig_bytes(
        &issued.kubeconfig.0,
        TargetClientOptions::default().disable_cache(),
    )
    .await?;
    Ok(client)
}

/// POST a viewer kubeconfig request valid for `expiration` to the shoot's
/// `viewerkubeconfig` subresource and return the issued status.
pub async fn issue_viewer_kubeconfig(
    garden: &GardenClient,
    shoot: &Shoot,
    expiration: Duration,
) -> Result<KubeconfigRequestStatus> {
    let (namespace, name) = shoot_key(shoot)?;
    let shoots: Api<Shoot> = Api::namespaced(garden.client().clone(), &namespace);

    let request = ViewerKubeconfigRequest::new(expiration);
    let issued: ViewerKubeconfigRequest = shoots
        .create_subresource(
            VIEWER_KUBECONFIG_SUBRESOURCE,
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
        "Issued viewer kubeconfig for shoot {}/{} (fingerprint {})",
        namespace,
        name,
        kubeconfig_fingerprint(&status.kubeconfig.0)
    );

    Ok(status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use k8s_openapi::ByteString;

    use crate::testing::{local_shoot, mock_garden, Captured, SHOOT_KUBECONFIG};

    #[tokio::test]
    async fn posts_to_viewer_subresource() {
        let captured: Captured = Arc::new(Mutex::new(Vec::new()));
        let mut issued = ViewerKubeconfigRequest::new(ADMIN_KUBECONFIG_EXPIRATION);
        issued.status = Some(KubeconfigRequestStatus {
            kubeconfig: ByteString(SHOOT_KUBECONFIG.as_bytes().to_vec()),
            expiration_timestamp: None,
        });
        let garden = mock_garden(200, serde_json::to_vec(&issued).unwrap(), captured.clone());

        let client = shoot_client_from_viewer_kubeconfig(&garden, &local_shoot())
            .await
            .unwrap();

        assert!(!client.cache_enabled());

        let calls = captured.lock().unwrap();
        let (method, path, body) = &calls[0];
        assert_eq!(method, "POST");
        assert_eq!(
            path,
            "/apis/core.gardener.cloud/v1beta1/namespaces/garden-local/shoots/local/viewerkubeconfig"
        );

        let document: serde_json::Value = serde_json::from_slice(body).unwrap();
        assert_eq!(document["kind"], "ViewerKubeconfigRequest");
        assert_eq!(document["spec"]["expirationSeconds"], 3600);
    }
}
