//! Shoot access via the project's static token kubeconfig secret

use garden_api::Shoot;
use garden_client::{GardenClient, TargetClient, TargetClientOptions};
use k8s_openapi::api::core::v1::Secret;
use kube::Api;
use tracing::debug;

use crate::{shoot_key, AccessError, Result};

/// Data key holding the kubeconfig document inside the secret
const KUBECONFIG_SECRET_KEY: &str = "kubeconfig";

/// Build a shoot client from the static token kubeconfig secret
/// `<shoot-name>.kubeconfig` in the shoot's project namespace.
pub async fn shoot_client_from_static_token_kubeconfig(
    garden: &GardenClient,
    shoot: &Shoot,
) -> Result<TargetClient> {
    let (namespace, name) = shoot_key(shoot)?;
    let secret_name = format!("{name}.kubeconfig");

    let secrets: Api<Secret> = Api::namespaced(garden.client().clone(), &namespace);
    let secret = secrets.get(&secret_name).await?;

    let credential = secret
        .data
        .and_then(|mut data| data.remove(KUBECONFIG_SECRET_KEY))
        .ok_or_else(|| AccessError::MissingSecretKey {
            name: secret_name.clone(),
            key: KUBECONFIG_SECRET_KEY.to_string(),
        })?;

    debug!(
        "Using static token kubeconfig from secret {}/{}",
        namespace, secret_name
    );

    let client = TargetClient::from_kubeconfig_bytes(
        &credential.0,
        TargetClientOptions::default().disable_cache(),
    )
    .await?;
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::{Arc, Mutex};

    use k8s_openapi::ByteString;

    use crate::testing::{local_shoot, mock_garden, Captured, SHOOT_KUBECONFIG};

    fn kubeconfig_secret(data: Option<(&str, &[u8])>) -> Vec<u8> {
        let mut secret = Secret::default();
        secret.metadata.name = Some("local.kubeconfig".to_string());
        secret.metadata.namespace = Some("garden-local".to_string());
        secret.data = data.map(|(key, value)| {
            BTreeMap::from([(key.to_string(), ByteString(value.to_vec()))])
        });
        serde_json::to_vec(&secret).unwrap()
    }

    #[tokio::test]
    async fn reads_secret_and_builds_cache_disabled_client() {
        let captured: Captured = Arc::new(Mutex::new(Vec::new()));
        let garden = mock_garden(
            200,
            kubeconfig_secret(Some(("kubeconfig", SHOOT_KUBECONFIG.as_bytes()))),
            captured.clone(),
        );

        let client = shoot_client_from_static_token_kubeconfig(&garden, &local_shoot())
            .await
            .unwrap();

        assert!(!client.cache_enabled());
        assert_eq!(client.server(), "https://api.local.garden.cloud");

        let calls = captured.lock().unwrap();
        let (method, path, _) = &calls[0];
        assert_eq!(method, "GET");
        assert_eq!(path, "/api/v1/namespaces/garden-local/secrets/local.kubeconfig");
    }

    #[tokio::test]
    async fn secret_without_kubeconfig_key_is_an_error() {
        let captured: Captured = Arc::new(Mutex::new(Vec::new()));
        let garden = mock_garden(
            200,
            kubeconfig_secret(Some(("token", b"opaque"))),
            captured,
        );

        let err = shoot_client_from_static_token_kubeconfig(&garden, &local_shoot())
            .await
            .unwrap_err();

        assert!(matches!(err, AccessError::MissingSecretKey { .. }));
    }
}
