//! Client handle for a shoot cluster built from credential bytes

use std::time::Duration;

use hyper::Request;
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config};
use tracing::debug;

use crate::cache::ResponseCache;
use crate::kubeconfig::{kubeconfig_fingerprint, parse_kubeconfig, validate_kubeconfig};
use crate::{ClientError, Result};

/// Options controlling how a [`TargetClient`] is assembled
#[derive(Clone, Debug)]
pub struct TargetClientOptions {
    /// Skip the local response cache entirely
    pub disable_cache: bool,
    /// Maximum number of cached responses
    pub cache_capacity: usize,
    /// How long a cached response stays valid
    pub cache_ttl: Duration,
}

impl Default for TargetClientOptions {
    fn default() -> Self {
        Self {
            disable_cache: false,
            cache_capacity: 256,
            cache_ttl: Duration::from_secs(30),
        }
    }
}

impl TargetClientOptions {
    /// Disable the local response cache. Clients built from freshly issued
    /// credentials always run with the cache disabled.
    pub fn disable_cache(mut self) -> Self {
        self.disable_cache = true;
        self
    }
}

/// Client handle for a shoot cluster, built from the raw bytes of a
/// kubeconfig credential document.
pub struct TargetClient {
    client: Client,
    cluster_name: String,
    server: String,
    fingerprint: String,
    cache: Option<ResponseCache>,
}

impl std::fmt::Debug for TargetClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TargetClient")
            .field("cluster_name", &self.cluster_name)
            .field("server", &self.server)
            .field("fingerprint", &self.fingerprint)
            .field("cache", &self.cache.is_some())
            .finish()
    }
}

impl TargetClient {
    /// Validate the credential document and build a client from it.
    pub async fn from_kubeconfig_bytes(bytes: &[u8], options: TargetClientOptions) -> Result<Self> {
        let kubeconfig = parse_kubeconfig(bytes)?;
        validate_kubeconfig(&kubeconfig)?;

        let (cluster_name, server) = current_cluster(&kubeconfig)?;
        let fingerprint = kubeconfig_fingerprint(bytes);

        let config = Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default()).await?;
        let client = Client::try_from(config)?;

        let cache = if options.disable_cache {
            None
        } else {
            Some(ResponseCache::new(options.cache_capacity, options.cache_ttl))
        };

        debug!(
            "Built target client for cluster {} (fingerprint {}, caching {})",
            cluster_name,
            fingerprint,
            if cache.is_some() { "enabled" } else { "disabled" }
        );

        Ok(Self {
            client,
            cluster_name,
            server,
            fingerprint,
            cache,
        })
    }

    /// Client for API calls against the shoot.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Name of the cluster entry the credential document points at.
    pub fn cluster_name(&self) -> &str {
        &self.cluster_name
    }

    /// API server address of the shoot.
    pub fn server(&self) -> &str {
        &self.server
    }

    /// SHA-256 fingerprint of the credential document this client was built from.
    pub fn credential_fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// Whether raw reads go through the local response cache.
    pub fn cache_enabled(&self) -> bool {
        self.cache.is_some()
    }

    /// GET an absolute API path on the shoot, consulting the local response
    /// cache when one is configured.
    pub async fn get_raw(&self, path: &str) -> Result<String> {
        if let Some(cache) = &self.cache {
            if let Some(body) = cache.get(path).await {
                return Ok(body);
            }
        }

        let request = Request::get(path).body(Vec::new()).map_err(ClientError::Http)?;
        let body = self.client.request_text(request).await?;

        if let Some(cache) = &self.cache {
            cache.insert(path, body.clone()).await;
        }

        Ok(body)
    }
}

fn current_cluster(kubeconfig: &Kubeconfig) -> Result<(String, String)> {
    let cluster_name = match kubeconfig.current_context.as_deref() {
        Some(current) => kubeconfig
            .contexts
            .iter()
            .find(|named| named.name == current)
            .and_then(|named| named.context.as_ref())
            .map(|context| context.cluster.clone())
            .ok_or_else(|| {
                ClientError::InvalidKubeconfig(format!("current context {current:?} is not defined"))
            })?,
        None => kubeconfig
            .clusters
            .first()
            .map(|named| named.name.clone())
            .ok_or_else(|| ClientError::InvalidKubeconfig("no clusters defined".to_string()))?,
    };

    let server = kubeconfig
        .clusters
        .iter()
        .find(|named| named.name == cluster_name)
        .and_then(|named| named.cluster.as_ref())
        .and_then(|cluster| cluster.server.clone())
        .ok_or_else(|| {
            ClientError::InvalidKubeconfig(format!("cluster {cluster_name:?} has no server address"))
        })?;

    Ok((cluster_name, server))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHOOT_KUBECONFIG: &str = r#"apiVersion: v1
kind: Config
current-context: shoot--garden-local--local
clusters:
- name: shoot--garden-local--local
  cluster:
    server: https://api.local.garden.cloud
contexts:
- name: shoot--garden-local--local
  context:
    cluster: shoot--garden-local--local
    user: shoot--garden-local--local
users:
- name: shoot--garden-local--local
  user:
    token: ZHVtbXktdG9rZW4
"#;

    #[tokio::test]
    async fn credential_client_reports_cache_disabled() {
        let client = TargetClient::from_kubeconfig_bytes(
            SHOOT_KUBECONFIG.as_bytes(),
            TargetClientOptions::default().disable_cache(),
        )
        .await
        .unwrap();

        assert!(!client.cache_enabled());
        assert_eq!(client.cluster_name(), "shoot--garden-local--local");
        assert_eq!(client.server(), "https://api.local.garden.cloud");
        assert_eq!(client.credential_fingerprint().len(), 64);
    }

    #[tokio::test]
    async fn default_options_enable_caching() {
        let client = TargetClient::from_kubeconfig_bytes(
            SHOOT_KUBECONFIG.as_bytes(),
            TargetClientOptions::default(),
        )
        .await
        .unwrap();

        assert!(client.cache_enabled());
    }

    #[tokio::test]
    async fn unparseable_credential_is_rejected() {
        let err = TargetClient::from_kubeconfig_bytes(b"not a credential", TargetClientOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::InvalidKubeconfig(_)));
    }
}
