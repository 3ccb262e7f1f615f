//! Management-plane client handle

use kube::config::KubeConfigOptions;
use kube::{Client, Config};
use tracing::debug;

use crate::kubeconfig::{parse_kubeconfig, validate_kubeconfig};
use crate::Result;

/// Authenticated handle to the garden control plane.
///
/// Owns the client used for all management-plane calls together with the
/// resolved configuration it was built from. Connection-configuration
/// problems surface here, before any network call is made.
#[derive(Clone)]
pub struct GardenClient {
    client: Client,
    config: Config,
}

impl std::fmt::Debug for GardenClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GardenClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl GardenClient {
    /// Build a handle from configuration inferred from the environment
    /// (in-cluster service account or local kubeconfig).
    pub async fn try_default() -> Result<Self> {
        let config = Config::infer().await.map_err(kube::Error::InferConfig)?;
        Self::from_config(config)
    }

    /// Build a handle from a kubeconfig file on disk.
    pub async fn from_kubeconfig_path(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        Self::from_kubeconfig_bytes(&bytes).await
    }

    /// Build a handle from raw kubeconfig bytes.
    pub async fn from_kubeconfig_bytes(bytes: &[u8]) -> Result<Self> {
        let kubeconfig = parse_kubeconfig(bytes)?;
        validate_kubeconfig(&kubeconfig)?;
        let config = Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default()).await?;
        Self::from_config(config)
    }

    /// Build a handle from an already-resolved client configuration.
    pub fn from_config(config: Config) -> Result<Self> {
        let client = Client::try_from(config.clone())?;
        debug!("Management-plane client ready for {}", config.cluster_url);
        Ok(Self { client, config })
    }

    /// Wrap an existing client together with the configuration it was built
    /// from. Used by tests injecting a mock transport.
    pub fn from_parts(client: Client, config: Config) -> Self {
        Self { client, config }
    }

    /// Client for management-plane API calls.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Resolved connection configuration backing this handle.
    pub fn rest_config(&self) -> &Config {
        &self.config
    }

    /// Namespace calls default to when none is given.
    pub fn default_namespace(&self) -> &str {
        self.config.default_namespace.as_str()
    }
}
