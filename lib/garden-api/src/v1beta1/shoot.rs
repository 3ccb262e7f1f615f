use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Shoot represents a managed target cluster operated by the garden
/// control plane on behalf of a project
#[derive(CustomResource, Clone, Debug, Default, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "core.gardener.cloud",
    version = "v1beta1",
    kind = "Shoot",
    plural = "shoots",
    namespaced,
    derive = "Default",
    status = "ShootStatus",
    printcolumn = r#"{"name":"Region","type":"string","jsonPath":".spec.region"}"#,
    printcolumn = r#"{"name":"Version","type":"string","jsonPath":".spec.kubernetes.version"}"#,
    printcolumn = r#"{"name":"Operation","type":"string","jsonPath":".status.lastOperation.state"}"#,
)]
#[serde(rename_all = "camelCase")]
pub struct ShootSpec {
    /// Name of the cloud profile the cluster is created against
    pub cloud_profile_name: String,

    /// Region the cluster control plane and workers run in
    pub region: String,

    /// Infrastructure provider configuration
    pub provider: ProviderSpec,

    /// Kubernetes control plane configuration
    pub kubernetes: KubernetesSpec,

    /// Purpose of the cluster: "evaluation", "development", "production"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,

    /// Name of the secret binding holding the infrastructure credentials
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_binding_name: Option<String>,

    /// Name of the seed the cluster is scheduled onto
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed_name: Option<String>,

    /// Hibernation settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hibernation: Option<HibernationSpec>,
}

/// Infrastructure provider section of a shoot spec
#[derive(Clone, Debug, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProviderSpec {
    /// Provider type: "aws", "gcp", "azure", "local", ...
    #[serde(rename = "type")]
    pub provider_type: String,
}

/// Kubernetes section of a shoot spec
#[derive(Clone, Debug, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct KubernetesSpec {
    /// Control plane version, e.g. "1.31.2"
    pub version: String,
}

/// Hibernation settings of a shoot
#[derive(Clone, Debug, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct HibernationSpec {
    /// Whether the cluster should be hibernated
    #[serde(default)]
    pub enabled: bool,
}

/// Status of a Shoot
#[derive(Clone, Debug, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShootStatus {
    /// Conditions describing the cluster state
    #[serde(default)]
    pub conditions: Vec<Condition>,

    /// Last operation the control plane performed on the cluster
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_operation: Option<LastOperation>,

    /// Generation last observed by the control plane
    #[serde(default)]
    pub observed_generation: i64,

    /// Technical identifier used for backing resources
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technical_id: Option<String>,

    /// Addresses under which the cluster API server is reachable
    #[serde(default)]
    pub advertised_addresses: Vec<AdvertisedAddress>,

    /// Whether the cluster is currently hibernated
    #[serde(default)]
    pub hibernated: bool,
}

/// Last operation recorded in a shoot status
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LastOperation {
    /// Operation type: "Create", "Reconcile", "Delete", "Migrate", "Restore"
    #[serde(rename = "type")]
    pub operation_type: String,

    /// State the operation is in
    pub state: LastOperationState,

    /// Completion percentage
    #[serde(default)]
    pub progress: i32,

    /// Human-readable description of the current step
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Last update time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_update_time: Option<String>,
}

/// State of a shoot operation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum LastOperationState {
    Pending,
    Processing,
    Succeeded,
    Error,
    Failed,
    Aborted,
}

/// Address under which a shoot API server is advertised
#[derive(Clone, Debug, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdvertisedAddress {
    /// Name of the address, e.g. "external" or "internal"
    pub name: String,

    /// URL of the address
    pub url: String,
}

/// Condition for Shoot status
#[derive(Clone, Debug, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    /// Type of condition, e.g. "APIServerAvailable"
    #[serde(rename = "type")]
    pub condition_type: String,

    /// Status: "True", "False", "Unknown", "Progressing"
    pub status: String,

    /// Reason for the condition
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Human-readable message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Last transition time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_transition_time: Option<String>,
}

impl Shoot {
    /// True once the control plane has observed the current generation and the
    /// last operation on the cluster finished successfully.
    pub fn is_reconcile_succeeded(&self) -> bool {
        let generation = self.metadata.generation.unwrap_or_default();
        self.status.as_ref().is_some_and(|status| {
            status.observed_generation >= generation
                && status
                    .last_operation
                    .as_ref()
                    .is_some_and(|op| op.state == LastOperationState::Succeeded)
        })
    }
}
