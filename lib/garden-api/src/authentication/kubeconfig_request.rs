//! Credential-request documents for time-boxed shoot access
//!
//! Both request kinds are transient: they are POSTed to a shoot subresource
//! and never stored. The control plane fills in `status` on the response.

use std::time::Duration;

use chrono::Utc;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{ObjectMeta, Time};
use k8s_openapi::ByteString;
use serde::{Deserialize, Serialize};

/// API group and version of the credential-request documents
pub const AUTHENTICATION_API_VERSION: &str = "authentication.gardener.cloud/v1alpha1";

/// Shoot subresource accepting [`AdminKubeconfigRequest`] documents
pub const ADMIN_KUBECONFIG_SUBRESOURCE: &str = "adminkubeconfig";

/// Shoot subresource accepting [`ViewerKubeconfigRequest`] documents
pub const VIEWER_KUBECONFIG_SUBRESOURCE: &str = "viewerkubeconfig";

/// Request for a time-boxed administrative kubeconfig for a shoot
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminKubeconfigRequest {
    pub api_version: String,
    pub kind: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ObjectMeta>,

    pub spec: KubeconfigRequestSpec,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<KubeconfigRequestStatus>,
}

impl AdminKubeconfigRequest {
    /// Build a request asking for a credential valid for `expiration`.
    pub fn new(expiration: Duration) -> Self {
        Self {
            api_version: AUTHENTICATION_API_VERSION.to_string(),
            kind: "AdminKubeconfigRequest".to_string(),
            metadata: None,
            spec: KubeconfigRequestSpec::new(expiration),
            status: None,
        }
    }
}

/// Request for a time-boxed read-only kubeconfig for a shoot
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerKubeconfigRequest {
    pub api_version: String,
    pub kind: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ObjectMeta>,

    pub spec: KubeconfigRequestSpec,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<KubeconfigRequestStatus>,
}

impl ViewerKubeconfigRequest {
    /// Build a request asking for a credential valid for `expiration`.
    pub fn new(expiration: Duration) -> Self {
        Self {
            api_version: AUTHENTICATION_API_VERSION.to_string(),
            kind: "ViewerKubeconfigRequest".to_string(),
            metadata: None,
            spec: KubeconfigRequestSpec::new(expiration),
            status: None,
        }
    }
}

/// Spec shared by both credential-request kinds
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KubeconfigRequestSpec {
    /// Requested credential lifetime in seconds. Whether the value is
    /// acceptable is decided by the control plane, not locally.
    pub expiration_seconds: i64,
}

impl KubeconfigRequestSpec {
    fn new(expiration: Duration) -> Self {
        // Sub-second durations round up to the smallest expressible lifetime.
        Self {
            expiration_seconds: expiration.as_secs().max(1) as i64,
        }
    }
}

/// Status filled in by the control plane on an issued credential request
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KubeconfigRequestStatus {
    /// Issued kubeconfig document (base64 on the wire)
    #[serde(default)]
    pub kubeconfig: ByteString,

    /// Expiry chosen by the control plane
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_timestamp: Option<Time>,
}

impl KubeconfigRequestStatus {
    /// Remaining validity relative to now. None when the control plane did
    /// not report an expiry.
    pub fn expires_in(&self) -> Option<chrono::Duration> {
        self.expiration_timestamp
            .as_ref()
            .map(|timestamp| timestamp.0 - Utc::now())
    }
}
