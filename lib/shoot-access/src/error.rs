use std::time::Duration;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AccessError>;

#[derive(Error, Debug)]
pub enum AccessError {
    #[error("Shoot has no {0} in its object metadata")]
    MissingMetadata(&'static str),

    #[error("Control plane returned no credential for shoot {0}")]
    MissingCredential(String),

    #[error("Secret {name:?} has no {key:?} entry")]
    MissingSecretKey { name: String, key: String },

    #[error("Client error: {0}")]
    Client(#[from] garden_client::ClientError),

    #[error("Kubernetes API error: {0}")]
    Kubernetes(#[from] kube::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Watch failed while waiting for shoot: {0}")]
    Watch(#[from] kube_runtime::wait::Error),

    #[error("Timed out after {0:?} waiting for shoot {1} to be reconciled")]
    WaitTimeout(Duration, String),

    #[error("Shoot {0} disappeared while waiting")]
    Gone(String),
}
