//! Garden API types for shoot cluster access
//!
//! This library defines the typed API surface used when talking to a
//! garden-style control plane:
//! - Shoot: a managed target cluster, reconciled by the control plane
//! - AdminKubeconfigRequest: request for a time-boxed administrative credential
//! - ViewerKubeconfigRequest: request for a time-boxed read-only credential

pub mod v1beta1;
pub mod authentication;

pub use v1beta1::{LastOperation, LastOperationState, Shoot, ShootSpec, ShootStatus};
pub use authentication::{AdminKubeconfigRequest, KubeconfigRequestStatus, ViewerKubeconfigRequest};
