//! Access helpers for garden-managed shoot clusters
//!
//! The flows in this library turn a management-plane handle plus a shoot
//! identity into a ready-to-use client for the shoot itself:
//! - admin_kubeconfig: time-boxed administrative credential
//! - viewer_kubeconfig: time-boxed read-only credential
//! - static_token: static token kubeconfig from the project secret
//! - wait: block until a shoot reports successful reconciliation

pub mod admin_kubeconfig;
pub mod error;
pub mod static_token;
pub mod viewer_kubeconfig;
pub mod wait;

#[cfg(test)]
pub(crate) mod testing;

pub use admin_kubeconfig::{
    issue_admin_kubeconfig, shoot_client_from_admin_kubeconfig, ADMIN_KUBECONFIG_EXPIRATION,
};
pub use error::{AccessError, Result};
pub use static_token::shoot_client_from_static_token_kubeconfig;
pub use viewer_kubeconfig::{issue_viewer_kubeconfig, shoot_client_from_viewer_kubeconfig};
pub use wait::{is_shoot_reconciled, wait_until_shoot_reconciled};

use garden_api::Shoot;

/// Namespace and name of a shoot, taken from its object metadata.
pub(crate) fn shoot_key(shoot: &Shoot) -> Result<(String, String)> {
    let namespace = shoot
        .metadata
        .namespace
        .clone()
        .ok_or(AccessError::MissingMetadata("namespace"))?;
    let name = shoot
        .metadata
        .name
        .clone()
        .ok_or(AccessError::MissingMetadata("name"))?;
    Ok((namespace, name))
}
