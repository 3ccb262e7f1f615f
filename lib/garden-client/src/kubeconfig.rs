//! Parsing and validation of kubeconfig credential documents
//!
//! Issued credentials arrive as raw bytes. Before a client is built from
//! them, the document is checked structurally: UTF-8, YAML of kind Config,
//! at least one cluster with a server address, at least one user, and PEM
//! parseability of any embedded certificate data.

use std::io::BufReader;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use kube::config::Kubeconfig;
use sha2::{Digest, Sha256};

use crate::{ClientError, Result};

/// Parse raw credential bytes into a kubeconfig document.
pub fn parse_kubeconfig(bytes: &[u8]) -> Result<Kubeconfig> {
    let text = std::str::from_utf8(bytes)
        .map_err(|_| ClientError::InvalidKubeconfig("document is not valid UTF-8".to_string()))?;

    // Reject documents of a different shape or kind before the typed parse.
    let value: serde_yaml::Value = serde_yaml::from_str(text)
        .map_err(|e| ClientError::InvalidKubeconfig(format!("document is not YAML: {e}")))?;
    if !value.is_mapping() {
        return Err(ClientError::InvalidKubeconfig(
            "document is not a YAML mapping".to_string(),
        ));
    }
    match value.get("kind").and_then(serde_yaml::Value::as_str) {
        Some("Config") | None => {}
        Some(other) => {
            return Err(ClientError::InvalidKubeconfig(format!(
                "unexpected document kind {other:?}"
            )))
        }
    }

    Ok(Kubeconfig::from_yaml(text)?)
}

/// Check that a kubeconfig document is complete enough to build a client.
pub fn validate_kubeconfig(kubeconfig: &Kubeconfig) -> Result<()> {
    if kubeconfig.clusters.is_empty() {
        return Err(ClientError::InvalidKubeconfig("no clusters defined".to_string()));
    }
    if kubeconfig.auth_infos.is_empty() {
        return Err(ClientError::InvalidKubeconfig("no users defined".to_string()));
    }
    if kubeconfig.contexts.is_empty() {
        return Err(ClientError::InvalidKubeconfig("no contexts defined".to_string()));
    }

    if let Some(current) = kubeconfig.current_context.as_deref() {
        if !kubeconfig.contexts.iter().any(|named| named.name == current) {
            return Err(ClientError::InvalidKubeconfig(format!(
                "current context {current:?} is not defined"
            )));
        }
    }

    for named in &kubeconfig.clusters {
        let cluster = named.cluster.as_ref().ok_or_else(|| {
            ClientError::InvalidKubeconfig(format!("cluster {:?} has no settings", named.name))
        })?;
        if cluster.server.is_none() {
            return Err(ClientError::InvalidKubeconfig(format!(
                "cluster {:?} has no server address",
                named.name
            )));
        }
        if let Some(data) = cluster.certificate_authority_data.as_deref() {
            validate_certificate_data(&named.name, data)?;
        }
    }

    for named in &kubeconfig.auth_infos {
        let certificate_data = named
            .auth_info
            .as_ref()
            .and_then(|auth| auth.client_certificate_data.as_deref());
        if let Some(data) = certificate_data {
            validate_certificate_data(&named.name, data)?;
        }
    }

    Ok(())
}

/// SHA-256 hex digest of a credential document. Logged in place of the
/// document itself.
pub fn kubeconfig_fingerprint(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

fn validate_certificate_data(owner: &str, data: &str) -> Result<()> {
    let pem = BASE64.decode(data.trim()).map_err(|e| {
        ClientError::InvalidKubeconfig(format!(
            "certificate data for {owner:?} is not base64: {e}"
        ))
    })?;

    let mut reader = BufReader::new(pem.as_slice());
    let certificates = rustls_pemfile::certs(&mut reader)
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| {
            ClientError::InvalidKubeconfig(format!("certificate data for {owner:?} is not PEM: {e}"))
        })?;

    if certificates.is_empty() {
        return Err(ClientError::InvalidKubeconfig(format!(
            "no certificates found for {owner:?}"
        )));
    }

    Ok(())
}
