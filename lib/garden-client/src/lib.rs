//! Client layer for garden-managed clusters
//!
//! This library provides:
//! - GardenClient: authenticated handle to the garden control plane
//! - TargetClient: shoot cluster handle built from issued credential bytes
//! - Kubeconfig document parsing, validation and fingerprinting
//! - A bounded response cache, used only when caching is not disabled

pub mod cache;
pub mod error;
pub mod garden;
pub mod kubeconfig;
pub mod target;

pub use cache::ResponseCache;
pub use error::{ClientError, Result};
pub use garden::GardenClient;
pub use kubeconfig::{kubeconfig_fingerprint, parse_kubeconfig, validate_kubeconfig};
pub use target::{TargetClient, TargetClientOptions};
