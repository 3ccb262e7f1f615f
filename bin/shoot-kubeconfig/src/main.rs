use anyhow::{bail, Context, Result};
use garden_api::Shoot;
use garden_client::{kubeconfig_fingerprint, GardenClient};
use kube::Api;
use shoot_access::{
    issue_admin_kubeconfig, issue_viewer_kubeconfig, ADMIN_KUBECONFIG_EXPIRATION,
};
use tokio::io::AsyncWriteExt;
use tracing::info;
use tracing_subscriber::fmt::init as tracing_init;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_init();

    let namespace = std::env::var("SHOOT_NAMESPACE").context("SHOOT_NAMESPACE must be set")?;
    let name = std::env::var("SHOOT_NAME").context("SHOOT_NAME must be set")?;
    let mode = std::env::var("ACCESS_MODE").unwrap_or_else(|_| "admin".to_string());

    let garden = match std::env::var("GARDEN_KUBECONFIG") {
        Ok(path) => {
            info!("Using garden kubeconfig from {}", path);
            GardenClient::from_kubeconfig_path(&path).await?
        }
        Err(_) => {
            info!("GARDEN_KUBECONFIG not set, inferring configuration");
            GardenClient::try_default().await?
        }
    };

    let shoots: Api<Shoot> = Api::namespaced(garden.client().clone(), &namespace);
    let shoot = shoots
        .get(&name)
        .await
        .with_context(|| format!("failed to fetch shoot {}/{}", namespace, name))?;

    let issued = match mode.as_str() {
        "admin" => issue_admin_kubeconfig(&garden, &shoot, ADMIN_KUBECONFIG_EXPIRATION).await?,
        "viewer" => issue_viewer_kubeconfig(&garden, &shoot, ADMIN_KUBECONFIG_EXPIRATION).await?,
        other => bail!("unsupported ACCESS_MODE {other:?}; use \"admin\" or \"viewer\""),
    };

    info!(
        "Issued {} kubeconfig for shoot {}/{} (fingerprint {})",
        mode,
        namespace,
        name,
        kubeconfig_fingerprint(&issued.kubeconfig.0)
    );
    if let Some(remaining) = issued.expires_in() {
        info!("Credential expires in {} minutes", remaining.num_minutes());
    }

    match std::env::var("OUTPUT_PATH") {
        Ok(path) => {
            tokio::fs::write(&path, &issued.kubeconfig.0)
                .await
                .with_context(|| format!("failed to write credential to {}", path))?;
            info!("Credential written to {}", path);
        }
        Err(_) => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(&issued.kubeconfig.0).await?;
            stdout.flush().await?;
        }
    }

    Ok(())
}
