//! Test support: a mock transport standing in for the control plane

use std::sync::{Arc, Mutex};

use garden_api::{Shoot, ShootSpec};
use garden_client::GardenClient;
use http_body_util::BodyExt;
use hyper::{Request, Response};
use kube::client::Body;
use kube::{Client, Config};

/// Requests captured by the mock transport: method, path, body
pub(crate) type Captured = Arc<Mutex<Vec<(String, String, Vec<u8>)>>>;

/// Credential document the mock control plane issues
pub(crate) const SHOOT_KUBECONFIG: &str = r#"apiVersion: v1
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

pub(crate) fn local_shoot() -> Shoot {
    let mut shoot = Shoot::new("local", ShootSpec::default());
    shoot.metadata.namespace = Some("garden-local".to_string());
    shoot
}

/// Garden handle whose transport answers every request with the given status
/// code and body, recording each call.
pub(crate) fn mock_garden(status: u16, body: Vec<u8>, captured: Captured) -> GardenClient {
    let service = tower::service_fn(move |request: Request<Body>| {
        let captured = captured.clone();
        let body = body.clone();
        async move {
            let (parts, request_body) = request.into_parts();
            let bytes = request_body.collect().await?.to_bytes();
            captured.lock().unwrap().push((
                parts.method.to_string(),
                parts.uri.path().to_string(),
                bytes.to_vec(),
            ));

            let response = Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(Body::from(body))?;
            Ok::<_, tower::BoxError>(response)
        }
    });

    let client = Client::new(service, "garden-local");
    GardenClient::from_parts(client, Config::new("https://garden.local".parse().unwrap()))
}

/// Serialized Status document the API server returns for missing resources
pub(crate) fn not_found(resource: &str) -> Vec<u8> {
    serde_json::to_vec(&serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "metadata": {},
        "status": "Failure",
        "message": format!("{resource} not found"),
        "reason": "NotFound",
        "code": 404
    }))
    .unwrap()
}
