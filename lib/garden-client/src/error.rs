use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Invalid kubeconfig document: {0}")]
    InvalidKubeconfig(String),

    #[error("Kubeconfig error: {0}")]
    Kubeconfig(#[from] kube::config::KubeconfigError),

    #[error("Kubernetes client error: {0}")]
    Kubernetes(#[from] kube::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] hyper::http::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
