pub mod kubeconfig_request;

pub use kubeconfig_request::{
    AdminKubeconfigRequest, KubeconfigRequestSpec, KubeconfigRequestStatus,
    ViewerKubeconfigRequest, ADMIN_KUBECONFIG_SUBRESOURCE, AUTHENTICATION_API_VERSION,
    VIEWER_KUBECONFIG_SUBRESOURCE,
};
