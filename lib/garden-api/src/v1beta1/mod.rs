pub mod shoot;

pub use shoot::{
    AdvertisedAddress, Condition, HibernationSpec, KubernetesSpec, LastOperation,
    LastOperationState, ProviderSpec, Shoot, ShootSpec, ShootStatus,
};
