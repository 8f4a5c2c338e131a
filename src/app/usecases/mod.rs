mod provisioning;
mod status;

pub use provisioning::{ProvisioningError, ProvisioningSettings, ProvisioningUsecases};
pub use status::{StatusError, StatusSettings, StatusUsecases};
