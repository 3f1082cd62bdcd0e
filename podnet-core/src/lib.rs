pub mod applyconfigurations;
pub mod helpers;
pub mod ip;
pub mod kubernetes;
pub mod manifest;
pub mod resources;

pub const API_GROUP: &str = "networking.k8s.io";
pub const API_VERSION: &str = "v1alpha1";
pub const GROUP_VERSION: &str = "networking.k8s.io/v1alpha1";

pub const FIELD_MANAGER: &str = "podnet";
