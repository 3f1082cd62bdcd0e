use std::fmt::Display;

use k8s_openapi::apimachinery::pkg::apis::meta::v1::Condition;
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::resources::{
    conditions::HasConditions,
    list::ResourceList,
    validation::{validate_conditions, validate_object_name},
    Validate, ValidationError,
};

use super::references::{validate_parameters_refs, ParametersRef};

/// A logical network in the cluster, backed by the host networking setup of the nodes.
#[skip_serializing_none]
#[derive(CustomResource, Deserialize, Serialize, Clone, Default, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[kube(
    group = "networking.k8s.io",
    version = "v1alpha1",
    kind = "PodNetwork",
    plural = "podnetworks",
    singular = "podnetwork",
    status = "PodNetworkStatus",
    derive = "Default",
    derive = "PartialEq",
    printcolumn = r#"{"name":"Provider", "type":"string", "jsonPath":".spec.provider"}"#,
    printcolumn = r#"{"name":"Ready", "type":"string", "jsonPath":".status.conditions[?(@.type==\"Ready\")].status"}"#
)]
pub struct PodNetworkSpec {
    /// what handles IPv4 IPAM for pods attaching to this network, when set an
    /// IPv4 address is required on the attachment, when unset none is expected
    pub ipam4: Option<IpamType>,
    /// what handles IPv6 IPAM for pods attaching to this network, when set an
    /// IPv6 address is required on the attachment, when unset none is expected
    pub ipam6: Option<IpamType>,
    /// vendor or implementation specific parameters
    pub parameters_refs: Option<Vec<ParametersRef>>,
    /// provider implementing this network
    pub provider: Option<String>,
}

#[skip_serializing_none]
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PodNetworkStatus {
    /// current state of the network, keyed by type, known types are
    /// "Ready", "ParamsReady" and "InUse"
    #[schemars(length(max = 5))]
    pub conditions: Option<Vec<Condition>>,
}

/// Source of pod IPAM handling.
#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum IpamType {
    /// external mechanisms define the IPAM configuration
    External,
    /// built-in mechanism based on the controller manager IPAM controller and ClusterCIDR
    Kubernetes,
    /// no IP will be present and reported on attachments to the network
    None,
}

pub type PodNetworkList = ResourceList<PodNetwork>;

impl IpamType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IpamType::External => "external",
            IpamType::Kubernetes => "kubernetes",
            IpamType::None => "none",
        }
    }
}

impl Display for IpamType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl HasConditions for PodNetworkStatus {
    fn conditions(&self) -> &[Condition] {
        self.conditions.as_deref().unwrap_or_default()
    }
}

impl HasConditions for PodNetwork {
    fn conditions(&self) -> &[Condition] {
        self.status
            .as_ref()
            .map(|s| s.conditions())
            .unwrap_or_default()
    }
}

impl Validate for PodNetwork {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_object_name(&self.metadata)?;
        validate_parameters_refs("spec.parametersRefs", self.spec.parameters_refs.as_ref())?;

        if let Some(status) = &self.status {
            validate_conditions("status.conditions", status.conditions.as_ref())?;
        }

        Ok(())
    }
}
