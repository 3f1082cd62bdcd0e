use k8s_openapi::apimachinery::pkg::apis::meta::v1::Condition;
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::resources::{
    conditions::HasConditions,
    list::ResourceList,
    validation::{
        validate_conditions, validate_dns1123_subdomain, validate_object_name,
        validate_object_namespace,
    },
    Validate, ValidationError,
};

use super::references::{validate_parameters_refs, ParametersRef};

/// Namespaced attachment point of a PodNetwork, carrying the parameters
/// pods in this namespace use when connecting to it.
#[skip_serializing_none]
#[derive(CustomResource, Deserialize, Serialize, Clone, Default, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[kube(
    group = "networking.k8s.io",
    version = "v1alpha1",
    kind = "PodNetworkAttachment",
    plural = "podnetworkattachments",
    singular = "podnetworkattachment",
    namespaced,
    status = "PodNetworkAttachmentStatus",
    derive = "Default",
    derive = "PartialEq",
    printcolumn = r#"{"name":"PodNetwork", "type":"string", "jsonPath":".spec.podNetworkName"}"#,
    printcolumn = r#"{"name":"Ready", "type":"string", "jsonPath":".status.conditions[?(@.type==\"Ready\")].status"}"#
)]
pub struct PodNetworkAttachmentSpec {
    /// name of the PodNetwork this attachment connects to, required
    #[serde(default)]
    pub pod_network_name: String,
    /// vendor or implementation specific parameters
    pub parameters_refs: Option<Vec<ParametersRef>>,
}

#[skip_serializing_none]
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PodNetworkAttachmentStatus {
    /// current state of the attachment, keyed by type
    #[schemars(length(max = 5))]
    pub conditions: Option<Vec<Condition>>,
}

pub type PodNetworkAttachmentList = ResourceList<PodNetworkAttachment>;

impl HasConditions for PodNetworkAttachmentStatus {
    fn conditions(&self) -> &[Condition] {
        self.conditions.as_deref().unwrap_or_default()
    }
}

impl HasConditions for PodNetworkAttachment {
    fn conditions(&self) -> &[Condition] {
        self.status
            .as_ref()
            .map(|s| s.conditions())
            .unwrap_or_default()
    }
}

impl Validate for PodNetworkAttachment {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_object_name(&self.metadata)?;
        validate_object_namespace(&self.metadata)?;
        validate_dns1123_subdomain("spec.podNetworkName", &self.spec.pod_network_name)?;
        validate_parameters_refs("spec.parametersRefs", self.spec.parameters_refs.as_ref())?;

        if let Some(status) = &self.status {
            validate_conditions("status.conditions", status.conditions.as_ref())?;
        }

        Ok(())
    }
}
