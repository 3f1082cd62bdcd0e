use std::fmt::Display;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::resources::{validation::validate_dns1123_label, ValidationError};

/// Reference to the object an IPAddress is attached to.
#[skip_serializing_none]
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParentReference {
    /// group of the referenced object, empty for the core group
    pub group: Option<String>,
    /// resource of the referenced object, e.g. "services"
    #[serde(default)]
    pub resource: String,
    /// namespace of the referenced object, absent for cluster scoped objects
    pub namespace: Option<String>,
    /// name of the referenced object
    #[serde(default)]
    pub name: String,
    /// uid of the referenced object
    pub uid: Option<String>,
}

impl ParentReference {
    pub fn validate_at(&self, field: &str) -> Result<(), ValidationError> {
        if self.resource.is_empty() {
            return Err(ValidationError::required(format!("{field}.resource")));
        }

        if self.name.is_empty() {
            return Err(ValidationError::required(format!("{field}.name")));
        }

        if let Some(namespace) = self.namespace.as_deref().filter(|n| !n.is_empty()) {
            validate_dns1123_label(&format!("{field}.namespace"), namespace)?;
        }

        Ok(())
    }
}

impl Display for ParentReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.group.as_deref().filter(|g| !g.is_empty()) {
            Some(group) => write!(f, "{}.{}", self.resource, group)?,
            None => f.write_str(&self.resource)?,
        }

        match self.namespace.as_deref().filter(|n| !n.is_empty()) {
            Some(namespace) => write!(f, "/{namespace}/{}", self.name),
            None => write!(f, "/{}", self.name),
        }
    }
}

/// Custom resource holding additional, implementation specific parameters
/// for a PodNetwork or a PodNetworkAttachment.
#[skip_serializing_none]
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParametersRef {
    /// group of the referenced object
    #[serde(default)]
    pub group: String,
    /// kind of the referenced object
    #[serde(default)]
    pub kind: String,
    /// namespace of the referenced object
    pub namespace: Option<String>,
    /// name of the referenced object
    #[serde(default)]
    pub name: String,
}

impl ParametersRef {
    pub fn validate_at(&self, field: &str) -> Result<(), ValidationError> {
        if self.kind.is_empty() {
            return Err(ValidationError::required(format!("{field}.kind")));
        }

        if self.name.is_empty() {
            return Err(ValidationError::required(format!("{field}.name")));
        }

        Ok(())
    }
}

pub fn validate_parameters_refs(
    field: &str,
    refs: Option<&Vec<ParametersRef>>,
) -> Result<(), ValidationError> {
    for (i, parameters_ref) in refs.into_iter().flatten().enumerate() {
        parameters_ref.validate_at(&format!("{field}[{i}]"))?;
    }

    Ok(())
}
