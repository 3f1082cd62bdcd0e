use podnet_macros::ApplyBuilder;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use super::references::ParentReferenceApplyConfiguration;
use crate::{
    applyconfigurations::{meta::ObjectMetaApplyConfiguration, object_apply_configuration, type_meta},
    resources::crd::v1alpha1::ip_address::IPAddress,
};

#[skip_serializing_none]
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, ApplyBuilder)]
#[serde(rename_all = "camelCase")]
pub struct IPAddressApplyConfiguration {
    pub api_version: Option<String>,
    pub kind: Option<String>,
    #[apply(skip)]
    pub metadata: Option<ObjectMetaApplyConfiguration>,
    pub spec: Option<IPAddressSpecApplyConfiguration>,
}

object_apply_configuration!(IPAddressApplyConfiguration, IPAddress);

impl IPAddressApplyConfiguration {
    /// `name` is the address in canonical form.
    pub fn new(name: &str) -> Self {
        let (api_version, kind, metadata) = type_meta::<IPAddress>(name);

        Self {
            api_version,
            kind,
            metadata,
            spec: None,
        }
    }
}

#[skip_serializing_none]
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, ApplyBuilder)]
#[serde(rename_all = "camelCase")]
pub struct IPAddressSpecApplyConfiguration {
    pub parent_ref: Option<ParentReferenceApplyConfiguration>,
}

impl IPAddressSpecApplyConfiguration {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{IPAddressApplyConfiguration, IPAddressSpecApplyConfiguration};
    use crate::applyconfigurations::v1alpha1::ParentReferenceApplyConfiguration;

    #[test]
    fn nests_the_parent_reference() {
        let address = IPAddressApplyConfiguration::new("10.96.0.1").with_spec(
            IPAddressSpecApplyConfiguration::new().with_parent_ref(
                ParentReferenceApplyConfiguration::new()
                    .with_resource("services")
                    .with_namespace("default")
                    .with_name("kubernetes"),
            ),
        );

        assert_eq!(
            serde_json::to_value(&address).unwrap(),
            json!({
                "apiVersion": "networking.k8s.io/v1alpha1",
                "kind": "IPAddress",
                "metadata": { "name": "10.96.0.1" },
                "spec": {
                    "parentRef": { "resource": "services", "namespace": "default", "name": "kubernetes" }
                }
            })
        );
    }

    #[test]
    fn unset_spec_is_omitted() {
        let address = IPAddressApplyConfiguration::new("2001:db8::1").with_kind("IPAddress");

        assert!(serde_json::to_value(&address)
            .unwrap()
            .get("spec")
            .is_none());
    }
}
