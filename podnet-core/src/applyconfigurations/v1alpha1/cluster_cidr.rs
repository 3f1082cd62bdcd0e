use k8s_openapi::api::core::v1::NodeSelector;
use podnet_macros::ApplyBuilder;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::{
    applyconfigurations::{meta::ObjectMetaApplyConfiguration, object_apply_configuration, type_meta},
    resources::crd::v1alpha1::cluster_cidr::ClusterCIDR,
};

#[skip_serializing_none]
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, ApplyBuilder)]
#[serde(rename_all = "camelCase")]
pub struct ClusterCIDRApplyConfiguration {
    pub api_version: Option<String>,
    pub kind: Option<String>,
    #[apply(skip)]
    pub metadata: Option<ObjectMetaApplyConfiguration>,
    pub spec: Option<ClusterCIDRSpecApplyConfiguration>,
}

object_apply_configuration!(ClusterCIDRApplyConfiguration, ClusterCIDR);

impl ClusterCIDRApplyConfiguration {
    pub fn new(name: &str) -> Self {
        let (api_version, kind, metadata) = type_meta::<ClusterCIDR>(name);

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
pub struct ClusterCIDRSpecApplyConfiguration {
    pub node_selector: Option<NodeSelector>,
    pub per_node_host_bits: Option<i32>,
    pub ipv4: Option<String>,
    pub ipv6: Option<String>,
}

impl ClusterCIDRSpecApplyConfiguration {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use k8s_openapi::api::core::v1::{NodeSelector, NodeSelectorRequirement, NodeSelectorTerm};

    use super::{ClusterCIDRApplyConfiguration, ClusterCIDRSpecApplyConfiguration};
    use crate::applyconfigurations::ObjectApplyConfiguration;

    #[test]
    fn new_presets_the_type_and_name() {
        let cidr = ClusterCIDRApplyConfiguration::new("default-cidr").with_spec(
            ClusterCIDRSpecApplyConfiguration::new()
                .with_per_node_host_bits(8)
                .with_ipv4("10.0.0.0/8"),
        );

        assert_eq!(cidr.name(), Some("default-cidr"));
        assert_eq!(
            serde_json::to_value(&cidr).unwrap(),
            json!({
                "apiVersion": "networking.k8s.io/v1alpha1",
                "kind": "ClusterCIDR",
                "metadata": { "name": "default-cidr" },
                "spec": { "perNodeHostBits": 8, "ipv4": "10.0.0.0/8" }
            })
        );
    }

    #[test]
    fn scalar_setters_keep_the_last_value() {
        let spec = ClusterCIDRSpecApplyConfiguration::new()
            .with_per_node_host_bits(8)
            .with_per_node_host_bits(6)
            .with_ipv6("2001:db8::/64")
            .with_ipv6("fd00::/48");

        assert_eq!(spec.per_node_host_bits, Some(6));
        assert_eq!(spec.ipv6.as_deref(), Some("fd00::/48"));
        assert_eq!(spec.ipv4, None);
    }

    #[test]
    fn metadata_setters_go_through_the_object_metadata() {
        let cidr = ClusterCIDRApplyConfiguration::new("default-cidr")
            .with_labels([("team", "net")])
            .with_name("renamed")
            .with_finalizers(["podnet/cleanup"]);
        let metadata = serde_json::to_value(&cidr).unwrap()["metadata"].clone();

        assert_eq!(
            metadata,
            json!({
                "name": "renamed",
                "labels": { "team": "net" },
                "finalizers": ["podnet/cleanup"]
            })
        );
        assert_eq!(cidr.namespace(), None);
    }

    #[test]
    fn configuration_survives_serialization() {
        let selector = NodeSelector {
            node_selector_terms: vec![NodeSelectorTerm {
                match_expressions: Some(vec![NodeSelectorRequirement {
                    key: "kubernetes.io/os".to_owned(),
                    operator: "In".to_owned(),
                    values: Some(vec!["linux".to_owned()]),
                }]),
                match_fields: None,
            }],
        };
        let cidr = ClusterCIDRApplyConfiguration::new("linux-cidr").with_spec(
            ClusterCIDRSpecApplyConfiguration::new()
                .with_node_selector(selector)
                .with_per_node_host_bits(8)
                .with_ipv4("10.0.0.0/8")
                .with_ipv6("2001:db8::/64"),
        );
        let json = serde_json::to_string(&cidr).unwrap();

        assert_eq!(
            serde_json::from_str::<ClusterCIDRApplyConfiguration>(&json).unwrap(),
            cidr
        );
    }
}
