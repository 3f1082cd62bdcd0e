use podnet_macros::ApplyBuilder;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use super::references::ParametersRefApplyConfiguration;
use crate::{
    applyconfigurations::{
        meta::{ConditionApplyConfiguration, ObjectMetaApplyConfiguration},
        object_apply_configuration, type_meta,
    },
    resources::crd::v1alpha1::pod_network_attachment::PodNetworkAttachment,
};

#[skip_serializing_none]
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, ApplyBuilder)]
#[serde(rename_all = "camelCase")]
pub struct PodNetworkAttachmentApplyConfiguration {
    pub api_version: Option<String>,
    pub kind: Option<String>,
    #[apply(skip)]
    pub metadata: Option<ObjectMetaApplyConfiguration>,
    pub spec: Option<PodNetworkAttachmentSpecApplyConfiguration>,
    pub status: Option<PodNetworkAttachmentStatusApplyConfiguration>,
}

object_apply_configuration!(PodNetworkAttachmentApplyConfiguration, PodNetworkAttachment);

impl PodNetworkAttachmentApplyConfiguration {
    pub fn new(name: &str, namespace: &str) -> Self {
        let (api_version, kind, metadata) = type_meta::<PodNetworkAttachment>(name);

        Self {
            api_version,
            kind,
            metadata: metadata.map(|m| m.with_namespace(namespace)),
            spec: None,
            status: None,
        }
    }
}

#[skip_serializing_none]
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, ApplyBuilder)]
#[serde(rename_all = "camelCase")]
pub struct PodNetworkAttachmentSpecApplyConfiguration {
    pub pod_network_name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters_refs: Vec<ParametersRefApplyConfiguration>,
}

impl PodNetworkAttachmentSpecApplyConfiguration {
    pub fn new() -> Self {
        Self::default()
    }
}

#[skip_serializing_none]
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, ApplyBuilder)]
#[serde(rename_all = "camelCase")]
pub struct PodNetworkAttachmentStatusApplyConfiguration {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<ConditionApplyConfiguration>,
}

impl PodNetworkAttachmentStatusApplyConfiguration {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{
        PodNetworkAttachmentApplyConfiguration, PodNetworkAttachmentSpecApplyConfiguration,
        PodNetworkAttachmentStatusApplyConfiguration,
    };
    use crate::applyconfigurations::{
        meta::ConditionApplyConfiguration, v1alpha1::ParametersRefApplyConfiguration,
        ObjectApplyConfiguration,
    };

    #[test]
    fn new_sets_the_namespace() {
        let attachment = PodNetworkAttachmentApplyConfiguration::new("macvlan-eth1", "team-a")
            .with_spec(PodNetworkAttachmentSpecApplyConfiguration::new().with_pod_network_name("macvlan"));

        assert_eq!(attachment.name(), Some("macvlan-eth1"));
        assert_eq!(attachment.namespace(), Some("team-a"));
        assert_eq!(
            serde_json::to_value(&attachment).unwrap(),
            json!({
                "apiVersion": "networking.k8s.io/v1alpha1",
                "kind": "PodNetworkAttachment",
                "metadata": { "name": "macvlan-eth1", "namespace": "team-a" },
                "spec": { "podNetworkName": "macvlan" }
            })
        );
    }

    #[test]
    fn namespace_can_be_moved() {
        let attachment = PodNetworkAttachmentApplyConfiguration::new("macvlan-eth1", "team-a")
            .with_namespace("team-b")
            .with_annotations([("example.com/owner", "net")]);

        assert_eq!(attachment.namespace(), Some("team-b"));
    }

    #[test]
    #[should_panic(expected = "nil value passed to with_parameters_refs")]
    fn absent_parameters_ref_panics() {
        let _ = PodNetworkAttachmentSpecApplyConfiguration::new().with_parameters_refs([
            Some(ParametersRefApplyConfiguration::new().with_kind("ConfigMap").with_name("eth1")),
            None,
        ]);
    }

    #[test]
    fn configuration_survives_serialization() {
        let attachment = PodNetworkAttachmentApplyConfiguration::new("macvlan-eth1", "team-a")
            .with_labels([("team", "net")])
            .with_spec(
                PodNetworkAttachmentSpecApplyConfiguration::new()
                    .with_pod_network_name("macvlan")
                    .with_parameters_refs([ParametersRefApplyConfiguration::new()
                        .with_kind("ConfigMap")
                        .with_name("eth1")]),
            )
            .with_status(PodNetworkAttachmentStatusApplyConfiguration::new().with_conditions([
                ConditionApplyConfiguration::new()
                    .with_type("Ready")
                    .with_status("False")
                    .with_reason("ParamsNotReady"),
            ]));
        let yaml = serde_yaml::to_string(&attachment).unwrap();

        assert_eq!(
            serde_yaml::from_str::<PodNetworkAttachmentApplyConfiguration>(&yaml).unwrap(),
            attachment
        );
    }
}
