use podnet_macros::ApplyBuilder;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use super::references::ParametersRefApplyConfiguration;
use crate::{
    applyconfigurations::{
        meta::{ConditionApplyConfiguration, ObjectMetaApplyConfiguration},
        object_apply_configuration, type_meta,
    },
    resources::crd::v1alpha1::pod_network::{IpamType, PodNetwork},
};

#[skip_serializing_none]
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, ApplyBuilder)]
#[serde(rename_all = "camelCase")]
pub struct PodNetworkApplyConfiguration {
    pub api_version: Option<String>,
    pub kind: Option<String>,
    #[apply(skip)]
    pub metadata: Option<ObjectMetaApplyConfiguration>,
    pub spec: Option<PodNetworkSpecApplyConfiguration>,
    pub status: Option<PodNetworkStatusApplyConfiguration>,
}

object_apply_configuration!(PodNetworkApplyConfiguration, PodNetwork);

impl PodNetworkApplyConfiguration {
    pub fn new(name: &str) -> Self {
        let (api_version, kind, metadata) = type_meta::<PodNetwork>(name);

        Self {
            api_version,
            kind,
            metadata,
            spec: None,
            status: None,
        }
    }
}

#[skip_serializing_none]
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, ApplyBuilder)]
#[serde(rename_all = "camelCase")]
pub struct PodNetworkSpecApplyConfiguration {
    pub ipam4: Option<IpamType>,
    pub ipam6: Option<IpamType>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters_refs: Vec<ParametersRefApplyConfiguration>,
    pub provider: Option<String>,
}

impl PodNetworkSpecApplyConfiguration {
    pub fn new() -> Self {
        Self::default()
    }
}

#[skip_serializing_none]
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, ApplyBuilder)]
#[serde(rename_all = "camelCase")]
pub struct PodNetworkStatusApplyConfiguration {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<ConditionApplyConfiguration>,
}

impl PodNetworkStatusApplyConfiguration {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{
        PodNetworkApplyConfiguration, PodNetworkSpecApplyConfiguration,
        PodNetworkStatusApplyConfiguration,
    };
    use crate::{
        applyconfigurations::{
            meta::ConditionApplyConfiguration, v1alpha1::ParametersRefApplyConfiguration,
        },
        resources::crd::v1alpha1::pod_network::IpamType,
    };

    fn parameters(name: &str) -> ParametersRefApplyConfiguration {
        ParametersRefApplyConfiguration::new()
            .with_group("example.com")
            .with_kind("MacvlanParams")
            .with_name(name)
    }

    #[test]
    fn parameters_refs_are_appended() {
        let spec = PodNetworkSpecApplyConfiguration::new()
            .with_parameters_refs([parameters("eth1")])
            .with_parameters_refs([parameters("eth2"), parameters("eth3")]);
        let names = spec
            .parameters_refs
            .iter()
            .filter_map(|p| p.name.as_deref())
            .collect::<Vec<_>>();

        assert_eq!(names, vec!["eth1", "eth2", "eth3"]);
    }

    #[test]
    #[should_panic(expected = "nil value passed to with_parameters_refs")]
    fn absent_parameters_ref_panics() {
        let _ = PodNetworkSpecApplyConfiguration::new()
            .with_parameters_refs([Some(parameters("eth1")), None::<ParametersRefApplyConfiguration>]);
    }

    #[test]
    #[should_panic(expected = "nil value passed to with_conditions")]
    fn absent_condition_panics() {
        let _ = PodNetworkStatusApplyConfiguration::new()
            .with_conditions([None::<ConditionApplyConfiguration>]);
    }

    #[test]
    fn only_set_fields_are_serialized() {
        let network = PodNetworkApplyConfiguration::new("macvlan")
            .with_spec(
                PodNetworkSpecApplyConfiguration::new()
                    .with_ipam4(IpamType::External)
                    .with_ipam4(IpamType::Kubernetes)
                    .with_provider("example.com/macvlan"),
            )
            .with_status(PodNetworkStatusApplyConfiguration::new().with_conditions([
                ConditionApplyConfiguration::new()
                    .with_type("Ready")
                    .with_status("True"),
            ]));

        assert_eq!(
            serde_json::to_value(&network).unwrap(),
            json!({
                "apiVersion": "networking.k8s.io/v1alpha1",
                "kind": "PodNetwork",
                "metadata": { "name": "macvlan" },
                "spec": { "ipam4": "kubernetes", "provider": "example.com/macvlan" },
                "status": { "conditions": [{ "type": "Ready", "status": "True" }] }
            })
        );
    }
}
