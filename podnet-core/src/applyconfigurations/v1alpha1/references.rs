use podnet_macros::ApplyBuilder;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

#[skip_serializing_none]
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, ApplyBuilder)]
#[serde(rename_all = "camelCase")]
pub struct ParentReferenceApplyConfiguration {
    pub group: Option<String>,
    pub resource: Option<String>,
    pub namespace: Option<String>,
    pub name: Option<String>,
    pub uid: Option<String>,
}

impl ParentReferenceApplyConfiguration {
    pub fn new() -> Self {
        Self::default()
    }
}

#[skip_serializing_none]
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, ApplyBuilder)]
#[serde(rename_all = "camelCase")]
pub struct ParametersRefApplyConfiguration {
    pub group: Option<String>,
    pub kind: Option<String>,
    pub namespace: Option<String>,
    pub name: Option<String>,
}

impl ParametersRefApplyConfiguration {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{ParametersRefApplyConfiguration, ParentReferenceApplyConfiguration};

    #[test]
    fn last_value_wins() {
        let reference = ParentReferenceApplyConfiguration::new()
            .with_resource("services")
            .with_name("kubernetes")
            .with_name("dns");

        assert_eq!(reference.name.as_deref(), Some("dns"));
        assert_eq!(
            serde_json::to_value(&reference).unwrap(),
            json!({ "resource": "services", "name": "dns" })
        );
    }

    #[test]
    fn empty_group_is_kept_when_set() {
        let parameters = ParametersRefApplyConfiguration::new()
            .with_group("")
            .with_kind("ConfigMap")
            .with_name("eth1");

        assert_eq!(
            serde_json::to_value(&parameters).unwrap(),
            json!({ "group": "", "kind": "ConfigMap", "name": "eth1" })
        );
    }
}
