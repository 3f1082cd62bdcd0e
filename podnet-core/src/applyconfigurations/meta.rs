use std::collections::BTreeMap;

use k8s_openapi::apimachinery::pkg::apis::meta::v1::{Condition, OwnerReference, Time};
use podnet_macros::ApplyBuilder;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

/// Declarative counterpart of `ObjectMeta`, only the fields set by the
/// caller take part in the apply.
#[skip_serializing_none]
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, ApplyBuilder)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMetaApplyConfiguration {
    pub name: Option<String>,
    pub generate_name: Option<String>,
    pub namespace: Option<String>,
    pub uid: Option<String>,
    pub resource_version: Option<String>,
    pub generation: Option<i64>,
    pub creation_timestamp: Option<Time>,
    pub deletion_timestamp: Option<Time>,
    pub deletion_grace_period_seconds: Option<i64>,
    pub labels: Option<BTreeMap<String, String>>,
    pub annotations: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub owner_references: Vec<OwnerReference>,
    #[apply(plain)]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub finalizers: Vec<String>,
}

/// Declarative counterpart of a `metav1.Condition` status entry.
#[skip_serializing_none]
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, ApplyBuilder)]
#[serde(rename_all = "camelCase")]
pub struct ConditionApplyConfiguration {
    #[serde(rename = "type")]
    pub type_: Option<String>,
    pub status: Option<String>,
    pub observed_generation: Option<i64>,
    pub last_transition_time: Option<Time>,
    pub reason: Option<String>,
    pub message: Option<String>,
}

impl ConditionApplyConfiguration {
    pub fn new() -> Self {
        Self::default()
    }
}

impl From<&Condition> for ConditionApplyConfiguration {
    fn from(value: &Condition) -> Self {
        Self {
            type_: Some(value.type_.clone()),
            status: Some(value.status.clone()),
            observed_generation: value.observed_generation,
            last_transition_time: Some(value.last_transition_time.clone()),
            reason: Some(value.reason.clone()),
            message: Some(value.message.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use k8s_openapi::{
        apimachinery::pkg::apis::meta::v1::{Condition, OwnerReference, Time},
        chrono::{TimeZone, Utc},
    };
    use serde_json::json;

    use super::{ConditionApplyConfiguration, ObjectMetaApplyConfiguration};

    #[test]
    fn label_entries_are_merged() {
        let meta = ObjectMetaApplyConfiguration::default()
            .with_labels([("team", "net"), ("tier", "backend")])
            .with_labels([("tier", "frontend")]);

        assert_eq!(
            serde_json::to_value(&meta).unwrap(),
            json!({ "labels": { "team": "net", "tier": "frontend" } })
        );
    }

    #[test]
    fn finalizers_are_appended() {
        let meta = ObjectMetaApplyConfiguration::default()
            .with_finalizers(["podnet/cleanup"])
            .with_finalizers(vec!["example.com/hold".to_owned()]);

        assert_eq!(meta.finalizers, vec!["podnet/cleanup", "example.com/hold"]);
    }

    #[test]
    #[should_panic(expected = "nil value passed to with_owner_references")]
    fn absent_owner_reference_panics() {
        let _ = ObjectMetaApplyConfiguration::default().with_owner_references([
            Some(OwnerReference {
                api_version: "v1".to_owned(),
                kind: "Service".to_owned(),
                name: "kubernetes".to_owned(),
                uid: "2c1d4b8a".to_owned(),
                ..Default::default()
            }),
            None,
        ]);
    }

    #[test]
    fn condition_uses_the_type_key() {
        let condition = ConditionApplyConfiguration::new()
            .with_type("Ready")
            .with_status("False")
            .with_status("True")
            .with_reason("ParamsNotReady")
            .with_last_transition_time(Time(Utc.with_ymd_and_hms(2023, 5, 1, 12, 0, 0).unwrap()));

        assert_eq!(
            serde_json::to_value(&condition).unwrap(),
            json!({
                "type": "Ready",
                "status": "True",
                "lastTransitionTime": "2023-05-01T12:00:00Z",
                "reason": "ParamsNotReady"
            })
        );
    }

    #[test]
    fn condition_is_taken_over_field_by_field() {
        let condition = Condition {
            type_: "InUse".to_owned(),
            status: "True".to_owned(),
            observed_generation: Some(3),
            last_transition_time: Time(Utc.with_ymd_and_hms(2023, 5, 1, 12, 0, 0).unwrap()),
            reason: "AttachmentsPresent".to_owned(),
            message: String::new(),
        };
        let configuration = ConditionApplyConfiguration::from(&condition);

        assert_eq!(
            serde_json::to_value(&configuration).unwrap(),
            serde_json::to_value(&condition).unwrap()
        );
    }

    #[test]
    fn metadata_survives_serialization() {
        let meta = ObjectMetaApplyConfiguration::default()
            .with_name("macvlan")
            .with_namespace("team-a")
            .with_generation(4)
            .with_labels([("team", "net")])
            .with_annotations([("example.com/owner", "net-team")])
            .with_finalizers(["podnet/cleanup"]);
        let json = serde_json::to_string(&meta).unwrap();

        assert_eq!(
            serde_json::from_str::<ObjectMetaApplyConfiguration>(&json).unwrap(),
            meta
        );
    }
}
