use itertools::Itertools;
use k8s_openapi::{
    api::core::v1::{NodeSelector, NodeSelectorRequirement},
    apimachinery::pkg::apis::meta::v1::{Condition, ObjectMeta},
};
use once_cell::sync::Lazy;
use regex::Regex;

use super::ValidationError;

pub const DNS1123_SUBDOMAIN_MAX_LENGTH: usize = 253;
pub const DNS1123_LABEL_MAX_LENGTH: usize = 63;
pub const QUALIFIED_NAME_MAX_LENGTH: usize = 63;
pub const CONDITION_REASON_MAX_LENGTH: usize = 1024;
pub const CONDITION_MESSAGE_MAX_LENGTH: usize = 32768;
pub const MAX_CONDITIONS: usize = 5;

static DNS1123_SUBDOMAIN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?(\.[a-z0-9]([-a-z0-9]*[a-z0-9])?)*$").unwrap()
});
static DNS1123_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?$").unwrap());
static QUALIFIED_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z0-9][-A-Za-z0-9_.]*)?[A-Za-z0-9]$").unwrap());
static CONDITION_REASON: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z]([A-Za-z0-9_,:]*[A-Za-z0-9_])?$").unwrap());

pub fn is_dns1123_subdomain(value: &str) -> bool {
    value.len() <= DNS1123_SUBDOMAIN_MAX_LENGTH && DNS1123_SUBDOMAIN.is_match(value)
}

pub fn is_dns1123_label(value: &str) -> bool {
    value.len() <= DNS1123_LABEL_MAX_LENGTH && DNS1123_LABEL.is_match(value)
}

/// `[prefix/]name` where prefix is a DNS subdomain, as used by label keys and condition types.
pub fn is_qualified_name(value: &str) -> bool {
    let (prefix, name) = match value.split_once('/') {
        Some((prefix, name)) => (Some(prefix), name),
        None => (None, value),
    };

    if let Some(prefix) = prefix {
        if prefix.is_empty() || !is_dns1123_subdomain(prefix) {
            return false;
        }
    }

    name.len() <= QUALIFIED_NAME_MAX_LENGTH && QUALIFIED_NAME.is_match(name)
}

pub fn validate_dns1123_subdomain(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::required(field.to_owned()));
    }

    if !is_dns1123_subdomain(value) {
        return Err(ValidationError::invalid(
            field.to_owned(),
            format!("'{value}' is not a lowercase RFC 1123 subdomain"),
        ));
    }

    Ok(())
}

pub fn validate_dns1123_label(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::required(field.to_owned()));
    }

    if !is_dns1123_label(value) {
        return Err(ValidationError::invalid(
            field.to_owned(),
            format!("'{value}' is not a lowercase RFC 1123 label"),
        ));
    }

    Ok(())
}

/// Object name (or generateName when name is absent) of a resource named like a DNS subdomain.
pub fn validate_object_name(metadata: &ObjectMeta) -> Result<(), ValidationError> {
    match (&metadata.name, &metadata.generate_name) {
        (Some(name), _) => validate_dns1123_subdomain("metadata.name", name),
        (None, Some(_)) => Ok(()),
        (None, None) => Err(ValidationError::required("metadata.name")),
    }
}

pub fn validate_object_namespace(metadata: &ObjectMeta) -> Result<(), ValidationError> {
    let namespace = metadata
        .namespace
        .as_deref()
        .ok_or(ValidationError::required("metadata.namespace"))?;

    validate_dns1123_label("metadata.namespace", namespace)
}

/// Conditions list keyed by `type`, as carried by PodNetwork and PodNetworkAttachment statuses.
pub fn validate_conditions(
    field: &str,
    conditions: Option<&Vec<Condition>>,
) -> Result<(), ValidationError> {
    let conditions = match conditions {
        Some(conditions) => conditions,
        None => return Ok(()),
    };

    if conditions.len() > MAX_CONDITIONS {
        return Err(ValidationError::TooMany {
            field: field.to_owned().into(),
            max: MAX_CONDITIONS,
        });
    }

    if let Some(duplicate) = conditions.iter().map(|c| &c.type_).duplicates().next() {
        return Err(ValidationError::Duplicate {
            field: format!("{field}.type").into(),
            value: duplicate.to_owned(),
        });
    }

    for (i, condition) in conditions.iter().enumerate() {
        validate_condition(&format!("{field}[{i}]"), condition)?;
    }

    Ok(())
}

fn validate_condition(field: &str, condition: &Condition) -> Result<(), ValidationError> {
    if condition.type_.is_empty() {
        return Err(ValidationError::required(format!("{field}.type")));
    }

    if !is_qualified_name(&condition.type_) {
        return Err(ValidationError::invalid(
            format!("{field}.type"),
            format!("'{}' is not a qualified name", condition.type_),
        ));
    }

    match condition.status.as_str() {
        "True" | "False" | "Unknown" => (),
        other => {
            return Err(ValidationError::invalid(
                format!("{field}.status"),
                format!("'{other}' is not one of True, False, Unknown"),
            ))
        }
    }

    if condition.observed_generation.is_some_and(|g| g < 0) {
        return Err(ValidationError::invalid(
            format!("{field}.observedGeneration"),
            "must be greater than or equal to zero",
        ));
    }

    if condition.reason.is_empty() {
        return Err(ValidationError::required(format!("{field}.reason")));
    }

    if condition.reason.len() > CONDITION_REASON_MAX_LENGTH
        || !CONDITION_REASON.is_match(&condition.reason)
    {
        return Err(ValidationError::invalid(
            format!("{field}.reason"),
            format!("'{}' is not a CamelCase reason", condition.reason),
        ));
    }

    if condition.message.len() > CONDITION_MESSAGE_MAX_LENGTH {
        return Err(ValidationError::invalid(
            format!("{field}.message"),
            format!("must be at most {CONDITION_MESSAGE_MAX_LENGTH} bytes"),
        ));
    }

    Ok(())
}

pub fn validate_node_selector(field: &str, selector: &NodeSelector) -> Result<(), ValidationError> {
    if selector.node_selector_terms.is_empty() {
        return Err(ValidationError::required(format!(
            "{field}.nodeSelectorTerms"
        )));
    }

    for (i, term) in selector.node_selector_terms.iter().enumerate() {
        let term_field = format!("{field}.nodeSelectorTerms[{i}]");

        for (j, requirement) in term.match_expressions.iter().flatten().enumerate() {
            validate_node_selector_requirement(
                &format!("{term_field}.matchExpressions[{j}]"),
                requirement,
            )?;
        }

        for (j, requirement) in term.match_fields.iter().flatten().enumerate() {
            validate_node_field_selector_requirement(
                &format!("{term_field}.matchFields[{j}]"),
                requirement,
            )?;
        }
    }

    Ok(())
}

fn validate_node_selector_requirement(
    field: &str,
    requirement: &NodeSelectorRequirement,
) -> Result<(), ValidationError> {
    if !is_qualified_name(&requirement.key) {
        return Err(ValidationError::invalid(
            format!("{field}.key"),
            format!("'{}' is not a valid label key", requirement.key),
        ));
    }

    let values = requirement.values.as_deref().unwrap_or_default();

    match requirement.operator.as_str() {
        "In" | "NotIn" if values.is_empty() => Err(ValidationError::required(format!(
            "{field}.values"
        ))),
        "In" | "NotIn" => Ok(()),
        "Exists" | "DoesNotExist" if !values.is_empty() => Err(ValidationError::invalid(
            format!("{field}.values"),
            "may not be specified when operator is Exists or DoesNotExist",
        )),
        "Exists" | "DoesNotExist" => Ok(()),
        "Gt" | "Lt" => match values {
            [value] if value.parse::<i64>().is_ok() => Ok(()),
            _ => Err(ValidationError::invalid(
                format!("{field}.values"),
                "must be a single integer when operator is Gt or Lt",
            )),
        },
        other => Err(ValidationError::invalid(
            format!("{field}.operator"),
            format!("'{other}' is not a valid node selector operator"),
        )),
    }
}

fn validate_node_field_selector_requirement(
    field: &str,
    requirement: &NodeSelectorRequirement,
) -> Result<(), ValidationError> {
    if requirement.key != "metadata.name" {
        return Err(ValidationError::invalid(
            format!("{field}.key"),
            "only metadata.name is supported",
        ));
    }

    if !matches!(requirement.operator.as_str(), "In" | "NotIn") {
        return Err(ValidationError::invalid(
            format!("{field}.operator"),
            "must be In or NotIn",
        ));
    }

    if requirement.values.as_ref().map(Vec::len) != Some(1) {
        return Err(ValidationError::invalid(
            format!("{field}.values"),
            "must have exactly one value",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use k8s_openapi::{
        api::core::v1::{NodeSelector, NodeSelectorRequirement, NodeSelectorTerm},
        apimachinery::pkg::apis::meta::v1::{Condition, Time},
        chrono::{TimeZone, Utc},
    };

    use super::*;

    fn condition(type_: &str, status: &str) -> Condition {
        Condition {
            type_: type_.to_owned(),
            status: status.to_owned(),
            reason: "Testing".to_owned(),
            message: String::new(),
            observed_generation: Some(1),
            last_transition_time: Time(Utc.with_ymd_and_hms(2023, 5, 1, 12, 0, 0).unwrap()),
        }
    }

    fn selector(operator: &str, values: Option<Vec<&str>>) -> NodeSelector {
        NodeSelector {
            node_selector_terms: vec![NodeSelectorTerm {
                match_expressions: Some(vec![NodeSelectorRequirement {
                    key: "kubernetes.io/os".to_owned(),
                    operator: operator.to_owned(),
                    values: values.map(|v| v.into_iter().map(str::to_owned).collect()),
                }]),
                match_fields: None,
            }],
        }
    }

    #[test]
    fn dns_names_are_checked() {
        assert!(is_dns1123_subdomain("pod-network.example.com"));
        assert!(!is_dns1123_subdomain("Pod_Network"));
        assert!(!is_dns1123_subdomain(&"a".repeat(254)));
        assert!(is_dns1123_label("default"));
        assert!(!is_dns1123_label("kube.system"));
    }

    #[test]
    fn qualified_names_allow_a_subdomain_prefix() {
        assert!(is_qualified_name("Ready"));
        assert!(is_qualified_name("example.com/ParamsReady"));
        assert!(!is_qualified_name("/Ready"));
        assert!(!is_qualified_name("Not Ready"));
    }

    #[test]
    fn valid_conditions_pass() {
        let conditions = vec![condition("Ready", "True"), condition("ParamsReady", "False")];

        assert_eq!(validate_conditions("status.conditions", Some(&conditions)), Ok(()));
        assert_eq!(validate_conditions("status.conditions", None), Ok(()));
    }

    #[test]
    fn conditions_are_limited_to_five() {
        let conditions = (0..6)
            .map(|i| condition(&format!("Type{i}"), "True"))
            .collect::<Vec<_>>();

        assert_eq!(
            validate_conditions("status.conditions", Some(&conditions)),
            Err(ValidationError::TooMany {
                field: "status.conditions".into(),
                max: 5
            })
        );
    }

    #[test]
    fn conditions_are_keyed_by_type() {
        let conditions = vec![condition("Ready", "True"), condition("Ready", "False")];

        assert_eq!(
            validate_conditions("status.conditions", Some(&conditions)),
            Err(ValidationError::Duplicate {
                field: "status.conditions.type".into(),
                value: "Ready".to_owned()
            })
        );
    }

    #[test]
    fn condition_status_and_reason_are_checked() {
        let bad_status = vec![condition("Ready", "Yes")];
        let mut bad_reason = condition("Ready", "True");
        bad_reason.reason = "not a reason".to_owned();

        assert_eq!(
            validate_conditions("c", Some(&bad_status)).unwrap_err().field(),
            "c[0].status"
        );
        assert_eq!(
            validate_conditions("c", Some(&vec![bad_reason])).unwrap_err().field(),
            "c[0].reason"
        );
    }

    #[test]
    fn node_selector_operators_are_checked() {
        assert!(validate_node_selector("s", &selector("In", Some(vec!["linux"]))).is_ok());
        assert!(validate_node_selector("s", &selector("Exists", None)).is_ok());
        assert!(validate_node_selector("s", &selector("Gt", Some(vec!["3"]))).is_ok());

        assert!(validate_node_selector("s", &selector("In", None)).is_err());
        assert!(validate_node_selector("s", &selector("Exists", Some(vec!["linux"]))).is_err());
        assert!(validate_node_selector("s", &selector("Gt", Some(vec!["three"]))).is_err());
        assert!(validate_node_selector("s", &selector("Matches", Some(vec!["x"]))).is_err());
        assert!(validate_node_selector("s", &NodeSelector::default()).is_err());
    }

    #[test]
    fn object_name_may_be_generated() {
        let generated = ObjectMeta {
            generate_name: Some("cidr-".to_owned()),
            ..Default::default()
        };

        assert!(validate_object_name(&generated).is_ok());
        assert_eq!(
            validate_object_name(&ObjectMeta::default()),
            Err(ValidationError::required("metadata.name"))
        );
    }
}
