use std::fmt::Display;

use k8s_openapi::apimachinery::pkg::apis::meta::v1::Condition;

pub const CONDITION_TRUE: &str = "True";
pub const CONDITION_FALSE: &str = "False";
pub const CONDITION_UNKNOWN: &str = "Unknown";

/// Condition types known to PodNetwork and PodNetworkAttachment statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PodNetworkConditionType {
    /// The object is validated and every other condition is true. Switches
    /// back to false as soon as any other condition is false. Says nothing
    /// about readiness on a particular node.
    Ready,
    /// The object referenced by `parametersRefs` is ready for use. Maintained
    /// by the owner of that object, `Ready` depends on it whenever
    /// `parametersRefs` is not empty.
    ParamsReady,
    InUse,
}

impl PodNetworkConditionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PodNetworkConditionType::Ready => "Ready",
            PodNetworkConditionType::ParamsReady => "ParamsReady",
            PodNetworkConditionType::InUse => "InUse",
        }
    }
}

impl Display for PodNetworkConditionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PodNetworkConditionReason {
    /// `ParamsReady` is missing or false, only possible with a non-empty `parametersRefs`.
    ParamsNotReady,
    /// The deletion timestamp is set but pods still use the network; no new
    /// attachments should be added.
    DeleteInProgress,
}

impl PodNetworkConditionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            PodNetworkConditionReason::ParamsNotReady => "ParamsNotReady",
            PodNetworkConditionReason::DeleteInProgress => "DeleteInProgress",
        }
    }
}

impl Display for PodNetworkConditionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read access to a `type`-keyed conditions list.
pub trait HasConditions {
    fn conditions(&self) -> &[Condition];

    fn find_condition(&self, condition_type: &str) -> Option<&Condition> {
        self.conditions()
            .iter()
            .find(|c| c.type_ == condition_type)
    }

    fn is_condition_true(&self, condition_type: &str) -> bool {
        self.find_condition(condition_type)
            .is_some_and(|c| c.status == CONDITION_TRUE)
    }

    fn is_ready(&self) -> bool {
        self.is_condition_true(PodNetworkConditionType::Ready.as_str())
    }

    /// `True`, `False` or `Unknown` for the `Ready` condition, `Unknown` when it's absent.
    fn readiness(&self) -> &str {
        self.find_condition(PodNetworkConditionType::Ready.as_str())
            .map(|c| c.status.as_str())
            .unwrap_or(CONDITION_UNKNOWN)
    }
}

impl HasConditions for [Condition] {
    fn conditions(&self) -> &[Condition] {
        self
    }
}

impl HasConditions for Vec<Condition> {
    fn conditions(&self) -> &[Condition] {
        self
    }
}
