use std::collections::BTreeMap;

pub const API_APPROVED_ANNOTATION: &str = "api-approved.kubernetes.io";

/// CRDs in `*.k8s.io` groups are rejected by the API server unless they carry
/// the approval annotation, an "unapproved" value is accepted for experiments.
pub const API_APPROVED_UNAPPROVED: &str = "unapproved, experimental-only; please get an approval from Kubernetes API reviewers if you're trying to develop a CRD in the *.k8s.io or *.kubernetes.io groups";

pub fn get_crd_annotations() -> BTreeMap<String, String> {
    BTreeMap::from([(
        API_APPROVED_ANNOTATION.to_owned(),
        API_APPROVED_UNAPPROVED.to_owned(),
    )])
}
