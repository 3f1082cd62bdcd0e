use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;
use kube::{
    api::{DeleteParams, PatchParams},
    Client, CustomResourceExt,
};

use crate::{
    helpers::AndIf,
    kubernetes::operations::{apply_crd, try_remove_cluster_resource},
    resources::{annotations::get_crd_annotations, labels::get_crd_labels},
};

use self::{
    cluster_cidr::ClusterCIDR, ip_address::IPAddress, pod_network::PodNetwork,
    pod_network_attachment::PodNetworkAttachment,
};

pub mod cluster_cidr;
pub mod ip_address;
pub mod pod_network;
pub mod pod_network_attachment;
pub mod references;

/// CRDs of every v1alpha1 kind, labelled as managed by podnet.
pub fn v1alpha1_crds() -> Vec<CustomResourceDefinition> {
    vec![
        ClusterCIDR::crd(),
        IPAddress::crd(),
        PodNetwork::crd(),
        PodNetworkAttachment::crd(),
    ]
    .into_iter()
    .map(|mut crd| {
        crd.metadata
            .labels
            .get_or_insert_with(Default::default)
            .extend(get_crd_labels());
        crd.metadata
            .annotations
            .get_or_insert_with(Default::default)
            .extend(get_crd_annotations());
        mark_conditions_as_list_map(&mut crd);
        crd
    })
    .collect()
}

/// Conditions are owned per type by different field managers, server-side
/// apply merges them by `type` only when the schema says so.
fn mark_conditions_as_list_map(crd: &mut CustomResourceDefinition) {
    for version in &mut crd.spec.versions {
        let conditions = version
            .schema
            .as_mut()
            .and_then(|schema| schema.open_api_v3_schema.as_mut())
            .and_then(|schema| schema.properties.as_mut())
            .and_then(|properties| properties.get_mut("status"))
            .and_then(|status| status.properties.as_mut())
            .and_then(|properties| properties.get_mut("conditions"));

        if let Some(conditions) = conditions {
            conditions.x_kubernetes_list_type = Some("map".to_owned());
            conditions.x_kubernetes_list_map_keys = Some(vec!["type".to_owned()]);
        }
    }
}

pub fn v1alpha1_crd_names() -> [&'static str; 4] {
    [
        ClusterCIDR::crd_name(),
        IPAddress::crd_name(),
        PodNetwork::crd_name(),
        PodNetworkAttachment::crd_name(),
    ]
}

pub async fn create_v1alpha1_crds(
    client: &Client,
    apply_params: &PatchParams,
) -> anyhow::Result<()> {
    for crd in v1alpha1_crds() {
        apply_crd(client, &crd, apply_params).await?;
    }

    Ok(())
}

/// v1alpha1 CRD names present in `managed`, every v1alpha1 CRD name with `include_unmanaged`.
pub fn removable_v1alpha1_crd_names(
    managed: &[String],
    include_unmanaged: bool,
) -> Vec<&'static str> {
    v1alpha1_crd_names()
        .into_iter()
        .filter(|name| include_unmanaged || managed.iter().any(|m| m == name))
        .collect()
}

pub async fn remove_v1alpha1_crds(
    client: &Client,
    crd_names: &[&str],
    dry_run: bool,
) -> anyhow::Result<()> {
    let delete_params = DeleteParams::foreground().and_if(dry_run, |p| p.dry_run());

    for &crd_name in crd_names {
        try_remove_cluster_resource::<CustomResourceDefinition>(client, crd_name, &delete_params)
            .await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{removable_v1alpha1_crd_names, v1alpha1_crd_names, v1alpha1_crds};
    use crate::resources::annotations::API_APPROVED_ANNOTATION;

    #[test]
    fn crds_are_labelled_and_approved() {
        for crd in v1alpha1_crds() {
            let metadata = &crd.metadata;

            assert!(metadata
                .annotations
                .as_ref()
                .unwrap()
                .contains_key(API_APPROVED_ANNOTATION));
            assert_eq!(
                metadata.labels.as_ref().unwrap()["app.kubernetes.io/managed-by"],
                "podnet-cli"
            );
            assert_eq!(crd.spec.group, "networking.k8s.io");
        }
    }

    #[test]
    fn crd_names_match_the_generated_crds() {
        let names = v1alpha1_crds()
            .into_iter()
            .filter_map(|crd| crd.metadata.name)
            .collect::<Vec<_>>();

        assert_eq!(names, v1alpha1_crd_names());
        assert_eq!(names[0], "clustercidrs.networking.k8s.io");
    }

    #[test]
    fn only_managed_crds_are_removable() {
        let managed = vec![
            "podnetworks.networking.k8s.io".to_owned(),
            "gateways.gateway.networking.k8s.io".to_owned(),
        ];

        assert_eq!(
            removable_v1alpha1_crd_names(&managed, false),
            vec!["podnetworks.networking.k8s.io"]
        );
        assert!(removable_v1alpha1_crd_names(&[], false).is_empty());
        assert_eq!(removable_v1alpha1_crd_names(&[], true), v1alpha1_crd_names());
    }

    #[test]
    fn only_attachments_are_namespaced() {
        let scopes = v1alpha1_crds()
            .into_iter()
            .map(|crd| (crd.spec.names.kind, crd.spec.scope))
            .collect::<Vec<_>>();

        assert_eq!(
            scopes,
            vec![
                ("ClusterCIDR".to_owned(), "Cluster".to_owned()),
                ("IPAddress".to_owned(), "Cluster".to_owned()),
                ("PodNetwork".to_owned(), "Cluster".to_owned()),
                ("PodNetworkAttachment".to_owned(), "Namespaced".to_owned()),
            ]
        );
    }

    #[test]
    fn conditions_are_limited_in_the_schema() {
        for crd in &v1alpha1_crds()[2..] {
            let schema = serde_json::to_value(&crd.spec.versions[0].schema).unwrap();
            let conditions =
                &schema["openAPIV3Schema"]["properties"]["status"]["properties"]["conditions"];

            assert_eq!(conditions["maxItems"], 5);
            assert_eq!(conditions["x-kubernetes-list-type"], "map");
            assert_eq!(conditions["x-kubernetes-list-map-keys"], json!(["type"]));
        }
    }

    #[test]
    fn kinds_without_status_are_left_alone() {
        let crd = &v1alpha1_crds()[0];
        let schema = serde_json::to_value(&crd.spec.versions[0].schema).unwrap();

        assert!(schema["openAPIV3Schema"]["properties"]["status"].is_null());
    }
}
