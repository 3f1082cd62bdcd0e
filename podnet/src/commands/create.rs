use std::fmt::Debug;

use anyhow::Context;
use kube::api::PatchParams;
use log::{debug, info};
use podnet_core::{
    applyconfigurations::{
        v1alpha1::{
            ClusterCIDRApplyConfiguration, ClusterCIDRSpecApplyConfiguration,
            PodNetworkApplyConfiguration, PodNetworkAttachmentApplyConfiguration,
            PodNetworkAttachmentSpecApplyConfiguration, PodNetworkSpecApplyConfiguration,
        },
        ObjectApplyConfiguration,
    },
    helpers::pretty_type_name,
    kubernetes::operations::{apply_cluster_configuration, apply_namespaced_configuration},
    resources::Validate,
};
use serde::de::DeserializeOwned;

use crate::{
    cli::{CreateClusterCidrArgs, CreatePodNetworkArgs, CreatePodNetworkAttachmentArgs},
    context::ConfigContext,
};

pub async fn create_cluster_cidr(
    args: CreateClusterCidrArgs,
    context: ConfigContext,
) -> anyhow::Result<()> {
    let apply_params: PatchParams = (&context.apply_options(&args.apply)?).into();
    let configuration = cluster_cidr_configuration(&args);

    debug!("{configuration:#?}");
    validate_configuration(&configuration)?;

    let client = context.create_client().await?;
    apply_cluster_configuration(&client, &configuration, &apply_params).await?;

    info!("ClusterCIDR '{}' applied!", args.name);

    Ok(())
}

pub async fn create_pod_network(
    args: CreatePodNetworkArgs,
    context: ConfigContext,
) -> anyhow::Result<()> {
    let apply_params: PatchParams = (&context.apply_options(&args.apply)?).into();
    let configuration = pod_network_configuration(&args);

    debug!("{configuration:#?}");
    validate_configuration(&configuration)?;

    let client = context.create_client().await?;
    apply_cluster_configuration(&client, &configuration, &apply_params).await?;

    info!("PodNetwork '{}' applied!", args.name);

    Ok(())
}

pub async fn create_pod_network_attachment(
    args: CreatePodNetworkAttachmentArgs,
    context: ConfigContext,
) -> anyhow::Result<()> {
    let apply_params: PatchParams = (&context.apply_options(&args.apply)?).into();
    let configuration = pod_network_attachment_configuration(&args, context.namespace());

    debug!("{configuration:#?}");
    validate_configuration(&configuration)?;

    let client = context.create_client().await?;
    apply_namespaced_configuration(&client, &configuration, &apply_params).await?;

    info!(
        "PodNetworkAttachment '{}/{}' applied!",
        context.namespace(),
        args.name
    );

    Ok(())
}

/// Runs the client-side checks on the object described by `configuration`.
fn validate_configuration<C>(configuration: &C) -> anyhow::Result<()>
where
    C: ObjectApplyConfiguration,
    C::Resource: DeserializeOwned + Validate,
{
    let kind = pretty_type_name::<C::Resource>();
    let name = configuration.name().unwrap_or_default();
    let resource: C::Resource = serde_json::to_value(configuration)
        .and_then(serde_json::from_value)
        .context(format!("Couldn't convert '{name}' {kind} configuration!"))?;

    resource
        .validate()
        .context(format!("'{name}' {kind} is invalid!"))
}

fn cluster_cidr_configuration(args: &CreateClusterCidrArgs) -> ClusterCIDRApplyConfiguration {
    let mut spec =
        ClusterCIDRSpecApplyConfiguration::new().with_per_node_host_bits(args.per_node_host_bits);

    if let Some(ipv4) = &args.ipv4 {
        spec = spec.with_ipv4(ipv4);
    }

    if let Some(ipv6) = &args.ipv6 {
        spec = spec.with_ipv6(ipv6);
    }

    ClusterCIDRApplyConfiguration::new(&args.name).with_spec(spec)
}

fn pod_network_configuration(args: &CreatePodNetworkArgs) -> PodNetworkApplyConfiguration {
    let mut spec = PodNetworkSpecApplyConfiguration::new();

    if let Some(provider) = &args.provider {
        spec = spec.with_provider(provider);
    }

    if let Some(ipam4) = args.ipam4 {
        spec = spec.with_ipam4(ipam4);
    }

    if let Some(ipam6) = args.ipam6 {
        spec = spec.with_ipam6(ipam6);
    }

    PodNetworkApplyConfiguration::new(&args.name).with_spec(spec)
}

fn pod_network_attachment_configuration(
    args: &CreatePodNetworkAttachmentArgs,
    namespace: &str,
) -> PodNetworkAttachmentApplyConfiguration {
    PodNetworkAttachmentApplyConfiguration::new(&args.name, namespace).with_spec(
        PodNetworkAttachmentSpecApplyConfiguration::new().with_pod_network_name(&args.pod_network),
    )
}
