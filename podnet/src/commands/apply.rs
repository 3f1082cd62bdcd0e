use kube::{api::PatchParams, Client};
use log::{debug, info};
use podnet_core::{
    kubernetes::operations::{apply_cluster_resource, apply_namespaced_resource},
    manifest::NetworkingResource,
};

use crate::{
    cli::ApplyArgs,
    context::ConfigContext,
    manifests::{load_resources, validate_resources},
};

pub async fn apply(args: ApplyArgs, context: ConfigContext) -> anyhow::Result<()> {
    let resources = load_resources(&args.files, context.namespace())?;

    validate_resources(&resources)?;

    let options = context.apply_options(&args.apply)?;
    let apply_params: PatchParams = (&options).into();
    let client = context.create_client().await?;

    for resource in &resources {
        apply_resource(&client, resource, &apply_params).await?;
    }

    info!(
        "Applied {} resource(s) as '{}'{}",
        resources.len(),
        options.field_manager,
        if options.dry_run { " (dry run)" } else { "" }
    );

    Ok(())
}

async fn apply_resource(
    client: &Client,
    resource: &NetworkingResource,
    apply_params: &PatchParams,
) -> anyhow::Result<()> {
    debug!(
        "Applying {resource} ({})",
        if resource.is_namespaced() { "namespaced" } else { "cluster scoped" }
    );

    match resource {
        NetworkingResource::ClusterCIDR(r) => {
            apply_cluster_resource(client, r, apply_params).await?;
        }
        NetworkingResource::IPAddress(r) => {
            apply_cluster_resource(client, r, apply_params).await?;
        }
        NetworkingResource::PodNetwork(r) => {
            apply_cluster_resource(client, r, apply_params).await?;
        }
        NetworkingResource::PodNetworkAttachment(r) => {
            apply_namespaced_resource(client, r, apply_params).await?;
        }
    }

    Ok(())
}
