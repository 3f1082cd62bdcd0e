use anyhow::Context;
use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;
use kube::Api;
use log::{info, warn};
use podnet_core::resources::{
    crd::v1alpha1::{removable_v1alpha1_crd_names, remove_v1alpha1_crds},
    labels::get_crd_listparams,
};

use crate::{cli::UninstallArgs, context::ConfigContext};

pub async fn uninstall(args: UninstallArgs, context: ConfigContext) -> anyhow::Result<()> {
    info!("Removing networking.k8s.io/v1alpha1 CRDs from the cluster...");

    let client = context.create_client().await?;
    let crd_api: Api<CustomResourceDefinition> = Api::all(client.clone());
    let managed = crd_api
        .list_metadata(&get_crd_listparams())
        .await
        .context("Couldn't retrieve CRDs from the cluster!")?
        .items
        .into_iter()
        .filter_map(|crd| crd.metadata.name)
        .collect::<Vec<_>>();

    let crd_names = removable_v1alpha1_crd_names(&managed, args.force);

    if crd_names.is_empty() {
        warn!("No podnet managed CRDs found, use --force to remove CRDs installed by other means!");

        return Ok(());
    }

    if args.force {
        warn!("Removing CRDs regardless of who installed them!");
    }

    remove_v1alpha1_crds(&client, &crd_names, args.dry_run).await?;

    info!("Done! Resources of the removed kinds are garbage collected by the cluster.");

    Ok(())
}
