use kube::api::PatchParams;
use log::{debug, info};
use podnet_core::{kubernetes::operations::ApplyOptionsBuilder, resources::crd::v1alpha1::create_v1alpha1_crds};

use crate::{cli::InstallArgs, context::ConfigContext};

pub async fn install(args: InstallArgs, context: ConfigContext) -> anyhow::Result<()> {
    info!("Installing networking.k8s.io/v1alpha1 CRDs on the cluster...");

    let client = context.create_client().await?;
    let options = ApplyOptionsBuilder::default()
        .dry_run(args.dry_run)
        .force(args.force)
        .build()?;
    let apply_params: PatchParams = (&options).into();

    debug!("{apply_params:?}");

    create_v1alpha1_crds(&client, &apply_params).await?;

    if args.dry_run {
        info!("Dry run finished, nothing was changed!");
    } else {
        info!("Successfully installed the CRDs!");
    }

    Ok(())
}
