use anyhow::Context;
use k8s_openapi::{
    apimachinery::pkg::apis::meta::v1::{Condition, Time},
    chrono::Utc,
};
use kube::api::PatchParams;
use log::{debug, info};
use podnet_core::{
    applyconfigurations::{
        meta::ConditionApplyConfiguration,
        v1alpha1::{
            PodNetworkApplyConfiguration, PodNetworkAttachmentApplyConfiguration,
            PodNetworkAttachmentStatusApplyConfiguration, PodNetworkStatusApplyConfiguration,
        },
    },
    kubernetes::operations::{
        apply_cluster_configuration_status, apply_namespaced_configuration_status,
    },
    resources::validation::validate_conditions,
};

use crate::{
    cli::{ConditionTarget, SetConditionArgs},
    context::ConfigContext,
};

pub async fn set_condition(args: SetConditionArgs, context: ConfigContext) -> anyhow::Result<()> {
    let apply_params: PatchParams = (&context.apply_options(&args.apply)?).into();
    let conditions = condition_configurations(&args, Time(Utc::now()))?;
    let client = context.create_client().await?;

    match args.kind {
        ConditionTarget::PodNetwork => {
            let configuration = PodNetworkApplyConfiguration::new(&args.name)
                .with_status(PodNetworkStatusApplyConfiguration::new().with_conditions(conditions));

            debug!("{configuration:#?}");
            apply_cluster_configuration_status(&client, &configuration, &apply_params).await?;

            info!(
                "PodNetwork '{}' condition '{}' set to {}!",
                args.name,
                args.condition_type,
                args.status.as_str()
            );
        }
        ConditionTarget::PodNetworkAttachment => {
            let configuration =
                PodNetworkAttachmentApplyConfiguration::new(&args.name, context.namespace())
                    .with_status(
                        PodNetworkAttachmentStatusApplyConfiguration::new()
                            .with_conditions(conditions),
                    );

            debug!("{configuration:#?}");
            apply_namespaced_configuration_status(&client, &configuration, &apply_params).await?;

            info!(
                "PodNetworkAttachment '{}/{}' condition '{}' set to {}!",
                context.namespace(),
                args.name,
                args.condition_type,
                args.status.as_str()
            );
        }
    }

    Ok(())
}

fn condition_configurations(
    args: &SetConditionArgs,
    now: Time,
) -> anyhow::Result<Vec<ConditionApplyConfiguration>> {
    let conditions = vec![Condition {
        type_: args.condition_type.clone(),
        status: args.status.as_str().to_owned(),
        observed_generation: args.observed_generation,
        last_transition_time: now,
        reason: args.reason.clone(),
        message: args.message.clone(),
    }];

    validate_conditions("status.conditions", Some(&conditions))
        .context(format!("Condition '{}' is invalid!", args.condition_type))?;

    Ok(conditions.iter().map(ConditionApplyConfiguration::from).collect())
}
