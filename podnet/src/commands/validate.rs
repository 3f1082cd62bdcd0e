use log::info;

use crate::{
    cli::ValidateArgs,
    context::ConfigContext,
    manifests::{load_resources, validate_resources},
};

pub fn validate(args: ValidateArgs, context: ConfigContext) -> anyhow::Result<()> {
    let resources = load_resources(&args.files, context.namespace())?;

    validate_resources(&resources)?;

    info!("All {} resource(s) are valid!", resources.len());

    Ok(())
}
