use std::{fs, path::Path};

use anyhow::{anyhow, Context};
use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;
use log::info;
use podnet_core::resources::crd::v1alpha1::v1alpha1_crds;

use crate::cli::ExportCrdsArgs;

const YAML_DOCUMENT_SEPARATOR: &str = "---\n";

pub fn export_crds(args: ExportCrdsArgs) -> anyhow::Result<()> {
    let crds = v1alpha1_crds();

    match args.output {
        Some(dir) => write_crds(&crds, &dir)?,
        None => print!("{}", render_crds(&crds)?),
    }

    Ok(())
}

fn render_crds(crds: &[CustomResourceDefinition]) -> anyhow::Result<String> {
    let mut output = String::new();

    for crd in crds {
        output.push_str(YAML_DOCUMENT_SEPARATOR);
        output.push_str(&serde_yaml::to_string(crd)?);
    }

    Ok(output)
}

fn write_crds(crds: &[CustomResourceDefinition], dir: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(dir).context(format!("Couldn't create {}!", dir.display()))?;

    for crd in crds {
        let name = crd
            .metadata
            .name
            .as_ref()
            .ok_or_else(|| anyhow!("CRD is missing a name!"))?;
        let path = dir.join(format!("{name}.yaml"));

        info!("Writing {name} CRD to {}...", path.display());

        fs::write(&path, serde_yaml::to_string(crd)?)
            .context(format!("Couldn't write {}!", path.display()))?;
    }

    Ok(())
}
