use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use kube::Client;
use log::debug;
use podnet_core::{
    helpers::With,
    kubernetes::operations::{create_local_client, ApplyOptions, ApplyOptionsBuilder},
    FIELD_MANAGER,
};

use crate::{
    cli::{ApplyFlags, GlobalArgs, OutputFormat, DEFAULT_NAMESPACE},
    config::{PodnetConfig, DEFAULT_CONFIG_FILENAME},
};

pub const KUBECONFIG_ENV_VAR: &str = "KUBECONFIG";

/// Kubeconfig location, podnet config and the command line overrides of both.
pub struct ConfigContext {
    kube_config_path: PathBuf,
    kube_context: Option<String>,
    namespace: Option<String>,
    podnet_config: PodnetConfig,
}

impl ConfigContext {
    pub fn new(global_args: &GlobalArgs) -> anyhow::Result<Self> {
        let kube_config_path = match &global_args.kube_config {
            Some(path) => path.to_owned(),
            None => default_kube_config_path()?,
        };
        let podnet_config_path = match &global_args.config {
            Some(path) => {
                if path.file_name().is_none() {
                    return Err(anyhow!("Podnet config path is invalid!"));
                }

                path.to_owned()
            }
            None => kube_config_path
                .parent()
                .unwrap_or(Path::new(""))
                .to_owned()
                .with(|d| d.push(DEFAULT_CONFIG_FILENAME)),
        };
        let podnet_config = PodnetConfig::load_or_default(&podnet_config_path)
            .context("Couldn't load the podnet config!")?;

        Ok(Self {
            kube_config_path,
            kube_context: global_args.kube_context.clone(),
            namespace: global_args.namespace.clone(),
            podnet_config,
        })
    }

    pub fn namespace(&self) -> &str {
        self.namespace
            .as_deref()
            .or(self.podnet_config.namespace.as_deref())
            .unwrap_or(DEFAULT_NAMESPACE)
    }

    pub fn output_format(&self, flag: Option<OutputFormat>) -> OutputFormat {
        flag.or(self.podnet_config.output)
            .unwrap_or(OutputFormat::TableWithHeaders)
    }

    pub fn apply_options(&self, flags: &ApplyFlags) -> anyhow::Result<ApplyOptions> {
        let field_manager = flags
            .field_manager
            .as_deref()
            .or(self.podnet_config.field_manager.as_deref())
            .unwrap_or(FIELD_MANAGER);
        let options = ApplyOptionsBuilder::default()
            .field_manager(field_manager)
            .dry_run(flags.dry_run)
            .force(flags.force)
            .build()?;

        debug!("{options:?}");

        Ok(options)
    }

    pub async fn create_client(&self) -> anyhow::Result<Client> {
        create_local_client(
            Some(self.kube_config_path.as_path()),
            self.kube_context.as_deref(),
        )
        .await
    }
}

fn default_kube_config_path() -> anyhow::Result<PathBuf> {
    std::env::var(KUBECONFIG_ENV_VAR)
        .map(|s| s.into())
        .or_else(|_| {
            home::home_dir()
                .map(|d| d.with(|d| d.push(".kube")).with(|d| d.push("config")))
                .ok_or(anyhow!("Missing home dir!"))
        })
}
