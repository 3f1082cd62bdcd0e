use clap::Parser;
use cli::{Commands, CreateCommands, GlobalArgs, LogLevel};
use commands::{
    apply::apply,
    create::{create_cluster_cidr, create_pod_network, create_pod_network_attachment},
    export_crds::export_crds,
    install::install,
    list::list,
    set_condition::set_condition,
    uninstall::uninstall,
    validate::validate,
    version::print_version,
};
use context::ConfigContext;
use env_logger::Target;
use log::LevelFilter;

use crate::cli::Cli;

mod cli;
mod commands;
mod config;
mod context;
mod manifests;
mod output;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    configure_logging(&cli.global_args);

    let context = ConfigContext::new(&cli.global_args)?;

    if let Some(command) = cli.command {
        match command {
            Commands::Install(args) => install(args, context).await?,
            Commands::Uninstall(args) => uninstall(args, context).await?,
            Commands::ExportCrds(args) => export_crds(args)?,
            Commands::Validate(args) => validate(args, context)?,
            Commands::Apply(args) => apply(args, context).await?,
            Commands::Create(command) => match command {
                CreateCommands::ClusterCidr(args) => create_cluster_cidr(args, context).await?,
                CreateCommands::PodNetwork(args) => create_pod_network(args, context).await?,
                CreateCommands::PodNetworkAttachment(args) => {
                    create_pod_network_attachment(args, context).await?
                }
            },
            Commands::SetCondition(args) => set_condition(args, context).await?,
            Commands::List(args) => list(args, context).await?,
            Commands::Version(args) => print_version(args, context).await?,
        }
    }

    Ok(())
}

fn configure_logging(global_args: &GlobalArgs) {
    let log_level = global_args.get_log_level();
    let mut logger = env_logger::builder();

    logger
        .format_timestamp(None)
        .format_module_path(matches!(log_level, LogLevel::Trace))
        .format_target(false)
        .format_level(false)
        .target(Target::Stderr);

    match log_level {
        LogLevel::Normal => {
            logger
                .filter(Some("podnet"), LevelFilter::Info)
                .filter(Some("podnet_core"), LevelFilter::Info);
        }
        LogLevel::Verbose => {
            logger
                .filter(Some("podnet"), LevelFilter::Debug)
                .filter(Some("podnet_core"), LevelFilter::Debug);
        }
        LogLevel::Trace => {
            logger.filter(None, LevelFilter::Trace);
        }
    }

    logger.init();
}
