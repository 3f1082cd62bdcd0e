use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use podnet_core::resources::{
    conditions::{CONDITION_FALSE, CONDITION_TRUE, CONDITION_UNKNOWN},
    crd::v1alpha1::pod_network::IpamType,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_NAMESPACE: &str = "default";

#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
    #[command(flatten)]
    pub global_args: GlobalArgs,
}

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// kubernetes namespace to work with (defaults to the config file value or 'default')
    #[arg(short = 'n', long, global = true)]
    pub namespace: Option<String>,
    /// override default kubeconfig
    #[arg(long, global = true)]
    pub kube_config: Option<PathBuf>,
    /// override default kubeconfig context
    #[arg(long, global = true)]
    pub kube_context: Option<String>,
    /// override default podnet config path (defaults to 'podnet-config' next to the kubeconfig)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// enable verbose output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose_logging: bool,
    /// enable trace output (more detailed than verbose, overrides it if present)
    #[arg(long = "trace", global = true)]
    pub trace_logging: bool,
}

impl GlobalArgs {
    pub fn get_log_level(&self) -> LogLevel {
        if self.trace_logging {
            return LogLevel::Trace;
        }

        if self.verbose_logging {
            return LogLevel::Verbose;
        }

        LogLevel::Normal
    }
}

pub enum LogLevel {
    Normal,
    Verbose,
    Trace,
}

#[derive(Debug, Subcommand)]
#[command(arg_required_else_help = true)]
pub enum Commands {
    /// install the networking.k8s.io/v1alpha1 CRDs on the cluster
    #[command(alias = "i")]
    Install(InstallArgs),
    /// remove the networking.k8s.io/v1alpha1 CRDs from the cluster
    #[command(alias = "u")]
    Uninstall(UninstallArgs),
    /// print the CRDs or write them to a directory
    ExportCrds(ExportCrdsArgs),
    /// check manifests against the API constraints without touching the cluster
    Validate(ValidateArgs),
    /// validate manifests and server-side apply them
    #[command(alias = "a")]
    Apply(ApplyArgs),
    /// server-side apply a single resource built from the command line
    #[command(subcommand, alias = "c")]
    Create(CreateCommands),
    /// server-side apply a single status condition of a PodNetwork or a PodNetworkAttachment
    SetCondition(SetConditionArgs),
    /// list resources of the given kind
    #[command(alias = "l")]
    List(ListArgs),
    /// print versions
    Version(VersionArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    Names,
    Table,
    TableWithHeaders,
    Json,
    JsonPretty,
    Yaml,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResourceKind {
    #[value(alias = "clustercidr", alias = "clustercidrs")]
    ClusterCidr,
    #[value(alias = "ip", alias = "ipaddress", alias = "ipaddresses")]
    IpAddress,
    #[value(alias = "podnetwork", alias = "podnetworks")]
    PodNetwork,
    #[value(alias = "podnetworkattachment", alias = "podnetworkattachments")]
    PodNetworkAttachment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum IpamArg {
    External,
    Kubernetes,
    None,
}

impl From<IpamArg> for IpamType {
    fn from(value: IpamArg) -> Self {
        match value {
            IpamArg::External => IpamType::External,
            IpamArg::Kubernetes => IpamType::Kubernetes,
            IpamArg::None => IpamType::None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConditionTarget {
    #[value(alias = "podnetwork")]
    PodNetwork,
    #[value(alias = "podnetworkattachment")]
    PodNetworkAttachment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConditionStatusArg {
    True,
    False,
    Unknown,
}

impl ConditionStatusArg {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionStatusArg::True => CONDITION_TRUE,
            ConditionStatusArg::False => CONDITION_FALSE,
            ConditionStatusArg::Unknown => CONDITION_UNKNOWN,
        }
    }
}

#[derive(Debug, Args)]
pub struct InstallArgs {
    /// if set, no action will be taken on the cluster
    #[arg(long)]
    pub dry_run: bool,
    /// take over fields owned by other field managers
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Args)]
pub struct UninstallArgs {
    /// if set, no action will be taken on the cluster
    #[arg(long)]
    pub dry_run: bool,
    /// also remove CRDs that weren't installed by podnet
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Args)]
pub struct ExportCrdsArgs {
    /// write one '<crd name>.yaml' file per CRD into this directory instead of stdout
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// manifest files, '-' reads stdin
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// manifest files, '-' reads stdin
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
    #[command(flatten)]
    pub apply: ApplyFlags,
}

#[derive(Debug, Args)]
pub struct ApplyFlags {
    /// if set, no action will be taken on the cluster
    #[arg(long)]
    pub dry_run: bool,
    /// take over fields owned by other field managers
    #[arg(long)]
    pub force: bool,
    /// field manager name used for server-side apply
    #[arg(long)]
    pub field_manager: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum CreateCommands {
    /// create or update a ClusterCIDR
    ClusterCidr(CreateClusterCidrArgs),
    /// create or update a PodNetwork
    PodNetwork(CreatePodNetworkArgs),
    /// create or update a PodNetworkAttachment in the selected namespace
    PodNetworkAttachment(CreatePodNetworkAttachmentArgs),
}

#[derive(Debug, Args)]
pub struct CreateClusterCidrArgs {
    pub name: String,
    /// number of host bits per node, 8 gives a /24 per node for IPv4
    #[arg(long)]
    pub per_node_host_bits: i32,
    /// IPv4 block in CIDR notation
    #[arg(long)]
    pub ipv4: Option<String>,
    /// IPv6 block in CIDR notation
    #[arg(long)]
    pub ipv6: Option<String>,
    #[command(flatten)]
    pub apply: ApplyFlags,
}

#[derive(Debug, Args)]
pub struct CreatePodNetworkArgs {
    pub name: String,
    /// provider implementing the network
    #[arg(long)]
    pub provider: Option<String>,
    /// IPv4 IPAM handling
    #[arg(long, value_enum)]
    pub ipam4: Option<IpamArg>,
    /// IPv6 IPAM handling
    #[arg(long, value_enum)]
    pub ipam6: Option<IpamArg>,
    #[command(flatten)]
    pub apply: ApplyFlags,
}

#[derive(Debug, Args)]
pub struct CreatePodNetworkAttachmentArgs {
    pub name: String,
    /// name of the PodNetwork to attach to
    #[arg(long)]
    pub pod_network: String,
    #[command(flatten)]
    pub apply: ApplyFlags,
}

#[derive(Debug, Args)]
pub struct SetConditionArgs {
    /// kind of the object carrying the condition
    #[arg(value_enum)]
    pub kind: ConditionTarget,
    pub name: String,
    /// condition type, e.g. Ready, ParamsReady or InUse
    #[arg(long = "type")]
    pub condition_type: String,
    #[arg(long, value_enum)]
    pub status: ConditionStatusArg,
    /// machine readable reason in CamelCase
    #[arg(long)]
    pub reason: String,
    /// human readable details
    #[arg(long, default_value = "")]
    pub message: String,
    /// generation of the object the condition was computed from
    #[arg(long)]
    pub observed_generation: Option<i64>,
    #[command(flatten)]
    pub apply: ApplyFlags,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// kind of the listed resources
    #[arg(value_enum)]
    pub kind: ResourceKind,
    /// output format (defaults to the config file value or 'table-with-headers')
    #[arg(short = 'o', long, value_enum)]
    pub output: Option<OutputFormat>,
    /// list namespaced resources across all namespaces
    #[arg(short = 'A', long)]
    pub all_namespaces: bool,
}

#[derive(Debug, Args)]
pub struct VersionArgs {
    /// output format
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::TableWithHeaders)]
    pub output: OutputFormat,
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::{Cli, Commands, OutputFormat, ResourceKind};

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn list_accepts_kubectl_style_kinds() {
        let cli = Cli::parse_from(["podnet", "list", "clustercidrs", "-o", "yaml", "-n", "team-a"]);

        match cli.command {
            Some(Commands::List(args)) => {
                assert_eq!(args.kind, ResourceKind::ClusterCidr);
                assert_eq!(args.output, Some(OutputFormat::Yaml));
            }
            other => panic!("unexpected command {other:?}"),
        }
        assert_eq!(cli.global_args.namespace.as_deref(), Some("team-a"));
    }

    #[test]
    fn output_format_is_kebab_case_in_config() {
        assert_eq!(
            serde_yaml::from_str::<OutputFormat>("table-with-headers").unwrap(),
            OutputFormat::TableWithHeaders
        );
    }
}
