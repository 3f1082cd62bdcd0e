use log::debug;
use podnet_core::GROUP_VERSION;
use podnet_macros::TableOutputRow;
use serde::Serialize;

use crate::{cli::VersionArgs, context::ConfigContext, output::CliPrint};

pub const LOCAL_PODNET_VERSION: &str = env!("CARGO_PKG_VERSION");

const UNKNOWN_VERSION: &str = "unknown";

pub async fn print_version(args: VersionArgs, context: ConfigContext) -> anyhow::Result<()> {
    let server_version = match fetch_server_version(&context).await {
        Ok(version) => Some(version),
        Err(error) => {
            debug!("Couldn't fetch the cluster version! {error}");
            None
        }
    };

    let version_table = vec![
        VersionView::get_local_cli_version(),
        VersionView::get_api_version(),
        VersionView::get_server_version(server_version.as_deref()),
    ];

    version_table.print(args.output)?;

    Ok(())
}

async fn fetch_server_version(context: &ConfigContext) -> anyhow::Result<String> {
    let client = context.create_client().await?;
    let info = client.apiserver_version().await?;

    Ok(info.git_version)
}

#[derive(Serialize, TableOutputRow)]
struct VersionView<'a> {
    #[name_column]
    pub component: &'a str,
    pub version: &'a str,
}

impl<'a> VersionView<'a> {
    pub fn get_local_cli_version() -> Self {
        Self {
            component: "podnet CLI (local)",
            version: LOCAL_PODNET_VERSION,
        }
    }

    pub fn get_api_version() -> Self {
        Self {
            component: "resource API",
            version: GROUP_VERSION,
        }
    }

    pub fn get_server_version(version: Option<&'a str>) -> Self {
        Self {
            component: "kubernetes (server)",
            version: version.unwrap_or(UNKNOWN_VERSION),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::VersionView;
    use crate::output::TableOutputRow;

    #[test]
    fn unreachable_server_is_unknown() {
        assert_eq!(
            VersionView::get_server_version(None).get_row(),
            vec!["kubernetes (server)", "unknown"]
        );
        assert_eq!(VersionView::get_api_version().version, "networking.k8s.io/v1alpha1");
    }
}
