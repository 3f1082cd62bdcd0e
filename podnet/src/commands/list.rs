use kube::api::ListParams;
use podnet_core::{
    kubernetes::operations::{list_cluster_resources, list_resources},
    resources::{
        conditions::HasConditions,
        crd::v1alpha1::{
            cluster_cidr::ClusterCIDR,
            ip_address::IPAddress,
            pod_network::{IpamType, PodNetwork},
            pod_network_attachment::PodNetworkAttachment,
            references::ParentReference,
        },
        list::ResourceList,
    },
};
use podnet_macros::TableOutputRow;

use crate::{
    cli::{ListArgs, OutputFormat, ResourceKind},
    context::ConfigContext,
    output::{SerializableOutputDisplay, TableCellOption, TableOutputDisplay, TableOutputRow},
};

pub async fn list(args: ListArgs, context: ConfigContext) -> anyhow::Result<()> {
    let client = context.create_client().await?;
    let format = context.output_format(args.output);
    let list_params = ListParams::default();

    match args.kind {
        ResourceKind::ClusterCidr => {
            let list = ResourceList::new(
                list_cluster_resources::<ClusterCIDR>(&client, &list_params).await?,
            );

            if !list.print_serialized(format)? {
                print_views(list.items.iter().map(ClusterCIDRView::from), format);
            }
        }
        ResourceKind::IpAddress => {
            let list = ResourceList::new(
                list_cluster_resources::<IPAddress>(&client, &list_params).await?,
            );

            if !list.print_serialized(format)? {
                print_views(list.items.iter().map(IPAddressView::from), format);
            }
        }
        ResourceKind::PodNetwork => {
            let list = ResourceList::new(
                list_cluster_resources::<PodNetwork>(&client, &list_params).await?,
            );

            if !list.print_serialized(format)? {
                print_views(list.items.iter().map(PodNetworkView::from), format);
            }
        }
        ResourceKind::PodNetworkAttachment => {
            let namespace = (!args.all_namespaces).then(|| context.namespace());
            let list = ResourceList::new(
                list_resources::<PodNetworkAttachment>(&client, namespace, &list_params).await?,
            );

            if !list.print_serialized(format)? {
                print_views(list.items.iter().map(PodNetworkAttachmentView::from), format);
            }
        }
    }

    Ok(())
}

fn print_views<T: TableOutputRow>(views: impl IntoIterator<Item = T>, format: OutputFormat) {
    match format {
        OutputFormat::Names => views.print_names(),
        OutputFormat::Table => views.print_table(),
        _ => views.print_table_with_headers(),
    }
}

#[derive(TableOutputRow)]
struct ClusterCIDRView<'a> {
    #[name_column]
    name: TableCellOption<&'a str>,
    per_node_host_bits: i32,
    ipv4: TableCellOption<&'a str>,
    ipv6: TableCellOption<&'a str>,
}

impl<'a> From<&'a ClusterCIDR> for ClusterCIDRView<'a> {
    fn from(resource: &'a ClusterCIDR) -> Self {
        Self {
            name: resource.metadata.name.as_deref().into(),
            per_node_host_bits: resource.spec.per_node_host_bits,
            ipv4: resource.spec_ipv4().into(),
            ipv6: resource.spec_ipv6().into(),
        }
    }
}

#[derive(TableOutputRow)]
struct IPAddressView<'a> {
    #[name_column]
    name: TableCellOption<&'a str>,
    parent_ref: TableCellOption<&'a ParentReference>,
}

impl<'a> From<&'a IPAddress> for IPAddressView<'a> {
    fn from(resource: &'a IPAddress) -> Self {
        Self {
            name: resource.metadata.name.as_deref().into(),
            parent_ref: resource.spec.parent_ref.as_ref().into(),
        }
    }
}

#[derive(TableOutputRow)]
struct PodNetworkView<'a> {
    #[name_column]
    name: TableCellOption<&'a str>,
    provider: TableCellOption<&'a str>,
    ipam4: TableCellOption<IpamType>,
    ipam6: TableCellOption<IpamType>,
    ready: &'a str,
}

impl<'a> From<&'a PodNetwork> for PodNetworkView<'a> {
    fn from(resource: &'a PodNetwork) -> Self {
        Self {
            name: resource.metadata.name.as_deref().into(),
            provider: resource.spec.provider.as_deref().into(),
            ipam4: resource.spec.ipam4.into(),
            ipam6: resource.spec.ipam6.into(),
            ready: resource.readiness(),
        }
    }
}

#[derive(TableOutputRow)]
struct PodNetworkAttachmentView<'a> {
    namespace: TableCellOption<&'a str>,
    #[name_column]
    name: TableCellOption<&'a str>,
    pod_network: &'a str,
    ready: &'a str,
}

impl<'a> From<&'a PodNetworkAttachment> for PodNetworkAttachmentView<'a> {
    fn from(resource: &'a PodNetworkAttachment) -> Self {
        Self {
            namespace: resource.metadata.namespace.as_deref().into(),
            name: resource.metadata.name.as_deref().into(),
            pod_network: &resource.spec.pod_network_name,
            ready: resource.readiness(),
        }
    }
}

#[cfg(test)]
mod tests {
    use podnet_core::resources::crd::v1alpha1::{
        cluster_cidr::{ClusterCIDR, ClusterCIDRSpec},
        pod_network::{IpamType, PodNetwork, PodNetworkSpec},
    };

    use super::{ClusterCIDRView, PodNetworkView};
    use crate::output::TableOutputRow;

    #[test]
    fn unset_families_show_as_dashes() {
        let cidr = ClusterCIDR::new(
            "default-cidr",
            ClusterCIDRSpec {
                per_node_host_bits: 8,
                ipv4: "10.0.0.0/8".to_owned(),
                ..Default::default()
            },
        );

        assert_eq!(
            ClusterCIDRView::from(&cidr).get_row(),
            vec!["default-cidr", "8", "10.0.0.0/8", "-"]
        );
    }

    #[test]
    fn networks_without_status_have_unknown_readiness() {
        let network = PodNetwork::new(
            "macvlan",
            PodNetworkSpec {
                ipam4: Some(IpamType::Kubernetes),
                ..Default::default()
            },
        );

        assert_eq!(
            PodNetworkView::get_column_names(),
            vec!["NAME", "PROVIDER", "IPAM4", "IPAM6", "READY"]
        );
        assert_eq!(
            PodNetworkView::from(&network).get_row(),
            vec!["macvlan", "-", "kubernetes", "-", "Unknown"]
        );
    }
}
