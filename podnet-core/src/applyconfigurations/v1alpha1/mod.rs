pub mod cluster_cidr;
pub mod ip_address;
pub mod pod_network;
pub mod pod_network_attachment;
pub mod references;

pub use self::{
    cluster_cidr::{ClusterCIDRApplyConfiguration, ClusterCIDRSpecApplyConfiguration},
    ip_address::{IPAddressApplyConfiguration, IPAddressSpecApplyConfiguration},
    pod_network::{
        PodNetworkApplyConfiguration, PodNetworkSpecApplyConfiguration,
        PodNetworkStatusApplyConfiguration,
    },
    pod_network_attachment::{
        PodNetworkAttachmentApplyConfiguration, PodNetworkAttachmentSpecApplyConfiguration,
        PodNetworkAttachmentStatusApplyConfiguration,
    },
    references::{ParametersRefApplyConfiguration, ParentReferenceApplyConfiguration},
};
