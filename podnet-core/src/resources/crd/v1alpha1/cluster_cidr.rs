use ipnet::{Ipv4Net, Ipv6Net};
use k8s_openapi::api::core::v1::NodeSelector;
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::{
    ip::{
        cidr::{node_prefix_len, parse_ipv4_cidr, parse_ipv6_cidr},
        IpError, IpFamily,
    },
    resources::{
        list::ResourceList,
        validation::{validate_node_selector, validate_object_name},
        Validate, ValidationError,
    },
};

pub const MIN_PER_NODE_HOST_BITS: i32 = 4;

/// Configuration for per-node pod CIDR allocation. Any ClusterCIDR whose node
/// selector matches a node and that still has free blocks may be used for
/// that node.
#[skip_serializing_none]
#[derive(CustomResource, Deserialize, Serialize, Clone, Default, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[kube(
    group = "networking.k8s.io",
    version = "v1alpha1",
    kind = "ClusterCIDR",
    plural = "clustercidrs",
    singular = "clustercidr",
    derive = "Default",
    derive = "PartialEq",
    printcolumn = r#"{"name":"PerNodeHostBits", "type":"integer", "jsonPath":".spec.perNodeHostBits"}"#,
    printcolumn = r#"{"name":"IPv4", "type":"string", "jsonPath":".spec.ipv4"}"#,
    printcolumn = r#"{"name":"IPv6", "type":"string", "jsonPath":".spec.ipv6"}"#
)]
pub struct ClusterCIDRSpec {
    /// nodes this config applies to, an empty or absent selector selects all nodes
    /// (immutable)
    pub node_selector: Option<NodeSelector>,
    /// number of host bits per node, 8 gives a /24 for IPv4 and a /120 for IPv6,
    /// minimum 4 (16 IPs) (immutable)
    #[serde(default)]
    pub per_node_host_bits: i32,
    /// IPv4 block in CIDR notation, e.g. "10.0.0.0/8", empty when unset
    /// (immutable)
    #[serde(default)]
    pub ipv4: String,
    /// IPv6 block in CIDR notation, e.g. "2001:db8::/64", empty when unset
    /// (immutable)
    #[serde(default)]
    pub ipv6: String,
}

pub type ClusterCIDRList = ResourceList<ClusterCIDR>;

impl ClusterCIDRSpec {
    pub fn ipv4_net(&self) -> Result<Option<Ipv4Net>, IpError> {
        match self.ipv4.as_str() {
            "" => Ok(None),
            value => parse_ipv4_cidr(value).map(Some),
        }
    }

    pub fn ipv6_net(&self) -> Result<Option<Ipv6Net>, IpError> {
        match self.ipv6.as_str() {
            "" => Ok(None),
            value => parse_ipv6_cidr(value).map(Some),
        }
    }

    pub fn is_dual_stack(&self) -> bool {
        !self.ipv4.is_empty() && !self.ipv6.is_empty()
    }

    /// Prefix length of the block handed out to a single node.
    pub fn node_prefix_len(&self, family: IpFamily) -> Option<u8> {
        node_prefix_len(family, self.per_node_host_bits)
    }

    fn validate_cidr(
        &self,
        field: &'static str,
        family: IpFamily,
        prefix_len: u8,
    ) -> Result<(), ValidationError> {
        let max_prefix_len = self.node_prefix_len(family).ok_or_else(|| {
            ValidationError::invalid(
                "spec.perNodeHostBits",
                format!(
                    "must be less than or equal to {} for {family:?}",
                    family.address_bits()
                ),
            )
        })?;

        if prefix_len > max_prefix_len {
            return Err(ValidationError::invalid(
                field,
                format!("must have a mask less than or equal to {max_prefix_len}"),
            ));
        }

        Ok(())
    }
}

impl ClusterCIDR {
    pub fn spec_ipv4(&self) -> Option<&str> {
        Some(self.spec.ipv4.as_str()).filter(|v| !v.is_empty())
    }

    pub fn spec_ipv6(&self) -> Option<&str> {
        Some(self.spec.ipv6.as_str()).filter(|v| !v.is_empty())
    }
}

impl Validate for ClusterCIDR {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_object_name(&self.metadata)?;

        let spec = &self.spec;

        if spec.ipv4.is_empty() && spec.ipv6.is_empty() {
            return Err(ValidationError::invalid(
                "spec",
                "at least one of ipv4 and ipv6 must be specified",
            ));
        }

        if spec.per_node_host_bits < MIN_PER_NODE_HOST_BITS {
            return Err(ValidationError::invalid(
                "spec.perNodeHostBits",
                format!("must be greater than or equal to {MIN_PER_NODE_HOST_BITS}"),
            ));
        }

        if let Some(net) = spec
            .ipv4_net()
            .map_err(|e| ValidationError::invalid("spec.ipv4", e.to_string()))?
        {
            spec.validate_cidr("spec.ipv4", IpFamily::Ipv4, net.prefix_len())?;
        }

        if let Some(net) = spec
            .ipv6_net()
            .map_err(|e| ValidationError::invalid("spec.ipv6", e.to_string()))?
        {
            spec.validate_cidr("spec.ipv6", IpFamily::Ipv6, net.prefix_len())?;
        }

        if let Some(selector) = &spec.node_selector {
            validate_node_selector("spec.nodeSelector", selector)?;
        }

        Ok(())
    }

    fn validate_update(&self, old: &Self) -> Result<(), ValidationError> {
        self.validate()?;

        let (new, old) = (&self.spec, &old.spec);

        if new.node_selector != old.node_selector {
            return Err(ValidationError::Immutable("spec.nodeSelector".into()));
        }

        if new.per_node_host_bits != old.per_node_host_bits {
            return Err(ValidationError::Immutable("spec.perNodeHostBits".into()));
        }

        if new.ipv4 != old.ipv4 {
            return Err(ValidationError::Immutable("spec.ipv4".into()));
        }

        if new.ipv6 != old.ipv6 {
            return Err(ValidationError::Immutable("spec.ipv6".into()));
        }

        Ok(())
    }
}
