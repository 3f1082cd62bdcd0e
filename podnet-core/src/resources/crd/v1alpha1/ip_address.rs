use std::net::IpAddr;

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::{
    ip::canonical::parse_canonical_ip,
    resources::{list::ResourceList, Validate, ValidationError},
};

use super::references::ParentReference;

/// A single IP of a single family, named after the address in canonical form:
/// dotted decimal without leading zeros for IPv4 and RFC 5952 for IPv6.
///
/// Valid names: `192.168.1.5`, `2001:db8::1`, `2001:db8:aaaa:bbbb:cccc:dddd:eeee:1`.
/// Invalid names: `10.01.2.3`, `2001:db8:0:0:0::1`.
#[skip_serializing_none]
#[derive(CustomResource, Deserialize, Serialize, Clone, Default, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[kube(
    group = "networking.k8s.io",
    version = "v1alpha1",
    kind = "IPAddress",
    plural = "ipaddresses",
    singular = "ipaddress",
    shortname = "ip",
    derive = "Default",
    derive = "PartialEq",
    printcolumn = r#"{"name":"ParentRef", "type":"string", "jsonPath":".spec.parentRef.name"}"#
)]
pub struct IPAddressSpec {
    /// the resource this address is attached to, required
    pub parent_ref: Option<ParentReference>,
}

pub type IPAddressList = ResourceList<IPAddress>;

impl IPAddress {
    /// Address this object represents, `None` when the name isn't a canonical IP.
    pub fn ip(&self) -> Option<IpAddr> {
        self.metadata
            .name
            .as_deref()
            .and_then(|name| parse_canonical_ip(name).ok())
    }

    pub fn for_parent(ip: IpAddr, parent_ref: ParentReference) -> Self {
        Self::new(
            &ip.to_string(),
            IPAddressSpec {
                parent_ref: Some(parent_ref),
            },
        )
    }
}

impl Validate for IPAddress {
    fn validate(&self) -> Result<(), ValidationError> {
        let name = self
            .metadata
            .name
            .as_deref()
            .ok_or(ValidationError::required("metadata.name"))?;

        parse_canonical_ip(name)
            .map_err(|e| ValidationError::invalid("metadata.name", e.to_string()))?;

        self.spec
            .parent_ref
            .as_ref()
            .ok_or(ValidationError::required("spec.parentRef"))?
            .validate_at("spec.parentRef")
    }

    fn validate_update(&self, old: &Self) -> Result<(), ValidationError> {
        self.validate()?;

        if self.spec.parent_ref != old.spec.parent_ref {
            return Err(ValidationError::Immutable("spec.parentRef".into()));
        }

        Ok(())
    }
}
