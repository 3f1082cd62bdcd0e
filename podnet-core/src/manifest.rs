use std::fmt::Display;

use kube::Resource;
use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use thiserror::Error;

use crate::{
    resources::{
        crd::v1alpha1::{
            cluster_cidr::ClusterCIDR, ip_address::IPAddress, pod_network::PodNetwork,
            pod_network_attachment::PodNetworkAttachment,
        },
        Validate, ValidationError,
    },
    GROUP_VERSION,
};

/// Generic `v1 List` as written by `kubectl get -o yaml`.
const GENERIC_LIST_KIND: &str = "List";

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Couldn't parse manifest document #{index}!")]
    Yaml {
        index: usize,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("Manifest document #{index} is missing '{field}'!")]
    MissingTypeMeta { index: usize, field: &'static str },
    #[error("Manifest document #{index} has an unsupported API version '{api_version}'!")]
    UnsupportedApiVersion { index: usize, api_version: String },
    #[error("Manifest document #{index} has an unsupported kind '{kind}'!")]
    UnsupportedKind { index: usize, kind: String },
}

/// Any object of the networking.k8s.io/v1alpha1 API.
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkingResource {
    ClusterCIDR(ClusterCIDR),
    IPAddress(IPAddress),
    PodNetwork(PodNetwork),
    PodNetworkAttachment(PodNetworkAttachment),
}

impl NetworkingResource {
    pub fn kind(&self) -> &'static str {
        match self {
            NetworkingResource::ClusterCIDR(_) => "ClusterCIDR",
            NetworkingResource::IPAddress(_) => "IPAddress",
            NetworkingResource::PodNetwork(_) => "PodNetwork",
            NetworkingResource::PodNetworkAttachment(_) => "PodNetworkAttachment",
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            NetworkingResource::ClusterCIDR(r) => r.meta().name.as_deref(),
            NetworkingResource::IPAddress(r) => r.meta().name.as_deref(),
            NetworkingResource::PodNetwork(r) => r.meta().name.as_deref(),
            NetworkingResource::PodNetworkAttachment(r) => r.meta().name.as_deref(),
        }
    }

    pub fn namespace(&self) -> Option<&str> {
        match self {
            NetworkingResource::PodNetworkAttachment(r) => r.meta().namespace.as_deref(),
            _ => None,
        }
    }

    pub fn is_namespaced(&self) -> bool {
        matches!(self, NetworkingResource::PodNetworkAttachment(_))
    }

    /// Fills in the namespace of namespaced objects that don't carry one.
    pub fn default_namespace(&mut self, namespace: &str) {
        if let NetworkingResource::PodNetworkAttachment(r) = self {
            r.meta_mut()
                .namespace
                .get_or_insert_with(|| namespace.to_owned());
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            NetworkingResource::ClusterCIDR(r) => r.validate(),
            NetworkingResource::IPAddress(r) => r.validate(),
            NetworkingResource::PodNetwork(r) => r.validate(),
            NetworkingResource::PodNetworkAttachment(r) => r.validate(),
        }
    }
}

impl Display for NetworkingResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.namespace(), self.name()) {
            (Some(namespace), Some(name)) => write!(f, "{}/{namespace}/{name}", self.kind()),
            (None, Some(name)) => write!(f, "{}/{name}", self.kind()),
            (_, None) => write!(f, "{}/<unnamed>", self.kind()),
        }
    }
}

/// Parses a multi-document YAML stream. Documents are returned in order,
/// `*List` documents are expanded into their items and empty documents are skipped.
pub fn parse_manifests(input: &str) -> Result<Vec<NetworkingResource>, ManifestError> {
    let mut resources = Vec::new();

    for (index, document) in serde_yaml::Deserializer::from_str(input).enumerate() {
        let value =
            Value::deserialize(document).map_err(|source| ManifestError::Yaml { index, source })?;

        if value.is_null() {
            continue;
        }

        parse_value(index, value, &mut resources)?;
    }

    Ok(resources)
}

fn parse_value(
    index: usize,
    mut value: Value,
    resources: &mut Vec<NetworkingResource>,
) -> Result<(), ManifestError> {
    let api_version = get_string(index, &value, "apiVersion")?;
    let kind = get_string(index, &value, "kind")?;

    if kind == GENERIC_LIST_KIND {
        for item in take_items(value) {
            parse_value(index, item, resources)?;
        }

        return Ok(());
    }

    if api_version != GROUP_VERSION {
        return Err(ManifestError::UnsupportedApiVersion { index, api_version });
    }

    if let Some(item_kind) = kind.strip_suffix("List") {
        for mut item in take_items(value) {
            if let Value::Mapping(mapping) = &mut item {
                set_default(mapping, "apiVersion", api_version.as_str());
                set_default(mapping, "kind", item_kind);
            }

            parse_value(index, item, resources)?;
        }

        return Ok(());
    }

    if let Value::Mapping(mapping) = &mut value {
        set_default(mapping, "spec", Mapping::new());
    }

    let yaml_error = |source| ManifestError::Yaml { index, source };
    let resource = match kind.as_str() {
        "ClusterCIDR" => NetworkingResource::ClusterCIDR(
            serde_yaml::from_value(value).map_err(yaml_error)?,
        ),
        "IPAddress" => {
            NetworkingResource::IPAddress(serde_yaml::from_value(value).map_err(yaml_error)?)
        }
        "PodNetwork" => {
            NetworkingResource::PodNetwork(serde_yaml::from_value(value).map_err(yaml_error)?)
        }
        "PodNetworkAttachment" => NetworkingResource::PodNetworkAttachment(
            serde_yaml::from_value(value).map_err(yaml_error)?,
        ),
        _ => return Err(ManifestError::UnsupportedKind { index, kind }),
    };

    resources.push(resource);

    Ok(())
}

fn get_string(index: usize, value: &Value, field: &'static str) -> Result<String, ManifestError> {
    value
        .get(field)
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or(ManifestError::MissingTypeMeta { index, field })
}

fn take_items(value: Value) -> Vec<Value> {
    match value {
        Value::Mapping(mut mapping) => match mapping.remove("items") {
            Some(Value::Sequence(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

fn set_default(mapping: &mut Mapping, key: &str, value: impl Into<Value>) {
    if !mapping.contains_key(key) {
        mapping.insert(key.into(), value.into());
    }
}
