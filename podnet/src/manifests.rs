use std::{
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context};
use log::{debug, error, info};
use podnet_core::manifest::{parse_manifests, NetworkingResource};

const STDIN_PATH: &str = "-";

/// Reads and parses every file in order, namespaced objects without a
/// namespace land in `namespace`.
pub fn load_resources(
    paths: &[PathBuf],
    namespace: &str,
) -> anyhow::Result<Vec<NetworkingResource>> {
    let mut resources = Vec::new();

    for path in paths {
        let input = read_input(path)?;
        let mut parsed = parse_manifests(&input)
            .with_context(|| format!("Couldn't parse manifests from {}!", path.display()))?;

        debug!("Loaded {} resource(s) from {}", parsed.len(), path.display());

        for resource in &mut parsed {
            resource.default_namespace(namespace);
        }

        resources.append(&mut parsed);
    }

    Ok(resources)
}

/// Validates every resource, logging each failure.
pub fn validate_resources(resources: &[NetworkingResource]) -> anyhow::Result<()> {
    let invalid = resources
        .iter()
        .filter(|resource| match resource.validate() {
            Ok(()) => {
                info!("{resource} is valid");
                false
            }
            Err(e) => {
                error!("{resource} is invalid: {e}");
                true
            }
        })
        .count();

    if invalid > 0 {
        return Err(anyhow!(
            "{invalid} of {} resource(s) failed validation!",
            resources.len()
        ));
    }

    Ok(())
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    if path == Path::new(STDIN_PATH) {
        let mut input = String::new();
        io::stdin()
            .read_to_string(&mut input)
            .context("Couldn't read manifests from stdin!")?;

        return Ok(input);
    }

    fs::read_to_string(path).with_context(|| format!("Couldn't read {}!", path.display()))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::{load_resources, validate_resources};

    const NETWORK: &str = "apiVersion: networking.k8s.io/v1alpha1
kind: PodNetwork
metadata:
  name: macvlan
spec:
  provider: example.com/macvlan
";

    const ATTACHMENT: &str = "apiVersion: networking.k8s.io/v1alpha1
kind: PodNetworkAttachment
metadata:
  name: macvlan-eth1
spec:
  podNetworkName: macvlan
";

    #[test]
    fn loads_files_in_order_and_defaults_the_namespace() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("network.yaml");
        let second = dir.path().join("attachment.yaml");
        fs::write(&first, NETWORK).unwrap();
        fs::write(&second, ATTACHMENT).unwrap();

        let resources = load_resources(&[first, second], "team-a").unwrap();

        assert_eq!(resources.len(), 2);
        assert_eq!(resources[0].kind(), "PodNetwork");
        assert_eq!(resources[1].namespace(), Some("team-a"));
        assert!(validate_resources(&resources).is_ok());
    }

    #[test]
    fn invalid_resources_fail_validation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cidr.yaml");
        fs::write(
            &path,
            "apiVersion: networking.k8s.io/v1alpha1
kind: ClusterCIDR
metadata:
  name: too-small
spec:
  perNodeHostBits: 2
  ipv4: 10.0.0.0/8
",
        )
        .unwrap();

        let resources = load_resources(&[path], "default").unwrap();
        let error = validate_resources(&resources).unwrap_err();

        assert_eq!(error.to_string(), "1 of 1 resource(s) failed validation!");
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();

        assert!(load_resources(&[dir.path().join("missing.yaml")], "default").is_err());
    }
}
