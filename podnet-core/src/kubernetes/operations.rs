use std::{fmt::Debug, path::Path};

use anyhow::{anyhow, Context};
use derive_builder::Builder;
use k8s_openapi::{
    apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition,
    serde::{de::DeserializeOwned, Serialize},
    ClusterResourceScope, NamespaceResourceScope,
};
use kube::{
    api::{DeleteParams, ListParams, Patch, PatchParams},
    config::{KubeConfigOptions, Kubeconfig},
    Api, Client, Config, Resource,
};
use log::{debug, info, warn};

use crate::{
    applyconfigurations::ObjectApplyConfiguration,
    helpers::{pretty_type_name, AndIf, RequireMetadata},
    FIELD_MANAGER,
};

/// Server-side apply settings shared by every apply call of a command.
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
#[builder(default)]
pub struct ApplyOptions {
    #[builder(setter(into))]
    pub field_manager: String,
    pub dry_run: bool,
    pub force: bool,
}

impl Default for ApplyOptions {
    fn default() -> Self {
        Self {
            field_manager: FIELD_MANAGER.to_owned(),
            dry_run: false,
            force: false,
        }
    }
}

impl From<&ApplyOptions> for PatchParams {
    fn from(value: &ApplyOptions) -> Self {
        PatchParams::apply(&value.field_manager)
            .and_if(value.force, |p| p.force())
            .and_if(value.dry_run, |p| p.dry_run())
    }
}

/// Builds a client from the kubeconfig at `config_path`, or the default
/// kubeconfig lookup when it's `None`.
pub async fn create_local_client(
    config_path: Option<&Path>,
    context_name: Option<&str>,
) -> anyhow::Result<Client> {
    let config_options = KubeConfigOptions {
        context: context_name.map(str::to_owned),
        ..Default::default()
    };

    let config = match config_path {
        Some(path) => {
            let kubeconfig = Kubeconfig::read_from(path).context(format!(
                "Couldn't read kubeconfig from '{}'!",
                path.display()
            ))?;
            Config::from_custom_kubeconfig(kubeconfig, &config_options).await?
        }
        None => Config::from_kubeconfig(&config_options).await?,
    };

    let client = Client::try_from(config)?;

    Ok(client)
}

pub async fn apply_cluster_resource<T>(
    client: &Client,
    resource: &T,
    patch_params: &PatchParams,
) -> anyhow::Result<T>
where
    T: Resource<Scope = ClusterResourceScope, DynamicType = ()>
        + Serialize
        + Clone
        + DeserializeOwned
        + Debug,
{
    let resource_name = resource.require_name_or(anyhow!(
        "Tried to apply a nameless {} resource!",
        pretty_type_name::<T>()
    ))?;

    info!(
        "Applying '{resource_name}' {} resource on the cluster...",
        pretty_type_name::<T>()
    );

    let resource_api: Api<T> = Api::all(client.clone());
    let applied = resource_api
        .patch(resource_name, patch_params, &Patch::Apply(resource))
        .await
        .context(format!(
            "Unable to apply '{resource_name}' {} resource!",
            pretty_type_name::<T>()
        ))?;

    Ok(applied)
}

pub async fn apply_namespaced_resource<T>(
    client: &Client,
    resource: &T,
    patch_params: &PatchParams,
) -> anyhow::Result<T>
where
    T: Resource<Scope = NamespaceResourceScope, DynamicType = ()>
        + Serialize
        + Clone
        + DeserializeOwned
        + Debug,
{
    let resource_name = resource.require_name_or(anyhow!(
        "Tried to apply a nameless {} resource!",
        pretty_type_name::<T>()
    ))?;
    let namespace = resource.require_namespace_or(anyhow!(
        "'{resource_name}' {} resource is missing a namespace!",
        pretty_type_name::<T>()
    ))?;

    info!(
        "Applying '{namespace}/{resource_name}' {} resource on the cluster...",
        pretty_type_name::<T>()
    );

    let resource_api: Api<T> = Api::namespaced(client.clone(), namespace);
    let applied = resource_api
        .patch(resource_name, patch_params, &Patch::Apply(resource))
        .await
        .context(format!(
            "Unable to apply '{namespace}/{resource_name}' {} resource!",
            pretty_type_name::<T>()
        ))?;

    Ok(applied)
}

pub async fn apply_cluster_configuration<C>(
    client: &Client,
    configuration: &C,
    patch_params: &PatchParams,
) -> anyhow::Result<C::Resource>
where
    C: ObjectApplyConfiguration + Debug,
    C::Resource: Resource<Scope = ClusterResourceScope> + Clone + DeserializeOwned + Debug,
{
    let kind = pretty_type_name::<C::Resource>();
    let name = configuration
        .name()
        .ok_or_else(|| anyhow!("Tried to apply a nameless {kind} configuration!"))?;

    info!("Applying '{name}' {kind} configuration on the cluster...");
    debug!("{configuration:?}");

    let api: Api<C::Resource> = Api::all(client.clone());
    let applied = api
        .patch(name, patch_params, &Patch::Apply(configuration))
        .await
        .context(format!("Unable to apply '{name}' {kind} configuration!"))?;

    Ok(applied)
}

pub async fn apply_namespaced_configuration<C>(
    client: &Client,
    configuration: &C,
    patch_params: &PatchParams,
) -> anyhow::Result<C::Resource>
where
    C: ObjectApplyConfiguration + Debug,
    C::Resource: Resource<Scope = NamespaceResourceScope> + Clone + DeserializeOwned + Debug,
{
    let kind = pretty_type_name::<C::Resource>();
    let name = configuration
        .name()
        .ok_or_else(|| anyhow!("Tried to apply a nameless {kind} configuration!"))?;
    let namespace = configuration
        .namespace()
        .ok_or_else(|| anyhow!("'{name}' {kind} configuration is missing a namespace!"))?;

    info!("Applying '{namespace}/{name}' {kind} configuration on the cluster...");
    debug!("{configuration:?}");

    let api: Api<C::Resource> = Api::namespaced(client.clone(), namespace);
    let applied = api
        .patch(name, patch_params, &Patch::Apply(configuration))
        .await
        .context(format!(
            "Unable to apply '{namespace}/{name}' {kind} configuration!"
        ))?;

    Ok(applied)
}

/// Applies only the `status` part of `configuration` through the status subresource.
pub async fn apply_cluster_configuration_status<C>(
    client: &Client,
    configuration: &C,
    patch_params: &PatchParams,
) -> anyhow::Result<C::Resource>
where
    C: ObjectApplyConfiguration + Debug,
    C::Resource: Resource<Scope = ClusterResourceScope> + Clone + DeserializeOwned + Debug,
{
    let kind = pretty_type_name::<C::Resource>();
    let name = configuration
        .name()
        .ok_or_else(|| anyhow!("Tried to apply the status of a nameless {kind}!"))?;

    info!("Applying '{name}' {kind} status on the cluster...");
    debug!("{configuration:?}");

    let api: Api<C::Resource> = Api::all(client.clone());
    let applied = api
        .patch_status(name, patch_params, &Patch::Apply(configuration))
        .await
        .context(format!("Unable to apply '{name}' {kind} status!"))?;

    Ok(applied)
}

/// Applies only the `status` part of `configuration` through the status subresource.
pub async fn apply_namespaced_configuration_status<C>(
    client: &Client,
    configuration: &C,
    patch_params: &PatchParams,
) -> anyhow::Result<C::Resource>
where
    C: ObjectApplyConfiguration + Debug,
    C::Resource: Resource<Scope = NamespaceResourceScope> + Clone + DeserializeOwned + Debug,
{
    let kind = pretty_type_name::<C::Resource>();
    let name = configuration
        .name()
        .ok_or_else(|| anyhow!("Tried to apply the status of a nameless {kind}!"))?;
    let namespace = configuration
        .namespace()
        .ok_or_else(|| anyhow!("'{name}' {kind} configuration is missing a namespace!"))?;

    info!("Applying '{namespace}/{name}' {kind} status on the cluster...");
    debug!("{configuration:?}");

    let api: Api<C::Resource> = Api::namespaced(client.clone(), namespace);
    let applied = api
        .patch_status(name, patch_params, &Patch::Apply(configuration))
        .await
        .context(format!(
            "Unable to apply '{namespace}/{name}' {kind} status!"
        ))?;

    Ok(applied)
}

pub async fn list_cluster_resources<T>(
    client: &Client,
    list_params: &ListParams,
) -> anyhow::Result<Vec<T>>
where
    T: Resource<Scope = ClusterResourceScope, DynamicType = ()>
        + Clone
        + DeserializeOwned
        + Debug,
{
    let api: Api<T> = Api::all(client.clone());
    let resources = api.list(list_params).await.context(format!(
        "Couldn't retrieve {} resources from the cluster!",
        pretty_type_name::<T>()
    ))?;

    Ok(resources.items)
}

/// Lists namespaced resources, from every namespace when `namespace` is `None`.
pub async fn list_resources<T>(
    client: &Client,
    namespace: Option<&str>,
    list_params: &ListParams,
) -> anyhow::Result<Vec<T>>
where
    T: Resource<Scope = NamespaceResourceScope, DynamicType = ()>
        + Clone
        + DeserializeOwned
        + Debug,
{
    let api: Api<T> = match namespace {
        Some(namespace) => Api::namespaced(client.clone(), namespace),
        None => Api::all(client.clone()),
    };
    let resources = api.list(list_params).await.context(format!(
        "Couldn't retrieve {} resources from the cluster!",
        pretty_type_name::<T>()
    ))?;

    Ok(resources.items)
}

pub async fn apply_crd(
    client: &Client,
    crd: &CustomResourceDefinition,
    patch_params: &PatchParams,
) -> anyhow::Result<()> {
    let crd_name = crd
        .metadata
        .name
        .as_ref()
        .ok_or_else(|| anyhow!("CRD is missing a name!"))?;
    let crd_apiversions = crd
        .spec
        .versions
        .iter()
        .map(|version| version.name.as_str())
        .collect::<Vec<&str>>()
        .join(", ");

    info!("Applying {crd_name} ({crd_apiversions}) CRD...");

    let crd_api: Api<CustomResourceDefinition> = Api::all(client.clone());
    crd_api
        .patch(crd_name, patch_params, &Patch::Apply(crd))
        .await
        .context(format!(
            "Unable to apply {crd_name} ({crd_apiversions}) CRD!"
        ))?;

    Ok(())
}

/// Deletes a cluster scoped resource, a missing resource is not an error.
pub async fn try_remove_cluster_resource<T>(
    client: &Client,
    name: &str,
    delete_params: &DeleteParams,
) -> anyhow::Result<()>
where
    T: Resource<Scope = ClusterResourceScope, DynamicType = ()>
        + Clone
        + DeserializeOwned
        + Debug,
{
    let resource_name = pretty_type_name::<T>();
    let api: Api<T> = Api::all(client.clone());

    info!("Removing '{name}' {resource_name} from the cluster...");

    match api.delete(name, delete_params).await {
        Ok(_) => Ok(()),
        Err(kube::Error::Api(response)) if response.code == 404 => {
            warn!("'{name}' {resource_name} is not present on the cluster!");
            Ok(())
        }
        Err(error) => Err(error).context(format!(
            "Couldn't remove '{name}' {resource_name} from the cluster!"
        )),
    }
}

#[cfg(test)]
mod tests {
    use kube::api::PatchParams;

    use super::{ApplyOptions, ApplyOptionsBuilder};

    #[test]
    fn defaults_to_the_podnet_field_manager() {
        let params: PatchParams = (&ApplyOptions::default()).into();

        assert_eq!(params.field_manager.as_deref(), Some("podnet"));
        assert!(!params.dry_run);
        assert!(!params.force);
    }

    #[test]
    fn builder_overrides_the_defaults() {
        let options = ApplyOptionsBuilder::default()
            .field_manager("ci")
            .dry_run(true)
            .force(true)
            .build()
            .unwrap();
        let params: PatchParams = (&options).into();

        assert_eq!(params.field_manager.as_deref(), Some("ci"));
        assert!(params.dry_run);
        assert!(params.force);
    }
}
