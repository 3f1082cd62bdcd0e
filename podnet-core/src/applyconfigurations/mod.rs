//! Apply configurations: partial, declarative objects for server-side apply.
//!
//! Every field is optional and only the fields that were set are sent to the
//! API server, so a field manager owns exactly what it declared.

use kube::Resource;
use serde::Serialize;

use self::meta::ObjectMetaApplyConfiguration;

pub mod meta;
pub mod v1alpha1;

/// Top-level apply configuration of a `Resource`, carrying the object metadata.
pub trait ObjectApplyConfiguration: Serialize + Sized {
    type Resource: Resource<DynamicType = ()>;

    fn metadata(&self) -> Option<&ObjectMetaApplyConfiguration>;

    fn metadata_slot(&mut self) -> &mut Option<ObjectMetaApplyConfiguration>;

    fn map_metadata<F>(mut self, op: F) -> Self
    where
        F: FnOnce(ObjectMetaApplyConfiguration) -> ObjectMetaApplyConfiguration,
    {
        let slot = self.metadata_slot();
        *slot = Some(op(slot.take().unwrap_or_default()));

        self
    }

    fn name(&self) -> Option<&str> {
        self.metadata()?.name.as_deref()
    }

    fn namespace(&self) -> Option<&str> {
        self.metadata()?.namespace.as_deref()
    }

    fn with_name(self, name: impl Into<String>) -> Self {
        self.map_metadata(|m| m.with_name(name))
    }

    fn with_generate_name(self, generate_name: impl Into<String>) -> Self {
        self.map_metadata(|m| m.with_generate_name(generate_name))
    }

    fn with_namespace(self, namespace: impl Into<String>) -> Self {
        self.map_metadata(|m| m.with_namespace(namespace))
    }

    fn with_uid(self, uid: impl Into<String>) -> Self {
        self.map_metadata(|m| m.with_uid(uid))
    }

    fn with_resource_version(self, resource_version: impl Into<String>) -> Self {
        self.map_metadata(|m| m.with_resource_version(resource_version))
    }

    fn with_generation(self, generation: i64) -> Self {
        self.map_metadata(|m| m.with_generation(generation))
    }

    fn with_labels<I, K, V>(self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.map_metadata(|m| m.with_labels(entries))
    }

    fn with_annotations<I, K, V>(self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.map_metadata(|m| m.with_annotations(entries))
    }

    fn with_finalizers<I, V>(self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.map_metadata(|m| m.with_finalizers(values))
    }
}

/// Implements `ObjectApplyConfiguration` for a struct with a
/// `metadata: Option<ObjectMetaApplyConfiguration>` field.
macro_rules! object_apply_configuration {
    ($configuration:ty, $resource:ty) => {
        impl $crate::applyconfigurations::ObjectApplyConfiguration for $configuration {
            type Resource = $resource;

            fn metadata(
                &self,
            ) -> Option<&$crate::applyconfigurations::meta::ObjectMetaApplyConfiguration> {
                self.metadata.as_ref()
            }

            fn metadata_slot(
                &mut self,
            ) -> &mut Option<$crate::applyconfigurations::meta::ObjectMetaApplyConfiguration> {
                &mut self.metadata
            }
        }
    };
}

pub(crate) use object_apply_configuration;

/// `apiVersion`/`kind`/`metadata.name` preset for a new top-level configuration.
pub(crate) fn type_meta<K: Resource<DynamicType = ()>>(
    name: &str,
) -> (Option<String>, Option<String>, Option<ObjectMetaApplyConfiguration>) {
    (
        Some(K::api_version(&()).into_owned()),
        Some(K::kind(&()).into_owned()),
        Some(ObjectMetaApplyConfiguration::default().with_name(name)),
    )
}
