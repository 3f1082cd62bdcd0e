use k8s_openapi::apimachinery::pkg::apis::meta::v1::ListMeta;
use kube::Resource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// `<Kind>List` wrapper: collection metadata plus the items in server order.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResourceList<K> {
    #[serde(default)]
    pub api_version: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub metadata: ListMeta,
    #[serde(default)]
    pub items: Vec<K>,
}

impl<K: Resource<DynamicType = ()>> ResourceList<K> {
    pub fn new(items: Vec<K>) -> Self {
        Self {
            api_version: K::api_version(&()).into_owned(),
            kind: Self::list_kind(),
            metadata: ListMeta::default(),
            items,
        }
    }

    pub fn list_kind() -> String {
        format!("{}List", K::kind(&()))
    }

    /// Token to pass back to the API server to fetch the next page, if any.
    pub fn continue_token(&self) -> Option<&str> {
        self.metadata
            .continue_
            .as_deref()
            .filter(|token| !token.is_empty())
    }
}

impl<K> IntoIterator for ResourceList<K> {
    type Item = K;
    type IntoIter = std::vec::IntoIter<K>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<K: Resource<DynamicType = ()>> FromIterator<K> for ResourceList<K> {
    fn from_iter<T: IntoIterator<Item = K>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
