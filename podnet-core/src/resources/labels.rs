use std::collections::BTreeMap;

use kube::api::ListParams;

pub fn get_crd_labels() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("app.kubernetes.io/name".to_owned(), "podnet".to_owned()),
        ("app.kubernetes.io/component".to_owned(), "crd".to_owned()),
        ("app.kubernetes.io/managed-by".to_owned(), "podnet-cli".to_owned()),
    ])
}

pub fn get_joined_crd_labels() -> String {
    get_crd_labels()
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join(",")
}

pub fn get_crd_listparams() -> ListParams {
    ListParams::default().labels(&get_joined_crd_labels())
}

#[cfg(test)]
mod tests {
    use super::get_joined_crd_labels;

    #[test]
    fn joined_labels_form_a_selector() {
        assert_eq!(
            get_joined_crd_labels(),
            "app.kubernetes.io/component=crd,\
            app.kubernetes.io/managed-by=podnet-cli,\
            app.kubernetes.io/name=podnet"
        );
    }
}
