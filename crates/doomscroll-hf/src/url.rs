//! URL construction helpers for the Hub API and datasets-server.
//!
//! Pure functions so every call site builds URLs the same way.

use crate::models::{DatasetRef, HfConfig};
use url::Url;

/// Maximum page size accepted by datasets-server `/rows`.
pub const MAX_ROWS_PAGE: u32 = 100;

/// `{hub}/api/datasets/{owner}/{name}`
pub fn build_dataset_info_url(config: &HfConfig, repo: &DatasetRef) -> Url {
    let mut url = config.hub_url.clone();
    let base_path = url.path().trim_end_matches('/').to_string();
    url.set_path(&format!(
        "{base_path}/api/datasets/{}/{}",
        repo.owner, repo.name
    ));
    url
}

/// `{datasets-server}/splits?dataset={id}`
pub fn build_splits_url(config: &HfConfig, repo: &DatasetRef) -> Url {
    let mut url = datasets_server_endpoint(config, "splits");
    url.query_pairs_mut().append_pair("dataset", &repo.id());
    url
}

/// `{datasets-server}/rows?dataset=..&config=..&split=..&offset=..&length=..`
///
/// `length` is clamped to `1..=100`.
pub fn build_rows_url(
    config: &HfConfig,
    repo: &DatasetRef,
    dataset_config: &str,
    split: &str,
    offset: u64,
    length: u32,
) -> Url {
    let mut url = datasets_server_endpoint(config, "rows");
    url.query_pairs_mut()
        .append_pair("dataset", &repo.id())
        .append_pair("config", dataset_config)
        .append_pair("split", split)
        .append_pair("offset", &offset.to_string())
        .append_pair("length", &length.clamp(1, MAX_ROWS_PAGE).to_string());
    url
}

fn datasets_server_endpoint(config: &HfConfig, endpoint: &str) -> Url {
    let mut url = config.datasets_server_url.clone();
    let base_path = url.path().trim_end_matches('/').to_string();
    url.set_path(&format!("{base_path}/{endpoint}"));
    url.set_query(None);
    url
}

/// Recover the dataset id from a Hub or datasets-server URL.
pub fn dataset_id_from_url(url: &Url) -> Option<String> {
    if let Some((_, id)) = url.query_pairs().find(|(key, _)| key == "dataset") {
        return Some(id.into_owned());
    }

    let path = url.path().trim_start_matches('/');
    let rest = path.strip_prefix("api/datasets/")?;
    let mut parts = rest.splitn(3, '/');
    match (parts.next(), parts.next()) {
        (Some(owner), Some(name)) if !owner.is_empty() && !name.is_empty() => {
            Some(format!("{owner}/{name}"))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo() -> DatasetRef {
        DatasetRef::parse("multimodalart/panda-70m").unwrap()
    }

    #[test]
    fn test_build_dataset_info_url() {
        let url = build_dataset_info_url(&HfConfig::default(), &repo());
        assert_eq!(
            url.as_str(),
            "https://huggingface.co/api/datasets/multimodalart/panda-70m"
        );
    }

    #[test]
    fn test_build_splits_url_encodes_dataset() {
        let url = build_splits_url(&HfConfig::default(), &repo());
        assert_eq!(
            url.as_str(),
            "https://datasets-server.huggingface.co/splits?dataset=multimodalart%2Fpanda-70m"
        );
    }

    #[test]
    fn test_build_rows_url_clamps_length() {
        let config = HfConfig::default();
        let url = build_rows_url(&config, &repo(), "default", "train_2m", 300, 500);
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(url.as_str().starts_with("https://datasets-server.huggingface.co/rows?"));
        assert!(pairs.contains(&("split".into(), "train_2m".into())));
        assert!(pairs.contains(&("offset".into(), "300".into())));
        assert!(pairs.contains(&("length".into(), "100".into())));

        let url = build_rows_url(&config, &repo(), "default", "train", 0, 0);
        assert!(url.as_str().ends_with("length=1"));
    }

    #[test]
    fn test_custom_base_with_path_prefix() {
        let config = HfConfig {
            datasets_server_url: Url::parse("http://localhost:8080/proxy/").unwrap(),
            ..HfConfig::default()
        };
        let url = build_splits_url(&config, &repo());
        assert!(url.as_str().starts_with("http://localhost:8080/proxy/splits?"));
    }

    #[test]
    fn test_dataset_id_from_url() {
        let config = HfConfig::default();
        assert_eq!(
            dataset_id_from_url(&build_splits_url(&config, &repo())),
            Some("multimodalart/panda-70m".to_string())
        );
        assert_eq!(
            dataset_id_from_url(&build_dataset_info_url(&config, &repo())),
            Some("multimodalart/panda-70m".to_string())
        );
        let other = Url::parse("https://huggingface.co/other/path").unwrap();
        assert_eq!(dataset_id_from_url(&other), None);
    }
}
