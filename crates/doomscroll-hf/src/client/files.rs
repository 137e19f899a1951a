//! Repository file listing and downloads.

use std::path::PathBuf;

use crate::error::HfResult;
use crate::http::HttpBackend;
use crate::models::{DatasetInfoResponse, DatasetRef};
use crate::parsing::parse_repo_files;
use crate::url::build_dataset_info_url;

use super::HfClient;

impl<B: HttpBackend> HfClient<B> {
    /// List every file in a dataset repository.
    pub(crate) async fn list_dataset_files(&self, repo: &DatasetRef) -> HfResult<Vec<String>> {
        let url = build_dataset_info_url(&self.config, repo);
        let info: DatasetInfoResponse = self.backend.get_json(&url).await?;
        let files = parse_repo_files(info);
        tracing::debug!(dataset = %repo.id(), count = files.len(), "Listed dataset files");
        Ok(files)
    }

    /// Download one file into the Hub cache.
    pub(crate) async fn download_dataset_file(
        &self,
        repo: &DatasetRef,
        filename: &str,
    ) -> HfResult<PathBuf> {
        self.hub.download(repo, filename).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests::test_config;
    use crate::error::HfError;
    use crate::http::testing::FakeBackend;
    use serde_json::json;

    #[tokio::test]
    async fn test_list_dataset_files() {
        let backend = FakeBackend::new().with_json(
            "api/datasets/friedrichor/DiDeMo",
            json!({
                "id": "friedrichor/DiDeMo",
                "sha": "abc123",
                "siblings": [
                    {"rfilename": ".gitattributes"},
                    {"rfilename": "videos/test.tar"},
                    {"rfilename": "videos/train.tar.part-aa"}
                ]
            }),
        );
        let client = HfClient::with_backend(test_config(), backend);
        let repo = DatasetRef::parse("friedrichor/DiDeMo").unwrap();

        let files = tokio_test::assert_ok!(client.list_dataset_files(&repo).await);
        assert_eq!(files.len(), 3);
        assert_eq!(files[1], "videos/test.tar");
    }

    #[tokio::test]
    async fn test_list_dataset_files_not_found() {
        let client = HfClient::with_backend(test_config(), FakeBackend::new());
        let repo = DatasetRef::parse("nobody/nothing").unwrap();

        let result = client.list_dataset_files(&repo).await;
        assert!(matches!(
            result,
            Err(HfError::DatasetNotFound { dataset_id }) if dataset_id == "nobody/nothing"
        ));
    }
}
