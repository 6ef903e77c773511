//! Box REST API adapter

use std::path::PathBuf;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::application::ports::{FileStore, FileStoreError};
use crate::domain::cards::CardDocument;
use crate::domain::token::SkillsToken;

/// Box API base URL
const API_BASE_URL: &str = "https://api.box.com/2.0";

/// User-agent hint Box uses to attribute Skills traffic
const BOX_UA: &str = "agent=box-video-skill";

/// One JSON Patch operation for the metadata update path
#[derive(Debug, Serialize)]
struct PatchOperation {
    op: &'static str,
    path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<Value>,
}

/// Box file store: content downloads and Skills cards metadata writes
pub struct BoxFileStore {
    base_url: String,
    client: reqwest::Client,
}

impl BoxFileStore {
    /// Create a store against the production Box API
    pub fn new() -> Self {
        Self::with_base_url(API_BASE_URL)
    }

    /// Create a store against a custom API base URL
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    fn content_url(&self, file_id: &str) -> String {
        format!("{}/files/{}/content", self.base_url, file_id)
    }

    fn cards_url(&self, file_id: &str) -> String {
        format!(
            "{}/files/{}/metadata/global/boxSkillsCards",
            self.base_url, file_id
        )
    }

    /// Build the JSON Patch operations that reshape `existing_count`
    /// cards into `new_cards`: replace overlapping positions, append the
    /// extras, then remove any leftovers.
    fn patch_operations(new_cards: &[Value], existing_count: usize) -> Vec<PatchOperation> {
        let mut operations = Vec::new();

        for (i, card) in new_cards.iter().enumerate() {
            if i < existing_count {
                operations.push(PatchOperation {
                    op: "replace",
                    path: format!("/cards/{}", i),
                    value: Some(card.clone()),
                });
            } else {
                operations.push(PatchOperation {
                    op: "add",
                    path: "/cards/-".to_string(),
                    value: Some(card.clone()),
                });
            }
        }

        // Removal shifts the list left, so the index stays fixed.
        for _ in new_cards.len()..existing_count {
            operations.push(PatchOperation {
                op: "remove",
                path: format!("/cards/{}", new_cards.len()),
                value: None,
            });
        }

        operations
    }
}

impl Default for BoxFileStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FileStore for BoxFileStore {
    async fn download(
        &self,
        file_id: &str,
        token: &SkillsToken,
    ) -> Result<PathBuf, FileStoreError> {
        let read_token = token
            .read_token()
            .ok_or(FileStoreError::MissingToken("read"))?;

        let mut response = self
            .client
            .get(self.content_url(file_id))
            .bearer_auth(read_token)
            .header("Accept", "*/*")
            .header("X-Box-UA", BOX_UA)
            .send()
            .await
            .map_err(|e| FileStoreError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(FileStoreError::AuthFailed(status.as_u16()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FileStoreError::RequestFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let path = std::env::temp_dir().join(format!("box-file-{}", file_id));
        let mut file = File::create(&path)
            .await
            .map_err(|e| FileStoreError::Io(e.to_string()))?;

        let mut written = 0u64;
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| FileStoreError::RequestFailed(e.to_string()))?
        {
            file.write_all(&chunk)
                .await
                .map_err(|e| FileStoreError::Io(e.to_string()))?;
            written += chunk.len() as u64;
        }
        file.flush()
            .await
            .map_err(|e| FileStoreError::Io(e.to_string()))?;

        if written == 0 {
            let _ = tokio::fs::remove_file(&path).await;
            return Err(FileStoreError::EmptyDownload);
        }

        tracing::info!(file_id, bytes = written, path = %path.display(), "downloaded file content");
        Ok(path)
    }

    async fn upload_cards(
        &self,
        file_id: &str,
        document: &CardDocument,
        token: &SkillsToken,
    ) -> Result<(), FileStoreError> {
        let write_token = token
            .write_token()
            .ok_or(FileStoreError::MissingToken("write"))?;

        let url = self.cards_url(file_id);

        // Cards may already exist on the file; that decides create vs patch.
        let check = self
            .client
            .get(&url)
            .bearer_auth(write_token)
            .send()
            .await
            .map_err(|e| FileStoreError::RequestFailed(e.to_string()))?;

        let response = match check.status() {
            reqwest::StatusCode::OK => {
                let existing: Value = check
                    .json()
                    .await
                    .map_err(|e| FileStoreError::RequestFailed(e.to_string()))?;
                let existing_count = existing["cards"].as_array().map_or(0, Vec::len);

                let new_cards = document.to_value()["cards"]
                    .as_array()
                    .cloned()
                    .unwrap_or_default();
                let operations = Self::patch_operations(&new_cards, existing_count);
                tracing::info!(
                    existing = existing_count,
                    new = new_cards.len(),
                    "updating existing skills cards"
                );

                let body = serde_json::to_vec(&operations)
                    .map_err(|e| FileStoreError::RequestFailed(e.to_string()))?;

                self.client
                    .put(&url)
                    .bearer_auth(write_token)
                    .header("Content-Type", "application/json-patch+json")
                    .body(body)
                    .send()
                    .await
                    .map_err(|e| FileStoreError::RequestFailed(e.to_string()))?
            }
            reqwest::StatusCode::NOT_FOUND => {
                tracing::info!("no existing skills cards, creating");
                self.client
                    .post(&url)
                    .bearer_auth(write_token)
                    .json(&document)
                    .send()
                    .await
                    .map_err(|e| FileStoreError::RequestFailed(e.to_string()))?
            }
            status => return Err(FileStoreError::UnexpectedStatus(status.as_u16())),
        };

        let status = response.status();
        if status == reqwest::StatusCode::OK || status == reqwest::StatusCode::CREATED {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(FileStoreError::UploadRejected(format!(
                "HTTP {}: {}",
                status, body
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn content_and_cards_urls() {
        let store = BoxFileStore::with_base_url("https://example.test/2.0");
        assert_eq!(
            store.content_url("123"),
            "https://example.test/2.0/files/123/content"
        );
        assert_eq!(
            store.cards_url("123"),
            "https://example.test/2.0/files/123/metadata/global/boxSkillsCards"
        );
    }

    #[test]
    fn patch_replaces_overlapping_and_adds_extras() {
        let new_cards = vec![json!({"a": 1}), json!({"b": 2}), json!({"c": 3})];
        let operations = BoxFileStore::patch_operations(&new_cards, 2);

        assert_eq!(operations.len(), 3);
        assert_eq!(operations[0].op, "replace");
        assert_eq!(operations[0].path, "/cards/0");
        assert_eq!(operations[1].op, "replace");
        assert_eq!(operations[1].path, "/cards/1");
        assert_eq!(operations[2].op, "add");
        assert_eq!(operations[2].path, "/cards/-");
    }

    #[test]
    fn patch_removes_leftover_cards_at_fixed_index() {
        let new_cards = vec![json!({"a": 1})];
        let operations = BoxFileStore::patch_operations(&new_cards, 3);

        assert_eq!(operations.len(), 3);
        assert_eq!(operations[0].op, "replace");
        assert_eq!(operations[1].op, "remove");
        assert_eq!(operations[1].path, "/cards/1");
        assert_eq!(operations[2].op, "remove");
        assert_eq!(operations[2].path, "/cards/1");
        assert!(operations[1].value.is_none());
    }

    #[test]
    fn patch_with_no_existing_cards_only_adds() {
        let new_cards = vec![json!({"a": 1}), json!({"b": 2})];
        let operations = BoxFileStore::patch_operations(&new_cards, 0);

        assert!(operations.iter().all(|op| op.op == "add"));
    }
}
