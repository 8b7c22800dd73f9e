use std::collections::HashMap;
use std::future::Future;
use std::io;
use std::path::PathBuf;

use serde::Deserialize;
use shortcode_tonic_core::shortcode::{BoxError, CodeStore, ShortCode, Snapshot};

/// On-disk layout of the consuming API's JSON database. Only the record
/// keys matter here; payloads are passed through untyped because the
/// generation service is a read-only consumer.
#[derive(Debug, Default, Deserialize)]
struct Database {
    #[serde(default)]
    urls: HashMap<String, serde_json::Value>,
}

/// Read-only snapshot source over the consuming API's `db.json`.
///
/// A missing file is an empty store: that is a fresh deployment, not a
/// failure. Every other read or parse error is surfaced as-is, which keeps
/// generation fail-closed when the store is unreadable.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CodeStore for JsonFileStore {
    fn snapshot(&self) -> impl Future<Output = Result<Snapshot, BoxError>> + Send {
        async move {
            let bytes = match tokio::fs::read(&self.path).await {
                Ok(bytes) => bytes,
                Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Snapshot::default()),
                Err(e) => return Err(e.into()),
            };
            let db: Database = serde_json::from_slice(&bytes)?;
            Ok(db.urls.into_keys().map(ShortCode::from).collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("shortcode-{}-{name}.json", std::process::id()))
    }

    #[tokio::test]
    async fn missing_file_is_an_empty_store() {
        let store = JsonFileStore::new(scratch_path("missing"));
        let snapshot = store.snapshot().await.unwrap();
        assert!(snapshot.is_empty());
    }

    #[tokio::test]
    async fn reads_issued_codes_from_the_urls_table() {
        let path = scratch_path("reads");
        tokio::fs::write(
            &path,
            r#"{
                "urls": {
                    "abc1234": {
                        "originalUrl": "https://example.com",
                        "shortCode": "abc1234",
                        "createdAt": "2024-01-01T00:00:00.000Z",
                        "clicks": 3
                    }
                }
            }"#,
        )
        .await
        .unwrap();

        let store = JsonFileStore::new(&*path);
        let snapshot = store.snapshot().await.unwrap();
        assert_eq!(snapshot.len(), 1);
        assert!(snapshot.contains(&ShortCode::from("abc1234")));

        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn empty_object_means_no_codes() {
        let path = scratch_path("empty");
        tokio::fs::write(&path, "{}").await.unwrap();

        let store = JsonFileStore::new(&*path);
        assert!(store.snapshot().await.unwrap().is_empty());

        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn malformed_json_is_surfaced_not_swallowed() {
        let path = scratch_path("malformed");
        tokio::fs::write(&path, "not json").await.unwrap();

        let store = JsonFileStore::new(&*path);
        assert!(store.snapshot().await.is_err());

        tokio::fs::remove_file(&path).await.unwrap();
    }
}
