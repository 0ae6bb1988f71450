use crate::domain::ports::RecordSource;
use crate::domain::record::TextRecord;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::info;

/// Records pasted or exported into a JSON array file.
///
/// ```json
/// [{"query": "space stocks", "content": "ASTS ...", "source": "Reddit"}]
/// ```
pub struct JsonRecordSource {
    path: PathBuf,
    name: String,
}

impl JsonRecordSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        Self {
            name: format!("json:{}", path.display()),
            path,
        }
    }
}

#[async_trait]
impl RecordSource for JsonRecordSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn collect(&self) -> Result<Vec<TextRecord>> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read records file {:?}", self.path))?;
        let records: Vec<TextRecord> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse records JSON {:?}", self.path))?;

        info!("Read {} records from {:?}", records.len(), self.path);
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::UNKNOWN_SOURCE;
    use std::fs;
    use std::sync::atomic::{AtomicU64, Ordering};

    static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

    fn temp_file(content: &str) -> PathBuf {
        let unique_id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        let path = std::env::temp_dir().join(format!(
            "rotation_test_{}_{}_records.json",
            std::process::id(),
            unique_id
        ));
        fs::write(&path, content).expect("Failed to write test records");
        path
    }

    #[tokio::test]
    async fn test_reads_records_with_defaults() {
        let path = temp_file(
            r#"[
                {"query": "space", "content": "ASTS satellites", "source": "Reddit"},
                {"query": "nuclear"}
            ]"#,
        );

        let records = JsonRecordSource::new(&path).collect().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].content, "ASTS satellites");
        assert_eq!(records[1].content, "");
        assert_eq!(records[1].source, UNKNOWN_SOURCE);

        fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn test_malformed_json_is_an_error() {
        let path = temp_file("{not json");
        let err = JsonRecordSource::new(&path).collect().await.unwrap_err();
        assert!(err.to_string().contains("Failed to parse records JSON"));
        fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error() {
        let source = JsonRecordSource::new("/nonexistent/rotation/records.json");
        assert!(source.collect().await.is_err());
    }

    #[tokio::test]
    async fn test_null_content_keeps_the_other_records() {
        let path = temp_file(
            r#"[
                {"content": "ASTS satellite", "source": "A"},
                {"content": null, "source": "B"},
                {"content": "SMR nuclear", "source": "C"}
            ]"#,
        );

        let records = JsonRecordSource::new(&path).collect().await.unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[1].content, "");
        assert_eq!(records[2].content, "SMR nuclear");

        fs::remove_file(path).ok();
    }
}
