use crate::domain::record::TextRecord;
use anyhow::Result;
use async_trait::async_trait;

/// External collector that supplies raw text records for one run.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Human-readable origin, used in logs.
    fn name(&self) -> &str;

    async fn collect(&self) -> Result<Vec<TextRecord>>;
}
