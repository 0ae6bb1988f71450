use crate::domain::ports::RecordSource;
use crate::domain::record::TextRecord;
use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

const SAMPLE_RECORDS: &[(&str, &str, &str)] = &[
    (
        "reddit wallstreetbets trending stocks",
        "ASTS and RKLB keep trending. Satellite direct-to-cell is the catalyst, \
         bullish momentum into the next launch.",
        "Reddit",
    ),
    (
        "custom AI chips ASIC stocks",
        "AVGO and MRVL custom ASIC revenue growth is strong, analysts upgrade \
         both on hyperscaler demand.",
        "Seeking Alpha",
    ),
    (
        "optical interconnect stocks",
        "POET and LITE optical interconnect orders surge with AI clusters. \
         COHR sees a breakout.",
        "Yahoo Finance",
    ),
    (
        "nuclear energy AI data centers stocks",
        "SMR, OKLO and CEG rally as data centers sign nuclear power agreements.",
        "Reuters",
    ),
    (
        "quantum computing stocks",
        "IONQ and RGTI are overvalued after the quantum run. Bearish analysts \
         warn of a decline and downgrade risk.",
        "Bloomberg",
    ),
    (
        "copper mining stocks AI demand",
        "FCX copper demand from grid buildout remains a concern near term.",
        "MarketWatch",
    ),
];

/// Fixed records for dry runs and demos.
pub struct SampleRecordSource;

impl SampleRecordSource {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SampleRecordSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordSource for SampleRecordSource {
    fn name(&self) -> &str {
        "sample"
    }

    async fn collect(&self) -> Result<Vec<TextRecord>> {
        let records: Vec<TextRecord> = SAMPLE_RECORDS
            .iter()
            .map(|(query, content, source)| TextRecord::new(*query, *content, *source))
            .collect();
        info!("Using {} built-in sample records", records.len());
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sample_records_have_content() {
        let records = SampleRecordSource::new().collect().await.unwrap();
        assert_eq!(records.len(), SAMPLE_RECORDS.len());
        assert!(records.iter().all(|r| !r.content.is_empty()));
    }
}
