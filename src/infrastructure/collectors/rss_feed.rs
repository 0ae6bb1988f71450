use crate::domain::ports::RecordSource;
use crate::domain::record::TextRecord;
use crate::infrastructure::http_client_factory::HttpClientFactory;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest_middleware::ClientWithMiddleware;
use rss::Channel;
use std::io::Cursor;
use tracing::{debug, info};

const FALLBACK_SOURCE: &str = "RSS";

/// Fetches an RSS feed once per run; every item becomes a record.
pub struct RssRecordSource {
    url: String,
    client: ClientWithMiddleware,
}

impl RssRecordSource {
    pub fn new(url: &str) -> Self {
        Self::with_client(url, HttpClientFactory::create_client())
    }

    pub fn with_client(url: &str, client: ClientWithMiddleware) -> Self {
        Self {
            url: url.to_string(),
            client,
        }
    }
}

#[async_trait]
impl RecordSource for RssRecordSource {
    fn name(&self) -> &str {
        &self.url
    }

    async fn collect(&self) -> Result<Vec<TextRecord>> {
        debug!("Fetching RSS feed {}", self.url);
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch RSS feed {}", self.url))?
            .error_for_status()
            .with_context(|| format!("RSS feed {} returned an error status", self.url))?;
        let bytes = response
            .bytes()
            .await
            .with_context(|| format!("Failed to read RSS feed {}", self.url))?;

        let channel = Channel::read_from(Cursor::new(bytes))
            .with_context(|| format!("Failed to parse RSS feed {}", self.url))?;
        let records = records_from_channel(&channel, &self.url);

        info!("Collected {} items from RSS feed {}", records.len(), self.url);
        Ok(records)
    }
}

/// Title and description form the content; the channel title names the source.
pub fn records_from_channel(channel: &Channel, query: &str) -> Vec<TextRecord> {
    let source = match channel.title().trim() {
        "" => FALLBACK_SOURCE,
        title => title,
    };

    channel
        .items()
        .iter()
        .map(|item| {
            let content = [item.title(), item.description()]
                .into_iter()
                .flatten()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join("\n");

            // RSS dates are RFC-2822
            let timestamp = item
                .pub_date()
                .and_then(|d| DateTime::parse_from_rfc2822(d).ok())
                .map(|d| d.with_timezone(&Utc))
                .unwrap_or_else(Utc::now);

            TextRecord::new(query, content, source).with_timestamp(timestamp)
        })
        .collect()
}
