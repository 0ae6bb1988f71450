//! Optional overrides for the sentiment keyword lists.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SentimentConfig {
    pub positive: Option<Vec<String>>,
    pub negative: Option<Vec<String>>,
}
