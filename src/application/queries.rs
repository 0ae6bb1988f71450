use chrono::NaiveDate;

/// Search topics handed to collectors, before the month suffix is applied.
const QUERY_TOPICS: &[&str] = &[
    "reddit wallstreetbets trending stocks",
    "AI stocks quantum computing biotech momentum",
    "space stocks satellite companies ASTS RKLB",
    "nuclear energy stocks SMR CEG",
    "custom AI chips Broadcom AVGO",
    "ASTS stock news analysis",
    "AVGO Broadcom AI chips",
    "POET optical interconnects",
    "SMR NuScale nuclear",
    "CEG Constellation Energy",
    "RDDT Reddit stock analysis",
];

/// Queries for a run on `date`, e.g. "CEG Constellation Energy October 2026".
pub fn search_queries(date: NaiveDate) -> Vec<String> {
    let suffix = date.format("%B %Y").to_string();
    QUERY_TOPICS
        .iter()
        .map(|topic| format!("{} {}", topic, suffix))
        .collect()
}
