// Ticker/theme extraction and momentum comparison
pub mod analysis;

// Collector search queries
pub mod queries;

// Markdown rendering
pub mod reporting;

// Report run orchestration
pub mod report_service;
