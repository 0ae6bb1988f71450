// Tracked tickers and tiers
pub mod catalog;

// Raw collected text
pub mod record;

// Sentiment labels and tallies
pub mod sentiment;

// Theme definitions and per-run aggregates
pub mod theme;

// Per-ticker run summaries
pub mod rollup;

// Persisted history, snapshots and baselines
pub mod history;

// Momentum buckets and spikes
pub mod momentum;

// Port interfaces
pub mod ports;

// Domain-specific error types
pub mod errors;
