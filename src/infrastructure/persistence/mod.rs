// History logs under the data directory
pub mod theme_evolution;
pub mod ticker_history;

// Markdown reports and their index
pub mod report_store;

pub use report_store::ReportStore;
pub use theme_evolution::{ThemeEvolutionStore, ThemeSnapshot};
pub use ticker_history::TickerHistoryStore;
