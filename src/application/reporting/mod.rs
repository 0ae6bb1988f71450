// Markdown rendering of an analysis run
pub mod markdown;

pub use markdown::MarkdownReport;
