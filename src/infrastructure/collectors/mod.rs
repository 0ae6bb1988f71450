// Record sources feeding a report run
pub mod json_file;
pub mod rss_feed;
pub mod sample;

pub use json_file::JsonRecordSource;
pub use rss_feed::RssRecordSource;
pub use sample::SampleRecordSource;
