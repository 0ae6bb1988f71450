// Record sources
pub mod collectors;

// History logs and report files
pub mod persistence;

// HTTP client with retry middleware
pub mod http_client_factory;

pub use http_client_factory::HttpClientFactory;
