//! Infrastructure layer: HTTP gateway implementation, configuration and
//! logging setup.

pub mod api_client;
pub mod config;
pub mod logging;

pub use api_client::CatalogClient;
pub use config::{AppConfig, HttpConfig, ListingConfig, LoggingConfig, ValidationConfig};
pub use logging::{init_logging, init_logging_with_config};
