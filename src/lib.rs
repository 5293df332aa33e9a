//! bp-catalog - client-side core for a bank product catalog
//!
//! Provides a reactive in-memory store over a REST backend (list,
//! search, paginate, create, update, delete) and a debounced
//! switch-latest identifier-uniqueness validator. UI concerns stay with
//! the embedding application; this crate owns the state, the derivation
//! rules and the backend contract.
//!
//! ```no_run
//! use std::sync::Arc;
//! use bp_catalog::application::{IdValidator, ProductStore};
//! use bp_catalog::infrastructure::{AppConfig, CatalogClient};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = AppConfig::load_or_default("config.json").await?;
//! let client = Arc::new(CatalogClient::new(&config.http)?);
//!
//! let store = ProductStore::connect(client.clone(), config.listing.default_page_size).await?;
//! let validator = IdValidator::spawn(client, (&config.validation).into());
//!
//! store.search("visa").await;
//! validator.push("trj-crd");
//! # Ok(())
//! # }
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::{IdValidator, ProductStore, ValidatorConfig};
pub use domain::{CatalogError, CatalogGateway, FieldErrors, Product, StoreEvent};
pub use infrastructure::{AppConfig, CatalogClient};
