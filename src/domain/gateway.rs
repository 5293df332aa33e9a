//! Backend gateway contract
//!
//! Trait seam between the reactive store / validator and the HTTP
//! implementation, so application logic can be exercised against an
//! in-memory fake.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::product::Product;

/// Errors surfaced from the backend contract.
///
/// A non-2xx response carries the server-provided `message` verbatim;
/// callers display it and never retry automatically.
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    #[error("backend rejected the request ({status}): {message}")]
    Backend { status: u16, message: String },

    #[error("transport failure: {message}")]
    Transport { message: String },

    #[error("could not decode backend response: {message}")]
    Decode { message: String },
}

impl CatalogError {
    /// The user-facing failure reason.
    pub fn message(&self) -> &str {
        match self {
            CatalogError::Backend { message, .. } => message,
            CatalogError::Transport { message } => message,
            CatalogError::Decode { message } => message,
        }
    }
}

/// The five backend operations the catalog core consumes.
#[async_trait]
pub trait CatalogGateway: Send + Sync {
    /// GET the full product list.
    async fn fetch_all(&self) -> Result<Vec<Product>, CatalogError>;

    /// POST a new product; returns the server-confirmed record.
    async fn create(&self, product: &Product) -> Result<Product, CatalogError>;

    /// PUT an existing product by its identifier.
    async fn update(&self, product: &Product) -> Result<Product, CatalogError>;

    /// DELETE a product by identifier; returns the removed record.
    async fn delete(&self, id: &str) -> Result<Product, CatalogError>;

    /// Uniqueness probe: does the identifier already exist?
    async fn id_exists(&self, id: &str) -> Result<bool, CatalogError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_error_exposes_server_message() {
        let err = CatalogError::Backend {
            status: 400,
            message: "Invalid body".to_string(),
        };
        assert_eq!(err.message(), "Invalid body");
        assert!(err.to_string().contains("400"));
    }
}
