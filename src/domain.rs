//! Domain layer: catalog entities, validation results, gateway contract
//! and store events.

pub mod events;
pub mod gateway;
pub mod product;
pub mod validation;

pub use events::StoreEvent;
pub use gateway::{CatalogError, CatalogGateway};
pub use product::{revision_date, Product};
pub use validation::FieldErrors;
