//! Application layer: the reactive store, the list derivation rules and
//! the debounced identifier validator.

pub mod listing;
pub mod store;
pub mod validator;

pub use store::ProductStore;
pub use validator::{IdValidator, ValidatorConfig};
