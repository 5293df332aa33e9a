//! Store event types
//!
//! Every store mutation emits one event over a broadcast channel so
//! observers can follow catalog activity without polling the watch
//! views. Receivers that lag are allowed to drop events.

use serde::{Deserialize, Serialize};

use crate::domain::product::Product;

/// Notification of a completed store mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StoreEvent {
    /// The full list was re-fetched; both caches now hold `count` items.
    Refreshed { count: usize },
    Created { id: String },
    Updated { id: String },
    Deleted { id: String },
    /// The derived view was recomputed for a search term.
    SearchApplied { term: String, matches: usize },
    PageSizeChanged { size: usize },
    SelectionChanged { selected: Option<Product> },
}

impl std::fmt::Display for StoreEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreEvent::Refreshed { count } => write!(f, "refreshed ({count} products)"),
            StoreEvent::Created { id } => write!(f, "created {id}"),
            StoreEvent::Updated { id } => write!(f, "updated {id}"),
            StoreEvent::Deleted { id } => write!(f, "deleted {id}"),
            StoreEvent::SearchApplied { term, matches } => {
                write!(f, "search '{term}' ({matches} matches)")
            }
            StoreEvent::PageSizeChanged { size } => write!(f, "page size {size}"),
            StoreEvent::SelectionChanged { selected: Some(p) } => {
                write!(f, "selected {}", p.id)
            }
            StoreEvent::SelectionChanged { selected: None } => write!(f, "selection cleared"),
        }
    }
}
