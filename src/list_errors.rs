//! # Shopping-List Error Types Module
//!
//! The engine's error taxonomy is intentionally shallow: unknown units,
//! unknown ingredient ids and empty menus all degrade to fallback values
//! instead of failing. Only inputs malformed beyond interpretation raise
//! one of the errors defined here.

/// Errors raised by the aggregation engine
#[derive(Debug, Clone, PartialEq)]
pub enum AggregateError {
    /// An ingredient reference without an id; silently dropping it would
    /// corrupt the shopping list invisibly
    MissingIngredientId(String),
    /// A negative quantity on an ingredient reference
    InvalidQuantity(String),
}

impl std::fmt::Display for AggregateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AggregateError::MissingIngredientId(msg) => {
                write!(f, "Missing ingredient id: {msg}")
            }
            AggregateError::InvalidQuantity(msg) => write!(f, "Invalid quantity: {msg}"),
        }
    }
}

impl std::error::Error for AggregateError {}
