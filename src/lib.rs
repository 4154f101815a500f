//! # Courses — Shopping-List Aggregation Engine
//!
//! Derives a consolidated shopping list from a planned weekly menu and an
//! ingredient catalog: quantities are normalized through a bilingual unit
//! registry, summed when their units are combinable and kept as alternate
//! quantities when they are not. Persistence, UI and catalog storage stay
//! with the surrounding application; this crate only transforms snapshots.

pub mod catalog;
pub mod list_errors;
pub mod localization;
pub mod menu_model;
pub mod shopping_list;
pub mod unit_convert;
pub mod unit_registry;
