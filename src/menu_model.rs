//! # Weekly Menu Data Model
//!
//! This module defines the input side of the shopping-list engine: a
//! snapshot of the planned week. Each date carries an optional midday and
//! evening recipe reference, and a separate list of "extra" entries covers
//! purchases planned outside any meal slot.
//!
//! The snapshot is owned by the menu-planning store of the surrounding
//! application; the engine only ever reads it.
//!
//! ## Usage
//!
//! ```rust
//! use courses::menu_model::{IngredientRef, RecipeRef, WeeklyMenuSnapshot};
//! use chrono::NaiveDate;
//!
//! let crepes = RecipeRef::new("r1", "Crêpes")
//!     .with_ingredient(IngredientRef::new("farine").with_quantity(300.0).with_unit("g"))
//!     .with_ingredient(IngredientRef::new("oeuf").with_quantity(3.0));
//!
//! let mut menu = WeeklyMenuSnapshot::new();
//! menu.plan_midday(NaiveDate::from_ymd_opt(2026, 8, 10).unwrap(), crepes);
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The two planned meals of a day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MealSlot {
    /// Midday meal ("midi")
    Midday,
    /// Evening meal ("soir")
    Evening,
}

/// One ingredient reference inside a recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientRef {
    /// Catalog id of the ingredient. Must not be empty.
    pub ingredient_id: String,
    /// Quantity, `None` meaning unspecified (treated as 1 at aggregation)
    pub quantity: Option<f64>,
    /// Free-form unit spelling; empty means a plain count
    #[serde(default)]
    pub unit: String,
}

/// A recipe as referenced by the menu, carrying its ingredient list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeRef {
    /// Stable recipe id
    pub id: String,
    /// Recipe title, used in error messages and provenance display
    pub name: String,
    /// Ingredient references in recipe order
    pub ingredients: Vec<IngredientRef>,
}

/// The two optional recipe slots of one date
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    pub midday: Option<RecipeRef>,
    pub evening: Option<RecipeRef>,
}

/// An entry planned outside the day grid. Extras are never date-filtered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtraEntry {
    /// Stable id of the extra, used as its source tag fallback
    pub id: String,
    /// The recipe (or ad-hoc ingredient list) to shop for
    pub recipe: RecipeRef,
    /// Optional user-facing label overriding the id in source tags
    pub custom_name: Option<String>,
}

/// Read-only snapshot of the planned week
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeeklyMenuSnapshot {
    /// Day plans keyed by date; iteration order is the calendar order
    pub days: BTreeMap<NaiveDate, DayPlan>,
    /// Extra entries, always included regardless of date
    #[serde(default)]
    pub extras: Vec<ExtraEntry>,
}

impl IngredientRef {
    /// Create a reference with just an ingredient id
    pub fn new(ingredient_id: &str) -> Self {
        Self {
            ingredient_id: ingredient_id.to_string(),
            quantity: None,
            unit: String::new(),
        }
    }

    /// Set the quantity
    pub fn with_quantity(mut self, quantity: f64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// Set the unit spelling
    pub fn with_unit(mut self, unit: &str) -> Self {
        self.unit = unit.to_string();
        self
    }
}

impl RecipeRef {
    /// Create an empty recipe reference
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            ingredients: Vec::new(),
        }
    }

    /// Append an ingredient reference
    pub fn with_ingredient(mut self, ingredient: IngredientRef) -> Self {
        self.ingredients.push(ingredient);
        self
    }
}

impl DayPlan {
    /// Planned slots of the day in midday, evening order
    pub fn planned_slots(&self) -> impl Iterator<Item = (MealSlot, &RecipeRef)> {
        self.midday
            .iter()
            .map(|recipe| (MealSlot::Midday, recipe))
            .chain(self.evening.iter().map(|recipe| (MealSlot::Evening, recipe)))
    }
}

impl ExtraEntry {
    pub fn new(id: &str, recipe: RecipeRef) -> Self {
        Self {
            id: id.to_string(),
            recipe,
            custom_name: None,
        }
    }

    pub fn with_custom_name(mut self, name: &str) -> Self {
        self.custom_name = Some(name.to_string());
        self
    }

    /// Label identifying this extra in source tags
    pub fn source_tag(&self) -> &str {
        self.custom_name.as_deref().unwrap_or(&self.id)
    }
}

impl WeeklyMenuSnapshot {
    /// Create an empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Plan the midday slot of a date, replacing any previous recipe
    pub fn plan_midday(&mut self, date: NaiveDate, recipe: RecipeRef) {
        self.days.entry(date).or_default().midday = Some(recipe);
    }

    /// Plan the evening slot of a date, replacing any previous recipe
    pub fn plan_evening(&mut self, date: NaiveDate, recipe: RecipeRef) {
        self.days.entry(date).or_default().evening = Some(recipe);
    }

    /// Append an extra entry
    pub fn add_extra(&mut self, extra: ExtraEntry) {
        self.extras.push(extra);
    }

    /// Number of planned recipe slots across all days
    pub fn planned_slot_count(&self) -> usize {
        self.days
            .values()
            .map(|plan| plan.planned_slots().count())
            .sum()
    }
}
