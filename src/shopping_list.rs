//! # Shopping List Aggregation Module
//!
//! Walks a weekly-menu snapshot together with an ingredient catalog and
//! produces the consolidated shopping list: one line per distinct
//! ingredient id, quantities summed when units are combinable and kept as
//! parallel alternate quantities when they are not.
//!
//! The engine is a pure transform of its inputs: no I/O, no shared state,
//! and identical inputs always yield identical lines. Past days never
//! contribute, extras always do. Irregular input degrades instead of
//! failing; the only raised errors are references malformed beyond
//! interpretation (no ingredient id, negative quantity).

use chrono::{Local, NaiveDate};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::catalog::IngredientCatalog;
use crate::list_errors::AggregateError;
use crate::localization::Labels;
use crate::menu_model::{RecipeRef, WeeklyMenuSnapshot};
use crate::unit_convert::{combine, format_best, to_base};

/// A quantity that could not be merged into a line's primary total
/// because its unit was not combinable with the primary unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternateQuantity {
    pub quantity: f64,
    pub unit: String,
    /// The menu slot or extra that contributed this quantity
    pub source_tag: String,
}

impl AlternateQuantity {
    /// Display string in the most readable unit of its kind
    pub fn display(&self) -> String {
        format_best(to_base(self.quantity, &self.unit), &self.unit)
    }
}

/// One consolidated shopping-list line.
///
/// Built fresh on every aggregation run and never mutated afterwards.
/// `source_tags` always holds at least one entry; `alternates` is
/// non-empty only when some contribution's unit was not combinable with
/// the primary unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedLine {
    pub ingredient_id: String,
    /// Catalog name, or the localized placeholder when the catalog has
    /// no entry for this id
    pub display_name: String,
    /// Catalog category; `None` for placeholder lines. Grouping and
    /// category ordering are the caller's concern.
    pub category: Option<String>,
    pub image: Option<String>,
    /// Total of all combinable contributions, in `unit`'s scale
    pub total_quantity: f64,
    /// Display unit: the spelling of the first-seen reference
    pub unit: String,
    /// One tag per contributing reference, in contribution order
    pub source_tags: Vec<String>,
    pub alternates: Vec<AlternateQuantity>,
}

impl AggregatedLine {
    /// Display string of the primary total in the most readable unit
    pub fn display_quantity(&self) -> String {
        format_best(to_base(self.total_quantity, &self.unit), &self.unit)
    }
}

/// Build the shopping list for a menu snapshot.
///
/// Days strictly before `today` (date-only comparison) are excluded;
/// extras always contribute. Quantities default to 1 when unspecified or
/// zero-ish, units fall back from the reference to the catalog entry.
/// The result is sorted by display name, accent- and case-insensitively.
///
/// # Errors
///
/// Fails fast on references malformed beyond interpretation: an empty
/// ingredient id or a negative quantity, identifying the offending
/// recipe. Everything else degrades (unknown units become count-style,
/// missing catalog entries become placeholder lines).
pub fn aggregate(
    menu: &WeeklyMenuSnapshot,
    catalog: &IngredientCatalog,
    today: NaiveDate,
    labels: &Labels,
) -> Result<Vec<AggregatedLine>, AggregateError> {
    let mut lines: Vec<AggregatedLine> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for (date, plan) in &menu.days {
        if *date < today {
            debug!("Skipping past day {} from shopping list", date);
            continue;
        }
        for (slot, recipe) in plan.planned_slots() {
            let tag = format!("{} {}", date.format("%Y-%m-%d"), labels.meal_slot(slot));
            accumulate_recipe(recipe, &tag, catalog, labels, &mut lines, &mut index)?;
        }
    }

    for extra in &menu.extras {
        accumulate_recipe(
            &extra.recipe,
            extra.source_tag(),
            catalog,
            labels,
            &mut lines,
            &mut index,
        )?;
    }

    lines.sort_by(|a, b| {
        collation_key(&a.display_name)
            .cmp(&collation_key(&b.display_name))
            .then_with(|| a.display_name.cmp(&b.display_name))
    });

    info!("Aggregated {} shopping-list lines", lines.len());
    Ok(lines)
}

/// Convenience wrapper using today's local date and the default French
/// labels, matching how the surrounding application calls the engine.
pub fn build_shopping_list(
    menu: &WeeklyMenuSnapshot,
    catalog: &IngredientCatalog,
) -> Result<Vec<AggregatedLine>, AggregateError> {
    aggregate(menu, catalog, Local::now().date_naive(), &Labels::default())
}

/// Fold one recipe's ingredient references into the accumulator
fn accumulate_recipe(
    recipe: &RecipeRef,
    tag: &str,
    catalog: &IngredientCatalog,
    labels: &Labels,
    lines: &mut Vec<AggregatedLine>,
    index: &mut HashMap<String, usize>,
) -> Result<(), AggregateError> {
    for reference in &recipe.ingredients {
        let ingredient_id = reference.ingredient_id.trim();
        if ingredient_id.is_empty() {
            return Err(AggregateError::MissingIngredientId(format!(
                "recipe '{}' ({})",
                recipe.name, tag
            )));
        }
        if let Some(quantity) = reference.quantity {
            if quantity < 0.0 {
                return Err(AggregateError::InvalidQuantity(format!(
                    "{} for '{}' in recipe '{}' ({})",
                    quantity, ingredient_id, recipe.name, tag
                )));
            }
        }

        let info = catalog.get(ingredient_id);
        let quantity = match reference.quantity {
            Some(q) if q > 0.0 => q,
            _ => 1.0,
        };
        let unit = {
            let own = reference.unit.trim();
            if own.is_empty() {
                info.map(|i| i.unit.clone()).unwrap_or_default()
            } else {
                own.to_string()
            }
        };

        match index.get(ingredient_id) {
            None => {
                index.insert(ingredient_id.to_string(), lines.len());
                lines.push(AggregatedLine {
                    ingredient_id: ingredient_id.to_string(),
                    display_name: info
                        .map(|i| i.name.clone())
                        .unwrap_or_else(|| labels.unknown_ingredient(ingredient_id)),
                    category: info.map(|i| i.category.clone()),
                    image: info.and_then(|i| i.image.clone()),
                    total_quantity: quantity,
                    unit,
                    source_tags: vec![tag.to_string()],
                    alternates: Vec::new(),
                });
            }
            Some(&position) => {
                let line = &mut lines[position];
                match combine(line.total_quantity, &line.unit, quantity, &unit) {
                    Some(merged) => line.total_quantity = merged.quantity,
                    None => line.alternates.push(AlternateQuantity {
                        quantity,
                        unit,
                        source_tag: tag.to_string(),
                    }),
                }
                line.source_tags.push(tag.to_string());
            }
        }
    }
    Ok(())
}

/// Accent- and case-insensitive sort key for French display names
fn collation_key(name: &str) -> String {
    let mut key = String::with_capacity(name.len());
    for c in name.to_lowercase().chars() {
        match c {
            'à' | 'â' | 'ä' => key.push('a'),
            'é' | 'è' | 'ê' | 'ë' => key.push('e'),
            'î' | 'ï' => key.push('i'),
            'ô' | 'ö' => key.push('o'),
            'ù' | 'û' | 'ü' => key.push('u'),
            'ç' => key.push('c'),
            'œ' => key.push_str("oe"),
            'æ' => key.push_str("ae"),
            _ => key.push(c),
        }
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::IngredientInfo;
    use crate::menu_model::{ExtraEntry, IngredientRef, RecipeRef};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn catalog() -> IngredientCatalog {
        let mut catalog = IngredientCatalog::new();
        catalog.insert("farine", IngredientInfo::new("Farine de blé", "g", "Épicerie"));
        catalog.insert("lait", IngredientInfo::new("Lait entier", "l", "Crèmerie"));
        catalog.insert("oeuf", IngredientInfo::new("Œufs", "", "Crèmerie"));
        catalog.insert(
            "epinard",
            IngredientInfo::new("Épinards", "g", "Fruits et légumes"),
        );
        catalog
    }

    #[test]
    fn test_source_tags_combine_date_and_slot() {
        let mut menu = WeeklyMenuSnapshot::new();
        let monday = date(2026, 8, 10);
        menu.plan_midday(
            monday,
            RecipeRef::new("r1", "Crêpes")
                .with_ingredient(IngredientRef::new("farine").with_quantity(300.0).with_unit("g")),
        );
        menu.plan_evening(
            monday,
            RecipeRef::new("r2", "Pâtes")
                .with_ingredient(IngredientRef::new("farine").with_quantity(0.2).with_unit("kg")),
        );

        let lines = aggregate(&menu, &catalog(), monday, &Labels::default()).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(
            lines[0].source_tags,
            vec!["2026-08-10 midi", "2026-08-10 soir"]
        );
    }

    #[test]
    fn test_unit_falls_back_to_catalog() {
        let mut menu = WeeklyMenuSnapshot::new();
        let monday = date(2026, 8, 10);
        menu.plan_midday(
            monday,
            RecipeRef::new("r1", "Béchamel")
                .with_ingredient(IngredientRef::new("lait").with_quantity(0.5)),
        );

        let lines = aggregate(&menu, &catalog(), monday, &Labels::default()).unwrap();
        assert_eq!(lines[0].unit, "l");
        assert_eq!(lines[0].display_quantity(), "50 cl");
    }

    #[test]
    fn test_missing_quantity_defaults_to_one() {
        let mut menu = WeeklyMenuSnapshot::new();
        let monday = date(2026, 8, 10);
        menu.plan_midday(
            monday,
            RecipeRef::new("r1", "Omelette")
                .with_ingredient(IngredientRef::new("oeuf"))
                .with_ingredient(IngredientRef::new("farine").with_quantity(0.0).with_unit("g")),
        );

        let lines = aggregate(&menu, &catalog(), monday, &Labels::default()).unwrap();
        let oeuf = lines.iter().find(|l| l.ingredient_id == "oeuf").unwrap();
        assert_eq!(oeuf.total_quantity, 1.0);
        let farine = lines.iter().find(|l| l.ingredient_id == "farine").unwrap();
        assert_eq!(farine.total_quantity, 1.0);
    }

    #[test]
    fn test_sort_is_accent_insensitive() {
        let mut menu = WeeklyMenuSnapshot::new();
        let monday = date(2026, 8, 10);
        menu.plan_midday(
            monday,
            RecipeRef::new("r1", "Quiche")
                .with_ingredient(IngredientRef::new("oeuf").with_quantity(3.0))
                .with_ingredient(IngredientRef::new("epinard").with_quantity(200.0).with_unit("g"))
                .with_ingredient(IngredientRef::new("farine").with_quantity(200.0).with_unit("g")),
        );

        let lines = aggregate(&menu, &catalog(), monday, &Labels::default()).unwrap();
        let names: Vec<&str> = lines.iter().map(|l| l.display_name.as_str()).collect();
        // "Épinards" sorts under E, "Œufs" under O
        assert_eq!(names, vec!["Épinards", "Farine de blé", "Œufs"]);
    }

    #[test]
    fn test_collation_key_folds_french_letters() {
        assert_eq!(collation_key("Épinards"), "epinards");
        assert_eq!(collation_key("Œufs"), "oeufs");
        assert_eq!(collation_key("Bœuf haché"), "boeuf hache");
    }

    #[test]
    fn test_empty_menu_yields_empty_list() {
        let menu = WeeklyMenuSnapshot::new();
        let lines = aggregate(&menu, &catalog(), date(2026, 8, 10), &Labels::default()).unwrap();
        assert!(lines.is_empty());
    }

    #[test]
    fn test_extra_tags_use_custom_name_or_id() {
        let mut menu = WeeklyMenuSnapshot::new();
        menu.add_extra(ExtraEntry::new(
            "extra-1",
            RecipeRef::new("r9", "Goûter")
                .with_ingredient(IngredientRef::new("farine").with_quantity(100.0).with_unit("g")),
        ));
        menu.add_extra(
            ExtraEntry::new(
                "extra-2",
                RecipeRef::new("r8", "Pique-nique")
                    .with_ingredient(IngredientRef::new("farine").with_quantity(50.0).with_unit("g")),
            )
            .with_custom_name("Pique-nique de samedi"),
        );

        let lines = aggregate(&menu, &catalog(), date(2026, 8, 10), &Labels::default()).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].total_quantity, 150.0);
        assert_eq!(
            lines[0].source_tags,
            vec!["extra-1", "Pique-nique de samedi"]
        );
    }
}
