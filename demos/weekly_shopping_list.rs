//! # Weekly Shopping List Example
//!
//! End-to-end walkthrough of the engine: build a weekly menu snapshot,
//! resolve catalog metadata with the concurrent fetch step, aggregate into
//! a shopping list and print it grouped by category. The catalog here is a
//! JSON blob standing in for the application's real ingredient store.

use anyhow::{anyhow, Result};
use chrono::{Days, Local};
use courses::catalog::{
    collect_ingredient_ids, resolve_catalog, CatalogFetchConfig, IngredientInfo,
};
use courses::localization::{Labels, LocalizationManager, DEFAULT_LOCALE};
use courses::menu_model::{ExtraEntry, IngredientRef, RecipeRef, WeeklyMenuSnapshot};
use courses::shopping_list::aggregate;
use std::collections::HashMap;
use std::sync::Arc;

const CATALOG_JSON: &str = r#"{
    "farine": { "name": "Farine de blé", "unit": "g", "category": "Épicerie", "image": null },
    "lait": { "name": "Lait entier", "unit": "l", "category": "Crèmerie", "image": null },
    "oeuf": { "name": "Œufs", "unit": "", "category": "Crèmerie", "image": null },
    "beurre": { "name": "Beurre doux", "unit": "g", "category": "Crèmerie", "image": null },
    "tomate": { "name": "Tomates", "unit": "", "category": "Fruits et légumes", "image": null }
}"#;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("🛒 Weekly Shopping List Example");
    println!("================================\n");

    // The menu snapshot the planning UI would hand over
    let today = Local::now().date_naive();
    let tomorrow = today + Days::new(1);

    let mut menu = WeeklyMenuSnapshot::new();
    menu.plan_midday(
        today,
        RecipeRef::new("r1", "Crêpes")
            .with_ingredient(IngredientRef::new("farine").with_quantity(300.0).with_unit("g"))
            .with_ingredient(IngredientRef::new("lait").with_quantity(50.0).with_unit("cl"))
            .with_ingredient(IngredientRef::new("oeuf").with_quantity(3.0)),
    );
    menu.plan_evening(
        today,
        RecipeRef::new("r2", "Pâtes fraîches")
            .with_ingredient(IngredientRef::new("farine").with_quantity(0.2).with_unit("kg"))
            .with_ingredient(IngredientRef::new("oeuf").with_quantity(2.0)),
    );
    menu.plan_midday(
        tomorrow,
        RecipeRef::new("r3", "Salade de tomates")
            .with_ingredient(IngredientRef::new("tomate").with_quantity(6.0))
            .with_ingredient(IngredientRef::new("huile-olive").with_quantity(2.0).with_unit("cs")),
    );
    menu.add_extra(
        ExtraEntry::new(
            "extra-1",
            RecipeRef::new("r9", "Goûter")
                .with_ingredient(IngredientRef::new("beurre").with_quantity(125.0).with_unit("g")),
        )
        .with_custom_name("Goûter de mercredi"),
    );

    // Simulated remote catalog backed by the JSON blob above; note that
    // "huile-olive" is missing and will degrade to a placeholder line
    let store: Arc<HashMap<String, IngredientInfo>> =
        Arc::new(serde_json::from_str(CATALOG_JSON)?);

    let ids = collect_ingredient_ids(&menu, today);
    println!("Distinct ingredients to resolve: {ids:?}\n");

    let catalog = resolve_catalog(
        ids,
        move |id| {
            let store = Arc::clone(&store);
            async move {
                store
                    .get(&id)
                    .cloned()
                    .ok_or_else(|| anyhow!("no catalog entry for '{id}'"))
            }
        },
        &CatalogFetchConfig::default(),
    )
    .await;

    let manager = LocalizationManager::new()?;
    let labels = Labels::for_locale(&manager, DEFAULT_LOCALE);
    let lines = aggregate(&menu, &catalog, today, &labels)?;

    println!("📋 {}", manager.message(DEFAULT_LOCALE, "shopping-list-title"));
    println!("--------------------------------");

    let uncategorized = manager.message(DEFAULT_LOCALE, "uncategorized");
    for line in &lines {
        let category = line.category.as_deref().unwrap_or(&uncategorized);
        println!(
            "  [{}] {} — {}",
            category,
            line.display_name,
            line.display_quantity()
        );
        for alternate in &line.alternates {
            println!("        + {} ({})", alternate.display(), alternate.source_tag);
        }
        println!("        sources: {}", line.source_tags.join(", "));
    }

    Ok(())
}
