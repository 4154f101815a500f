//! # Ingredient Catalog Module
//!
//! Read-only snapshot of the ingredient catalog (name, default unit,
//! category, image reference per ingredient id) plus the data-preparation
//! step that builds it: collect every distinct ingredient id the menu
//! references, fire one metadata fetch per id, join them all, and hand the
//! resulting snapshot to the synchronous aggregation pass.
//!
//! Metadata lookup is an external call in the surrounding application, so
//! failures are expected: a fetch that errors or times out simply leaves
//! its id out of the snapshot, and the aggregation pass degrades that id
//! to a placeholder line instead of aborting the batch.

use anyhow::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::time::Duration;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::menu_model::WeeklyMenuSnapshot;

/// Catalog metadata for one ingredient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientInfo {
    /// Display name ("Farine de blé")
    pub name: String,
    /// Default unit spelling, used when a recipe reference has none
    #[serde(default)]
    pub unit: String,
    /// Category for display grouping ("Épicerie", "Fruits et légumes" …)
    pub category: String,
    /// Optional opaque image reference
    pub image: Option<String>,
}

impl IngredientInfo {
    pub fn new(name: &str, unit: &str, category: &str) -> Self {
        Self {
            name: name.to_string(),
            unit: unit.to_string(),
            category: category.to_string(),
            image: None,
        }
    }

    pub fn with_image(mut self, image: &str) -> Self {
        self.image = Some(image.to_string());
        self
    }
}

/// Read-only snapshot mapping ingredient ids to their metadata.
///
/// Always passed into the aggregation call explicitly; there is no ambient
/// catalog state anywhere in the crate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngredientCatalog {
    entries: HashMap<String, IngredientInfo>,
}

impl IngredientCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an entry
    pub fn insert(&mut self, ingredient_id: &str, info: IngredientInfo) {
        self.entries.insert(ingredient_id.to_string(), info);
    }

    /// Metadata for an id, `None` when the catalog has no entry
    pub fn get(&self, ingredient_id: &str) -> Option<&IngredientInfo> {
        self.entries.get(ingredient_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Configuration for the metadata resolution step
#[derive(Debug, Clone)]
pub struct CatalogFetchConfig {
    /// Timeout per metadata fetch in seconds; a fetch exceeding it
    /// degrades to the placeholder policy
    pub fetch_timeout_secs: u64,
}

impl Default for CatalogFetchConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_secs: 10,
        }
    }
}

/// Collect every distinct ingredient id the menu will aggregate, in first
/// appearance order.
///
/// This is the dry pass preceding metadata resolution: days strictly
/// before `today` are skipped exactly like the aggregation pass skips
/// them, extras always contribute, and ids are deduplicated. Empty ids
/// are left out here; the aggregation pass is the one that rejects them.
pub fn collect_ingredient_ids(menu: &WeeklyMenuSnapshot, today: NaiveDate) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut ids = Vec::new();

    let day_ingredients = menu
        .days
        .iter()
        .filter(|(date, _)| **date >= today)
        .flat_map(|(_, plan)| plan.planned_slots())
        .flat_map(|(_, recipe)| recipe.ingredients.iter());
    let extra_ingredients = menu
        .extras
        .iter()
        .flat_map(|extra| extra.recipe.ingredients.iter());

    for reference in day_ingredients.chain(extra_ingredients) {
        let id = reference.ingredient_id.trim();
        if !id.is_empty() && seen.insert(id.to_string()) {
            ids.push(id.to_string());
        }
    }

    debug!("collected {} distinct ingredient ids", ids.len());
    ids
}

/// Resolve catalog metadata for a set of ingredient ids.
///
/// One fetch task is spawned per id and all of them are joined before
/// returning; completion order carries no meaning. A fetch that fails,
/// times out or panics leaves its id out of the snapshot so the
/// aggregation pass falls back to a placeholder for it.
pub async fn resolve_catalog<F, Fut>(
    ids: Vec<String>,
    fetch: F,
    config: &CatalogFetchConfig,
) -> IngredientCatalog
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<IngredientInfo>> + Send + 'static,
{
    let timeout = Duration::from_secs(config.fetch_timeout_secs);
    let requested = ids.len();
    let mut tasks = JoinSet::new();

    for id in ids {
        let fut = fetch(id.clone());
        tasks.spawn(async move {
            match tokio::time::timeout(timeout, fut).await {
                Ok(Ok(info)) => Some((id, info)),
                Ok(Err(err)) => {
                    warn!("metadata fetch for '{id}' failed: {err:#}");
                    None
                }
                Err(_) => {
                    warn!("metadata fetch for '{id}' timed out after {timeout:?}");
                    None
                }
            }
        });
    }

    let mut catalog = IngredientCatalog::new();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(Some((id, info))) => catalog.insert(&id, info),
            Ok(None) => {}
            Err(err) => warn!("metadata fetch task aborted: {err}"),
        }
    }

    debug!(
        "resolved {} of {} ingredient ids",
        catalog.len(),
        requested
    );
    catalog
}
