//! # Localization Module
//!
//! Fluent-backed user-facing strings: meal-slot labels and the placeholder
//! name shown for ingredients missing from the catalog. French is the
//! default locale, English is bundled as well. Resources are embedded in
//! the binary, so lookups never touch the filesystem and missing keys fall
//! back to a marker string instead of failing.

use anyhow::{anyhow, Result};
use fluent_bundle::{FluentArgs, FluentBundle, FluentResource, FluentValue};
use std::collections::HashMap;
use unic_langid::LanguageIdentifier;

use crate::menu_model::MealSlot;

/// Default locale of the application
pub const DEFAULT_LOCALE: &str = "fr";

const FR_RESOURCE: &str = include_str!("../locales/fr/main.ftl");
const EN_RESOURCE: &str = include_str!("../locales/en/main.ftl");

/// Localization manager holding one Fluent bundle per supported locale
pub struct LocalizationManager {
    bundles: HashMap<String, FluentBundle<FluentResource>>,
}

impl LocalizationManager {
    /// Create a manager with the embedded French and English bundles
    pub fn new() -> Result<Self> {
        let mut bundles = HashMap::new();
        for (locale, source) in [("fr", FR_RESOURCE), ("en", EN_RESOURCE)] {
            let langid: LanguageIdentifier = locale.parse()?;
            bundles.insert(locale.to_string(), Self::create_bundle(&langid, source)?);
        }
        Ok(Self { bundles })
    }

    fn create_bundle(
        locale: &LanguageIdentifier,
        source: &str,
    ) -> Result<FluentBundle<FluentResource>> {
        let mut bundle = FluentBundle::new(vec![locale.clone()]);
        // Plain-text output: the isolation marks Fluent inserts around
        // placeables would leak into shopping-list strings
        bundle.set_use_isolating(false);

        let resource = FluentResource::try_new(source.to_string())
            .map_err(|(_, errors)| anyhow!("Invalid fluent resource for {locale}: {errors:?}"))?;
        bundle
            .add_resource(resource)
            .map_err(|errors| anyhow!("Conflicting fluent messages for {locale}: {errors:?}"))?;
        Ok(bundle)
    }

    fn bundle(&self, locale: &str) -> &FluentBundle<FluentResource> {
        self.bundles
            .get(locale)
            .or_else(|| self.bundles.get(DEFAULT_LOCALE))
            .expect("default locale bundle is always present")
    }

    /// Get a localized message
    pub fn message(&self, locale: &str, key: &str) -> String {
        self.format(locale, key, None)
    }

    /// Get a localized message with named arguments
    pub fn message_with_args(&self, locale: &str, key: &str, args: &[(&str, &str)]) -> String {
        let fluent_args =
            FluentArgs::from_iter(args.iter().map(|(k, v)| (*k, FluentValue::from(*v))));
        self.format(locale, key, Some(&fluent_args))
    }

    fn format(&self, locale: &str, key: &str, args: Option<&FluentArgs>) -> String {
        let bundle = self.bundle(locale);

        let msg = match bundle.get_message(key) {
            Some(msg) => msg,
            None => return format!("Missing translation: {}", key),
        };
        let pattern = match msg.value() {
            Some(pattern) => pattern,
            None => return format!("Missing value for key: {}", key),
        };

        let mut value = String::new();
        let _ = bundle.write_pattern(&mut value, pattern, args, &mut vec![]);
        value
    }
}

/// The strings the aggregation engine needs, snapshotted out of the
/// localization manager so the engine stays a pure function of its inputs
#[derive(Debug, Clone, PartialEq)]
pub struct Labels {
    midday: String,
    evening: String,
    unknown_template: String,
}

impl Labels {
    /// Snapshot the engine labels for a locale
    pub fn for_locale(manager: &LocalizationManager, locale: &str) -> Self {
        Self {
            midday: manager.message(locale, "meal-midday"),
            evening: manager.message(locale, "meal-evening"),
            unknown_template: manager.message_with_args(
                locale,
                "unknown-ingredient",
                &[("id", "{}")],
            ),
        }
    }

    /// Label of a meal slot ("midi"/"soir" in the default locale)
    pub fn meal_slot(&self, slot: MealSlot) -> &str {
        match slot {
            MealSlot::Midday => &self.midday,
            MealSlot::Evening => &self.evening,
        }
    }

    /// Placeholder display name for an ingredient missing from the catalog
    pub fn unknown_ingredient(&self, ingredient_id: &str) -> String {
        self.unknown_template.replace("{}", ingredient_id)
    }
}

impl Default for Labels {
    /// The French product wording, usable without a manager
    fn default() -> Self {
        Self {
            midday: "midi".to_string(),
            evening: "soir".to_string(),
            unknown_template: "Ingrédient {}".to_string(),
        }
    }
}
