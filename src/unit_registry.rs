//! # Unit Registry Module
//!
//! Static table mapping unit spellings (and their aliases, English and
//! French) to a semantic definition: measurement kind, canonical base unit
//! and conversion factor. Lookup is case- and whitespace-insensitive and
//! never fails: an unrecognized or empty spelling degrades to a count-style
//! definition with factor 1 so user-entered free-text units still produce a
//! usable shopping list.

use lazy_static::lazy_static;
use log::trace;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;

/// The three measurement kinds. Quantities can only be summed directly
/// within the same kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitKind {
    /// Mass, based in grams
    Weight,
    /// Liquid volume, based in milliliters
    Volume,
    /// Discrete pieces, sachets, bunches and anything unrecognized
    Count,
}

impl UnitKind {
    /// Symbol of the base unit all units of this kind convert through
    pub fn base_symbol(&self) -> &'static str {
        match self {
            UnitKind::Weight => "g",
            UnitKind::Volume => "ml",
            UnitKind::Count => "unité",
        }
    }
}

/// Resolved definition for a unit spelling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitDefinition {
    /// Canonical singular display name (e.g. "kg", "cuillère à soupe")
    pub name: String,
    /// Plural display name, used when the displayed quantity exceeds 1
    pub plural: String,
    /// Measurement kind of the unit
    pub kind: UnitKind,
    /// Base unit symbol shared by every unit of the same kind
    pub base_symbol: String,
    /// Multiplier converting a quantity in this unit to the base unit
    pub to_base: f64,
}

/// One registered unit with its alias spellings
struct UnitSpec {
    name: &'static str,
    plural: &'static str,
    kind: UnitKind,
    factor: f64,
    aliases: &'static [&'static str],
}

// Registered vocabulary. Aliases must be in normalized form (lowercase,
// single spaces). Every alias of a real-world unit shares one definition.
const UNIT_SPECS: &[UnitSpec] = &[
    // Weight units, based in grams
    UnitSpec {
        name: "mg",
        plural: "mg",
        kind: UnitKind::Weight,
        factor: 0.001,
        aliases: &["milligramme", "milligrammes", "milligram", "milligrams"],
    },
    UnitSpec {
        name: "g",
        plural: "g",
        kind: UnitKind::Weight,
        factor: 1.0,
        aliases: &["gr", "gramme", "grammes", "gram", "grams"],
    },
    UnitSpec {
        name: "kg",
        plural: "kg",
        kind: UnitKind::Weight,
        factor: 1000.0,
        aliases: &[
            "kilo",
            "kilos",
            "kilogramme",
            "kilogrammes",
            "kilogram",
            "kilograms",
        ],
    },
    UnitSpec {
        name: "oz",
        plural: "oz",
        kind: UnitKind::Weight,
        factor: 28.35,
        aliases: &["ounce", "ounces"],
    },
    UnitSpec {
        name: "lb",
        plural: "lb",
        kind: UnitKind::Weight,
        factor: 453.6,
        aliases: &["lbs", "pound", "pounds", "livre", "livres"],
    },
    // Volume units, based in milliliters
    UnitSpec {
        name: "ml",
        plural: "ml",
        kind: UnitKind::Volume,
        factor: 1.0,
        aliases: &["millilitre", "millilitres", "milliliter", "milliliters"],
    },
    UnitSpec {
        name: "cl",
        plural: "cl",
        kind: UnitKind::Volume,
        factor: 10.0,
        aliases: &["centilitre", "centilitres"],
    },
    UnitSpec {
        name: "dl",
        plural: "dl",
        kind: UnitKind::Volume,
        factor: 100.0,
        aliases: &["décilitre", "décilitres", "decilitre", "decilitres"],
    },
    UnitSpec {
        name: "l",
        plural: "l",
        kind: UnitKind::Volume,
        factor: 1000.0,
        aliases: &["litre", "litres", "liter", "liters"],
    },
    UnitSpec {
        name: "cuillère à café",
        plural: "cuillères à café",
        kind: UnitKind::Volume,
        factor: 5.0,
        aliases: &[
            "cuillères à café",
            "cuillere a cafe",
            "cuilleres a cafe",
            "c. à café",
            "cc",
            "tsp",
            "tsp.",
            "teaspoon",
            "teaspoons",
        ],
    },
    UnitSpec {
        name: "cuillère à soupe",
        plural: "cuillères à soupe",
        kind: UnitKind::Volume,
        factor: 15.0,
        aliases: &[
            "cuillères à soupe",
            "cuillere a soupe",
            "cuilleres a soupe",
            "c. à soupe",
            "cs",
            "cas",
            "tbsp",
            "tbsp.",
            "tablespoon",
            "tablespoons",
        ],
    },
    UnitSpec {
        name: "tasse",
        plural: "tasses",
        kind: UnitKind::Volume,
        factor: 250.0,
        aliases: &["tasses", "cup", "cups"],
    },
    UnitSpec {
        name: "verre",
        plural: "verres",
        kind: UnitKind::Volume,
        factor: 200.0,
        aliases: &["verres"],
    },
    // Count units, factor 1 and a shared base so they stay summable
    UnitSpec {
        name: "unité",
        plural: "unités",
        kind: UnitKind::Count,
        factor: 1.0,
        aliases: &["unités", "unite", "unites", "unit", "units"],
    },
    UnitSpec {
        name: "pièce",
        plural: "pièces",
        kind: UnitKind::Count,
        factor: 1.0,
        aliases: &["pièces", "piece", "pieces"],
    },
    UnitSpec {
        name: "sachet",
        plural: "sachets",
        kind: UnitKind::Count,
        factor: 1.0,
        aliases: &["sachets"],
    },
    UnitSpec {
        name: "paquet",
        plural: "paquets",
        kind: UnitKind::Count,
        factor: 1.0,
        aliases: &["paquets"],
    },
    UnitSpec {
        name: "boîte",
        plural: "boîtes",
        kind: UnitKind::Count,
        factor: 1.0,
        aliases: &["boîtes", "boite", "boites"],
    },
    UnitSpec {
        name: "conserve",
        plural: "conserves",
        kind: UnitKind::Count,
        factor: 1.0,
        aliases: &["conserves"],
    },
    UnitSpec {
        name: "tranche",
        plural: "tranches",
        kind: UnitKind::Count,
        factor: 1.0,
        aliases: &["tranches", "slice", "slices"],
    },
    UnitSpec {
        name: "morceau",
        plural: "morceaux",
        kind: UnitKind::Count,
        factor: 1.0,
        aliases: &["morceaux"],
    },
    UnitSpec {
        name: "gousse",
        plural: "gousses",
        kind: UnitKind::Count,
        factor: 1.0,
        aliases: &["gousses"],
    },
    UnitSpec {
        name: "brin",
        plural: "brins",
        kind: UnitKind::Count,
        factor: 1.0,
        aliases: &["brins"],
    },
    UnitSpec {
        name: "feuille",
        plural: "feuilles",
        kind: UnitKind::Count,
        factor: 1.0,
        aliases: &["feuilles"],
    },
    UnitSpec {
        name: "bouquet",
        plural: "bouquets",
        kind: UnitKind::Count,
        factor: 1.0,
        aliases: &["bouquets"],
    },
    UnitSpec {
        name: "pincée",
        plural: "pincées",
        kind: UnitKind::Count,
        factor: 1.0,
        aliases: &["pincées", "pincee", "pincees", "pinch", "pinches"],
    },
    UnitSpec {
        name: "poignée",
        plural: "poignées",
        kind: UnitKind::Count,
        factor: 1.0,
        aliases: &["poignées", "poignee", "poignees", "handful", "handfuls"],
    },
    UnitSpec {
        name: "botte",
        plural: "bottes",
        kind: UnitKind::Count,
        factor: 1.0,
        aliases: &["bottes"],
    },
];

/// Alias table resolved once at first use
static UNIT_TABLE: LazyLock<HashMap<&'static str, UnitDefinition>> = LazyLock::new(|| {
    let mut map = HashMap::new();
    for spec in UNIT_SPECS {
        let definition = UnitDefinition {
            name: spec.name.to_string(),
            plural: spec.plural.to_string(),
            kind: spec.kind,
            base_symbol: spec.kind.base_symbol().to_string(),
            to_base: spec.factor,
        };
        map.insert(spec.name, definition.clone());
        for alias in spec.aliases {
            map.insert(*alias, definition.clone());
        }
    }
    map
});

// Lazy static regex for whitespace normalization to avoid recompilation
lazy_static! {
    static ref WHITESPACE_RUN: Regex =
        Regex::new(r"\s+").expect("Whitespace pattern should be valid");
}

/// Normalize a unit spelling for lookup: trim, lowercase and collapse
/// internal whitespace runs to a single space.
pub fn normalize_spelling(spelling: &str) -> String {
    WHITESPACE_RUN
        .replace_all(spelling.trim(), " ")
        .to_lowercase()
}

/// Resolve a unit spelling to its definition.
///
/// Recognized spellings (and their aliases) return the registered
/// definition. Anything else, including the empty string, resolves to a
/// count-style definition with factor 1 whose display name is the cleaned
/// spelling itself. No spelling is ever rejected.
///
/// # Examples
///
/// ```rust
/// use courses::unit_registry::{unit_config, UnitKind};
///
/// let kg = unit_config("Kilogrammes");
/// assert_eq!(kg.name, "kg");
/// assert_eq!(kg.to_base, 1000.0);
///
/// let mystery = unit_config("barquette");
/// assert_eq!(mystery.kind, UnitKind::Count);
/// assert_eq!(mystery.to_base, 1.0);
/// ```
pub fn unit_config(spelling: &str) -> UnitDefinition {
    let key = normalize_spelling(spelling);
    if let Some(definition) = UNIT_TABLE.get(key.as_str()) {
        return definition.clone();
    }
    trace!("Unrecognized unit spelling '{}', treating as count", spelling);
    UnitDefinition {
        plural: pluralize(&key),
        name: key,
        kind: UnitKind::Count,
        base_symbol: UnitKind::Count.base_symbol().to_string(),
        to_base: 1.0,
    }
}

/// Whether a spelling is present in the registered vocabulary
pub fn is_recognized(spelling: &str) -> bool {
    UNIT_TABLE.contains_key(normalize_spelling(spelling).as_str())
}

/// Every spelling the registry recognizes, canonical names and aliases alike
pub fn recognized_spellings() -> Vec<&'static str> {
    let mut spellings: Vec<&'static str> = UNIT_TABLE.keys().copied().collect();
    spellings.sort_unstable();
    spellings
}

/// Simple French-aware pluralization for synthesized count units:
/// trailing `s` and `x` stay unchanged, `eau`/`eu` endings take an `x`,
/// everything else appends an `s`.
fn pluralize(name: &str) -> String {
    if name.is_empty() || name.ends_with('s') || name.ends_with('x') {
        name.to_string()
    } else if name.ends_with("eau") || name.ends_with("eu") {
        format!("{name}x")
    } else {
        format!("{name}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases_share_identical_definition() {
        let groups = [
            vec!["kg", "kilogramme", "kilogrammes", "kilo", "KG", " kg "],
            vec!["g", "gramme", "grammes", "gr"],
            vec!["ml", "millilitre", "millilitres"],
            vec!["cuillère à soupe", "cuillères à soupe", "cs", "tbsp"],
            vec!["boîte", "boite", "boîtes"],
        ];

        for group in groups {
            let reference = unit_config(group[0]);
            for spelling in &group {
                assert_eq!(
                    unit_config(spelling),
                    reference,
                    "alias '{}' diverged from '{}'",
                    spelling,
                    group[0]
                );
            }
        }
    }

    #[test]
    fn test_same_kind_shares_base_symbol() {
        for spelling in recognized_spellings() {
            let definition = unit_config(spelling);
            assert_eq!(
                definition.base_symbol,
                definition.kind.base_symbol(),
                "'{}' does not use its kind's base unit",
                spelling
            );
            assert!(definition.to_base > 0.0);
        }
    }

    #[test]
    fn test_unknown_spelling_degrades_to_count() {
        for spelling in ["barquette", "pot", "zarbe", "  Grosse Louche  "] {
            let definition = unit_config(spelling);
            assert_eq!(definition.kind, UnitKind::Count);
            assert_eq!(definition.to_base, 1.0);
        }
    }

    #[test]
    fn test_empty_spelling_is_bare_count() {
        let definition = unit_config("");
        assert_eq!(definition.kind, UnitKind::Count);
        assert_eq!(definition.name, "");
        assert_eq!(definition.plural, "");
    }

    #[test]
    fn test_normalization_folds_case_and_whitespace() {
        assert_eq!(normalize_spelling("  Cuillère   à  Soupe "), "cuillère à soupe");
        assert_eq!(
            unit_config("  Cuillère   à  Soupe "),
            unit_config("cuillère à soupe")
        );
    }

    #[test]
    fn test_french_pluralization_of_unknown_units() {
        assert_eq!(unit_config("barquette").plural, "barquettes");
        assert_eq!(unit_config("seau").plural, "seaux");
        assert_eq!(unit_config("pois").plural, "pois");
        assert_eq!(unit_config("rouleaux").plural, "rouleaux");
    }

    #[test]
    fn test_volume_factors() {
        assert_eq!(unit_config("cl").to_base, 10.0);
        assert_eq!(unit_config("dl").to_base, 100.0);
        assert_eq!(unit_config("litre").to_base, 1000.0);
        assert_eq!(unit_config("cuillère à café").to_base, 5.0);
        assert_eq!(unit_config("tasse").to_base, 250.0);
    }

    #[test]
    fn test_is_recognized() {
        assert!(is_recognized("kg"));
        assert!(is_recognized("Cuillères à Soupe"));
        assert!(!is_recognized("barquette"));
        assert!(!is_recognized(""));
    }
}
