//! # Unit Conversion Module
//!
//! Pure functions built on the unit registry: convert a (quantity, unit)
//! pair to its base-unit magnitude, decide whether two units are
//! combinable, sum combinable pairs, and format a base-unit magnitude back
//! into the most readable unit (1000 g collapses to 1 kg, 150 ml to 15 cl).
//!
//! None of these operations fail: unknown spellings degrade to count-style
//! behavior through the registry's lenient lookup.

use crate::unit_registry::{unit_config, UnitKind};
use log::debug;
use serde::{Deserialize, Serialize};

/// Result of merging two combinable quantities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedQuantity {
    /// Summed quantity, expressed in the scale of the first unit
    pub quantity: f64,
    /// Display unit: the first-seen spelling always wins
    pub unit: String,
}

/// Convert a quantity to its magnitude in the unit's base unit.
///
/// A pure scalar multiply by the registered conversion factor; count-style
/// and unknown units have factor 1.
pub fn to_base(quantity: f64, spelling: &str) -> f64 {
    quantity * unit_config(spelling).to_base
}

/// Whether two unit spellings can be summed directly: same measurement
/// kind and same base unit symbol.
pub fn can_combine(a: &str, b: &str) -> bool {
    let first = unit_config(a);
    let second = unit_config(b);
    first.kind == second.kind && first.base_symbol == second.base_symbol
}

/// Merge two quantities when their units are combinable.
///
/// Returns `None` when the units belong to different measurement kinds.
/// Otherwise both quantities are summed in base units and the total is
/// re-expressed in the first unit's scale, so the first-seen unit stays
/// the display unit of the merged total.
///
/// # Examples
///
/// ```rust
/// use courses::unit_convert::combine;
///
/// let merged = combine(300.0, "g", 0.2, "kg").unwrap();
/// assert_eq!(merged.quantity, 500.0);
/// assert_eq!(merged.unit, "g");
///
/// assert!(combine(200.0, "g", 3.0, "unités").is_none());
/// ```
pub fn combine(
    quantity1: f64,
    unit1: &str,
    quantity2: f64,
    unit2: &str,
) -> Option<CombinedQuantity> {
    if !can_combine(unit1, unit2) {
        debug!(
            "Cannot combine '{}' with '{}': incompatible units",
            unit1, unit2
        );
        return None;
    }
    let total_base = to_base(quantity1, unit1) + to_base(quantity2, unit2);
    Some(CombinedQuantity {
        quantity: total_base / unit_config(unit1).to_base,
        unit: unit1.trim().to_string(),
    })
}

/// Format a base-unit magnitude in the most readable unit of its kind.
///
/// The origin spelling only determines the measurement kind; the displayed
/// unit is chosen so the number stays at or above 1 where a larger unit
/// exists:
///
/// - Weight: magnitudes of 1000 g and more render in kg, below stays in g.
/// - Volume: 1000 ml and more render in l; multiples of 10 from 100 ml
///   render in cl; everything else stays in ml.
/// - Count and unmapped units: the raw quantity with the unit name,
///   pluralized when the quantity exceeds 1; an empty unit renders the
///   bare number.
///
/// # Examples
///
/// ```rust
/// use courses::unit_convert::format_best;
///
/// assert_eq!(format_best(1000.0, "g"), "1 kg");
/// assert_eq!(format_best(999.0, "g"), "999 g");
/// assert_eq!(format_best(150.0, "ml"), "15 cl");
/// assert_eq!(format_best(1500.0, "ml"), "1.5 l");
/// assert_eq!(format_best(3.0, "sachet"), "3 sachets");
/// ```
pub fn format_best(base_magnitude: f64, origin_spelling: &str) -> String {
    let definition = unit_config(origin_spelling);
    match definition.kind {
        UnitKind::Weight => {
            if base_magnitude >= 1000.0 {
                format!("{} kg", format_quantity(base_magnitude / 1000.0))
            } else {
                format!("{} g", format_quantity(base_magnitude))
            }
        }
        UnitKind::Volume => {
            if base_magnitude >= 1000.0 {
                format!("{} l", format_quantity(base_magnitude / 1000.0))
            } else if base_magnitude >= 100.0 && is_multiple_of_ten(base_magnitude) {
                format!("{} cl", format_quantity(base_magnitude / 10.0))
            } else {
                format!("{} ml", format_quantity(base_magnitude))
            }
        }
        UnitKind::Count => {
            let name = if base_magnitude > 1.0 {
                &definition.plural
            } else {
                &definition.name
            };
            if name.is_empty() {
                format_quantity(base_magnitude)
            } else {
                format!("{} {}", format_quantity(base_magnitude), name)
            }
        }
    }
}

/// Format a quantity with at most two decimal places, trailing zeros
/// trimmed and integers rendered without a decimal point.
pub fn format_quantity(quantity: f64) -> String {
    let rounded = (quantity * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        format!("{}", rounded)
    }
}

fn is_multiple_of_ten(magnitude: f64) -> bool {
    let tenth = magnitude / 10.0;
    (tenth - tenth.round()).abs() < 1e-9
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit_registry::recognized_spellings;

    #[test]
    fn test_to_base_scales_by_factor() {
        assert_eq!(to_base(2.0, "kg"), 2000.0);
        assert_eq!(to_base(3.0, "cl"), 30.0);
        assert_eq!(to_base(4.0, "sachets"), 4.0);
        assert_eq!(to_base(5.0, ""), 5.0);
    }

    #[test]
    fn test_to_base_is_linear() {
        for (a, b, unit) in [(3.0, 5.0, "g"), (0.25, 0.75, "l"), (2.0, 7.0, "tasse")] {
            let summed = to_base(a + b, unit);
            let parts = to_base(a, unit) + to_base(b, unit);
            assert!((summed - parts).abs() < 1e-9, "linearity broke for {unit}");
        }
    }

    #[test]
    fn test_can_combine_is_reflexive_for_all_recognized_units() {
        for spelling in recognized_spellings() {
            assert!(
                can_combine(spelling, spelling),
                "'{}' should combine with itself",
                spelling
            );
        }
    }

    #[test]
    fn test_can_combine_same_kind() {
        assert!(can_combine("g", "kg"));
        assert!(can_combine("ml", "cuillère à soupe"));
        assert!(can_combine("sachet", "boîte"));
        assert!(can_combine("", "unité"));
    }

    #[test]
    fn test_cannot_combine_across_kinds() {
        assert!(!can_combine("g", "ml"));
        assert!(!can_combine("kg", "unité"));
        assert!(!can_combine("l", "sachet"));
        assert!(!can_combine("g", ""));
    }

    #[test]
    fn test_combine_same_unit() {
        let merged = combine(3.0, "g", 5.0, "g").unwrap();
        assert_eq!(merged.quantity, 8.0);
        assert_eq!(merged.unit, "g");
    }

    #[test]
    fn test_combine_keeps_first_seen_unit() {
        let merged = combine(300.0, "g", 0.2, "kg").unwrap();
        assert_eq!(merged.quantity, 500.0);
        assert_eq!(merged.unit, "g");

        let reversed = combine(0.2, "kg", 300.0, "g").unwrap();
        assert!((reversed.quantity - 0.5).abs() < 1e-9);
        assert_eq!(reversed.unit, "kg");
    }

    #[test]
    fn test_combine_rejects_incompatible_units() {
        assert!(combine(200.0, "g", 3.0, "unités").is_none());
        assert!(combine(1.0, "l", 1.0, "kg").is_none());
    }

    #[test]
    fn test_combine_count_units_share_a_bucket() {
        let merged = combine(2.0, "sachets", 1.0, "boîte").unwrap();
        assert_eq!(merged.quantity, 3.0);
        assert_eq!(merged.unit, "sachets");
    }

    #[test]
    fn test_format_best_weight_boundaries() {
        assert_eq!(format_best(1000.0, "g"), "1 kg");
        assert_eq!(format_best(999.0, "g"), "999 g");
        assert_eq!(format_best(8.0, "g"), "8 g");
        assert_eq!(format_best(1500.0, "kg"), "1.5 kg");
        assert_eq!(format_best(2250.0, "g"), "2.25 kg");
    }

    #[test]
    fn test_format_best_volume_boundaries() {
        assert_eq!(format_best(1500.0, "ml"), "1.5 l");
        assert_eq!(format_best(1000.0, "ml"), "1 l");
        assert_eq!(format_best(150.0, "ml"), "15 cl");
        assert_eq!(format_best(999.0, "ml"), "999 ml");
        assert_eq!(format_best(105.0, "ml"), "105 ml");
        assert_eq!(format_best(90.0, "ml"), "90 ml");
    }

    #[test]
    fn test_format_best_counts_pluralize() {
        assert_eq!(format_best(1.0, "sachet"), "1 sachet");
        assert_eq!(format_best(3.0, "sachet"), "3 sachets");
        assert_eq!(format_best(2.0, "morceau"), "2 morceaux");
        assert_eq!(format_best(4.0, "barquette"), "4 barquettes");
        assert_eq!(format_best(3.0, ""), "3");
    }

    #[test]
    fn test_format_quantity_trims_decimals() {
        assert_eq!(format_quantity(8.0), "8");
        assert_eq!(format_quantity(1.5), "1.5");
        assert_eq!(format_quantity(1.25), "1.25");
        assert_eq!(format_quantity(1.999), "2");
        assert_eq!(format_quantity(0.333), "0.33");
    }

    #[test]
    fn test_round_trip_combine_then_format() {
        let merged = combine(3.0, "g", 5.0, "g").unwrap();
        assert_eq!(merged.quantity, 8.0);
        assert_eq!(format_best(to_base(merged.quantity, &merged.unit), &merged.unit), "8 g");
    }
}
