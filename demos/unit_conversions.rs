//! # Unit Conversion Example
//!
//! Walkthrough of the unit registry and converter: alias resolution,
//! combinability checks, merging quantities and best-unit formatting.

use courses::unit_convert::{combine, format_best, to_base};
use courses::unit_registry::unit_config;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("⚖️  Unit Conversion Example");
    println!("===========================\n");

    println!("📖 Example 1: Alias Resolution");
    println!("------------------------------");
    for spelling in ["kg", "Kilogrammes", "cuillère à soupe", "CS", "barquette"] {
        let definition = unit_config(spelling);
        println!(
            "  '{}' → {} ({:?}, ×{} {})",
            spelling, definition.name, definition.kind, definition.to_base, definition.base_symbol
        );
    }

    println!("\n📖 Example 2: Combining Quantities");
    println!("----------------------------------");
    let pairs = [
        (300.0, "g", 0.2, "kg"),
        (100.0, "ml", 2.0, "cs"),
        (200.0, "g", 3.0, "unités"),
    ];
    for (q1, u1, q2, u2) in pairs {
        match combine(q1, u1, q2, u2) {
            Some(merged) => println!(
                "  {} {} + {} {} = {} {}",
                q1, u1, q2, u2, merged.quantity, merged.unit
            ),
            None => println!(
                "  {} {} + {} {} → not combinable (kept as alternate quantity)",
                q1, u1, q2, u2
            ),
        }
    }

    println!("\n📖 Example 3: Best-Unit Formatting");
    println!("----------------------------------");
    for (magnitude, unit) in [
        (1000.0, "g"),
        (999.0, "g"),
        (1500.0, "ml"),
        (150.0, "ml"),
        (3.0, "sachet"),
        (2.0, "morceau"),
    ] {
        println!("  {} {} base → \"{}\"", magnitude, unit, format_best(magnitude, unit));
    }

    println!("\n📖 Example 4: Base Magnitudes");
    println!("-----------------------------");
    for (quantity, unit) in [(2.0, "tasses"), (3.0, "c. à café"), (1.5, "kg")] {
        println!("  {} {} = {} base units", quantity, unit, to_base(quantity, unit));
    }

    Ok(())
}
