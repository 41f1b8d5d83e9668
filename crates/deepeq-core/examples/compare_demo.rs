//! Recursive comparison demonstration
//!
//! Run with `RUST_LOG=deepeq=trace` to see cycle and strategy events.
//!
//! Key concepts illustrated:
//! 1. Field-by-field comparison with precise paths
//! 2. Ignoring fields and registering custom equality
//! 3. Cyclic graphs
//! 4. Rendering and serializing the report

use std::cmp::Ordering;

use deepeq_core::logging_facility::{init, Profile};
use deepeq_core::{compare, ComparisonConfig, Record, StandardRepresentation, Value};

fn person(name: &str, height: f64, city: &str) -> Value {
    Record::builder("Person")
        .field("name", name)
        .field("height", height)
        .field(
            "address",
            Record::builder("Address").field("city", city).build(),
        )
        .field("tags", Value::seq(["jedi", "master"]))
        .build_value()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init(Profile::Development);
    let repr = StandardRepresentation::new();

    println!("=== deepeq Compare Demo ===\n");

    // ===== Part 1: Default comparison =====
    println!("## Part 1: Default comparison\n");
    let actual = person("Yoda", 0.66, "Coruscant");
    let expected = person("Yoda", 0.65, "Dagobah");
    let report = compare(&actual, &expected, &ComparisonConfig::default())?;
    println!("{}", report.render(&repr));

    // ===== Part 2: Ignoring fields and custom equality =====
    println!("## Part 2: Ignore address, tolerate height\n");
    let config = ComparisonConfig::builder()
        .ignore_fields(["address"])
        .with_comparator_for_type("f64", |a, e| {
            let (a, e) = (a.as_float().unwrap_or(0.0), e.as_float().unwrap_or(0.0));
            if (a - e).abs() < 0.05 {
                Ordering::Equal
            } else {
                a.total_cmp(&e)
            }
        })
        .build()?;
    let report = compare(&actual, &expected, &config)?;
    println!("{}\n", report.render(&repr));

    // ===== Part 3: Cycles =====
    println!("## Part 3: Cyclic graphs\n");
    let node = Record::builder("Node").field("name", "a").build();
    node.set_field("next", Value::Record(node.clone()));
    let other = Record::builder("Node").field("name", "b").build();
    other.set_field("next", Value::Record(other.clone()));
    let report = compare(
        &Value::Record(node),
        &Value::Record(other),
        &ComparisonConfig::default(),
    )?;
    println!("{}", report.render(&repr));

    // ===== Part 4: JSON summaries =====
    println!("## Part 4: JSON summaries\n");
    let report = compare(
        &Value::map([("a", 1)]),
        &Value::map([("a", 1), ("b", 2)]),
        &ComparisonConfig::default(),
    )?;
    println!("{}", serde_json::to_string_pretty(&report.to_json(&repr))?);

    Ok(())
}
