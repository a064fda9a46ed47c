// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Configuration documents in the `simvars.json` wire format.

/// A single decrementing fuel variable.
pub const FUEL_ONLY_JSON: &str = r#"{
    "intervalMs": 1000,
    "variables": [
        { "name": "FUEL", "unit": "gallons", "initial": 40, "decrement": 0.01 }
    ]
}"#;

/// The five gauge variables, one per rule kind.
pub const GAUGE_PANEL_JSON: &str = r#"{
    "intervalMs": 1000,
    "variables": [
        { "name": "AIRSPEED INDICATED", "unit": "knots", "initial": 110,
          "randomWalk": { "min": 60, "max": 160, "step": 1.2 } },
        { "name": "FUEL TOTAL QUANTITY", "unit": "gallons", "initial": 40, "decrement": 0.01 },
        { "name": "FUEL TOTAL CAPACITY", "unit": "gallons", "initial": 50 },
        { "name": "FLAPS HANDLE INDEX", "unit": "number", "initial": 0,
          "cycle": { "count": 4, "probability": 0.01 } },
        { "name": "TRAILING EDGE FLAPS LEFT PERCENT", "unit": "percent", "initial": 0,
          "derivedFrom": "FLAPS HANDLE INDEX", "formula": "(base/3)*100" }
    ]
}"#;

/// Derived variable declared before its source.
pub const DERIVED_FIRST_JSON: &str = r#"{
    "intervalMs": 250,
    "variables": [
        { "name": "MIRROR", "initial": 0, "derivedFrom": "COUNTER" },
        { "name": "COUNTER", "initial": 0, "cycle": { "count": 100, "probability": 1.0 } }
    ]
}"#;

/// A config the loader must reject.
pub const MALFORMED_JSON: &str = r#"{ "intervalMs": 1000, "variables": [ { "name": "#;

/// [`FUEL_ONLY_JSON`] as TOML, with a 500 ms interval.
pub const FUEL_ONLY_TOML: &str = r#"
intervalMs = 500

[[variables]]
name = "FUEL"
unit = "gallons"
initial = 40
decrement = 0.01
"#;
