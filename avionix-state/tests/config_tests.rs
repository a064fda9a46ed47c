// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use avionix_state::config::MAX_INTERVAL_MS;
use avionix_state::{Configuration, Rule, VariableConfig};
use avionix_test_utils::capture_logs;
use avionix_test_utils::fixtures::{FUEL_ONLY_TOML, GAUGE_PANEL_JSON};
use std::time::Duration;

#[test]
fn test_gauge_panel_document_parses() -> anyhow::Result<()> {
    // Act
    let config = Configuration::from_json_str(GAUGE_PANEL_JSON)?;

    // Assert
    assert_eq!(config.interval(), Duration::from_millis(1000));
    let rules: Vec<_> = config.variables.iter().map(VariableConfig::to_rule).collect();
    assert_eq!(
        rules.iter().map(Rule::kind).collect::<Vec<_>>(),
        vec!["randomWalk", "decrement", "static", "cycle", "derived"]
    );
    assert_eq!(rules[4].source(), Some("FLAPS HANDLE INDEX"));
    Ok(())
}

#[test]
fn test_fallback_matches_gauge_panel_document() -> anyhow::Result<()> {
    let parsed = Configuration::from_json_str(GAUGE_PANEL_JSON)?;

    assert_eq!(Configuration::fallback(), parsed);
    Ok(())
}

#[test]
fn test_optional_fields_default() -> anyhow::Result<()> {
    let config = Configuration::from_json_str(r#"{ "variables": [ { "name": "BARE" } ] }"#)?;

    assert_eq!(config.interval_ms, 1000);
    let variable = &config.variables[0];
    assert_eq!(variable.unit, "");
    assert_eq!(variable.initial, 0.0);
    assert_eq!(variable.to_rule(), Rule::Static);
    Ok(())
}

#[test]
fn test_zero_interval_means_default() -> anyhow::Result<()> {
    let config = Configuration::from_json_str(r#"{ "intervalMs": 0, "variables": [] }"#)?;

    assert_eq!(config.interval(), Duration::from_millis(1000));
    Ok(())
}

#[test]
fn test_huge_interval_is_clamped() -> anyhow::Result<()> {
    let config = Configuration::from_json_str(&format!(
        r#"{{ "intervalMs": {}, "variables": [] }}"#,
        u64::MAX
    ))?;

    assert_eq!(config.interval_ms, u64::MAX);
    assert_eq!(config.interval(), Duration::from_millis(MAX_INTERVAL_MS));
    Ok(())
}

#[test]
fn test_cycle_without_count_means_one() -> anyhow::Result<()> {
    // Arrange
    let json = r#"{ "variables": [ { "name": "GEAR", "cycle": { "probability": 0.25 } } ] }"#;
    let toml = "[[variables]]\nname = \"GEAR\"\ncycle = { probability = 0.25 }\n";

    // Act
    let from_json = Configuration::from_json_str(json)?;
    let from_toml = Configuration::from_toml_str(toml)?;

    // Assert
    assert_eq!(from_json, from_toml);
    assert_eq!(from_json.variables[0].cycle.map(|c| c.count), Some(1));
    assert_eq!(from_json.variables[0].to_rule(), Rule::cyclic(1, 0.25));
    Ok(())
}

#[test]
fn test_missing_variables_is_rejected() {
    assert!(Configuration::from_json_str(r#"{ "intervalMs": 100 }"#).is_err());
}

#[test]
fn test_toml_document_parses() -> anyhow::Result<()> {
    let config = Configuration::from_toml_str(FUEL_ONLY_TOML)?;

    assert_eq!(config.interval(), Duration::from_millis(500));
    assert_eq!(config.variables[0].to_rule(), Rule::decrement(0.01));
    assert_eq!(config.variables[0].initial, 40.0);
    Ok(())
}

#[test]
fn test_behaviour_precedence_warns_once() {
    // Arrange
    let variable = VariableConfig::new("BUSY", "", 1.0)
        .with_cycle(3, 0.5)
        .with_decrement(0.1)
        .with_random_walk(0.0, 10.0, 1.0);

    // Act
    let (rule, logs) = capture_logs(|| variable.to_rule());

    // Assert
    assert_eq!(rule, Rule::random_walk(0.0, 10.0, 1.0));
    assert_eq!(logs.warning_count(), 1);
    assert!(logs.contains(tracing::Level::WARN, "BUSY"));
}

#[test]
fn test_derived_takes_precedence_over_everything() {
    let variable = VariableConfig::new("D", "", 0.0)
        .with_decrement(1.0)
        .derived_from("SRC", None);

    let (rule, _) = capture_logs(|| variable.to_rule());

    assert_eq!(rule, Rule::derived("SRC", None));
}

#[test]
fn test_formula_without_source_is_ignored_with_warning() {
    let mut variable = VariableConfig::new("LONELY", "", 2.0);
    variable.formula = Some("base * 2".to_string());

    let (rule, logs) = capture_logs(|| variable.to_rule());

    assert_eq!(rule, Rule::Static);
    assert!(logs.contains(tracing::Level::WARN, "formula without derivedFrom"));
}

#[test]
fn test_malformed_formula_is_reported_at_conversion() {
    let variable = VariableConfig::new("BROKEN", "", 0.0).derived_from("SRC", Some("base +"));

    let (rule, logs) = capture_logs(|| variable.to_rule());

    assert!(rule.is_derived());
    assert_eq!(logs.warning_count(), 1);
}

#[test]
fn test_variables_keep_declaration_order() {
    let config = Configuration::fallback();

    let keys: Vec<_> = config
        .to_variables()
        .iter()
        .map(|v| v.key().to_string())
        .collect();

    assert_eq!(
        keys,
        vec![
            "AIRSPEED INDICATED",
            "FUEL TOTAL QUANTITY",
            "FUEL TOTAL CAPACITY",
            "FLAPS HANDLE INDEX",
            "TRAILING EDGE FLAPS LEFT PERCENT",
        ]
    );
}

#[test]
fn test_serialisation_omits_absent_behaviours() -> anyhow::Result<()> {
    let config = Configuration::fallback();

    let json = serde_json::to_value(&config)?;

    let capacity = &json["variables"][2];
    assert_eq!(capacity["name"], "FUEL TOTAL CAPACITY");
    assert!(capacity.get("randomWalk").is_none());
    assert!(capacity.get("derivedFrom").is_none());
    assert_eq!(json["intervalMs"], 1000);
    Ok(())
}
