// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use avionix::instrument::{panel_bindings, Binding};
use avionix::prelude::*;
use avionix::{topics, VariableStore};
use avionix_test_utils::fixtures::FUEL_ONLY_JSON;
use avionix_test_utils::helpers::{assert_no_element_emitted, next_within};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

fn seeded_engine(config: &Configuration) -> Arc<StateEngine> {
    Arc::new(StateEngine::with_store(config, VariableStore::with_seed(9)))
}

#[test]
fn test_update_publishes_every_panel_topic() {
    // Arrange
    let bus = EventBus::new();
    let engine = seeded_engine(&Configuration::fallback());
    let instrument = Instrument::new(bus.clone(), engine);

    // Act
    instrument.update();

    // Assert
    assert_eq!(bus.raw_value(topics::INDICATED_AIRSPEED), Some(110.0));
    assert_eq!(bus.raw_value(topics::FUEL_TOTAL_GAL), Some(40.0));
    assert_eq!(bus.raw_value(topics::FUEL_TOTAL_CAPACITY), Some(50.0));
    assert_eq!(bus.raw_value(topics::FLAPS_INDEX), Some(0.0));
    assert_eq!(bus.raw_value(topics::FLAPS_PERCENT), Some(0.0));
    assert_eq!(instrument.bindings(), panel_bindings().as_slice());
}

#[test]
fn test_custom_bindings() -> anyhow::Result<()> {
    let bus = EventBus::new();
    let engine = seeded_engine(&Configuration::from_json_str(FUEL_ONLY_JSON)?);
    let instrument = Instrument::with_bindings(
        bus.clone(),
        engine,
        vec![
            Binding::new("fuel", "FUEL"),
            Binding::new("missing", "NOT CONFIGURED"),
        ],
    );

    instrument.update();

    assert_eq!(bus.raw_value("fuel"), Some(40.0));
    assert_eq!(bus.raw_value("missing"), Some(0.0));
    assert_eq!(bus.topics(), vec!["fuel", "missing"]);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_two_clocks_end_to_end() -> anyhow::Result<()> {
    // Arrange
    let bus = EventBus::new();
    let engine = seeded_engine(&Configuration::from_json_str(FUEL_ONLY_JSON)?);
    let instrument = Instrument::with_bindings(
        bus.clone(),
        Arc::clone(&engine),
        vec![Binding::new(topics::FUEL_TOTAL_GAL, "FUEL")],
    );
    let fuel = bus.subscribe_with_precision(topics::FUEL_TOTAL_GAL, 2, 0.0);
    let mut changes = fuel.changes()?;

    // Act
    engine.start(TokioTimer);
    instrument.start(TokioTimer, Duration::from_millis(30));

    // Assert
    assert_eq!(next_within(&mut changes, 100).await, Some(40.0));
    assert_no_element_emitted(&mut changes, 800).await;
    assert_eq!(next_within(&mut changes, 300).await, Some(39.99));
    assert_eq!(next_within(&mut changes, 1100).await, Some(39.98));

    instrument.stop();
    engine.stop();
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_instrument_start_and_stop() -> anyhow::Result<()> {
    // Arrange
    let bus = EventBus::new();
    let engine = seeded_engine(&Configuration::from_json_str(FUEL_ONLY_JSON)?);
    let instrument = Instrument::with_bindings(
        bus.clone(),
        Arc::clone(&engine),
        vec![Binding::new("fuel", "FUEL")],
    );
    let fuel = bus.subscribe("fuel", 2, 40.0, false);
    let mut changes = fuel.changes()?;

    // Act
    assert!(instrument.start(TokioTimer, Duration::from_millis(10)));
    assert!(!instrument.start(TokioTimer, Duration::from_millis(10)));
    sleep(Duration::from_millis(25)).await;
    assert!(instrument.stop());
    assert!(!instrument.stop());
    engine.force_set("FUEL", 12.0);
    sleep(Duration::from_millis(100)).await;

    // Assert
    assert!(!instrument.is_running());
    assert_eq!(bus.raw_value("fuel"), Some(40.0));
    assert_no_element_emitted(&mut changes, 50).await;
    Ok(())
}
