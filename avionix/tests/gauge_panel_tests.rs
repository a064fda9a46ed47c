// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use avionix::panel::fuel_fraction;
use avionix::prelude::*;
use avionix::topics;
use avionix::{PanelReadout, VariableStore};
use avionix_test_utils::helpers::assert_close;
use parking_lot::Mutex;
use std::sync::Arc;

fn readout(fuel_total: f64, fuel_capacity: f64) -> PanelReadout {
    PanelReadout {
        airspeed: 0.0,
        fuel_total,
        fuel_capacity,
        flaps_index: 0.0,
        flaps_percent: 0.0,
    }
}

#[test]
fn test_fuel_band_thresholds() {
    assert_eq!(FuelBand::from_fraction(1.0), FuelBand::Full);
    assert_eq!(FuelBand::from_fraction(0.75), FuelBand::Full);
    assert_eq!(FuelBand::from_fraction(0.7499), FuelBand::High);
    assert_eq!(FuelBand::from_fraction(0.5), FuelBand::High);
    assert_eq!(FuelBand::from_fraction(0.3), FuelBand::Medium);
    assert_eq!(FuelBand::from_fraction(0.15), FuelBand::Low);
    assert_eq!(FuelBand::from_fraction(0.1), FuelBand::Critical);

    assert_eq!(FuelBand::Full.color(), "#00ff6a");
    assert_eq!(FuelBand::Critical.to_string(), "#ff3232");
    assert_eq!(FuelBand::Critical.text_color(), "#ff9090");
    assert_eq!(FuelBand::Low.text_color(), "#9adfff");
}

#[test]
fn test_fuel_fraction_is_clamped() {
    assert_eq!(fuel_fraction(40.0, 50.0), 0.8);
    assert_eq!(fuel_fraction(60.0, 50.0), 1.0);
    assert_eq!(fuel_fraction(-1.0, 50.0), 0.0);
    assert_eq!(fuel_fraction(0.5, 0.0), 0.5);
}

#[test]
fn test_readout_geometry() {
    let full = readout(50.0, 50.0);
    let empty = readout(0.0, 50.0);

    assert_eq!(full.fuel_sweep_degrees(), 270.0);
    assert!(!full.fuel_is_empty());
    assert!(empty.fuel_is_empty());
    assert_eq!(empty.fuel_band(), FuelBand::Critical);
}

#[test]
fn test_panel_defaults_before_any_publish() {
    let bus = EventBus::new();

    let panel = GaugePanel::attach(&bus);

    assert_eq!(panel.readout(), readout(0.0, 1.0));
    for topic in topics::ALL {
        assert_eq!(bus.subscriber_count(topic), 1);
    }
}

#[test]
fn test_panel_rounds_to_its_precisions() {
    // Arrange
    let bus = EventBus::new();
    let panel = GaugePanel::attach(&bus);

    // Act
    bus.publish(topics::INDICATED_AIRSPEED, 110.49);
    bus.publish(topics::FUEL_TOTAL_GAL, 39.96);
    bus.publish(topics::FUEL_TOTAL_CAPACITY, 50.0);
    bus.publish(topics::FLAPS_INDEX, 2.0);
    bus.publish(topics::FLAPS_PERCENT, 66.666);

    // Assert
    let readout = panel.readout();
    assert_eq!(readout.airspeed, 110.0);
    assert_eq!(readout.fuel_total, 40.0);
    assert_eq!(readout.flaps_index, 2.0);
    assert_eq!(readout.flaps_percent, 67.0);
    assert_eq!(panel.fuel_band(), FuelBand::Full);
}

#[test]
fn test_fuel_change_handler_tracks_both_subjects() {
    // Arrange
    let bus = EventBus::new();
    let panel = GaugePanel::attach(&bus);
    let fractions = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&fractions);

    // Act
    panel.on_fuel_change(move |fraction| sink.lock().push(fraction));
    bus.publish(topics::FUEL_TOTAL_CAPACITY, 50.0);
    bus.publish(topics::FUEL_TOTAL_GAL, 25.0);
    bus.publish(topics::FUEL_TOTAL_GAL, 25.01);

    // Assert
    let fractions = fractions.lock();
    assert_eq!(fractions.len(), 3);
    assert_eq!(fractions[0], 0.0);
    assert_eq!(fractions[1], 0.0);
    assert_close(fractions[2], 0.5, 1e-12);
}

#[test]
fn test_detached_panel_ignores_publishes() {
    let bus = EventBus::new();
    let panel = GaugePanel::attach(&bus);

    panel.detach();
    bus.publish(topics::FLAPS_INDEX, 3.0);

    assert_eq!(panel.flaps_index.get(), 0.0);
    assert_eq!(bus.subscriber_count(topics::FLAPS_INDEX), 0);
}

#[test]
fn test_panel_over_seeded_engine() {
    // Arrange
    let bus = EventBus::new();
    let panel = GaugePanel::attach(&bus);
    let engine = Arc::new(StateEngine::with_store(
        &Configuration::fallback(),
        VariableStore::with_seed(5),
    ));
    let instrument = Instrument::new(bus.clone(), Arc::clone(&engine));

    // Act
    for _ in 0..100 {
        engine.tick();
    }
    instrument.update();

    // Assert
    let readout = panel.readout();
    assert_eq!(readout.fuel_total, 39.0);
    assert_eq!(readout.fuel_capacity, 50.0);
    assert_eq!(readout.fuel_band(), FuelBand::Full);
    assert!((60.0..=160.0).contains(&readout.airspeed));
    assert_eq!(
        readout.flaps_percent,
        avionix::round_to((readout.flaps_index / 3.0) * 100.0, 0)
    );
}
