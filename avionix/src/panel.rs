// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Consumer side of the gauge panel.

use crate::topics;
use avionix_bus::{ConsumerSubject, EventBus, HandlerId};
use std::fmt;
use std::sync::Arc;

/// Fraction of capacity at or below which the fuel gauge reads as empty.
pub const EMPTY_FUEL_FRACTION: f64 = 0.0005;

/// Colour band of the fuel arc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FuelBand {
    /// At least 75 %.
    Full,
    /// At least 50 %.
    High,
    /// At least 30 %.
    Medium,
    /// At least 15 %.
    Low,
    Critical,
}

impl FuelBand {
    pub fn from_fraction(fraction: f64) -> Self {
        match fraction {
            f if f >= 0.75 => Self::Full,
            f if f >= 0.50 => Self::High,
            f if f >= 0.30 => Self::Medium,
            f if f >= 0.15 => Self::Low,
            _ => Self::Critical,
        }
    }

    /// Arc stroke colour as `#rrggbb`.
    pub fn color(self) -> &'static str {
        match self {
            Self::Full => "#00ff6a",
            Self::High => "#b4ff22",
            Self::Medium => "#ffc400",
            Self::Low => "#ff8200",
            Self::Critical => "#ff3232",
        }
    }

    /// Colour of the fuel text line.
    pub fn text_color(self) -> &'static str {
        match self {
            Self::Critical => "#ff9090",
            _ => "#9adfff",
        }
    }
}

impl fmt::Display for FuelBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.color())
    }
}

/// `total / capacity`, clamped to `[0, 1]`; capacities below 1 count as 1.
pub fn fuel_fraction(total: f64, capacity: f64) -> f64 {
    (total / capacity.max(1.0)).clamp(0.0, 1.0)
}

/// One consistent read of every gauge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelReadout {
    pub airspeed: f64,
    pub fuel_total: f64,
    pub fuel_capacity: f64,
    pub flaps_index: f64,
    pub flaps_percent: f64,
}

impl PanelReadout {
    pub fn fuel_fraction(&self) -> f64 {
        fuel_fraction(self.fuel_total, self.fuel_capacity)
    }

    pub fn fuel_band(&self) -> FuelBand {
        FuelBand::from_fraction(self.fuel_fraction())
    }

    pub fn fuel_is_empty(&self) -> bool {
        self.fuel_fraction() <= EMPTY_FUEL_FRACTION
    }

    /// Visible sweep of the 270 degree fuel arc.
    pub fn fuel_sweep_degrees(&self) -> f64 {
        270.0 * self.fuel_fraction()
    }
}

/// The gauge panel's subscriptions.
///
/// | topic | precision | default |
/// |-------|-----------|---------|
/// | `indicated_airspeed` | 0 | 0 |
/// | `fuel_total_gal` | 1 | 0 |
/// | `fuel_total_capacity` | 1 | 1 |
/// | `flaps_index` | 0 | 0 |
/// | `flaps_percent` | 0 | 0 |
#[derive(Debug)]
pub struct GaugePanel {
    pub airspeed: ConsumerSubject,
    pub fuel_total: ConsumerSubject,
    pub fuel_capacity: ConsumerSubject,
    pub flaps_index: ConsumerSubject,
    pub flaps_percent: ConsumerSubject,
}

impl GaugePanel {
    pub fn attach(bus: &EventBus) -> Self {
        let sub = bus.subscriber();
        Self {
            airspeed: ConsumerSubject::create(
                sub.on(topics::INDICATED_AIRSPEED).with_precision(0),
                0.0,
            ),
            fuel_total: ConsumerSubject::create(
                sub.on(topics::FUEL_TOTAL_GAL).with_precision(1),
                0.0,
            ),
            fuel_capacity: ConsumerSubject::create(
                sub.on(topics::FUEL_TOTAL_CAPACITY).with_precision(1),
                1.0,
            ),
            flaps_index: ConsumerSubject::create(
                sub.on(topics::FLAPS_INDEX).with_precision(0),
                0.0,
            ),
            flaps_percent: ConsumerSubject::create(
                sub.on(topics::FLAPS_PERCENT).with_precision(0),
                0.0,
            ),
        }
    }

    pub fn readout(&self) -> PanelReadout {
        PanelReadout {
            airspeed: self.airspeed.get(),
            fuel_total: self.fuel_total.get(),
            fuel_capacity: self.fuel_capacity.get(),
            flaps_index: self.flaps_index.get(),
            flaps_percent: self.flaps_percent.get(),
        }
    }

    pub fn fuel_fraction(&self) -> f64 {
        fuel_fraction(self.fuel_total.get(), self.fuel_capacity.get())
    }

    pub fn fuel_band(&self) -> FuelBand {
        FuelBand::from_fraction(self.fuel_fraction())
    }

    /// Call `handler` with the new fuel fraction whenever fuel total or capacity
    /// changes, and once immediately.
    ///
    /// Returns the handler ids on the total and capacity subjects.
    pub fn on_fuel_change<F>(&self, handler: F) -> (HandlerId, HandlerId)
    where
        F: Fn(f64) + Send + Sync + 'static,
    {
        let handler = Arc::new(handler);

        let on_total = {
            let handler = Arc::clone(&handler);
            let capacity = self.fuel_capacity.reader();
            move |value: f64| handler(fuel_fraction(value, capacity.get()))
        };
        let on_capacity = {
            let handler = Arc::clone(&handler);
            let total = self.fuel_total.reader();
            move |value: f64| handler(fuel_fraction(total.get(), value))
        };

        let total_id = self.fuel_total.sub(on_total, false);
        let capacity_id = self.fuel_capacity.sub(on_capacity, false);
        handler(self.fuel_fraction());
        (total_id, capacity_id)
    }

    /// Detach every subject.
    pub fn detach(&self) {
        self.airspeed.detach();
        self.fuel_total.detach();
        self.fuel_capacity.detach();
        self.flaps_index.detach();
        self.flaps_percent.detach();
    }
}
