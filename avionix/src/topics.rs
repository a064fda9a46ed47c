// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Topics the gauge panel instrument publishes.

/// Knots indicated.
pub const INDICATED_AIRSPEED: &str = "indicated_airspeed";
/// Usable fuel, gallons.
pub const FUEL_TOTAL_GAL: &str = "fuel_total_gal";
/// Fuel capacity, gallons.
pub const FUEL_TOTAL_CAPACITY: &str = "fuel_total_capacity";
/// Flaps handle detent.
pub const FLAPS_INDEX: &str = "flaps_index";
/// Trailing edge flaps, 0 to 100.
pub const FLAPS_PERCENT: &str = "flaps_percent";

pub const ALL: [&str; 5] = [
    INDICATED_AIRSPEED,
    FUEL_TOTAL_GAL,
    FUEL_TOTAL_CAPACITY,
    FLAPS_INDEX,
    FLAPS_PERCENT,
];
