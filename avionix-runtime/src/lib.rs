// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Scheduling primitives for the avionix clocks.
//!
//! The state tick and the render tick both run on a [`RepeatingTask`] driven by a
//! [`Timer`]. The timer abstracts the runtime's sleep primitive so the engine is
//! not tied to a particular executor.

pub mod impls;
pub mod repeating_task;
pub mod timer;

#[cfg(feature = "runtime-tokio")]
pub use self::impls::tokio::TokioTimer;
pub use self::repeating_task::{RepeatingTask, MAX_PERIOD};
pub use self::timer::Timer;
