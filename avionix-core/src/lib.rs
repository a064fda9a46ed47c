// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! Core primitives shared by the avionix crates.
//!
//! - [`AvionixError`]: the error taxonomy of the telemetry engine
//! - [`CancellationToken`]: runtime-agnostic cooperative cancellation
//! - [`TickTask`]: a spawned background task that is cancelled on drop

pub mod cancellation_token;
pub mod error;
pub mod tick_task;

pub use self::cancellation_token::CancellationToken;
pub use self::error::{AvionixError, Result};
pub use self::tick_task::TickTask;
