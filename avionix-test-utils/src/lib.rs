// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities and fixtures for the avionix workspace.
//!
//! - [`log_capture`]: collect `tracing` events emitted while a closure runs, so tests
//!   can assert on the warnings the lenient code paths produce
//! - [`fixtures`]: configuration documents used across crates
//! - [`helpers`]: async assertions for change streams
//!
//! Intended for dev-dependencies only.

pub mod fixtures;
pub mod helpers;
pub mod log_capture;

pub use self::log_capture::{capture_logs, CapturedEvent, LogCapture};
