// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::config::Configuration;
use crate::store::{SharedStore, ValueSource, VariableStore};
use avionix_core::AvionixError;
use avionix_runtime::{RepeatingTask, Timer};
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Advances a [`VariableStore`] on a fixed interval.
///
/// Every tick applies each variable's rule once, in plan order: non-derived variables
/// in declaration order, then derived variables in declaration order. A derived
/// variable therefore sees its source's value from the same tick, unless the source
/// is itself derived and declared later, in which case it sees the previous tick.
///
/// The whole plan runs under a single store lock, so readers never observe a
/// partially applied tick.
///
/// # Example
///
/// ```rust
/// use avionix_runtime::TokioTimer;
/// use avionix_state::{Configuration, StateEngine};
///
/// # #[tokio::main]
/// # async fn main() {
/// let engine = StateEngine::new(&Configuration::fallback());
/// assert!(engine.start(TokioTimer));
/// assert!(!engine.start(TokioTimer));
///
/// engine.stop();
/// assert!(!engine.is_running());
/// # }
/// ```
#[derive(Debug)]
pub struct StateEngine {
    store: SharedStore,
    plan: Arc<Vec<String>>,
    interval: Duration,
    ticks: Arc<AtomicU64>,
    task: Mutex<Option<RepeatingTask>>,
}

impl StateEngine {
    /// Seed a fresh store from `config`.
    pub fn new(config: &Configuration) -> Self {
        Self::with_store(config, VariableStore::new())
    }

    /// Seed `store` from `config`.
    ///
    /// Entries already present in `store` keep their value and rule but are still
    /// ticked if `config` names them.
    pub fn with_store(config: &Configuration, store: VariableStore) -> Self {
        let store = SharedStore::new(store);
        let plan = {
            let mut guard = store.lock();
            let mut declared = Vec::with_capacity(config.variables.len());
            let mut seen = HashSet::new();

            for variable in config.to_variables() {
                let key = variable.key().to_string();
                if !seen.insert(key.clone()) {
                    warn!(variable = %key, "duplicate definition ignored");
                    continue;
                }
                guard.seed_variable(variable);
                declared.push(key);
            }

            let (mut plan, derived): (Vec<String>, Vec<String>) = declared
                .into_iter()
                .partition(|key| !guard.rule(key).is_some_and(|rule| rule.is_derived()));

            for key in &derived {
                if let Some(source) = guard.rule(key).and_then(|rule| rule.source()) {
                    if !guard.contains(source) {
                        let error = AvionixError::missing_dependency(key.as_str(), source);
                        warn!(%error, "derived variable will keep its initial value");
                    }
                }
            }

            plan.extend(derived);
            plan
        };

        info!(
            variables = plan.len(),
            interval_ms = config.interval().as_millis() as u64,
            "state engine configured"
        );

        Self {
            store,
            plan: Arc::new(plan),
            interval: config.interval(),
            ticks: Arc::new(AtomicU64::new(0)),
            task: Mutex::new(None),
        }
    }

    /// Apply one tick immediately, independent of the scheduler.
    pub fn tick(&self) {
        run_tick(&self.store, &self.plan, &self.ticks);
    }

    /// Start ticking on `timer` at the configured interval.
    ///
    /// Returns `false` without doing anything if the engine is already running.
    /// Requires a running Tokio runtime.
    pub fn start<T: Timer>(&self, timer: T) -> bool {
        let mut task = self.task.lock();
        if task.is_some() {
            return false;
        }

        let store = self.store.clone();
        let plan = Arc::clone(&self.plan);
        let ticks = Arc::clone(&self.ticks);
        *task = Some(RepeatingTask::spawn(timer, self.interval, move || {
            run_tick(&store, &plan, &ticks);
        }));

        info!(interval_ms = self.interval.as_millis() as u64, "state engine started");
        true
    }

    /// Stop ticking. Returns `true` if the engine was running.
    pub fn stop(&self) -> bool {
        match self.task.lock().take() {
            Some(task) => {
                task.cancel();
                info!(ticks = self.tick_count(), "state engine stopped");
                true
            }
            None => false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.task.lock().is_some()
    }

    /// Current value of `name`, `0.0` if unknown.
    pub fn get_value(&self, name: &str) -> f64 {
        self.store.get_value(name)
    }

    /// Overwrite `name` directly; the next tick continues from the forced value.
    pub fn force_set(&self, name: &str, value: f64) {
        self.store.force_set(name, value);
    }

    pub fn snapshot(&self) -> BTreeMap<String, f64> {
        self.store.snapshot()
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Number of ticks applied so far, manual and scheduled.
    pub fn tick_count(&self) -> u64 {
        self.ticks.load(Ordering::Acquire)
    }

    /// Keys in the order they are applied each tick.
    pub fn plan(&self) -> &[String] {
        &self.plan
    }
}

impl ValueSource for StateEngine {
    fn get_value(&self, name: &str) -> f64 {
        self.store.get_value(name)
    }
}

impl Drop for StateEngine {
    fn drop(&mut self) {
        if let Some(task) = self.task.get_mut().take() {
            task.cancel();
        }
    }
}

fn run_tick(store: &SharedStore, plan: &[String], ticks: &AtomicU64) {
    let mut guard = store.lock();
    for key in plan {
        guard.apply_rule(key);
    }
    drop(guard);

    let tick = ticks.fetch_add(1, Ordering::AcqRel) + 1;
    debug!(tick, variables = plan.len(), "state tick applied");
}
