// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Name-keyed variable values and their per-tick evolution.

use crate::variable::{normalize_key, Rule, Variable};
use avionix_core::{AvionixError, Result};
use avionix_expr::FormulaInputs;
use parking_lot::{Mutex, MutexGuard};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::{debug, warn};

/// Numeric handle returned by [`VariableStore::register`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(pub u32);

/// Read access to current variable values.
///
/// This is the surface producers use on their render clock; implementations never
/// fail and return `0.0` for unknown names.
pub trait ValueSource: Send + Sync {
    fn get_value(&self, name: &str) -> f64;
}

/// Owns every variable's value, unit and rule.
///
/// Keys are upper-cased names. Randomness for the random-walk and cyclic rules comes
/// from a store-owned generator so that a seeded store is fully deterministic.
#[derive(Debug)]
pub struct VariableStore {
    variables: BTreeMap<String, Variable>,
    registered: HashMap<String, VarId>,
    registry: Vec<String>,
    rng: StdRng,
}

impl VariableStore {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// A store whose random rules replay identically for the same seed.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            variables: BTreeMap::new(),
            registered: HashMap::new(),
            registry: Vec::new(),
            rng,
        }
    }

    /// Create a static variable unless one with the same name already exists.
    ///
    /// Returns `true` if the entry was created.
    pub fn seed(&mut self, name: &str, unit: &str, initial: f64) -> bool {
        self.seed_variable(Variable::fixed(name, unit, initial))
    }

    /// Insert `variable` with its rule unless the key is already present.
    ///
    /// Existing entries are left untouched, value and rule alike.
    pub fn seed_variable(&mut self, variable: Variable) -> bool {
        if self.variables.contains_key(variable.key()) {
            return false;
        }
        self.variables.insert(variable.key().to_string(), variable);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(&normalize_key(name))
    }

    /// Current value, or `0.0` with a warning when `name` is unknown.
    pub fn get(&self, name: &str) -> f64 {
        self.try_get(name).unwrap_or_else(|error| {
            warn!(%error, "unknown variable requested, returning 0");
            0.0
        })
    }

    /// # Errors
    /// [`AvionixError::UnknownVariable`] when `name` is not in the store.
    pub fn try_get(&self, name: &str) -> Result<f64> {
        let key = normalize_key(name);
        self.variables
            .get(&key)
            .map(Variable::value)
            .ok_or(AvionixError::UnknownVariable { name: key })
    }

    /// Overwrite the value of `name`, creating a static entry if it does not exist.
    pub fn set(&mut self, name: &str, value: f64) {
        match self.variables.get_mut(&normalize_key(name)) {
            Some(variable) => variable.set_value(value),
            None => {
                self.seed_variable(Variable::fixed(name, "", value));
            }
        }
    }

    pub fn unit(&self, name: &str) -> Option<&str> {
        self.variables.get(&normalize_key(name)).map(Variable::unit)
    }

    pub fn rule(&self, name: &str) -> Option<&Rule> {
        self.variables.get(&normalize_key(name)).map(Variable::rule)
    }

    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables.get(&normalize_key(name))
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.variables.keys().map(String::as_str)
    }

    /// Advance `name` by one tick according to its rule.
    ///
    /// Returns `false` when nothing was applied: the name is unknown, or the variable
    /// is derived from a source that is not in the store.
    pub fn apply_rule(&mut self, name: &str) -> bool {
        let key = normalize_key(name);
        let Some(variable) = self.variables.get(&key) else {
            debug!(variable = %key, "apply_rule on unknown variable ignored");
            return false;
        };

        let current = variable.value();
        let next = match variable.rule() {
            Rule::Static => current,
            Rule::RandomWalk { min, max, step } => {
                // `-step..=step` panics once its width overflows to infinity.
                let delta = if *step > 0.0 {
                    self.rng.random_range(-1.0..=1.0) * step
                } else {
                    0.0
                };
                // max/min rather than clamp: never panics on inverted bounds
                (current + delta).max(*min).min(*max)
            }
            Rule::Decrement { rate } => (current - rate).max(0.0),
            Rule::Cyclic { count, probability } => {
                if self.rng.random::<f64>() < *probability {
                    (current + 1.0).rem_euclid(f64::from((*count).max(1)))
                } else {
                    current
                }
            }
            Rule::Derived { source, formula } => {
                let Some(base) = self.variables.get(source).map(Variable::value) else {
                    return false;
                };
                match formula {
                    Some(formula) => formula.eval(FormulaInputs::new(base, current)),
                    None => base,
                }
            }
        };

        if let Some(variable) = self.variables.get_mut(&key) {
            variable.set_value(next);
        }
        true
    }

    /// Copy of every current value, keyed by upper-cased name.
    pub fn snapshot(&self) -> BTreeMap<String, f64> {
        self.variables
            .iter()
            .map(|(key, variable)| (key.clone(), variable.value()))
            .collect()
    }

    /// Stable numeric id for `name`, allocated on first registration (starting at 1).
    ///
    /// Registration does not require the variable to exist yet.
    pub fn register(&mut self, name: &str) -> VarId {
        let key = normalize_key(name);
        if let Some(id) = self.registered.get(&key) {
            return *id;
        }
        self.registry.push(key.clone());
        let id = VarId(self.registry.len() as u32);
        self.registered.insert(key, id);
        id
    }

    /// Value behind a registered id; `0.0` for unknown ids or missing variables.
    pub fn get_registered(&self, id: VarId) -> f64 {
        let index = (id.0 as usize).wrapping_sub(1);
        self.registry
            .get(index)
            .and_then(|key| self.variables.get(key))
            .map_or(0.0, Variable::value)
    }
}

impl Default for VariableStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Cloneable handle serialising all access to one [`VariableStore`].
#[derive(Debug, Clone)]
pub struct SharedStore {
    inner: Arc<Mutex<VariableStore>>,
}

impl SharedStore {
    pub fn new(store: VariableStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Exclusive access for multi-step operations such as a whole tick.
    pub fn lock(&self) -> MutexGuard<'_, VariableStore> {
        self.inner.lock()
    }

    /// Direct override, bypassing the rule pipeline.
    pub fn force_set(&self, name: &str, value: f64) {
        self.inner.lock().set(name, value);
    }

    pub fn snapshot(&self) -> BTreeMap<String, f64> {
        self.inner.lock().snapshot()
    }
}

impl Default for SharedStore {
    fn default() -> Self {
        Self::new(VariableStore::new())
    }
}

impl ValueSource for SharedStore {
    fn get_value(&self, name: &str) -> f64 {
        self.inner.lock().get(name)
    }
}
