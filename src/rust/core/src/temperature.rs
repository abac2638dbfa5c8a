// SPDX-FileCopyrightText: 2026 Santhosh Shyamsundar, Prabhu S., and Studio Tyto
// SPDX-License-Identifier: MIT

//! Temperature histories produced by the thermal (CFD) simulation.

use crate::error::{MeltError, MeltResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Element-wise temperature history, one value per stored field.
pub trait TemperatureSource: Send + Sync {
    /// Temperature (K) of `element` in field `sample`.
    fn temperature(&self, element: u64, sample: usize) -> MeltResult<f64>;
}

/// In-memory history keyed by element id.
///
/// JSON form: `{"1": [300.0, 1500.0, 1700.0], "2": [...]}`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemperatureTable {
    histories: BTreeMap<u64, Vec<f64>>,
}

impl TemperatureTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, element: u64, history: Vec<f64>) {
        self.histories.insert(element, history);
    }

    pub fn with_history(mut self, element: u64, history: Vec<f64>) -> Self {
        self.insert(element, history);
        self
    }

    pub fn elements(&self) -> impl Iterator<Item = u64> + '_ {
        self.histories.keys().copied()
    }

    /// Shortest history over all elements, i.e. the number of usable fields.
    pub fn sample_count(&self) -> usize {
        self.histories.values().map(Vec::len).min().unwrap_or(0)
    }
}

impl TemperatureSource for TemperatureTable {
    fn temperature(&self, element: u64, sample: usize) -> MeltResult<f64> {
        let history = self
            .histories
            .get(&element)
            .ok_or(MeltError::UnknownElement { element })?;
        history.get(sample).copied().ok_or(MeltError::MissingSample {
            element,
            sample,
            len: history.len(),
        })
    }
}
