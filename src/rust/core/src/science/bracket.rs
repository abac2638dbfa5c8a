// SPDX-FileCopyrightText: 2026 Santhosh Shyamsundar, Prabhu S., and Studio Tyto
// SPDX-License-Identifier: MIT

//! Maps simulation time onto the discrete temperature history.

use crate::error::{MeltError, MeltResult};
use serde::{Deserialize, Serialize};

/// Sample index of the bracket start and position inside the bracket.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BracketState {
    pub step_index: usize,
    pub fraction: f64,
}

impl BracketState {
    pub fn previous_index(&self) -> Option<usize> {
        self.step_index.checked_sub(1)
    }

    pub fn next_index(&self) -> usize {
        self.step_index + 1
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeBracket {
    interval: f64,
    sample_count: usize,
}

impl TimeBracket {
    /// `interval`: time between two temperature fields.
    /// `sample_count`: number of fields available; one is reserved as look-ahead.
    pub fn new(interval: f64, sample_count: usize) -> MeltResult<Self> {
        if !interval.is_finite() || interval <= 0.0 {
            return Err(MeltError::InvalidSampleInterval { value: interval });
        }
        if sample_count < 2 {
            return Err(MeltError::InvalidSampleCount {
                count: sample_count,
            });
        }
        Ok(Self {
            interval,
            sample_count,
        })
    }

    pub fn interval(&self) -> f64 {
        self.interval
    }

    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    pub fn last_step(&self) -> usize {
        self.sample_count - 2
    }

    /// True once `time` lies beyond the last stored field.
    pub fn is_past_history(&self, time: f64) -> bool {
        time / self.interval > (self.sample_count - 1) as f64
    }

    /// Past the end of the history the index saturates at `sample_count - 2`
    /// and the fraction, measured from the saturated index, sticks at 1:
    /// the last field read is held from then on.
    pub fn select(&self, time: f64) -> BracketState {
        let scaled = time / self.interval;
        // float -> int casts saturate, negative times land on 0
        let step_index = (scaled.floor().max(0.0) as usize).min(self.last_step());
        let fraction = (scaled - step_index as f64).min(1.0).max(0.0);

        BracketState {
            step_index,
            fraction,
        }
    }
}
