// SPDX-FileCopyrightText: 2026 Santhosh Shyamsundar, Prabhu S., and Studio Tyto
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Failures of the melting pipeline. Every variant is fatal for the run.
#[derive(Debug, Error)]
pub enum MeltError {
    #[error("no temperature source attached: temperature must be read from an external field")]
    MissingTemperatureSource,
    #[error("temperature history needs at least two samples (got {count})")]
    InvalidSampleCount { count: usize },
    #[error("temperature time step must be positive and finite (got {value})")]
    InvalidSampleInterval { value: f64 },
    #[error("element {element} has no temperature history")]
    UnknownElement { element: u64 },
    #[error("element {element} has no temperature sample {sample} (history length {len})")]
    MissingSample {
        element: u64,
        sample: usize,
        len: usize,
    },
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] serde_json::Error),
}

pub type MeltResult<T> = Result<T, MeltError>;
