// SPDX-FileCopyrightText: 2026 Santhosh Shyamsundar, Prabhu S., and Studio Tyto
// SPDX-License-Identifier: MIT

//! Baseline stiffness and its ordinary temperature dependence.
//!
//! The melting pipeline only needs two things from the parent elasticity
//! model: the unrotated baseline tensor and a way to soften it for a
//! temperature delta. `LinearSoftening` is the reference model,
//!
//!   C(ΔT) = C0 + ΔT · dC/dT

use crate::tensors::StiffnessTensor;
use serde::{Deserialize, Serialize};

/// Source of the baseline tensor and of its temperature-adjusted variants.
///
/// Implementations must be pure: the same delta always yields the same tensor.
pub trait BaselineTensorProvider: Send + Sync {
    /// Unrotated baseline, read-only for the melting pipeline.
    fn baseline(&self) -> &StiffnessTensor;

    /// Temperature at which `baseline()` holds exactly.
    fn reference_temperature(&self) -> f64;

    fn adjust_for_temperature_delta(&self, delta_temperature: f64) -> StiffnessTensor;

    /// Convenience: adjust for an absolute temperature.
    fn at_temperature(&self, temperature: f64) -> StiffnessTensor {
        self.adjust_for_temperature_delta(temperature - self.reference_temperature())
    }
}

fn default_reference_temperature() -> f64 {
    303.0
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinearSoftening {
    pub baseline: StiffnessTensor,
    /// dC/dT, same layout as the baseline.
    pub slope: StiffnessTensor,
    #[serde(default = "default_reference_temperature")]
    pub reference_temperature: f64,
}

impl LinearSoftening {
    pub fn new(baseline: StiffnessTensor, slope: StiffnessTensor, reference_temperature: f64) -> Self {
        Self {
            baseline,
            slope,
            reference_temperature,
        }
    }

    /// No temperature dependence at all.
    pub fn constant(baseline: StiffnessTensor) -> Self {
        Self::new(baseline, StiffnessTensor::zeros(), default_reference_temperature())
    }

    /// Cubic crystal with linear slopes on each of the three constants.
    pub fn cubic(constants: CubicConstants) -> Self {
        Self::new(
            StiffnessTensor::cubic(constants.c11, constants.c12, constants.c44),
            StiffnessTensor::cubic(constants.dc11_dt, constants.dc12_dt, constants.dc44_dt),
            constants.reference_temperature,
        )
    }
}

impl BaselineTensorProvider for LinearSoftening {
    fn baseline(&self) -> &StiffnessTensor {
        &self.baseline
    }

    fn reference_temperature(&self) -> f64 {
        self.reference_temperature
    }

    fn adjust_for_temperature_delta(&self, delta_temperature: f64) -> StiffnessTensor {
        self.baseline + self.slope.scaled(delta_temperature)
    }
}

/// Request-friendly description of a cubic crystal.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CubicConstants {
    pub c11: f64,
    pub c12: f64,
    pub c44: f64,
    #[serde(default)]
    pub dc11_dt: f64,
    #[serde(default)]
    pub dc12_dt: f64,
    #[serde(default)]
    pub dc44_dt: f64,
    #[serde(default = "default_reference_temperature")]
    pub reference_temperature: f64,
}

impl CubicConstants {
    /// 316L-like austenitic steel (GPa, GPa/K).
    pub fn stainless_316l() -> Self {
        Self {
            c11: 204.6,
            c12: 137.7,
            c44: 126.2,
            dc11_dt: -0.0408,
            dc12_dt: -0.0154,
            dc44_dt: -0.0308,
            reference_temperature: default_reference_temperature(),
        }
    }
}
