// SPDX-FileCopyrightText: 2026 Santhosh Shyamsundar, Prabhu S., and Studio Tyto
// SPDX-License-Identifier: MIT

//! Thermal phase classification.
//!
//! A temperature sample is first clamped to `[gas_low, melt_high]` so the
//! temperature dependence of the elastic constants is never evaluated
//! outside the range it was calibrated on, then mapped to one phase:
//!
//! ```text
//!   gas_low      gas_high           melt_low        melt_high
//!     |  Gas  |      Solid      |      Mushy      |   Liquid ->
//! ```

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThermalPhase {
    Gas,
    Solid,
    Mushy,
    Liquid,
}

impl ThermalPhase {
    pub fn is_solid(self) -> bool {
        self == ThermalPhase::Solid
    }

    pub fn is_mushy(self) -> bool {
        self == ThermalPhase::Mushy
    }
}

/// The four phase boundaries (K). Expected order:
/// `gas_low <= gas_high <= melt_low <= melt_high`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhaseThresholds {
    pub gas_low: f64,
    pub gas_high: f64,
    pub melt_low: f64,
    pub melt_high: f64,
}

impl Default for PhaseThresholds {
    fn default() -> Self {
        Self {
            gas_low: 298.0,
            gas_high: 298.1,
            melt_low: 1648.15,
            melt_high: 1673.15,
        }
    }
}

impl PhaseThresholds {
    pub fn new(gas_low: f64, gas_high: f64, melt_low: f64, melt_high: f64) -> Self {
        Self {
            gas_low,
            gas_high,
            melt_low,
            melt_high,
        }
    }

    /// Ordering is not enforced anywhere; callers may use this to report it.
    pub fn is_well_ordered(&self) -> bool {
        self.gas_low <= self.gas_high && self.gas_high <= self.melt_low && self.melt_low <= self.melt_high
    }

    /// Upper bound first, then lower bound, so a malformed pair resolves to `gas_low`.
    pub fn clamp(&self, temperature: f64) -> f64 {
        temperature.min(self.melt_high).max(self.gas_low)
    }

    pub fn classify(&self, temperature: f64) -> ThermalPhase {
        let t = self.clamp(temperature);
        if t < self.gas_high {
            ThermalPhase::Gas
        } else if t <= self.melt_low {
            ThermalPhase::Solid
        } else if t <= self.melt_high {
            ThermalPhase::Mushy
        } else {
            ThermalPhase::Liquid
        }
    }

    pub fn snapshot(&self, temperature: f64) -> PhaseSnapshot {
        PhaseSnapshot {
            phase: self.classify(temperature),
            temperature: self.clamp(temperature),
        }
    }
}

/// Phase and clamped temperature of one sample at one element.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhaseSnapshot {
    pub phase: ThermalPhase,
    pub temperature: f64,
}

impl PhaseSnapshot {
    pub fn solid(temperature: f64) -> Self {
        Self {
            phase: ThermalPhase::Solid,
            temperature,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    #[test]
    fn test_classify_boundaries() {
        let th = PhaseThresholds::default();
        assert_eq!(th.classify(298.05), ThermalPhase::Gas);
        assert_eq!(th.classify(298.1), ThermalPhase::Solid);
        assert_eq!(th.classify(1000.0), ThermalPhase::Solid);
        assert_eq!(th.classify(1648.15), ThermalPhase::Solid);
        assert_eq!(th.classify(1660.0), ThermalPhase::Mushy);
        assert_eq!(th.classify(1673.15), ThermalPhase::Mushy);
    }

    #[test]
    fn test_clamping_saturates_extremes() {
        let th = PhaseThresholds::default();
        // everything above the liquidus is held at the liquidus
        assert_eq!(th.classify(1673.15), th.classify(5000.0));
        assert_eq!(th.clamp(5000.0), 1673.15);
        // everything below the gas limit is held at the gas limit
        assert_eq!(th.classify(298.0), th.classify(-40.0));
        assert_eq!(th.clamp(-40.0), 298.0);
    }

    #[test]
    fn test_liquid_only_with_malformed_thresholds() {
        // melt_high below gas_low: the clamp lands above melt_high
        let th = PhaseThresholds::new(500.0, 600.0, 300.0, 400.0);
        assert!(!th.is_well_ordered());
        assert_eq!(th.classify(450.0), ThermalPhase::Gas);

        let th = PhaseThresholds::new(100.0, 100.0, 60.0, 50.0);
        assert_eq!(th.classify(1000.0), ThermalPhase::Liquid);
    }

    #[test]
    fn test_classification_idempotent_random_sweep() {
        let th = PhaseThresholds::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..2000 {
            let t: f64 = rng.gen_range(-500.0..4000.0);
            let snap = th.snapshot(t);
            assert_eq!(th.classify(snap.temperature), snap.phase, "t = {}", t);
            assert!(snap.temperature >= th.gas_low && snap.temperature <= th.melt_high);
        }
    }

    #[test]
    fn test_default_is_well_ordered() {
        assert!(PhaseThresholds::default().is_well_ordered());
    }
}
