// SPDX-FileCopyrightText: 2026 Santhosh Shyamsundar, Prabhu S., and Studio Tyto
// SPDX-License-Identifier: MIT
//
// UMST — Material Agnostic Operating System
// Melting Profile: phase-aware elasticity for additive manufacturing
//

pub mod error;
pub mod melting_kernel;
pub mod science;
pub mod temperature;
pub mod tensors;
#[cfg(test)]
pub mod tests_melting;

// Re-export core types
pub use error::{MeltError, MeltResult};
pub use melting_kernel::{EvaluationPath, MeltEvaluation, MeltingConfig, MeltingEngine, MeltingKernel};
pub use science::degradation::{DegradationWeights, MaterialPoint, MushyStiffness, PhaseWindow};
pub use science::phase::{PhaseSnapshot, PhaseThresholds, ThermalPhase};
pub use science::softening::{BaselineTensorProvider, LinearSoftening};
pub use temperature::{TemperatureSource, TemperatureTable};
pub use tensors::{EulerAngles, StiffnessTensor};
