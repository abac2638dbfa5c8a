// SPDX-FileCopyrightText: 2026 Santhosh Shyamsundar, Prabhu S., and Studio Tyto
// SPDX-License-Identifier: MIT

//! Stiffness degradation across a temperature bracket.
//!
//! Given the phases of the previous, current and next temperature fields,
//! the blender interpolates between the temperature-adjusted tensor (valid
//! only where the material is solid) and the baseline scaled by a
//! degradation weight (mushy zone, or residual for liquid and gas).
//!
//! Two regimes:
//! - **ordinary**: the point was solid before the bracket (or its history is
//!   not tracked). Solid endpoints use the temperature-adjusted tensor,
//!   non-solid endpoints use the weighted baseline.
//! - **activation**: the point was deposited while molten or gaseous, so
//!   degradation starts at the current field whatever its phase, and only a
//!   solid next field brings the temperature-adjusted tensor back.

use crate::science::phase::{PhaseSnapshot, ThermalPhase};
use crate::science::softening::BaselineTensorProvider;
use crate::tensors::StiffnessTensor;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Element and quadrature point of one evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MaterialPoint {
    pub element: u64,
    #[serde(default)]
    pub qp: usize,
}

impl MaterialPoint {
    pub fn new(element: u64, qp: usize) -> Self {
        Self { element, qp }
    }
}

/// Degradation weights resolved for one point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DegradationWeights {
    /// Fraction of the baseline kept in liquid and gas.
    pub residual_stiffness: f64,
    /// Fraction of the baseline kept in the mushy zone.
    pub mushy_stiffness: f64,
}

impl Default for DegradationWeights {
    fn default() -> Self {
        Self {
            residual_stiffness: 0.1,
            mushy_stiffness: 0.5,
        }
    }
}

/// Where the mushy-zone weight comes from, decided once at configuration.
#[derive(Clone)]
pub enum MushyStiffness {
    Constant(f64),
    /// Spatially varying weight, e.g. a material property per quadrature point.
    Field(Arc<dyn Fn(MaterialPoint) -> f64 + Send + Sync>),
}

impl MushyStiffness {
    pub fn field<F>(lookup: F) -> Self
    where
        F: Fn(MaterialPoint) -> f64 + Send + Sync + 'static,
    {
        MushyStiffness::Field(Arc::new(lookup))
    }

    pub fn resolve(&self, point: MaterialPoint) -> f64 {
        match self {
            MushyStiffness::Constant(value) => *value,
            MushyStiffness::Field(lookup) => lookup(point),
        }
    }
}

impl fmt::Debug for MushyStiffness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MushyStiffness::Constant(value) => f.debug_tuple("Constant").field(value).finish(),
            MushyStiffness::Field(_) => f.write_str("Field(..)"),
        }
    }
}

/// Phases of the three fields around the current bracket.
///
/// `previous` is only populated in activation mode past the first field.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhaseWindow {
    pub previous: Option<PhaseSnapshot>,
    pub current: PhaseSnapshot,
    pub next: PhaseSnapshot,
}

impl PhaseWindow {
    /// An untracked previous field counts as solid.
    pub fn is_solid_previous(&self) -> bool {
        self.previous.map_or(true, |p| p.phase.is_solid())
    }

    pub fn all_solid(&self) -> bool {
        self.is_solid_previous() && self.current.phase.is_solid() && self.next.phase.is_solid()
    }
}

/// Which formula produced the tensor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendBranch {
    /// solid -> mushy/liquid/gas
    Melting,
    /// mushy/liquid/gas -> solid
    Solidifying,
    MushyHold,
    MushyToResidual,
    ResidualToMushy,
    ResidualHold,
    /// solid -> solid, only when called directly
    SolidHold,
    /// activated while not solid, solid next
    ActivationSolidifying,
    /// activated while not solid, still not solid next
    ActivationResidual,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Blend {
    pub tensor: StiffnessTensor,
    pub branch: BlendBranch,
}

pub struct DegradationBlender<'a> {
    provider: &'a dyn BaselineTensorProvider,
    weights: DegradationWeights,
}

impl<'a> DegradationBlender<'a> {
    pub fn new(provider: &'a dyn BaselineTensorProvider, weights: DegradationWeights) -> Self {
        Self { provider, weights }
    }

    pub fn weights(&self) -> DegradationWeights {
        self.weights
    }

    pub fn blend(&self, window: &PhaseWindow, activation_mode: bool, fraction: f64) -> Blend {
        if activation_mode && !window.is_solid_previous() {
            self.blend_activated(window, fraction)
        } else {
            self.blend_ordinary(window, fraction)
        }
    }

    fn blend_ordinary(&self, window: &PhaseWindow, fraction: f64) -> Blend {
        let current = window.current.phase;
        let next = window.next.phase;
        let DegradationWeights {
            residual_stiffness: residual,
            mushy_stiffness: mushy,
        } = self.weights;

        match (current.is_solid(), next.is_solid()) {
            (true, false) => {
                let weight = if next.is_mushy() { mushy } else { residual };
                let from = self.temperature_adjusted(&window.current);
                Blend {
                    tensor: StiffnessTensor::blend(&from, &self.weighted(weight), fraction),
                    branch: BlendBranch::Melting,
                }
            }
            (false, true) => {
                let weight = if current.is_mushy() { mushy } else { residual };
                let to = self.temperature_adjusted(&window.next);
                Blend {
                    tensor: StiffnessTensor::blend(&self.weighted(weight), &to, fraction),
                    branch: BlendBranch::Solidifying,
                }
            }
            // the temperature-adjusted tensor plays no part here
            (false, false) => match (current.is_mushy(), next.is_mushy()) {
                (true, true) => Blend {
                    tensor: self.weighted(mushy),
                    branch: BlendBranch::MushyHold,
                },
                (true, false) => Blend {
                    tensor: StiffnessTensor::blend(&self.weighted(mushy), &self.weighted(residual), fraction),
                    branch: BlendBranch::MushyToResidual,
                },
                (false, true) => Blend {
                    tensor: StiffnessTensor::blend(&self.weighted(residual), &self.weighted(mushy), fraction),
                    branch: BlendBranch::ResidualToMushy,
                },
                (false, false) => Blend {
                    tensor: self.weighted(residual),
                    branch: BlendBranch::ResidualHold,
                },
            },
            (true, true) => Blend {
                tensor: self.temperature_adjusted(&window.current),
                branch: BlendBranch::SolidHold,
            },
        }
    }

    fn blend_activated(&self, window: &PhaseWindow, fraction: f64) -> Blend {
        if !window.next.phase.is_solid() {
            return Blend {
                tensor: self.weighted(self.weights.residual_stiffness),
                branch: BlendBranch::ActivationResidual,
            };
        }

        let weight = match window.current.phase {
            ThermalPhase::Liquid | ThermalPhase::Gas => self.weights.residual_stiffness,
            ThermalPhase::Mushy => self.weights.mushy_stiffness,
            // activated in a solid field: same start as liquid or gas
            ThermalPhase::Solid => self.weights.residual_stiffness,
        };
        let to = self.temperature_adjusted(&window.next);
        Blend {
            tensor: StiffnessTensor::blend(&self.weighted(weight), &to, fraction),
            branch: BlendBranch::ActivationSolidifying,
        }
    }

    fn weighted(&self, weight: f64) -> StiffnessTensor {
        self.provider.baseline().scaled(weight)
    }

    fn temperature_adjusted(&self, snapshot: &PhaseSnapshot) -> StiffnessTensor {
        self.provider.at_temperature(snapshot.temperature)
    }
}
