// SPDX-FileCopyrightText: 2026 Santhosh Shyamsundar, Prabhu S., and Studio Tyto
// SPDX-License-Identifier: MIT
//
// UMST — Material Agnostic Operating System
// MeltingKernel: phase-aware elasticity for additive manufacturing
//
// This file is part of UMST, developed by Santhosh Shyamsundar, Prabhu S., and Studio Tyto.
// For licensing terms, see the LICENSE file in the project root.

// ============================================================================
// MeltingKernel: per-point, per-step stiffness under melting
// ============================================================================
// Pipeline for one material point at one simulation time:
//   1. bracket the time between two stored temperature fields
//   2. classify previous (activation only), current and next fields
//   3. all solid  -> temperature-adjusted tensor
//      otherwise  -> degradation blend
//   4. (optional) rotate into the global frame
// ============================================================================

use crate::error::{MeltError, MeltResult};
use crate::science::bracket::{BracketState, TimeBracket};
use crate::science::degradation::{
    BlendBranch, DegradationBlender, DegradationWeights, MaterialPoint, MushyStiffness, PhaseWindow,
};
use crate::science::phase::PhaseThresholds;
use crate::science::softening::{BaselineTensorProvider, CubicConstants, LinearSoftening};
use crate::temperature::{TemperatureSource, TemperatureTable};
use crate::tensors::{EulerAngles, StiffnessTensor};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};
use wasm_bindgen::prelude::*;

/// Run-wide melting parameters. Defaults match the production AM model (316L).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeltingConfig {
    /// Liquidus: zero stiffness above.
    pub melting_temperature_high: f64,
    /// Solidus: full stiffness below.
    pub melting_temperature_low: f64,
    /// Lowest temperature still considered solid.
    pub gas_temperature_high: f64,
    /// Gas: zero stiffness below.
    pub gas_temperature_low: f64,
    /// Fraction of the baseline kept in gas and molten pool.
    pub residual_stiffness: f64,
    /// Fraction of the baseline kept in the mushy zone.
    pub mushy_stiffness: f64,
    /// Time between two stored temperature fields.
    pub temperature_time_step: f64,
    /// Number of stored temperature fields.
    pub temperature_num_step: usize,
    /// Element activation (deposition) is in use.
    pub activate_elems: bool,
}

impl Default for MeltingConfig {
    fn default() -> Self {
        Self {
            melting_temperature_high: 1673.15,
            melting_temperature_low: 1648.15,
            gas_temperature_high: 298.1,
            gas_temperature_low: 298.0,
            residual_stiffness: 0.1,
            mushy_stiffness: 0.5,
            temperature_time_step: 1.0,
            temperature_num_step: 1_000_000_000,
            activate_elems: false,
        }
    }
}

impl MeltingConfig {
    pub fn thresholds(&self) -> PhaseThresholds {
        PhaseThresholds::new(
            self.gas_temperature_low,
            self.gas_temperature_high,
            self.melting_temperature_low,
            self.melting_temperature_high,
        )
    }
}

/// How the stiffness of one evaluation was obtained.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationPath {
    /// Solid at all three fields: ordinary temperature dependence only.
    TemperatureOnly,
    Degraded(BlendBranch),
}

/// Unrotated stiffness of one point at one time, with the state that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MeltEvaluation {
    pub point: MaterialPoint,
    pub bracket: BracketState,
    pub window: PhaseWindow,
    pub path: EvaluationPath,
    pub stiffness: StiffnessTensor,
}

/// Stateless across evaluations; everything it holds is read-only.
pub struct MeltingEngine {
    thresholds: PhaseThresholds,
    bracket: TimeBracket,
    residual_stiffness: f64,
    mushy_stiffness: MushyStiffness,
    activation_mode: bool,
    source: Option<Arc<dyn TemperatureSource>>,
    provider: Arc<dyn BaselineTensorProvider>,
}

impl MeltingEngine {
    pub fn new(config: &MeltingConfig, provider: Arc<dyn BaselineTensorProvider>) -> MeltResult<Self> {
        let thresholds = config.thresholds();
        if !thresholds.is_well_ordered() {
            warn!(
                ?thresholds,
                "phase thresholds are out of order; classification will not partition the temperature range"
            );
        }
        for (param, weight) in [
            ("residual_stiffness", config.residual_stiffness),
            ("mushy_stiffness", config.mushy_stiffness),
        ] {
            if !(0.0..=1.0).contains(&weight) {
                warn!(param, weight, "degradation weight outside [0, 1]");
            }
        }

        Ok(Self {
            thresholds,
            bracket: TimeBracket::new(config.temperature_time_step, config.temperature_num_step)?,
            residual_stiffness: config.residual_stiffness,
            mushy_stiffness: MushyStiffness::Constant(config.mushy_stiffness),
            activation_mode: config.activate_elems,
            source: None,
            provider,
        })
    }

    pub fn with_temperature_source(mut self, source: Arc<dyn TemperatureSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Replaces the configured constant mushy weight, e.g. with a per-point field.
    pub fn with_mushy_stiffness(mut self, mushy_stiffness: MushyStiffness) -> Self {
        self.mushy_stiffness = mushy_stiffness;
        self
    }

    pub fn thresholds(&self) -> &PhaseThresholds {
        &self.thresholds
    }

    pub fn time_bracket(&self) -> &TimeBracket {
        &self.bracket
    }

    pub fn provider(&self) -> &dyn BaselineTensorProvider {
        self.provider.as_ref()
    }

    /// Melt- or temperature-adjusted stiffness, still in the crystal frame.
    pub fn evaluate(&self, point: MaterialPoint, time: f64) -> MeltResult<MeltEvaluation> {
        let source = self.source.as_deref().ok_or(MeltError::MissingTemperatureSource)?;
        let bracket = self.bracket.select(time);
        let window = self.phase_window(source, point.element, &bracket)?;

        let (path, stiffness) = if window.all_solid() {
            (
                EvaluationPath::TemperatureOnly,
                self.provider.at_temperature(window.current.temperature),
            )
        } else {
            let weights = DegradationWeights {
                residual_stiffness: self.residual_stiffness,
                mushy_stiffness: self.mushy_stiffness.resolve(point),
            };
            let blend = DegradationBlender::new(self.provider.as_ref(), weights).blend(
                &window,
                self.activation_mode,
                bracket.fraction,
            );
            (EvaluationPath::Degraded(blend.branch), blend.tensor)
        };

        debug!(
            element = point.element,
            qp = point.qp,
            step = bracket.step_index,
            fraction = bracket.fraction,
            ?path,
            "melting evaluation"
        );

        Ok(MeltEvaluation {
            point,
            bracket,
            window,
            path,
            stiffness,
        })
    }

    /// Final stiffness in the global frame for a crystal with orientation `angles`.
    pub fn evaluate_rotated(
        &self,
        point: MaterialPoint,
        time: f64,
        angles: &EulerAngles,
    ) -> MeltResult<StiffnessTensor> {
        let evaluation = self.evaluate(point, time)?;
        Ok(evaluation.stiffness.rotated(&angles.crystal_to_sample()))
    }

    /// Evaluates every point independently in parallel; the first error wins.
    pub fn evaluate_field(&self, points: &[MaterialPoint], time: f64) -> MeltResult<Vec<MeltEvaluation>> {
        points
            .par_iter()
            .map(|point| self.evaluate(*point, time))
            .collect()
    }

    fn phase_window(
        &self,
        source: &dyn TemperatureSource,
        element: u64,
        bracket: &BracketState,
    ) -> MeltResult<PhaseWindow> {
        let current = source.temperature(element, bracket.step_index)?;
        let next = source.temperature(element, bracket.next_index())?;

        // the previous field only matters for activated elements
        let previous = match bracket.previous_index() {
            Some(index) if self.activation_mode => Some(self.thresholds.snapshot(source.temperature(element, index)?)),
            _ => None,
        };

        Ok(PhaseWindow {
            previous,
            current: self.thresholds.snapshot(current),
            next: self.thresholds.snapshot(next),
        })
    }
}

// ============================================================================
// JSON facade
// ============================================================================

/// One evaluation request, as sent by the host application or the CLI.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MeltingRequest {
    #[serde(default)]
    pub config: MeltingConfig,
    pub crystal: CubicConstants,
    pub temperatures: TemperatureTable,
    pub time: f64,
    /// Points to evaluate; defaults to quadrature point 0 of every element.
    #[serde(default)]
    pub points: Option<Vec<MaterialPoint>>,
    /// Per-element crystal orientation; elements listed here also get a rotated tensor.
    #[serde(default)]
    pub orientations: BTreeMap<u64, EulerAngles>,
    /// Per-element mushy-zone weight overriding `config.mushy_stiffness`.
    #[serde(default)]
    pub mushy_stiffness_field: Option<BTreeMap<u64, f64>>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ValidationEvent {
    pub topic: String,
    pub message: String,
    pub severity: String, // 'INFO', 'WARNING', 'CRITICAL'
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PointResult {
    #[serde(flatten)]
    pub evaluation: MeltEvaluation,
    /// Stiffness in the global frame, when an orientation was supplied.
    pub rotated: Option<StiffnessTensor>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MeltingResponse {
    pub points: Vec<PointResult>,
    pub events: Vec<ValidationEvent>,
    pub compute_time_ms: f32,
}

#[wasm_bindgen]
pub struct MeltingKernel;

#[wasm_bindgen]
impl MeltingKernel {
    /// Evaluates a whole field from one JSON request.
    ///
    /// # Returns
    /// JSON `MeltingResponse`, or `{"error": "..."}` when the request is
    /// malformed or the temperature history cannot serve it.
    ///
    /// # Example
    /// ```json
    /// {
    ///   "config": {"temperature_time_step": 0.5, "temperature_num_step": 3},
    ///   "crystal": {"c11": 204.6, "c12": 137.7, "c44": 126.2},
    ///   "temperatures": {"1": [300.0, 1660.0, 1700.0]},
    ///   "time": 0.25
    /// }
    /// ```
    #[wasm_bindgen]
    pub fn compute_field(request_json: &str) -> String {
        let response = serde_json::from_str::<MeltingRequest>(request_json)
            .map_err(MeltError::from)
            .and_then(|request| Self::run(&request));

        match response {
            Ok(response) => serde_json::to_string(&response).unwrap_or_default(),
            Err(e) => serde_json::to_string(&serde_json::json!({ "error": e.to_string() })).unwrap_or_default(),
        }
    }
}

/// Pure Rust Implementation (Non-WASM-Bindgen)
impl MeltingKernel {
    pub fn run(request: &MeltingRequest) -> MeltResult<MeltingResponse> {
        let start = instant::Instant::now();

        let provider = Arc::new(LinearSoftening::cubic(request.crystal));
        let mut engine = MeltingEngine::new(&request.config, provider)?
            .with_temperature_source(Arc::new(request.temperatures.clone()));

        if let Some(field) = &request.mushy_stiffness_field {
            let field = field.clone();
            let fallback = request.config.mushy_stiffness;
            engine = engine.with_mushy_stiffness(MushyStiffness::field(move |point| {
                field.get(&point.element).copied().unwrap_or(fallback)
            }));
        }

        let points = match &request.points {
            Some(points) => points.clone(),
            None => request
                .temperatures
                .elements()
                .map(|element| MaterialPoint::new(element, 0))
                .collect(),
        };

        let evaluations = engine.evaluate_field(&points, request.time)?;

        let mut events = Vec::new();
        if !engine.thresholds().is_well_ordered() {
            events.push(ValidationEvent {
                topic: "MELT.THRESHOLDS".to_string(),
                message: "Phase thresholds are not ordered gas_low <= gas_high <= melt_low <= melt_high"
                    .to_string(),
                severity: "WARNING".to_string(),
            });
        }
        if engine.time_bracket().is_past_history(request.time) {
            events.push(ValidationEvent {
                topic: "MELT.HISTORY".to_string(),
                message: format!(
                    "Time {:.3} is past the last temperature field; holding the last field",
                    request.time
                ),
                severity: "WARNING".to_string(),
            });
        }
        let degraded = evaluations
            .iter()
            .filter(|e| e.path != EvaluationPath::TemperatureOnly)
            .count();
        if degraded > 0 {
            events.push(ValidationEvent {
                topic: "MELT.DEGRADATION".to_string(),
                message: format!("{} of {} points degraded by melting", degraded, evaluations.len()),
                severity: "INFO".to_string(),
            });
        }

        let points = evaluations
            .into_iter()
            .map(|evaluation| PointResult {
                rotated: request
                    .orientations
                    .get(&evaluation.point.element)
                    .map(|angles| evaluation.stiffness.rotated(&angles.crystal_to_sample())),
                evaluation,
            })
            .collect();

        Ok(MeltingResponse {
            points,
            events,
            compute_time_ms: start.elapsed().as_secs_f32() * 1000.0,
        })
    }
}
