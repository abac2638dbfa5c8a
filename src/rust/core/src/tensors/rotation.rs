// SPDX-FileCopyrightText: 2026 Santhosh Shyamsundar, Prabhu S., and Studio Tyto
// SPDX-License-Identifier: MIT

//! Crystal orientation from Bunge Euler angles (z-x-z, degrees).

use nalgebra::Matrix3;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EulerAngles {
    pub phi1: f64,
    #[serde(rename = "Phi")]
    pub big_phi: f64,
    pub phi2: f64,
}

impl EulerAngles {
    pub fn new(phi1: f64, big_phi: f64, phi2: f64) -> Self {
        Self { phi1, big_phi, phi2 }
    }

    /// Sample -> crystal rotation `g` in Bunge convention.
    pub fn rotation_matrix(&self) -> Matrix3<f64> {
        let (sp1, cp1) = self.phi1.to_radians().sin_cos();
        let (sp, cp) = self.big_phi.to_radians().sin_cos();
        let (sp2, cp2) = self.phi2.to_radians().sin_cos();

        Matrix3::new(
            cp1 * cp2 - sp1 * sp2 * cp,
            sp1 * cp2 + cp1 * sp2 * cp,
            sp2 * sp,
            -cp1 * sp2 - sp1 * cp2 * cp,
            -sp1 * sp2 + cp1 * cp2 * cp,
            cp2 * sp,
            sp1 * sp,
            -cp1 * sp,
            cp,
        )
    }

    /// Crystal -> sample rotation, the one applied to the stiffness tensor.
    pub fn crystal_to_sample(&self) -> Matrix3<f64> {
        self.rotation_matrix().transpose()
    }
}
