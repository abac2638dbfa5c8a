// SPDX-FileCopyrightText: 2026 Santhosh Shyamsundar, Prabhu S., and Studio Tyto
// SPDX-License-Identifier: MIT

//! Elastic stiffness tensor in Voigt form.
//!
//! The rank-4 tensor `C_ijkl` is stored as a symmetric 6×6 matrix with the
//! index order `11, 22, 33, 23, 13, 12`. Shear columns act on engineering
//! shear strains, so rotations use the Bond transformation
//!
//!   C' = M · C · Mᵀ
//!
//! which is equivalent to `C'_ijkl = R_im R_jn R_ko R_lp C_mnop`.

use nalgebra::{Matrix3, Matrix6};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul};

/// Voigt index -> tensor index pair.
pub const VOIGT_PAIRS: [(usize, usize); 6] = [(0, 0), (1, 1), (2, 2), (1, 2), (0, 2), (0, 1)];

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[[f64; 6]; 6]", into = "[[f64; 6]; 6]")]
pub struct StiffnessTensor {
    voigt: Matrix6<f64>,
}

impl StiffnessTensor {
    pub fn zeros() -> Self {
        Self {
            voigt: Matrix6::zeros(),
        }
    }

    pub fn from_voigt(voigt: Matrix6<f64>) -> Self {
        Self { voigt }
    }

    /// Cubic crystal: three independent constants (GPa or Pa, caller's choice).
    pub fn cubic(c11: f64, c12: f64, c44: f64) -> Self {
        let mut voigt = Matrix6::zeros();
        for i in 0..3 {
            for j in 0..3 {
                voigt[(i, j)] = if i == j { c11 } else { c12 };
            }
            voigt[(i + 3, i + 3)] = c44;
        }
        Self { voigt }
    }

    /// Isotropic solid from the Lamé constants.
    pub fn isotropic(lambda: f64, mu: f64) -> Self {
        Self::cubic(lambda + 2.0 * mu, lambda, mu)
    }

    pub fn voigt(&self) -> &Matrix6<f64> {
        &self.voigt
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.voigt[(row, col)]
    }

    /// `weight · C`
    pub fn scaled(&self, weight: f64) -> Self {
        Self {
            voigt: self.voigt * weight,
        }
    }

    /// Linear blend `(1 − f)·from + f·to`.
    pub fn blend(from: &Self, to: &Self, fraction: f64) -> Self {
        Self {
            voigt: from.voigt * (1.0 - fraction) + to.voigt * fraction,
        }
    }

    /// Rotates the tensor with the rotation matrix `r` (tensor frame -> target frame).
    pub fn rotated(&self, r: &Matrix3<f64>) -> Self {
        let m = bond_matrix(r);
        Self {
            voigt: m * self.voigt * m.transpose(),
        }
    }

    pub fn is_symmetric(&self, tolerance: f64) -> bool {
        (0..6).all(|i| (0..i).all(|j| (self.voigt[(i, j)] - self.voigt[(j, i)]).abs() <= tolerance))
    }

    /// Largest absolute entry-wise difference, handy for tolerance checks.
    pub fn max_abs_diff(&self, other: &Self) -> f64 {
        (self.voigt - other.voigt).amax()
    }
}

impl Default for StiffnessTensor {
    fn default() -> Self {
        Self::zeros()
    }
}

impl Add for StiffnessTensor {
    type Output = StiffnessTensor;

    fn add(self, rhs: StiffnessTensor) -> StiffnessTensor {
        StiffnessTensor {
            voigt: self.voigt + rhs.voigt,
        }
    }
}

impl Mul<StiffnessTensor> for f64 {
    type Output = StiffnessTensor;

    fn mul(self, rhs: StiffnessTensor) -> StiffnessTensor {
        rhs.scaled(self)
    }
}

impl From<[[f64; 6]; 6]> for StiffnessTensor {
    fn from(rows: [[f64; 6]; 6]) -> Self {
        Self {
            voigt: Matrix6::from_fn(|i, j| rows[i][j]),
        }
    }
}

impl From<StiffnessTensor> for [[f64; 6]; 6] {
    fn from(tensor: StiffnessTensor) -> Self {
        let mut rows = [[0.0; 6]; 6];
        for (i, row) in rows.iter_mut().enumerate() {
            for (j, value) in row.iter_mut().enumerate() {
                *value = tensor.voigt[(i, j)];
            }
        }
        rows
    }
}

/// 6×6 Bond stress transformation for the rotation `r`.
fn bond_matrix(r: &Matrix3<f64>) -> Matrix6<f64> {
    Matrix6::from_fn(|row, col| {
        let (i, j) = VOIGT_PAIRS[row];
        let (k, l) = VOIGT_PAIRS[col];
        if k == l {
            r[(i, k)] * r[(j, k)]
        } else {
            r[(i, k)] * r[(j, l)] + r[(i, l)] * r[(j, k)]
        }
    })
}
