// SPDX-FileCopyrightText: 2026 Santhosh Shyamsundar, Prabhu S., and Studio Tyto
// SPDX-License-Identifier: MIT

pub mod rotation;
pub mod voigt;

pub use rotation::EulerAngles;
pub use voigt::StiffnessTensor;
