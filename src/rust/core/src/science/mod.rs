// SPDX-FileCopyrightText: 2026 Santhosh Shyamsundar, Prabhu S., and Studio Tyto
// SPDX-License-Identifier: MIT
pub mod bracket;
pub mod degradation; // [CORE] Melt blend state machine
pub mod phase;
pub mod softening;
