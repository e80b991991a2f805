// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mathematical helper functions.

pub(crate) const NEARLY_ZERO_TOLERANCE: f64 = 1.0e-9;

/// Floating point comparisons against zero.
pub(crate) trait FloatExt: Sized + Copy {
    /// Whether the number is within a small tolerance of zero.
    fn is_nearly_zero(self) -> bool;
}

impl FloatExt for f64 {
    #[inline(always)]
    fn is_nearly_zero(self) -> bool {
        self.abs() <= NEARLY_ZERO_TOLERANCE
    }
}

impl FloatExt for f32 {
    #[inline(always)]
    fn is_nearly_zero(self) -> bool {
        f64::from(self).is_nearly_zero()
    }
}
