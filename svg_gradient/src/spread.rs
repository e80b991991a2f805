// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Extension of a gradient beyond its `[0, 1]` range.

use crate::peniko::Extend;

/// Map the raw projection `t` of a point onto the gradient vector to the offset at which the
/// color ramp is sampled.
///
/// - [`Extend::Pad`] clamps to `[0, 1]`.
/// - [`Extend::Repeat`] wraps into `[0, 1)`.
/// - [`Extend::Reflect`] folds every other period back, so the ramp runs forwards and backwards.
pub fn apply_spread(t: f64, extend: Extend) -> f64 {
    match extend {
        Extend::Pad => t.clamp(0.0, 1.0),
        Extend::Repeat => {
            // Tiny negative values round up to exactly 1.
            let r = t.rem_euclid(1.0);
            if r >= 1.0 { 0.0 } else { r }
        }
        Extend::Reflect => {
            let u = t.rem_euclid(2.0);
            if u > 1.0 { 2.0 - u } else { u }
        }
    }
}
