// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Color stops and their normalization into a boundary-complete ramp.

use crate::color::{AlphaColor, OpaqueColor, Srgb};
use crate::document::Attributes;
use crate::length;
use smallvec::SmallVec;

/// The normalized stop list of a gradient.
pub type GradientStops = SmallVec<[GradientColorStop; 4]>;

/// A stop as declared by a `<stop>` child of a gradient element.
///
/// The offset is in declaration order and has not been validated.
#[derive(Debug, Clone, Copy)]
pub struct RawStop {
    /// The declared offset.
    pub offset: f64,
    /// The stop color.
    pub color: OpaqueColor<Srgb>,
    /// The `stop-opacity` of the stop.
    pub opacity: f32,
}

impl RawStop {
    /// Create a new stop.
    pub fn new(offset: f64, color: OpaqueColor<Srgb>, opacity: f32) -> Self {
        Self {
            offset,
            color,
            opacity,
        }
    }

    /// Read the `offset` and `stop-opacity` attributes of a `<stop>` element.
    ///
    /// The color is resolved by the caller, since color syntax belongs to the document layer.
    /// An offset is either a number or a percentage and is clamped to `[0, 1]`; a missing or
    /// malformed offset is `0`. A missing or malformed opacity is `1`.
    pub fn from_attributes<A: Attributes + ?Sized>(
        attributes: &A,
        color: OpaqueColor<Srgb>,
    ) -> Self {
        let offset = match attributes.get("offset") {
            Some(value) if length::is_percentage(value) => length::parse_relative(value, 1.0),
            Some(value) => length::parse_number(value),
            None => None,
        }
        .unwrap_or(0.0)
        .clamp(0.0, 1.0);

        let opacity = attributes
            .get("stop-opacity")
            .and_then(length::parse_number)
            .map_or(1.0, |o| o.clamp(0.0, 1.0) as f32);

        Self::new(offset, color, opacity)
    }
}

/// A stop of a resolved color ramp.
#[derive(Debug, Clone, Copy)]
pub struct GradientColorStop {
    /// The offset along the gradient vector, in `[0, 1]`.
    pub offset: f64,
    /// The color of the stop.
    pub color: OpaqueColor<Srgb>,
    /// The opacity of the stop.
    pub opacity: f32,
}

impl GradientColorStop {
    /// Create a new stop. The offset is clamped to `[0, 1]`.
    pub fn new(offset: f64, color: OpaqueColor<Srgb>, opacity: f32) -> Self {
        Self {
            offset: offset.clamp(0.0, 1.0),
            color,
            opacity,
        }
    }

    /// Convert a declared stop, folding in the opacity of the painted element.
    pub fn from_raw(stop: &RawStop, parent_opacity: f32) -> Self {
        Self::new(stop.offset, stop.color, stop.opacity * parent_opacity)
    }

    /// The same stop, moved to another offset.
    pub fn with_offset(self, offset: f64) -> Self {
        Self { offset, ..self }
    }

    /// The color of the stop with its opacity as alpha.
    pub fn to_alpha_color(&self) -> AlphaColor<Srgb> {
        self.color.with_alpha(self.opacity)
    }
}

/// Make sure the ramp has a defined color from offset 0 to offset 1.
///
/// A copy of the first stop is inserted at offset 0 if the first stop starts later, and a copy of
/// the last stop is appended at offset 1 if the last stop ends earlier. The stops in between are
/// kept as declared, without sorting or deduplication. An empty list stays empty.
pub fn normalize_stops<I>(stops: I) -> GradientStops
where
    I: IntoIterator<Item = GradientColorStop>,
{
    let mut stops = stops.into_iter().collect::<GradientStops>();

    let Some(&first) = stops.first() else {
        return stops;
    };

    if first.offset > 0.0 {
        stops.insert(0, first.with_offset(0.0));
    }

    // Cannot fail, the list is not empty.
    if let Some(&last) = stops.last() {
        if last.offset < 1.0 {
            stops.push(last.with_offset(1.0));
        }
    }

    stops
}
