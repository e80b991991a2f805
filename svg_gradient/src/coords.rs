// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolution of the `x1`, `y1`, `x2` and `y2` attributes into a gradient vector.

use crate::document::{GradientDefinition, GradientUnits};
use crate::kurbo::{Point, Rect};
use crate::length::{self, UnitValue};
use crate::{BBOX_SCALE, DEFAULT_FONT_SIZE};
use log::debug;

/// The start and end point of a linear gradient, in the units implied by the gradient's
/// coordinate space.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ResolvedGradientVector {
    /// The point at which offset 0 lies.
    pub start: Point,
    /// The point at which offset 1 lies.
    pub end: Point,
}

impl ResolvedGradientVector {
    /// Create a new gradient vector.
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Whether start and end coincide, leaving the gradient without a direction.
    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }
}

/// Resolve the gradient vector of `definition`.
///
/// In object bounding box mode, the coordinates live in the unit square scaled by
/// [`BBOX_SCALE`]. In user space mode, they are absolute and percentages refer to `viewport`.
pub fn resolve_vector(definition: &GradientDefinition, viewport: Rect) -> ResolvedGradientVector {
    let x1 = definition.x1.as_deref();
    let y1 = definition.y1.as_deref();
    let x2 = definition.x2.as_deref();
    let y2 = definition.y2.as_deref();

    match definition.units {
        GradientUnits::ObjectBoundingBox => ResolvedGradientVector::new(
            Point::new(bbox_coordinate(x1, 0.0), bbox_coordinate(y1, 0.0)),
            Point::new(bbox_coordinate(x2, 1.0), bbox_coordinate(y2, 0.0)),
        ),
        GradientUnits::UserSpaceOnUse => {
            let (x, y) = (viewport.x0, viewport.y0);
            let (width, height) = (viewport.width(), viewport.height());

            ResolvedGradientVector::new(
                Point::new(
                    user_space_coordinate(x1, x, x, width),
                    user_space_coordinate(y1, y, y, height),
                ),
                Point::new(
                    user_space_coordinate(x2, x + width, x, width),
                    user_space_coordinate(y2, y, y, height),
                ),
            )
        }
    }
}

/// Resolve one coordinate in object bounding box space.
///
/// The unit of a length is ignored, only its number is used: `0.5cm` is the middle of the box
/// just like `0.5` is.
fn bbox_coordinate(value: Option<&str>, default: f64) -> f64 {
    let resolved = value.and_then(|value| {
        let value = value.trim();
        if length::is_percentage(value) {
            length::parse_relative(value, 1.0)
        } else if is_length(value) {
            length::parse_finite(&value[..length::numeral_end(value)])
        } else {
            None
        }
    });

    if resolved.is_none() {
        if let Some(value) = value {
            debug!("Ignoring invalid bounding box coordinate '{value}', using {default}");
        }
    }

    resolved.unwrap_or(default) * BBOX_SCALE
}

fn is_length(value: &str) -> bool {
    length::is_numeric(value) || length::is_metric(value) || length::is_relative(value)
}

/// Resolve one coordinate in user space, with percentages relative to `start` and `extent`.
fn user_space_coordinate(value: Option<&str>, default: f64, start: f64, extent: f64) -> f64 {
    let Some(value) = value else {
        return default;
    };

    // Font sizes aren't propagated to gradients, so `em` and `rem` use a fixed base.
    match length::parse_length_to_pt(value, DEFAULT_FONT_SIZE, DEFAULT_FONT_SIZE) {
        Ok(UnitValue::Percent(percent)) => start + extent * percent / 100.0,
        Ok(UnitValue::Point(points)) => points,
        Err(err) => {
            debug!("Ignoring invalid user space coordinate: {err}, using {default}");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ResolvedGradientVector, resolve_vector};
    use crate::document::{GradientDefinition, GradientUnits};
    use crate::kurbo::{Point, Rect};

    fn assert_close(actual: Point, expected: Point) {
        assert!(
            (actual - expected).hypot() < 1e-9,
            "{actual:?} != {expected:?}"
        );
    }

    fn bbox_vector(attributes: &[(&str, &str)]) -> ResolvedGradientVector {
        let definition = GradientDefinition::from_attributes(attributes, vec![]);
        assert_eq!(definition.units, GradientUnits::ObjectBoundingBox);
        resolve_vector(&definition, Rect::ZERO)
    }

    fn user_space_vector(attributes: &[(&str, &str)], viewport: Rect) -> ResolvedGradientVector {
        let mut attributes = attributes.to_vec();
        attributes.push(("gradientUnits", "userSpaceOnUse"));
        let definition = GradientDefinition::from_attributes(&attributes[..], vec![]);
        resolve_vector(&definition, viewport)
    }

    #[test]
    fn bbox_defaults() {
        let vector = bbox_vector(&[]);

        assert_close(vector.start, Point::new(0.0, 0.0));
        assert_close(vector.end, Point::new(0.75, 0.0));
    }

    #[test]
    fn bbox_percentage() {
        let vector = bbox_vector(&[("x1", "50%")]);

        assert_close(vector.start, Point::new(0.375, 0.0));
    }

    #[test]
    fn bbox_ignores_units() {
        let vector = bbox_vector(&[
            ("x1", "0.5cm"),
            ("y1", "0.25em"),
            ("x2", "2"),
            ("y2", "1px"),
        ]);

        assert_close(vector.start, Point::new(0.375, 0.1875));
        assert_close(vector.end, Point::new(1.5, 0.75));
    }

    #[test]
    fn bbox_invalid_values_use_defaults() {
        let vector = bbox_vector(&[("x1", "left"), ("x2", "3furlongs"), ("y2", "")]);

        assert_close(vector.start, Point::new(0.0, 0.0));
        assert_close(vector.end, Point::new(0.75, 0.0));
    }

    #[test]
    fn bbox_overflowing_values_use_defaults() {
        let vector = bbox_vector(&[("x1", "1e400"), ("x2", "-1e400%")]);

        assert_close(vector.start, Point::new(0.0, 0.0));
        assert_close(vector.end, Point::new(0.75, 0.0));
    }

    #[test]
    fn user_space_defaults() {
        let viewport = Rect::new(10.0, 20.0, 110.0, 70.0);
        let vector = user_space_vector(&[], viewport);

        assert_close(vector.start, Point::new(10.0, 20.0));
        assert_close(vector.end, Point::new(110.0, 20.0));
    }

    #[test]
    fn user_space_percentages_follow_viewport() {
        let viewport = Rect::new(10.0, 20.0, 110.0, 70.0);
        let vector = user_space_vector(&[("x1", "50%"), ("y2", "100%")], viewport);

        assert_close(vector.start, Point::new(60.0, 20.0));
        assert_close(vector.end, Point::new(110.0, 70.0));
    }

    #[test]
    fn user_space_lengths_are_in_points() {
        let viewport = Rect::new(0.0, 0.0, 100.0, 100.0);
        let vector = user_space_vector(&[("x1", "100"), ("y1", "1in"), ("x2", "2em")], viewport);

        assert_close(vector.start, Point::new(75.0, 72.0));
        assert_close(vector.end, Point::new(24.0, 0.0));
    }

    #[test]
    fn user_space_invalid_values_use_defaults() {
        let viewport = Rect::new(10.0, 20.0, 110.0, 70.0);
        let vector = user_space_vector(&[("x1", "auto"), ("x2", "1zz")], viewport);

        assert_close(vector.start, Point::new(10.0, 20.0));
        assert_close(vector.end, Point::new(110.0, 20.0));
    }

    #[test]
    fn user_space_overflowing_values_use_defaults() {
        let viewport = Rect::new(10.0, 20.0, 110.0, 70.0);
        let vector = user_space_vector(&[("x1", "1e400"), ("y2", "1e400%")], viewport);

        assert_close(vector.start, Point::new(10.0, 20.0));
        assert_close(vector.end, Point::new(110.0, 20.0));
    }

    #[test]
    fn degenerate_vectors() {
        assert!(bbox_vector(&[("x2", "0")]).is_degenerate());
        assert!(!bbox_vector(&[]).is_degenerate());
    }
}
