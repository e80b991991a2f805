// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parsing of `gradientTransform` and composition of the gradient space transform.

use crate::document::GradientUnits;
use crate::error::TransformError;
use crate::kurbo::{Affine, Rect, Vec2};
use crate::length;
use crate::{BBOX_SCALE, PX_TO_PT};

/// Parse an SVG transform list into a single matrix.
///
/// Functions are applied in list order, so the leftmost function is the outermost one. Lengths
/// (translations, the translation part of `matrix` and rotation centers) are pixels and are
/// converted to points, while scales and angles (in degrees) are unitless.
pub fn parse_transform(input: &str) -> Result<Affine, TransformError> {
    let mut transform = Affine::IDENTITY;
    let mut rest = input.trim();

    while !rest.is_empty() {
        let open = rest
            .find('(')
            .ok_or_else(|| TransformError::Malformed(rest.to_string()))?;
        let close = rest[open..]
            .find(')')
            .map(|close| open + close)
            .ok_or_else(|| TransformError::Malformed(rest.to_string()))?;

        let name = rest[..open].trim();
        let args = rest[open + 1..close]
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|arg| !arg.is_empty())
            .map(|arg| {
                length::parse_finite(arg)
                    .ok_or_else(|| TransformError::InvalidNumber(arg.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        transform *= transform_function(name, &args)?;
        rest = rest[close + 1..].trim_start_matches(|c: char| c.is_whitespace() || c == ',');
    }

    Ok(transform)
}

fn transform_function(name: &str, args: &[f64]) -> Result<Affine, TransformError> {
    let bad_count = || TransformError::ArgumentCount {
        name: name.to_string(),
        count: args.len(),
    };

    let transform = match (name, args) {
        ("matrix", &[a, b, c, d, e, f]) => Affine::new([a, b, c, d, e * PX_TO_PT, f * PX_TO_PT]),
        ("translate", &[tx]) => Affine::translate((tx * PX_TO_PT, 0.0)),
        ("translate", &[tx, ty]) => Affine::translate((tx * PX_TO_PT, ty * PX_TO_PT)),
        ("scale", &[s]) => Affine::scale(s),
        ("scale", &[sx, sy]) => Affine::scale_non_uniform(sx, sy),
        ("rotate", &[angle]) => Affine::rotate(angle.to_radians()),
        ("rotate", &[angle, cx, cy]) => {
            let center = Vec2::new(cx * PX_TO_PT, cy * PX_TO_PT);
            Affine::translate(center)
                * Affine::rotate(angle.to_radians())
                * Affine::translate(-center)
        }
        ("skewX", &[angle]) => Affine::new([1.0, 0.0, angle.to_radians().tan(), 1.0, 0.0, 0.0]),
        ("skewY", &[angle]) => Affine::new([1.0, angle.to_radians().tan(), 0.0, 1.0, 0.0, 0.0]),
        ("matrix" | "translate" | "scale" | "rotate" | "skewX" | "skewY", _) => {
            return Err(bad_count());
        }
        _ => return Err(TransformError::UnknownFunction(name.to_string())),
    };

    Ok(transform)
}

/// Build the transform from gradient space into the user space of the painted shape.
///
/// In object bounding box mode the unit square is placed onto `bbox`. The scale is divided by
/// [`BBOX_SCALE`] to undo the pre-scale of the resolved coordinates, so that the explicit
/// transform, which is concatenated last and thus applied first, operates in the same scaled
/// system as every other parsed transform.
pub fn compose_gradient_transform(
    units: GradientUnits,
    bbox: Rect,
    explicit: Option<Affine>,
) -> Affine {
    let mut transform = Affine::IDENTITY;

    if units == GradientUnits::ObjectBoundingBox {
        transform = transform
            * Affine::translate((bbox.x0, bbox.y0))
            * Affine::scale_non_uniform(bbox.width() / BBOX_SCALE, bbox.height() / BBOX_SCALE);
    }

    if let Some(explicit) = explicit {
        transform *= explicit;
    }

    transform
}
