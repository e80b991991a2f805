// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! This crate resolves a declarative SVG `<linearGradient>` definition against the geometry of the
//! shape being painted, producing a concrete color ramp that a renderer can evaluate.
//!
//! # Usage
//!
//! The document layer parses a gradient element into a [`GradientDefinition`] once. For each
//! paint request, wrap it in a [`LinearGradient`] and call
//! [`GradientPaint::create_color`] with the current [`DrawContext`] and the bounding box of the
//! shape. The result is a [`RenderableGradientColor`], which can be sampled directly or
//! converted into a [`peniko::Brush`] for a Vello scene.
//!
//! ```
//! use svg_gradient::kurbo::{Affine, Point, Rect};
//! use svg_gradient::peniko::color::{OpaqueColor, Srgb};
//! use svg_gradient::{DrawContext, GradientDefinition, GradientPaint, LinearGradient, RawStop};
//!
//! let red = OpaqueColor::<Srgb>::new([1.0, 0.0, 0.0]);
//! let blue = OpaqueColor::<Srgb>::new([0.0, 0.0, 1.0]);
//! let attributes = [("x1", "0%"), ("x2", "100%")];
//! let definition = GradientDefinition::from_attributes(
//!     &attributes[..],
//!     vec![RawStop::new(0.0, red, 1.0), RawStop::new(1.0, blue, 1.0)],
//! );
//!
//! let ctx = DrawContext::new(Rect::new(0.0, 0.0, 200.0, 200.0), Affine::IDENTITY);
//! let bbox = Rect::new(10.0, 10.0, 110.0, 60.0);
//! let color = LinearGradient::new(&definition)
//!     .create_color(&ctx, Some(bbox), 0.0, 1.0)
//!     .unwrap();
//! let middle = color.sample(Point::new(60.0, 30.0));
//! assert!((middle.components[0] - 0.5).abs() < 1e-4);
//! ```
//!
//! # Units
//!
//! Absolute lengths are expressed in points. Pixel lengths (including unitless numbers) are
//! converted with the fixed factor [`PX_TO_PT`]. In object bounding box mode, the gradient
//! vector lives in a unit square that is pre-scaled by [`BBOX_SCALE`], and the placement
//! transform scales it back, so that a `gradientTransform` of `translate(1, 0)` moves the ramp by
//! exactly one bounding box width.
//!
//! # Failure handling
//!
//! Nothing in the resolution path fails. Malformed attributes fall back to their defaults, an
//! empty stop list or an empty target area produces no paint, and a degenerate gradient vector
//! collapses to its last stop's color.
// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod builder;
pub mod coords;
pub mod document;
pub mod error;
pub mod length;
pub mod linear;
pub(crate) mod math;
pub mod spread;
pub mod stops;
pub mod transform;

pub use peniko;
pub use peniko::color;
pub use peniko::kurbo;

pub use builder::{LinearGradientBuilder, LinearRamp, RenderableGradientColor};
pub use coords::ResolvedGradientVector;
pub use document::{Attributes, GradientDefinition, GradientUnits};
pub use error::{LengthError, TransformError};
pub use linear::{DrawContext, GradientKind, GradientPaint, LinearGradient};
pub use stops::{GradientColorStop, RawStop};

/// The fixed factor converting CSS pixels into points.
pub const PX_TO_PT: f64 = 0.75;

/// The scale applied to every coordinate resolved in object bounding box space.
///
/// The placement transform divides the bounding box dimensions by the same value.
pub const BBOX_SCALE: f64 = PX_TO_PT;

/// The font size, in points, that `em` and `rem` lengths are resolved against.
///
/// Font sizes are not propagated down to gradients, so this placeholder is always used.
pub const DEFAULT_FONT_SIZE: f64 = 12.0;
