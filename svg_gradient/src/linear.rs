// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The entry point turning a gradient definition into a color for one paint request.

use crate::builder::{LinearGradientBuilder, RenderableGradientColor};
use crate::coords::resolve_vector;
use crate::document::GradientDefinition;
use crate::kurbo::{Affine, Rect};
use crate::stops::{GradientColorStop, normalize_stops};
use crate::transform::compose_gradient_transform;

/// The state of the renderer that a gradient is resolved against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawContext {
    /// The current viewport, which user space coordinates are relative to.
    pub viewport: Rect,
    /// The transform from user space into device space.
    pub canvas_transform: Affine,
}

impl DrawContext {
    /// Create a new draw context.
    pub fn new(viewport: Rect, canvas_transform: Affine) -> Self {
        Self {
            viewport,
            canvas_transform,
        }
    }
}

/// A gradient that can produce a color for the shape it is painted on.
pub trait GradientPaint: private::Sealed {
    /// Resolve the gradient for a shape with bounding box `object_bbox`.
    ///
    /// The painted area is `object_bbox` grown by `margin` on every side, and `parent_opacity` is
    /// the opacity of the painted element, which scales the opacity of every stop. Returns
    /// `None` when there is nothing to paint.
    fn create_color(
        &self,
        ctx: &DrawContext,
        object_bbox: Option<Rect>,
        margin: f64,
        parent_opacity: f32,
    ) -> Option<RenderableGradientColor>;
}

/// A `<linearGradient>` paint server.
#[derive(Debug, Clone, Copy)]
pub struct LinearGradient<'a> {
    definition: &'a GradientDefinition,
}

impl<'a> LinearGradient<'a> {
    /// Wrap a parsed definition.
    pub fn new(definition: &'a GradientDefinition) -> Self {
        Self { definition }
    }

    /// The definition this gradient reads from.
    pub fn definition(&self) -> &'a GradientDefinition {
        self.definition
    }
}

impl GradientPaint for LinearGradient<'_> {
    fn create_color(
        &self,
        ctx: &DrawContext,
        object_bbox: Option<Rect>,
        margin: f64,
        parent_opacity: f32,
    ) -> Option<RenderableGradientColor> {
        let bbox = object_bbox?;
        let definition = self.definition;

        let mut builder = LinearGradientBuilder::new();
        let stops = definition
            .stops
            .iter()
            .map(|stop| GradientColorStop::from_raw(stop, parent_opacity));
        for stop in normalize_stops(stops) {
            builder.add_color_stop(stop);
        }

        let transform = compose_gradient_transform(definition.units, bbox, definition.transform);
        builder
            .set_spread_method(definition.spread)
            .set_gradient_vector(resolve_vector(definition, ctx.viewport))
            .set_gradient_transform(transform);

        builder.build_color(Some(bbox.inflate(margin, margin)), ctx.canvas_transform)
    }
}

/// The kinds of gradient paint servers.
#[derive(Debug, Clone, Copy)]
#[non_exhaustive]
pub enum GradientKind<'a> {
    /// A linear gradient.
    Linear(LinearGradient<'a>),
}

impl GradientPaint for GradientKind<'_> {
    fn create_color(
        &self,
        ctx: &DrawContext,
        object_bbox: Option<Rect>,
        margin: f64,
        parent_opacity: f32,
    ) -> Option<RenderableGradientColor> {
        match self {
            Self::Linear(linear) => linear.create_color(ctx, object_bbox, margin, parent_opacity),
        }
    }
}

impl<'a> From<LinearGradient<'a>> for GradientKind<'a> {
    fn from(value: LinearGradient<'a>) -> Self {
        Self::Linear(value)
    }
}

mod private {
    #[expect(unnameable_types, reason = "Sealed trait pattern.")]
    pub trait Sealed {}

    impl Sealed for super::LinearGradient<'_> {}
    impl Sealed for super::GradientKind<'_> {}
}
