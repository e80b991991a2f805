// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Building an evaluable color ramp from resolved gradient parts.

use crate::color::{AlphaColor, DynamicColor, OpaqueColor, Srgb};
use crate::coords::ResolvedGradientVector;
use crate::kurbo::{Affine, Point, Rect};
use crate::math::FloatExt;
use crate::peniko::{Brush, ColorStop, Extend, Gradient};
use crate::spread::apply_spread;
use crate::stops::{GradientColorStop, GradientStops};
use log::warn;

/// Collects the parts of a linear gradient and binds them to a target area.
#[derive(Debug, Clone, Default)]
pub struct LinearGradientBuilder {
    stops: GradientStops,
    vector: ResolvedGradientVector,
    spread: Extend,
    transform: Affine,
}

impl LinearGradientBuilder {
    /// Create a builder without stops and with a degenerate vector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stop. Stops are used in the order they are added.
    pub fn add_color_stop(&mut self, stop: GradientColorStop) -> &mut Self {
        self.stops.push(stop);
        self
    }

    /// Set the gradient vector, in gradient space.
    pub fn set_gradient_vector(&mut self, vector: ResolvedGradientVector) -> &mut Self {
        self.vector = vector;
        self
    }

    /// Set how the ramp continues outside of the gradient vector.
    pub fn set_spread_method(&mut self, spread: Extend) -> &mut Self {
        self.spread = spread;
        self
    }

    /// Set the transform from gradient space into the user space of the painted shape.
    pub fn set_gradient_transform(&mut self, transform: Affine) -> &mut Self {
        self.transform = transform;
        self
    }

    /// Bind the gradient to the area being painted and the current device transform.
    ///
    /// Returns `None` if there is nothing to paint: either the target area is missing or empty,
    /// or the gradient has no stops. A gradient without direction, either because its vector has
    /// zero length or because its transform collapses it, paints the color of its last stop.
    pub fn build_color(
        &self,
        target_area: Option<Rect>,
        device_transform: Affine,
    ) -> Option<RenderableGradientColor> {
        let area = target_area.filter(|area| !area.is_zero_area())?;
        let last = self.stops.last()?;

        if self.vector.is_degenerate() {
            return Some(RenderableGradientColor::Solid(last.to_alpha_color()));
        }

        // Maps gradient space directly into device space, so sampling needs no further
        // transforms.
        let brush_transform = device_transform * self.transform;
        let determinant = brush_transform.determinant();
        if determinant == 0.0 || !determinant.is_finite() {
            warn!("Gradient transform {brush_transform:?} is not invertible, painting last stop");
            return Some(RenderableGradientColor::Solid(last.to_alpha_color()));
        }

        // Move the gradient line onto (0, 0) → (1, 0), so that the projection of a point is just
        // its x coordinate.
        let line_transform = ts_from_line_to_line(
            self.vector.start,
            self.vector.end,
            Point::ZERO,
            Point::new(1.0, 0.0),
        );

        Some(RenderableGradientColor::Linear(LinearRamp {
            stops: self.stops.clone(),
            vector: self.vector,
            spread: self.spread,
            area,
            brush_transform,
            sample_transform: line_transform * brush_transform.inverse(),
        }))
    }
}

/// The resolved color of a gradient paint, ready to be evaluated at device space points.
#[derive(Debug, Clone)]
pub enum RenderableGradientColor {
    /// A single color, for gradients without a direction.
    Solid(AlphaColor<Srgb>),
    /// A linear color ramp.
    Linear(LinearRamp),
}

impl RenderableGradientColor {
    /// The color at a point in device space.
    pub fn sample(&self, point: Point) -> AlphaColor<Srgb> {
        match self {
            Self::Solid(color) => *color,
            Self::Linear(ramp) => ramp.sample(point),
        }
    }

    /// Convert into a brush and the transform to paint it with.
    ///
    /// The transform maps the brush's own space into device space.
    pub fn to_brush(&self) -> (Brush, Affine) {
        match self {
            Self::Solid(color) => (Brush::Solid(*color), Affine::IDENTITY),
            Self::Linear(ramp) => ramp.to_brush(),
        }
    }
}

/// A linear color ramp bound to one target area and one device transform.
#[derive(Debug, Clone)]
pub struct LinearRamp {
    stops: GradientStops,
    vector: ResolvedGradientVector,
    spread: Extend,
    area: Rect,
    /// Gradient space to device space.
    brush_transform: Affine,
    /// Device space to the space where the gradient vector runs from (0, 0) to (1, 0).
    sample_transform: Affine,
}

impl LinearRamp {
    /// The area this ramp was built for.
    pub fn target_area(&self) -> Rect {
        self.area
    }

    /// The stops of the ramp.
    pub fn stops(&self) -> &[GradientColorStop] {
        &self.stops
    }

    /// The spread method of the ramp.
    pub fn spread(&self) -> Extend {
        self.spread
    }

    /// The projection of a device space point onto the gradient vector, where 0 is the start
    /// and 1 the end of the vector.
    pub fn projection(&self, point: Point) -> f64 {
        (self.sample_transform * point).x
    }

    /// The offset at which the stops are sampled for a device space point.
    pub fn offset_at(&self, point: Point) -> f64 {
        apply_spread(self.projection(point), self.spread)
    }

    /// The color at a device space point.
    pub fn sample(&self, point: Point) -> AlphaColor<Srgb> {
        color_at(&self.stops, self.offset_at(point))
    }

    fn to_brush(&self) -> (Brush, Affine) {
        let stops = self
            .stops
            .iter()
            .map(|stop| ColorStop {
                offset: stop.offset as f32,
                color: DynamicColor::from_alpha_color(stop.to_alpha_color()),
            })
            .collect::<Vec<_>>();

        let gradient = Gradient::new_linear(self.vector.start, self.vector.end)
            .with_extend(self.spread)
            .with_stops(stops.as_slice());

        (Brush::Gradient(gradient), self.brush_transform)
    }
}

/// Interpolate the stops at `offset`.
///
/// The stops are walked in order and the first pair whose right stop lies at or beyond `offset`
/// is used.
fn color_at(stops: &[GradientColorStop], offset: f64) -> AlphaColor<Srgb> {
    for pair in stops.windows(2) {
        let (left, right) = (&pair[0], &pair[1]);
        if offset > right.offset {
            continue;
        }

        let du = right.offset - left.offset;
        if du.is_nearly_zero() {
            return right.to_alpha_color();
        }

        let t = ((offset - left.offset) / du).clamp(0.0, 1.0) as f32;
        let lerp = |a: f32, b: f32| a + (b - a) * t;

        let (c0, c1) = (left.color.components, right.color.components);
        let color = OpaqueColor::<Srgb>::new(core::array::from_fn(|i| lerp(c0[i], c1[i])));

        return color.with_alpha(lerp(left.opacity, right.opacity));
    }

    match stops.last() {
        Some(stop) => stop.to_alpha_color(),
        None => OpaqueColor::new([0.0; 3]).with_alpha(0.0),
    }
}

/// Calculates the transform necessary to map the line spanned by points src1, src2 to
/// the line spanned by dst1, dst2.
///
/// This creates a transformation that maps any line segment to any other line segment.
/// For gradients, we use this to transform the gradient line to a standard form (0,0) → (1,0).
///
/// Copied from <https://github.com/linebender/tiny-skia/blob/68b198a7210a6bbf752b43d6bc4db62445730313/src/shaders/radial_gradient.rs#L182>
fn ts_from_line_to_line(src1: Point, src2: Point, dst1: Point, dst2: Point) -> Affine {
    let unit_to_line1 = unit_to_line(src1, src2);
    // Calculate the transform necessary to map line1 to the unit vector.
    let line1_to_unit = unit_to_line1.inverse();
    // Then map the unit vector to line2.
    let unit_to_line2 = unit_to_line(dst1, dst2);

    unit_to_line2 * line1_to_unit
}

/// Calculate the transform necessary to map the unit vector to the line spanned by the points
/// `p1` and `p2`.
fn unit_to_line(p0: Point, p1: Point) -> Affine {
    Affine::new([
        p1.y - p0.y,
        p0.x - p1.x,
        p1.x - p0.x,
        p1.y - p0.y,
        p0.x,
        p0.y,
    ])
}

#[cfg(test)]
mod tests {
    use super::{LinearGradientBuilder, LinearRamp, RenderableGradientColor};
    use crate::color::{OpaqueColor, Srgb};
    use crate::coords::ResolvedGradientVector;
    use crate::kurbo::{Affine, Point, Rect};
    use crate::peniko::{Brush, Extend};
    use crate::stops::{GradientColorStop, normalize_stops};

    const RED: OpaqueColor<Srgb> = OpaqueColor::new([1.0, 0.0, 0.0]);
    const GREEN: OpaqueColor<Srgb> = OpaqueColor::new([0.0, 1.0, 0.0]);
    const BLUE: OpaqueColor<Srgb> = OpaqueColor::new([0.0, 0.0, 1.0]);

    fn assert_components(actual: [f32; 4], expected: [f32; 4]) {
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-5, "{actual:?} != {expected:?}");
        }
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-9, "{actual} != {expected}");
    }

    fn area() -> Rect {
        Rect::new(0.0, 0.0, 100.0, 100.0)
    }

    fn with_stops<I>(stops: I, start: Point, end: Point) -> LinearGradientBuilder
    where
        I: IntoIterator<Item = GradientColorStop>,
    {
        let mut builder = LinearGradientBuilder::new();
        for stop in normalize_stops(stops) {
            builder.add_color_stop(stop);
        }
        builder.set_gradient_vector(ResolvedGradientVector::new(start, end));
        builder
    }

    fn builder(start: Point, end: Point, spread: Extend) -> LinearGradientBuilder {
        let stops = [
            GradientColorStop::new(0.0, RED, 1.0),
            GradientColorStop::new(1.0, BLUE, 0.5),
        ];
        let mut builder = with_stops(stops, start, end);
        builder.set_spread_method(spread);
        builder
    }

    fn horizontal(spread: Extend) -> LinearGradientBuilder {
        builder(Point::ZERO, Point::new(100.0, 0.0), spread)
    }

    fn ramp(builder: &LinearGradientBuilder, device_transform: Affine) -> LinearRamp {
        match builder.build_color(Some(area()), device_transform) {
            Some(RenderableGradientColor::Linear(ramp)) => ramp,
            other => panic!("expected a linear ramp, got {other:?}"),
        }
    }

    #[test]
    fn missing_or_empty_area_paints_nothing() {
        let builder = horizontal(Extend::Pad);
        let empty = Rect::new(0.0, 0.0, 0.0, 10.0);

        assert!(builder.build_color(None, Affine::IDENTITY).is_none());
        let color = builder.build_color(Some(empty), Affine::IDENTITY);
        assert!(color.is_none());
    }

    #[test]
    fn no_stops_paints_nothing() {
        let stops = Vec::<GradientColorStop>::new();
        let builder = with_stops(stops, Point::ZERO, Point::new(1.0, 0.0));

        let color = builder.build_color(Some(area()), Affine::IDENTITY);
        assert!(color.is_none());
    }

    #[test]
    fn zero_length_vector_is_last_stop_color() {
        let point = Point::new(5.0, 5.0);
        let builder = builder(point, point, Extend::Repeat);

        let color = builder.build_color(Some(area()), Affine::IDENTITY);
        let Some(RenderableGradientColor::Solid(color)) = color else {
            panic!("expected a solid color");
        };
        assert_components(color.components, [0.0, 0.0, 1.0, 0.5]);
    }

    #[test]
    fn singular_transform_is_last_stop_color() {
        let mut builder = horizontal(Extend::Pad);
        builder.set_gradient_transform(Affine::scale_non_uniform(1.0, 0.0));

        let color = builder.build_color(Some(area()), Affine::IDENTITY);
        assert!(matches!(color, Some(RenderableGradientColor::Solid(_))));
    }

    #[test]
    fn interpolates_color_and_opacity() {
        let ramp = ramp(&horizontal(Extend::Pad), Affine::IDENTITY);

        let start = ramp.sample(Point::new(0.0, 50.0));
        assert_components(start.components, [1.0, 0.0, 0.0, 1.0]);
        let middle = ramp.sample(Point::new(50.0, 50.0));
        assert_components(middle.components, [0.5, 0.0, 0.5, 0.75]);
        let end = ramp.sample(Point::new(100.0, 0.0));
        assert_components(end.components, [0.0, 0.0, 1.0, 0.5]);
    }

    #[test]
    fn pad_holds_end_colors() {
        let ramp = ramp(&horizontal(Extend::Pad), Affine::IDENTITY);

        let before = ramp.sample(Point::new(-40.0, 0.0));
        assert_components(before.components, [1.0, 0.0, 0.0, 1.0]);
        let after = ramp.sample(Point::new(250.0, 0.0));
        assert_components(after.components, [0.0, 0.0, 1.0, 0.5]);
    }

    #[test]
    fn repeat_and_reflect_offsets() {
        let repeat = ramp(&horizontal(Extend::Repeat), Affine::IDENTITY);
        assert_close(repeat.projection(Point::new(130.0, 0.0)), 1.3);
        assert_close(repeat.offset_at(Point::new(130.0, 0.0)), 0.3);
        assert_close(repeat.offset_at(Point::new(-30.0, 0.0)), 0.7);

        let reflect = ramp(&horizontal(Extend::Reflect), Affine::IDENTITY);
        assert_close(reflect.offset_at(Point::new(150.0, 0.0)), 0.5);
        assert_close(reflect.offset_at(Point::new(50.0, 0.0)), 0.5);
    }

    #[test]
    fn projection_is_perpendicular_to_vector() {
        let diagonal = builder(Point::ZERO, Point::new(10.0, 10.0), Extend::Pad);
        let ramp = ramp(&diagonal, Affine::IDENTITY);

        // Points on the normal through the middle of the vector all project to 0.5.
        assert_close(ramp.projection(Point::new(5.0, 5.0)), 0.5);
        assert_close(ramp.projection(Point::new(10.0, 0.0)), 0.5);
        assert_close(ramp.projection(Point::new(0.0, 10.0)), 0.5);
    }

    #[test]
    fn device_transform_is_folded_in() {
        let ramp = ramp(&horizontal(Extend::Pad), Affine::scale(2.0));

        // The gradient is twice as long in device space.
        assert_close(ramp.projection(Point::new(100.0, 0.0)), 0.5);
        assert_close(ramp.projection(Point::new(200.0, 0.0)), 1.0);
    }

    #[test]
    fn coincident_stops_switch_colors() {
        let stops = [
            GradientColorStop::new(0.5, RED, 1.0),
            GradientColorStop::new(0.5, BLUE, 1.0),
        ];
        let ramp = ramp(
            &with_stops(stops, Point::ZERO, Point::new(100.0, 0.0)),
            Affine::IDENTITY,
        );

        let before = ramp.sample(Point::new(25.0, 0.0));
        assert_components(before.components, [1.0, 0.0, 0.0, 1.0]);
        let after = ramp.sample(Point::new(75.0, 0.0));
        assert_components(after.components, [0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn unsorted_stops_use_first_bracketing_pair() {
        let stops = [
            GradientColorStop::new(0.0, RED, 1.0),
            GradientColorStop::new(0.8, GREEN, 1.0),
            GradientColorStop::new(0.3, BLUE, 1.0),
            GradientColorStop::new(1.0, RED, 1.0),
        ];
        let ramp = ramp(
            &with_stops(stops, Point::ZERO, Point::new(100.0, 0.0)),
            Affine::IDENTITY,
        );
        let offsets = ramp.stops().iter().map(|s| s.offset).collect::<Vec<_>>();
        assert_eq!(offsets, vec![0.0, 0.8, 0.3, 1.0]);

        // 0.5 falls between the first two stops, red at 0 and green at 0.8.
        let middle = ramp.sample(Point::new(50.0, 0.0));
        assert_components(middle.components, [0.375, 0.625, 0.0, 1.0]);

        // 0.9 is past both 0.8 and 0.3, so it lies between blue at 0.3 and red at 1.
        let late = ramp.sample(Point::new(90.0, 0.0));
        assert_components(late.components, [6.0 / 7.0, 0.0, 1.0 / 7.0, 1.0]);
    }

    #[test]
    fn brushes() {
        let translate = Affine::translate((5.0, 0.0));
        let builder = horizontal(Extend::Reflect);
        let color = builder.build_color(Some(area()), translate).unwrap();
        let (brush, transform) = color.to_brush();

        let Brush::Gradient(gradient) = brush else {
            panic!("expected a gradient brush");
        };
        assert_eq!(gradient.extend, Extend::Reflect);
        assert_eq!(gradient.stops.len(), 2);
        assert_eq!(transform, translate);

        let solid = RenderableGradientColor::Solid(BLUE.with_alpha(1.0));
        let (brush, transform) = solid.to_brush();
        assert!(matches!(brush, Brush::Solid(_)));
        assert_eq!(transform, Affine::IDENTITY);
    }
}
