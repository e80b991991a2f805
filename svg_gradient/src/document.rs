// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The parsed form of a gradient element, and the attribute lookup it is read from.

use crate::kurbo::Affine;
use crate::peniko::Extend;
use crate::stops::RawStop;
use crate::transform::parse_transform;
use log::debug;
use std::collections::{BTreeMap, HashMap};

/// Attribute lookup on a document node.
pub trait Attributes {
    /// Return the raw value of the attribute `name`, if present.
    fn get(&self, name: &str) -> Option<&str>;
}

impl Attributes for HashMap<String, String> {
    fn get(&self, name: &str) -> Option<&str> {
        HashMap::get(self, name).map(String::as_str)
    }
}

impl Attributes for BTreeMap<String, String> {
    fn get(&self, name: &str) -> Option<&str> {
        BTreeMap::get(self, name).map(String::as_str)
    }
}

impl Attributes for [(&str, &str)] {
    fn get(&self, name: &str) -> Option<&str> {
        self.iter()
            .find_map(|&(key, value)| (key == name).then_some(value))
    }
}

/// The coordinate system of a gradient's vector.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GradientUnits {
    /// Coordinates are fractions of the painted shape's bounding box.
    #[default]
    ObjectBoundingBox,
    /// Coordinates are absolute, in the user space of the current viewport.
    UserSpaceOnUse,
}

impl GradientUnits {
    /// Parse the `gradientUnits` attribute. Unknown or missing values are
    /// [`ObjectBoundingBox`](Self::ObjectBoundingBox).
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("userSpaceOnUse") => Self::UserSpaceOnUse,
            _ => Self::ObjectBoundingBox,
        }
    }
}

/// Parse the `spreadMethod` attribute. Unknown or missing values are [`Extend::Pad`].
pub fn parse_spread_method(value: Option<&str>) -> Extend {
    match value.map(str::trim) {
        Some("repeat") => Extend::Repeat,
        Some("reflect") => Extend::Reflect,
        _ => Extend::Pad,
    }
}

/// A parsed `<linearGradient>` element.
///
/// This is created once when the document is parsed and only read afterwards, so a single
/// definition can be shared by any number of render passes. Cloning it is a plain value copy.
#[derive(Debug, Clone, Default)]
pub struct GradientDefinition {
    /// The coordinate system of `x1`, `y1`, `x2` and `y2`.
    pub units: GradientUnits,
    /// The raw `x1` attribute.
    pub x1: Option<String>,
    /// The raw `y1` attribute.
    pub y1: Option<String>,
    /// The raw `x2` attribute.
    pub x2: Option<String>,
    /// The raw `y2` attribute.
    pub y2: Option<String>,
    /// The parsed `gradientTransform`, with translations in points.
    pub transform: Option<Affine>,
    /// How the gradient continues outside of its vector.
    pub spread: Extend,
    /// The `<stop>` children, in document order.
    pub stops: Vec<RawStop>,
}

impl GradientDefinition {
    /// Read a gradient definition from the attributes of its element and its parsed stops.
    ///
    /// A `gradientTransform` that fails to parse is dropped.
    pub fn from_attributes<A: Attributes + ?Sized>(attributes: &A, stops: Vec<RawStop>) -> Self {
        let transform = attributes
            .get("gradientTransform")
            .and_then(|value| match parse_transform(value) {
                Ok(transform) => Some(transform),
                Err(err) => {
                    debug!("Ignoring gradientTransform '{value}': {err}");
                    None
                }
            });

        let owned = |name: &str| attributes.get(name).map(str::to_string);

        Self {
            units: GradientUnits::parse(attributes.get("gradientUnits")),
            x1: owned("x1"),
            y1: owned("y1"),
            x2: owned("x2"),
            y2: owned("y2"),
            transform,
            spread: parse_spread_method(attributes.get("spreadMethod")),
            stops,
        }
    }
}
