use serde::{Deserialize, Serialize};

use crate::geometry::Point;
use crate::measure::LengthUnit;

/// An affine map from an element's local frame to world coordinates:
/// rotate about the origin, mirror about the Y axis, then translate.
///
/// The order is fixed. Mirroring about Y (negating x) is the only flip
/// EAGLE allows, and swapping it with the rotation moves mirrored parts
/// somewhere else entirely.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Counter-clockwise rotation in degrees.
    pub degrees: f64,
    /// Flip about the Y axis after rotating.
    pub mirror: bool,
    pub translate: Point,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            degrees: 0.0,
            mirror: false,
            translate: Point::origin(LengthUnit::Millimeter),
        }
    }
}

impl Transform {
    pub fn new(degrees: f64, mirror: bool, translate: Point) -> Self {
        Self {
            degrees,
            mirror,
            translate,
        }
    }

    /// A pure translation.
    pub fn translation(translate: Point) -> Self {
        Self {
            translate,
            ..Default::default()
        }
    }

    /// A pure rotation about the origin.
    pub fn rotation(degrees: f64) -> Self {
        Self {
            degrees,
            ..Default::default()
        }
    }

    /// The only geometric primitive: rotate, then mirror, then translate.
    pub fn apply(&self, pt: Point) -> Point {
        let radians = self.degrees.to_radians();
        let (s, c) = radians.sin_cos();

        let mut r = Point::new(pt.x * c - pt.y * s, pt.x * s + pt.y * c);

        if self.mirror {
            r = Point::new(-r.x, r.y);
        }

        r + self.translate
    }

    /// Add `delta` to the rotation; mirror and translation unchanged.
    pub fn rotated_by(&self, delta: f64) -> Transform {
        Transform {
            degrees: self.degrees + delta,
            ..*self
        }
    }

    /// Replace the rotation outright.
    pub fn rotated_to(&self, degrees: f64) -> Transform {
        Transform { degrees, ..*self }
    }

    /// Replace the translation; rotation and mirror unchanged.
    pub fn translated_to(&self, translate: Point) -> Transform {
        Transform { translate, ..*self }
    }
}
