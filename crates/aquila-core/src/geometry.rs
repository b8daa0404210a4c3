use std::fmt;
use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::measure::{LengthUnit, Measurement};

/// A 2-D point whose components are unit-tagged measurements. The x and y
/// components may carry different units; arithmetic is componentwise and
/// left-biased like [`Measurement`] itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: Measurement,
    pub y: Measurement,
}

impl Point {
    pub fn new(x: Measurement, y: Measurement) -> Self {
        Self { x, y }
    }

    /// A point on the x axis: y is zero in x's unit.
    pub fn from_x(x: Measurement) -> Self {
        Self {
            x,
            y: x.unit().zero(),
        }
    }

    /// A point on the y axis: x is zero in y's unit.
    pub fn from_y(y: Measurement) -> Self {
        Self {
            x: y.unit().zero(),
            y,
        }
    }

    pub fn origin(unit: LengthUnit) -> Self {
        Self {
            x: unit.zero(),
            y: unit.zero(),
        }
    }

    /// Distance from the origin, in the unit of the x component.
    pub fn length(&self) -> Measurement {
        let xv = self.x;
        let yv = self.y.to(xv.unit());
        let d2 = xv.value() * xv.value() + yv.value() * yv.value();
        Measurement::raw(d2.sqrt(), xv.unit())
    }

    pub fn midpoint(&self, other: Point) -> Point {
        Point::new(0.5 * (self.x + other.x), 0.5 * (self.y + other.y))
    }

    /// Convert both components to the given unit.
    pub fn to(&self, unit: LengthUnit) -> Point {
        Point::new(self.x.to(unit), self.y.to(unit))
    }
}

/// Formats as `(x y)` — the coordinate syntax EAGLE commands expect.
impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {})", self.x, self.y)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Add<Size> for Point {
    type Output = Point;

    fn add(self, rhs: Size) -> Point {
        Point::new(self.x + rhs.w, self.y + rhs.h)
    }
}

impl Sub<Size> for Point {
    type Output = Point;

    fn sub(self, rhs: Size) -> Point {
        Point::new(self.x - rhs.w, self.y - rhs.h)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, scale: f64) -> Point {
        Point::new(self.x * scale, self.y * scale)
    }
}

impl Mul<Point> for f64 {
    type Output = Point;

    fn mul(self, p: Point) -> Point {
        p * self
    }
}

/// A width/height pair of measurements.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub w: Measurement,
    pub h: Measurement,
}

impl Size {
    pub fn new(w: Measurement, h: Measurement) -> Self {
        Self { w, h }
    }
}

impl Add for Size {
    type Output = Size;

    fn add(self, rhs: Size) -> Size {
        Size::new(self.w + rhs.w, self.h + rhs.h)
    }
}

impl Sub for Size {
    type Output = Size;

    fn sub(self, rhs: Size) -> Size {
        Size::new(self.w - rhs.w, self.h - rhs.h)
    }
}

impl Mul<f64> for Size {
    type Output = Size;

    fn mul(self, scale: f64) -> Size {
        Size::new(self.w * scale, self.h * scale)
    }
}

impl Mul<Size> for f64 {
    type Output = Size;

    fn mul(self, s: Size) -> Size {
        s * self
    }
}

/// An axis-aligned rectangle. The size is strictly positive; constructors
/// reject anything else, so no degenerate Rect is ever observable.
/// Deserialization funnels through the same check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RectRepr")]
pub struct Rect {
    origin: Point,
    size: Size,
}

/// Wire shape for [`Rect`]: raw fields, validated on the way in.
#[derive(Deserialize)]
struct RectRepr {
    origin: Point,
    size: Size,
}

impl TryFrom<RectRepr> for Rect {
    type Error = GeometryError;

    fn try_from(repr: RectRepr) -> Result<Self, Self::Error> {
        Rect::new(repr.origin, repr.size)
    }
}

impl Rect {
    pub fn new(origin: Point, size: Size) -> Result<Self, GeometryError> {
        if !size.w.is_positive() || !size.h.is_positive() {
            return Err(GeometryError::NonPositiveSize {
                width: size.w,
                height: size.h,
            });
        }
        Ok(Self { origin, size })
    }

    pub fn from_corners(lower_left: Point, upper_right: Point) -> Result<Self, GeometryError> {
        Self::new(
            lower_left,
            Size::new(upper_right.x - lower_left.x, upper_right.y - lower_left.y),
        )
    }

    pub fn from_center(center: Point, size: Size) -> Result<Self, GeometryError> {
        Self::new(center - 0.5 * size, size)
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn width(&self) -> Measurement {
        self.size.w
    }

    pub fn height(&self) -> Measurement {
        self.size.h
    }

    pub fn center(&self) -> Point {
        self.origin + self.size * 0.5
    }

    pub fn upper_right(&self) -> Point {
        self.origin + self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mm(v: f64) -> Measurement {
        Measurement::millimeters(v).unwrap()
    }

    fn inch(v: f64) -> Measurement {
        Measurement::inches(v).unwrap()
    }

    fn pt(x: f64, y: f64) -> Point {
        Point::new(mm(x), mm(y))
    }

    #[test]
    fn test_point_arithmetic() {
        let p = pt(1.0, 2.0) + pt(3.0, 4.0);
        assert_eq!(p, pt(4.0, 6.0));
        let q = pt(4.0, 6.0) - pt(1.0, 2.0);
        assert_eq!(q, pt(3.0, 4.0));
        assert_eq!(pt(1.0, 2.0) * 2.0, pt(2.0, 4.0));
    }

    #[test]
    fn test_point_size_arithmetic() {
        let s = Size::new(mm(2.0), mm(3.0));
        assert_eq!(pt(1.0, 1.0) + s, pt(3.0, 4.0));
        assert_eq!(pt(3.0, 4.0) - s, pt(1.0, 1.0));
    }

    #[test]
    fn test_point_length_mixed_units() {
        // 3in x 4in triangle expressed with a mm y component.
        let p = Point::new(inch(3.0), mm(4.0 * 25.4));
        let len = p.length();
        assert_eq!(len.unit(), LengthUnit::Inch);
        assert!((len.value() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_point_midpoint() {
        let m = pt(0.0, 0.0).midpoint(pt(4.0, 6.0));
        assert_eq!(m, pt(2.0, 3.0));
    }

    #[test]
    fn test_point_axis_constructors() {
        let p = Point::from_x(inch(2.0));
        assert_eq!(p.y.unit(), LengthUnit::Inch);
        assert_eq!(p.y.value(), 0.0);
        let q = Point::from_y(mm(3.0));
        assert_eq!(q.x.value(), 0.0);
    }

    #[test]
    fn test_point_display() {
        assert_eq!(pt(3.5, 2.0).to_string(), "(3.5mm 2mm)");
    }

    #[test]
    fn test_rect_rejects_non_positive_size() {
        let bad = Rect::new(pt(0.0, 0.0), Size::new(mm(0.0), mm(1.0)));
        assert!(matches!(bad, Err(GeometryError::NonPositiveSize { .. })));
        let bad = Rect::new(pt(0.0, 0.0), Size::new(mm(1.0), mm(-1.0)));
        assert!(bad.is_err());
    }

    #[test]
    fn test_rect_from_corners() {
        let r = Rect::from_corners(pt(1.0, 2.0), pt(4.0, 6.0)).unwrap();
        assert_eq!(r.width(), mm(3.0));
        assert_eq!(r.height(), mm(4.0));
        assert_eq!(r.origin(), pt(1.0, 2.0));

        // Inverted corners give a negative size and are rejected.
        assert!(Rect::from_corners(pt(4.0, 6.0), pt(1.0, 2.0)).is_err());
    }

    #[test]
    fn test_rect_deserialization_checks_size() {
        let r = Rect::new(pt(1.0, 2.0), Size::new(mm(3.0), mm(4.0))).unwrap();
        let json = serde_json::to_string(&r).unwrap();
        let back: Rect = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r);

        // A hand-written document cannot smuggle in a degenerate size.
        let degenerate = json.replace("3.0", "-3.0");
        let err = serde_json::from_str::<Rect>(&degenerate).unwrap_err();
        assert!(err.to_string().contains("positive"));
    }

    #[test]
    fn test_rect_from_center() {
        let r = Rect::from_center(pt(0.0, 0.0), Size::new(mm(4.0), mm(2.0))).unwrap();
        assert_eq!(r.origin(), pt(-2.0, -1.0));
        assert_eq!(r.center(), pt(0.0, 0.0));
        assert_eq!(r.upper_right(), pt(2.0, 1.0));
    }
}
