use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

use crate::error::GeometryError;

/// The closed set of length units the generator understands.
///
/// EAGLE scripts only ever deal in these three, so a closed enum with a
/// conversion-factor table keeps the unit math exhaustively checkable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LengthUnit {
    Millimeter,
    Inch,
    /// One thousandth of an inch.
    Mil,
}

impl LengthUnit {
    /// Millimeters per one unit. The single source of conversion truth.
    pub fn to_millimeters(self) -> f64 {
        match self {
            LengthUnit::Millimeter => 1.0,
            LengthUnit::Inch => 25.4,
            LengthUnit::Mil => 0.0254,
        }
    }

    pub fn abbreviation(self) -> &'static str {
        match self {
            LengthUnit::Millimeter => "mm",
            LengthUnit::Inch => "in",
            LengthUnit::Mil => "mil",
        }
    }

    pub fn zero(self) -> Measurement {
        Measurement {
            value: 0.0,
            unit: self,
        }
    }

    pub fn one(self) -> Measurement {
        Measurement {
            value: 1.0,
            unit: self,
        }
    }
}

/// A unit-tagged scalar length.
///
/// Arithmetic converts the right operand into the left operand's unit and
/// returns a result in the left operand's unit. Comparisons normalize both
/// sides to millimeters and compare the raw f64 values exactly; there is no
/// epsilon.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Measurement {
    value: f64,
    unit: LengthUnit,
}

impl Measurement {
    /// Create a measurement, rejecting non-finite values. A `Measurement`
    /// that exists is always finite.
    pub fn new(value: f64, unit: LengthUnit) -> Result<Self, GeometryError> {
        if !value.is_finite() {
            return Err(GeometryError::NonFinite { value });
        }
        Ok(Self { value, unit })
    }

    pub fn millimeters(value: f64) -> Result<Self, GeometryError> {
        Self::new(value, LengthUnit::Millimeter)
    }

    pub fn inches(value: f64) -> Result<Self, GeometryError> {
        Self::new(value, LengthUnit::Inch)
    }

    pub fn mils(value: f64) -> Result<Self, GeometryError> {
        Self::new(value, LengthUnit::Mil)
    }

    /// Internal constructor for arithmetic results. Finite inputs stay
    /// finite for every operation we provide, short of ~1e308 overflow.
    pub(crate) fn raw(value: f64, unit: LengthUnit) -> Self {
        debug_assert!(value.is_finite(), "arithmetic produced {value}");
        Self { value, unit }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> LengthUnit {
        self.unit
    }

    /// Convert to another unit. The only place unit conversion happens:
    /// out through millimeters, back into the target.
    pub fn to(&self, unit: LengthUnit) -> Measurement {
        let mm = self.value * self.unit.to_millimeters();
        Measurement::raw(mm / unit.to_millimeters(), unit)
    }

    /// The millimeter-normalized value used for comparison.
    pub fn in_millimeters(&self) -> f64 {
        self.value * self.unit.to_millimeters()
    }

    pub fn is_positive(&self) -> bool {
        self.value > 0.0
    }

    pub fn is_non_negative(&self) -> bool {
        self.value >= 0.0
    }

    /// The smallest multiple of `step` that is >= self, in self's unit.
    /// A value already on the grid snaps to itself. A step that is not
    /// strictly positive defines no grid; the value is returned unchanged.
    pub fn snap_up(&self, step: Measurement) -> Measurement {
        let by = step.to(self.unit).value;
        if by <= 0.0 {
            return *self;
        }
        Measurement::raw(snap_up_f64(self.value, by), self.unit)
    }

    /// The largest multiple of `step` that is <= self, in self's unit.
    /// A step that is not strictly positive returns the value unchanged.
    pub fn snap_down(&self, step: Measurement) -> Measurement {
        let by = step.to(self.unit).value;
        if by <= 0.0 {
            return *self;
        }
        Measurement::raw(snap_down_f64(self.value, by), self.unit)
    }

    /// Invoke `f` for self, self + by, self + 2*by, ... while <= `end`.
    /// The step must be strictly positive for the walk to advance; anything
    /// else yields nothing, keeping the iteration bounded.
    pub fn step_to<F: FnMut(Measurement)>(&self, end: Measurement, by: Measurement, mut f: F) {
        if by.in_millimeters() <= 0.0 {
            return;
        }
        let mut step = 0.0;
        loop {
            let v = *self + by * step;
            if v > end {
                break;
            }
            f(v);
            step += 1.0;
        }
    }
}

/// Odd-symmetric: `snap_up(-v) == -snap_down(v)`.
fn snap_up_f64(v: f64, by: f64) -> f64 {
    if v < 0.0 {
        return -snap_down_f64(-v, by);
    }
    let remainder = v % by;
    if remainder == 0.0 {
        // 10.snap_up(10) is 10, not 20.
        v
    } else {
        v + (by - remainder)
    }
}

fn snap_down_f64(v: f64, by: f64) -> f64 {
    if v < 0.0 {
        return -snap_up_f64(-v, by);
    }
    v - v % by
}

// ── Comparison: millimeter-normalized, exact ─────────────────────────

impl PartialEq for Measurement {
    fn eq(&self, other: &Self) -> bool {
        self.in_millimeters() == other.in_millimeters()
    }
}

impl PartialOrd for Measurement {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.in_millimeters().partial_cmp(&other.in_millimeters())
    }
}

// ── Arithmetic: result carries the left operand's unit ───────────────

impl Add for Measurement {
    type Output = Measurement;

    fn add(self, rhs: Measurement) -> Measurement {
        let rhs = rhs.to(self.unit);
        Measurement::raw(self.value + rhs.value, self.unit)
    }
}

impl Sub for Measurement {
    type Output = Measurement;

    fn sub(self, rhs: Measurement) -> Measurement {
        let rhs = rhs.to(self.unit);
        Measurement::raw(self.value - rhs.value, self.unit)
    }
}

impl Neg for Measurement {
    type Output = Measurement;

    fn neg(self) -> Measurement {
        Measurement::raw(-self.value, self.unit)
    }
}

impl Mul<f64> for Measurement {
    type Output = Measurement;

    fn mul(self, scale: f64) -> Measurement {
        Measurement::raw(self.value * scale, self.unit)
    }
}

impl Mul<Measurement> for f64 {
    type Output = Measurement;

    fn mul(self, m: Measurement) -> Measurement {
        Measurement::raw(m.value * self, m.unit)
    }
}

/// Formats as value + abbreviation, e.g. `3.5mm`.
impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit.abbreviation())
    }
}
