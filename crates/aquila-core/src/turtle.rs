use serde::{Deserialize, Serialize};

use crate::geometry::Point;
use crate::measure::Measurement;

/// A canonical cardinal direction, mapped to a heading in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub fn degrees(self) -> f64 {
        match self {
            Direction::Right => 0.0,
            Direction::Up => 90.0,
            Direction::Left => 180.0,
            Direction::Down => 270.0,
        }
    }
}

/// A located, directed cursor — a little Logo turtle. Used to walk a short
/// lead away from a pin or pad before routing a wire.
///
/// Immutable value: `forward` and the re-heading operations return new
/// turtles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Turtle {
    pub location: Point,
    /// Heading in degrees, counter-clockwise from the +x axis.
    pub degrees: f64,
}

impl Turtle {
    pub fn new(location: Point, degrees: f64) -> Self {
        Self { location, degrees }
    }

    /// Advance along the heading by `distance`. The direction components
    /// are a dimensionless unit vector; the step keeps `distance`'s unit.
    pub fn forward(&self, distance: Measurement) -> Turtle {
        let radians = self.degrees.to_radians();
        let (s, c) = radians.sin_cos();
        let end = self.location + Point::new(distance * c, distance * s);
        Turtle::new(end, self.degrees)
    }

    /// Replace the heading with an absolute angle; location unchanged.
    pub fn point_to(&self, degrees: f64) -> Turtle {
        Turtle::new(self.location, degrees)
    }

    pub fn point_toward(&self, direction: Direction) -> Turtle {
        self.point_to(direction.degrees())
    }
}
