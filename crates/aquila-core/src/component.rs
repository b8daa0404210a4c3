use std::sync::Arc;

use crate::error::ElementError;
use crate::geometry::Point;
use crate::library::Element;
use crate::transform::Transform;
use crate::turtle::{Direction, Turtle};

/// A placed instance of an [`Element`]: the element's local-frame geometry
/// bound to a world-space transform and a unique issued name.
///
/// Components are immutable values. "Moving" or "rotating" one returns a
/// new Component with an updated transform, so references captured earlier
/// (say, for net endpoints) keep observing their original geometry.
#[derive(Debug, Clone)]
pub struct Component {
    name: String,
    element: Arc<Element>,
    transform: Transform,
}

impl Component {
    pub fn new(name: impl Into<String>, element: Arc<Element>, transform: Transform) -> Self {
        Self {
            name: name.into(),
            element,
            transform,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn element(&self) -> &Arc<Element> {
        &self.element
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// The placement origin in world coordinates.
    pub fn location(&self) -> Point {
        self.transform.translate
    }

    /// World-space location of a named pin.
    pub fn pin_location(&self, name: &str) -> Result<Point, ElementError> {
        let pin = self.element.pin(name)?;
        Ok(self.transform.apply(pin.location))
    }

    /// World-space location of a named pad.
    pub fn pad_location(&self, name: &str) -> Result<Point, ElementError> {
        let pad = self.element.pad(name)?;
        Ok(self.transform.apply(pad.location))
    }

    /// World-space exit turtle at a pin: at the pin's transformed location,
    /// heading outward along the pin's transformed direction.
    pub fn turtle(&self, pin_name: &str) -> Result<Turtle, ElementError> {
        let local = self.element.turtle(pin_name)?;
        Ok(self.world_turtle(local))
    }

    /// World-space exit turtle at a pad, with the caller choosing the
    /// local-frame direction (pads have none of their own).
    pub fn pad_turtle(&self, pad_name: &str, direction: Direction) -> Result<Turtle, ElementError> {
        let local = self.element.pad_turtle(pad_name, direction)?;
        Ok(self.world_turtle(local))
    }

    /// Transform a local turtle into world space. The heading is recomputed
    /// from two transformed points rather than by transforming the angle:
    /// mirroring does not commute with angle negation, and the two-point
    /// form stays correct for any affine transform.
    fn world_turtle(&self, local: Turtle) -> Turtle {
        let unit_step = local.location.x.unit().one();
        let ahead = local.forward(unit_step);

        let start = self.transform.apply(local.location);
        let end = self.transform.apply(ahead.location);

        let delta = end - start;
        let degrees = delta
            .y
            .in_millimeters()
            .atan2(delta.x.in_millimeters())
            .to_degrees()
            .rem_euclid(360.0);
        Turtle::new(start, degrees)
    }

    /// A copy placed at `translate`; rotation and mirror intact.
    pub fn moved_to(&self, translate: Point) -> Component {
        Component {
            name: self.name.clone(),
            element: Arc::clone(&self.element),
            transform: self.transform.translated_to(translate),
        }
    }

    /// A copy rotated by an additional `delta` degrees.
    pub fn rotated_by(&self, delta: f64) -> Component {
        Component {
            name: self.name.clone(),
            element: Arc::clone(&self.element),
            transform: self.transform.rotated_by(delta),
        }
    }

    /// A copy with the rotation replaced outright.
    pub fn rotated_to(&self, degrees: f64) -> Component {
        Component {
            name: self.name.clone(),
            element: Arc::clone(&self.element),
            transform: self.transform.rotated_to(degrees),
        }
    }
}
