//! # Aquila Core
//!
//! Unit-safe geometric placement core for EAGLE script generation:
//! measurements, 2-D primitives, affine transforms, turtle cursors, library
//! element definitions, placed components, and deterministic instance
//! naming.
//!
//! Everything here is an immutable value except [`NamingAuthority`], which
//! is owned by a generation session. The command-emitting layer lives in
//! `aquila-script`.

pub mod component;
pub mod error;
pub mod geometry;
pub mod library;
pub mod measure;
pub mod naming;
pub mod transform;
pub mod turtle;

pub use component::Component;
pub use error::{ElementError, GeometryError, NamingError};
pub use geometry::{Point, Rect, Size};
pub use library::{Element, Library, Pad, Pin};
pub use measure::{LengthUnit, Measurement};
pub use naming::NamingAuthority;
pub use transform::Transform;
pub use turtle::{Direction, Turtle};
