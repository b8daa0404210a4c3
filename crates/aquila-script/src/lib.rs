//! # Aquila Script
//!
//! EAGLE command emitter over the `aquila-core` placement model. Builds a
//! replayable `.scr` command buffer: grids, libraries, component placement
//! (with session-unique naming), nets, wires, arcs, and polygons.
//!
//! There are probably reasons to use EAGLE's own ULP support instead, but
//! generating a command script keeps the whole design programmable from
//! one place, at the cost of a replay step.

pub mod layer;
pub mod script;

pub use layer::Layer;
pub use script::{GridKind, GridOptions, Script};
