//! Webb LED Layout
//!
//! Computes where every LED of the webb panel sits and how its strip pieces
//! connect, and turns that into the fixed-point lookup table the firmware
//! animates from.
//!
//! # Path Mini-Language
//!
//! Strips are described as walks along hexagon sides. `"UL UL UR"` names a
//! point by the sides walked from the origin; `"R DR !DL UR14"` places 13 LEDs
//! along R, 13 along DR, moves along DL without placing any, then places 14
//! along UR. LEDs sit in the middle of equal subdivisions of a side, never on
//! a vertex.
//!
//! # Pipeline
//!
//! 1. [`LayoutBuilder`] walks the path strings and numbers LEDs across all
//!    strips, recording one [`SubSegment`] per placing token.
//! 2. [`adjacency::resolve`] finds which sub-segment ends touch each other.
//! 3. [`projection::project`] quantizes to 16-bit Cartesian and polar form.
//! 4. [`LayoutTable`] collects the result for the header writer.
//!
//! Any inconsistency is an [`Error`] that aborts the whole run.

mod error;

pub mod adjacency;
pub mod builder;
pub mod config;
pub mod direction;
pub mod emit;
pub mod path;
pub mod projection;
pub mod webb;

pub use adjacency::{
    AdjacencyRecord, Neighbor, Neighbors, Side, ADJACENCY_COLUMNS, END_FLAG, NO_NEIGHBOR,
};
pub use builder::{Layout, LayoutBuilder, SequenceSpec, Strip, SubSegment};
pub use config::LayoutConfig;
pub use direction::{Direction, HexGeometry, Vec2};
pub use emit::{write_atomically, LayoutTable};
pub use error::{Error, Result};
pub use path::{distribute, resolve_path, Distribution, PathToken};
pub use projection::{FixedPoint, PolarPoint, Projection};

// The end flag must leave room for every LED index of a table stored as i16.
const _: () = assert!((END_FLAG as u32) < (i16::MAX as u32));
