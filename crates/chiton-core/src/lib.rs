//! **chiton-core**: grid types for the cave risk map.
//!
//! This crate holds everything that describes a cave: cell geometry, the
//! bounded [`Risk`] value, and the immutable [`RiskMap`] with its parser,
//! neighbour enumeration and tiling. Searching lives in `chiton-paths`.

pub mod error;
pub mod geom;
pub mod map;
pub mod risk;

pub use error::{Error, Result};
pub use geom::{Cell, Extent};
pub use map::{DEFAULT_TILE_FACTOR, RiskMap};
pub use risk::Risk;
