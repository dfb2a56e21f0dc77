//! # Overland Common
//!
//! Common types shared across Project Overland subsystems:
//! - Coordinate types (world pixels, chunk grid, global cells)
//! - Fixed chunk geometry constants
//! - World-space bounds
//! - Prelude for convenient imports

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod bounds;
pub mod coords;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::bounds::*;
    pub use crate::coords::*;
}

pub use prelude::*;
