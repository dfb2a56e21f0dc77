//! # Overland World
//!
//! World streaming for Project Overland.
//!
//! This crate handles:
//! - Deterministic terrain generation from a seed
//! - Fixed-size terrain chunks
//! - The 3×3 chunk window that follows the player

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod chunk;
pub mod generation;
pub mod streaming;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::chunk::*;
    pub use crate::generation::*;
    pub use crate::streaming::*;
}

pub use prelude::*;
