//! Axis-aligned world-space rectangles.

use serde::{Deserialize, Serialize};

use crate::coords::{ChunkCoord, WorldCoord, CHUNK_SPAN};

/// World-space rectangle in pixels, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bounds {
    /// Smallest x
    pub x_min: i64,
    /// Largest x
    pub x_max: i64,
    /// Smallest y
    pub y_min: i64,
    /// Largest y
    pub y_max: i64,
}

impl Bounds {
    /// Creates bounds from explicit edges.
    #[must_use]
    pub const fn new(x_min: i64, x_max: i64, y_min: i64, y_max: i64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Rectangle covered by the chunk at `coord`.
    ///
    /// The max edge is the first pixel of the next chunk, so neighbouring
    /// chunk bounds share an edge.
    #[must_use]
    pub const fn of_chunk(coord: ChunkCoord) -> Self {
        let corner = coord.to_world_coord();
        Self {
            x_min: corner.x,
            x_max: corner.x + CHUNK_SPAN,
            y_min: corner.y,
            y_max: corner.y + CHUNK_SPAN,
        }
    }

    /// Whether `pos` lies inside or on the edge.
    #[must_use]
    pub const fn contains(&self, pos: WorldCoord) -> bool {
        pos.x >= self.x_min && pos.x <= self.x_max && pos.y >= self.y_min && pos.y <= self.y_max
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> i64 {
        self.x_max - self.x_min
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> i64 {
        self.y_max - self.y_min
    }
}

impl std::fmt::Display for Bounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[({}, {}) x ({}, {})]",
            self.x_min, self.x_max, self.y_min, self.y_max
        )
    }
}
