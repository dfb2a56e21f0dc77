//! Coordinate types for world pixels, chunk grid and global cell positions.
//!
//! Three spaces are in play:
//! - **World** space, in pixels. Tracked positions and cell draw positions live here.
//! - **Chunk-grid** space, one unit per chunk. Identifies a chunk in the unbounded grid.
//! - **Cell** space, one unit per terrain cell, continuous across chunk edges.
//!   Noise is sampled here so neighbouring chunks line up.

use serde::{Deserialize, Serialize};

/// Number of cells along one side of a chunk.
pub const CHUNK_SIZE: usize = 6;

/// Side length of one cell in pixels.
pub const CELL_SIZE: i64 = 64;

/// Side length of one chunk in pixels.
pub const CHUNK_SPAN: i64 = CHUNK_SIZE as i64 * CELL_SIZE;

/// World coordinate in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct WorldCoord {
    /// X coordinate in world space
    pub x: i64,
    /// Y coordinate in world space
    pub y: i64,
}

impl WorldCoord {
    /// Creates a new world coordinate.
    #[must_use]
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Returns the chunk containing this position.
    #[must_use]
    pub const fn to_chunk_coord(self) -> ChunkCoord {
        ChunkCoord {
            x: self.x.div_euclid(CHUNK_SPAN) as i32,
            y: self.y.div_euclid(CHUNK_SPAN) as i32,
        }
    }

    /// Returns the cell containing this position.
    #[must_use]
    pub const fn to_cell_coord(self) -> CellCoord {
        CellCoord {
            x: self.x.div_euclid(CELL_SIZE),
            y: self.y.div_euclid(CELL_SIZE),
        }
    }
}

/// Chunk coordinate (identifies a chunk in the chunk grid, not pixels).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ChunkCoord {
    /// X coordinate in chunk space
    pub x: i32,
    /// Y coordinate in chunk space
    pub y: i32,
}

impl ChunkCoord {
    /// Creates a new chunk coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the neighbouring coordinate `(dx, dy)` away, or `None` on `i32` overflow.
    #[must_use]
    pub fn offset(self, dx: i32, dy: i32) -> Option<Self> {
        Some(Self {
            x: self.x.checked_add(dx)?,
            y: self.y.checked_add(dy)?,
        })
    }

    /// Top-left corner of the chunk in world pixels.
    #[must_use]
    pub const fn to_world_coord(self) -> WorldCoord {
        WorldCoord {
            x: self.x as i64 * CHUNK_SPAN,
            y: self.y as i64 * CHUNK_SPAN,
        }
    }

    /// Center of the chunk in world pixels.
    #[must_use]
    pub const fn center_world_coord(self) -> WorldCoord {
        let corner = self.to_world_coord();
        WorldCoord {
            x: corner.x + CHUNK_SPAN / 2,
            y: corner.y + CHUNK_SPAN / 2,
        }
    }

    /// Global cell coordinate of local cell `(i, j)` inside this chunk.
    #[must_use]
    pub const fn cell_coord(self, i: usize, j: usize) -> CellCoord {
        CellCoord {
            x: self.x as i64 * CHUNK_SIZE as i64 + i as i64,
            y: self.y as i64 * CHUNK_SIZE as i64 + j as i64,
        }
    }
}

/// Global cell coordinate. Continuous across chunk boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CellCoord {
    /// X coordinate in cell space
    pub x: i64,
    /// Y coordinate in cell space
    pub y: i64,
}

impl CellCoord {
    /// Creates a new cell coordinate.
    #[must_use]
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Top-left corner of the cell in world pixels.
    #[must_use]
    pub const fn to_world_coord(self) -> WorldCoord {
        WorldCoord {
            x: self.x * CELL_SIZE,
            y: self.y * CELL_SIZE,
        }
    }
}
