//! Generated terrain chunks.

use overland_common::{Bounds, CellCoord, ChunkCoord, WorldCoord, CHUNK_SIZE};
use serde::{Deserialize, Serialize};

use crate::generation::{classify, NoiseField, TerrainKind};

/// A single terrain cell, ready to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    /// Top-left corner in world pixels
    pub position: WorldCoord,
    /// Terrain kind
    pub kind: TerrainKind,
}

/// Per-kind cell totals for a chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KindCounts {
    /// Grass cells
    pub grass: usize,
    /// Stone cells
    pub stone: usize,
    /// Water cells
    pub water: usize,
}

impl KindCounts {
    fn add(&mut self, kind: TerrainKind) {
        match kind {
            TerrainKind::Grass => self.grass += 1,
            TerrainKind::Stone => self.stone += 1,
            TerrainKind::Water => self.water += 1,
        }
    }

    /// Total number of cells counted.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.grass + self.stone + self.water
    }
}

/// A square block of generated terrain.
///
/// Built once from `(origin, seed)` and never modified; the same inputs
/// always produce the same cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Chunk-grid coordinate
    origin: ChunkCoord,
    /// World seed the cells were generated from
    seed: u32,
    /// Cells indexed `[i][j]`, `i` along x and `j` along y
    cells: [[Cell; CHUNK_SIZE]; CHUNK_SIZE],
}

impl Chunk {
    /// Generates the chunk at `origin`.
    ///
    /// Noise is sampled in global cell space so a chunk's last column and
    /// its east neighbour's first column are adjacent samples.
    #[must_use]
    pub fn generate<N: NoiseField + ?Sized>(origin: ChunkCoord, seed: u32, noise: &N) -> Self {
        let cells = std::array::from_fn(|i| {
            std::array::from_fn(|j| {
                let at = origin.cell_coord(i, j);
                Cell {
                    position: at.to_world_coord(),
                    kind: classify(noise.sample(seed, at.x, at.y)),
                }
            })
        });

        Self {
            origin,
            seed,
            cells,
        }
    }

    /// Generates a fresh copy from this chunk's own seed and origin.
    #[must_use]
    pub fn regenerate<N: NoiseField + ?Sized>(&self, noise: &N) -> Self {
        Self::generate(self.origin, self.seed, noise)
    }

    /// Returns the chunk-grid coordinate.
    #[must_use]
    pub const fn origin(&self) -> ChunkCoord {
        self.origin
    }

    /// Returns the world seed.
    #[must_use]
    pub const fn seed(&self) -> u32 {
        self.seed
    }

    /// World-space rectangle covered by this chunk.
    #[must_use]
    pub const fn bounds(&self) -> Bounds {
        Bounds::of_chunk(self.origin)
    }

    /// Gets a cell at local coordinates.
    #[must_use]
    pub fn cell(&self, i: usize, j: usize) -> Option<&Cell> {
        self.cells.get(i)?.get(j)
    }

    /// Global cell coordinate the noise was sampled at for local cell `(i, j)`.
    #[must_use]
    pub const fn sample_coord(&self, i: usize, j: usize) -> CellCoord {
        self.origin.cell_coord(i, j)
    }

    /// Iterates all cells in draw order (x-major, then y).
    pub fn cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.cells.iter().flatten()
    }

    /// Counts cells per terrain kind.
    #[must_use]
    pub fn kind_counts(&self) -> KindCounts {
        let mut counts = KindCounts::default();
        for cell in self.cells() {
            counts.add(cell.kind);
        }
        counts
    }
}
