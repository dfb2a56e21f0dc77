//! Procedural terrain generation.
//!
//! Terrain is a pure function of `(seed, cell coordinate)`: a [`NoiseField`]
//! produces a sample in roughly `[-1, 1]` and [`classify`] turns it into a
//! [`TerrainKind`].

use noise::{NoiseFn, OpenSimplex};
use serde::{Deserialize, Serialize};

/// Default noise frequency applied to cell coordinates.
pub const DEFAULT_FREQUENCY: f64 = 0.01;

/// Samples above this are grass.
pub const GRASS_THRESHOLD: f64 = -0.25;

/// Samples above this (and not grass) are stone. Everything below is water.
pub const STONE_THRESHOLD: f64 = -0.35;

/// Deterministic 2D noise over integer cell coordinates.
///
/// Implementations must return the same value for the same
/// `(seed, x, y)` every time and have no side effects.
pub trait NoiseField {
    /// Samples the field at global cell coordinate `(x, y)`.
    fn sample(&self, seed: u32, x: i64, y: i64) -> f64;

    /// Prepares the field for sampling with `seed`. Does nothing by default.
    fn use_seed(&mut self, _seed: u32) {}
}

impl<F> NoiseField for F
where
    F: Fn(u32, i64, i64) -> f64,
{
    fn sample(&self, seed: u32, x: i64, y: i64) -> f64 {
        self(seed, x, y)
    }
}

/// World generator configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// World seed
    pub seed: u32,
    /// Noise frequency (smaller = smoother terrain)
    pub frequency: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: 12345,
            frequency: DEFAULT_FREQUENCY,
        }
    }
}

/// OpenSimplex noise field.
///
/// Holds a generator for one seed, set at construction or by
/// [`NoiseField::use_seed`]. Other seeds get a fresh generator per sample.
#[derive(Clone)]
pub struct SimplexField {
    seed: u32,
    frequency: f64,
    generator: OpenSimplex,
}

impl SimplexField {
    /// Creates a field for `seed` sampling at `frequency`.
    #[must_use]
    pub fn new(seed: u32, frequency: f64) -> Self {
        Self {
            seed,
            frequency,
            generator: OpenSimplex::new(seed),
        }
    }

    /// Creates a field from a generator config.
    #[must_use]
    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self::new(config.seed, config.frequency)
    }

    /// Creates a field for `seed` with the default frequency.
    #[must_use]
    pub fn with_seed(seed: u32) -> Self {
        Self::new(seed, DEFAULT_FREQUENCY)
    }

    /// Seed of the cached generator.
    #[must_use]
    pub const fn seed(&self) -> u32 {
        self.seed
    }

    /// Sampling frequency.
    #[must_use]
    pub const fn frequency(&self) -> f64 {
        self.frequency
    }
}

impl std::fmt::Debug for SimplexField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimplexField")
            .field("seed", &self.seed)
            .field("frequency", &self.frequency)
            .finish_non_exhaustive()
    }
}

impl NoiseField for SimplexField {
    fn sample(&self, seed: u32, x: i64, y: i64) -> f64 {
        let point = [x as f64 * self.frequency, y as f64 * self.frequency];
        if seed == self.seed {
            self.generator.get(point)
        } else {
            OpenSimplex::new(seed).get(point)
        }
    }

    fn use_seed(&mut self, seed: u32) {
        if seed != self.seed {
            *self = Self::new(seed, self.frequency);
        }
    }
}

/// Kind of terrain in a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TerrainKind {
    /// Walkable ground.
    #[default]
    Grass,
    /// Rocky border between grass and water.
    Stone,
    /// Open water.
    Water,
}

impl TerrainKind {
    /// All terrain kinds, in classification order.
    pub const ALL: [Self; 3] = [Self::Grass, Self::Stone, Self::Water];

    /// Get the display name for this terrain kind.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Grass => "Grass",
            Self::Stone => "Stone",
            Self::Water => "Water",
        }
    }
}

impl std::fmt::Display for TerrainKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Maps a noise sample to a terrain kind.
///
/// Thresholds are checked highest first; the first match wins. NaN matches
/// neither comparison and comes out as water.
#[must_use]
pub fn classify(value: f64) -> TerrainKind {
    if value > GRASS_THRESHOLD {
        TerrainKind::Grass
    } else if value > STONE_THRESHOLD {
        TerrainKind::Stone
    } else {
        TerrainKind::Water
    }
}
