//! Engine configuration.
//!
//! World seed, noise, tick loop and scripted route settings. Loaded from and
//! saved to a TOML file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use overland_common::{ChunkCoord, CHUNK_SPAN};
use overland_world::{GeneratorConfig, DEFAULT_FREQUENCY};

use crate::walker::{Heading, RouteLeg};

/// Configuration file name.
pub const CONFIG_FILE: &str = "overland.toml";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading the file failed
    #[error("Failed to read config {path}: {source}")]
    Read {
        /// File that was read
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },
    /// Writing the file failed
    #[error("Failed to write config {path}: {source}")]
    Write {
        /// File that was written
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },
    /// The file is not valid TOML for this config
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    /// The config could not be encoded
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Engine configuration parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // === World Settings ===
    /// World seed (None = random)
    pub world_seed: Option<u32>,
    /// Noise frequency applied to cell coordinates
    pub noise_frequency: f64,
    /// Chunk the window starts centered on, as `[x, y]`
    pub spawn_chunk: [i32; 2],

    // === Simulation Settings ===
    /// Simulation ticks per second
    pub tick_rate: u32,
    /// Stop after this many ticks (0 = when the route ends)
    pub max_ticks: u32,
    /// Sleep between ticks to hold `tick_rate`
    pub realtime: bool,
    /// Distance the tracked position moves per tick, in pixels
    pub walk_speed: i64,

    // === Debug Settings ===
    /// Ticks between text renders of the window (0 = never)
    pub render_interval: u32,

    /// Route walked by the tracked position
    pub route: Vec<RouteLeg>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            // World
            world_seed: None,
            noise_frequency: DEFAULT_FREQUENCY,
            spawn_chunk: [1, 1],

            // Simulation
            tick_rate: 60,
            max_ticks: 0,
            realtime: false,
            walk_speed: 4,

            // Debug
            render_interval: 120,

            route: vec![
                RouteLeg::new(Heading::East, 240),
                RouteLeg::new(Heading::North, 240),
                RouteLeg::new(Heading::SouthWest, 180),
                RouteLeg::new(Heading::West, 240),
            ],
        }
    }
}

impl EngineConfig {
    /// Load configuration from the default file location.
    /// Returns default config if file doesn't exist.
    pub fn load() -> Self {
        Self::load_from(CONFIG_FILE)
    }

    /// Load configuration from a specific path.
    /// Returns default config if file doesn't exist or is invalid.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            info!("Config file not found, using defaults");
            return Self::default();
        }

        match Self::try_load_from(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("{e}, using defaults");
                Self::default()
            },
        }
    }

    /// Load configuration from a specific path, reporting any failure.
    pub fn try_load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&contents)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save configuration to a specific path.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let write_err = |source: io::Error| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents).map_err(write_err)?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Validate and clamp configuration values to sensible ranges.
    pub fn validate(&mut self) {
        // World
        if !self.noise_frequency.is_finite() {
            self.noise_frequency = DEFAULT_FREQUENCY;
        }
        self.noise_frequency = self.noise_frequency.clamp(0.0001, 1.0);
        self.spawn_chunk = self.spawn_chunk.map(|c| c.max(1));

        // Simulation
        self.tick_rate = self.tick_rate.clamp(1, 1000);
        // One tick must never carry the tracked position across a whole chunk.
        self.walk_speed = self.walk_speed.clamp(1, CHUNK_SPAN - 1);
    }

    /// Seed to use for this run, drawing a random one if none is configured.
    #[must_use]
    pub fn resolve_seed(&self) -> u32 {
        self.world_seed.unwrap_or_else(|| fastrand::u32(..))
    }

    /// Generator settings for `seed`.
    #[must_use]
    pub fn generator_config(&self, seed: u32) -> GeneratorConfig {
        GeneratorConfig {
            seed,
            frequency: self.noise_frequency,
        }
    }

    /// The spawn chunk as a coordinate.
    #[must_use]
    pub const fn spawn_chunk(&self) -> ChunkCoord {
        ChunkCoord::new(self.spawn_chunk[0], self.spawn_chunk[1])
    }

    /// Total ticks the route takes.
    #[must_use]
    pub fn route_ticks(&self) -> u64 {
        self.route.iter().map(|leg| u64::from(leg.ticks)).sum()
    }
}
