//! Simulation loop.
//!
//! Each tick: the tracked position is finalized, the chunk window updates
//! against it, then the window is drawn. Nothing else touches the grid.

use std::thread;
use std::time::{Duration, Instant};

use overland_world::{ChunkGrid, NoiseField, ShiftDirection, SimplexField};
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::renderer::{render_grid, AsciiRenderer};
use crate::walker::Walker;

/// Counters collected over a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickStats {
    /// Ticks simulated
    pub ticks: u64,
    /// Shifts per direction, in [`ShiftDirection::PRIORITY`] order
    pub shifts: [u64; 4],
    /// Ticks where the tracked position was outside bounds but no shift happened
    pub held: u64,
    /// Slowest single window update
    pub worst_update: Duration,
}

impl TickStats {
    fn record_shift(&mut self, direction: ShiftDirection, elapsed: Duration) {
        if let Some(i) = ShiftDirection::PRIORITY.iter().position(|d| *d == direction) {
            self.shifts[i] += 1;
        }
        self.worst_update = self.worst_update.max(elapsed);
    }

    /// Shifts applied toward `direction`.
    #[must_use]
    pub fn shifts_toward(&self, direction: ShiftDirection) -> u64 {
        ShiftDirection::PRIORITY
            .iter()
            .position(|d| *d == direction)
            .map_or(0, |i| self.shifts[i])
    }

    /// Shifts applied in any direction.
    #[must_use]
    pub fn total_shifts(&self) -> u64 {
        self.shifts.iter().sum()
    }
}

/// World state owned by the loop: the chunk window and what it follows.
pub struct Simulation<N: NoiseField> {
    grid: ChunkGrid<N>,
    walker: Walker,
    renderer: AsciiRenderer,
    render_interval: u32,
    stats: TickStats,
}

impl<N: NoiseField> Simulation<N> {
    /// Creates a simulation. `render_interval` of 0 disables drawing.
    #[must_use]
    pub fn new(grid: ChunkGrid<N>, walker: Walker, render_interval: u32) -> Self {
        Self {
            grid,
            walker,
            renderer: AsciiRenderer::new(),
            render_interval,
            stats: TickStats::default(),
        }
    }

    /// Runs one tick. Returns `false` once the walker's route is done.
    pub fn step(&mut self) -> bool {
        let Some(tracked) = self.walker.advance() else {
            return false;
        };

        let started = Instant::now();
        let shift = self.grid.update(tracked.x, tracked.y);
        let elapsed = started.elapsed();
        debug_assert_eq!(self.grid.bounds(), self.grid.center().bounds());

        self.stats.ticks += 1;
        match shift {
            Some(direction) => self.stats.record_shift(direction, elapsed),
            None if !self.grid.bounds().contains(tracked) => self.stats.held += 1,
            None => {},
        }

        if self.render_interval > 0 && self.stats.ticks % u64::from(self.render_interval) == 0 {
            render_grid(&self.grid, self.stats.ticks, tracked, &mut self.renderer);
        }
        true
    }

    /// The chunk window.
    #[must_use]
    pub const fn grid(&self) -> &ChunkGrid<N> {
        &self.grid
    }

    /// The tracked-position source.
    #[must_use]
    pub const fn walker(&self) -> &Walker {
        &self.walker
    }

    /// The text renderer.
    #[must_use]
    pub const fn renderer(&self) -> &AsciiRenderer {
        &self.renderer
    }

    /// Counters so far.
    #[must_use]
    pub const fn stats(&self) -> &TickStats {
        &self.stats
    }
}

/// Runs the configured simulation to completion and returns its counters.
pub fn run(config: &EngineConfig) -> TickStats {
    let seed = config.resolve_seed();
    let generator = config.generator_config(seed);
    let grid = ChunkGrid::centered_on(
        seed,
        SimplexField::from_config(&generator),
        config.spawn_chunk(),
    );
    let start = grid.center().origin().center_world_coord();
    let walker = Walker::new(start, config.walk_speed, config.route.clone());

    info!(
        "World seed {seed}, frequency {}, tracked start ({}, {}), route {} ticks",
        generator.frequency,
        start.x,
        start.y,
        config.route_ticks()
    );

    let mut sim = Simulation::new(grid, walker, config.render_interval);
    let tick_budget = Duration::from_secs_f64(1.0 / f64::from(config.tick_rate.max(1)));

    loop {
        if config.max_ticks > 0 && sim.stats().ticks >= u64::from(config.max_ticks) {
            debug!("Tick limit {} reached", config.max_ticks);
            break;
        }

        let tick_start = Instant::now();
        if !sim.step() {
            break;
        }

        if config.realtime {
            if let Some(rest) = tick_budget.checked_sub(tick_start.elapsed()) {
                thread::sleep(rest);
            }
        }
    }

    let stats = sim.stats().clone();
    let center = sim.grid().center().origin();
    let tracked = sim.walker().position();
    info!(
        "Ran {} ticks: {} shifts (W {} / E {} / S {} / N {}), {} ticks held at the world edge",
        stats.ticks,
        stats.total_shifts(),
        stats.shifts_toward(ShiftDirection::West),
        stats.shifts_toward(ShiftDirection::East),
        stats.shifts_toward(ShiftDirection::South),
        stats.shifts_toward(ShiftDirection::North),
        stats.held
    );
    info!(
        "Final center chunk ({}, {}), bounds {}, tracked ({}, {}), route complete: {}, slowest update {:?}",
        center.x,
        center.y,
        sim.grid().bounds(),
        tracked.x,
        tracked.y,
        sim.walker().is_finished(),
        stats.worst_update
    );
    if sim.renderer().frames() > 0 {
        info!("Final window:\n{}", sim.renderer().last_frame());
    }
    stats
}
