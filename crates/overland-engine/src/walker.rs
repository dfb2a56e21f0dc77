//! Scripted tracked position.
//!
//! Stands in for the player: walks a fixed route at a fixed speed so the
//! chunk window has something to follow without an input device.

use overland_common::WorldCoord;
use serde::{Deserialize, Serialize};

/// Compass heading. North is increasing y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Heading {
    /// +y
    North,
    /// -y
    South,
    /// +x
    East,
    /// -x
    West,
    /// +x, +y
    NorthEast,
    /// -x, +y
    NorthWest,
    /// +x, -y
    SouthEast,
    /// -x, -y
    SouthWest,
}

impl Heading {
    /// Unit step `(dx, dy)` for this heading.
    #[must_use]
    pub const fn delta(self) -> (i64, i64) {
        match self {
            Self::North => (0, 1),
            Self::South => (0, -1),
            Self::East => (1, 0),
            Self::West => (-1, 0),
            Self::NorthEast => (1, 1),
            Self::NorthWest => (-1, 1),
            Self::SouthEast => (1, -1),
            Self::SouthWest => (-1, -1),
        }
    }
}

/// One straight segment of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteLeg {
    /// Direction of travel
    pub heading: Heading,
    /// Number of ticks spent on this leg
    pub ticks: u32,
}

impl RouteLeg {
    /// Creates a new leg.
    #[must_use]
    pub const fn new(heading: Heading, ticks: u32) -> Self {
        Self { heading, ticks }
    }
}

/// Moves a position along a route, one step per tick.
#[derive(Debug, Clone)]
pub struct Walker {
    position: WorldCoord,
    speed: i64,
    route: Vec<RouteLeg>,
    leg: usize,
    leg_tick: u32,
}

impl Walker {
    /// Creates a walker at `start`.
    #[must_use]
    pub fn new(start: WorldCoord, speed: i64, route: Vec<RouteLeg>) -> Self {
        Self {
            position: start,
            speed,
            route,
            leg: 0,
            leg_tick: 0,
        }
    }

    /// Current position.
    #[must_use]
    pub const fn position(&self) -> WorldCoord {
        self.position
    }

    /// Ticks left before the route ends.
    #[must_use]
    pub fn remaining_ticks(&self) -> u64 {
        self.route
            .iter()
            .skip(self.leg)
            .enumerate()
            .map(|(i, leg)| {
                let walked = if i == 0 { self.leg_tick } else { 0 };
                u64::from(leg.ticks - walked)
            })
            .sum()
    }

    /// Whether every leg has been walked.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.remaining_ticks() == 0
    }

    /// Advances one tick. Returns the new position, or `None` once the route is done.
    pub fn advance(&mut self) -> Option<WorldCoord> {
        while let Some(leg) = self.route.get(self.leg) {
            if self.leg_tick < leg.ticks {
                let (dx, dy) = leg.heading.delta();
                self.position = WorldCoord::new(
                    self.position.x.saturating_add(dx * self.speed),
                    self.position.y.saturating_add(dy * self.speed),
                );
                self.leg_tick += 1;
                return Some(self.position);
            }
            self.leg += 1;
            self.leg_tick = 0;
        }
        None
    }
}
