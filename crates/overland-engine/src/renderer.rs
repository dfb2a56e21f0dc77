//! Drawing the chunk window.
//!
//! [`render_grid`] walks the window in its stable row-major order and hands
//! every cell to a [`TerrainRenderer`]. [`AsciiRenderer`] is the headless
//! back-end: it lays the window out as text for the debug log.

use overland_common::{WorldCoord, CELL_SIZE, CHUNK_SIZE};
use overland_world::{Cell, ChunkGrid, NoiseField, TerrainKind, WINDOW_DIM};
use tracing::debug;

/// Cells per side of the whole window.
const WINDOW_CELLS: usize = WINDOW_DIM * CHUNK_SIZE;

/// Per-frame context passed to renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameInfo {
    /// Simulation tick being drawn
    pub tick: u64,
    /// Top-left world corner of the window
    pub origin: WorldCoord,
    /// Tracked position this tick
    pub tracked: WorldCoord,
}

/// Consumer of terrain cells.
pub trait TerrainRenderer {
    /// Called once before any cell of a frame.
    fn begin_frame(&mut self, frame: &FrameInfo);

    /// Draws one cell.
    fn draw_cell(&mut self, cell: &Cell);

    /// Called once after the last cell of a frame.
    fn end_frame(&mut self);
}

/// Draws every resident cell. Read-only on the grid.
pub fn render_grid<N, R>(grid: &ChunkGrid<N>, tick: u64, tracked: WorldCoord, renderer: &mut R)
where
    N: NoiseField,
    R: TerrainRenderer + ?Sized,
{
    let frame = FrameInfo {
        tick,
        origin: grid.min_origin().to_world_coord(),
        tracked,
    };

    renderer.begin_frame(&frame);
    for cell in grid.cells() {
        renderer.draw_cell(cell);
    }
    renderer.end_frame();
}

/// Text glyph for a terrain kind.
#[must_use]
pub const fn glyph(kind: TerrainKind) -> char {
    match kind {
        TerrainKind::Grass => '.',
        TerrainKind::Stone => '#',
        TerrainKind::Water => '~',
    }
}

/// Renders the window as an 18×18 character map, north at the top.
#[derive(Debug)]
pub struct AsciiRenderer {
    frame: Option<FrameInfo>,
    /// Glyphs indexed `[y][x]` in window-local cells
    glyphs: [[char; WINDOW_CELLS]; WINDOW_CELLS],
    output: String,
    frames: u64,
}

impl Default for AsciiRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl AsciiRenderer {
    /// Creates an empty renderer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            frame: None,
            glyphs: [[' '; WINDOW_CELLS]; WINDOW_CELLS],
            output: String::new(),
            frames: 0,
        }
    }

    /// Text of the last completed frame.
    #[must_use]
    pub fn last_frame(&self) -> &str {
        &self.output
    }

    /// Number of frames completed.
    #[must_use]
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    fn local_cell(origin: WorldCoord, pos: WorldCoord) -> Option<(usize, usize)> {
        let x = (pos.x - origin.x).div_euclid(CELL_SIZE);
        let y = (pos.y - origin.y).div_euclid(CELL_SIZE);
        let range = 0..WINDOW_CELLS as i64;
        (range.contains(&x) && range.contains(&y)).then_some((x as usize, y as usize))
    }
}

impl TerrainRenderer for AsciiRenderer {
    fn begin_frame(&mut self, frame: &FrameInfo) {
        self.frame = Some(*frame);
        self.glyphs = [[' '; WINDOW_CELLS]; WINDOW_CELLS];
    }

    fn draw_cell(&mut self, cell: &Cell) {
        let Some(frame) = self.frame else {
            return;
        };
        if let Some((x, y)) = Self::local_cell(frame.origin, cell.position) {
            self.glyphs[y][x] = glyph(cell.kind);
        }
    }

    fn end_frame(&mut self) {
        let Some(frame) = self.frame.take() else {
            return;
        };
        if let Some((x, y)) = Self::local_cell(frame.origin, frame.tracked) {
            self.glyphs[y][x] = '@';
        }

        self.output.clear();
        for row in self.glyphs.iter().rev() {
            self.output.extend(row.iter());
            self.output.push('\n');
        }
        self.frames += 1;

        debug!(
            "Tick {} at ({}, {}):\n{}",
            frame.tick, frame.tracked.x, frame.tracked.y, self.output
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn banded(_: u32, x: i64, _: i64) -> f64 {
        // Columns 0-5 grass, 6-11 stone, 12+ water.
        match x {
            i64::MIN..=5 => 0.5,
            6..=11 => -0.3,
            _ => -0.9,
        }
    }

    #[test]
    fn test_ascii_frame_layout() {
        let grid = ChunkGrid::with_noise(0, banded);
        let mut renderer = AsciiRenderer::new();

        render_grid(&grid, 3, WorldCoord::new(0, 0), &mut renderer);

        let lines: Vec<_> = renderer.last_frame().lines().collect();
        assert_eq!(lines.len(), WINDOW_CELLS);
        assert_eq!(lines[0], "......######~~~~~~");
        // Bottom row holds y = 0, where the tracked position sits.
        assert_eq!(lines[WINDOW_CELLS - 1], "@.....######~~~~~~");
        assert_eq!(renderer.frames(), 1);
    }

    #[test]
    fn test_tracked_outside_window_not_marked() {
        let grid = ChunkGrid::with_noise(0, banded);
        let mut renderer = AsciiRenderer::new();
        render_grid(&grid, 0, WorldCoord::new(-500, 50), &mut renderer);
        assert!(!renderer.last_frame().contains('@'));
    }

    #[test]
    fn test_draw_cell_without_frame_is_ignored() {
        let mut renderer = AsciiRenderer::new();
        renderer.draw_cell(&Cell {
            position: WorldCoord::new(0, 0),
            kind: TerrainKind::Water,
        });
        renderer.end_frame();
        assert_eq!(renderer.frames(), 0);
        assert!(renderer.last_frame().is_empty());
    }

    #[derive(Default)]
    struct Counting {
        begun: u32,
        cells: usize,
        ended: u32,
    }

    impl TerrainRenderer for Counting {
        fn begin_frame(&mut self, _frame: &FrameInfo) {
            self.begun += 1;
        }
        fn draw_cell(&mut self, _cell: &Cell) {
            self.cells += 1;
        }
        fn end_frame(&mut self) {
            self.ended += 1;
        }
    }

    #[test]
    fn test_render_visits_every_cell_once() {
        let grid = ChunkGrid::with_noise(0, banded);
        let mut counter = Counting::default();
        render_grid(&grid, 0, WorldCoord::new(0, 0), &mut counter);
        assert_eq!((counter.begun, counter.ended), (1, 1));
        assert_eq!(counter.cells, WINDOW_CELLS * WINDOW_CELLS);
    }
}
