// src/board.rs

use rand::Rng;

use crate::error::{Axis, ConfigurationError, MIN_CELL_SIZE, Shortfall};
use crate::hue::wrap_hue;
use crate::patterns::Pattern;

pub const DEFAULT_CELL_PADDING: usize = 4;
pub const DEFAULT_RANDOMIZE_RATIO: u32 = 5;
pub const DEFAULT_MAX_CELL_MUTATION: f64 = 0.05;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Cell {
    /// Hue as a fraction of the color wheel, always in [0, 1).
    pub color: f64,
    pub alive_now: bool,
    /// Scratch slot for the generation being computed.
    pub alive_next_tick: bool,
}

impl Cell {
    pub const DEAD: Cell = Cell {
        color: 0.0,
        alive_now: false,
        alive_next_tick: false,
    };
}

impl Default for Cell {
    fn default() -> Self {
        Cell::DEAD
    }
}

/// Returned for every out-of-range lookup when wrapping is off. Read-only:
/// nothing can hand out a `&mut` to it, so it stays dead forever.
static NULL_CELL: Cell = Cell::DEAD;

/// Signed pixel rectangle. Frames around edge cells may start at -1.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

/// Pixel geometry derived once from canvas and grid size.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    pub canvas_width: usize,
    pub canvas_height: usize,
    pub cell_size: usize,
    pub cell_padding: usize,
    pub padding_top: usize,
    pub padding_left: usize,
}

impl Layout {
    /// Pixel pitch from one cell's left edge to the next.
    #[inline]
    pub fn pitch(&self) -> usize {
        self.cell_size + self.cell_padding
    }

    #[inline]
    fn span(&self, cells: usize) -> usize {
        cells * self.pitch() - self.cell_padding
    }

    /// Top-left corner of cell (x, y) on the canvas.
    pub fn cell_origin(&self, x: usize, y: usize) -> (usize, usize) {
        (
            self.padding_left + x * self.pitch(),
            self.padding_top + y * self.pitch(),
        )
    }

    pub fn cell_rect(&self, x: usize, y: usize) -> Rect {
        let (px, py) = self.cell_origin(x, y);
        Rect {
            x: px as i32,
            y: py as i32,
            w: self.cell_size as u32,
            h: self.cell_size as u32,
        }
    }
}

/// Pixels needed for `cells` minimum-size cells, `None` past `usize::MAX`.
fn required_span(cells: usize, padding: usize) -> Option<usize> {
    MIN_CELL_SIZE
        .checked_add(padding)?
        .checked_mul(cells)
        .map(|span| span - padding)
}

// -----------------------------
// Board
// -----------------------------
#[derive(Clone, Debug)]
pub struct Board {
    w: usize,
    h: usize,
    cells: Vec<Cell>,
    wrap: bool,
    layout: Layout,
    max_cell_mutation: f64,
}

impl Board {
    /// Fit a `grid_width` x `grid_height` grid into the canvas, all cells dead.
    pub fn new(
        canvas_width: usize,
        canvas_height: usize,
        grid_width: usize,
        grid_height: usize,
        cell_padding: usize,
    ) -> Result<Self, ConfigurationError> {
        if grid_width == 0 || grid_height == 0 {
            return Err(ConfigurationError::EmptyGrid {
                width: grid_width,
                height: grid_height,
            });
        }

        let mut shortfalls = Vec::new();
        for (axis, cells, available_px) in [
            (Axis::Width, grid_width, canvas_width),
            (Axis::Height, grid_height, canvas_height),
        ] {
            let required = required_span(cells, cell_padding);
            if required.is_none_or(|px| px > available_px) {
                shortfalls.push(Shortfall {
                    axis,
                    cells,
                    required_px: required.unwrap_or(usize::MAX),
                    available_px,
                });
            }
        }
        if !shortfalls.is_empty() {
            return Err(ConfigurationError::CanvasTooSmall { shortfalls });
        }

        // largest square cell that fits both axes
        let cell_size_x = canvas_width.saturating_add(cell_padding) / grid_width - cell_padding;
        let cell_size_y = canvas_height.saturating_add(cell_padding) / grid_height - cell_padding;
        let cell_size = cell_size_x.min(cell_size_y);

        let mut layout = Layout {
            canvas_width,
            canvas_height,
            cell_size,
            cell_padding,
            padding_top: 0,
            padding_left: 0,
        };
        layout.padding_left = (canvas_width - layout.span(grid_width)) / 2;
        layout.padding_top = (canvas_height - layout.span(grid_height)) / 2;

        Ok(Self {
            w: grid_width,
            h: grid_height,
            cells: vec![Cell::DEAD; grid_width * grid_height],
            wrap: false,
            layout,
            max_cell_mutation: DEFAULT_MAX_CELL_MUTATION,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.w
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.h
    }

    #[inline]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    #[inline]
    pub fn wrap(&self) -> bool {
        self.wrap
    }

    pub fn set_wrap(&mut self, wrap: bool) {
        self.wrap = wrap;
    }

    pub fn toggle_wrap(&mut self) {
        self.wrap = !self.wrap;
    }

    #[inline]
    pub fn max_cell_mutation(&self) -> f64 {
        self.max_cell_mutation
    }

    pub fn set_max_cell_mutation(&mut self, m: f64) {
        self.max_cell_mutation = m.abs();
    }

    /// Grid bounding box (x, y, w, h) occupied on the canvas.
    pub fn grid_extent(&self) -> Rect {
        Rect {
            x: self.layout.padding_left as i32,
            y: self.layout.padding_top as i32,
            w: self.layout.span(self.w) as u32,
            h: self.layout.span(self.h) as u32,
        }
    }

    /// Flat index of (x, y) under the current wrap policy.
    #[inline]
    pub(crate) fn index(&self, x: i32, y: i32) -> Option<usize> {
        let (w, h) = (self.w as i32, self.h as i32);
        if self.wrap {
            let x = x.rem_euclid(w) as usize;
            let y = y.rem_euclid(h) as usize;
            return Some(y * self.w + x);
        }
        if x < 0 || y < 0 || x >= w || y >= h {
            return None;
        }
        Some(y as usize * self.w + x as usize)
    }

    /// Bounds-checked lookup; off-grid positions read as the null cell.
    #[inline]
    pub fn cell(&self, x: i32, y: i32) -> &Cell {
        match self.index(x, y) {
            Some(i) => &self.cells[i],
            None => &NULL_CELL,
        }
    }

    /// Writable lookup; writes to off-grid positions have nowhere to go.
    #[inline]
    pub fn cell_mut(&mut self, x: i32, y: i32) -> Option<&mut Cell> {
        let i = self.index(x, y)?;
        Some(&mut self.cells[i])
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    pub fn set_alive(&mut self, x: i32, y: i32, alive: bool) {
        if let Some(c) = self.cell_mut(x, y) {
            c.alive_now = alive;
        }
    }

    pub fn set_color(&mut self, x: i32, y: i32, hue: f64) {
        if let Some(c) = self.cell_mut(x, y) {
            c.color = wrap_hue(hue);
        }
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|c| c.alive_now).count()
    }

    /// Live cells as (x, y), row-major.
    pub fn alive_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.alive_now)
            .map(|(i, _)| (i % self.w, i / self.w))
            .collect()
    }

    /// Each cell comes alive with probability 1/ratio; colors are kept.
    pub fn randomize_board<R: Rng + ?Sized>(&mut self, rng: &mut R, ratio: u32) {
        let ratio = ratio.max(1);
        for c in &mut self.cells {
            c.alive_now = rng.random_range(0..ratio) == 0;
        }
    }

    /// Fresh uniform hue for every cell, alive or not.
    pub fn randomize_colors<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for c in &mut self.cells {
            c.color = rng.random::<f64>();
        }
    }

    /// Kill every cell. Hues stay resident; only live neighbors are ever
    /// read for inheritance so stale hues cannot resurface.
    pub fn clear(&mut self) {
        for c in &mut self.cells {
            c.alive_now = false;
            c.alive_next_tick = false;
        }
    }

    /// Set a pattern's cells alive with its origin at (x, y).
    pub fn stamp(&mut self, pattern: &Pattern, x: i32, y: i32) {
        for &(dx, dy) in pattern.cells {
            self.set_alive(x + dx as i32, y + dy as i32, true);
        }
    }
}
