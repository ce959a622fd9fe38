// src/cursor.rs

use crate::board::Board;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PaintingMode {
    #[default]
    NotPainting,
    PaintAlive,
    PaintDead,
}

impl PaintingMode {
    fn target(self) -> Option<bool> {
        match self {
            PaintingMode::NotPainting => None,
            PaintingMode::PaintAlive => Some(true),
            PaintingMode::PaintDead => Some(false),
        }
    }
}

/// Pointer state kept beside the board, never inside it.
///
/// The hovered cell is a plain grid coordinate; it is re-checked against the
/// board on every use, so a rebuilt or smaller board just reads as "nothing
/// hovered".
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CursorState {
    hovered: Option<(usize, usize)>,
    enabled: bool,
    mode: PaintingMode,
}

impl Default for CursorState {
    fn default() -> Self {
        Self {
            hovered: None,
            enabled: true,
            mode: PaintingMode::NotPainting,
        }
    }
}

impl CursorState {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            ..Self::default()
        }
    }

    #[inline]
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    #[inline]
    pub fn painting_mode(&self) -> PaintingMode {
        self.mode
    }

    /// Hovered cell, if it still exists on `board`.
    pub fn hovered_cell(&self, board: &Board) -> Option<(usize, usize)> {
        self.hovered
            .filter(|&(x, y)| x < board.width() && y < board.height())
    }

    /// Map a canvas pixel to a grid cell. Points inside the grid's bounding
    /// box resolve to the cell at or before them, gaps included; anything
    /// outside clears the hover. The current painting mode is applied to the
    /// new cell straight away so a drag paints a trail.
    pub fn set_cursor_coordinates(&mut self, board: &mut Board, px: i32, py: i32) {
        self.hovered = pick_cell(board, px, py);
        self.paint(board);
    }

    pub fn toggle_cursor(&mut self) {
        self.enabled = !self.enabled;
    }

    pub fn set_painting_mode(&mut self, board: &mut Board, mode: PaintingMode) {
        self.mode = mode;
        self.paint(board);
    }

    /// Force the hovered cell's liveness per the painting mode. Color is
    /// untouched. No-op while disabled or when nothing is hovered.
    pub fn paint(&self, board: &mut Board) {
        if !self.enabled {
            return;
        }
        let (Some(alive), Some((x, y))) = (self.mode.target(), self.hovered_cell(board)) else {
            return;
        };
        board.set_alive(x as i32, y as i32, alive);
    }
}

fn pick_cell(board: &Board, px: i32, py: i32) -> Option<(usize, usize)> {
    let extent = board.grid_extent();
    let dx = px.checked_sub(extent.x)?;
    let dy = py.checked_sub(extent.y)?;
    if dx < 0 || dy < 0 || dx >= extent.w as i32 || dy >= extent.h as i32 {
        return None;
    }
    let pitch = board.layout().pitch() as i32;
    Some(((dx / pitch) as usize, (dy / pitch) as usize))
}
