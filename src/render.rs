// src/render.rs

use std::io::{self, Write};

use crate::board::{Board, Cell, Rect};
use crate::cursor::CursorState;
use crate::palette::{HueLut, Pixel, pack_rgb, unpack_rgb};
use crate::tuning::PaletteTuning;

/// Pixel destination owned by the caller.
pub trait Canvas {
    fn size(&self) -> (usize, usize);

    /// Fill `rect` with `color`, clipped to the canvas.
    fn fill_rect(&mut self, rect: Rect, color: Pixel);

    fn clear(&mut self, color: Pixel) {
        let (w, h) = self.size();
        self.fill_rect(
            Rect {
                x: 0,
                y: 0,
                w: w as u32,
                h: h as u32,
            },
            color,
        );
    }
}

/// Row-major in-memory canvas.
#[derive(Clone, Debug)]
pub struct FrameBuffer {
    w: usize,
    h: usize,
    pixels: Vec<Pixel>,
}

impl FrameBuffer {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            pixels: vec![0; w * h],
        }
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Pixel {
        self.pixels[y * self.w + x]
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Binary PPM (P6) snapshot.
    pub fn write_ppm<W: Write>(&self, mut out: W) -> io::Result<()> {
        write!(out, "P6\n{} {}\n255\n", self.w, self.h)?;
        let mut row = Vec::with_capacity(self.w * 3);
        for y in 0..self.h {
            row.clear();
            for &p in &self.pixels[y * self.w..(y + 1) * self.w] {
                row.extend_from_slice(&unpack_rgb(p));
            }
            out.write_all(&row)?;
        }
        out.flush()
    }
}

impl Canvas for FrameBuffer {
    fn size(&self) -> (usize, usize) {
        (self.w, self.h)
    }

    fn fill_rect(&mut self, rect: Rect, color: Pixel) {
        let x0 = (rect.x as i64).clamp(0, self.w as i64) as usize;
        let y0 = (rect.y as i64).clamp(0, self.h as i64) as usize;
        let x1 = (rect.x as i64 + rect.w as i64).clamp(0, self.w as i64) as usize;
        let y1 = (rect.y as i64 + rect.h as i64).clamp(0, self.h as i64) as usize;
        if x0 >= x1 {
            return;
        }
        for y in y0..y1 {
            let base = y * self.w;
            self.pixels[base + x0..base + x1].fill(color);
        }
    }
}

/// Frame drawn around the hovered cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Highlight {
    pub cell: (usize, usize),
    /// Outer edge: the cell grown by one pixel on every side.
    pub frame: Rect,
    pub color: Pixel,
}

impl Highlight {
    /// The frame as four one-pixel bars: top, bottom, left, right.
    pub fn bars(&self) -> [Rect; 4] {
        let Rect { x, y, w, h } = self.frame;
        let inner_h = h.saturating_sub(2);
        [
            Rect { x, y, w, h: 1 },
            Rect { x, y: y + h as i32 - 1, w, h: 1 },
            Rect { x, y: y + 1, w: 1, h: inner_h },
            Rect { x: x + w as i32 - 1, y: y + 1, w: 1, h: inner_h },
        ]
    }
}

/// Turns board + cursor state into fills; never touches pixels itself
/// except through a `Canvas`.
#[derive(Clone, Debug)]
pub struct Projector {
    lut: HueLut,
    dead_color: Pixel,
    background: Pixel,
    highlight_alive: Pixel,
    show_dead_cells: bool,
}

impl Projector {
    pub fn new(palette: &PaletteTuning, show_dead_cells: bool) -> Self {
        Self {
            lut: HueLut::new(palette.buckets, palette.saturation, palette.value),
            dead_color: pack_rgb(palette.dead_color),
            background: pack_rgb(palette.background),
            highlight_alive: pack_rgb(palette.highlight_alive),
            show_dead_cells,
        }
    }

    pub fn lut(&self) -> &HueLut {
        &self.lut
    }

    #[inline]
    pub fn show_dead_cells(&self) -> bool {
        self.show_dead_cells
    }

    pub fn toggle_dead_cell_visibility(&mut self) {
        self.show_dead_cells = !self.show_dead_cells;
    }

    /// Fill for one cell; None means leave the background showing.
    #[inline]
    pub fn cell_paint(&self, cell: &Cell) -> Option<Pixel> {
        if cell.alive_now {
            Some(self.lut.color(cell.color))
        } else if self.show_dead_cells {
            Some(self.dead_color)
        } else {
            None
        }
    }

    pub fn highlight(&self, board: &Board, cursor: &CursorState) -> Option<Highlight> {
        if !cursor.enabled() {
            return None;
        }
        let (x, y) = cursor.hovered_cell(board)?;
        let cell = board.cell(x as i32, y as i32);
        let color = if cell.alive_now {
            self.highlight_alive
        } else {
            self.lut.color(cell.color)
        };
        let r = board.layout().cell_rect(x, y);
        Some(Highlight {
            cell: (x, y),
            frame: Rect {
                x: r.x - 1,
                y: r.y - 1,
                w: r.w + 2,
                h: r.h + 2,
            },
            color,
        })
    }

    /// Background, then cells, then the hover frame on top.
    pub fn render<C: Canvas + ?Sized>(&self, board: &Board, cursor: &CursorState, canvas: &mut C) {
        canvas.clear(self.background);

        let layout = board.layout();
        for y in 0..board.height() {
            for x in 0..board.width() {
                let cell = &board.cells()[y * board.width() + x];
                if let Some(color) = self.cell_paint(cell) {
                    canvas.fill_rect(layout.cell_rect(x, y), color);
                }
            }
        }

        if let Some(hl) = self.highlight(board, cursor) {
            for bar in hl.bars() {
                canvas.fill_rect(bar, hl.color);
            }
        }
    }
}
