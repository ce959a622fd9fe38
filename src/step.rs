// src/step.rs

use rand::Rng;

use crate::board::Board;
use crate::hue::{circular_mean, mutate};

/// Moore neighborhood, scanned in this order for counting and inheritance.
pub const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub births: usize,
    pub deaths: usize,
    pub population: usize,
}

/// Standard B3/S23.
#[inline]
pub fn next_alive(alive: bool, live_neighbors: u8) -> bool {
    matches!((alive, live_neighbors), (true, 2) | (true, 3) | (false, 3))
}

impl Board {
    pub fn live_neighbors(&self, x: i32, y: i32) -> u8 {
        NEIGHBOR_OFFSETS
            .iter()
            .filter(|&&(dx, dy)| self.cell(x + dx, y + dy).alive_now)
            .count() as u8
    }

    /// Hue a newborn at (x, y) inherits: running circular mean over its
    /// live neighbors, in offset order. None when no neighbor is alive.
    pub fn inherited_color(&self, x: i32, y: i32) -> Option<f64> {
        NEIGHBOR_OFFSETS
            .iter()
            .map(|&(dx, dy)| self.cell(x + dx, y + dy))
            .filter(|c| c.alive_now)
            .map(|c| c.color)
            .reduce(circular_mean)
    }

    /// Advance one generation.
    ///
    /// Pass one reads only `alive_now` and writes only `alive_next_tick`
    /// (plus the hue of newborns, which are dead in the generation being read
    /// and so never contribute a color). Pass two commits. The random source
    /// is drawn once per birth, row-major.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> TickReport {
        let (w, h) = (self.width(), self.height());
        let mutation = self.max_cell_mutation();
        let mut report = TickReport::default();

        for y in 0..h {
            for x in 0..w {
                let (xi, yi) = (x as i32, y as i32);
                let i = y * w + x;
                let alive = self.cells()[i].alive_now;
                let next = next_alive(alive, self.live_neighbors(xi, yi));

                let color = if !alive && next {
                    report.births += 1;
                    let inherited = self.inherited_color(xi, yi);
                    let base = inherited.unwrap_or(self.cells()[i].color);
                    Some(mutate(base, mutation, rng))
                } else {
                    if alive && !next {
                        report.deaths += 1;
                    }
                    None
                };

                let cell = &mut self.cells_mut()[i];
                cell.alive_next_tick = next;
                if let Some(c) = color {
                    cell.color = c;
                }
            }
        }

        for cell in self.cells_mut() {
            cell.alive_now = cell.alive_next_tick;
            if cell.alive_now {
                report.population += 1;
            }
        }

        report
    }
}
