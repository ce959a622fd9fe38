//! Property tests for the step engine, hue math and pointer mapping.
//!
//! 1. An all-dead grid stays dead
//! 2. Every cell follows B3/S23 against an independent neighbor count
//! 3. Circular hue mean is commutative and sits halfway along the short arc
//! 4. Hues stay in [0, 1) through any number of ticks
//! 5. Same seed, same grid, same history
//! 6. Pointers outside the grid block hover nothing and paint nothing

use proptest::prelude::*;
use rainbow_life::hue::{circular_mean, hue_distance};
use rainbow_life::{Board, CursorState, PaintingMode};
use rand::{SeedableRng, rngs::StdRng};

// ── Helpers ─────────────────────────────────────────────────────────────

fn board_from(w: usize, h: usize, alive: &[bool], hues: &[f64], wrap: bool) -> Board {
    let mut b = Board::new(100, 100, w, h, 0).unwrap();
    b.set_wrap(wrap);
    for y in 0..h {
        for x in 0..w {
            let i = y * w + x;
            b.set_alive(x as i32, y as i32, alive[i]);
            b.set_color(x as i32, y as i32, hues[i % hues.len()]);
        }
    }
    b
}

/// Neighbor count straight from the alive mask, no Board lookups.
fn reference_count(alive: &[bool], w: usize, h: usize, x: usize, y: usize, wrap: bool) -> u8 {
    let mut n = 0;
    for dy in -1i32..=1 {
        for dx in -1i32..=1 {
            if dx == 0 && dy == 0 {
                continue;
            }
            let (nx, ny) = (x as i32 + dx, y as i32 + dy);
            let (nx, ny) = if wrap {
                (nx.rem_euclid(w as i32), ny.rem_euclid(h as i32))
            } else if nx < 0 || ny < 0 || nx >= w as i32 || ny >= h as i32 {
                continue;
            } else {
                (nx, ny)
            };
            if alive[ny as usize * w + nx as usize] {
                n += 1;
            }
        }
    }
    n
}

fn grid() -> impl Strategy<Value = (usize, usize, Vec<bool>, bool)> {
    (1usize..12, 1usize..12, any::<bool>()).prop_flat_map(|(w, h, wrap)| {
        (
            Just(w),
            Just(h),
            prop::collection::vec(prop::bool::weighted(0.35), w * h),
            Just(wrap),
        )
    })
}

// ── Properties ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn dead_grid_stays_dead(w in 1usize..16, h in 1usize..16, wrap: bool, seed: u64) {
        let mut b = board_from(w, h, &vec![false; w * h], &[0.5], wrap);
        let mut rng = StdRng::seed_from_u64(seed);
        for _ in 0..3 {
            let r = b.tick(&mut rng);
            prop_assert_eq!(r.births, 0);
            prop_assert_eq!(b.population(), 0);
        }
    }

    #[test]
    fn every_cell_follows_b3_s23((w, h, alive, wrap) in grid(), seed: u64) {
        let mut b = board_from(w, h, &alive, &[0.1, 0.6, 0.9], wrap);
        let mut rng = StdRng::seed_from_u64(seed);
        b.tick(&mut rng);

        for y in 0..h {
            for x in 0..w {
                let n = reference_count(&alive, w, h, x, y, wrap);
                let now = b.cell(x as i32, y as i32).alive_now;
                if n == 3 {
                    prop_assert!(now, "({}, {}) had 3 neighbors", x, y);
                } else if n == 2 {
                    prop_assert_eq!(now, alive[y * w + x], "({}, {}) had 2 neighbors", x, y);
                } else {
                    prop_assert!(!now, "({}, {}) had {} neighbors", x, y, n);
                }
            }
        }
    }

    #[test]
    fn hue_mean_is_symmetric_and_halfway(a in 0.0f64..1.0, b in 0.0f64..1.0) {
        let m = circular_mean(a, b);
        prop_assert!((0.0..1.0).contains(&m));
        prop_assert!(hue_distance(m, circular_mean(b, a)) < 1e-9);
        let half = hue_distance(a, b) / 2.0;
        prop_assert!((hue_distance(m, a) - half).abs() < 1e-9);
        prop_assert!((hue_distance(m, b) - half).abs() < 1e-9);
    }

    #[test]
    fn hues_stay_on_the_wheel(
        (w, h, alive, wrap) in grid(),
        mutation in 0.0f64..1.0,
        seed: u64,
    ) {
        let mut b = board_from(w, h, &alive, &[0.0, 0.999_999, 0.5], wrap);
        b.set_max_cell_mutation(mutation);
        let mut rng = StdRng::seed_from_u64(seed);
        for _ in 0..6 {
            b.tick(&mut rng);
            for c in b.cells() {
                prop_assert!((0.0..1.0).contains(&c.color), "hue {}", c.color);
            }
        }
    }

    #[test]
    fn seeded_runs_repeat((w, h, alive, wrap) in grid(), seed: u64) {
        let mut a = board_from(w, h, &alive, &[0.3, 0.7], wrap);
        let mut b = board_from(w, h, &alive, &[0.3, 0.7], wrap);
        let mut ra = StdRng::seed_from_u64(seed);
        let mut rb = StdRng::seed_from_u64(seed);
        for _ in 0..5 {
            prop_assert_eq!(a.tick(&mut ra), b.tick(&mut rb));
            prop_assert_eq!(a.cells(), b.cells());
        }
    }

    #[test]
    fn pointer_outside_block_never_paints(
        px in -500i32..1500,
        py in -500i32..1500,
        alive_mode: bool,
    ) {
        let mut b = Board::new(400, 300, 10, 8, 3).unwrap();
        let e = b.grid_extent();
        let inside = px >= e.x && py >= e.y
            && px < e.x + e.w as i32 && py < e.y + e.h as i32;
        prop_assume!(!inside);

        let mode = if alive_mode { PaintingMode::PaintAlive } else { PaintingMode::PaintDead };
        let mut c = CursorState::default();
        c.set_painting_mode(&mut b, mode);
        c.set_cursor_coordinates(&mut b, px, py);
        prop_assert_eq!(c.hovered_cell(&b), None);
        let before = b.cells().to_vec();
        c.paint(&mut b);
        prop_assert_eq!(b.cells(), &before[..]);
    }
}
