// src/hue.rs
//
// Hue lives on a circle of circumference 1: 0.0 and 1.0 are the same red.
// Everything here wraps, nothing clamps.

use rand::Rng;

/// Reduce any real into [0, 1).
#[inline]
pub fn wrap_hue(h: f64) -> f64 {
    if !h.is_finite() {
        return 0.0;
    }
    let w = h.rem_euclid(1.0);
    // rem_euclid can round a tiny negative up to exactly 1.0
    if w >= 1.0 { 0.0 } else { w }
}

/// Signed shortest step from `a` to `b`, in [-0.5, 0.5).
#[inline]
fn arc_delta(a: f64, b: f64) -> f64 {
    let d = wrap_hue(b - a);
    if d >= 0.5 { d - 1.0 } else { d }
}

/// Midpoint of the shorter arc between two hues.
///
/// Averaging 0.95 and 0.05 gives 0.0, not 0.5. Exactly opposite hues have
/// two equally short arcs; the one starting at the smaller hue wins so the
/// result does not depend on argument order.
pub fn circular_mean(a: f64, b: f64) -> f64 {
    let a = wrap_hue(a);
    let b = wrap_hue(b);
    let d = arc_delta(a, b);
    if d == -0.5 {
        return wrap_hue(a.min(b) + 0.25);
    }
    wrap_hue(a + d * 0.5)
}

/// Perturb `h` by a uniform draw in [-max/2, +max/2], then wrap.
pub fn mutate<R: Rng + ?Sized>(h: f64, max: f64, rng: &mut R) -> f64 {
    let jitter = (rng.random::<f64>() - 0.5) * max;
    wrap_hue(h + jitter)
}

/// Shortest distance between two hues, in [0, 0.5].
pub fn hue_distance(a: f64, b: f64) -> f64 {
    arc_delta(wrap_hue(a), wrap_hue(b)).abs()
}
