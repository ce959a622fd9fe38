// src/palette.rs

use crate::hue::wrap_hue;

/// Packed 0x00RRGGBB.
pub type Pixel = u32;

pub const BLACK: Pixel = 0x000000;
pub const WHITE: Pixel = 0xFFFFFF;

#[inline]
pub const fn pack_rgb(rgb: [u8; 3]) -> Pixel {
    ((rgb[0] as u32) << 16) | ((rgb[1] as u32) << 8) | rgb[2] as u32
}

#[inline]
pub const fn unpack_rgb(p: Pixel) -> [u8; 3] {
    [(p >> 16) as u8, (p >> 8) as u8, p as u8]
}

/// h, s, v all in [0, 1]; h wraps.
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> [u8; 3] {
    let h = wrap_hue(h);
    let i = (h * 6.0).floor();
    let f = h * 6.0 - i;
    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);
    let (r, g, b) = match i as i32 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    [
        (r * 255.0).round().clamp(0.0, 255.0) as u8,
        (g * 255.0).round().clamp(0.0, 255.0) as u8,
        (b * 255.0).round().clamp(0.0, 255.0) as u8,
    ]
}

/// Hue quantized into buckets, each converted to RGB once up front.
#[derive(Clone, Debug)]
pub struct HueLut {
    table: Vec<Pixel>,
}

impl HueLut {
    pub fn new(buckets: usize, saturation: f64, value: f64) -> Self {
        let n = buckets.max(1);
        let table = (0..n)
            .map(|b| pack_rgb(hsv_to_rgb(b as f64 / n as f64, saturation, value)))
            .collect();
        Self { table }
    }

    #[inline]
    pub fn buckets(&self) -> usize {
        self.table.len()
    }

    #[inline]
    pub fn bucket(&self, hue: f64) -> usize {
        let n = self.table.len();
        ((wrap_hue(hue) * n as f64) as usize).min(n - 1)
    }

    #[inline]
    pub fn color(&self, hue: f64) -> Pixel {
        self.table[self.bucket(hue)]
    }
}
