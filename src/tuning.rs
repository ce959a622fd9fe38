// src/tuning.rs
//
// Session settings: grid shape, seeding, step rate, palette. Serialized as
// JSON; any field left out of a file takes its value from `Default`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::board::{DEFAULT_CELL_PADDING, DEFAULT_MAX_CELL_MUTATION, DEFAULT_RANDOMIZE_RATIO};
use crate::error::TuningError;

pub const MIN_TICKS_PER_SECOND: f32 = 0.5;
pub const MAX_TICKS_PER_SECOND: f32 = 240.0;

/// How hues turn into pixels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteTuning {
    /// Number of quantized hue buckets precomputed at startup.
    pub buckets: usize,
    /// HSV saturation shared by every bucket.
    pub saturation: f64,
    /// HSV value shared by every bucket.
    pub value: f64,
    /// Fill for dead cells while dead-cell visibility is on.
    pub dead_color: [u8; 3],
    /// Canvas fill behind the grid (and behind hidden dead cells).
    pub background: [u8; 3],
    /// Highlight frame around a hovered live cell.
    pub highlight_alive: [u8; 3],
}

impl Default for PaletteTuning {
    fn default() -> Self {
        Self {
            buckets: 100,
            saturation: 0.7,
            value: 0.7,
            dead_color: [0, 0, 0],
            background: [0, 0, 0],
            highlight_alive: [255, 255, 255],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Seed for the session's random source. None draws one from the OS.
    pub rng_seed: Option<u64>,

    pub grid_width: usize,
    pub grid_height: usize,
    /// Pixels between neighboring cells.
    pub cell_padding: usize,

    /// About one cell in `randomize_ratio` starts alive on a reseed.
    pub randomize_ratio: u32,
    /// Full width of the uniform hue jitter applied on every birth.
    pub max_cell_mutation: f64,

    /// Generations per second of simulated time.
    pub ticks_per_second: f32,
    pub start_paused: bool,
    /// Toroidal edges instead of a dead border.
    pub wrap: bool,
    pub cursor_enabled: bool,
    pub show_dead_cells: bool,

    pub palette: PaletteTuning,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            rng_seed: None,
            // fills 1920x1080 with 10px cells
            grid_width: 137,
            grid_height: 77,
            cell_padding: DEFAULT_CELL_PADDING,
            randomize_ratio: DEFAULT_RANDOMIZE_RATIO,
            max_cell_mutation: DEFAULT_MAX_CELL_MUTATION,
            ticks_per_second: 10.0,
            start_paused: false,
            wrap: false,
            cursor_enabled: true,
            show_dead_cells: true,
            palette: PaletteTuning::default(),
        }
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> TuningError {
    TuningError::Invalid {
        field,
        reason: reason.into(),
    }
}

fn check_unit(field: &'static str, v: f64) -> Result<(), TuningError> {
    if !(0.0..=1.0).contains(&v) {
        return Err(invalid(field, format!("{v} is outside [0, 1]")));
    }
    Ok(())
}

impl Tuning {
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.randomize_ratio == 0 {
            return Err(invalid("randomize_ratio", "must be at least 1"));
        }
        if !self.max_cell_mutation.is_finite() || self.max_cell_mutation < 0.0 {
            return Err(invalid(
                "max_cell_mutation",
                format!("{} is not a finite non-negative number", self.max_cell_mutation),
            ));
        }
        if !self.ticks_per_second.is_finite()
            || !(MIN_TICKS_PER_SECOND..=MAX_TICKS_PER_SECOND).contains(&self.ticks_per_second)
        {
            return Err(invalid(
                "ticks_per_second",
                format!(
                    "{} is outside [{MIN_TICKS_PER_SECOND}, {MAX_TICKS_PER_SECOND}]",
                    self.ticks_per_second
                ),
            ));
        }
        if self.palette.buckets == 0 {
            return Err(invalid("palette.buckets", "must be at least 1"));
        }
        check_unit("palette.saturation", self.palette.saturation)?;
        check_unit("palette.value", self.palette.value)?;
        Ok(())
    }

    pub fn load_from_disk(path: &Path) -> Result<Self, TuningError> {
        let data = fs::read_to_string(path)?;
        let tuning: Tuning = serde_json::from_str(&data)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn save_to_disk(&self, path: &Path) -> Result<(), TuningError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let t = Tuning::default();
        t.validate().unwrap();
        assert_eq!(t.cell_padding, 4);
        assert_eq!(t.randomize_ratio, 5);
        assert_eq!(t.max_cell_mutation, 0.05);
        assert_eq!(t.palette.buckets, 100);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let t: Tuning =
            serde_json::from_str(r#"{ "grid_width": 40, "palette": { "buckets": 12 } }"#).unwrap();
        assert_eq!(t.grid_width, 40);
        assert_eq!(t.grid_height, 77);
        assert_eq!(t.palette.buckets, 12);
        assert_eq!(t.palette.saturation, 0.7);
    }

    #[test]
    fn rejects_bad_values() {
        let cases: [(&str, fn(&mut Tuning)); 5] = [
            ("randomize_ratio", |t| t.randomize_ratio = 0),
            ("max_cell_mutation", |t| t.max_cell_mutation = f64::NAN),
            ("ticks_per_second", |t| t.ticks_per_second = 0.0),
            ("palette.buckets", |t| t.palette.buckets = 0),
            ("palette.value", |t| t.palette.value = 1.5),
        ];
        for (name, break_it) in cases {
            let mut t = Tuning::default();
            break_it(&mut t);
            match t.validate() {
                Err(TuningError::Invalid { field, .. }) => assert_eq!(field, name),
                other => panic!("{name}: expected Invalid, got {other:?}"),
            }
        }
    }

    #[test]
    fn save_then_load() {
        let dir = std::env::temp_dir().join(format!("rainbow-life-tuning-{}", std::process::id()));
        let path = dir.join("tuning.json");
        let t = Tuning {
            rng_seed: Some(42),
            wrap: true,
            ..Tuning::default()
        };
        t.save_to_disk(&path).unwrap();
        let back = Tuning::load_from_disk(&path).unwrap();
        assert_eq!(back, t);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn load_reports_parse_errors() {
        let dir = std::env::temp_dir().join(format!("rainbow-life-bad-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(Tuning::load_from_disk(&path), Err(TuningError::Parse(_))));
        assert!(matches!(
            Tuning::load_from_disk(&dir.join("missing.json")),
            Err(TuningError::Io(_))
        ));
        let _ = fs::remove_dir_all(&dir);
    }
}
