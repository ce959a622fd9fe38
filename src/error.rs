// src/error.rs

use std::fmt;

use thiserror::Error;

/// Smallest edge a cell may have, in pixels.
pub const MIN_CELL_SIZE: usize = 1;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Axis {
    Width,
    Height,
}

impl Axis {
    fn label(self) -> &'static str {
        match self {
            Axis::Width => "width",
            Axis::Height => "height",
        }
    }
}

/// One axis on which the requested grid does not fit the canvas.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Shortfall {
    pub axis: Axis,
    /// Cells requested along this axis.
    pub cells: usize,
    /// Canvas pixels needed at the minimum cell size.
    pub required_px: usize,
    /// Canvas pixels actually available.
    pub available_px: usize,
}

impl fmt::Display for Shortfall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "insufficient canvas {axis}: {cells} cells need {req}px at {min}px per cell, canvas {axis} is {avail}px",
            axis = self.axis.label(),
            cells = self.cells,
            req = self.required_px,
            min = MIN_CELL_SIZE,
            avail = self.available_px,
        )
    }
}

fn join_shortfalls(shortfalls: &[Shortfall]) -> String {
    shortfalls
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Raised while building a board; the caller is expected to abort setup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("grid needs at least one cell per axis, got {width}x{height}")]
    EmptyGrid { width: usize, height: usize },

    #[error("cell grid does not fit the canvas: {}", join_shortfalls(.shortfalls))]
    CanvasTooSmall { shortfalls: Vec<Shortfall> },
}

impl ConfigurationError {
    /// The shortfall reported for `axis`, if that axis was too small.
    pub fn shortfall(&self, axis: Axis) -> Option<&Shortfall> {
        match self {
            ConfigurationError::CanvasTooSmall { shortfalls } => {
                shortfalls.iter().find(|s| s.axis == axis)
            }
            ConfigurationError::EmptyGrid { .. } => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read or write tuning file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canvas_too_small_lists_every_axis() {
        let err = ConfigurationError::CanvasTooSmall {
            shortfalls: vec![
                Shortfall { axis: Axis::Width, cells: 200, required_px: 996, available_px: 100 },
                Shortfall { axis: Axis::Height, cells: 200, required_px: 996, available_px: 100 },
            ],
        };
        let msg = err.to_string();
        assert!(msg.contains("canvas width"));
        assert!(msg.contains("canvas height"));
        assert_eq!(msg.matches("996px").count(), 2);
        assert_eq!(err.shortfall(Axis::Height).map(|s| s.available_px), Some(100));
    }

    #[test]
    fn empty_grid_has_no_shortfall() {
        let err = ConfigurationError::EmptyGrid { width: 0, height: 3 };
        assert!(err.shortfall(Axis::Width).is_none());
        assert!(err.to_string().contains("0x3"));
    }
}
