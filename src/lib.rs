//! Conway's Game of Life where every live cell carries a hue.
//!
//! Newborn cells take the circular mean of their live neighbors' hues plus a
//! small random mutation, so colonies drift around the color wheel. The crate
//! is the engine only: a caller supplies a [`render::Canvas`] to draw into,
//! forwards pointer and key input, and decides when time passes.

pub mod board;
pub mod cursor;
pub mod error;
pub mod hue;
pub mod palette;
pub mod patterns;
pub mod render;
pub mod session;
pub mod step;
pub mod tuning;

pub use board::{Board, Cell, Layout, Rect};
pub use cursor::{CursorState, PaintingMode};
pub use error::{ConfigurationError, TuningError};
pub use render::{Canvas, FrameBuffer, Projector};
pub use session::{Command, Session};
pub use step::TickReport;
pub use tuning::Tuning;
