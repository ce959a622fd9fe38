// src/session.rs

use log::{debug, info, trace};
use rand::{SeedableRng, rngs::StdRng};

use crate::board::Board;
use crate::cursor::{CursorState, PaintingMode};
use crate::error::ConfigurationError;
use crate::render::{Canvas, Projector};
use crate::step::TickReport;
use crate::tuning::{MAX_TICKS_PER_SECOND, MIN_TICKS_PER_SECOND, Tuning};

/// Longest frame we account for; anything slower is treated as a hitch.
pub const MAX_FRAME_DT: f32 = 0.25;
pub const MAX_STEPS_PER_FRAME: usize = 8;

/// Discrete input forwarded by whatever owns the keyboard and mouse buttons.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    TogglePause,
    /// Advance exactly one generation, paused or not.
    StepOnce,
    /// Reseed liveness and hues.
    Randomize,
    RandomizeColors,
    Clear,
    ToggleWrap,
    ToggleCursor,
    ToggleDeadCells,
    SetPaintingMode(PaintingMode),
    SpeedUp,
    SlowDown,
}

/// One running simulation: board, pointer state, projector, random source.
///
/// Per frame the caller forwards input first, then calls `frame`, which steps
/// and renders in that order.
pub struct Session {
    board: Board,
    cursor: CursorState,
    projector: Projector,
    rng: StdRng,
    tuning: Tuning,
    seed: u64,

    paused: bool,
    ticks_per_second: f32,
    generation: u64,
    step_accum: f32,
    last_report: TickReport,
}

impl Session {
    pub fn new(
        canvas_width: usize,
        canvas_height: usize,
        tuning: Tuning,
    ) -> Result<Self, ConfigurationError> {
        let mut board = Board::new(
            canvas_width,
            canvas_height,
            tuning.grid_width,
            tuning.grid_height,
            tuning.cell_padding,
        )?;
        board.set_wrap(tuning.wrap);
        board.set_max_cell_mutation(tuning.max_cell_mutation);

        let seed = tuning.rng_seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);
        board.randomize_board(&mut rng, tuning.randomize_ratio);
        board.randomize_colors(&mut rng);

        let l = board.layout();
        info!(
            "canvas = {} x {}, grid = {} x {}, cell = {}px + {}px gap, seed = {:#x}",
            canvas_width,
            canvas_height,
            board.width(),
            board.height(),
            l.cell_size,
            l.cell_padding,
            seed
        );

        Ok(Self {
            cursor: CursorState::new(tuning.cursor_enabled),
            projector: Projector::new(&tuning.palette, tuning.show_dead_cells),
            paused: tuning.start_paused,
            ticks_per_second: tuning.ticks_per_second,
            board,
            rng,
            tuning,
            seed,
            generation: 0,
            step_accum: 0.0,
            last_report: TickReport::default(),
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn cursor(&self) -> &CursorState {
        &self.cursor
    }

    pub fn projector(&self) -> &Projector {
        &self.projector
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn ticks_per_second(&self) -> f32 {
        self.ticks_per_second
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn last_report(&self) -> TickReport {
        self.last_report
    }

    pub fn pointer_moved(&mut self, x: i32, y: i32) {
        self.cursor.set_cursor_coordinates(&mut self.board, x, y);
    }

    pub fn apply(&mut self, cmd: Command) {
        debug!("command {:?}", cmd);
        match cmd {
            Command::TogglePause => self.paused = !self.paused,
            Command::StepOnce => self.step(),
            Command::Randomize => {
                self.board
                    .randomize_board(&mut self.rng, self.tuning.randomize_ratio);
                self.board.randomize_colors(&mut self.rng);
            }
            Command::RandomizeColors => self.board.randomize_colors(&mut self.rng),
            Command::Clear => self.board.clear(),
            Command::ToggleWrap => self.board.toggle_wrap(),
            Command::ToggleCursor => self.cursor.toggle_cursor(),
            Command::ToggleDeadCells => self.projector.toggle_dead_cell_visibility(),
            Command::SetPaintingMode(mode) => {
                self.cursor.set_painting_mode(&mut self.board, mode)
            }
            Command::SpeedUp => self.set_ticks_per_second(self.ticks_per_second * 2.0),
            Command::SlowDown => self.set_ticks_per_second(self.ticks_per_second * 0.5),
        }
    }

    fn set_ticks_per_second(&mut self, tps: f32) {
        self.ticks_per_second = tps.clamp(MIN_TICKS_PER_SECOND, MAX_TICKS_PER_SECOND);
        debug!("ticks per second = {:.2}", self.ticks_per_second);
    }

    /// One generation.
    pub fn step(&mut self) {
        let report = self.board.tick(&mut self.rng);
        self.generation += 1;
        self.last_report = report;
        trace!(
            "generation {}: population {}, births {}, deaths {}",
            self.generation, report.population, report.births, report.deaths
        );
    }

    /// Run the steps `dt` seconds are owed, then repaint the hovered cell so
    /// a held button wins over the step, then draw. Returns steps taken.
    pub fn frame<C: Canvas + ?Sized>(&mut self, dt: f32, canvas: &mut C) -> usize {
        let dt = if dt.is_nan() { 0.0 } else { dt.clamp(0.0, MAX_FRAME_DT) };

        let mut steps = 0usize;
        if self.paused {
            self.step_accum = 0.0;
        } else {
            self.step_accum += dt;
            let step_dt = 1.0 / self.ticks_per_second.max(MIN_TICKS_PER_SECOND);
            while self.step_accum >= step_dt && steps < MAX_STEPS_PER_FRAME {
                self.step();
                self.step_accum -= step_dt;
                steps += 1;
            }
            if steps == MAX_STEPS_PER_FRAME {
                // drop the backlog instead of spiralling
                self.step_accum = self.step_accum.min(step_dt);
            }
        }

        self.cursor.paint(&mut self.board);
        self.render(canvas);
        steps
    }

    pub fn render<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        self.projector.render(&self.board, &self.cursor, canvas);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::FrameBuffer;

    fn tuning() -> Tuning {
        Tuning {
            rng_seed: Some(1234),
            grid_width: 20,
            grid_height: 10,
            ticks_per_second: 10.0,
            ..Tuning::default()
        }
    }

    #[test]
    fn too_small_canvas_is_a_configuration_error() {
        assert!(Session::new(10, 10, tuning()).is_err());
    }

    #[test]
    fn same_seed_same_start() {
        let a = Session::new(200, 100, tuning()).unwrap();
        let b = Session::new(200, 100, tuning()).unwrap();
        assert_eq!(a.board().cells(), b.board().cells());
        assert!(a.board().population() > 0);
        assert_eq!(a.seed(), 1234);
    }

    #[test]
    fn frame_steps_by_elapsed_time() {
        let mut s = Session::new(200, 100, tuning()).unwrap();
        let mut fb = FrameBuffer::new(200, 100);
        assert_eq!(s.frame(0.05, &mut fb), 0);
        assert_eq!(s.frame(0.06, &mut fb), 1);
        assert_eq!(s.generation(), 1);
        // a long hitch is capped
        assert!(s.frame(10.0, &mut fb) <= MAX_STEPS_PER_FRAME);
        assert!(s.frame(f32::NAN, &mut fb) <= MAX_STEPS_PER_FRAME);
    }

    #[test]
    fn paused_session_only_steps_on_request() {
        let mut s = Session::new(200, 100, tuning()).unwrap();
        let mut fb = FrameBuffer::new(200, 100);
        s.apply(Command::TogglePause);
        assert!(s.paused());
        assert_eq!(s.frame(0.2, &mut fb), 0);
        s.apply(Command::StepOnce);
        assert_eq!(s.generation(), 1);
    }

    #[test]
    fn speed_is_clamped() {
        let mut s = Session::new(200, 100, tuning()).unwrap();
        s.apply(Command::SpeedUp);
        assert_eq!(s.ticks_per_second(), 20.0);
        for _ in 0..20 {
            s.apply(Command::SpeedUp);
        }
        assert_eq!(s.ticks_per_second(), MAX_TICKS_PER_SECOND);
        for _ in 0..40 {
            s.apply(Command::SlowDown);
        }
        assert_eq!(s.ticks_per_second(), MIN_TICKS_PER_SECOND);
    }

    #[test]
    fn held_paint_survives_the_step() {
        let mut s = Session::new(200, 100, tuning()).unwrap();
        let mut fb = FrameBuffer::new(200, 100);
        s.apply(Command::Clear);
        let origin = s.board().layout().cell_origin(5, 5);
        s.pointer_moved(origin.0 as i32, origin.1 as i32);
        s.apply(Command::SetPaintingMode(PaintingMode::PaintAlive));
        // a lone cell dies on the step, then the held button repaints it
        assert_eq!(s.frame(0.1, &mut fb), 1);
        assert!(s.board().cell(5, 5).alive_now);
        assert_eq!(s.board().population(), 1);
    }

    #[test]
    fn toggles_reach_their_owners() {
        let mut s = Session::new(200, 100, tuning()).unwrap();
        s.apply(Command::ToggleWrap);
        assert!(s.board().wrap());
        s.apply(Command::ToggleCursor);
        assert!(!s.cursor().enabled());
        s.apply(Command::ToggleDeadCells);
        assert!(!s.projector().show_dead_cells());
        s.apply(Command::Clear);
        assert_eq!(s.board().population(), 0);
        s.apply(Command::Randomize);
        assert!(s.board().population() > 0);
    }
}
