// src/main.rs
//
// Headless driver: runs a session against an in-memory frame buffer at a
// fixed simulated frame rate, logs population, optionally dumps the last
// frame as PPM.

use std::{fs::File, io::BufWriter, path::PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use env_logger::Env;
use log::info;

use rainbow_life::{Command, FrameBuffer, Session, Tuning, patterns};

const FRAME_DT: f32 = 1.0 / 60.0;
const LOG_EVERY: u64 = 25;

/// Run a rainbow Life session headless and report how the population evolves.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Canvas width in pixels.
    #[arg(long, value_name = "PX", default_value_t = 1920)]
    width: usize,
    /// Canvas height in pixels.
    #[arg(long, value_name = "PX", default_value_t = 1080)]
    height: usize,
    /// Generations to run before exiting.
    #[arg(long, value_name = "N", default_value_t = 100)]
    generations: u64,
    /// Random seed; overrides the tuning file.
    #[arg(long, value_name = "S")]
    seed: Option<u64>,
    /// Tuning JSON to load.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Write the effective tuning as JSON.
    #[arg(long, value_name = "PATH")]
    save_config: Option<PathBuf>,
    /// Start from a named pattern instead of random cells.
    #[arg(long, value_name = "NAME")]
    pattern: Option<String>,
    /// Toroidal edges.
    #[arg(long)]
    wrap: bool,
    /// Write the final frame as PPM.
    #[arg(long, value_name = "PATH")]
    dump: Option<PathBuf>,
}

fn seed_pattern(session: &mut Session, name: &str) -> Result<()> {
    let Some(pattern) = patterns::find(name) else {
        let known: Vec<_> = patterns::PATTERNS.iter().map(|p| p.name).collect();
        bail!("unknown pattern `{name}` (known: {})", known.join(", "));
    };
    session.apply(Command::Clear);
    let (pw, ph) = pattern.extent();
    let board = session.board_mut();
    let x = (board.width() as i32 - pw as i32) / 2;
    let y = (board.height() as i32 - ph as i32) / 2;
    board.stamp(pattern, x, y);
    info!("seeded {} at ({x}, {y})", pattern.name);
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut tuning = match &args.config {
        Some(path) => Tuning::load_from_disk(path)
            .with_context(|| format!("loading tuning from {}", path.display()))?,
        None => Tuning::default(),
    };
    if args.seed.is_some() {
        tuning.rng_seed = args.seed;
    }
    if args.wrap {
        tuning.wrap = true;
    }
    tuning.validate()?;

    if let Some(path) = &args.save_config {
        tuning
            .save_to_disk(path)
            .with_context(|| format!("saving tuning to {}", path.display()))?;
        info!("saved tuning to {}", path.display());
    }

    let mut session = Session::new(args.width, args.height, tuning)?;
    if let Some(name) = &args.pattern {
        seed_pattern(&mut session, name)?;
    }

    let mut fb = FrameBuffer::new(args.width, args.height);
    let mut frames = 0u64;
    let mut last_logged = 0u64;

    while session.generation() < args.generations {
        if session.paused() {
            session.apply(Command::StepOnce);
            session.render(&mut fb);
        } else {
            session.frame(FRAME_DT, &mut fb);
        }
        frames += 1;

        let g = session.generation();
        if g >= last_logged + LOG_EVERY {
            let r = session.last_report();
            info!(
                "generation {g}: population {} (+{} / -{})",
                r.population, r.births, r.deaths
            );
            last_logged = g;
        }
    }

    info!(
        "done: {} generations over {frames} frames ({:.1}s simulated), population {}",
        session.generation(),
        frames as f32 * FRAME_DT,
        session.board().population()
    );

    if let Some(path) = &args.dump {
        session.render(&mut fb);
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        fb.write_ppm(BufWriter::new(file))?;
        info!("wrote {}", path.display());
    }

    Ok(())
}
