//! Rect Arcade entry point
//!
//! The native build has no window toolkit: it plays a variant headless with
//! the autopilot in charge and logs how the session went.
//!
//! Usage: `rect-arcade [VARIANT] [--seed N] [--settings PATH] [--realtime]`

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use rect_arcade::consts::SIM_FPS;
use rect_arcade::error::ArcadeError;
use rect_arcade::platform::{Clock, FixedClock, HeadlessDisplay, LogMedia, SleepClock};
use rect_arcade::sim::GameVariant;
use rect_arcade::{Game, SessionSummary, Settings};

/// Frames played when the settings do not set a budget
const DEFAULT_FRAME_BUDGET: u64 = 60 * 60;

struct Args {
    variant: GameVariant,
    seed: u64,
    settings: PathBuf,
    realtime: bool,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        variant: GameVariant::Arkanoid,
        seed: SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0),
        settings: PathBuf::from("rect-arcade.json"),
        realtime: false,
    };

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--seed" => {
                let value = iter.next().ok_or("--seed needs a value")?;
                args.seed = value
                    .parse()
                    .map_err(|_| format!("invalid seed '{value}'"))?;
            }
            "--settings" => {
                args.settings = iter.next().ok_or("--settings needs a path")?.into();
            }
            "--realtime" => args.realtime = true,
            name => {
                args.variant = GameVariant::from_name(name).ok_or_else(|| {
                    let known: Vec<_> = GameVariant::ALL.iter().map(|v| v.as_str()).collect();
                    format!("unknown game '{name}' (expected one of {})", known.join(", "))
                })?;
            }
        }
    }
    Ok(args)
}

fn play<C: Clock>(args: &Args, settings: Settings, clock: C) -> Result<SessionSummary, ArcadeError> {
    let mut game = Game::new(
        args.variant.config(),
        args.seed,
        HeadlessDisplay::new(),
        LogMedia::default(),
        clock,
        settings,
    )?;
    Ok(game.run())
}

fn run(args: &Args) -> Result<SessionSummary, ArcadeError> {
    let mut settings = Settings::load(&args.settings)?;
    // Nobody can press keys on a headless display
    settings.autopilot = true;
    settings.max_frames.get_or_insert(DEFAULT_FRAME_BUDGET);

    log::info!(
        "Playing {} (seed {}, {} frames max)",
        args.variant.as_str(),
        args.seed,
        settings.max_frames.unwrap_or_default()
    );

    if args.realtime {
        play(args, settings, SleepClock::default())
    } else {
        play(args, settings, FixedClock::for_fps(SIM_FPS))
    }
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Rect Arcade (native) starting...");

    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            log::error!("{e}");
            eprintln!("rect-arcade: {e}");
            return ExitCode::from(2);
        }
    };

    match run(&args) {
        Ok(summary) => {
            println!(
                "{}: {:?} with score {} after {} frames ({} resets)",
                args.variant.as_str(),
                summary.outcome,
                summary.score,
                summary.frames,
                summary.resets
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Session failed: {e}");
            eprintln!("rect-arcade: {e}");
            ExitCode::FAILURE
        }
    }
}
