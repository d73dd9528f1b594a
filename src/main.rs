use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};

use notefall::config::SessionConfig;
use notefall::model::{last_note_end_time, load_beatmap};
use notefall::play::{PlaySession, ResultReveal, ScriptedInput};
use notefall::traits::{ClockSource, InputProvider, ManualClock, NullView, SystemClock};
use notefall::util::init_logging;

/// Seconds of silence after the last note when the beatmap has no song length.
const TRAILING_SILENCE_SEC: f64 = 2.0;

#[derive(Parser, Debug)]
#[command(name = "notefall", about = "Headless rhythm game session runner")]
struct Args {
    /// Beatmap JSON file to play.
    #[arg(long)]
    beatmap: PathBuf,

    /// Session config JSON file. Defaults are used if it does not exist.
    #[arg(long, default_value = "session.json", env = "NOTEFALL_CONFIG")]
    config: PathBuf,

    /// Simulated frames per second.
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Press every note perfectly instead of playing with no input.
    #[arg(long)]
    autoplay: bool,

    /// Pace the session against the wall clock instead of running as fast as possible.
    #[arg(long)]
    realtime: bool,

    /// Also write logs to a daily-rolling file in this directory.
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Enable debug logs.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_dir.as_deref(), args.verbose)?;

    let config = SessionConfig::load_from(&args.config)
        .with_context(|| format!("failed to load config {}", args.config.display()))?;
    let beatmap = load_beatmap(&args.beatmap)?;
    let song_length = beatmap
        .song_length_sec
        .unwrap_or_else(|| last_note_end_time(&beatmap) + TRAILING_SILENCE_SEC);

    let mut session = PlaySession::start(Some(beatmap), config)?;
    let mut input = if args.autoplay {
        ScriptedInput::autoplay(session.beatmap())
    } else {
        ScriptedInput::default()
    };

    let dt = 1.0 / f64::from(args.fps.max(1));
    info!(
        beatmap = %args.beatmap.display(),
        song_length,
        fps = args.fps,
        autoplay = args.autoplay,
        realtime = args.realtime,
        "Running session"
    );

    if args.realtime {
        let mut clock = SystemClock::new(song_length);
        run_session(&mut session, &mut clock, &mut input, dt, |_| {
            thread::sleep(Duration::from_secs_f64(dt));
        });
    } else {
        let mut clock = ManualClock::new(song_length);
        run_session(&mut session, &mut clock, &mut input, dt, |clock| {
            clock.advance(dt);
        });
    }

    let result = session.result();
    reveal_result(dt, args.realtime);

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

/// Tick the session until it ends. `step` moves the clock forward by one frame.
fn run_session<C: ClockSource>(
    session: &mut PlaySession,
    clock: &mut C,
    input: &mut dyn InputProvider,
    dt: f64,
    mut step: impl FnMut(&mut C),
) {
    let mut view = NullView;
    let mut frames: u64 = 0;
    while !session.is_over() {
        session.tick(dt, clock, &mut view, input);
        step(clock);
        frames += 1;
    }
    debug!(frames, "Session loop finished");
}

fn reveal_result(dt: f64, realtime: bool) {
    let mut reveal = ResultReveal::new();
    if !realtime {
        for step in reveal.skip() {
            debug!(item = ?step.item, cue = ?step.cue, "Result revealed");
        }
        return;
    }
    while !reveal.is_complete() {
        for step in reveal.advance(dt) {
            info!(item = ?step.item, cue = ?step.cue, at = step.at_sec, "Result revealed");
        }
        thread::sleep(Duration::from_secs_f64(dt));
    }
}
