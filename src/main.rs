mod display;

use std::fs::File;
use std::io::{stdout, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::thread;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use chopper_strike::compute::DEFAULT_HEADSHOT_TOLERANCE;
use chopper_strike::depot::run_depot_refill;
use chopper_strike::difficulty::{Parameters, DEFAULT_LEVEL};
use chopper_strike::entities::Level;
use chopper_strike::game::{Ending, Game, GameConfig};
use chopper_strike::spawner::run_spawner;
use chopper_strike::state::GameState;

use display::TerminalPlatform;

/// Fly the helicopter, headshot the dinosaurs, reload at the pad.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Difficulty: easy, medium or hard (or 1, 2, 3).
    #[arg(short, long, default_value_t = DEFAULT_LEVEL)]
    level: Level,

    /// Vertical slack, in field units, for a missile to count as lined up
    /// with a head. 0 demands exact alignment.
    #[arg(long, default_value_t = DEFAULT_HEADSHOT_TOLERANCE)]
    headshot_tolerance: f32,

    /// Directory holding the sprite files.
    #[arg(long, default_value = "assets")]
    assets: PathBuf,

    /// Where log output goes; the terminal itself is busy drawing the game.
    #[arg(long, default_value = "chopper_strike.log")]
    log_file: PathBuf,

    /// Seed for dinosaur placement. Random when omitted.
    #[arg(long)]
    seed: Option<u64>,
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_logging(&args.log_file)?;

    let params = Parameters::for_level(args.level);
    info!(?params, tolerance = args.headshot_tolerance, "starting game");

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(terminal::SetTitle("Chopper Strike"))?;

    // Request key-release (and key-repeat) events from the terminal.
    // Terminals without the kitty protocol fall back to press-only input.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    let mut platform = TerminalPlatform::new(out, args.level);
    let result = run(&mut platform, params, &args);

    // Always restore the terminal
    let mut out = stdout();
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    let ending = result?;
    info!(?ending, "game finished");
    match ending {
        Ending::Closed => println!("Bye."),
        Ending::Collision => println!("Game over: the helicopter crashed into a dinosaur."),
        Ending::Overrun => println!("Game over: the Earth is doomed."),
    }
    Ok(())
}

fn run<W: std::io::Write>(
    platform: &mut TerminalPlatform<W>,
    params: Parameters,
    args: &CliArgs,
) -> Result<Ending> {
    platform.load_visuals(&args.assets);

    let state = Arc::new(GameState::new(params));

    let truck = {
        let state = Arc::clone(&state);
        thread::Builder::new()
            .name("supply-truck".into())
            .spawn(move || run_depot_refill(&state))
            .context("spawning supply truck thread")?
    };
    let spawner = {
        let state = Arc::clone(&state);
        let seed = args.seed;
        thread::Builder::new()
            .name("spawner".into())
            .spawn(move || {
                let mut rng = match seed {
                    Some(seed) => StdRng::seed_from_u64(seed),
                    None => StdRng::from_entropy(),
                };
                run_spawner(&state, &mut rng)
            })
            .context("spawning dinosaur spawner thread")?
    };

    let config = GameConfig {
        headshot_tolerance: args.headshot_tolerance,
        ..GameConfig::default()
    };
    let mut game = Game::new(Arc::clone(&state), config);
    let outcome = game.run(platform);

    // Wakes both background threads out of their sleeps.
    state.set_terminal();
    for handle in [truck, spawner] {
        if handle.join().is_err() {
            warn!("background thread panicked");
        }
    }

    let ending = outcome?;
    platform.show_ending(&game.snapshot(), ending)?;
    Ok(ending)
}
