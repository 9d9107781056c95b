use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use glam::DVec3;
use thiserror::Error;

use skirmish_app::bot::TurretBot;
use skirmish_app::game_loop::{GameLoop, GameLoopCommand};
use skirmish_app::host::{Headless, HostBridge};
use skirmish_app::logging;
use skirmish_core::commands::PlayerCommand;
use skirmish_core::config::{ConfigError, GameConfig};
use skirmish_core::constants::DEFAULT_DT;
use skirmish_core::enums::{Difficulty, GameMode, GamePhase};
use skirmish_core::state::GameStateSnapshot;
use skirmish_sim::engine::{SimConfig, SimulationEngine};

/// Headless SKIRMISH runner: a turret bot plays one game.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// RNG seed; the same seed replays the same game
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Simulated seconds to play before stopping
    #[arg(long, default_value_t = 120.0)]
    seconds: f64,

    /// JSON tuning file overriding the stock tables
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = ModeArg::Survival)]
    mode: ModeArg,

    #[arg(long, value_enum, default_value_t = DifficultyArg::Normal)]
    difficulty: DifficultyArg,

    /// Run on the 60Hz game loop thread instead of as fast as possible
    #[arg(long)]
    realtime: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Survival,
    Mission,
    TimeChallenge,
}

impl From<ModeArg> for GameMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Survival => GameMode::Survival,
            ModeArg::Mission => GameMode::Mission,
            ModeArg::TimeChallenge => GameMode::TimeChallenge,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DifficultyArg {
    Easy,
    Normal,
    Hard,
}

impl From<DifficultyArg> for Difficulty {
    fn from(difficulty: DifficultyArg) -> Self {
        match difficulty {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Normal => Difficulty::Normal,
            DifficultyArg::Hard => Difficulty::Hard,
        }
    }
}

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to start game loop: {0}")]
    GameLoop(#[from] std::io::Error),

    #[error("game loop stopped unexpectedly")]
    LoopStopped,

    #[error("--seconds must be a positive number, got {0}")]
    Seconds(f64),
}

type Bridge = HostBridge<Headless, Headless, Headless>;

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), AppError> {
    if !(args.seconds.is_finite() && args.seconds > 0.0) {
        return Err(AppError::Seconds(args.seconds));
    }

    let game = match &args.config {
        Some(path) => {
            let game = GameConfig::load(path)?;
            log::info!("loaded tuning from {}", path.display());
            game
        }
        None => GameConfig::default(),
    };
    let mode = GameMode::from(args.mode);
    let difficulty = Difficulty::from(args.difficulty);
    let config = SimConfig {
        seed: args.seed,
        game,
        mode,
        difficulty,
    };
    let start = PlayerCommand::StartGame { mode, difficulty };
    log::info!(
        "seed {}, {:?} on {:?}, {}s{}",
        args.seed,
        mode,
        difficulty,
        args.seconds,
        if args.realtime { " in real time" } else { "" }
    );

    let mut bridge = HostBridge::new(Headless::default(), Headless::default(), Headless::default());
    let mut bot = TurretBot::new(DVec3::ZERO);

    let last = if args.realtime {
        run_realtime(config, start, args.seconds, &mut bot, &mut bridge)?
    } else {
        run_fast(config, start, args.seconds, &mut bot, &mut bridge)
    };

    report(&last, &bridge);
    Ok(())
}

/// Tick the engine directly, as fast as the machine allows.
fn run_fast(
    config: SimConfig,
    start: PlayerCommand,
    seconds: f64,
    bot: &mut TurretBot,
    bridge: &mut Bridge,
) -> GameStateSnapshot {
    let mut engine = SimulationEngine::new(config);
    engine.queue_command(start);
    let mut snapshot = engine.tick(bot.input(), DEFAULT_DT);
    bridge.sync(&snapshot);

    while snapshot.phase == GamePhase::Playing && snapshot.time.elapsed_secs < seconds {
        let action = bot.step(&snapshot);
        engine.queue_commands(action.commands);
        snapshot = engine.tick(action.input, DEFAULT_DT);
        bridge.sync(&snapshot);
    }
    snapshot
}

/// Drive the 60Hz game loop thread, polling its latest snapshot.
fn run_realtime(
    config: SimConfig,
    start: PlayerCommand,
    seconds: f64,
    bot: &mut TurretBot,
    bridge: &mut Bridge,
) -> Result<GameStateSnapshot, AppError> {
    let game_loop = GameLoop::spawn(config)?;
    game_loop.send(GameLoopCommand::Input(bot.input()));
    if !game_loop.send(GameLoopCommand::Player(start)) {
        return Err(AppError::LoopStopped);
    }

    let mut last_tick = None;
    let result = loop {
        std::thread::sleep(Duration::from_millis(4));
        let Some(snapshot) = game_loop.latest() else {
            continue;
        };
        if last_tick == Some(snapshot.time.tick) {
            continue;
        }
        last_tick = Some(snapshot.time.tick);
        bridge.sync(&snapshot);

        let done = snapshot.phase == GamePhase::GameOver || snapshot.time.elapsed_secs >= seconds;
        if done {
            break Ok(snapshot);
        }

        let action = bot.step(&snapshot);
        let sent = game_loop.send(GameLoopCommand::Input(action.input))
            && action
                .commands
                .into_iter()
                .all(|command| game_loop.send(GameLoopCommand::Player(command)));
        if !sent {
            break Err(AppError::LoopStopped);
        }
    };

    game_loop.shutdown();
    result
}

fn report(snapshot: &GameStateSnapshot, bridge: &Bridge) {
    let score = &snapshot.score;
    log::info!(
        "{} after {:.1}s ({} ticks): score {}, {} kills ({} headshots), accuracy {:.0}%",
        match snapshot.outcome {
            Some(outcome) => format!("{outcome:?}"),
            None => "stopped".to_string(),
        },
        snapshot.time.elapsed_secs,
        snapshot.time.tick,
        score.score,
        score.kills,
        score.headshots,
        score.accuracy * 100.0,
    );
    log::info!(
        "player health {:.0}, {} sounds, {:.0} damage taken, {} visuals live",
        snapshot.player.health,
        bridge.audio.sounds_played,
        bridge.hud.damage_taken,
        bridge.renderer.live_visuals,
    );
    if let Some(status) = &snapshot.mode_status {
        match serde_json::to_string(status) {
            Ok(json) => log::info!("mode status {json}"),
            Err(err) => log::warn!("could not encode mode status: {err}"),
        }
    }
}
