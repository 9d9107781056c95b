//! Game loop thread: runs the simulation engine at 60Hz and publishes snapshots.
//!
//! The engine is created inside the thread so the thread owns it outright.
//! Commands and per-frame player input arrive over an `mpsc` channel. The
//! latest snapshot is stored in shared state for polling by the host.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use skirmish_core::commands::{PlayerCommand, PlayerInput};
use skirmish_core::constants::{DEFAULT_DT, TICK_RATE};
use skirmish_core::state::GameStateSnapshot;
use skirmish_sim::engine::{SimConfig, SimulationEngine};

/// Nominal duration of one tick.
const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Messages sent from the host to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    Player(PlayerCommand),
    /// Player transform used from the next tick on.
    Input(PlayerInput),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Handle to a running game loop thread.
pub struct GameLoop {
    commands: mpsc::Sender<GameLoopCommand>,
    latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
    thread: JoinHandle<()>,
}

impl GameLoop {
    /// Spawn the game loop in a new thread.
    pub fn spawn(config: SimConfig) -> std::io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();
        let latest_snapshot = Arc::new(Mutex::new(None));
        let shared = Arc::clone(&latest_snapshot);

        let thread = std::thread::Builder::new()
            .name("skirmish-game-loop".into())
            .spawn(move || {
                run_game_loop(config, cmd_rx, &shared);
            })?;

        Ok(Self {
            commands: cmd_tx,
            latest_snapshot,
            thread,
        })
    }

    /// Send a message. Returns false once the loop has exited.
    pub fn send(&self, command: GameLoopCommand) -> bool {
        self.commands.send(command).is_ok()
    }

    /// Most recent snapshot, if a tick has run.
    pub fn latest(&self) -> Option<GameStateSnapshot> {
        self.latest_snapshot.lock().ok().and_then(|lock| lock.clone())
    }

    /// Stop the loop and wait for the thread to finish.
    pub fn shutdown(self) {
        let _ = self.commands.send(GameLoopCommand::Shutdown);
        if self.thread.join().is_err() {
            log::error!("game loop thread panicked");
        }
    }
}

/// The game loop. Runs until Shutdown or channel disconnect.
fn run_game_loop(
    config: SimConfig,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
) {
    let mut engine = SimulationEngine::new(config);
    let mut input = PlayerInput::default();
    let mut next_tick_time = Instant::now();
    log::debug!("game loop running at {TICK_RATE}Hz");

    loop {
        // 1. Drain all pending messages
        if !drain_commands(&cmd_rx, &mut engine, &mut input) {
            log::debug!("game loop stopped");
            return;
        }

        // 2. Advance one tick (engine handles pause semantics internally)
        let snapshot = engine.tick(input, DEFAULT_DT);

        // 3. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 4. Sleep until next tick
        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind; reset to avoid a catch-up spiral
            next_tick_time = now;
        }
    }
}

/// Apply every queued message. Returns false when the loop should stop.
fn drain_commands(
    cmd_rx: &mpsc::Receiver<GameLoopCommand>,
    engine: &mut SimulationEngine,
    input: &mut PlayerInput,
) -> bool {
    loop {
        match cmd_rx.try_recv() {
            Ok(GameLoopCommand::Player(cmd)) => engine.queue_command(cmd),
            Ok(GameLoopCommand::Input(latest)) => *input = latest,
            Ok(GameLoopCommand::Shutdown) => return false,
            Err(mpsc::TryRecvError::Empty) => return true,
            Err(mpsc::TryRecvError::Disconnected) => return false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;
    use skirmish_core::enums::{Difficulty, GameMode, GamePhase};

    fn start_command() -> PlayerCommand {
        PlayerCommand::StartGame {
            mode: GameMode::Survival,
            difficulty: Difficulty::Normal,
        }
    }

    #[test]
    fn test_drain_applies_commands_and_input() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();
        let mut engine = SimulationEngine::new(SimConfig::default());
        let mut input = PlayerInput::default();

        let moved = PlayerInput::new(DVec3::new(3.0, 1.7, 4.0), 1.0, 0.0);
        tx.send(GameLoopCommand::Player(start_command())).unwrap();
        tx.send(GameLoopCommand::Input(moved)).unwrap();

        assert!(drain_commands(&rx, &mut engine, &mut input));
        assert_eq!(input, moved);
        let snapshot = engine.tick(input, DEFAULT_DT);
        assert_eq!(snapshot.phase, GamePhase::Playing);
    }

    #[test]
    fn test_drain_stops_on_shutdown_or_disconnect() {
        let mut engine = SimulationEngine::new(SimConfig::default());
        let mut input = PlayerInput::default();

        let (tx, rx) = mpsc::channel::<GameLoopCommand>();
        tx.send(GameLoopCommand::Shutdown).unwrap();
        assert!(!drain_commands(&rx, &mut engine, &mut input));

        let (tx, rx) = mpsc::channel::<GameLoopCommand>();
        drop(tx);
        assert!(!drain_commands(&rx, &mut engine, &mut input));
    }

    #[test]
    fn test_loop_publishes_snapshots() {
        let game_loop = GameLoop::spawn(SimConfig::default()).unwrap();
        assert!(game_loop.send(GameLoopCommand::Player(start_command())));

        let deadline = Instant::now() + Duration::from_secs(5);
        let mut playing = false;
        while Instant::now() < deadline {
            if let Some(snapshot) = game_loop.latest() {
                if snapshot.phase == GamePhase::Playing && snapshot.time.tick > 3 {
                    playing = true;
                    break;
                }
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        game_loop.shutdown();
        assert!(playing, "game loop never reached Playing");
    }

    #[test]
    fn test_snapshot_serialization_under_3ms() {
        let mut engine = SimulationEngine::new(SimConfig::default());
        engine.queue_command(start_command());

        // Run long enough for enemies to spawn
        for _ in 0..600 {
            engine.tick(PlayerInput::default(), DEFAULT_DT);
        }

        let snapshot = engine.tick(PlayerInput::default(), DEFAULT_DT);
        let start = Instant::now();
        let json = serde_json::to_string(&snapshot).unwrap();
        let elapsed = start.elapsed();

        assert!(
            elapsed < Duration::from_millis(3),
            "Snapshot serialization took {:?}, should be <3ms",
            elapsed
        );
        assert!(!json.is_empty());
    }

    #[test]
    fn test_tick_duration_constant() {
        // 60Hz = 16.667ms per tick
        let expected_nanos = 1_000_000_000u64 / 60;
        assert_eq!(TICK_DURATION.as_nanos(), expected_nanos as u128);
    }
}
