//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the hecs world of enemies, the player, the
//! bullet/grenade/item pools and the game rules. It processes player
//! commands, runs all systems and produces `GameStateSnapshot`s. Completely
//! headless, so whole games can be replayed deterministically from a seed.

use std::collections::VecDeque;

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use skirmish_core::commands::{PlayerCommand, PlayerInput};
use skirmish_core::config::GameConfig;
use skirmish_core::constants::MAX_DT;
use skirmish_core::enums::*;
use skirmish_core::events::GameEvent;
use skirmish_core::state::GameStateSnapshot;
use skirmish_core::types::{Obstacle, SimTime, WorldBounds};

use crate::game_state::{GameState, ItemDrop};
use crate::managers::arsenal::Trigger;
use crate::managers::bullets::BulletPool;
use crate::managers::enemies;
use crate::managers::grenades::GrenadePool;
use crate::managers::items::ItemPool;
use crate::managers::player::Player;
use crate::systems;
use crate::systems::spawner::EnemySpawner;
use crate::world_setup;

/// Configuration for a new simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed and inputs give the same game.
    pub seed: u64,
    pub game: GameConfig,
    /// Mode used until a `StartGame` command picks another.
    pub mode: GameMode,
    pub difficulty: Difficulty,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            game: GameConfig::default(),
            mode: GameMode::default(),
            difficulty: Difficulty::default(),
        }
    }
}

/// The simulation engine. Owns the ECS world and all game state.
pub struct SimulationEngine {
    config: GameConfig,
    bounds: WorldBounds,
    world: World,
    obstacles: Vec<Obstacle>,
    time: SimTime,
    phase: GamePhase,
    mode: GameMode,
    difficulty: Difficulty,
    rng: ChaCha8Rng,
    player: Player,
    bullets: BulletPool,
    grenades: GrenadePool,
    items: ItemPool,
    game: GameState,
    spawner: EnemySpawner,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    events: Vec<GameEvent>,
}

impl SimulationEngine {
    /// Create an engine sitting in the menu.
    pub fn new(config: SimConfig) -> Self {
        let game = config.game;
        Self {
            bounds: WorldBounds::new(game.world.size),
            world: World::new(),
            obstacles: Vec::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            mode: config.mode,
            difficulty: config.difficulty,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            player: Player::new(&game),
            bullets: BulletPool::default(),
            grenades: GrenadePool::default(),
            items: ItemPool::default(),
            game: GameState::new(config.mode, game.modes.clone()),
            spawner: EnemySpawner::default(),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            config: game,
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by `dt` seconds and return the resulting snapshot.
    ///
    /// `dt` is clamped to `[0, MAX_DT]`; a non-finite `dt` counts as zero.
    /// While paused, in the menu or after game over, nothing moves.
    pub fn tick(&mut self, input: PlayerInput, dt: f64) -> GameStateSnapshot {
        let dt = if dt.is_finite() { dt.clamp(0.0, MAX_DT) } else { 0.0 };

        if self.phase == GamePhase::Playing {
            self.player.apply_input(input, &self.bounds);
        }

        self.process_commands();

        if self.phase == GamePhase::Playing {
            self.run_systems(dt);
            self.time.advance(dt);
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            self.difficulty,
            &self.player,
            &self.bullets,
            &self.grenades,
            &self.items,
            &self.game,
            events,
        )
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn bounds(&self) -> WorldBounds {
        self.bounds
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Static geometry of the current arena.
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn game_state(&self) -> &GameState {
        &self.game
    }

    /// Spawn an enemy of `kind` at `position`, facing the player (for testing).
    #[cfg(test)]
    pub fn spawn_test_enemy(&mut self, kind: EnemyKind, position: glam::DVec3) -> u32 {
        let id = self.spawner.next_id;
        self.spawner.next_id += 1;
        let order = self.spawner.next_order;
        self.spawner.next_order += 1;
        let stats = self
            .config
            .enemies
            .get(kind)
            .scaled(self.config.difficulty.get(self.difficulty));
        enemies::spawn_enemy(
            &mut self.world,
            &mut self.rng,
            id,
            order,
            kind,
            position,
            self.player.eye(),
            stats,
            &self.bounds,
        );
        id
    }

    /// Replace the arena geometry (for testing).
    #[cfg(test)]
    pub fn set_obstacles(&mut self, obstacles: Vec<Obstacle>) {
        self.obstacles = obstacles;
    }

    #[cfg(test)]
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    #[cfg(test)]
    pub fn items_mut(&mut self) -> &mut ItemPool {
        &mut self.items
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartGame { mode, difficulty } => {
                if matches!(self.phase, GamePhase::Menu | GamePhase::GameOver) {
                    self.mode = mode;
                    self.difficulty = difficulty;
                    self.start_game();
                } else {
                    log::warn!("StartGame ignored while {:?}", self.phase);
                }
            }
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Playing {
                    self.phase = GamePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Playing;
                }
            }
            PlayerCommand::Restart => {
                if self.phase != GamePhase::Menu {
                    self.start_game();
                } else {
                    log::warn!("Restart ignored in the menu");
                }
            }
            PlayerCommand::ReturnToMenu => self.return_to_menu(),
            PlayerCommand::SelectWeapon { weapon } => {
                if self.can_act("SelectWeapon") && self.player.arsenal.select(weapon) {
                    self.sound(SoundKind::WeaponSwitch);
                }
            }
            PlayerCommand::Reload => {
                if self.can_act("Reload") && self.player.arsenal.start_reload() {
                    self.sound(SoundKind::Reload);
                }
            }
            PlayerCommand::Fire => {
                if self.can_act("Fire") {
                    self.fire();
                }
            }
            PlayerCommand::ThrowGrenade => {
                if self.can_act("ThrowGrenade") && self.player.take_grenade() {
                    self.grenades
                        .throw(self.player.muzzle(), self.player.aim(), &self.config.grenade);
                    self.sound(SoundKind::GrenadeThrow);
                }
            }
        }
    }

    /// Player actions need a live player in a running game.
    fn can_act(&self, action: &str) -> bool {
        if self.phase == GamePhase::Playing && self.player.alive() {
            true
        } else {
            log::warn!("{action} ignored while {:?}", self.phase);
            false
        }
    }

    fn sound(&mut self, sound: SoundKind) {
        self.events.push(GameEvent::Sound {
            sound,
            position: self.player.eye(),
        });
    }

    /// Pull the trigger of the held weapon.
    fn fire(&mut self) {
        let weapon = self.player.arsenal.current();
        let (kind, hitscan, range) = (weapon.kind, weapon.stats.hitscan, weapon.stats.range);
        let damage_scale = self.config.difficulty.get(self.difficulty).player_damage;
        let aim = self.player.aim();

        let shots = match self.player.arsenal.pull_trigger(&mut self.rng, aim, damage_scale) {
            Trigger::Fired(shots) => shots,
            Trigger::Empty => {
                self.sound(SoundKind::Empty);
                return;
            }
            Trigger::NotReady => return,
        };

        self.sound(kind.shot_sound());
        self.game.record_shots(shots.len() as u32);

        for shot in shots {
            if hitscan {
                systems::collision::hitscan(
                    &mut self.world,
                    self.player.eye(),
                    shot.direction,
                    range,
                    shot.damage,
                    &self.obstacles,
                    &mut self.game,
                    &mut self.events,
                );
            } else {
                self.bullets
                    .spawn(self.player.muzzle(), shot.direction, shot.damage);
            }
        }
    }

    /// Reset everything and begin a fresh game in the current mode.
    fn start_game(&mut self) {
        self.world.clear();
        self.obstacles = world_setup::generate_obstacles(&mut self.rng, &self.config.world);
        self.player = Player::new(&self.config);
        self.bullets.clear();
        self.grenades.clear();
        self.items.clear();
        self.spawner = EnemySpawner::default();
        self.game = GameState::new(self.mode, self.config.modes.clone());
        self.time = SimTime::default();
        self.phase = GamePhase::Playing;

        self.game.begin(&mut self.events);
        self.place_drops();
        log::info!(
            "game started: {:?} on {:?}, {} obstacles",
            self.mode,
            self.difficulty,
            self.obstacles.len()
        );
    }

    fn return_to_menu(&mut self) {
        self.world.clear();
        self.obstacles.clear();
        self.player = Player::new(&self.config);
        self.bullets.clear();
        self.grenades.clear();
        self.items.clear();
        self.spawner = EnemySpawner::default();
        self.game = GameState::new(self.mode, self.config.modes.clone());
        self.time = SimTime::default();
        self.phase = GamePhase::Menu;
    }

    /// Place item drops requested by the game rules.
    fn place_drops(&mut self) {
        for drop in std::mem::take(&mut self.game.drops) {
            match drop {
                ItemDrop::Random => {
                    self.items
                        .spawn_random(&mut self.rng, &self.config.items, &self.bounds);
                }
                ItemDrop::Kind(kind) => {
                    self.items.spawn_at_random(&mut self.rng, kind, &self.bounds);
                }
            }
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f64) {
        // 1. Weapon cooldown and reload
        self.player.arsenal.update(dt);
        // 2. Enemy spawning
        systems::spawner::run(
            &mut self.world,
            &mut self.rng,
            &mut self.spawner,
            &mut self.game,
            &self.config,
            self.difficulty,
            self.player.eye(),
            &self.bounds,
            &mut self.despawn_buffer,
            &mut self.events,
            dt,
        );
        // 3. Enemy AI and enemy fire
        systems::enemy_ai::run(
            &mut self.world,
            &mut self.rng,
            &mut self.player,
            &self.obstacles,
            &self.bounds,
            self.time.elapsed_secs,
            dt,
            &mut self.events,
        );
        // 4. Dead enemy removal
        enemies::remove_dead(&mut self.world, dt, &mut self.despawn_buffer);
        // 5. Bullet flight
        self.bullets.update(dt, &self.bounds);
        // 6. Grenade flight and fuses
        let detonations = self.grenades.update(dt, &self.bounds);
        // 7. Item animation and periodic drops
        self.items
            .update(dt, &mut self.rng, &self.config.items, &self.bounds);
        // 8. Collisions (bullets, explosions, contact, pickups)
        systems::collision::run(
            &mut self.world,
            &mut self.player,
            &mut self.bullets,
            &detonations,
            &mut self.items,
            &self.config,
            &mut self.game,
            &mut self.events,
            dt,
        );
        // 9. Game rules
        self.game.update(dt, self.player.alive(), &mut self.events);
        self.place_drops();
        if self.game.is_over() {
            self.phase = GamePhase::GameOver;
            log::debug!(
                "{} enemies alive at game over",
                enemies::living_count(&self.world)
            );
        }
    }
}
