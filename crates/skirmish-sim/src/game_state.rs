//! Score keeping and game-mode rules.
//!
//! `GameState` owns the running statistics and the per-mode progress
//! (survival waves, mission objectives, the time challenge clock). It
//! decides when the game ends and asks the engine for item drops through
//! [`GameState::drops`].

use skirmish_core::config::{ModeConfig, ObjectiveSpec};
use skirmish_core::constants::{HEADSHOT_SCORE_MULTIPLIER, TIMER_EPSILON, VICTORY_DELAY_SECS, WAVE_CLEAR_ITEM_COUNT};
use skirmish_core::enums::*;
use skirmish_core::events::GameEvent;
use skirmish_core::state::{ModeStatus, ObjectiveView, ScoreView};
use skirmish_core::types::timer_reached;

/// Running statistics.
#[derive(Debug, Clone, Default)]
pub struct ScoreState {
    pub score: u64,
    pub kills: u32,
    pub headshots: u32,
    pub shots_fired: u32,
    pub shots_hit: u32,
    pub time_played_secs: f64,
}

impl ScoreState {
    /// Fraction of fired projectiles that hit, 0 before the first shot.
    pub fn accuracy(&self) -> f64 {
        if self.shots_fired == 0 {
            0.0
        } else {
            self.shots_hit as f64 / self.shots_fired as f64
        }
    }

    pub fn view(&self) -> ScoreView {
        ScoreView {
            score: self.score,
            kills: self.kills,
            headshots: self.headshots,
            shots_fired: self.shots_fired,
            shots_hit: self.shots_hit,
            accuracy: self.accuracy(),
            time_played_secs: self.time_played_secs,
        }
    }
}

/// An item the rules want placed somewhere in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemDrop {
    /// A kind chosen by spawn weight.
    Random,
    Kind(ItemKind),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Objective {
    pub kind: ObjectiveKind,
    pub target: u32,
    pub progress: u32,
    pub completed: bool,
}

impl From<&ObjectiveSpec> for Objective {
    fn from(spec: &ObjectiveSpec) -> Self {
        Self {
            kind: spec.kind,
            target: spec.count,
            progress: 0,
            completed: spec.count == 0,
        }
    }
}

/// Mode-specific progress.
#[derive(Debug, Clone, PartialEq)]
pub enum ModeState {
    Survival {
        /// Current wave, starting at 1.
        wave: u32,
        /// Enemies of this wave still to be killed.
        enemies_remaining: u32,
        /// Enemies of this wave not yet spawned.
        spawn_budget: u32,
        /// Time since the wave was cleared, while waiting for the next one.
        intermission: Option<f64>,
    },
    Mission {
        time_remaining: f64,
        objectives: Vec<Objective>,
    },
    TimeChallenge {
        time_remaining: f64,
        target_score: u32,
    },
}

#[derive(Debug, Clone)]
pub struct GameState {
    pub mode: GameMode,
    pub score: ScoreState,
    pub mode_state: ModeState,
    /// Countdown to a victory that has been earned.
    pub victory_timer: Option<f64>,
    pub outcome: Option<GameOutcome>,
    /// Item drops requested since the engine last drained them.
    pub drops: Vec<ItemDrop>,
    config: ModeConfig,
}

impl GameState {
    pub fn new(mode: GameMode, config: ModeConfig) -> Self {
        let mode_state = match mode {
            GameMode::Survival => ModeState::Survival {
                wave: 0,
                enemies_remaining: 0,
                spawn_budget: 0,
                intermission: None,
            },
            GameMode::Mission => ModeState::Mission {
                time_remaining: config.mission.time_limit_secs,
                objectives: config.mission.objectives.iter().map(Objective::from).collect(),
            },
            GameMode::TimeChallenge => ModeState::TimeChallenge {
                time_remaining: config.time_challenge.duration_secs,
                target_score: config.time_challenge.target_score,
            },
        };
        Self {
            mode,
            score: ScoreState::default(),
            mode_state,
            victory_timer: None,
            outcome: None,
            drops: Vec::new(),
            config,
        }
    }

    /// Kick off the mode: the first survival wave, or the mission's
    /// collectibles.
    pub fn begin(&mut self, events: &mut Vec<GameEvent>) {
        if matches!(self.mode_state, ModeState::Survival { .. }) {
            self.start_wave(1, events);
        }
        if let ModeState::Mission { objectives, .. } = &self.mode_state {
            for objective in objectives {
                if let ObjectiveKind::Collect(kind) = objective.kind {
                    self.drops
                        .extend(std::iter::repeat(ItemDrop::Kind(kind)).take(objective.target as usize));
                }
            }
        }
        log::info!("{:?} started", self.mode);
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Whether the spawner may add an enemy right now.
    pub fn may_spawn_enemy(&self) -> bool {
        if self.is_over() {
            return false;
        }
        match &self.mode_state {
            ModeState::Survival {
                spawn_budget,
                intermission,
                ..
            } => *spawn_budget > 0 && intermission.is_none(),
            _ => true,
        }
    }

    pub fn enemy_spawned(&mut self) {
        if let ModeState::Survival { spawn_budget, .. } = &mut self.mode_state {
            *spawn_budget = spawn_budget.saturating_sub(1);
        }
    }

    /// A living enemy was evicted to make room; survival spawns it again.
    pub fn enemy_evicted(&mut self) {
        if let ModeState::Survival {
            spawn_budget,
            enemies_remaining,
            ..
        } = &mut self.mode_state
        {
            if *spawn_budget < *enemies_remaining {
                *spawn_budget += 1;
            }
        }
    }

    pub fn record_shots(&mut self, count: u32) {
        self.score.shots_fired = self.score.shots_fired.saturating_add(count);
    }

    pub fn record_hit(&mut self) {
        self.score.shots_hit = self.score.shots_hit.saturating_add(1);
    }

    /// Points a kill is worth.
    pub fn kill_points(score_value: u32, headshot: bool) -> u32 {
        if headshot {
            score_value.saturating_mul(HEADSHOT_SCORE_MULTIPLIER)
        } else {
            score_value
        }
    }

    /// Count a kill worth `points` toward the score and the mode.
    pub fn record_kill(&mut self, kind: EnemyKind, headshot: bool, points: u32, events: &mut Vec<GameEvent>) {
        if self.is_over() {
            return;
        }
        self.score.kills += 1;
        if headshot {
            self.score.headshots += 1;
        }
        self.add_score(points as u64, events);

        match &mut self.mode_state {
            ModeState::Survival {
                wave,
                enemies_remaining,
                ..
            } => {
                if *enemies_remaining == 0 {
                    return;
                }
                *enemies_remaining -= 1;
                if *enemies_remaining == 0 {
                    let cleared = *wave;
                    self.wave_cleared(cleared, events);
                }
            }
            ModeState::Mission { .. } => self.advance_objective(ObjectiveKind::Kill(kind), events),
            ModeState::TimeChallenge { .. } => {}
        }
    }

    /// Count a pickup. Intel is worth its value in points.
    pub fn record_pickup(&mut self, kind: ItemKind, value: f64, events: &mut Vec<GameEvent>) {
        if self.is_over() {
            return;
        }
        if kind == ItemKind::Intel {
            self.add_score(value.max(0.0).round() as u64, events);
        }
        if matches!(self.mode_state, ModeState::Mission { .. }) {
            self.advance_objective(ObjectiveKind::Collect(kind), events);
        }
    }

    /// Advance clocks and settle the outcome.
    pub fn update(&mut self, dt: f64, player_alive: bool, events: &mut Vec<GameEvent>) {
        if self.is_over() {
            return;
        }
        self.score.time_played_secs += dt;

        if !player_alive {
            self.finish(GameOutcome::Defeat, events);
            return;
        }

        if let Some(remaining) = self.victory_timer.as_mut() {
            *remaining -= dt;
            if *remaining <= TIMER_EPSILON {
                self.finish(GameOutcome::Victory, events);
                return;
            }
        }

        let interval = self.config.survival.wave_interval_secs;
        let mut next_wave = None;
        let mut timed_out = None;
        match &mut self.mode_state {
            ModeState::Survival {
                wave, intermission, ..
            } => {
                if let Some(elapsed) = intermission.as_mut() {
                    *elapsed += dt;
                    if timer_reached(*elapsed, interval) {
                        next_wave = Some(*wave + 1);
                    }
                }
            }
            ModeState::Mission {
                time_remaining,
                objectives,
            } => {
                *time_remaining = (*time_remaining - dt).max(0.0);
                if *time_remaining <= TIMER_EPSILON {
                    let won = objectives.iter().all(|o| o.completed);
                    timed_out = Some(if won {
                        GameOutcome::Victory
                    } else {
                        GameOutcome::Defeat
                    });
                }
            }
            ModeState::TimeChallenge {
                time_remaining,
                target_score,
            } => {
                *time_remaining = (*time_remaining - dt).max(0.0);
                if *time_remaining <= TIMER_EPSILON {
                    let won = self.score.score >= *target_score as u64;
                    timed_out = Some(if won {
                        GameOutcome::Victory
                    } else {
                        GameOutcome::Defeat
                    });
                }
            }
        }

        if let Some(wave) = next_wave {
            self.start_wave(wave, events);
        }
        if let Some(outcome) = timed_out {
            self.finish(outcome, events);
        }
    }

    pub fn mode_status(&self) -> ModeStatus {
        match &self.mode_state {
            ModeState::Survival {
                wave,
                enemies_remaining,
                intermission,
                ..
            } => ModeStatus::Survival {
                wave: *wave,
                enemies_remaining: *enemies_remaining,
                next_wave_in_secs: intermission
                    .map(|elapsed| (self.config.survival.wave_interval_secs - elapsed).max(0.0)),
            },
            ModeState::Mission {
                time_remaining,
                objectives,
            } => ModeStatus::Mission {
                time_remaining_secs: *time_remaining,
                objectives: objectives
                    .iter()
                    .map(|o| ObjectiveView {
                        kind: o.kind,
                        target: o.target,
                        progress: o.progress,
                        completed: o.completed,
                    })
                    .collect(),
            },
            ModeState::TimeChallenge {
                time_remaining,
                target_score,
            } => ModeStatus::TimeChallenge {
                time_remaining_secs: *time_remaining,
                target_score: *target_score,
            },
        }
    }

    fn add_score(&mut self, points: u64, events: &mut Vec<GameEvent>) {
        if points == 0 {
            return;
        }
        self.score.score = self.score.score.saturating_add(points);
        events.push(GameEvent::ScoreChanged {
            delta: points as i64,
            total: self.score.score,
        });
        if let ModeState::TimeChallenge { target_score, .. } = self.mode_state {
            if self.score.score >= target_score as u64 {
                self.schedule_victory();
            }
        }
    }

    fn start_wave(&mut self, wave: u32, events: &mut Vec<GameEvent>) {
        let size = self.config.survival.wave_size(wave);
        self.mode_state = ModeState::Survival {
            wave,
            enemies_remaining: size,
            spawn_budget: size,
            intermission: None,
        };
        events.push(GameEvent::WaveStarted {
            wave,
            enemy_count: size,
        });
        let every = self.config.survival.health_pack_every;
        if every > 0 && wave % every == 0 {
            self.drops.push(ItemDrop::Kind(ItemKind::HealthPack));
        }
        log::info!("wave {wave} started with {size} enemies");
    }

    fn wave_cleared(&mut self, wave: u32, events: &mut Vec<GameEvent>) {
        events.push(GameEvent::WaveCompleted { wave });
        self.drops
            .extend(std::iter::repeat(ItemDrop::Random).take(WAVE_CLEAR_ITEM_COUNT as usize));
        log::info!("wave {wave} cleared");

        if wave >= self.config.survival.max_waves {
            self.schedule_victory();
        } else if let ModeState::Survival { intermission, .. } = &mut self.mode_state {
            *intermission = Some(0.0);
        }
    }

    fn advance_objective(&mut self, kind: ObjectiveKind, events: &mut Vec<GameEvent>) {
        let ModeState::Mission { objectives, .. } = &mut self.mode_state else {
            return;
        };
        let Some(objective) = objectives.iter_mut().find(|o| o.kind == kind && !o.completed) else {
            return;
        };
        objective.progress += 1;
        events.push(GameEvent::ObjectiveProgress {
            kind,
            target: objective.target,
            count: objective.progress,
        });
        if objective.progress >= objective.target {
            objective.completed = true;
            events.push(GameEvent::ObjectiveCompleted { kind });
            log::info!("objective {kind:?} complete");
        }
        if objectives.iter().all(|o| o.completed) {
            self.schedule_victory();
        }
    }

    fn schedule_victory(&mut self) {
        if self.victory_timer.is_none() && !self.is_over() {
            self.victory_timer = Some(VICTORY_DELAY_SECS);
        }
    }

    fn finish(&mut self, outcome: GameOutcome, events: &mut Vec<GameEvent>) {
        if self.is_over() {
            return;
        }
        self.outcome = Some(outcome);
        self.victory_timer = None;
        events.push(GameEvent::GameOver {
            outcome,
            score: self.score.score,
        });
        log::info!(
            "game over: {:?} with {} points, {} kills",
            outcome,
            self.score.score,
            self.score.kills
        );
    }
}
