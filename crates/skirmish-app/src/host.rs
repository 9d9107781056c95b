//! Host bridge: hands each snapshot to the renderer, audio and HUD.
//!
//! The simulation never talks to presentation code. The host owns the
//! collaborators and a [`HostBridge`] that diffs snapshot entities against
//! the visuals it has already created, then dispatches the tick's events.

use std::collections::BTreeMap;

use glam::DVec3;

use skirmish_core::enums::{EntityKind, ObjectiveKind, SoundKind};
use skirmish_core::events::GameEvent;
use skirmish_core::state::GameStateSnapshot;

/// Opaque handle to a visual owned by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VisualHandle(pub u64);

/// World placement of a visual.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: DVec3,
    pub yaw: f64,
}

pub trait Renderer {
    fn spawn_visual(&mut self, kind: EntityKind, transform: Transform) -> VisualHandle;
    fn update_visual(&mut self, handle: VisualHandle, transform: Transform);
    fn remove_visual(&mut self, handle: VisualHandle);
}

pub trait Audio {
    fn play_sound(&mut self, sound: SoundKind, position: DVec3);
}

pub trait Hud {
    fn report_score_delta(&mut self, delta: i64);
    fn report_kill(&mut self, headshot: bool);
    fn report_player_damage(&mut self, amount: f64, direction: DVec3);
    fn report_objective_progress(&mut self, kind: ObjectiveKind, target: u32, count: u32);
}

/// Identity of a snapshot entity across ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum VisualKey {
    Enemy(u32),
    Bullet(u32),
    Grenade(u32),
    Item(u32),
}

/// Keeps renderer visuals in step with snapshots and forwards events.
pub struct HostBridge<R, A, H> {
    pub renderer: R,
    pub audio: A,
    pub hud: H,
    visuals: BTreeMap<VisualKey, VisualHandle>,
}

impl<R: Renderer, A: Audio, H: Hud> HostBridge<R, A, H> {
    pub fn new(renderer: R, audio: A, hud: H) -> Self {
        Self {
            renderer,
            audio,
            hud,
            visuals: BTreeMap::new(),
        }
    }

    /// Number of visuals currently alive in the renderer.
    pub fn visual_count(&self) -> usize {
        self.visuals.len()
    }

    /// Apply one snapshot: spawn, move and remove visuals, then dispatch events.
    pub fn sync(&mut self, snapshot: &GameStateSnapshot) {
        let mut present: Vec<(VisualKey, EntityKind, Transform)> = Vec::with_capacity(
            snapshot.enemies.len() + snapshot.bullets.len() + snapshot.grenades.len() + snapshot.items.len(),
        );
        for enemy in &snapshot.enemies {
            present.push((
                VisualKey::Enemy(enemy.id),
                EntityKind::Enemy(enemy.kind),
                Transform {
                    position: enemy.position,
                    yaw: enemy.yaw,
                },
            ));
        }
        for bullet in &snapshot.bullets {
            present.push((
                VisualKey::Bullet(bullet.id),
                EntityKind::Bullet,
                Transform {
                    position: bullet.position,
                    yaw: bullet.direction.x.atan2(bullet.direction.z),
                },
            ));
        }
        for grenade in &snapshot.grenades {
            present.push((
                VisualKey::Grenade(grenade.id),
                EntityKind::Grenade,
                Transform {
                    position: grenade.position,
                    yaw: 0.0,
                },
            ));
        }
        for item in &snapshot.items {
            present.push((
                VisualKey::Item(item.id),
                EntityKind::Item(item.kind),
                Transform {
                    position: item.position,
                    yaw: item.rotation,
                },
            ));
        }

        let mut seen = BTreeMap::new();
        for (key, kind, transform) in present {
            let handle = match self.visuals.get(&key) {
                Some(&handle) => {
                    self.renderer.update_visual(handle, transform);
                    handle
                }
                None => self.renderer.spawn_visual(kind, transform),
            };
            seen.insert(key, handle);
        }
        for (key, handle) in &self.visuals {
            if !seen.contains_key(key) {
                self.renderer.remove_visual(*handle);
            }
        }
        self.visuals = seen;

        for event in &snapshot.events {
            self.dispatch(event);
        }
    }

    /// Remove every visual, e.g. when the host tears the scene down.
    pub fn clear(&mut self) {
        for handle in self.visuals.values() {
            self.renderer.remove_visual(*handle);
        }
        self.visuals.clear();
    }

    fn dispatch(&mut self, event: &GameEvent) {
        match event {
            GameEvent::Sound { sound, position } => self.audio.play_sound(*sound, *position),
            GameEvent::ScoreChanged { delta, .. } => self.hud.report_score_delta(*delta),
            GameEvent::EnemyKilled { headshot, .. } => self.hud.report_kill(*headshot),
            GameEvent::PlayerDamaged { amount, direction } => {
                self.hud.report_player_damage(*amount, *direction)
            }
            GameEvent::ObjectiveProgress { kind, target, count } => {
                self.hud.report_objective_progress(*kind, *target, *count)
            }
            GameEvent::WaveStarted { wave, enemy_count } => {
                log::info!("wave {wave}: {enemy_count} enemies");
            }
            GameEvent::GameOver { outcome, score } => {
                log::info!("game over: {outcome:?} with {score} points");
            }
            other => log::trace!("{other:?}"),
        }
    }
}

/// Collaborators for running without a window: they only count what they
/// were asked to do.
#[derive(Debug, Default)]
pub struct Headless {
    next_handle: u64,
    pub live_visuals: usize,
    pub sounds_played: u32,
    pub kills_reported: u32,
    pub headshots_reported: u32,
    pub damage_taken: f64,
}

impl Renderer for Headless {
    fn spawn_visual(&mut self, kind: EntityKind, _transform: Transform) -> VisualHandle {
        self.next_handle += 1;
        self.live_visuals += 1;
        log::trace!("visual {} spawned for {kind:?}", self.next_handle);
        VisualHandle(self.next_handle)
    }

    fn update_visual(&mut self, _handle: VisualHandle, _transform: Transform) {}

    fn remove_visual(&mut self, _handle: VisualHandle) {
        self.live_visuals = self.live_visuals.saturating_sub(1);
    }
}

impl Audio for Headless {
    fn play_sound(&mut self, _sound: SoundKind, _position: DVec3) {
        self.sounds_played += 1;
    }
}

impl Hud for Headless {
    fn report_score_delta(&mut self, _delta: i64) {}

    fn report_kill(&mut self, headshot: bool) {
        self.kills_reported += 1;
        if headshot {
            self.headshots_reported += 1;
        }
    }

    fn report_player_damage(&mut self, amount: f64, _direction: DVec3) {
        self.damage_taken += amount;
    }

    fn report_objective_progress(&mut self, kind: ObjectiveKind, target: u32, count: u32) {
        log::info!("objective {kind:?}: {count}/{target}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skirmish_core::enums::{EnemyKind, ItemKind};
    use skirmish_core::state::{BulletView, EnemyView, ItemView};

    #[derive(Default)]
    struct MockRenderer {
        next: u64,
        spawned: Vec<EntityKind>,
        updated: Vec<VisualHandle>,
        removed: Vec<VisualHandle>,
    }

    impl Renderer for MockRenderer {
        fn spawn_visual(&mut self, kind: EntityKind, _transform: Transform) -> VisualHandle {
            self.next += 1;
            self.spawned.push(kind);
            VisualHandle(self.next)
        }

        fn update_visual(&mut self, handle: VisualHandle, _transform: Transform) {
            self.updated.push(handle);
        }

        fn remove_visual(&mut self, handle: VisualHandle) {
            self.removed.push(handle);
        }
    }

    #[derive(Default)]
    struct MockAudio {
        sounds: Vec<SoundKind>,
    }

    impl Audio for MockAudio {
        fn play_sound(&mut self, sound: SoundKind, _position: DVec3) {
            self.sounds.push(sound);
        }
    }

    #[derive(Default)]
    struct MockHud {
        score: i64,
        kills: Vec<bool>,
        damage: f64,
        objectives: Vec<(ObjectiveKind, u32, u32)>,
    }

    impl Hud for MockHud {
        fn report_score_delta(&mut self, delta: i64) {
            self.score += delta;
        }

        fn report_kill(&mut self, headshot: bool) {
            self.kills.push(headshot);
        }

        fn report_player_damage(&mut self, amount: f64, _direction: DVec3) {
            self.damage += amount;
        }

        fn report_objective_progress(&mut self, kind: ObjectiveKind, target: u32, count: u32) {
            self.objectives.push((kind, target, count));
        }
    }

    fn bridge() -> HostBridge<MockRenderer, MockAudio, MockHud> {
        HostBridge::new(MockRenderer::default(), MockAudio::default(), MockHud::default())
    }

    fn enemy(id: u32) -> EnemyView {
        EnemyView {
            id,
            kind: EnemyKind::Regular,
            position: DVec3::new(id as f64, 0.0, 0.0),
            yaw: 0.0,
            health: 100.0,
            max_health: 100.0,
            alive: true,
            state: Default::default(),
        }
    }

    #[test]
    fn test_new_entities_spawn_visuals() {
        let mut bridge = bridge();
        let snapshot = GameStateSnapshot {
            enemies: vec![enemy(1), enemy(2)],
            bullets: vec![BulletView {
                id: 1,
                position: DVec3::ZERO,
                direction: DVec3::Z,
            }],
            items: vec![ItemView {
                id: 1,
                kind: ItemKind::AmmoPack,
                position: DVec3::ZERO,
                rotation: 0.0,
            }],
            ..Default::default()
        };
        bridge.sync(&snapshot);

        assert_eq!(bridge.visual_count(), 4);
        assert_eq!(bridge.renderer.spawned.len(), 4);
        assert!(bridge.renderer.spawned.contains(&EntityKind::Item(ItemKind::AmmoPack)));
        assert!(bridge.renderer.updated.is_empty());
    }

    #[test]
    fn test_known_entities_update_and_missing_ones_are_removed() {
        let mut bridge = bridge();
        bridge.sync(&GameStateSnapshot {
            enemies: vec![enemy(1), enemy(2)],
            ..Default::default()
        });
        bridge.sync(&GameStateSnapshot {
            enemies: vec![enemy(2), enemy(3)],
            ..Default::default()
        });

        assert_eq!(bridge.renderer.spawned.len(), 3);
        assert_eq!(bridge.renderer.updated, vec![VisualHandle(2)]);
        assert_eq!(bridge.renderer.removed, vec![VisualHandle(1)]);
        assert_eq!(bridge.visual_count(), 2);
    }

    #[test]
    fn test_same_id_in_different_pools_are_distinct() {
        let mut bridge = bridge();
        bridge.sync(&GameStateSnapshot {
            enemies: vec![enemy(1)],
            bullets: vec![BulletView {
                id: 1,
                position: DVec3::ZERO,
                direction: DVec3::X,
            }],
            ..Default::default()
        });
        assert_eq!(bridge.visual_count(), 2);
    }

    #[test]
    fn test_events_reach_collaborators() {
        let mut bridge = bridge();
        bridge.sync(&GameStateSnapshot {
            events: vec![
                GameEvent::Sound {
                    sound: SoundKind::RifleShot,
                    position: DVec3::ZERO,
                },
                GameEvent::ScoreChanged { delta: 200, total: 200 },
                GameEvent::EnemyKilled {
                    enemy_id: 1,
                    kind: EnemyKind::Heavy,
                    headshot: true,
                    score: 400,
                },
                GameEvent::PlayerDamaged {
                    amount: 12.5,
                    direction: DVec3::X,
                },
                GameEvent::ObjectiveProgress {
                    kind: ObjectiveKind::Collect(ItemKind::Intel),
                    target: 3,
                    count: 1,
                },
            ],
            ..Default::default()
        });

        assert_eq!(bridge.audio.sounds, vec![SoundKind::RifleShot]);
        assert_eq!(bridge.hud.score, 200);
        assert_eq!(bridge.hud.kills, vec![true]);
        assert_eq!(bridge.hud.damage, 12.5);
        assert_eq!(
            bridge.hud.objectives,
            vec![(ObjectiveKind::Collect(ItemKind::Intel), 3, 1)]
        );
    }

    #[test]
    fn test_clear_removes_everything() {
        let mut bridge = bridge();
        bridge.sync(&GameStateSnapshot {
            enemies: vec![enemy(1), enemy(2)],
            ..Default::default()
        });
        bridge.clear();
        assert_eq!(bridge.visual_count(), 0);
        assert_eq!(bridge.renderer.removed.len(), 2);
    }

    #[test]
    fn test_headless_tracks_live_visuals() {
        let mut bridge = HostBridge::new(Headless::default(), Headless::default(), Headless::default());
        bridge.sync(&GameStateSnapshot {
            enemies: vec![enemy(1), enemy(2)],
            ..Default::default()
        });
        bridge.sync(&GameStateSnapshot {
            enemies: vec![enemy(2)],
            ..Default::default()
        });
        assert_eq!(bridge.renderer.live_visuals, 1);
    }
}
