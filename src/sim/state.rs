//! World state and core simulation types
//!
//! The World is the aggregate root: it owns every live entity, the logical
//! clock, the RNG and the pending scheduled events for one run.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::boss::Boss;
use super::character::Character;
use super::collectible::{Bottle, Coin, Projectile, Splash};
use super::enemy::{Enemy, Roamer, RoamerKind};
use super::level::{EnemySpawn, Level, initial_band};
use super::schedule::Schedule;
use super::spawn::{SpawnManager, scatter};
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    /// Boss death animation completed
    Won,
    /// Character death animation completed
    Lost,
}

/// Something observable happened during a tick
///
/// Collaborators (audio, HUD, tests) read these instead of reaching into
/// entity internals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Jumped,
    PlayerHurt,
    PlayerDied,
    EnemyKilled { id: u32 },
    BossHit { energy: u8 },
    BossKilled,
    /// Boss came into view for the first time
    BossEngaged,
    CoinCollected,
    BottleCollected,
    BottleThrown,
    BottleRespawned { id: u32 },
    /// Character has been idle long enough to nod off
    IdleStarted,
    Won,
    Lost,
}

/// Mutable services handed to entity updates for one tick
pub struct TickContext<'a> {
    /// Logical time of this tick
    pub now_ms: u64,
    /// Tick length in seconds
    pub dt: f32,
    pub tuning: &'a Tuning,
    pub schedule: &'a mut Schedule,
    pub events: &'a mut Vec<GameEvent>,
    pub rng: &'a mut Pcg32,
}

impl<'a> TickContext<'a> {
    pub fn new(
        now_ms: u64,
        tuning: &'a Tuning,
        schedule: &'a mut Schedule,
        events: &'a mut Vec<GameEvent>,
        rng: &'a mut Pcg32,
    ) -> Self {
        Self {
            now_ms,
            dt: tuning.dt(),
            tuning,
            schedule,
            events,
            rng,
        }
    }
}

/// Complete simulation state for one run
#[derive(Debug, Clone)]
pub struct World {
    pub tuning: Tuning,
    pub level: Level,
    pub character: Character,
    /// Roamers and the boss (sorted by id for determinism)
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub coins: Vec<Coin>,
    /// Includes collected bottles parked off-stage
    pub bottles: Vec<Bottle>,
    /// Visual only
    pub splashes: Vec<Splash>,
    /// Horizontal view offset; negative once the character walks right
    pub camera_x: f32,
    pub phase: GamePhase,
    /// Logical clock
    pub time_ms: u64,
    pub time_ticks: u64,
    /// Run seed for reproducibility
    pub seed: u64,
    /// Events raised since the last drain
    pub events: Vec<GameEvent>,
    pub(crate) schedule: Schedule,
    pub(crate) spawner: SpawnManager,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl World {
    /// Level one with default balance
    pub fn new(seed: u64) -> Self {
        Self::with_level(seed, Level::level_one(), Tuning::default())
    }

    /// Build a fresh run from a level descriptor
    pub fn with_level(seed: u64, level: Level, tuning: Tuning) -> Self {
        let character = Character::new(&tuning.character, tuning.gravity);
        let camera_x = -character.x() + CAMERA_LEAD;
        let mut world = Self {
            spawner: SpawnManager::new(&tuning.spawn),
            rng: Pcg32::seed_from_u64(seed),
            character,
            enemies: Vec::new(),
            projectiles: Vec::new(),
            coins: Vec::new(),
            bottles: Vec::new(),
            splashes: Vec::new(),
            camera_x,
            phase: GamePhase::Playing,
            time_ms: 0,
            time_ticks: 0,
            seed,
            events: Vec::new(),
            schedule: Schedule::new(),
            next_id: 1,
            tuning,
            level,
        };
        world.populate_enemies();
        world.scatter_items();
        world.normalize_order();

        log::info!(
            "World ready: seed={} enemies={} coins={} bottles={} level_end_x={}",
            seed,
            world.enemies.len(),
            world.coins.len(),
            world.bottles.len(),
            world.level.level_end_x
        );
        world
    }

    fn populate_enemies(&mut self) {
        let unplaced = |kind: RoamerKind| {
            self.level
                .enemies
                .iter()
                .filter(|e| match (e, kind) {
                    (EnemySpawn::Walker { x: None }, RoamerKind::Walker) => true,
                    (EnemySpawn::Jumper { x: None }, RoamerKind::Jumper) => true,
                    _ => false,
                })
                .count()
        };
        let walker_count = unplaced(RoamerKind::Walker);
        let jumper_count = unplaced(RoamerKind::Jumper);

        let (band, gap) = initial_band(RoamerKind::Walker);
        let mut walker_xs = self
            .spawner
            .initial_placement(walker_count, band, gap, &mut self.rng)
            .into_iter();
        let (band, gap) = initial_band(RoamerKind::Jumper);
        let mut jumper_xs = self
            .spawner
            .initial_placement(jumper_count, band, gap, &mut self.rng)
            .into_iter();

        for spawn in self.level.enemies.clone() {
            let id = self.next_entity_id();
            let enemy = match spawn {
                EnemySpawn::Boss { x } => Enemy::Boss(Boss::new(id, x, &self.tuning.boss)),
                EnemySpawn::Walker { x } => {
                    let Some(x) = x.or_else(|| walker_xs.next()) else {
                        continue;
                    };
                    let roamer =
                        Roamer::new(id, RoamerKind::Walker, x, &self.tuning, &mut self.rng);
                    Enemy::Roamer(roamer)
                }
                EnemySpawn::Jumper { x } => {
                    let Some(x) = x.or_else(|| jumper_xs.next()) else {
                        continue;
                    };
                    let roamer =
                        Roamer::new(id, RoamerKind::Jumper, x, &self.tuning, &mut self.rng);
                    Enemy::Roamer(roamer)
                }
            };
            self.enemies.push(enemy);
        }
    }

    fn scatter_items(&mut self) {
        let items = self.tuning.items.clone();
        let attempts = self.tuning.spawn.max_attempts;

        let (span, gap) = (items.span, items.min_gap);

        let coin_xs = scatter(items.coin_count, span, gap, attempts, &mut self.rng);
        for x in coin_xs {
            let y = if items.coin_max_y > 0.0 {
                self.rng.random_range(0.0..items.coin_max_y)
            } else {
                0.0
            };
            let id = self.next_entity_id();
            self.coins.push(Coin::new(id, Vec2::new(x, y)));
        }
        let bottle_xs = scatter(items.bottle_count, span, gap, attempts, &mut self.rng);
        for x in bottle_xs {
            let id = self.next_entity_id();
            self.bottles.push(Bottle::new(id, x, items.bottle_ground_y));
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn boss(&self) -> Option<&Boss> {
        self.enemies.iter().find_map(Enemy::as_boss)
    }

    pub fn boss_mut(&mut self) -> Option<&mut Boss> {
        self.enemies.iter_mut().find_map(Enemy::as_boss_mut)
    }

    pub fn collected_coins(&self) -> u32 {
        self.character.coins
    }

    /// Bottles in hand, ready to throw
    pub fn collected_bottles(&self) -> u32 {
        self.character.bottles
    }

    pub fn is_game_over(&self) -> bool {
        self.phase != GamePhase::Playing
    }

    /// Enter the won state; only the first terminal transition counts
    pub fn win_game(&mut self) {
        self.finish(GamePhase::Won, GameEvent::Won);
    }

    /// Enter the lost state; only the first terminal transition counts
    pub fn lose_game(&mut self) {
        self.finish(GamePhase::Lost, GameEvent::Lost);
    }

    fn finish(&mut self, phase: GamePhase, event: GameEvent) {
        if self.is_game_over() {
            return;
        }
        self.phase = phase;
        self.schedule.cancel_all();
        self.events.push(event);
        log::info!(
            "Game over: {:?} at t={}ms (coins={}, bottles={})",
            phase,
            self.time_ms,
            self.character.coins,
            self.character.bottles
        );
    }

    /// Take every event raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Pending scheduled events
    pub fn pending_scheduled(&self) -> usize {
        self.schedule.len()
    }

    /// Drop all pending scheduled work (world is being discarded)
    pub fn cancel_scheduled(&mut self) {
        self.schedule.cancel_all();
    }

    /// Keep entity lists sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.enemies.sort_by_key(Enemy::id);
        self.projectiles.sort_by_key(|p| p.id);
        self.coins.sort_by_key(|c| c.id);
        self.bottles.sort_by_key(|b| b.id);
    }
}
