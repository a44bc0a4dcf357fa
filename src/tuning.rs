//! Data-driven game balance
//!
//! Every number the simulation uses that a designer might want to tweak.
//! Velocities are in world units per second, accelerations in units/s²,
//! durations in milliseconds. Any field missing from a JSON file keeps
//! its default.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result, read_file};
use crate::sim::collision::OffsetRect;

/// Player character balance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterTuning {
    pub start_x: f32,
    pub start_y: f32,
    /// Resting `y` when standing on the ground
    pub ground_y: f32,
    pub walk_speed: f32,
    pub jump_impulse: f32,
    /// Minimum upward velocity after a stomp
    pub stomp_bounce: f32,
    /// Damage taken per tick of enemy contact
    pub contact_damage: u8,
    /// How long after a hit the character counts as hurt
    pub hurt_window_ms: u64,
    /// No input for this long switches stay -> idle
    pub idle_timeout_ms: u64,
    /// Delay between the death animation starting and the lose screen
    pub death_delay_ms: u64,
}

impl Default for CharacterTuning {
    fn default() -> Self {
        Self {
            start_x: 120.0,
            start_y: 30.0,
            ground_y: 130.0,
            walk_speed: 600.0,
            jump_impulse: 750.0,
            stomp_bounce: 500.0,
            contact_damage: 2,
            hurt_window_ms: 1000,
            idle_timeout_ms: 10_000,
            death_delay_ms: 500,
        }
    }
}

/// Roaming enemy balance (both variants)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoamerTuning {
    pub walker_speed_min: f32,
    pub walker_speed_max: f32,
    pub jumper_speed_min: f32,
    pub jumper_speed_max: f32,
    /// Gravity for jumpers (tuned independently of the shared one)
    pub jumper_gravity: f32,
    pub jumper_jump_impulse: f32,
    /// Fraction of jumpers that jump at all
    pub jumper_can_jump_chance: f64,
    /// Per-tick chance that a grounded, able jumper hops
    pub jumper_jump_chance: f64,
    /// Death-confirmation delay before a corpse may be culled
    pub removal_delay_ms: u64,
}

impl Default for RoamerTuning {
    fn default() -> Self {
        Self {
            walker_speed_min: 10.5,
            walker_speed_max: 25.5,
            jumper_speed_min: 12.0,
            jumper_speed_max: 30.0,
            jumper_gravity: 1562.5,
            jumper_jump_impulse: 500.0,
            jumper_can_jump_chance: 0.5,
            jumper_jump_chance: 0.12,
            removal_delay_ms: 3000,
        }
    }
}

/// Boss balance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BossTuning {
    pub walk_speed: f32,
    /// Walking speed gained on every non-lethal hit
    pub enrage_step: f32,
    /// Energy lost per projectile hit
    pub hit_damage: u8,
    pub hurt_ms: u64,
    pub attack_ms: u64,
    /// Death animation length before the win screen
    pub death_ms: u64,
    /// Hittable regions relative to the sprite's top-left corner
    pub hitboxes: Vec<OffsetRect>,
}

impl Default for BossTuning {
    fn default() -> Self {
        Self {
            walk_speed: 33.0,
            enrage_step: 66.0,
            hit_damage: 20,
            hurt_ms: 400,
            attack_ms: 900,
            death_ms: 800,
            hitboxes: vec![
                OffsetRect::new(100.0, 0.0, 100.0, 100.0),
                OffsetRect::new(50.0, 100.0, 200.0, 350.0),
            ],
        }
    }
}

/// Spawn Manager balance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnTuning {
    /// Keep-out distance from both the character and the boss
    pub margin: f32,
    /// Minimum x distance between a new enemy and any live one
    pub min_gap: f32,
    /// Placement attempts per enemy before giving up
    pub max_attempts: u32,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            margin: 300.0,
            min_gap: 150.0,
            max_attempts: 100,
        }
    }
}

/// Coins, bottles and thrown bottles
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemTuning {
    pub coin_count: usize,
    pub bottle_count: usize,
    /// Minimum x distance between two items of the same kind
    pub min_gap: f32,
    /// Items are scattered over `[0, span)`
    pub span: f32,
    pub coin_max_y: f32,
    pub bottle_ground_y: f32,
    pub respawn_chance: f64,
    pub respawn_min_ms: u64,
    pub respawn_max_ms: u64,
    pub throw_speed_x: f32,
    pub throw_speed_y: f32,
    pub projectile_gravity: f32,
}

impl Default for ItemTuning {
    fn default() -> Self {
        Self {
            coin_count: 12,
            bottle_count: 7,
            min_gap: 100.0,
            span: 2000.0,
            coin_max_y: 200.0,
            bottle_ground_y: 370.0,
            respawn_chance: 0.5,
            respawn_min_ms: 5000,
            respawn_max_ms: 10_000,
            throw_speed_x: 400.0,
            throw_speed_y: 750.0,
            projectile_gravity: 1562.5,
        }
    }
}

/// Complete balance sheet
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub logic_period_ms: u64,
    /// Shared gravity for the character and ground walkers
    pub gravity: f32,
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub character: CharacterTuning,
    pub roamer: RoamerTuning,
    pub boss: BossTuning,
    pub spawn: SpawnTuning,
    pub items: ItemTuning,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            logic_period_ms: LOGIC_PERIOD_MS,
            gravity: 1562.5,
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            character: CharacterTuning::default(),
            roamer: RoamerTuning::default(),
            boss: BossTuning::default(),
            spawn: SpawnTuning::default(),
            items: ItemTuning::default(),
        }
    }
}

impl Tuning {
    /// Parse and validate a tuning sheet
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load a tuning sheet from disk
    pub fn load(path: &str) -> Result<Self> {
        let tuning = Self::from_json(&read_file(path)?)?;
        log::info!("Loaded tuning from {}", path);
        Ok(tuning)
    }

    /// Logic tick length in seconds
    pub fn dt(&self) -> f32 {
        crate::ms_to_secs(self.logic_period_ms)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.logic_period_ms == 0 {
            return Err(invalid("logic_period_ms", "must be positive"));
        }
        if self.gravity <= 0.0 {
            return Err(invalid("gravity", "must be positive"));
        }
        let r = &self.roamer;
        if r.walker_speed_min > r.walker_speed_max {
            return Err(invalid(
                "roamer.walker_speed_min",
                "exceeds walker_speed_max",
            ));
        }
        if r.jumper_speed_min > r.jumper_speed_max {
            return Err(invalid(
                "roamer.jumper_speed_min",
                "exceeds jumper_speed_max",
            ));
        }
        if !(0.0..=1.0).contains(&r.jumper_can_jump_chance) {
            return Err(invalid(
                "roamer.jumper_can_jump_chance",
                "must be within 0..=1",
            ));
        }
        if !(0.0..=1.0).contains(&r.jumper_jump_chance) {
            return Err(invalid("roamer.jumper_jump_chance", "must be within 0..=1"));
        }
        if self.boss.hit_damage == 0 {
            return Err(invalid("boss.hit_damage", "must be positive"));
        }
        if self.boss.hitboxes.is_empty() {
            return Err(invalid("boss.hitboxes", "needs at least one region"));
        }
        if self.spawn.max_attempts == 0 {
            return Err(invalid("spawn.max_attempts", "must be positive"));
        }
        let i = &self.items;
        if i.respawn_min_ms > i.respawn_max_ms {
            return Err(invalid("items.respawn_min_ms", "exceeds respawn_max_ms"));
        }
        if !(0.0..=1.0).contains(&i.respawn_chance) {
            return Err(invalid("items.respawn_chance", "must be within 0..=1"));
        }
        if i.span <= 0.0 {
            return Err(invalid("items.span", "must be positive"));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &str) -> Error {
    Error::InvalidTuning {
        field,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
        assert!((Tuning::default().dt() - 0.04).abs() < 1e-6);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "boss": { "hit_damage": 25 } }"#).unwrap();
        assert_eq!(tuning.boss.hit_damage, 25);
        assert_eq!(tuning.boss.hurt_ms, 400);
        assert_eq!(tuning.logic_period_ms, LOGIC_PERIOD_MS);
        assert_eq!(tuning.items.coin_count, 12);
    }

    #[test]
    fn test_rejects_inverted_range() {
        let json = r#"{ "items": { "respawn_min_ms": 9000, "respawn_max_ms": 10 } }"#;
        let err = Tuning::from_json(json).unwrap_err();
        let field = match err {
            Error::InvalidTuning { field, .. } => field,
            other => panic!("unexpected error: {other}"),
        };
        assert_eq!(field, "items.respawn_min_ms");
    }

    #[test]
    fn test_rejects_zero_period() {
        let err = Tuning::from_json(r#"{ "logic_period_ms": 0 }"#).unwrap_err();
        assert!(matches!(err, Error::InvalidTuning { .. }));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(Tuning::from_json("{ nope"), Err(Error::Json(_))));
    }
}
