//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only, on a logical millisecond clock
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, audio or platform dependencies

pub mod boss;
pub mod character;
pub mod collectible;
pub mod collision;
pub mod enemy;
pub mod entity;
pub mod level;
pub mod schedule;
pub mod spawn;
pub mod sprite;
pub mod state;
pub mod tick;

pub use boss::{Boss, BossState};
pub use character::{Character, CharacterState};
pub use collectible::{Bottle, Coin, Projectile, Splash};
pub use collision::{OffsetRect, Rect, apply_gravity, landed_on_top, overlaps};
pub use enemy::{Enemy, Roamer, RoamerKind};
pub use entity::{Body, Collidable, Damageable, HitOutcome, Inset};
pub use level::{Decoration, DecorationKind, EnemySpawn, Level};
pub use schedule::{Schedule, Scheduled};
pub use spawn::SpawnManager;
pub use sprite::{Animatable, Sprite, SpriteKind};
pub use state::{GameEvent, GamePhase, TickContext, World};
pub use tick::{TickInput, cull_and_replenish, tick};
