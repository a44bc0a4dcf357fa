//! Roaming enemies and the closed set of enemy variants

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::boss::Boss;
use super::collision::{Rect, apply_gravity, is_on_ground};
use super::entity::{Body, Collidable, Damageable, HitOutcome, Inset};
use super::schedule::Scheduled;
use super::sprite::{Animatable, Sprite, SpriteKind, frame_at};
use super::state::{GameEvent, TickContext};
use crate::tuning::{RoamerTuning, Tuning};

/// Roaming enemy variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoamerKind {
    /// Ground walker
    Walker,
    /// Smaller walker that hops at random
    Jumper,
}

impl RoamerKind {
    pub fn size(self) -> Vec2 {
        match self {
            RoamerKind::Walker => Vec2::new(75.0, 70.0),
            RoamerKind::Jumper => Vec2::new(50.0, 50.0),
        }
    }

    pub fn ground_y(self) -> f32 {
        match self {
            RoamerKind::Walker => 355.0,
            RoamerKind::Jumper => 370.0,
        }
    }

    fn inset(self) -> Inset {
        match self {
            RoamerKind::Walker => Inset::uniform(5.0),
            RoamerKind::Jumper => Inset::uniform(3.0),
        }
    }

    fn speed_range(self, tuning: &RoamerTuning) -> (f32, f32) {
        match self {
            RoamerKind::Walker => (tuning.walker_speed_min, tuning.walker_speed_max),
            RoamerKind::Jumper => (tuning.jumper_speed_min, tuning.jumper_speed_max),
        }
    }
}

/// A roaming enemy drifting left until it dies
#[derive(Debug, Clone)]
pub struct Roamer {
    pub id: u32,
    pub kind: RoamerKind,
    pub body: Body,
    /// Where it was placed
    pub spawn_x: f32,
    /// Leftward drift (units/s), zero once dead
    pub speed: f32,
    /// Jumpers only: whether this one ever hops
    pub can_jump: bool,
    pub died_at_ms: Option<u64>,
    /// Death confirmed; may be culled
    pub removable: bool,
}

impl Roamer {
    pub fn new(id: u32, kind: RoamerKind, x: f32, tuning: &Tuning, rng: &mut impl Rng) -> Self {
        let (lo, hi) = kind.speed_range(&tuning.roamer);
        let speed = if hi > lo {
            rng.random_range(lo..=hi)
        } else {
            lo
        };
        let gravity = match kind {
            RoamerKind::Walker => tuning.gravity,
            RoamerKind::Jumper => tuning.roamer.jumper_gravity,
        };
        let can_jump =
            kind == RoamerKind::Jumper && rng.random_bool(tuning.roamer.jumper_can_jump_chance);
        let body = Body::new(Vec2::new(x, kind.ground_y()), kind.size())
            .with_inset(kind.inset())
            .grounded(kind.ground_y(), gravity);
        Self {
            id,
            kind,
            body,
            spawn_x: x,
            speed,
            can_jump,
            died_at_ms: None,
            removable: false,
        }
    }

    pub fn update(&mut self, ctx: &mut TickContext<'_>) {
        if !self.body.is_dead() {
            self.body.pos.x -= self.speed * ctx.dt;
            if self.can_jump
                && is_on_ground(&self.body)
                && ctx.rng.random_bool(ctx.tuning.roamer.jumper_jump_chance)
            {
                self.body.speed_y = ctx.tuning.roamer.jumper_jump_impulse;
            }
        }
        apply_gravity(&mut self.body, ctx.dt);
    }

    /// Kill and start the death-confirmation countdown; idempotent
    pub fn die(&mut self, ctx: &mut TickContext<'_>) -> bool {
        if self.died_at_ms.is_some() {
            return false;
        }
        self.body.energy = 0;
        self.speed = 0.0;
        self.died_at_ms = Some(ctx.now_ms);
        ctx.schedule.push(
            ctx.now_ms + ctx.tuning.roamer.removal_delay_ms,
            Scheduled::MarkRemovable { enemy_id: self.id },
        );
        ctx.events.push(GameEvent::EnemyKilled { id: self.id });
        log::debug!(
            "{:?} {} died at x={:.0}",
            self.kind,
            self.id,
            self.body.pos.x
        );
        true
    }

    /// Confirm death if the delay has fully elapsed
    pub fn mark_removable(&mut self, now_ms: u64, delay_ms: u64) {
        if let Some(died) = self.died_at_ms
            && now_ms.saturating_sub(died) >= delay_ms
        {
            self.removable = true;
        }
    }
}

impl Collidable for Roamer {
    fn body(&self) -> &Body {
        &self.body
    }
}

impl Damageable for Roamer {
    fn on_hit_by_projectile(&mut self, ctx: &mut TickContext<'_>) -> HitOutcome {
        if self.die(ctx) {
            HitOutcome::Killed
        } else {
            HitOutcome::Ignored
        }
    }

    fn on_stomped(&mut self, ctx: &mut TickContext<'_>) -> bool {
        self.die(ctx)
    }
}

impl Animatable for Roamer {
    fn sprite(&self, now_ms: u64) -> Sprite {
        let dead = self.body.is_dead();
        let kind = match self.kind {
            RoamerKind::Walker => SpriteKind::Walker { dead },
            RoamerKind::Jumper => SpriteKind::Jumper { dead },
        };
        Sprite {
            kind,
            frame: if dead {
                0
            } else {
                frame_at(now_ms, 150, 3, true)
            },
            rect: self.body.sprite_box(),
            mirrored: false,
        }
    }
}

/// Every enemy variant in the level
#[derive(Debug, Clone)]
pub enum Enemy {
    Roamer(Roamer),
    Boss(Boss),
}

impl Enemy {
    pub fn id(&self) -> u32 {
        match self {
            Enemy::Roamer(r) => r.id,
            Enemy::Boss(b) => b.id,
        }
    }

    pub fn x(&self) -> f32 {
        self.body().pos.x
    }

    /// Dead and past its death-confirmation delay
    pub fn is_removable(&self) -> bool {
        match self {
            Enemy::Roamer(r) => r.removable,
            Enemy::Boss(_) => false,
        }
    }

    pub fn as_boss(&self) -> Option<&Boss> {
        match self {
            Enemy::Boss(b) => Some(b),
            Enemy::Roamer(_) => None,
        }
    }

    pub fn as_boss_mut(&mut self) -> Option<&mut Boss> {
        match self {
            Enemy::Boss(b) => Some(b),
            Enemy::Roamer(_) => None,
        }
    }

    pub fn as_roamer_mut(&mut self) -> Option<&mut Roamer> {
        match self {
            Enemy::Roamer(r) => Some(r),
            Enemy::Boss(_) => None,
        }
    }

    pub fn update(&mut self, ctx: &mut TickContext<'_>, character_x: f32) {
        match self {
            Enemy::Roamer(r) => r.update(ctx),
            Enemy::Boss(b) => b.update(ctx, character_x),
        }
    }
}

impl Collidable for Enemy {
    fn body(&self) -> &Body {
        match self {
            Enemy::Roamer(r) => &r.body,
            Enemy::Boss(b) => &b.body,
        }
    }

    fn hit_boxes(&self) -> Vec<Rect> {
        match self {
            Enemy::Roamer(r) => r.hit_boxes(),
            Enemy::Boss(b) => b.hit_boxes(),
        }
    }
}

impl Damageable for Enemy {
    fn is_dead(&self) -> bool {
        match self {
            Enemy::Roamer(r) => r.is_dead(),
            Enemy::Boss(b) => b.is_dead(),
        }
    }

    fn on_hit_by_projectile(&mut self, ctx: &mut TickContext<'_>) -> HitOutcome {
        match self {
            Enemy::Roamer(r) => r.on_hit_by_projectile(ctx),
            Enemy::Boss(b) => b.on_hit_by_projectile(ctx),
        }
    }

    fn on_stomped(&mut self, ctx: &mut TickContext<'_>) -> bool {
        match self {
            Enemy::Roamer(r) => r.on_stomped(ctx),
            Enemy::Boss(b) => b.on_stomped(ctx),
        }
    }

    fn contact_multiplier(&self) -> u8 {
        match self {
            Enemy::Roamer(r) => r.contact_multiplier(),
            Enemy::Boss(b) => b.contact_multiplier(),
        }
    }
}

impl Animatable for Enemy {
    fn sprite(&self, now_ms: u64) -> Sprite {
        match self {
            Enemy::Roamer(r) => r.sprite(now_ms),
            Enemy::Boss(b) => b.sprite(now_ms),
        }
    }
}
