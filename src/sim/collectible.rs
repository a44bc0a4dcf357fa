//! Coins, bottles, thrown bottles and splash effects

use glam::Vec2;

use super::collision::{Rect, apply_gravity};
use super::entity::{Body, Collidable, Inset};
use super::sprite::{Animatable, Sprite, SpriteKind, frame_at};
use crate::tuning::ItemTuning;

pub const COIN_SIZE: Vec2 = Vec2::new(130.0, 130.0);
/// Only the middle of the coin sprite is coin
pub const COIN_INSET: Inset = Inset::uniform(45.0);
pub const BOTTLE_SIZE: Vec2 = Vec2::new(80.0, 80.0);
pub const BOTTLE_INSET: Inset = Inset::new(25.0, 10.0, 20.0, 5.0);
pub const PROJECTILE_SIZE: Vec2 = Vec2::new(50.0, 60.0);
pub const SPLASH_SIZE: Vec2 = Vec2::new(100.0, 100.0);

/// Off-stage parking spot for collected bottles
const PARKED: Vec2 = Vec2::new(-100.0, -100.0);

/// Splash animation: frame count and frame length
pub const SPLASH_FRAMES: usize = 6;
pub const SPLASH_FRAME_MS: f64 = 50.0;

/// A coin; removed from the world on pickup
#[derive(Debug, Clone)]
pub struct Coin {
    pub id: u32,
    pub body: Body,
}

impl Coin {
    pub fn new(id: u32, pos: Vec2) -> Self {
        Self {
            id,
            body: Body::new(pos, COIN_SIZE).with_inset(COIN_INSET),
        }
    }
}

impl Collidable for Coin {
    fn body(&self) -> &Body {
        &self.body
    }
}

impl Animatable for Coin {
    fn sprite(&self, now_ms: u64) -> Sprite {
        Sprite {
            kind: SpriteKind::Coin,
            frame: frame_at(now_ms, 400, 2, true),
            rect: self.body.sprite_box(),
            mirrored: false,
        }
    }
}

/// A pickup bottle; parked off-stage when collected so it can come back
#[derive(Debug, Clone)]
pub struct Bottle {
    pub id: u32,
    pub body: Body,
    pub collected: bool,
}

impl Bottle {
    pub fn new(id: u32, x: f32, ground_y: f32) -> Self {
        Self {
            id,
            body: Body::new(Vec2::new(x, ground_y), BOTTLE_SIZE).with_inset(BOTTLE_INSET),
            collected: false,
        }
    }

    pub fn collect(&mut self) {
        self.collected = true;
        self.body.pos = PARKED;
    }

    pub fn respawn(&mut self, x: f32, ground_y: f32) {
        self.body.pos = Vec2::new(x, ground_y);
        self.collected = false;
    }
}

impl Collidable for Bottle {
    fn body(&self) -> &Body {
        &self.body
    }
}

impl Animatable for Bottle {
    fn sprite(&self, now_ms: u64) -> Sprite {
        Sprite {
            kind: SpriteKind::Bottle,
            frame: frame_at(now_ms, 500, 2, true),
            rect: self.body.sprite_box(),
            mirrored: false,
        }
    }
}

/// A thrown bottle; always airborne until it hits something or falls out
#[derive(Debug, Clone)]
pub struct Projectile {
    pub id: u32,
    pub body: Body,
    /// +1 thrown right, -1 thrown left
    pub direction: f32,
    pub speed_x: f32,
    /// Time in flight, drives the spin animation
    pub flight_ms: u64,
}

impl Projectile {
    /// Launch from the thrower's hand in the direction it faces
    pub fn launch(id: u32, thrower: &Body, tuning: &ItemTuning) -> Self {
        let (x, direction) = if thrower.mirrored {
            (thrower.pos.x - 50.0, -1.0)
        } else {
            (thrower.pos.x + 100.0, 1.0)
        };
        let mut body = Body::new(Vec2::new(x, thrower.pos.y + 100.0), PROJECTILE_SIZE)
            .airborne(tuning.projectile_gravity);
        body.speed_y = tuning.throw_speed_y;
        body.mirrored = thrower.mirrored;
        Self {
            id,
            body,
            direction,
            speed_x: tuning.throw_speed_x,
            flight_ms: 0,
        }
    }

    pub fn update(&mut self, dt: f32, period_ms: u64) {
        self.body.pos.x += self.direction * self.speed_x * dt;
        apply_gravity(&mut self.body, dt);
        self.flight_ms += period_ms;
    }
}

impl Collidable for Projectile {
    fn body(&self) -> &Body {
        &self.body
    }
}

impl Animatable for Projectile {
    fn sprite(&self, _now_ms: u64) -> Sprite {
        Sprite {
            kind: SpriteKind::Projectile,
            frame: frame_at(self.flight_ms, 100, 4, true),
            rect: self.body.sprite_box(),
            mirrored: self.body.mirrored,
        }
    }
}

/// Visual-only splash left where a projectile hit
#[derive(Debug, Clone)]
pub struct Splash {
    pub pos: Vec2,
    pub elapsed_ms: f64,
}

impl Splash {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            elapsed_ms: 0.0,
        }
    }

    /// Advance by one display frame
    pub fn advance(&mut self, frame_ms: f64) {
        self.elapsed_ms += frame_ms;
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed_ms >= SPLASH_FRAMES as f64 * SPLASH_FRAME_MS
    }

    pub fn sprite(&self) -> Sprite {
        let frame = ((self.elapsed_ms / SPLASH_FRAME_MS) as usize).min(SPLASH_FRAMES - 1);
        Sprite {
            kind: SpriteKind::Splash,
            frame,
            rect: Rect::new(self.pos.x, self.pos.y, SPLASH_SIZE.x, SPLASH_SIZE.y),
            mirrored: false,
        }
    }
}
