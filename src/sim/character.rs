//! Player character state machine

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{apply_gravity, is_above_ground};
use super::entity::{Body, Inset};
use super::schedule::Scheduled;
use super::sprite::{Animatable, Sprite, SpriteKind, frame_at};
use super::state::{GameEvent, TickContext};
use super::tick::TickInput;
use crate::tuning::CharacterTuning;

pub const CHARACTER_SIZE: Vec2 = Vec2::new(100.0, 300.0);
/// The sprite is mostly empty space above the sombrero
pub const CHARACTER_INSET: Inset = Inset::new(20.0, 120.0, 30.0, 15.0);

/// Character animation/behavior state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CharacterState {
    /// No input for longer than the idle timeout
    Idle,
    /// Short idle
    Stay,
    Walking,
    Jumping,
    Hurt,
    Dead,
}

impl CharacterState {
    /// (frame interval ms, frame count, loops)
    fn animation(self) -> (u64, usize, bool) {
        match self {
            CharacterState::Idle => (170, 10, true),
            CharacterState::Stay => (170, 10, true),
            CharacterState::Walking => (50, 6, true),
            CharacterState::Jumping => (50, 9, false),
            CharacterState::Hurt => (50, 3, true),
            CharacterState::Dead => (50, 7, false),
        }
    }
}

/// The player-controlled character
#[derive(Debug, Clone)]
pub struct Character {
    pub body: Body,
    pub walk_speed: f32,
    pub jump_impulse: f32,
    pub state: CharacterState,
    /// When `state` was entered
    pub state_since_ms: u64,
    /// Last time the player moved or jumped
    pub last_action_ms: u64,
    /// Snore cue already played this idle period
    pub idle_cue_played: bool,
    /// Death edge already processed
    pub death_handled: bool,
    /// Throwable bottles in hand
    pub bottles: u32,
    pub coins: u32,
}

impl Character {
    pub fn new(tuning: &CharacterTuning, gravity: f32) -> Self {
        let body = Body::new(Vec2::new(tuning.start_x, tuning.start_y), CHARACTER_SIZE)
            .with_inset(CHARACTER_INSET)
            .grounded(tuning.ground_y, gravity);
        Self {
            body,
            walk_speed: tuning.walk_speed,
            jump_impulse: tuning.jump_impulse,
            state: CharacterState::Stay,
            state_since_ms: 0,
            last_action_ms: 0,
            idle_cue_played: false,
            death_handled: false,
            bottles: 0,
            coins: 0,
        }
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.body.pos.x
    }

    pub fn is_dead(&self) -> bool {
        self.body.is_dead()
    }

    pub fn move_right(&mut self, dt: f32, level_end_x: f32) {
        self.body.pos.x = (self.body.pos.x + self.walk_speed * dt).min(level_end_x);
        self.body.mirrored = false;
    }

    pub fn move_left(&mut self, dt: f32) {
        self.body.pos.x = (self.body.pos.x - self.walk_speed * dt).max(0.0);
        self.body.mirrored = true;
    }

    /// Start a jump; only allowed from the ground
    pub fn jump(&mut self) -> bool {
        if is_above_ground(&self.body) || self.body.speed_y > 0.0 {
            return false;
        }
        self.body.speed_y = self.jump_impulse;
        true
    }

    /// Take damage; a dead character ignores further hits
    ///
    /// Returns true if the hit landed.
    pub fn hit(&mut self, damage: u8, now_ms: u64) -> bool {
        if self.is_dead() {
            return false;
        }
        self.body.hit(damage, now_ms);
        true
    }

    pub fn is_hurt(&self, now_ms: u64, window_ms: u64) -> bool {
        self.body.is_hurt(now_ms, window_ms)
    }

    /// Movement, physics and state evaluation for one logic tick
    pub fn update(&mut self, ctx: &mut TickContext<'_>, input: &TickInput, level_end_x: f32) {
        let now = ctx.now_ms;

        let mut acted = false;
        let mut walking = false;
        if !self.is_dead() {
            // Held direction counts as activity even when pinned at a bound
            if input.right {
                self.move_right(ctx.dt, level_end_x);
                walking = true;
            } else if input.left {
                self.move_left(ctx.dt);
                walking = true;
            }
            acted = walking;

            if input.jump && self.jump() {
                ctx.events.push(GameEvent::Jumped);
                acted = true;
            }
        }

        if acted {
            self.last_action_ms = now;
            self.idle_cue_played = false;
        }

        apply_gravity(&mut self.body, ctx.dt);

        if self.check_death(ctx) {
            return;
        }

        self.refresh_state(ctx, walking);
    }

    /// Process the death edge exactly once
    ///
    /// Returns true while dead.
    pub fn check_death(&mut self, ctx: &mut TickContext<'_>) -> bool {
        if !self.is_dead() {
            return false;
        }
        if !self.death_handled {
            self.death_handled = true;
            self.set_state(CharacterState::Dead, ctx.now_ms);
            ctx.schedule.push(
                ctx.now_ms + ctx.tuning.character.death_delay_ms,
                Scheduled::CharacterDeathComplete,
            );
            ctx.events.push(GameEvent::PlayerDied);
            log::info!("Character died at x={:.0}", self.body.pos.x);
        }
        true
    }

    /// Pick the state by precedence: hurt > airborne > walking > stay > idle
    fn refresh_state(&mut self, ctx: &mut TickContext<'_>, walking: bool) {
        let now = ctx.now_ms;
        let tuning = &ctx.tuning.character;

        let next = if self.is_hurt(now, tuning.hurt_window_ms) {
            CharacterState::Hurt
        } else if is_above_ground(&self.body) {
            CharacterState::Jumping
        } else if walking {
            CharacterState::Walking
        } else if now.saturating_sub(self.last_action_ms) >= tuning.idle_timeout_ms {
            CharacterState::Idle
        } else {
            CharacterState::Stay
        };

        if next == CharacterState::Idle && !self.idle_cue_played {
            self.idle_cue_played = true;
            ctx.events.push(GameEvent::IdleStarted);
        }
        self.set_state(next, now);
    }

    fn set_state(&mut self, state: CharacterState, now_ms: u64) {
        if self.state != state {
            self.state = state;
            self.state_since_ms = now_ms;
        }
    }
}

impl Animatable for Character {
    fn sprite(&self, now_ms: u64) -> Sprite {
        let (interval, count, looping) = self.state.animation();
        let elapsed = now_ms.saturating_sub(self.state_since_ms);
        Sprite {
            kind: SpriteKind::Character(self.state),
            frame: frame_at(elapsed, interval, count, looping),
            rect: self.body.sprite_box(),
            mirrored: self.body.mirrored,
        }
    }
}
