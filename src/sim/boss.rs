//! Boss state machine
//!
//! `Walking -> Hurt -> Attack -> Walking` on every non-lethal hit, with the
//! two follow-up transitions driven by elapsed time. A lethal hit goes
//! straight to the terminal `Dead` state.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{OffsetRect, Rect};
use super::entity::{Body, Collidable, Damageable, HitOutcome};
use super::schedule::Scheduled;
use super::sprite::{Animatable, Sprite, SpriteKind, frame_at};
use super::state::{GameEvent, TickContext};
use crate::tuning::BossTuning;

pub const BOSS_SIZE: Vec2 = Vec2::new(300.0, 450.0);
pub const BOSS_Y: f32 = -2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BossState {
    Walking,
    Hurt,
    Attack,
    Dead,
}

#[derive(Debug, Clone)]
pub struct Boss {
    pub id: u32,
    pub body: Body,
    pub state: BossState,
    pub state_since_ms: u64,
    /// Current walking speed; grows with every non-lethal hit
    pub speed: f32,
    /// Player has seen the boss (alert cue already played)
    pub engaged: bool,
    pub hitboxes: Vec<OffsetRect>,
    pub hit_damage: u8,
}

impl Boss {
    pub fn new(id: u32, x: f32, tuning: &BossTuning) -> Self {
        Self {
            id,
            body: Body::new(Vec2::new(x, BOSS_Y), BOSS_SIZE),
            state: BossState::Walking,
            state_since_ms: 0,
            speed: tuning.walk_speed,
            engaged: false,
            hitboxes: tuning.hitboxes.clone(),
            hit_damage: tuning.hit_damage,
        }
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.body.pos.x
    }

    pub fn is_dead(&self) -> bool {
        self.state == BossState::Dead
    }

    /// Time-driven transitions and the follow behavior
    pub fn update(&mut self, ctx: &mut TickContext<'_>, character_x: f32) {
        let elapsed = ctx.now_ms.saturating_sub(self.state_since_ms);
        let tuning = &ctx.tuning.boss;
        match self.state {
            BossState::Walking => self.follow(character_x, ctx.dt),
            BossState::Hurt if elapsed >= tuning.hurt_ms => {
                self.set_state(BossState::Attack, ctx.now_ms);
            }
            BossState::Attack if elapsed >= tuning.attack_ms => {
                self.set_state(BossState::Walking, ctx.now_ms);
            }
            _ => {}
        }
    }

    /// Step toward the character without overshooting
    pub fn follow(&mut self, character_x: f32, dt: f32) {
        let step = self.speed * dt;
        let x = self.body.pos.x;
        if character_x < x {
            self.body.pos.x = (x - step).max(character_x);
            self.body.mirrored = false;
        } else if character_x > x {
            self.body.pos.x = (x + step).min(character_x);
            self.body.mirrored = true;
        }
    }

    /// Boss's x lies inside the camera view
    pub fn is_visible(&self, camera_x: f32, view_width: f32) -> bool {
        let start = -camera_x;
        let end = start + view_width;
        (start..=end).contains(&self.body.pos.x)
    }

    /// Take a projectile hit
    ///
    /// Non-lethal hits (re)enter `Hurt` and enrage; the lethal one enters
    /// `Dead` and schedules the win signal. Hits on a dead boss are ignored.
    pub fn hit(&mut self, ctx: &mut TickContext<'_>) -> HitOutcome {
        if self.is_dead() {
            return HitOutcome::Ignored;
        }
        let energy = self.body.hit(self.hit_damage, ctx.now_ms);
        ctx.events.push(GameEvent::BossHit { energy });

        if energy == 0 {
            self.set_state(BossState::Dead, ctx.now_ms);
            ctx.schedule.push(
                ctx.now_ms + ctx.tuning.boss.death_ms,
                Scheduled::BossDeathComplete,
            );
            ctx.events.push(GameEvent::BossKilled);
            log::info!("Boss defeated at x={:.0}", self.body.pos.x);
            HitOutcome::Killed
        } else {
            self.set_state(BossState::Hurt, ctx.now_ms);
            self.state_since_ms = ctx.now_ms;
            self.speed += ctx.tuning.boss.enrage_step;
            log::debug!("Boss hit, energy={} speed={:.0}", energy, self.speed);
            HitOutcome::Damaged
        }
    }

    fn set_state(&mut self, state: BossState, now_ms: u64) {
        if self.state != state {
            self.state = state;
            self.state_since_ms = now_ms;
        }
    }
}

impl Collidable for Boss {
    fn body(&self) -> &Body {
        &self.body
    }

    /// The silhouette is larger than the hittable mass
    fn hit_boxes(&self) -> Vec<Rect> {
        self.hitboxes.iter().map(|r| r.at(self.body.pos)).collect()
    }
}

impl Damageable for Boss {
    fn is_dead(&self) -> bool {
        Boss::is_dead(self)
    }

    fn on_hit_by_projectile(&mut self, ctx: &mut TickContext<'_>) -> HitOutcome {
        self.hit(ctx)
    }

    /// Too big to stomp
    fn on_stomped(&mut self, _ctx: &mut TickContext<'_>) -> bool {
        false
    }

    fn contact_multiplier(&self) -> u8 {
        2
    }
}

impl Animatable for Boss {
    fn sprite(&self, now_ms: u64) -> Sprite {
        let elapsed = now_ms.saturating_sub(self.state_since_ms);
        let frame = match self.state {
            BossState::Walking => frame_at(elapsed, 150, 4, true),
            BossState::Hurt => frame_at(elapsed, 100, 3, false),
            BossState::Attack => frame_at(elapsed, 100, 8, false),
            BossState::Dead => frame_at(elapsed, 200, 3, false),
        };
        Sprite {
            kind: SpriteKind::Boss(self.state),
            frame,
            rect: self.body.sprite_box(),
            mirrored: self.body.mirrored,
        }
    }
}
