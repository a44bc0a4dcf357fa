//! Shared physics/collision record and the capability traits
//!
//! Every live thing in the world carries a [`Body`]. Behavior differs per
//! variant and is reached through [`Collidable`] and [`Damageable`] rather
//! than by inspecting concrete types.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::state::TickContext;
use crate::consts::MAX_ENERGY;

/// Margins shrinking the sprite box to the hittable region
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Inset {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Inset {
    pub const ZERO: Inset = Inset::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub const fn uniform(margin: f32) -> Self {
        Self::new(margin, margin, margin, margin)
    }
}

/// Position, size, vertical motion and health of an entity
///
/// `pos` is the sprite's top-left corner; `y` grows downward.
/// `speed_y > 0` means rising.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub size: Vec2,
    /// Facing left (sprite drawn mirrored)
    pub mirrored: bool,
    pub speed_y: f32,
    pub gravity: f32,
    /// Resting `y`; `None` means always airborne
    pub ground_y: Option<f32>,
    /// Health, always within `0..=100`
    pub energy: u8,
    /// Logical time of the last damage taken
    pub last_hit_ms: Option<u64>,
    pub inset: Inset,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            size,
            mirrored: false,
            speed_y: 0.0,
            gravity: 0.0,
            ground_y: Some(pos.y),
            energy: MAX_ENERGY,
            last_hit_ms: None,
            inset: Inset::ZERO,
        }
    }

    pub fn with_inset(mut self, inset: Inset) -> Self {
        self.inset = inset;
        self
    }

    /// Rest on `ground_y` under the given gravity
    pub fn grounded(mut self, ground_y: f32, gravity: f32) -> Self {
        self.ground_y = Some(ground_y);
        self.gravity = gravity;
        self
    }

    /// Never clamp to a ground line
    pub fn airborne(mut self, gravity: f32) -> Self {
        self.ground_y = None;
        self.gravity = gravity;
        self
    }

    pub fn with_energy(mut self, energy: u8) -> Self {
        self.energy = energy.min(MAX_ENERGY);
        self
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Sprite-space bounding box
    pub fn sprite_box(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }

    /// Inset-adjusted collision box, never negative-sized
    pub fn hit_box(&self) -> Rect {
        Rect::from_edges(
            self.pos.x + self.inset.left,
            self.pos.y + self.inset.top,
            self.pos.x + self.size.x - self.inset.right,
            self.pos.y + self.size.y - self.inset.bottom,
        )
    }

    /// Apply damage, clamping at zero, and remember when it happened
    ///
    /// Returns the remaining energy.
    pub fn hit(&mut self, damage: u8, now_ms: u64) -> u8 {
        if damage == 0 {
            return self.energy;
        }
        self.energy = self.energy.saturating_sub(damage);
        self.last_hit_ms = Some(now_ms);
        self.energy
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.energy == 0
    }

    /// Damaged within the last `window_ms`
    pub fn is_hurt(&self, now_ms: u64, window_ms: u64) -> bool {
        self.last_hit_ms
            .is_some_and(|t| now_ms.saturating_sub(t) < window_ms)
    }
}

/// Result of a projectile hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Target was already dead or immune
    Ignored,
    Damaged,
    Killed,
}

/// Anything with hittable geometry
pub trait Collidable {
    fn body(&self) -> &Body;

    /// Regions that count for hits; a single inset box by default
    fn hit_boxes(&self) -> Vec<Rect> {
        vec![self.body().hit_box()]
    }

    /// Any hit region touches `other`'s collision box
    fn touches(&self, other: &Body) -> bool {
        let target = other.hit_box();
        self.hit_boxes().iter().any(|r| r.intersects(&target))
    }
}

/// Anything that can be hurt by the player
pub trait Damageable: Collidable {
    fn energy(&self) -> u8 {
        self.body().energy
    }

    fn is_dead(&self) -> bool {
        self.body().is_dead()
    }

    /// A dead target is never hittable
    fn is_hit_by(&self, projectile: &Body) -> bool {
        !self.is_dead() && self.touches(projectile)
    }

    fn on_hit_by_projectile(&mut self, ctx: &mut TickContext<'_>) -> HitOutcome;

    /// Returns true if the stomp killed the target
    fn on_stomped(&mut self, ctx: &mut TickContext<'_>) -> bool;

    /// Contact damage multiplier applied to the character on touch
    fn contact_multiplier(&self) -> u8 {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_clamps_at_zero() {
        let mut body = Body::new(Vec2::ZERO, Vec2::splat(10.0)).with_energy(5);
        assert_eq!(body.hit(3, 100), 2);
        assert_eq!(body.hit(50, 200), 0);
        assert!(body.is_dead());
        assert_eq!(body.last_hit_ms, Some(200));
    }

    #[test]
    fn test_energy_capped_on_construction() {
        let body = Body::new(Vec2::ZERO, Vec2::ONE).with_energy(250);
        assert_eq!(body.energy, MAX_ENERGY);
    }

    #[test]
    fn test_hurt_window() {
        let mut body = Body::new(Vec2::ZERO, Vec2::ONE);
        assert!(!body.is_hurt(0, 1000));
        body.hit(2, 5000);
        assert!(body.is_hurt(5000, 1000));
        assert!(body.is_hurt(5999, 1000));
        assert!(!body.is_hurt(6000, 1000));
    }

    #[test]
    fn test_zero_damage_is_not_a_hit() {
        let mut body = Body::new(Vec2::ZERO, Vec2::ONE);
        body.hit(0, 10);
        assert_eq!(body.last_hit_ms, None);
    }

    #[test]
    fn test_hit_box_clamped_for_oversized_inset() {
        let body = Body::new(Vec2::new(10.0, 10.0), Vec2::new(20.0, 20.0))
            .with_inset(Inset::uniform(15.0));
        let hb = body.hit_box();
        assert_eq!(hb.w, 0.0);
        assert_eq!(hb.h, 0.0);
    }
}
