//! Collision and physics kernel
//!
//! Gravity integration with a ground clamp, axis-aligned box overlap on
//! inset-adjusted hit boxes, and the "landed on top" test behind stomp kills.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::Body;
use crate::consts::COLLISION_TOLERANCE;

/// Axis-aligned rectangle (top-left corner + size)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            x,
            y,
            w: w.max(0.0),
            h: h.max(0.0),
        }
    }

    /// Build from edges; inverted edges collapse to an empty box
    pub fn from_edges(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self::new(left, top, right - left, bottom - top)
    }

    /// A `w` x `h` box centered inside a `outer_w` x `outer_h` area
    pub fn centered(outer_w: f32, outer_h: f32, w: f32, h: f32) -> Self {
        Self::new((outer_w - w) / 2.0, (outer_h - h) / 2.0, w, h)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn translate(&self, offset: Vec2) -> Self {
        Self::new(self.x + offset.x, self.y + offset.y, self.w, self.h)
    }

    /// Length of the shared horizontal span (negative when apart)
    #[inline]
    pub fn overlap_x(&self, other: &Rect) -> f32 {
        self.right().min(other.right()) - self.x.max(other.x)
    }

    /// Length of the shared vertical span (negative when apart)
    #[inline]
    pub fn overlap_y(&self, other: &Rect) -> f32 {
        self.bottom().min(other.bottom()) - self.y.max(other.y)
    }

    /// Overlap exceeding the grazing tolerance on both axes
    pub fn intersects(&self, other: &Rect) -> bool {
        self.overlap_x(other) > COLLISION_TOLERANCE && self.overlap_y(other) > COLLISION_TOLERANCE
    }
}

/// A rectangle positioned relative to an entity's top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OffsetRect {
    pub x_offset: f32,
    pub y_offset: f32,
    pub width: f32,
    pub height: f32,
}

impl OffsetRect {
    pub const fn new(x_offset: f32, y_offset: f32, width: f32, height: f32) -> Self {
        Self {
            x_offset,
            y_offset,
            width,
            height,
        }
    }

    /// Place this region at `origin`
    pub fn at(&self, origin: Vec2) -> Rect {
        Rect::new(
            origin.x + self.x_offset,
            origin.y + self.y_offset,
            self.width,
            self.height,
        )
    }
}

/// Above the resting line (always true without one)
pub fn is_above_ground(body: &Body) -> bool {
    match body.ground_y {
        Some(ground) => body.pos.y < ground,
        None => true,
    }
}

/// Standing on (or pinned to) the resting line
pub fn is_on_ground(body: &Body) -> bool {
    match body.ground_y {
        Some(ground) => body.pos.y >= ground,
        None => false,
    }
}

/// Integrate one step of vertical motion, then clamp to the ground line
pub fn apply_gravity(body: &mut Body, dt: f32) {
    if is_above_ground(body) || body.speed_y > 0.0 {
        body.pos.y -= body.speed_y * dt;
        body.speed_y -= body.gravity * dt;
    }
    if let Some(ground) = body.ground_y
        && body.pos.y >= ground
    {
        body.pos.y = ground;
        body.speed_y = body.speed_y.max(0.0);
    }
}

/// Symmetric hit-box overlap
pub fn overlaps(a: &Body, b: &Body) -> bool {
    a.hit_box().intersects(&b.hit_box())
}

/// `a` is falling onto the upper half of `b`
///
/// Horizontal check uses the middle 60% of `a` so edge grazes don't count.
pub fn landed_on_top(a: &Body, b: &Body) -> bool {
    let falling = a.speed_y < 0.0;
    let overlap_x =
        a.pos.x + a.size.x * 0.8 > b.pos.x && a.pos.x + a.size.x * 0.2 < b.pos.x + b.size.x;
    let feet = a.bottom();
    let in_upper_half = feet <= b.pos.y + b.size.y * 0.5;
    let reached_top = feet >= b.pos.y;
    falling && overlap_x && in_upper_half && reached_top
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::Inset;

    fn body(x: f32, y: f32, w: f32, h: f32) -> Body {
        Body::new(Vec2::new(x, y), Vec2::new(w, h))
    }

    #[test]
    fn test_gravity_jump_arc_returns_to_ground() {
        let mut b = body(0.0, 130.0, 100.0, 300.0).grounded(130.0, 1562.5);
        b.speed_y = 750.0;
        let dt = 0.04;

        let mut peak = b.pos.y;
        let mut ticks = 0;
        loop {
            apply_gravity(&mut b, dt);
            peak = peak.min(b.pos.y);
            ticks += 1;
            if is_on_ground(&b) || ticks > 200 {
                break;
            }
        }
        assert!(peak < 130.0 - 100.0);
        assert_eq!(b.pos.y, 130.0);
        assert_eq!(b.speed_y, 0.0);
        assert!(ticks < 60);
    }

    #[test]
    fn test_resting_body_stays_put() {
        let mut b = body(0.0, 355.0, 75.0, 70.0).grounded(355.0, 1562.5);
        for _ in 0..10 {
            apply_gravity(&mut b, 0.04);
        }
        assert_eq!(b.pos.y, 355.0);
        assert_eq!(b.speed_y, 0.0);
    }

    #[test]
    fn test_airborne_never_clamps() {
        let mut b = body(0.0, 400.0, 50.0, 60.0).airborne(1562.5);
        for _ in 0..10 {
            apply_gravity(&mut b, 0.04);
        }
        assert!(b.pos.y > 400.0);
        assert!(is_above_ground(&b));
        assert!(!is_on_ground(&b));
    }

    #[test]
    fn test_overlap_with_insets() {
        let a = body(0.0, 0.0, 100.0, 100.0).with_inset(Inset::uniform(20.0));
        let b = body(90.0, 0.0, 100.0, 100.0);
        // Sprites overlap by 10 but a's hit box ends at 80
        assert!(!overlaps(&a, &b));
        let c = body(70.0, 0.0, 100.0, 100.0);
        assert!(overlaps(&a, &c));
        assert!(overlaps(&c, &a));
    }

    #[test]
    fn test_grazing_is_not_overlap() {
        let a = body(0.0, 0.0, 10.0, 10.0);
        let b = body(9.5, 0.0, 10.0, 10.0);
        assert!(!overlaps(&a, &b));
    }

    #[test]
    fn test_negative_sized_boxes_never_overlap() {
        let a = body(0.0, 0.0, 10.0, 10.0).with_inset(Inset::uniform(8.0));
        let b = body(0.0, 0.0, 10.0, 10.0);
        assert!(!overlaps(&a, &b));
        assert!(!overlaps(&b, &a));
    }

    #[test]
    fn test_landed_on_top_requires_falling() {
        let enemy = body(100.0, 355.0, 75.0, 70.0);
        let mut hero = body(60.0, 70.0, 100.0, 300.0);
        // feet at 370, inside enemy's upper half
        hero.speed_y = -200.0;
        assert!(landed_on_top(&hero, &enemy));
        hero.speed_y = 200.0;
        assert!(!landed_on_top(&hero, &enemy));
    }

    #[test]
    fn test_landed_on_top_rejects_side_contact() {
        let enemy = body(100.0, 355.0, 75.0, 70.0);
        let mut hero = body(60.0, 130.0, 100.0, 300.0);
        hero.speed_y = -10.0;
        // feet at 430, below the enemy's midline
        assert!(!landed_on_top(&hero, &enemy));
    }

    #[test]
    fn test_offset_rect_placement() {
        let r = OffsetRect::new(100.0, 0.0, 100.0, 100.0).at(Vec2::new(3500.0, -2.0));
        assert_eq!(r, Rect::new(3600.0, -2.0, 100.0, 100.0));
    }
}
