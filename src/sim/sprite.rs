//! Sprite selection
//!
//! The core decides *what* to draw (sprite sheet, frame, box, facing);
//! pixels are the render sink's problem.

use super::boss::BossState;
use super::character::CharacterState;
use super::collision::Rect;
use super::level::DecorationKind;

/// Which sprite sheet to draw from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteKind {
    Decoration { kind: DecorationKind, variant: u8 },
    Character(CharacterState),
    Walker { dead: bool },
    Jumper { dead: bool },
    Boss(BossState),
    Coin,
    Bottle,
    Projectile,
    Splash,
}

/// One draw request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub kind: SpriteKind,
    pub frame: usize,
    pub rect: Rect,
    pub mirrored: bool,
}

/// Anything that has a current animation frame
pub trait Animatable {
    fn sprite(&self, now_ms: u64) -> Sprite;
}

/// Frame index after `elapsed_ms` of an animation with `count` frames
///
/// Looping animations wrap; one-shot animations hold their last frame.
pub fn frame_at(elapsed_ms: u64, interval_ms: u64, count: usize, looping: bool) -> usize {
    if count == 0 || interval_ms == 0 {
        return 0;
    }
    let step = (elapsed_ms / interval_ms) as usize;
    if looping {
        step % count
    } else {
        step.min(count - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_at_loops() {
        assert_eq!(frame_at(0, 50, 6, true), 0);
        assert_eq!(frame_at(149, 50, 6, true), 2);
        assert_eq!(frame_at(300, 50, 6, true), 0);
    }

    #[test]
    fn test_frame_at_holds_last() {
        assert_eq!(frame_at(10_000, 200, 3, false), 2);
    }

    #[test]
    fn test_frame_at_degenerate() {
        assert_eq!(frame_at(100, 0, 3, true), 0);
        assert_eq!(frame_at(100, 50, 0, true), 0);
    }
}
