//! Demo autopilot
//!
//! Scripted input so the game can be played end to end without a human:
//! walk right, hop over roamers, stock up on bottles and throw them at the
//! boss once it is in range.

use crate::sim::{Damageable, Enemy, TickInput, World};

/// How far ahead a roamer triggers a jump
const JUMP_LOOKAHEAD: f32 = 160.0;
/// Boss distance at which the autopilot stops and throws
const THROW_RANGE: f32 = 600.0;

/// Pick this tick's input from the current world
pub fn drive(world: &World) -> TickInput {
    let character = &world.character;
    let mut input = TickInput::default();
    if character.is_dead() || world.is_game_over() {
        return input;
    }
    let x = character.x();

    input.jump = world.enemies.iter().any(|e| {
        matches!(e, Enemy::Roamer(_))
            && !e.is_dead()
            && (0.0..JUMP_LOOKAHEAD).contains(&(e.x() - x))
    });

    let Some(boss) = world.boss().filter(|b| !b.is_dead()) else {
        input.right = true;
        return input;
    };

    if boss.x() - x > THROW_RANGE {
        input.right = true;
    } else if character.bottles > 0 {
        if character.body.mirrored {
            // Turn around first
            input.right = true;
        } else {
            input.throw = world.projectiles.is_empty();
        }
    } else if let Some(bottle_x) = nearest_bottle(world, x) {
        input.left = bottle_x < x;
        input.right = bottle_x > x;
    } else {
        input.right = true;
    }
    input
}

fn nearest_bottle(world: &World, x: f32) -> Option<f32> {
    world
        .bottles
        .iter()
        .filter(|b| !b.collected)
        .map(|b| b.body.pos.x)
        .min_by(|a, b| (a - x).abs().total_cmp(&(b - x).abs()))
}
