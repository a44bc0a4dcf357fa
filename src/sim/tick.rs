//! Fixed timestep logic tick
//!
//! One call advances the World by one logic period. Phases run in a fixed
//! order and the whole tick completes before anything reads the live
//! lists for drawing:
//!
//! 1. scheduled events that came due
//! 2. character, enemy and projectile updates
//! 3. character vs enemy (stomp before damage)
//! 4. projectile vs enemy
//! 5. pickups
//! 6. throw request
//! 7. death edge, culling and replacement spawns

use rand::Rng;

use super::collectible::{Projectile, Splash};
use super::collision::landed_on_top;
use super::enemy::{Enemy, Roamer, RoamerKind};
use super::entity::{Collidable, Damageable};
use super::schedule::Scheduled;
use super::spawn::{SpawnManager, draw};
use super::state::{GameEvent, TickContext, World};
use crate::consts::WORLD_FLOOR_Y;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    /// Throw edge: true for exactly one tick per key press
    pub throw: bool,
}

/// Advance the world by one fixed timestep
pub fn tick(world: &mut World, input: &TickInput) {
    if world.is_game_over() {
        return;
    }

    world.time_ms += world.tuning.logic_period_ms;
    world.time_ticks += 1;

    fire_scheduled(world);
    if world.is_game_over() {
        return;
    }

    update_actors(world, input);
    resolve_character_enemy(world);
    resolve_projectile_hits(world);
    resolve_pickups(world);
    if input.throw {
        process_throw(world);
    }
    check_character_death(world);
    cull_and_replenish(world);

    world.normalize_order();
}

fn fire_scheduled(world: &mut World) {
    let now = world.time_ms;
    for event in world.schedule.pop_due(now) {
        match event {
            Scheduled::MarkRemovable { enemy_id } => {
                let delay = world.tuning.roamer.removal_delay_ms;
                if let Some(roamer) = world
                    .enemies
                    .iter_mut()
                    .filter_map(Enemy::as_roamer_mut)
                    .find(|r| r.id == enemy_id)
                {
                    roamer.mark_removable(now, delay);
                }
            }
            Scheduled::RespawnBottle { bottle_id } => respawn_bottle(world, bottle_id),
            Scheduled::CharacterDeathComplete => world.lose_game(),
            Scheduled::BossDeathComplete => world.win_game(),
        }
        if world.is_game_over() {
            break;
        }
    }
}

fn respawn_bottle(world: &mut World, bottle_id: u32) {
    let span = world.tuning.items.span;
    let ground_y = world.tuning.items.bottle_ground_y;
    let World {
        bottles, rng, events, ..
    } = world;
    let bottle = bottles
        .iter_mut()
        .find(|b| b.id == bottle_id && b.collected);
    if let Some(bottle) = bottle {
        let x = draw(rng, (0.0, span));
        bottle.respawn(x, ground_y);
        events.push(GameEvent::BottleRespawned { id: bottle_id });
        log::debug!("Bottle {} respawned at x={:.0}", bottle_id, x);
    }
}

fn update_actors(world: &mut World, input: &TickInput) {
    let World {
        tuning,
        level,
        character,
        enemies,
        projectiles,
        schedule,
        events,
        rng,
        time_ms,
        ..
    } = world;
    let mut ctx = TickContext::new(*time_ms, tuning, schedule, events, rng);

    character.update(&mut ctx, input, level.level_end_x);
    let character_x = character.x();
    for enemy in enemies.iter_mut() {
        enemy.update(&mut ctx, character_x);
    }
    for projectile in projectiles.iter_mut() {
        projectile.update(ctx.dt, tuning.logic_period_ms);
    }
    projectiles.retain(|p| p.body.pos.y <= WORLD_FLOOR_Y);
}

/// Stomp kills take precedence over contact damage
fn resolve_character_enemy(world: &mut World) {
    let World {
        tuning,
        character,
        enemies,
        schedule,
        events,
        rng,
        time_ms,
        ..
    } = world;
    if character.is_dead() {
        return;
    }
    let mut ctx = TickContext::new(*time_ms, tuning, schedule, events, rng);
    let contact_damage = tuning.character.contact_damage;
    let hurt_window = tuning.character.hurt_window_ms;

    for enemy in enemies.iter_mut() {
        if enemy.is_dead() {
            continue;
        }
        if landed_on_top(&character.body, enemy.body()) && enemy.on_stomped(&mut ctx) {
            character.body.speed_y = character.body.speed_y.max(tuning.character.stomp_bounce);
            continue;
        }
        if enemy.touches(&character.body) {
            let already_hurt = character.is_hurt(ctx.now_ms, hurt_window);
            let damage = contact_damage.saturating_mul(enemy.contact_multiplier());
            if character.hit(damage, ctx.now_ms) && !already_hurt {
                ctx.events.push(GameEvent::PlayerHurt);
            }
        }
        if character.is_dead() {
            break;
        }
    }
}

/// Each projectile hits at most one target and is consumed by it
fn resolve_projectile_hits(world: &mut World) {
    let World {
        tuning,
        enemies,
        projectiles,
        splashes,
        schedule,
        events,
        rng,
        time_ms,
        ..
    } = world;
    let mut ctx = TickContext::new(*time_ms, tuning, schedule, events, rng);

    projectiles.retain(|projectile| {
        let Some(target) = enemies.iter_mut().find(|e| e.is_hit_by(&projectile.body)) else {
            return true;
        };
        let outcome = target.on_hit_by_projectile(&mut ctx);
        log::debug!(
            "Projectile {} hit enemy {}: {:?}",
            projectile.id,
            target.id(),
            outcome
        );
        splashes.push(Splash::new(projectile.body.pos));
        false
    });
}

fn resolve_pickups(world: &mut World) {
    let World {
        tuning,
        character,
        coins,
        bottles,
        schedule,
        events,
        rng,
        time_ms,
        ..
    } = world;
    if character.is_dead() {
        return;
    }

    coins.retain(|coin| {
        if !coin.touches(&character.body) {
            return true;
        }
        character.coins += 1;
        events.push(GameEvent::CoinCollected);
        false
    });

    let items = &tuning.items;
    for bottle in bottles.iter_mut().filter(|b| !b.collected) {
        if !bottle.touches(&character.body) {
            continue;
        }
        bottle.collect();
        character.bottles += 1;
        events.push(GameEvent::BottleCollected);
        if rng.random_bool(items.respawn_chance) {
            let delay = rng.random_range(items.respawn_min_ms..=items.respawn_max_ms);
            let due = *time_ms + delay;
            let bottle_id = bottle.id;
            schedule.push(due, Scheduled::RespawnBottle { bottle_id });
            log::debug!("Bottle {} will respawn in {}ms", bottle.id, delay);
        }
    }
}

/// Throw one bottle if any are in hand
fn process_throw(world: &mut World) {
    if world.character.is_dead() || world.character.bottles == 0 {
        return;
    }
    let id = world.next_entity_id();
    let projectile = Projectile::launch(id, &world.character.body, &world.tuning.items);
    world.character.bottles -= 1;
    world.projectiles.push(projectile);
    world.events.push(GameEvent::BottleThrown);
}

fn check_character_death(world: &mut World) {
    let World {
        tuning,
        character,
        schedule,
        events,
        rng,
        time_ms,
        ..
    } = world;
    let mut ctx = TickContext::new(*time_ms, tuning, schedule, events, rng);
    character.check_death(&mut ctx);
}

/// Remove confirmed-dead enemies and spawn the same number of replacements
///
/// Returns how many were culled. Running it again with no new deaths in
/// between changes nothing.
pub fn cull_and_replenish(world: &mut World) -> usize {
    let before = world.enemies.len();
    world.enemies.retain(|e| !e.is_removable());
    let culled = before - world.enemies.len();
    if culled == 0 {
        return 0;
    }

    let character_x = world.character.x();
    let boss_x = SpawnManager::boss_x_or_ahead(world.boss().map(|b| b.x()), character_x);
    let existing: Vec<f32> = world.enemies.iter().map(Enemy::x).collect();
    let placed = world.spawner.spawn_replacements(
        culled,
        character_x,
        boss_x,
        &existing,
        &mut world.rng,
    );

    for x in placed {
        let kind = if world.rng.random_bool(0.5) {
            RoamerKind::Walker
        } else {
            RoamerKind::Jumper
        };
        let id = world.next_entity_id();
        let roamer = Roamer::new(id, kind, x, &world.tuning, &mut world.rng);
        world.enemies.push(Enemy::Roamer(roamer));
    }
    log::debug!(
        "Culled {} enemies, population now {}",
        culled,
        world.enemies.len()
    );
    culled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::GamePhase;
    use glam::Vec2;

    fn idle() -> TickInput {
        TickInput::default()
    }

    fn count(events: &[GameEvent], wanted: GameEvent) -> usize {
        events.iter().filter(|e| **e == wanted).count()
    }

    /// World with the roamers pushed far out of the way
    fn quiet_world(seed: u64) -> World {
        let mut world = World::new(seed);
        for enemy in world.enemies.iter_mut() {
            if let Enemy::Roamer(r) = enemy {
                r.body.pos.x += 20_000.0;
                r.speed = 0.0;
                r.can_jump = false;
            }
        }
        world.coins.clear();
        world.bottles.clear();
        world
    }

    #[test]
    fn test_tick_advances_clock() {
        let mut world = quiet_world(1);
        tick(&mut world, &idle());
        tick(&mut world, &idle());
        assert_eq!(world.time_ticks, 2);
        assert_eq!(world.time_ms, 2 * world.tuning.logic_period_ms);
    }

    #[test]
    fn test_game_over_skips_tick() {
        let mut world = quiet_world(1);
        world.lose_game();
        let t = world.time_ms;
        tick(&mut world, &TickInput {
            right: true,
            ..Default::default()
        });
        assert_eq!(world.time_ms, t);
    }

    #[test]
    fn test_stomp_kills_and_bounces() {
        let mut world = quiet_world(2);
        let (walker_id, walker_pos) = {
            let r = world
                .enemies
                .iter_mut()
                .filter_map(Enemy::as_roamer_mut)
                .find(|r| r.kind == RoamerKind::Walker)
                .unwrap();
            r.body.pos.x = 600.0;
            (r.id, r.body.pos)
        };

        // Character falling with its feet just above the walker's head
        world.character.body.pos = Vec2::new(walker_pos.x - 20.0, walker_pos.y - 300.0 - 5.0);
        world.character.body.speed_y = -200.0;
        let before = world.character.body.energy;

        tick(&mut world, &idle());

        let enemy = world.enemies.iter().find(|e| e.id() == walker_id).unwrap();
        assert!(enemy.is_dead());
        assert_eq!(world.character.body.energy, before);
        assert!(world.character.body.speed_y > 0.0);
        let killed = GameEvent::EnemyKilled { id: walker_id };
        assert!(world.drain_events().contains(&killed));
    }

    #[test]
    fn test_boss_contact_double_damage_and_no_stomp() {
        let mut world = quiet_world(3);
        let boss_x = world.boss().unwrap().x();
        world.character.body.pos.x = boss_x + 50.0;
        world.character.body.pos.y = world.tuning.character.ground_y;

        tick(&mut world, &idle());

        let expected = 100 - 2 * world.tuning.character.contact_damage;
        assert_eq!(world.character.body.energy, expected);
        assert!(!world.boss().unwrap().is_dead());
        let window = world.tuning.character.hurt_window_ms;
        assert!(world.character.is_hurt(world.time_ms, window));
        let events = world.drain_events();
        assert_eq!(count(&events, GameEvent::PlayerHurt), 1);
    }

    #[test]
    fn test_throw_needs_a_bottle() {
        let mut world = quiet_world(4);
        let throw = TickInput {
            throw: true,
            ..Default::default()
        };
        tick(&mut world, &throw);
        assert!(world.projectiles.is_empty());

        world.character.bottles = 2;
        tick(&mut world, &throw);
        assert_eq!(world.projectiles.len(), 1);
        assert_eq!(world.collected_bottles(), 1);
        assert!(world.drain_events().contains(&GameEvent::BottleThrown));
    }

    #[test]
    fn test_projectile_hit_spawns_splash() {
        let mut world = quiet_world(5);
        let boss = world.boss().unwrap().clone();
        let mut thrower = world.character.body.clone();
        thrower.pos = Vec2::new(boss.x() - 100.0, 150.0);
        let projectile = Projectile::launch(999, &thrower, &world.tuning.items);
        world.projectiles.push(projectile);

        tick(&mut world, &idle());

        assert!(world.projectiles.is_empty());
        assert_eq!(world.splashes.len(), 1);
        assert_eq!(world.boss().unwrap().body.energy, 80);
    }

    #[test]
    fn test_projectiles_culled_below_floor() {
        let mut world = quiet_world(6);
        world.character.bottles = 1;
        world.character.body.mirrored = true;
        tick(&mut world, &TickInput {
            throw: true,
            ..Default::default()
        });
        assert_eq!(world.projectiles.len(), 1);
        for _ in 0..200 {
            tick(&mut world, &idle());
        }
        assert!(world.projectiles.is_empty());
    }

    #[test]
    fn test_character_death_leads_to_lost() {
        let mut world = quiet_world(7);
        world.character.hit(100, 0);
        tick(&mut world, &idle());
        assert_eq!(world.phase, GamePhase::Playing);
        for _ in 0..20 {
            tick(&mut world, &idle());
        }
        assert_eq!(world.phase, GamePhase::Lost);
        let events = world.drain_events();
        assert_eq!(count(&events, GameEvent::Lost), 1);
        assert_eq!(count(&events, GameEvent::PlayerDied), 1);
        assert_eq!(world.pending_scheduled(), 0);
    }
}
