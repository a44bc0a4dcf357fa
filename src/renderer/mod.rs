//! Render tick
//!
//! Once per display frame: move the camera onto the character, emit draw
//! requests in back-to-front order, advance the visual-only splash
//! effects, and draw the HUD. Pixels belong to the [`RenderSink`].

use crate::consts::CAMERA_LEAD;
use crate::sim::collision::Rect;
use crate::sim::level::Decoration;
use crate::sim::sprite::{Animatable, Sprite, SpriteKind};
use crate::sim::state::{GameEvent, GamePhase, World};

/// Win overlay size (the lose overlay covers the whole canvas)
pub const VICTORY_OVERLAY: (f32, f32) = (380.0, 220.0);

/// Heads-up display values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hud {
    pub energy: u8,
    pub coins: u32,
    pub bottles: u32,
    /// Only once the boss has been seen
    pub boss_energy: Option<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    Victory,
    GameOver,
}

/// Whether the render loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStatus {
    Continue,
    /// Final overlay drawn; stop requesting frames
    Finished,
}

/// Drawing surface the core talks to
pub trait RenderSink {
    /// Draw one sprite; `rect` is already in screen space
    fn draw_sprite(&mut self, sprite: &Sprite);
    fn draw_hud(&mut self, hud: &Hud);
    /// Dim the canvas and draw the end screen in `rect`
    fn draw_overlay(&mut self, overlay: Overlay, rect: Rect);
}

/// Shift a world-space sprite into screen space
fn on_screen(mut sprite: Sprite, camera_x: f32) -> Sprite {
    sprite.rect.x += camera_x;
    sprite
}

/// Run one render tick
pub fn render(world: &mut World, frame_ms: f64, sink: &mut impl RenderSink) -> RenderStatus {
    world.camera_x = -world.character.x() + CAMERA_LEAD;
    let camera_x = world.camera_x;
    let now = world.time_ms;

    for deco in &world.level.decorations {
        if !deco.is_foreground() {
            sink.draw_sprite(&on_screen(decoration_sprite(deco), camera_x));
        }
    }

    engage_boss(world);

    sink.draw_sprite(&on_screen(world.character.sprite(now), camera_x));
    for enemy in &world.enemies {
        sink.draw_sprite(&on_screen(enemy.sprite(now), camera_x));
    }
    for deco in &world.level.decorations {
        if deco.is_foreground() {
            sink.draw_sprite(&on_screen(decoration_sprite(deco), camera_x));
        }
    }
    for projectile in &world.projectiles {
        sink.draw_sprite(&on_screen(projectile.sprite(now), camera_x));
    }
    for coin in &world.coins {
        sink.draw_sprite(&on_screen(coin.sprite(now), camera_x));
    }
    for bottle in world.bottles.iter().filter(|b| !b.collected) {
        sink.draw_sprite(&on_screen(bottle.sprite(now), camera_x));
    }

    world.splashes.retain_mut(|splash| {
        if splash.is_finished() {
            return false;
        }
        sink.draw_sprite(&on_screen(splash.sprite(), camera_x));
        splash.advance(frame_ms);
        true
    });

    sink.draw_hud(&hud(world));

    match world.phase {
        GamePhase::Playing => RenderStatus::Continue,
        GamePhase::Won => {
            let (w, h) = VICTORY_OVERLAY;
            let rect = Rect::centered(world.tuning.canvas_width, world.tuning.canvas_height, w, h);
            sink.draw_overlay(Overlay::Victory, rect);
            RenderStatus::Finished
        }
        GamePhase::Lost => {
            let (w, h) = (world.tuning.canvas_width, world.tuning.canvas_height);
            sink.draw_overlay(Overlay::GameOver, Rect::centered(w, h, w, h));
            RenderStatus::Finished
        }
    }
}

fn decoration_sprite(deco: &Decoration) -> Sprite {
    Sprite {
        kind: SpriteKind::Decoration {
            kind: deco.kind,
            variant: deco.variant,
        },
        frame: 0,
        rect: deco.rect(),
        mirrored: false,
    }
}

/// First sighting of the boss fires the alert exactly once
fn engage_boss(world: &mut World) {
    let camera_x = world.camera_x;
    let view_width = world.tuning.canvas_width;
    let Some(boss) = world.boss_mut() else {
        return;
    };
    if boss.engaged || !boss.is_visible(camera_x, view_width) {
        return;
    }
    boss.engaged = true;
    log::info!("Boss engaged at x={:.0}", boss.x());
    world.events.push(GameEvent::BossEngaged);
}

pub fn hud(world: &World) -> Hud {
    Hud {
        energy: world.character.body.energy,
        coins: world.collected_coins(),
        bottles: world.collected_bottles(),
        boss_energy: world.boss().filter(|b| b.engaged).map(|b| b.body.energy),
    }
}

/// Sink that only counts what it was asked to draw
#[derive(Debug, Default)]
pub struct CountingSink {
    pub frames: u64,
    pub sprites: u64,
    pub last_hud: Option<Hud>,
    pub overlay: Option<Overlay>,
}

impl RenderSink for CountingSink {
    fn draw_sprite(&mut self, _sprite: &Sprite) {
        self.sprites += 1;
    }

    fn draw_hud(&mut self, hud: &Hud) {
        self.frames += 1;
        self.last_hud = Some(*hud);
    }

    fn draw_overlay(&mut self, overlay: Overlay, _rect: Rect) {
        self.overlay = Some(overlay);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::collectible::Splash;
    use glam::Vec2;

    #[derive(Default)]
    struct Recorder {
        sprites: Vec<Sprite>,
        overlays: Vec<(Overlay, Rect)>,
    }

    impl RenderSink for Recorder {
        fn draw_sprite(&mut self, sprite: &Sprite) {
            self.sprites.push(*sprite);
        }

        fn draw_hud(&mut self, _hud: &Hud) {}

        fn draw_overlay(&mut self, overlay: Overlay, rect: Rect) {
            self.overlays.push((overlay, rect));
        }
    }

    #[test]
    fn test_camera_tracks_character() {
        let mut world = World::new(1);
        world.character.body.pos.x = 1000.0;
        let mut sink = Recorder::default();
        assert_eq!(render(&mut world, 16.0, &mut sink), RenderStatus::Continue);
        assert_eq!(world.camera_x, -900.0);

        let character = sink
            .sprites
            .iter()
            .find(|s| matches!(s.kind, SpriteKind::Character(_)))
            .unwrap();
        assert_eq!(character.rect.x, CAMERA_LEAD);
    }

    #[test]
    fn test_background_drawn_before_actors() {
        let mut world = World::new(1);
        let mut sink = Recorder::default();
        render(&mut world, 16.0, &mut sink);
        let first_actor = sink
            .sprites
            .iter()
            .position(|s| !matches!(s.kind, SpriteKind::Decoration { .. }))
            .unwrap();
        assert!(first_actor > 0);
        let kind = sink.sprites[first_actor].kind;
        assert!(matches!(kind, SpriteKind::Character(_)));
    }

    #[test]
    fn test_boss_engaged_once() {
        let mut world = World::new(1);
        let mut sink = CountingSink::default();
        render(&mut world, 16.0, &mut sink);
        assert!(sink.last_hud.unwrap().boss_energy.is_none());

        world.character.body.pos.x = 3100.0;
        render(&mut world, 16.0, &mut sink);
        render(&mut world, 16.0, &mut sink);
        let engaged = world
            .drain_events()
            .iter()
            .filter(|e| **e == GameEvent::BossEngaged)
            .count();
        assert_eq!(engaged, 1);
        assert_eq!(sink.last_hud.unwrap().boss_energy, Some(100));
    }

    #[test]
    fn test_splashes_pruned_after_animation() {
        let mut world = World::new(1);
        world.splashes.push(Splash::new(Vec2::new(500.0, 300.0)));
        let mut sink = CountingSink::default();
        for _ in 0..6 {
            render(&mut world, 50.0, &mut sink);
            assert_eq!(world.splashes.len(), 1);
        }
        render(&mut world, 50.0, &mut sink);
        assert!(world.splashes.is_empty());
    }

    #[test]
    fn test_overlays() {
        let mut world = World::new(1);
        world.win_game();
        let mut sink = Recorder::default();
        assert_eq!(render(&mut world, 16.0, &mut sink), RenderStatus::Finished);
        let centered = Rect::new(170.0, 130.0, 380.0, 220.0);
        assert_eq!(sink.overlays, vec![(Overlay::Victory, centered)]);

        let mut world = World::new(1);
        world.lose_game();
        let mut sink = Recorder::default();
        render(&mut world, 16.0, &mut sink);
        let full = Rect::new(0.0, 0.0, 720.0, 480.0);
        assert_eq!(sink.overlays, vec![(Overlay::GameOver, full)]);
    }
}
