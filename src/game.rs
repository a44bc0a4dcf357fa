//! Game driver
//!
//! Owns exactly one World at a time and feeds it from the display frame
//! clock: a fixed-timestep accumulator runs the logic tick, then one render
//! tick per frame. Restart discards the World (and everything it had
//! scheduled) before building the next one.

use crate::audio::{AudioManager, AudioSink};
use crate::consts::{MAX_FRAME_MS, MAX_SUBSTEPS};
use crate::renderer::{RenderSink, RenderStatus, render};
use crate::sim::{Level, TickInput, World, tick};
use crate::tuning::Tuning;

/// Game instance holding all state
pub struct Game<R: RenderSink, A: AudioSink> {
    world: World,
    renderer: R,
    audio: AudioManager<A>,
    accumulator_ms: f64,
    input: TickInput,
    /// Final overlay frame has been drawn
    finished: bool,
    level: Level,
    tuning: Tuning,
    /// Completed restarts
    runs: u32,
}

impl<R: RenderSink, A: AudioSink> Game<R, A> {
    pub fn new(seed: u64, level: Level, tuning: Tuning, renderer: R, audio: A) -> Self {
        Self {
            world: World::with_level(seed, level.clone(), tuning.clone()),
            renderer,
            audio: AudioManager::new(audio),
            accumulator_ms: 0.0,
            input: TickInput::default(),
            finished: false,
            level,
            tuning,
            runs: 0,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn audio(&self) -> &AudioManager<A> {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut AudioManager<A> {
        &mut self.audio
    }

    pub fn runs(&self) -> u32 {
        self.runs
    }

    /// Replace held input; a throw press survives until a tick consumes it
    pub fn set_input(&mut self, input: TickInput) {
        let throw = self.input.throw || input.throw;
        self.input = TickInput { throw, ..input };
    }

    /// Advance by one display frame
    ///
    /// Returns false once the final frame has been drawn.
    pub fn frame(&mut self, frame_ms: f64) -> bool {
        if self.finished {
            return false;
        }

        let frame_ms = frame_ms.clamp(0.0, MAX_FRAME_MS);
        let period_ms = self.tuning.logic_period_ms as f64;
        self.accumulator_ms += frame_ms;

        let mut substeps = 0;
        while self.accumulator_ms >= period_ms && substeps < MAX_SUBSTEPS {
            tick(&mut self.world, &self.input);
            self.accumulator_ms -= period_ms;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.throw = false;

            if self.world.is_game_over() {
                self.accumulator_ms = 0.0;
                break;
            }
        }

        let status = render(&mut self.world, frame_ms, &mut self.renderer);
        let events = self.world.drain_events();
        self.audio.dispatch(&events);

        if status == RenderStatus::Finished {
            self.finished = true;
            log::info!(
                "Run {} finished: {:?} after {} ticks",
                self.runs + 1,
                self.world.phase,
                self.world.time_ticks
            );
        }
        !self.finished
    }

    pub fn is_running(&self) -> bool {
        !self.finished
    }

    /// Throw the current World away and start a fresh one
    pub fn restart(&mut self, seed: u64) {
        self.world.cancel_scheduled();
        self.world = World::with_level(seed, self.level.clone(), self.tuning.clone());
        self.accumulator_ms = 0.0;
        self.input = TickInput::default();
        self.finished = false;
        self.runs += 1;
        log::info!("Restarted with seed {}", seed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{AudioCue, LogAudio};
    use crate::renderer::{CountingSink, Overlay};

    fn game() -> Game<CountingSink, LogAudio> {
        Game::new(
            11,
            Level::level_one(),
            Tuning::default(),
            CountingSink::default(),
            LogAudio::default(),
        )
    }

    #[test]
    fn test_accumulator_runs_fixed_ticks() {
        let mut g = game();
        // 100ms of 16ms frames = 6 frames = 96ms -> 2 ticks, 16ms left over
        for _ in 0..6 {
            assert!(g.frame(16.0));
        }
        assert_eq!(g.world().time_ticks, 2);
        assert_eq!(g.renderer().frames, 6);
    }

    #[test]
    fn test_long_frame_is_clamped() {
        let mut g = game();
        g.frame(10_000.0);
        assert!(g.world().time_ticks <= MAX_SUBSTEPS as u64);
        assert_eq!(g.world().time_ticks, 2);
    }

    #[test]
    fn test_throw_latched_until_tick() {
        let mut g = game();
        g.world.character.bottles = 3;
        g.set_input(TickInput {
            throw: true,
            ..Default::default()
        });
        // Releasing before the next tick does not lose the press
        g.set_input(TickInput::default());
        g.frame(40.0);
        assert_eq!(g.world().projectiles.len(), 1);
        g.frame(40.0);
        assert_eq!(g.world().projectiles.len(), 1);
        assert!(g.audio().sink().played.contains(&AudioCue::Throw));
    }

    #[test]
    fn test_final_frame_then_stop() {
        let mut g = game();
        g.world.lose_game();
        assert!(!g.frame(16.0));
        assert_eq!(g.renderer().overlay, Some(Overlay::GameOver));
        assert!(!g.frame(16.0));
        assert_eq!(g.renderer().frames, 1);
        assert!(g.audio().sink().played.contains(&AudioCue::GameOver));
    }

    #[test]
    fn test_restart_discards_scheduled_work() {
        let mut g = game();
        g.world.character.hit(100, 0);
        g.frame(40.0);
        assert_eq!(g.world().pending_scheduled(), 1);

        g.restart(12);
        assert!(g.is_running());
        assert_eq!(g.runs(), 1);
        assert_eq!(g.world().pending_scheduled(), 0);
        assert_eq!(g.world().character.body.energy, 100);
        for _ in 0..50 {
            g.frame(40.0);
        }
        assert!(!g.world().is_game_over());
    }
}
