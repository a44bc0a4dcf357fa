//! Audio cues
//!
//! The core only names sounds; playing them belongs to whatever sink the
//! host plugs in.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    /// Projectile hit an enemy or the boss
    Hit,
    Jump,
    CoinPickup,
    BottlePickup,
    EnemyDeath,
    PlayerHurt,
    /// Boss came into view
    BossEncountered,
    Victory,
    GameOver,
    Throw,
    /// Long idle
    Snore,
}

impl AudioCue {
    /// Asset-style name of the cue
    pub fn name(self) -> &'static str {
        match self {
            AudioCue::Hit => "hit",
            AudioCue::Jump => "jump",
            AudioCue::CoinPickup => "coin",
            AudioCue::BottlePickup => "bottle",
            AudioCue::EnemyDeath => "chickenDeath",
            AudioCue::PlayerHurt => "hurt",
            AudioCue::BossEncountered => "bossEncountered",
            AudioCue::Victory => "win",
            AudioCue::GameOver => "gameOver",
            AudioCue::Throw => "throw",
            AudioCue::Snore => "snore",
        }
    }

    /// Which cue (if any) a simulation event should trigger
    pub fn for_event(event: &GameEvent) -> Option<AudioCue> {
        let cue = match event {
            GameEvent::Jumped => AudioCue::Jump,
            GameEvent::PlayerHurt => AudioCue::PlayerHurt,
            GameEvent::EnemyKilled { .. } => AudioCue::EnemyDeath,
            GameEvent::BossHit { .. } => AudioCue::Hit,
            GameEvent::BossEngaged => AudioCue::BossEncountered,
            GameEvent::CoinCollected => AudioCue::CoinPickup,
            GameEvent::BottleCollected => AudioCue::BottlePickup,
            GameEvent::BottleThrown => AudioCue::Throw,
            GameEvent::IdleStarted => AudioCue::Snore,
            GameEvent::Won => AudioCue::Victory,
            GameEvent::Lost => AudioCue::GameOver,
            GameEvent::PlayerDied | GameEvent::BossKilled | GameEvent::BottleRespawned { .. } => {
                return None;
            }
        };
        Some(cue)
    }
}

/// Something that can actually make noise
pub trait AudioSink {
    fn play(&mut self, cue: AudioCue, volume: f32);
}

/// Sink that just logs each cue
#[derive(Debug, Default)]
pub struct LogAudio {
    pub played: Vec<AudioCue>,
}

impl AudioSink for LogAudio {
    fn play(&mut self, cue: AudioCue, volume: f32) {
        log::info!("[audio] {} ({:.0}%)", cue.name(), volume * 100.0);
        self.played.push(cue);
    }
}

/// Audio manager for the game: volume, mute, dispatch
pub struct AudioManager<S: AudioSink> {
    sink: S,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl<S: AudioSink> AudioManager<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            master_volume: 1.0,
            sfx_volume: 0.8,
            muted: false,
        }
    }

    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    pub fn play(&mut self, cue: AudioCue) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.sink.play(cue, vol);
    }

    /// Play the cue for every event that has one
    pub fn dispatch(&mut self, events: &[GameEvent]) {
        for cue in events.iter().filter_map(AudioCue::for_event) {
            self.play(cue);
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_map_to_cues() {
        let cue = |event: GameEvent| AudioCue::for_event(&event);
        assert_eq!(cue(GameEvent::Jumped), Some(AudioCue::Jump));
        assert_eq!(cue(GameEvent::BossHit { energy: 60 }), Some(AudioCue::Hit));
        assert_eq!(cue(GameEvent::BottleRespawned { id: 3 }), None);
    }

    #[test]
    fn test_muted_plays_nothing() {
        let mut audio = AudioManager::new(LogAudio::default());
        audio.set_muted(true);
        audio.dispatch(&[GameEvent::Won, GameEvent::CoinCollected]);
        assert!(audio.sink().played.is_empty());

        audio.set_muted(false);
        audio.dispatch(&[
            GameEvent::Won,
            GameEvent::PlayerDied,
            GameEvent::CoinCollected,
        ]);
        assert_eq!(
            audio.sink().played,
            vec![AudioCue::Victory, AudioCue::CoinPickup]
        );
    }
}
