//! Sound effects
//!
//! Turns the events of a tick into fire-and-forget requests on the Media
//! collaborator. Volume and mute live here so the backend stays dumb.

use serde::{Deserialize, Serialize};

use crate::platform::Media;
use crate::settings::Settings;
use crate::sim::WorldEvents;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Ball hits paddle
    PaddleHit,
    /// Ball breaks a brick
    BrickBreak,
    /// Player passed a score gate
    Score,
    /// Session lost
    Death,
    /// World reset after a loss
    Restart,
}

/// Audio manager for the game
pub struct AudioManager<M: Media> {
    media: M,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl<M: Media> AudioManager<M> {
    pub fn new(media: M, settings: &Settings) -> Self {
        let mut audio = Self {
            media,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        };
        audio.apply_settings(settings);
        audio
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.set_master_volume(settings.master_volume);
        self.set_sfx_volume(settings.sfx_volume);
        self.set_muted(settings.muted);
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        if self.effective_volume() <= 0.0 {
            return;
        }
        self.media.play_sound(effect);
    }

    /// Play whatever the tick's events call for
    pub fn react(&mut self, events: &WorldEvents) {
        for _ in 0..events.paddle_hits {
            self.play(SoundEffect::PaddleHit);
        }
        for _ in 0..events.bricks_broken() {
            self.play(SoundEffect::BrickBreak);
        }
        if events.score_delta > 0 {
            self.play(SoundEffect::Score);
        }
        if events.died {
            self.play(SoundEffect::Death);
        }
        if events.restarted {
            self.play(SoundEffect::Restart);
        }
    }

    pub fn media(&self) -> &M {
        &self.media
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::LogMedia;
    use crate::sim::{DestroyCause, Destroyed, EntityKind};

    #[test]
    fn test_react_maps_events_to_sounds() {
        let mut audio = AudioManager::new(LogMedia::default(), &Settings::default());
        let events = WorldEvents {
            score_delta: 1,
            died: true,
            destroyed: vec![
                Destroyed {
                    id: 3,
                    kind: EntityKind::Brick,
                    cause: DestroyCause::Hit,
                },
                Destroyed {
                    id: 4,
                    kind: EntityKind::Pipe,
                    cause: DestroyCause::LeftField,
                },
            ],
            ..Default::default()
        };
        audio.react(&events);
        assert_eq!(
            audio.media().played,
            vec![SoundEffect::BrickBreak, SoundEffect::Score, SoundEffect::Death]
        );
    }

    #[test]
    fn test_muted_plays_nothing() {
        let settings = Settings {
            muted: true,
            ..Default::default()
        };
        let mut audio = AudioManager::new(LogMedia::default(), &settings);
        audio.play(SoundEffect::Score);
        assert!(audio.media().played.is_empty());

        audio.set_muted(false);
        audio.set_master_volume(0.0);
        audio.play(SoundEffect::Score);
        assert!(audio.media().played.is_empty());
    }
}
