//! Sound cues
//!
//! The simulation never plays sound itself. After each tick its events are
//! mapped to cues and handed to an `AudioPlayer`, fire-and-forget.

use crate::platform::AudioPlayer;
use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundId {
    /// Player fires a projectile
    Shoot,
    /// Player loses a life
    Fail,
    /// Collectible picked up
    Collect,
    /// Boss takes a hit
    BossHit,
    /// Boss destroyed
    Win,
    /// Looping background track
    Music,
}

impl SoundId {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundId::Shoot => "shoot",
            SoundId::Fail => "fail",
            SoundId::Collect => "collect",
            SoundId::BossHit => "boss_hit",
            SoundId::Win => "win",
            SoundId::Music => "music",
        }
    }
}

/// One-shot cue for a gameplay event, if it has one
pub fn cue_for(event: &GameEvent) -> Option<SoundId> {
    match event {
        GameEvent::Shot => Some(SoundId::Shoot),
        GameEvent::LifeLost { .. } => Some(SoundId::Fail),
        GameEvent::CollectiblePicked(_) => Some(SoundId::Collect),
        GameEvent::BossHit { .. } => Some(SoundId::BossHit),
        GameEvent::BossDefeated => Some(SoundId::Win),
        _ => None,
    }
}

/// Play the cues for a tick's events, in order
pub fn notify(player: &mut impl AudioPlayer, events: &[GameEvent]) {
    for cue in events.iter().filter_map(cue_for) {
        player.play_once(cue);
    }
}

/// Audio sink that logs cues instead of playing them
#[derive(Debug, Clone)]
pub struct LogAudio {
    sfx_volume: f32,
    music_volume: f32,
    played: Vec<SoundId>,
}

impl Default for LogAudio {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl LogAudio {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            sfx_volume: settings.effective_sfx_volume(),
            music_volume: settings.effective_music_volume(),
            played: Vec::new(),
        }
    }

    /// Cues played so far (muted cues are not recorded)
    pub fn played(&self) -> &[SoundId] {
        &self.played
    }
}

impl AudioPlayer for LogAudio {
    fn play_once(&mut self, sound: SoundId) {
        if self.sfx_volume <= 0.0 {
            return;
        }
        log::debug!("sfx {} @ {:.2}", sound.as_str(), self.sfx_volume);
        self.played.push(sound);
    }

    fn play_loop(&mut self, sound: SoundId) {
        if self.music_volume <= 0.0 {
            return;
        }
        log::debug!("loop {} @ {:.2}", sound.as_str(), self.music_volume);
        self.played.push(sound);
    }
}
