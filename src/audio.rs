//! Sound output
//!
//! The game only ever asks for a named sound or for the music loop to start;
//! how (and whether) it is heard is up to the [`AudioSink`].

use std::io::Write;

use crate::settings::Settings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Projectile fired
    Laser,
    /// Obstacle destroyed
    Explosion,
}

impl SoundEffect {
    /// Asset file backing this sound
    pub fn asset_name(self) -> &'static str {
        match self {
            SoundEffect::Laser => "laser.ogg",
            SoundEffect::Explosion => "explosion.ogg",
        }
    }
}

/// Background music asset
pub const MUSIC_ASSET: &str = "music.ogg";

/// Fire-and-forget audio output
pub trait AudioSink {
    /// Play a sound effect once
    fn play(&mut self, effect: SoundEffect);

    /// Start the looping background track
    fn start_music(&mut self);
}

/// Audio for a terminal: explosions ring the terminal bell
///
/// Terminals have no mixer, so lasers and music are only logged.
pub struct TerminalAudio<W: Write> {
    out: W,
    sfx_volume: f32,
    music_volume: f32,
    music_started: bool,
}

impl<W: Write> TerminalAudio<W> {
    pub fn new(out: W, settings: &Settings) -> Self {
        Self {
            out,
            sfx_volume: settings.effective_sfx_volume(),
            music_volume: settings.effective_music_volume(),
            music_started: false,
        }
    }

    pub fn music_started(&self) -> bool {
        self.music_started
    }
}

impl<W: Write> AudioSink for TerminalAudio<W> {
    fn play(&mut self, effect: SoundEffect) {
        if self.sfx_volume <= 0.0 {
            return;
        }
        log::trace!("play {}", effect.asset_name());
        if effect == SoundEffect::Explosion {
            let _ = self.out.write_all(b"\x07");
            let _ = self.out.flush();
        }
    }

    fn start_music(&mut self) {
        if self.music_started {
            return;
        }
        self.music_started = true;
        if self.music_volume > 0.0 {
            log::info!("Looping {MUSIC_ASSET} at volume {:.2}", self.music_volume);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explosion_rings_bell() {
        let mut audio = TerminalAudio::new(Vec::new(), &Settings::default());
        audio.play(SoundEffect::Laser);
        assert!(audio.out.is_empty());
        audio.play(SoundEffect::Explosion);
        assert_eq!(audio.out, b"\x07");
    }

    #[test]
    fn test_muted_is_silent() {
        let settings = Settings {
            muted: true,
            ..Default::default()
        };
        let mut audio = TerminalAudio::new(Vec::new(), &settings);
        audio.play(SoundEffect::Explosion);
        assert!(audio.out.is_empty());
    }

    #[test]
    fn test_music_starts_once() {
        let mut audio = TerminalAudio::new(Vec::new(), &Settings::default());
        assert!(!audio.music_started());
        audio.start_music();
        audio.start_music();
        assert!(audio.music_started());
    }
}
