use std::collections::HashMap;
use std::path::Path;
use kira::{
    manager::{AudioManager, AudioManagerSettings, backend::DefaultBackend},
    sound::{static_sound::{StaticSoundData, StaticSoundSettings}, PlaybackRate},
    Volume,
};

/// Per-play settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoundConfig {
    pub volume: f32,
    pub pitch: f32,
}

impl Default for SoundConfig {
    fn default() -> Self {
        Self { volume: 1.0, pitch: 1.0 }
    }
}

/// Named one-shot sound effects.  Every operation is a no-op when no audio
/// device is present or the sound was never loaded.
pub struct AudioContext {
    /// `None` when audio hardware is unavailable (headless / CI / no audio device).
    manager: Option<AudioManager>,
    sounds: HashMap<String, StaticSoundData>,
}

impl AudioContext {
    pub fn new() -> Self {
        let manager = match AudioManager::<DefaultBackend>::new(AudioManagerSettings::default()) {
            Ok(m) => Some(m),
            Err(e) => {
                log::warn!("failed to initialize audio: {e}; sound disabled");
                None
            }
        };
        Self { manager, sounds: HashMap::new() }
    }

    /// A context that never plays anything.
    pub fn disabled() -> Self {
        Self { manager: None, sounds: HashMap::new() }
    }

    /// Returns true if audio hardware is available.
    pub fn is_available(&self) -> bool { self.manager.is_some() }

    pub fn has_sound(&self, name: &str) -> bool { self.sounds.contains_key(name) }

    /// Load a sound file (OGG, WAV) into memory under `name`.  Returns
    /// `false` and logs a warning when the file cannot be read.
    pub fn load_sound<P: AsRef<Path>>(&mut self, name: &str, path: P) -> bool {
        let path = path.as_ref();
        match StaticSoundData::from_file(path) {
            Ok(sound) => {
                log::info!("loaded sound '{name}' from {}", path.display());
                self.sounds.insert(name.to_string(), sound);
                true
            }
            Err(e) => {
                log::warn!("failed to load sound '{name}' from {}: {e}", path.display());
                false
            }
        }
    }

    /// Play a loaded sound once.
    pub fn play(&mut self, name: &str, config: SoundConfig) {
        let Some(manager) = self.manager.as_mut() else { return };
        let Some(data) = self.sounds.get(name) else { return };

        let mut settings = StaticSoundSettings::new();
        settings.playback_rate = PlaybackRate::Factor(config.pitch as f64).into();
        settings.volume = Volume::Amplitude(config.volume.clamp(0.0, 2.0) as f64).into();

        if let Err(e) = manager.play(data.clone().with_settings(settings)) {
            log::warn!("failed to play sound '{name}': {e}");
        }
    }
}

impl Default for AudioContext {
    fn default() -> Self { Self::new() }
}
