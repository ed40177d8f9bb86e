//! Host settings
//!
//! JSON file on native, LocalStorage in the browser.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::sim::SimConfig;

/// Everything the host loop reads besides the simulation itself
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Simulation tunables
    pub sim: SimConfig,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Mute when window loses focus
    pub mute_on_blur: bool,

    // === Timing ===
    /// Longest frame the clock will report (seconds)
    pub max_frame_time: f32,
    /// Fixed RNG seed; time-based when absent
    pub seed: Option<u64>,

    // === Headless runner (native) ===
    /// Frames to simulate
    pub headless_frames: u32,
    /// Elapsed seconds fed to each headless frame
    pub headless_frame_time: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sim: SimConfig::default(),

            master_volume: 0.8,
            sfx_volume: 1.0,
            mute_on_blur: true,

            max_frame_time: 0.1,
            seed: None,

            headless_frames: 600,
            headless_frame_time: 1.0 / 60.0,
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.sanitize();
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Clamp soft values into range
    fn sanitize(&mut self) {
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.sim.validate()?;
        if !(self.max_frame_time.is_finite() && self.max_frame_time > 0.0) {
            return Err(ConfigError::invalid(
                "max_frame_time",
                format!("{} must be finite and > 0", self.max_frame_time),
            ));
        }
        if !(self.headless_frame_time.is_finite() && self.headless_frame_time >= 0.0) {
            return Err(ConfigError::invalid(
                "headless_frame_time",
                format!("{} must be finite and >= 0", self.headless_frame_time),
            ));
        }
        Ok(())
    }

    /// Effective sound effect volume
    pub fn effect_volume(&self) -> f32 {
        self.master_volume * self.sfx_volume
    }

    /// Load settings from a JSON file (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "bounce_bloom_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            match self.to_json() {
                Ok(json) => {
                    let _ = storage.set_item(Self::STORAGE_KEY, &json);
                    log::info!("Settings saved");
                }
                Err(e) => log::warn!("Failed to serialize settings: {}", e),
            }
        }
    }
}
