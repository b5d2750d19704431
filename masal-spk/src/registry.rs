//! Voice preset registry
//!
//! Built once at startup and shared read-only between request handlers.
//! Listing order is the insertion order of the presets.

use crate::error::SpeechError;
use crate::preset::{builtin_presets, VoicePreset, VoiceSummary, DEFAULT_VOICE_ID};
use std::collections::HashMap;

/// Immutable lookup table of voice presets
#[derive(Debug, Clone)]
pub struct VoiceRegistry {
    presets: Vec<VoicePreset>,
    index: HashMap<String, usize>,
    default_voice: String,
}

impl VoiceRegistry {
    /// Build a registry from presets, validating every entry.
    pub fn new(presets: Vec<VoicePreset>, default_voice: impl Into<String>) -> Result<Self, SpeechError> {
        if presets.is_empty() {
            return Err(SpeechError::Config("At least one voice preset is required".to_string()));
        }

        let mut index = HashMap::with_capacity(presets.len());
        for (position, preset) in presets.iter().enumerate() {
            preset.validate().map_err(SpeechError::Config)?;
            if index.insert(preset.id.clone(), position).is_some() {
                return Err(SpeechError::Config(format!("Duplicate voice id '{}'", preset.id)));
            }
        }

        let default_voice = default_voice.into();
        if !index.contains_key(&default_voice) {
            return Err(SpeechError::Config(format!(
                "Default voice '{}' is not a registered preset",
                default_voice
            )));
        }

        Ok(Self {
            presets,
            index,
            default_voice,
        })
    }

    /// Registry with the shipped presets and `fairytale_soft` as default.
    pub fn builtin() -> Self {
        let presets = builtin_presets();
        let index = presets
            .iter()
            .enumerate()
            .map(|(position, preset)| (preset.id.clone(), position))
            .collect();
        Self {
            presets,
            index,
            default_voice: DEFAULT_VOICE_ID.to_string(),
        }
    }

    pub fn lookup(&self, voice_id: &str) -> Option<&VoicePreset> {
        self.index.get(voice_id).map(|&position| &self.presets[position])
    }

    /// `(id, name)` pairs in registration order.
    pub fn list_all(&self) -> Vec<VoiceSummary> {
        self.presets.iter().map(VoicePreset::summary).collect()
    }

    pub fn default_voice(&self) -> &str {
        &self.default_voice
    }

    /// Distinct model keys referenced by presets, in first-use order.
    pub fn model_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = Vec::new();
        for preset in &self.presets {
            if !keys.contains(&preset.model_key.as_str()) {
                keys.push(&preset.model_key);
            }
        }
        keys
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

impl Default for VoiceRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
