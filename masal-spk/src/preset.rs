//! Voice presets: named bundles of model selection and default generation parameters

use serde::{Deserialize, Serialize};

/// Lower bound for `cfg_weight` and `exaggeration`.
pub const PARAM_MIN: f32 = 0.0;
/// Upper bound for `cfg_weight` and `exaggeration`.
pub const PARAM_MAX: f32 = 2.0;

/// Preset used when a request does not name a voice.
pub const DEFAULT_VOICE_ID: &str = "fairytale_soft";

/// Voice preset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoicePreset {
    /// Unique key exposed to clients
    pub id: String,

    /// Display name shown in voice pickers
    pub name: String,

    /// Key of the model that renders this voice (e.g. "turbo")
    pub model_key: String,

    /// Language code passed to the model (e.g. "tr")
    #[serde(default = "default_language_id")]
    pub language_id: String,

    /// Default cfg_weight (0.0-2.0)
    pub cfg_weight: f32,

    /// Default exaggeration (0.0-2.0)
    pub exaggeration: f32,
}

/// Listing projection of a preset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceSummary {
    pub id: String,
    pub name: String,
}

fn default_language_id() -> String {
    "tr".to_string()
}

/// Whether `value` is a usable generation parameter.
pub fn param_in_range(value: f32) -> bool {
    value.is_finite() && (PARAM_MIN..=PARAM_MAX).contains(&value)
}

impl VoicePreset {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        model_key: impl Into<String>,
        language_id: impl Into<String>,
        cfg_weight: f32,
        exaggeration: f32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            model_key: model_key.into(),
            language_id: language_id.into(),
            cfg_weight,
            exaggeration,
        }
    }

    pub fn summary(&self) -> VoiceSummary {
        VoiceSummary {
            id: self.id.clone(),
            name: self.name.clone(),
        }
    }

    /// Validate preset fields
    pub fn validate(&self) -> Result<(), String> {
        if self.id.is_empty() {
            return Err("Voice id cannot be empty".to_string());
        }

        if self.id.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(format!("Voice id '{}' contains invalid characters", self.id));
        }

        if self.name.is_empty() {
            return Err(format!("Voice '{}' has an empty name", self.id));
        }

        if self.model_key.is_empty() {
            return Err(format!("Voice '{}' has an empty model_key", self.id));
        }

        if self.language_id.is_empty() {
            return Err(format!("Voice '{}' has an empty language_id", self.id));
        }

        if !param_in_range(self.cfg_weight) {
            return Err(format!(
                "Voice '{}': cfg_weight {} outside {}..={}",
                self.id, self.cfg_weight, PARAM_MIN, PARAM_MAX
            ));
        }

        if !param_in_range(self.exaggeration) {
            return Err(format!(
                "Voice '{}': exaggeration {} outside {}..={}",
                self.id, self.exaggeration, PARAM_MIN, PARAM_MAX
            ));
        }

        Ok(())
    }
}

/// Presets shipped with the server, in listing order.
pub fn builtin_presets() -> Vec<VoicePreset> {
    vec![
        VoicePreset::new("fairytale_soft", "Masal Anlatıcısı (Yumuşak)", "turbo", "tr", 0.65, 0.90),
        VoicePreset::new("fairytale_calm", "Masal Anlatıcısı (Sakin)", "turbo", "tr", 0.60, 0.70),
        VoicePreset::new("narrator_neutral", "Anlatıcı (Düz)", "turbo", "tr", 0.60, 0.55),
        VoicePreset::new("energetic", "Enerjik", "turbo", "tr", 0.75, 1.05),
    ]
}
