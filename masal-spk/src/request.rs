//! Synthesis requests and parameter resolution

use crate::error::SpeechError;
use crate::preset::{VoicePreset, PARAM_MAX, PARAM_MIN};
use serde::{Deserialize, Deserializer, Serialize};

/// Default upper limit on request text, in characters.
pub const DEFAULT_MAX_TEXT_CHARS: usize = 10_000;

/// Incoming synthesis request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SynthesisRequest {
    pub text: String,

    /// Preset id; the registry default is used when absent. An explicit `null` is rejected.
    #[serde(default, deserialize_with = "reject_null")]
    pub voice_id: Option<String>,

    /// Overrides the preset's cfg_weight when present.
    /// Kept at f64 so the range check sees the value as sent.
    #[serde(default)]
    pub cfg_weight: Option<f64>,

    /// Overrides the preset's exaggeration when present
    #[serde(default)]
    pub exaggeration: Option<f64>,
}

fn reject_null<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Effective parameters for one model invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedParameters {
    pub model_key: String,
    pub language_id: String,
    pub cfg_weight: f32,
    pub exaggeration: f32,
}

impl SynthesisRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_voice(mut self, voice_id: impl Into<String>) -> Self {
        self.voice_id = Some(voice_id.into());
        self
    }

    pub fn with_cfg_weight(mut self, cfg_weight: f64) -> Self {
        self.cfg_weight = Some(cfg_weight);
        self
    }

    pub fn with_exaggeration(mut self, exaggeration: f64) -> Self {
        self.exaggeration = Some(exaggeration);
        self
    }

    /// Check schema constraints. Runs before any registry lookup.
    pub fn validate(&self, max_text_chars: usize) -> Result<(), SpeechError> {
        if self.text.is_empty() {
            return Err(SpeechError::Validation("text must not be empty".to_string()));
        }

        let chars = self.text.chars().count();
        if chars > max_text_chars {
            return Err(SpeechError::Validation(format!(
                "text too long ({} chars, max {})",
                chars, max_text_chars
            )));
        }

        check_override("cfg_weight", self.cfg_weight)?;
        check_override("exaggeration", self.exaggeration)?;

        Ok(())
    }
}

fn check_override(field: &str, value: Option<f64>) -> Result<(), SpeechError> {
    match value {
        Some(v) if !override_in_range(v) => Err(SpeechError::Validation(format!(
            "{} must be between {} and {}, got {}",
            field, PARAM_MIN, PARAM_MAX, v
        ))),
        _ => Ok(()),
    }
}

fn override_in_range(value: f64) -> bool {
    value.is_finite() && (f64::from(PARAM_MIN)..=f64::from(PARAM_MAX)).contains(&value)
}

impl ResolvedParameters {
    /// Merge request overrides over the preset defaults.
    /// Model and language always come from the preset. Overrides must already be validated.
    pub fn resolve(preset: &VoicePreset, request: &SynthesisRequest) -> Self {
        Self {
            model_key: preset.model_key.clone(),
            language_id: preset.language_id.clone(),
            cfg_weight: request.cfg_weight.map_or(preset.cfg_weight, |v| v as f32),
            exaggeration: request.exaggeration.map_or(preset.exaggeration, |v| v as f32),
        }
    }
}
