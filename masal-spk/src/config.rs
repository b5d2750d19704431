//! Configuration for speech synthesis

use crate::error::SpeechError;
use crate::preset::{builtin_presets, VoicePreset, DEFAULT_VOICE_ID};
use crate::registry::VoiceRegistry;
use crate::request::DEFAULT_MAX_TEXT_CHARS;
use crate::wav::WavEncoding;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Speech synthesis configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// Directory receiving generated WAV files (created at startup)
    pub output_dir: PathBuf,

    /// Preset used when a request omits `voice_id`
    pub default_voice: String,

    /// Maximum request text length in characters
    pub max_text_chars: usize,

    /// Sample format of written WAV files
    pub wav_encoding: WavEncoding,

    /// Voice presets; the built-in table is used when empty
    pub voices: Vec<VoicePreset>,

    /// Model backends, one per model key
    pub models: Vec<ModelConfig>,
}

/// Remote model backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Model key referenced by presets (e.g. "turbo")
    pub key: String,

    /// Base URL of the inference sidecar
    pub endpoint: String,

    /// Device the sidecar should run the model on ("cpu" or "cuda")
    pub device: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("outputs"),
            default_voice: DEFAULT_VOICE_ID.to_string(),
            max_text_chars: DEFAULT_MAX_TEXT_CHARS,
            wav_encoding: WavEncoding::default(),
            voices: Vec::new(),
            models: vec![ModelConfig::default()],
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            key: "turbo".to_string(),
            endpoint: "http://127.0.0.1:8001".to_string(),
            device: "cpu".to_string(),
            timeout_secs: 120,
        }
    }
}

impl ModelConfig {
    /// Validate model configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.key.is_empty() {
            return Err("Model key cannot be empty".to_string());
        }

        if self.endpoint.is_empty() {
            return Err(format!("Model '{}': endpoint cannot be empty", self.key));
        }

        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err(format!("Model '{}': endpoint must be an http(s) URL", self.key));
        }

        if !matches!(self.device.as_str(), "cpu" | "cuda") {
            return Err(format!(
                "Model '{}': device must be \"cpu\" or \"cuda\", got \"{}\"",
                self.key, self.device
            ));
        }

        if self.timeout_secs == 0 {
            return Err(format!("Model '{}': timeout must be greater than 0", self.key));
        }

        if self.timeout_secs > 3600 {
            return Err(format!("Model '{}': timeout too large (max 3600 seconds)", self.key));
        }

        Ok(())
    }
}

impl SpeechConfig {
    /// Validate configuration, including the preset table it describes
    pub fn validate(&self) -> Result<(), String> {
        if self.output_dir.as_os_str().is_empty() {
            return Err("Output directory cannot be empty".to_string());
        }

        if self.max_text_chars == 0 {
            return Err("max_text_chars must be greater than 0".to_string());
        }

        let mut keys: Vec<&str> = Vec::with_capacity(self.models.len());
        for model in &self.models {
            model.validate()?;
            if keys.contains(&model.key.as_str()) {
                return Err(format!("Duplicate model key '{}'", model.key));
            }
            keys.push(&model.key);
        }

        let registry = self.registry().map_err(|e| e.to_string())?;
        for key in registry.model_keys() {
            if !keys.contains(&key) {
                return Err(format!("Voice presets reference model '{}' which is not configured", key));
            }
        }

        Ok(())
    }

    /// Build the voice registry described by this configuration.
    pub fn registry(&self) -> Result<VoiceRegistry, SpeechError> {
        let presets = if self.voices.is_empty() {
            builtin_presets()
        } else {
            self.voices.clone()
        };
        VoiceRegistry::new(presets, self.default_voice.clone())
    }
}
