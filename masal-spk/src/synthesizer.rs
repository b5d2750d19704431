//! Speech synthesizer: resolves presets, invokes models and stores the result

use crate::config::SpeechConfig;
use crate::engines::remote::RemoteSpeechModel;
use crate::engines::ModelRegistry;
use crate::error::SpeechError;
use crate::output::OutputStore;
use crate::preset::VoiceSummary;
use crate::registry::VoiceRegistry;
use crate::request::{ResolvedParameters, SynthesisRequest, DEFAULT_MAX_TEXT_CHARS};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// File name suggested to clients downloading synthesized audio.
pub const DOWNLOAD_FILE_NAME: &str = "speech.wav";

/// Result of a successful synthesis
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesizedSpeech {
    /// Location of the WAV file on disk
    pub path: PathBuf,
    /// Storage name (`<uuid>.wav`)
    pub file_name: String,
    /// Name clients should save the audio under
    pub download_name: String,
    pub voice_id: String,
    pub params: ResolvedParameters,
    pub sample_rate: u32,
    pub duration_secs: f64,
}

/// Speech synthesizer
pub struct SpeechSynthesizer {
    registry: Arc<VoiceRegistry>,
    models: ModelRegistry,
    output: OutputStore,
    max_text_chars: usize,
}

impl SpeechSynthesizer {
    /// Create a synthesizer. Every model key used by a preset must be loaded.
    pub fn new(
        registry: Arc<VoiceRegistry>,
        models: ModelRegistry,
        output: OutputStore,
    ) -> Result<Self, SpeechError> {
        for key in registry.model_keys() {
            if !models.contains(key) {
                return Err(SpeechError::Config(format!(
                    "Voice presets reference model '{}' but it is not loaded",
                    key
                )));
            }
        }

        Ok(Self {
            registry,
            models,
            output,
            max_text_chars: DEFAULT_MAX_TEXT_CHARS,
        })
    }

    /// Build registry, remote models and output store from configuration
    pub fn from_config(config: &SpeechConfig) -> Result<Self, SpeechError> {
        config.validate().map_err(SpeechError::Config)?;

        let registry = Arc::new(config.registry()?);

        let mut models = ModelRegistry::new();
        for model_config in &config.models {
            let model = RemoteSpeechModel::new(model_config)?;
            info!(
                "Model '{}' -> {} (device: {})",
                model_config.key,
                model.generate_url(),
                model_config.device
            );
            models.insert(model_config.key.clone(), Arc::new(model));
        }

        let output = OutputStore::open(&config.output_dir, config.wav_encoding)?;

        Ok(Self::new(registry, models, output)?.with_max_text_chars(config.max_text_chars))
    }

    pub fn with_max_text_chars(mut self, max_text_chars: usize) -> Self {
        self.max_text_chars = max_text_chars;
        self
    }

    pub fn registry(&self) -> &VoiceRegistry {
        &self.registry
    }

    pub fn output(&self) -> &OutputStore {
        &self.output
    }

    /// Voices in registry order
    pub fn list_voices(&self) -> Vec<VoiceSummary> {
        self.registry.list_all()
    }

    /// Validate the request and compute the parameters it resolves to.
    /// Returns the voice id used alongside the parameters.
    pub fn resolve(&self, request: &SynthesisRequest) -> Result<(String, ResolvedParameters), SpeechError> {
        request.validate(self.max_text_chars)?;

        let voice_id = request
            .voice_id
            .as_deref()
            .unwrap_or_else(|| self.registry.default_voice());

        let preset = self
            .registry
            .lookup(voice_id)
            .ok_or_else(|| SpeechError::UnknownVoice(voice_id.to_string()))?;

        Ok((preset.id.clone(), ResolvedParameters::resolve(preset, request)))
    }

    /// Synthesize a request into a new WAV file
    pub async fn synthesize(&self, request: &SynthesisRequest) -> Result<SynthesizedSpeech, SpeechError> {
        let (voice_id, params) = self.resolve(request)?;

        let model = self
            .models
            .get(&params.model_key)
            .ok_or_else(|| SpeechError::ModelUnavailable(params.model_key.clone()))?;

        debug!(
            "Synthesizing {} chars with voice {} (model {}, lang {}, cfg_weight {}, exaggeration {}): {}",
            request.text.chars().count(),
            voice_id,
            params.model_key,
            params.language_id,
            params.cfg_weight,
            params.exaggeration,
            preview(&request.text)
        );

        let started = Instant::now();
        let audio = match model.generate(&request.text, &params).await {
            Ok(audio) => audio,
            Err(e) => {
                warn!("Model '{}' failed for voice {}: {}", model.name(), voice_id, e);
                return Err(e);
            }
        };

        if audio.sample_rate == 0 {
            return Err(SpeechError::Model(format!("Model '{}' returned a zero sample rate", model.name())));
        }
        if audio.samples.is_empty() {
            return Err(SpeechError::Model(format!("Model '{}' returned no audio", model.name())));
        }

        let sample_rate = audio.sample_rate;
        let duration_secs = audio.duration_secs();
        let stored = self.output.save(audio).await?;

        info!(
            "Synthesized {:.2}s of audio with voice {} in {:?} -> {}",
            duration_secs,
            voice_id,
            started.elapsed(),
            stored.file_name
        );

        Ok(SynthesizedSpeech {
            path: stored.path,
            file_name: stored.file_name,
            download_name: DOWNLOAD_FILE_NAME.to_string(),
            voice_id,
            params,
            sample_rate,
            duration_secs,
        })
    }
}

fn preview(text: &str) -> String {
    const PREVIEW_CHARS: usize = 50;
    if text.chars().count() > PREVIEW_CHARS {
        format!("{}...", text.chars().take(PREVIEW_CHARS).collect::<String>())
    } else {
        text.to_string()
    }
}
