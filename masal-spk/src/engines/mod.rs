//! Speech model backends

pub mod custom;
pub mod remote;

use crate::error::SpeechError;
use crate::request::ResolvedParameters;
use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Mono audio produced by a model
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedAudio {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl GeneratedAudio {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self { samples, sample_rate }
    }

    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// Trait for speech models
///
/// Implementations return `SpeechError::IncompatibleParameters` when the
/// model rejects the parameter combination, and `SpeechError::Model` for
/// any other failure.
#[async_trait]
pub trait SpeechModel: Send + Sync {
    /// Render `text` with the resolved language and generation parameters
    async fn generate(&self, text: &str, params: &ResolvedParameters) -> Result<GeneratedAudio, SpeechError>;

    /// Get model name
    fn name(&self) -> &str;
}

/// Loaded models keyed by model selector (e.g. "turbo")
#[derive(Clone, Default)]
pub struct ModelRegistry {
    models: HashMap<String, Arc<dyn SpeechModel>>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a model. Replaces any model already under `key`.
    pub fn insert(&mut self, key: impl Into<String>, model: Arc<dyn SpeechModel>) {
        self.models.insert(key.into(), model);
    }

    pub fn with_model(mut self, key: impl Into<String>, model: Arc<dyn SpeechModel>) -> Self {
        self.insert(key, model);
        self
    }

    pub fn get(&self, key: &str) -> Option<Arc<dyn SpeechModel>> {
        self.models.get(key).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.models.contains_key(key)
    }

    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.models.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

impl fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelRegistry")
            .field("models", &self.keys())
            .finish()
    }
}
