//! Custom speech model
//! Wraps a user-supplied function so any synthesis backend can be plugged in

use crate::engines::{GeneratedAudio, SpeechModel};
use crate::error::SpeechError;
use crate::request::ResolvedParameters;
use async_trait::async_trait;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

type BoxedGenerate = Pin<Box<dyn Future<Output = Result<GeneratedAudio, SpeechError>> + Send>>;

enum GenerateFn {
    Sync(Arc<dyn Fn(&str, &ResolvedParameters) -> Result<GeneratedAudio, SpeechError> + Send + Sync>),
    Async(Arc<dyn Fn(String, ResolvedParameters) -> BoxedGenerate + Send + Sync>),
}

/// Custom speech model wrapper
pub struct CustomSpeechModel {
    name: String,
    generate_fn: GenerateFn,
}

impl CustomSpeechModel {
    /// Create a model from a synchronous function
    pub fn new<F>(name: impl Into<String>, generate_fn: F) -> Self
    where
        F: Fn(&str, &ResolvedParameters) -> Result<GeneratedAudio, SpeechError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            generate_fn: GenerateFn::Sync(Arc::new(generate_fn)),
        }
    }

    /// Create a model from an async function.
    /// The function receives owned copies of the text and parameters.
    pub fn from_async<F, Fut>(name: impl Into<String>, generate_fn: F) -> Self
    where
        F: Fn(String, ResolvedParameters) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<GeneratedAudio, SpeechError>> + Send + 'static,
    {
        let boxed = move |text: String, params: ResolvedParameters| -> BoxedGenerate {
            Box::pin(generate_fn(text, params))
        };
        Self {
            name: name.into(),
            generate_fn: GenerateFn::Async(Arc::new(boxed)),
        }
    }
}

#[async_trait]
impl SpeechModel for CustomSpeechModel {
    async fn generate(&self, text: &str, params: &ResolvedParameters) -> Result<GeneratedAudio, SpeechError> {
        match &self.generate_fn {
            GenerateFn::Sync(f) => f(text, params),
            GenerateFn::Async(f) => f(text.to_string(), params.clone()).await,
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
