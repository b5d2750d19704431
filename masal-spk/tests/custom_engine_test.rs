//! Tests for custom speech model implementation

use masal_spk::engines::custom::CustomSpeechModel;
use masal_spk::engines::{GeneratedAudio, ModelRegistry, SpeechModel};
use masal_spk::error::SpeechError;
use masal_spk::request::ResolvedParameters;
use std::sync::Arc;

fn params() -> ResolvedParameters {
    ResolvedParameters {
        model_key: "turbo".to_string(),
        language_id: "tr".to_string(),
        cfg_weight: 0.6,
        exaggeration: 0.7,
    }
}

#[tokio::test]
async fn test_custom_model_sync() {
    let model = CustomSpeechModel::new("test_model", |text: &str, params: &ResolvedParameters| {
        Ok(GeneratedAudio::new(vec![params.cfg_weight; text.len()], 16_000))
    });

    assert_eq!(model.name(), "test_model");
    let audio = model.generate("abc", &params()).await.unwrap();
    assert_eq!(audio.samples, vec![0.6, 0.6, 0.6]);
    assert_eq!(audio.sample_rate, 16_000);
}

#[tokio::test]
async fn test_custom_model_async() {
    let model = CustomSpeechModel::from_async("async_model", |text: String, params: ResolvedParameters| async move {
        tokio::task::yield_now().await;
        if params.language_id != "tr" {
            return Err(SpeechError::IncompatibleParameters("only tr is supported".to_string()));
        }
        Ok(GeneratedAudio::new(vec![0.0; text.chars().count()], 22_050))
    });

    let audio = model.generate("dünya", &params()).await.unwrap();
    assert_eq!(audio.samples.len(), 5);

    let mut english = params();
    english.language_id = "en".to_string();
    let err = model.generate("world", &english).await.unwrap_err();
    assert!(err.is_client_error());
}

#[tokio::test]
async fn test_custom_model_error_passthrough() {
    let model = CustomSpeechModel::new("failing", |_text: &str, _params: &ResolvedParameters| {
        Err(SpeechError::Model("weights not loaded".to_string()))
    });

    let err = model.generate("abc", &params()).await.unwrap_err();
    assert!(matches!(err, SpeechError::Model(_)));
    assert!(!err.is_client_error());
}

#[test]
fn test_model_registry_lookup() {
    let model: Arc<dyn SpeechModel> = Arc::new(CustomSpeechModel::new("m", |_text: &str, _params: &ResolvedParameters| {
        Ok(GeneratedAudio::new(vec![0.0], 8_000))
    }));

    let registry = ModelRegistry::new()
        .with_model("turbo", model.clone())
        .with_model("mtl", model);

    assert_eq!(registry.len(), 2);
    assert!(registry.contains("turbo"));
    assert!(registry.get("missing").is_none());
    assert_eq!(registry.keys(), vec!["mtl", "turbo"]);
}

#[test]
fn test_generated_audio_duration() {
    assert_eq!(GeneratedAudio::new(vec![0.0; 48_000], 24_000).duration_secs(), 2.0);
    assert_eq!(GeneratedAudio::new(vec![0.0; 10], 0).duration_secs(), 0.0);
}
