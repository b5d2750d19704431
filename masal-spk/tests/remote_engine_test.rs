//! Tests for the remote (HTTP sidecar) speech model
//! Runs a fake inference sidecar in-process

use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use masal_spk::config::ModelConfig;
use masal_spk::engines::remote::RemoteSpeechModel;
use masal_spk::engines::SpeechModel;
use masal_spk::error::SpeechError;
use masal_spk::request::ResolvedParameters;
use serde_json::{json, Value};
use std::io::Cursor;
use std::sync::{Arc, Mutex};

async fn spawn_sidecar(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn float_wav(samples: &[f32], sample_rate: u32) -> Vec<u8> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
        for &sample in samples {
            writer.write_sample(sample).unwrap();
        }
        writer.finalize().unwrap();
    }
    cursor.into_inner()
}

fn model_for(endpoint: String) -> RemoteSpeechModel {
    let config = ModelConfig {
        endpoint,
        timeout_secs: 5,
        ..ModelConfig::default()
    };
    RemoteSpeechModel::new(&config).unwrap()
}

fn soft_params() -> ResolvedParameters {
    ResolvedParameters {
        model_key: "turbo".to_string(),
        language_id: "tr".to_string(),
        cfg_weight: 0.65,
        exaggeration: 0.9,
    }
}

#[tokio::test]
async fn test_remote_generate_success() {
    let received: Arc<Mutex<Option<Value>>> = Arc::new(Mutex::new(None));
    let seen = received.clone();
    let router = Router::new().route(
        "/generate",
        post(move |Json(body): Json<Value>| {
            let seen = seen.clone();
            async move {
                *seen.lock().unwrap() = Some(body);
                ([(header::CONTENT_TYPE, "audio/wav")], float_wav(&[0.1, -0.2, 0.3], 24_000))
            }
        }),
    );
    let model = model_for(spawn_sidecar(router).await);

    let audio = model.generate("Merhaba dünya", &soft_params()).await.unwrap();
    assert_eq!(audio.sample_rate, 24_000);
    assert_eq!(audio.samples, vec![0.1, -0.2, 0.3]);

    let body = received.lock().unwrap().clone().unwrap();
    assert_eq!(body["text"], "Merhaba dünya");
    assert_eq!(body["language_id"], "tr");
    assert_eq!(body["cfg_weight"], 0.65);
    assert_eq!(body["exaggeration"], 0.9);
    assert_eq!(body["device"], "cpu");
    assert_eq!(model.name(), "turbo");
}

#[tokio::test]
async fn test_remote_rejection_maps_to_incompatible_parameters() {
    let router = Router::new().route(
        "/generate",
        post(|| async {
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({"detail": "generate() got an unexpected keyword argument 'language_id'"})),
            )
                .into_response()
        }),
    );
    let model = model_for(spawn_sidecar(router).await);

    match model.generate("Merhaba", &soft_params()).await {
        Err(SpeechError::IncompatibleParameters(msg)) => {
            assert_eq!(msg, "generate() got an unexpected keyword argument 'language_id'");
        }
        other => panic!("Expected IncompatibleParameters, got {:?}", other),
    }
}

#[tokio::test]
async fn test_remote_bad_request_plain_text() {
    let router = Router::new().route(
        "/generate",
        post(|| async { (StatusCode::BAD_REQUEST, "cfg_weight not supported").into_response() }),
    );
    let model = model_for(spawn_sidecar(router).await);

    let err = model.generate("Merhaba", &soft_params()).await.unwrap_err();
    assert!(matches!(err, SpeechError::IncompatibleParameters(ref msg) if msg == "cfg_weight not supported"));
}

#[tokio::test]
async fn test_remote_server_error_maps_to_model_error() {
    let router = Router::new().route(
        "/generate",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "CUDA out of memory").into_response() }),
    );
    let model = model_for(spawn_sidecar(router).await);

    let err = model.generate("Merhaba", &soft_params()).await.unwrap_err();
    assert!(matches!(err, SpeechError::Model(_)));
    assert!(!err.is_client_error());
    assert!(err.to_string().contains("CUDA out of memory"));
}

#[tokio::test]
async fn test_remote_invalid_audio_is_model_error() {
    let router = Router::new().route("/generate", post(|| async { "definitely not audio" }));
    let model = model_for(spawn_sidecar(router).await);

    let err = model.generate("Merhaba", &soft_params()).await.unwrap_err();
    assert!(matches!(err, SpeechError::Model(_)));
}

#[tokio::test]
async fn test_remote_unreachable_is_model_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let model = model_for(format!("http://{}", addr));
    let err = model.generate("Merhaba", &soft_params()).await.unwrap_err();
    assert!(matches!(err, SpeechError::Model(_)));
}

#[test]
fn test_remote_rejects_invalid_config() {
    let config = ModelConfig {
        endpoint: "ftp://example.com".to_string(),
        ..ModelConfig::default()
    };
    assert!(matches!(RemoteSpeechModel::new(&config), Err(SpeechError::Config(_))));

    let config = ModelConfig {
        timeout_secs: 0,
        ..ModelConfig::default()
    };
    assert!(RemoteSpeechModel::new(&config).is_err());
}
