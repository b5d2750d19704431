//! Remote speech model
//!
//! Talks to a model inference sidecar over HTTP. The sidecar hosts the
//! pretrained model and exposes a single endpoint:
//!
//! `POST {endpoint}/generate` with JSON
//! `{text, language_id, cfg_weight, exaggeration, device}`.
//! A successful response carries a WAV file. 400/422 responses mean the model
//! rejected the parameters; their body is passed back to the caller.

use crate::config::ModelConfig;
use crate::engines::{GeneratedAudio, SpeechModel};
use crate::error::SpeechError;
use crate::request::ResolvedParameters;
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Serialize;
use std::io::Cursor;
use std::time::Duration;
use tracing::{debug, warn};

/// HTTP-backed speech model
pub struct RemoteSpeechModel {
    name: String,
    client: Client,
    generate_url: Url,
    device: String,
}

#[derive(Serialize)]
struct GeneratePayload<'a> {
    text: &'a str,
    language_id: &'a str,
    cfg_weight: f32,
    exaggeration: f32,
    device: &'a str,
}

impl RemoteSpeechModel {
    /// Create a model client from its configuration
    pub fn new(config: &ModelConfig) -> Result<Self, SpeechError> {
        config.validate().map_err(SpeechError::Config)?;

        let base = format!("{}/", config.endpoint.trim_end_matches('/'));
        let generate_url = Url::parse(&base)
            .and_then(|url| url.join("generate"))
            .map_err(|e| SpeechError::Config(format!("Invalid model endpoint '{}': {}", config.endpoint, e)))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SpeechError::Model(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            name: config.key.clone(),
            client,
            generate_url,
            device: config.device.clone(),
        })
    }

    pub fn generate_url(&self) -> &Url {
        &self.generate_url
    }
}

#[async_trait]
impl SpeechModel for RemoteSpeechModel {
    async fn generate(&self, text: &str, params: &ResolvedParameters) -> Result<GeneratedAudio, SpeechError> {
        let payload = GeneratePayload {
            text,
            language_id: &params.language_id,
            cfg_weight: params.cfg_weight,
            exaggeration: params.exaggeration,
            device: &self.device,
        };

        debug!("Requesting generation from {} ({})", self.name, self.generate_url);

        let response = self
            .client
            .post(self.generate_url.clone())
            .json(&payload)
            .send()
            .await
            .map_err(|e| SpeechError::Model(format!("Model '{}' request failed: {}", self.name, e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_detail(&body).unwrap_or_else(|| status.to_string());

            if status == StatusCode::BAD_REQUEST || status == StatusCode::UNPROCESSABLE_ENTITY {
                return Err(SpeechError::IncompatibleParameters(message));
            }

            warn!("Model '{}' returned {}: {}", self.name, status, message);
            return Err(SpeechError::Model(format!("Model '{}' error ({}): {}", self.name, status, message)));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| SpeechError::Model(format!("Failed to read audio from '{}': {}", self.name, e)))?;

        decode_wav(&body)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Pull a human readable message out of an error body.
/// Understands `{"detail": ...}` and `{"error": ...}` JSON, falls back to raw text.
fn error_detail(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(json) = serde_json::from_str::<serde_json::Value>(trimmed) {
        for field in ["detail", "error", "message"] {
            match json.get(field) {
                Some(serde_json::Value::String(s)) => return Some(s.clone()),
                Some(other) if !other.is_null() => return Some(other.to_string()),
                _ => {}
            }
        }
    }

    Some(trimmed.to_string())
}

/// Decode a WAV body into mono f32 samples.
pub fn decode_wav(bytes: &[u8]) -> Result<GeneratedAudio, SpeechError> {
    let reader = hound::WavReader::new(Cursor::new(bytes))
        .map_err(|e| SpeechError::Model(format!("Model returned invalid WAV: {}", e)))?;
    let spec = reader.spec();

    let interleaved: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<Result<_, _>>()
            .map_err(|e| SpeechError::Model(format!("Model returned invalid WAV: {}", e)))?,
        hound::SampleFormat::Int => {
            let scale = (1i64 << (spec.bits_per_sample.saturating_sub(1))) as f32;
            reader
                .into_samples::<i32>()
                .map(|sample| sample.map(|v| v as f32 / scale))
                .collect::<Result<_, _>>()
                .map_err(|e| SpeechError::Model(format!("Model returned invalid WAV: {}", e)))?
        }
    };

    let channels = spec.channels.max(1) as usize;
    let samples = if channels == 1 {
        interleaved
    } else {
        interleaved
            .chunks(channels)
            .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
            .collect()
    };

    Ok(GeneratedAudio::new(samples, spec.sample_rate))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_detail_prefers_json_fields() {
        assert_eq!(
            error_detail(r#"{"detail":"unexpected keyword argument 'language_id'"}"#).as_deref(),
            Some("unexpected keyword argument 'language_id'")
        );
        assert_eq!(error_detail(r#"{"error":"bad"}"#).as_deref(), Some("bad"));
        assert_eq!(error_detail("plain text").as_deref(), Some("plain text"));
        assert_eq!(error_detail("  "), None);
    }

    #[test]
    fn generate_url_keeps_endpoint_path() {
        let config = ModelConfig {
            endpoint: "http://127.0.0.1:8001/chatterbox/".to_string(),
            ..ModelConfig::default()
        };
        let model = RemoteSpeechModel::new(&config).unwrap();
        assert_eq!(model.generate_url().as_str(), "http://127.0.0.1:8001/chatterbox/generate");
    }

    #[test]
    fn decode_wav_downmixes_stereo() {
        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: 24_000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
            writer.write_sample(i16::MAX).unwrap();
            writer.write_sample(0i16).unwrap();
            writer.finalize().unwrap();
        }

        let audio = decode_wav(cursor.get_ref()).unwrap();
        assert_eq!(audio.sample_rate, 24_000);
        assert_eq!(audio.samples.len(), 1);
        assert!((audio.samples[0] - 0.5).abs() < 0.001);
    }

    #[test]
    fn decode_wav_rejects_garbage() {
        assert!(matches!(decode_wav(b"not a wav"), Err(SpeechError::Model(_))));
    }
}
