//! Basic speech synthesis example
//!
//! Uses a custom model that renders a short tone instead of speech, so the
//! full request path (preset lookup, overrides, WAV output) can be exercised
//! without a model sidecar.

use masal_spk::engines::custom::CustomSpeechModel;
use masal_spk::{GeneratedAudio, ModelRegistry, OutputStore, SpeechSynthesizer, SynthesisRequest, VoiceRegistry, WavEncoding};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    // Pitch follows exaggeration so overrides are audible
    let tone = CustomSpeechModel::new("tone", |text, params| {
        let sample_rate: u32 = 24_000;
        let frequency = 220.0 * (1.0 + params.exaggeration);
        let len = sample_rate as usize / 20 * text.chars().count().max(1);
        let samples = (0..len)
            .map(|i| 0.3 * (2.0 * std::f32::consts::PI * frequency * i as f32 / sample_rate as f32).sin())
            .collect();
        Ok(GeneratedAudio::new(samples, sample_rate))
    });

    let registry = Arc::new(VoiceRegistry::builtin());
    let models = ModelRegistry::new().with_model("turbo", Arc::new(tone));
    let output = OutputStore::open(std::env::temp_dir().join("masal-example"), WavEncoding::Pcm16)?;
    let synthesizer = SpeechSynthesizer::new(registry, models, output)?;

    for voice in synthesizer.list_voices() {
        println!("{:<18} {}", voice.id, voice.name);
    }

    let request = SynthesisRequest::new("Bir varmış, bir yokmuş.")
        .with_voice("energetic")
        .with_cfg_weight(0.5);

    match synthesizer.synthesize(&request).await {
        Ok(speech) => {
            println!(
                "Wrote {:.2}s of audio to {} (cfg_weight {}, exaggeration {})",
                speech.duration_secs,
                speech.path.display(),
                speech.params.cfg_weight,
                speech.params.exaggeration
            );
        }
        Err(e) => {
            eprintln!("Failed to synthesize speech: {}", e);
        }
    }

    Ok(())
}
