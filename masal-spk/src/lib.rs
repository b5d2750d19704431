//! masal-spk: Voice-preset speech synthesis
//!
//! Provides the core of the masal text-to-speech gateway:
//! - A static registry of voice presets (model, language, default parameters)
//! - Request validation and override resolution
//! - Pluggable speech model backends (remote inference sidecar, custom functions)
//! - WAV encoding into a uniquely named output file

pub mod error;
pub mod config;
pub mod preset;
pub mod registry;
pub mod request;
pub mod engines;
pub mod wav;
pub mod output;
pub mod synthesizer;

pub use error::SpeechError;
pub use config::{ModelConfig, SpeechConfig};
pub use preset::{VoicePreset, VoiceSummary};
pub use registry::VoiceRegistry;
pub use request::{ResolvedParameters, SynthesisRequest};
pub use engines::{GeneratedAudio, ModelRegistry, SpeechModel};
pub use wav::WavEncoding;
pub use output::OutputStore;
pub use synthesizer::{SpeechSynthesizer, SynthesizedSpeech};
