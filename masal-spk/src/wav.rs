//! WAV encoding

use crate::engines::GeneratedAudio;
use crate::error::SpeechError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Sample format for written WAV files
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WavEncoding {
    /// 32-bit IEEE float, samples written as produced
    #[default]
    Float32,
    /// 16-bit signed PCM, samples clamped to [-1, 1]
    Pcm16,
}

impl WavEncoding {
    fn spec(self, sample_rate: u32) -> hound::WavSpec {
        match self {
            WavEncoding::Float32 => hound::WavSpec {
                channels: 1,
                sample_rate,
                bits_per_sample: 32,
                sample_format: hound::SampleFormat::Float,
            },
            WavEncoding::Pcm16 => hound::WavSpec {
                channels: 1,
                sample_rate,
                bits_per_sample: 16,
                sample_format: hound::SampleFormat::Int,
            },
        }
    }
}

/// Write mono audio to `path`. Blocking; call from a blocking context.
pub fn write_wav(path: &Path, audio: &GeneratedAudio, encoding: WavEncoding) -> Result<(), SpeechError> {
    if audio.sample_rate == 0 {
        return Err(SpeechError::Model("Sample rate must be greater than 0".to_string()));
    }

    let mut writer = hound::WavWriter::create(path, encoding.spec(audio.sample_rate))?;
    match encoding {
        WavEncoding::Float32 => {
            for &sample in &audio.samples {
                writer.write_sample(sample)?;
            }
        }
        WavEncoding::Pcm16 => {
            for &sample in &audio.samples {
                let clamped = sample.clamp(-1.0, 1.0);
                writer.write_sample((clamped * i16::MAX as f32) as i16)?;
            }
        }
    }
    writer.finalize()?;
    Ok(())
}
