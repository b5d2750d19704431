//! Output directory for generated audio

use crate::engines::GeneratedAudio;
use crate::error::SpeechError;
use crate::wav::{write_wav, WavEncoding};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use uuid::Uuid;

/// Writes generated audio under collision-free names
#[derive(Debug, Clone)]
pub struct OutputStore {
    dir: PathBuf,
    encoding: WavEncoding,
}

/// A WAV file written by the store
#[derive(Debug, Clone, PartialEq)]
pub struct StoredAudio {
    pub path: PathBuf,
    pub file_name: String,
}

impl OutputStore {
    /// Open the store, creating the directory if it does not exist.
    pub fn open(dir: impl Into<PathBuf>, encoding: WavEncoding) -> Result<Self, SpeechError> {
        let dir = dir.into();
        if !dir.exists() {
            std::fs::create_dir_all(&dir)?;
            info!("Created output directory {}", dir.display());
        }
        if !dir.is_dir() {
            return Err(SpeechError::Config(format!(
                "Output path {} is not a directory",
                dir.display()
            )));
        }
        Ok(Self { dir, encoding })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn encoding(&self) -> WavEncoding {
        self.encoding
    }

    fn allocate(&self) -> StoredAudio {
        let file_name = format!("{}.wav", Uuid::new_v4());
        StoredAudio {
            path: self.dir.join(&file_name),
            file_name,
        }
    }

    /// Encode `audio` into a new uniquely named WAV file.
    /// Encoding runs on the blocking pool.
    pub async fn save(&self, audio: GeneratedAudio) -> Result<StoredAudio, SpeechError> {
        let stored = self.allocate();
        let path = stored.path.clone();
        let encoding = self.encoding;

        tokio::task::spawn_blocking(move || write_wav(&path, &audio, encoding))
            .await
            .map_err(|e| SpeechError::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))??;

        debug!("Wrote {}", stored.path.display());
        Ok(stored)
    }
}
