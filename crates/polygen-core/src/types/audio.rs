//! Accepted input audio formats.

use std::path::Path;

use crate::error::AppError;

/// Extensions accepted for input audio, including the leading dot.
pub const SUPPORTED_AUDIO_EXTENSIONS: [&str; 6] = [".wav", ".mp3", ".flac", ".m4a", ".ogg", ".aac"];

/// Content type of every uploaded result.
pub const MIDI_CONTENT_TYPE: &str = "audio/midi";

/// An input audio container from the allow-list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioFormat {
    /// RIFF WAVE.
    Wav,
    /// MPEG layer 3.
    Mp3,
    /// Free Lossless Audio Codec.
    Flac,
    /// MPEG-4 audio.
    M4a,
    /// Ogg container.
    Ogg,
    /// Raw AAC.
    Aac,
}

impl AudioFormat {
    /// Resolve the format from a declared file name's extension
    /// (case-insensitive).
    pub fn from_file_name(file_name: &str) -> Result<Self, AppError> {
        let extension = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e.to_ascii_lowercase()))
            .unwrap_or_default();

        match extension.as_str() {
            ".wav" => Ok(Self::Wav),
            ".mp3" => Ok(Self::Mp3),
            ".flac" => Ok(Self::Flac),
            ".m4a" => Ok(Self::M4a),
            ".ogg" => Ok(Self::Ogg),
            ".aac" => Ok(Self::Aac),
            "" => Err(AppError::unsupported_format(
                "Unsupported audio format: missing file extension",
            )),
            other => Err(AppError::unsupported_format(format!(
                "Unsupported audio format: {other}"
            ))),
        }
    }

    /// Extension with the leading dot, lower-case.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Wav => ".wav",
            Self::Mp3 => ".mp3",
            Self::Flac => ".flac",
            Self::M4a => ".m4a",
            Self::Ogg => ".ogg",
            Self::Aac => ".aac",
        }
    }

    /// File name used for the downloaded audio inside a job's working area.
    pub fn input_file_name(&self) -> String {
        format!("input_audio{}", self.extension())
    }
}
