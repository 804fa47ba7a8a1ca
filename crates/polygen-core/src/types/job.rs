//! The job description handed from the API surface to the worker.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Caller-supplied opaque job identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    /// Wrap a caller-supplied identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for JobId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for JobId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Kind of processing requested. Closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProcessingType {
    /// Convert an audio recording to a MIDI file.
    #[serde(rename = "AUDIO2MIDI")]
    Audio2Midi,
}

impl ProcessingType {
    /// Wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Audio2Midi => "AUDIO2MIDI",
        }
    }
}

impl fmt::Display for ProcessingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Descriptive metadata about the submitted file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobMetadata {
    /// Caller's file category (e.g. `AUDIO`).
    pub file_type: String,
    /// Original file name; its extension selects the audio format.
    pub file_name: String,
    /// Identifier of the source file in the caller's system.
    pub original_file_id: String,
    /// Declared size in bytes, informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
}

/// One audio-to-MIDI conversion request.
///
/// Lives only as in-flight task state; it is moved into the job's
/// background task and dropped once the terminal status is reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingJob {
    /// Caller-supplied job identifier.
    pub job_id: JobId,
    /// Owning user.
    pub user_id: String,
    /// Where the audio is downloaded from.
    pub input_file_url: String,
    /// Where the MIDI result is uploaded to.
    pub output_file_url: String,
    /// Requested processing.
    pub processing_type: ProcessingType,
    /// File metadata.
    pub metadata: JobMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_camel_case_payload() {
        let raw = serde_json::json!({
            "jobId": "job-1",
            "userId": "user-1",
            "inputFileUrl": "http://files/in.mp3",
            "outputFileUrl": "http://files/out.mid",
            "processingType": "AUDIO2MIDI",
            "metadata": {
                "fileType": "AUDIO",
                "fileName": "in.mp3",
                "originalFileId": "file-9"
            }
        });

        let job: ProcessingJob = serde_json::from_value(raw).expect("parse");
        assert_eq!(job.job_id.as_str(), "job-1");
        assert_eq!(job.processing_type, ProcessingType::Audio2Midi);
        assert_eq!(job.metadata.original_file_id, "file-9");
        assert_eq!(job.metadata.file_size, None);
    }

    #[test]
    fn test_rejects_unknown_processing_type() {
        let result: Result<ProcessingType, _> = serde_json::from_str("\"MIDI2AUDIO\"");
        assert!(result.is_err());
    }
}
