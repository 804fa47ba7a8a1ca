//! Domain types shared by the API surface and the worker.

pub mod audio;
pub mod job;
pub mod status;

pub use audio::{AudioFormat, MIDI_CONTENT_TYPE, SUPPORTED_AUDIO_EXTENSIONS};
pub use job::{JobId, JobMetadata, ProcessingJob, ProcessingType};
pub use status::{JobStatus, Progress, StatusUpdate};
