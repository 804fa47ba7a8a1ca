//! Capability traits defined in `polygen-core` and implemented by other crates.

pub mod converter;
pub mod reporter;

pub use converter::MidiConverter;
pub use reporter::StatusReporter;
