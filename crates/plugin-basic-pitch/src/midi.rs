//! Inspection of produced MIDI files.
//!
//! The summary is informational: it is logged after a conversion and never
//! decides whether a job succeeds.

use std::collections::BTreeSet;
use std::path::Path;

use midly::{Format, MetaMessage, MidiMessage, Smf, Timing, TrackEventKind};
use serde::Serialize;

use crate::error::ConversionError;

/// Microseconds per quarter note when a file declares no tempo (120 BPM).
const DEFAULT_TEMPO_US: u32 = 500_000;

/// Facts about a standard MIDI file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MidiSummary {
    /// `single-track`, `parallel` or `sequential`.
    pub format: &'static str,
    /// Number of tracks.
    pub track_count: usize,
    /// Note-on events with non-zero velocity.
    pub note_count: usize,
    /// Tempo meta events.
    pub tempo_changes: usize,
    /// Distinct General MIDI programs selected.
    pub programs: Vec<u8>,
    /// Playback length derived from the tempo map.
    pub duration_seconds: f64,
}

impl MidiSummary {
    /// Parse and summarize raw SMF bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConversionError> {
        let smf = Smf::parse(bytes).map_err(|e| ConversionError::InvalidMidi(e.to_string()))?;

        let format = match smf.header.format {
            Format::SingleTrack => "single-track",
            Format::Parallel => "parallel",
            Format::Sequential => "sequential",
        };

        let mut note_count = 0;
        let mut programs = BTreeSet::new();
        let mut tempo_map: Vec<(u64, u32)> = Vec::new();
        let mut end_tick: u64 = 0;

        for track in &smf.tracks {
            let mut tick: u64 = 0;
            for event in track {
                tick += u64::from(event.delta.as_int());
                match &event.kind {
                    TrackEventKind::Midi {
                        message: MidiMessage::NoteOn { vel, .. },
                        ..
                    } if vel.as_int() > 0 => note_count += 1,
                    TrackEventKind::Midi {
                        message: MidiMessage::ProgramChange { program },
                        ..
                    } => {
                        programs.insert(program.as_int());
                    }
                    TrackEventKind::Meta(MetaMessage::Tempo(us)) => {
                        tempo_map.push((tick, us.as_int()));
                    }
                    _ => {}
                }
            }
            end_tick = end_tick.max(tick);
        }

        let tempo_changes = tempo_map.len();
        let duration_seconds = match smf.header.timing {
            Timing::Metrical(ppq) => {
                tempo_map.sort_by_key(|(t, _)| *t);
                metrical_seconds(end_tick, u32::from(ppq.as_int()), &tempo_map)
            }
            Timing::Timecode(fps, subframes) => {
                let ticks_per_second = f64::from(fps.as_f32()) * f64::from(subframes);
                if ticks_per_second > 0.0 {
                    end_tick as f64 / ticks_per_second
                } else {
                    0.0
                }
            }
        };

        Ok(Self {
            format,
            track_count: smf.tracks.len(),
            note_count,
            tempo_changes,
            programs: programs.into_iter().collect(),
            duration_seconds,
        })
    }

    /// Read and summarize a MIDI file from disk.
    pub async fn from_file(path: &Path) -> Result<Self, ConversionError> {
        let bytes = tokio::fs::read(path).await?;
        Self::from_bytes(&bytes)
    }
}

/// Convert `end_tick` to seconds by walking a sorted tempo map.
fn metrical_seconds(end_tick: u64, ppq: u32, tempo_map: &[(u64, u32)]) -> f64 {
    if ppq == 0 {
        return 0.0;
    }

    let mut seconds = 0.0;
    let mut last_tick = 0u64;
    let mut tempo = DEFAULT_TEMPO_US;

    for &(tick, us) in tempo_map {
        if tick >= end_tick {
            break;
        }
        seconds += ticks_to_seconds(tick - last_tick, tempo, ppq);
        last_tick = tick;
        tempo = us;
    }

    seconds + ticks_to_seconds(end_tick - last_tick, tempo, ppq)
}

fn ticks_to_seconds(ticks: u64, tempo_us: u32, ppq: u32) -> f64 {
    ticks as f64 * f64::from(tempo_us) / 1_000_000.0 / f64::from(ppq)
}
