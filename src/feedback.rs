//! Feedback cues for audio/visual collaborators
//!
//! The simulation only emits events; this module turns them into cues a
//! front end can play. Tones are described procedurally, no sample files.

use serde::{Deserialize, Serialize};

use crate::settings::Settings;
use crate::sim::{GameEvent, SimError};

/// Feedback cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cue {
    /// Bead dropped in - wooden fish knock
    WoodenFish,
    /// Two beads fused - chime, brighter for higher tiers
    Ding { tier: u8 },
    /// Drop rejected
    Error,
    /// Top tier reached
    Fanfare,
}

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Waveform {
    Sine,
    Triangle,
}

/// A single enveloped oscillator sweep
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tone {
    pub waveform: Waveform,
    pub start_hz: f32,
    /// Exponential sweep target
    pub end_hz: f32,
    /// Peak gain before the exponential decay
    pub gain: f32,
    pub duration: f32,
    /// Optional lowpass cutoff
    pub lowpass_hz: Option<f32>,
}

impl Cue {
    /// Procedural tone for this cue
    pub fn tone(&self) -> Tone {
        match *self {
            Cue::WoodenFish => Tone {
                waveform: Waveform::Sine,
                start_hz: 180.0,
                end_hz: 80.0,
                gain: 0.4,
                duration: 0.3,
                lowpass_hz: Some(600.0),
            },
            Cue::Ding { tier } => {
                // Up a fifth per tier
                let pitch = 1.5f32.powi(tier as i32);
                Tone {
                    waveform: Waveform::Sine,
                    start_hz: 880.0 * pitch,
                    end_hz: 440.0 * pitch,
                    gain: 0.2,
                    duration: 0.4,
                    lowpass_hz: None,
                }
            }
            Cue::Error => Tone {
                waveform: Waveform::Triangle,
                start_hz: 110.0,
                end_hz: 110.0,
                gain: 0.05,
                duration: 0.15,
                lowpass_hz: None,
            },
            Cue::Fanfare => Tone {
                waveform: Waveform::Sine,
                start_hz: 523.25,
                end_hz: 1046.5,
                gain: 0.3,
                duration: 1.2,
                lowpass_hz: None,
            },
        }
    }
}

/// Cue for a simulation event
pub fn cue_for_event(event: &GameEvent) -> Cue {
    match event {
        GameEvent::BodySpawned { .. } => Cue::WoodenFish,
        GameEvent::Merged { from, .. } => Cue::Ding { tier: from + 1 },
        GameEvent::Won { .. } => Cue::Fanfare,
    }
}

/// Cue for a rejected operation
pub fn cue_for_error(_error: &SimError) -> Cue {
    Cue::Error
}

/// Anything that can play or record cues. Sinks never feed back into the world.
pub trait FeedbackSink {
    fn play(&mut self, cue: Cue, volume: f32);
}

/// Records cues in order
impl FeedbackSink for Vec<Cue> {
    fn play(&mut self, cue: Cue, _volume: f32) {
        self.push(cue);
    }
}

/// Routes events and errors to a sink at the configured volume
#[derive(Debug, Clone)]
pub struct Feedback {
    volume: f32,
}

impl Feedback {
    pub fn new(settings: &Settings) -> Self {
        Self {
            volume: settings.effective_sfx_volume(),
        }
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Play one cue per event. Nothing is played when muted.
    pub fn on_events(&self, events: &[GameEvent], sink: &mut impl FeedbackSink) {
        if self.volume <= 0.0 {
            return;
        }
        for event in events {
            sink.play(cue_for_event(event), self.volume);
        }
    }

    pub fn on_error(&self, error: &SimError, sink: &mut impl FeedbackSink) {
        if self.volume <= 0.0 {
            return;
        }
        sink.play(cue_for_error(error), self.volume);
    }
}
