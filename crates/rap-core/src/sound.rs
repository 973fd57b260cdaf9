//! Closeness sound scheduling.
//!
//! Produces `ToneEvent`s for a synth front-end to play. While the user is
//! interacting and the ratio is not yet in proportion, a staccato tone repeats
//! with pitch and rate rising as fitness improves; entering proportion plays a
//! one-shot chord and reaching a range edge plays a low boundary tone. Regions
//! come from the same fitness table the narration uses.

use std::time::Duration;

use smallvec::SmallVec;

use crate::feedback::FeedbackEvent;
use crate::fitness::FitnessReading;
use crate::regions::{FitnessRegion, Region, FITNESS_REGIONS};

/// Default five-note scale centered around middle C.
pub const C_MAJOR_PENTATONIC: &[i32] = &[0, 2, 4, 7, 9, 12];

// Staccato repeat interval at the farthest and closest regions
const STACCATO_SLOWEST_SEC: f64 = 0.8;
const STACCATO_FASTEST_SEC: f64 = 0.15;
const STACCATO_DURATION_SEC: f32 = 0.08;
const SUCCESS_DURATION_SEC: f32 = 0.9;
const BOUNDARY_DURATION_SEC: f32 = 0.2;
const BOUNDARY_MIDI_OFFSET: i32 = -12;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CueVoice {
    Staccato,
    Success,
    Boundary,
}

/// A tone for the front-end to synthesize.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ToneEvent {
    pub voice: CueVoice,
    pub frequency_hz: f32,
    /// Normalized loudness 0..1
    pub velocity: f32,
    pub duration_sec: f32,
}

#[derive(Clone, Debug)]
pub struct SoundParams {
    pub root_midi: i32,
    pub scale: &'static [i32],
}

impl Default for SoundParams {
    fn default() -> Self {
        Self {
            root_midi: 60, // Middle C
            scale: C_MAJOR_PENTATONIC,
        }
    }
}

pub struct ClosenessSound {
    pub params: SoundParams,
    region: FitnessRegion,
    in_proportion: bool,
    interacting: bool,
    beat_accum: f64,
}

impl ClosenessSound {
    pub fn new(params: SoundParams) -> Self {
        Self {
            params,
            region: FitnessRegion::ExtremelyFar,
            in_proportion: false,
            interacting: false,
            beat_accum: 0.0,
        }
    }

    pub fn region(&self) -> FitnessRegion {
        self.region
    }

    pub fn update(&mut self, reading: &FitnessReading) {
        self.region = FITNESS_REGIONS.classify(reading.fitness);
        self.in_proportion = reading.in_proportion;
    }

    /// Staccato only plays while a hand is being moved.
    pub fn set_interacting(&mut self, interacting: bool) {
        if !interacting {
            self.beat_accum = 0.0;
        }
        self.interacting = interacting;
    }

    /// Seconds between staccato tones for `region`.
    pub fn staccato_interval_sec(region: FitnessRegion) -> f64 {
        let steps = (FitnessRegion::LOWERCASE.len() - 1) as f64;
        let t = region.closeness_rank() as f64 / steps;
        STACCATO_SLOWEST_SEC + (STACCATO_FASTEST_SEC - STACCATO_SLOWEST_SEC) * t
    }

    /// MIDI note for `region`: one scale degree per rank, wrapping into the next
    /// octave.
    pub fn region_midi(&self, region: FitnessRegion) -> i32 {
        let rank = region.closeness_rank();
        let len = self.params.scale.len().max(1);
        let degree = self.params.scale.get(rank % len).copied().unwrap_or(0);
        self.params.root_midi + degree + 12 * (rank / len) as i32
    }

    /// Advance the staccato scheduler by `dt`.
    pub fn tick(&mut self, dt: Duration, out_events: &mut Vec<ToneEvent>) {
        if !self.interacting || self.in_proportion {
            return;
        }
        let interval = Self::staccato_interval_sec(self.region);
        self.beat_accum += dt.as_secs_f64();
        while self.beat_accum >= interval {
            self.beat_accum -= interval;
            let rank = self.region.closeness_rank() as f32;
            out_events.push(ToneEvent {
                voice: CueVoice::Staccato,
                frequency_hz: midi_to_hz(self.region_midi(self.region) as f32),
                velocity: 0.4 + 0.6 * rank / (FitnessRegion::LOWERCASE.len() - 1) as f32,
                duration_sec: STACCATO_DURATION_SEC,
            });
        }
    }

    /// One-shot tones for discrete feedback.
    pub fn on_feedback(&self, event: &FeedbackEvent) -> SmallVec<[ToneEvent; 3]> {
        let mut tones = SmallVec::new();
        match event {
            FeedbackEvent::EnteredProportion => {
                // Major triad on the root
                for offset in [0, 4, 7] {
                    tones.push(ToneEvent {
                        voice: CueVoice::Success,
                        frequency_hz: midi_to_hz((self.params.root_midi + 12 + offset) as f32),
                        velocity: 0.8,
                        duration_sec: SUCCESS_DURATION_SEC,
                    });
                }
            }
            FeedbackEvent::Boundary { .. } => tones.push(ToneEvent {
                voice: CueVoice::Boundary,
                frequency_hz: midi_to_hz((self.params.root_midi + BOUNDARY_MIDI_OFFSET) as f32),
                velocity: 0.6,
                duration_sec: BOUNDARY_DURATION_SEC,
            }),
            // Passing through the target between frames can skip the in
            // proportion state entirely; mark the crossing with one note.
            FeedbackEvent::TargetCrossed { .. } if !self.in_proportion => tones.push(ToneEvent {
                voice: CueVoice::Success,
                frequency_hz: midi_to_hz((self.params.root_midi + 12) as f32),
                velocity: 0.5,
                duration_sec: STACCATO_DURATION_SEC * 2.0,
            }),
            FeedbackEvent::LeftProportion | FeedbackEvent::TargetCrossed { .. } => {}
        }
        tones
    }

    pub fn reset(&mut self) {
        self.region = FitnessRegion::ExtremelyFar;
        self.in_proportion = false;
        self.interacting = false;
        self.beat_accum = 0.0;
    }
}

impl Default for ClosenessSound {
    fn default() -> Self {
        Self::new(SoundParams::default())
    }
}

/// Convert a MIDI note number to Hertz (A4=440 Hz).
pub fn midi_to_hz(midi: f32) -> f32 {
    440.0 * (2.0_f32).powf((midi - 69.0) / 12.0)
}
