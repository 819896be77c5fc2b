//! Audio cue capability. The engine decides when a cue fires, backends decide how it sounds.

use bevy::prelude::*;

/// One note of a cue: pitch, length in musical notation, and offset from the cue start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub note: &'static str,
    pub length: &'static str,
    pub offset_secs: f32,
}

const fn tone(note: &'static str, length: &'static str, offset_secs: f32) -> Tone {
    Tone {
        note,
        length,
        offset_secs,
    }
}

pub const EAT_CUE: &[Tone] = &[tone("C5", "16n", 0.0)];

/// Rising arpeggio.
pub const LEVEL_UP_CUE: &[Tone] = &[
    tone("C4", "8n", 0.0),
    tone("E4", "8n", 0.15),
    tone("G4", "8n", 0.3),
    tone("C5", "4n", 0.45),
];

/// Falling line ending on a long low note.
pub const GAME_OVER_CUE: &[Tone] = &[
    tone("C5", "8n", 0.0),
    tone("G4", "8n", 0.2),
    tone("E4", "8n", 0.4),
    tone("C4", "4n", 0.6),
];

/// Sound output injected into the engine. Failures stay inside the backend.
pub trait AudioCues: Send + Sync {
    fn play_tone(&mut self, sequence: &[Tone]);
    fn start_loop(&mut self);
    fn stop_loop(&mut self);
    /// Frees backend resources on teardown.
    fn release(&mut self) {}
}

/// Default backend: no sound at all.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentAudio;

impl AudioCues for SilentAudio {
    fn play_tone(&mut self, _sequence: &[Tone]) {}
    fn start_loop(&mut self) {}
    fn stop_loop(&mut self) {}
}

/// Backend for builds without a synthesizer: traces each cue.
#[derive(Debug, Default)]
pub struct LoggedAudio {
    looping: bool,
}

impl AudioCues for LoggedAudio {
    fn play_tone(&mut self, sequence: &[Tone]) {
        let notes: Vec<&str> = sequence.iter().map(|t| t.note).collect();
        debug!("cue {}", notes.join(" "));
    }

    fn start_loop(&mut self) {
        if !self.looping {
            self.looping = true;
            debug!("music loop started");
        }
    }

    fn stop_loop(&mut self) {
        if self.looping {
            self.looping = false;
            debug!("music loop stopped");
        }
    }

    fn release(&mut self) {
        self.stop_loop();
    }
}
