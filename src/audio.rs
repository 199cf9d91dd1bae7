//! Audio cue handling
//!
//! Procedurally described sound effects - no external files needed! Each cue
//! maps to a single oscillator sweep with an exponential gain decay. A host
//! with a real audio backend drains the scheduled tones and plays them.

use crate::sim::{GameEvent, SoundCue};

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

/// One oscillator sweep
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub waveform: Waveform,
    /// Frequency at the start of the sweep (Hz)
    pub start_hz: f32,
    /// Frequency reached by the end (exponential ramp)
    pub end_hz: f32,
    /// Initial gain, decays to 0.01
    pub gain: f32,
    pub duration_s: f32,
}

impl Tone {
    const fn new(waveform: Waveform, start_hz: f32, end_hz: f32, gain: f32, duration_s: f32) -> Self {
        Self {
            waveform,
            start_hz,
            end_hz,
            gain,
            duration_s,
        }
    }
}

/// Sound design for each cue
pub fn tone(cue: SoundCue) -> Tone {
    match cue {
        SoundCue::Shoot => Tone::new(Waveform::Sine, 800.0, 400.0, 0.1, 0.1),
        SoundCue::Explosion => Tone::new(Waveform::Sawtooth, 200.0, 50.0, 0.2, 0.3),
        SoundCue::Damage => Tone::new(Waveform::Square, 150.0, 100.0, 0.15, 0.5),
        SoundCue::GameOver => Tone::new(Waveform::Triangle, 300.0, 150.0, 0.2, 0.8),
        // Lower pitch than the player's shot
        SoundCue::EnemyShoot => Tone::new(Waveform::Sawtooth, 600.0, 300.0, 0.08, 0.15),
        SoundCue::BossArrival => Tone::new(Waveform::Square, 100.0, 80.0, 0.15, 1.0),
    }
}

/// Receives sound cues from the game
pub trait CueSink {
    fn play(&mut self, cue: SoundCue);
}

/// Forward every sound event in `events` to `sink`
pub fn dispatch(events: &[GameEvent], sink: &mut impl CueSink) {
    for event in events {
        if let GameEvent::Sound(cue) = event {
            sink.play(*cue);
        }
    }
}

/// Discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentSink;

impl CueSink for SilentSink {
    fn play(&mut self, _cue: SoundCue) {}
}

/// Audio manager for the game
///
/// Scales each cue's tone by the master volume and queues it for a backend.
/// Without a backend the queue is simply drained and dropped.
#[derive(Debug)]
pub struct AudioManager {
    master_volume: f32,
    muted: bool,
    queue: Vec<(SoundCue, Tone)>,
    played: usize,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            muted: false,
            queue: Vec::new(),
            played: 0,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.master_volume }
    }

    /// Take the tones scheduled since the last drain
    pub fn drain(&mut self) -> Vec<(SoundCue, Tone)> {
        std::mem::take(&mut self.queue)
    }

    /// Cues accepted over the manager's lifetime
    pub fn played(&self) -> usize {
        self.played
    }
}

impl CueSink for AudioManager {
    fn play(&mut self, cue: SoundCue) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        let mut t = tone(cue);
        t.gain *= vol;
        log::trace!("cue {} ({:?} {}->{} Hz)", cue.as_str(), t.waveform, t.start_hz, t.end_hz);
        self.queue.push((cue, t));
        self.played += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_cue_has_a_decaying_tone() {
        for cue in [
            SoundCue::Shoot,
            SoundCue::Explosion,
            SoundCue::Damage,
            SoundCue::GameOver,
            SoundCue::EnemyShoot,
            SoundCue::BossArrival,
        ] {
            let t = tone(cue);
            assert!(t.gain > 0.01);
            assert!(t.duration_s > 0.0);
            assert!(t.end_hz < t.start_hz);
        }
    }

    #[test]
    fn test_dispatch_filters_sound_events() {
        let mut audio = AudioManager::new();
        let events = vec![
            GameEvent::HudChanged,
            GameEvent::Sound(SoundCue::Shoot),
            GameEvent::ShieldActivated,
            GameEvent::Sound(SoundCue::Explosion),
        ];
        dispatch(&events, &mut audio);
        let queued: Vec<SoundCue> = audio.drain().into_iter().map(|(c, _)| c).collect();
        assert_eq!(queued, vec![SoundCue::Shoot, SoundCue::Explosion]);
        assert!(audio.drain().is_empty());
    }

    #[test]
    fn test_silent_sink_swallows_cues() {
        let events = vec![
            GameEvent::Sound(SoundCue::BossArrival),
            GameEvent::Sound(SoundCue::GameOver),
        ];
        let mut sink = SilentSink;
        dispatch(&events, &mut sink);
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_volume_and_mute() {
        let mut audio = AudioManager::new();
        audio.set_master_volume(0.5);
        audio.play(SoundCue::Explosion);
        let (_, t) = audio.drain()[0];
        assert!((t.gain - 0.1).abs() < 1e-6);

        audio.set_muted(true);
        audio.play(SoundCue::Explosion);
        assert!(audio.drain().is_empty());
        assert_eq!(audio.played(), 1);
    }
}
