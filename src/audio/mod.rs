//! Audio cues
//!
//! The round owner fires cues and never waits on them. Tones and the looping
//! circus melody are generated procedurally, no external files needed.

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

/// Length of every one-shot beep (seconds)
pub const BEEP_SECONDS: f64 = 0.17;

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Triangle,
}

/// One-shot sound effects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Jump,
    Score,
    Death,
    LevelComplete,
    MenuSelect,
    MenuBack,
}

impl SoundCue {
    /// Frequency (Hz) and oscillator shape
    pub fn tone(&self) -> (f32, Waveform) {
        match self {
            SoundCue::Jump => (330.0, Waveform::Sine),
            SoundCue::Score => (587.0, Waveform::Square),
            SoundCue::Death => (155.0, Waveform::Triangle),
            SoundCue::LevelComplete => (784.0, Waveform::Sine),
            SoundCue::MenuSelect | SoundCue::MenuBack => (523.0, Waveform::Sine),
        }
    }
}

/// Background tune: (frequency Hz, duration seconds)
pub const MELODY: [(f32, f32); 19] = [
    (392.0, 0.19),
    (392.0, 0.19),
    (392.0, 0.31),
    (233.0, 0.17),
    (349.0, 0.31),
    (392.0, 0.27),
    (523.0, 0.37),
    (392.0, 0.19),
    (349.0, 0.17),
    (392.0, 0.11),
    (392.0, 0.13),
    (392.0, 0.29),
    (311.0, 0.11),
    (392.0, 0.24),
    (523.0, 0.29),
    (392.0, 0.19),
    (329.0, 0.11),
    (293.0, 0.27),
    (392.0, 0.33),
];

/// Loop length of the music buffer (seconds); the tail after the melody is silence
pub const MUSIC_LOOP_SECONDS: f32 = 8.0;
const MELODY_AMPLITUDE: f32 = 0.42;

/// Render the melody into a mono sample buffer.
///
/// Each note is a sine with an exponential decay over its own length.
pub fn melody_samples(sample_rate: f32) -> Vec<f32> {
    let total = (sample_rate * MUSIC_LOOP_SECONDS) as usize;
    let mut samples = Vec::with_capacity(total);

    for &(freq, duration) in &MELODY {
        let length = (sample_rate * duration).floor() as usize;
        for i in 0..length {
            if samples.len() == total {
                break;
            }
            let t = i as f32 / sample_rate;
            let envelope = (-(i as f32) / length as f32).exp();
            samples.push((std::f32::consts::TAU * freq * t).sin() * envelope * MELODY_AMPLITUDE);
        }
    }

    samples.resize(total, 0.0);
    samples
}

/// Receiver for fire-and-forget sound notifications
pub trait AudioSink {
    fn play(&mut self, cue: SoundCue);
    fn start_music(&mut self);
    fn stop_music(&mut self);

    fn on_jump(&mut self) {
        self.play(SoundCue::Jump);
    }

    fn on_score(&mut self) {
        self.play(SoundCue::Score);
    }

    fn on_death(&mut self) {
        self.play(SoundCue::Death);
    }

    fn on_level_complete(&mut self) {
        self.play(SoundCue::LevelComplete);
    }

    fn on_music_start(&mut self) {
        self.start_music();
    }

    fn on_music_stop(&mut self) {
        self.stop_music();
    }
}

/// Silent sink for headless runs
impl AudioSink for () {
    fn play(&mut self, _cue: SoundCue) {}
    fn start_music(&mut self) {}
    fn stop_music(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cue_tones() {
        assert_eq!(SoundCue::Jump.tone(), (330.0, Waveform::Sine));
        assert_eq!(SoundCue::Score.tone().1, Waveform::Square);
        assert_eq!(SoundCue::Death.tone().1, Waveform::Triangle);
        assert_eq!(SoundCue::MenuSelect.tone(), SoundCue::MenuBack.tone());
    }

    #[test]
    fn test_melody_buffer_length_and_range() {
        let sample_rate = 8000.0;
        let samples = melody_samples(sample_rate);
        assert_eq!(samples.len(), 64_000);
        assert!(samples.iter().all(|s| s.abs() <= MELODY_AMPLITUDE));

        let melody_len: f32 = MELODY.iter().map(|(_, d)| d).sum();
        let tail = (melody_len * sample_rate) as usize + 10;
        assert!(samples[tail..].iter().all(|&s| s == 0.0));
        assert!(samples[..tail].iter().any(|&s| s != 0.0));
    }
}
