//! Web Audio backend

use web_sys::{AudioBufferSourceNode, AudioContext, GainNode, OscillatorNode, OscillatorType};

use super::{AudioSink, BEEP_SECONDS, MUSIC_LOOP_SECONDS, SoundCue, Waveform, melody_samples};
use crate::settings::Settings;

impl From<Waveform> for OscillatorType {
    fn from(wave: Waveform) -> Self {
        match wave {
            Waveform::Sine => OscillatorType::Sine,
            Waveform::Square => OscillatorType::Square,
            Waveform::Triangle => OscillatorType::Triangle,
        }
    }
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    music: Option<AudioBufferSourceNode>,
}

impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            sfx_volume: settings.sfx_volume,
            music_volume: settings.music_volume,
            muted: settings.muted,
            music: None,
        }
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Flip mute; muting also silences the music
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.stop_music();
        self.muted
    }

    /// Resume audio context (required after user gesture)
    fn resume(&self, ctx: &AudioContext) {
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }
    }

    /// Create an oscillator routed through a gain node
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    fn create_music(&self, ctx: &AudioContext) -> Option<AudioBufferSourceNode> {
        let sample_rate = ctx.sample_rate();
        let mut samples = melody_samples(sample_rate);
        let buffer = ctx
            .create_buffer(1, (sample_rate * MUSIC_LOOP_SECONDS) as u32, sample_rate)
            .ok()?;
        buffer.copy_to_channel(samples.as_mut_slice(), 0).ok()?;

        let source = ctx.create_buffer_source().ok()?;
        let gain = ctx.create_gain().ok()?;
        source.set_buffer(Some(&buffer));
        source.set_loop(true);
        gain.gain().set_value(self.music_volume);
        source.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;
        Some(source)
    }
}

impl AudioSink for AudioManager {
    fn play(&mut self, cue: SoundCue) {
        if self.muted || self.sfx_volume <= 0.0 {
            return;
        }
        let Some(ctx) = &self.ctx else { return };
        self.resume(ctx);

        let (freq, wave) = cue.tone();
        let Some((osc, gain)) = self.create_osc(ctx, freq, wave.into()) else {
            return;
        };
        let t = ctx.current_time();
        gain.gain().set_value(self.sfx_volume);
        osc.start().ok();
        osc.stop_with_when(t + BEEP_SECONDS).ok();
    }

    fn start_music(&mut self) {
        if self.muted {
            return;
        }
        // Restart from the top rather than layering a second loop
        self.stop_music();
        let Some(ctx) = &self.ctx else { return };
        self.resume(ctx);

        match self.create_music(ctx) {
            Some(source) => {
                source.start().ok();
                self.music = Some(source);
            }
            None => log::warn!("Failed to build music buffer"),
        }
    }

    fn stop_music(&mut self) {
        if let Some(source) = self.music.take() {
            source.stop().ok();
        }
    }
}
