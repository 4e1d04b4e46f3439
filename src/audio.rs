//! Browser audio: spoken announcements and feedback chimes
//!
//! Announcements go through the Web Speech API; the short correct/wrong
//! chimes are procedurally generated Web Audio oscillators, no sound files.
//! Everything is fire-and-forget.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType, SpeechSynthesisUtterance};

use crate::announce::Announcer;
use crate::sim::GameEvent;

/// Speaks lines through `window.speechSynthesis`. New problem lines cancel
/// whatever is still being read; result lines queue behind it.
#[derive(Debug, Default)]
pub struct SpeechAnnouncer;

impl Announcer for SpeechAnnouncer {
    fn say(&mut self, line: &str) {
        let Some(window) = web_sys::window() else { return };
        let Ok(synth) = window.speech_synthesis() else {
            return;
        };
        let Ok(utterance) = SpeechSynthesisUtterance::new_with_text(line) else {
            return;
        };
        synth.cancel();
        synth.speak(&utterance);
    }
}

/// Procedural chime player for hit feedback
pub struct ChimePlayer {
    ctx: Option<AudioContext>,
    volume: f32,
}

impl ChimePlayer {
    pub fn new(volume: f32) -> Self {
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("failed to create AudioContext - chimes disabled");
        }
        Self {
            ctx,
            volume: volume.clamp(0.0, 1.0),
        }
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    /// Play the chime for an event, if it has one
    pub fn play(&self, event: &GameEvent) {
        if self.volume <= 0.0 {
            return;
        }
        let Some(ctx) = &self.ctx else { return };

        // Browsers suspend the context until a user gesture
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match event {
            GameEvent::AnnounceCorrect { .. } => self.play_correct(ctx),
            GameEvent::AnnounceWrong => self.play_wrong(ctx),
            _ => {}
        }
    }

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

    /// Correct - two-note rising chime
    fn play_correct(&self, ctx: &AudioContext) {
        let t = ctx.current_time();
        for (i, freq) in [523.25f32, 659.25].iter().enumerate() {
            let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) else {
                return;
            };
            let start = t + i as f64 * 0.12;
            gain.gain().set_value_at_time(self.volume * 0.4, start).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, start + 0.25)
                .ok();
            osc.start_with_when(start).ok();
            osc.stop_with_when(start + 0.3).ok();
        }
    }

    /// Wrong - low falling buzz
    fn play_wrong(&self, ctx: &AudioContext) {
        let Some((osc, gain)) = self.create_osc(ctx, 220.0, OscillatorType::Sawtooth) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(self.volume * 0.3, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.3)
            .ok();
        osc.frequency().set_value_at_time(220.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(110.0, t + 0.3)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.35).ok();
    }
}
