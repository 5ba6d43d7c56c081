//! Audio cues using the Web Audio API
//!
//! Procedurally generated - no external files needed. Everything here is
//! best-effort: a missing or suspended AudioContext just means silence.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

/// Audio manager for the shot cue
pub struct AudioManager {
    ctx: Option<AudioContext>,
    enabled: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self { ctx, enabled: true }
    }

    /// Enable/disable all cues (wired to the sound setting)
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Create an oscillator with gain envelope
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

    /// Fire-and-forget shot cue: a short square-wave pitch drop
    pub fn play_shot(&self) {
        if !self.enabled {
            return;
        }
        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require a user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        let Some((osc, gain)) = self.create_osc(ctx, 660.0, OscillatorType::Square) else {
            return;
        };

        let now = ctx.current_time();
        let _ = osc.frequency().exponential_ramp_to_value_at_time(110.0, now + 0.12);
        gain.gain().set_value(0.3);
        let _ = gain.gain().exponential_ramp_to_value_at_time(0.001, now + 0.15);

        let _ = osc.start();
        let _ = osc.stop_with_when(now + 0.15);
    }
}
