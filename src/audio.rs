use crate::constants::{TONE_ATTACK_SEC, TONE_START_OFFSET_SEC, TONE_STOP_PAD_SEC};
use crate::platform::js_error;
use feedback_core::constants::TONE_GAIN;
use feedback_core::{PlatformError, ToneSynth};
use std::cell::RefCell;
use std::time::Duration;
use wasm_bindgen::JsValue;
use web_sys as web;

fn create_gain(audio_ctx: &web::AudioContext, value: f32) -> Result<web::GainNode, PlatformError> {
    match web::GainNode::new(audio_ctx) {
        Ok(g) => {
            g.gain().set_value(value);
            Ok(g)
        }
        Err(e) => {
            log::error!("[tone] GainNode error: {:?}", e);
            Err(PlatformError::Script(js_error(e)))
        }
    }
}

// Schedule one sine blip with a short attack and linear release
fn schedule_tone(
    audio_ctx: &web::AudioContext,
    frequency_hz: f32,
    t0: f64,
    duration_sec: f64,
) -> Result<(), PlatformError> {
    let src = web::OscillatorNode::new(audio_ctx).map_err(|e| PlatformError::Script(js_error(e)))?;
    src.set_type(web::OscillatorType::Sine);
    src.frequency().set_value(frequency_hz);
    let g = create_gain(audio_ctx, 0.0)?;
    let script = |e: JsValue| PlatformError::Script(js_error(e));
    g.gain()
        .linear_ramp_to_value_at_time(TONE_GAIN, t0 + TONE_ATTACK_SEC)
        .map_err(script)?;
    g.gain()
        .linear_ramp_to_value_at_time(0.0, t0 + duration_sec)
        .map_err(script)?;
    src.connect_with_audio_node(&g).map_err(script)?;
    g.connect_with_audio_node(&audio_ctx.destination())
        .map_err(script)?;
    src.start_with_when(t0).map_err(script)?;
    src.stop_with_when(t0 + duration_sec + TONE_STOP_PAD_SEC)
        .map_err(script)?;
    Ok(())
}

/// Web Audio fallback; the context is created on first use so it starts
/// inside a gesture where possible.
pub struct WebToneSynth {
    ctx: RefCell<Option<web::AudioContext>>,
}

impl WebToneSynth {
    pub fn detect(window: &web::Window) -> Option<Self> {
        js_sys::Reflect::has(window, &JsValue::from_str("AudioContext"))
            .unwrap_or(false)
            .then(|| Self {
                ctx: RefCell::new(None),
            })
    }

    fn context(&self) -> Result<web::AudioContext, PlatformError> {
        if let Some(ctx) = self.ctx.borrow().as_ref() {
            if ctx.state() == web::AudioContextState::Suspended {
                _ = ctx.resume();
            }
            return Ok(ctx.clone());
        }
        let ctx = web::AudioContext::new().map_err(|e| PlatformError::Script(js_error(e)))?;
        _ = ctx.resume();
        *self.ctx.borrow_mut() = Some(ctx.clone());
        Ok(ctx)
    }
}

impl ToneSynth for WebToneSynth {
    fn play(&self, frequencies: &[f32], each: Duration) -> Result<(), PlatformError> {
        let ctx = self.context()?;
        if ctx.state() == web::AudioContextState::Closed {
            return Err(PlatformError::Unsupported);
        }
        let each_sec = each.as_secs_f64();
        let start = ctx.current_time() + TONE_START_OFFSET_SEC;
        for (i, f) in frequencies.iter().enumerate() {
            schedule_tone(&ctx, *f, start + i as f64 * each_sec, each_sec)?;
        }
        Ok(())
    }
}
