use feedback_core::Clock;
use futures::future::LocalBoxFuture;
use instant::Instant;
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

fn timeout_ms(delay: Duration) -> i32 {
    delay.as_millis().min(i32::MAX as u128) as i32
}

/// Clears its `setTimeout` if the sleep is dropped before firing.
struct PendingTimeout(Option<i32>);

impl Drop for PendingTimeout {
    fn drop(&mut self) {
        if let (Some(handle), Some(window)) = (self.0.take(), web::window()) {
            window.clear_timeout_with_handle(handle);
        }
    }
}

/// `performance.now()`-backed clock with `setTimeout` timers.
pub struct WebClock {
    origin: Instant,
}

impl WebClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for WebClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn sleep(&self, delay: Duration) -> LocalBoxFuture<'static, ()> {
        let ms = timeout_ms(delay);
        let mut handle = None;
        let promise = js_sys::Promise::new(&mut |resolve, _reject| {
            handle = web::window().and_then(|w| {
                w.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
                    .ok()
            });
            if handle.is_none() {
                _ = resolve.call0(&JsValue::NULL);
            }
        });
        let mut pending = PendingTimeout(handle);
        Box::pin(async move {
            _ = JsFuture::from(promise).await;
            pending.0 = None;
        })
    }

    fn defer(&self, delay: Duration, callback: Box<dyn FnOnce()>) {
        let Some(window) = web::window() else {
            log::warn!("[timers] no window, running deferred callback now");
            callback();
            return;
        };
        let js = Closure::once_into_js(move || callback());
        if let Err(e) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            js.unchecked_ref(),
            timeout_ms(delay),
        ) {
            log::error!("[timers] setTimeout failed: {:?}", e);
        }
    }
}
