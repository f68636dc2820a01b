use crate::platform::js_error;
use feedback_core::{PlatformError, Playable};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// An `<audio>`/`<video>` element handed to us by a page.
#[derive(Clone)]
pub struct MediaElement(pub web::HtmlMediaElement);

impl Playable for MediaElement {
    fn volume(&self) -> f32 {
        self.0.volume() as f32
    }

    fn set_volume(&self, volume: f32) {
        self.0.set_volume(volume as f64);
    }

    fn is_paused(&self) -> bool {
        self.0.paused()
    }

    fn play(&self) -> Result<(), PlatformError> {
        let promise = self
            .0
            .play()
            .map_err(|e| PlatformError::Script(js_error(e)))?;
        spawn_local(async move {
            // Autoplay policy rejections are expected outside a gesture
            if let Err(e) = JsFuture::from(promise).await {
                log::debug!("[media] play() rejected: {}", js_error(e));
            }
        });
        Ok(())
    }

    fn pause(&self) {
        if let Err(e) = self.0.pause() {
            log::debug!("[media] pause() failed: {}", js_error(e));
        }
    }

    fn rewind(&self) {
        self.0.set_current_time(0.0);
    }

    fn is_same(&self, other: &Self) -> bool {
        js_sys::Object::is(&self.0, &other.0)
    }
}

/// Call `on_play` whenever playback of `element` starts, whoever started it.
pub fn watch_playback(element: &web::HtmlMediaElement, mut on_play: impl FnMut() + 'static) {
    let closure = Closure::wrap(Box::new(move || on_play()) as Box<dyn FnMut()>);
    _ = element.add_event_listener_with_callback("play", closure.as_ref().unchecked_ref());
    closure.forget();
}
