//! Browser implementations of the platform contracts, built on `web-sys`.

mod constraints;
mod local_storage;
mod media_devices;
mod media_track;

use std::sync::Once;

use js_sys::Reflect;
use tracerr::Traced;
use wasm_bindgen::JsValue;
use web_sys::Window;

use super::Error;

pub use self::{
    local_storage::LocalStorage, media_devices::WebMediaDevices,
    media_track::MediaStreamTrack,
};

/// Returns the global [`Window`] object.
///
/// # Errors
///
/// If the code doesn't run in a browsing context (e.g. inside a worker).
pub fn window() -> Result<Window, Traced<Error>> {
    web_sys::window().ok_or_else(|| {
        tracerr::new!(Error::new(
            "NoWindow",
            "Global `window` object is inaccessible",
        ))
    })
}

/// Returns property of JS object by name if its defined.
/// Converts the value with a given predicate.
pub fn get_property_by_name<T, F, U>(
    value: &T,
    name: &str,
    into: F,
) -> Option<U>
where
    T: AsRef<JsValue>,
    F: Fn(JsValue) -> Option<U>,
{
    Reflect::get(value.as_ref(), &JsValue::from_str(name))
        .ok()
        .and_then(into)
}

/// Installs [`wasm_logger`] as the [`log`] backend. Does nothing if called
/// again.
pub fn init_logger() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        wasm_logger::init(wasm_logger::Config::new(log::Level::Debug));
    });
}

/// When the `console_error_panic_hook` feature is enabled, forwards panics to
/// `console.error` with a readable message.
///
/// For more details see
/// <https://github.com/rustwasm/console_error_panic_hook#readme>
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}
