use std::{convert::TryFrom as _, rc::Rc};

use derive_more::{Display, From};
use js_sys::Promise;
use tracerr::Traced;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

use crate::{
    conf::Conf,
    platform::{
        self, init_logger, set_panic_hook, LocalStorage, WebMediaDevices,
    },
    session::Session,
    utils::{JsCaused, JsonParseError},
};

use super::CaptureError;

/// Errors that may occur while constructing a [`CaptureSession`].
#[derive(Clone, Debug, Display, From, PartialEq)]
enum ConstructError {
    /// Provided configuration is not a valid JSON document of options.
    #[display(fmt = "Invalid configuration: {}", _0)]
    #[from(ignore)]
    InvalidConf(JsonParseError),

    /// Durable storage of the page can't be opened.
    #[display(fmt = "Local storage is unavailable: {}", _0)]
    StorageUnavailable(platform::Error),
}

impl JsCaused for ConstructError {
    type Error = platform::Error;

    fn name(&self) -> &'static str {
        match self {
            Self::InvalidConf(_) => "InvalidConf",
            Self::StorageUnavailable(_) => "StorageUnavailable",
        }
    }

    fn js_cause(self) -> Option<Self::Error> {
        match self {
            Self::InvalidConf(_) => None,
            Self::StorageUnavailable(err) => Some(err),
        }
    }
}

/// Capture session of the page: selects the camera and the microphone,
/// probes which exact video modes they support, remembers the result in
/// `localStorage` and opens streams in the chosen mode.
#[wasm_bindgen]
pub struct CaptureSession(Rc<Session<WebMediaDevices, LocalStorage>>);

#[wasm_bindgen]
impl CaptureSession {
    /// Creates a new [`CaptureSession`] with the configuration given as a
    /// JSON document. Missing options fall back to their defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(conf: Option<String>) -> Result<CaptureSession, JsValue> {
        set_panic_hook();
        init_logger();

        let conf = match conf {
            Some(json) => Conf::from_json(&json)
                .map_err(ConstructError::InvalidConf)
                .map_err(|e| tracerr::new!(e))
                .map_err(into_js_error)?,
            None => Conf::default(),
        };
        let storage = LocalStorage::open()
            .map_err(tracerr::map_from_and_wrap!(=> ConstructError))
            .map_err(into_js_error)?;

        Ok(Self(Rc::new(Session::new(WebMediaDevices, storage, &conf))))
    }

    /// Restores the stored settings, or selects devices and probes them if
    /// there are none. Prompts for the capture permission in the latter case.
    pub fn init(&self) -> Promise {
        let session = Rc::clone(&self.0);
        future_to_promise(async move {
            session.init().await.map_err(into_js_error)?;
            Ok(JsValue::UNDEFINED)
        })
    }

    /// Forgets the stored settings, selects devices and probes them again.
    pub fn reset(&self) -> Promise {
        let session = Rc::clone(&self.0);
        future_to_promise(async move {
            session.reset().await.map_err(into_js_error)?;
            Ok(JsValue::UNDEFINED)
        })
    }

    /// Returns labels (`WIDTHxHEIGHT@FPS`) of the supported video modes, in
    /// probing order. Empty until initialized.
    pub fn modes(&self) -> js_sys::Array {
        self.0
            .supported_modes()
            .map(|modes| {
                modes
                    .iter()
                    .map(|mode| JsValue::from_str(&mode.to_string()))
                    .collect()
            })
            .unwrap_or_else(js_sys::Array::new)
    }

    /// Returns index of the video mode of the current stream.
    pub fn selected_mode(&self) -> Option<u32> {
        self.0
            .selected_mode()
            .and_then(|mode| u32::try_from(mode).ok())
    }

    /// Stops the current stream and opens a new one in the video mode with
    /// the given index. Resolves with the new `MediaStream`.
    pub fn start_stream(&self, mode: u32) -> Promise {
        let session = Rc::clone(&self.0);
        future_to_promise(async move {
            let mode = usize::try_from(mode).unwrap_or(usize::MAX);
            session.start_stream(mode).await.map_err(into_js_error)?;
            media_stream(&session)
        })
    }

    /// Returns the current `MediaStream`, if any.
    pub fn stream(&self) -> Result<JsValue, JsValue> {
        media_stream(&self.0)
    }

    /// Stops the current stream, if any.
    pub fn stop_stream(&self) {
        self.0.stop_stream();
    }

    /// Sets the callback invoked with `(index, total, mode, accepted)` after
    /// every probing trial.
    pub fn on_probe_progress(&self, f: js_sys::Function) {
        self.0.on_probe_progress(move |progress| {
            let args = js_sys::Array::new();
            #[allow(clippy::cast_possible_truncation)]
            {
                args.push(&JsValue::from(progress.index as u32));
                args.push(&JsValue::from(progress.total as u32));
            }
            args.push(&JsValue::from_str(&progress.candidate.to_string()));
            args.push(&JsValue::from_bool(progress.accepted));
            if let Err(e) = f.apply(&JsValue::NULL, &args) {
                log::error!("Probe progress callback failed: {:?}", e);
            }
        });
    }
}

/// Builds a `MediaStream` of the tracks of the current stream, or returns
/// `null` if there is none.
fn media_stream(
    session: &Session<WebMediaDevices, LocalStorage>,
) -> Result<JsValue, JsValue> {
    session
        .with_stream(|stream| {
            let media_stream = web_sys::MediaStream::new()?;
            for track in stream.tracks() {
                media_stream.add_track(track.sys_track());
            }
            Ok(media_stream.into())
        })
        .unwrap_or(Ok(JsValue::NULL))
}

/// Converts the given error into the [`CaptureError`] thrown to JS, logging
/// it along the way.
fn into_js_error<E>(err: Traced<E>) -> JsValue
where
    E: JsCaused<Error = platform::Error> + std::fmt::Display,
{
    let err = crate::utils::CaptureError::from(err);
    err.print();
    CaptureError::from(err).into()
}
