use derive_more::From;
use wasm_bindgen::prelude::*;

use crate::utils;

/// Representation of an error exported to JS side.
///
/// Contains JS side error if it's the cause and trace information.
#[wasm_bindgen]
#[derive(Debug, From)]
pub struct CaptureError(utils::CaptureError);

#[wasm_bindgen]
impl CaptureError {
    /// Returns name of error.
    pub fn name(&self) -> String {
        self.0.name().to_owned()
    }

    /// Returns message of error.
    pub fn message(&self) -> String {
        self.0.message().to_owned()
    }

    /// Returns trace information of error.
    pub fn trace(&self) -> String {
        self.0.trace()
    }

    /// Returns JS side error if it's the cause.
    pub fn source(&self) -> Option<js_sys::Error> {
        self.0.source().and_then(|err| err.sys_cause.clone())
    }
}
