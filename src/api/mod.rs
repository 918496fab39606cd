//! External API for the `wasm32-unknown-unknown` target, designed to be used
//! in a web environment with JavaScript.

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
#[doc(inline)]
pub use self::wasm::{CaptureError, CaptureSession};
