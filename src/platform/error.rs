//! More convenient wrapper for errors returned by the platform.

use std::borrow::Cow;

use derive_more::Display;

/// Wrapper for a JS value returned from the JS side as an error.
#[derive(Clone, Debug, Display)]
#[display(fmt = "{}: {}", name, message)]
pub struct Error {
    /// Name of JS error.
    pub name: Cow<'static, str>,

    /// Message of JS error.
    pub message: Cow<'static, str>,

    /// Original JS error.
    #[cfg(target_arch = "wasm32")]
    pub sys_cause: Option<js_sys::Error>,
}

impl Error {
    /// Creates a new [`Error`] with the provided `name` and `message` and no
    /// underlying JS error.
    #[must_use]
    pub fn new<N, M>(name: N, message: M) -> Self
    where
        N: Into<Cow<'static, str>>,
        M: Into<Cow<'static, str>>,
    {
        Self {
            name: name.into(),
            message: message.into(),
            #[cfg(target_arch = "wasm32")]
            sys_cause: None,
        }
    }
}

impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.message == other.message
    }
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for Error {
    fn from(val: wasm_bindgen::JsValue) -> Self {
        use wasm_bindgen::JsCast as _;

        match val.dyn_into::<js_sys::Error>() {
            Ok(err) => Self {
                name: Cow::Owned(err.name().into()),
                message: Cow::Owned(err.message().into()),
                sys_cause: Some(err),
            },
            Err(val) => match val.as_string() {
                Some(reason) => Self::new("Unknown JS error", reason),
                None => Self::new("Unknown JS error", format!("{:?}", val)),
            },
        }
    }
}
