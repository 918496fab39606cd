use std::{fmt::Display, rc::Rc};

use derive_more::{Display, From};
use tracerr::{Trace, Traced};

use crate::platform;

/// Representation of an error which can be caused by an error returned from
/// the JS side.
pub trait JsCaused {
    /// Type of wrapper for JS error.
    type Error;

    /// Returns name of error.
    fn name(&self) -> &'static str;

    /// Returns JS error if it is the cause.
    fn js_cause(self) -> Option<Self::Error>;
}

/// Representation of an application error handed over to the outer API.
///
/// Contains the JS side error if it's the cause, and trace information.
#[derive(Clone, Debug, Display)]
#[display(fmt = "{}: {}\n{}", name, message, trace)]
pub struct CaptureError {
    name: &'static str,
    message: String,
    trace: Trace,
    source: Option<platform::Error>,
}

impl CaptureError {
    /// Prints error information to the log.
    pub fn print(&self) {
        log::error!("{}", self);
    }

    /// Returns name of error.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns message of error.
    #[inline]
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns trace information of error.
    #[inline]
    #[must_use]
    pub fn trace(&self) -> String {
        self.trace.to_string()
    }

    /// Returns the platform error if it's the cause.
    #[inline]
    #[must_use]
    pub fn source(&self) -> Option<&platform::Error> {
        self.source.as_ref()
    }
}

impl<E> From<(E, Trace)> for CaptureError
where
    E: JsCaused<Error = platform::Error> + Display,
{
    fn from((err, trace): (E, Trace)) -> Self {
        Self {
            name: err.name(),
            message: err.to_string(),
            trace,
            source: err.js_cause(),
        }
    }
}

impl<E> From<Traced<E>> for CaptureError
where
    E: JsCaused<Error = platform::Error> + Display,
{
    #[inline]
    fn from(traced: Traced<E>) -> Self {
        Self::from(traced.into_parts())
    }
}

/// Wrapper for [`serde_json::error::Error`] that provides [`Clone`], [`Debug`],
/// [`Display`] implementations.
#[derive(Clone, Debug, Display, From)]
#[from(forward)]
pub struct JsonParseError(Rc<serde_json::error::Error>);

impl PartialEq for JsonParseError {
    fn eq(&self, other: &Self) -> bool {
        self.0.line() == other.0.line()
            && self.0.column() == other.0.column()
            && self.0.classify() == other.0.classify()
    }
}

#[cfg(test)]
mod spec {
    use derive_more::Display;

    use super::*;

    #[derive(Debug, Display)]
    enum TestError {
        #[display(fmt = "platform failed: {}", _0)]
        Platform(platform::Error),

        #[display(fmt = "nothing to see")]
        Local,
    }

    impl JsCaused for TestError {
        type Error = platform::Error;

        fn name(&self) -> &'static str {
            match self {
                Self::Platform(_) => "Platform",
                Self::Local => "Local",
            }
        }

        fn js_cause(self) -> Option<Self::Error> {
            match self {
                Self::Platform(e) => Some(e),
                Self::Local => None,
            }
        }
    }

    #[test]
    fn keeps_name_message_and_cause() {
        let cause = platform::Error::new("NotAllowedError", "denied");
        let err = CaptureError::from(tracerr::new!(TestError::Platform(
            cause.clone()
        )));

        assert_eq!(err.name(), "Platform");
        assert_eq!(err.message(), "platform failed: NotAllowedError: denied");
        assert_eq!(err.source(), Some(&cause));
        assert!(err.trace().contains("errors.rs"));
    }

    #[test]
    fn has_no_source_for_local_errors() {
        let err = CaptureError::from(tracerr::new!(TestError::Local));

        assert_eq!(err.name(), "Local");
        assert!(err.source().is_none());
    }

    #[test]
    fn json_errors_compare_by_position() {
        let a: JsonParseError =
            serde_json::from_str::<u32>("{").unwrap_err().into();
        let b: JsonParseError =
            serde_json::from_str::<u32>("{").unwrap_err().into();

        assert_eq!(a, b);
    }
}
