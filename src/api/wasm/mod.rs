pub mod capture_error;
pub mod capture_session;

pub use self::{
    capture_error::CaptureError, capture_session::CaptureSession,
};
