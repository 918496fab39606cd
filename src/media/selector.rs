//! Selection of the capture devices to use for the rest of the session.

use derive_more::{Display, From};
use tracerr::Traced;

use crate::{
    platform::{self, MediaDevices, MediaStreamTrack as _},
    utils::JsCaused,
};

use super::{DeviceIdentifierPair, LocalStream, MediaKind, MediaStreamSettings};

/// Errors that may occur while selecting capture devices.
#[derive(Clone, Debug, Display, From, PartialEq)]
pub enum SelectDevicesError {
    /// The user or the platform refused the access to the camera or the
    /// microphone.
    #[display(fmt = "Access to capture devices is denied: {}", _0)]
    DeviceAccessDenied(platform::Error),

    /// Access is granted, but a track of the given kind is missing or doesn't
    /// report its device identifier.
    #[display(fmt = "No {} device found", _0)]
    #[from(ignore)]
    NoDeviceFound(MediaKind),
}

impl JsCaused for SelectDevicesError {
    type Error = platform::Error;

    fn name(&self) -> &'static str {
        match self {
            Self::DeviceAccessDenied(_) => "DeviceAccessDenied",
            Self::NoDeviceFound(_) => "NoDeviceFound",
        }
    }

    fn js_cause(self) -> Option<Self::Error> {
        match self {
            Self::DeviceAccessDenied(err) => Some(err),
            Self::NoDeviceFound(_) => None,
        }
    }
}

/// Asks the platform for any audio and video capture and returns identifiers
/// of the devices actually granted.
///
/// Triggers the permission prompt. The probing stream is released before
/// returning, on the error path as well.
///
/// # Errors
///
/// With [`SelectDevicesError::DeviceAccessDenied`] if the request is refused.
///
/// With [`SelectDevicesError::NoDeviceFound`] if a track of some kind is
/// missing, or reports an absent or empty device identifier.
pub async fn select_devices<D: MediaDevices>(
    devices: &D,
) -> Result<DeviceIdentifierPair, Traced<SelectDevicesError>> {
    let tracks = devices
        .get_user_media(MediaStreamSettings::any())
        .await
        .map_err(tracerr::map_from_and_wrap!())?;
    let stream = LocalStream::new(tracks);

    let audio_device_id = device_id_of(&stream, MediaKind::Audio)?;
    let video_device_id = device_id_of(&stream, MediaKind::Video)?;
    stream.release();

    log::debug!(
        "Selected devices: audio={}, video={}",
        audio_device_id,
        video_device_id,
    );
    Ok(DeviceIdentifierPair::new(audio_device_id, video_device_id))
}

/// Reads the device identifier off the first track of the given `kind`.
fn device_id_of<T: platform::MediaStreamTrack>(
    stream: &LocalStream<T>,
    kind: MediaKind,
) -> Result<String, Traced<SelectDevicesError>> {
    stream
        .first(kind)
        .and_then(|track| track.device_id())
        .filter(|id| !id.is_empty())
        .ok_or_else(|| tracerr::new!(SelectDevicesError::NoDeviceFound(kind)))
}
