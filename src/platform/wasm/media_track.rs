//! [MediaStreamTrack][1] of a browser.
//!
//! [1]: https://w3.org/TR/mediacapture-streams/#mediastreamtrack

use derive_more::AsRef;

use crate::{media::MediaKind, platform};

use super::get_property_by_name;

/// Wrapper around [MediaStreamTrack][1] received from a
/// [getUserMedia()][2] request.
///
/// [1]: https://w3.org/TR/mediacapture-streams/#mediastreamtrack
/// [2]: https://w3.org/TR/mediacapture-streams/#dom-mediadevices-getusermedia
#[derive(AsRef, Clone, Debug)]
pub struct MediaStreamTrack {
    #[as_ref]
    sys_track: web_sys::MediaStreamTrack,
    kind: MediaKind,
}

impl MediaStreamTrack {
    /// Wraps the given [`web_sys::MediaStreamTrack`].
    ///
    /// Returns [`None`] if its kind is neither `audio` nor `video`.
    #[must_use]
    pub fn new(sys_track: web_sys::MediaStreamTrack) -> Option<Self> {
        let kind = match sys_track.kind().as_str() {
            "audio" => MediaKind::Audio,
            "video" => MediaKind::Video,
            _ => return None,
        };
        Some(Self { sys_track, kind })
    }

    /// Returns the underlying [`web_sys::MediaStreamTrack`].
    #[inline]
    #[must_use]
    pub fn sys_track(&self) -> &web_sys::MediaStreamTrack {
        &self.sys_track
    }

    /// Indicates whether the underlying track has ended.
    #[must_use]
    pub fn is_ended(&self) -> bool {
        self.sys_track.ready_state() == web_sys::MediaStreamTrackState::Ended
    }
}

impl platform::MediaStreamTrack for MediaStreamTrack {
    #[inline]
    fn kind(&self) -> MediaKind {
        self.kind
    }

    /// Returns [`deviceId`][1] of the underlying [MediaStreamTrack][2].
    ///
    /// [1]: https://tinyurl.com/w3-streams/#dom-mediatracksettings-deviceid
    /// [2]: https://w3.org/TR/mediacapture-streams/#mediastreamtrack
    fn device_id(&self) -> Option<String> {
        get_property_by_name(&self.sys_track.get_settings(), "deviceId", |v| {
            v.as_string()
        })
    }

    #[inline]
    fn stop(&self) {
        self.sys_track.stop();
    }
}
