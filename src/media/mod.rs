//! Adapters to [Media Capture and Streams API][1]: device selection and
//! capability probing.
//!
//! [1]: https://w3.org/TR/mediacapture-streams

mod candidate;
mod constraints;
mod prober;
mod selector;
mod stream;

use derive_more::Display;

#[doc(inline)]
pub use self::{
    candidate::{
        CandidateSet, ConstraintCandidate, Resolution, SupportedConstraints,
    },
    constraints::{
        AudioTrackConstraints, DeviceVideoTrackConstraints,
        MediaStreamSettings,
    },
    prober::{CapabilityProber, ConstraintUnsupported, ProbeProgress},
    selector::{select_devices, SelectDevicesError},
    stream::LocalStream,
};

/// [MediaStreamTrack.kind][1] representation.
///
/// [1]: https://w3.org/TR/mediacapture-streams/#dom-mediastreamtrack-kind
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum MediaKind {
    /// Audio track.
    #[display(fmt = "audio")]
    Audio,

    /// Video track.
    #[display(fmt = "video")]
    Video,
}

/// Concrete devices granted to the user for the rest of the session: exactly
/// one audio input and one video input.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DeviceIdentifierPair {
    audio_device_id: String,
    video_device_id: String,
}

impl DeviceIdentifierPair {
    /// Creates a new [`DeviceIdentifierPair`].
    #[inline]
    #[must_use]
    pub fn new(audio_device_id: String, video_device_id: String) -> Self {
        Self {
            audio_device_id,
            video_device_id,
        }
    }

    /// Returns identifier of the selected audio input.
    #[inline]
    #[must_use]
    pub fn audio_device_id(&self) -> &str {
        &self.audio_device_id
    }

    /// Returns identifier of the selected video input.
    #[inline]
    #[must_use]
    pub fn video_device_id(&self) -> &str {
        &self.video_device_id
    }
}
