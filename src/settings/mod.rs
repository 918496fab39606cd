//! Persisted device selection and its supported video modes.

mod store;

use std::convert::TryFrom;

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::media::{
    ConstraintCandidate, DeviceIdentifierPair, Resolution,
    SupportedConstraints,
};

#[doc(inline)]
pub use self::store::{SettingsError, SettingsStore};

/// Selected devices along with the video modes they support.
///
/// Stored as a single JSON document holding full [MediaStreamConstraints][1]
/// for every supported mode, so each entry can be handed to
/// [getUserMedia()][2] as is.
///
/// [1]: https://w3.org/TR/mediacapture-streams/#dom-mediastreamconstraints
/// [2]: https://w3.org/TR/mediacapture-streams#dom-mediadevices-getusermedia
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(into = "RawSettings", try_from = "RawSettings")]
pub struct SettingsBlob {
    devices: DeviceIdentifierPair,
    supported: SupportedConstraints,
}

impl SettingsBlob {
    /// Creates a new [`SettingsBlob`].
    #[inline]
    #[must_use]
    pub fn new(
        devices: DeviceIdentifierPair,
        supported: SupportedConstraints,
    ) -> Self {
        Self { devices, supported }
    }

    /// Returns the selected devices.
    #[inline]
    #[must_use]
    pub fn devices(&self) -> &DeviceIdentifierPair {
        &self.devices
    }

    /// Returns the video modes supported by the selected devices.
    #[inline]
    #[must_use]
    pub fn supported(&self) -> &SupportedConstraints {
        &self.supported
    }
}

/// Reasons a stored document doesn't describe a [`SettingsBlob`].
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum InvalidSettings {
    /// Device identifier of the given kind is empty.
    #[display(fmt = "empty {} device identifier", _0)]
    EmptyDeviceId(&'static str),
}

/// Wire representation of a [`SettingsBlob`].
#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct RawSettings {
    audio_device_id: String,
    video_device_id: String,
    supported_constraints: Vec<RawStreamConstraints>,
}

/// Wire representation of [MediaStreamConstraints][1] of a supported mode.
///
/// [1]: https://w3.org/TR/mediacapture-streams/#dom-mediastreamconstraints
#[derive(Deserialize, Serialize)]
struct RawStreamConstraints {
    video: RawVideoConstraints,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    audio: Option<RawAudioConstraints>,
}

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct RawVideoConstraints {
    width: Exact<u32>,
    height: Exact<u32>,
    frame_rate: Exact<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    device_id: Option<Exact<String>>,
}

#[derive(Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
struct RawAudioConstraints {
    echo_cancellation: bool,
    auto_gain_control: bool,
    noise_suppression: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    device_id: Option<Exact<String>>,
}

/// `{"exact": value}` constraint.
#[derive(Deserialize, Serialize)]
struct Exact<T> {
    exact: T,
}

impl From<SettingsBlob> for RawSettings {
    fn from(blob: SettingsBlob) -> Self {
        let SettingsBlob { devices, supported } = blob;
        let supported_constraints = supported
            .iter()
            .map(|candidate| RawStreamConstraints {
                video: RawVideoConstraints {
                    width: Exact {
                        exact: candidate.resolution().width,
                    },
                    height: Exact {
                        exact: candidate.resolution().height,
                    },
                    frame_rate: Exact {
                        exact: candidate.frame_rate(),
                    },
                    device_id: Some(Exact {
                        exact: devices.video_device_id().to_owned(),
                    }),
                },
                audio: Some(RawAudioConstraints {
                    device_id: Some(Exact {
                        exact: devices.audio_device_id().to_owned(),
                    }),
                    ..RawAudioConstraints::default()
                }),
            })
            .collect();

        Self {
            audio_device_id: devices.audio_device_id().to_owned(),
            video_device_id: devices.video_device_id().to_owned(),
            supported_constraints,
        }
    }
}

impl TryFrom<RawSettings> for SettingsBlob {
    type Error = InvalidSettings;

    fn try_from(raw: RawSettings) -> Result<Self, Self::Error> {
        if raw.audio_device_id.is_empty() {
            return Err(InvalidSettings::EmptyDeviceId("audio"));
        }
        if raw.video_device_id.is_empty() {
            return Err(InvalidSettings::EmptyDeviceId("video"));
        }

        let supported: Vec<_> = raw
            .supported_constraints
            .into_iter()
            .map(|c| {
                ConstraintCandidate::new(
                    Resolution::new(c.video.width.exact, c.video.height.exact),
                    c.video.frame_rate.exact,
                )
            })
            .collect();

        Ok(Self::new(
            DeviceIdentifierPair::new(raw.audio_device_id, raw.video_device_id),
            supported.into(),
        ))
    }
}
