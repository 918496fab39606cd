//! Media tracks and streams constraints.

use super::{ConstraintCandidate, DeviceIdentifierPair, Resolution};

/// Constraints applicable to audio tracks.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AudioTrackConstraints {
    /// Exact identifier of the device generating the content for the media
    /// track.
    device_id: Option<String>,

    /// [echoCancellation][1] toggle.
    ///
    /// [1]: https://w3.org/TR/mediacapture-streams/#dfn-echocancellation
    echo_cancellation: Option<bool>,

    /// [autoGainControl][1] toggle.
    ///
    /// [1]: https://w3.org/TR/mediacapture-streams/#dfn-autogaincontrol
    auto_gain_control: Option<bool>,

    /// [noiseSuppression][1] toggle.
    ///
    /// [1]: https://w3.org/TR/mediacapture-streams/#dfn-noisesuppression
    noise_suppression: Option<bool>,
}

impl AudioTrackConstraints {
    /// Creates new [`AudioTrackConstraints`] with none constraints configured.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets exact [deviceId][1] constraint.
    ///
    /// [1]: https://w3.org/TR/mediacapture-streams/#def-constraint-deviceId
    pub fn device_id(&mut self, device_id: String) -> &mut Self {
        self.device_id = Some(device_id);
        self
    }

    /// Turns echo cancellation, automatic gain control and noise suppression
    /// off, so the device delivers its raw capture.
    pub fn raw_processing(&mut self) -> &mut Self {
        self.echo_cancellation = Some(false);
        self.auto_gain_control = Some(false);
        self.noise_suppression = Some(false);
        self
    }

    /// Returns the exact [deviceId][1] constraint.
    ///
    /// [1]: https://w3.org/TR/mediacapture-streams/#def-constraint-deviceId
    #[inline]
    #[must_use]
    pub fn get_device_id(&self) -> Option<&str> {
        self.device_id.as_deref()
    }

    /// Returns the echo cancellation toggle.
    #[inline]
    #[must_use]
    pub fn get_echo_cancellation(&self) -> Option<bool> {
        self.echo_cancellation
    }

    /// Returns the automatic gain control toggle.
    #[inline]
    #[must_use]
    pub fn get_auto_gain_control(&self) -> Option<bool> {
        self.auto_gain_control
    }

    /// Returns the noise suppression toggle.
    #[inline]
    #[must_use]
    pub fn get_noise_suppression(&self) -> Option<bool> {
        self.noise_suppression
    }
}

/// Constraints applicable to video tracks that are sourced from some media
/// device.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DeviceVideoTrackConstraints {
    /// Exact identifier of the device generating the content for the media
    /// track.
    device_id: Option<String>,

    /// Exact width of the video in pixels.
    width: Option<u32>,

    /// Exact height of the video in pixels.
    height: Option<u32>,

    /// Exact frame rate of the video in frames per second.
    frame_rate: Option<u32>,
}

impl DeviceVideoTrackConstraints {
    /// Creates new [`DeviceVideoTrackConstraints`] with none constraints
    /// configured.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets exact [deviceId][1] constraint.
    ///
    /// [1]: https://w3.org/TR/mediacapture-streams/#def-constraint-deviceId
    pub fn device_id(&mut self, device_id: String) -> &mut Self {
        self.device_id = Some(device_id);
        self
    }

    /// Sets exact [width][1] and [height][2] constraints.
    ///
    /// [1]: https://w3.org/TR/mediacapture-streams/#def-constraint-width
    /// [2]: https://w3.org/TR/mediacapture-streams/#def-constraint-height
    pub fn exact_resolution(&mut self, resolution: Resolution) -> &mut Self {
        self.width = Some(resolution.width);
        self.height = Some(resolution.height);
        self
    }

    /// Sets exact [frameRate][1] constraint.
    ///
    /// [1]: https://w3.org/TR/mediacapture-streams/#def-constraint-frameRate
    pub fn exact_frame_rate(&mut self, frame_rate: u32) -> &mut Self {
        self.frame_rate = Some(frame_rate);
        self
    }

    /// Returns the exact [deviceId][1] constraint.
    ///
    /// [1]: https://w3.org/TR/mediacapture-streams/#def-constraint-deviceId
    #[inline]
    #[must_use]
    pub fn get_device_id(&self) -> Option<&str> {
        self.device_id.as_deref()
    }

    /// Returns the exact width constraint.
    #[inline]
    #[must_use]
    pub fn get_width(&self) -> Option<u32> {
        self.width
    }

    /// Returns the exact height constraint.
    #[inline]
    #[must_use]
    pub fn get_height(&self) -> Option<u32> {
        self.height
    }

    /// Returns the exact frame rate constraint.
    #[inline]
    #[must_use]
    pub fn get_frame_rate(&self) -> Option<u32> {
        self.frame_rate
    }
}

/// [MediaStreamConstraints][1] for a single [getUserMedia()][2] request.
///
/// `None` for a media kind means that kind isn't requested at all, while
/// empty track constraints request "any" device of that kind.
///
/// [1]: https://w3.org/TR/mediacapture-streams/#dom-mediastreamconstraints
/// [2]: https://w3.org/TR/mediacapture-streams#dom-mediadevices-getusermedia
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MediaStreamSettings {
    audio: Option<AudioTrackConstraints>,
    video: Option<DeviceVideoTrackConstraints>,
}

impl MediaStreamSettings {
    /// Creates new [`MediaStreamSettings`] requesting nothing.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates new [`MediaStreamSettings`] asking for some audio and some
    /// video, without any further constraints.
    #[must_use]
    pub fn any() -> Self {
        Self {
            audio: Some(AudioTrackConstraints::new()),
            video: Some(DeviceVideoTrackConstraints::new()),
        }
    }

    /// Creates new [`MediaStreamSettings`] pinned to the given devices and
    /// requiring the exact video mode of the given [`ConstraintCandidate`],
    /// with audio processing disabled.
    #[must_use]
    pub fn exact(
        devices: &DeviceIdentifierPair,
        candidate: ConstraintCandidate,
    ) -> Self {
        let mut audio = AudioTrackConstraints::new();
        audio
            .device_id(devices.audio_device_id().to_owned())
            .raw_processing();

        let mut video = DeviceVideoTrackConstraints::new();
        video
            .device_id(devices.video_device_id().to_owned())
            .exact_resolution(candidate.resolution())
            .exact_frame_rate(candidate.frame_rate());

        Self {
            audio: Some(audio),
            video: Some(video),
        }
    }

    /// Returns the audio constraints, if audio is requested.
    #[inline]
    #[must_use]
    pub fn audio(&self) -> Option<&AudioTrackConstraints> {
        self.audio.as_ref()
    }

    /// Returns the video constraints, if video is requested.
    #[inline]
    #[must_use]
    pub fn video(&self) -> Option<&DeviceVideoTrackConstraints> {
        self.video.as_ref()
    }

    /// Returns the video mode these settings pin, if width, height and frame
    /// rate are all constrained.
    #[must_use]
    pub fn video_mode(&self) -> Option<ConstraintCandidate> {
        let video = self.video.as_ref()?;
        Some(ConstraintCandidate::new(
            Resolution::new(video.width?, video.height?),
            video.frame_rate?,
        ))
    }

    /// Consumes these [`MediaStreamSettings`] returning its parts.
    #[inline]
    #[must_use]
    pub fn into_parts(
        self,
    ) -> (Option<AudioTrackConstraints>, Option<DeviceVideoTrackConstraints>)
    {
        (self.audio, self.video)
    }
}
