//! Conversion of [`MediaStreamSettings`] into browser constraints.

use wasm_bindgen::JsValue;
use web_sys::{
    ConstrainDomStringParameters, ConstrainDoubleRange, MediaTrackConstraints,
};

use crate::media::{
    AudioTrackConstraints, DeviceVideoTrackConstraints, MediaStreamSettings,
};

impl From<MediaStreamSettings> for web_sys::MediaStreamConstraints {
    fn from(settings: MediaStreamSettings) -> Self {
        let (audio, video) = settings.into_parts();
        let mut constraints = Self::new();

        match audio {
            Some(audio) => {
                constraints.audio(&MediaTrackConstraints::from(audio).into());
            }
            None => {
                constraints.audio(&JsValue::FALSE);
            }
        }
        match video {
            Some(video) => {
                constraints.video(&MediaTrackConstraints::from(video).into());
            }
            None => {
                constraints.video(&JsValue::FALSE);
            }
        }

        constraints
    }
}

impl From<AudioTrackConstraints> for MediaTrackConstraints {
    fn from(track_constraints: AudioTrackConstraints) -> Self {
        let mut constraints = Self::new();

        if let Some(device_id) = track_constraints.get_device_id() {
            constraints.device_id(&exact_string(device_id));
        }
        if let Some(enabled) = track_constraints.get_echo_cancellation() {
            constraints.echo_cancellation(&JsValue::from_bool(enabled));
        }
        if let Some(enabled) = track_constraints.get_auto_gain_control() {
            constraints.auto_gain_control(&JsValue::from_bool(enabled));
        }
        if let Some(enabled) = track_constraints.get_noise_suppression() {
            constraints.noise_suppression(&JsValue::from_bool(enabled));
        }

        constraints
    }
}

impl From<DeviceVideoTrackConstraints> for MediaTrackConstraints {
    fn from(track_constraints: DeviceVideoTrackConstraints) -> Self {
        let mut constraints = Self::new();

        if let Some(device_id) = track_constraints.get_device_id() {
            constraints.device_id(&exact_string(device_id));
        }
        if let Some(width) = track_constraints.get_width() {
            constraints.width(&exact_u32(width));
        }
        if let Some(height) = track_constraints.get_height() {
            constraints.height(&exact_u32(height));
        }
        if let Some(frame_rate) = track_constraints.get_frame_rate() {
            constraints.frame_rate(&exact_u32(frame_rate));
        }

        constraints
    }
}

/// Builds `{exact: val}` numeric constraint.
fn exact_u32(val: u32) -> ConstrainDoubleRange {
    let mut constraint = ConstrainDoubleRange::new();
    constraint.exact(f64::from(val));
    constraint
}

/// Builds `{exact: val}` string constraint.
fn exact_string(val: &str) -> ConstrainDomStringParameters {
    let mut constraint = ConstrainDomStringParameters::new();
    constraint.exact(&JsValue::from_str(val));
    constraint
}
