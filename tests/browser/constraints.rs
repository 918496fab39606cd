#![cfg(target_arch = "wasm32")]

use capture_probe::{
    ConstraintCandidate, DeviceIdentifierPair, MediaStreamSettings,
    Resolution,
};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;
use web_sys as sys;

use crate::get_path;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn exact_candidate_is_fully_pinned() {
    let pair = DeviceIdentifierPair::new("A1".into(), "V1".into());
    let candidate = ConstraintCandidate::new(Resolution::new(1280, 720), 30);

    let constraints: JsValue = sys::MediaStreamConstraints::from(
        MediaStreamSettings::exact(&pair, candidate),
    )
    .into();

    let exact = |path: &[&str]| get_path(&constraints, path);
    assert_eq!(
        exact(&["video", "width", "exact"]).as_f64(),
        Some(1280.0),
    );
    assert_eq!(exact(&["video", "height", "exact"]).as_f64(), Some(720.0));
    assert_eq!(
        exact(&["video", "frameRate", "exact"]).as_f64(),
        Some(30.0),
    );
    assert_eq!(
        exact(&["video", "deviceId", "exact"]).as_string(),
        Some("V1".into()),
    );
    assert_eq!(
        exact(&["audio", "deviceId", "exact"]).as_string(),
        Some("A1".into()),
    );
    assert_eq!(exact(&["audio", "echoCancellation"]).as_bool(), Some(false));
    assert_eq!(exact(&["audio", "autoGainControl"]).as_bool(), Some(false));
    assert_eq!(exact(&["audio", "noiseSuppression"]).as_bool(), Some(false));
}

#[wasm_bindgen_test]
fn any_requests_both_kinds() {
    let constraints: JsValue =
        sys::MediaStreamConstraints::from(MediaStreamSettings::any()).into();

    assert!(get_path(&constraints, &["audio"]).is_object());
    assert!(get_path(&constraints, &["video"]).is_object());
    assert!(get_path(&constraints, &["video", "width"]).is_undefined());
}

#[wasm_bindgen_test]
fn missing_kind_is_not_requested() {
    let constraints: JsValue =
        sys::MediaStreamConstraints::from(MediaStreamSettings::new()).into();

    assert_eq!(get_path(&constraints, &["audio"]).as_bool(), Some(false));
    assert_eq!(get_path(&constraints, &["video"]).as_bool(), Some(false));
}
