#![cfg(target_arch = "wasm32")]

use capture_probe::api::CaptureSession;
use wasm_bindgen::{JsCast as _, JsValue};
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;

use crate::clear_local_storage;

wasm_bindgen_test_configure!(run_in_browser);

const CONF: &str = r#"{
    "probe": {
        "resolutions": [{"width": 640, "height": 480}],
        "frame_rates": [30]
    },
    "storage": {"key": "capture-test"}
}"#;

fn stored() -> Option<String> {
    web_sys::window()
        .unwrap()
        .local_storage()
        .unwrap()
        .unwrap()
        .get_item("capture-test")
        .unwrap()
}

#[wasm_bindgen_test]
async fn init_persists_settings() {
    clear_local_storage();
    let session = CaptureSession::new(Some(CONF.into())).unwrap();

    JsFuture::from(session.init()).await.unwrap();

    let stored = stored().unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&stored).unwrap();
    assert!(parsed["audioDeviceId"].is_string());
    assert!(parsed["videoDeviceId"].is_string());
    assert_eq!(
        parsed["supportedConstraints"].as_array().map(Vec::len),
        Some(session.modes().length() as usize),
    );
}

#[wasm_bindgen_test]
async fn starts_and_stops_stream() {
    clear_local_storage();
    let session = CaptureSession::new(Some(CONF.into())).unwrap();
    JsFuture::from(session.init()).await.unwrap();
    if session.modes().length() == 0 {
        return;
    }

    let stream = JsFuture::from(session.start_stream(0)).await.unwrap();

    let stream: web_sys::MediaStream = stream.dyn_into().unwrap();
    assert!(stream.active());
    assert_eq!(session.selected_mode(), Some(0));
    session.stop_stream();
    for track in stream.get_tracks().iter() {
        let track: web_sys::MediaStreamTrack = track.dyn_into().unwrap();
        assert_eq!(track.ready_state(), web_sys::MediaStreamTrackState::Ended);
    }
    assert!(session.stream().unwrap().is_null());
}

#[wasm_bindgen_test]
async fn unknown_mode_is_rejected() {
    clear_local_storage();
    let session = CaptureSession::new(Some(CONF.into())).unwrap();
    JsFuture::from(session.init()).await.unwrap();

    let err = JsFuture::from(session.start_stream(100)).await.unwrap_err();

    assert_eq!(error_name(&err), "ModeOutOfRange");
}

#[wasm_bindgen_test]
fn invalid_conf_is_rejected() {
    let err = CaptureSession::new(Some("{".into())).err().unwrap();

    assert_eq!(error_name(&err), "InvalidConf");
}

#[wasm_bindgen_test]
async fn corrupt_settings_are_replaced() {
    clear_local_storage();
    web_sys::window()
        .unwrap()
        .local_storage()
        .unwrap()
        .unwrap()
        .set_item("capture-test", "garbage")
        .unwrap();
    let session = CaptureSession::new(Some(CONF.into())).unwrap();

    JsFuture::from(session.init()).await.unwrap();

    assert_ne!(stored().as_deref(), Some("garbage"));
}

/// Calls `name()` of a `CaptureError` thrown to JS.
fn error_name(err: &JsValue) -> String {
    let name: js_sys::Function = js_sys::Reflect::get(err, &"name".into())
        .unwrap()
        .dyn_into()
        .unwrap();
    name.call0(err).unwrap().as_string().unwrap()
}
