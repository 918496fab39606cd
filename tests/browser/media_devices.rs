#![cfg(target_arch = "wasm32")]

use capture_probe::{
    media::{select_devices, MediaKind},
    platform::{MediaDevices as _, MediaStreamTrack as _, WebMediaDevices},
    MediaStreamSettings,
};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
async fn gets_audio_and_video_tracks() {
    let tracks = WebMediaDevices
        .get_user_media(MediaStreamSettings::any())
        .await
        .unwrap();

    assert_eq!(tracks.len(), 2);
    assert!(tracks.iter().any(|t| t.kind() == MediaKind::Audio));
    assert!(tracks.iter().any(|t| t.kind() == MediaKind::Video));
    for track in &tracks {
        assert!(track.device_id().is_some());
        track.stop();
        assert!(track.is_ended());
    }
}

#[wasm_bindgen_test]
async fn selects_granted_devices() {
    let pair = select_devices(&WebMediaDevices).await.unwrap();

    assert!(!pair.audio_device_id().is_empty());
    assert!(!pair.video_device_id().is_empty());
}
