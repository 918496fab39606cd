//! [MediaDevices][1] of a browser.
//!
//! [1]: https://w3.org/TR/mediacapture-streams#mediadevices

use async_trait::async_trait;
use tracerr::Traced;
use wasm_bindgen::JsCast as _;
use wasm_bindgen_futures::JsFuture;

use crate::{
    media::MediaStreamSettings,
    platform::{self, Error},
};

use super::{window, MediaStreamTrack};

/// [`platform::MediaDevices`] backed by `navigator.mediaDevices`.
#[derive(Clone, Copy, Debug, Default)]
pub struct WebMediaDevices;

#[async_trait(?Send)]
impl platform::MediaDevices for WebMediaDevices {
    type Track = MediaStreamTrack;

    /// Adapter for a [MediaDevices.getUserMedia()][1] function.
    ///
    /// Tracks of a kind other than audio or video are stopped and skipped.
    ///
    /// # Errors
    ///
    /// With [`Error`] if [MediaDevices.getUserMedia()][1] returns error or
    /// cannot get [MediaDevices][2].
    ///
    /// [1]: https://tinyurl.com/w3-streams#dom-mediadevices-getusermedia
    /// [2]: https://w3.org/TR/mediacapture-streams#mediadevices
    async fn get_user_media(
        &self,
        caps: MediaStreamSettings,
    ) -> Result<Vec<MediaStreamTrack>, Traced<Error>> {
        let media_devices = window()
            .map_err(tracerr::wrap!())?
            .navigator()
            .media_devices()
            .map_err(Error::from)
            .map_err(tracerr::wrap!())?;

        let stream = JsFuture::from(
            media_devices
                .get_user_media_with_constraints(
                    &web_sys::MediaStreamConstraints::from(caps),
                )
                .map_err(Error::from)
                .map_err(tracerr::wrap!())?,
        )
        .await
        .map(web_sys::MediaStream::from)
        .map_err(Error::from)
        .map_err(tracerr::wrap!())?;

        Ok(stream
            .get_tracks()
            .iter()
            .filter_map(|track| track.dyn_into().ok())
            .filter_map(|track: web_sys::MediaStreamTrack| {
                MediaStreamTrack::new(track.clone()).or_else(|| {
                    track.stop();
                    None
                })
            })
            .collect())
    }
}
