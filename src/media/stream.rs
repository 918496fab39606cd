//! Scoped ownership of acquired capture tracks.

use crate::platform;

use super::MediaKind;

/// Tracks received from a single [getUserMedia()][1] request.
///
/// All the tracks are stopped once this [`LocalStream`] is released or
/// dropped, so a device handle never outlives its owner.
///
/// [1]: https://w3.org/TR/mediacapture-streams#dom-mediadevices-getusermedia
#[derive(Debug)]
pub struct LocalStream<T: platform::MediaStreamTrack> {
    tracks: Vec<T>,
}

impl<T: platform::MediaStreamTrack> LocalStream<T> {
    /// Takes ownership over the given tracks.
    #[inline]
    #[must_use]
    pub fn new(tracks: Vec<T>) -> Self {
        Self { tracks }
    }

    /// Returns all the tracks of this [`LocalStream`].
    #[inline]
    #[must_use]
    pub fn tracks(&self) -> &[T] {
        &self.tracks
    }

    /// Returns the first track of the given [`MediaKind`].
    #[must_use]
    pub fn first(&self, kind: MediaKind) -> Option<&T> {
        self.tracks.iter().find(|track| track.kind() == kind)
    }

    /// Stops all the tracks of this [`LocalStream`].
    #[inline]
    pub fn release(self) {
        drop(self);
    }
}

impl<T: platform::MediaStreamTrack> Drop for LocalStream<T> {
    fn drop(&mut self) {
        for track in &self.tracks {
            track.stop();
        }
    }
}
