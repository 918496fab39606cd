//! In-memory implementations of the platform contracts.
//!
//! Used by unit tests and, with the `mockable` feature, by downstream crates
//! exercising their own [`Session`] wiring without a browser.
//!
//! [`Session`]: crate::Session

use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
    rc::Rc,
};

use async_trait::async_trait;
use tracerr::Traced;

use crate::media::{ConstraintCandidate, MediaKind, MediaStreamSettings};

use super::{Error, KeyValueStorage, MediaDevices, MediaStreamTrack};

/// Shared counters of the tracks produced by a [`FakeMediaDevices`].
#[derive(Debug, Default)]
struct TrackStats {
    /// Number of tracks which are not stopped yet.
    live: Cell<usize>,

    /// Maximum number of simultaneously live tracks ever observed.
    peak: Cell<usize>,
}

/// Track produced by [`FakeMediaDevices`].
#[derive(Debug)]
pub struct FakeTrack {
    kind: MediaKind,
    device_id: Option<String>,
    stopped: Cell<bool>,
    stats: Rc<TrackStats>,
}

impl FakeTrack {
    fn new(
        kind: MediaKind,
        device_id: Option<String>,
        stats: Rc<TrackStats>,
    ) -> Self {
        let live = stats.live.get() + 1;
        stats.live.set(live);
        if live > stats.peak.get() {
            stats.peak.set(live);
        }
        Self {
            kind,
            device_id,
            stopped: Cell::new(false),
            stats,
        }
    }
}

impl MediaStreamTrack for FakeTrack {
    fn kind(&self) -> MediaKind {
        self.kind
    }

    fn device_id(&self) -> Option<String> {
        self.device_id.clone()
    }

    fn stop(&self) {
        if !self.stopped.replace(true) {
            self.stats.live.set(self.stats.live.get() - 1);
        }
    }
}

/// Predicate deciding whether a video mode is accepted by the fake devices.
type ModePredicate = Box<dyn Fn(ConstraintCandidate) -> bool>;

/// [`MediaDevices`] with one fake camera and one fake microphone.
///
/// Requests pinned to other device IDs fail with `OverconstrainedError`,
/// exact video modes are checked against the configured predicate.
pub struct FakeMediaDevices {
    audio_device_id: Option<String>,
    video_device_id: Option<String>,
    denied: bool,
    accepts: ModePredicate,
    requests: RefCell<Vec<MediaStreamSettings>>,
    stats: Rc<TrackStats>,
}

impl FakeMediaDevices {
    /// Creates new [`FakeMediaDevices`] with the given device IDs accepting
    /// every video mode.
    #[must_use]
    pub fn new(audio_device_id: &str, video_device_id: &str) -> Self {
        Self {
            audio_device_id: Some(audio_device_id.to_owned()),
            video_device_id: Some(video_device_id.to_owned()),
            denied: false,
            accepts: Box::new(|_| true),
            requests: RefCell::new(Vec::new()),
            stats: Rc::default(),
        }
    }

    /// Makes every request fail with `NotAllowedError`.
    #[must_use]
    pub fn denied(mut self) -> Self {
        self.denied = true;
        self
    }

    /// Makes the fake video device report no `deviceId`.
    #[must_use]
    pub fn without_video_device_id(mut self) -> Self {
        self.video_device_id = None;
        self
    }

    /// Restricts the accepted exact video modes to the ones matching the
    /// given predicate.
    #[must_use]
    pub fn accepting<F>(mut self, accepts: F) -> Self
    where
        F: Fn(ConstraintCandidate) -> bool + 'static,
    {
        self.accepts = Box::new(accepts);
        self
    }

    /// Returns all the requests received so far, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<MediaStreamSettings> {
        self.requests.borrow().clone()
    }

    /// Returns number of produced tracks which are not stopped yet.
    #[must_use]
    pub fn live_tracks(&self) -> usize {
        self.stats.live.get()
    }

    /// Returns maximum number of simultaneously live tracks ever observed.
    #[must_use]
    pub fn peak_live_tracks(&self) -> usize {
        self.stats.peak.get()
    }

    fn pinned_to_other(requested: Option<&str>, actual: Option<&str>) -> bool {
        requested.map_or(false, |id| Some(id) != actual)
    }
}

#[async_trait(?Send)]
impl MediaDevices for FakeMediaDevices {
    type Track = FakeTrack;

    async fn get_user_media(
        &self,
        caps: MediaStreamSettings,
    ) -> Result<Vec<FakeTrack>, Traced<Error>> {
        self.requests.borrow_mut().push(caps.clone());

        if self.denied {
            return Err(tracerr::new!(Error::new(
                "NotAllowedError",
                "Permission denied",
            )));
        }
        let overconstrained = caps.audio().map_or(false, |audio| {
            Self::pinned_to_other(
                audio.get_device_id(),
                self.audio_device_id.as_deref(),
            )
        }) || caps.video().map_or(false, |video| {
            Self::pinned_to_other(
                video.get_device_id(),
                self.video_device_id.as_deref(),
            )
        });
        if overconstrained {
            return Err(tracerr::new!(Error::new(
                "OverconstrainedError",
                "deviceId",
            )));
        }
        if let Some(mode) = caps.video_mode() {
            if !(self.accepts)(mode) {
                return Err(tracerr::new!(Error::new(
                    "OverconstrainedError",
                    mode.to_string(),
                )));
            }
        }

        let mut tracks = Vec::new();
        if caps.audio().is_some() {
            tracks.push(FakeTrack::new(
                MediaKind::Audio,
                self.audio_device_id.clone(),
                Rc::clone(&self.stats),
            ));
        }
        if caps.video().is_some() {
            tracks.push(FakeTrack::new(
                MediaKind::Video,
                self.video_device_id.clone(),
                Rc::clone(&self.stats),
            ));
        }
        Ok(tracks)
    }
}

/// [`KeyValueStorage`] backed by a [`HashMap`].
#[derive(Debug, Default)]
pub struct MemoryStorage(RefCell<HashMap<String, String>>);

impl MemoryStorage {
    /// Creates a new empty [`MemoryStorage`].
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the raw value stored under the given `key`.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.0.borrow().get(key).cloned()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, Traced<Error>> {
        Ok(self.0.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Traced<Error>> {
        self.0.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), Traced<Error>> {
        self.0.borrow_mut().remove(key);
        Ok(())
    }
}
