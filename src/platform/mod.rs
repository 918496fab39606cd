//! Contracts of the external collaborators this crate talks to, and their
//! browser implementations.
//!
//! The capture-device API and the durable key-value substrate are consumed
//! through the [`MediaDevices`], [`MediaStreamTrack`] and [`KeyValueStorage`]
//! traits only, so the core logic never touches `web-sys` directly.

mod error;
#[cfg(any(test, feature = "mockable"))]
pub mod mock;
#[cfg(target_arch = "wasm32")]
mod wasm;

use std::rc::Rc;

use async_trait::async_trait;
use tracerr::Traced;

use crate::media::{MediaKind, MediaStreamSettings};

#[doc(inline)]
pub use self::error::Error;

#[cfg(target_arch = "wasm32")]
#[doc(inline)]
pub use self::wasm::{
    get_property_by_name, init_logger, set_panic_hook, window, LocalStorage,
    MediaStreamTrack as WebMediaStreamTrack, WebMediaDevices,
};

/// Capture-device API, the [MediaDevices][1] interface of a user agent.
///
/// [1]: https://w3.org/TR/mediacapture-streams#mediadevices
#[async_trait(?Send)]
pub trait MediaDevices {
    /// Track type produced by this [`MediaDevices`].
    type Track: MediaStreamTrack;

    /// Prompts a user for a permission to use a media input which produces
    /// tracks satisfying the provided [`MediaStreamSettings`].
    ///
    /// Adapter for a [MediaDevices.getUserMedia()][1] function.
    ///
    /// # Errors
    ///
    /// With [`Error`] if the request is refused by the user or the platform,
    /// or the constraints can't be satisfied.
    ///
    /// [1]: https://tinyurl.com/w3-streams#dom-mediadevices-getusermedia
    async fn get_user_media(
        &self,
        caps: MediaStreamSettings,
    ) -> Result<Vec<Self::Track>, Traced<Error>>;
}

/// Single live capture track, the [MediaStreamTrack][1] interface.
///
/// [1]: https://w3.org/TR/mediacapture-streams/#mediastreamtrack
pub trait MediaStreamTrack {
    /// Returns this track's kind (audio/video).
    fn kind(&self) -> MediaKind;

    /// Returns [`deviceId`][1] of the device this track is sourced from.
    ///
    /// [1]: https://tinyurl.com/w3-streams/#dom-mediatracksettings-deviceid
    fn device_id(&self) -> Option<String>;

    /// Stops this track, releasing the underlying device handle.
    fn stop(&self);
}

/// Durable string storage, the [Storage][1] interface.
///
/// [1]: https://html.spec.whatwg.org/multipage/webstorage.html#storage-2
#[cfg_attr(any(test, feature = "mockable"), mockall::automock)]
pub trait KeyValueStorage {
    /// Returns the value stored under the given `key`, if any.
    ///
    /// # Errors
    ///
    /// If the storage can't be accessed.
    fn get(&self, key: &str) -> Result<Option<String>, Traced<Error>>;

    /// Stores the given `value` under the given `key`, overwriting any
    /// previous value.
    ///
    /// # Errors
    ///
    /// If the storage can't be accessed or its quota is exceeded.
    fn set(&self, key: &str, value: &str) -> Result<(), Traced<Error>>;

    /// Removes the value stored under the given `key`. Does nothing if there
    /// is no such value.
    ///
    /// # Errors
    ///
    /// If the storage can't be accessed.
    fn remove(&self, key: &str) -> Result<(), Traced<Error>>;
}

impl<T: KeyValueStorage> KeyValueStorage for Rc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, Traced<Error>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Traced<Error>> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), Traced<Error>> {
        (**self).remove(key)
    }
}

#[async_trait(?Send)]
impl<T: MediaDevices> MediaDevices for Rc<T> {
    type Track = T::Track;

    async fn get_user_media(
        &self,
        caps: MediaStreamSettings,
    ) -> Result<Vec<Self::Track>, Traced<Error>> {
        (**self).get_user_media(caps).await
    }
}
