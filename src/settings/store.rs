//! Durable storage of a [`SettingsBlob`].

use derive_more::{Display, From};
use tracerr::Traced;

use crate::{
    platform::{self, KeyValueStorage},
    utils::{JsCaused, JsonParseError},
};

use super::SettingsBlob;

/// Errors that may occur in a [`SettingsStore`].
#[derive(Clone, Debug, Display, From, PartialEq)]
pub enum SettingsError {
    /// Underlying storage failed to read or write the entry.
    #[display(fmt = "Settings storage failed: {}", _0)]
    Storage(platform::Error),

    /// Stored entry doesn't describe a [`SettingsBlob`].
    #[display(fmt = "Stored settings are corrupt: {}", _0)]
    #[from(ignore)]
    Corrupt(JsonParseError),

    /// [`SettingsBlob`] couldn't be serialized.
    #[display(fmt = "Failed to serialize settings: {}", _0)]
    #[from(ignore)]
    Serialize(JsonParseError),
}

impl JsCaused for SettingsError {
    type Error = platform::Error;

    fn name(&self) -> &'static str {
        match self {
            Self::Storage(_) => "SettingsStorage",
            Self::Corrupt(_) => "SettingsCorrupt",
            Self::Serialize(_) => "SettingsSerialize",
        }
    }

    fn js_cause(self) -> Option<Self::Error> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Corrupt(_) | Self::Serialize(_) => None,
        }
    }
}

type Result<T> = std::result::Result<T, Traced<SettingsError>>;

/// Reads and writes a [`SettingsBlob`] as a single entry of a
/// [`KeyValueStorage`].
#[derive(Debug)]
pub struct SettingsStore<S> {
    storage: S,
    key: String,
}

impl<S: KeyValueStorage> SettingsStore<S> {
    /// Creates a new [`SettingsStore`] keeping its entry under the given
    /// `key` of the given `storage`.
    #[inline]
    #[must_use]
    pub fn new(storage: S, key: String) -> Self {
        Self { storage, key }
    }

    /// Writes the given [`SettingsBlob`], overwriting any existing entry.
    ///
    /// # Errors
    ///
    /// With [`SettingsError::Serialize`] if the blob can't be serialized.
    ///
    /// With [`SettingsError::Storage`] if the storage rejects the write.
    pub fn save(&self, blob: &SettingsBlob) -> Result<()> {
        let json = serde_json::to_string(blob)
            .map_err(JsonParseError::from)
            .map_err(SettingsError::Serialize)
            .map_err(tracerr::wrap!())?;
        self.storage
            .set(&self.key, &json)
            .map_err(tracerr::map_from_and_wrap!())?;
        log::debug!("Settings saved under '{}'", self.key);
        Ok(())
    }

    /// Reads the stored [`SettingsBlob`].
    ///
    /// Returns [`None`] if nothing is stored.
    ///
    /// # Errors
    ///
    /// With [`SettingsError::Corrupt`] if the stored entry can't be parsed.
    ///
    /// With [`SettingsError::Storage`] if the storage can't be read.
    pub fn load(&self) -> Result<Option<SettingsBlob>> {
        let json = match self
            .storage
            .get(&self.key)
            .map_err(tracerr::map_from_and_wrap!())?
        {
            Some(json) => json,
            None => return Ok(None),
        };
        serde_json::from_str(&json)
            .map(Some)
            .map_err(JsonParseError::from)
            .map_err(SettingsError::Corrupt)
            .map_err(tracerr::wrap!())
    }

    /// Removes the stored entry. Does nothing if there is none.
    ///
    /// # Errors
    ///
    /// With [`SettingsError::Storage`] if the storage can't be written.
    pub fn clear(&self) -> Result<()> {
        self.storage
            .remove(&self.key)
            .map_err(tracerr::map_from_and_wrap!())
    }
}

#[cfg(test)]
mod spec {
    use std::rc::Rc;

    use crate::{
        media::{ConstraintCandidate, DeviceIdentifierPair, Resolution},
        platform::{mock::MemoryStorage, MockKeyValueStorage},
    };

    use super::*;

    fn store() -> (Rc<MemoryStorage>, SettingsStore<Rc<MemoryStorage>>) {
        let storage = Rc::new(MemoryStorage::new());
        let store = SettingsStore::new(Rc::clone(&storage), "settings".into());
        (storage, store)
    }

    fn blob(modes: &[(u32, u32, u32)]) -> SettingsBlob {
        SettingsBlob::new(
            DeviceIdentifierPair::new("A1".into(), "V1".into()),
            modes
                .iter()
                .map(|&(w, h, f)| {
                    ConstraintCandidate::new(Resolution::new(w, h), f)
                })
                .collect::<Vec<_>>()
                .into(),
        )
    }

    #[test]
    fn loads_what_was_saved() {
        let (_, store) = store();
        let saved = blob(&[(1920, 1080, 30), (1280, 720, 30)]);

        store.save(&saved).unwrap();

        assert_eq!(store.load().unwrap(), Some(saved));
    }

    #[test]
    fn loads_nothing_when_absent() {
        let (_, store) = store();

        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn loads_nothing_after_clear() {
        let (storage, store) = store();
        store.save(&blob(&[(640, 480, 25)])).unwrap();

        store.clear().unwrap();

        assert_eq!(store.load().unwrap(), None);
        assert_eq!(storage.raw("settings"), None);
    }

    #[test]
    fn clear_without_entry_is_noop() {
        let (_, store) = store();

        store.clear().unwrap();
    }

    #[test]
    fn save_overwrites() {
        let (_, store) = store();
        store.save(&blob(&[(1920, 1080, 60)])).unwrap();

        store.save(&blob(&[(640, 480, 25)])).unwrap();

        assert_eq!(store.load().unwrap(), Some(blob(&[(640, 480, 25)])));
    }

    #[test]
    fn saves_under_configured_key() {
        let storage = Rc::new(MemoryStorage::new());
        let store = SettingsStore::new(Rc::clone(&storage), "probe".into());

        store.save(&blob(&[])).unwrap();

        assert!(storage.raw("probe").is_some());
        assert_eq!(storage.raw("settings"), None);
    }

    #[test]
    fn saves_empty_supported_list() {
        let (_, store) = store();

        store.save(&blob(&[])).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert!(loaded.supported().is_empty());
    }

    #[test]
    fn parses_stored_browser_blob() {
        let (storage, store) = store();
        storage
            .set(
                "settings",
                r#"{
                    "audioDeviceId": "A1",
                    "videoDeviceId": "V1",
                    "supportedConstraints": [{
                        "video": {
                            "width": {"exact": 1280},
                            "height": {"exact": 720},
                            "frameRate": {"exact": 30},
                            "deviceId": {"exact": "V1"}
                        },
                        "audio": {
                            "echoCancellation": false,
                            "autoGainControl": false,
                            "noiseSuppression": false,
                            "deviceId": {"exact": "A1"}
                        }
                    }]
                }"#,
            )
            .unwrap();

        let loaded = store.load().unwrap().unwrap();

        assert_eq!(loaded.supported().len(), 1);
        let mode = loaded.supported().get(0).unwrap();
        assert_eq!(mode.resolution(), Resolution::new(1280, 720));
        assert_eq!(mode.frame_rate(), 30);
    }

    #[test]
    fn max_frame_rate_is_corrupt() {
        let (storage, store) = store();
        storage
            .set(
                "settings",
                r#"{
                    "audioDeviceId": "A1",
                    "videoDeviceId": "V1",
                    "supportedConstraints": [{
                        "video": {
                            "width": {"exact": 1280},
                            "height": {"exact": 720},
                            "frameRate": {"max": 30}
                        }
                    }]
                }"#,
            )
            .unwrap();

        let err = store.load().unwrap_err();

        assert!(matches!(err.as_ref(), SettingsError::Corrupt(_)));
    }

    #[test]
    fn truncated_entry_is_corrupt() {
        let (storage, store) = store();
        storage
            .set("settings", r#"{"audioDeviceId": "A1", "videoDe"#)
            .unwrap();

        let err = store.load().unwrap_err();

        assert!(matches!(err.as_ref(), SettingsError::Corrupt(_)));
        assert_eq!(err.into_inner().name(), "SettingsCorrupt");
    }

    #[test]
    fn storage_failure_is_reported() {
        let mut storage = MockKeyValueStorage::new();
        storage.expect_get().times(1).returning(|_| {
            Err(tracerr::new!(platform::Error::new(
                "SecurityError",
                "The operation is insecure.",
            )))
        });
        let store = SettingsStore::new(storage, "settings".into());

        let err = store.load().unwrap_err().into_inner();

        assert_eq!(err.name(), "SettingsStorage");
        assert_eq!(
            err.js_cause(),
            Some(platform::Error::new(
                "SecurityError",
                "The operation is insecure.",
            )),
        );
    }

    #[test]
    fn quota_failure_is_reported() {
        let mut storage = MockKeyValueStorage::new();
        storage.expect_set().times(1).returning(|_, _| {
            Err(tracerr::new!(platform::Error::new(
                "QuotaExceededError",
                "The quota has been exceeded.",
            )))
        });
        let store = SettingsStore::new(storage, "settings".into());

        let err = store.save(&blob(&[(640, 480, 25)])).unwrap_err();

        assert!(matches!(err.as_ref(), SettingsError::Storage(_)));
    }
}
