//! Provides configuration options.
//!
//! Configuration is a JSON document, every missing option falls back to its
//! default value.

pub mod probe;
pub mod storage;

use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;

use crate::utils::JsonParseError;

#[doc(inline)]
pub use self::{probe::Probe, storage::Storage};

/// All the configuration options.
#[derive(Clone, Debug, Deserialize, Serialize, SmartDefault)]
#[serde(default)]
pub struct Conf {
    /// Candidate video modes to probe devices for.
    pub probe: Probe,

    /// Durable storage of the probed settings.
    pub storage: Storage,
}

impl Conf {
    /// Parses [`Conf`] from the given JSON document, applying default values
    /// for the missing options.
    ///
    /// # Errors
    ///
    /// If the document is not valid JSON or has options of a wrong type.
    pub fn from_json(json: &str) -> Result<Self, JsonParseError> {
        serde_json::from_str(json).map_err(JsonParseError::from)
    }
}

#[cfg(test)]
mod spec {
    use crate::media::Resolution;

    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let conf = Conf::from_json("{}").unwrap();
        let defaults = Conf::default();

        assert_eq!(conf.probe.resolutions, defaults.probe.resolutions);
        assert_eq!(conf.probe.frame_rates, defaults.probe.frame_rates);
        assert_eq!(conf.storage.key, "settings");
    }

    #[test]
    fn document_overrides_defaults() {
        let conf = Conf::from_json(
            r#"{
                "probe": {
                    "resolutions": [{"width": 1280, "height": 720}],
                    "frame_rates": [30]
                },
                "storage": {"key": "camera"}
            }"#,
        )
        .unwrap();

        assert_eq!(conf.probe.resolutions, [Resolution::new(1280, 720)]);
        assert_eq!(conf.probe.frame_rates, [30]);
        assert_eq!(conf.storage.key, "camera");
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let conf =
            Conf::from_json(r#"{"probe": {"frame_rates": [15]}}"#).unwrap();

        assert_eq!(conf.probe.frame_rates, [15]);
        assert_eq!(conf.probe.resolutions, Probe::default().resolutions);
    }

    #[test]
    fn rejects_wrong_types() {
        assert!(Conf::from_json(r#"{"probe": {"frame_rates": "fast"}}"#)
            .is_err());
        assert!(Conf::from_json("not json").is_err());
    }
}
