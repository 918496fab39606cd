//! Capture device selection and capability probing for browsers.
//!
//! On the first run a [`Session`] asks the user for a camera and a microphone,
//! probes which resolution and frame rate combinations the granted devices
//! accept, and persists the result. Subsequent runs restore the persisted
//! settings and go straight to acquiring the stream.

#![allow(clippy::module_name_repetitions)]
#![cfg_attr(not(feature = "mockable"), warn(missing_docs))]
#![cfg_attr(feature = "mockable", allow(missing_docs))]

pub mod api;
pub mod conf;
pub mod media;
pub mod platform;
pub mod session;
pub mod settings;
pub mod utils;

#[doc(inline)]
pub use self::{
    conf::Conf,
    media::{
        CandidateSet, CapabilityProber, ConstraintCandidate,
        DeviceIdentifierPair, MediaKind, MediaStreamSettings, Resolution,
        SupportedConstraints,
    },
    session::{Session, SessionError},
    settings::{SettingsBlob, SettingsError, SettingsStore},
};
