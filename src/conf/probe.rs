//! Capability probing settings.

use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;

use crate::media::{CandidateSet, Resolution};

/// Candidate video modes to probe devices for.
///
/// Both lists are expected to be ordered from the most to the least
/// demanding value.
#[derive(Clone, Debug, Deserialize, Serialize, SmartDefault)]
#[serde(default)]
pub struct Probe {
    /// Exact resolutions to try. Defaults to `1920x1080`, `1280x720`,
    /// `640x480`.
    #[default(vec![
        Resolution::new(1920, 1080),
        Resolution::new(1280, 720),
        Resolution::new(640, 480),
    ])]
    pub resolutions: Vec<Resolution>,

    /// Exact frame rates to try with each resolution. Defaults to `60`, `30`,
    /// `25`.
    #[default(vec![60, 30, 25])]
    pub frame_rates: Vec<u32>,
}

impl Probe {
    /// Returns the cross-product of the configured resolutions and frame
    /// rates.
    #[inline]
    #[must_use]
    pub fn candidates(&self) -> CandidateSet {
        CandidateSet::new(&self.resolutions, &self.frame_rates)
    }
}
