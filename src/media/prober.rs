//! Probing of the video modes supported by the selected devices.

use derive_more::Display;

use crate::{
    platform::{self, MediaDevices},
    utils::JsCaused,
};

use super::{
    CandidateSet, ConstraintCandidate, DeviceIdentifierPair, LocalStream,
    MediaStreamSettings, SupportedConstraints,
};

/// A device pair refused to open a stream in the candidate's exact mode.
///
/// Expected and non-fatal: the candidate is simply left out of the
/// [`SupportedConstraints`].
#[derive(Clone, Debug, Display, PartialEq)]
#[display(fmt = "Device doesn't support {}: {}", candidate, cause)]
pub struct ConstraintUnsupported {
    /// Rejected candidate.
    pub candidate: ConstraintCandidate,

    /// Error the platform rejected the request with.
    pub cause: platform::Error,
}

impl JsCaused for ConstraintUnsupported {
    type Error = platform::Error;

    fn name(&self) -> &'static str {
        "ConstraintUnsupported"
    }

    fn js_cause(self) -> Option<Self::Error> {
        Some(self.cause)
    }
}

/// Outcome of a single trial, reported while probing.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ProbeProgress {
    /// Zero-based position of the tried candidate.
    pub index: usize,

    /// Total number of candidates to try.
    pub total: usize,

    /// Tried candidate.
    pub candidate: ConstraintCandidate,

    /// Whether the devices accepted the candidate.
    pub accepted: bool,
}

/// Determines supported video modes by attempting to open a stream in each
/// candidate mode, instead of reading a declared capability list.
#[derive(Clone, Debug)]
pub struct CapabilityProber {
    candidates: CandidateSet,
}

impl CapabilityProber {
    /// Creates a new [`CapabilityProber`] trying the given candidates.
    #[inline]
    #[must_use]
    pub fn new(candidates: CandidateSet) -> Self {
        Self { candidates }
    }

    /// Returns the candidates this [`CapabilityProber`] tries.
    #[inline]
    #[must_use]
    pub fn candidates(&self) -> &CandidateSet {
        &self.candidates
    }

    /// Tries every candidate on the given device pair.
    ///
    /// Never fails: rejected candidates are logged and left out.
    pub async fn probe<D: MediaDevices>(
        &self,
        devices: &D,
        pair: &DeviceIdentifierPair,
    ) -> SupportedConstraints {
        self.probe_with_progress(devices, pair, |_| ()).await
    }

    /// Same as [`CapabilityProber::probe`], invoking `on_progress` after each
    /// trial.
    ///
    /// Trials run strictly one after another, and each trial's stream is
    /// released before the next one is requested.
    pub async fn probe_with_progress<D, F>(
        &self,
        devices: &D,
        pair: &DeviceIdentifierPair,
        mut on_progress: F,
    ) -> SupportedConstraints
    where
        D: MediaDevices,
        F: FnMut(ProbeProgress),
    {
        let total = self.candidates.len();
        let mut supported = SupportedConstraints::default();

        for (index, &candidate) in self.candidates.iter().enumerate() {
            log::debug!("Probing {} ({}/{})", candidate, index + 1, total);

            let accepted = match devices
                .get_user_media(MediaStreamSettings::exact(pair, candidate))
                .await
            {
                Ok(tracks) => {
                    LocalStream::new(tracks).release();
                    supported.push(candidate);
                    true
                }
                Err(e) => {
                    let err = ConstraintUnsupported {
                        candidate,
                        cause: e.into_inner(),
                    };
                    log::info!("{}", err);
                    false
                }
            };

            on_progress(ProbeProgress {
                index,
                total,
                candidate,
                accepted,
            });
        }

        log::debug!("{} of {} candidates supported", supported.len(), total);
        supported
    }
}
