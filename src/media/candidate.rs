//! Candidate video modes and the record of the supported ones.

use std::{fmt, slice};

use serde::{Deserialize, Serialize};

/// Video resolution in pixels.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Resolution {
    /// Width in pixels.
    pub width: u32,

    /// Height in pixels.
    pub height: u32,
}

impl Resolution {
    /// Creates a new [`Resolution`].
    #[inline]
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// One resolution and frame rate combination to probe a device for.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ConstraintCandidate {
    resolution: Resolution,
    frame_rate: u32,
}

impl ConstraintCandidate {
    /// Creates a new [`ConstraintCandidate`].
    #[inline]
    #[must_use]
    pub const fn new(resolution: Resolution, frame_rate: u32) -> Self {
        Self {
            resolution,
            frame_rate,
        }
    }

    /// Returns the exact [`Resolution`] of this [`ConstraintCandidate`].
    #[inline]
    #[must_use]
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Returns the exact frame rate of this [`ConstraintCandidate`].
    #[inline]
    #[must_use]
    pub fn frame_rate(&self) -> u32 {
        self.frame_rate
    }
}

/// Formats as `WIDTHxHEIGHT@FPS`, the label of a video mode.
impl fmt::Display for ConstraintCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.resolution, self.frame_rate)
    }
}

/// Ordered cross-product of candidate resolutions and frame rates.
///
/// Resolution-major, frame-rate-minor: with both input lists ordered from the
/// most to the least demanding value, the most demanding combination comes
/// first.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CandidateSet(Vec<ConstraintCandidate>);

impl CandidateSet {
    /// Builds the cross-product of the given `resolutions` and `frame_rates`.
    #[must_use]
    pub fn new(resolutions: &[Resolution], frame_rates: &[u32]) -> Self {
        Self(
            resolutions
                .iter()
                .flat_map(|&resolution| {
                    frame_rates
                        .iter()
                        .map(move |&rate| {
                            ConstraintCandidate::new(resolution, rate)
                        })
                })
                .collect(),
        )
    }

    /// Returns an iterator over the candidates in trial order.
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, ConstraintCandidate> {
        self.0.iter()
    }

    /// Returns total number of candidates.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Indicates whether there is nothing to probe.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a CandidateSet {
    type Item = &'a ConstraintCandidate;
    type IntoIter = slice::Iter<'a, ConstraintCandidate>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Candidates accepted by a device pair, in the order they were tried.
///
/// Empty when the devices support none of the candidates, which is a valid
/// outcome.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SupportedConstraints(Vec<ConstraintCandidate>);

impl SupportedConstraints {
    /// Appends an accepted candidate.
    #[inline]
    pub(crate) fn push(&mut self, candidate: ConstraintCandidate) {
        self.0.push(candidate);
    }

    /// Returns the candidate at the given position (video mode index).
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<ConstraintCandidate> {
        self.0.get(index).copied()
    }

    /// Returns an iterator over the accepted candidates.
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, ConstraintCandidate> {
        self.0.iter()
    }

    /// Returns number of accepted candidates.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Indicates whether no candidate was accepted.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Checks that every candidate here belongs to the given [`CandidateSet`]
    /// and that they keep its order.
    #[must_use]
    pub fn is_subsequence_of(&self, candidates: &CandidateSet) -> bool {
        let mut all = candidates.iter();
        self.0.iter().all(|c| all.any(|other| other == c))
    }
}

impl From<Vec<ConstraintCandidate>> for SupportedConstraints {
    #[inline]
    fn from(candidates: Vec<ConstraintCandidate>) -> Self {
        Self(candidates)
    }
}

impl<'a> IntoIterator for &'a SupportedConstraints {
    type Item = &'a ConstraintCandidate;
    type IntoIter = slice::Iter<'a, ConstraintCandidate>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod spec {
    use super::*;

    const FULL_HD: Resolution = Resolution::new(1920, 1080);
    const HD: Resolution = Resolution::new(1280, 720);

    #[test]
    fn builds_resolution_major_cross_product() {
        let set = CandidateSet::new(&[FULL_HD, HD], &[60, 30]);

        let labels: Vec<_> = set.iter().map(ToString::to_string).collect();
        assert_eq!(
            labels,
            ["1920x1080@60", "1920x1080@30", "1280x720@60", "1280x720@30"],
        );
    }

    #[test]
    fn empty_input_gives_empty_set() {
        assert!(CandidateSet::new(&[], &[60, 30]).is_empty());
        assert!(CandidateSet::new(&[FULL_HD], &[]).is_empty());
    }

    #[test]
    fn detects_subsequences() {
        let set = CandidateSet::new(&[FULL_HD, HD], &[60, 30]);

        let ordered = SupportedConstraints::from(vec![
            ConstraintCandidate::new(FULL_HD, 30),
            ConstraintCandidate::new(HD, 30),
        ]);
        assert!(ordered.is_subsequence_of(&set));
        assert!(SupportedConstraints::default().is_subsequence_of(&set));

        let reordered = SupportedConstraints::from(vec![
            ConstraintCandidate::new(HD, 30),
            ConstraintCandidate::new(FULL_HD, 30),
        ]);
        assert!(!reordered.is_subsequence_of(&set));

        let foreign = SupportedConstraints::from(vec![
            ConstraintCandidate::new(Resolution::new(640, 480), 30),
        ]);
        assert!(!foreign.is_subsequence_of(&set));

        let duplicated = SupportedConstraints::from(vec![
            ConstraintCandidate::new(HD, 30),
            ConstraintCandidate::new(HD, 30),
        ]);
        assert!(!duplicated.is_subsequence_of(&set));
    }
}
