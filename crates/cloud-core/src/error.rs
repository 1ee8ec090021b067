use thiserror::Error;

use crate::gesture::LANDMARK_COUNT;

/// Reasons a landmark snapshot is rejected. Rejected snapshots are treated as
/// an absent hand, never as a crash.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SampleError {
    #[error("expected {expected} landmarks, got {got}")]
    WrongLandmarkCount { expected: usize, got: usize },
    #[error("landmark {index} has a non-finite coordinate")]
    NonFinite { index: usize },
}

impl SampleError {
    pub(crate) fn wrong_count(got: usize) -> Self {
        Self::WrongLandmarkCount {
            expected: LANDMARK_COUNT,
            got,
        }
    }
}

/// Errors from parsing UI control values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown pattern `{0}`")]
    UnknownPattern(String),
    #[error("invalid color `{0}`, expected #rrggbb")]
    InvalidColor(String),
}
