use std::error::Error;
use std::fmt::{Display, Formatter};

/// Raised when a point generator could not produce the requested number of points within its
/// attempt budget, which happens when the sparsity requirement rejects too many candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SamplingError {
    AttemptsExhausted { requested: usize, accepted: usize },
}

impl Display for SamplingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl Error for SamplingError {}
