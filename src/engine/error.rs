use crate::model::{Minutes, hhmm_from_minutes};

#[derive(Debug)]
pub enum PlanError {
    /// The requested window is inverted or empty.
    InvalidWindow { start: Minutes, end: Minutes },
    /// No seats were supplied to the optimizer.
    NoSeats,
    /// No candidate plan reached the coverage threshold.
    NoCoverage { reason: &'static str },
}

impl std::fmt::Display for PlanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlanError::InvalidWindow { start, end } => write!(
                f,
                "invalid window: start {} is not before end {}",
                hhmm_from_minutes(*start),
                hhmm_from_minutes(*end)
            ),
            PlanError::NoSeats => write!(f, "no seats to optimize over"),
            PlanError::NoCoverage { reason } => {
                write!(f, "no covering combination found: {reason}")
            }
        }
    }
}

impl std::error::Error for PlanError {}
