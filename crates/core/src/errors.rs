use core::fmt;

use crate::types::Distance;

/// Reasons a Node configuration can be rejected.
///
/// Runtime conditions (missing components, targets out of reach) are never
/// errors - they are ordinary `Status::Failure` signals. These are strictly
/// about designer input that does not make sense.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeConfigError {
    /// The value is outside the range the Node accepts.
    OutOfRange {
        field: &'static str,
        value: Distance,
        min: Distance,
        max: Distance,
    },

    /// NaN or infinite.
    NotFinite {
        field: &'static str,
    },
}

impl fmt::Display for NodeConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { field, value, min, max } => write!(
                f, "{} = {} is outside the allowed range [{}, {}]", field, value, min, max
            ),
            Self::NotFinite { field } => write!(f, "{} must be a finite number", field),
        }
    }
}

impl core::error::Error for NodeConfigError {}
