use std::fmt;

use crate::domain::request::Record;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    InvalidUrl { input: String, reason: String },
    MissingFields { fields: Vec<&'static str> },
    NonFinite { field: String },
    Rejected { message: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::InvalidUrl { input, reason } => write!(f, "invalid URL {input:?}: {reason}"),
            Self::MissingFields { fields } => {
                write!(f, "missing required fields: {}", fields.join(", "))
            }
            Self::NonFinite { field } => write!(f, "{field} must be a finite number"),
            Self::Rejected { message } => f.write_str(message),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Check that every name in `required` is present in `payload`.
///
/// Presence is all that is checked; a key mapped to `null` counts as present.
/// The error lists every missing field in the order given.
pub fn require_fields(payload: &Record, required: &[&'static str]) -> Result<(), ValidationError> {
    let missing = required
        .iter()
        .copied()
        .filter(|field| !payload.contains_key(*field))
        .collect::<Vec<_>>();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::MissingFields { fields: missing })
    }
}
