//! The closed set of record kinds served under `/records/{kind}`.

use service_core::error::AppError;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Patient,
    Restaurant,
    Bank,
}

#[derive(Debug, Error)]
#[error("Invalid record type: {0}")]
pub struct InvalidKind(pub String);

impl RecordKind {
    /// Path segment naming this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Patient => "patient",
            RecordKind::Restaurant => "restaurant",
            RecordKind::Bank => "bank",
        }
    }

    pub fn created_message(&self) -> &'static str {
        match self {
            RecordKind::Patient => "Patient added successfully",
            RecordKind::Restaurant => "Reservation added successfully",
            RecordKind::Bank => "Bank customer added successfully",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = InvalidKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "patient" => Ok(RecordKind::Patient),
            "restaurant" => Ok(RecordKind::Restaurant),
            "bank" => Ok(RecordKind::Bank),
            other => Err(InvalidKind(other.to_string())),
        }
    }
}

impl From<InvalidKind> for AppError {
    fn from(err: InvalidKind) -> Self {
        tracing::debug!(kind = %err.0, "Rejected unknown record kind");
        AppError::NotFound(anyhow::anyhow!("Invalid record type"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [RecordKind; 3] = [RecordKind::Patient, RecordKind::Restaurant, RecordKind::Bank];

    #[test]
    fn test_parse_known_kinds() {
        for kind in ALL {
            assert_eq!(kind.as_str().parse::<RecordKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_parse_rejects_everything_else() {
        for raw in ["patients", "Patient", "banks", "", "doctor", "patient "] {
            assert!(raw.parse::<RecordKind>().is_err(), "{raw:?} should be rejected");
        }
    }

    #[test]
    fn test_invalid_kind_maps_to_not_found() {
        let err = AppError::from(InvalidKind("doctor".to_string()));
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
