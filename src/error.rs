use serde::Serialize;
use thiserror::Error;

use crate::models::SoilParameter;

pub type Result<T> = std::result::Result<T, AdvisorError>;

/// Structured failure returned by every engine operation.
///
/// Nothing is computed once one of these is raised; callers surface
/// [`AdvisorError::kind`] and [`AdvisorError::field`] to the user.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AdvisorError {
    #[error("invalid `{field}`: {reason}")]
    Validation { field: String, reason: String },

    #[error("invalid measurement for {parameter}: {reason}")]
    InvalidMeasurement {
        parameter: SoilParameter,
        reason: String,
    },

    #[error("no reference data for {crop}: {detail}")]
    UnsupportedCropOrStage {
        field: String,
        crop: String,
        detail: String,
    },
}

impl AdvisorError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn missing(field: impl Into<String>) -> Self {
        Self::validation(field, "required field is missing")
    }

    pub fn invalid_measurement(parameter: SoilParameter, reason: impl Into<String>) -> Self {
        Self::InvalidMeasurement {
            parameter,
            reason: reason.into(),
        }
    }

    pub fn unsupported(
        field: impl Into<String>,
        crop: impl ToString,
        detail: impl Into<String>,
    ) -> Self {
        Self::UnsupportedCropOrStage {
            field: field.into(),
            crop: crop.to_string(),
            detail: detail.into(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation",
            Self::InvalidMeasurement { .. } => "invalid-measurement",
            Self::UnsupportedCropOrStage { .. } => "unsupported-crop-or-stage",
        }
    }

    /// Name of the offending input field.
    pub fn field(&self) -> String {
        match self {
            Self::Validation { field, .. } => field.clone(),
            Self::InvalidMeasurement { parameter, .. } => parameter.key().to_string(),
            Self::UnsupportedCropOrStage { field, .. } => field.clone(),
        }
    }

    pub fn report(&self) -> ErrorReport {
        ErrorReport {
            kind: self.kind(),
            field: self.field(),
            message: self.to_string(),
        }
    }
}

/// Serializable view of an [`AdvisorError`].
#[derive(Debug, Clone, Serialize)]
pub struct ErrorReport {
    pub kind: &'static str,
    pub field: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_and_field() {
        let err = AdvisorError::missing("season");
        assert_eq!(err.kind(), "validation");
        assert_eq!(err.field(), "season");

        let err = AdvisorError::invalid_measurement(SoilParameter::Ph, "not a finite number");
        assert_eq!(err.kind(), "invalid-measurement");
        assert_eq!(err.field(), "ph");
        assert!(err.to_string().contains("pH"));
    }

    #[test]
    fn test_report_carries_message() {
        let err = AdvisorError::unsupported("growth_stage", "Wheat", "no Maturity entry");
        let report = err.report();
        assert_eq!(report.kind, "unsupported-crop-or-stage");
        assert_eq!(report.field, "growth_stage");
        assert!(report.message.contains("Wheat"));
    }
}
