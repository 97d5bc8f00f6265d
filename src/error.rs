use thiserror::Error;

/// Machine-readable error codes surfaced to the calling layer.
pub mod codes {
    pub const START_AFTER_END: &str = "START_AFTER_END";
    pub const END_DATE_REQUIRED: &str = "END_DATE_REQUIRED";
    pub const DUPLICATE_ASSIGNMENT: &str = "DUPLICATE_ASSIGNMENT";
    pub const DOUBLE_BOOKED: &str = "DOUBLE_BOOKED";
    pub const DUPLICATE_PLAN_NAME: &str = "DUPLICATE_PLAN_NAME";
    pub const INVALID_STATUS: &str = "INVALID_STATUS";
}

/// Domain error taxonomy. Validation/NotFound/Conflict map to 4xx on the
/// calling layer, Persistence to 5xx with detail only in the logs.
#[derive(Error, Debug)]
pub enum PlanError {
    #[error("{code}: {message}")]
    Validation { code: &'static str, message: String },
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },
    #[error("{code}: {message}")]
    Conflict { code: &'static str, message: String },
    #[error("persistence failure")]
    Persistence(#[from] anyhow::Error),
}

impl PlanError {
    pub fn validation(code: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn conflict(code: &'static str, message: impl Into<String>) -> Self {
        Self::Conflict {
            code,
            message: message.into(),
        }
    }

    /// Stable code for the calling layer's error mapping.
    pub fn code(&self) -> &'static str {
        match self {
            PlanError::Validation { code, .. } | PlanError::Conflict { code, .. } => code,
            PlanError::NotFound { .. } => "NOT_FOUND",
            PlanError::Persistence(_) => "PERSISTENCE",
        }
    }
}
