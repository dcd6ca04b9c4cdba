use actix_web::{HttpResponse, http::StatusCode};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// A single field-level validation failure. Leave applications collect these
/// and return them together rather than failing on the first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    #[schema(example = "reason", value_type = String)]
    pub field: &'static str,
    #[schema(example = "Reason must be at least 10 characters")]
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Every failure the ledgers and the identity store can produce. All are
/// recoverable conditions surfaced to the caller; none is fatal.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Leave application {id} is already {status}")]
    AlreadyFinalized { id: String, status: String },

    #[error("Not authorized")]
    NotAuthorized,

    #[error("Already checked in today")]
    AlreadyCheckedIn,

    #[error("No active check-in found for today")]
    NoOpenRecord,
}

pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            DomainError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            DomainError::NotAuthorized => StatusCode::FORBIDDEN,
            DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
            DomainError::AlreadyFinalized { .. } => StatusCode::CONFLICT,
            DomainError::Validation(_)
            | DomainError::AlreadyCheckedIn
            | DomainError::NoOpenRecord => StatusCode::BAD_REQUEST,
        }
    }

    /// JSON body in the shape the handlers return: a `message`, plus a
    /// field-keyed `errors` map for validation failures.
    pub fn to_response(&self) -> HttpResponse {
        let body = match self {
            DomainError::Validation(errors) => {
                let fields: serde_json::Map<String, serde_json::Value> = errors
                    .iter()
                    .map(|e| (e.field.to_string(), e.message.clone().into()))
                    .collect();
                serde_json::json!({ "message": self.to_string(), "errors": fields })
            }
            other => serde_json::json!({ "message": other.to_string() }),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

impl actix_web::ResponseError for DomainError {
    fn status_code(&self) -> StatusCode {
        DomainError::status_code(self)
    }

    fn error_response(&self) -> HttpResponse {
        self.to_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn already_finalized_names_id_and_status() {
        let err = DomainError::AlreadyFinalized {
            id: "LA001".to_string(),
            status: "approved".to_string(),
        };
        assert_eq!(err.to_string(), "Leave application LA001 is already approved");
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn not_found_names_entity() {
        let err = DomainError::NotFound {
            entity: "leave application",
            id: "LA999".to_string(),
        };
        assert_eq!(err.to_string(), "leave application not found: LA999");
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn validation_carries_field_errors() {
        let err = DomainError::Validation(vec![FieldError::new(
            "reason",
            "Reason must be at least 10 characters",
        )]);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        match err {
            DomainError::Validation(errors) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].field, "reason");
            }
            _ => unreachable!(),
        }
    }
}
