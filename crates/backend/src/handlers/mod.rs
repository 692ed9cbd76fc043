pub mod admin;
pub mod consumer;
pub mod distributor;
pub mod producer;
pub mod retailer;

use axum::http::StatusCode;
use contracts::domain::common::ChainError;
use contracts::system::auth::TokenClaims;
use uuid::Uuid;

use crate::domain::a001_batch::transfer::Actor;

/// Map the custody error taxonomy onto HTTP status codes
pub fn status_for(err: &ChainError) -> StatusCode {
    match err {
        ChainError::NotFound(_) => StatusCode::NOT_FOUND,
        ChainError::Forbidden(_) => StatusCode::FORBIDDEN,
        ChainError::InvalidState(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ChainError::InsufficientQuantity { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        ChainError::Conflict => StatusCode::CONFLICT,
        ChainError::ValidationFailed(_) => StatusCode::BAD_REQUEST,
        ChainError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        ChainError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub fn report(err: ChainError) -> StatusCode {
    let status = status_for(&err);
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!("Request failed: {:#}", err);
    } else {
        tracing::debug!("Request rejected: {}", err);
    }
    status
}

/// Build the acting party from validated token claims
pub fn actor_from_claims(claims: &TokenClaims) -> Result<Actor, StatusCode> {
    let id = Uuid::parse_str(&claims.sub).map_err(|_| StatusCode::UNAUTHORIZED)?;
    Ok(Actor {
        id,
        name: claims.username.clone(),
        role: claims.role,
    })
}

pub fn parse_uuid(id: &str) -> Result<Uuid, StatusCode> {
    Uuid::parse_str(id).map_err(|_| StatusCode::BAD_REQUEST)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_mapping_is_stable() {
        assert_eq!(
            status_for(&ChainError::not_found("x")),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for(&ChainError::forbidden("x")),
            StatusCode::FORBIDDEN
        );
        assert_eq!(status_for(&ChainError::Conflict), StatusCode::CONFLICT);
        assert_eq!(
            status_for(&ChainError::InsufficientQuantity {
                requested: 2.0,
                available: 1.0
            }),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_for(&ChainError::ValidationFailed("x".into())),
            StatusCode::BAD_REQUEST
        );
    }
}
