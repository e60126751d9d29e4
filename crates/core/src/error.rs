use crate::dashboard_template::grid::GridItemError;
use crate::types::DbId;

/// Opaque failure raised by a persistence backend, passed through unchanged.
pub type StoreError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Not authorized: user {user_id} does not own {entity} {id}")]
    NotAuthorized {
        entity: &'static str,
        id: DbId,
        user_id: DbId,
    },

    #[error("Invalid template type: {0:?}")]
    InvalidTemplateType(String),

    #[error("Invalid grid item: {0}")]
    InvalidGridItem(#[from] GridItemError),

    #[error("Store error: {0}")]
    Store(#[source] StoreError),
}

impl CoreError {
    /// HTTP status the transport layer should answer with for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            CoreError::NotFound { .. } => 404,
            CoreError::NotAuthorized { .. } => 403,
            CoreError::InvalidTemplateType(_) | CoreError::InvalidGridItem(_) => 400,
            CoreError::Store(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_errors_to_http_status() {
        let not_found = CoreError::NotFound {
            entity: "DashboardTemplate",
            id: 1,
        };
        let forbidden = CoreError::NotAuthorized {
            entity: "DashboardTemplate",
            id: 1,
            user_id: 2,
        };
        let bad_type = CoreError::InvalidTemplateType("nope".to_string());
        let store = CoreError::Store("connection reset".into());

        assert_eq!(not_found.http_status(), 404);
        assert_eq!(forbidden.http_status(), 403);
        assert_eq!(bad_type.http_status(), 400);
        assert_eq!(store.http_status(), 500);
    }

    #[test]
    fn store_error_keeps_original_message() {
        let err = CoreError::Store("connection reset".into());
        assert_eq!(err.to_string(), "Store error: connection reset");
        assert!(std::error::Error::source(&err).is_some());
    }
}
