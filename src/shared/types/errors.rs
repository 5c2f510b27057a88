use thiserror::Error;
use uuid::Uuid;

/// Coarse classification of a [`DomainError`], used by transports to pick
/// a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Conflict,
    Validation,
    Internal,
}

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("City '{0}' not found")]
    CityNotFound(String),

    #[error("Pickup point {0} not found")]
    PickupPointNotFound(Uuid),

    #[error("Product type '{0}' not found")]
    UnknownProductType(String),

    #[error("No product to remove in the active reception of pickup point {0}")]
    NoProductToRemove(Uuid),

    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Pickup point {0} already exists")]
    DuplicatePickupPoint(Uuid),

    #[error("Pickup point {0} already has a reception in progress")]
    ReceptionAlreadyInProgress(Uuid),

    #[error("Pickup point {0} has no reception in progress")]
    NoActiveReception(Uuid),

    #[error("Validation: {0}")]
    Validation(String),

    #[error("{operation}: {source}")]
    Internal {
        operation: &'static str,
        #[source]
        source: StorageError,
    },
}

impl DomainError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::CityNotFound(_)
            | Self::PickupPointNotFound(_)
            | Self::UnknownProductType(_)
            | Self::NoProductToRemove(_)
            | Self::NotFound { .. } => ErrorKind::NotFound,
            Self::DuplicatePickupPoint(_)
            | Self::ReceptionAlreadyInProgress(_)
            | Self::NoActiveReception(_) => ErrorKind::Conflict,
            Self::Validation(_) => ErrorKind::Validation,
            Self::Internal { .. } => ErrorKind::Internal,
        }
    }

    /// Returns a mapper that wraps a storage failure with the name of the
    /// step that produced it.
    ///
    /// ```ignore
    /// repos.cities().find_by_name(name).await.map_err(DomainError::internal("find city"))?;
    /// ```
    pub fn internal(operation: &'static str) -> impl FnOnce(StorageError) -> DomainError {
        move |source| DomainError::Internal { operation, source }
    }
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Unique constraint violated: {0}")]
    Duplicate(String),

    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

impl StorageError {
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate(_))
    }
}

/// Result type for repository calls
pub type StorageResult<T> = Result<T, StorageError>;
