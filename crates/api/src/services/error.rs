use storefront_core::error::CoreError;
use storefront_db::RepoError;
use validator::ValidationErrors;

/// Errors surfaced by the service layer.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The command was rejected before any store call.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A store call failed. `context` names the operation and its input.
    #[error("{context}")]
    Repository {
        context: String,
        #[source]
        source: RepoError,
    },
}

impl ServiceError {
    /// Wrap a store failure with a description of what was being attempted.
    pub(crate) fn repository(context: impl Into<String>) -> impl FnOnce(RepoError) -> Self {
        let context = context.into();
        move |source| Self::Repository { context, source }
    }

    /// The underlying store error, if this came from the repository layer.
    pub fn repo_error(&self) -> Option<&RepoError> {
        match self {
            Self::Repository { source, .. } => Some(source),
            Self::Validation(_) => None,
        }
    }
}

impl From<CoreError> for ServiceError {
    fn from(err: CoreError) -> Self {
        let CoreError::Validation(msg) = err;
        Self::Validation(msg)
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}
