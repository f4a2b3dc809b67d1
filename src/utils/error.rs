use thiserror::Error;

/// Underlying cause of a failed storage operation.
#[derive(Error, Debug)]
pub enum StorageFailure {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum CrmError {
    #[error("{entity} with ID '{id}' was not found")]
    NotFound { entity: String, id: String },

    #[error("Validation failed: {}", errors.join(", "))]
    Validation { errors: Vec<String> },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Storage error for '{key}': {source}")]
    Storage {
        key: String,
        #[source]
        source: StorageFailure,
    },

    #[error("Invalid value for '{field}': {reason}")]
    InvalidArgument { field: String, reason: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to render output: {0}")]
    Render(#[source] serde_json::Error),

    #[error("{context}: {source}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<CrmError>,
    },
}

pub type Result<T> = std::result::Result<T, CrmError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    NotFound,
    Validation,
    Conflict,
    Storage,
    Configuration,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CrmError {
    pub fn customer_not_found(id: impl ToString) -> Self {
        Self::NotFound {
            entity: "Customer".to_string(),
            id: id.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            errors: vec![message.into()],
        }
    }

    pub fn storage(key: &str, source: impl Into<StorageFailure>) -> Self {
        Self::Storage {
            key: key.to_string(),
            source: source.into(),
        }
    }

    pub fn invalid_argument(field: &str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    pub fn operation_failed(context: impl Into<String>, source: CrmError) -> Self {
        Self::OperationFailed {
            context: context.into(),
            source: Box::new(source),
        }
    }

    /// Wraps unexpected failures with context; not-found and validation
    /// failures are already meaningful to callers and pass through untouched.
    pub fn context(self, context: impl Into<String>) -> Self {
        match self {
            err @ (Self::NotFound { .. } | Self::Validation { .. }) => err,
            other => Self::operation_failed(context, other),
        }
    }

    /// Validation messages carried by this error, looking through wrappers.
    pub fn validation_errors(&self) -> &[String] {
        match self {
            Self::Validation { errors } => errors,
            Self::OperationFailed { source, .. } => source.validation_errors(),
            _ => &[],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::Validation { .. } | Self::InvalidArgument { .. } => ErrorCategory::Validation,
            Self::Conflict { .. } => ErrorCategory::Conflict,
            Self::Storage { .. } => ErrorCategory::Storage,
            Self::Config { .. } => ErrorCategory::Configuration,
            Self::Render(_) | Self::OperationFailed { .. } => ErrorCategory::Internal,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotFound { .. } | Self::Validation { .. } | Self::InvalidArgument { .. } => {
                ErrorSeverity::Medium
            }
            Self::Conflict { .. } | Self::Config { .. } | Self::Render(_) => ErrorSeverity::High,
            Self::Storage { .. } => ErrorSeverity::Critical,
            Self::OperationFailed { source, .. } => source.severity().max(ErrorSeverity::High),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::NotFound { entity, id } => format!("{} '{}' does not exist", entity, id),
            Self::Validation { errors } => {
                let mut message = String::from("The request was rejected:");
                for error in errors {
                    message.push_str("\n  - ");
                    message.push_str(error);
                }
                message
            }
            Self::Conflict { message } => message.clone(),
            Self::Storage { key, .. } => {
                format!("The data store '{}' could not be read or written", key)
            }
            Self::InvalidArgument { field, reason } => format!("{}: {}", field, reason),
            Self::Config { message } => format!("Configuration problem: {}", message),
            Self::Render(_) => "The result could not be rendered as JSON".to_string(),
            Self::OperationFailed { context, source } => {
                format!("{}\n{}", context, source.user_friendly_message())
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "Check the identifier; use `list` to see existing customers",
            Self::Validation { .. } => "Fix the listed problems and submit the request again",
            Self::Conflict { .. } => "Use a different identifier or update the existing record",
            Self::Storage { .. } => {
                "Check that the data directory is writable and the JSON document is not corrupted"
            }
            Self::InvalidArgument { .. } => "Provide a non-empty, well-formed value",
            Self::Config { .. } => "Check the configuration file and environment variables",
            Self::Render(_) => "The operation itself completed; list the data again to see it",
            Self::OperationFailed { source, .. } => source.recovery_suggestion(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_keeps_not_found_and_validation() {
        let err = CrmError::customer_not_found("abc").context("Failed to load");
        assert!(matches!(err, CrmError::NotFound { .. }));

        let err = CrmError::validation("bad").context("Failed to load");
        assert_eq!(err.validation_errors(), ["bad".to_string()]);
    }

    #[test]
    fn test_context_wraps_storage_failures() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = CrmError::storage("customers", io).context("Failed to create customer");

        assert_eq!(err.category(), ErrorCategory::Internal);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(err.to_string().starts_with("Failed to create customer: Storage error"));
    }

    #[test]
    fn test_render_failure_is_not_a_storage_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = CrmError::Render(json_err);

        assert_eq!(err.category(), ErrorCategory::Internal);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.to_string().starts_with("Failed to render output"));
        assert!(!err.user_friendly_message().contains("data store"));
    }

    #[test]
    fn test_validation_display_joins_messages() {
        let err = CrmError::Validation {
            errors: vec!["first".to_string(), "second".to_string()],
        };
        assert_eq!(err.to_string(), "Validation failed: first, second");
        assert!(err.user_friendly_message().contains("\n  - second"));
    }
}
