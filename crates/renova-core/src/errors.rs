use renova_core_types::RequestId;
use thiserror::Error;

/// Result type alias using the canonical ExError
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every failure crossing the persistence contract is classified into one of
/// these kinds. Each kind maps to a stable error code used by callers, tests
/// and the CLI exit path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    /// Required field missing or malformed (ValidationFailure)
    InvalidInput,
    /// Operation referenced a nonexistent id
    NotFound,
    /// Unique attribute already taken (user email, local sign-up)
    AlreadyExists,
    /// Network or service failure talking to a backend
    BackendUnavailable,

    // Auth
    Unauthorised,
    Forbidden,

    // Integration/IO
    Serialization,
    Persistence,
    Io,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::AlreadyExists => "ERR_ALREADY_EXISTS",
            ExErrorKind::BackendUnavailable => "ERR_BACKEND_UNAVAILABLE",
            ExErrorKind::Unauthorised => "ERR_UNAUTHORISED",
            ExErrorKind::Forbidden => "ERR_FORBIDDEN",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// Whether the failure should be shown to the end user as-is
    ///
    /// NotFound and validation failures are user-visible; everything else is
    /// logged and handled by the fallback policy or reported generically.
    pub fn is_user_visible(&self) -> bool {
        matches!(
            self,
            ExErrorKind::NotFound
                | ExErrorKind::InvalidInput
                | ExErrorKind::AlreadyExists
                | ExErrorKind::Unauthorised
                | ExErrorKind::Forbidden
        )
    }
}

/// Canonical structured error type
///
/// Carries the classification plus the context a caller needs to report or
/// log the failure: operation, collection, entity id and request id.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    collection: Option<String>,
    entity_id: Option<String>,
    request_id: Option<RequestId>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            collection: None,
            entity_id: None,
            request_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add collection context (`cars`, `news`, ...)
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = Some(collection.into());
        self
    }

    /// Add entity ID context
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn collection(&self) -> Option<&str> {
        self.collection.as_deref()
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Shorthand used by the fallback policy
    pub fn is_backend_unavailable(&self) -> bool {
        self.kind == ExErrorKind::BackendUnavailable
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(collection) = &self.collection {
            write!(f, " (collection: {})", collection)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        if let Some(request_id) = &self.request_id {
            write!(f, " (request_id: {})", request_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Domain error taxonomy raised by core rules and operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenovaError {
    /// Record with the given id does not exist in the collection
    #[error("{collection} record not found: {id}")]
    NotFound { collection: String, id: String },

    /// A draft or patch field failed validation
    #[error("Invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    /// A unique attribute is already taken
    #[error("{collection} already contains {key}")]
    AlreadyExists { collection: String, key: String },

    /// The selected backend could not be reached
    #[error("Backend {backend} unavailable: {message}")]
    BackendUnavailable { backend: String, message: String },

    /// No principal is signed in
    #[error("Not signed in")]
    NotSignedIn,

    /// Operation requires the ADMIN role
    #[error("Admin role required (user: {email})")]
    AdminRequired { email: String },

    /// Serialization error (JSON)
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl RenovaError {
    /// Convenience constructor for validation failures
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        RenovaError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Conversion from RenovaError to ExError
impl From<RenovaError> for ExError {
    fn from(err: RenovaError) -> Self {
        match err {
            RenovaError::NotFound { collection, id } => ExError::new(ExErrorKind::NotFound)
                .with_collection(collection.clone())
                .with_entity_id(id)
                .with_message(format!("{} record not found", collection)),

            RenovaError::Validation { field, reason } => ExError::new(ExErrorKind::InvalidInput)
                .with_op("validate")
                .with_message(format!("{}: {}", field, reason)),

            RenovaError::AlreadyExists { collection, key } => {
                ExError::new(ExErrorKind::AlreadyExists)
                    .with_collection(collection)
                    .with_message(format!("{} already exists", key))
            }

            RenovaError::BackendUnavailable { backend, message } => {
                ExError::new(ExErrorKind::BackendUnavailable)
                    .with_message(format!("{} backend: {}", backend, message))
            }

            RenovaError::NotSignedIn => {
                ExError::new(ExErrorKind::Unauthorised).with_message("Not signed in")
            }

            RenovaError::AdminRequired { email } => ExError::new(ExErrorKind::Forbidden)
                .with_entity_id(email)
                .with_message("Admin role required"),

            RenovaError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

/// Conversion from serde_json::Error to RenovaError
impl From<serde_json::Error> for RenovaError {
    fn from(err: serde_json::Error) -> Self {
        RenovaError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ExError {
    fn from(err: serde_json::Error) -> Self {
        RenovaError::from(err).into()
    }
}
