use thiserror::Error;

/// Result type alias using EngineError
pub type Result<T> = std::result::Result<T, EngineError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Structural differences between the compared graphs are never errors; they
/// are reported as [`crate::report::Difference`] entries. The kinds below
/// cover the two situations where a comparison cannot produce a meaningful
/// report: a contradictory configuration (rejected when the configuration is
/// built) and a comparison that could not be completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineErrorKind {
    // Configuration (raised by ComparisonConfigBuilder::build)
    /// The same field is both ignored and selected as compared-only
    ConflictingFieldSelection,
    /// A comparator and a predicate were registered for the same field or type
    DuplicateEqualityCheck,
    /// A field name or type name is empty or blank
    InvalidFieldName,
    /// An ignore-fields pattern is not a valid regular expression
    InvalidPattern,

    // Comparison (raised by compare)
    /// Several declared fields normalize to the same lookup name
    AmbiguousFieldName,
    /// A computed field could not be read
    FieldAccessDenied,
}

impl EngineErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            EngineErrorKind::ConflictingFieldSelection => "ERR_CONFLICTING_FIELD_SELECTION",
            EngineErrorKind::DuplicateEqualityCheck => "ERR_DUPLICATE_EQUALITY_CHECK",
            EngineErrorKind::InvalidFieldName => "ERR_INVALID_FIELD_NAME",
            EngineErrorKind::InvalidPattern => "ERR_INVALID_PATTERN",
            EngineErrorKind::AmbiguousFieldName => "ERR_AMBIGUOUS_FIELD_NAME",
            EngineErrorKind::FieldAccessDenied => "ERR_FIELD_ACCESS_DENIED",
        }
    }

    /// True for kinds raised while building a configuration
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            EngineErrorKind::ConflictingFieldSelection
                | EngineErrorKind::DuplicateEqualityCheck
                | EngineErrorKind::InvalidFieldName
                | EngineErrorKind::InvalidPattern
        )
    }
}

/// Canonical structured error type
///
/// Carries a classification for programmatic handling plus the context
/// needed to diagnose it: the failing operation, the field path being
/// compared and, for ambiguities and conflicts, the candidate names.
#[derive(Debug, Clone)]
pub struct EngineError {
    kind: EngineErrorKind,
    op: Option<String>,
    path: Option<String>,
    type_name: Option<String>,
    message: String,
    candidates: Option<Vec<String>>,
}

impl EngineError {
    /// Create a new error with the specified kind
    pub fn new(kind: EngineErrorKind) -> Self {
        Self {
            kind,
            op: None,
            path: None,
            type_name: None,
            message: String::new(),
            candidates: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add field path context
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add type name context
    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add candidate names (ambiguous lookups, conflicting selections)
    pub fn with_candidates(mut self, names: Vec<String>) -> Self {
        self.candidates = Some(names);
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> EngineErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the field path context, if any
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Get the type name context, if any
    pub fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get candidate names, if any
    pub fn candidates(&self) -> Option<&[String]> {
        self.candidates.as_deref()
    }
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        if let Some(type_name) = &self.type_name {
            write!(f, " (type: {})", type_name)?;
        }
        if let Some(candidates) = &self.candidates {
            write!(f, " (candidates: {})", candidates.join(", "))?;
        }
        Ok(())
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

// ========== End Error Facility ==========

/// Failure raised by a computed field when it is read
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AccessError {
    /// The property refused access to its value
    #[error("access to field '{field}' denied: {reason}")]
    Denied { field: String, reason: String },

    /// The property failed while computing its value
    #[error("field '{field}' could not be computed: {reason}")]
    Failed { field: String, reason: String },
}

impl AccessError {
    /// Name of the field that failed
    pub fn field(&self) -> &str {
        match self {
            AccessError::Denied { field, .. } | AccessError::Failed { field, .. } => field,
        }
    }
}

impl From<AccessError> for EngineError {
    fn from(err: AccessError) -> Self {
        EngineError::new(EngineErrorKind::FieldAccessDenied)
            .with_op("read_field")
            .with_message(err.to_string())
    }
}
