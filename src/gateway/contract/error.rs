//! Error types for gateway operations.
//!
//! Both backends surface their underlying failure untranslated: transport
//! errors stay transport errors, API rejections keep their status and body.
//! Callers at the screen boundary decide how to render them.

use std::fmt;

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Structured context for gateway errors.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// The operation being performed (e.g., "list_projects", "upload_resume")
    pub operation: Option<String>,
    /// The entity type involved (e.g., "project", "testimonial")
    pub entity: Option<String>,
    /// The entity ID if applicable
    pub entity_id: Option<String>,
    /// Additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with an operation name.
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: Some(operation.into()),
            ..Default::default()
        }
    }

    /// Set the entity type.
    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    /// Set the entity ID.
    pub fn with_entity_id(mut self, id: impl ToString) -> Self {
        self.entity_id = Some(id.to_string());
        self
    }

    /// Set additional details.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(ref op) = self.operation {
            parts.push(format!("operation={}", op));
        }
        if let Some(ref entity) = self.entity {
            parts.push(format!("entity={}", entity));
        }
        if let Some(ref id) = self.entity_id {
            parts.push(format!("id={}", id));
        }
        if let Some(ref details) = self.details {
            parts.push(format!("details={}", details));
        }
        write!(f, "[{}]", parts.join(", "))
    }
}

/// Error type for gateway operations
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Network-level failure reaching the backend.
    #[error("Transport error: {message} {context}")]
    Transport {
        message: String,
        context: ErrorContext,
    },

    /// The backend answered with a non-success status. Status and body are
    /// surfaced verbatim.
    #[error("API error ({status}): {body} {context}")]
    Api {
        status: u16,
        body: String,
        context: ErrorContext,
    },

    /// Requested entity was not found.
    #[error("Not found: {message} {context}")]
    NotFound {
        message: String,
        context: ErrorContext,
    },

    /// Response body did not match the expected shape.
    #[error("Decode error: {message} {context}")]
    Decode {
        message: String,
        context: ErrorContext,
    },

    /// Configuration or initialization error. Raised synchronously when
    /// direct mode is forced on without credentials.
    #[error("Configuration error: {message} {context}")]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    /// Internal/unexpected errors.
    #[error("Internal error: {message} {context}")]
    Internal {
        message: String,
        context: ErrorContext,
    },
}

impl GatewayError {
    /// Create a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// Create an API error from a response status and body.
    pub fn api(status: u16, body: impl Into<String>) -> Self {
        Self::Api {
            status,
            body: body.into(),
            context: ErrorContext::default(),
        }
    }

    /// Create a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// Create a not found error with context.
    pub fn not_found_with_context(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::NotFound {
            message: message.into(),
            context,
        }
    }

    /// Create a decode error.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// HTTP status of an API rejection, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Get the error context.
    pub fn context(&self) -> &ErrorContext {
        match self {
            Self::Transport { context, .. } => context,
            Self::Api { context, .. } => context,
            Self::NotFound { context, .. } => context,
            Self::Decode { context, .. } => context,
            Self::Configuration { context, .. } => context,
            Self::Internal { context, .. } => context,
        }
    }

    /// Add or update the operation in the error context.
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        match &mut self {
            Self::Transport { context, .. }
            | Self::Api { context, .. }
            | Self::NotFound { context, .. }
            | Self::Decode { context, .. }
            | Self::Configuration { context, .. }
            | Self::Internal { context, .. } => {
                context.operation = Some(operation.into());
            }
        }
        self
    }

    /// Add or update the entity in the error context.
    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        match &mut self {
            Self::Transport { context, .. }
            | Self::Api { context, .. }
            | Self::NotFound { context, .. }
            | Self::Decode { context, .. }
            | Self::Configuration { context, .. }
            | Self::Internal { context, .. } => {
                context.entity = Some(entity.into());
            }
        }
        self
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            GatewayError::decode(err.to_string())
        } else {
            GatewayError::transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        GatewayError::decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_display_lists_set_fields() {
        let ctx = ErrorContext::new("list_projects")
            .with_entity("project")
            .with_entity_id(7);
        let rendered = ctx.to_string();
        assert!(rendered.contains("operation=list_projects"));
        assert!(rendered.contains("entity=project"));
        assert!(rendered.contains("id=7"));
    }

    #[test]
    fn api_error_keeps_status() {
        let err = GatewayError::api(503, "service unavailable");
        assert_eq!(err.status(), Some(503));
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn with_operation_updates_context() {
        let err = GatewayError::not_found("no such row").with_operation("get_skill");
        assert_eq!(err.context().operation.as_deref(), Some("get_skill"));
    }
}
