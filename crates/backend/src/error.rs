/// Errors from the backend API layer.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("Backend request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend returned a non-2xx status code.
    #[error("Backend returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Envelope `message`, when the error body was an envelope.
        message: Option<String>,
        /// Raw response body for debugging (truncated).
        body: String,
    },

    /// The backend answered `success: false`.
    #[error("Backend rejected the request: {message}")]
    Rejected { message: String },

    /// The body was not the expected envelope shape.
    #[error("Malformed backend response: {0}")]
    Malformed(String),
}

impl BackendError {
    /// Message supplied by the backend itself, if any.
    pub fn backend_message(&self) -> Option<&str> {
        let message = match self {
            BackendError::Status { message, .. } => message.as_deref()?,
            BackendError::Rejected { message } => message.as_str(),
            _ => return None,
        };
        (!message.trim().is_empty()).then_some(message)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, BackendError::Status { status: 404, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_exposes_backend_message() {
        let err = BackendError::Rejected {
            message: "利用者IDは既に使用されています".into(),
        };
        assert_eq!(err.backend_message(), Some("利用者IDは既に使用されています"));
    }

    #[test]
    fn blank_messages_are_ignored() {
        let err = BackendError::Rejected { message: " ".into() };
        assert_eq!(err.backend_message(), None);

        let err = BackendError::Status {
            status: 500,
            message: None,
            body: "<html>".into(),
        };
        assert_eq!(err.backend_message(), None);
    }

    #[test]
    fn not_found_is_status_404_only() {
        let err = BackendError::Status {
            status: 404,
            message: None,
            body: String::new(),
        };
        assert!(err.is_not_found());
        assert!(!BackendError::Malformed("x".into()).is_not_found());
    }
}
