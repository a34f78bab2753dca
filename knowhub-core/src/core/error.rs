//! Error types for the Knowledge Hub core library.

use thiserror::Error;

/// All errors that can occur within the Knowledge Hub core library.
#[derive(Debug, Error)]
pub enum HubError {
    /// A native window could not be created.
    #[error("Window creation failed: {0}")]
    WindowCreation(String),

    /// A native window operation (show, hide, focus) failed.
    #[error("Window operation failed: {0}")]
    WindowOperation(String),

    /// A global shortcut could not be registered or unregistered.
    #[error("Shortcut error: {0}")]
    Shortcut(String),

    /// A panel width outside the configured limits was requested.
    #[error("Width {requested} is outside [{min}, {max}]")]
    WidthOutOfRange { requested: f64, min: f64, max: f64 },

    /// A resize gesture was started while another one is still active.
    #[error("A resize gesture is already in progress")]
    DragInProgress,

    /// A clipboard read or write failed.
    #[error("Clipboard error: {0}")]
    Clipboard(String),

    /// The completion endpoint could not be reached or returned a failure status.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The completion endpoint answered with a body we could not use.
    #[error("Malformed completion response: {0}")]
    MalformedResponse(String),

    /// An I/O operation on the filesystem failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A payload could not be serialized or deserialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias that pins the error type to [`HubError`].
pub type Result<T> = std::result::Result<T, HubError>;

impl HubError {
    /// Returns a short, human-readable message suitable for display to the end user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::WindowCreation(_) => "Could not open the window".to_string(),
            Self::WindowOperation(e) => format!("Window error: {e}"),
            Self::Shortcut(e) => format!("Keyboard shortcut unavailable: {e}"),
            Self::WidthOutOfRange { min, max, .. } => {
                format!("Panel width must stay between {min} and {max} pixels")
            }
            Self::DragInProgress => "Finish the current resize first".to_string(),
            Self::Clipboard(_) => "Clipboard is not available".to_string(),
            Self::Http(_) | Self::MalformedResponse(_) => {
                "The AI service is not available".to_string()
            }
            Self::Io(e) => format!("File error: {e}"),
            Self::Json(e) => format!("Data format error: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_out_of_range_message_names_limits() {
        let e = HubError::WidthOutOfRange { requested: 900.0, min: 240.0, max: 640.0 };
        assert!(e.to_string().contains("900"));
        assert!(e.user_message().contains("240"));
        assert!(e.user_message().contains("640"));
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let e: HubError = io.into();
        assert!(matches!(e, HubError::Io(_)));
    }
}
