use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ScrollError {
    #[error("Invalid endless scroll configuration: {0}")]
    InvalidConfig(String),
    #[error("Could not parse endless scroll settings: {0}")]
    Settings(String),
    #[error("Scroll target is not attached to a document.")]
    DetachedTarget,
    #[error("DOM error: {0}")]
    Dom(String),
}

impl ScrollError {
    /// Whether the monitor can keep polling after this error. Only configuration errors are fatal.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ScrollError::DetachedTarget | ScrollError::Dom(_))
    }
}

impl From<serde_json::Error> for ScrollError {
    fn from(error: serde_json::Error) -> Self {
        ScrollError::Settings(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use crate::errors::ScrollError;

    #[test]
    fn test_is_recoverable() {
        assert!(ScrollError::DetachedTarget.is_recoverable());
        assert!(ScrollError::Dom(String::from("test")).is_recoverable());
        assert!(!ScrollError::InvalidConfig(String::from("test")).is_recoverable());
        assert!(!ScrollError::Settings(String::from("test")).is_recoverable());
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_error = serde_json::from_str::<u32>("not a number").expect_err("Parsing should fail.");
        let error = ScrollError::from(json_error);
        assert!(matches!(error, ScrollError::Settings(_)));
    }
}
