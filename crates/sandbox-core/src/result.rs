//! Result type alias for sandbox operations

use crate::error::SandboxError;

/// Standard Result type for sandbox operations
pub type Result<T> = std::result::Result<T, SandboxError>;

/// Extension trait for Result to provide additional convenience methods
pub trait ResultExt<T> {
    /// Convert an error to `Ok(None)` if it is recoverable
    fn recoverable(self) -> Result<Option<T>>;
}

impl<T> ResultExt<T> for Result<T> {
    fn recoverable(self) -> Result<Option<T>> {
        match self {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.is_recoverable() => {
                tracing::warn!("Recoverable error: {}", err);
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_passes_fatal_errors_through() {
        let ok: Result<u8> = Ok(1);
        assert_eq!(ok.recoverable().unwrap(), Some(1));

        let soft: Result<u8> = Err(SandboxError::invalid_input("empty"));
        assert_eq!(soft.recoverable().unwrap(), None);

        let hard: Result<u8> = Err(SandboxError::config_error("broken"));
        assert!(hard.recoverable().is_err());
    }
}
