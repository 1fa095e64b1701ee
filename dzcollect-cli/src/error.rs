//! CLI error handling with user-friendly messages.

use dzcollect::error::BuildError;
use std::fmt;
use std::process;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Collection build failed
    Build(BuildError),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        // Print additional help for specific errors
        if let CliError::Build(BuildError::NoImagesFound { .. }) = self {
            eprintln!();
            eprintln!("The input directory must contain at least one image file.");
            eprintln!("Hidden files and subdirectories are ignored.");
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Build(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Build(e) => Some(e),
            CliError::LoggingInit(_) => None,
        }
    }
}

impl From<BuildError> for CliError {
    fn from(err: BuildError) -> Self {
        CliError::Build(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_build_error_display_passthrough() {
        let err = CliError::Build(BuildError::NoImagesFound {
            dir: PathBuf::from("/pics"),
        });
        assert_eq!(err.to_string(), "no images found in '/pics'");
    }

    #[test]
    fn test_logging_init_display() {
        let err = CliError::LoggingInit("already set".to_string());
        assert_eq!(err.to_string(), "Failed to initialize logging: already set");
    }
}
