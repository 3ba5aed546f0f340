//! CLI-specific error types and exit code mapping

use mkbom_builder::{BomBuilderError, ErrorCategory};

/// CLI-specific error type.
///
/// Domain errors keep their source so the diagnostic can print the full
/// `Caused by:` chain. The `exit_code()` method maps errors to process exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("invalid configuration")]
    Config(#[source] BomBuilderError),

    /// A descriptor could not be parsed or lacks a required field.
    #[error("descriptor discovery failed")]
    Discovery(#[source] BomBuilderError),

    /// A repository root or the destination could not be read or written.
    #[error("i/o failure")]
    Io(#[source] BomBuilderError),

    /// The BOM document could not be serialized.
    #[error("failed to render bom")]
    Render(#[source] BomBuilderError),

    /// Logging could not be initialized.
    #[error("logging setup failed: {0}")]
    Logging(String),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                         |
    /// |------|---------------------------------|
    /// | 0    | Success                         |
    /// | 1    | General error                   |
    /// | 2    | Configuration error             |
    /// | 3    | Descriptor discovery error      |
    /// | 10   | IO error                        |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 2,
            Self::Discovery(_) => 3,
            Self::Io(_) => 10,
            Self::Render(_) | Self::Logging(_) => 1,
        }
    }
}

impl From<BomBuilderError> for CliError {
    fn from(e: BomBuilderError) -> Self {
        match e.category() {
            ErrorCategory::Config => Self::Config(e),
            ErrorCategory::Discovery => Self::Discovery(e),
            ErrorCategory::Io => Self::Io(e),
            ErrorCategory::Render => Self::Render(e),
        }
    }
}
