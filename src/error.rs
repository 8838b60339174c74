//! Error taxonomy for the `jv` pipeline.
//!
//! Errors carry the process exit code they map to, so `main` can stay a thin
//! wrapper. The split matters for batch behavior:
//!
//! - configuration errors are fatal for the whole run
//! - malformed-sweep and output errors skip the offending file only

#[derive(Clone)]
pub enum AppError {
    /// Invalid user configuration: bad quadrant, unreadable config file,
    /// invalid analysis directory. Aborts the run (exit 2).
    Config(String),
    /// A sweep file that cannot be analysed: fewer than 2 samples, short
    /// rows, non-numeric or non-finite data (exit 3).
    MalformedSweep(String),
    /// Failure writing one of the output artifacts (exit 4).
    Output(String),
}

impl AppError {
    pub fn config(message: impl Into<String>) -> Self {
        AppError::Config(message.into())
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        AppError::MalformedSweep(message.into())
    }

    pub fn output(message: impl Into<String>) -> Self {
        AppError::Output(message.into())
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Config(_) => 2,
            AppError::MalformedSweep(_) => 3,
            AppError::Output(_) => 4,
        }
    }

    /// Whether this error must abort the whole batch.
    ///
    /// Configuration faults affect every file equally; there is no point in
    /// retrying the rest of the directory with the same bad settings.
    pub fn is_fatal(&self) -> bool {
        matches!(self, AppError::Config(_))
    }

    fn message(&self) -> &str {
        match self {
            AppError::Config(m) | AppError::MalformedSweep(m) | AppError::Output(m) => m,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self {
            AppError::Config(_) => "Config",
            AppError::MalformedSweep(_) => "MalformedSweep",
            AppError::Output(_) => "Output",
        };
        f.debug_struct("AppError")
            .field("kind", &kind)
            .field("exit_code", &self.exit_code())
            .field("message", &self.message())
            .finish()
    }
}

impl std::error::Error for AppError {}
