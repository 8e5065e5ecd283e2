//! Application error type with process exit codes.
//!
//! Exit codes:
//! - 2: load errors (file missing/unreadable, CSV parse failure, zero columns)
//! - 3: empty input (the file parsed but has zero data rows)
//! - 4: runtime failures (terminal setup, export writes, worker loss)

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    /// A fatal load-step error: the batch cannot start.
    pub fn load(message: impl Into<String>) -> Self {
        Self::new(2, message)
    }

    /// The file parsed but contains zero data rows.
    pub fn empty_input(message: impl Into<String>) -> Self {
        Self::new(3, message)
    }

    /// Terminal/IO/runtime failure outside the load step.
    pub fn runtime(message: impl Into<String>) -> Self {
        Self::new(4, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
