/// Exit code for unreadable or malformed input data.
pub const EXIT_INPUT: u8 = 2;
/// Exit code when no data file could be found.
pub const EXIT_NO_DATA: u8 = 3;
/// Exit code for failures while writing output (stdout JSON, CSV export).
pub const EXIT_OUTPUT: u8 = 4;

/// Application-level error: a message for the user plus the process exit code.
///
/// The screen itself never fails; only loading and output do.
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

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
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
