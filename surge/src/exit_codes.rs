#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    Success = 0,

    /// One or more SLA thresholds failed.
    SlaFailed = 10,

    /// Invalid CLI/config input (bad flags, invalid durations, zero concurrency, etc.).
    InvalidInput = 30,

    /// Internal/runtime error (IO errors, unexpected invariants, panics caught at top-level).
    RuntimeError = 40,
}

impl ExitCode {
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    #[must_use]
    pub fn from_verdict(verdict: &surge_core::runner::SlaVerdict) -> Self {
        if verdict.passed {
            Self::Success
        } else {
            Self::SlaFailed
        }
    }
}
