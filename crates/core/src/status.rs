//! Runtime status checks with caller source locations.
//!
//! [`check`] turns a failed runtime call into [`VizError::Status`] tagged
//! with the file and line of the call site. Nothing here terminates the
//! process; that decision belongs to the binary.

use crate::error::VizError;
use std::fmt;

/// File and line of the call site that observed a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub file: &'static str,
    pub line: u32,
}

impl SourceLocation {
    /// Location of the caller of the enclosing `#[track_caller]` function.
    #[track_caller]
    pub fn caller() -> Self {
        let loc = std::panic::Location::caller();
        Self {
            file: loc.file(),
            line: loc.line(),
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at line {}", self.file, self.line)
    }
}

/// Maps a runtime failure to [`VizError::Status`] at the caller's location.
#[track_caller]
pub fn check<T, E: fmt::Display>(result: Result<T, E>) -> Result<T, VizError> {
    match result {
        Ok(v) => Ok(v),
        Err(e) => Err(VizError::Status {
            status: e.to_string(),
            location: SourceLocation::caller(),
        }),
    }
}

/// Maps a missing allocation to [`VizError::Allocation`] at the caller's location.
#[track_caller]
pub fn check_alloc<T>(value: Option<T>, bytes: usize) -> Result<T, VizError> {
    match value {
        Some(v) => Ok(v),
        None => Err(VizError::Allocation {
            bytes,
            location: SourceLocation::caller(),
        }),
    }
}
