//! System-wide error types for Konsoli.

use core::fmt;

/// Console subsystem error types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConsoleError {
    /// Requested cursor position lies outside the surface.
    CursorOutOfBounds {
        /// Requested column.
        x: usize,
        /// Requested row.
        y: usize,
    },
}

impl fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsoleError::CursorOutOfBounds { x, y } => {
                write!(f, "cursor position ({}, {}) is off screen", x, y)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::string::ToString;

    #[test]
    fn test_display_names_position() {
        let err = ConsoleError::CursorOutOfBounds { x: 80, y: 3 };
        assert_eq!(err.to_string(), "cursor position (80, 3) is off screen");
    }
}
