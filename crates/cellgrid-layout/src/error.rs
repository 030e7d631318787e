#![forbid(unsafe_code)]

//! Error types for grid configuration, attachment, and commits.

use std::fmt;

use crate::drag::DragMachineError;

/// Which span attribute an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanAxis {
    Width,
    Height,
}

impl fmt::Display for SpanAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Width => f.write_str("cellsWidth"),
            Self::Height => f.write_str("cellsHeight"),
        }
    }
}

/// Errors raised by the grid container and its helpers.
#[derive(Debug, Clone, PartialEq)]
pub enum GridError {
    /// The column count must be at least one.
    InvalidColumns { columns: u16 },
    /// A cell span was zero or negative (other than the "unset" marker).
    InvalidSpan { axis: SpanAxis, value: i32 },
    /// A slot origin was negative.
    NegativeOrigin { left: i32, top: i32 },
    /// A slot extends past the last column.
    SlotOutOfBounds {
        left: u16,
        width: u16,
        columns: u16,
    },
    /// A child index does not exist.
    IndexOutOfRange { index: usize, len: usize },
    /// A configuration value is unusable.
    Config { field: &'static str, reason: String },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidColumns { columns } => {
                write!(f, "column count must be at least 1 (got {columns})")
            }
            Self::InvalidSpan { axis, value } => {
                write!(f, "{axis} must be at least 1 (got {value})")
            }
            Self::NegativeOrigin { left, top } => {
                write!(f, "slot origin must be non-negative (left={left}, top={top})")
            }
            Self::SlotOutOfBounds {
                left,
                width,
                columns,
            } => write!(
                f,
                "slot spans columns {left}..{} but the grid has {columns}",
                u32::from(*left) + u32::from(*width)
            ),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "child index {index} out of range for {len} children")
            }
            Self::Config { field, reason } => write!(f, "invalid config `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for GridError {}

impl From<DragMachineError> for GridError {
    fn from(err: DragMachineError) -> Self {
        match err {
            DragMachineError::HitOutOfRange { index, len } => Self::IndexOutOfRange { index, len },
        }
    }
}

impl From<serde_json::Error> for GridError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config {
            field: "<document>",
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages_name_the_attribute() {
        let err = GridError::InvalidSpan {
            axis: SpanAxis::Height,
            value: 0,
        };
        assert_eq!(err.to_string(), "cellsHeight must be at least 1 (got 0)");

        let err = GridError::SlotOutOfBounds {
            left: 3,
            width: 2,
            columns: 4,
        };
        assert_eq!(err.to_string(), "slot spans columns 3..5 but the grid has 4");
    }

    #[test]
    fn json_errors_become_config_errors() {
        let err: GridError = serde_json::from_str::<u8>("nope").unwrap_err().into();
        assert!(matches!(err, GridError::Config { field: "<document>", .. }));
    }
}
