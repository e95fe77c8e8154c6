//! Run failures and the non-fatal diagnostics collected along the way.
//!
//! Only a failing input or output stream ends a run with an error under the
//! default policy. Undefined cells and malformed input are recorded as
//! [`Diagnostic`]s and execution carries on.

use std::fmt;

use thiserror::Error;

use crate::op::code_text;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),

    /// The input stream ended while `&` or `~` was waiting for data.
    #[error("input closed while waiting for {}", cell_text(.op))]
    InputClosed { op: u8 },

    /// An undefined cell was executed under the strict policy.
    #[error("({x}, {y}) undefined: {}", cell_text(.code))]
    UndefinedInstruction { x: usize, y: usize, code: u8 },
}

fn cell_text(c: &u8) -> String {
    code_text(i64::from(*c))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    UndefinedInstruction,
    MalformedInput(String),
}

/// A warning tied to the cell that was executing when it was raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub x: usize,
    pub y: usize,
    pub code: u8,
    pub kind: DiagnosticKind,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = code_text(i64::from(self.code));
        match &self.kind {
            DiagnosticKind::UndefinedInstruction => {
                write!(f, "({}, {}) undefined: {}", self.x, self.y, code)
            }
            DiagnosticKind::MalformedInput(reason) => {
                write!(f, "({}, {}) malformed input for {}: {}", self.x, self.y, code, reason)
            }
        }
    }
}
