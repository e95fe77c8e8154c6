//! A Befunge-93 interpreter.
//!
//! Program text is laid out on a toroidal grid of byte cells. A cursor
//! walks the grid one cell per tick, and each cell it lands on is either
//! pushed as a literal or executed against an operand stack. The program
//! may rewrite its own cells with `p` while it runs.
//!
//! [`Runner`] owns the whole run. Input, output and the source of
//! randomness for `?` are injected, and an optional observer is called
//! after each cursor advance and after each output with a read-only
//! [`State`].
//!
//! ```
//! use std::io::Cursor;
//! use befunge::Runner;
//!
//! let mut out = Vec::new();
//! let mut runner = Runner::new(b"55+.@", Cursor::new(""), &mut out, |_| 0);
//! runner.run().unwrap();
//! drop(runner);
//! assert_eq!(out, b"10");
//! ```

pub mod config;
pub mod direction;
pub mod error;
pub mod grid;
pub mod input;
pub mod op;
pub mod runner;
pub mod scanner;
pub mod stack;
pub mod state;
pub mod visualizer;
pub mod xy;

pub use config::{Config, UndefinedPolicy};
pub use direction::Direction;
pub use error::{Diagnostic, DiagnosticKind, Error, Result};
pub use grid::{Grid, Marks};
pub use runner::Runner;
pub use scanner::{Decoded, Scanner};
pub use stack::Stack;
pub use state::State;
