use crate::grid::DEFAULT_MAX_CELLS;

/// What executing an undefined cell does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UndefinedPolicy {
    /// Record a diagnostic and treat the cell as a no-op.
    #[default]
    Warn,
    /// Stop the run with [`crate::Error::UndefinedInstruction`].
    Strict,
}

/// Runner settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub undefined: UndefinedPolicy,
    /// Write a prompt through the output before each `&`/`~` read attempt.
    pub prompt: bool,
    /// Budget on the total number of cells `p` may grow the grid to.
    pub max_cells: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            undefined: UndefinedPolicy::Warn,
            prompt: false,
            max_cells: DEFAULT_MAX_CELLS,
        }
    }
}
