use crate::direction::Direction;
use crate::error::Diagnostic;
use crate::grid::{Grid, Marks};
use crate::scanner::Scanner;
use crate::stack::Stack;

/// Everything a run mutates apart from its streams. Observers get a shared
/// reference to this after every tick and after every output.
#[derive(Debug, Clone)]
pub struct State {
    pub(crate) scanner: Scanner,
    pub(crate) stack: Stack,
    pub(crate) diagnostics: Vec<Diagnostic>,
    pub(crate) halted: bool,
    pub(crate) skip: bool,
    pub(crate) ticks: u64,
}

impl State {
    pub fn new(grid: Grid) -> Self {
        State {
            scanner: Scanner::new(grid),
            stack: Stack::new(),
            diagnostics: Vec::new(),
            halted: false,
            skip: false,
            ticks: 0,
        }
    }

    /// Stack contents, bottom to top.
    pub fn stack(&self) -> &[i64] {
        self.stack.as_slice()
    }

    pub fn position(&self) -> (usize, usize) {
        self.scanner.position()
    }

    pub fn size(&self) -> (usize, usize) {
        self.scanner.size()
    }

    pub fn direction(&self) -> Direction {
        self.scanner.direction()
    }

    pub fn string_mode(&self) -> bool {
        self.scanner.string_mode()
    }

    /// The cell under the cursor.
    pub fn current(&self) -> u8 {
        self.scanner.current()
    }

    pub fn grid(&self) -> &Grid {
        self.scanner.grid()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Number of cells executed so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn halted(&self) -> bool {
        self.halted
    }

    /// Text form of the grid with the cursor marked; see [`Scanner::render`].
    pub fn render(&self, marks: &Marks) -> String {
        self.scanner.render(marks)
    }
}
