//! Cursor movement over the grid and decoding of the cell under it.

use crate::direction::Direction;
use crate::grid::{Grid, Marks};
use crate::op::code_text;
use crate::xy::{Coord, XY};

const QUOTE: u8 = b'"';

/// What the cell under the cursor means for the runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoded {
    /// A digit, or any character met in string mode.
    Push(i64),
    /// A quote entering or leaving string mode; nothing to execute.
    Toggle,
    /// Any other cell, to be looked up in the opcode table.
    Op(u8),
}

#[derive(Debug, Clone)]
pub struct Scanner {
    grid: Grid,
    position: Coord,
    direction: Direction,
    string_mode: bool,
}

impl Scanner {
    pub fn new(grid: Grid) -> Self {
        Scanner {
            grid,
            position: XY::new(0, 0),
            direction: Direction::Unset,
            string_mode: false,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn position(&self) -> (usize, usize) {
        (self.position.x as usize, self.position.y as usize)
    }

    pub fn size(&self) -> (usize, usize) {
        let size = self.grid.size();
        (size.x, size.y)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    pub fn string_mode(&self) -> bool {
        self.string_mode
    }

    /// The raw cell under the cursor.
    pub fn current(&self) -> u8 {
        self.grid.get(self.position.x, self.position.y)
    }

    /// Moves `steps` cells along the current direction and wraps onto the
    /// torus. An unset direction becomes `Right` without moving.
    pub fn advance(&mut self, steps: i64) {
        if self.direction == Direction::Unset {
            self.direction = Direction::Right;
        } else {
            self.position = self.position + self.direction.delta().scale(steps);
        }
        self.position = self.position.wrap(self.grid.size());
    }

    /// Decodes the cell under the cursor. Quotes flip string mode here, so
    /// the runner only sees `Decoded::Toggle` for them.
    pub fn scan(&mut self) -> Decoded {
        let c = self.current();
        if c == QUOTE {
            self.string_mode = !self.string_mode;
            return Decoded::Toggle;
        }
        if self.string_mode {
            let c = if c == 0 { b' ' } else { c };
            return Decoded::Push(i64::from(c));
        }
        if c.is_ascii_digit() {
            return Decoded::Push(i64::from(c - b'0'));
        }
        Decoded::Op(c)
    }

    /// The grid with the cursor marked, followed by the cursor position and
    /// the code under it.
    pub fn render(&self, marks: &Marks) -> String {
        let (x, y) = self.position();
        let mut out = self.grid.render(XY::new(x, y), marks);
        out.push_str(&format!("\n({},{}) {}", x, y, code_text(i64::from(self.current()))));
        out
    }
}
