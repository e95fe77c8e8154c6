//! The program area: a mutable rectangle of byte cells.
//!
//! Reads outside the envelope yield 0 and never mutate. Writes past the
//! right or bottom edge grow the envelope (zero padded) and growth never
//! shrinks. Negative coordinates are never written.

use std::collections::{BTreeMap, BTreeSet};

use crossterm::style::Stylize;
use tracing::{debug, warn};

use crate::xy::XY;

/// Default budget on the total number of cells autogrow may reach.
pub const DEFAULT_MAX_CELLS: usize = 1 << 24;

/// How the cursor and edited cells are highlighted when rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marks {
    /// Brackets around the cursor, no highlighting of edits.
    Plain,
    /// Red background on the cursor, blue background on edited cells.
    Color,
}

impl Marks {
    fn cursor(&self, out: &mut String, text: &str) {
        match self {
            Marks::Plain => {
                out.push('[');
                out.push_str(text);
                out.push(']');
            }
            Marks::Color => out.push_str(&text.on_red().to_string()),
        }
    }

    fn edited(&self, out: &mut String, text: &str) {
        match self {
            Marks::Plain => out.push_str(text),
            Marks::Color => out.push_str(&text.on_blue().to_string()),
        }
    }

    fn unprintable(&self) -> String {
        match self {
            Marks::Plain => String::from("?"),
            Marks::Color => "?".red().on_blue().to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Grid {
    rows: Vec<Vec<u8>>,
    width: usize,
    height: usize,
    edited: BTreeMap<usize, BTreeSet<usize>>,
    max_cells: usize,
}

impl Grid {
    /// Builds a grid from program text, one row per `\n`-separated line.
    /// Ragged rows are zero padded to the longest one; the envelope is
    /// never smaller than 1x1.
    pub fn parse(src: &[u8]) -> Self {
        let mut rows: Vec<Vec<u8>> = src.split(|&b| b == b'\n').map(|l| l.to_vec()).collect();
        let width = rows.iter().map(|r| r.len()).max().unwrap_or(0).max(1);
        for row in rows.iter_mut() {
            row.resize(width, 0);
        }
        let height = rows.len();
        Grid {
            rows,
            width,
            height,
            edited: BTreeMap::new(),
            max_cells: DEFAULT_MAX_CELLS,
        }
    }

    pub fn set_max_cells(&mut self, max_cells: usize) {
        self.max_cells = max_cells;
    }

    pub fn size(&self) -> XY<usize> {
        XY::new(self.width, self.height)
    }

    /// Bounds-checked read; anything outside the envelope is 0.
    pub fn get(&self, x: i64, y: i64) -> u8 {
        let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
            return 0;
        };
        self.rows
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(0)
    }

    /// Bounds-checked write with autogrow. Returns whether the cell was
    /// written: negative coordinates, and writes that would grow the grid
    /// past the configured cell budget, are dropped.
    pub fn put(&mut self, x: i64, y: i64, v: u8) -> bool {
        let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
            return false;
        };
        if x >= self.width || y >= self.height {
            let width = self.width.max(x.saturating_add(1));
            let height = self.height.max(y.saturating_add(1));
            let fits = width.checked_mul(height).is_some_and(|cells| cells <= self.max_cells);
            if !fits {
                warn!(x, y, max_cells = self.max_cells, "write past cell budget dropped");
                return false;
            }
            self.grow(width, height);
        }
        self.rows[y][x] = v;
        self.edited.entry(y).or_default().insert(x);
        true
    }

    fn grow(&mut self, width: usize, height: usize) {
        self.width = self.width.max(width);
        self.height = self.height.max(height);
        debug!(width = self.width, height = self.height, "grid grown");
        self.rows.resize_with(self.height, Vec::new);
        for row in self.rows.iter_mut() {
            row.resize(self.width, 0);
        }
    }

    /// Whether `p` has written to the cell since the program was loaded.
    pub fn is_edited(&self, x: usize, y: usize) -> bool {
        self.edited.get(&y).is_some_and(|cols| cols.contains(&x))
    }

    /// Renders every row, highlighting the cell at `cursor` and any edited
    /// cells with the given marks. Trailing blanks of each row are dropped.
    pub fn render(&self, cursor: XY<usize>, marks: &Marks) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for (y, row) in self.rows.iter().enumerate() {
            let end = row.iter().rposition(|&c| c != 0 && c != b' ').map_or(0, |i| i + 1);
            let end = if y == cursor.y { end.max(cursor.x + 1) } else { end };
            for (x, &c) in row.iter().enumerate().take(end) {
                let text = match printable(c) {
                    Some(ch) => ch.to_string(),
                    None => marks.unprintable(),
                };
                if cursor == XY::new(x, y) {
                    marks.cursor(&mut out, &text);
                } else if self.is_edited(x, y) && printable(c).is_some() {
                    marks.edited(&mut out, &text);
                } else {
                    out.push_str(&text);
                }
            }
            out.push('\n');
        }
        let trimmed = out.trim_end_matches('\n').len();
        out.truncate(trimmed);
        out
    }
}

fn printable(c: u8) -> Option<char> {
    match c {
        0 => Some(' '),
        c if c == b' ' || c.is_ascii_graphic() => Some(c as char),
        _ => None,
    }
}
