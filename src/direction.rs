use crate::xy::{Coord, XY};

/// Travel direction of the cursor.
///
/// `Unset` only exists before the first tick; the scanner resolves it to
/// `Right` without moving, so the origin cell is the first one executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Unset,
    Up,
    Right,
    Down,
    Left,
}

/// Choices for `?`, indexed by the injected random source.
pub const RANDOM_CHOICES: [Direction; 4] = [
    Direction::Right,
    Direction::Left,
    Direction::Up,
    Direction::Down,
];

impl Direction {
    pub fn delta(&self) -> Coord {
        match self {
            Direction::Unset => XY::new(0, 0),
            Direction::Up => XY::new(0, -1),
            Direction::Down => XY::new(0, 1),
            Direction::Left => XY::new(-1, 0),
            Direction::Right => XY::new(1, 0),
        }
    }

    /// Maps a random draw onto [`RANDOM_CHOICES`], wrapping indices past the end.
    pub fn from_index(i: usize) -> Self {
        RANDOM_CHOICES[i % RANDOM_CHOICES.len()]
    }
}
