use std::ops::Add;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct XY<A> {
    pub x: A,
    pub y: A,
}

impl<A> XY<A> {
    pub fn new(x: A, y: A) -> Self {
        XY { x, y }
    }
}

impl<A: Add<Output = A>> Add for XY<A> {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        XY::new(self.x + other.x, self.y + other.y)
    }
}

pub type Coord = XY<i64>;

impl Coord {
    pub fn scale(self, steps: i64) -> Self {
        XY::new(self.x * steps, self.y * steps)
    }

    /// Wraps both components into `[0, bounds)`, treating the plane as a torus.
    pub fn wrap(self, bounds: XY<usize>) -> Self {
        let w = bounds.x.max(1) as i64;
        let h = bounds.y.max(1) as i64;
        XY::new(self.x.rem_euclid(w), self.y.rem_euclid(h))
    }
}
