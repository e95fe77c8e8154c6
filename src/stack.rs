/// Operand stack. Popping an empty stack yields 0 and is never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stack {
    values: Vec<i64>,
}

impl Stack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, v: i64) {
        self.values.push(v);
    }

    pub fn pop(&mut self) -> i64 {
        self.values.pop().unwrap_or(0)
    }

    /// Exchanges the top two values. A lone value `[v]` is treated as
    /// `[v, 0]` and so becomes `[0, v]`; an empty stack is left alone.
    pub fn swap(&mut self) {
        match self.values.len() {
            0 => return,
            1 => self.values.push(0),
            _ => {}
        }
        let n = self.values.len();
        self.values.swap(n - 1, n - 2);
    }

    /// Pushes a copy of the top; an empty stack becomes `[0]`.
    pub fn duplicate(&mut self) {
        let top = self.values.last().copied().unwrap_or(0);
        self.values.push(top);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Bottom to top.
    pub fn as_slice(&self) -> &[i64] {
        &self.values
    }
}

impl From<Vec<i64>> for Stack {
    fn from(values: Vec<i64>) -> Self {
        Stack { values }
    }
}
