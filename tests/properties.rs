//! Property-based tests for the stack primitives, operator pop order,
//! wraparound and cell access.

use std::io::Cursor;

use befunge::{Direction, Grid, Runner, Scanner, Stack};
use proptest::prelude::*;

/// Executes a single operator with `b` beneath `a` on the stack and returns
/// the new top.
fn binary_result(op: char, b: i64, a: i64) -> i64 {
    let src = format!("{}@", op);
    let mut out = Vec::new();
    let mut runner = Runner::new(src.as_bytes(), Cursor::new(""), &mut out, |_| 0);
    runner.push(b);
    runner.push(a);
    runner.run().unwrap();
    runner.state().stack().last().copied().unwrap_or(0)
}

// =============================================================================
// Stack primitives
// =============================================================================

proptest! {
    /// duplicate grows the stack by one and copies the top
    #[test]
    fn prop_duplicate_copies_top(values in prop::collection::vec(any::<i64>(), 1..32)) {
        let mut stack = Stack::from(values.clone());
        stack.duplicate();
        prop_assert_eq!(stack.len(), values.len() + 1);
        prop_assert_eq!(stack.as_slice()[values.len()], values[values.len() - 1]);
    }

    /// swap twice on two or more values is the identity
    #[test]
    fn prop_swap_is_involution(values in prop::collection::vec(any::<i64>(), 2..32)) {
        let mut stack = Stack::from(values.clone());
        stack.swap();
        stack.swap();
        prop_assert_eq!(stack.as_slice(), values.as_slice());
    }

    /// swap on a lone value leaves it on top of a zero
    #[test]
    fn prop_swap_single(v: i64) {
        let mut stack = Stack::from(vec![v]);
        stack.swap();
        prop_assert_eq!(stack.as_slice(), &[0, v]);
    }

    /// pop on empty is always zero, however often it is called
    #[test]
    fn prop_pop_empty_is_zero(n in 1usize..16) {
        let mut stack = Stack::new();
        for _ in 0..n {
            prop_assert_eq!(stack.pop(), 0);
        }
        prop_assert!(stack.is_empty());
    }
}

// =============================================================================
// Operator pop order
// =============================================================================

proptest! {
    /// `-` computes b - a where a is popped first
    #[test]
    fn prop_sub_order(a in -1_000_000i64..1_000_000, b in -1_000_000i64..1_000_000) {
        prop_assert_eq!(binary_result('-', b, a), b - a);
    }

    /// `/` truncates toward zero and clamps division by zero
    #[test]
    fn prop_div_order(a in -1000i64..1000, b in -1_000_000i64..1_000_000) {
        let expected = if a == 0 { 0 } else { b / a };
        prop_assert_eq!(binary_result('/', b, a), expected);
    }

    /// `%` follows the sign of b and clamps modulo by zero
    #[test]
    fn prop_mod_order(a in -1000i64..1000, b in -1_000_000i64..1_000_000) {
        let expected = if a == 0 { 0 } else { b % a };
        prop_assert_eq!(binary_result('%', b, a), expected);
    }

    /// `` ` `` pushes 1 exactly when b > a
    #[test]
    fn prop_greater_than_order(a: i64, b: i64) {
        prop_assert_eq!(binary_result('`', b, a), i64::from(b > a));
    }

    /// division and modulo by zero never fail
    #[test]
    fn prop_zero_divisor(b: i64) {
        prop_assert_eq!(binary_result('/', b, 0), 0);
        prop_assert_eq!(binary_result('%', b, 0), 0);
    }
}

// =============================================================================
// Wraparound and cell access
// =============================================================================

fn grid_of(w: usize, h: usize) -> Grid {
    let row = "x".repeat(w);
    let src = vec![row; h].join("\n");
    Grid::parse(src.as_bytes())
}

proptest! {
    /// stepping off any edge re-enters from the opposite one
    #[test]
    fn prop_wraps_on_every_edge(w in 1usize..20, h in 1usize..20) {
        let mut s = Scanner::new(grid_of(w, h));
        s.advance(1);

        for _ in 0..w - 1 {
            s.advance(1);
        }
        prop_assert_eq!(s.position(), (w - 1, 0));
        s.advance(1);
        prop_assert_eq!(s.position(), (0, 0));

        s.set_direction(Direction::Left);
        s.advance(1);
        prop_assert_eq!(s.position(), (w - 1, 0));

        s.set_direction(Direction::Up);
        s.advance(1);
        prop_assert_eq!(s.position(), (w - 1, h - 1));
        s.set_direction(Direction::Down);
        s.advance(1);
        prop_assert_eq!(s.position(), (w - 1, 0));
    }

    /// a full lap in any direction returns to the start
    #[test]
    fn prop_full_lap_returns(w in 1usize..20, h in 1usize..20, dir in 0usize..4) {
        let mut s = Scanner::new(grid_of(w, h));
        s.advance(1);
        let direction = Direction::from_index(dir);
        s.set_direction(direction);
        let lap = match direction {
            Direction::Left | Direction::Right => w,
            _ => h,
        };
        for _ in 0..lap {
            s.advance(1);
        }
        prop_assert_eq!(s.position(), (0, 0));
    }

    /// a put inside the envelope is read back unchanged
    #[test]
    fn prop_get_put_round_trip(w in 1usize..20, h in 1usize..20, x in 0usize..20, y in 0usize..20, v: u8) {
        let mut grid = grid_of(w, h);
        let (x, y) = (x % w, y % h);
        prop_assert!(grid.put(x as i64, y as i64, v));
        prop_assert_eq!(grid.get(x as i64, y as i64), v);
        prop_assert_eq!(grid.size().x, w);
        prop_assert_eq!(grid.size().y, h);
    }

    /// string mode pushes codes in scan order so pops come back reversed
    #[test]
    fn prop_string_mode_reverses(text in "[a-zA-Z0-9 ]{1,16}") {
        let src = format!("\"{}\"{}@", text, ",".repeat(text.len()));
        let mut out = Vec::new();
        let mut runner = Runner::new(src.as_bytes(), Cursor::new(""), &mut out, |_| 0);
        runner.run().unwrap();
        drop(runner);
        let reversed: String = text.chars().rev().collect();
        prop_assert_eq!(String::from_utf8(out).unwrap(), reversed);
    }
}
