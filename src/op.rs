//! Opcode table.
//!
//! Digits and string-mode literals never reach this table; the scanner
//! decodes them into pushes before dispatch.

use crate::direction::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    /// `+` push a + b
    Add,
    /// `-` push b - a
    Sub,
    /// `*` push a * b
    Mul,
    /// `/` push b / a, or 0 when a is 0
    Div,
    /// `%` push b % a, or 0 when a is 0
    Mod,
    /// `!` logical not
    Not,
    /// `` ` `` push 1 if b > a
    GreaterThan,
    /// `:`
    Dup,
    /// `\`
    Swap,
    /// `$`
    Pop,
    /// `.` write the popped value as decimal text
    OutInt,
    /// `,` write the popped value as a character
    OutChar,
    /// `&`
    InInt,
    /// `~`
    InChar,
    /// `g` pop y, x; push the cell at (x, y)
    Get,
    /// `p` pop y, x, v; store v at (x, y)
    Put,
    /// `>` `<` `^` `v`
    Move(Direction),
    /// `?`
    Random,
    /// `_` right when zero, left otherwise
    IfHorizontal,
    /// `|` down when zero, up otherwise
    IfVertical,
    /// `#` skip the next cell
    Bridge,
    /// Space, and the zero cells produced by padding.
    Blank,
    /// `@`
    End,
}

impl Op {
    pub fn from_byte(c: u8) -> Option<Self> {
        let op = match c {
            b'+' => Op::Add,
            b'-' => Op::Sub,
            b'*' => Op::Mul,
            b'/' => Op::Div,
            b'%' => Op::Mod,
            b'!' => Op::Not,
            b'`' => Op::GreaterThan,
            b':' => Op::Dup,
            b'\\' => Op::Swap,
            b'$' => Op::Pop,
            b'.' => Op::OutInt,
            b',' => Op::OutChar,
            b'&' => Op::InInt,
            b'~' => Op::InChar,
            b'g' => Op::Get,
            b'p' => Op::Put,
            b'>' => Op::Move(Direction::Right),
            b'<' => Op::Move(Direction::Left),
            b'^' => Op::Move(Direction::Up),
            b'v' => Op::Move(Direction::Down),
            b'?' => Op::Random,
            b'_' => Op::IfHorizontal,
            b'|' => Op::IfVertical,
            b'#' => Op::Bridge,
            b' ' | 0 => Op::Blank,
            b'@' => Op::End,
            _ => return None,
        };
        Some(op)
    }
}

/// Renders a value as `('c' 99)`: the quoted character (escaped when not
/// printable) followed by its code.
pub fn code_text(v: i64) -> String {
    let quoted = match u32::try_from(v).ok().and_then(char::from_u32) {
        Some(c) => format!("{:?}", c),
        None => String::from("'\u{fffd}'"),
    };
    format!("({} {})", quoted, v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_direction_ops() {
        assert_eq!(Op::from_byte(b'v'), Some(Op::Move(Direction::Down)));
        assert_eq!(Op::from_byte(b'^'), Some(Op::Move(Direction::Up)));
        assert_eq!(Op::from_byte(b'<'), Some(Op::Move(Direction::Left)));
        assert_eq!(Op::from_byte(b'>'), Some(Op::Move(Direction::Right)));
    }

    #[test]
    fn zero_cell_is_blank() {
        assert_eq!(Op::from_byte(0), Some(Op::Blank));
        assert_eq!(Op::from_byte(b' '), Some(Op::Blank));
    }

    #[test]
    fn unknown_bytes_are_undefined() {
        for c in [b'=', b'a', b'"', b'0', 0x7f, 0xff] {
            assert_eq!(Op::from_byte(c), None, "byte {c}");
        }
    }

    #[test]
    fn code_text_quotes_and_escapes() {
        assert_eq!(code_text(61), "('=' 61)");
        assert_eq!(code_text(10), "('\\n' 10)");
        assert_eq!(code_text(-1), "('\u{fffd}' -1)");
    }
}
