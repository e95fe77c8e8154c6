//! Terminal debugger: redraws the whole run state on every observer call.
//!
//! Frames are built only from [`State`]'s accessors. Program output and
//! echoed input are captured in a [`SharedBuffer`] so they can be shown
//! below the grid instead of scrolling the frame away.

use std::cell::RefCell;
use std::io::{self, BufRead, Read, Write};
use std::rc::Rc;
use std::thread;
use std::time::Duration;

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};
use tracing::warn;

use crate::grid::Marks;
use crate::op::code_text;
use crate::state::State;

const STACK_ROW: usize = 5;
const WARNINGS_SHOWN: usize = 5;

/// A cloneable in-memory sink; every clone appends to the same bytes.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Vec<u8> {
        self.0.borrow().clone()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Copies bytes into `copy` as they are consumed from `inner`. Bytes
/// buffered but not yet consumed are not echoed.
pub struct Tee<R, W> {
    inner: R,
    copy: W,
}

impl<R, W> Tee<R, W> {
    pub fn new(inner: R, copy: W) -> Self {
        Tee { inner, copy }
    }
}

impl<R: BufRead, W: Write> Read for Tee<R, W> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = {
            let available = self.inner.fill_buf()?;
            let n = available.len().min(buf.len());
            buf[..n].copy_from_slice(&available[..n]);
            n
        };
        self.consume(n);
        Ok(n)
    }
}

impl<R: BufRead, W: Write> BufRead for Tee<R, W> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.inner.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        if amt == 0 {
            return;
        }
        // the bytes are already buffered, so this does not block
        if let Ok(buf) = self.inner.fill_buf() {
            let n = amt.min(buf.len());
            if let Err(e) = self.copy.write_all(&buf[..n]) {
                warn!("input echo lost: {}", e);
            }
        }
        self.inner.consume(amt);
    }
}

pub struct Visualizer<T> {
    term: T,
    captured: SharedBuffer,
    interval: Duration,
}

impl<T: Write> Visualizer<T> {
    pub fn new(term: T, captured: SharedBuffer, interval: Duration) -> Self {
        Visualizer {
            term,
            captured,
            interval,
        }
    }

    pub fn frame(&self, state: &State) -> String {
        let mut out = String::from("\n=======Stack=======\n");
        for (i, v) in state.stack().iter().enumerate() {
            if i != 0 {
                out.push(if i % STACK_ROW == 0 { '\n' } else { ' ' });
            }
            out.push_str(&code_text(*v));
            out.push(',');
        }

        out.push_str("\n=======Debug=======\n");
        out.push_str(&state.render(&Marks::Color));

        let diagnostics = state.diagnostics();
        if !diagnostics.is_empty() {
            out.push_str("\n=======Warning=======\n");
            let skip = diagnostics.len().saturating_sub(WARNINGS_SHOWN);
            for (i, d) in diagnostics.iter().enumerate().skip(skip) {
                out.push_str(&format!("{}. {}\n", i + 1, d));
            }
        }

        out.push_str("\n=======Output=======\n");
        out.push_str(&String::from_utf8_lossy(&self.captured.contents()));
        out
    }

    /// Waits one interval, clears the terminal, then writes the frame for
    /// `state`.
    pub fn draw(&mut self, state: &State) -> io::Result<()> {
        let frame = self.frame(state);
        thread::sleep(self.interval);
        queue!(self.term, Clear(ClearType::All), MoveTo(0, 0))?;
        self.term.write_all(frame.as_bytes())?;
        self.term.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::Runner;
    use crate::input::{read_int, Read as Token};
    use crossterm::style::Stylize;
    use std::io::Cursor;

    #[test]
    fn shared_buffer_clones_share_bytes() {
        let a = SharedBuffer::new();
        let mut b = a.clone();
        b.write_all(b"hi").unwrap();
        assert_eq!(a.contents(), b"hi");
    }

    #[test]
    fn tee_echoes_reads() {
        let copy = SharedBuffer::new();
        let mut tee = Tee::new(Cursor::new("42\n"), copy.clone());
        let mut s = String::new();
        tee.read_to_string(&mut s).unwrap();
        assert_eq!(s, "42\n");
        assert_eq!(copy.contents(), b"42\n");
    }

    #[test]
    fn tee_echoes_only_consumed_bytes() {
        let copy = SharedBuffer::new();
        let mut tee = Tee::new(Cursor::new("12 34\n"), copy.clone());
        assert_eq!(read_int(&mut tee).unwrap(), Token::Value(12));
        assert_eq!(copy.contents(), b"12 ");
        assert_eq!(read_int(&mut tee).unwrap(), Token::Value(34));
        assert_eq!(copy.contents(), b"12 34\n");
    }

    #[test]
    fn frame_shows_stack_grid_warnings_and_output() {
        let captured = SharedBuffer::new();
        let mut runner = Runner::new(
            b"123456=.@",
            Cursor::new(""),
            captured.clone(),
            |_| 0,
        );
        runner.run().unwrap();
        let vis = Visualizer::new(Vec::new(), captured, Duration::ZERO);
        let frame = vis.frame(runner.state());

        assert!(frame.starts_with("\n=======Stack=======\n"));
        assert!(frame.contains("('\\u{1}' 1), ('\\u{2}' 2), ('\\u{3}' 3), ('\\u{4}' 4), ('\\u{5}' 5),"));
        let debug = format!("\n=======Debug=======\n123456=.{}\n(8,0) ('@' 64)", "@".on_red());
        assert!(frame.contains(&debug));
        assert!(frame.contains("=======Warning=======\n1. (6, 0) undefined: ('=' 61)\n"));
        assert!(frame.ends_with("=======Output=======\n6"));
    }

    #[test]
    fn draw_writes_frame_through_observer() {
        let captured = SharedBuffer::new();
        let term = SharedBuffer::new();
        let mut vis = Visualizer::new(term.clone(), captured.clone(), Duration::ZERO);
        let input = Tee::new(Cursor::new("7\n"), captured.clone());
        let mut runner = Runner::new(b"&.@", input, captured, |_| 0)
            .with_observer(move |state: &State| vis.draw(state).unwrap());
        runner.run().unwrap();

        let text = String::from_utf8(term.contents()).unwrap();
        assert_eq!(text.matches("=======Stack=======").count(), 4);
        let mut clear = Vec::new();
        queue!(clear, Clear(ClearType::All), MoveTo(0, 0)).unwrap();
        let clear = String::from_utf8(clear).unwrap();
        assert_eq!(text.matches(clear.as_str()).count(), 4);
        assert!(text.ends_with("=======Output=======\n7\n7"));
    }
}
