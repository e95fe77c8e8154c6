//! The stack machine driving the scan, decode and execute loop.
//!
//! Each tick advances the cursor, notifies the observer, decodes the cell
//! and executes it to completion. The loop ends on `@`, or when one of the
//! injected streams fails.

use std::io::{BufRead, Write};

use tracing::{debug, trace, warn};

use crate::config::{Config, UndefinedPolicy};
use crate::direction::{Direction, RANDOM_CHOICES};
use crate::error::{Diagnostic, DiagnosticKind, Error, Result};
use crate::grid::Grid;
use crate::input::{self, Read};
use crate::op::Op;
use crate::scanner::Decoded;
use crate::state::State;

/// Maps an upper bound `n` to a value in `[0, n)`.
pub type RandomSource<'a> = Box<dyn FnMut(usize) -> usize + 'a>;

/// Called after every cursor advance and after every output.
pub type Observer<'a> = Box<dyn FnMut(&State) + 'a>;

pub struct Runner<'a, R, W> {
    state: State,
    input: R,
    output: W,
    random: RandomSource<'a>,
    observer: Option<Observer<'a>>,
    config: Config,
}

impl<'a, R: BufRead, W: Write> Runner<'a, R, W> {
    /// Loads `src` and wires the run to the given streams and random source.
    pub fn new(src: &[u8], input: R, output: W, random: impl FnMut(usize) -> usize + 'a) -> Self {
        Runner {
            state: State::new(Grid::parse(src)),
            input,
            output,
            random: Box::new(random),
            observer: None,
            config: Config::default(),
        }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.state.scanner.grid_mut().set_max_cells(config.max_cells);
        self.config = config;
        self
    }

    pub fn with_observer(mut self, observer: impl FnMut(&State) + 'a) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn push(&mut self, v: i64) {
        self.state.stack.push(v);
    }

    /// Runs until `@` is executed or a stream fails. Output is flushed
    /// either way.
    pub fn run(&mut self) -> Result<()> {
        let result = self.run_loop();
        let flushed = self.output.flush();
        result?;
        flushed?;
        debug!(ticks = self.state.ticks, "halted");
        Ok(())
    }

    fn run_loop(&mut self) -> Result<()> {
        while self.step()? {}
        Ok(())
    }

    /// Executes one tick. Returns `false` once the program has halted.
    pub fn step(&mut self) -> Result<bool> {
        if self.state.halted {
            return Ok(false);
        }
        let steps = if std::mem::take(&mut self.state.skip) { 2 } else { 1 };
        self.state.scanner.advance(steps);
        self.notify();

        let decoded = self.state.scanner.scan();
        trace!(position = ?self.state.position(), ?decoded, "tick");
        self.state.ticks += 1;
        self.execute(decoded)?;
        Ok(!self.state.halted)
    }

    fn notify(&mut self) {
        if let Some(observer) = self.observer.as_mut() {
            observer(&self.state);
        }
    }

    fn output(&mut self, text: &[u8]) -> Result<()> {
        self.output.write_all(text)?;
        self.notify();
        Ok(())
    }

    fn execute(&mut self, decoded: Decoded) -> Result<()> {
        match decoded {
            Decoded::Push(v) => self.state.stack.push(v),
            Decoded::Toggle => {}
            Decoded::Op(code) => match Op::from_byte(code) {
                Some(op) => self.dispatch(op, code)?,
                None => self.undefined(code)?,
            },
        }
        Ok(())
    }

    fn dispatch(&mut self, op: Op, code: u8) -> Result<()> {
        match op {
            Op::Add => self.binary(|a, b| a.wrapping_add(b)),
            Op::Sub => self.binary(|a, b| b.wrapping_sub(a)),
            Op::Mul => self.binary(|a, b| a.wrapping_mul(b)),
            Op::Div => self.binary(|a, b| if a == 0 { 0 } else { b.wrapping_div(a) }),
            Op::Mod => self.binary(|a, b| if a == 0 { 0 } else { b.wrapping_rem(a) }),
            Op::Not => self.unary(|a| i64::from(a == 0)),
            Op::GreaterThan => self.binary(|a, b| i64::from(b > a)),
            Op::Dup => self.state.stack.duplicate(),
            Op::Swap => self.state.stack.swap(),
            Op::Pop => {
                self.state.stack.pop();
            }
            Op::OutInt => {
                let v = self.state.stack.pop();
                self.output(v.to_string().as_bytes())?;
            }
            Op::OutChar => {
                let v = self.state.stack.pop();
                self.output(&[v as u8])?;
            }
            Op::InInt => {
                let v = self.read_with_retry(code, "number", input::read_int::<R>)?;
                self.state.stack.push(v);
            }
            Op::InChar => {
                let c = self.read_with_retry(code, "character", input::read_char::<R>)?;
                self.state.stack.push(i64::from(u32::from(c)));
            }
            Op::Get => {
                let y = self.state.stack.pop();
                let x = self.state.stack.pop();
                let v = self.state.scanner.grid().get(x, y);
                self.state.stack.push(i64::from(v));
            }
            Op::Put => {
                let y = self.state.stack.pop();
                let x = self.state.stack.pop();
                let v = self.state.stack.pop();
                self.state.scanner.grid_mut().put(x, y, v as u8);
            }
            Op::Move(direction) => self.state.scanner.set_direction(direction),
            Op::Random => {
                let pick = (self.random)(RANDOM_CHOICES.len());
                self.state.scanner.set_direction(Direction::from_index(pick));
            }
            Op::IfHorizontal => {
                let direction = if self.state.stack.pop() == 0 {
                    Direction::Right
                } else {
                    Direction::Left
                };
                self.state.scanner.set_direction(direction);
            }
            Op::IfVertical => {
                let direction = if self.state.stack.pop() == 0 {
                    Direction::Down
                } else {
                    Direction::Up
                };
                self.state.scanner.set_direction(direction);
            }
            Op::Bridge => self.state.skip = true,
            Op::Blank => {}
            Op::End => {
                debug!(position = ?self.state.position(), "end instruction");
                self.state.halted = true;
            }
        }
        Ok(())
    }

    /// Pops `a` then `b` and pushes `f(a, b)`.
    fn binary(&mut self, f: impl FnOnce(i64, i64) -> i64) {
        let a = self.state.stack.pop();
        let b = self.state.stack.pop();
        self.state.stack.push(f(a, b));
    }

    fn unary(&mut self, f: impl FnOnce(i64) -> i64) {
        let a = self.state.stack.pop();
        self.state.stack.push(f(a));
    }

    /// Reads until a value parses. Each malformed attempt is recorded and
    /// retried; only end of stream or a stream error gives up.
    fn read_with_retry<T>(
        &mut self,
        code: u8,
        what: &str,
        read: fn(&mut R) -> std::io::Result<Read<T>>,
    ) -> Result<T> {
        let prompt = format!("\n(Enter a {} '{}'): ", what, code as char);
        loop {
            if self.config.prompt {
                self.output(prompt.as_bytes())?;
            }
            self.output.flush()?;
            match read(&mut self.input)? {
                Read::Value(v) => return Ok(v),
                Read::Malformed(reason) => {
                    self.diagnose(code, DiagnosticKind::MalformedInput(reason));
                }
                Read::Closed => return Err(Error::InputClosed { op: code }),
            }
        }
    }

    fn undefined(&mut self, code: u8) -> Result<()> {
        if self.config.undefined == UndefinedPolicy::Strict {
            let (x, y) = self.state.position();
            return Err(Error::UndefinedInstruction { x, y, code });
        }
        self.diagnose(code, DiagnosticKind::UndefinedInstruction);
        Ok(())
    }

    fn diagnose(&mut self, code: u8, kind: DiagnosticKind) {
        let (x, y) = self.state.position();
        let diagnostic = Diagnostic { x, y, code, kind };
        warn!("{}", diagnostic);
        self.state.diagnostics.push(diagnostic);
    }
}
