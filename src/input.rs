//! Blocking token and character reads for `&` and `~`.

use std::io::{self, BufRead, ErrorKind};

/// Result of one read attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Read<T> {
    Value(T),
    /// Data was consumed but did not form a value; the caller may retry.
    Malformed(String),
    /// End of stream.
    Closed,
}

fn peek_byte<R: BufRead + ?Sized>(r: &mut R) -> io::Result<Option<u8>> {
    loop {
        match r.fill_buf() {
            Ok(buf) => return Ok(buf.first().copied()),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}

fn read_byte<R: BufRead + ?Sized>(r: &mut R) -> io::Result<Option<u8>> {
    let b = peek_byte(r)?;
    if b.is_some() {
        r.consume(1);
    }
    Ok(b)
}

/// Longest integer token kept in memory; longer tokens are skipped.
pub const MAX_TOKEN_LEN: usize = 32;

/// Reads a whitespace-terminated integer token. Leading whitespace is
/// skipped and the single terminating whitespace byte is consumed.
pub fn read_int<R: BufRead + ?Sized>(r: &mut R) -> io::Result<Read<i64>> {
    let mut token = Vec::new();
    let mut overlong = false;
    loop {
        match peek_byte(r)? {
            None => break,
            Some(b) if b.is_ascii_whitespace() => {
                r.consume(1);
                if !token.is_empty() {
                    break;
                }
            }
            Some(b) => {
                r.consume(1);
                if token.len() < MAX_TOKEN_LEN {
                    token.push(b);
                } else {
                    overlong = true;
                }
            }
        }
    }
    if token.is_empty() {
        return Ok(Read::Closed);
    }
    if overlong {
        return Ok(Read::Malformed(format!(
            "token longer than {} bytes",
            MAX_TOKEN_LEN
        )));
    }
    let parsed = std::str::from_utf8(&token)
        .map_err(|e| e.to_string())
        .and_then(|s| s.parse::<i64>().map_err(|e| format!("{:?}: {}", s, e)));
    Ok(match parsed {
        Ok(v) => Read::Value(v),
        Err(reason) => Read::Malformed(reason),
    })
}

/// Reads one UTF-8 encoded character, newlines included.
pub fn read_char<R: BufRead + ?Sized>(r: &mut R) -> io::Result<Read<char>> {
    let Some(lead) = read_byte(r)? else {
        return Ok(Read::Closed);
    };
    let width = match lead {
        0x00..=0x7f => 1,
        0xc0..=0xdf => 2,
        0xe0..=0xef => 3,
        0xf0..=0xf7 => 4,
        _ => return Ok(Read::Malformed(format!("invalid utf-8 lead byte {:#04x}", lead))),
    };
    let mut bytes = vec![lead];
    while bytes.len() < width {
        match read_byte(r)? {
            Some(b) => bytes.push(b),
            None => return Ok(Read::Malformed("truncated utf-8 sequence".into())),
        }
    }
    Ok(match std::str::from_utf8(&bytes) {
        Ok(s) => s.chars().next().map_or(Read::Closed, Read::Value),
        Err(e) => Read::Malformed(e.to_string()),
    })
}
