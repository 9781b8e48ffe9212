/* rusty-ircc - an IRC client engine written in Rust
*  Copyright (C) Joanna Janet Zaitseva-Doyle <jjadoyle@gmail.com>

*  This program is free software: you can redistribute it and/or modify
*  it under the terms of the GNU Lesser General Public License as
*  published by the Free Software Foundation, either version 3 of the
*  License, or (at your option) any later version.

*  This program is distributed in the hope that it will be useful,
*  but WITHOUT ANY WARRANTY; without even the implied warranty of
*  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
*  GNU Lesser General Public License for more details.

*  You should have received a copy of the GNU Lesser General Public License
*  along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/
use crate::buffer::{LineBuffer, Source};
use crate::irc::command::{self, Command};
use crate::irc::reply::{self, Reply};
use log::trace;
use std::{error, fmt, io};

// a u32 can hold any 9 digit decimal number
pub const MAX_DECIMAL_DIGITS: usize = 9;

#[derive(Debug)]
pub enum ParseError {
    Incomplete,
    Eof,
    Unexpected { expected: u8, got: u8 },
    NotADigit(u8),
    NumberTooLarge,
    UnexpectedEol,
    UnknownReply(u16),
    UnknownCommand(String),
    UnsupportedTarget(String),
    Transport(io::Error),
}

impl ParseError {
    // Incomplete and Eof just mean the line hasn't fully arrived,
    // they don't say anything about the line being wrong
    pub fn is_incomplete(&self) -> bool {
        matches!(self, ParseError::Incomplete | ParseError::Eof)
    }
}

impl error::Error for ParseError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            ParseError::Transport(err) => Some(err),
            _ => None,
        }
    }
}

fn escape_byte(b: u8) -> char {
    if 31 < b && b < 128 {
        b as char
    } else {
        '.'
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParseError::Incomplete => write!(f, "Line not yet complete"),
            ParseError::Eof => write!(f, "Connection closed mid-line"),
            ParseError::Unexpected { expected, got } => write!(
                f,
                "Expected {}[{}] but got {}[{}]",
                escape_byte(*expected),
                expected,
                escape_byte(*got),
                got
            ),
            ParseError::NotADigit(b) => write!(f, "Expected a digit but got {}[{}]", escape_byte(*b), b),
            ParseError::NumberTooLarge => write!(f, "Int to be parsed is larger than i32 can store"),
            ParseError::UnexpectedEol => write!(f, "Unexpected end of line"),
            ParseError::UnknownReply(code) => write!(f, "Unimplemented code: {:03}", code),
            ParseError::UnknownCommand(cmd) => write!(f, "Unimplemented command: {}", cmd),
            ParseError::UnsupportedTarget(target) => write!(f, "Unsupported message target: {}", target),
            ParseError::Transport(err) => write!(f, "Read failed: {}", err),
        }
    }
}

impl From<io::Error> for ParseError {
    fn from(err: io::Error) -> Self {
        ParseError::Transport(err)
    }
}

/* byte-level primitives over a LineBuffer. when the cursor catches up with
 * the fill point, the source (if any) is asked for more; if there still
 * isn't anything, we bail out with Incomplete and the caller rewinds */
pub struct Cursor<'a> {
    buf: &'a mut LineBuffer,
    source: Option<&'a mut dyn Source>,
}

impl<'a> Cursor<'a> {
    pub fn new(buf: &'a mut LineBuffer) -> Cursor<'a> {
        Cursor { buf, source: None }
    }

    pub fn with_source(mut self, source: &'a mut dyn Source) -> Cursor<'a> {
        self.source = Some(source);
        self
    }

    fn fill(&mut self) -> Result<(), ParseError> {
        let closed = match self.source.as_mut() {
            Some(source) => {
                source.drain_into(self.buf)?;
                source.is_closed()
            }
            None => false,
        };
        if self.buf.has_pending() {
            Ok(())
        } else if closed {
            Err(ParseError::Eof)
        } else {
            Err(ParseError::Incomplete)
        }
    }

    pub fn current_byte(&mut self) -> Result<u8, ParseError> {
        if !self.buf.has_pending() {
            self.fill()?;
        }
        self.buf.peek().ok_or(ParseError::Incomplete)
    }

    pub fn next_byte(&mut self) -> Result<u8, ParseError> {
        if !self.buf.has_pending() {
            self.fill()?;
        }
        self.buf.advance().ok_or(ParseError::Incomplete)
    }

    pub fn expect_literal(&mut self, lit: &[u8]) -> Result<(), ParseError> {
        for &expected in lit {
            let got = self.next_byte()?;
            if got != expected {
                return Err(ParseError::Unexpected { expected, got });
            }
        }
        Ok(())
    }

    // the delimiter is left in place for the caller to expect
    pub fn collect_until(&mut self, delim: u8) -> Result<String, ParseError> {
        self.collect_until_any(&[delim])
    }

    // stops at whichever of the delimiters shows up first
    pub fn collect_until_any(&mut self, delims: &[u8]) -> Result<String, ParseError> {
        let mut out = Vec::new();
        loop {
            let b = self.current_byte()?;
            if delims.contains(&b) {
                break;
            }
            if b == b'\n' {
                return Err(ParseError::UnexpectedEol);
            }
            out.push(b);
            self.buf.advance();
        }
        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    // unlike collect_until this eats the delimiter too
    pub fn skip_until(&mut self, delim: u8) -> Result<usize, ParseError> {
        let mut n = 0;
        loop {
            let b = self.current_byte()?;
            if b == b'\n' && delim != b'\n' {
                return Err(ParseError::UnexpectedEol);
            }
            self.buf.advance();
            if b == delim {
                return Ok(n);
            }
            n += 1;
        }
    }

    pub fn parse_fixed_digits(&mut self, n: usize) -> Result<u32, ParseError> {
        let mut value = 0;
        for _ in 0..n {
            let b = self.next_byte()?;
            if !b.is_ascii_digit() {
                return Err(ParseError::NotADigit(b));
            }
            value = value * 10 + u32::from(b - b'0');
        }
        Ok(value)
    }

    pub fn parse_decimal(&mut self) -> Result<u32, ParseError> {
        let mut value = 0;
        let mut len = 0;
        while self.current_byte()?.is_ascii_digit() {
            if len >= MAX_DECIMAL_DIGITS {
                return Err(ParseError::NumberTooLarge);
            }
            let b = self.next_byte()?;
            value = value * 10 + u32::from(b - b'0');
            len += 1;
        }
        Ok(value)
    }
}

// one complete server -> client line
#[derive(Debug, PartialEq)]
pub enum Line {
    Ping(String),
    Reply { sender: String, reply: Reply },
    Command { sender: String, command: Command },
}

/*  PING is the only line we accept without a prefix, everything else is
 *    ":" sender SPACE ( 3digit SPACE reply-params / verb SPACE cmd-params ) CRLF
 *  where the params grammar depends entirely on the code or verb */
pub fn parse_line(cursor: &mut Cursor) -> Result<Line, ParseError> {
    if cursor.current_byte()? == b'P' {
        cursor.expect_literal(b"PING ")?;
        let token = cursor.collect_until(b'\r')?;
        cursor.expect_literal(b"\r\n")?;
        trace!("<< PING {}", token);
        return Ok(Line::Ping(token));
    }
    cursor.expect_literal(b":")?;
    let sender = cursor.collect_until(b' ')?;
    cursor.expect_literal(b" ")?;
    if cursor.current_byte()?.is_ascii_digit() {
        let code = cursor.parse_fixed_digits(3)? as u16;
        cursor.expect_literal(b" ")?;
        let reply = reply::parse_reply(cursor, code)?;
        trace!("<< :{} {:03} {:?}", sender, code, reply);
        Ok(Line::Reply { sender, reply })
    } else {
        let command = command::parse_command(cursor)?;
        trace!("<< :{} {:?}", sender, command);
        Ok(Line::Command { sender, command })
    }
}
