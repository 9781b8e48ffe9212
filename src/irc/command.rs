/* rusty-ircc - an IRC client engine written in Rust
*  Copyright (C) 2020 Joanna Janet Zaitseva-Doyle <jjadoyle@gmail.com>

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
use crate::parser::{Cursor, ParseError};

#[derive(Debug, PartialEq)]
pub enum Command {
    Join(String),                              // #channel
    Privmsg { target: String, text: String }, // #channel, message
}

// the verb has already been told apart from a numeric, so we're
// sitting right at its first letter
pub fn parse_command(cursor: &mut Cursor) -> Result<Command, ParseError> {
    // a verb we don't know may well have no parameters at all
    let verb = cursor.collect_until_any(b" \r")?;
    match &verb[..] {
        "JOIN" => {
            cursor.expect_literal(b" :")?;
            let channel = cursor.collect_until(b'\r')?;
            cursor.expect_literal(b"\r\n")?;
            Ok(Command::Join(channel))
        }
        "PRIVMSG" => {
            cursor.expect_literal(b" ")?;
            // one target only, and only channels for now
            let target = cursor.collect_until(b' ')?;
            if !target.starts_with('#') {
                return Err(ParseError::UnsupportedTarget(target));
            }
            cursor.expect_literal(b" :")?;
            let text = cursor.collect_until(b'\r')?;
            cursor.expect_literal(b"\r\n")?;
            Ok(Command::Privmsg { target, text })
        }
        _ => Err(ParseError::UnknownCommand(verb)),
    }
}
