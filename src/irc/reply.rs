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
/*
    numeric replies we understand, with the layout that follows
    ":<server> <code> " on the wire:

    001 RPL_WELCOME       "<nick> :Welcome to the <network> Network, <nick>"
    002 RPL_YOURHOST      "<nick> :Your host is <servername>, running version <ver>"
    003 RPL_CREATED       "<nick> :This server was created <date>"
    004 RPL_MYINFO        "<nick> <servername> <version> <umodes> <cmodes> [<cmodes with param>]"
    005 RPL_ISUPPORT      "<nick> <1-13 tokens> :are supported by this server"
    250 RPL_STATSCONN     "<nick> :Highest connection count: ..."
    251 RPL_LUSERCLIENT   "<nick> :There are <u> users and <i> invisible on <s> servers"
    254 RPL_LUSERCHANNELS "<nick> <channels> :channels formed"
    255 RPL_LUSERME       "<nick> :I have <c> clients and <s> servers"
    265 RPL_LOCALUSERS    "<nick> [<u> <m>] :Current local users <u>, max <m>"
    266 RPL_NETUSERS      "<nick> [<u> <m>] :Current global users <u>, max <m>"
    321 RPL_LISTSTART     "<nick> Channel :Users  Name"
    322 RPL_LIST          "<nick> <channel> <# visible> :<topic>"
    323 RPL_LISTEND       "<nick> :End of /LIST"
    332 RPL_TOPIC         "<nick> <channel> :<topic>"
    333 RPL_TOPICSETBY    "<nick> <channel> <setter> <setat>"
    353 RPL_NAMREPLY      "<nick> <symbol> <channel> :[prefix]<nick>{ [prefix]<nick>}"
    366 RPL_ENDOFNAMES    "<nick> <channel> :End of /NAMES list"
    422 ERR_NOMOTD        "<nick> :MOTD File is missing"

    every code has its own field layout, so each gets its own clause
    rather than some generic params splitter
*/
use crate::irc::err_defs::*;
use crate::irc::rpl_defs::*;
use crate::parser::{Cursor, ParseError};
use std::fmt;

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Reply::Status { code, text } => write!(f, "{:03} :{}", code, text),
            Reply::ChannelCount { count, text } => write!(f, "{:03} {} :{}", RPL_LUSERCHANNELS, count, text),
            Reply::List { channel } => write!(f, "{:03} {}", RPL_LIST, channel),
            Reply::Topic { channel, topic } => write!(f, "{:03} {} :{}", RPL_TOPIC, channel, topic),
            Reply::Ignored(code) => write!(f, "{:03}", code),
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum Reply {
    // server greeting/status text destined for the message log
    Status { code: u16, text: String },
    ChannelCount { count: u32, text: String },
    List { channel: String },
    Topic { channel: String, topic: String },
    // understood, but carries nothing we keep
    Ignored(u16),
}

// ":<text>\r\n"
fn trailing(cursor: &mut Cursor) -> Result<String, ParseError> {
    cursor.expect_literal(b":")?;
    let text = cursor.collect_until(b'\r')?;
    cursor.expect_literal(b"\r\n")?;
    Ok(text)
}

// skip_until('\r') eats the CR, so only the LF is left
fn skip_line(cursor: &mut Cursor) -> Result<(), ParseError> {
    cursor.skip_until(b'\r')?;
    cursor.expect_literal(b"\n")
}

fn skip_fields(cursor: &mut Cursor, n: usize) -> Result<(), ParseError> {
    for _ in 0..n {
        cursor.skip_until(b' ')?;
    }
    Ok(())
}

pub fn parse_reply(cursor: &mut Cursor, code: u16) -> Result<Reply, ParseError> {
    match code {
        RPL_WELCOME | RPL_YOURHOST | RPL_CREATED | RPL_LUSERCLIENT | RPL_LUSERME => {
            // our own nick echoed back
            skip_fields(cursor, 1)?;
            let text = trailing(cursor)?;
            Ok(Reply::Status { code, text })
        }
        RPL_LUSERCHANNELS => {
            skip_fields(cursor, 1)?;
            let count = cursor.parse_decimal()?;
            cursor.expect_literal(b" ")?;
            let text = trailing(cursor)?;
            Ok(Reply::ChannelCount { count, text })
        }
        RPL_ISUPPORT => {
            skip_fields(cursor, 1)?;
            skip_line(cursor)?;
            Ok(Reply::Ignored(code))
        }
        RPL_MYINFO => {
            // nick, server name, version, user modes; the channel modes
            // (and modes taking a parameter) go with the rest of the line
            skip_fields(cursor, 4)?;
            skip_line(cursor)?;
            Ok(Reply::Ignored(code))
        }
        RPL_LOCALUSERS | RPL_NETUSERS => {
            // nick, current, max
            skip_fields(cursor, 3)?;
            skip_line(cursor)?;
            Ok(Reply::Ignored(code))
        }
        RPL_STATSCONN | ERR_NOMOTD => {
            skip_fields(cursor, 1)?;
            skip_line(cursor)?;
            Ok(Reply::Ignored(code))
        }
        RPL_LISTSTART | RPL_LISTEND | RPL_TOPICSETBY | RPL_NAMREPLY | RPL_ENDOFNAMES => {
            skip_line(cursor)?;
            Ok(Reply::Ignored(code))
        }
        RPL_LIST => {
            skip_fields(cursor, 1)?;
            let channel = cursor.collect_until(b' ')?;
            cursor.expect_literal(b" ")?;
            // user count and topic, the topic arrives again with RPL_TOPIC on join
            skip_line(cursor)?;
            Ok(Reply::List { channel })
        }
        RPL_TOPIC => {
            skip_fields(cursor, 1)?;
            let channel = cursor.collect_until(b' ')?;
            cursor.expect_literal(b" :")?;
            let topic = cursor.collect_until(b'\r')?;
            cursor.expect_literal(b"\r\n")?;
            Ok(Reply::Topic { channel, topic })
        }
        _ => Err(ParseError::UnknownReply(code)),
    }
}
