// client
// this file contains the engine entry points the presentation layer calls:
// connect, process pending input once per frame, and the fire-and-forget
// writers. all of it runs on the caller's thread and never blocks on reads
extern crate log;

use crate::buffer::LineBuffer;
use crate::io::{self as transport, Transport};
use crate::irc::error::Error as IrcError;
use crate::irc::{Session, View};
use crate::parser::{self, Cursor, Line, ParseError};

use log::{debug, info, trace, warn};
use std::io::{Error as IoError, Read, Write};
use std::net::TcpStream;
use std::{error, fmt};

#[derive(Debug)]
pub enum ClientError {
    // (a) transport-fatal
    Io(IoError),
    NoAddress(String),
    Closed,
    // (b) the offending line has been thrown away, carry on if you like
    Parse(ParseError),
    Irc(IrcError),
}

impl ClientError {
    // fatal errors leave the connection unusable, anything else only
    // cost us a single line
    pub fn is_fatal(&self) -> bool {
        matches!(self, ClientError::Io(_) | ClientError::NoAddress(_) | ClientError::Closed)
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Io(err) => write!(f, "I/O error: {}", err),
            ClientError::NoAddress(host) => write!(f, "could not connect to any address for {}", host),
            ClientError::Closed => write!(f, "connection is closed"),
            ClientError::Parse(err) => write!(f, "{}", err),
            ClientError::Irc(err) => write!(f, "{}", err),
        }
    }
}

impl error::Error for ClientError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            ClientError::Io(err) => Some(err),
            ClientError::Parse(err) => Some(err),
            ClientError::Irc(err) => Some(err),
            _ => None,
        }
    }
}

impl From<IoError> for ClientError {
    fn from(err: IoError) -> Self {
        ClientError::Io(err)
    }
}

impl From<ParseError> for ClientError {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::Transport(err) => ClientError::Io(err),
            err => ClientError::Parse(err),
        }
    }
}

impl From<IrcError> for ClientError {
    fn from(err: IrcError) -> Self {
        ClientError::Irc(err)
    }
}

#[derive(Debug)]
pub struct Client<S = TcpStream> {
    transport: Transport<S>,
    input: LineBuffer,
    // set after a grammar error until we're past the bad line's LF
    resync: bool,
}

impl Client<TcpStream> {
    /* resolve, connect to the first address that answers, register and
     * ask for the channel list, then go non-blocking for good */
    pub fn connect(host: &str, port: u16, nick: &str) -> Result<Client<TcpStream>, ClientError> {
        info!("connecting to {}:{} as {}", host, port, nick);
        let addrs = transport::resolve(host, port)?;
        let stream = match transport::connect_any(&addrs) {
            Some(stream) => stream,
            None => return Err(ClientError::NoAddress(host.to_string())),
        };
        let mut client = Client::new(stream);
        client.register(nick)?;
        if let Some(stream) = client.transport.stream() {
            stream.set_nonblocking(true)?;
        }
        Ok(client)
    }
}

impl<S> Client<S> {
    pub fn new(stream: S) -> Client<S> {
        Client {
            transport: Transport::new(stream),
            input: LineBuffer::new(),
            resync: false,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.transport.is_open()
    }

    // bytes received but not yet parsed
    pub fn pending_input(&self) -> usize {
        self.input.remaining()
    }

    pub fn stream(&self) -> Option<&S> {
        self.transport.stream()
    }

    pub fn close(&mut self) {
        self.transport.close();
    }
}

impl<S: Read + Write> Client<S> {
    fn send_line(&mut self, line: &str) -> Result<(), ClientError> {
        if !self.transport.is_open() {
            return Err(ClientError::Closed);
        }
        self.transport.send_line(line)?;
        Ok(())
    }

    pub fn register(&mut self, nick: &str) -> Result<(), ClientError> {
        self.send_line(&format!("NICK {}", nick))?;
        self.send_line(&format!("USER {} * * :{}", nick, nick))?;
        self.send_line("LIST")
    }

    pub fn send_message(&mut self, text: &str, channel: &str) -> Result<(), ClientError> {
        self.send_line(&format!("PRIVMSG {} :{}", channel, text))
    }

    pub fn join_channel(&mut self, channel: &str) -> Result<(), ClientError> {
        self.send_line(&format!("JOIN {}", channel))
    }

    // clicking a channel: look at it and join it
    pub fn enter_channel(&mut self, session: &mut Session, index: usize) -> Result<(), ClientError> {
        if !session.select(View::Channel(index)) {
            return Err(IrcError::NoChannelAt(index).into());
        }
        let name = session.channels()[index].get_name().to_string();
        self.join_channel(&name)
    }

    // say something in the current channel, and show it locally since
    // the server won't echo it back to us
    pub fn say(&mut self, session: &mut Session, text: &str) -> Result<(), ClientError> {
        let channel = session.record_own_message(text)?;
        self.send_message(text, &channel)
    }

    // throw bytes away up to and including the next LF;
    // false if we ran out before finding one
    fn skip_bad_line(&mut self) -> bool {
        while let Some(b) = self.input.advance() {
            if b == b'\n' {
                return true;
            }
        }
        false
    }

    fn handle_line(&mut self, session: &mut Session, line: Line) -> Result<(), ClientError> {
        match line {
            Line::Ping(token) => {
                // the peer hung up in the same read, nobody to answer
                if !self.transport.is_open() {
                    debug!("not answering PING {}, connection is gone", token);
                    return Ok(());
                }
                self.send_line(&format!("PONG {}", token))
            }
            Line::Reply { sender, reply } => Ok(session.apply_reply(&sender, reply)?),
            Line::Command { sender, command } => Ok(session.apply_command(&sender, command)?),
        }
    }

    /* drain the socket, then parse and apply every complete line sitting in
     * the buffer. a partial line is left for the next call. returns how many
     * lines were handled, or the first error; after a non-fatal error the bad
     * line has been discarded and calling again picks up with the next one */
    pub fn process_pending_input(&mut self, session: &mut Session) -> Result<usize, ClientError> {
        self.input.compact();
        self.transport.drain(&mut self.input)?;

        let mut handled = 0;
        loop {
            if self.resync {
                if !self.skip_bad_line() {
                    break;
                }
                self.resync = false;
            }
            self.input.reset_if_consumed();
            if !self.input.has_pending() {
                break;
            }

            let mark = self.input.mark();
            let parsed = {
                let mut cursor = Cursor::new(&mut self.input).with_source(&mut self.transport);
                parser::parse_line(&mut cursor)
            };
            match parsed {
                Ok(line) => {
                    handled += 1;
                    self.handle_line(session, line)?;
                }
                Err(ref err) if err.is_incomplete() => {
                    trace!("partial line, {} bytes held back", self.input.cursor() - mark);
                    self.input.rewind(mark);
                    break;
                }
                Err(ParseError::Transport(err)) => return Err(ClientError::Io(err)),
                Err(err) => {
                    // if the byte that tripped us was the LF itself the
                    // bad line is already behind us
                    self.resync = self.input.last_consumed() != Some(b'\n');
                    warn!("discarding line: {}", err);
                    return Err(ClientError::Parse(err));
                }
            }
        }
        if !self.transport.is_open() && self.input.has_pending() {
            debug!("connection gone with {} unparsed bytes", self.input.remaining());
        }
        Ok(handled)
    }
}

impl<S> Drop for Client<S> {
    fn drop(&mut self) {
        self.transport.close();
    }
}
