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
extern crate dns_lookup;
extern crate log;
use crate::buffer::{LineBuffer, Source};
use dns_lookup::{getaddrinfo, AddrInfoHints, SockType};
use log::{debug, info, trace, warn};
use std::io::{Error, ErrorKind, Read, Result, Write};
use std::net::{SocketAddr, TcpStream};

pub const IRC_PORT: u16 = 6667;

// each read() goes into a scratch region of this size before being
// appended to the line buffer
pub const READ_CHUNK_SIZE: usize = 64 * 1024;

/* resolve a hostname to every stream socket address it maps to,
 * in the order the resolver gave them to us */
pub fn resolve(host: &str, port: u16) -> Result<Vec<SocketAddr>> {
    let hints = AddrInfoHints {
        socktype: SockType::Stream.into(),
        ..AddrInfoHints::default()
    };
    let service = port.to_string();
    let mut addrs = Vec::new();
    for info in getaddrinfo(Some(host), Some(&service), Some(hints)).map_err(Error::from)? {
        addrs.push(info?.sockaddr);
    }
    debug!("{} resolved to {} address(es)", host, addrs.len());
    Ok(addrs)
}

/* try each address in turn, first one to accept wins */
pub fn connect_any(addrs: &[SocketAddr]) -> Option<TcpStream> {
    for addr in addrs {
        match TcpStream::connect(addr) {
            Ok(stream) => {
                info!("connected to {}", addr);
                return Some(stream);
            }
            Err(err) => warn!("connect to {} failed: {}", addr, err),
        }
    }
    None
}

/* owns the socket; once the peer hangs up (or close() is called) the
 * stream is dropped and nothing more is read from or written to it */
#[derive(Debug)]
pub struct Transport<S> {
    stream: Option<S>,
    scratch: Box<[u8]>,
}

impl<S> Transport<S> {
    pub fn new(stream: S) -> Transport<S> {
        Transport {
            stream: Some(stream),
            scratch: vec![0; READ_CHUNK_SIZE].into_boxed_slice(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.stream.is_some()
    }

    pub fn stream(&self) -> Option<&S> {
        self.stream.as_ref()
    }

    // dropping the stream closes the descriptor, so calling this
    // any number of times is harmless
    pub fn close(&mut self) {
        if self.stream.take().is_some() {
            info!("connection closed");
        }
    }
}

impl<S: Read + Write> Transport<S> {
    // appends the CR-LF delimiter, so pass an undelimited line
    pub fn send_line(&mut self, line: &str) -> Result<()> {
        let stream = match self.stream.as_mut() {
            Some(stream) => stream,
            None => return Err(Error::new(ErrorKind::NotConnected, "connection is closed")),
        };
        trace!(">> {}", line);
        let mut out = Vec::with_capacity(line.len() + 2);
        out.extend_from_slice(line.as_bytes());
        out.extend_from_slice(b"\r\n");
        stream.write_all(&out)?;
        stream.flush()
    }

    // read until the socket would block, appending everything to buf;
    // a zero-length read means the peer closed the connection
    pub fn drain(&mut self, buf: &mut LineBuffer) -> Result<usize> {
        let mut total = 0;
        loop {
            let result = match self.stream.as_mut() {
                Some(stream) => stream.read(&mut self.scratch),
                None => break,
            };
            match result {
                Ok(0) => {
                    info!("server closed the connection");
                    self.stream = None;
                    break;
                }
                Ok(n) => {
                    buf.append_bytes(&self.scratch[..n]);
                    total += n;
                }
                Err(ref e) if e.kind() == ErrorKind::WouldBlock => break,
                Err(ref e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        if total > 0 {
            trace!("drained {} bytes", total);
        }
        Ok(total)
    }
}

impl<S: Read + Write> Source for Transport<S> {
    fn drain_into(&mut self, buf: &mut LineBuffer) -> Result<usize> {
        self.drain(buf)
    }

    fn is_closed(&self) -> bool {
        !self.is_open()
    }
}
