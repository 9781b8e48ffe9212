// an in-memory stand-in for a non-blocking socket: the test queues chunks
// through a Remote handle, the client reads them one chunk per read() and
// gets WouldBlock once the queue is dry (or EOF after hang_up)
#![allow(dead_code)]

use rusty_ircc::{Client, Session};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{self, ErrorKind, Read, Write};
use std::rc::Rc;

#[derive(Debug, Default)]
struct Wire {
    inbound: VecDeque<Vec<u8>>,
    outbound: Vec<u8>,
    eof: bool,
}

#[derive(Debug)]
pub struct MockStream {
    wire: Rc<RefCell<Wire>>,
}

#[derive(Debug, Clone)]
pub struct Remote {
    wire: Rc<RefCell<Wire>>,
}

impl Read for MockStream {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        let mut wire = self.wire.borrow_mut();
        match wire.inbound.pop_front() {
            Some(mut chunk) => {
                if chunk.len() > out.len() {
                    let rest = chunk.split_off(out.len());
                    wire.inbound.push_front(rest);
                }
                out[..chunk.len()].copy_from_slice(&chunk);
                Ok(chunk.len())
            }
            None if wire.eof => Ok(0),
            None => Err(io::Error::new(ErrorKind::WouldBlock, "nothing queued")),
        }
    }
}

impl Write for MockStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.wire.borrow_mut().outbound.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Remote {
    pub fn push(&self, bytes: &[u8]) {
        if !bytes.is_empty() {
            self.wire.borrow_mut().inbound.push_back(bytes.to_vec());
        }
    }

    pub fn hang_up(&self) {
        self.wire.borrow_mut().eof = true;
    }

    // everything the client has written so far, emptied out
    pub fn take_sent(&self) -> String {
        let bytes = std::mem::take(&mut self.wire.borrow_mut().outbound);
        String::from_utf8(bytes).unwrap()
    }
}

pub fn mock() -> (MockStream, Remote) {
    let wire = Rc::new(RefCell::new(Wire::default()));
    (MockStream { wire: wire.clone() }, Remote { wire })
}

pub fn setup() -> (Client<MockStream>, Remote, Session) {
    let (stream, remote) = mock();
    (Client::new(stream), remote, Session::new("aoei"))
}

pub fn texts(session: &Session, channel: &str) -> Vec<String> {
    match session.find_channel(channel) {
        Some(chan) => chan.messages().iter().map(|m| m.text.clone()).collect(),
        None => Vec::new(),
    }
}

pub fn system_texts(session: &Session) -> Vec<String> {
    session.system_messages().iter().map(|m| m.text.clone()).collect()
}
