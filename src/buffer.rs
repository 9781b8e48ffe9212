// this module contains the growable input buffer that sits between raw socket
// reads and the protocol parser. bytes are appended at the fill point and
// consumed through a read cursor, so a single IRC line may span any number
// of reads without the parser having to care
use std::io;

// anything that can top up a LineBuffer on demand - in practice the
// Transport, but tests can hand the parser something simpler
pub trait Source {
    // append whatever is available right now, never block,
    // returning the number of bytes appended
    fn drain_into(&mut self, buf: &mut LineBuffer) -> io::Result<usize>;

    // true once the peer has shut the connection down,
    // at which point no more bytes will ever arrive
    fn is_closed(&self) -> bool;
}

// invariant: 0 <= cursor <= data.len() <= data.capacity()
#[derive(Debug, Default)]
pub struct LineBuffer {
    data: Vec<u8>,
    cursor: usize,
}

impl LineBuffer {
    pub fn new() -> LineBuffer {
        LineBuffer {
            data: Vec::new(),
            cursor: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> LineBuffer {
        LineBuffer {
            data: Vec::with_capacity(capacity),
            cursor: 0,
        }
    }

    // bytes held, consumed or not
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    // bytes received but not yet consumed
    pub fn remaining(&self) -> usize {
        self.data.len() - self.cursor
    }

    pub fn has_pending(&self) -> bool {
        self.cursor < self.data.len()
    }

    pub fn pending(&self) -> &[u8] {
        &self.data[self.cursor..]
    }

    pub fn append_bytes(&mut self, buf: &[u8]) {
        self.data.extend_from_slice(buf);
    }

    pub fn peek(&self) -> Option<u8> {
        self.data.get(self.cursor).copied()
    }

    pub fn advance(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.cursor += 1;
        Some(byte)
    }

    // the most recently consumed byte, if it is still held
    pub fn last_consumed(&self) -> Option<u8> {
        if self.cursor == 0 {
            None
        } else {
            Some(self.data[self.cursor - 1])
        }
    }

    // is there a complete line (LF-terminated) waiting past the cursor?
    pub fn has_delim(&self) -> bool {
        self.pending().contains(&b'\n')
    }

    // a mark is just the cursor position, valid until the next
    // reset_if_consumed() or compact()
    pub fn mark(&self) -> usize {
        self.cursor
    }

    pub fn rewind(&mut self, mark: usize) {
        assert!(mark <= self.data.len(), "rewind past fill point");
        self.cursor = mark;
    }

    // once everything has been consumed the buffer is logically empty,
    // so start again from zero but keep the allocation around
    pub fn reset_if_consumed(&mut self) -> bool {
        if self.cursor == self.data.len() {
            self.data.clear();
            self.cursor = 0;
            true
        } else {
            false
        }
    }

    // move the unconsumed tail to the start of the buffer
    fn shift_bytes_to_start(&mut self, src_i: usize) {
        self.data.copy_within(src_i.., 0);
        let len = self.data.len() - src_i;
        self.data.truncate(len);
    }

    // drop the consumed prefix so a long-lived partial line doesn't keep
    // everything read before it alive
    pub fn compact(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let src_i = self.cursor;
        self.shift_bytes_to_start(src_i);
        self.cursor = 0;
    }
}
