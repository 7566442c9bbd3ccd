//! In-memory logger used by the unit tests.

use crate::error::Tfd500Error;
use crate::serial_link::{Connector, Port};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::io::{self, Read, Write};
use std::rc::Rc;

/// Wire bytes of a reply: echo followed by payload.
pub fn reply(command: u8, payload: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(payload.len() + 1);
    bytes.push(command);
    bytes.extend_from_slice(payload);
    bytes
}

/// Hands out one scripted reply per opened session and records what was
/// written to each session.
pub struct ScriptedLink {
    replies: RefCell<VecDeque<Vec<u8>>>,
    written: RefCell<Vec<Rc<RefCell<Vec<u8>>>>>,
    live: Rc<Cell<usize>>,
    time_out_at_end: bool,
}

impl ScriptedLink {
    /// A link whose sessions time out once their reply is consumed.
    pub fn new<I: IntoIterator<Item = Vec<u8>>>(replies: I) -> Self {
        Self {
            replies: RefCell::new(replies.into_iter().collect()),
            written: RefCell::new(Vec::new()),
            live: Rc::new(Cell::new(0)),
            time_out_at_end: true,
        }
    }

    /// A link whose sessions report end of stream once their reply is consumed.
    pub fn closing<I: IntoIterator<Item = Vec<u8>>>(replies: I) -> Self {
        Self {
            time_out_at_end: false,
            ..Self::new(replies)
        }
    }

    /// Bytes written, one entry per session.
    pub fn written(&self) -> Vec<Vec<u8>> {
        self.written
            .borrow()
            .iter()
            .map(|session| session.borrow().clone())
            .collect()
    }

    pub fn sessions_opened(&self) -> usize {
        self.written.borrow().len()
    }

    pub fn sessions_open(&self) -> usize {
        self.live.get()
    }

    pub fn replies_left(&self) -> usize {
        self.replies.borrow().len()
    }
}

impl Connector for ScriptedLink {
    fn open(&self) -> Result<Box<dyn Port>, Tfd500Error> {
        let reply = self.replies.borrow_mut().pop_front().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "no scripted reply left")
        })?;
        let written = Rc::new(RefCell::new(Vec::new()));
        self.written.borrow_mut().push(Rc::clone(&written));
        self.live.set(self.live.get() + 1);

        Ok(Box::new(ScriptedPort {
            reply: io::Cursor::new(reply),
            written,
            live: Rc::clone(&self.live),
            time_out_at_end: self.time_out_at_end,
        }))
    }
}

struct ScriptedPort {
    reply: io::Cursor<Vec<u8>>,
    written: Rc<RefCell<Vec<u8>>>,
    live: Rc<Cell<usize>>,
    time_out_at_end: bool,
}

impl Read for ScriptedPort {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.reply.read(buf)?;
        if n == 0 && !buf.is_empty() && self.time_out_at_end {
            return Err(io::Error::new(io::ErrorKind::TimedOut, "scripted timeout"));
        }
        Ok(n)
    }
}

impl Write for ScriptedPort {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.written.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ScriptedPort {
    fn drop(&mut self) {
        self.live.set(self.live.get() - 1);
    }
}
