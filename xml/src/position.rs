use crate::error::TextPosition;
use rdfio_api::input::RdfInput;
use std::cell::Cell;
use std::io;
use std::io::{BufRead, Read};
use std::rc::Rc;

/// Size of the chunks read from the input.
pub const READ_BUFFER_SIZE: usize = 8192;

/// A `BufRead` over an [`RdfInput`] that records the position of the bytes consumed by the XML reader.
///
/// The position is shared through a cell so that it stays readable while the XML reader owns this reader.
pub(crate) struct PositionReader<R: RdfInput> {
    inner: R,
    buffer: Box<[u8]>,
    start: usize,
    end: usize,
    position: Rc<Cell<TextPosition>>,
}

impl<R: RdfInput> PositionReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buffer: vec![0; READ_BUFFER_SIZE].into_boxed_slice(),
            start: 0,
            end: 0,
            position: Rc::default(),
        }
    }

    pub fn position(&self) -> Rc<Cell<TextPosition>> {
        Rc::clone(&self.position)
    }

    pub fn rewind(&mut self) -> io::Result<()> {
        self.start = 0;
        self.end = 0;
        self.position.set(TextPosition::default());
        self.inner.rewind()
    }
}

impl<R: RdfInput> Read for PositionReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let available = self.fill_buf()?;
        let len = available.len().min(buf.len());
        buf[..len].copy_from_slice(&available[..len]);
        self.consume(len);
        Ok(len)
    }
}

impl<R: RdfInput> BufRead for PositionReader<R> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        if self.start == self.end {
            self.start = 0;
            self.end = loop {
                match self.inner.read(&mut self.buffer) {
                    Ok(read) => break read,
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => (),
                    Err(e) => return Err(e),
                }
            };
            log::trace!("Read a chunk of {} bytes", self.end);
        }
        Ok(&self.buffer[self.start..self.end])
    }

    fn consume(&mut self, amt: usize) {
        let end = (self.start + amt).min(self.end);
        let mut position = self.position.get();
        for byte in &self.buffer[self.start..end] {
            if *byte == b'\n' {
                position.line += 1;
                position.column = 1;
            } else if *byte & 0xC0 != 0x80 {
                position.column += 1;
            }
        }
        self.position.set(position);
        self.start = end;
    }
}
