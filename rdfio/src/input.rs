use rdfio_api::input::RdfInput;
use std::io;
use std::io::Read;

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// An input whose first bytes can be looked at before parsing starts.
///
/// The peeked bytes are replayed to the parser, so format detection also works on non-seekable inputs.
/// `rewind` only goes back to the inner input once bytes after the peeked ones have been read.
pub struct PeekableInput<R: RdfInput> {
    inner: R,
    head: [u8; 4],
    head_len: usize,
    offset: usize,
    past_head: bool,
}

impl<R: RdfInput> PeekableInput<R> {
    pub(crate) fn new(inner: R) -> Self {
        Self {
            inner,
            head: [0; 4],
            head_len: 0,
            offset: 0,
            past_head: false,
        }
    }

    /// The first byte of the document after an optional UTF-8 byte order mark.
    pub(crate) fn peek(&mut self) -> io::Result<Option<u8>> {
        while self.head_len < self.head.len() {
            match self.inner.read(&mut self.head[self.head_len..]) {
                Ok(0) => break,
                Ok(read) => self.head_len += read,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => (),
                Err(e) => return Err(e),
            }
        }
        let head = &self.head[..self.head_len];
        let start = if head.starts_with(&UTF8_BOM) {
            UTF8_BOM.len()
        } else {
            0
        };
        Ok(head.get(start).copied())
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: RdfInput> Read for PeekableInput<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.offset < self.head_len {
            let len = buf.len().min(self.head_len - self.offset);
            buf[..len].copy_from_slice(&self.head[self.offset..self.offset + len]);
            self.offset += len;
            return Ok(len);
        }
        let read = self.inner.read(buf)?;
        if read > 0 {
            self.past_head = true;
        }
        Ok(read)
    }
}

impl<R: RdfInput> RdfInput for PeekableInput<R> {
    fn rewind(&mut self) -> io::Result<()> {
        if self.past_head {
            self.inner.rewind()?;
            self.head_len = 0;
            self.past_head = false;
        }
        self.offset = 0;
        Ok(())
    }

    fn is_seekable(&self) -> bool {
        self.inner.is_seekable()
    }
}
