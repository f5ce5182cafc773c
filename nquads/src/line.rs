use crate::error::{NQuadsError, NQuadsErrorKind};
use rdfio_api::input::RdfInput;
use std::io;
use std::str;

/// Size of the chunks read from the input.
pub const READ_BUFFER_SIZE: usize = 8192;

/// Reads an input in fixed size chunks and splits it into LF terminated lines.
///
/// The partial last line of a chunk is carried forward until the next chunk completes it.
/// A final line without LF is still returned.
pub(crate) struct LineReader<R: RdfInput> {
    inner: R,
    buffer: Vec<u8>,
    start: usize,
    scanned: usize,
    eof: bool,
    line_number: u64,
}

impl<R: RdfInput> LineReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buffer: Vec::with_capacity(READ_BUFFER_SIZE),
            start: 0,
            scanned: 0,
            eof: false,
            line_number: 0,
        }
    }

    /// Replaces the content of `line` with the next line, without its LF.
    ///
    /// Returns `false` if the input is exhausted.
    pub fn next_line(&mut self, line: &mut String) -> Result<bool, NQuadsError> {
        line.clear();
        loop {
            let from = self.start + self.scanned;
            if let Some(offset) = self.buffer[from..].iter().position(|b| *b == b'\n') {
                let end = from + offset;
                self.line_number += 1;
                self.take(end, line)?;
                self.start = end + 1;
                self.scanned = 0;
                return Ok(true);
            }
            self.scanned = self.buffer.len() - self.start;
            if self.eof {
                if self.start == self.buffer.len() {
                    return Ok(false);
                }
                let end = self.buffer.len();
                self.line_number += 1;
                self.take(end, line)?;
                self.start = end;
                self.scanned = 0;
                return Ok(true);
            }
            self.fill()?;
        }
    }

    /// The 1-based number of the last line returned.
    pub fn line_number(&self) -> u64 {
        self.line_number
    }

    pub fn is_end(&self) -> bool {
        self.eof && self.start == self.buffer.len()
    }

    pub fn rewind(&mut self) -> Result<(), NQuadsError> {
        self.inner.rewind()?;
        self.buffer.clear();
        self.start = 0;
        self.scanned = 0;
        self.eof = false;
        self.line_number = 0;
        Ok(())
    }

    fn take(&self, end: usize, line: &mut String) -> Result<(), NQuadsError> {
        let bytes = &self.buffer[self.start..end];
        let text = str::from_utf8(bytes)
            .map_err(|_| NQuadsError::on_line(NQuadsErrorKind::InvalidUtf8, self.line_number))?;
        line.push_str(text);
        Ok(())
    }

    fn fill(&mut self) -> Result<(), NQuadsError> {
        if self.start > 0 {
            self.buffer.drain(..self.start);
            self.start = 0;
        }
        let len = self.buffer.len();
        self.buffer.resize(len + READ_BUFFER_SIZE, 0);
        let read = loop {
            match self.inner.read(&mut self.buffer[len..]) {
                Ok(read) => break read,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => (),
                Err(e) => {
                    self.buffer.truncate(len);
                    return Err(e.into());
                }
            }
        };
        self.buffer.truncate(len + read);
        log::trace!("Read a chunk of {} bytes", read);
        if read == 0 {
            self.eof = true;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rdfio_api::input::SeekableInput;

    fn lines(data: &str) -> Vec<String> {
        let mut reader = LineReader::new(SeekableInput::from_string(data));
        let mut line = String::new();
        let mut result = Vec::new();
        while reader.next_line(&mut line).unwrap() {
            result.push(line.clone());
        }
        assert!(reader.is_end());
        result
    }

    #[test]
    fn splits_on_line_feed() {
        assert_eq!(lines("a\nb\n\nc"), vec!["a", "b", "", "c"]);
        assert_eq!(lines("a\r\n"), vec!["a\r"]);
        assert!(lines("").is_empty());
    }

    #[test]
    fn lines_longer_than_a_chunk_are_reassembled() {
        let long = "x".repeat(READ_BUFFER_SIZE * 2 + 17);
        let data = format!("{}\n{}\nend", long, long);
        assert_eq!(lines(&data), vec![long.clone(), long, "end".to_owned()]);
    }

    #[test]
    fn invalid_utf8_reports_the_line() {
        let mut reader = LineReader::new(SeekableInput::from_bytes(b"ok\n\xFF\xFE\n".to_vec()));
        let mut line = String::new();
        assert!(reader.next_line(&mut line).unwrap());
        let error = reader.next_line(&mut line).unwrap_err();
        assert_eq!(error.line(), Some(2));
    }

    #[test]
    fn rewind_restarts_numbering() -> Result<(), NQuadsError> {
        let mut reader = LineReader::new(SeekableInput::from_string("a\nb\n"));
        let mut line = String::new();
        while reader.next_line(&mut line)? {}
        assert_eq!(reader.line_number(), 2);
        reader.rewind()?;
        assert!(reader.next_line(&mut line)?);
        assert_eq!(line, "a");
        assert_eq!(reader.line_number(), 1);
        Ok(())
    }
}
