//! Byte inputs the parsers read from.
//!
//! Parsers need to restart from the beginning of their input on `rewind`.
//! [`RdfInput`] adds this capability on top of [`Read`]:
//! [`SeekableInput`] supports it for any [`Seek`] implementation (files, in-memory buffers)
//! while [`StreamInput`] wraps one-shot streams and fails as soon as a second pass is requested.

use std::io;
use std::io::{Cursor, Read, Seek, SeekFrom};
use thiserror::Error;

/// A byte input that is able to restart from its beginning.
pub trait RdfInput: Read {
    /// Moves back to the position the input had when it was handed to the parser.
    fn rewind(&mut self) -> io::Result<()>;

    /// Returns `true` if `rewind` can succeed after some bytes have been read.
    fn is_seekable(&self) -> bool;
}

impl<I: RdfInput + ?Sized> RdfInput for &mut I {
    fn rewind(&mut self) -> io::Result<()> {
        (**self).rewind()
    }

    fn is_seekable(&self) -> bool {
        (**self).is_seekable()
    }
}

impl<I: RdfInput + ?Sized> RdfInput for Box<I> {
    fn rewind(&mut self) -> io::Result<()> {
        (**self).rewind()
    }

    fn is_seekable(&self) -> bool {
        (**self).is_seekable()
    }
}

/// A seekable input. `rewind` seeks back to the offset the input had at construction.
///
/// ```
/// use rdfio_api::input::{RdfInput, SeekableInput};
/// use std::io::Read;
///
/// let mut input = SeekableInput::from_string("<http://a> <http://b> <http://c> .");
/// let mut first = String::new();
/// input.read_to_string(&mut first)?;
/// input.rewind()?;
/// let mut second = String::new();
/// input.read_to_string(&mut second)?;
/// assert_eq!(first, second);
/// # std::io::Result::Ok(())
/// ```
pub struct SeekableInput<R: Read + Seek> {
    inner: R,
    start: u64,
}

impl<R: Read + Seek> SeekableInput<R> {
    pub fn new(mut inner: R) -> io::Result<Self> {
        let start = inner.seek(SeekFrom::Current(0))?;
        Ok(Self { inner, start })
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl SeekableInput<Cursor<Vec<u8>>> {
    /// Adapts in-memory data to the input contract.
    pub fn from_bytes(data: impl Into<Vec<u8>>) -> Self {
        Self {
            inner: Cursor::new(data.into()),
            start: 0,
        }
    }

    pub fn from_string(data: impl Into<String>) -> Self {
        Self::from_bytes(data.into().into_bytes())
    }
}

impl<R: Read + Seek> Read for SeekableInput<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl<R: Read + Seek> RdfInput for SeekableInput<R> {
    fn rewind(&mut self) -> io::Result<()> {
        self.inner.seek(SeekFrom::Start(self.start))?;
        Ok(())
    }

    fn is_seekable(&self) -> bool {
        true
    }
}

/// A non-seekable input like a socket or a pipe.
///
/// `rewind` only succeeds as long as nothing has been read.
pub struct StreamInput<R: Read> {
    inner: R,
    consumed: u64,
}

impl<R: Read> StreamInput<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, consumed: 0 }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Read for StreamInput<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let read = self.inner.read(buf)?;
        self.consumed += read as u64;
        Ok(read)
    }
}

impl<R: Read> RdfInput for StreamInput<R> {
    fn rewind(&mut self) -> io::Result<()> {
        if self.consumed == 0 {
            Ok(())
        } else {
            Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "input stream is not seekable",
            ))
        }
    }

    fn is_seekable(&self) -> bool {
        false
    }
}

/// The input starts with the byte order mark of an encoding other than UTF-8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Input stream has wrong encoding {encoding}")]
pub struct EncodingError {
    pub encoding: &'static str,
}

impl EncodingError {
    /// Finds an [`EncodingError`] wrapped into an I/O error by [`SkipBom`].
    pub fn from_io(error: &io::Error) -> Option<Self> {
        error
            .get_ref()
            .and_then(|e| e.downcast_ref::<EncodingError>())
            .copied()
    }
}

const BYTE_ORDER_MARKS: [(&[u8], Option<&str>); 11] = [
    (&[0x00, 0x00, 0xFE, 0xFF], Some("UTF-32 BE")),
    (&[0xFF, 0xFE, 0x00, 0x00], Some("UTF-32 LE")),
    (&[0xDD, 0x73, 0x66, 0x73], Some("UTF-EBCDIC")),
    (&[0x84, 0x31, 0x95, 0x33], Some("GB18030")),
    (&[0xEF, 0xBB, 0xBF], None),
    (&[0x2B, 0x2F, 0x76], Some("UTF-7")),
    (&[0xF7, 0x64, 0x4C], Some("UTF-1")),
    (&[0x0E, 0xFE, 0xFF], Some("SCSU")),
    (&[0xFB, 0xEE, 0x28], Some("BOCU-1")),
    (&[0xFE, 0xFF], Some("UTF-16 BE")),
    (&[0xFF, 0xFE], Some("UTF-16 LE")),
];

/// Skips a leading UTF-8 byte order mark and rejects the byte order marks of other encodings.
///
/// The check is done again after each `rewind`.
///
/// ```
/// use rdfio_api::input::{SeekableInput, SkipBom};
/// use std::io::Read;
///
/// let mut input = SkipBom::new(SeekableInput::from_bytes(b"\xEF\xBB\xBF<a>".to_vec()));
/// let mut content = String::new();
/// input.read_to_string(&mut content)?;
/// assert_eq!(content, "<a>");
///
/// let mut input = SkipBom::new(SeekableInput::from_bytes(b"\xFE\xFF\x00<".to_vec()));
/// assert_eq!(
///     input.read_to_string(&mut content).unwrap_err().to_string(),
///     "Input stream has wrong encoding UTF-16 BE"
/// );
/// # std::io::Result::Ok(())
/// ```
pub struct SkipBom<I: RdfInput> {
    inner: I,
    checked: bool,
    head: [u8; 4],
    head_start: usize,
    head_end: usize,
}

impl<I: RdfInput> SkipBom<I> {
    pub fn new(inner: I) -> Self {
        Self {
            inner,
            checked: false,
            head: [0; 4],
            head_start: 0,
            head_end: 0,
        }
    }

    pub fn into_inner(self) -> I {
        self.inner
    }

    fn check(&mut self) -> io::Result<()> {
        let mut filled = 0;
        while filled < self.head.len() {
            match self.inner.read(&mut self.head[filled..]) {
                Ok(0) => break,
                Ok(read) => filled += read,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => (),
                Err(e) => return Err(e),
            }
        }
        self.checked = true;
        self.head_start = 0;
        self.head_end = filled;
        for (mark, encoding) in BYTE_ORDER_MARKS.iter() {
            if self.head[..filled].starts_with(mark) {
                match *encoding {
                    Some(encoding) => {
                        return Err(io::Error::new(
                            io::ErrorKind::InvalidData,
                            EncodingError { encoding },
                        ))
                    }
                    None => {
                        log::trace!("Skipping UTF-8 byte order mark");
                        self.head_start = mark.len();
                        return Ok(());
                    }
                }
            }
        }
        Ok(())
    }
}

impl<I: RdfInput> Read for SkipBom<I> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if !self.checked {
            self.check()?;
        }
        if self.head_start < self.head_end {
            let len = buf.len().min(self.head_end - self.head_start);
            buf[..len].copy_from_slice(&self.head[self.head_start..self.head_start + len]);
            self.head_start += len;
            return Ok(len);
        }
        self.inner.read(buf)
    }
}

impl<I: RdfInput> RdfInput for SkipBom<I> {
    fn rewind(&mut self) -> io::Result<()> {
        self.inner.rewind()?;
        self.checked = false;
        self.head_start = 0;
        self.head_end = 0;
        Ok(())
    }

    fn is_seekable(&self) -> bool {
        self.inner.is_seekable()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use test_case::test_case;

    fn read_all(input: &mut impl Read) -> io::Result<Vec<u8>> {
        let mut buffer = Vec::new();
        input.read_to_end(&mut buffer)?;
        Ok(buffer)
    }

    #[test_case(b"\xFE\xFF\x00<", "UTF-16 BE" ; "utf16be")]
    #[test_case(b"\xFF\xFE<\x00", "UTF-16 LE" ; "utf16le")]
    #[test_case(b"\x00\x00\xFE\xFF", "UTF-32 BE" ; "utf32be")]
    #[test_case(b"\xFF\xFE\x00\x00", "UTF-32 LE" ; "utf32le")]
    #[test_case(b"\x2B\x2F\x76\x38", "UTF-7" ; "utf7")]
    #[test_case(b"\xF7\x64\x4C<", "UTF-1" ; "utf1")]
    #[test_case(b"\xDD\x73\x66\x73", "UTF-EBCDIC" ; "utf_ebcdic")]
    #[test_case(b"\x0E\xFE\xFF<", "SCSU" ; "scsu")]
    #[test_case(b"\xFB\xEE\x28<", "BOCU-1" ; "bocu1")]
    #[test_case(b"\x84\x31\x95\x33", "GB18030" ; "gb18030")]
    fn wrong_encodings_are_rejected(data: &[u8], encoding: &str) {
        let mut input = SkipBom::new(SeekableInput::from_bytes(data.to_vec()));
        let error = read_all(&mut input).unwrap_err();
        assert_eq!(error.kind(), io::ErrorKind::InvalidData);
        assert_eq!(EncodingError::from_io(&error).unwrap().encoding, encoding);
    }

    #[test]
    fn utf8_bom_is_skipped_on_every_pass() -> io::Result<()> {
        let mut input = SkipBom::new(SeekableInput::from_bytes(b"\xEF\xBB\xBFabcdef".to_vec()));
        assert_eq!(read_all(&mut input)?, b"abcdef");
        input.rewind()?;
        assert_eq!(read_all(&mut input)?, b"abcdef");
        Ok(())
    }

    #[test]
    fn short_inputs_are_kept() -> io::Result<()> {
        let mut input = SkipBom::new(SeekableInput::from_bytes(b"<".to_vec()));
        assert_eq!(read_all(&mut input)?, b"<");
        let mut input = SkipBom::new(SeekableInput::from_bytes(Vec::new()));
        assert_eq!(read_all(&mut input)?, b"");
        Ok(())
    }

    #[test]
    fn stream_input_rewinds_only_before_reading() -> io::Result<()> {
        let mut input = StreamInput::new(&b"abc"[..]);
        input.rewind()?;
        assert!(!input.is_seekable());
        assert_eq!(read_all(&mut input)?, b"abc");
        assert_eq!(
            input.rewind().unwrap_err().kind(),
            io::ErrorKind::Unsupported
        );
        Ok(())
    }

    #[test]
    fn seekable_input_restarts_at_initial_offset() -> io::Result<()> {
        let mut cursor = Cursor::new(b"skip-data".to_vec());
        cursor.set_position(5);
        let mut input = SeekableInput::new(cursor)?;
        assert_eq!(read_all(&mut input)?, b"data");
        input.rewind()?;
        assert_eq!(read_all(&mut input)?, b"data");
        Ok(())
    }
}
