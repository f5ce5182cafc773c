use rdfio_api::input::EncodingError;
use std::error::Error;
use std::fmt;
use std::io;

/// Error that might be returned during parsing.
///
/// It might wrap an IO error or be a parsing error.
/// Parsing errors carry the 1-based number of the line they were found on.
#[derive(Debug)]
pub struct NQuadsError {
    pub(crate) kind: NQuadsErrorKind,
    pub(crate) line: Option<u64>,
}

#[derive(Debug, thiserror::Error)]
pub enum NQuadsErrorKind {
    #[error(transparent)]
    Io(io::Error),
    #[error("{0}")]
    WrongEncoding(EncodingError),
    #[error("invalid {production}, unparsed remainder: '{remainder}'")]
    Syntax {
        production: Production,
        remainder: String,
    },
    #[error("the line is not valid UTF-8")]
    InvalidUtf8,
    #[error("invalid unicode code point '{0:X}'")]
    InvalidCodePoint(u32),
    #[error("quoted triples are nested more than {0} levels deep")]
    NestingTooDeep(usize),
}

/// The grammar production that failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Production {
    Subject,
    Predicate,
    Object,
    Graph,
    End,
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Production::Subject => "subject",
            Production::Predicate => "predicate",
            Production::Object => "object",
            Production::Graph => "graph",
            Production::End => "end",
        })
    }
}

impl NQuadsError {
    pub(crate) fn on_line(kind: NQuadsErrorKind, line: u64) -> Self {
        Self {
            kind,
            line: Some(line),
        }
    }

    pub fn kind(&self) -> &NQuadsErrorKind {
        &self.kind
    }

    /// The 1-based number of the line the error was found on.
    pub fn line(&self) -> Option<u64> {
        self.line
    }
}

impl fmt::Display for NQuadsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.kind, f)?;
        if let Some(line) = self.line {
            write!(f, " on line {}", line)?;
        }
        Ok(())
    }
}

impl Error for NQuadsError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.kind {
            NQuadsErrorKind::Io(error) => Some(error),
            NQuadsErrorKind::WrongEncoding(error) => Some(error),
            _ => None,
        }
    }
}

impl From<io::Error> for NQuadsError {
    fn from(error: io::Error) -> Self {
        Self {
            kind: match EncodingError::from_io(&error) {
                Some(encoding) => NQuadsErrorKind::WrongEncoding(encoding),
                None => NQuadsErrorKind::Io(error),
            },
            line: None,
        }
    }
}

impl From<NQuadsError> for io::Error {
    fn from(error: NQuadsError) -> Self {
        match error.kind {
            NQuadsErrorKind::Io(error) => error,
            _ => io::Error::new(io::ErrorKind::InvalidData, error),
        }
    }
}
