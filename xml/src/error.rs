use rdfio_api::input::EncodingError;
use std::error::Error;
use std::fmt;
use std::io;
use thiserror::Error;

/// A position in the parsed document. Lines and columns start at 1, columns count characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextPosition {
    pub line: u64,
    pub column: u64,
}

impl Default for TextPosition {
    fn default() -> Self {
        Self { line: 1, column: 1 }
    }
}

impl fmt::Display for TextPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {} column {}", self.line, self.column)
    }
}

/// Error that might be returned during parsing.
///
/// It might wrap an IO error or be a parsing error.
/// Errors raised while reading the document carry the position reached by the XML reader.
#[derive(Debug)]
pub struct RdfXmlError {
    kind: RdfXmlErrorKind,
    position: Option<TextPosition>,
}

#[derive(Debug, Error)]
pub enum RdfXmlErrorKind {
    #[error(transparent)]
    Io(io::Error),
    #[error(transparent)]
    WrongEncoding(EncodingError),
    #[error("{0}")]
    Xml(quick_xml::Error),
    #[error("The XML document is not valid UTF-8")]
    InvalidUtf8,
    #[error("Duplicated element id '{0}'")]
    DuplicateId(String),
    #[error("Obsolete attribute '{0}' used")]
    ObsoleteAttribute(String),
    #[error("Unknown parser state")]
    UnknownState,
}

impl RdfXmlError {
    pub(crate) fn at(kind: RdfXmlErrorKind, position: TextPosition) -> Self {
        Self {
            kind,
            position: Some(position),
        }
    }

    pub(crate) fn with_position(mut self, position: TextPosition) -> Self {
        self.position.get_or_insert(position);
        self
    }

    pub fn kind(&self) -> &RdfXmlErrorKind {
        &self.kind
    }

    pub fn position(&self) -> Option<TextPosition> {
        self.position
    }
}

impl fmt::Display for RdfXmlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.kind, f)?;
        if let Some(position) = &self.position {
            write!(f, " at {}", position)?;
        }
        Ok(())
    }
}

impl Error for RdfXmlError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.kind {
            RdfXmlErrorKind::Io(error) => Some(error),
            RdfXmlErrorKind::WrongEncoding(error) => Some(error),
            RdfXmlErrorKind::Xml(error) => Some(error),
            _ => None,
        }
    }
}

impl From<RdfXmlErrorKind> for RdfXmlError {
    fn from(kind: RdfXmlErrorKind) -> Self {
        Self {
            kind,
            position: None,
        }
    }
}

impl From<io::Error> for RdfXmlError {
    fn from(error: io::Error) -> Self {
        match EncodingError::from_io(&error) {
            Some(encoding) => RdfXmlErrorKind::WrongEncoding(encoding),
            None => RdfXmlErrorKind::Io(error),
        }
        .into()
    }
}

impl From<quick_xml::Error> for RdfXmlError {
    fn from(error: quick_xml::Error) -> Self {
        match error {
            quick_xml::Error::Io(error) => error.into(),
            quick_xml::Error::Utf8(_) => RdfXmlErrorKind::InvalidUtf8.into(),
            error => RdfXmlErrorKind::Xml(error).into(),
        }
    }
}

impl From<RdfXmlError> for io::Error {
    fn from(error: RdfXmlError) -> Self {
        match error.kind {
            RdfXmlErrorKind::Io(error) => error,
            RdfXmlErrorKind::WrongEncoding(encoding) => {
                io::Error::new(io::ErrorKind::InvalidData, encoding)
            }
            _ => io::Error::new(io::ErrorKind::InvalidData, error),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn display_includes_the_position() {
        let error = RdfXmlError::at(
            RdfXmlErrorKind::DuplicateId("a".into()),
            TextPosition { line: 3, column: 7 },
        );
        assert_eq!(
            error.to_string(),
            "Duplicated element id 'a' at line 3 column 7"
        );
    }

    #[test]
    fn encoding_errors_are_recognized() {
        let error = RdfXmlError::from(io::Error::new(
            io::ErrorKind::InvalidData,
            EncodingError {
                encoding: "UTF-16 BE",
            },
        ));
        assert!(matches!(error.kind(), RdfXmlErrorKind::WrongEncoding(_)));
        assert_eq!(
            io::Error::from(error).to_string(),
            "Input stream has wrong encoding UTF-16 BE"
        );
    }
}
