use crate::format::Format;
use rdfio_nquads::NQuadsError;
use rdfio_xml::RdfXmlError;
use std::io;

/// Error returned by the format lookup, [`parse`](crate::parse) and [`serialize`](crate::serialize).
#[derive(Debug, thiserror::Error)]
pub enum RdfIoError {
    #[error("Unknown format '{0}'")]
    UnknownFormat(String),
    #[error("No {0} parser or serializer is available")]
    UnsupportedFormat(Format),
    #[error(transparent)]
    NQuads(#[from] NQuadsError),
    #[error(transparent)]
    RdfXml(#[from] RdfXmlError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl From<RdfIoError> for io::Error {
    fn from(error: RdfIoError) -> Self {
        match error {
            RdfIoError::Io(error) => error,
            RdfIoError::NQuads(error) => error.into(),
            RdfIoError::RdfXml(error) => error.into(),
            error => io::Error::new(io::ErrorKind::InvalidInput, error),
        }
    }
}
