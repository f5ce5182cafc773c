//! Interfaces for RDF formatters and serializers.

use crate::model::Quad;
use crate::namespace::NamespaceMap;
use crate::parser::{for_each_quad, QuadSequence};
use std::error::Error;
use std::io;
use std::io::Write;

/// A formatter for [`Quad`](../model/struct.Quad.html) writing each quad as soon as it is given.
pub trait QuadsFormatter {
    type Error: Error;

    /// Writes a quad
    fn format(&mut self, quad: &Quad) -> Result<(), Self::Error>;
}

/// A serializer pulling a whole [`QuadSequence`] into a byte sink.
///
/// Errors stop the serialization. What has already been written stays in the sink.
pub trait QuadSerializer {
    /// Rewinds `quads`, writes all of them into `output` and returns `output`.
    fn serialize_stream<W: Write, S: QuadSequence>(
        &self,
        output: W,
        quads: &mut S,
        namespaces: Option<&NamespaceMap>,
    ) -> io::Result<W>
    where
        io::Error: From<S::Error>;

    fn serialize_to_string<S: QuadSequence>(
        &self,
        quads: &mut S,
        namespaces: Option<&NamespaceMap>,
    ) -> io::Result<String>
    where
        io::Error: From<S::Error>,
    {
        let bytes = self.serialize_stream(Vec::new(), quads, namespaces)?;
        String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

/// Pushes all the quads of a sequence into a formatter.
pub fn format_sequence<F, S>(formatter: &mut F, quads: &mut S) -> io::Result<()>
where
    F: QuadsFormatter<Error = io::Error>,
    S: QuadSequence,
    io::Error: From<S::Error>,
{
    for_each_quad(quads, |quad| formatter.format(quad))
}
