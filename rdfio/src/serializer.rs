use crate::error::RdfIoError;
use crate::format::Format;
use rdfio_api::formatter::QuadSerializer;
use rdfio_api::namespace::NamespaceMap;
use rdfio_api::parser::QuadSequence;
use rdfio_nquads::NQuadsSerializer;
use rdfio_xml::RdfXmlSerializer;
use std::io;
use std::io::Write;

/// Writes all the quads of `quads` into `output` in the given format and returns `output`.
///
/// The N-Triples and N-Quads formats share the N-Quads serializer. RDF/XML is pretty printed and uses
/// the aliases of `namespaces` to shorten predicates.
///
/// ```
/// use rdfio::{serialize, Format};
/// use rdfio_api::model::{GraphName, NamedNode, Quad};
/// use rdfio_api::parser::QuadVec;
///
/// let node = NamedNode::new("http://example.com/");
/// let mut quads = QuadVec::from(vec![Quad::new(node.clone(), node.clone(), node, GraphName::DefaultGraph)]);
/// let output = serialize(&mut quads, Format::NTriples, Vec::new(), None)?;
/// assert_eq!(
///     String::from_utf8(output).unwrap(),
///     "<http://example.com/> <http://example.com/> <http://example.com/> .\n"
/// );
/// # Result::<_, rdfio::RdfIoError>::Ok(())
/// ```
pub fn serialize<W: Write, S: QuadSequence>(
    quads: &mut S,
    format: Format,
    output: W,
    namespaces: Option<&NamespaceMap>,
) -> Result<W, RdfIoError>
where
    io::Error: From<S::Error>,
{
    log::debug!("Serializing quads as {}", format);
    Ok(match format {
        Format::NTriples | Format::NTriplesStar | Format::NQuads | Format::NQuadsStar => {
            NQuadsSerializer::new().serialize_stream(output, quads, namespaces)?
        }
        Format::RdfXml => RdfXmlSerializer::default().serialize_stream(output, quads, namespaces)?,
        format => return Err(RdfIoError::UnsupportedFormat(format)),
    })
}

/// Same as [`serialize`] with the output returned as a string.
pub fn serialize_to_string<S: QuadSequence>(
    quads: &mut S,
    format: Format,
    namespaces: Option<&NamespaceMap>,
) -> Result<String, RdfIoError>
where
    io::Error: From<S::Error>,
{
    let bytes = serialize(quads, format, Vec::new(), namespaces)?;
    String::from_utf8(bytes)
        .map_err(|e| RdfIoError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
}
