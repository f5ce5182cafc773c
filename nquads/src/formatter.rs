use rdfio_api::formatter::{format_sequence, QuadSerializer, QuadsFormatter};
use rdfio_api::model::*;
use rdfio_api::namespace::NamespaceMap;
use rdfio_api::parser::QuadSequence;
use std::io;
use std::io::Write;

/// A [N-Quads](https://www.w3.org/TR/n-quads/) formatter, with [RDF-star](https://w3c.github.io/rdf-star/cg-spec/) quoted triples.
///
/// It implements the `QuadsFormatter` trait.
/// Each quad is written as soon as it is given.
///
/// Write some quads using the `QuadsFormatter` API into a `Vec` buffer:
/// ```
/// use rdfio_nquads::NQuadsFormatter;
/// use rdfio_api::formatter::QuadsFormatter;
/// use rdfio_api::model::{GraphName, Literal, NamedNode, Quad};
///
/// let mut formatter = NQuadsFormatter::new(Vec::default());
/// formatter.format(&Quad::new(
///     NamedNode::new("http://example.com/foo"),
///     NamedNode::new("http://schema.org/name"),
///     Literal::new_language_tagged("Foo", "en"),
///     GraphName::DefaultGraph,
/// ))?;
/// formatter.format(&Quad::new(
///     NamedNode::new("http://example.com/foo"),
///     NamedNode::new("http://www.w3.org/1999/02/22-rdf-syntax-ns#type"),
///     NamedNode::new("http://schema.org/Person"),
///     NamedNode::new("http://example.com/"),
/// ))?;
/// assert_eq!(
///     String::from_utf8(formatter.finish()).unwrap(),
///     "<http://example.com/foo> <http://schema.org/name> \"Foo\"@en .\n<http://example.com/foo> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://schema.org/Person> <http://example.com/> .\n"
/// );
/// # std::io::Result::Ok(())
/// ```
pub struct NQuadsFormatter<W: Write> {
    write: W,
}

impl<W: Write> NQuadsFormatter<W> {
    /// Builds a new formatter from a `Write` implementation
    pub fn new(write: W) -> Self {
        Self { write }
    }

    /// Finishes writing and returns the underlying `Write`
    pub fn finish(self) -> W {
        self.write
    }
}

impl<W: Write> QuadsFormatter for NQuadsFormatter<W> {
    type Error = io::Error;

    fn format(&mut self, quad: &Quad) -> Result<(), io::Error> {
        check_nesting(quad)?;
        writeln!(self.write, "{}", quad)
    }
}

/// A [N-Triples](https://www.w3.org/TR/n-triples/) formatter, with [RDF-star](https://w3c.github.io/rdf-star/cg-spec/) quoted triples.
///
/// Quads outside of the default graph are rejected with an [`InvalidInput`](io::ErrorKind::InvalidInput) error.
pub struct NTriplesFormatter<W: Write> {
    write: W,
}

impl<W: Write> NTriplesFormatter<W> {
    /// Builds a new formatter from a `Write` implementation
    pub fn new(write: W) -> Self {
        Self { write }
    }

    /// Finishes writing and returns the underlying `Write`
    pub fn finish(self) -> W {
        self.write
    }
}

impl<W: Write> QuadsFormatter for NTriplesFormatter<W> {
    type Error = io::Error;

    fn format(&mut self, quad: &Quad) -> Result<(), io::Error> {
        if !quad.graph_name.is_default_graph() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "N-Triples can't contain quads in the named graph {}",
                    quad.graph_name
                ),
            ));
        }
        check_nesting(quad)?;
        writeln!(self.write, "{}", quad)
    }
}

fn check_nesting(quad: &Quad) -> io::Result<()> {
    if quad.nesting_exceeds(MAX_NESTING_DEPTH) {
        Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!(
                "quoted triples are nested more than {} levels deep",
                MAX_NESTING_DEPTH
            ),
        ))
    } else {
        Ok(())
    }
}

/// Writes a whole [`QuadSequence`] as N-Quads.
///
/// The namespace table is ignored: N-Quads has no prefixes.
///
/// ```
/// use rdfio_api::formatter::QuadSerializer;
/// use rdfio_api::model::{GraphName, NamedNode, Quad};
/// use rdfio_api::parser::QuadVec;
/// use rdfio_nquads::NQuadsSerializer;
///
/// let node = NamedNode::new("http://example.com/");
/// let mut quads = QuadVec::from(vec![Quad::new(node.clone(), node.clone(), node, GraphName::DefaultGraph)]);
/// assert_eq!(
///     NQuadsSerializer::new().serialize_to_string(&mut quads, None)?,
///     "<http://example.com/> <http://example.com/> <http://example.com/> .\n"
/// );
/// # std::io::Result::Ok(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NQuadsSerializer {}

impl NQuadsSerializer {
    pub fn new() -> Self {
        Self {}
    }
}

impl QuadSerializer for NQuadsSerializer {
    fn serialize_stream<W: Write, S: QuadSequence>(
        &self,
        output: W,
        quads: &mut S,
        _namespaces: Option<&NamespaceMap>,
    ) -> io::Result<W>
    where
        io::Error: From<S::Error>,
    {
        log::debug!("Serializing quads as N-Quads");
        let mut formatter = NQuadsFormatter::new(output);
        format_sequence(&mut formatter, quads)?;
        Ok(formatter.finish())
    }
}
