use quick_xml::events::*;
use quick_xml::Writer;
use rdfio_api::formatter::{format_sequence, QuadSerializer, QuadsFormatter};
use rdfio_api::model::*;
use rdfio_api::namespace::NamespaceMap;
use rdfio_api::parser::QuadSequence;
use rdfio_api::vocab::{rdf, xsd};
use std::io;
use std::io::Write;

/// A [RDF/XML](https://www.w3.org/TR/rdf-syntax-grammar/) formatter.
///
/// It implements the `QuadsFormatter` trait. Only triples in the default graph can be written.
///
/// Quads are written as soon as they are given, in the given order: consecutive quads with the same subject
/// share a `rdf:Description` element. Predicates are shortened with the aliases of the namespace table when
/// possible, else with a `ns` prefix declared on the property element.
///
/// Write some triples using the `QuadsFormatter` API into a `Vec` buffer:
/// ```
/// use rdfio_xml::RdfXmlFormatter;
/// use rdfio_api::formatter::QuadsFormatter;
/// use rdfio_api::model::{GraphName, NamedNode, Quad};
///
/// let mut formatter = RdfXmlFormatter::new(Vec::default(), false, None)?;
/// formatter.format(&Quad::new(
///     NamedNode::new("http://example.com/foo"),
///     NamedNode::new("http://www.w3.org/1999/02/22-rdf-syntax-ns#type"),
///     NamedNode::new("http://schema.org/Person"),
///     GraphName::DefaultGraph,
/// ))?;
/// assert_eq!(
///     String::from_utf8(formatter.finish()?).unwrap(),
///     "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<rdf:RDF xmlns:rdf=\"http://www.w3.org/1999/02/22-rdf-syntax-ns#\"><rdf:Description rdf:about=\"http://example.com/foo\"><ns:type xmlns:ns=\"http://www.w3.org/1999/02/22-rdf-syntax-ns#\" rdf:resource=\"http://schema.org/Person\"/></rdf:Description></rdf:RDF>"
/// );
/// # std::io::Result::Ok(())
/// ```
pub struct RdfXmlFormatter<W: Write> {
    writer: Writer<W>,
    pretty: bool,
    namespaces: NamespaceMap,
    current_subject: Option<Subject>,
}

impl<W: Write> RdfXmlFormatter<W> {
    /// Builds a new formatter from a `Write` implementation and starts writing.
    ///
    /// `pretty` adds line breaks and indentation. The aliases of `namespaces` are declared on the root element.
    pub fn new(write: W, pretty: bool, namespaces: Option<&NamespaceMap>) -> Result<Self, io::Error> {
        Self {
            writer: Writer::new(write),
            pretty,
            namespaces: namespaces.cloned().unwrap_or_default(),
            current_subject: None,
        }
        .write_start()
    }

    fn write_start(mut self) -> Result<Self, io::Error> {
        self.write_event(Event::Decl(BytesDecl::new(b"1.0", Some(b"UTF-8"), None)))?;
        self.write_event(Event::Text(BytesText::from_plain_str("\n")))?;
        let mut rdf_open = BytesStart::borrowed_name(b"rdf:RDF");
        rdf_open.push_attribute(("xmlns:rdf", rdf::NAMESPACE));
        for (alias, iri) in self.namespaces.iter() {
            rdf_open.push_attribute((format!("xmlns:{}", alias).as_str(), iri));
        }
        self.write_event(Event::Start(rdf_open))?;
        self.new_line()?;
        Ok(self)
    }

    /// Finishes writing and returns the underlying `Write`
    pub fn finish(mut self) -> Result<W, io::Error> {
        if self.current_subject.is_some() {
            self.indent(1)?;
            self.write_event(Event::End(BytesEnd::borrowed(b"rdf:Description")))?;
            self.new_line()?;
        }
        self.write_event(Event::End(BytesEnd::borrowed(b"rdf:RDF")))?;
        Ok(self.writer.into_inner())
    }

    fn write_event(&mut self, event: Event<'_>) -> Result<(), io::Error> {
        self.writer.write_event(event).map_err(map_err)?;
        Ok(())
    }

    fn indent(&mut self, level: usize) -> Result<(), io::Error> {
        if self.pretty {
            self.write_event(Event::Text(BytesText::from_plain_str(&"    "[..2 * level])))?;
        }
        Ok(())
    }

    fn new_line(&mut self) -> Result<(), io::Error> {
        if self.pretty {
            self.write_event(Event::Text(BytesText::from_plain_str("\n")))?;
        }
        Ok(())
    }
}

impl<W: Write> QuadsFormatter for RdfXmlFormatter<W> {
    type Error = io::Error;

    fn format(&mut self, quad: &Quad) -> Result<(), io::Error> {
        if !quad.graph_name.is_default_graph() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "RDF/XML can't contain quads in the named graph {}",
                    quad.graph_name
                ),
            ));
        }
        let subject_attribute = match &quad.subject {
            Subject::NamedNode(n) => ("rdf:about", n.iri.as_str()),
            Subject::BlankNode(n) => ("rdf:nodeID", n.id.as_str()),
            Subject::Triple(_) => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "RDF/XML only supports named or blank subject",
                ))
            }
        };
        let (object_attribute, content) = match &quad.object {
            Term::NamedNode(n) => (Some(("rdf:resource", n.iri.as_str())), None),
            Term::BlankNode(n) => (Some(("rdf:nodeID", n.id.as_str())), None),
            Term::Literal(Literal::Simple { value }) => (None, Some(value.as_str())),
            Term::Literal(Literal::LanguageTaggedString { value, language }) => {
                (Some(("xml:lang", language.as_str())), Some(value.as_str()))
            }
            Term::Literal(Literal::Typed { value, datatype }) if datatype.iri == xsd::STRING => {
                (None, Some(value.as_str()))
            }
            Term::Literal(Literal::Typed { value, datatype }) => {
                (Some(("rdf:datatype", datatype.iri.as_str())), Some(value.as_str()))
            }
            Term::Triple(_) => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "RDF/XML only supports named, blank or literal object",
                ))
            }
        };

        // We open a new rdf:Description if the subject changes
        if self.current_subject.as_ref() != Some(&quad.subject) {
            if self.current_subject.is_some() {
                self.indent(1)?;
                self.write_event(Event::End(BytesEnd::borrowed(b"rdf:Description")))?;
                self.new_line()?;
            }
            self.indent(1)?;
            let mut description_open = BytesStart::borrowed_name(b"rdf:Description");
            description_open.push_attribute(subject_attribute);
            self.write_event(Event::Start(description_open))?;
            self.new_line()?;
            self.current_subject = Some(quad.subject.clone());
        }

        let (namespace, local_name) = split_iri(&quad.predicate.iri);
        let (prop_qname, prop_xmlns) = match self.namespaces.alias_for(namespace) {
            Some(alias) => (format!("{}:{}", alias, local_name), None),
            None => (format!("ns:{}", local_name), Some(("xmlns:ns", namespace))),
        };
        let mut property_open = BytesStart::borrowed_name(prop_qname.as_bytes());
        if let Some(prop_xmlns) = prop_xmlns {
            property_open.push_attribute(prop_xmlns);
        }
        if let Some(object_attribute) = object_attribute {
            property_open.push_attribute(object_attribute);
        }
        self.indent(2)?;
        if let Some(content) = content {
            self.write_event(Event::Start(property_open))?;
            self.write_event(Event::Text(BytesText::from_plain_str(content)))?;
            self.write_event(Event::End(BytesEnd::borrowed(prop_qname.as_bytes())))?;
        } else {
            self.write_event(Event::Empty(property_open))?;
        }
        self.new_line()
    }
}

fn map_err(error: quick_xml::Error) -> io::Error {
    if let quick_xml::Error::Io(error) = error {
        error
    } else {
        io::Error::new(io::ErrorKind::Other, error)
    }
}

/// Splits an IRI after its last `#`, `/`, `*`, `:` or `"` if some characters follow it.
fn split_iri(iri: &str) -> (&str, &str) {
    match iri.rfind(|c| matches!(c, '#' | '/' | '*' | ':' | '"')) {
        Some(position) if position + 1 < iri.len() => iri.split_at(position + 1),
        _ => (iri, ""),
    }
}

/// Writes a whole [`QuadSequence`] as RDF/XML.
///
/// The aliases of the namespace table are used to shorten predicates.
#[derive(Debug, Clone, Copy)]
pub struct RdfXmlSerializer {
    pretty: bool,
}

impl RdfXmlSerializer {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl Default for RdfXmlSerializer {
    fn default() -> Self {
        Self::new(true)
    }
}

impl QuadSerializer for RdfXmlSerializer {
    fn serialize_stream<W: Write, S: QuadSequence>(
        &self,
        output: W,
        quads: &mut S,
        namespaces: Option<&NamespaceMap>,
    ) -> io::Result<W>
    where
        io::Error: From<S::Error>,
    {
        log::debug!("Serializing quads as RDF/XML");
        let mut formatter = RdfXmlFormatter::new(output, self.pretty, namespaces)?;
        format_sequence(&mut formatter, quads)?;
        formatter.finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_split_iri() {
        assert_eq!(
            split_iri("http://schema.org/Person"),
            ("http://schema.org/", "Person")
        );
        assert_eq!(split_iri("http://schema.org/"), ("http://schema.org/", ""));
        assert_eq!(split_iri("urn:a#b*c"), ("urn:a#b*", "c"));
        assert_eq!(split_iri("http://a/b#"), ("http://a/b#", ""));
    }

    fn formatter() -> io::Result<RdfXmlFormatter<Vec<u8>>> {
        RdfXmlFormatter::new(Vec::new(), false, None)
    }

    #[test]
    fn named_graphs_are_rejected_before_writing() -> io::Result<()> {
        let mut formatter = formatter()?;
        let node = NamedNode::new("http://example.com/");
        let error = formatter
            .format(&Quad::new(node.clone(), node.clone(), node.clone(), node))
            .unwrap_err();
        assert_eq!(error.kind(), io::ErrorKind::InvalidInput);
        assert_eq!(
            String::from_utf8(formatter.finish()?).unwrap(),
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<rdf:RDF xmlns:rdf=\"http://www.w3.org/1999/02/22-rdf-syntax-ns#\"></rdf:RDF>"
        );
        Ok(())
    }

    #[test]
    fn quoted_triples_are_rejected() -> io::Result<()> {
        let node = NamedNode::new("http://example.com/");
        let quoted = Triple::new(node.clone(), node.clone(), node.clone());
        let mut formatter = formatter()?;
        assert!(formatter
            .format(&Quad::new(quoted.clone(), node.clone(), node.clone(), GraphName::DefaultGraph))
            .is_err());
        assert!(formatter
            .format(&Quad::new(node.clone(), node, quoted, GraphName::DefaultGraph))
            .is_err());
        assert!(formatter.current_subject.is_none());
        Ok(())
    }

    #[test]
    fn values_are_escaped() -> io::Result<()> {
        let mut formatter = formatter()?;
        formatter.format(&Quad::new(
            NamedNode::new("http://example.com/a&b"),
            NamedNode::new("http://example.com/p"),
            Literal::new_simple("1 < 2 & \"3\""),
            GraphName::DefaultGraph,
        ))?;
        let xml = String::from_utf8(formatter.finish()?).unwrap();
        assert!(xml.contains("rdf:about=\"http://example.com/a&amp;b\""));
        assert!(xml.contains(">1 &lt; 2 &amp; &quot;3&quot;</ns:p>"));
        Ok(())
    }
}
