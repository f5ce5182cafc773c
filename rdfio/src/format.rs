use crate::error::RdfIoError;
use std::fmt;

/// The RDF serialization formats known by the lookup functions.
///
/// Only the N-Triples, N-Quads and RDF/XML families have parsers and serializers in this workspace.
/// The other formats are recognised so that callers get a [`RdfIoError::UnsupportedFormat`]
/// instead of a [`RdfIoError::UnknownFormat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// [N-Triples](https://www.w3.org/TR/n-triples/)
    NTriples,
    /// N-Triples with [RDF-star](https://w3c.github.io/rdf-star/cg-spec/) quoted triples
    NTriplesStar,
    /// [N-Quads](https://www.w3.org/TR/n-quads/)
    NQuads,
    /// N-Quads with [RDF-star](https://w3c.github.io/rdf-star/cg-spec/) quoted triples
    NQuadsStar,
    /// [RDF/XML](https://www.w3.org/TR/rdf-syntax-grammar/)
    RdfXml,
    /// [Turtle](https://www.w3.org/TR/turtle/)
    Turtle,
    /// [TriG](https://www.w3.org/TR/trig/)
    TriG,
    /// [JSON-LD](https://www.w3.org/TR/json-ld/)
    JsonLd,
    /// JSON-LD written one node object at a time
    JsonLdStream,
}

impl Format {
    /// Looks up a parser format from a media type, a file extension or a file name.
    ///
    /// Media type parameters (`;charset=utf-8`) are ignored and the lookup is case-insensitive.
    ///
    /// ```
    /// use rdfio::Format;
    ///
    /// assert_eq!(Format::from_name("application/n-quads; charset=utf-8")?, Format::NQuadsStar);
    /// assert_eq!(Format::from_name("/data/dump.NT")?, Format::NTriples);
    /// assert!(Format::from_name("foo.bar").is_err());
    /// # Result::<_, rdfio::RdfIoError>::Ok(())
    /// ```
    pub fn from_name(format_or_filename: &str) -> Result<Self, RdfIoError> {
        match normalize(format_or_filename).as_str() {
            "nt" | "ntriples" | "n-triples" => Ok(Format::NTriples),
            "ntriplesstar" | "n-triples-star" | "application/n-triples" | "text/plain" => {
                Ok(Format::NTriplesStar)
            }
            "nq" | "nquads" | "n-quads" => Ok(Format::NQuads),
            "nquadsstar" | "n-quads-star" | "application/n-quads" => Ok(Format::NQuadsStar),
            "xml" | "rdf" | "rdfxml" | "application/rdf+xml" | "text/rdf" | "application/xml"
            | "text/xml" => Ok(Format::RdfXml),
            "ttl" | "turtle" | "n3" | "text/turtle" | "application/turtle" | "text/n3"
            | "text/rdf+n3" | "application/rdf+n3" => Ok(Format::Turtle),
            "trig" | "application/trig" => Ok(Format::TriG),
            "json" | "jsonld" | "application/ld+json" | "application/json" => Ok(Format::JsonLd),
            _ => Err(RdfIoError::UnknownFormat(format_or_filename.to_owned())),
        }
    }

    /// Looks up a serializer format from a media type, a file extension or a file name.
    ///
    /// All the N-Triples and N-Quads names map to [`Format::NQuads`]: a single serializer writes all of them.
    /// `jsonld-stream` selects [`Format::JsonLdStream`].
    pub fn serializer_format(format_or_filename: &str) -> Result<Self, RdfIoError> {
        match normalize(format_or_filename).as_str() {
            "jsonld-stream" => return Ok(Format::JsonLdStream),
            "nquadstar" => return Ok(Format::NQuads),
            _ => (),
        }
        Ok(match Self::from_name(format_or_filename)? {
            Format::NTriples | Format::NTriplesStar | Format::NQuads | Format::NQuadsStar => {
                Format::NQuads
            }
            format => format,
        })
    }

    /// Guesses the format of a document from its first byte.
    ///
    /// ```
    /// use rdfio::Format;
    ///
    /// assert_eq!(Format::detect(b'<'), Format::RdfXml);
    /// assert_eq!(Format::detect(b'['), Format::JsonLd);
    /// assert_eq!(Format::detect(b'@'), Format::TriG);
    /// ```
    pub fn detect(first_byte: u8) -> Self {
        match first_byte {
            b'[' => Format::JsonLd,
            b'<' => Format::RdfXml,
            _ => Format::TriG,
        }
    }

    /// The canonical IANA media type of the format.
    pub fn media_type(self) -> &'static str {
        match self {
            Format::NTriples | Format::NTriplesStar => "application/n-triples",
            Format::NQuads | Format::NQuadsStar => "application/n-quads",
            Format::RdfXml => "application/rdf+xml",
            Format::Turtle => "text/turtle",
            Format::TriG => "application/trig",
            Format::JsonLd | Format::JsonLdStream => "application/ld+json",
        }
    }

    /// The usual file extension of the format.
    pub fn file_extension(self) -> &'static str {
        match self {
            Format::NTriples | Format::NTriplesStar => "nt",
            Format::NQuads | Format::NQuadsStar => "nq",
            Format::RdfXml => "rdf",
            Format::Turtle => "ttl",
            Format::TriG => "trig",
            Format::JsonLd | Format::JsonLdStream => "jsonld",
        }
    }

    /// Returns `true` for the formats of the N-Triples and N-Quads family.
    pub fn is_line_based(self) -> bool {
        matches!(
            self,
            Format::NTriples | Format::NTriplesStar | Format::NQuads | Format::NQuadsStar
        )
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Format::NTriples => "N-Triples",
            Format::NTriplesStar => "N-Triples-star",
            Format::NQuads => "N-Quads",
            Format::NQuadsStar => "N-Quads-star",
            Format::RdfXml => "RDF/XML",
            Format::Turtle => "Turtle",
            Format::TriG => "TriG",
            Format::JsonLd => "JSON-LD",
            Format::JsonLdStream => "JSON-LD stream",
        })
    }
}

/// Drops media type parameters and everything up to the last `.` of a file name, then lowercases.
fn normalize(format_or_filename: &str) -> String {
    let format = match format_or_filename.find(';') {
        Some(end) => &format_or_filename[..end],
        None => format_or_filename,
    };
    let format = match format.rfind('.') {
        Some(dot) if dot > 0 => &format[dot + 1..],
        _ => format,
    };
    format.trim().to_lowercase()
}

#[cfg(test)]
mod test {
    use super::*;
    use test_case::test_case;

    #[test_case("nt", Format::NTriples)]
    #[test_case("N-Triples", Format::NTriples)]
    #[test_case("text/plain", Format::NTriplesStar)]
    #[test_case("application/n-triples", Format::NTriplesStar)]
    #[test_case("dump.nq", Format::NQuads)]
    #[test_case("n-quads-star", Format::NQuadsStar)]
    #[test_case("application/rdf+xml;charset=UTF-8", Format::RdfXml)]
    #[test_case("schema.owl.rdf", Format::RdfXml)]
    #[test_case("text/xml", Format::RdfXml)]
    #[test_case("text/turtle; q=0.9", Format::Turtle)]
    #[test_case("foo.n3", Format::Turtle)]
    #[test_case("application/trig", Format::TriG)]
    #[test_case("application/ld+json", Format::JsonLd)]
    fn parser_lookup(name: &str, expected: Format) {
        assert_eq!(Format::from_name(name).unwrap(), expected);
    }

    #[test_case("nt", Format::NQuads)]
    #[test_case("text/plain", Format::NQuads)]
    #[test_case("n-quads-star", Format::NQuads)]
    #[test_case("nquadstar", Format::NQuads)]
    #[test_case("jsonld-stream", Format::JsonLdStream)]
    #[test_case("rdfxml", Format::RdfXml)]
    #[test_case("out.ttl", Format::Turtle)]
    fn serializer_lookup(name: &str, expected: Format) {
        assert_eq!(Format::serializer_format(name).unwrap(), expected);
    }

    #[test_case("" ; "empty")]
    #[test_case("application/octet-stream" ; "octet stream")]
    #[test_case(".nt" ; "hidden file")]
    #[test_case("jsonld-stream" ; "stream only for serializers")]
    fn unknown_names(name: &str) {
        match Format::from_name(name) {
            Err(RdfIoError::UnknownFormat(n)) => assert_eq!(n, name),
            other => panic!("unexpected lookup result {:?}", other),
        }
    }

    #[test]
    fn names_and_extensions_agree() {
        for format in [
            Format::NTriples,
            Format::NQuads,
            Format::RdfXml,
            Format::Turtle,
            Format::TriG,
            Format::JsonLd,
        ]
        .iter()
        {
            assert_eq!(Format::from_name(format.file_extension()).unwrap(), *format);
            let by_media_type = Format::from_name(format.media_type()).unwrap();
            assert_eq!(by_media_type.media_type(), format.media_type());
        }
    }
}
