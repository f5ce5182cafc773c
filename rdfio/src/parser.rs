use crate::error::RdfIoError;
use crate::format::Format;
use crate::input::PeekableInput;
use rdfio_api::blank::BlankNodePolicy;
use rdfio_api::input::RdfInput;
use rdfio_api::model::Quad;
use rdfio_api::parser::{QuadParser, QuadSequence, QuadStream};
use rdfio_nquads::{NQuadsMode, NQuadsParser, Syntax};
use rdfio_xml::RdfXmlParser;

/// How [`parse`] reads its input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParserOptions {
    /// The format of the input. It is guessed from the first byte when missing.
    pub format: Option<Format>,
    /// Base IRI of the document. Only RDF/XML uses it.
    pub base_iri: Option<String>,
    /// How blank node labels are mapped to blank nodes.
    pub blank_nodes: BlankNodePolicy,
    /// Character classes of the N-Triples and N-Quads parsers.
    pub syntax: Syntax,
}

impl ParserOptions {
    pub fn with_format(mut self, format: Format) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_base_iri(mut self, base_iri: impl Into<String>) -> Self {
        self.base_iri = Some(base_iri.into());
        self
    }

    pub fn with_blank_node_policy(mut self, policy: BlankNodePolicy) -> Self {
        self.blank_nodes = policy;
        self
    }

    pub fn with_syntax(mut self, syntax: Syntax) -> Self {
        self.syntax = syntax;
        self
    }
}

/// A [`QuadSequence`] reading any of the formats with a parser in this workspace.
///
/// Built by [`parse`].
pub struct AnyParser<R: RdfInput> {
    format: Format,
    inner: AnyParserKind<R>,
}

enum AnyParserKind<R: RdfInput> {
    NQuads(QuadStream<NQuadsParser<PeekableInput<R>>>),
    RdfXml(QuadStream<RdfXmlParser<PeekableInput<R>>>),
}

impl<R: RdfInput> AnyParser<R> {
    /// The format actually parsed.
    pub fn format(&self) -> Format {
        self.format
    }
}

impl<R: RdfInput> QuadSequence for AnyParser<R> {
    type Error = RdfIoError;

    fn rewind(&mut self) -> Result<(), RdfIoError> {
        match &mut self.inner {
            AnyParserKind::NQuads(stream) => stream.rewind()?,
            AnyParserKind::RdfXml(stream) => stream.rewind()?,
        }
        Ok(())
    }

    fn valid(&self) -> bool {
        match &self.inner {
            AnyParserKind::NQuads(stream) => stream.valid(),
            AnyParserKind::RdfXml(stream) => stream.valid(),
        }
    }

    fn current(&self) -> Option<&Quad> {
        match &self.inner {
            AnyParserKind::NQuads(stream) => stream.current(),
            AnyParserKind::RdfXml(stream) => stream.current(),
        }
    }

    fn next(&mut self) -> Result<(), RdfIoError> {
        match &mut self.inner {
            AnyParserKind::NQuads(stream) => stream.next()?,
            AnyParserKind::RdfXml(stream) => stream.next()?,
        }
        Ok(())
    }

    fn key(&self) -> Option<usize> {
        match &self.inner {
            AnyParserKind::NQuads(stream) => stream.key(),
            AnyParserKind::RdfXml(stream) => stream.key(),
        }
    }
}

/// Builds a parser for `input`.
///
/// Without an explicit format, the first byte of the input (after an optional UTF-8 byte order mark) decides:
/// `[` is JSON-LD, `<` is RDF/XML and anything else is TriG.
/// As there is no TriG parser here, documents detected as TriG or Turtle are read with the N-Quads-star parser,
/// N-Quads being a subset of TriG.
/// JSON-LD, and Turtle or TriG when explicitly requested, are [`RdfIoError::UnsupportedFormat`].
///
/// ```
/// use rdfio::{parse, ParserOptions};
/// use rdfio_api::input::SeekableInput;
/// use rdfio_api::parser::QuadSequence;
///
/// let file = "_:a <http://schema.org/name> \"Foo\" <http://example.com/> .";
/// let mut quads = parse(SeekableInput::from_string(file), &ParserOptions::default())?;
/// quads.rewind()?;
/// assert_eq!(quads.current().map(|q| q.to_string()).as_deref(), Some(
///     "_:genid1 <http://schema.org/name> \"Foo\" <http://example.com/> ."
/// ));
/// # Result::<_, rdfio::RdfIoError>::Ok(())
/// ```
pub fn parse<R: RdfInput>(input: R, options: &ParserOptions) -> Result<AnyParser<R>, RdfIoError> {
    let mut input = PeekableInput::new(input);
    let format = match options.format {
        Some(format) => format,
        None => {
            let detected = input.peek()?.map_or(Format::TriG, Format::detect);
            log::debug!("Detected {} from the first byte of the input", detected);
            match detected {
                Format::TriG | Format::Turtle => Format::NQuadsStar,
                format => format,
            }
        }
    };
    let inner = match format {
        Format::NTriples | Format::NTriplesStar | Format::NQuads | Format::NQuadsStar => {
            let mode = match format {
                Format::NTriples => NQuadsMode::Triples,
                Format::NTriplesStar => NQuadsMode::TriplesStar,
                Format::NQuads => NQuadsMode::Quads,
                _ => NQuadsMode::QuadsStar,
            };
            AnyParserKind::NQuads(
                NQuadsParser::new(input, mode, options.syntax)
                    .with_blank_node_policy(options.blank_nodes)
                    .into_sequence(),
            )
        }
        Format::RdfXml => AnyParserKind::RdfXml(
            RdfXmlParser::new(input, options.base_iri.as_deref().unwrap_or_default())
                .with_blank_node_policy(options.blank_nodes)
                .into_sequence(),
        ),
        format => return Err(RdfIoError::UnsupportedFormat(format)),
    };
    log::debug!("Parsing the input as {}", format);
    Ok(AnyParser { format, inner })
}
