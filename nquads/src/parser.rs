//! Implementation of the N-Triples and N-Quads RDF syntaxes and of their RDF-star extensions

use crate::error::{NQuadsError, NQuadsErrorKind, Production};
use crate::lexer::{CharClasses, LexError, Lexer, Token, RELAXED, STRICT};
use crate::line::LineReader;
use rdfio_api::blank::{BlankNodeContext, BlankNodePolicy};
use rdfio_api::input::{RdfInput, SkipBom};
use rdfio_api::model::*;
use rdfio_api::parser::QuadParser;

/// The statements accepted by a [`NQuadsParser`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NQuadsMode {
    /// [N-Triples](https://www.w3.org/TR/n-triples/)
    Triples,
    /// [N-Quads](https://www.w3.org/TR/n-quads/)
    Quads,
    /// N-Triples with [RDF-star](https://w3c.github.io/rdf-star/cg-spec/) quoted triples
    TriplesStar,
    /// N-Quads with [RDF-star](https://w3c.github.io/rdf-star/cg-spec/) quoted triples
    QuadsStar,
}

impl NQuadsMode {
    pub fn allows_graph_name(self) -> bool {
        matches!(self, NQuadsMode::Quads | NQuadsMode::QuadsStar)
    }

    pub fn allows_quoted_triples(self) -> bool {
        matches!(self, NQuadsMode::TriplesStar | NQuadsMode::QuadsStar)
    }
}

impl Default for NQuadsMode {
    fn default() -> Self {
        NQuadsMode::QuadsStar
    }
}

/// The character classes used to read terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Syntax {
    /// Exactly the W3C grammar.
    Strict,
    /// Simplified character classes accepting everything `Strict` accepts.
    ///
    /// IRIs may contain anything but `>`, blank node labels anything but whitespace, `<`, `>` and `"`,
    /// unknown escape sequences are kept as is and the end of the line after the final `.` is ignored.
    Relaxed,
}

impl Syntax {
    fn classes(self) -> &'static CharClasses {
        match self {
            Syntax::Strict => &STRICT,
            Syntax::Relaxed => &RELAXED,
        }
    }
}

impl Default for Syntax {
    fn default() -> Self {
        Syntax::Relaxed
    }
}

/// A streaming parser for [N-Triples](https://www.w3.org/TR/n-triples/), [N-Quads](https://www.w3.org/TR/n-quads/)
/// and their [RDF-star](https://w3c.github.io/rdf-star/cg-spec/) variants.
///
/// It implements the `QuadParser` trait.
///
/// The input is read in chunks of [`READ_BUFFER_SIZE`](crate::READ_BUFFER_SIZE) bytes.
/// Its memory consumption is linear in the size of the longest line of the file.
///
/// Count the number of people using the `QuadParser` API:
/// ```
/// use rdfio_api::input::SeekableInput;
/// use rdfio_api::model::{NamedNode, Term};
/// use rdfio_api::parser::QuadParser;
/// use rdfio_nquads::{NQuadsMode, NQuadsParser, Syntax};
///
/// let file = "<http://example.com/foo> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://schema.org/Person> <http://example.com/> .
/// <http://example.com/foo> <http://schema.org/name> \"Foo\" <http://example.com/> .
/// <http://example.com/bar> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://schema.org/Person> .
/// <http://example.com/bar> <http://schema.org/name> \"Bar\" .";
///
/// let rdf_type = NamedNode::new("http://www.w3.org/1999/02/22-rdf-syntax-ns#type");
/// let schema_person = Term::from(NamedNode::new("http://schema.org/Person"));
/// let mut count = 0;
/// NQuadsParser::new(SeekableInput::from_string(file), NQuadsMode::Quads, Syntax::Strict).parse_all(&mut |q| {
///     if q.predicate == rdf_type && q.object == schema_person {
///         count += 1;
///     }
/// })?;
/// assert_eq!(2, count);
/// # Result::<_, rdfio_nquads::NQuadsError>::Ok(())
/// ```
pub struct NQuadsParser<R: RdfInput> {
    reader: LineReader<SkipBom<R>>,
    line: String,
    mode: NQuadsMode,
    syntax: Syntax,
    blank_nodes: BlankNodeContext,
}

impl<R: RdfInput> NQuadsParser<R> {
    pub fn new(input: R, mode: NQuadsMode, syntax: Syntax) -> Self {
        Self {
            reader: LineReader::new(SkipBom::new(input)),
            line: String::new(),
            mode,
            syntax,
            blank_nodes: BlankNodeContext::default(),
        }
    }

    /// Sets how blank node labels are mapped to blank nodes. Defaults to [`BlankNodePolicy::Fresh`].
    pub fn with_blank_node_policy(mut self, policy: BlankNodePolicy) -> Self {
        self.blank_nodes = BlankNodeContext::new(policy);
        self
    }

    pub fn mode(&self) -> NQuadsMode {
        self.mode
    }

    pub fn syntax(&self) -> Syntax {
        self.syntax
    }
}

impl<R: RdfInput> QuadParser for NQuadsParser<R> {
    type Error = NQuadsError;

    fn parse_step(&mut self, on_quad: &mut impl FnMut(Quad)) -> Result<(), NQuadsError> {
        if !self.reader.next_line(&mut self.line)? {
            return Ok(());
        }
        let mut parser = LineParser {
            lexer: Lexer::new(
                &self.line,
                self.syntax.classes(),
                self.mode.allows_quoted_triples(),
            ),
            pending: None,
            last_start: 0,
            mode: self.mode,
            blank_nodes: &mut self.blank_nodes,
            line_number: self.reader.line_number(),
        };
        if let Some(quad) = parser.parse_statement()? {
            on_quad(quad);
        }
        Ok(())
    }

    fn is_end(&self) -> bool {
        self.reader.is_end()
    }

    fn rewind(&mut self) -> Result<(), NQuadsError> {
        log::debug!(
            "Restarting {:?} parsing with {:?} syntax",
            self.mode,
            self.syntax
        );
        self.reader.rewind()?;
        self.blank_nodes.reset();
        Ok(())
    }
}

/// Recursive descent over the tokens of one line.
struct LineParser<'a, 'c> {
    lexer: Lexer<'a>,
    pending: Option<(usize, Token)>,
    last_start: usize,
    mode: NQuadsMode,
    blank_nodes: &'c mut BlankNodeContext,
    line_number: u64,
}

impl<'a, 'c> LineParser<'a, 'c> {
    fn parse_statement(&mut self) -> Result<Option<Quad>, NQuadsError> {
        let subject = match self.next(Production::Subject)? {
            Token::End | Token::Comment => return Ok(None),
            token => self.subject(token, 0)?,
        };
        let predicate = self.predicate()?;
        let object = self.object(0)?;
        let graph_name = self.graph_name()?;
        self.end()?;
        Ok(Some(Quad {
            subject,
            predicate,
            object,
            graph_name,
        }))
    }

    fn next(&mut self, production: Production) -> Result<Token, NQuadsError> {
        if let Some((start, token)) = self.pending.take() {
            self.last_start = start;
            return Ok(token);
        }
        let token = self.lexer.next_token();
        self.last_start = self.lexer.token_start();
        token.map_err(|e| match e {
            LexError::Invalid => self.syntax_error(production),
            LexError::CodePoint(point) => self.error(NQuadsErrorKind::InvalidCodePoint(point)),
        })
    }

    fn push_back(&mut self, token: Token) {
        self.pending = Some((self.last_start, token));
    }

    fn subject(&mut self, token: Token, depth: usize) -> Result<Subject, NQuadsError> {
        match token {
            Token::Iri(iri) => Ok(NamedNode { iri }.into()),
            Token::BlankLabel(label) => Ok(self.blank_nodes.resolve(&label).into()),
            Token::QuotedOpen => Ok(self.quoted_triple(depth + 1)?.into()),
            _ => Err(self.syntax_error(Production::Subject)),
        }
    }

    fn predicate(&mut self) -> Result<NamedNode, NQuadsError> {
        match self.next(Production::Predicate)? {
            Token::Iri(iri) => Ok(NamedNode { iri }),
            _ => Err(self.syntax_error(Production::Predicate)),
        }
    }

    fn object(&mut self, depth: usize) -> Result<Term, NQuadsError> {
        match self.next(Production::Object)? {
            Token::Iri(iri) => Ok(NamedNode { iri }.into()),
            Token::BlankLabel(label) => Ok(self.blank_nodes.resolve(&label).into()),
            Token::QuotedOpen => Ok(self.quoted_triple(depth + 1)?.into()),
            Token::Literal(value) => Ok(self.literal(value)?.into()),
            _ => Err(self.syntax_error(Production::Object)),
        }
    }

    fn literal(&mut self, value: String) -> Result<Literal, NQuadsError> {
        match self.next(Production::Object)? {
            Token::LangTag(language) => Ok(Literal::LanguageTaggedString { value, language }),
            Token::DatatypeMarker => match self.next(Production::Object)? {
                Token::Iri(iri) => Ok(Literal::new_typed(value, NamedNode { iri })),
                _ => Err(self.syntax_error(Production::Object)),
            },
            token => {
                self.push_back(token);
                Ok(Literal::Simple { value })
            }
        }
    }

    fn quoted_triple(&mut self, depth: usize) -> Result<Triple, NQuadsError> {
        if depth > MAX_NESTING_DEPTH {
            return Err(self.error(NQuadsErrorKind::NestingTooDeep(MAX_NESTING_DEPTH)));
        }
        let token = self.next(Production::Subject)?;
        let subject = self.subject(token, depth)?;
        let predicate = self.predicate()?;
        let object = self.object(depth)?;
        match self.next(Production::End)? {
            Token::QuotedClose => Ok(Triple {
                subject,
                predicate,
                object,
            }),
            _ => Err(self.syntax_error(Production::End)),
        }
    }

    /// Reads the optional graph name and the final dot.
    fn graph_name(&mut self) -> Result<GraphName, NQuadsError> {
        let production = if self.mode.allows_graph_name() {
            Production::Graph
        } else {
            Production::End
        };
        let graph_name = match self.next(production)? {
            Token::Dot => return Ok(GraphName::DefaultGraph),
            Token::Iri(iri) if self.mode.allows_graph_name() => NamedNode { iri }.into(),
            Token::BlankLabel(label) if self.mode.allows_graph_name() => {
                self.blank_nodes.resolve(&label).into()
            }
            _ => return Err(self.syntax_error(production)),
        };
        match self.next(Production::End)? {
            Token::Dot => Ok(graph_name),
            _ => Err(self.syntax_error(Production::End)),
        }
    }

    fn end(&mut self) -> Result<(), NQuadsError> {
        if self.lexer.ignores_trailing() {
            return Ok(());
        }
        match self.next(Production::End)? {
            Token::End | Token::Comment => Ok(()),
            _ => Err(self.syntax_error(Production::End)),
        }
    }

    fn syntax_error(&self, production: Production) -> NQuadsError {
        self.error(NQuadsErrorKind::Syntax {
            production,
            remainder: self.lexer.remainder(self.last_start).trim_end().to_owned(),
        })
    }

    fn error(&self, kind: NQuadsErrorKind) -> NQuadsError {
        NQuadsError::on_line(kind, self.line_number)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rdfio_api::input::SeekableInput;

    fn parse(data: &str, mode: NQuadsMode, syntax: Syntax) -> Result<Vec<Quad>, NQuadsError> {
        let mut quads = Vec::new();
        NQuadsParser::new(SeekableInput::from_string(data), mode, syntax)
            .with_blank_node_policy(BlankNodePolicy::Preserve)
            .parse_all(&mut |q| quads.push(q))?;
        Ok(quads)
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let quads = parse(
            "# header\n\n   \r\n<http://s> <http://p> <http://o> . # trailing\n\t# indented\n",
            NQuadsMode::Triples,
            Syntax::Strict,
        )
        .unwrap();
        assert_eq!(quads.len(), 1);
    }

    #[test]
    fn error_reports_production_and_remainder() {
        let error = parse(
            "<http://s> <http://p> <http://o> .\n<http://s> \"p\" <http://o> .\n",
            NQuadsMode::Quads,
            Syntax::Strict,
        )
        .unwrap_err();
        assert_eq!(error.line(), Some(2));
        assert_eq!(
            error.to_string(),
            "invalid predicate, unparsed remainder: '\"p\" <http://o> .' on line 2"
        );
    }

    #[test]
    fn graph_is_rejected_in_triples_mode() {
        let error = parse(
            "<http://s> <http://p> <http://o> <http://g> .",
            NQuadsMode::Triples,
            Syntax::Relaxed,
        )
        .unwrap_err();
        match error.kind() {
            NQuadsErrorKind::Syntax { production, .. } => assert_eq!(*production, Production::End),
            kind => panic!("unexpected error {:?}", kind),
        }
    }

    #[test]
    fn quoted_triples_only_in_star_modes() {
        let data = "<< <http://s> <http://p> <http://o> >> <http://q> _:b .";
        assert!(parse(data, NQuadsMode::Quads, Syntax::Strict).is_err());
        let quads = parse(data, NQuadsMode::TriplesStar, Syntax::Strict).unwrap();
        assert_eq!(
            quads[0].subject,
            Subject::from(Triple::new(
                NamedNode::new("http://s"),
                NamedNode::new("http://p"),
                NamedNode::new("http://o")
            ))
        );
        assert_eq!(quads[0].object, Term::from(BlankNode::new("b")));
    }

    #[test]
    fn graph_inside_quoted_triple_is_rejected() {
        assert!(parse(
            "<< <http://s> <http://p> <http://o> <http://g> >> <http://q> <http://o> .",
            NQuadsMode::QuadsStar,
            Syntax::Relaxed
        )
        .is_err());
    }

    #[test]
    fn nesting_is_bounded() {
        let nested = |depth: usize| {
            format!(
                "{}<http://s> <http://p> <http://o>{} .",
                "<< ".repeat(depth),
                " >> <http://p> <http://o>".repeat(depth)
            )
        };
        assert!(parse(&nested(MAX_NESTING_DEPTH), NQuadsMode::QuadsStar, Syntax::Strict).is_ok());
        let error = parse(&nested(MAX_NESTING_DEPTH + 1), NQuadsMode::QuadsStar, Syntax::Strict)
            .unwrap_err();
        assert!(matches!(error.kind(), NQuadsErrorKind::NestingTooDeep(_)));
    }

    #[test]
    fn trailing_garbage_depends_on_syntax() {
        let data = "<http://s> <http://p> <http://o> . garbage";
        assert!(parse(data, NQuadsMode::Quads, Syntax::Strict).is_err());
        assert_eq!(parse(data, NQuadsMode::Quads, Syntax::Relaxed).unwrap().len(), 1);
    }

    #[test]
    fn invalid_code_point_is_reported() {
        let error = parse(
            "<http://s> <http://p> \"\\uDFFF\" .",
            NQuadsMode::Quads,
            Syntax::Strict,
        )
        .unwrap_err();
        assert!(matches!(error.kind(), NQuadsErrorKind::InvalidCodePoint(0xDFFF)));
    }

    #[test]
    fn fresh_labels_are_stable_within_a_document() {
        let mut quads = Vec::new();
        NQuadsParser::new(
            SeekableInput::from_string("_:x <http://p> _:y .\n_:y <http://p> _:x .\n"),
            NQuadsMode::Triples,
            Syntax::Strict,
        )
        .parse_all(&mut |q| quads.push(q))
        .unwrap();
        assert_eq!(Term::from(quads[0].subject.clone()), quads[1].object);
        assert_eq!(quads[0].object, Term::from(quads[1].subject.clone()));
        assert_ne!(quads[0].object, Term::from(quads[0].subject.clone()));
    }
}
