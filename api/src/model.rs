//! Data structures for [RDF 1.1 Concepts](https://www.w3.org/TR/rdf11-concepts/) like IRI, literal or quads,
//! extended with [RDF-star](https://w3c.github.io/rdf-star/cg-spec/) quoted triples.
//!
//! All terms are owned immutable values.
//! Their default string formatter returns the canonical N-Triples / N-Quads(-star) representation.

use crate::vocab::{rdf, xsd};
use std::fmt;
use std::fmt::Write;

/// Maximal nesting of quoted triples accepted by parsers and serializers.
pub const MAX_NESTING_DEPTH: usize = 64;

/// An RDF [IRI](https://www.w3.org/TR/rdf11-concepts/#dfn-iri).
///
/// ```
/// use rdfio_api::model::NamedNode;
///
/// assert_eq!(
///     "<http://example.com/foo>",
///     NamedNode::new("http://example.com/foo").to_string()
/// )
/// ```
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Hash)]
pub struct NamedNode {
    /// The [IRI](https://www.w3.org/TR/rdf11-concepts/#dfn-iri) itself.
    pub iri: String,
}

impl NamedNode {
    pub fn new(iri: impl Into<String>) -> Self {
        Self { iri: iri.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.iri
    }
}

impl fmt::Display for NamedNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('<')?;
        escape_iri(&self.iri).try_for_each(|c| f.write_char(c))?;
        f.write_char('>')
    }
}

/// An RDF [blank node](https://www.w3.org/TR/rdf11-concepts/#dfn-blank-node).
///
/// Two blank nodes are only meaningful to compare if they come from the same parsing session,
/// see [`BlankNodeContext`](../blank/struct.BlankNodeContext.html).
///
/// ```
/// use rdfio_api::model::BlankNode;
///
/// assert_eq!("_:a1", BlankNode::new("a1").to_string())
/// ```
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Hash)]
pub struct BlankNode {
    /// The [blank node identifier](https://www.w3.org/TR/rdf11-concepts/#dfn-blank-node-identifier).
    pub id: String,
}

impl BlankNode {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for BlankNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_:{}", self.id)
    }
}

/// An RDF [literal](https://www.w3.org/TR/rdf11-concepts/#dfn-literal).
///
/// A literal without language tag nor datatype is a [simple literal](https://www.w3.org/TR/rdf11-concepts/#dfn-simple-literal)
/// and has the datatype `xsd:string`. [`Literal::new_typed`] normalizes `xsd:string` typed literals to `Simple`.
///
/// ```
/// use rdfio_api::model::{Literal, NamedNode};
///
/// assert_eq!(
///     "\"foo\\nbar\"",
///     Literal::new_simple("foo\nbar").to_string()
/// );
///
/// assert_eq!(
///     "\"1999-01-01\"^^<http://www.w3.org/2001/XMLSchema#date>",
///     Literal::new_typed("1999-01-01", NamedNode::new("http://www.w3.org/2001/XMLSchema#date")).to_string()
/// );
///
/// assert_eq!(
///     "\"foo\"@en",
///     Literal::new_language_tagged("foo", "en").to_string()
/// );
/// ```
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Hash)]
pub enum Literal {
    /// A [simple literal](https://www.w3.org/TR/rdf11-concepts/#dfn-simple-literal) without datatype or language form.
    Simple {
        /// The [lexical form](https://www.w3.org/TR/rdf11-concepts/#dfn-lexical-form).
        value: String,
    },
    /// A [language-tagged string](https://www.w3.org/TR/rdf11-concepts/#dfn-language-tagged-string)
    LanguageTaggedString {
        /// The [lexical form](https://www.w3.org/TR/rdf11-concepts/#dfn-lexical-form).
        value: String,
        /// The [language tag](https://www.w3.org/TR/rdf11-concepts/#dfn-language-tag).
        language: String,
    },
    /// A literal with an explicit datatype
    Typed {
        /// The [lexical form](https://www.w3.org/TR/rdf11-concepts/#dfn-lexical-form).
        value: String,
        /// The [datatype IRI](https://www.w3.org/TR/rdf11-concepts/#dfn-datatype-iri).
        datatype: NamedNode,
    },
}

impl Literal {
    pub fn new_simple(value: impl Into<String>) -> Self {
        Literal::Simple {
            value: value.into(),
        }
    }

    pub fn new_language_tagged(value: impl Into<String>, language: impl Into<String>) -> Self {
        Literal::LanguageTaggedString {
            value: value.into(),
            language: language.into(),
        }
    }

    pub fn new_typed(value: impl Into<String>, datatype: NamedNode) -> Self {
        if datatype.iri == xsd::STRING {
            Literal::Simple {
                value: value.into(),
            }
        } else {
            Literal::Typed {
                value: value.into(),
                datatype,
            }
        }
    }

    /// The [lexical form](https://www.w3.org/TR/rdf11-concepts/#dfn-lexical-form).
    pub fn value(&self) -> &str {
        match self {
            Literal::Simple { value }
            | Literal::LanguageTaggedString { value, .. }
            | Literal::Typed { value, .. } => value,
        }
    }

    pub fn language(&self) -> Option<&str> {
        match self {
            Literal::LanguageTaggedString { language, .. } => Some(language),
            _ => None,
        }
    }

    /// The datatype IRI, `xsd:string` for simple literals and `rdf:langString` for language-tagged strings.
    pub fn datatype(&self) -> &str {
        match self {
            Literal::Simple { .. } => xsd::STRING,
            Literal::LanguageTaggedString { .. } => rdf::LANG_STRING,
            Literal::Typed { datatype, .. } => &datatype.iri,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('"')?;
        escape(self.value()).try_for_each(|c| f.write_char(c))?;
        f.write_char('"')?;
        match self {
            Literal::Simple { .. } => Ok(()),
            Literal::LanguageTaggedString { language, .. } => write!(f, "@{}", language),
            Literal::Typed { datatype, .. } if datatype.iri == xsd::STRING => Ok(()),
            Literal::Typed { datatype, .. } => write!(f, "^^{}", datatype),
        }
    }
}

/// The union of [IRIs](https://www.w3.org/TR/rdf11-concepts/#dfn-iri), [blank nodes](https://www.w3.org/TR/rdf11-concepts/#dfn-blank-node)
/// and quoted triples.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Hash)]
pub enum Subject {
    NamedNode(NamedNode),
    BlankNode(BlankNode),
    Triple(Box<Triple>),
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subject::NamedNode(node) => fmt::Display::fmt(node, f),
            Subject::BlankNode(node) => fmt::Display::fmt(node, f),
            Subject::Triple(triple) => write_quoted(triple, f),
        }
    }
}

impl From<NamedNode> for Subject {
    fn from(node: NamedNode) -> Self {
        Subject::NamedNode(node)
    }
}

impl From<BlankNode> for Subject {
    fn from(node: BlankNode) -> Self {
        Subject::BlankNode(node)
    }
}

impl From<Triple> for Subject {
    fn from(triple: Triple) -> Self {
        Subject::Triple(Box::new(triple))
    }
}

/// An RDF [term](https://www.w3.org/TR/rdf11-concepts/#dfn-rdf-term) usable in object position.
///
/// It is the union of [IRIs](https://www.w3.org/TR/rdf11-concepts/#dfn-iri), [blank nodes](https://www.w3.org/TR/rdf11-concepts/#dfn-blank-node),
/// [literals](https://www.w3.org/TR/rdf11-concepts/#dfn-literal) and quoted triples.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Hash)]
pub enum Term {
    NamedNode(NamedNode),
    BlankNode(BlankNode),
    Literal(Literal),
    Triple(Box<Triple>),
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::NamedNode(node) => fmt::Display::fmt(node, f),
            Term::BlankNode(node) => fmt::Display::fmt(node, f),
            Term::Literal(literal) => fmt::Display::fmt(literal, f),
            Term::Triple(triple) => write_quoted(triple, f),
        }
    }
}

impl From<NamedNode> for Term {
    fn from(node: NamedNode) -> Self {
        Term::NamedNode(node)
    }
}

impl From<BlankNode> for Term {
    fn from(node: BlankNode) -> Self {
        Term::BlankNode(node)
    }
}

impl From<Literal> for Term {
    fn from(literal: Literal) -> Self {
        Term::Literal(literal)
    }
}

impl From<Triple> for Term {
    fn from(triple: Triple) -> Self {
        Term::Triple(Box::new(triple))
    }
}

impl From<Subject> for Term {
    fn from(subject: Subject) -> Self {
        match subject {
            Subject::NamedNode(node) => Term::NamedNode(node),
            Subject::BlankNode(node) => Term::BlankNode(node),
            Subject::Triple(triple) => Term::Triple(triple),
        }
    }
}

/// The name of the graph a quad belongs to.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Hash)]
pub enum GraphName {
    NamedNode(NamedNode),
    BlankNode(BlankNode),
    /// The [default graph](https://www.w3.org/TR/rdf11-concepts/#dfn-default-graph)
    DefaultGraph,
}

impl GraphName {
    pub fn is_default_graph(&self) -> bool {
        *self == GraphName::DefaultGraph
    }
}

impl Default for GraphName {
    fn default() -> Self {
        GraphName::DefaultGraph
    }
}

/// Writes nothing for the default graph.
impl fmt::Display for GraphName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphName::NamedNode(node) => fmt::Display::fmt(node, f),
            GraphName::BlankNode(node) => fmt::Display::fmt(node, f),
            GraphName::DefaultGraph => Ok(()),
        }
    }
}

impl From<NamedNode> for GraphName {
    fn from(node: NamedNode) -> Self {
        GraphName::NamedNode(node)
    }
}

impl From<BlankNode> for GraphName {
    fn from(node: BlankNode) -> Self {
        GraphName::BlankNode(node)
    }
}

/// A [RDF triple](https://www.w3.org/TR/rdf11-concepts/#dfn-rdf-triple).
///
/// ```
/// use rdfio_api::model::{NamedNode, Triple};
///
/// assert_eq!(
///     "<http://example.com/foo> <http://schema.org/sameAs> <http://example.com/foo> .",
///     Triple {
///         subject: NamedNode::new("http://example.com/foo").into(),
///         predicate: NamedNode::new("http://schema.org/sameAs"),
///         object: NamedNode::new("http://example.com/foo").into(),
///     }.to_string()
/// )
/// ```
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Hash)]
pub struct Triple {
    pub subject: Subject,
    pub predicate: NamedNode,
    pub object: Term,
}

impl Triple {
    pub fn new(subject: impl Into<Subject>, predicate: NamedNode, object: impl Into<Term>) -> Self {
        Self {
            subject: subject.into(),
            predicate,
            object: object.into(),
        }
    }

    /// Puts the triple in a graph.
    pub fn in_graph(self, graph_name: impl Into<GraphName>) -> Quad {
        Quad {
            subject: self.subject,
            predicate: self.predicate,
            object: self.object,
            graph_name: graph_name.into(),
        }
    }

    /// Returns `true` if quoted triples are nested more than `limit` levels deep inside this triple.
    pub fn nesting_exceeds(&self, limit: usize) -> bool {
        nesting_exceeds(&self.subject, &self.object, limit)
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} .", self.subject, self.predicate, self.object)
    }
}

impl From<Quad> for Triple {
    fn from(quad: Quad) -> Self {
        Self {
            subject: quad.subject,
            predicate: quad.predicate,
            object: quad.object,
        }
    }
}

/// A [RDF triple](https://www.w3.org/TR/rdf11-concepts/#dfn-rdf-triple) in a [RDF dataset](https://www.w3.org/TR/rdf11-concepts/#dfn-rdf-dataset).
///
/// The default string formatter is returning a N-Quads representation, the graph name is omitted for the default graph.
///
/// ```
/// use rdfio_api::model::{GraphName, NamedNode, Quad};
///
/// assert_eq!(
///     "<http://example.com/foo> <http://schema.org/sameAs> <http://example.com/foo> <http://example.com/> .",
///     Quad {
///         subject: NamedNode::new("http://example.com/foo").into(),
///         predicate: NamedNode::new("http://schema.org/sameAs"),
///         object: NamedNode::new("http://example.com/foo").into(),
///         graph_name: NamedNode::new("http://example.com/").into(),
///     }.to_string()
/// );
/// assert_eq!(
///     "<http://example.com/foo> <http://schema.org/sameAs> <http://example.com/foo> .",
///     Quad {
///         subject: NamedNode::new("http://example.com/foo").into(),
///         predicate: NamedNode::new("http://schema.org/sameAs"),
///         object: NamedNode::new("http://example.com/foo").into(),
///         graph_name: GraphName::DefaultGraph,
///     }.to_string()
/// )
/// ```
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Hash)]
pub struct Quad {
    pub subject: Subject,
    pub predicate: NamedNode,
    pub object: Term,
    pub graph_name: GraphName,
}

impl Quad {
    pub fn new(
        subject: impl Into<Subject>,
        predicate: NamedNode,
        object: impl Into<Term>,
        graph_name: impl Into<GraphName>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate,
            object: object.into(),
            graph_name: graph_name.into(),
        }
    }

    /// Returns `true` if quoted triples are nested more than `limit` levels deep inside this quad.
    pub fn nesting_exceeds(&self, limit: usize) -> bool {
        nesting_exceeds(&self.subject, &self.object, limit)
    }
}

impl fmt::Display for Quad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.graph_name.is_default_graph() {
            write!(f, "{} {} {} .", self.subject, self.predicate, self.object)
        } else {
            write!(
                f,
                "{} {} {} {} .",
                self.subject, self.predicate, self.object, self.graph_name
            )
        }
    }
}

impl From<Triple> for Quad {
    fn from(triple: Triple) -> Self {
        triple.in_graph(GraphName::DefaultGraph)
    }
}

fn write_quoted(triple: &Triple, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
        f,
        "<< {} {} {} >>",
        triple.subject, triple.predicate, triple.object
    )
}

fn nesting_exceeds(subject: &Subject, object: &Term, limit: usize) -> bool {
    let quoted = [
        match subject {
            Subject::Triple(t) => Some(t),
            _ => None,
        },
        match object {
            Term::Triple(t) => Some(t),
            _ => None,
        },
    ];
    quoted.iter().flatten().any(|t| {
        limit == 0 || nesting_exceeds(&t.subject, &t.object, limit - 1)
    })
}

fn escape(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars().flat_map(EscapeRDF::literal)
}

fn escape_iri(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars().flat_map(EscapeRDF::iri)
}

/// A customized version of EscapeDefault of the Rust standard library
struct EscapeRDF {
    state: EscapeRdfState,
}

enum EscapeRdfState {
    Done,
    Char(char),
    Backslash(char),
    Unicode { c: char, index: u8 },
}

impl EscapeRDF {
    fn literal(c: char) -> Self {
        Self {
            state: match c {
                '\u{8}' => EscapeRdfState::Backslash('b'),
                '\t' => EscapeRdfState::Backslash('t'),
                '\n' => EscapeRdfState::Backslash('n'),
                '\u{C}' => EscapeRdfState::Backslash('f'),
                '\r' => EscapeRdfState::Backslash('r'),
                '"' => EscapeRdfState::Backslash('"'),
                '\\' => EscapeRdfState::Backslash('\\'),
                '\0'..='\u{1F}' | '\u{7F}' => EscapeRdfState::Unicode { c, index: 0 },
                c => EscapeRdfState::Char(c),
            },
        }
    }

    fn iri(c: char) -> Self {
        Self {
            state: match c {
                '\0'..=' ' | '<' | '>' | '"' | '{' | '}' | '|' | '^' | '`' | '\\' => {
                    EscapeRdfState::Unicode { c, index: 0 }
                }
                c => EscapeRdfState::Char(c),
            },
        }
    }
}

impl Iterator for EscapeRDF {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        match self.state {
            EscapeRdfState::Backslash(c) => {
                self.state = EscapeRdfState::Char(c);
                Some('\\')
            }
            EscapeRdfState::Char(c) => {
                self.state = EscapeRdfState::Done;
                Some(c)
            }
            EscapeRdfState::Unicode { c, index } => {
                // \uXXXX
                let out = match index {
                    0 => '\\',
                    1 => 'u',
                    i => {
                        let shift = 4 * (5 - u32::from(i));
                        std::char::from_digit((u32::from(c) >> shift) & 0xF, 16)
                            .map_or('0', |d| d.to_ascii_uppercase())
                    }
                };
                self.state = if index == 5 {
                    EscapeRdfState::Done
                } else {
                    EscapeRdfState::Unicode {
                        c,
                        index: index + 1,
                    }
                };
                Some(out)
            }
            EscapeRdfState::Done => None,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len();
        (n, Some(n))
    }

    fn count(self) -> usize {
        self.len()
    }
}

impl ExactSizeIterator for EscapeRDF {
    fn len(&self) -> usize {
        match self.state {
            EscapeRdfState::Done => 0,
            EscapeRdfState::Char(_) => 1,
            EscapeRdfState::Backslash(_) => 2,
            EscapeRdfState::Unicode { index, .. } => 6 - usize::from(index),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn nested(depth: usize) -> Triple {
        let iri = NamedNode::new("tag:iri");
        let mut triple = Triple::new(iri.clone(), iri.clone(), iri.clone());
        for _ in 0..depth {
            triple = Triple::new(triple, iri.clone(), iri.clone());
        }
        triple
    }

    #[test]
    fn literal_escaping() {
        assert_eq!(
            Literal::new_simple("a\"b\\c\td\u{1}").to_string(),
            "\"a\\\"b\\\\c\\td\\u0001\""
        );
        assert_eq!(Literal::new_simple("é\u{7F}").to_string(), "\"é\\u007F\"");
    }

    #[test]
    fn iri_escaping() {
        assert_eq!(
            NamedNode::new("http://a/b c>").to_string(),
            "<http://a/b\\u0020c\\u003E>"
        );
    }

    #[test]
    fn xsd_string_is_simple() {
        let literal = Literal::new_typed("x", NamedNode::new(xsd::STRING));
        assert_eq!(literal, Literal::new_simple("x"));
        assert_eq!(literal.datatype(), xsd::STRING);
        let explicit = Literal::Typed {
            value: "x".into(),
            datatype: NamedNode::new(xsd::STRING),
        };
        assert_eq!(explicit.to_string(), "\"x\"");
    }

    #[test]
    fn quoted_triple_display() {
        let quad = Quad::new(
            nested(1),
            NamedNode::new("http://p"),
            Literal::new_language_tagged("v", "en"),
            BlankNode::new("g"),
        );
        assert_eq!(
            quad.to_string(),
            "<< << <tag:iri> <tag:iri> <tag:iri> >> <tag:iri> <tag:iri> >> <http://p> \"v\"@en _:g ."
        );
    }

    #[test]
    fn nesting_limit() {
        assert!(!nested(0).nesting_exceeds(0));
        assert!(nested(1).nesting_exceeds(0));
        assert!(!nested(3).nesting_exceeds(3));
        assert!(nested(4).nesting_exceeds(3));
    }
}
