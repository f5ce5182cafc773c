use crate::base::BaseIri;
use crate::error::{RdfXmlError, RdfXmlErrorKind, TextPosition};
use crate::position::PositionReader;
use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use rdfio_api::blank::{BlankNodeContext, BlankNodePolicy};
use rdfio_api::input::{RdfInput, SkipBom};
use rdfio_api::model::*;
use rdfio_api::namespace::PrefixStack;
use rdfio_api::parser::QuadParser;
use rdfio_api::vocab::rdf;
use std::cell::Cell;
use std::collections::HashSet;
use std::io::BufRead;
use std::rc::Rc;

/// A [RDF XML](https://www.w3.org/TR/rdf-syntax-grammar/) streaming parser.
///
/// It implements the `QuadParser` trait and emits triples in the default graph.
/// It reads the file in streaming. It does not keep data in memory except a stack for handling nested XML tags
/// and a set of all seen `rdf:ID`s to detect duplicate ids.
///
/// Count the number of people using the `QuadParser` API:
/// ```
/// use rdfio_api::input::SeekableInput;
/// use rdfio_api::model::{NamedNode, Term};
/// use rdfio_api::parser::QuadParser;
/// use rdfio_xml::RdfXmlParser;
///
/// let file = "<?xml version=\"1.0\"?>
/// <rdf:RDF xmlns:rdf=\"http://www.w3.org/1999/02/22-rdf-syntax-ns#\" xmlns:schema=\"http://schema.org/\">
///  <rdf:Description rdf:about=\"http://example.com/foo\">
///    <rdf:type rdf:resource=\"http://schema.org/Person\" />
///    <schema:name>Foo</schema:name>
///  </rdf:Description>
///  <schema:Person rdf:about=\"http://example.com/bar\" schema:name=\"Bar\" />
/// </rdf:RDF>";
///
/// let rdf_type = NamedNode::new("http://www.w3.org/1999/02/22-rdf-syntax-ns#type");
/// let schema_person = Term::from(NamedNode::new("http://schema.org/Person"));
/// let mut count = 0;
/// RdfXmlParser::new(SeekableInput::from_string(file), "").parse_all(&mut |q| {
///     if q.predicate == rdf_type && q.object == schema_person {
///         count += 1;
///     }
/// })?;
/// assert_eq!(2, count);
/// # Result::<_, rdfio_xml::RdfXmlError>::Ok(())
/// ```
pub struct RdfXmlParser<R: RdfInput> {
    reader: Option<Reader<PositionReader<SkipBom<R>>>>,
    reader_buffer: Vec<u8>,
    namespace_buffer: Vec<u8>,
    position: Rc<Cell<TextPosition>>,
    context: RdfXmlContext,
    is_end: bool,
}

impl<R: RdfInput> RdfXmlParser<R> {
    /// Builds the parser from an input and a base IRI for relative IRI resolution.
    ///
    /// The base IRI might be empty to state there is no base IRI.
    pub fn new(input: R, base_iri: &str) -> Self {
        let input = PositionReader::new(SkipBom::new(input));
        let position = input.position();
        Self {
            reader: Some(build_reader(input)),
            reader_buffer: Vec::default(),
            namespace_buffer: Vec::default(),
            position,
            context: RdfXmlContext::new(base_iri, BlankNodePolicy::default()),
            is_end: false,
        }
    }

    /// Sets how `rdf:nodeID` labels are mapped to blank nodes. Defaults to [`BlankNodePolicy::Fresh`].
    pub fn with_blank_node_policy(mut self, policy: BlankNodePolicy) -> Self {
        self.context.blank_nodes = BlankNodeContext::new(policy);
        self
    }

    /// Changes the base IRI. It applies to the document read after the next `rewind` or to the current one
    /// if it has not started yet.
    pub fn set_base_iri(&mut self, base_iri: &str) {
        self.context.base_iri = base_iri.to_owned();
        if let [RdfXmlState::Root { scope }] = self.context.state.as_mut_slice() {
            scope.base = BaseIri::new(base_iri);
        }
    }

    fn read_event(&mut self, on_quad: &mut impl FnMut(Quad)) -> Result<(), RdfXmlError> {
        let reader = match &mut self.reader {
            Some(reader) => reader,
            None => {
                return Err(RdfXmlError::at(
                    RdfXmlErrorKind::UnknownState,
                    self.position.get(),
                ))
            }
        };
        let (_, event) =
            reader.read_namespaced_event(&mut self.reader_buffer, &mut self.namespace_buffer)?;
        match event {
            Event::Start(event) => {
                let element = read_element(reader, &self.namespace_buffer, &event)?;
                self.context.start_element(element, on_quad)
            }
            Event::End(_) => self.context.end_element(on_quad),
            Event::Text(event) => {
                let text = event.unescape_and_decode(reader)?;
                self.context.text(&text);
                Ok(())
            }
            Event::CData(event) => {
                let text = reader.decode(&event)?;
                self.context.text(text);
                Ok(())
            }
            Event::Eof => {
                self.is_end = true;
                self.context.finish()
            }
            _ => Ok(()),
        }
    }
}

impl<R: RdfInput> QuadParser for RdfXmlParser<R> {
    type Error = RdfXmlError;

    fn parse_step(&mut self, on_quad: &mut impl FnMut(Quad)) -> Result<(), RdfXmlError> {
        self.reader_buffer.clear();
        let result = self.read_event(on_quad);
        result.map_err(|e| e.with_position(self.position.get()))
    }

    fn is_end(&self) -> bool {
        self.is_end
    }

    fn rewind(&mut self) -> Result<(), RdfXmlError> {
        log::debug!("Restarting RDF/XML parsing");
        let mut input = match self.reader.take() {
            Some(reader) => reader.into_underlying_reader(),
            None => return Err(RdfXmlErrorKind::UnknownState.into()),
        };
        let result = input.rewind();
        self.reader = Some(build_reader(input));
        result?;
        self.reader_buffer.clear();
        self.namespace_buffer.clear();
        self.context.reset();
        self.is_end = false;
        Ok(())
    }
}

fn build_reader<B: BufRead>(input: B) -> Reader<B> {
    let mut reader = Reader::from_reader(input);
    reader.expand_empty_elements(true).trim_text(false);
    reader
}

const RDF_ABOUT: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#about";
const RDF_ABOUT_EACH: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#aboutEach";
const RDF_ABOUT_EACH_PREFIX: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#aboutEachPrefix";
const RDF_DATATYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#datatype";
const RDF_DESCRIPTION: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#Description";
const RDF_ID: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#ID";
const RDF_LI: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#li";
const RDF_NODE_ID: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#nodeID";
const RDF_PARSE_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#parseType";
const RDF_RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#RDF";
const RDF_RESOURCE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#resource";
const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";
const XML_BASE: &str = "http://www.w3.org/XML/1998/namespacebase";
const XML_LANG: &str = "http://www.w3.org/XML/1998/namespacelang";

const RESERVED_RDF_ATTRIBUTES: [&str; 6] = [
    RDF_ABOUT,
    RDF_DATATYPE,
    RDF_ID,
    RDF_NODE_ID,
    RDF_PARSE_TYPE,
    RDF_RESOURCE,
];

/// A start tag with its names expanded.
struct XmlElement {
    name: String,
    attributes: Vec<XmlAttribute>,
    declarations: Vec<(String, String)>,
}

struct XmlAttribute {
    /// Expanded name, or local name if the attribute has no namespace
    name: String,
    qualified: bool,
    value: String,
}

impl XmlElement {
    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.qualified && a.name == name)
            .map(|a| a.value.as_str())
    }

    fn property_attributes(&self) -> impl Iterator<Item = &XmlAttribute> {
        self.attributes.iter().filter(|a| {
            a.qualified
                && !a.name.starts_with(XML_NAMESPACE)
                && !RESERVED_RDF_ATTRIBUTES.contains(&a.name.as_str())
        })
    }

    fn datatype(&self, scope: &Scope) -> Option<NamedNode> {
        self.attribute(RDF_DATATYPE)
            .map(|datatype| NamedNode::new(scope.base.resolve(datatype)))
    }

    /// Only `rdf:ID`, `rdf:datatype` and `xml:*` attributes allow a literal content.
    fn allows_literal(&self) -> bool {
        self.attributes.iter().all(|a| {
            !a.qualified
                || a.name == RDF_ID
                || a.name == RDF_DATATYPE
                || a.name.starts_with(XML_NAMESPACE)
        })
    }
}

fn read_element<B: BufRead>(
    reader: &Reader<B>,
    namespace_buffer: &[u8],
    event: &BytesStart<'_>,
) -> Result<XmlElement, RdfXmlError> {
    let (namespace, local_name) = reader.event_namespace(event.name(), namespace_buffer);
    let name = resolve_name(reader, namespace, local_name)?;
    let mut attributes = Vec::new();
    let mut declarations = Vec::new();
    for attribute in event.attributes() {
        let attribute = attribute?;
        let value = attribute.unescape_and_decode_value(reader)?;
        if attribute.key == b"xmlns" {
            declarations.push((String::new(), value));
        } else if let Some(alias) = attribute.key.strip_prefix(b"xmlns:") {
            declarations.push((reader.decode(alias)?.to_owned(), value));
        } else if let Some(local_name) = attribute.key.strip_prefix(b"xml:") {
            attributes.push(XmlAttribute {
                name: format!("{}{}", XML_NAMESPACE, reader.decode(local_name)?),
                qualified: true,
                value,
            });
        } else {
            let (namespace, local_name) =
                reader.attribute_namespace(attribute.key, namespace_buffer);
            attributes.push(XmlAttribute {
                name: resolve_name(reader, namespace, local_name)?,
                qualified: namespace.is_some(),
                value,
            });
        }
    }
    Ok(XmlElement {
        name,
        attributes,
        declarations,
    })
}

fn resolve_name<B: BufRead>(
    reader: &Reader<B>,
    namespace: Option<&[u8]>,
    local_name: &[u8],
) -> Result<String, RdfXmlError> {
    Ok(match namespace {
        Some(namespace) => reader.decode(namespace)?.to_owned() + reader.decode(local_name)?,
        None => reader.decode(local_name)?.to_owned(),
    })
}

/// The base IRI and language inherited by an element.
#[derive(Debug, Clone, Default)]
struct Scope {
    base: BaseIri,
    language: Option<String>,
}

impl Scope {
    fn child(&self, element: &XmlElement) -> Self {
        let mut scope = self.clone();
        if let Some(base) = element.attribute(XML_BASE) {
            scope.base = BaseIri::new(&self.base.resolve(base));
        }
        if let Some(language) = element.attribute(XML_LANG) {
            scope.language = if language.is_empty() {
                None
            } else {
                Some(language.to_owned())
            };
        }
        scope
    }

    fn literal(&self, value: String, datatype: Option<NamedNode>) -> Literal {
        match (datatype, &self.language) {
            (Some(datatype), _) => Literal::new_typed(value, datatype),
            (None, Some(language)) => Literal::new_language_tagged(value, language.clone()),
            (None, None) => Literal::new_simple(value),
        }
    }
}

/// One frame per open XML element.
enum RdfXmlState {
    Root {
        scope: Scope,
    },
    Rdf {
        scope: Scope,
    },
    NodeElt {
        scope: Scope,
        subject: Subject,
        li_counter: u64,
    },
    PropertyElt {
        scope: Scope,
        subject: Subject,
        predicate: NamedNode,
        reification: Option<NamedNode>,
        datatype: Option<NamedNode>,
        /// The text read so far, `None` if the element can't have a literal value
        literal: Option<String>,
    },
    CollectionElt {
        scope: Scope,
        subject: Subject,
        predicate: NamedNode,
        reification: Option<NamedNode>,
        last: Option<BlankNode>,
    },
    XmlLiteralElt {
        scope: Scope,
        subject: Subject,
        predicate: NamedNode,
        reification: Option<NamedNode>,
        value: String,
        /// Qualified names of the elements opened inside of the literal
        open: Vec<String>,
    },
}

impl RdfXmlState {
    fn scope(&self) -> &Scope {
        match self {
            RdfXmlState::Root { scope }
            | RdfXmlState::Rdf { scope }
            | RdfXmlState::NodeElt { scope, .. }
            | RdfXmlState::PropertyElt { scope, .. }
            | RdfXmlState::CollectionElt { scope, .. }
            | RdfXmlState::XmlLiteralElt { scope, .. } => scope,
        }
    }
}

enum RdfXmlNextProduction {
    Rdf,
    NodeElt,
    PropertyElt,
    NestedNodeElt,
    CollectionItem,
    XmlLiteralContent,
}

struct RdfXmlContext {
    base_iri: String,
    state: Vec<RdfXmlState>,
    prefixes: PrefixStack,
    known_ids: HashSet<String>,
    blank_nodes: BlankNodeContext,
}

impl RdfXmlContext {
    fn new(base_iri: &str, policy: BlankNodePolicy) -> Self {
        Self {
            base_iri: base_iri.to_owned(),
            state: vec![RdfXmlState::Root {
                scope: Scope {
                    base: BaseIri::new(base_iri),
                    language: None,
                },
            }],
            prefixes: PrefixStack::new(),
            known_ids: HashSet::new(),
            blank_nodes: BlankNodeContext::new(policy),
        }
    }

    fn reset(&mut self) {
        self.state = vec![RdfXmlState::Root {
            scope: Scope {
                base: BaseIri::new(&self.base_iri),
                language: None,
            },
        }];
        self.prefixes.clear();
        self.known_ids.clear();
        self.blank_nodes.reset();
    }

    fn start_element(
        &mut self,
        element: XmlElement,
        on_quad: &mut impl FnMut(Quad),
    ) -> Result<(), RdfXmlError> {
        self.prefixes.push_scope(element.declarations.iter().cloned());

        let production = match self.state.last() {
            Some(RdfXmlState::XmlLiteralElt { .. }) => RdfXmlNextProduction::XmlLiteralContent,
            Some(RdfXmlState::Root { .. }) if element.name == RDF_RDF => RdfXmlNextProduction::Rdf,
            Some(RdfXmlState::Root { .. }) | Some(RdfXmlState::Rdf { .. }) => {
                RdfXmlNextProduction::NodeElt
            }
            Some(RdfXmlState::NodeElt { .. }) => RdfXmlNextProduction::PropertyElt,
            Some(RdfXmlState::PropertyElt { .. }) => RdfXmlNextProduction::NestedNodeElt,
            Some(RdfXmlState::CollectionElt { .. }) => RdfXmlNextProduction::CollectionItem,
            None => return Err(RdfXmlErrorKind::UnknownState.into()),
        };
        if let RdfXmlNextProduction::XmlLiteralContent = production {
            if let Some(RdfXmlState::XmlLiteralElt { value, open, .. }) = self.state.last_mut() {
                let name = write_literal_start(value, &self.prefixes, &element, open.is_empty());
                open.push(name);
            }
            return Ok(());
        }

        for attribute in &element.attributes {
            if attribute.name == RDF_ABOUT_EACH || attribute.name == RDF_ABOUT_EACH_PREFIX {
                return Err(RdfXmlErrorKind::ObsoleteAttribute(attribute.name.clone()).into());
            }
            if !attribute.qualified {
                log::debug!("Ignoring the attribute {} without namespace", attribute.name);
            }
        }
        let scope = match self.state.last() {
            Some(state) => state.scope().child(&element),
            None => return Err(RdfXmlErrorKind::UnknownState.into()),
        };

        match production {
            RdfXmlNextProduction::Rdf => {
                self.state.push(RdfXmlState::Rdf { scope });
            }
            RdfXmlNextProduction::NodeElt => {
                let subject = self.node_elt(&element, &scope, on_quad)?;
                self.push_node(scope, subject);
            }
            RdfXmlNextProduction::NestedNodeElt => {
                let node = self.node_elt(&element, &scope, on_quad)?;
                match self.state.last_mut() {
                    Some(RdfXmlState::PropertyElt {
                        subject,
                        predicate,
                        reification,
                        literal,
                        ..
                    }) => {
                        *literal = None;
                        emit(
                            on_quad,
                            Triple::new(subject.clone(), predicate.clone(), node.clone()),
                            reification.take(),
                        );
                    }
                    _ => return Err(RdfXmlErrorKind::UnknownState.into()),
                }
                self.push_node(scope, node);
            }
            RdfXmlNextProduction::CollectionItem => {
                let node = self.node_elt(&element, &scope, on_quad)?;
                let cell = self.blank_nodes.fresh();
                match self.state.last_mut() {
                    Some(RdfXmlState::CollectionElt {
                        subject,
                        predicate,
                        reification,
                        last,
                        ..
                    }) => match last.replace(cell.clone()) {
                        Some(previous) => emit(
                            on_quad,
                            Triple::new(previous, NamedNode::new(rdf::REST), cell.clone()),
                            None,
                        ),
                        None => emit(
                            on_quad,
                            Triple::new(subject.clone(), predicate.clone(), cell.clone()),
                            reification.take(),
                        ),
                    },
                    _ => return Err(RdfXmlErrorKind::UnknownState.into()),
                }
                emit(
                    on_quad,
                    Triple::new(cell, NamedNode::new(rdf::FIRST), node.clone()),
                    None,
                );
                self.push_node(scope, node);
            }
            RdfXmlNextProduction::PropertyElt => self.property_elt(&element, scope, on_quad)?,
            RdfXmlNextProduction::XmlLiteralContent => (),
        }
        Ok(())
    }

    fn push_node(&mut self, scope: Scope, subject: Subject) {
        self.state.push(RdfXmlState::NodeElt {
            scope,
            subject,
            li_counter: 0,
        });
    }

    /// Finds the subject of a node element and emits its type and property attributes.
    fn node_elt(
        &mut self,
        element: &XmlElement,
        scope: &Scope,
        on_quad: &mut impl FnMut(Quad),
    ) -> Result<Subject, RdfXmlError> {
        let subject: Subject = if let Some(about) = element.attribute(RDF_ABOUT) {
            NamedNode::new(scope.base.resolve(about)).into()
        } else if let Some(id) = element.attribute(RDF_ID) {
            self.mint_id(id, scope)?.into()
        } else if let Some(node_id) = element.attribute(RDF_NODE_ID) {
            self.blank_nodes.resolve(node_id).into()
        } else {
            self.blank_nodes.fresh().into()
        };
        if element.name != RDF_DESCRIPTION {
            emit(
                on_quad,
                Triple::new(
                    subject.clone(),
                    NamedNode::new(rdf::TYPE),
                    NamedNode::new(element.name.clone()),
                ),
                None,
            );
        }
        emit_property_attrs(&subject, element, scope, on_quad);
        Ok(subject)
    }

    fn property_elt(
        &mut self,
        element: &XmlElement,
        scope: Scope,
        on_quad: &mut impl FnMut(Quad),
    ) -> Result<(), RdfXmlError> {
        let (subject, predicate) = match self.state.last_mut() {
            Some(RdfXmlState::NodeElt {
                subject,
                li_counter,
                ..
            }) => {
                let predicate = if element.name == RDF_LI {
                    *li_counter += 1;
                    NamedNode::new(format!("{}_{}", rdf::NAMESPACE, li_counter))
                } else {
                    NamedNode::new(element.name.clone())
                };
                (subject.clone(), predicate)
            }
            _ => return Err(RdfXmlErrorKind::UnknownState.into()),
        };
        let mut reification = match element.attribute(RDF_ID) {
            Some(id) => Some(self.mint_id(id, &scope)?),
            None => None,
        };

        let state = match element.attribute(RDF_PARSE_TYPE) {
            Some("Resource") => {
                let object = self.blank_nodes.fresh();
                emit(
                    on_quad,
                    Triple::new(subject, predicate, object.clone()),
                    reification,
                );
                RdfXmlState::NodeElt {
                    scope,
                    subject: object.into(),
                    li_counter: 0,
                }
            }
            Some("Collection") => RdfXmlState::CollectionElt {
                scope,
                subject,
                predicate,
                reification,
                last: None,
            },
            Some(parse_type) => {
                if parse_type != "Literal" {
                    log::debug!("Reading parseType=\"{}\" as parseType=\"Literal\"", parse_type);
                }
                RdfXmlState::XmlLiteralElt {
                    scope,
                    subject,
                    predicate,
                    reification,
                    value: String::new(),
                    open: Vec::new(),
                }
            }
            None => {
                let mut object: Option<Subject> =
                    if let Some(resource) = element.attribute(RDF_RESOURCE) {
                        Some(NamedNode::new(scope.base.resolve(resource)).into())
                    } else if let Some(node_id) = element.attribute(RDF_NODE_ID) {
                        Some(self.blank_nodes.resolve(node_id).into())
                    } else {
                        None
                    };
                if object.is_none() && element.property_attributes().next().is_some() {
                    object = Some(self.blank_nodes.fresh().into());
                }
                if let Some(object) = &object {
                    emit(
                        on_quad,
                        Triple::new(subject.clone(), predicate.clone(), object.clone()),
                        reification.take(),
                    );
                    emit_property_attrs(object, element, &scope, on_quad);
                }
                let datatype = element.datatype(&scope);
                RdfXmlState::PropertyElt {
                    literal: if element.allows_literal() {
                        Some(String::new())
                    } else {
                        None
                    },
                    scope,
                    subject,
                    predicate,
                    reification,
                    datatype,
                }
            }
        };
        self.state.push(state);
        Ok(())
    }

    fn mint_id(&mut self, id: &str, scope: &Scope) -> Result<NamedNode, RdfXmlError> {
        let iri = format!("{}#{}", scope.base.whole(), id);
        if !self.known_ids.insert(iri.clone()) {
            return Err(RdfXmlErrorKind::DuplicateId(id.to_owned()).into());
        }
        Ok(NamedNode::new(iri))
    }

    fn end_element(&mut self, on_quad: &mut impl FnMut(Quad)) -> Result<(), RdfXmlError> {
        self.prefixes.pop_scope();
        if let Some(RdfXmlState::XmlLiteralElt { value, open, .. }) = self.state.last_mut() {
            if let Some(name) = open.pop() {
                value.push_str("</");
                value.push_str(&name);
                value.push('>');
                return Ok(());
            }
        }

        match self.state.pop() {
            Some(RdfXmlState::PropertyElt {
                scope,
                subject,
                predicate,
                reification,
                datatype,
                literal: Some(value),
            }) => emit(
                on_quad,
                Triple::new(subject, predicate, scope.literal(value, datatype)),
                reification,
            ),
            Some(RdfXmlState::CollectionElt {
                subject,
                predicate,
                reification,
                last,
                ..
            }) => match last {
                Some(last) => emit(
                    on_quad,
                    Triple::new(last, NamedNode::new(rdf::REST), NamedNode::new(rdf::NIL)),
                    None,
                ),
                None => emit(
                    on_quad,
                    Triple::new(subject, predicate, NamedNode::new(rdf::NIL)),
                    reification,
                ),
            },
            Some(RdfXmlState::XmlLiteralElt {
                subject,
                predicate,
                reification,
                value,
                ..
            }) => emit(
                on_quad,
                Triple::new(
                    subject,
                    predicate,
                    Literal::new_typed(value, NamedNode::new(rdf::XML_LITERAL)),
                ),
                reification,
            ),
            Some(RdfXmlState::Root { .. }) | None => {
                return Err(RdfXmlErrorKind::UnknownState.into())
            }
            Some(_) => (),
        }
        Ok(())
    }

    fn text(&mut self, text: &str) {
        match self.state.last_mut() {
            Some(RdfXmlState::PropertyElt {
                literal: Some(value),
                ..
            }) => value.push_str(text),
            Some(RdfXmlState::XmlLiteralElt { value, .. }) => push_escaped(value, text),
            _ if text.trim().is_empty() => (),
            _ => log::warn!("Ignoring the text {:?} outside of a property element", text),
        }
    }

    /// Checks that all the elements have been closed.
    fn finish(&self) -> Result<(), RdfXmlError> {
        if self.state.len() == 1 {
            Ok(())
        } else {
            Err(RdfXmlErrorKind::UnknownState.into())
        }
    }
}

fn emit_property_attrs(
    subject: &Subject,
    element: &XmlElement,
    scope: &Scope,
    on_quad: &mut impl FnMut(Quad),
) {
    let datatype = element.datatype(scope);
    for attribute in element.property_attributes() {
        let object: Term = if attribute.name == rdf::TYPE {
            NamedNode::new(scope.base.resolve(&attribute.value)).into()
        } else {
            scope.literal(attribute.value.clone(), datatype.clone()).into()
        };
        emit(
            on_quad,
            Triple::new(
                subject.clone(),
                NamedNode::new(attribute.name.clone()),
                object,
            ),
            None,
        );
    }
}

/// Emits a triple followed by its reification if requested.
fn emit(on_quad: &mut impl FnMut(Quad), triple: Triple, reification: Option<NamedNode>) {
    match reification {
        Some(statement) => {
            let Triple {
                subject,
                predicate,
                object,
            } = triple.clone();
            on_quad(triple.into());
            on_quad(Triple::new(statement.clone(), NamedNode::new(rdf::SUBJECT), subject).into());
            on_quad(
                Triple::new(statement.clone(), NamedNode::new(rdf::PREDICATE), predicate).into(),
            );
            on_quad(Triple::new(statement.clone(), NamedNode::new(rdf::OBJECT), object).into());
            on_quad(
                Triple::new(
                    statement,
                    NamedNode::new(rdf::TYPE),
                    NamedNode::new(rdf::STATEMENT),
                )
                .into(),
            );
        }
        None => on_quad(triple.into()),
    }
}

/// Writes the start tag of an element inside of an XML literal and returns its qualified name.
///
/// The namespaces in scope are declared on the top-level elements of the literal.
fn write_literal_start(
    buffer: &mut String,
    prefixes: &PrefixStack,
    element: &XmlElement,
    is_top_level: bool,
) -> String {
    let name = prefixes.shorten(&element.name, true).into_owned();
    buffer.push('<');
    buffer.push_str(&name);
    let declarations: Vec<(&str, &str)> = if is_top_level {
        prefixes.in_scope().collect()
    } else {
        element
            .declarations
            .iter()
            .map(|(alias, iri)| (alias.as_str(), iri.as_str()))
            .collect()
    };
    for (alias, iri) in declarations {
        if alias.is_empty() {
            buffer.push_str(" xmlns=\"");
        } else {
            buffer.push_str(" xmlns:");
            buffer.push_str(alias);
            buffer.push_str("=\"");
        }
        push_escaped(buffer, iri);
        buffer.push('"');
    }
    for attribute in &element.attributes {
        buffer.push(' ');
        match attribute.name.strip_prefix(XML_NAMESPACE) {
            Some(local_name) if attribute.qualified => {
                buffer.push_str("xml:");
                buffer.push_str(local_name);
            }
            _ if attribute.qualified => buffer.push_str(&prefixes.shorten(&attribute.name, false)),
            _ => buffer.push_str(&attribute.name),
        }
        buffer.push_str("=\"");
        push_escaped(buffer, &attribute.value);
        buffer.push('"');
    }
    buffer.push('>');
    name
}

fn push_escaped(buffer: &mut String, text: &str) {
    buffer.push_str(&String::from_utf8_lossy(&escape(text.as_bytes())));
}
