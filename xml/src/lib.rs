//! Implementation of an [RDF XML](https://www.w3.org/TR/rdf-syntax-grammar/) streaming parser and serializer.
//!
//! How to read a file `foo.rdf` and count the number of `rdf:type` triples:
//! ```no_run
//! use rdfio_api::input::SeekableInput;
//! use rdfio_api::model::NamedNode;
//! use rdfio_api::parser::QuadParser;
//! use rdfio_xml::RdfXmlParser;
//! use std::fs::File;
//!
//! let rdf_type = NamedNode::new("http://www.w3.org/1999/02/22-rdf-syntax-ns#type");
//! let mut count = 0;
//! RdfXmlParser::new(SeekableInput::new(File::open("foo.rdf")?)?, "file:foo.rdf").parse_all(&mut |q| {
//!     if q.predicate == rdf_type {
//!         count += 1;
//!     }
//! })?;
//! # Result::<_, Box<dyn std::error::Error>>::Ok(())
//! ```
//!
//! Write some triples in RDF XML into a `Vec` buffer:
//! ```
//! use rdfio_api::formatter::QuadSerializer;
//! use rdfio_api::model::{GraphName, NamedNode, Quad};
//! use rdfio_api::namespace::NamespaceMap;
//! use rdfio_api::parser::QuadVec;
//! use rdfio_xml::RdfXmlSerializer;
//!
//! let mut quads = QuadVec::from(vec![Quad::new(
//!     NamedNode::new("http://example.com/foo"),
//!     NamedNode::new("http://schema.org/name"),
//!     NamedNode::new("http://example.com/bar"),
//!     GraphName::DefaultGraph,
//! )]);
//! let namespaces: NamespaceMap = vec![("schema", "http://schema.org/")].into_iter().collect();
//! let xml = RdfXmlSerializer::new(false).serialize_to_string(&mut quads, Some(&namespaces))?;
//! assert!(xml.contains("<schema:name rdf:resource=\"http://example.com/bar\"/>"));
//! # std::io::Result::Ok(())
//! ```
#![deny(
    future_incompatible,
    nonstandard_style,
    rust_2018_idioms,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_qualifications
)]
#![doc(test(attr(deny(warnings))))]

mod base;
mod error;
mod formatter;
mod parser;
mod position;

pub use error::{RdfXmlError, RdfXmlErrorKind, TextPosition};
pub use formatter::{RdfXmlFormatter, RdfXmlSerializer};
pub use parser::RdfXmlParser;
pub use position::READ_BUFFER_SIZE;
