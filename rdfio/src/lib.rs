//! Format lookup and dispatch over the [`rdfio_nquads`](https://docs.rs/rdfio_nquads/) and
//! [`rdfio_xml`](https://docs.rs/rdfio_xml/) parsers and serializers.
//!
//! Formats are found from a media type, a file extension or a file name with [`Format::from_name`],
//! or guessed from the first byte of a document by [`parse`].
//!
//! Convert an RDF/XML file into N-Triples:
//! ```
//! use rdfio::{parse, serialize_to_string, Format, ParserOptions};
//! use rdfio_api::input::SeekableInput;
//!
//! let file = r#"<?xml version="1.0"?>
//! <rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#" xmlns:schema="http://schema.org/">
//!   <schema:Person rdf:about="http://example.com/foo" schema:name="Foo"/>
//! </rdf:RDF>"#;
//!
//! let mut quads = parse(SeekableInput::from_string(file), &ParserOptions::default())?;
//! assert_eq!(quads.format(), Format::RdfXml);
//! assert_eq!(
//!     serialize_to_string(&mut quads, Format::serializer_format("nt")?, None)?,
//!     "<http://example.com/foo> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://schema.org/Person> .\n\
//!      <http://example.com/foo> <http://schema.org/name> \"Foo\" .\n"
//! );
//! # Result::<_, rdfio::RdfIoError>::Ok(())
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

mod error;
mod format;
mod input;
mod parser;
mod serializer;

pub use error::RdfIoError;
pub use format::Format;
pub use input::PeekableInput;
pub use parser::{parse, AnyParser, ParserOptions};
pub use serializer::{serialize, serialize_to_string};
