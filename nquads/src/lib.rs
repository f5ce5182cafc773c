//! Implementation of [N-Triples](https://www.w3.org/TR/n-triples/) and [N-Quads](https://www.w3.org/TR/n-quads/)
//! streaming parsers and serializers, with [RDF-star](https://w3c.github.io/rdf-star/cg-spec/) quoted triples support.
//!
//! Parsers read any [`RdfInput`](rdfio_api::input::RdfInput) in chunks and can be restarted with `rewind`.
//! They come in two [`Syntax`]es: `Strict` follows exactly the W3C grammars and `Relaxed` uses simpler
//! character classes that accept everything `Strict` accepts.
//!
//! Parse and write back a small N-Quads document:
//! ```
//! use rdfio_api::formatter::QuadSerializer;
//! use rdfio_api::input::SeekableInput;
//! use rdfio_api::parser::QuadParser;
//! use rdfio_nquads::{NQuadsMode, NQuadsParser, NQuadsSerializer, Syntax};
//!
//! let file = "<http://a> <http://b> \"c\"@en .\n<http://a> <http://b> <http://d> <http://g> .\n";
//! let mut quads = NQuadsParser::new(SeekableInput::from_string(file), NQuadsMode::Quads, Syntax::Strict)
//!     .into_sequence();
//! assert_eq!(NQuadsSerializer::new().serialize_to_string(&mut quads, None)?, file);
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

mod error;
mod formatter;
mod lexer;
mod line;
mod parser;

pub use error::{NQuadsError, NQuadsErrorKind, Production};
pub use formatter::{NQuadsFormatter, NQuadsSerializer, NTriplesFormatter};
pub use line::READ_BUFFER_SIZE;
pub use parser::{NQuadsMode, NQuadsParser, Syntax};
