//! This crate provides basic interfaces and data structures for building streaming RDF parsers and serializers.
//!
//! It is currently used by the [`rdfio_nquads`](https://docs.rs/rdfio_nquads/) and [`rdfio_xml`](https://docs.rs/rdfio_xml/) crates.
//!
//! Parsers are push based ([`QuadParser`](parser/trait.QuadParser.html)) and are turned into pull based
//! [`QuadSequence`](parser/trait.QuadSequence.html)s that serializers consume.
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

pub mod blank;
pub mod formatter;
pub mod input;
pub mod model;
pub mod namespace;
pub mod parser;
pub mod vocab;
