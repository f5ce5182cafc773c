//! Interfaces for RDF parsers and the pull-based quad sequence protocol.

use crate::model::Quad;
use std::collections::VecDeque;
use std::error::Error;
use std::io;

/// A push parser returning [`Quad`](../model/struct.Quad.html).
pub trait QuadParser {
    type Error: Error;

    /// Parses the complete file and calls `on_quad` each time a new quad is read.
    fn parse_all(&mut self, on_quad: &mut impl FnMut(Quad)) -> Result<(), Self::Error> {
        while !self.is_end() {
            self.parse_step(on_quad)?;
        }
        Ok(())
    }

    /// Parses a small chunk of the file and calls `on_quad` each time a new quad is read.
    ///
    /// This method should be called as long as `is_end` returns false.
    ///
    /// It is a line for line based formats like N-Quads and an XML event for RDF/XML.
    fn parse_step(&mut self, on_quad: &mut impl FnMut(Quad)) -> Result<(), Self::Error>;

    /// Return `true` if the complete file has been consumed by the parser.
    fn is_end(&self) -> bool;

    /// Restarts parsing from the beginning of the input, discarding all the parsing state.
    fn rewind(&mut self) -> Result<(), Self::Error>;

    /// Converts the parser into a pull-based [`QuadSequence`].
    fn into_sequence(self) -> QuadStream<Self>
    where
        Self: Sized,
    {
        QuadStream::new(self)
    }
}

/// A lazy, forward-only and restartable sequence of quads.
///
/// `rewind` must be called before reading the first quad.
/// ```
/// use rdfio_api::model::{NamedNode, Quad};
/// use rdfio_api::parser::{QuadSequence, QuadVec};
///
/// let node = NamedNode::new("http://example.com/");
/// let mut quads: QuadVec = vec![Quad::new(node.clone(), node.clone(), node.clone(), node)].into();
/// quads.rewind()?;
/// while quads.valid() {
///     assert_eq!(quads.key(), Some(0));
///     assert!(quads.current().is_some());
///     quads.next()?;
/// }
/// assert_eq!(quads.key(), None);
/// # std::io::Result::Ok(())
/// ```
pub trait QuadSequence {
    type Error: Error;

    /// Goes back to the first quad, re-reading the underlying input if needed.
    fn rewind(&mut self) -> Result<(), Self::Error>;

    /// Returns `true` while [`current`](QuadSequence::current) returns a quad.
    fn valid(&self) -> bool;

    /// The current quad, without advancing.
    fn current(&self) -> Option<&Quad>;

    /// Advances to the next quad. It might block on reads.
    fn next(&mut self) -> Result<(), Self::Error>;

    /// The 0-based position of the current quad, `None` when the sequence is exhausted.
    fn key(&self) -> Option<usize>;

    /// Converts the sequence into a `Result<Quad, _>` iterator starting from its beginning.
    fn into_quads(self) -> Quads<Self>
    where
        Self: Sized,
    {
        Quads {
            sequence: self,
            started: false,
            failed: false,
        }
    }
}

/// Pulls a [`QuadParser`] on demand.
///
/// Only the quads produced by the last parsing step are buffered.
pub struct QuadStream<P: QuadParser> {
    parser: P,
    buffer: VecDeque<Quad>,
    position: usize,
}

impl<P: QuadParser> QuadStream<P> {
    pub fn new(parser: P) -> Self {
        Self {
            parser,
            buffer: VecDeque::new(),
            position: 0,
        }
    }

    pub fn parser(&self) -> &P {
        &self.parser
    }

    pub fn into_parser(self) -> P {
        self.parser
    }

    fn fill(&mut self) -> Result<(), P::Error> {
        let buffer = &mut self.buffer;
        while buffer.is_empty() && !self.parser.is_end() {
            self.parser.parse_step(&mut |q| buffer.push_back(q))?;
        }
        Ok(())
    }
}

impl<P: QuadParser> QuadSequence for QuadStream<P> {
    type Error = P::Error;

    fn rewind(&mut self) -> Result<(), P::Error> {
        self.buffer.clear();
        self.position = 0;
        self.parser.rewind()?;
        self.fill()
    }

    fn valid(&self) -> bool {
        !self.buffer.is_empty()
    }

    fn current(&self) -> Option<&Quad> {
        self.buffer.front()
    }

    fn next(&mut self) -> Result<(), P::Error> {
        if self.buffer.pop_front().is_some() {
            self.position += 1;
        }
        self.fill()
    }

    fn key(&self) -> Option<usize> {
        if self.valid() {
            Some(self.position)
        } else {
            None
        }
    }
}

/// An in-memory [`QuadSequence`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuadVec {
    quads: Vec<Quad>,
    position: usize,
}

impl QuadVec {
    pub fn new(quads: Vec<Quad>) -> Self {
        Self { quads, position: 0 }
    }

    pub fn into_inner(self) -> Vec<Quad> {
        self.quads
    }
}

impl From<Vec<Quad>> for QuadVec {
    fn from(quads: Vec<Quad>) -> Self {
        Self::new(quads)
    }
}

impl std::iter::FromIterator<Quad> for QuadVec {
    fn from_iter<T: IntoIterator<Item = Quad>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl QuadSequence for QuadVec {
    type Error = io::Error;

    fn rewind(&mut self) -> io::Result<()> {
        self.position = 0;
        Ok(())
    }

    fn valid(&self) -> bool {
        self.position < self.quads.len()
    }

    fn current(&self) -> Option<&Quad> {
        self.quads.get(self.position)
    }

    fn next(&mut self) -> io::Result<()> {
        if self.valid() {
            self.position += 1;
        }
        Ok(())
    }

    fn key(&self) -> Option<usize> {
        if self.valid() {
            Some(self.position)
        } else {
            None
        }
    }
}

/// Created with the method [`into_quads`](trait.QuadSequence.html#method.into_quads).
///
/// It stops after the first error.
pub struct Quads<S: QuadSequence> {
    sequence: S,
    started: bool,
    failed: bool,
}

impl<S: QuadSequence> Iterator for Quads<S> {
    type Item = Result<Quad, S::Error>;

    fn next(&mut self) -> Option<Result<Quad, S::Error>> {
        if self.failed {
            return None;
        }
        let step = if self.started {
            self.sequence.next()
        } else {
            self.started = true;
            self.sequence.rewind()
        };
        if let Err(e) = step {
            self.failed = true;
            return Some(Err(e));
        }
        self.sequence.current().cloned().map(Ok)
    }
}

/// Reads a sequence from its beginning to its end.
pub fn for_each_quad<S: QuadSequence, E: From<S::Error>>(
    sequence: &mut S,
    mut on_quad: impl FnMut(&Quad) -> Result<(), E>,
) -> Result<(), E> {
    sequence.rewind()?;
    while let Some(quad) = sequence.current() {
        on_quad(quad)?;
        sequence.next()?;
    }
    Ok(())
}
