//! Pull-based sequence protocol.
//!
//! A `Sequence` hands out `Iter`s; an `Iter` produces items one at a time
//! and must be closed once the consumer is done with it. Consumers hold
//! iterators through `ScopedIter`, which closes on every exit path.


use crate::{atomic::Atomic, error::QueryError, item::Item};

///
/// Iter
///

pub trait Iter {
    /// Produce the next item, or `None` at end of data.
    fn next(&mut self) -> Result<Option<Item>, QueryError>;

    /// Release whatever backs this iterator.
    fn close(&mut self);
}

///
/// Sequence
///

pub trait Sequence {
    fn iterate(&self) -> Result<Box<dyn Iter + '_>, QueryError>;
}

///
/// ScopedIter
///
/// Owns an open iterator and closes it exactly once, on explicit `close`
/// or on drop (including early returns and `?` propagation).
///

pub struct ScopedIter<'a> {
    inner: Box<dyn Iter + 'a>,
    closed: bool,
}

impl<'a> ScopedIter<'a> {
    pub fn open(sequence: &'a dyn Sequence) -> Result<Self, QueryError> {
        Ok(Self {
            inner: sequence.iterate()?,
            closed: false,
        })
    }

    /// Produce the next item; a closed iterator is always exhausted.
    pub fn next(&mut self) -> Result<Option<Item>, QueryError> {
        if self.closed {
            return Ok(None);
        }

        self.inner.next()
    }

    pub fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            self.inner.close();
        }
    }
}

impl Drop for ScopedIter<'_> {
    fn drop(&mut self) {
        self.close();
    }
}

///
/// ItemSequence
///
/// Materialized sequence over owned items.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ItemSequence {
    items: Vec<Item>,
}

impl ItemSequence {
    #[must_use]
    pub const fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    #[must_use]
    pub const fn empty() -> Self {
        Self { items: Vec::new() }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: Into<Item>> FromIterator<T> for ItemSequence {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

impl Sequence for ItemSequence {
    fn iterate(&self) -> Result<Box<dyn Iter + '_>, QueryError> {
        Ok(Box::new(SliceIter {
            items: self.items.iter(),
        }))
    }
}

struct SliceIter<'a> {
    items: std::slice::Iter<'a, Item>,
}

impl Iter for SliceIter<'_> {
    fn next(&mut self) -> Result<Option<Item>, QueryError> {
        Ok(self.items.next().cloned())
    }

    fn close(&mut self) {
        self.items = <&[Item]>::default().iter();
    }
}

///
/// LazySequence
///
/// Sequence whose items are produced on demand by a fallible producer.
/// Each `iterate` call starts a fresh producer run; closing the iterator
/// drops the run.
///

pub struct LazySequence<F> {
    producer: F,
}

impl<F, I> LazySequence<F>
where
    F: Fn() -> I,
    I: Iterator<Item = Result<Item, QueryError>>,
{
    pub const fn new(producer: F) -> Self {
        Self { producer }
    }
}

impl<F, I> Sequence for LazySequence<F>
where
    F: Fn() -> I,
    I: Iterator<Item = Result<Item, QueryError>> + 'static,
{
    fn iterate(&self) -> Result<Box<dyn Iter + '_>, QueryError> {
        Ok(Box::new(ProducerIter {
            run: Some((self.producer)()),
        }))
    }
}

struct ProducerIter<I> {
    run: Option<I>,
}

impl<I> Iter for ProducerIter<I>
where
    I: Iterator<Item = Result<Item, QueryError>>,
{
    fn next(&mut self) -> Result<Option<Item>, QueryError> {
        match self.run.as_mut() {
            Some(run) => run.next().transpose(),
            None => Ok(None),
        }
    }

    fn close(&mut self) {
        self.run = None;
    }
}

///
/// Singleton sequences
///

struct OnceIter {
    item: Option<Item>,
}

impl Iter for OnceIter {
    fn next(&mut self) -> Result<Option<Item>, QueryError> {
        Ok(self.item.take())
    }

    fn close(&mut self) {
        self.item = None;
    }
}

impl Sequence for Item {
    fn iterate(&self) -> Result<Box<dyn Iter + '_>, QueryError> {
        Ok(Box::new(OnceIter {
            item: Some(self.clone()),
        }))
    }
}

impl Sequence for Atomic {
    fn iterate(&self) -> Result<Box<dyn Iter + '_>, QueryError> {
        Ok(Box::new(OnceIter {
            item: Some(Item::Atomic(self.clone())),
        }))
    }
}
