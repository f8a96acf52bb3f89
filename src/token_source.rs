//! Benchmarks are fed with random string tokens drawn from a [`TokenSource`].
//!
//! A source is free to repeat itself: de-duplication is the responsibility of
//! the caller (see [`Corpus::generate`][crate::Corpus::generate]). The source
//! must however be able to produce *enough* distinct values eventually, as the
//! callers retry without bound.

pub mod words;

pub use words::Words;

// ////////////////////////////////////////////////////////////////////////////
// Token Source
// ////////////////////////////////////////////////////////////////////////////

/// Produces candidate tokens for a benchmark corpus.
pub trait TokenSource {
    /// Return the next candidate token, which may equal a previous one.
    fn next_token(&mut self) -> String;
}

impl<F> TokenSource for F
where
    F: FnMut() -> String,
{
    #[inline]
    fn next_token(&mut self) -> String {
        self()
    }
}
