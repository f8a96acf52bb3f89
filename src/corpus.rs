//! The input data shared by every trial of a suite.
//!
//! A [`Corpus`] is a fixed, ordered list of unique tokens. It is generated
//! once when a suite is built and is then reused, unchanged, as the input of
//! every repetition. The map suite additionally derives a [`SearchSample`]
//! from it: a handful of corpus tokens used as the lookup workload.

use std::{collections::HashSet, ops, rc::Rc};

use rand::Rng;
use thiserror::Error;
use tracing::trace;

use crate::token_source::TokenSource;

/// A token stored in the structures under test.
///
/// Tokens are reference counted so that placing one into a structure copies a
/// pointer rather than the characters.
pub type Token = Rc<str>;

#[derive(Error, Debug, PartialEq, Eq)]
/// Errors that can occur when building a [`Corpus`] from explicit tokens.
#[expect(
    clippy::module_name_repetitions,
    reason = "Using 'Error' would be too generic and may cause confusion."
)]
#[non_exhaustive]
pub enum CorpusError {
    /// A corpus must contain at least one token.
    #[error("corpus must not be empty.")]
    Empty,
    /// Every token of a corpus must be unique.
    #[error("duplicate token {0:?} at index {1}.")]
    Duplicate(String, usize),
}

// ////////////////////////////////////////////////////////////////////////////
// Corpus
// ////////////////////////////////////////////////////////////////////////////

/// An ordered sequence of pairwise-distinct tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corpus {
    tokens: Vec<Token>,
}

impl Corpus {
    /// Draw tokens from `source` until `size` distinct ones have been
    /// collected. Repeated tokens are discarded and redrawn.
    ///
    /// This does not terminate if `source` cannot produce `size` distinct
    /// values.
    #[inline]
    pub fn generate(size: usize, source: &mut impl TokenSource) -> Self {
        let mut seen = HashSet::with_capacity(size);
        let mut tokens = Vec::with_capacity(size);
        let mut rejected = 0_usize;
        while tokens.len() < size {
            let token: Token = source.next_token().into();
            if seen.insert(Rc::clone(&token)) {
                tokens.push(token);
            } else {
                rejected += 1;
            }
        }
        trace!(size, rejected, "generated corpus");
        Corpus { tokens }
    }

    /// Build a corpus from explicit tokens, keeping their order.
    ///
    /// # Errors
    ///
    /// The tokens must be non-empty and pairwise distinct.
    #[inline]
    pub fn from_tokens<I>(tokens: I) -> Result<Self, CorpusError>
    where
        I: IntoIterator,
        I::Item: Into<Token>,
    {
        let tokens: Vec<Token> = tokens.into_iter().map(Into::into).collect();
        if tokens.is_empty() {
            return Err(CorpusError::Empty);
        }
        let mut seen = HashSet::with_capacity(tokens.len());
        for (i, token) in tokens.iter().enumerate() {
            if !seen.insert(token) {
                return Err(CorpusError::Duplicate(token.to_string(), i));
            }
        }
        Ok(Corpus { tokens })
    }

    /// Pick `k` distinct tokens at random positions of the corpus.
    ///
    /// Positions are drawn uniformly and a repeated position is simply drawn
    /// again, so this does not terminate if `k` exceeds the length of a
    /// non-empty corpus. An empty corpus yields an empty sample.
    #[inline]
    pub fn search_sample(&self, k: usize, rng: &mut impl Rng) -> SearchSample {
        if self.tokens.is_empty() {
            return SearchSample { tokens: Vec::new() };
        }
        let mut picked = HashSet::with_capacity(k);
        let mut tokens = Vec::with_capacity(k);
        let mut rejected = 0_usize;
        while tokens.len() < k {
            let i = rng.random_range(0..self.tokens.len());
            if picked.insert(i) {
                tokens.push(Rc::clone(&self.tokens[i]));
            } else {
                rejected += 1;
            }
        }
        trace!(k, rejected, "derived search sample");
        SearchSample { tokens }
    }

    /// Returns `true` if the token is part of the corpus.
    #[inline]
    #[must_use]
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| &**t == token)
    }
}

impl ops::Deref for Corpus {
    type Target = [Token];

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.tokens
    }
}

// ////////////////////////////////////////////////////////////////////////////
// Search Sample
// ////////////////////////////////////////////////////////////////////////////

/// A fixed subset of a [`Corpus`] used as the workload of lookup trials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSample {
    tokens: Vec<Token>,
}

impl ops::Deref for SearchSample {
    type Target = [Token];

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.tokens
    }
}
