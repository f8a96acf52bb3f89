//! Random pronounceable words.

use rand::prelude::*;

use crate::token_source::TokenSource;

const ONSETS: [&str; 20] = [
    "b", "c", "d", "f", "g", "h", "j", "k", "l", "m", "n", "p", "r", "s", "t", "v", "w", "br",
    "st", "tr",
];
const NUCLEI: [&str; 6] = ["a", "e", "i", "o", "u", "ou"];
const CODAS: [&str; 8] = ["", "", "n", "r", "s", "t", "ll", "nd"];
const CONNECTORS: [&str; 8] = ["and", "of", "the", "in", "on", "with", "for", "by"];

/// Chance that a token is a connector rather than a word or term.
const CONNECTOR_P: f64 = 0.02;
/// Chance that a non-connector token is a two-word term.
const TERM_P: f64 = 0.25;

/// A token source producing random words, two-word terms, and the occasional
/// connector.
///
/// Words are assembled from one to three syllables, giving a pool of distinct
/// tokens large enough for corpora of many thousands of entries. Connectors
/// are a tiny fixed pool, so they exercise the duplicate-rejection paths of
/// the callers.
#[derive(Debug)]
pub struct Words {
    /// The random number generator.
    rng: SmallRng,
}

impl Words {
    /// Create a new word source seeded from the thread-local generator.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Words {
            rng: SmallRng::from_rng(&mut rand::rng()),
        }
    }

    /// Create a word source which always produces the same sequence.
    #[inline]
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Words {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    fn word(&mut self) -> String {
        let syllables = self.rng.random_range(1..=3);
        let mut word = String::new();
        for _ in 0..syllables {
            for part in [&ONSETS[..], &NUCLEI[..], &CODAS[..]] {
                if let Some(s) = part.choose(&mut self.rng) {
                    word.push_str(s);
                }
            }
        }
        word
    }
}

impl Default for Words {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl TokenSource for Words {
    #[inline]
    fn next_token(&mut self) -> String {
        if self.rng.random_bool(CONNECTOR_P) {
            if let Some(connector) = CONNECTORS.choose(&mut self.rng) {
                return (*connector).to_owned();
            }
        }
        let word = self.word();
        if self.rng.random_bool(TERM_P) {
            format!("{word} {}", self.word())
        } else {
            word
        }
    }
}
