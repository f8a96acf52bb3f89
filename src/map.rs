//! Timing of the associative maps.
//!
//! Both a hash map and an ordered map are loaded with the same corpus and then
//! subjected to three tests:
//!
//! | Row | Operation                                      |
//! |-----|------------------------------------------------|
//! | 0   | bulk load of the whole corpus                  |
//! | 1   | insertion of one new key into a loaded map     |
//! | 2   | lookup of every token of the search sample     |
//!
//! A hash map is expected to be $O(1)$ for the last two, while an ordered map
//! is $O(\log n)$.

use std::{
    collections::{BTreeMap, HashMap},
    hint::black_box,
    rc::Rc,
};

use rand::prelude::*;
use tracing::{debug, info};

use crate::{
    config::Config,
    corpus::{Corpus, SearchSample, Token},
    results::{Measurement, ResultsSink},
    timing::{mean, timed},
    token_source::TokenSource,
};

// ////////////////////////////////////////////////////////////////////////////
// Kinds and operations
// ////////////////////////////////////////////////////////////////////////////

/// The map implementations under test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapKind {
    /// [`HashMap`], hash based.
    Hash,
    /// [`BTreeMap`], comparison based.
    Ordered,
}

impl MapKind {
    /// All map kinds, in column order.
    pub const ALL: [MapKind; 2] = [MapKind::Hash, MapKind::Ordered];

    /// The results column of this kind.
    #[inline]
    #[must_use]
    pub const fn column(self) -> usize {
        match self {
            MapKind::Hash => 1,
            MapKind::Ordered => 2,
        }
    }

    /// Column heading.
    #[inline]
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            MapKind::Hash => "HashMap",
            MapKind::Ordered => "BTreeMap",
        }
    }
}

/// The operations timed against each map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapOp {
    /// Insert the whole corpus into an empty map.
    Load,
    /// Insert one key absent from a loaded map.
    InsertOne,
    /// Look up every token of the search sample.
    Lookup,
}

impl MapOp {
    /// All operations, in row order.
    pub const ALL: [MapOp; 3] = [MapOp::Load, MapOp::InsertOne, MapOp::Lookup];

    /// The results row of this operation.
    #[inline]
    #[must_use]
    pub const fn row(self) -> usize {
        match self {
            MapOp::Load => 0,
            MapOp::InsertOne => 1,
            MapOp::Lookup => 2,
        }
    }

    /// Row heading.
    #[inline]
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            MapOp::Load => "Load",
            MapOp::InsertOne => "Insert one",
            MapOp::Lookup => "Find sample",
        }
    }
}

// ////////////////////////////////////////////////////////////////////////////
// Bench Map
// ////////////////////////////////////////////////////////////////////////////

/// The operations the suite needs from a map under test.
///
/// `Clone` is used to produce working copies of a loaded baseline, and is
/// never part of a timed region.
pub trait BenchMap: Clone {
    /// Which column the map reports to.
    const KIND: MapKind;

    /// A new, empty map.
    #[must_use]
    fn empty() -> Self;

    /// Insert `value` under `key`, returning the value it replaced.
    fn insert(&mut self, key: Token, value: Token) -> Option<Token>;

    /// The value stored under `key`.
    fn get(&self, key: &str) -> Option<&Token>;

    /// Returns `true` if `key` is present.
    #[inline]
    fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of entries.
    fn len(&self) -> usize;

    /// Returns `true` if the map has no entries.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl BenchMap for HashMap<Token, Token> {
    const KIND: MapKind = MapKind::Hash;

    #[inline]
    fn empty() -> Self {
        HashMap::new()
    }

    #[inline]
    fn insert(&mut self, key: Token, value: Token) -> Option<Token> {
        HashMap::insert(self, key, value)
    }

    #[inline]
    fn get(&self, key: &str) -> Option<&Token> {
        HashMap::get(self, key)
    }

    #[inline]
    fn len(&self) -> usize {
        HashMap::len(self)
    }
}

impl BenchMap for BTreeMap<Token, Token> {
    const KIND: MapKind = MapKind::Ordered;

    #[inline]
    fn empty() -> Self {
        BTreeMap::new()
    }

    #[inline]
    fn insert(&mut self, key: Token, value: Token) -> Option<Token> {
        BTreeMap::insert(self, key, value)
    }

    #[inline]
    fn get(&self, key: &str) -> Option<&Token> {
        BTreeMap::get(self, key)
    }

    #[inline]
    fn len(&self) -> usize {
        BTreeMap::len(self)
    }
}

// ////////////////////////////////////////////////////////////////////////////
// Report
// ////////////////////////////////////////////////////////////////////////////

/// The three measurements taken for one map kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapReport {
    /// Which map was measured.
    pub kind: MapKind,
    /// Mean time to load the corpus.
    pub load: Measurement,
    /// Mean time to insert one new key.
    pub insert_one: Measurement,
    /// Mean time to look up the whole search sample.
    pub lookup: Measurement,
}

impl MapReport {
    /// The measurement for `op`.
    #[inline]
    #[must_use]
    pub fn get(&self, op: MapOp) -> Measurement {
        match op {
            MapOp::Load => self.load,
            MapOp::InsertOne => self.insert_one,
            MapOp::Lookup => self.lookup,
        }
    }

    /// Write all three cells of this report.
    #[inline]
    pub fn record(&self, sink: &mut impl ResultsSink) {
        for op in MapOp::ALL {
            sink.record_measurement(op.row(), self.kind.column(), self.get(op));
        }
    }
}

// ////////////////////////////////////////////////////////////////////////////
// Map Suite
// ////////////////////////////////////////////////////////////////////////////

/// Times loading, inserting into and searching maps.
///
/// The corpus and search sample are fixed when the suite is built. The token
/// source is kept to draw the fresh keys needed by the insert test.
#[derive(Debug)]
pub struct MapSuite<T> {
    config: Config,
    corpus: Corpus,
    sample: SearchSample,
    source: T,
}

impl<T: TokenSource> MapSuite<T> {
    /// Create a new suite, generating its corpus from `source`.
    ///
    /// This does not terminate if `source` cannot produce `config.size()`
    /// distinct tokens.
    #[inline]
    pub fn new(config: Config, mut source: T) -> Self {
        let corpus = Corpus::generate(config.size(), &mut source);
        Self::with_corpus(config, corpus, source)
    }

    /// Create a new suite over an existing corpus.
    ///
    /// The corpus length takes precedence over `config.size()`, and the search
    /// sample is capped to the corpus length.
    #[inline]
    pub fn with_corpus(config: Config, corpus: Corpus, source: T) -> Self {
        let mut rng = SmallRng::from_rng(&mut rand::rng());
        let sample = corpus.search_sample(config.search_size().min(corpus.len()), &mut rng);
        MapSuite {
            config,
            corpus,
            sample,
            source,
        }
    }

    /// The corpus every map is loaded with.
    #[inline]
    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// The tokens looked up by the lookup test.
    #[inline]
    pub fn sample(&self) -> &SearchSample {
        &self.sample
    }

    /// Run all tests against both map kinds and record the results.
    #[inline]
    pub fn run(&mut self, sink: &mut impl ResultsSink) {
        info!(
            size = self.corpus.len(),
            repetitions = self.config.repetitions(),
            "running map suite"
        );
        self.measure::<HashMap<Token, Token>>().record(sink);
        self.measure::<BTreeMap<Token, Token>>().record(sink);
        info!("map suite finished");
    }

    /// Run all tests against the map `M`.
    #[inline]
    pub fn measure<M: BenchMap>(&mut self) -> MapReport {
        let repetitions = self.config.repetitions();
        let corpus = &self.corpus;

        let load = mean(repetitions, || {
            let mut map = M::empty();
            timed(|| populate(&mut map, corpus)).0
        });

        let mut baseline = M::empty();
        populate(&mut baseline, corpus);

        let source = &mut self.source;
        let insert_one = mean(repetitions, || {
            let mut map = baseline.clone();
            let key = fresh_key(&map, &mut *source);
            let value = Rc::clone(&key);
            timed(|| map.insert(key, value)).0
        });

        let map = baseline.clone();
        let sample = &self.sample;
        let lookup = mean(repetitions, || {
            timed(|| {
                for token in sample.iter() {
                    black_box(map.get(token));
                }
            })
            .0
        });

        let report = MapReport {
            kind: M::KIND,
            load: Measurement::Mean(load),
            insert_one: Measurement::Mean(insert_one),
            lookup: Measurement::Mean(lookup),
        };
        debug!(?report, "measured map");
        report
    }
}

/// Insert every corpus token into `map` as its own value.
fn populate<M: BenchMap>(map: &mut M, corpus: &[Token]) {
    for token in corpus {
        map.insert(Rc::clone(token), Rc::clone(token));
    }
}

/// Draw tokens until one is not already a key of `map`.
fn fresh_key<M: BenchMap>(map: &M, source: &mut impl TokenSource) -> Token {
    loop {
        let token = source.next_token();
        if !map.contains_key(&token) {
            return token.into();
        }
    }
}
