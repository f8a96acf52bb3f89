//! `bigo` measures what the Big-O notation of common data structures looks
//! like in practice.
//!
//! Two suites are provided:
//!
//! - [`MapSuite`] compares a hash map against an ordered map when loading a
//!   corpus, inserting one more key, and looking up a handful of keys.
//! - [`SequenceSuite`] compares a fixed-size array, a growable array, a
//!   double-ended queue and a linked list when loading, reading at either end
//!   or in the middle, and inserting at either end or in the middle.
//!
//! Every operation is repeated a fixed number of times on freshly prepared
//! structures, and only the operation itself is timed. Setup such as
//! allocating the container or copying a baseline is kept out of the timed
//! region. The mean duration of each (operation, structure) pair is written
//! to a [`ResultsSink`], with `-1` marking operations a structure does not
//! offer.
//!
//! ```no_run
//! use bigo::{Config, MapSuite, ResultsTable, SequenceSuite, Words};
//!
//! let config = Config::default();
//!
//! let mut maps = ResultsTable::maps();
//! MapSuite::new(config, Words::new()).run(&mut maps);
//! println!("{maps}");
//!
//! let mut sequences = ResultsTable::sequences();
//! SequenceSuite::new(config, Words::new()).run(&mut sequences);
//! println!("{sequences}");
//! ```

pub mod config;
pub mod corpus;
pub mod map;
pub mod results;
pub mod sequence;
pub mod timing;
pub mod token_source;

pub use config::{Config, ConfigError};
pub use corpus::{Corpus, CorpusError, SearchSample, Token};
pub use map::{BenchMap, MapKind, MapOp, MapReport, MapSuite};
pub use results::{Measurement, NOT_APPLICABLE, ResultsSink, ResultsTable};
pub use sequence::{
    BenchSequence, FixedArray, Position, PushBack, SequenceKind, SequenceOp, SequenceReport,
    SequenceSuite, Unsupported, copy_element_wise,
};
pub use token_source::{TokenSource, Words};
