//! Timing of the sequence containers.
//!
//! Four representations are compared: a fixed-size array, a growable array, a
//! double-ended queue and a doubly linked list. Each is asked for a subset of
//! seven operations:
//!
//! | Row | Operation         | Array | Vec | VecDeque | LinkedList |
//! |-----|-------------------|:-----:|:---:|:--------:|:----------:|
//! | 0   | bulk load         | ✓     | ✓   | ✓        | ✓          |
//! | 1   | access first      | ✓     | ✓   | ✓        | ✓          |
//! | 2   | access last       | ✓     | ✓   | ✓        | ✓          |
//! | 3   | access middle     | ✓     | ✓   |          | ✓          |
//! | 4   | insert at start   |       | ✓   | ✓        | ✓          |
//! | 5   | insert at end     |       | ✓   | ✓        | ✓          |
//! | 6   | insert in middle  |       | ✓   |          | ✓          |
//!
//! Blank cells are not measured and are reported as
//! [`Measurement::NotApplicable`].

pub mod array;
pub mod deque;
pub mod linked_list;
pub mod vec;

use std::{
    collections::{LinkedList, VecDeque},
    rc::Rc,
};

use thiserror::Error;
use tracing::{debug, info};

use crate::{
    config::Config,
    corpus::{Corpus, Token},
    results::{Measurement, ResultsSink},
    timing::{mean, timed},
    token_source::TokenSource,
};

pub use array::FixedArray;

/// Token inserted by the insert tests unless configured otherwise.
pub const INSERTED_TOKEN: &str = "inserted";

// ////////////////////////////////////////////////////////////////////////////
// Kinds, operations and positions
// ////////////////////////////////////////////////////////////////////////////

/// The sequence implementations under test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SequenceKind {
    /// [`FixedArray`], a boxed slice which can neither grow nor shift.
    Array,
    /// [`Vec`].
    Growable,
    /// [`VecDeque`].
    Deque,
    /// [`LinkedList`].
    LinkedList,
}

impl SequenceKind {
    /// All sequence kinds, in column order.
    pub const ALL: [SequenceKind; 4] = [
        SequenceKind::Array,
        SequenceKind::Growable,
        SequenceKind::Deque,
        SequenceKind::LinkedList,
    ];

    /// The results column of this kind.
    #[inline]
    #[must_use]
    pub const fn column(self) -> usize {
        match self {
            SequenceKind::Array => 1,
            SequenceKind::Growable => 2,
            SequenceKind::Deque => 3,
            SequenceKind::LinkedList => 4,
        }
    }

    /// Column heading.
    #[inline]
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            SequenceKind::Array => "Array",
            SequenceKind::Growable => "Vec",
            SequenceKind::Deque => "VecDeque",
            SequenceKind::LinkedList => "LinkedList",
        }
    }

    /// Whether `op` is measured for this kind.
    ///
    /// The array cannot grow, so it offers no insertion. The deque is only
    /// exercised at its two ends.
    #[inline]
    #[must_use]
    pub const fn supports(self, op: SequenceOp) -> bool {
        match (self, op) {
            (SequenceKind::Array, SequenceOp::InsertStart)
            | (SequenceKind::Array, SequenceOp::InsertEnd)
            | (SequenceKind::Array, SequenceOp::InsertMiddle)
            | (SequenceKind::Deque, SequenceOp::AccessMiddle)
            | (SequenceKind::Deque, SequenceOp::InsertMiddle) => false,
            _ => true,
        }
    }
}

/// The operations timed against each sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SequenceOp {
    /// Append the whole corpus to an empty sequence.
    Load,
    /// Read the first element.
    AccessFirst,
    /// Read the last element.
    AccessLast,
    /// Read the element at index `N / 2`.
    AccessMiddle,
    /// Insert before the first element.
    InsertStart,
    /// Insert after the last element.
    InsertEnd,
    /// Insert at index `N / 2`.
    InsertMiddle,
}

impl SequenceOp {
    /// All operations, in row order.
    pub const ALL: [SequenceOp; 7] = [
        SequenceOp::Load,
        SequenceOp::AccessFirst,
        SequenceOp::AccessLast,
        SequenceOp::AccessMiddle,
        SequenceOp::InsertStart,
        SequenceOp::InsertEnd,
        SequenceOp::InsertMiddle,
    ];

    /// The results row of this operation.
    #[inline]
    #[must_use]
    pub const fn row(self) -> usize {
        match self {
            SequenceOp::Load => 0,
            SequenceOp::AccessFirst => 1,
            SequenceOp::AccessLast => 2,
            SequenceOp::AccessMiddle => 3,
            SequenceOp::InsertStart => 4,
            SequenceOp::InsertEnd => 5,
            SequenceOp::InsertMiddle => 6,
        }
    }

    /// Row heading.
    #[inline]
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            SequenceOp::Load => "Load",
            SequenceOp::AccessFirst => "Access first",
            SequenceOp::AccessLast => "Access last",
            SequenceOp::AccessMiddle => "Access middle",
            SequenceOp::InsertStart => "Insert at start",
            SequenceOp::InsertEnd => "Insert at end",
            SequenceOp::InsertMiddle => "Insert in middle",
        }
    }

    /// Where the operation acts, given the middle index.
    #[inline]
    #[must_use]
    pub const fn position(self, middle: usize) -> Option<Position> {
        match self {
            SequenceOp::Load => None,
            SequenceOp::AccessFirst | SequenceOp::InsertStart => Some(Position::Start),
            SequenceOp::AccessLast | SequenceOp::InsertEnd => Some(Position::End),
            SequenceOp::AccessMiddle | SequenceOp::InsertMiddle => Some(Position::Middle(middle)),
        }
    }
}

/// A position within a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    /// The first element.
    Start,
    /// The last element (or just past it, when inserting).
    End,
    /// The element at the given index.
    Middle(usize),
}

impl Position {
    /// The access operation at this position.
    #[inline]
    #[must_use]
    pub const fn access_op(self) -> SequenceOp {
        match self {
            Position::Start => SequenceOp::AccessFirst,
            Position::End => SequenceOp::AccessLast,
            Position::Middle(_) => SequenceOp::AccessMiddle,
        }
    }

    /// The insert operation at this position.
    #[inline]
    #[must_use]
    pub const fn insert_op(self) -> SequenceOp {
        match self {
            Position::Start => SequenceOp::InsertStart,
            Position::End => SequenceOp::InsertEnd,
            Position::Middle(_) => SequenceOp::InsertMiddle,
        }
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
/// Returned by a [`BenchSequence`] asked for an operation it does not offer.
#[error("{} does not support '{}'.", .kind.label(), .op.label())]
pub struct Unsupported {
    /// The sequence kind.
    pub kind: SequenceKind,
    /// The operation requested.
    pub op: SequenceOp,
}

impl Unsupported {
    /// The error for `op` on `kind`.
    #[inline]
    #[must_use]
    pub const fn new(kind: SequenceKind, op: SequenceOp) -> Self {
        Unsupported { kind, op }
    }
}

// ////////////////////////////////////////////////////////////////////////////
// Bench Sequence
// ////////////////////////////////////////////////////////////////////////////

/// The operations the suite needs from a sequence under test.
///
/// Operations a kind does not offer (see [`SequenceKind::supports`]) return
/// [`Unsupported`] and are never timed.
pub trait BenchSequence: Sized {
    /// Which column the sequence reports to.
    const KIND: SequenceKind;

    /// A new instance ready to be loaded with `len` tokens.
    ///
    /// Any up-front allocation happens here, outside the timed region. Only
    /// containers that cannot grow should allocate for `len`.
    #[must_use]
    fn empty(len: usize) -> Self;

    /// Place every corpus token into the sequence, in order.
    fn load(&mut self, corpus: &[Token]);

    /// The element at `position`.
    ///
    /// # Errors
    ///
    /// Fails if the kind does not support access at `position`.
    fn access(&self, position: Position) -> Result<Option<&Token>, Unsupported>;

    /// Insert `token` at `position`.
    ///
    /// # Errors
    ///
    /// Fails if the kind does not support insertion at `position`.
    fn insert(&mut self, position: Position, token: Token) -> Result<(), Unsupported>;

    /// An independent working copy for one insert trial.
    ///
    /// The copy is made outside the timed region, and each implementation
    /// documents how it is made. Growable copies have room for at least one
    /// more element, so the timed insert never pays for reallocation of the
    /// copy itself.
    #[must_use]
    fn clone_for_benchmark(&self) -> Self;

    /// The elements of the sequence, in order.
    fn to_vec(&self) -> Vec<Token>;
}

/// A sequence which grows one element at a time at its back.
pub trait PushBack: BenchSequence {
    /// Append `token` after the last element.
    fn push_back(&mut self, token: Token);
}

/// Build a working copy holding `elements`, pushing them one at a time onto
/// an empty `S`.
///
/// This is how the growable array and the linked list make their copies, so
/// that the copy is built the same way whatever insert it is used for.
#[inline]
#[must_use]
pub fn copy_element_wise<'a, S: PushBack>(
    elements: impl ExactSizeIterator<Item = &'a Token>,
) -> S {
    let mut copy = S::empty(elements.len());
    for token in elements {
        copy.push_back(Rc::clone(token));
    }
    copy
}

// ////////////////////////////////////////////////////////////////////////////
// Report
// ////////////////////////////////////////////////////////////////////////////

/// The seven measurements taken for one sequence kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceReport {
    /// Which sequence was measured.
    pub kind: SequenceKind,
    cells: [Measurement; 7],
}

impl SequenceReport {
    /// The measurement for `op`.
    #[inline]
    #[must_use]
    pub fn get(&self, op: SequenceOp) -> Measurement {
        self.cells
            .get(op.row())
            .copied()
            .unwrap_or(Measurement::NotApplicable)
    }

    /// Write all seven cells of this report.
    #[inline]
    pub fn record(&self, sink: &mut impl ResultsSink) {
        for op in SequenceOp::ALL {
            sink.record_measurement(op.row(), self.kind.column(), self.get(op));
        }
    }
}

// ////////////////////////////////////////////////////////////////////////////
// Sequence Suite
// ////////////////////////////////////////////////////////////////////////////

/// Times loading, positional access and positional insertion on sequences.
#[derive(Debug, Clone)]
pub struct SequenceSuite {
    config: Config,
    corpus: Corpus,
    insert_token: Token,
}

impl SequenceSuite {
    /// Create a new suite, generating its corpus from `source`.
    ///
    /// This does not terminate if `source` cannot produce `config.size()`
    /// distinct tokens.
    #[inline]
    pub fn new(config: Config, mut source: impl TokenSource) -> Self {
        Self::with_corpus(config, Corpus::generate(config.size(), &mut source))
    }

    /// Create a new suite over an existing corpus, whose length takes
    /// precedence over `config.size()`.
    #[inline]
    #[must_use]
    pub fn with_corpus(config: Config, corpus: Corpus) -> Self {
        SequenceSuite {
            config,
            corpus,
            insert_token: Token::from(INSERTED_TOKEN),
        }
    }

    /// Use `token` for the insert tests.
    #[inline]
    #[must_use]
    pub fn with_insert_token(mut self, token: impl Into<Token>) -> Self {
        self.insert_token = token.into();
        self
    }

    /// The corpus every sequence is loaded with.
    #[inline]
    #[must_use]
    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// Run all tests against the four sequence kinds and record the results.
    #[inline]
    pub fn run(&self, sink: &mut impl ResultsSink) {
        info!(
            size = self.corpus.len(),
            repetitions = self.config.repetitions(),
            "running sequence suite"
        );
        self.measure::<FixedArray>().record(sink);
        self.measure::<Vec<Token>>().record(sink);
        self.measure::<VecDeque<Token>>().record(sink);
        self.measure::<LinkedList<Token>>().record(sink);
        info!("sequence suite finished");
    }

    /// Run all supported tests against the sequence `S`.
    #[inline]
    #[must_use]
    pub fn measure<S: BenchSequence>(&self) -> SequenceReport {
        let repetitions = self.config.repetitions();
        let corpus: &[Token] = &self.corpus;
        let len = corpus.len();
        let middle = len / 2;

        let mut baseline = S::empty(len);
        baseline.load(corpus);

        let mut cells = [Measurement::NotApplicable; 7];
        for (op, cell) in SequenceOp::ALL.into_iter().zip(&mut cells) {
            if !S::KIND.supports(op) {
                continue;
            }
            let elapsed = match op.position(middle) {
                None => mean(repetitions, || {
                    let mut sequence = S::empty(len);
                    timed(|| sequence.load(corpus)).0
                }),
                Some(position) if op == position.access_op() => mean(repetitions, || {
                    timed(|| baseline.access(position)).0
                }),
                Some(position) => mean(repetitions, || {
                    let mut copy = baseline.clone_for_benchmark();
                    let token = Rc::clone(&self.insert_token);
                    timed(|| copy.insert(position, token)).0
                }),
            };
            *cell = Measurement::Mean(elapsed);
        }

        let report = SequenceReport {
            kind: S::KIND,
            cells,
        };
        debug!(?report, "measured sequence");
        report
    }
}

#[cfg(test)]
mod tests {
    use std::{
        cell::Cell,
        collections::{LinkedList, VecDeque},
        thread::LocalKey,
    };

    use anyhow::Result;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::{
        BenchSequence, FixedArray, Position, PushBack, SequenceKind, SequenceOp, SequenceSuite,
        Unsupported, copy_element_wise,
    };
    use crate::{
        config::Config,
        corpus::{Corpus, Token},
        results::{Measurement, NOT_APPLICABLE, ResultsTable},
        token_source::Words,
    };

    fn abcd() -> Result<Corpus> {
        Ok(Corpus::from_tokens(["a", "b", "c", "d"])?)
    }

    fn strings(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| &**t).collect()
    }

    /// Every operation offered by `S` must succeed, and every other must
    /// report [`Unsupported`].
    fn check_support<S: BenchSequence>() -> Result<()> {
        let corpus = abcd()?;
        let mut sequence = S::empty(corpus.len());
        sequence.load(&corpus);
        assert_eq!(strings(&sequence.to_vec()), ["a", "b", "c", "d"]);

        for op in SequenceOp::ALL {
            let Some(position) = op.position(2) else {
                continue;
            };
            let supported = S::KIND.supports(op);
            let outcome = if op == position.access_op() {
                sequence.access(position).map(|_| ())
            } else {
                sequence.clone_for_benchmark().insert(position, "e".into())
            };
            if supported {
                assert_eq!(outcome, Ok(()), "{op:?}");
            } else {
                assert_eq!(outcome, Err(Unsupported::new(S::KIND, op)), "{op:?}");
            }
        }
        Ok(())
    }

    #[test]
    fn support_matches_table() -> Result<()> {
        check_support::<FixedArray>()?;
        check_support::<Vec<Token>>()?;
        check_support::<VecDeque<Token>>()?;
        check_support::<LinkedList<Token>>()?;
        Ok(())
    }

    #[test]
    fn unsupported_message() {
        assert_eq!(
            Unsupported::new(SequenceKind::Deque, SequenceOp::AccessMiddle).to_string(),
            "VecDeque does not support 'Access middle'."
        );
    }

    #[rstest]
    #[case(SequenceKind::Array, [true, true, true, true, false, false, false])]
    #[case(SequenceKind::Growable, [true; 7])]
    #[case(SequenceKind::Deque, [true, true, true, false, true, true, false])]
    #[case(SequenceKind::LinkedList, [true; 7])]
    fn support_table(#[case] kind: SequenceKind, #[case] expected: [bool; 7]) {
        assert_eq!(SequenceOp::ALL.map(|op| kind.supports(op)), expected);
    }

    #[test]
    fn layout() {
        assert_eq!(SequenceKind::ALL.map(SequenceKind::column), [1, 2, 3, 4]);
        assert_eq!(SequenceOp::ALL.map(SequenceOp::row), [0, 1, 2, 3, 4, 5, 6]);
        assert_eq!(SequenceOp::InsertMiddle.position(7), Some(Position::Middle(7)));
        assert_eq!(SequenceOp::Load.position(7), None);
    }

    #[test]
    fn insert_start_of_vec_copy() -> Result<()> {
        let corpus = abcd()?;
        let mut vec = <Vec<Token>>::empty(corpus.len());
        vec.load(&corpus);
        let mut copy = vec.clone_for_benchmark();
        BenchSequence::insert(&mut copy, Position::Start, "e".into())?;
        assert_eq!(strings(&copy), ["e", "a", "b", "c", "d"]);
        assert_eq!(strings(&vec), ["a", "b", "c", "d"]);

        let suite = SequenceSuite::with_corpus(Config::new(4, 2, 0)?, corpus).with_insert_token("e");
        let report = suite.measure::<Vec<Token>>();
        assert!(report.get(SequenceOp::InsertStart).to_cell() >= 0);
        Ok(())
    }

    #[rstest]
    fn array_never_inserts(#[values(1, 2, 50)] repetitions: usize) -> Result<()> {
        let suite = SequenceSuite::new(Config::new(100, repetitions, 0)?, Words::new());
        let mut table = ResultsTable::sequences();
        suite.measure::<FixedArray>().record(&mut table);
        let column = SequenceKind::Array.column();
        for op in [SequenceOp::InsertStart, SequenceOp::InsertEnd, SequenceOp::InsertMiddle] {
            assert_eq!(table.get(op.row(), column), Some(NOT_APPLICABLE));
        }
        for op in [SequenceOp::Load, SequenceOp::AccessFirst, SequenceOp::AccessMiddle] {
            assert!(table.get(op.row(), column).is_some_and(|v| v >= 0));
        }
        Ok(())
    }

    #[test]
    fn deque_middle_not_applicable() -> Result<()> {
        let suite = SequenceSuite::new(Config::new(100, 10, 0)?, Words::new());
        let report = suite.measure::<VecDeque<Token>>();
        assert_eq!(report.get(SequenceOp::AccessMiddle), Measurement::NotApplicable);
        assert_eq!(report.get(SequenceOp::InsertMiddle), Measurement::NotApplicable);
        assert!(report.get(SequenceOp::AccessFirst).to_cell() >= 0);
        assert!(report.get(SequenceOp::AccessLast).to_cell() >= 0);
        Ok(())
    }

    #[test]
    fn run_fills_table() -> Result<()> {
        let suite = SequenceSuite::new(Config::new(200, 5, 0)?, Words::new());
        let mut table = ResultsTable::sequences();
        suite.run(&mut table);
        for kind in SequenceKind::ALL {
            for op in SequenceOp::ALL {
                let value = table.get(op.row(), kind.column());
                if kind.supports(op) {
                    assert!(value.is_some_and(|v| v >= 0), "{kind:?} {op:?}");
                } else {
                    assert_eq!(value, Some(NOT_APPLICABLE), "{kind:?} {op:?}");
                }
            }
        }
        Ok(())
    }

    thread_local! {
        static COPIES: Cell<usize> = const { Cell::new(0) };
        static PUSHES: Cell<usize> = const { Cell::new(0) };
        static INSERTS: Cell<usize> = const { Cell::new(0) };
    }

    fn bump(counter: &'static LocalKey<Cell<usize>>) {
        counter.with(|n| n.set(n.get() + 1));
    }

    /// Wraps a growable sequence, counting working copies and the pushes that
    /// build them. Every insert must land on a fresh copy made entirely of
    /// pushes.
    struct Tracked<S> {
        inner: S,
        pushed: usize,
        fresh: bool,
    }

    impl<S: PushBack> BenchSequence for Tracked<S> {
        const KIND: SequenceKind = S::KIND;

        fn empty(len: usize) -> Self {
            Tracked {
                inner: S::empty(len),
                pushed: 0,
                fresh: false,
            }
        }

        fn load(&mut self, corpus: &[Token]) {
            self.inner.load(corpus);
        }

        fn access(&self, position: Position) -> Result<Option<&Token>, Unsupported> {
            self.inner.access(position)
        }

        fn insert(&mut self, position: Position, token: Token) -> Result<(), Unsupported> {
            assert!(self.fresh, "insert on a reused copy");
            assert_eq!(self.pushed, self.inner.to_vec().len(), "copy not built element-wise");
            self.fresh = false;
            bump(&INSERTS);
            self.inner.insert(position, token)
        }

        fn clone_for_benchmark(&self) -> Self {
            bump(&COPIES);
            let mut copy: Self = copy_element_wise(self.inner.to_vec().iter());
            copy.fresh = true;
            copy
        }

        fn to_vec(&self) -> Vec<Token> {
            self.inner.to_vec()
        }
    }

    impl<S: PushBack> PushBack for Tracked<S> {
        fn push_back(&mut self, token: Token) {
            bump(&PUSHES);
            self.pushed += 1;
            self.inner.push_back(token);
        }
    }

    fn reset_counters() {
        for counter in [&COPIES, &PUSHES, &INSERTS] {
            counter.with(|n| n.set(0));
        }
    }

    #[test]
    fn element_wise_copy_pushes_each_element() -> Result<()> {
        reset_counters();
        let corpus = abcd()?;
        let copy: Tracked<LinkedList<Token>> = copy_element_wise(corpus.iter());
        assert_eq!(copy.pushed, 4);
        assert_eq!(PUSHES.with(Cell::get), 4);
        assert_eq!(strings(&copy.to_vec()), ["a", "b", "c", "d"]);
        Ok(())
    }

    /// Five repetitions of three insert positions over a four-token corpus.
    fn check_fresh_copies<S: PushBack>() -> Result<()> {
        reset_counters();
        let suite = SequenceSuite::with_corpus(Config::new(4, 5, 0)?, abcd()?);
        let report = suite.measure::<Tracked<S>>();
        assert_eq!(COPIES.with(Cell::get), 15);
        assert_eq!(INSERTS.with(Cell::get), 15);
        assert_eq!(PUSHES.with(Cell::get), 15 * 4);
        for op in [SequenceOp::InsertStart, SequenceOp::InsertEnd, SequenceOp::InsertMiddle] {
            assert!(report.get(op).duration().is_some());
        }
        Ok(())
    }

    #[test]
    fn every_vec_insert_gets_a_fresh_copy() -> Result<()> {
        check_fresh_copies::<Vec<Token>>()
    }

    #[test]
    fn every_linked_list_insert_gets_a_fresh_copy() -> Result<()> {
        check_fresh_copies::<LinkedList<Token>>()
    }
}
