//! A fixed-capacity array of tokens.

use std::rc::Rc;

use crate::{
    corpus::Token,
    sequence::{BenchSequence, Position, SequenceKind, Unsupported},
};

/// A boxed slice of `N` token slots, allocated up front.
///
/// The array can be filled and read, but it can neither grow nor shift its
/// elements, so it offers no insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedArray {
    slots: Box<[Option<Token>]>,
}

impl FixedArray {
    /// Number of slots.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if the array has no slots at all.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl BenchSequence for FixedArray {
    const KIND: SequenceKind = SequenceKind::Array;

    /// Allocate `len` empty slots.
    #[inline]
    fn empty(len: usize) -> Self {
        FixedArray {
            slots: vec![None; len].into_boxed_slice(),
        }
    }

    /// Copy the corpus into the slots. Tokens beyond the capacity are ignored.
    #[inline]
    fn load(&mut self, corpus: &[Token]) {
        for (slot, token) in self.slots.iter_mut().zip(corpus) {
            *slot = Some(Rc::clone(token));
        }
    }

    #[inline]
    fn access(&self, position: Position) -> Result<Option<&Token>, Unsupported> {
        let slot = match position {
            Position::Start => self.slots.first(),
            Position::End => self.slots.last(),
            Position::Middle(i) => self.slots.get(i),
        };
        Ok(slot.and_then(Option::as_ref))
    }

    #[inline]
    fn insert(&mut self, position: Position, _token: Token) -> Result<(), Unsupported> {
        Err(Unsupported::new(Self::KIND, position.insert_op()))
    }

    /// A structural copy; the array is never the target of an insert trial.
    #[inline]
    fn clone_for_benchmark(&self) -> Self {
        self.clone()
    }

    #[inline]
    fn to_vec(&self) -> Vec<Token> {
        self.slots.iter().flatten().cloned().collect()
    }
}
