//! [`Vec`] as a growable array.
//!
//! Access anywhere is $O(1)$; insertion is $O(1)$ amortised at the end and
//! $O(n)$ elsewhere, as every following element has to shift.

use std::rc::Rc;

use crate::{
    corpus::Token,
    sequence::{BenchSequence, Position, PushBack, SequenceKind, Unsupported, copy_element_wise},
};

impl BenchSequence for Vec<Token> {
    const KIND: SequenceKind = SequenceKind::Growable;

    /// An empty vector with no capacity, so that loading pays for growth.
    #[inline]
    fn empty(_len: usize) -> Self {
        Vec::new()
    }

    #[inline]
    fn load(&mut self, corpus: &[Token]) {
        for token in corpus {
            self.push(Rc::clone(token));
        }
    }

    #[inline]
    fn access(&self, position: Position) -> Result<Option<&Token>, Unsupported> {
        Ok(match position {
            Position::Start => self.first(),
            Position::End => self.last(),
            Position::Middle(i) => self.get(i),
        })
    }

    /// # Panics
    ///
    /// Panics if a middle index is greater than the length.
    #[inline]
    fn insert(&mut self, position: Position, token: Token) -> Result<(), Unsupported> {
        match position {
            Position::Start => Vec::insert(self, 0, token),
            Position::End => self.push(token),
            Position::Middle(i) => Vec::insert(self, i, token),
        }
        Ok(())
    }

    /// Pushes every element into a fresh vector one by one, then reserves room
    /// for one more.
    #[inline]
    fn clone_for_benchmark(&self) -> Self {
        let mut copy: Self = copy_element_wise(self.iter());
        copy.reserve(1);
        copy
    }

    #[inline]
    fn to_vec(&self) -> Vec<Token> {
        self.clone()
    }
}

impl PushBack for Vec<Token> {
    #[inline]
    fn push_back(&mut self, token: Token) {
        self.push(token);
    }
}
