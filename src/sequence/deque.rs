//! [`VecDeque`] as a double-ended queue.
//!
//! Both ends are $O(1)$. The middle is not exercised.

use std::{collections::VecDeque, rc::Rc};

use crate::{
    corpus::Token,
    sequence::{BenchSequence, Position, SequenceKind, Unsupported},
};

impl BenchSequence for VecDeque<Token> {
    const KIND: SequenceKind = SequenceKind::Deque;

    #[inline]
    fn empty(_len: usize) -> Self {
        VecDeque::new()
    }

    #[inline]
    fn load(&mut self, corpus: &[Token]) {
        for token in corpus {
            self.push_back(Rc::clone(token));
        }
    }

    #[inline]
    fn access(&self, position: Position) -> Result<Option<&Token>, Unsupported> {
        match position {
            Position::Start => Ok(self.front()),
            Position::End => Ok(self.back()),
            Position::Middle(_) => Err(Unsupported::new(Self::KIND, position.access_op())),
        }
    }

    #[inline]
    fn insert(&mut self, position: Position, token: Token) -> Result<(), Unsupported> {
        match position {
            Position::Start => self.push_front(token),
            Position::End => self.push_back(token),
            Position::Middle(_) => return Err(Unsupported::new(Self::KIND, position.insert_op())),
        }
        Ok(())
    }

    /// A structural copy through `Clone`, then room for one more element.
    #[inline]
    fn clone_for_benchmark(&self) -> Self {
        let mut copy = self.clone();
        copy.reserve(1);
        copy
    }

    #[inline]
    fn to_vec(&self) -> Vec<Token> {
        self.iter().cloned().collect()
    }
}
