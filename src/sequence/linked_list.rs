//! [`LinkedList`] as a doubly linked list.
//!
//! Both ends are $O(1)$. Reaching the middle means walking from the nearer
//! end, so access and insertion there are $O(n)$.

use std::{collections::LinkedList, rc::Rc};

use crate::{
    corpus::Token,
    sequence::{BenchSequence, Position, PushBack, SequenceKind, Unsupported, copy_element_wise},
};

impl BenchSequence for LinkedList<Token> {
    const KIND: SequenceKind = SequenceKind::LinkedList;

    #[inline]
    fn empty(_len: usize) -> Self {
        LinkedList::new()
    }

    #[inline]
    fn load(&mut self, corpus: &[Token]) {
        for token in corpus {
            self.push_back(Rc::clone(token));
        }
    }

    #[inline]
    fn access(&self, position: Position) -> Result<Option<&Token>, Unsupported> {
        Ok(match position {
            Position::Start => self.front(),
            Position::End => self.back(),
            Position::Middle(i) => self.iter().nth(i),
        })
    }

    /// # Panics
    ///
    /// Panics if a middle index is greater than the length.
    #[inline]
    fn insert(&mut self, position: Position, token: Token) -> Result<(), Unsupported> {
        match position {
            Position::Start => self.push_front(token),
            Position::End => self.push_back(token),
            Position::Middle(i) => {
                let mut tail = self.split_off(i);
                self.push_back(token);
                self.append(&mut tail);
            }
        }
        Ok(())
    }

    /// Pushes every element into a fresh list one by one.
    #[inline]
    fn clone_for_benchmark(&self) -> Self {
        copy_element_wise(self.iter())
    }

    #[inline]
    fn to_vec(&self) -> Vec<Token> {
        self.iter().cloned().collect()
    }
}

impl PushBack for LinkedList<Token> {
    #[inline]
    fn push_back(&mut self, token: Token) {
        LinkedList::push_back(self, token);
    }
}
