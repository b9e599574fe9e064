use std::ops::Range;

use super::automaton::Automaton;
use super::node_arena::NodeId;
use super::symbol::Symbol;

/// A single pattern occurrence reported by [`Automaton::find_iter`].
///
/// Offsets count symbols (Unicode scalar values for string input), not
/// bytes. `end` is exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Match {
    pattern: usize,
    start: usize,
    end: usize,
}

impl Match {
    /// Index of the pattern that matched, in insertion order.
    #[inline]
    pub fn pattern(&self) -> usize {
        self.pattern
    }

    /// Offset of the first matched symbol.
    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Offset one past the last matched symbol.
    #[inline]
    pub fn end(&self) -> usize {
        self.end
    }

    /// Number of matched symbols.
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// True for a zero-length match. Never the case for reported matches.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The matched range, in symbol offsets.
    #[inline]
    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// A lazy iterator over every match in a text, overlapping ones included.
///
/// After each consumed symbol, the whole failure chain of the current node is
/// reported from the longest suffix to the shortest, each terminal repeated
/// once per pattern that ends there.
pub struct FindIter<'a, C: Symbol, I> {
    automaton: &'a Automaton<C>,
    symbols: I,
    /// Node reached after the last consumed symbol.
    state: NodeId,
    /// Position in the failure chain still to be reported.
    chain: NodeId,
    /// Remaining repetitions of `chain`'s pattern.
    pending: u32,
    /// Symbols consumed so far.
    consumed: usize,
}

impl<'a, C: Symbol, I: Iterator<Item = C>> FindIter<'a, C, I> {
    pub(crate) fn new(automaton: &'a Automaton<C>, symbols: I) -> Self {
        FindIter {
            automaton,
            symbols,
            state: NodeId::ROOT,
            chain: NodeId::ROOT,
            pending: 0,
            consumed: 0,
        }
    }
}

impl<C: Symbol, I: Iterator<Item = C>> Iterator for FindIter<'_, C, I> {
    type Item = Match;

    fn next(&mut self) -> Option<Match> {
        let automaton = self.automaton;
        let arena = automaton.arena();
        loop {
            if self.pending > 0 {
                let node = &arena[self.chain];
                self.pending -= 1;
                if self.pending == 0 {
                    self.chain = node.fail;
                }
                return Some(Match {
                    pattern: node.pattern_index,
                    start: self.consumed - node.pattern_len,
                    end: self.consumed,
                });
            }

            while self.chain != NodeId::ROOT {
                let node = &arena[self.chain];
                if node.is_terminal() {
                    self.pending = node.terminal_count;
                    break;
                }
                self.chain = node.fail;
            }
            if self.pending > 0 {
                continue;
            }

            let symbol = self.symbols.next()?;
            self.state = automaton.step(self.state, symbol);
            self.chain = self.state;
            self.consumed += 1;
        }
    }
}
