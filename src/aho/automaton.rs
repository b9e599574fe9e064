use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use smallvec::SmallVec;
use tracing::debug;

use super::builder::{Builder, DictionaryError};
use super::find::FindIter;
use super::node_arena::{NodeArena, NodeId};
use super::symbol::{IntoSymbols, Symbol};

/// An immutable Aho-Corasick automaton over a fixed dictionary of patterns.
///
/// The automaton owns every trie node. Once built it is never mutated, so it
/// can be shared between threads and queried concurrently; each query keeps
/// its own scan state.
///
/// # Examples
///
/// ```
/// use libaho::aho::Automaton;
///
/// let automaton = Automaton::new(["he", "she", "his", "hers"]);
/// assert!(automaton.contains("ushers"));
/// assert_eq!(automaton.matches("ushers"), vec![1, 0, 3]);
/// assert_eq!(automaton.replace("ushers", "*"), "u*rs");
/// assert_eq!(automaton.size(), 4);
/// ```
#[derive(Clone)]
pub struct Automaton<C: Symbol> {
    arena: NodeArena<C>,
    size: usize,
}

impl<C: Symbol> Automaton<C> {
    /// Builds an automaton from patterns in index order.
    ///
    /// Accepts any number of patterns, including none, duplicates and the
    /// empty pattern. Never fails.
    pub fn new<P>(patterns: impl IntoIterator<Item = P>) -> Self
    where
        P: IntoSymbols<C>,
    {
        let mut builder = Builder::new();
        for pattern in patterns {
            builder.add_pattern(pattern);
        }
        builder.build()
    }

    pub(crate) fn from_parts(arena: NodeArena<C>, size: usize) -> Self {
        Automaton { arena, size }
    }

    pub(crate) fn arena(&self) -> &NodeArena<C> {
        &self.arena
    }

    /// Returns the number of patterns, duplicates and empty patterns included.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the number of trie nodes, root included.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Consumes one symbol from `state`, falling back along failure links
    /// until an edge for `symbol` exists or the root is reached.
    #[inline]
    pub(crate) fn step(&self, mut state: NodeId, symbol: C) -> NodeId {
        loop {
            let node = &self.arena[state];
            if let Some(next) = node.transitions.get(symbol) {
                return next;
            }
            if state == NodeId::ROOT {
                return NodeId::ROOT;
            }
            state = node.fail;
        }
    }

    /// Returns `true` as soon as the scan reaches the end of a pattern.
    ///
    /// Only the node reached after each symbol is examined, the same check
    /// [`replace`](Automaton::replace) makes, so this is `true` exactly when
    /// `replace` would rewrite something. An occurrence that is only a suffix
    /// of a longer partial match is reported by [`matches`](Automaton::matches)
    /// but not here.
    ///
    /// # Examples
    ///
    /// ```
    /// use libaho::aho::Automaton;
    ///
    /// let automaton = Automaton::new(["abcd", "bc"]);
    /// assert!(automaton.contains("xbcx"));
    /// assert!(!automaton.contains("abce"));
    /// assert_eq!(automaton.matches("abce"), vec![1]);
    /// ```
    pub fn contains(&self, text: impl IntoSymbols<C>) -> bool {
        let mut state = NodeId::ROOT;
        for symbol in text.into_symbols() {
            state = self.step(state, symbol);
            if state != NodeId::ROOT && self.arena[state].is_terminal() {
                return true;
            }
        }
        false
    }

    /// Returns the index of every pattern occurrence in `text`.
    ///
    /// Results follow the scan order of the text; occurrences ending at the
    /// same position are listed from the longest pattern to the shortest.
    /// Overlapping and nested occurrences are all reported, and a pattern
    /// added `n` times is reported `n` times per occurrence.
    ///
    /// # Examples
    ///
    /// ```
    /// use libaho::aho::Automaton;
    ///
    /// let automaton = Automaton::new(["ABC", "BC", "BC"]);
    /// assert_eq!(automaton.matches("ABCBC"), vec![0, 2, 2, 2, 2]);
    /// ```
    pub fn matches(&self, text: impl IntoSymbols<C>) -> Vec<usize> {
        self.find_iter(text).map(|m| m.pattern()).collect()
    }

    /// Returns a lazy iterator over every occurrence in `text`, with positions.
    ///
    /// Yields exactly the occurrences [`matches`](Automaton::matches) reports,
    /// in the same order.
    pub fn find_iter<T: IntoSymbols<C>>(&self, text: T) -> FindIter<'_, C, T::Iter> {
        FindIter::new(self, text.into_symbols())
    }

    /// Replaces pattern occurrences in a symbol sequence.
    ///
    /// Follows the same policy as [`Automaton::replace`].
    pub fn replace_symbols(
        &self,
        text: impl IntoSymbols<C>,
        replacement: impl IntoSymbols<C>,
    ) -> Vec<C> {
        let replacement: SmallVec<[C; 32]> = replacement.into_symbols().collect();
        let mut out = SymbolRewrite {
            out: Vec::new(),
            replacement: &replacement,
        };
        self.rewrite(text, &mut out);
        out.out
    }

    fn rewrite<W: Rewrite<C>>(&self, text: impl IntoSymbols<C>, out: &mut W) {
        let mut state = NodeId::ROOT;
        for symbol in text.into_symbols() {
            state = self.step(state, symbol);
            out.keep(symbol);
            let node = &self.arena[state];
            if state != NodeId::ROOT && node.is_terminal() {
                out.splice(node.pattern_len);
                state = NodeId::ROOT;
            }
        }
    }
}

impl Automaton<char> {
    /// Builds an automaton from a dictionary file, one pattern per line.
    ///
    /// See [`Builder::add_dictionary`] for the file format.
    ///
    /// # Errors
    ///
    /// Returns [`DictionaryError::Open`] if the file cannot be opened, or
    /// [`DictionaryError::Read`] if a line cannot be read.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use libaho::aho::Automaton;
    ///
    /// let automaton = Automaton::from_file("banned.txt").unwrap();
    /// ```
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DictionaryError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading dictionary");
        let file = File::open(path).map_err(|source| DictionaryError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file))
    }

    /// Builds an automaton from a dictionary read from `reader`.
    ///
    /// # Errors
    ///
    /// Returns [`DictionaryError::Read`] if a line cannot be read.
    pub fn from_reader(reader: impl BufRead) -> Result<Self, DictionaryError> {
        let mut builder = Builder::<char>::new();
        let added = builder.add_dictionary(reader)?;
        debug!(patterns = added, "dictionary loaded");
        Ok(builder.build())
    }

    /// Replaces pattern occurrences in `text` with `replacement`.
    ///
    /// The scan is greedy and single pass. A replacement happens as soon as
    /// the node reached after a character is the end of a pattern; shorter
    /// patterns that only end there as a suffix are absorbed. Scanning then
    /// restarts from the root, so replaced text is never examined again and
    /// occurrences overlapping a replaced one are not replaced.
    ///
    /// # Examples
    ///
    /// ```
    /// use libaho::aho::Automaton;
    ///
    /// let automaton = Automaton::new(["he", "she"]);
    /// assert_eq!(automaton.replace("ushers", "*"), "u*rs");
    /// assert_eq!(automaton.replace("nothing here", "*"), "nothing *re");
    /// ```
    pub fn replace(&self, text: &str, replacement: &str) -> String {
        let mut out = StrRewrite {
            out: String::with_capacity(text.len()),
            replacement,
        };
        self.rewrite(text, &mut out);
        out.out
    }
}

impl<C: Symbol> std::fmt::Debug for Automaton<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Automaton")
            .field("size", &self.size)
            .field("node_count", &self.node_count())
            .finish()
    }
}

/// Output side of a replacement scan.
trait Rewrite<C> {
    /// Appends one input symbol.
    fn keep(&mut self, symbol: C);

    /// Drops the last `matched` kept symbols and appends the replacement.
    fn splice(&mut self, matched: usize);
}

struct SymbolRewrite<'r, C> {
    out: Vec<C>,
    replacement: &'r [C],
}

impl<C: Symbol> Rewrite<C> for SymbolRewrite<'_, C> {
    fn keep(&mut self, symbol: C) {
        self.out.push(symbol);
    }

    fn splice(&mut self, matched: usize) {
        debug_assert!(matched <= self.out.len());
        self.out.truncate(self.out.len() - matched);
        self.out.extend_from_slice(self.replacement);
    }
}

struct StrRewrite<'r> {
    out: String,
    replacement: &'r str,
}

impl Rewrite<char> for StrRewrite<'_> {
    fn keep(&mut self, symbol: char) {
        self.out.push(symbol);
    }

    fn splice(&mut self, matched: usize) {
        for _ in 0..matched {
            self.out.pop();
        }
        self.out.push_str(self.replacement);
    }
}
