use std::collections::VecDeque;
use std::io::{self, BufRead};
use std::path::PathBuf;

use smallvec::SmallVec;
use thiserror::Error;
use tracing::debug;

use super::automaton::Automaton;
use super::node_arena::{NodeArena, NodeId};
use super::symbol::{IntoSymbols, Symbol};

/// A builder for constructing an [`Automaton`] one pattern at a time.
///
/// Patterns are numbered in the order they are added, starting at zero.
/// Duplicates and the empty pattern are accepted; each one still consumes an
/// index. Calling [`build`](Builder::build) computes the failure links and
/// yields the immutable automaton, so no query can observe a half-built trie.
///
/// # Examples
///
/// ```
/// use libaho::aho::Builder;
///
/// let mut builder = Builder::new();
/// assert_eq!(builder.add_pattern("he"), 0);
/// assert_eq!(builder.add_pattern("she"), 1);
/// let automaton = builder.build();
/// assert_eq!(automaton.matches("she"), vec![1, 0]);
/// ```
#[derive(Clone, Debug)]
pub struct Builder<C: Symbol> {
    arena: NodeArena<C>,
    size: usize,
}

impl<C: Symbol> Default for Builder<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Symbol> Builder<C> {
    /// Creates a builder with an empty dictionary.
    pub fn new() -> Self {
        Builder {
            arena: NodeArena::new(),
            size: 0,
        }
    }

    /// Adds a pattern to the trie and returns the index assigned to it.
    ///
    /// The pattern can be any type that implements [`IntoSymbols`], including
    /// `&str`, `String`, `&[u8]`, `Vec<u8>`, or fixed-size arrays like `[u8; 3]`.
    pub fn add_pattern(&mut self, pattern: impl IntoSymbols<C>) -> usize {
        let mut node = NodeId::ROOT;
        let mut len = 0;
        for symbol in pattern.into_symbols() {
            node = self.arena.child_or_alloc(node, symbol);
            len += 1;
        }

        let index = self.size;
        let terminal = &mut self.arena[node];
        terminal.terminal_count += 1;
        terminal.pattern_index = index;
        terminal.pattern_len = len;
        self.size += 1;
        index
    }

    /// Returns the number of patterns added so far, duplicates included.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Computes the failure links and returns the finished automaton.
    pub fn build(mut self) -> Automaton<C> {
        link_failures(&mut self.arena);
        debug!(
            patterns = self.size,
            nodes = self.arena.len(),
            "built failure links"
        );
        Automaton::from_parts(self.arena, self.size)
    }
}

impl Builder<char> {
    /// Adds every pattern of a dictionary, one pattern per line.
    ///
    /// Trailing whitespace is trimmed. Blank lines and lines whose first
    /// non-blank character is `#` are skipped. Returns the number of patterns
    /// added.
    ///
    /// # Errors
    ///
    /// Returns [`DictionaryError::Read`] if a line cannot be read or is not
    /// valid UTF-8.
    ///
    /// # Examples
    ///
    /// ```
    /// use libaho::aho::Builder;
    ///
    /// let dictionary = "# banned\nfoo\n\nbar\n";
    /// let mut builder: Builder<char> = Builder::new();
    /// assert_eq!(builder.add_dictionary(dictionary.as_bytes()).unwrap(), 2);
    /// assert!(builder.build().contains("a bar"));
    /// ```
    pub fn add_dictionary<R: BufRead>(&mut self, mut reader: R) -> Result<usize, DictionaryError> {
        let mut added = 0;
        let mut line = 0;

        // Reuse one buffer across lines instead of allocating a string per line.
        let mut buf = String::with_capacity(80);
        loop {
            line += 1;
            match reader.read_line(&mut buf) {
                Ok(0) => break,
                Ok(_) => {}
                Err(source) => return Err(DictionaryError::Read { line, source }),
            }
            let pattern = buf.trim_end();
            if !pattern.is_empty() && !is_comment(pattern) {
                self.add_pattern(pattern);
                added += 1;
            }
            buf.clear();
        }
        Ok(added)
    }
}

/// Errors that can occur when loading a dictionary.
#[derive(Debug, Error)]
pub enum DictionaryError {
    /// The dictionary file could not be opened.
    #[error("cannot open dictionary {}", path.display())]
    Open {
        /// Path that was passed to the loader.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// A line could not be read, or was not valid UTF-8.
    #[error("cannot read dictionary line {line}")]
    Read {
        /// 1-based line number.
        line: usize,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Returns true if this line is a comment.
pub(crate) fn is_comment(line: &str) -> bool {
    line.trim_start().starts_with('#')
}

/// Sets the failure link of every node, breadth first from the root.
///
/// A node's link is resolved from its parent's link, so parents must be
/// finished before their children; the FIFO queue guarantees that without
/// recursion.
pub(crate) fn link_failures<C: Symbol>(arena: &mut NodeArena<C>) {
    let mut queue = VecDeque::with_capacity(arena.len());

    let depth_one: SmallVec<[(C, NodeId); 8]> = arena[NodeId::ROOT].transitions.iter().collect();
    for (_, child) in depth_one {
        arena[child].fail = NodeId::ROOT;
        queue.push_back(child);
    }

    while let Some(parent) = queue.pop_front() {
        // Collect the edges first; the loop below writes into the arena.
        let edges: SmallVec<[(C, NodeId); 8]> = arena[parent].transitions.iter().collect();
        let parent_fail = arena[parent].fail;
        for (symbol, child) in edges {
            arena[child].fail = fail_target(arena, parent_fail, symbol);
            queue.push_back(child);
        }
    }
}

/// Follows failure links from `from` until a node with a `symbol` edge is
/// found, returning that edge's target, or the root if there is none.
fn fail_target<C: Symbol>(arena: &NodeArena<C>, from: NodeId, symbol: C) -> NodeId {
    let mut node = from;
    loop {
        if let Some(next) = arena[node].transitions.get(symbol) {
            return next;
        }
        if node == NodeId::ROOT {
            return NodeId::ROOT;
        }
        node = arena[node].fail;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn walk(arena: &NodeArena<char>, path: &str) -> NodeId {
        path.chars().fold(NodeId::ROOT, |node, ch| {
            arena[node].transitions.get(ch).unwrap()
        })
    }

    fn built(patterns: &[&str]) -> NodeArena<char> {
        let mut builder = Builder::new();
        for pattern in patterns {
            builder.add_pattern(pattern);
        }
        link_failures(&mut builder.arena);
        builder.arena
    }

    #[test]
    fn prefixes_are_shared() {
        let mut builder = Builder::new();
        builder.add_pattern("ABCDEF");
        assert_eq!(builder.arena.len(), "ABCDEF".len() + 1);
        builder.add_pattern("ABC");
        builder.add_pattern("ABCDEF");
        assert_eq!(builder.arena.len(), "ABCDEF".len() + 1);
        builder.add_pattern("ABX");
        assert_eq!(builder.arena.len(), "ABCDEF".len() + 2);
    }

    #[test]
    fn prefixes_are_shared_unicode() {
        let mut builder = Builder::new();
        builder.add_pattern("授人以鱼不如授人以渔");
        builder.add_pattern("授人以渔");
        // 10 + root + the diverging '渔' under "授人以"
        assert_eq!(builder.arena.len(), 12);
    }

    #[test]
    fn indices_follow_insertion_order() {
        let mut builder = Builder::new();
        assert_eq!(builder.add_pattern("he"), 0);
        assert_eq!(builder.add_pattern("she"), 1);
        assert_eq!(builder.add_pattern("he"), 2);
        assert_eq!(builder.add_pattern(""), 3);
        assert_eq!(builder.size(), 4);

        let he = walk(&builder.arena, "he");
        assert_eq!(builder.arena[he].terminal_count, 2);
        assert_eq!(builder.arena[he].pattern_index, 2);
        assert_eq!(builder.arena[he].pattern_len, 2);
        assert!(!builder.arena[walk(&builder.arena, "sh")].is_terminal());
    }

    #[test]
    fn empty_pattern_marks_root() {
        let mut builder = Builder::<char>::new();
        builder.add_pattern("");
        let root = &builder.arena[NodeId::ROOT];
        assert_eq!(root.terminal_count, 1);
        assert_eq!(root.pattern_len, 0);
        assert_eq!(builder.arena.len(), 1);
    }

    #[test]
    fn failure_links_point_to_longest_suffix() {
        let arena = built(&["he", "she", "his", "hers"]);
        assert_eq!(arena[walk(&arena, "h")].fail, NodeId::ROOT);
        assert_eq!(arena[walk(&arena, "s")].fail, NodeId::ROOT);
        assert_eq!(arena[walk(&arena, "sh")].fail, walk(&arena, "h"));
        assert_eq!(arena[walk(&arena, "she")].fail, walk(&arena, "he"));
        assert_eq!(arena[walk(&arena, "his")].fail, walk(&arena, "s"));
        assert_eq!(arena[walk(&arena, "hers")].fail, walk(&arena, "s"));
        assert_eq!(arena[walk(&arena, "her")].fail, NodeId::ROOT);
    }

    #[test]
    fn failure_links_skip_missing_suffixes() {
        let arena = built(&["abcd", "bcx", "cd"]);
        // "bc" is a path, but "bcd" is not, so "abcd" falls through to "cd".
        assert_eq!(arena[walk(&arena, "abc")].fail, walk(&arena, "bc"));
        assert_eq!(arena[walk(&arena, "abcd")].fail, walk(&arena, "cd"));
        assert_eq!(arena[walk(&arena, "bcx")].fail, NodeId::ROOT);
    }

    #[test]
    fn relinking_is_idempotent() {
        let mut arena = built(&["abab", "bab", "ab", "b", "abba"]);
        let before: Vec<NodeId> = (0..arena.len() as u32)
            .map(|i| arena[NodeId::from_raw(i)].fail)
            .collect();
        link_failures(&mut arena);
        let after: Vec<NodeId> = (0..arena.len() as u32)
            .map(|i| arena[NodeId::from_raw(i)].fail)
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn deep_patterns_link_without_recursion() {
        let long: String = std::iter::repeat('a').take(100_000).collect();
        let arena = built(&[long.as_str()]);
        let last = NodeId::from_raw(100_000);
        assert_eq!(arena[last].fail, NodeId::from_raw(99_999));
    }

    #[test]
    fn comment_that_starts_with_pound() {
        assert!(is_comment("# This is a comment"));
    }

    #[test]
    fn comment_with_whitespace_before_pound() {
        assert!(is_comment("        # This is a comment with whitespace"));
    }

    #[test]
    fn non_comment() {
        assert!(!is_comment("REVERBERATE"));
        assert!(!is_comment("RE#VERBERATE"));
    }

    #[test]
    fn dictionary_skips_comments_and_blank_lines() {
        let mut builder = Builder::<char>::new();
        let added = builder
            .add_dictionary("alpha\n# comment\n\n   \nbeta  \r\ngamma".as_bytes())
            .unwrap();
        assert_eq!(added, 3);
        assert_eq!(builder.size(), 3);
        let automaton = builder.build();
        assert_eq!(automaton.matches("gamma beta alpha"), vec![2, 1, 0]);
        assert!(!automaton.contains("comment"));
    }

    #[test]
    fn dictionary_reports_invalid_utf8_line() {
        let mut builder = Builder::<char>::new();
        let bytes: &[u8] = b"fine\n\xff\xfe\n";
        let err = builder.add_dictionary(bytes).unwrap_err();
        assert!(matches!(err, DictionaryError::Read { line: 2, .. }));
        assert_eq!(err.to_string(), "cannot read dictionary line 2");
        assert!(std::error::Error::source(&err).is_some());
    }
}
