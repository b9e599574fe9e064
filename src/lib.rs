//! # libaho
//!
//! A multi-pattern string matcher built on the
//! [Aho-Corasick](https://en.wikipedia.org/wiki/Aho%E2%80%93Corasick_algorithm) automaton.
//!
//! Given a fixed dictionary of patterns (banned words, for instance), the automaton
//! finds, counts or redacts all of them in a single left-to-right scan of the text,
//! instead of running one search per pattern. Strings are scanned by Unicode scalar
//! value, never by encoded byte, so multi-byte text matches correctly.
//!
//! ## Features
//!
//! - **Three queries**: [`contains`](aho::Automaton::contains) short-circuits on the
//!   first occurrence, [`matches`](aho::Automaton::matches) reports every occurrence
//!   including overlapping and nested ones, [`replace`](aho::Automaton::replace)
//!   redacts greedily in one pass
//! - **Generic over symbol type**: works with `char`, `u8`, `u16`, or any type implementing
//!   [`Symbol`](aho::Symbol)
//! - **Arena-allocated**: nodes and failure links are plain indices into one vector
//! - **Thread-safe**: a built [`Automaton`](aho::Automaton) is immutable and can be
//!   queried from many threads at once
//!
//! ## Quick Start
//!
//! ```
//! use libaho::aho::Automaton;
//!
//! let automaton = Automaton::new(["he", "she", "his", "hers"]);
//! assert!(automaton.contains("ushers"));
//! assert_eq!(automaton.matches("ushers"), vec![1, 0, 3]);
//!
//! let redactor = Automaton::new(["he", "she"]);
//! assert_eq!(redactor.replace("ushers", "*"), "u*rs");
//! ```
//!
//! Positions are available through [`find_iter`](aho::Automaton::find_iter):
//!
//! ```
//! use libaho::aho::Automaton;
//!
//! let automaton = Automaton::new(["民主", "cat"]);
//! let spans: Vec<_> = automaton.find_iter("我的民主 cat").map(|m| m.span()).collect();
//! assert_eq!(spans, vec![2..4, 5..8]);
//! ```
//!
//! ## Generic Usage
//!
//! ```
//! use libaho::aho::Automaton;
//!
//! let automaton = Automaton::new([vec![0xde_u8, 0xad], vec![0xbe, 0xef]]);
//! assert!(automaton.contains([0x00, 0xde, 0xad, 0x00]));
//! assert_eq!(automaton.replace_symbols([0xbe, 0xef, 0x01], [0x00]), vec![0x00, 0x01]);
//! ```

#![warn(missing_docs)]

/// Core automaton: symbols, trie builder, failure links and queries.
pub mod aho;
