/// Automaton type and the three query operations.
pub mod automaton;
/// Trie construction, failure links and dictionary loading.
pub mod builder;
/// Match positions and the overlapping match iterator.
pub mod find;
/// Index-based node storage.
pub(crate) mod node_arena;
/// Symbol traits: transition labels and inputs convertible to symbols.
pub mod symbol;
/// Compact per-node transition tables.
pub(crate) mod transitions;

pub use automaton::Automaton;
pub use builder::{Builder, DictionaryError};
pub use find::{FindIter, Match};
pub use symbol::{IntoSymbols, Symbol};
