use std::array;
use std::fmt::Debug;
use std::hash::Hash;
use std::iter::Copied;
use std::slice;
use std::str::Chars;
use std::vec;

/// Trait for types that can serve as transition labels in the automaton.
///
/// This trait is automatically implemented for any type satisfying all the
/// required bounds (`char`, `u8`, `u16`, `u32`, etc.).
///
/// - `Copy`: transitions store labels by value
/// - `Eq + Hash`: transition lookup, including hashed lookup on wide nodes
/// - `Debug`: debug printing of nodes
pub trait Symbol: Copy + Eq + Hash + Debug {}

impl<T: Copy + Eq + Hash + Debug> Symbol for T {}

/// Trait for types that can be fed to the automaton as a sequence of symbols.
///
/// Used both for patterns at construction time and for the text being
/// searched. String types yield Unicode scalar values, never raw bytes.
pub trait IntoSymbols<C: Symbol> {
    /// The iterator over the symbols.
    type Iter: Iterator<Item = C>;

    /// Converts `self` into an iterator of symbols.
    fn into_symbols(self) -> Self::Iter;
}

// String types → char

impl<'a> IntoSymbols<char> for &'a str {
    type Iter = Chars<'a>;

    fn into_symbols(self) -> Chars<'a> {
        self.chars()
    }
}

impl<'b> IntoSymbols<char> for &&'b str {
    type Iter = Chars<'b>;

    fn into_symbols(self) -> Chars<'b> {
        (*self).chars()
    }
}

impl<'a> IntoSymbols<char> for &'a String {
    type Iter = Chars<'a>;

    fn into_symbols(self) -> Chars<'a> {
        self.chars()
    }
}

impl IntoSymbols<char> for String {
    type Iter = vec::IntoIter<char>;

    fn into_symbols(self) -> vec::IntoIter<char> {
        self.chars().collect::<Vec<_>>().into_iter()
    }
}

// Generic sequence types → C

impl<'a, C: Symbol> IntoSymbols<C> for &'a [C] {
    type Iter = Copied<slice::Iter<'a, C>>;

    fn into_symbols(self) -> Self::Iter {
        self.iter().copied()
    }
}

impl<C: Symbol> IntoSymbols<C> for Vec<C> {
    type Iter = vec::IntoIter<C>;

    fn into_symbols(self) -> vec::IntoIter<C> {
        self.into_iter()
    }
}

impl<'a, C: Symbol> IntoSymbols<C> for &'a Vec<C> {
    type Iter = Copied<slice::Iter<'a, C>>;

    fn into_symbols(self) -> Self::Iter {
        self.iter().copied()
    }
}

impl<C: Symbol, const N: usize> IntoSymbols<C> for [C; N] {
    type Iter = array::IntoIter<C, N>;

    fn into_symbols(self) -> Self::Iter {
        self.into_iter()
    }
}

impl<'a, C: Symbol, const N: usize> IntoSymbols<C> for &'a [C; N] {
    type Iter = Copied<slice::Iter<'a, C>>;

    fn into_symbols(self) -> Self::Iter {
        self.iter().copied()
    }
}
