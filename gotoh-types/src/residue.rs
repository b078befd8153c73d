use std::{fmt::Debug, hash::Hash};

/// A symbol of a residue alphabet.
///
/// The ordinal of a residue is its index in `ALPHABET` and is used to index
/// substitution tables directly.
pub trait Residue: Copy + Eq + Hash + Debug + 'static {
    /// All symbols of the alphabet, ordered by ordinal.
    const ALPHABET: &'static [Self];
    /// The gap symbol.
    const GAP: Self;

    fn ordinal(self) -> u8;

    #[inline]
    fn from_ordinal(ordinal: u8) -> Self {
        Self::ALPHABET[ordinal as usize]
    }

    #[inline]
    fn is_gap(self) -> bool {
        self == Self::GAP
    }

    fn to_char(self) -> char;

    /// Case-insensitive parse of a single symbol.
    fn from_char(c: char) -> Option<Self>;

    /// The unambiguous symbols this residue can stand for.
    /// Empty for the gap, the residue itself when it is unambiguous.
    fn expansions(self) -> &'static [Self];

    fn is_ambiguous(self) -> bool {
        self.expansions().len() > 1
    }

    /// True when both residues may stand for a common unambiguous symbol.
    fn overlaps(self, other: Self) -> bool {
        self.expansions()
            .iter()
            .any(|x| other.expansions().contains(x))
    }
}

/// Number of symbols in the alphabet of `R`.
pub fn alphabet_size<R: Residue>() -> usize {
    R::ALPHABET.len()
}
