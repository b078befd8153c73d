use std::{fmt, ops::Deref, str::FromStr};

use crate::{error::ParseError, residue::Residue, Nucleotide};

/// Read access to an ordered sequence of residues, possibly containing gaps.
pub trait ResidueSequence<R: Residue> {
    /// Length including gaps.
    fn len(&self) -> usize;

    fn residue(&self, i: usize) -> R;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn ungapped_len(&self) -> usize {
        (0..self.len()).filter(|&i| !self.residue(i).is_gap()).count()
    }

    /// The non-gap residues, in order.
    fn ungapped(&self) -> Vec<R> {
        (0..self.len())
            .map(|i| self.residue(i))
            .filter(|r| !r.is_gap())
            .collect()
    }

    /// Dense ordinals of the non-gap residues.
    fn ungapped_ordinals(&self) -> Vec<u8> {
        (0..self.len())
            .map(|i| self.residue(i))
            .filter(|r| !r.is_gap())
            .map(|r| r.ordinal())
            .collect()
    }
}

impl<R: Residue> ResidueSequence<R> for [R] {
    fn len(&self) -> usize {
        <[R]>::len(self)
    }
    fn residue(&self, i: usize) -> R {
        self[i]
    }
}

impl<R: Residue> ResidueSequence<R> for Vec<R> {
    fn len(&self) -> usize {
        Vec::len(self)
    }
    fn residue(&self, i: usize) -> R {
        self[i]
    }
}

/// An owned residue sequence.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Sequence<R: Residue> {
    residues: Vec<R>,
}

pub type NucleotideSequence = Sequence<crate::Nucleotide>;
pub type ProteinSequence = Sequence<crate::AminoAcid>;

impl<R: Residue> Sequence<R> {
    pub fn new(residues: Vec<R>) -> Self {
        Self { residues }
    }

    /// Parse from raw bytes, e.g. a FASTA record.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ParseError> {
        bytes
            .iter()
            .enumerate()
            .map(|(position, &b)| {
                R::from_char(b as char).ok_or(ParseError::UnknownResidue {
                    symbol: b as char,
                    position,
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }

    pub fn residues(&self) -> &[R] {
        &self.residues
    }

    pub fn into_residues(self) -> Vec<R> {
        self.residues
    }
}

impl Sequence<Nucleotide> {
    pub fn reverse_complement(&self) -> Self {
        Self::new(self.residues.iter().rev().map(|n| n.complement()).collect())
    }
}

impl<R: Residue> Deref for Sequence<R> {
    type Target = [R];

    fn deref(&self) -> &[R] {
        &self.residues
    }
}

impl<R: Residue> From<Vec<R>> for Sequence<R> {
    fn from(residues: Vec<R>) -> Self {
        Self::new(residues)
    }
}

impl<R: Residue> FromIterator<R> for Sequence<R> {
    fn from_iter<T: IntoIterator<Item = R>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<R: Residue> ResidueSequence<R> for Sequence<R> {
    fn len(&self) -> usize {
        self.residues.len()
    }
    fn residue(&self, i: usize) -> R {
        self.residues[i]
    }
}

impl<R: Residue> FromStr for Sequence<R> {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .enumerate()
            .map(|(position, symbol)| {
                R::from_char(symbol).ok_or(ParseError::UnknownResidue { symbol, position })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }
}

impl<R: Residue> fmt::Display for Sequence<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", residues_to_string(&self.residues))
    }
}

pub fn residues_to_string<R: Residue>(residues: &[R]) -> String {
    residues.iter().map(|r| r.to_char()).collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Nucleotide::{self, *};

    #[test]
    fn parse_and_display() {
        let s: Sequence<Nucleotide> = "ac-gT".parse().unwrap();
        assert_eq!(s.residues(), &[A, C, Gap, G, T]);
        assert_eq!(s.to_string(), "AC-GT");
        assert_eq!(s.ungapped_len(), 4);
        assert_eq!(s.ungapped(), vec![A, C, G, T]);
        assert_eq!(s.ungapped_ordinals(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn unknown_symbol() {
        let err = "ACXG".parse::<Sequence<Nucleotide>>().unwrap_err();
        assert_eq!(
            err,
            ParseError::UnknownResidue {
                symbol: 'X',
                position: 2
            }
        );
    }

    #[test]
    fn reverse_complement() {
        let s: NucleotideSequence = "AACGN-R".parse().unwrap();
        assert_eq!(s.reverse_complement().to_string(), "Y-NCGTT");
    }
}
