use crate::residue::Residue;

/// Amino acids, ordered like the rows of the NCBI BLOSUM tables.
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub enum AminoAcid {
    Alanine,
    Arginine,
    Asparagine,
    AsparticAcid,
    Cysteine,
    Glutamine,
    GlutamicAcid,
    Glycine,
    Histidine,
    Isoleucine,
    Leucine,
    Lysine,
    Methionine,
    Phenylalanine,
    Proline,
    Serine,
    Threonine,
    Tryptophan,
    Tyrosine,
    Valine,
    /// Asparagine or aspartic acid.
    Asx,
    /// Glutamine or glutamic acid.
    Glx,
    Unknown,
    Stop,
    Gap,
}

use AminoAcid::*;

const STANDARD: &[AminoAcid] = &[
    Alanine,
    Arginine,
    Asparagine,
    AsparticAcid,
    Cysteine,
    Glutamine,
    GlutamicAcid,
    Glycine,
    Histidine,
    Isoleucine,
    Leucine,
    Lysine,
    Methionine,
    Phenylalanine,
    Proline,
    Serine,
    Threonine,
    Tryptophan,
    Tyrosine,
    Valine,
];

const SYMBOLS: &[u8; 25] = b"ARNDCQEGHILKMFPSTWYVBZX*-";

impl Residue for AminoAcid {
    const ALPHABET: &'static [Self] = &[
        Alanine,
        Arginine,
        Asparagine,
        AsparticAcid,
        Cysteine,
        Glutamine,
        GlutamicAcid,
        Glycine,
        Histidine,
        Isoleucine,
        Leucine,
        Lysine,
        Methionine,
        Phenylalanine,
        Proline,
        Serine,
        Threonine,
        Tryptophan,
        Tyrosine,
        Valine,
        Asx,
        Glx,
        Unknown,
        Stop,
        Gap,
    ];
    const GAP: Self = Gap;

    #[inline]
    fn ordinal(self) -> u8 {
        self as u8
    }

    fn to_char(self) -> char {
        SYMBOLS[self as usize] as char
    }

    fn from_char(c: char) -> Option<Self> {
        let c = c.to_ascii_uppercase();
        if !c.is_ascii() {
            return None;
        }
        SYMBOLS
            .iter()
            .position(|&s| s == c as u8)
            .map(|i| Self::ALPHABET[i])
    }

    fn expansions(self) -> &'static [Self] {
        match self {
            Gap => &[],
            Asx => &[Asparagine, AsparticAcid],
            Glx => &[Glutamine, GlutamicAcid],
            Unknown => STANDARD,
            Stop => &[Stop],
            _ => {
                let i = self as usize;
                &STANDARD[i..i + 1]
            }
        }
    }
}
