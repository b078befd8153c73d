use crate::residue::Residue;

/// IUPAC nucleotide codes.
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub enum Nucleotide {
    Gap,
    A,
    C,
    G,
    T,
    /// Any base.
    N,
    /// Purine: A or G.
    R,
    /// Pyrimidine: C or T.
    Y,
    /// Keto: G or T.
    K,
    /// Amino: A or C.
    M,
    /// Strong: C or G.
    S,
    /// Weak: A or T.
    W,
    /// Not A.
    B,
    /// Not C.
    D,
    /// Not G.
    H,
    /// Not T.
    V,
}

use Nucleotide::*;

impl Residue for Nucleotide {
    const ALPHABET: &'static [Self] = &[Gap, A, C, G, T, N, R, Y, K, M, S, W, B, D, H, V];
    const GAP: Self = Gap;

    #[inline]
    fn ordinal(self) -> u8 {
        self as u8
    }

    fn to_char(self) -> char {
        match self {
            Gap => '-',
            A => 'A',
            C => 'C',
            G => 'G',
            T => 'T',
            N => 'N',
            R => 'R',
            Y => 'Y',
            K => 'K',
            M => 'M',
            S => 'S',
            W => 'W',
            B => 'B',
            D => 'D',
            H => 'H',
            V => 'V',
        }
    }

    fn from_char(c: char) -> Option<Self> {
        Some(match c.to_ascii_uppercase() {
            '-' => Gap,
            'A' => A,
            'C' => C,
            'G' => G,
            // RNA input is aligned as DNA.
            'T' | 'U' => T,
            'N' => N,
            'R' => R,
            'Y' => Y,
            'K' => K,
            'M' => M,
            'S' => S,
            'W' => W,
            'B' => B,
            'D' => D,
            'H' => H,
            'V' => V,
            _ => return None,
        })
    }

    fn expansions(self) -> &'static [Self] {
        match self {
            Gap => &[],
            A => &[A],
            C => &[C],
            G => &[G],
            T => &[T],
            N => &[A, C, G, T],
            R => &[A, G],
            Y => &[C, T],
            K => &[G, T],
            M => &[A, C],
            S => &[C, G],
            W => &[A, T],
            B => &[C, G, T],
            D => &[A, G, T],
            H => &[A, C, T],
            V => &[A, C, G],
        }
    }
}

impl Nucleotide {
    /// Watson-Crick complement; ambiguity codes map to the complementary set.
    pub fn complement(self) -> Self {
        match self {
            Gap => Gap,
            A => T,
            C => G,
            G => C,
            T => A,
            N => N,
            R => Y,
            Y => R,
            K => M,
            M => K,
            S => S,
            W => W,
            B => V,
            D => H,
            H => D,
            V => B,
        }
    }
}
