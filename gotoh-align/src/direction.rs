use gotoh_types::Score;

/// Where the best path into a cell came from, stored in 2 bits.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// The path starts here.
    Terminal = 0,
    /// From the left: a subject residue against a query gap.
    Horizontal = 1,
    /// From above: a query residue against a subject gap.
    Vertical = 2,
    Diagonal = 3,
}

impl Direction {
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Only the low 2 bits are used.
    #[inline]
    pub const fn from_code(code: u8) -> Self {
        match code & 0b11 {
            0 => Direction::Terminal,
            1 => Direction::Horizontal,
            2 => Direction::Vertical,
            _ => Direction::Diagonal,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::Terminal => "terminal",
            Direction::Horizontal => "horizontal",
            Direction::Vertical => "vertical",
            Direction::Diagonal => "diagonal",
        }
    }
}

/// The score chosen for a cell and the direction it came from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WalkBack {
    pub score: Score,
    pub direction: Direction,
}

/// The cell where the traceback begins.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StartPoint {
    pub row: usize,
    pub col: usize,
    pub score: Score,
}
