use ndarray::Array2;

/// The four states of the jump alignment recurrence.
///
/// `Jump` is the cross-reference state: it is entered from `Match` or
/// `Insert` while filling the first reference and rides along the second
/// reference unchanged until the alignment re-enters `Match` or `Insert`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlignState {
    Match,
    Delete,
    Insert,
    Jump,
}

impl AlignState {
    pub(crate) const fn tag(self) -> u8 {
        match self {
            Self::Match => 0,
            Self::Delete => 1,
            Self::Insert => 2,
            Self::Jump => 3,
        }
    }

    pub(crate) const fn from_tag(tag: u8) -> Self {
        match tag & 0b11 {
            0 => Self::Match,
            1 => Self::Delete,
            2 => Self::Insert,
            _ => Self::Jump,
        }
    }
}

impl std::fmt::Display for AlignState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Match => write!(f, "M"),
            Self::Delete => write!(f, "D"),
            Self::Insert => write!(f, "I"),
            Self::Jump => write!(f, "J"),
        }
    }
}

/// One cell of a rolling score column, holding the running score of every
/// alignment state at a fixed query index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreCell<ScoreType> {
    pub match_: ScoreType,
    pub del: ScoreType,
    pub ins: ScoreType,
    pub jump: ScoreType,
}

impl<ScoreType: Copy> ScoreCell<ScoreType> {
    pub fn uniform(score: ScoreType) -> Self {
        Self {
            match_: score,
            del: score,
            ins: score,
            jump: score,
        }
    }
}

/// The predecessor tags of one tableau cell, two bits per state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointerCell(u8);

impl PointerCell {
    pub fn pack(
        match_from: AlignState,
        delete_from: AlignState,
        insert_from: AlignState,
        jump_from: AlignState,
    ) -> Self {
        Self(
            match_from.tag()
                | delete_from.tag() << 2
                | insert_from.tag() << 4
                | jump_from.tag() << 6,
        )
    }

    /// The state the recurrence reached `state` from in this cell.
    pub fn predecessor(self, state: AlignState) -> AlignState {
        AlignState::from_tag(self.0 >> (2 * state.tag()))
    }
}

/// A full pointer matrix for one reference, `(query size + 1)` rows by
/// `(reference size + 1)` columns. Row 0 and column 0 are never written;
/// the recurrence forbids paths that would read them.
#[derive(Debug, Clone)]
pub struct PointerMatrix {
    cells: Array2<PointerCell>,
}

impl Default for PointerMatrix {
    fn default() -> Self {
        Self::new()
    }
}

impl PointerMatrix {
    pub fn new() -> Self {
        Self {
            cells: Array2::default((0, 0)),
        }
    }

    /// Grows the matrix to hold at least `rows` by `columns` cells.
    /// Allocations never shrink, so repeated calls on one aligner reuse the
    /// high-water buffer.
    pub fn reserve(&mut self, rows: usize, columns: usize) {
        let (current_rows, current_columns) = self.cells.dim();
        if rows > current_rows || columns > current_columns {
            self.cells = Array2::default((rows.max(current_rows), columns.max(current_columns)));
        }
    }

    pub fn get(&self, query_index: usize, ref_index: usize) -> PointerCell {
        self.cells[[query_index, ref_index]]
    }

    pub fn set(&mut self, query_index: usize, ref_index: usize, cell: PointerCell) {
        self.cells[[query_index, ref_index]] = cell;
    }
}
