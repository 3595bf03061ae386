use std::fmt::{Debug, Display};
use std::ops::AddAssign;

use num_traits::{FromPrimitive, Signed};

pub mod io;

/// Score assigned to alignment states that must never win a maximisation,
/// such as opening an alignment inside a gap.
pub const FORBIDDEN_SCORE: i32 = -10_000;

/// The score type of the jump aligner.
///
/// Scores are signed and maximised. Implementations with a fixed width must
/// leave enough headroom that [`FORBIDDEN_SCORE`] plus linear path costs
/// cannot underflow; `i32` leaves several orders of magnitude to spare for
/// any realistic read and reference lengths.
pub trait JumpScore:
    Copy + Ord + Debug + Display + AddAssign + Signed + FromPrimitive
{
    /// The sentinel for forbidden starts and transitions.
    fn forbidden() -> Self {
        Self::from_i32(FORBIDDEN_SCORE).expect("score type cannot represent the forbidden sentinel")
    }

    /// Converts a sequence length into a score factor.
    fn from_length(length: usize) -> Self {
        Self::from_usize(length).expect("score type cannot represent the sequence length")
    }
}

impl<ScoreType> JumpScore for ScoreType where
    ScoreType: Copy + Ord + Debug + Display + AddAssign + Signed + FromPrimitive
{
}

/// The immutable scoring model of a jump alignment.
///
/// `match_score` rewards agreeing symbols, all other entries are penalties
/// and are conventionally non-positive. `off_edge_score` is charged per
/// query symbol that extends past either end of a reference (soft clip),
/// and `jump_score` once for the transition from the first reference into
/// the second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlignmentScores<ScoreType> {
    pub match_score: ScoreType,
    pub mismatch_score: ScoreType,
    pub gap_open_score: ScoreType,
    pub gap_extend_score: ScoreType,
    pub off_edge_score: ScoreType,
    pub jump_score: ScoreType,
}

impl<ScoreType: JumpScore> AlignmentScores<ScoreType> {
    pub fn new(
        match_score: ScoreType,
        mismatch_score: ScoreType,
        gap_open_score: ScoreType,
        gap_extend_score: ScoreType,
        off_edge_score: ScoreType,
        jump_score: ScoreType,
    ) -> Self {
        Self {
            match_score,
            mismatch_score,
            gap_open_score,
            gap_extend_score,
            off_edge_score,
            jump_score,
        }
    }
}
