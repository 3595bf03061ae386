//! A global gapped aligner of one query against two references, allowing a
//! single jump from the first reference into the second.
//!
//! The jump models a fusion breakpoint: the query is read through the first
//! reference, pays `jump_score` once, and continues anywhere in the second
//! reference. Query symbols that extend past either end of a reference fall
//! off at `off_edge_score` per symbol and come back as soft clips, and
//! query symbols inserted between the two references (breakend insertions)
//! extend a gap without paying the gap-open penalty on top of the jump.
//!
//! The recurrence keeps four states per cell (match, delete, insert, jump)
//! in two rolling score columns and records a predecessor tag per state in
//! one full pointer matrix per reference for the backtrace.

use log::trace;

use crate::{
    alignment::Alignment,
    gene_model::GeneModel,
    scoring::{AlignmentScores, JumpScore},
    tableau::{AlignState, PointerCell, PointerMatrix, ScoreCell},
};

mod backtrace;
#[cfg(test)]
mod tests;

/// The outcome of a jump alignment.
///
/// `align1` and `align2` are in 5'→3' order; either may be empty when the
/// best alignment never touches that reference. Junction insertions are
/// part of `align2` and additionally counted in `jump_insert_len`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JumpAlignmentResult<ScoreType> {
    pub score: ScoreType,
    pub align1: Alignment,
    pub align2: Alignment,
    pub ref1_begin: usize,
    pub ref2_begin: usize,
    /// The query index at which the jump was taken, or `None` when a single
    /// reference was enough.
    pub jump_query_pos: Option<usize>,
    /// The length of the insertion run attached to the junction.
    pub jump_insert_len: usize,
}

impl<ScoreType> JumpAlignmentResult<ScoreType> {
    /// Whether the alignment used both references.
    pub fn spans_junction(&self) -> bool {
        self.jump_query_pos.is_some()
    }
}

impl<ScoreType: std::fmt::Display> std::fmt::Display for JumpAlignmentResult<ScoreType> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Score: {}", self.score)?;
        writeln!(f, "Reference 1: {} @ {}", self.align1, self.ref1_begin)?;
        writeln!(f, "Reference 2: {} @ {}", self.align2, self.ref2_begin)?;
        match self.jump_query_pos {
            Some(query_pos) => writeln!(
                f,
                "Jump: query {query_pos}, junction insert {}",
                self.jump_insert_len
            ),
            None => writeln!(f, "Jump: none"),
        }
    }
}

/// Where the backtrace starts: the best terminal cell seen so far, with the
/// reference index in the joint coordinate `[0, ref1_size + ref2_size]`.
/// Terminal cells are always in the match state.
struct BackTrace<ScoreType> {
    max: ScoreType,
    ref_begin: usize,
    query_begin: usize,
    is_init: bool,
}

impl<ScoreType: JumpScore> BackTrace<ScoreType> {
    fn new() -> Self {
        Self {
            max: ScoreType::zero(),
            ref_begin: 0,
            query_begin: 0,
            is_init: false,
        }
    }

    /// First seen wins: a later candidate must be strictly better.
    fn update(&mut self, score: ScoreType, ref_index: usize, query_index: usize) {
        if self.is_init && score <= self.max {
            return;
        }
        self.max = score;
        self.ref_begin = ref_index;
        self.query_begin = query_index;
        self.is_init = true;
    }
}

/// A reusable jump aligner.
///
/// The score columns and pointer matrices are grown to the high-water mark
/// of all calls and reused, so a single instance amortises allocations
/// across many alignments. An instance must not be shared between
/// concurrent calls; independent instances are fully independent.
pub struct JumpAligner<ScoreType> {
    scores: AlignmentScores<ScoreType>,
    column_a: Vec<ScoreCell<ScoreType>>,
    column_b: Vec<ScoreCell<ScoreType>>,
    pointers1: PointerMatrix,
    pointers2: PointerMatrix,
}

/// Aligns a single query with a fresh [`JumpAligner`].
pub fn jump_align<ScoreType: JumpScore>(
    query: &[u8],
    ref1: &[u8],
    ref2: &[u8],
    scores: AlignmentScores<ScoreType>,
) -> JumpAlignmentResult<ScoreType> {
    JumpAligner::new(scores).align(query, ref1, ref2)
}

impl<ScoreType: JumpScore> JumpAligner<ScoreType> {
    pub fn new(scores: AlignmentScores<ScoreType>) -> Self {
        Self {
            scores,
            column_a: Vec::new(),
            column_b: Vec::new(),
            pointers1: PointerMatrix::new(),
            pointers2: PointerMatrix::new(),
        }
    }

    pub fn scores(&self) -> &AlignmentScores<ScoreType> {
        &self.scores
    }

    /// Aligns `query` against `ref1` and `ref2` with at most one jump
    /// between them.
    ///
    /// All three sequences must be non-empty.
    pub fn align(
        &mut self,
        query: &[u8],
        ref1: &[u8],
        ref2: &[u8],
    ) -> JumpAlignmentResult<ScoreType> {
        self.align_inner(query, ref1, ref2, None, None)
    }

    /// Like [`align`](Self::align), but restricts the jump to the exit and
    /// entry sites of `model`. A model with an empty exit or entry set is
    /// treated as unconstrained.
    pub fn align_constrained(
        &mut self,
        query: &[u8],
        ref1: &[u8],
        ref2: &[u8],
        model: &GeneModel,
    ) -> JumpAlignmentResult<ScoreType> {
        if model.is_unconstrained() {
            return self.align_inner(query, ref1, ref2, None, None);
        }

        let exit_mask = model.exit_mask(ref1.len());
        let entry_mask = model.entry_mask(ref2.len());
        self.align_inner(query, ref1, ref2, Some(&exit_mask), Some(&entry_mask))
    }

    fn align_inner(
        &mut self,
        query: &[u8],
        ref1: &[u8],
        ref2: &[u8],
        exit_mask: Option<&[bool]>,
        entry_mask: Option<&[bool]>,
    ) -> JumpAlignmentResult<ScoreType> {
        assert!(
            !query.is_empty() && !ref1.is_empty() && !ref2.is_empty(),
            "jump alignment requires non-empty query and references"
        );

        let query_size = query.len();
        let ref1_size = ref1.len();
        let ref2_size = ref2.len();

        trace!(
            "Aligning {query_size} query symbols against references of {ref1_size} and {ref2_size} symbols"
        );

        self.reserve(query_size, ref1_size, ref2_size);

        let scores = self.scores;
        let bad = ScoreType::forbidden();

        let Self {
            column_a,
            column_b,
            pointers1,
            pointers2,
            ..
        } = self;
        let mut this_col: &mut Vec<ScoreCell<ScoreType>> = column_a;
        let mut prev_col: &mut Vec<ScoreCell<ScoreType>> = column_b;

        // Before the first reference symbol the query may only fall off to
        // the left; starting inside a gap or in the jump state is forbidden.
        for (query_index, cell) in this_col.iter_mut().enumerate().take(query_size + 1) {
            *cell = ScoreCell {
                match_: scores.off_edge_score * ScoreType::from_length(query_index),
                del: bad,
                ins: bad,
                jump: bad,
            };
        }

        let mut btrace = BackTrace::new();

        // First reference pass.
        for (ref_offset, &ref_symbol) in ref1.iter().enumerate() {
            let ref_index = ref_offset + 1;
            std::mem::swap(&mut this_col, &mut prev_col);

            this_col[0] = ScoreCell {
                match_: ScoreType::zero(),
                del: bad,
                ins: bad,
                jump: bad,
            };

            let jump_exit_open = exit_mask.is_none_or(|mask| mask[ref_index]);

            for (query_offset, &query_symbol) in query.iter().enumerate() {
                let query_index = query_offset + 1;

                let diagonal = prev_col[query_offset];
                let horizontal = prev_col[query_index];
                let vertical = this_col[query_offset];

                let (mut match_score, match_from) =
                    max3(diagonal.match_, diagonal.del, diagonal.ins);
                match_score += if query_symbol == ref_symbol {
                    scores.match_score
                } else {
                    scores.mismatch_score
                };

                let (mut del_score, del_from) = max3(
                    horizontal.match_ + scores.gap_open_score,
                    horizontal.del,
                    horizontal.ins,
                );
                del_score += scores.gap_extend_score;
                if query_index == 1 {
                    del_score += bad;
                }

                let (mut ins_score, ins_from) =
                    max3(vertical.match_ + scores.gap_open_score, bad, vertical.ins);
                ins_score += scores.gap_extend_score;
                if query_index == 1 {
                    ins_score += bad;
                }

                // The jump leaves from the freshly computed match or insert
                // score of this very cell.
                let (jump_score, jump_from) = if jump_exit_open {
                    max4(
                        match_score + scores.jump_score,
                        bad,
                        ins_score + scores.jump_score,
                        horizontal.jump,
                    )
                } else {
                    max4(bad, bad, bad, horizontal.jump)
                };

                this_col[query_index] = ScoreCell {
                    match_: match_score,
                    del: del_score,
                    ins: ins_score,
                    jump: jump_score,
                };
                pointers1.set(
                    query_index,
                    ref_index,
                    PointerCell::pack(match_from, del_from, ins_from, jump_from),
                );
            }

            btrace.update(this_col[query_size].match_, ref_index, query_size);
        }

        // The query may fall off the end of the first reference.
        for query_index in 0..=query_size {
            let candidate = this_col[query_index].match_
                + scores.off_edge_score * ScoreType::from_length(query_size - query_index);
            btrace.update(candidate, ref1_size, query_index);
        }

        // Only the jump state carries across the reference boundary.
        for (query_index, cell) in this_col.iter_mut().enumerate().take(query_size + 1) {
            cell.match_ = scores.off_edge_score * ScoreType::from_length(query_index);
            cell.del = bad;
            cell.ins = bad;
            // cell.jump keeps the value from the last column of ref1.
        }

        // Second reference pass.
        for (ref_offset, &ref_symbol) in ref2.iter().enumerate() {
            let ref_index = ref_offset + 1;
            std::mem::swap(&mut this_col, &mut prev_col);

            this_col[0] = ScoreCell {
                match_: ScoreType::zero(),
                del: bad,
                ins: bad,
                jump: bad,
            };

            let jump_entry_open = entry_mask.is_none_or(|mask| mask[ref_index]);

            for (query_offset, &query_symbol) in query.iter().enumerate() {
                let query_index = query_offset + 1;

                let diagonal = prev_col[query_offset];
                let horizontal = prev_col[query_index];
                let vertical = this_col[query_offset];

                let (mut match_score, match_from) = max4(
                    diagonal.match_,
                    diagonal.del,
                    diagonal.ins,
                    if jump_entry_open { diagonal.jump } else { bad },
                );
                match_score += if query_symbol == ref_symbol {
                    scores.match_score
                } else {
                    scores.mismatch_score
                };

                let (mut del_score, del_from) = max3(
                    horizontal.match_ + scores.gap_open_score,
                    horizontal.del,
                    horizontal.ins,
                );
                del_score += scores.gap_extend_score;

                // Jump-to-insert gets a pass on the gap-open penalty, so
                // breakend insertions pay the jump alone.
                let (mut ins_score, ins_from) = max4(
                    vertical.match_ + scores.gap_open_score,
                    bad,
                    vertical.ins,
                    vertical.jump,
                );
                ins_score += scores.gap_extend_score;

                // Once in the jump state the score is frozen; it rides
                // along the second reference for free.
                this_col[query_index] = ScoreCell {
                    match_: match_score,
                    del: del_score,
                    ins: ins_score,
                    jump: horizontal.jump,
                };
                pointers2.set(
                    query_index,
                    ref_index,
                    PointerCell::pack(match_from, del_from, ins_from, AlignState::Jump),
                );
            }

            btrace.update(
                this_col[query_size].match_,
                ref1_size + ref_index,
                query_size,
            );
        }

        // The query may fall off the end of the second reference.
        for query_index in 0..=query_size {
            let candidate = this_col[query_index].match_
                + scores.off_edge_score * ScoreType::from_length(query_size - query_index);
            btrace.update(candidate, ref1_size + ref2_size, query_index);
        }

        trace!(
            "Backtrace starts at query index {} and joint reference index {} with score {}",
            btrace.query_begin, btrace.ref_begin, btrace.max
        );

        backtrace::back_trace_alignment(query_size, ref1_size, ref2_size, pointers1, pointers2, &btrace)
    }

    fn reserve(&mut self, query_size: usize, ref1_size: usize, ref2_size: usize) {
        let rows = query_size + 1;
        if self.column_a.len() < rows {
            let bad_cell = ScoreCell::uniform(ScoreType::forbidden());
            self.column_a.resize(rows, bad_cell);
            self.column_b.resize(rows, bad_cell);
        }
        self.pointers1.reserve(rows, ref1_size + 1);
        self.pointers2.reserve(rows, ref2_size + 1);
    }
}

/// Maximum of the match, delete and insert slots, first slot winning ties.
fn max3<ScoreType: Ord + Copy>(
    match_slot: ScoreType,
    delete_slot: ScoreType,
    insert_slot: ScoreType,
) -> (ScoreType, AlignState) {
    let mut max = match_slot;
    let mut from = AlignState::Match;
    if delete_slot > max {
        max = delete_slot;
        from = AlignState::Delete;
    }
    if insert_slot > max {
        max = insert_slot;
        from = AlignState::Insert;
    }
    (max, from)
}

fn max4<ScoreType: Ord + Copy>(
    match_slot: ScoreType,
    delete_slot: ScoreType,
    insert_slot: ScoreType,
    jump_slot: ScoreType,
) -> (ScoreType, AlignState) {
    let (mut max, mut from) = max3(match_slot, delete_slot, insert_slot);
    if jump_slot > max {
        max = jump_slot;
        from = AlignState::Jump;
    }
    (max, from)
}
