use crate::{
    alignment::{Alignment, AlignmentOp},
    scoring::JumpScore,
    tableau::{AlignState, PointerMatrix},
};

use super::{BackTrace, JumpAlignmentResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment {
    Ref1,
    Ref2,
}

/// Walks the pointer matrices from the backtrace start and reconstructs the
/// per-reference op runs.
///
/// The walk moves right to left, so the op runs are collected rear-first
/// and reversed before being returned. While in the second reference the
/// jump state rides toward column 0 without emitting ops, then the walk
/// continues in the first reference from its final column, entering
/// whichever state produced the jump there.
pub(super) fn back_trace_alignment<ScoreType: JumpScore>(
    query_size: usize,
    ref1_size: usize,
    ref2_size: usize,
    pointers1: &PointerMatrix,
    pointers2: &PointerMatrix,
    btrace: &BackTrace<ScoreType>,
) -> JumpAlignmentResult<ScoreType> {
    assert!(btrace.is_init);
    debug_assert!(btrace.ref_begin <= ref1_size + ref2_size);
    debug_assert!(btrace.query_begin <= query_size);

    let mut path1 = Alignment::new();
    let mut path2 = Alignment::new();

    let (mut segment, mut ref_index) = if btrace.ref_begin > ref1_size {
        (Segment::Ref2, btrace.ref_begin - ref1_size)
    } else {
        (Segment::Ref1, btrace.ref_begin)
    };
    let mut query_index = btrace.query_begin;
    let mut state = AlignState::Match;

    let mut jump_query_pos = None;
    let mut jump_insert_len = 0;
    let mut junction_ins_run = 0;
    let mut ref2_begin = 0;

    // Query symbols past the backtrace start fell off the reference.
    if query_index < query_size {
        let path = match segment {
            Segment::Ref1 => &mut path1,
            Segment::Ref2 => &mut path2,
        };
        path.push_run(AlignmentOp::SoftClip, query_size - query_index);
    }

    loop {
        if query_index == 0 && state != AlignState::Jump {
            break;
        }

        match segment {
            Segment::Ref2 => match state {
                AlignState::Match => {
                    if ref_index == 0 {
                        // The alignment opens at the start of ref2; the
                        // remaining query symbols are a leading clip.
                        break;
                    }
                    let from = pointers2
                        .get(query_index, ref_index)
                        .predecessor(AlignState::Match);
                    path2.push(AlignmentOp::Match);
                    junction_ins_run = 0;
                    query_index -= 1;
                    ref_index -= 1;
                    ref2_begin = ref_index;
                    state = from;
                }
                AlignState::Insert => {
                    let from = pointers2
                        .get(query_index, ref_index)
                        .predecessor(AlignState::Insert);
                    path2.push(AlignmentOp::Insertion);
                    junction_ins_run += 1;
                    query_index -= 1;
                    ref2_begin = ref_index;
                    state = from;
                }
                AlignState::Delete => {
                    assert!(ref_index > 0, "deletion pointer walked off the reference");
                    let from = pointers2
                        .get(query_index, ref_index)
                        .predecessor(AlignState::Delete);
                    path2.push(AlignmentOp::Deletion);
                    junction_ins_run = 0;
                    ref_index -= 1;
                    ref2_begin = ref_index;
                    state = from;
                }
                AlignState::Jump => {
                    jump_query_pos = Some(query_index);
                    jump_insert_len = junction_ins_run;
                    segment = Segment::Ref1;
                    ref_index = ref1_size;
                }
            },
            Segment::Ref1 => match state {
                AlignState::Jump => {
                    // Find the column where the jump left the first
                    // reference, then resume in the state it came from.
                    loop {
                        assert!(
                            ref_index > 0,
                            "jump pointer walked off the first reference"
                        );
                        match pointers1
                            .get(query_index, ref_index)
                            .predecessor(AlignState::Jump)
                        {
                            AlignState::Jump => ref_index -= 1,
                            from @ (AlignState::Match | AlignState::Insert) => {
                                state = from;
                                break;
                            }
                            AlignState::Delete => {
                                unreachable!("the jump state is never entered from a deletion")
                            }
                        }
                    }
                }
                AlignState::Match => {
                    if ref_index == 0 {
                        break;
                    }
                    let from = pointers1
                        .get(query_index, ref_index)
                        .predecessor(AlignState::Match);
                    path1.push(AlignmentOp::Match);
                    query_index -= 1;
                    ref_index -= 1;
                    state = from;
                }
                AlignState::Insert => {
                    let from = pointers1
                        .get(query_index, ref_index)
                        .predecessor(AlignState::Insert);
                    path1.push(AlignmentOp::Insertion);
                    query_index -= 1;
                    state = from;
                }
                AlignState::Delete => {
                    assert!(ref_index > 0, "deletion pointer walked off the reference");
                    let from = pointers1
                        .get(query_index, ref_index)
                        .predecessor(AlignState::Delete);
                    path1.push(AlignmentOp::Deletion);
                    ref_index -= 1;
                    state = from;
                }
            },
        }
    }

    // Query symbols before the alignment start are a leading clip; leading
    // unaligned reference is simply not emitted.
    if query_index > 0 {
        let path = match segment {
            Segment::Ref1 => &mut path1,
            Segment::Ref2 => &mut path2,
        };
        path.push_run(AlignmentOp::SoftClip, query_index);
    }

    let ref1_begin = match segment {
        Segment::Ref1 => ref_index,
        Segment::Ref2 => 0,
    };
    if path2.is_empty() {
        ref2_begin = 0;
    }

    JumpAlignmentResult {
        score: btrace.max,
        align1: path1.reversed(),
        align2: path2.reversed(),
        ref1_begin,
        ref2_begin,
        jump_query_pos,
        jump_insert_len,
    }
}
