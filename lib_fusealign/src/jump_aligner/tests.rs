use crate::{gene_model::GeneModel, scoring::AlignmentScores};

use super::{JumpAligner, JumpAlignmentResult, jump_align};

fn test_scores() -> AlignmentScores<i32> {
    AlignmentScores::new(2, -1, -4, -1, -1, -10)
}

fn align(query: &[u8], ref1: &[u8], ref2: &[u8]) -> JumpAlignmentResult<i32> {
    jump_align(query, ref1, ref2, test_scores())
}

#[test]
fn match_within_first_reference() {
    let result = align(b"AAAA", b"AAAA", b"CCCC");
    assert_eq!(result.score, 8);
    assert_eq!(result.align1.cigar(), "4M");
    assert!(result.align2.is_empty());
    assert_eq!(result.ref1_begin, 0);
    assert_eq!(result.jump_query_pos, None);
    assert_eq!(result.jump_insert_len, 0);
    assert!(!result.spans_junction());
}

#[test]
fn fusion_spanning_query() {
    let result = align(b"AAAACCCC", b"AAAATTT", b"GGGCCCC");
    assert_eq!(result.score, 6);
    assert_eq!(result.align1.cigar(), "4M");
    assert_eq!(result.align2.cigar(), "4M");
    assert_eq!(result.ref1_begin, 0);
    assert_eq!(result.ref2_begin, 3);
    assert_eq!(result.jump_query_pos, Some(4));
    assert_eq!(result.jump_insert_len, 0);
    assert!(result.spans_junction());
}

#[test]
fn breakend_insertion_at_the_junction() {
    // The two N symbols match neither reference; they extend the junction
    // without a gap-open penalty.
    let result = align(b"AAAANNCCCC", b"AAAA", b"TCCCC");
    assert_eq!(result.score, 4);
    assert_eq!(result.align1.cigar(), "4M");
    assert_eq!(result.align2.cigar(), "2I4M");
    assert_eq!(result.ref1_begin, 0);
    assert_eq!(result.ref2_begin, 1);
    assert_eq!(result.jump_query_pos, Some(4));
    assert_eq!(result.jump_insert_len, 2);
}

#[test]
fn off_edge_beats_an_unprofitable_jump() {
    // Single-symbol matches cannot amortise the jump penalty, so the
    // trailing query symbol falls off the first reference instead.
    let result = align(b"AG", b"A", b"G");
    assert_eq!(result.score, 1);
    assert_eq!(result.align1.cigar(), "1M1S");
    assert!(result.align2.is_empty());
    assert_eq!(result.jump_query_pos, None);
}

#[test]
fn long_junction_insert_falls_back_to_one_reference() {
    // Eight leftover query symbols cost less as a soft clip than as a
    // jump plus a junction insert filling the whole of ref2.
    let result = align(b"AAAANNNNCCCC", b"AAAA", b"CCCC");
    assert_eq!(result.score, 0);
    assert_eq!(result.align1.cigar(), "4M8S");
    assert!(result.align2.is_empty());
    assert_eq!(result.jump_query_pos, None);
    assert_eq!(result.jump_insert_len, 0);
}

#[test]
fn alignment_begins_inside_the_first_reference() {
    let result = align(b"AAAA", b"TTTTAAAA", b"CCCC");
    assert_eq!(result.score, 8);
    assert_eq!(result.align1.cigar(), "4M");
    assert_eq!(result.ref1_begin, 4);
    assert!(result.align2.is_empty());
}

#[test]
fn trailing_query_falls_off_the_first_reference() {
    let result = align(b"AAAATT", b"AAAA", b"CCCC");
    assert_eq!(result.score, 6);
    assert_eq!(result.align1.cigar(), "4M2S");
    assert!(result.align2.is_empty());
}

#[test]
fn identical_references_prefer_the_first() {
    let result = align(b"AA", b"AA", b"AA");
    assert_eq!(result.score, 4);
    assert_eq!(result.align1.cigar(), "2M");
    assert!(result.align2.is_empty());
    assert_eq!(result.jump_query_pos, None);
}

#[test]
fn minimal_profitable_jump() {
    let result = align(b"AAAAGGGG", b"AAAA", b"GGGG");
    assert_eq!(result.score, 6);
    assert_eq!(result.align1.cigar(), "4M");
    assert_eq!(result.align2.cigar(), "4M");
    assert_eq!(result.ref1_begin, 0);
    assert_eq!(result.ref2_begin, 0);
    assert_eq!(result.jump_query_pos, Some(4));
}

#[test]
fn deletion_within_the_first_reference() {
    // Skipping the three reference Ts costs open plus three extends, which
    // beats mismatching them in any window of the reference.
    let result = align(b"AAAAGGGG", b"AAAATTTGGGG", b"CCCC");
    assert_eq!(result.score, 9);
    assert_eq!(result.align1.cigar(), "4M3D4M");
    assert_eq!(result.ref1_begin, 0);
    assert!(result.align2.is_empty());
}

#[test]
fn aligner_reuses_its_buffers_across_calls() {
    let mut aligner = JumpAligner::new(test_scores());

    let large = aligner.align(b"AAAACCCC", b"AAAATTT", b"GGGCCCC");
    assert_eq!(large, align(b"AAAACCCC", b"AAAATTT", b"GGGCCCC"));

    // A smaller follow-up call must not see stale state of the larger one.
    let small = aligner.align(b"AA", b"AA", b"AA");
    assert_eq!(small, align(b"AA", b"AA", b"AA"));

    let large_again = aligner.align(b"AAAACCCC", b"AAAATTT", b"GGGCCCC");
    assert_eq!(large_again, large);
}

#[test]
#[should_panic(expected = "non-empty")]
fn empty_query_is_a_programming_error() {
    jump_align(b"", b"A", b"A", test_scores());
}

#[test]
fn constrained_with_an_empty_set_matches_the_unconstrained_aligner() {
    let mut aligner = JumpAligner::new(test_scores());
    let unconstrained = aligner.align(b"AAAACCCC", b"AAAATTT", b"GGGCCCC");

    for model in [
        GeneModel::default(),
        GeneModel::new(vec![3], vec![]),
        GeneModel::new(vec![], vec![3]),
    ] {
        let constrained = aligner.align_constrained(b"AAAACCCC", b"AAAATTT", b"GGGCCCC", &model);
        assert_eq!(constrained, unconstrained);
    }
}

#[test]
fn exit_sites_pin_the_jump_column() {
    let mut aligner = JumpAligner::new(test_scores());

    // With every window of the first reference equally good, the jump
    // column is a tie and resolves to the rightmost window.
    let free = aligner.align(b"AAAACCCC", b"AAAAAAAA", b"CCCCCCCC");
    assert_eq!(free.score, 6);
    assert_eq!(free.ref1_begin, 4);
    assert_eq!(free.ref2_begin, 0);

    // Forcing the exit after ref1[3] moves the window to the front.
    let everywhere = (0..8).collect::<Vec<_>>();
    let model = GeneModel::new(vec![3], everywhere);
    let pinned = aligner.align_constrained(b"AAAACCCC", b"AAAAAAAA", b"CCCCCCCC", &model);
    assert_eq!(pinned.score, 6);
    assert_eq!(pinned.align1.cigar(), "4M");
    assert_eq!(pinned.align2.cigar(), "4M");
    assert_eq!(pinned.ref1_begin, 0);
    assert_eq!(pinned.jump_query_pos, Some(4));
}

#[test]
fn entry_sites_pin_the_reentry_column() {
    let mut aligner = JumpAligner::new(test_scores());

    let everywhere = (0..8).collect::<Vec<_>>();
    let model = GeneModel::new(everywhere, vec![4]);
    let pinned = aligner.align_constrained(b"AAAACCCC", b"AAAAAAAA", b"CCCCCCCC", &model);
    assert_eq!(pinned.score, 6);
    assert_eq!(pinned.align1.cigar(), "4M");
    assert_eq!(pinned.align2.cigar(), "4M");
    assert_eq!(pinned.ref1_begin, 4);
    assert_eq!(pinned.ref2_begin, 4);
    assert_eq!(pinned.jump_query_pos, Some(4));
}
