use std::io::{Read, Write};

use log::trace;
use nom::{IResult, bytes::complete::tag, character::complete::i64 as parse_i64};

use crate::{
    error::{Error, Result},
    io::{skip_any_whitespace, skip_whitespace, translate_nom_error},
    scoring::{AlignmentScores, JumpScore},
};


const ENTRY_LABELS: [&str; 6] = [
    "Match",
    "Mismatch",
    "GapOpen",
    "GapExtend",
    "OffEdge",
    "Jump",
];

impl<ScoreType: JumpScore> AlignmentScores<ScoreType> {
    /// Reads a scoring model from the plain-text format written by
    /// [`write_plain`](Self::write_plain): six labelled entries, one per
    /// line, in the order `Match`, `Mismatch`, `GapOpen`, `GapExtend`,
    /// `OffEdge`, `Jump`.
    pub fn read_plain(mut reader: impl Read) -> Result<Self> {
        let mut input = String::new();
        reader.read_to_string(&mut input)?;
        Self::parse_plain(&input)
            .map_err(translate_nom_error)
            .and_then(|(_, raw)| raw.into_scores())
    }

    pub fn write_plain(&self, mut writer: impl Write) -> Result<()> {
        let entries = [
            self.match_score,
            self.mismatch_score,
            self.gap_open_score,
            self.gap_extend_score,
            self.off_edge_score,
            self.jump_score,
        ];
        for (label, score) in ENTRY_LABELS.into_iter().zip(entries) {
            writeln!(writer, "{label} {score}")?;
        }

        Ok(())
    }

    pub(crate) fn parse_plain(input: &str) -> IResult<&str, RawScores> {
        trace!("Parsing alignment scores");

        let mut entries = [0; 6];
        let mut input = input;
        for (label, entry) in ENTRY_LABELS.into_iter().zip(entries.iter_mut()) {
            let (next_input, value) = parse_entry(input, label)?;
            *entry = value;
            input = next_input;
        }
        let input = skip_any_whitespace(input)?;

        Ok((input, RawScores { entries }))
    }
}

/// Scores as parsed, before conversion into the caller's score type.
pub(crate) struct RawScores {
    entries: [i64; 6],
}

impl RawScores {
    fn into_scores<ScoreType: JumpScore>(self) -> Result<AlignmentScores<ScoreType>> {
        let [match_score, mismatch_score, gap_open_score, gap_extend_score, off_edge_score, jump_score] =
            self.entries;

        Ok(AlignmentScores::new(
            convert(match_score, ENTRY_LABELS[0])?,
            convert(mismatch_score, ENTRY_LABELS[1])?,
            convert(gap_open_score, ENTRY_LABELS[2])?,
            convert(gap_extend_score, ENTRY_LABELS[3])?,
            convert(off_edge_score, ENTRY_LABELS[4])?,
            convert(jump_score, ENTRY_LABELS[5])?,
        ))
    }
}

fn convert<ScoreType: JumpScore>(value: i64, entry: &'static str) -> Result<ScoreType> {
    ScoreType::from_i64(value).ok_or(Error::ScoreOutOfRange(entry))
}

fn parse_entry<'input>(input: &'input str, label: &'static str) -> IResult<&'input str, i64> {
    let input = skip_any_whitespace(input)?;
    let input = tag(label)(input)?.0;
    let input = skip_whitespace(input)?;
    parse_i64(input)
}
