//! Parser for the COMA result file.
//!
//! Each data line has the layout `<Table1>.<Column1> <-> <Table2>.<Column2>:<similarity>`.
//! The final line of the file is a trailer and carries no correspondence.

use schemabench_model::{ColumnId, Correspondence, MatchSet};

use crate::error::{MatchError, Result};

const PAIR_SEPARATOR: &str = " <-> ";

/// One parsed data line, before table names are resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMatch<'a> {
    pub source_table: &'a str,
    pub source_column: &'a str,
    pub target_table: &'a str,
    pub target_column: &'a str,
    pub similarity: &'a str,
}

fn format_error(line_number: usize, line: &str, reason: impl Into<String>) -> MatchError {
    MatchError::Format {
        line_number,
        line: line.to_string(),
        reason: reason.into(),
    }
}

fn split_exact<'a>(value: &'a str, separator: &str) -> Option<(&'a str, &'a str)> {
    let mut parts = value.split(separator);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(left), Some(right), None) => Some((left, right)),
        _ => None,
    }
}

/// Parses a single, already trimmed data line.
pub fn parse_match_line(line: &str, line_number: usize) -> Result<RawMatch<'_>> {
    let (pair, similarity) = split_exact(line, ":")
        .ok_or_else(|| format_error(line_number, line, "expected exactly one ':'"))?;
    let (left, right) = split_exact(pair, PAIR_SEPARATOR)
        .ok_or_else(|| format_error(line_number, line, "expected exactly one ' <-> '"))?;
    let (source_table, source_column) = split_exact(left, ".")
        .ok_or_else(|| format_error(line_number, line, "source is not <table>.<column>"))?;
    let (target_table, target_column) = split_exact(right, ".")
        .ok_or_else(|| format_error(line_number, line, "target is not <table>.<column>"))?;
    Ok(RawMatch {
        source_table,
        source_column,
        target_table,
        target_column,
        similarity,
    })
}

/// Splits the output into trimmed data lines, dropping the trailer.
pub fn output_lines(contents: &str) -> Result<Vec<&str>> {
    let mut lines: Vec<&str> = contents.lines().map(str::trim).collect();
    if lines.pop().is_none() {
        return Err(format_error(0, "", "output is empty, expected a trailer line"));
    }
    Ok(lines)
}

/// Parses COMA output into a match set.
///
/// Table names come from the datasets that were matched, not from the
/// output, so keys line up with the golden standard.
pub fn parse_coma_output(contents: &str, source_table: &str, target_table: &str) -> Result<MatchSet> {
    let mut matches = MatchSet::new();
    for (index, line) in output_lines(contents)?.into_iter().enumerate() {
        let line_number = index + 1;
        let raw = parse_match_line(line, line_number)?;
        let source = ColumnId::new(source_table, raw.source_column)
            .map_err(|err| format_error(line_number, line, err.to_string()))?;
        let target = ColumnId::new(target_table, raw.target_column)
            .map_err(|err| format_error(line_number, line, err.to_string()))?;
        matches.insert(Correspondence::new(source, target, raw.similarity));
    }
    Ok(matches)
}
