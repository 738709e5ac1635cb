//! Tree structure parser: raw text in, pedigree out.
//!
//! Finds the subject line, measures every other line's indentation against
//! it, classifies each ancestor by side and generation, then fills the slots
//! in order of appearance.

pub mod classify;

use crate::line::{scan_lines, RawLine};
use crate::model::ParsedPedigree;
use crate::subject::{self, YearRange};
use classify::Columns;
use thiserror::Error;

/// Why a text block could not be turned into a pedigree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("no line carries a (breed, sex, year) subject annotation")]
    NoSubjectFound,

    #[error("several lines carry a subject annotation (lines {})", format_lines(.lines))]
    AmbiguousSubject { lines: Vec<usize> },

    #[error("the subject has no ancestor lines")]
    EmptyTree,
}

fn format_lines(lines: &[usize]) -> String {
    lines
        .iter()
        .map(|l| (l + 1).to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Tuning knobs for the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Columns per tab stop.
    pub tab_width: usize,
    /// Columns per generation. `None` infers it from the document.
    pub generation_step: Option<usize>,
    /// Plausible birth years for the subject annotation.
    pub years: YearRange,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            tab_width: 4,
            generation_step: None,
            years: YearRange::default(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PedigreeParser {
    config: ParserConfig,
}

impl PedigreeParser {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse a text block. Either every line is accounted for or an error is
    /// returned; there is no partial result.
    pub fn parse(&self, input: &str) -> Result<ParsedPedigree, ParseError> {
        let mut lines = scan_lines(input, self.config.tab_width);

        let subject_index = match subject::candidates(&lines, self.config.years).as_slice() {
            [] => return Err(ParseError::NoSubjectFound),
            [single] => *single,
            many => {
                return Err(ParseError::AmbiguousSubject {
                    lines: many.iter().map(|&i| lines[i].index).collect(),
                })
            }
        };
        lines[subject_index].is_subject = true;

        let subject_line = &lines[subject_index];
        let subject = subject::parse_annotation(&subject_line.text, self.config.years)
            .ok_or(ParseError::NoSubjectFound)?
            .into_subject(subject_line);

        let ancestors: Vec<&RawLine> = lines.iter().filter(|l| !l.is_subject).collect();
        if ancestors.is_empty() {
            return Err(ParseError::EmptyTree);
        }

        let columns = Columns::measure(subject.depth, &ancestors, self.config.generation_step);
        let layout = classify::detect_layout(subject.line_index, &ancestors);
        log::debug!(
            "subject {:?} at line {}, {:?} layout, parent column +{}, step {}",
            subject.name,
            subject.line_index,
            layout,
            columns.parent_distance,
            columns.step
        );

        let classified = classify::classify(layout, subject.line_index, &columns, &ancestors);
        let mut pedigree = ParsedPedigree::new(subject, layout, columns.step);
        classify::place_all(&mut pedigree, &classified);
        Ok(pedigree)
    }
}

/// Parse with the default configuration; `None` when the tree cannot be
/// analyzed.
pub fn parse_ascii_tree_pedigree(input: &str) -> Option<ParsedPedigree> {
    PedigreeParser::default()
        .parse(input)
        .map_err(|e| log::debug!("pedigree not parsed: {e}"))
        .ok()
}
