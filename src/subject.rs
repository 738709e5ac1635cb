//! Subject line detection.
//!
//! The subject carries a `(breed, sex, year)` annotation. Ancestor lines may
//! hold parentheses too (registration numbers, breed notes), but never this
//! exact three-part shape with a sex word and a birth year.

use crate::line::RawLine;
use crate::model::{Sex, Subject};
use regex::Regex;
use std::sync::LazyLock;

// Exactly three comma-separated components; the year is the last one and
// has exactly four digits.
static RE_SUBJECT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\(\s*([^(),]*[^(),\s])\s*,\s*([^(),]*[^(),\s])\s*,\s*([0-9]{4})\s*\)").unwrap()
});

const MALE: &[&str] = &[
    "m", "male", "stallion", "jack", "colt", "bull", "ram", "buck", "boar", // en
    "mâle", "étalon", "etalon", "baudet", "âne", "ane", // fr
    "macho", "semental", "garañón", "garanon", "burro", // es
    "maschio", "stallone", // it
    "männlich", "mannlich", "hengst", // de
    "masculino", // pt
];

const FEMALE: &[&str] = &[
    "f", "female", "mare", "jenny", "filly", "cow", "ewe", "doe", "sow", // en
    "femelle", "jument", "ânesse", "anesse", // fr
    "h", "hembra", "yegua", "burra", // es
    "femmina", "fattrice", // it
    "weiblich", "stute", // de
    "fêmea", "femea", "feminino", // pt
];

/// Inclusive birth-year range accepted in a subject annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub min: u16,
    pub max: u16,
}

impl Default for YearRange {
    fn default() -> Self {
        Self {
            min: 1850,
            max: 2100,
        }
    }
}

/// Breed, sex and year parsed out of a subject annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    /// Text before the annotation, trimmed.
    pub name: String,
    pub breed: String,
    pub sex: Sex,
    pub birth_year: u16,
}

impl Annotation {
    pub fn into_subject(self, line: &RawLine) -> Subject {
        Subject {
            name: self.name,
            breed: self.breed,
            sex: self.sex,
            birth_year: self.birth_year,
            line_index: line.index,
            depth: line.depth,
        }
    }
}

pub fn parse_sex(token: &str) -> Option<Sex> {
    let token = token.trim().trim_end_matches('.').to_lowercase();
    if MALE.contains(&token.as_str()) {
        Some(Sex::Male)
    } else if FEMALE.contains(&token.as_str()) {
        Some(Sex::Female)
    } else {
        None
    }
}

/// Find the first well-formed subject annotation in a line's content.
pub fn parse_annotation(content: &str, years: YearRange) -> Option<Annotation> {
    RE_SUBJECT.captures_iter(content).find_map(|caps| {
        let sex = parse_sex(&caps[2])?;
        let birth_year: u16 = caps[3].parse().ok()?;
        if birth_year < years.min || birth_year > years.max {
            return None;
        }
        let whole = caps.get(0)?;
        Some(Annotation {
            name: content[..whole.start()].trim().to_string(),
            breed: caps[1].trim().to_string(),
            sex,
            birth_year,
        })
    })
}

/// Indices into `lines` of every line carrying a subject annotation.
pub fn candidates(lines: &[RawLine], years: YearRange) -> Vec<usize> {
    lines
        .iter()
        .enumerate()
        .filter(|(_, line)| parse_annotation(&line.text, years).is_some())
        .map(|(i, _)| i)
        .collect()
}
