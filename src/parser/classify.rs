//! Generation, lineage and slot classification of ancestor lines.

use crate::line::{BranchHint, RawLine};
use crate::model::{capacity, Layout, ParsedPedigree, Side, Slot, GENERATIONS};

/// Fallback column width of one generation.
pub const DEFAULT_STEP: usize = 4;

/// Gaps narrower than this are treated as jitter, not a generation step.
const MIN_STEP: usize = 2;

/// An ancestor line with its side and generation decided.
#[derive(Debug, Clone, Copy)]
pub struct Classified<'a> {
    pub line: &'a RawLine,
    pub side: Side,
    pub generation: u8,
}

/// Horizontal geometry shared by every line of one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Columns {
    pub subject_depth: usize,
    /// Distance of the parent row from the subject column.
    pub parent_distance: usize,
    pub step: usize,
}

impl Columns {
    /// Measure the ancestors' distances from the subject column. With no
    /// explicit step, the step is the gap between the parent row and the
    /// next deeper row.
    pub fn measure(subject_depth: usize, ancestors: &[&RawLine], step: Option<usize>) -> Self {
        let mut distances: Vec<usize> = ancestors
            .iter()
            .map(|line| line.depth.abs_diff(subject_depth))
            .collect();
        distances.sort_unstable();
        distances.dedup();

        let parent_distance = distances.first().copied().unwrap_or(0);
        let step = step.filter(|&s| s > 0).unwrap_or_else(|| {
            distances
                .iter()
                .map(|d| d - parent_distance)
                .find(|&gap| gap >= MIN_STEP)
                .unwrap_or(DEFAULT_STEP)
        });

        Self {
            subject_depth,
            parent_distance,
            step,
        }
    }

    /// Generation of a line: one plus the rounded number of steps past the
    /// parent row, clamped to 1..=5.
    pub fn generation(&self, depth: usize) -> u8 {
        let past = depth
            .abs_diff(self.subject_depth)
            .saturating_sub(self.parent_distance);
        let steps = (past + self.step / 2) / self.step;
        (1 + steps).min(GENERATIONS as usize) as u8
    }
}

pub fn detect_layout(subject_index: usize, ancestors: &[&RawLine]) -> Layout {
    let above = ancestors.iter().any(|l| l.index < subject_index);
    let below = ancestors.iter().any(|l| l.index > subject_index);
    match (above, below) {
        (true, true) => Layout::Sideways,
        (false, _) => Layout::Outline,
        (true, false) => Layout::Mirrored,
    }
}

/// Decide side and generation for every ancestor line, in text order.
pub fn classify<'a>(
    layout: Layout,
    subject_index: usize,
    columns: &Columns,
    ancestors: &[&'a RawLine],
) -> Vec<Classified<'a>> {
    let generations: Vec<u8> = ancestors.iter().map(|l| columns.generation(l.depth)).collect();
    let parent_rows: Vec<usize> = ancestors
        .iter()
        .zip(&generations)
        .filter(|(_, g)| **g == 1)
        .map(|(l, _)| l.index)
        .collect();

    let side_of = |pos: usize, line: &RawLine| -> Side {
        match layout {
            Layout::Sideways => {
                if line.index < subject_index {
                    Side::Paternal
                } else {
                    Side::Maternal
                }
            }
            // A line belongs to the last parent row at or before its anchor.
            Layout::Outline => {
                let anchor = outline_anchor(ancestors, &generations, pos);
                let opened = parent_rows.iter().filter(|&&row| row <= anchor).count();
                if opened <= 1 {
                    Side::Paternal
                } else {
                    Side::Maternal
                }
            }
            // A line belongs to the nearest parent row, the upper one on ties.
            Layout::Mirrored => {
                let nearest = parent_rows
                    .iter()
                    .enumerate()
                    .min_by_key(|&(_, &row)| (row.abs_diff(line.index), row))
                    .map(|(i, _)| i);
                if nearest.unwrap_or(0) == 0 {
                    Side::Paternal
                } else {
                    Side::Maternal
                }
            }
        }
    };

    ancestors
        .iter()
        .zip(&generations)
        .enumerate()
        .map(|(pos, (&line, &generation))| Classified {
            line,
            side: side_of(pos, line),
            generation,
        })
        .collect()
}

/// Line index that decides an outline line's branch. A `┌` line below the
/// parent row is drawn above its own parent, so it takes the anchor of the
/// next shallower line; any other line is its own anchor.
fn outline_anchor(ancestors: &[&RawLine], generations: &[u8], pos: usize) -> usize {
    let generation = generations[pos];
    if generation > 1 && ancestors[pos].hint == Some(BranchHint::Upper) {
        if let Some(parent) = (pos + 1..ancestors.len()).find(|&j| generations[j] < generation) {
            return outline_anchor(ancestors, generations, parent);
        }
    }
    ancestors[pos].index
}

/// Per (side, generation) position of the next free slot.
#[derive(Debug, Default)]
struct Cursors([[usize; GENERATIONS as usize]; 2]);

impl Cursors {
    fn get_mut(&mut self, side: Side, generation: u8) -> &mut usize {
        let side = match side {
            Side::Paternal => 0,
            Side::Maternal => 1,
        };
        &mut self.0[side][usize::from(generation - 1)]
    }
}

/// Slot index for the next entry of a bucket. A corner glyph pins the
/// entry to a sire (even) or dam (odd) slot, skipping over one slot if the
/// cursor sits on the other parity.
fn next_index(cursor: usize, hint: Option<BranchHint>) -> usize {
    match hint {
        Some(BranchHint::Lower) if cursor % 2 == 0 => cursor + 1,
        Some(BranchHint::Upper) if cursor % 2 == 1 => cursor + 1,
        _ => cursor,
    }
}

/// Fill the pedigree's slots from classified lines in order of appearance.
pub fn place_all(pedigree: &mut ParsedPedigree, classified: &[Classified<'_>]) {
    let mut cursors = Cursors::default();

    for entry in classified {
        let side = entry.side;
        let mut generation = entry.generation;

        // A side has one parent; another parent-row line lost its indent.
        if generation == 1 && pedigree.parent(side).is_some() {
            log::debug!(
                "line {}: {} parent already set, taking {:?} as generation 2",
                entry.line.index,
                side.as_str(),
                entry.line.name()
            );
            generation = 2;
        }

        let hint = if generation > 1 { entry.line.hint } else { None };
        let cursor = cursors.get_mut(side, generation);
        let index = next_index(*cursor, hint);
        if index >= capacity(generation) {
            log::debug!(
                "line {}: {} generation {} is full, dropping {:?}",
                entry.line.index,
                side.as_str(),
                generation,
                entry.line.name()
            );
            continue;
        }
        *cursor = index + 1;

        if let Some(slot) = Slot::new(side, generation, index) {
            pedigree.place(slot, entry.line.name(), entry.line.index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line::scan_lines;

    fn ancestors(lines: &[RawLine], subject: usize) -> Vec<&RawLine> {
        lines.iter().filter(|l| l.index != subject).collect()
    }

    #[test]
    fn step_inferred_from_parent_to_grandparent_gap() {
        let lines = scan_lines("S\n      A\n         B\n               C", 4);
        let anc = ancestors(&lines, 0);
        let cols = Columns::measure(0, &anc, None);
        assert_eq!(cols.parent_distance, 6);
        assert_eq!(cols.step, 3);
        assert_eq!(cols.generation(6), 1);
        assert_eq!(cols.generation(9), 2);
        assert_eq!(cols.generation(15), 4);
    }

    #[test]
    fn jitter_gap_is_not_a_step() {
        let lines = scan_lines("S\n    A\n     B\n        C", 4);
        let anc = ancestors(&lines, 0);
        let cols = Columns::measure(0, &anc, None);
        assert_eq!(cols.step, 4);
        assert_eq!(cols.generation(5), 1);
        assert_eq!(cols.generation(8), 2);
    }

    #[test]
    fn single_column_falls_back_to_default_step() {
        let lines = scan_lines("S\n    A\n    B", 4);
        let cols = Columns::measure(0, &ancestors(&lines, 0), None);
        assert_eq!(cols.step, DEFAULT_STEP);
    }

    #[test]
    fn explicit_step_wins() {
        let lines = scan_lines("S\n    A\n      B", 4);
        let cols = Columns::measure(0, &ancestors(&lines, 0), Some(4));
        assert_eq!(cols.step, 4);
        assert_eq!(cols.generation(6), 2);
    }

    #[test]
    fn generation_is_clamped() {
        let cols = Columns {
            subject_depth: 0,
            parent_distance: 4,
            step: 4,
        };
        assert_eq!(cols.generation(0), 1);
        assert_eq!(cols.generation(20), 5);
        assert_eq!(cols.generation(80), 5);
    }

    #[test]
    fn subject_to_the_right_uses_absolute_distance() {
        let cols = Columns {
            subject_depth: 16,
            parent_distance: 4,
            step: 4,
        };
        assert_eq!(cols.generation(12), 1);
        assert_eq!(cols.generation(4), 3);
    }

    #[test]
    fn layouts() {
        let lines = scan_lines("A\nS\nB", 4);
        assert_eq!(detect_layout(1, &ancestors(&lines, 1)), Layout::Sideways);
        assert_eq!(detect_layout(0, &ancestors(&lines, 0)), Layout::Outline);
        assert_eq!(detect_layout(2, &ancestors(&lines, 2)), Layout::Mirrored);
    }

    #[test]
    fn outline_sides_split_at_second_parent_row() {
        let text = "S\n    F\n        FF\n        FM\n    M\n        MF";
        let lines = scan_lines(text, 4);
        let anc = ancestors(&lines, 0);
        let cols = Columns::measure(0, &anc, None);
        let classified = classify(Layout::Outline, 0, &cols, &anc);
        let sides: Vec<Side> = classified.iter().map(|c| c.side).collect();
        use Side::*;
        assert_eq!(sides, vec![Paternal, Paternal, Paternal, Maternal, Maternal]);
    }

    #[test]
    fn outline_upper_branch_joins_the_parent_below_it() {
        let text = "\
S
        ┌── PGF
    ┌── FATHER
    │   │   ┌── PGMF
    │   └── PGM
    │   ┌── MGF
    └── MOTHER
        └── MGM";
        let lines = scan_lines(text, 4);
        let anc = ancestors(&lines, 0);
        let cols = Columns::measure(0, &anc, None);
        let classified = classify(Layout::Outline, 0, &cols, &anc);
        let sides: Vec<(&str, Side)> = classified
            .iter()
            .map(|c| (c.line.name(), c.side))
            .collect();
        use Side::*;
        assert_eq!(
            sides,
            vec![
                ("PGF", Paternal),
                ("FATHER", Paternal),
                ("PGMF", Paternal),
                ("PGM", Paternal),
                ("MGF", Maternal),
                ("MOTHER", Maternal),
                ("MGM", Maternal),
            ]
        );
    }

    #[test]
    fn mirrored_sides_follow_nearest_parent_row() {
        let text = "        FF\n    F\n        FM\n        MF\n    M\n        MM\nS";
        let lines = scan_lines(text, 4);
        let anc = ancestors(&lines, 6);
        let cols = Columns::measure(0, &anc, None);
        let classified = classify(Layout::Mirrored, 6, &cols, &anc);
        let sides: Vec<Side> = classified.iter().map(|c| c.side).collect();
        use Side::*;
        assert_eq!(
            sides,
            vec![Paternal, Paternal, Paternal, Maternal, Maternal, Maternal]
        );
    }

    #[test]
    fn hint_parity() {
        assert_eq!(next_index(0, Some(BranchHint::Lower)), 1);
        assert_eq!(next_index(1, Some(BranchHint::Lower)), 1);
        assert_eq!(next_index(1, Some(BranchHint::Upper)), 2);
        assert_eq!(next_index(2, Some(BranchHint::Upper)), 2);
        assert_eq!(next_index(3, None), 3);
    }
}
