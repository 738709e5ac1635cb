//! Line pre-processing: tab expansion, connector filler, depth and names.
//!
//! Tree drawings mix spaces, tabs and box-drawing connectors freely. Every
//! connector glyph counts as one column of filler, so the depth of a line is
//! the column where its name starts.

/// Glyphs used to draw tree branches. Treated as whitespace-equivalent.
const FILLER: &[char] = &[
    // vertical bars
    '│', '|', '┃', '║', '╎', '┆', '╏', '┊',
    // corners and junctions
    '├', '└', '┌', '┬', '┴', '┼', '┤', '┐', '┘', '╰', '╭', '╮', '╯', '┗', '┏',
    '┣', '╚', '╔', '╠', '+', '`', '/', '\\',
    // horizontal strokes
    '─', '━', '═', '-', '–', '—', '>',
];

/// Corners opening an upper branch (the sire of the line below/right).
const UPPER_CORNERS: &[char] = &['┌', '╭', '┏', '╔', '/'];

/// Corners closing a lower branch (the dam).
const LOWER_CORNERS: &[char] = &['└', '╰', '┗', '╚', '`', '\\'];

/// Sire/dam evidence read from a line's corner glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchHint {
    Upper,
    Lower,
}

/// One non-blank input line with its computed depth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    pub text: String,
    /// Leading whitespace and connector glyphs (tabs expanded).
    pub prefix: String,
    /// Column of the first content character.
    pub depth: usize,
    pub index: usize,
    pub hint: Option<BranchHint>,
    pub is_subject: bool,
}

impl RawLine {
    /// Content after the prefix, trimmed.
    pub fn name(&self) -> &str {
        self.text.trim()
    }
}

pub fn is_filler(c: char) -> bool {
    c.is_whitespace() || FILLER.contains(&c)
}

/// Expand tabs to the next multiple of `tab_width` columns.
pub fn expand_tabs(line: &str, tab_width: usize) -> String {
    let tab_width = tab_width.max(1);
    let mut out = String::with_capacity(line.len());
    let mut column = 0;
    for c in line.chars() {
        if c == '\t' {
            let pad = tab_width - column % tab_width;
            out.extend(std::iter::repeat(' ').take(pad));
            column += pad;
        } else {
            out.push(c);
            column += 1;
        }
    }
    out
}

/// Split a line into its filler prefix and content.
///
/// Returns `None` for lines that are blank or pure tree decoration.
pub fn split_prefix(line: &str) -> Option<(&str, &str)> {
    let start = line.char_indices().find(|&(_, c)| !is_filler(c))?.0;
    Some((&line[..start], &line[start..]))
}

/// Sire/dam hint from the last corner glyph in a prefix.
pub fn branch_hint(prefix: &str) -> Option<BranchHint> {
    prefix.chars().rev().find_map(|c| {
        if UPPER_CORNERS.contains(&c) {
            Some(BranchHint::Upper)
        } else if LOWER_CORNERS.contains(&c) {
            Some(BranchHint::Lower)
        } else {
            None
        }
    })
}

/// Pre-process a text block into its meaningful lines.
///
/// Blank and decoration-only lines are dropped; indices count only the
/// surviving lines. Tabs are expanded in the prefix only, so the content
/// keeps its original text.
pub fn scan_lines(input: &str, tab_width: usize) -> Vec<RawLine> {
    input
        .lines()
        .filter_map(|line| {
            let (prefix, content) = split_prefix(line)?;
            let prefix = expand_tabs(prefix, tab_width);
            Some((prefix.chars().count(), prefix, content.trim_end().to_string()))
        })
        .enumerate()
        .map(|(index, (depth, prefix, text))| RawLine {
            hint: branch_hint(&prefix),
            text,
            prefix,
            depth,
            index,
            is_subject: false,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tabs_expand_to_tab_stops() {
        assert_eq!(expand_tabs("\tA", 4), "    A");
        assert_eq!(expand_tabs("ab\tc", 4), "ab  c");
        assert_eq!(expand_tabs("\t\tA", 2), "    A");
    }

    #[test]
    fn connectors_count_as_filler() {
        let lines = scan_lines("    │   └── ABUELA PATERNA", 4);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].depth, 12);
        assert_eq!(lines[0].name(), "ABUELA PATERNA");
    }

    #[test]
    fn ascii_connectors() {
        let lines = scan_lines("|   +-- SIRE\n    `-- DAM", 4);
        assert_eq!(lines[0].depth, 8);
        assert_eq!(lines[0].hint, None);
        assert_eq!(lines[1].depth, 8);
        assert_eq!(lines[1].hint, Some(BranchHint::Lower));
    }

    #[test]
    fn decoration_and_blank_lines_dropped() {
        let lines = scan_lines("A\n\n   \n    │\n  ──┤\nB", 4);
        let names: Vec<&str> = lines.iter().map(RawLine::name).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(lines[1].index, 1);
    }

    #[test]
    fn trailing_space_is_ignored() {
        let a = scan_lines("    └── PADRE", 4);
        let b = scan_lines("    └── PADRE   \t ", 4);
        assert_eq!(a, b);
    }

    #[test]
    fn hint_uses_last_corner() {
        assert_eq!(branch_hint("    ┌── "), Some(BranchHint::Upper));
        assert_eq!(branch_hint("│   └── "), Some(BranchHint::Lower));
        assert_eq!(branch_hint("├── "), None);
        assert_eq!(branch_hint("        "), None);
    }

    #[test]
    fn tabs_inside_a_name_are_kept() {
        let narrow = scan_lines("\t└── LA\tBELLE", 4);
        let wide = scan_lines("\t└── LA\tBELLE", 8);
        assert_eq!(narrow[0].name(), "LA\tBELLE");
        assert_eq!(wide[0].name(), "LA\tBELLE");
        assert_eq!(narrow[0].depth, 8);
        assert_eq!(wide[0].depth, 12);
    }

    #[test]
    fn annotations_stay_in_name() {
        let lines = scan_lines("  └── ÉTOILE (SIRE 12345)", 4);
        assert_eq!(lines[0].name(), "ÉTOILE (SIRE 12345)");
    }
}
