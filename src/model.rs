//! Data model for a recovered pedigree: layout-agnostic.
//!
//! Ancestors are stored uniformly as `{side, generation, index}` slots. The
//! per-generation named/array shape used by the record schema only exists in
//! the view types returned by [`ParsedPedigree::generation1`] and friends.

use serde::Serialize;

/// Number of generations recorded above the subject.
pub const GENERATIONS: u8 = 5;

/// Total ancestor slots across both sides and all generations.
pub const SLOT_COUNT: usize = 62;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Paternal,
    Maternal,
}

impl Side {
    pub fn as_str(self) -> &'static str {
        match self {
            Side::Paternal => "paternal",
            Side::Maternal => "maternal",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

/// Drawing convention recognized for the input tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Sires drawn above the subject, dams below.
    Sideways,
    /// Subject on the first line, parents listed under their child.
    Outline,
    /// Subject on the last line, every ancestor above it.
    Mirrored,
}

/// A position in the pedigree: `2^(generation-1)` slots per side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Slot {
    pub side: Side,
    pub generation: u8,
    pub index: usize,
}

impl Slot {
    pub fn new(side: Side, generation: u8, index: usize) -> Option<Self> {
        if !(1..=GENERATIONS).contains(&generation) || index >= capacity(generation) {
            return None;
        }
        Some(Self {
            side,
            generation,
            index,
        })
    }

    /// Position in the canonical 62-entry field table.
    ///
    /// Generations are laid out back to back, paternal half first.
    pub fn canonical_index(self) -> usize {
        let per_side = capacity(self.generation);
        let base = 2 * per_side - 2;
        let side_offset = match self.side {
            Side::Paternal => 0,
            Side::Maternal => per_side,
        };
        base + side_offset + self.index
    }

    /// Inverse of [`Slot::canonical_index`].
    pub fn from_canonical_index(position: usize) -> Option<Self> {
        let mut base = 0;
        for generation in 1..=GENERATIONS {
            let per_side = capacity(generation);
            if position < base + 2 * per_side {
                let offset = position - base;
                let side = if offset < per_side {
                    Side::Paternal
                } else {
                    Side::Maternal
                };
                return Slot::new(side, generation, offset % per_side);
            }
            base += 2 * per_side;
        }
        None
    }

    /// Every slot in canonical order.
    pub fn all() -> impl Iterator<Item = Slot> {
        (0..SLOT_COUNT).filter_map(Slot::from_canonical_index)
    }
}

/// Slots per side for a generation (1, 2, 4, 8, 16).
pub fn capacity(generation: u8) -> usize {
    1usize << generation.saturating_sub(1)
}

/// The animal the pedigree belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subject {
    pub name: String,
    pub breed: String,
    pub sex: Sex,
    pub birth_year: u16,
    pub line_index: usize,
    pub depth: usize,
}

/// A placed ancestor together with the text line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ancestor {
    pub name: String,
    pub line_index: usize,
}

/// Complete recovered genealogy rooted at one subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPedigree {
    pub subject: Subject,
    pub layout: Layout,
    /// Column width of one generation step used for this document.
    pub step: usize,
    slots: Vec<Option<Ancestor>>,
}

impl ParsedPedigree {
    pub fn new(subject: Subject, layout: Layout, step: usize) -> Self {
        Self {
            subject,
            layout,
            step,
            slots: vec![None; SLOT_COUNT],
        }
    }

    /// Place an ancestor. Blank names are ignored; returns false if the
    /// slot was already taken.
    pub fn place(&mut self, slot: Slot, name: &str, line_index: usize) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        let entry = &mut self.slots[slot.canonical_index()];
        if entry.is_some() {
            return false;
        }
        *entry = Some(Ancestor {
            name: name.to_string(),
            line_index,
        });
        true
    }

    pub fn ancestor(&self, slot: Slot) -> Option<&Ancestor> {
        self.slots[slot.canonical_index()].as_ref()
    }

    pub fn get(&self, slot: Slot) -> Option<&str> {
        self.ancestor(slot).map(|a| a.name.as_str())
    }

    pub fn is_occupied(&self, slot: Slot) -> bool {
        self.slots[slot.canonical_index()].is_some()
    }

    /// Populated slots in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Slot, &Ancestor)> {
        Slot::all().filter_map(move |slot| self.ancestor(slot).map(|a| (slot, a)))
    }

    pub fn ancestor_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    fn named(&self, side: Side, generation: u8, index: usize) -> Option<&str> {
        Slot::new(side, generation, index).and_then(|slot| self.get(slot))
    }

    fn line(&self, generation: u8) -> AncestorLine<'_> {
        let collect = |side: Side| -> Vec<Option<&str>> {
            (0..capacity(generation))
                .map(|index| self.named(side, generation, index))
                .collect()
        };
        AncestorLine {
            paternal_line: collect(Side::Paternal),
            maternal_line: collect(Side::Maternal),
        }
    }

    /// The generation-1 ancestor on one side.
    pub fn parent(&self, side: Side) -> Option<&str> {
        self.named(side, 1, 0)
    }

    pub fn generation1(&self) -> Generation1<'_> {
        Generation1 {
            father: self.parent(Side::Paternal),
            mother: self.parent(Side::Maternal),
        }
    }

    pub fn generation2(&self) -> Generation2<'_> {
        Generation2 {
            paternal_grandfather: self.named(Side::Paternal, 2, 0),
            paternal_grandmother: self.named(Side::Paternal, 2, 1),
            maternal_grandfather: self.named(Side::Maternal, 2, 0),
            maternal_grandmother: self.named(Side::Maternal, 2, 1),
        }
    }

    pub fn generation3(&self) -> Generation3<'_> {
        Generation3 {
            paternal_grandfather_father: self.named(Side::Paternal, 3, 0),
            paternal_grandfather_mother: self.named(Side::Paternal, 3, 1),
            paternal_grandmother_father: self.named(Side::Paternal, 3, 2),
            paternal_grandmother_mother: self.named(Side::Paternal, 3, 3),
            maternal_grandfather_father: self.named(Side::Maternal, 3, 0),
            maternal_grandfather_mother: self.named(Side::Maternal, 3, 1),
            maternal_grandmother_father: self.named(Side::Maternal, 3, 2),
            maternal_grandmother_mother: self.named(Side::Maternal, 3, 3),
        }
    }

    /// Great-great-grandparents, 8 per side.
    pub fn generation4(&self) -> AncestorLine<'_> {
        self.line(4)
    }

    /// Great-great-great-grandparents, 16 per side.
    pub fn generation5(&self) -> AncestorLine<'_> {
        self.line(5)
    }

    /// Per-generation population counts, as shown in a preview.
    pub fn summary(&self) -> Vec<GenerationSummary> {
        (1..=GENERATIONS)
            .map(|generation| {
                let mut summary = GenerationSummary {
                    generation,
                    capacity: 2 * capacity(generation),
                    paternal: 0,
                    maternal: 0,
                    missing: Vec::new(),
                };
                for slot in Slot::all().filter(|s| s.generation == generation) {
                    match (self.is_occupied(slot), slot.side) {
                        (true, Side::Paternal) => summary.paternal += 1,
                        (true, Side::Maternal) => summary.maternal += 1,
                        (false, _) => summary.missing.push(crate::mapper::field_name(slot)),
                    }
                }
                summary
            })
            .collect()
    }
}

/// Direct parents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Generation1<'a> {
    pub father: Option<&'a str>,
    pub mother: Option<&'a str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Generation2<'a> {
    pub paternal_grandfather: Option<&'a str>,
    pub paternal_grandmother: Option<&'a str>,
    pub maternal_grandfather: Option<&'a str>,
    pub maternal_grandmother: Option<&'a str>,
}

/// Great-grandparents, named after the grandparent they descend from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Generation3<'a> {
    pub paternal_grandfather_father: Option<&'a str>,
    pub paternal_grandfather_mother: Option<&'a str>,
    pub paternal_grandmother_father: Option<&'a str>,
    pub paternal_grandmother_mother: Option<&'a str>,
    pub maternal_grandfather_father: Option<&'a str>,
    pub maternal_grandfather_mother: Option<&'a str>,
    pub maternal_grandmother_father: Option<&'a str>,
    pub maternal_grandmother_mother: Option<&'a str>,
}

/// Ordered, unnamed ancestors of one generation. Both lines are always
/// full length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AncestorLine<'a> {
    pub paternal_line: Vec<Option<&'a str>>,
    pub maternal_line: Vec<Option<&'a str>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationSummary {
    pub generation: u8,
    /// Slots across both sides.
    pub capacity: usize,
    pub paternal: usize,
    pub maternal: usize,
    /// Canonical field names of the empty slots.
    pub missing: Vec<&'static str>,
}

impl GenerationSummary {
    pub fn filled(&self) -> usize {
        self.paternal + self.maternal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subject() -> Subject {
        Subject {
            name: "TEST".to_string(),
            breed: "Baudet du Poitou".to_string(),
            sex: Sex::Male,
            birth_year: 2021,
            line_index: 0,
            depth: 0,
        }
    }

    #[test]
    fn canonical_index_covers_all_slots_once() {
        let positions: Vec<usize> = Slot::all().map(|s| s.canonical_index()).collect();
        assert_eq!(positions, (0..SLOT_COUNT).collect::<Vec<_>>());
    }

    #[test]
    fn canonical_index_layout() {
        let slot = |side, g, i| Slot::new(side, g, i).unwrap();
        assert_eq!(slot(Side::Paternal, 1, 0).canonical_index(), 0);
        assert_eq!(slot(Side::Maternal, 1, 0).canonical_index(), 1);
        assert_eq!(slot(Side::Maternal, 2, 1).canonical_index(), 5);
        assert_eq!(slot(Side::Paternal, 4, 0).canonical_index(), 14);
        assert_eq!(slot(Side::Maternal, 5, 15).canonical_index(), 61);
    }

    #[test]
    fn slot_rejects_out_of_range() {
        assert!(Slot::new(Side::Paternal, 0, 0).is_none());
        assert!(Slot::new(Side::Paternal, 6, 0).is_none());
        assert!(Slot::new(Side::Paternal, 1, 1).is_none());
        assert!(Slot::new(Side::Maternal, 5, 16).is_none());
    }

    #[test]
    fn place_keeps_first_and_ignores_blank() {
        let mut p = ParsedPedigree::new(subject(), Layout::Sideways, 4);
        let father = Slot::new(Side::Paternal, 1, 0).unwrap();
        assert!(!p.place(father, "   ", 1));
        assert!(p.place(father, "  SIRE  ", 1));
        assert!(!p.place(father, "OTHER", 2));
        assert_eq!(p.generation1().father, Some("SIRE"));
        assert_eq!(p.ancestor_count(), 1);
    }

    #[test]
    fn deep_lines_are_full_length() {
        let p = ParsedPedigree::new(subject(), Layout::Sideways, 4);
        let g4 = p.generation4();
        let g5 = p.generation5();
        assert_eq!(g4.paternal_line.len(), 8);
        assert_eq!(g4.maternal_line.len(), 8);
        assert_eq!(g5.paternal_line.len(), 16);
        assert_eq!(g5.maternal_line.len(), 16);
        assert!(g5.maternal_line.iter().all(Option::is_none));
    }

    #[test]
    fn summary_counts_and_missing() {
        let mut p = ParsedPedigree::new(subject(), Layout::Sideways, 4);
        p.place(Slot::new(Side::Paternal, 1, 0).unwrap(), "SIRE", 1);
        p.place(Slot::new(Side::Maternal, 2, 1).unwrap(), "GRANDDAM", 3);
        let summary = p.summary();
        assert_eq!(summary.len(), 5);
        assert_eq!(summary[0].filled(), 1);
        assert_eq!(summary[0].missing, vec!["mother_id"]);
        assert_eq!(summary[1].maternal, 1);
        assert_eq!(summary[1].missing.len(), 3);
        assert_eq!(summary[4].capacity, 32);
        assert_eq!(summary[4].missing.len(), 32);
    }
}
