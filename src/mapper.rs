//! Flatten a pedigree into the record schema's canonical ancestor fields.

use crate::model::{ParsedPedigree, Slot, SLOT_COUNT};
use serde::Serialize;
use std::collections::BTreeMap;

/// Canonical field names, indexed by [`Slot::canonical_index`].
pub const FIELD_NAMES: [&str; SLOT_COUNT] = [
    // generation 1
    "father_id",
    "mother_id",
    // generation 2
    "paternal_grandfather_id",
    "paternal_grandmother_id",
    "maternal_grandfather_id",
    "maternal_grandmother_id",
    // generation 3
    "paternal_gf_father_id",
    "paternal_gf_mother_id",
    "paternal_gm_father_id",
    "paternal_gm_mother_id",
    "maternal_gf_father_id",
    "maternal_gf_mother_id",
    "maternal_gm_father_id",
    "maternal_gm_mother_id",
    // generation 4: great-grandparent, then grandparent, then sire (p) or dam (m)
    "gen4_paternal_ggfgf_p",
    "gen4_paternal_ggfgf_m",
    "gen4_paternal_ggmgf_p",
    "gen4_paternal_ggmgf_m",
    "gen4_paternal_ggfgm_p",
    "gen4_paternal_ggfgm_m",
    "gen4_paternal_ggmgm_p",
    "gen4_paternal_ggmgm_m",
    "gen4_maternal_ggfgf_p",
    "gen4_maternal_ggfgf_m",
    "gen4_maternal_ggmgf_p",
    "gen4_maternal_ggmgf_m",
    "gen4_maternal_ggfgm_p",
    "gen4_maternal_ggfgm_m",
    "gen4_maternal_ggmgm_p",
    "gen4_maternal_ggmgm_m",
    // generation 5
    "gen5_paternal_1",
    "gen5_paternal_2",
    "gen5_paternal_3",
    "gen5_paternal_4",
    "gen5_paternal_5",
    "gen5_paternal_6",
    "gen5_paternal_7",
    "gen5_paternal_8",
    "gen5_paternal_9",
    "gen5_paternal_10",
    "gen5_paternal_11",
    "gen5_paternal_12",
    "gen5_paternal_13",
    "gen5_paternal_14",
    "gen5_paternal_15",
    "gen5_paternal_16",
    "gen5_maternal_1",
    "gen5_maternal_2",
    "gen5_maternal_3",
    "gen5_maternal_4",
    "gen5_maternal_5",
    "gen5_maternal_6",
    "gen5_maternal_7",
    "gen5_maternal_8",
    "gen5_maternal_9",
    "gen5_maternal_10",
    "gen5_maternal_11",
    "gen5_maternal_12",
    "gen5_maternal_13",
    "gen5_maternal_14",
    "gen5_maternal_15",
    "gen5_maternal_16",
];

pub fn field_name(slot: Slot) -> &'static str {
    FIELD_NAMES[slot.canonical_index()]
}

/// Canonical field name -> ancestor name. Only populated slots appear.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FlatFieldMap(BTreeMap<&'static str, String>);

impl FlatFieldMap {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Fields in canonical slot order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        FIELD_NAMES
            .iter()
            .filter_map(move |&field| self.get(field).map(|name| (field, name)))
    }
}

/// Emit one field per populated slot.
pub fn map_pedigree_to_fields(pedigree: &ParsedPedigree) -> FlatFieldMap {
    FlatFieldMap(
        pedigree
            .iter()
            .map(|(slot, ancestor)| (field_name(slot), ancestor.name.trim().to_string()))
            .collect(),
    )
}
