//! Flat field renderer: one `field=name` line per populated slot.
//!
//! The shape a record editor consumes: canonical field names in slot order,
//! nothing for empty slots.

use crate::mapper::map_pedigree_to_fields;
use crate::model::ParsedPedigree;
use crate::render::Renderer;
use anyhow::Result;

pub struct FieldsRenderer;

impl Renderer for FieldsRenderer {
    fn render(&self, pedigree: &ParsedPedigree) -> Result<String> {
        let mut out = String::new();
        for (field, name) in map_pedigree_to_fields(pedigree).iter() {
            out.push_str(field);
            out.push('=');
            out.push_str(name);
            out.push('\n');
        }
        Ok(out)
    }

    fn file_extension(&self) -> &str {
        "env"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_ascii_tree_pedigree;

    #[test]
    fn renders_populated_fields_only() {
        let text = "ROOT (Poitou, Male, 2020)\n    SIRE\n        └── GRANDDAM\n    DAM\n";
        let p = parse_ascii_tree_pedigree(text).unwrap();
        let out = FieldsRenderer.render(&p).unwrap();
        assert_eq!(
            out,
            "father_id=SIRE\nmother_id=DAM\npaternal_grandmother_id=GRANDDAM\n"
        );
    }
}
