//! Plain-text preview: subject, per-generation counts and missing slots.

use crate::mapper::field_name;
use crate::model::{ParsedPedigree, Sex};
use crate::render::Renderer;
use anyhow::Result;

pub struct PreviewRenderer;

/// Generations up to this one list their missing slots by name; deeper
/// ones only give a count.
const LIST_MISSING_UP_TO: u8 = 3;

impl Renderer for PreviewRenderer {
    fn render(&self, pedigree: &ParsedPedigree) -> Result<String> {
        let subject = &pedigree.subject;
        let sex = match subject.sex {
            Sex::Male => "male",
            Sex::Female => "female",
        };

        let mut out = String::new();
        out.push_str(&format!(
            "{} ({}, {}, {})\n",
            subject.name, subject.breed, sex, subject.birth_year
        ));
        out.push_str(&format!(
            "{} ancestors, {:?} layout, {} columns per generation\n",
            pedigree.ancestor_count(),
            pedigree.layout,
            pedigree.step
        ));

        for summary in pedigree.summary() {
            out.push_str(&format!(
                "\nGeneration {}: {}/{} (paternal {}, maternal {})\n",
                summary.generation,
                summary.filled(),
                summary.capacity,
                summary.paternal,
                summary.maternal
            ));
            for (slot, ancestor) in pedigree.iter().filter(|(s, _)| s.generation == summary.generation) {
                out.push_str(&format!("  {}: {}\n", field_name(slot), ancestor.name));
            }
            if summary.missing.is_empty() {
                continue;
            }
            if summary.generation <= LIST_MISSING_UP_TO {
                out.push_str(&format!("  missing: {}\n", summary.missing.join(", ")));
            } else {
                out.push_str(&format!("  missing: {} slots\n", summary.missing.len()));
            }
        }
        Ok(out)
    }

    fn file_extension(&self) -> &str {
        "txt"
    }
}
