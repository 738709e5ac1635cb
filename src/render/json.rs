//! JSON renderer: structured output for tooling integration.
//!
//! Emits the per-generation view of the pedigree next to the flat field
//! map and the population summary.

use crate::mapper::{map_pedigree_to_fields, FlatFieldMap};
use crate::model::*;
use crate::render::Renderer;
use anyhow::{Context, Result};
use serde::Serialize;

pub struct JsonRenderer;

#[derive(Serialize)]
struct PedigreeJson<'a> {
    subject: &'a Subject,
    layout: Layout,
    step: usize,
    generation1: Generation1<'a>,
    generation2: Generation2<'a>,
    generation3: Generation3<'a>,
    generation4: AncestorLine<'a>,
    generation5: AncestorLine<'a>,
    fields: FlatFieldMap,
    summary: Vec<GenerationSummary>,
}

impl Renderer for JsonRenderer {
    fn render(&self, pedigree: &ParsedPedigree) -> Result<String> {
        let view = PedigreeJson {
            subject: &pedigree.subject,
            layout: pedigree.layout,
            step: pedigree.step,
            generation1: pedigree.generation1(),
            generation2: pedigree.generation2(),
            generation3: pedigree.generation3(),
            generation4: pedigree.generation4(),
            generation5: pedigree.generation5(),
            fields: map_pedigree_to_fields(pedigree),
            summary: pedigree.summary(),
        };
        let mut out = serde_json::to_string_pretty(&view).context("failed to serialize pedigree")?;
        out.push('\n');
        Ok(out)
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}
