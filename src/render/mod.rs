//! Renderer module: trait-based format dispatch.

pub mod fields;
pub mod json;
pub mod preview;

use crate::model::ParsedPedigree;
use anyhow::{anyhow, Result};

/// Trait for rendering a pedigree into a specific output format.
pub trait Renderer {
    fn render(&self, pedigree: &ParsedPedigree) -> Result<String>;
    fn file_extension(&self) -> &str;
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str) -> Result<Box<dyn Renderer>> {
    match format {
        "text" | "preview" => Ok(Box::new(preview::PreviewRenderer)),
        "fields" => Ok(Box::new(fields::FieldsRenderer)),
        "json" => Ok(Box::new(json::JsonRenderer)),
        _ => Err(anyhow!(
            "unknown format: {}. Use text, fields, or json",
            format
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_formats() {
        assert_eq!(create_renderer("text").unwrap().file_extension(), "txt");
        assert_eq!(create_renderer("fields").unwrap().file_extension(), "env");
        assert_eq!(create_renderer("json").unwrap().file_extension(), "json");
    }

    #[test]
    fn unknown_format_is_an_error() {
        let err = create_renderer("html").err().unwrap();
        assert!(err.to_string().contains("unknown format: html"));
    }
}
