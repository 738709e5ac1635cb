//! pedigree-tree: recover a 5-generation animal pedigree from an indented
//! ASCII tree.
//!
//! The input is free-form text: hand-typed, pasted from a PDF, or extracted
//! from a scan. One line carries the subject's `(breed, sex, year)`
//! annotation; every other line is an ancestor whose generation comes from
//! its indentation and whose lineage comes from its position relative to
//! the subject.
//!
//! ```
//! use pedigree_tree::{map_pedigree_to_fields, parse_ascii_tree_pedigree};
//!
//! let text = "\
//! LASCAUX DU VERN  (Baudet du Poitou, Mâle, 2021)
//!     └── PADRE
//!     └── MADRE
//! ";
//! let pedigree = parse_ascii_tree_pedigree(text).unwrap();
//! let fields = map_pedigree_to_fields(&pedigree);
//! assert_eq!(fields.get("father_id"), Some("PADRE"));
//! assert_eq!(fields.get("mother_id"), Some("MADRE"));
//! ```

pub mod line;
pub mod mapper;
pub mod model;
pub mod parser;
pub mod render;
pub mod subject;

pub use mapper::{map_pedigree_to_fields, FlatFieldMap};
pub use model::{Layout, ParsedPedigree, Sex, Side, Slot};
pub use parser::{parse_ascii_tree_pedigree, ParseError, ParserConfig, PedigreeParser};
