//! Header-delimited views of a document, diffed one section at a time.

pub mod document;
pub mod document_diff;
pub mod section_diff;
