//! Structural diffing and merging of HTML fragments.
//!
//! Documents are flattened into tokens which remember the elements open
//! around them. Diffs, section diffs and merges are computed over these
//! tokens and rendered back into well-formed markup.
//!
//! ```
//! use reconcile_html::{diff, merge};
//!
//! assert_eq!(
//!     diff("<p>Hello cruel world</p>", "<p>Hello world</p>", false).unwrap(),
//!     "<p>Hello <del>cruel </del>world</p>"
//! );
//!
//! assert_eq!(
//!     merge("<p>X</p>", &["<p>Y</p>", "<p>Z</p>"]).unwrap(),
//!     "<p>[Y][Z]</p>"
//! );
//! ```

mod alignment;
mod consts;
mod diff;
mod errors;
mod merge;
mod options;
mod sections;
mod serializer;
mod tokenizer;
mod utils;

pub use alignment::{
    lcs_opcodes,
    opcode::{Opcode, OpcodeKind},
    opcodes,
    sequence_matcher::{Alignable, SequenceMatcher},
};
pub use diff::{
    annotate,
    annotated_token::{AnnotatedToken, Change},
    diff, diff_with_options, render_annotated,
};
pub use errors::MarkupError;
pub use merge::{MergedTokens, merge, merge_tokens};
pub use options::DiffOptions;
pub use sections::{
    document::{Document, Section},
    document_diff::{DocumentDiff, SummaryDiff, diff_documents, diff_documents_with_options},
    section_diff::{SectionChange, SectionDiff, diff_sections, diff_sections_with_options},
};
pub use serializer::{render, tag_synthesizer::insert_tag};
pub use tokenizer::{
    element::{Attribute, Context, Element, is_void_element},
    token::{ComparisonKey, Token, TokenKind},
    tokenize,
};

#[cfg(feature = "wasm")]
pub mod wasm;
