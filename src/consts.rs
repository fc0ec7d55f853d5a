/// Equal runs shorter than this many tokens are absorbed into the
/// surrounding change by the concise renderer.
pub const DEFAULT_STRETCH_THRESHOLD: usize = 5;

/// Upper bound on the number of stretching passes of the concise renderer.
pub const DEFAULT_MAX_STRETCH_DEPTH: usize = 3;

/// Number of changed parts after which a document diff counts as significant.
pub const DEFAULT_SIGNIFICANT_EDIT_COUNT: usize = 4;

pub const DEFAULT_INSERTED_TAG: &str = "ins";
pub const DEFAULT_DELETED_TAG: &str = "del";
pub const DEFAULT_OMISSION_PLACEHOLDER: &str = "[…]";

pub const OPENING_BRACKET: &str = "[";
pub const CLOSING_BRACKET: &str = "]";

/// Elements that never have children or a closing tag.
pub const VOID_ELEMENTS: [&str; 13] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

pub const HEADER_ELEMENTS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];
