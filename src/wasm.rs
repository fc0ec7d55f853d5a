//! Expose the diff and merge engine to WebAssembly.
use wasm_bindgen::prelude::*;

use crate::{Document, diff_documents};

#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc<'_> = wee_alloc::WeeAlloc::INIT;

/// WASM wrapper around `crate::diff`.
///
/// # Errors
///
/// If either document can't be read as markup.
#[wasm_bindgen(js_name = diffHtml)]
pub fn diff_html(old: &str, new: &str, concise: bool) -> Result<String, JsError> {
    set_panic_hook();

    Ok(crate::diff(old, new, concise)?)
}

/// WASM wrapper around `crate::merge`.
///
/// # Errors
///
/// If any of the documents can't be read as markup.
#[wasm_bindgen(js_name = mergeHtml)]
pub fn merge_html(original: &str, candidates: Vec<String>) -> Result<String, JsError> {
    set_panic_hook();

    Ok(crate::merge(original, &candidates)?)
}

/// Diffs two documents section by section and returns the `DocumentDiff`
/// as a JSON string.
///
/// # Errors
///
/// If either document can't be read as markup.
#[wasm_bindgen(js_name = diffDocuments)]
pub fn diff_documents_json(old: &str, new: &str, concise: bool) -> Result<String, JsError> {
    set_panic_hook();

    let diff = diff_documents(&Document::parse(old)?, &Document::parse(new)?, concise)?;

    Ok(serde_json::to_string(&diff)?)
}

fn set_panic_hook() {
    // https://github.com/rustwasm/console_error_panic_hook#readme
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}
