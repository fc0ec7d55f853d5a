use std::{env, fs, process};

use reconcile_html::{merge_tokens, tokenize};

/// Merges any number of edited versions of an HTML file against their
/// common base, in the spirit of git merge-file (https://git-scm.com/docs/git-merge-file).
/// Conflicting edits are kept side by side in brackets.
///
/// Run it with:
/// `cargo run --example merge-html base.html edited1.html edited2.html [...] > merged.html`
///
/// The exit code is the number of conflicts, capped at 127.
fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        eprintln!("Usage: merge-html <base> <edited>...");
        process::exit(128);
    }

    let base = read(&args[1]);
    let candidates: Vec<_> = args[2..].iter().map(|path| read(path)).collect();

    let merged = merge_tokens(&base, &candidates);

    print!("{}", merged.to_html());

    if merged.has_conflicts() {
        eprintln!("{} conflict(s)", merged.conflicts);
        process::exit(i32::try_from(merged.conflicts.min(127)).unwrap_or(127));
    }
}

fn read(path: &str) -> Vec<reconcile_html::Token> {
    let content = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading {path}: {e}");
        process::exit(128);
    });

    tokenize(&content).unwrap_or_else(|e| {
        eprintln!("Error parsing {path}: {e}");
        process::exit(128);
    })
}
