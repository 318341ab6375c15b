//! Source hygiene for the client crate.
//!
//! The session runs inside the page; a panic takes the page down and a
//! discarded error hides a dead connection. Every production file under
//! `src/` (test files excluded) is scanned line by line against the budgets
//! below. `.ok()` is allowed twice for the optional `window.location`
//! lookups in the socket driver.

use std::fs;
use std::path::{Path, PathBuf};

/// `(pattern, max occurrences)`.
const BUDGETS: &[(&str, usize)] = &[
    (".unwrap()", 0),
    (".expect(", 0),
    ("panic!(", 0),
    ("unreachable!(", 0),
    ("todo!(", 0),
    ("unimplemented!(", 0),
    ("let _ =", 0),
    (".ok()", 2),
    ("#[allow(dead_code)]", 0),
];

fn production_sources(dir: &Path, out: &mut Vec<(PathBuf, String)>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for path in entries.flatten().map(|e| e.path()) {
        if path.is_dir() {
            production_sources(&path, out);
        } else if path.extension().is_some_and(|e| e == "rs")
            && !path.to_string_lossy().ends_with("_test.rs")
        {
            if let Ok(content) = fs::read_to_string(&path) {
                out.push((path, content));
            }
        }
    }
}

#[test]
fn sources_stay_within_budgets() {
    let mut files = Vec::new();
    production_sources(Path::new("src"), &mut files);
    assert!(!files.is_empty(), "no sources found under src/");

    let mut failures = Vec::new();
    for (pattern, max) in BUDGETS {
        let hits: Vec<String> = files
            .iter()
            .flat_map(|(path, content)| {
                content
                    .lines()
                    .enumerate()
                    .filter(|(_, line)| line.contains(pattern))
                    .map(move |(n, _)| format!("  {}:{}", path.display(), n + 1))
            })
            .collect();
        if hits.len() > *max {
            failures.push(format!("{pattern} found {} times, max {max}\n{}", hits.len(), hits.join("\n")));
        }
    }
    assert!(failures.is_empty(), "hygiene budgets exceeded:\n{}", failures.join("\n"));
}
