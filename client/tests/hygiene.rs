//! Hygiene budgets for production code.
//!
//! Scans the production sources of `client` and the two crates it builds on
//! for patterns that crash the process or drop errors unseen. Each pattern has
//! a budget; the budget only ever goes down.

use std::fs;
use std::path::Path;

// Crash the process.
const MAX_UNWRAP: usize = 0;
const MAX_EXPECT: usize = 0;
const MAX_PANIC: usize = 0;
const MAX_UNREACHABLE: usize = 0;
const MAX_TODO: usize = 0;
const MAX_UNIMPLEMENTED: usize = 0;

// Drop an error without looking at it.
const MAX_SILENT_DISCARD: usize = 0;
const MAX_DOT_OK: usize = 0;

// Style / structure.
const MAX_ALLOW_DEAD_CODE: usize = 0;

struct SourceFile {
    path: String,
    content: String,
}

const SOURCE_ROOTS: [&str; 3] = ["src", "../drawing/src", "../frames/src"];

/// Production `.rs` files under every source root, `_test.rs` files excluded.
fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    for root in SOURCE_ROOTS {
        collect_rs_files(Path::new(root), &mut files);
    }
    assert!(!files.is_empty(), "no sources found; run from the client crate");
    files
}

fn collect_rs_files(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            let name = path.file_name().unwrap_or_default().to_string_lossy();
            if name == "target" || name == "tests" {
                continue;
            }
            collect_rs_files(&path, out);
        } else if path.extension().is_some_and(|e| e == "rs") {
            let path_str = path.to_string_lossy().to_string();
            if path_str.ends_with("_test.rs") {
                continue;
            }
            if let Ok(content) = fs::read_to_string(&path) {
                out.push(SourceFile { path: path_str, content });
            }
        }
    }
}

fn count_in_source(files: &[SourceFile], pattern: &str) -> Vec<(String, usize)> {
    files
        .iter()
        .filter_map(|file| {
            let count = file
                .content
                .lines()
                .filter(|line| line.contains(pattern))
                .count();
            (count > 0).then(|| (file.path.clone(), count))
        })
        .collect()
}

fn total(hits: &[(String, usize)]) -> usize {
    hits.iter().map(|(_, c)| c).sum()
}

fn format_hits(hits: &[(String, usize)]) -> String {
    hits.iter()
        .map(|(path, count)| format!("  {path}: {count}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn assert_within_budget(pattern: &str, max: usize) {
    let files = source_files();
    let hits = count_in_source(&files, pattern);
    let count = total(&hits);
    assert!(
        count <= max,
        "`{pattern}` budget exceeded: found {count}, max {max}.\n{}",
        format_hits(&hits)
    );
}

#[test]
fn unwrap_budget() {
    assert_within_budget(".unwrap()", MAX_UNWRAP);
}

#[test]
fn expect_budget() {
    assert_within_budget(".expect(", MAX_EXPECT);
}

#[test]
fn panic_budget() {
    assert_within_budget("panic!(", MAX_PANIC);
}

#[test]
fn unreachable_budget() {
    assert_within_budget("unreachable!(", MAX_UNREACHABLE);
}

#[test]
fn todo_budget() {
    assert_within_budget("todo!(", MAX_TODO);
}

#[test]
fn unimplemented_budget() {
    assert_within_budget("unimplemented!(", MAX_UNIMPLEMENTED);
}

#[test]
fn silent_discard_budget() {
    assert_within_budget("let _ =", MAX_SILENT_DISCARD);
}

#[test]
fn dot_ok_budget() {
    assert_within_budget(".ok()", MAX_DOT_OK);
}

#[test]
fn allow_dead_code_budget() {
    assert_within_budget("#[allow(dead_code)]", MAX_ALLOW_DEAD_CODE);
}
