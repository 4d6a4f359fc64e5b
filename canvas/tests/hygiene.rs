//! Hygiene: source-level checks on the overlay crate.
//!
//! Each antipattern has a budget of zero in production code (`src/`, minus
//! `_test.rs` files). Browser bindings are confined to the engine facade and
//! the canvas renderer so the editing core stays testable on native targets.
#![allow(clippy::absurd_extreme_comparisons)]

use std::fs;
use std::path::Path;

struct SourceFile {
    path: String,
    content: String,
}

struct Budget {
    pattern: &'static str,
    max: usize,
    why: &'static str,
}

// Panics crash the overlay and take the host page's event loop with them.
const PANICS: &[Budget] = &[
    Budget { pattern: ".unwrap()", max: 0, why: "propagate or match instead" },
    Budget { pattern: ".expect(", max: 0, why: "propagate or match instead" },
    Budget { pattern: "panic!(", max: 0, why: "handlers are total" },
    Budget { pattern: "unreachable!(", max: 0, why: "handlers are total" },
    Budget { pattern: "todo!(", max: 0, why: "no stubs in shipped code" },
    Budget { pattern: "unimplemented!(", max: 0, why: "no stubs in shipped code" },
];

// Silent loss discards errors without inspecting them.
const DISCARDS: &[Budget] = &[
    Budget { pattern: "let _ =", max: 0, why: "log or propagate the error" },
    Budget { pattern: ".ok()", max: 0, why: "log or propagate the error" },
];

const STRUCTURE: &[Budget] = &[Budget { pattern: "#[allow(dead_code)]", max: 0, why: "delete unused code" }];

/// Files allowed to name browser types directly.
const BROWSER_FILES: &[&str] = &["engine.rs", "render.rs"];

fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect_rs_files(Path::new("src"), &mut files);
    files
}

fn collect_rs_files(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_rs_files(&path, out);
            continue;
        }
        let path_str = path.to_string_lossy().to_string();
        if !path_str.ends_with(".rs") || path_str.ends_with("_test.rs") {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path) {
            out.push(SourceFile { path: path_str, content });
        }
    }
}

fn hits_for(files: &[SourceFile], pattern: &str) -> Vec<(String, usize)> {
    files
        .iter()
        .filter_map(|file| {
            let count = file.content.lines().filter(|line| line.contains(pattern)).count();
            (count > 0).then(|| (file.path.clone(), count))
        })
        .collect()
}

fn check(budgets: &[Budget]) {
    let files = source_files();
    assert!(!files.is_empty(), "no sources found; run from the crate root");

    let mut failures = Vec::new();
    for budget in budgets {
        let hits = hits_for(&files, budget.pattern);
        let count: usize = hits.iter().map(|(_, c)| c).sum();
        if count > budget.max {
            let listing = hits
                .iter()
                .map(|(path, c)| format!("    {path}: {c}"))
                .collect::<Vec<_>>()
                .join("\n");
            failures.push(format!(
                "  `{}`: found {count}, max {} ({})\n{listing}",
                budget.pattern, budget.max, budget.why
            ));
        }
    }
    assert!(failures.is_empty(), "budget exceeded:\n{}", failures.join("\n"));
}

#[test]
fn panic_budget() {
    check(PANICS);
}

#[test]
fn silent_discard_budget() {
    check(DISCARDS);
}

#[test]
fn structure_budget() {
    check(STRUCTURE);
}

#[test]
fn browser_bindings_stay_in_facade_and_renderer() {
    let offenders: Vec<String> = source_files()
        .into_iter()
        .filter(|f| !BROWSER_FILES.iter().any(|name| f.path.ends_with(name)))
        .filter(|f| f.content.contains("web_sys") || f.content.contains("wasm_bindgen"))
        .map(|f| f.path)
        .collect();
    assert!(offenders.is_empty(), "browser bindings outside {BROWSER_FILES:?}: {offenders:?}");
}

/// Crate names from the manifest's `[dependencies]` table, as they appear in paths.
fn runtime_dependencies() -> Vec<String> {
    let manifest = fs::read_to_string("Cargo.toml").unwrap_or_default();
    manifest
        .lines()
        .skip_while(|line| line.trim() != "[dependencies]")
        .skip(1)
        .take_while(|line| !line.trim_start().starts_with('['))
        .filter_map(|line| line.split_once('='))
        .map(|(name, _)| name.trim().replace('-', "_"))
        .filter(|name| !name.is_empty())
        .collect()
}

#[test]
fn runtime_dependencies_are_used_outside_tests() {
    let deps = runtime_dependencies();
    assert!(!deps.is_empty(), "no [dependencies] found; run from the crate root");

    let files = source_files();
    let unused: Vec<&String> = deps
        .iter()
        .filter(|dep| !files.iter().any(|f| f.content.contains(dep.as_str())))
        .collect();
    assert!(unused.is_empty(), "test-only crates belong in [dev-dependencies]: {unused:?}");
}
