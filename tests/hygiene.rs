//! Source hygiene budgets across the workspace.
//!
//! Scans production sources of `lifeboard`, `canvas` and `frames` (test files
//! excluded) for panicking calls and silently discarded results. Budgets only
//! go down.

use std::fs;
use std::path::{Path, PathBuf};

const SOURCE_DIRS: [&str; 3] = ["src", "canvas/src", "frames/src"];

/// Pattern and the number of lines allowed to contain it.
const BUDGETS: [(&str, usize); 9] = [
    (".unwrap()", 0),
    (".expect(", 0),
    ("panic!(", 0),
    ("unreachable!(", 0),
    ("todo!(", 0),
    ("unimplemented!(", 0),
    ("let _ =", 0),
    (".ok()", 0),
    ("#[allow(dead_code)]", 0),
];

struct SourceFile {
    path: PathBuf,
    content: String,
}

fn source_files() -> Vec<SourceFile> {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"));
    let mut files = Vec::new();
    for dir in SOURCE_DIRS {
        collect(&root.join(dir), &mut files);
    }
    files
}

fn collect(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect(&path, out);
        } else if path.extension().is_some_and(|ext| ext == "rs")
            && !path.to_string_lossy().ends_with("_test.rs")
        {
            if let Ok(content) = fs::read_to_string(&path) {
                out.push(SourceFile { path, content });
            }
        }
    }
}

fn hits(files: &[SourceFile], pattern: &str) -> Vec<(String, usize)> {
    files
        .iter()
        .filter_map(|file| {
            let count = file.content.lines().filter(|line| line.contains(pattern)).count();
            (count > 0).then(|| (file.path.display().to_string(), count))
        })
        .collect()
}

#[test]
fn sources_are_found() {
    let files = source_files();
    assert!(files.iter().any(|file| file.path.ends_with("src/session.rs")));
    assert!(files.iter().any(|file| file.path.ends_with("canvas/src/camera.rs")));
    assert!(files.iter().any(|file| file.path.ends_with("frames/src/lib.rs")));
}

#[test]
fn budgets_hold() {
    let files = source_files();
    let mut report = String::new();
    for (pattern, budget) in BUDGETS {
        let found = hits(&files, pattern);
        let count: usize = found.iter().map(|(_, n)| n).sum();
        if count > budget {
            report.push_str(&format!("`{pattern}`: found {count}, budget {budget}\n"));
            for (path, n) in found {
                report.push_str(&format!("  {path}: {n}\n"));
            }
        }
    }
    assert!(report.is_empty(), "hygiene budgets exceeded:\n{report}");
}
