// detect/python.rs — Indentation-based function detection for Python

use once_cell::sync::Lazy;
use regex::Regex;

use super::{find_indent_end, indent_cols, FunctionDetector, FunctionSpan, LineMap};

static RE_DEF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?m)^[ \t]*(?:async\s+)?def\s+(?P<name>[A-Za-z_][A-Za-z0-9_]*)\s*\((?P<params>[^)]*)\)\s*(?:->[^:]+)?:",
    )
    .expect("Python def regex")
});

/// Matches `def` headers and resolves the body end by indentation decrease:
/// the function ends on the line before the first non-blank line whose
/// indentation (tab = 4 columns) is at or below the `def` line's own.
pub struct PythonDetector;

impl FunctionDetector for PythonDetector {
    fn detect(&self, content: &str) -> Vec<FunctionSpan> {
        let lines: Vec<&str> = content.lines().collect();
        let map = LineMap::new(content);
        let mut spans = Vec::new();

        for cap in RE_DEF.captures_iter(content) {
            let m = cap.get(0).expect("capture 0 always present");
            let start_line = map.offset_to_line(m.start());
            let base = lines
                .get(start_line - 1)
                .map(|l| indent_cols(l))
                .unwrap_or(0);
            let end_line = find_indent_end(&lines, start_line, base);
            spans.push(FunctionSpan {
                name: cap.name("name").map_or("?", |n| n.as_str()).to_string(),
                start_line,
                end_line,
            });
        }
        spans
    }
}
