// detect/mod.rs — Function boundary detection: trait, dispatch, and shared helpers

pub mod c_family;
pub mod python;

use crate::language::Language;

/// A matched function definition with its resolved line range (1-based,
/// inclusive). Content tallies are filled in later by the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSpan {
    pub name: String,
    pub start_line: usize,
    pub end_line: usize,
}

/// One detection strategy per language. Adding a language means adding a
/// strategy, not editing a central branch.
pub trait FunctionDetector: Sync {
    fn detect(&self, content: &str) -> Vec<FunctionSpan>;
}

/// Strategy lookup. Languages without structural function syntax (markup,
/// data, plain text) return `None` and report zero functions.
pub fn detector_for(language: Language) -> Option<&'static dyn FunctionDetector> {
    match language {
        Language::C => Some(&c_family::C_DETECTOR),
        Language::Cpp | Language::CHeader => Some(&c_family::CPP_DETECTOR),
        Language::Java => Some(&c_family::JAVA_DETECTOR),
        Language::CSharp => Some(&c_family::CSHARP_DETECTOR),
        Language::Python => Some(&python::PythonDetector),
        _ => None,
    }
}

/// Byte-offset → 1-based line number lookup.
pub struct LineMap {
    offsets: Vec<usize>,
}

impl LineMap {
    pub fn new(content: &str) -> Self {
        let mut offsets = vec![0];
        for (i, b) in content.bytes().enumerate() {
            if b == b'\n' {
                offsets.push(i + 1);
            }
        }
        Self { offsets }
    }

    pub fn offset_to_line(&self, offset: usize) -> usize {
        match self.offsets.binary_search(&offset) {
            Ok(idx) => idx + 1,
            Err(idx) => idx,
        }
    }
}

/// Walk forward from `start_line` (1-based) counting braces character by
/// character. The function ends on the line where the running count first
/// returns to zero after having gone positive. An unbalanced body runs to the
/// last line of the file; that is recovery, not an error.
///
/// Braces inside string or character literals are counted too. Known
/// heuristic limit, kept as-is.
pub fn find_closing_brace(lines: &[&str], start_line: usize) -> usize {
    let mut depth: i32 = 0;
    let mut opened = false;

    for (i, line) in lines.iter().enumerate().skip(start_line.saturating_sub(1)) {
        for ch in line.chars() {
            match ch {
                '{' => {
                    depth += 1;
                    opened = true;
                }
                '}' => {
                    depth -= 1;
                    if opened && depth == 0 {
                        return i + 1;
                    }
                }
                _ => {}
            }
        }
    }
    lines.len()
}

/// Indentation width in columns, a tab counting as 4.
pub fn indent_cols(line: &str) -> usize {
    let mut cols = 0;
    for ch in line.chars() {
        match ch {
            ' ' => cols += 1,
            '\t' => cols += 4,
            _ => break,
        }
    }
    cols
}

/// Indentation-based end finder for `def` bodies: the function ends on the
/// line before the first non-blank line at or below the baseline indentation,
/// or at end-of-file.
pub fn find_indent_end(lines: &[&str], def_line: usize, base_cols: usize) -> usize {
    for (i, line) in lines.iter().enumerate().skip(def_line) {
        if line.trim().is_empty() {
            continue;
        }
        if indent_cols(line) <= base_cols {
            return i;
        }
    }
    lines.len()
}
