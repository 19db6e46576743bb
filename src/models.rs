// models.rs — Core data structures for scan results

use serde::ser::SerializeStruct;
use serde::Serializer;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::classify::LineTally;
use crate::language::Language;

/// One detected function or method. Immutable once its end boundary and
/// content tally are computed.
#[derive(Debug, Clone)]
pub struct FunctionRecord {
    pub name: String,
    /// Path of the containing file, relative to the scan root.
    pub file_name: String,
    pub language: Language,
    /// 1-based, inclusive.
    pub start_line: usize,
    pub end_line: usize,
    pub code_lines: usize,
    pub blank_lines: usize,
    pub comment_lines: usize,
}

impl FunctionRecord {
    #[inline]
    pub fn total_lines(&self) -> usize {
        self.end_line.saturating_sub(self.start_line) + 1
    }
}

impl serde::Serialize for FunctionRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("FunctionRecord", 9)?;
        s.serialize_field("name", &self.name)?;
        s.serialize_field("file", &self.file_name)?;
        s.serialize_field("language", &self.language)?;
        s.serialize_field("start_line", &self.start_line)?;
        s.serialize_field("end_line", &self.end_line)?;
        s.serialize_field("total_lines", &self.total_lines())?;
        s.serialize_field("code_lines", &self.code_lines)?;
        s.serialize_field("comment_lines", &self.comment_lines)?;
        s.serialize_field("blank_lines", &self.blank_lines)?;
        s.end()
    }
}

/// Per-file result produced by the scanner, folded into the aggregate.
#[derive(Debug)]
pub struct FileReport {
    pub language: Language,
    pub tally: LineTally,
    pub functions: Vec<FunctionRecord>,
}

/// Accumulated statistics for one language. Functions keep discovery order.
#[derive(Debug)]
pub struct LanguageStat {
    pub language: Language,
    pub source_files: usize,
    pub total_lines: usize,
    pub code_lines: usize,
    pub blank_lines: usize,
    pub comment_lines: usize,
    pub functions: Vec<FunctionRecord>,
}

impl LanguageStat {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            source_files: 0,
            total_lines: 0,
            code_lines: 0,
            blank_lines: 0,
            comment_lines: 0,
            functions: Vec::new(),
        }
    }

    pub fn add_file(&mut self, report: FileReport) {
        self.source_files += 1;
        self.total_lines += report.tally.total;
        self.code_lines += report.tally.code;
        self.blank_lines += report.tally.blank;
        self.comment_lines += report.tally.comment;
        self.functions.extend(report.functions);
    }
}

/// The full result of one scan. A new scan builds a fresh value; nothing is
/// merged with prior results.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Keyed by canonical language name for stable report ordering.
    pub languages: BTreeMap<String, LanguageStat>,
    /// Files that could not be read under any attempted encoding.
    pub skipped: Vec<PathBuf>,
}

impl ScanResult {
    pub fn add_file(&mut self, report: FileReport) {
        let lang = report.language;
        self.languages
            .entry(lang.name().to_string())
            .or_insert_with(|| LanguageStat::new(lang))
            .add_file(report);
    }

    pub fn total_files(&self) -> usize {
        self.languages.values().map(|s| s.source_files).sum()
    }

    pub fn total_lines(&self) -> usize {
        self.languages.values().map(|s| s.total_lines).sum()
    }

    pub fn total_code_lines(&self) -> usize {
        self.languages.values().map(|s| s.code_lines).sum()
    }

    pub fn total_blank_lines(&self) -> usize {
        self.languages.values().map(|s| s.blank_lines).sum()
    }

    pub fn total_comment_lines(&self) -> usize {
        self.languages.values().map(|s| s.comment_lines).sum()
    }

    pub fn total_functions(&self) -> usize {
        self.languages.values().map(|s| s.functions.len()).sum()
    }

    /// All detected functions across languages, in report order.
    pub fn all_functions(&self) -> impl Iterator<Item = &FunctionRecord> {
        self.languages.values().flat_map(|s| s.functions.iter())
    }
}
