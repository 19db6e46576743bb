// export.rs — JSON, JSONL, and CSV serialization of scan summaries

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde_json::json;

use crate::models::{LanguageStat, ScanResult};
use crate::stats::{extremes, LengthStats};

pub enum ExportFormat {
    Json,
    Jsonl,
    Csv,
}

impl ExportFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "jsonl" => Some(Self::Jsonl),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }
}

/// Export the summary in the format implied by the output file extension.
/// Every format carries the same summary fields; totals survive a round trip.
pub fn export(result: &ScanResult, output_path: &str) -> Result<()> {
    let path = Path::new(output_path);
    match ExportFormat::from_path(path) {
        Some(ExportFormat::Json) => export_json(result, path),
        Some(ExportFormat::Jsonl) => export_jsonl(result, path),
        Some(ExportFormat::Csv) => export_csv(result, path),
        None => anyhow::bail!(
            "Unsupported export format '{}'. Use .json, .jsonl, or .csv",
            path.extension().and_then(|e| e.to_str()).unwrap_or("?")
        ),
    }
}

fn language_to_value(stat: &LanguageStat) -> serde_json::Value {
    let lens = LengthStats::of(&stat.functions);
    let (shortest, longest) = match extremes(&stat.functions) {
        Some((s, l)) => (
            json!({ "name": s.name, "file": s.file_name }),
            json!({ "name": l.name, "file": l.file_name }),
        ),
        None => (serde_json::Value::Null, serde_json::Value::Null),
    };

    json!({
        "language": stat.language.name(),
        "source_files": stat.source_files,
        "total_lines": stat.total_lines,
        "code_lines": stat.code_lines,
        "comment_lines": stat.comment_lines,
        "blank_lines": stat.blank_lines,
        "function_count": stat.functions.len(),
        "function_length": lens,
        "longest_function": longest,
        "shortest_function": shortest,
        "functions": stat.functions,
    })
}

fn metadata_value(result: &ScanResult) -> serde_json::Value {
    json!({
        "generator": format!("codestat v{}", env!("CARGO_PKG_VERSION")),
        "timestamp": Utc::now().to_rfc3339(),
        "total_files": result.total_files(),
        "total_lines": result.total_lines(),
        "total_code_lines": result.total_code_lines(),
        "total_comment_lines": result.total_comment_lines(),
        "total_blank_lines": result.total_blank_lines(),
        "total_functions": result.total_functions(),
        "skipped_files": result.skipped.iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>(),
    })
}

fn export_json(result: &ScanResult, path: &Path) -> Result<()> {
    let data = json!({
        "metadata": metadata_value(result),
        "languages": result.languages.values()
            .map(language_to_value)
            .collect::<Vec<_>>(),
    });

    let f = File::create(path).with_context(|| format!("Cannot create {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(f), &data)
        .with_context(|| "Failed to serialize JSON")?;

    eprintln!("[SUCCESS] Exported JSON → {}", path.display());
    Ok(())
}

fn export_jsonl(result: &ScanResult, path: &Path) -> Result<()> {
    let f = File::create(path).with_context(|| format!("Cannot create {}", path.display()))?;
    let mut writer = BufWriter::new(f);

    for stat in result.languages.values() {
        let line = serde_json::to_string(&language_to_value(stat))
            .with_context(|| "Failed to serialize JSONL record")?;
        writeln!(writer, "{}", line)?;
    }

    eprintln!("[SUCCESS] Exported JSONL → {}", path.display());
    Ok(())
}

fn export_csv(result: &ScanResult, path: &Path) -> Result<()> {
    let f = File::create(path).with_context(|| format!("Cannot create {}", path.display()))?;
    let mut wtr = csv::Writer::from_writer(BufWriter::new(f));

    wtr.write_record([
        "Language",
        "Files",
        "TotalLines",
        "CodeLines",
        "CommentLines",
        "BlankLines",
        "Functions",
        "MinLength",
        "MaxLength",
        "MeanLength",
        "MedianLength",
    ])?;

    for stat in result.languages.values() {
        let lens = LengthStats::of(&stat.functions);
        wtr.write_record([
            stat.language.name(),
            &stat.source_files.to_string(),
            &stat.total_lines.to_string(),
            &stat.code_lines.to_string(),
            &stat.comment_lines.to_string(),
            &stat.blank_lines.to_string(),
            &stat.functions.len().to_string(),
            &lens.min.to_string(),
            &lens.max.to_string(),
            &format!("{:.2}", lens.mean),
            &format!("{:.2}", lens.median),
        ])?;
    }

    let all: Vec<_> = result.all_functions().cloned().collect();
    let overall = LengthStats::of(&all);
    wtr.write_record([
        "Total",
        &result.total_files().to_string(),
        &result.total_lines().to_string(),
        &result.total_code_lines().to_string(),
        &result.total_comment_lines().to_string(),
        &result.total_blank_lines().to_string(),
        &result.total_functions().to_string(),
        &overall.min.to_string(),
        &overall.max.to_string(),
        &format!("{:.2}", overall.mean),
        &format!("{:.2}", overall.median),
    ])?;

    wtr.flush()?;
    eprintln!("[SUCCESS] Exported CSV → {}", path.display());
    Ok(())
}
