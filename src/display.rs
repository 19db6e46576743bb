// display.rs — Colored terminal report

use colored::*;
use std::path::Path;

use crate::models::{LanguageStat, ScanResult};
use crate::stats::{extremes, LengthStats};

fn fmt_num(n: usize) -> String {
    // Thousands-separator formatting
    let s = n.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

pub fn display_results(result: &ScanResult, root: &Path, detailed: bool) {
    println!();
    if result.languages.is_empty() {
        println!(
            "{} No recognized source files found under {}",
            "[INFO]".blue(),
            root.display()
        );
        report_skipped(result);
        return;
    }

    println!("{}", "Language Breakdown:".bold());
    println!();
    println!(
        "{:<16} {:>7} {:>12} {:>12} {:>12} {:>10} {:>8}",
        "Language", "Files", "Total", "Code", "Comment", "Blank", "Funcs"
    );
    println!("{}", "-".repeat(82));

    let mut sorted: Vec<&LanguageStat> = result.languages.values().collect();
    sorted.sort_by(|a, b| b.total_lines.cmp(&a.total_lines));

    for stat in &sorted {
        println!(
            "{:<16} {:>7} {:>12} {:>12} {:>12} {:>10} {:>8}",
            stat.language.name(),
            fmt_num(stat.source_files),
            fmt_num(stat.total_lines),
            fmt_num(stat.code_lines),
            fmt_num(stat.comment_lines),
            fmt_num(stat.blank_lines),
            fmt_num(stat.functions.len()),
        );
    }

    println!("{}", "-".repeat(82));
    println!(
        "{:<16} {:>7} {:>12} {:>12} {:>12} {:>10} {:>8}",
        "Total".bold(),
        fmt_num(result.total_files()),
        fmt_num(result.total_lines()),
        fmt_num(result.total_code_lines()),
        fmt_num(result.total_comment_lines()),
        fmt_num(result.total_blank_lines()),
        fmt_num(result.total_functions()),
    );
    println!();

    display_function_stats(result);
    if detailed {
        display_function_listing(result);
    }
    report_skipped(result);
}

fn display_function_stats(result: &ScanResult) {
    let with_functions: Vec<&LanguageStat> = result
        .languages
        .values()
        .filter(|s| !s.functions.is_empty())
        .collect();
    if with_functions.is_empty() {
        return;
    }

    println!("{}", "Function Length Statistics:".bold());
    println!();
    println!(
        "{:<16} {:>7} {:>6} {:>6} {:>8} {:>8}",
        "Language", "Count", "Min", "Max", "Mean", "Median"
    );
    println!("{}", "-".repeat(56));

    for stat in &with_functions {
        let lens = LengthStats::of(&stat.functions);
        println!(
            "{:<16} {:>7} {:>6} {:>6} {:>8.1} {:>8.1}",
            stat.language.name(),
            fmt_num(lens.count),
            fmt_num(lens.min),
            fmt_num(lens.max),
            lens.mean,
            lens.median,
        );
    }

    let all: Vec<_> = result.all_functions().cloned().collect();
    let overall = LengthStats::of(&all);
    println!("{}", "-".repeat(56));
    println!(
        "{:<16} {:>7} {:>6} {:>6} {:>8.1} {:>8.1}",
        "Overall".bold(),
        fmt_num(overall.count),
        fmt_num(overall.min),
        fmt_num(overall.max),
        overall.mean,
        overall.median,
    );
    println!();

    if let Some((shortest, longest)) = extremes(&all) {
        println!(
            "  Longest : {} ({} lines) in {}",
            longest.name.green().bold(),
            fmt_num(longest.total_lines()),
            longest.file_name.cyan()
        );
        println!(
            "  Shortest: {} ({} lines) in {}",
            shortest.name.green().bold(),
            fmt_num(shortest.total_lines()),
            shortest.file_name.cyan()
        );
        println!();
    }
}

fn display_function_listing(result: &ScanResult) {
    println!("{}", "Detected Functions:".bold());
    println!();
    for stat in result.languages.values() {
        if stat.functions.is_empty() {
            continue;
        }
        println!("{}", stat.language.name().blue().bold());
        for f in &stat.functions {
            println!(
                "  {} {} [{}-{}] — {} lines ({} code, {} comment, {} blank)",
                "fn".green(),
                f.name,
                f.start_line,
                f.end_line,
                f.total_lines(),
                f.code_lines,
                f.comment_lines,
                f.blank_lines,
            );
            println!("      {}", f.file_name.dimmed());
        }
        println!();
    }
}

fn report_skipped(result: &ScanResult) {
    if result.skipped.is_empty() {
        return;
    }
    println!(
        "{} Skipped {} unreadable file(s):",
        "[WARNING]".yellow(),
        result.skipped.len()
    );
    for path in &result.skipped {
        println!("  {}", path.display().to_string().dimmed());
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_num() {
        assert_eq!(fmt_num(0), "0");
        assert_eq!(fmt_num(999), "999");
        assert_eq!(fmt_num(1000), "1,000");
        assert_eq!(fmt_num(1234567), "1,234,567");
    }
}
