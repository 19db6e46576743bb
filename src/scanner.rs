// scanner.rs — Directory walk, per-file analysis, and result folding

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rayon::prelude::*;
use walkdir::WalkDir;

use crate::cli::Args;
use crate::classify::tally_lines;
use crate::config::GlobalConfig;
use crate::detect;
use crate::language::{resolve_language, Language, EXCLUDED_DIRS};
use crate::models::{FileReport, FunctionRecord, ScanResult};

/// Configuration for one scan run.
pub struct ScanConfig {
    pub root: PathBuf,
    /// `None` scans every recognized language.
    pub languages: Option<HashSet<Language>>,
    pub parallel: bool,
    /// Extra excluded names from the global config and `.codestatignore`.
    pub extra_excludes: Vec<String>,
}

impl ScanConfig {
    pub fn from_args(args: &Args, global: &GlobalConfig) -> Result<Self> {
        let root = Path::new(&args.directory)
            .canonicalize()
            .with_context(|| format!("Cannot resolve directory: {}", args.directory))?;
        if !root.is_dir() {
            anyhow::bail!("Not a directory: {}", root.display());
        }

        let languages = if args.file_types.is_empty() {
            None
        } else {
            let mut set = HashSet::new();
            for name in &args.file_types {
                match resolve_language(name) {
                    Some(lang) => {
                        set.insert(lang);
                        // The C and C++ filters include shared headers.
                        if lang == Language::C || lang == Language::Cpp {
                            set.insert(Language::CHeader);
                        }
                    }
                    None => eprintln!("[WARNING] Unknown language filter: {}", name),
                }
            }
            Some(set)
        };

        let mut extra_excludes = global.exclude_dirs.clone().unwrap_or_default();
        extra_excludes.extend(load_ignore_file(&root));

        Ok(Self {
            root,
            languages,
            parallel: !args.no_parallel && global.parallel.unwrap_or(true),
            extra_excludes,
        })
    }
}

/// Outcome of looking at one walked file.
enum Outcome {
    Counted(FileReport),
    /// Readable under none of the attempted encodings; reported, not fatal.
    Unreadable(PathBuf),
}

/// Run the full scan. Every failure below the root-directory check is
/// per-file and non-fatal.
pub fn run_scan(config: &ScanConfig) -> Result<ScanResult> {
    let mut files = collect_files(config);
    files.sort_unstable();

    let outcomes: Vec<Outcome> = if config.parallel && files.len() > 50 {
        files
            .par_iter()
            .filter_map(|path| scan_file(path, config))
            .collect()
    } else {
        files
            .iter()
            .filter_map(|path| scan_file(path, config))
            .collect()
    };

    // Single accumulation point: per-file results merge here and only here.
    let mut result = ScanResult::default();
    for outcome in outcomes {
        match outcome {
            Outcome::Counted(report) => result.add_file(report),
            Outcome::Unreadable(path) => result.skipped.push(path),
        }
    }
    Ok(result)
}

/// Walk the tree, pruning excluded directories. The authoritative policy is
/// the substring check in `is_excluded`: anything under `node_modules`,
/// `target`, `build`, `dist`, `.git`, `__pycache__`, or a hidden path
/// segment never reaches the classifier.
fn collect_files(config: &ScanConfig) -> Vec<PathBuf> {
    WalkDir::new(&config.root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| {
            if e.depth() == 0 {
                return true;
            }
            let name = e.file_name().to_string_lossy();
            if e.file_type().is_dir()
                && (EXCLUDED_DIRS.contains(name.as_ref()) || name.starts_with('.'))
            {
                return false;
            }
            !config.extra_excludes.iter().any(|x| x == name.as_ref())
        })
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path().to_path_buf())
        .filter(|p| !is_excluded(p, &config.root, &config.extra_excludes))
        .collect()
}

fn is_excluded(path: &Path, root: &Path, extra: &[String]) -> bool {
    let rel = path.strip_prefix(root).unwrap_or(path);
    let rel_str = rel.to_string_lossy();
    if EXCLUDED_DIRS.iter().any(|d| rel_str.contains(d)) {
        return true;
    }
    if extra.iter().any(|d| rel_str.contains(d.as_str())) {
        return true;
    }
    rel.components()
        .any(|c| c.as_os_str().to_string_lossy().starts_with('.'))
}

/// Names listed in a `.codestatignore` at the scan root, one per line.
fn load_ignore_file(root: &Path) -> Vec<String> {
    match std::fs::read_to_string(root.join(".codestatignore")) {
        Ok(content) => content
            .lines()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .map(|l| l.to_string())
            .collect(),
        Err(_) => Vec::new(),
    }
}

fn scan_file(path: &Path, config: &ScanConfig) -> Option<Outcome> {
    let language = Language::from_path(path)?;
    if let Some(wanted) = &config.languages {
        if !wanted.contains(&language) {
            return None;
        }
    }

    let rel = path.strip_prefix(&config.root).unwrap_or(path);
    let content = match read_file_text(path) {
        Some(c) => c,
        None => return Some(Outcome::Unreadable(rel.to_path_buf())),
    };

    let lines: Vec<&str> = content.lines().collect();
    // Zero-line files are not counted toward any total.
    if lines.is_empty() {
        return None;
    }

    let style = language.comment_style();
    let tally = tally_lines(lines.iter().copied(), style);

    let functions = match detect::detector_for(language) {
        Some(detector) => detector
            .detect(&content)
            .into_iter()
            .map(|span| {
                let range = &lines[span.start_line - 1..span.end_line];
                let body = tally_lines(range.iter().copied(), style);
                FunctionRecord {
                    name: span.name,
                    file_name: rel.display().to_string(),
                    language,
                    start_line: span.start_line,
                    end_line: span.end_line,
                    code_lines: body.code,
                    blank_lines: body.blank,
                    comment_lines: body.comment,
                }
            })
            .collect(),
        None => Vec::new(),
    };

    Some(Outcome::Counted(FileReport {
        language,
        tally,
        functions,
    }))
}

/// Best-effort decode chain: strict UTF-8, then GBK, then Windows-1252.
/// Files that sniff as binary (NUL in the first 8 KiB) or defeat every
/// encoding are unreadable and get skipped.
fn read_file_text(path: &Path) -> Option<String> {
    let bytes = std::fs::read(path).ok()?;
    if bytes.iter().take(8192).any(|&b| b == 0) {
        return None;
    }
    match String::from_utf8(bytes) {
        Ok(s) => Some(s),
        Err(err) => {
            let bytes = err.into_bytes();
            let (decoded, _, had_errors) = encoding_rs::GBK.decode(&bytes);
            if !had_errors {
                return Some(decoded.into_owned());
            }
            let (decoded, _, had_errors) = encoding_rs::WINDOWS_1252.decode(&bytes);
            if had_errors {
                None
            } else {
                Some(decoded.into_owned())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn config_for(root: &Path) -> ScanConfig {
        ScanConfig {
            root: root.to_path_buf(),
            languages: None,
            parallel: false,
            extra_excludes: vec![],
        }
    }

    #[test]
    fn test_scan_counts_per_language() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.py"), "x = 1\n# note\n\ny = 2\n").unwrap();
        fs::write(dir.path().join("b.py"), "z = 3\n").unwrap();
        fs::write(dir.path().join("lib.c"), "int x;\n").unwrap();

        let result = run_scan(&config_for(dir.path())).unwrap();
        assert_eq!(result.total_files(), 3);

        let py = &result.languages["Python"];
        assert_eq!(py.source_files, 2);
        assert_eq!(py.total_lines, 5);
        assert_eq!(py.code_lines, 3);
        assert_eq!(py.comment_lines, 1);
        assert_eq!(py.blank_lines, 1);
        assert_eq!(
            py.total_lines,
            py.code_lines + py.blank_lines + py.comment_lines
        );
        assert_eq!(result.languages["C"].source_files, 1);
    }

    #[test]
    fn test_node_modules_excluded_anywhere_in_path() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("web/app/node_modules/pkg");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("index.js"), "var x = 1;\n").unwrap();
        fs::write(dir.path().join("keep.js"), "var y = 2;\n").unwrap();

        let result = run_scan(&config_for(dir.path())).unwrap();
        let js = &result.languages["JavaScript"];
        assert_eq!(js.source_files, 1);
        assert_eq!(js.total_lines, 1);
    }

    #[test]
    fn test_hidden_directories_excluded() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join(".cache")).unwrap();
        fs::write(dir.path().join(".cache/gen.py"), "x = 1\n").unwrap();
        fs::write(dir.path().join("main.py"), "y = 2\n").unwrap();

        let result = run_scan(&config_for(dir.path())).unwrap();
        assert_eq!(result.languages["Python"].source_files, 1);
    }

    #[test]
    fn test_empty_file_not_counted() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("empty.py"), "").unwrap();
        fs::write(dir.path().join("real.py"), "x = 1\n").unwrap();

        let result = run_scan(&config_for(dir.path())).unwrap();
        assert_eq!(result.total_files(), 1);
        assert_eq!(result.languages["Python"].source_files, 1);
    }

    #[test]
    fn test_unrecognized_extension_silently_skipped() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("data.xyz"), "whatever\n").unwrap();
        fs::write(dir.path().join("main.py"), "x = 1\n").unwrap();

        let result = run_scan(&config_for(dir.path())).unwrap();
        assert_eq!(result.total_files(), 1);
        assert!(result.skipped.is_empty());
    }

    #[test]
    fn test_markdown_reported_separately_with_zero_functions() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("code.py"), "a = 1\nb = 2\nc = 3\nd = 4\ne = 5\n").unwrap();
        fs::write(dir.path().join("README.md"), "# title\n\nsome text\n").unwrap();

        let result = run_scan(&config_for(dir.path())).unwrap();
        assert_eq!(result.languages["Python"].source_files, 1);
        let md = &result.languages["Markdown"];
        assert_eq!(md.source_files, 1);
        assert!(md.functions.is_empty());
        // Markdown has no comment syntax; non-blank lines are all code.
        assert_eq!(md.code_lines, 2);
        assert_eq!(md.blank_lines, 1);
    }

    #[test]
    fn test_python_function_detected_with_boundaries() {
        let dir = tempdir().unwrap();
        let mut src = String::from("def foo():\n");
        for i in 0..9 {
            src.push_str(&format!("    x{} = {}\n", i, i));
        }
        fs::write(dir.path().join("mod.py"), &src).unwrap();

        let result = run_scan(&config_for(dir.path())).unwrap();
        let py = &result.languages["Python"];
        assert_eq!(py.functions.len(), 1);
        let f = &py.functions[0];
        assert_eq!(f.start_line, 1);
        assert_eq!(f.end_line, 10);
        assert_eq!(f.total_lines(), 10);
        assert_eq!(f.total_lines(), f.code_lines + f.blank_lines + f.comment_lines);
    }

    #[test]
    fn test_c_function_content_tally() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("add.c"), "int add(int a, int b) {\n  return a+b;\n}\n").unwrap();

        let result = run_scan(&config_for(dir.path())).unwrap();
        let f = &result.languages["C"].functions[0];
        assert_eq!((f.start_line, f.end_line), (1, 3));
        assert_eq!(f.total_lines(), 3);
        assert_eq!(f.code_lines, 3);
        assert_eq!(f.blank_lines, 0);
        assert_eq!(f.comment_lines, 0);
    }

    #[test]
    fn test_binary_file_reported_as_skipped() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("junk.py"), b"\x00\x01\x02data".to_vec()).unwrap();
        fs::write(dir.path().join("ok.py"), "x = 1\n").unwrap();

        let result = run_scan(&config_for(dir.path())).unwrap();
        assert_eq!(result.total_files(), 1);
        assert_eq!(result.skipped.len(), 1);
        assert!(result.skipped[0].to_string_lossy().contains("junk.py"));
    }

    #[test]
    fn test_gbk_fallback_decodes() {
        let dir = tempdir().unwrap();
        // "中文" in GBK, not valid UTF-8.
        let mut bytes = b"# ".to_vec();
        bytes.extend_from_slice(&[0xD6, 0xD0, 0xCE, 0xC4]);
        bytes.push(b'\n');
        bytes.extend_from_slice(b"x = 1\n");
        fs::write(dir.path().join("cn.py"), bytes).unwrap();

        let result = run_scan(&config_for(dir.path())).unwrap();
        let py = &result.languages["Python"];
        assert_eq!(py.source_files, 1);
        assert_eq!(py.total_lines, 2);
        assert_eq!(py.comment_lines, 1);
        assert_eq!(py.code_lines, 1);
    }

    #[test]
    fn test_windows_1252_fallback_decodes() {
        let dir = tempdir().unwrap();
        // "café" in Windows-1252; 0xE9 followed by a newline is invalid in
        // both UTF-8 and GBK.
        let mut bytes = b"# caf".to_vec();
        bytes.push(0xE9);
        bytes.push(b'\n');
        bytes.extend_from_slice(b"x = 1\n");
        fs::write(dir.path().join("fr.py"), bytes).unwrap();

        let result = run_scan(&config_for(dir.path())).unwrap();
        let py = &result.languages["Python"];
        assert_eq!(py.source_files, 1);
        assert_eq!(py.total_lines, 2);
        assert_eq!(py.comment_lines, 1);
        assert_eq!(py.code_lines, 1);
    }

    #[test]
    fn test_language_filter() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.py"), "x = 1\n").unwrap();
        fs::write(dir.path().join("b.rs"), "fn main() {}\n").unwrap();

        let mut config = config_for(dir.path());
        config.languages = Some([Language::Rust].into_iter().collect());
        let result = run_scan(&config).unwrap();
        assert_eq!(result.total_files(), 1);
        assert!(result.languages.contains_key("Rust"));
        assert!(!result.languages.contains_key("Python"));
    }

    #[test]
    fn test_codestatignore_names_skipped() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(".codestatignore"), "generated\n# comment\n").unwrap();
        fs::create_dir_all(dir.path().join("generated")).unwrap();
        fs::write(dir.path().join("generated/gen.py"), "x = 1\n").unwrap();
        fs::write(dir.path().join("main.py"), "y = 2\n").unwrap();

        let mut config = config_for(dir.path());
        config.extra_excludes = load_ignore_file(dir.path());
        let result = run_scan(&config).unwrap();
        assert_eq!(result.languages["Python"].source_files, 1);
    }

    #[test]
    fn test_empty_root_is_valid_empty_result() {
        let dir = tempdir().unwrap();
        let result = run_scan(&config_for(dir.path())).unwrap();
        assert!(result.languages.is_empty());
        assert_eq!(result.total_files(), 0);
    }
}
