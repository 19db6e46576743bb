// cli.rs — CLI argument parsing via clap derive

use clap::Parser;

/// codestat — multi-language source statistics
///
/// Walks a directory tree, classifies each line of every recognized source
/// file as code, comment, or blank, detects function boundaries with
/// per-language heuristics, and reports per-language and overall summaries.
#[derive(Parser, Debug)]
#[command(
    name = "codestat",
    version,
    about = "Source statistics — line classification, function lengths, CSV/JSON export",
    after_help = "\
EXAMPLES:
  codestat                     Scan the current directory
  codestat src/                Scan a specific directory
  codestat -d                  Also list every detected function
  codestat -t python cpp       Only scan Python and C/C++ files
  codestat -e report.json      Export the summary to JSON
  codestat -e stats.csv        Export the summary to CSV

LANGUAGES:
  python, java, javascript, typescript, c, cpp, csharp, go, rust,
  php, ruby, swift, kotlin, shell, sql, html, css, scss, less,
  xml, json, yaml, markdown, text

FUNCTION DETECTION:
  C, C++, Java, C# (brace balancing) and Python (indentation)"
)]
pub struct Args {
    /// Target directory to scan (default: current directory)
    #[arg(default_value = ".")]
    pub directory: String,

    /// List every detected function per language
    #[arg(short = 'd', long = "detailed")]
    pub detailed: bool,

    /// Filter by language(s) — e.g. -t python cpp
    #[arg(short = 't', long = "type", value_name = "LANG", num_args = 1..)]
    pub file_types: Vec<String>,

    /// Export the summary to a file (.json, .jsonl, or .csv)
    #[arg(short = 'e', long = "export", value_name = "FILE")]
    pub export: Option<String>,

    /// Disable parallel file analysis
    #[arg(long = "no-parallel")]
    pub no_parallel: bool,
}
