// language.rs — Extension-to-language mapping and comment-syntax families

use once_cell::sync::Lazy;
use serde::Serializer;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::Path;

/// A recognized source language, decided once from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Language {
    Python,
    Java,
    JavaScript,
    TypeScript,
    C,
    Cpp,
    CHeader,
    CSharp,
    Go,
    Rust,
    Php,
    Ruby,
    Swift,
    Kotlin,
    Shell,
    Sql,
    Html,
    Css,
    Scss,
    Less,
    Xml,
    Json,
    Yaml,
    Markdown,
    Text,
}

/// Comment-syntax family, dispatched by `match` in the line classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentStyle {
    /// `#` line comments (Python, Shell, Ruby, YAML)
    Hash,
    /// `//` line comments plus `/* */` blocks (C family and friends)
    Slash,
    /// `--` line comments (SQL)
    Dash,
    /// `<!-- -->` (HTML, XML)
    Markup,
    /// `/* */` only, no `//` (CSS, SCSS, LESS)
    Star,
    /// No comment syntax; every non-blank line is code (JSON, Markdown, Text)
    Plain,
}

impl Language {
    /// Canonical display name, also used as the key in scan results.
    pub fn name(&self) -> &'static str {
        match self {
            Language::Python => "Python",
            Language::Java => "Java",
            Language::JavaScript => "JavaScript",
            Language::TypeScript => "TypeScript",
            Language::C => "C",
            Language::Cpp => "C++",
            Language::CHeader => "C/C++ Header",
            Language::CSharp => "C#",
            Language::Go => "Go",
            Language::Rust => "Rust",
            Language::Php => "PHP",
            Language::Ruby => "Ruby",
            Language::Swift => "Swift",
            Language::Kotlin => "Kotlin",
            Language::Shell => "Shell",
            Language::Sql => "SQL",
            Language::Html => "HTML",
            Language::Css => "CSS",
            Language::Scss => "SCSS",
            Language::Less => "LESS",
            Language::Xml => "XML",
            Language::Json => "JSON",
            Language::Yaml => "YAML",
            Language::Markdown => "Markdown",
            Language::Text => "Text",
        }
    }

    /// Comment family for the line classifier.
    pub fn comment_style(&self) -> CommentStyle {
        match self {
            Language::Python | Language::Shell | Language::Ruby | Language::Yaml => {
                CommentStyle::Hash
            }
            Language::Java
            | Language::JavaScript
            | Language::TypeScript
            | Language::C
            | Language::Cpp
            | Language::CHeader
            | Language::CSharp
            | Language::Go
            | Language::Rust
            | Language::Php
            | Language::Swift
            | Language::Kotlin => CommentStyle::Slash,
            Language::Sql => CommentStyle::Dash,
            Language::Html | Language::Xml => CommentStyle::Markup,
            Language::Css | Language::Scss | Language::Less => CommentStyle::Star,
            Language::Json | Language::Markdown | Language::Text => CommentStyle::Plain,
        }
    }

    /// Classify by the substring after the last `.`, case-insensitively.
    /// `None` means the file is not a recognized source file and is skipped.
    pub fn from_path(path: &Path) -> Option<Language> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        EXTENSION_MAP.get(format!(".{}", ext).as_str()).copied()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl serde::Serialize for Language {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Static extension table, built once at first use and never mutated.
pub static EXTENSION_MAP: Lazy<HashMap<&'static str, Language>> = Lazy::new(|| {
    use Language::*;
    let mut m = HashMap::new();
    for (exts, lang) in [
        (&[".py", ".pyw", ".pyi"][..], Python),
        (&[".java"][..], Java),
        (&[".js", ".mjs", ".cjs", ".jsx"][..], JavaScript),
        (&[".ts", ".tsx", ".mts"][..], TypeScript),
        (&[".c"][..], C),
        (&[".cpp", ".cc", ".cxx"][..], Cpp),
        (&[".h", ".hpp", ".hxx"][..], CHeader),
        (&[".cs"][..], CSharp),
        (&[".go"][..], Go),
        (&[".rs"][..], Rust),
        (&[".php", ".phtml"][..], Php),
        (&[".rb", ".rake"][..], Ruby),
        (&[".swift"][..], Swift),
        (&[".kt", ".kts"][..], Kotlin),
        (&[".sh", ".bash", ".zsh"][..], Shell),
        (&[".sql"][..], Sql),
        (&[".html", ".htm"][..], Html),
        (&[".css"][..], Css),
        (&[".scss", ".sass"][..], Scss),
        (&[".less"][..], Less),
        (&[".xml", ".xsl"][..], Xml),
        (&[".json", ".jsonl"][..], Json),
        (&[".yml", ".yaml"][..], Yaml),
        (&[".md", ".markdown"][..], Markdown),
        (&[".txt"][..], Text),
    ] {
        for ext in exts {
            m.insert(*ext, lang);
        }
    }
    m
});

/// Directory names excluded from every walk. Matching is by substring against
/// the path relative to the scan root, so a `node_modules` nested at any depth
/// is pruned along with everything under it.
pub static EXCLUDED_DIRS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["node_modules", "target", "build", "dist", ".git", "__pycache__"]
        .iter()
        .copied()
        .collect()
});

/// Aliases for the `-t` language filter: short names → canonical variants.
static ALIASES: Lazy<HashMap<&'static str, Language>> = Lazy::new(|| {
    use Language::*;
    let mut m = HashMap::new();
    for (alias, lang) in [
        ("python", Python),
        ("py", Python),
        ("java", Java),
        ("javascript", JavaScript),
        ("js", JavaScript),
        ("typescript", TypeScript),
        ("ts", TypeScript),
        ("c", C),
        ("cpp", Cpp),
        ("c++", Cpp),
        ("csharp", CSharp),
        ("cs", CSharp),
        ("c#", CSharp),
        ("go", Go),
        ("rust", Rust),
        ("rs", Rust),
        ("php", Php),
        ("ruby", Ruby),
        ("rb", Ruby),
        ("swift", Swift),
        ("kotlin", Kotlin),
        ("kt", Kotlin),
        ("shell", Shell),
        ("sh", Shell),
        ("bash", Shell),
        ("sql", Sql),
        ("html", Html),
        ("css", Css),
        ("scss", Scss),
        ("less", Less),
        ("xml", Xml),
        ("json", Json),
        ("yaml", Yaml),
        ("yml", Yaml),
        ("markdown", Markdown),
        ("md", Markdown),
        ("text", Text),
    ] {
        m.insert(alias, lang);
    }
    m
});

/// Resolve a user-supplied language name to a `Language`, accepting aliases.
/// The C and C++ filters are widened to headers at the call site.
pub fn resolve_language(input: &str) -> Option<Language> {
    let lower = input.to_lowercase();
    ALIASES.get(lower.as_str()).copied()
}
