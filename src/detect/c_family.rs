// detect/c_family.rs — Brace-balanced function detection for C, C++, Java, C#

use once_cell::sync::Lazy;
use regex::Regex;

use super::{find_closing_brace, FunctionDetector, FunctionSpan, LineMap};

/// Shared strategy for all brace-terminated languages: a signature regex
/// anchored at line start, then brace counting for the end line.
///
/// The parameter list may not contain `;`, `{`, or `}`, which rules out
/// forward declarations and most in-body statements that happen to look like
/// signatures. Matching is single-line-oriented for the signature head; the
/// opening brace may sit on a following line (K&R style).
pub struct BraceDetector {
    regex: &'static Lazy<Regex>,
    /// Control keywords that the signature pattern can mistake for names.
    skip_names: &'static [&'static str],
}

impl FunctionDetector for BraceDetector {
    fn detect(&self, content: &str) -> Vec<FunctionSpan> {
        let lines: Vec<&str> = content.lines().collect();
        let map = LineMap::new(content);
        let mut spans = Vec::new();

        for cap in self.regex.captures_iter(content) {
            let name = cap.name("name").map_or("?", |n| n.as_str());
            if self.skip_names.contains(&name) {
                continue;
            }
            let m = cap.get(0).expect("capture 0 always present");
            let start_line = map.offset_to_line(m.start());
            let end_line = find_closing_brace(&lines, start_line);
            spans.push(FunctionSpan {
                name: name.to_string(),
                start_line,
                end_line,
            });
        }
        spans
    }
}

static RE_C: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?m)^[ \t]*(?:(?:extern|static|inline)\s+)*(?:const\s+)?(?:(?:unsigned|signed)\s+)?(?:long\s+long|long\s+double|long|short|void|int|char|float|double|bool|size_t|struct\s+\w+|[A-Za-z_][A-Za-z0-9_]*)[ \t*]+(?P<name>[A-Za-z_][A-Za-z0-9_]*)\s*\((?P<params>[^;{}]*)\)\s*\{",
    )
    .expect("C function regex")
});

static RE_CPP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?m)^[ \t]*(?:(?:virtual|static|inline|explicit|constexpr|friend)\s+)*(?:const\s+)?(?:(?:unsigned|signed)\s+)?(?:[A-Za-z_][A-Za-z0-9_:]*(?:<[^<>]*>)?)[ \t*&]+(?:[A-Za-z_][A-Za-z0-9_]*::)*(?P<name>[A-Za-z_][A-Za-z0-9_]*)\s*\((?P<params>[^;{}]*)\)\s*(?:const\s*)?(?:noexcept\s*)?(?:override\s*)?\{",
    )
    .expect("C++ function regex")
});

static RE_JAVA: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?m)^[ \t]*(?:(?:public|private|protected|static|final|abstract|synchronized|native|default)\s+)*(?:[A-Za-z_][A-Za-z0-9_.]*(?:<[^<>]*>)?(?:\[\])*[ \t]+)(?P<name>[A-Za-z_][A-Za-z0-9_]*)\s*\((?P<params>[^;{}]*)\)\s*(?:throws\s+[A-Za-z0-9_.,\s]+?)?\{",
    )
    .expect("Java method regex")
});

static RE_CSHARP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?m)^[ \t]*(?:(?:public|private|protected|internal|static|virtual|override|abstract|async|sealed|extern|partial)\s+)*(?:[A-Za-z_][A-Za-z0-9_.]*(?:<[^<>]*>)?(?:\[\])*\??[ \t]+)(?P<name>[A-Za-z_][A-Za-z0-9_]*)\s*\((?P<params>[^;{}]*)\)\s*\{",
    )
    .expect("C# method regex")
});

const C_SKIP: &[&str] = &["if", "else", "for", "while", "switch", "do", "return", "sizeof"];
const JVM_SKIP: &[&str] = &[
    "if", "else", "for", "while", "switch", "do", "return", "catch", "try", "new", "using",
    "lock", "foreach",
];

pub static C_DETECTOR: BraceDetector = BraceDetector { regex: &RE_C, skip_names: C_SKIP };
pub static CPP_DETECTOR: BraceDetector = BraceDetector { regex: &RE_CPP, skip_names: C_SKIP };
pub static JAVA_DETECTOR: BraceDetector = BraceDetector { regex: &RE_JAVA, skip_names: JVM_SKIP };
pub static CSHARP_DETECTOR: BraceDetector =
    BraceDetector { regex: &RE_CSHARP, skip_names: JVM_SKIP };

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_c_simple_function() {
        let src = "int add(int a, int b) {\n  return a+b;\n}\n";
        let spans = C_DETECTOR.detect(src);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].name, "add");
        assert_eq!(spans[0].start_line, 1);
        assert_eq!(spans[0].end_line, 3);
    }

    #[test]
    fn test_c_knr_brace_on_next_line() {
        let src = "static void run(void)\n{\n  work();\n}\n";
        let spans = C_DETECTOR.detect(src);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].name, "run");
        assert_eq!(spans[0].end_line, 4);
    }

    #[test]
    fn test_c_forward_declaration_not_matched() {
        let src = "int add(int a, int b);\nvoid g(void);\n";
        assert!(C_DETECTOR.detect(src).is_empty());
    }

    #[test]
    fn test_c_control_flow_not_matched() {
        let src = "void f(void) {\n  if (x) {\n    g();\n  }\n  else if (y) {\n  }\n}\n";
        let spans = C_DETECTOR.detect(src);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].name, "f");
        assert_eq!(spans[0].end_line, 7);
    }

    #[test]
    fn test_c_unbalanced_body_runs_to_eof() {
        let src = "int f(void) {\n  broken(\n";
        let spans = C_DETECTOR.detect(src);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].end_line, 2);
    }

    #[test]
    fn test_cpp_qualified_method() {
        let src = "void Widget::draw(int depth) {\n  paint();\n}\n";
        let spans = CPP_DETECTOR.detect(src);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].name, "draw");
        assert_eq!(spans[0].end_line, 3);
    }

    #[test]
    fn test_cpp_const_method() {
        let src = "int Counter::value() const {\n  return n_;\n}\n";
        let spans = CPP_DETECTOR.detect(src);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].name, "value");
    }

    #[test]
    fn test_java_method_with_modifiers() {
        let src = "public class A {\n    public static int max(int a, int b) {\n        return a > b ? a : b;\n    }\n}\n";
        let spans = JAVA_DETECTOR.detect(src);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].name, "max");
        assert_eq!(spans[0].start_line, 2);
        assert_eq!(spans[0].end_line, 4);
    }

    #[test]
    fn test_java_throws_clause() {
        let src = "    private void load(String path) throws IOException {\n        open(path);\n    }\n";
        let spans = JAVA_DETECTOR.detect(src);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].name, "load");
    }

    #[test]
    fn test_csharp_async_method() {
        let src = "    public async Task<int> FetchAsync(string url) {\n        return await Get(url);\n    }\n";
        let spans = CSHARP_DETECTOR.detect(src);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].name, "FetchAsync");
    }

    #[test]
    fn test_nested_braces_in_body() {
        let src = "int f(void) {\n  struct s v = { 0 };\n  if (a) { b(); }\n  return 0;\n}\nint g(void) {\n  return 1;\n}\n";
        let spans = C_DETECTOR.detect(src);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].end_line, 5);
        assert_eq!(spans[1].start_line, 6);
        assert_eq!(spans[1].end_line, 8);
    }
}
