// classify.rs — Per-line blank/comment/code classification

use crate::language::CommentStyle;

/// Classification of a single physical line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Blank,
    Comment,
    Code,
}

/// Fold accumulator carried across the lines of one file. Only the C family
/// tracks `/* ... */` blocks; every other style ignores the flag.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineState {
    pub in_block_comment: bool,
}

/// Classify one line and advance the sticky block-comment state.
///
/// The block tracking is a heuristic: comment markers inside string literals
/// are not recognized and will misclassify such lines.
pub fn classify_line(line: &str, style: CommentStyle, state: &mut LineState) -> LineKind {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return LineKind::Blank;
    }

    let is_comment = match style {
        CommentStyle::Hash => trimmed.starts_with('#'),
        CommentStyle::Slash => {
            state.in_block_comment
                || trimmed.starts_with("//")
                || trimmed.starts_with("/*")
                || trimmed.starts_with('*')
        }
        CommentStyle::Dash => trimmed.starts_with("--"),
        CommentStyle::Markup => trimmed.starts_with("<!--"),
        CommentStyle::Star => trimmed.starts_with("/*") || trimmed.starts_with('*'),
        CommentStyle::Plain => false,
    };

    if is_comment {
        if style == CommentStyle::Slash {
            if trimmed.contains("/*") && !trimmed.contains("*/") {
                state.in_block_comment = true;
            } else if trimmed.contains("*/") {
                state.in_block_comment = false;
            }
        }
        LineKind::Comment
    } else {
        LineKind::Code
    }
}

/// Line tally for a file or a line range; `total = code + blank + comment`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineTally {
    pub total: usize,
    pub code: usize,
    pub blank: usize,
    pub comment: usize,
}

impl LineTally {
    pub fn record(&mut self, kind: LineKind) {
        self.total += 1;
        match kind {
            LineKind::Blank => self.blank += 1,
            LineKind::Comment => self.comment += 1,
            LineKind::Code => self.code += 1,
        }
    }
}

/// Classify a sequence of lines from a fresh state and fold into a tally.
pub fn tally_lines<'a, I>(lines: I, style: CommentStyle) -> LineTally
where
    I: IntoIterator<Item = &'a str>,
{
    let mut state = LineState::default();
    let mut tally = LineTally::default();
    for line in lines {
        let kind = classify_line(line, style, &mut state);
        tally.record(kind);
    }
    tally
}
