//! Inline-only markdown scanner.
//!
//! Each line is scanned left to right. At every position the scanner tries
//! the construct opened by the current character, longest delimiter run
//! first (bold-italic, bold, italic), then code spans and links. Anything
//! that does not close on the same line is emitted as literal text.
//!
//! Closers are looked up in a [`LineIndex`] built once per scanned slice, so
//! a line full of unclosed openers still scans in near-linear time.

use std::collections::HashMap;
use std::ops::Range;

use super::types::{SpanStyle, StyledSpan};

/// Scanning depth at which constructs stop being recognized.
///
/// Top-level constructs are scanned at depth 0 and their content at depth 1,
/// so exactly one level of nesting is interpreted.
const MAX_DEPTH: u8 = 2;

/// Collects styled text, merging adjacent runs that share a style.
#[derive(Debug, Default)]
pub(super) struct SpanSink {
    spans: Vec<StyledSpan>,
}

impl SpanSink {
    pub(super) fn push(&mut self, text: &str, style: &SpanStyle) {
        if text.is_empty() {
            return;
        }
        if let Some(last) = self.spans.last_mut()
            && last.style() == style
        {
            last.push_str(text);
            return;
        }
        self.spans.push(StyledSpan::new(text, style.clone()));
    }

    pub(super) fn finish(self) -> Vec<StyledSpan> {
        self.spans
    }
}

/// Scan a single line (without its newline) into `sink`.
pub(super) fn scan_line(line: &str, sink: &mut SpanSink) {
    let chars: Vec<char> = line.chars().collect();
    scan(&chars, &SpanStyle::plain(), 0, sink);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    BoldItalic,
    Bold,
    Italic,
    Strikethrough,
}

impl Marker {
    fn apply(self, base: &SpanStyle) -> SpanStyle {
        let mut style = base.clone();
        match self {
            Self::BoldItalic => {
                style.bold = true;
                style.italic = true;
            }
            Self::Bold => style.bold = true,
            Self::Italic => style.italic = true,
            Self::Strikethrough => style.strikethrough = true,
        }
        style
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Inline {
    Delimited { marker: Marker, inner: Range<usize> },
    Code(String),
    Link { text: Range<usize>, target: String },
}

/// A construct recognized at some position, ending before `end`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Match {
    inline: Inline,
    end: usize,
}

/// Positions of every delimiter in one scanned slice.
///
/// Backslash escapes and code spans are resolved first, in a single pass
/// from the left. Delimiters, brackets and parens inside them are not
/// indexed, so an opener never closes inside a code span.
#[derive(Debug, Default)]
struct LineIndex {
    /// Length of the run of identical chars starting at each position.
    runs: Vec<usize>,
    /// Code span openers mapped to the start of their closing run.
    code: HashMap<usize, usize>,
    /// Valid emphasis closers by delimiter char and run width, ascending.
    closers: HashMap<(char, usize), Vec<usize>>,
    /// `[` and `]` positions, ascending.
    brackets: Vec<usize>,
    /// `)` positions, ascending.
    parens: Vec<usize>,
    /// First whitespace position at or after each position.
    next_space: Vec<usize>,
    /// First non-whitespace position at or after each position.
    next_word: Vec<usize>,
}

impl LineIndex {
    fn build(chars: &[char]) -> Self {
        let len = chars.len();
        let mut runs = vec![1; len];
        let mut next_space = vec![len; len + 1];
        let mut next_word = vec![len; len + 1];
        for j in (0..len).rev() {
            if chars.get(j + 1) == Some(&chars[j]) {
                runs[j] = runs[j + 1] + 1;
            }
            let space = chars[j].is_whitespace();
            next_space[j] = if space { j } else { next_space[j + 1] };
            next_word[j] = if space { next_word[j + 1] } else { j };
        }

        // Whole backtick runs by width; a code span closes on the next one
        // of exactly its opener's width.
        let mut ticks: HashMap<usize, Vec<usize>> = HashMap::new();
        let mut j = 0;
        while j < len {
            if chars[j] == '`' {
                ticks.entry(runs[j]).or_default().push(j);
                j += runs[j];
            } else {
                j += 1;
            }
        }

        let mut index = Self {
            runs,
            next_space,
            next_word,
            ..Self::default()
        };
        let mut j = 0;
        while j < len {
            let c = chars[j];
            if c == '\\' && chars.get(j + 1).is_some_and(char::is_ascii_punctuation) {
                j += 2;
                continue;
            }
            let run = index.runs[j];
            match c {
                '`' => {
                    let close = ticks
                        .get(&run)
                        .and_then(|starts| first_at_or_after(starts, j + run));
                    if let Some(close) = close {
                        index.code.insert(j, close);
                        j = close + run;
                    } else {
                        j += run;
                    }
                }
                '*' | '_' | '~' => {
                    let after = chars.get(j + run).copied();
                    let underscore_intraword = c == '_' && after.is_some_and(char::is_alphanumeric);
                    if j > 0 && !chars[j - 1].is_whitespace() && !underscore_intraword {
                        index.closers.entry((c, run)).or_default().push(j);
                    }
                    j += run;
                }
                '[' | ']' => {
                    index.brackets.push(j);
                    j += 1;
                }
                ')' => {
                    index.parens.push(j);
                    j += 1;
                }
                _ => j += 1,
            }
        }
        index
    }

    /// First closing run of exactly `width` copies of `c` at or after `from`.
    fn closer(&self, c: char, width: usize, from: usize) -> Option<usize> {
        self.closers
            .get(&(c, width))
            .and_then(|starts| first_at_or_after(starts, from))
    }
}

/// First entry of the ascending `positions` that is at least `from`.
fn first_at_or_after(positions: &[usize], from: usize) -> Option<usize> {
    positions
        .get(positions.partition_point(|&p| p < from))
        .copied()
}

fn scan(chars: &[char], style: &SpanStyle, depth: u8, sink: &mut SpanSink) {
    // Nothing is matched at the innermost level, so it needs no index.
    let index = (depth < MAX_DEPTH).then(|| LineIndex::build(chars));
    let mut literal = String::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c == '\\'
            && let Some(&next) = chars.get(i + 1)
            && next.is_ascii_punctuation()
        {
            literal.push(next);
            i += 2;
            continue;
        }
        let Some(index) = &index else {
            literal.push(c);
            i += 1;
            continue;
        };
        if let Some(found) = match_inline(chars, index, i) {
            sink.push(&literal, style);
            literal.clear();
            emit(chars, &found.inline, style, depth, sink);
            i = found.end;
            continue;
        }
        if c == '`' {
            // An unmatched backtick run is literal as a whole, so a shorter
            // run inside it can't open a code span.
            let run = index.runs[i];
            literal.extend(&chars[i..i + run]);
            i += run;
            continue;
        }
        literal.push(c);
        i += 1;
    }
    sink.push(&literal, style);
}

fn emit(chars: &[char], inline: &Inline, style: &SpanStyle, depth: u8, sink: &mut SpanSink) {
    match inline {
        Inline::Delimited { marker, inner } => {
            scan(&chars[inner.clone()], &marker.apply(style), depth + 1, sink);
        }
        Inline::Code(content) => {
            let code = SpanStyle {
                code: true,
                ..style.clone()
            };
            sink.push(content, &code);
        }
        Inline::Link { text, target } => {
            let link = SpanStyle {
                link: Some(target.clone()),
                ..style.clone()
            };
            scan(&chars[text.clone()], &link, depth + 1, sink);
        }
    }
}

fn match_inline(chars: &[char], index: &LineIndex, i: usize) -> Option<Match> {
    match chars[i] {
        '*' | '_' => match_emphasis(chars, index, i),
        '~' => match_strikethrough(chars, index, i),
        '`' => match_code(chars, index, i),
        '[' => match_link(chars, index, i),
        _ => None,
    }
}

fn match_emphasis(chars: &[char], index: &LineIndex, i: usize) -> Option<Match> {
    let c = chars[i];
    if c == '_' && i > 0 && chars[i - 1].is_alphanumeric() {
        return None;
    }
    let run = index.runs[i];
    [
        (3, Marker::BoldItalic),
        (2, Marker::Bold),
        (1, Marker::Italic),
    ]
    .into_iter()
    .filter(|&(width, _)| width <= run)
    .find_map(|(width, marker)| delimited(chars, index, i, width, marker))
}

fn match_strikethrough(chars: &[char], index: &LineIndex, i: usize) -> Option<Match> {
    if index.runs[i] < 2 {
        return None;
    }
    delimited(chars, index, i, 2, Marker::Strikethrough)
}

fn delimited(
    chars: &[char],
    index: &LineIndex,
    i: usize,
    width: usize,
    marker: Marker,
) -> Option<Match> {
    let c = chars[i];
    let start = i + width;
    let first = *chars.get(start)?;
    if first.is_whitespace() || first == c {
        return None;
    }
    let close = index.closer(c, width, start)?;
    Some(Match {
        inline: Inline::Delimited {
            marker,
            inner: start..close,
        },
        end: close + width,
    })
}

fn match_code(chars: &[char], index: &LineIndex, i: usize) -> Option<Match> {
    let close = *index.code.get(&i)?;
    let width = index.runs[i];
    Some(Match {
        inline: Inline::Code(code_content(&chars[i + width..close])),
        end: close + width,
    })
}

fn code_content(chars: &[char]) -> String {
    let text: String = chars.iter().collect();
    let padded = text.len() >= 2
        && text.starts_with(' ')
        && text.ends_with(' ')
        && !text.chars().all(|c| c == ' ');
    if padded {
        text[1..text.len() - 1].to_string()
    } else {
        text
    }
}

fn match_link(chars: &[char], index: &LineIndex, i: usize) -> Option<Match> {
    // The text ends at the next bracket, and only if that bracket is a `]`.
    let text_end = first_at_or_after(&index.brackets, i + 1)?;
    if chars[text_end] != ']' || text_end == i + 1 || chars.get(text_end + 1) != Some(&'(') {
        return None;
    }
    let target_start = text_end + 2;
    let target_end = first_at_or_after(&index.parens, target_start)?;
    let start = index.next_word[target_start].min(target_end);
    let end = index.next_space[start].min(target_end);
    // Only trailing whitespace may follow the target.
    if start == end || index.next_word[end] < target_end {
        return None;
    }
    Some(Match {
        inline: Inline::Link {
            text: i + 1..text_end,
            target: chars[start..end].iter().collect(),
        },
        end: target_end + 1,
    })
}
