//! Styling for rendered markdown.
//!
//! Maps [`StyledSpan`]s onto ratatui styles and lays them out as preview
//! lines. Uses ANSI colors that adapt to the terminal's color palette.

use std::str::FromStr;

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::markdown::{SpanStyle, StyledSpan};

/// Style for an inline span, merged with the pane's base style.
pub fn style_for_span(base: Style, span: &SpanStyle) -> Style {
    let mut style = base;
    if span.bold {
        style = style.add_modifier(Modifier::BOLD);
    }
    if span.italic {
        style = style.add_modifier(Modifier::ITALIC);
    }
    if span.strikethrough {
        style = style.add_modifier(Modifier::CROSSED_OUT);
    }
    if span.code {
        style = style.fg(Color::Red).add_modifier(Modifier::BOLD);
    }
    if span.link.is_some() {
        style = style
            .fg(Color::LightBlue)
            .add_modifier(Modifier::UNDERLINED);
    }
    style
}

/// Style for the ` <url>` suffix shown after link text.
pub fn link_target_style(base: Style) -> Style {
    base.add_modifier(Modifier::DIM)
}

/// Lay rendered spans out as display lines.
///
/// Spans are split on newlines. Once a run of link text ends, its target is
/// appended so the URL is visible in the terminal.
pub fn preview_lines(spans: &[StyledSpan], base: Style) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();

    for (idx, span) in spans.iter().enumerate() {
        let style = style_for_span(base, span.style());
        let mut parts = span.text().split('\n');
        if let Some(first) = parts.next()
            && !first.is_empty()
        {
            current.push(Span::styled(first.to_string(), style));
        }
        for part in parts {
            lines.push(Line::from(std::mem::take(&mut current)));
            if !part.is_empty() {
                current.push(Span::styled(part.to_string(), style));
            }
        }

        if let Some(target) = span.link() {
            let next_target = spans.get(idx + 1).and_then(StyledSpan::link);
            if next_target != Some(target) {
                current.push(Span::styled(format!(" <{target}>"), link_target_style(base)));
            }
        }
    }
    lines.push(Line::from(current));
    lines
}

/// Parse a color name (`red`, `lightblue`), hex (`#1e1e2e`) or index (`42`).
pub fn parse_color(value: &str) -> Option<Color> {
    Color::from_str(value.trim()).ok()
}

/// Pane style from optional configured colors.
///
/// Unknown color names are skipped with a warning.
pub fn pane_style(fg: Option<&str>, bg: Option<&str>) -> Style {
    let mut style = Style::default();
    for (value, is_fg) in [(fg, true), (bg, false)] {
        let Some(value) = value else {
            continue;
        };
        match parse_color(value) {
            Some(color) if is_fg => style = style.fg(color),
            Some(color) => style = style.bg(color),
            None => tracing::warn!(color = value, "ignoring unknown color"),
        }
    }
    style
}
