use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::app::Model;
use crate::markdown;

use super::style;

/// One entry of the markdown cheat sheet.
struct MarkdownRule {
    title: &'static str,
    description: &'static str,
    examples: &'static [&'static str],
}

const MARKDOWN_RULES: &[MarkdownRule] = &[
    MarkdownRule {
        title: "Headings",
        description: "Use # for headings. More # means smaller heading.",
        examples: &["# Heading 1", "## Heading 2", "### Heading 3"],
    },
    MarkdownRule {
        title: "Emphasis",
        description: "Add emphasis to text with asterisks or underscores.",
        examples: &[
            "*Italic*",
            "_Italic_",
            "**Bold**",
            "__Bold__",
            "***Bold and Italic***",
            "~~Strikethrough~~",
        ],
    },
    MarkdownRule {
        title: "Lists",
        description: "Create ordered and unordered lists.",
        examples: &[
            "- Unordered item",
            "* Another unordered item",
            "1. Ordered list item",
            "2. Second ordered item",
        ],
    },
    MarkdownRule {
        title: "Links",
        description: "Create hyperlinks with text and URL.",
        examples: &[
            "[Link Text](https://example.com)",
            "[Google](https://google.com)",
        ],
    },
    MarkdownRule {
        title: "Code",
        description: "Highlight code inline or in blocks.",
        examples: &["`inline code`", "```\nCode block\nMultiple lines\n```"],
    },
    MarkdownRule {
        title: "Blockquotes",
        description: "Create blockquotes with >",
        examples: &["> This is a blockquote", "> Multiple line\n> blockquote"],
    },
    MarkdownRule {
        title: "Horizontal Rule",
        description: "Create a horizontal line with --- or ***",
        examples: &["---", "***"],
    },
];

const KEY_BINDINGS: &[(&str, &str)] = &[
    ("Ctrl+S", "Save as..."),
    ("Ctrl+O", "Open a note"),
    ("Ctrl+P", "Toggle preview only"),
    ("PageUp/PageDown", "Scroll preview"),
    ("Arrows, Home/End", "Move cursor"),
    ("Ctrl+Left/Right", "Word movement"),
    ("Ctrl+Home/End", "Buffer start / end"),
    ("F1", "Toggle this help"),
    ("Esc", "Close dialog"),
    ("Ctrl+Q", "Quit (twice with unsaved changes)"),
];

pub const HELP_TITLE: &str = "Markdown Cheat Sheet";
pub const SAVE_TITLE: &str = "Save Markdown File";
pub const OPEN_TITLE: &str = "Load Markdown File";

fn section_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

fn dim_style() -> Style {
    Style::default().fg(Color::Indexed(245))
}

fn popup_block(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .padding(Padding::horizontal(1))
        .style(Style::default().bg(Color::Black).fg(Color::White))
}

/// Every line of the help sheet, before scrolling.
pub fn help_lines(model: &Model) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = Vec::new();

    for rule in MARKDOWN_RULES {
        lines.push(Line::styled(rule.title, section_style()));
        lines.push(Line::styled(format!("  {}", rule.description), dim_style()));
        for example in rule.examples {
            let rendered = style::preview_lines(&markdown::render(example), Style::default());
            for (source, shown) in example.lines().zip(rendered) {
                let mut spans = vec![Span::raw(format!("  {source:<34} "))];
                spans.extend(shown.spans);
                lines.push(Line::from(spans));
            }
        }
        lines.push(Line::raw(""));
    }

    lines.push(Line::styled("Keys", section_style()));
    for (keys, action) in KEY_BINDINGS {
        lines.push(Line::raw(format!("  {keys:<20}{action}")));
    }
    lines.push(Line::raw(""));

    let global_cfg = model
        .global_config_path
        .as_ref()
        .map_or_else(|| "<unknown>".to_string(), |p| p.display().to_string());
    lines.push(Line::styled("Storage", section_style()));
    lines.push(Line::raw(format!(
        "  Notes: {}",
        model.store.root().display()
    )));
    lines.push(Line::raw(format!("  Config: {global_cfg}")));
    lines
}

pub fn render_help_overlay(model: &Model, frame: &mut Frame, area: Rect) {
    let popup_width = area.width.saturating_sub(8).max(48);
    let popup_height = area.height.saturating_sub(4).max(12);
    let popup = centered_popup_rect(popup_width, popup_height, area);

    let block = popup_block(HELP_TITLE);
    let inner = block.inner(popup);
    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);

    let all_lines = help_lines(model);

    // Reserve 1 row at bottom for footer hint
    let content_height_u16 = inner.height.saturating_sub(1);
    let content_height = usize::from(content_height_u16);
    let max_scroll = all_lines.len().saturating_sub(content_height);
    let scroll = model.help_scroll_offset.min(max_scroll);

    let end = (scroll + content_height).min(all_lines.len());
    let visible: Vec<Line> = all_lines[scroll..end].to_vec();

    let content_area = Rect::new(inner.x, inner.y, inner.width, content_height_u16);
    frame.render_widget(Paragraph::new(visible), content_area);

    let footer_area = Rect::new(inner.x, inner.y + content_height_u16, inner.width, 1);
    let footer = Line::styled("j/k scroll \u{2502} Esc closes", dim_style());
    frame.render_widget(Paragraph::new(footer), footer_area);
}

pub fn render_save_overlay(input: &str, frame: &mut Frame, area: Rect) {
    let popup = centered_popup_rect(area.width.saturating_sub(8).min(60), 5, area);
    let block = popup_block(SAVE_TITLE);

    let lines = vec![
        Line::from(vec![
            Span::raw("Name: "),
            Span::styled(input.to_string(), Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(" ", Style::default().bg(Color::White)),
        ]),
        Line::raw(""),
        Line::styled("Enter saves \u{2502} Esc cancels", dim_style()),
    ];

    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

pub fn render_open_overlay(files: &[String], selected: usize, frame: &mut Frame, area: Rect) {
    let popup_width = area.width.saturating_sub(8).min(60);
    // Borders, hint and its spacer take 4 rows
    let wanted = u16::try_from(files.len().max(1)).unwrap_or(u16::MAX).saturating_add(4);
    let popup_height = wanted.min(area.height.saturating_sub(2).max(6));
    let popup = centered_popup_rect(popup_width, popup_height, area);

    let block = popup_block(OPEN_TITLE);
    let inner = block.inner(popup);
    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);

    let list_height = usize::from(inner.height.saturating_sub(2));
    let mut lines: Vec<Line> = Vec::new();
    if files.is_empty() {
        lines.push(Line::styled("No notes yet", dim_style()));
    } else {
        let start = selected.saturating_sub(list_height.saturating_sub(1));
        for (idx, name) in files.iter().enumerate().skip(start).take(list_height) {
            let line = if idx == selected {
                Line::styled(format!("> {name}"), Style::default().reversed())
            } else {
                Line::raw(format!("  {name}"))
            };
            lines.push(line);
        }
    }
    while lines.len() < list_height {
        lines.push(Line::raw(""));
    }
    lines.push(Line::raw(""));
    lines.push(Line::styled(
        "j/k select \u{2502} Enter opens \u{2502} Esc cancels",
        dim_style(),
    ));

    frame.render_widget(Paragraph::new(lines), inner);
}

pub fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w) / 2);
    let y = area.y + (area.height.saturating_sub(h) / 2);
    Rect::new(x, y, w, h)
}
