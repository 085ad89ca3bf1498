use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use unicode_width::UnicodeWidthChar;

use crate::app::{Model, Overlay, ViewMode};

use super::{overlays, status, style};

pub const EDITOR_TITLE: &str = "Markdown Editor";
pub const PREVIEW_TITLE: &str = "Output Preview";

pub fn split_panes(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area)
}

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();
    let main_area = Rect {
        height: area.height.saturating_sub(1),
        ..area
    };
    let footer_area = Rect {
        y: area.y + area.height.saturating_sub(1),
        height: area.height.min(1),
        ..area
    };

    match model.view_mode {
        ViewMode::Split => {
            let chunks = split_panes(main_area);
            render_editor(model, frame, chunks[0]);
            render_preview(model, frame, chunks[1]);
        }
        ViewMode::Preview => render_preview(model, frame, main_area),
    }

    // A toast temporarily takes the status bar's row
    if model.active_toast().is_some() {
        status::render_toast_bar(model, frame, footer_area);
    } else {
        status::render_status_bar(model, frame, footer_area);
    }

    match &model.overlay {
        Some(Overlay::Help) => overlays::render_help_overlay(model, frame, area),
        Some(Overlay::Save { input }) => overlays::render_save_overlay(input, frame, area),
        Some(Overlay::Open { files, selected }) => {
            overlays::render_open_overlay(files, *selected, frame, area);
        }
        None => {}
    }
}

fn pane_block(title: &str, focused: bool) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        })
}

fn render_editor(model: &Model, frame: &mut Frame, area: Rect) {
    let block = pane_block(EDITOR_TITLE, model.overlay.is_none());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let buf = model.session.buffer();
    let total_lines = buf.line_count();
    let gutter_width = line_number_width(total_lines);
    let text_width = usize::from(inner.width.saturating_sub(gutter_width + 1));

    let visible_height = usize::from(inner.height);
    let start = model.editor_scroll_offset.min(total_lines.saturating_sub(1));
    let end = (start + visible_height).min(total_lines);
    let cursor = buf.cursor();

    let cursor_chars: Vec<char> = display_chars(&buf.line_at(cursor.line).unwrap_or_default());
    let cursor_col = cursor.col.min(cursor_chars.len());
    let h_offset = horizontal_offset(&cursor_chars, cursor_col, text_width);

    let mut content: Vec<Line> = Vec::with_capacity(end.saturating_sub(start));
    for line_idx in start..end {
        let chars = display_chars(&buf.line_at(line_idx).unwrap_or_default());
        let line_num = format!("{:>width$} ", line_idx + 1, width = usize::from(gutter_width));
        let mut spans = vec![Span::styled(line_num, Style::default().fg(Color::DarkGray))];

        let visible: Vec<char> = chars.iter().copied().skip(h_offset).collect();
        if line_idx == cursor.line {
            // Split line at cursor position for cursor rendering
            let col = cursor_col.saturating_sub(h_offset).min(visible.len());
            let before: String = visible[..col].iter().collect();
            let cursor_char = visible.get(col).map_or_else(|| " ".to_string(), char::to_string);
            let after: String = visible.get(col + 1..).unwrap_or_default().iter().collect();

            if !before.is_empty() {
                spans.push(Span::raw(before));
            }
            spans.push(Span::styled(
                cursor_char,
                Style::default().bg(Color::White).fg(Color::Black),
            ));
            if !after.is_empty() {
                spans.push(Span::raw(after));
            }
        } else {
            spans.push(Span::raw(visible.into_iter().collect::<String>()));
        }

        content.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(content).style(model.pane_style), inner);
}

fn render_preview(model: &Model, frame: &mut Frame, area: Rect) {
    let focused = model.overlay.is_none() && model.view_mode == ViewMode::Preview;
    let block = pane_block(PREVIEW_TITLE, focused);
    let lines = style::preview_lines(model.session.preview(), model.pane_style);
    let scroll = u16::try_from(model.preview_scroll_offset).unwrap_or(u16::MAX);
    let preview = Paragraph::new(lines)
        .block(block)
        .style(model.pane_style)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(preview, area);
}

/// Chars of a buffer line as drawn; tabs show as a single space.
fn display_chars(line: &str) -> Vec<char> {
    line.chars()
        .map(|ch| if ch == '\t' { ' ' } else { ch })
        .collect()
}

/// First char column to draw so the cursor cell fits within `text_width`.
pub fn horizontal_offset(chars: &[char], col: usize, text_width: usize) -> usize {
    let col = col.min(chars.len());
    let mut start = 0;
    let mut width: usize = chars[..col].iter().map(|ch| ch.width().unwrap_or(0)).sum();
    while start < col && width + 1 > text_width {
        width -= chars[start].width().unwrap_or(0);
        start += 1;
    }
    start
}

/// Calculate the width needed for line numbers.
pub const fn line_number_width(total_lines: usize) -> u16 {
    if total_lines < 10 {
        1
    } else if total_lines < 100 {
        2
    } else if total_lines < 1_000 {
        3
    } else if total_lines < 10_000 {
        4
    } else if total_lines < 100_000 {
        5
    } else {
        6
    }
}
