use super::*;
use crate::app::{Message, Model, ToastLevel, update};
use crate::session::Session;
use crate::store::DocumentStore;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::style::{Color, Modifier};

fn create_test_terminal() -> Terminal<TestBackend> {
    let backend = TestBackend::new(80, 24);
    Terminal::new(backend).unwrap()
}

fn create_model(text: &str) -> Model {
    Model::new(
        Session::from_text("notes.md", text),
        DocumentStore::new("/tmp/marknote-ui-tests"),
        (80, 24),
    )
}

fn screen_text(terminal: &Terminal<TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    let width = usize::from(buffer.area.width);
    buffer
        .content()
        .chunks(width)
        .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

fn draw(model: &Model) -> Terminal<TestBackend> {
    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(model, frame)).unwrap();
    terminal
}

#[test]
fn test_split_view_shows_both_panes() {
    let terminal = draw(&create_model("hello **world**"));
    let content = screen_text(&terminal);
    assert!(content.contains(EDITOR_TITLE));
    assert!(content.contains(PREVIEW_TITLE));
    assert!(content.contains("hello **world**"), "raw text in editor");
    assert!(content.contains("hello world"), "rendered text in preview");
}

#[test]
fn test_preview_mode_hides_editor() {
    let model = update(create_model("*text*"), Message::TogglePreview);
    let terminal = draw(&model);
    let content = screen_text(&terminal);
    assert!(!content.contains(EDITOR_TITLE));
    assert!(content.contains(PREVIEW_TITLE));
}

#[test]
fn test_status_bar_shows_name_and_counts() {
    let terminal = draw(&create_model("one two three"));
    let last_row = screen_text(&terminal).lines().last().unwrap().to_string();
    assert!(last_row.contains("File: notes.md"));
    assert!(last_row.contains("Characters: 13"));
    assert!(last_row.contains("Words: 3"));
}

#[test]
fn test_status_text_marks_unsaved_changes() {
    let model = update(create_model("x"), Message::InsertChar('y'));
    assert!(status_text(&model).contains("[modified]"));
}

#[test]
fn test_preview_applies_bold_modifier() {
    let terminal = draw(&create_model("**B**"));
    let buffer = terminal.backend().buffer();
    let right_pane = split_panes(ratatui::layout::Rect::new(0, 0, 80, 23))[1];
    let cell = &buffer[(right_pane.x + 1, right_pane.y + 1)];
    assert_eq!(cell.symbol(), "B");
    assert!(cell.modifier.contains(Modifier::BOLD));
}

#[test]
fn test_editor_draws_line_numbers_and_cursor() {
    let terminal = draw(&create_model("first\nsecond"));
    let buffer = terminal.backend().buffer();
    // border, then gutter "1 ", then the cursor on 'f'
    assert_eq!(buffer[(1, 1)].symbol(), "1");
    assert_eq!(buffer[(1, 2)].symbol(), "2");
    let cursor_cell = &buffer[(3, 1)];
    assert_eq!(cursor_cell.symbol(), "f");
    assert_eq!(cursor_cell.bg, Color::White);
}

#[test]
fn test_pane_colors_apply() {
    let mut model = create_model("plain");
    model.pane_style = style::pane_style(Some("yellow"), Some("blue"));
    let terminal = draw(&model);
    let buffer = terminal.backend().buffer();
    let right_pane = split_panes(ratatui::layout::Rect::new(0, 0, 80, 23))[1];
    let cell = &buffer[(right_pane.x + 1, right_pane.y + 1)];
    assert_eq!(cell.symbol(), "p");
    assert_eq!(cell.fg, Color::Yellow);
    assert_eq!(cell.bg, Color::Blue);
}

#[test]
fn test_fallback_message_reaches_preview() {
    let renderer = crate::markdown::Renderer::new(crate::markdown::RenderLimits {
        max_document_bytes: 4,
        max_line_bytes: 4,
    });
    let mut session = Session::with_renderer(renderer);
    session.edit(|buf| buf.insert_str("too long for limits"));
    let model = Model::new(session, DocumentStore::new("/tmp"), (80, 24));
    let terminal = draw(&model);
    assert!(screen_text(&terminal).contains(crate::markdown::FALLBACK_MESSAGE));
}

#[test]
fn test_help_overlay_shows_cheat_sheet() {
    let model = update(create_model(""), Message::ToggleHelp);
    let terminal = draw(&model);
    let content = screen_text(&terminal);
    assert!(content.contains(HELP_TITLE));
    assert!(content.contains("Headings"));
}

#[test]
fn test_help_lines_cover_rules_and_storage() {
    let lines = help_lines(&create_model(""));
    let text: Vec<String> = lines
        .iter()
        .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
        .collect();
    for title in [
        "Headings",
        "Emphasis",
        "Lists",
        "Links",
        "Code",
        "Blockquotes",
        "Horizontal Rule",
        "Keys",
        "Storage",
    ] {
        assert!(text.iter().any(|l| l == title), "missing section {title}");
    }
    assert!(text.iter().any(|l| l.contains("/tmp/marknote-ui-tests")));
}

#[test]
fn test_save_overlay_shows_prefilled_name() {
    let model = update(create_model(""), Message::StartSave);
    let terminal = draw(&model);
    let content = screen_text(&terminal);
    assert!(content.contains(SAVE_TITLE));
    assert!(content.contains("Name: notes.md"));
}

#[test]
fn test_open_overlay_marks_selection() {
    let mut model = create_model("");
    model.overlay = Some(crate::app::Overlay::Open {
        files: vec!["a.md".to_string(), "b.md".to_string()],
        selected: 1,
    });
    let terminal = draw(&model);
    let content = screen_text(&terminal);
    assert!(content.contains(OPEN_TITLE));
    assert!(content.contains("> b.md"));
    assert!(content.contains("  a.md"));
}

#[test]
fn test_empty_open_overlay_says_so() {
    let mut model = create_model("");
    model.overlay = Some(crate::app::Overlay::Open {
        files: Vec::new(),
        selected: 0,
    });
    let terminal = draw(&model);
    assert!(screen_text(&terminal).contains("No notes yet"));
}

#[test]
fn test_toast_replaces_status_bar() {
    let mut model = create_model("");
    model.show_toast(ToastLevel::Error, "Save failed: disk full");
    let terminal = draw(&model);
    let last_row = screen_text(&terminal).lines().last().unwrap().to_string();
    assert!(last_row.contains("[error] Save failed: disk full"));
    assert!(!last_row.contains("Characters:"));
}

#[test]
fn test_long_line_scrolls_horizontally_with_cursor() {
    let long = format!("{}END", "x".repeat(100));
    let model = update(create_model(&long), Message::MoveEnd);
    let terminal = draw(&model);
    let content = screen_text(&terminal);
    let editor_row = content.lines().nth(1).unwrap();
    let left_pane: String = editor_row.chars().take(40).collect();
    assert!(left_pane.contains("END"));
}

#[test]
fn test_tiny_terminal_does_not_panic() {
    let model = update(create_model("text"), Message::ToggleHelp);
    let mut terminal = Terminal::new(TestBackend::new(10, 3)).unwrap();
    terminal.draw(|frame| render(&model, frame)).unwrap();
}

#[test]
fn test_centered_popup_rect_is_clamped() {
    let area = ratatui::layout::Rect::new(0, 0, 20, 10);
    let popup = centered_popup_rect(40, 4, area);
    assert_eq!(popup, ratatui::layout::Rect::new(0, 3, 20, 4));
}
