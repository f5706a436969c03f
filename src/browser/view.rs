//! Drawing the browser with ratatui widgets.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};
use ratatui::Frame;

use super::{Browser, Row};
use crate::render::format_node_line;

const DIR_STYLE: Style = Style::new().fg(Color::Blue).add_modifier(Modifier::BOLD);
const SYMLINK_STYLE: Style = Style::new().fg(Color::Cyan);
const SKIP_STYLE: Style = Style::new().fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT);
const SELECTED_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);
const LABEL_STYLE: Style = Style::new().add_modifier(Modifier::BOLD);
const HINT_STYLE: Style = Style::new().fg(Color::DarkGray);

const HELP: &str =
    " ↑↓/jk: Move  |  →/l: Open  |  ←/h: Fold/Parent  |  Space: Collapse [×]  |  s: Save  |  q: Quit";

const PROMPT_HELP: &str = " Enter: Save  |  Esc: Cancel  |  Backspace: Delete";

/// Sanitize control characters to avoid terminal control-sequence injection.
pub fn sanitize_terminal_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let code = c as u32;
                if code <= 0xFF {
                    out.push_str(&format!("\\x{:02X}", code));
                } else {
                    out.push_str(&format!("\\u{{{:X}}}", code));
                }
            }
            _ => out.push(c),
        }
    }
    out
}

/// Draw one frame: tree pane, details pane, status and help bars.
pub fn draw(frame: &mut Frame, browser: &mut Browser) {
    let [main, status, help] = Layout::vertical([
        Constraint::Min(3),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());
    let [tree_area, details_area] =
        Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)]).areas(main);

    draw_tree(frame, browser, tree_area);
    draw_details(frame, browser, details_area);

    let help_text = if let Some(input) = browser.save_as_input() {
        let prompt = Line::from(vec![
            Span::styled(" Save as: ", LABEL_STYLE),
            Span::raw(sanitize_terminal_text(input)),
            Span::styled("_", HINT_STYLE),
        ]);
        frame.render_widget(Paragraph::new(prompt), status);
        // The reason the prompt opened stays visible under it.
        browser
            .status()
            .map(sanitize_terminal_text)
            .unwrap_or_else(|| PROMPT_HELP.to_string())
    } else {
        let status_text = browser.status().map(sanitize_terminal_text).unwrap_or_else(|| {
            format!(" {}", sanitize_terminal_text(&browser.root_path().to_string_lossy()))
        });
        frame.render_widget(Paragraph::new(Line::raw(status_text)), status);
        HELP.to_string()
    };
    frame.render_widget(Paragraph::new(Line::styled(help_text, HINT_STYLE)), help);
}

fn draw_tree(frame: &mut Frame, browser: &mut Browser, area: Rect) {
    let items: Vec<ListItem> = browser
        .rows()
        .iter()
        .map(|row| ListItem::new(row_line(browser, row)))
        .collect();

    let mut list = List::new(items).block(Block::default().borders(Borders::ALL).title(" Tree "));
    if browser.use_color() {
        list = list.highlight_style(SELECTED_STYLE);
    } else {
        list = list.highlight_symbol("> ");
    }
    frame.render_stateful_widget(list, area, browser.list_state_mut());
}

fn row_line(browser: &Browser, row: &Row) -> Line<'static> {
    let node = browser.tree().node(row.id);
    let marker = if browser.is_expandable(row.id) {
        if browser.is_expanded(row.id) {
            "▾ "
        } else {
            "▸ "
        }
    } else {
        "  "
    };
    let indent = "  ".repeat(row.depth);
    let label = sanitize_terminal_text(&format_node_line(node));

    let style = if !browser.use_color() {
        Style::new()
    } else if node.skip() {
        SKIP_STYLE
    } else if node.is_symlink {
        SYMLINK_STYLE
    } else if node.is_dir {
        DIR_STYLE
    } else {
        Style::new()
    };
    Line::from(vec![Span::raw(format!("{indent}{marker}")), Span::styled(label, style)])
}

fn draw_details(frame: &mut Frame, browser: &Browser, area: Rect) {
    let details = browser.details();
    let kind = if details.is_dir { "folder" } else { "file" };
    let symlink = if details.is_symlink { "yes" } else { "no" };
    let skip = match (details.can_skip, details.skip) {
        (false, _) => "-",
        (true, true) => "[x]",
        (true, false) => "[ ]",
    };

    let lines = vec![
        Line::from(vec![
            Span::styled("Path: ", LABEL_STYLE),
            Span::raw(sanitize_terminal_text(&details.path.to_string_lossy())),
        ]),
        Line::from(vec![Span::styled("Type: ", LABEL_STYLE), Span::raw(kind)]),
        Line::from(vec![Span::styled("Symlink [→]: ", LABEL_STYLE), Span::raw(symlink)]),
        Line::from(vec![Span::styled("Collapse [×]: ", LABEL_STYLE), Span::raw(skip)]),
    ];
    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(" Details "));
    frame.render_widget(paragraph, area);
}
