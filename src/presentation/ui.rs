use crate::application::{App, AppMode, Focus};
use crate::domain::{contains_gurmukhi, NotificationLevel, TextBuffer, WorkflowState};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);
    render_panes(f, app, chunks[1]);
    render_status_bar(f, app, chunks[2]);

    if app.workflow.is_surface_open() {
        render_review_popup(f, app);
    }
    if matches!(app.mode, AppMode::Help) {
        render_help_popup(f, app.help_scroll);
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let model = if app.provider_name.is_empty() {
        "no model"
    } else {
        app.provider_name.as_str()
    };
    let header = Paragraph::new(format!(
        "Lipiantar - Roman Punjabi to Gurmukhi | {} | {}",
        model,
        app.workflow.state().label()
    ))
    .style(Style::default().fg(Color::Cyan));
    f.render_widget(header, area);
}

fn render_panes(f: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    for (row, panes) in rows.iter().zip([
        [Focus::RoughNotes, Focus::MainNotes],
        [Focus::RomanInput, Focus::GurmukhiNotes],
    ]) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(*row);
        for (column, pane) in columns.iter().zip(panes) {
            render_pane(f, app, pane, *column);
        }
    }
}

fn render_pane(f: &mut Frame, app: &App, pane: Focus, area: Rect) {
    let buffer = app.buffer(pane);
    let focused = app.focus == pane;
    let editing = focused && matches!(app.mode, AppMode::Editing);

    let mut title = pane.title().to_string();
    if contains_gurmukhi(buffer.text()) {
        title.push_str(" [pa]");
    }

    let border_style = if editing {
        Style::default().fg(Color::Green)
    } else if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let inner_width = area.width.saturating_sub(2) as usize;
    let inner_height = area.height.saturating_sub(2) as usize;
    let (lines, cursor_row) = buffer_rows(buffer, inner_width, editing);
    let scroll = cursor_row.saturating_sub(inner_height.saturating_sub(1));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(border_style),
        )
        .scroll((scroll.min(u16::MAX as usize) as u16, 0));
    f.render_widget(paragraph, area);
}

/// Splits a buffer into display rows of at most `width - 1` chars, leaving
/// a column for the cursor. Returns the rows and the row holding the cursor.
fn buffer_rows(buffer: &TextBuffer, width: usize, show_cursor: bool) -> (Vec<Line<'static>>, usize) {
    let width = width.saturating_sub(1).max(1);
    let text = buffer.text();
    let cursor = buffer.cursor();
    let mut rows = Vec::new();
    let mut cursor_row = 0;
    let mut line_start = 0;

    for line in text.split('\n') {
        let starts: Vec<usize> = line.char_indices().map(|(i, _)| i).collect();
        let mut first = 0;
        loop {
            let last = (first + width).min(starts.len());
            let from = starts.get(first).copied().unwrap_or(line.len());
            let to = starts.get(last).copied().unwrap_or(line.len());
            let is_last = last == starts.len();
            let row = &line[from..to];

            let local = cursor.checked_sub(line_start + from);
            match local {
                Some(offset) if offset < row.len() || (is_last && offset == row.len()) => {
                    cursor_row = rows.len();
                    if show_cursor {
                        rows.push(cursor_line(&row[..offset], &row[offset..]));
                    } else {
                        rows.push(Line::from(row.to_string()));
                    }
                }
                _ => rows.push(Line::from(row.to_string())),
            }

            if is_last {
                break;
            }
            first = last;
        }
        line_start += line.len() + 1;
    }

    (rows, cursor_row)
}

fn cursor_line(head: &str, tail: &str) -> Line<'static> {
    let (cursor_cell, rest) = match tail.chars().next() {
        Some(c) => (c.to_string(), &tail[c.len_utf8()..]),
        None => (" ".to_string(), ""),
    };
    Line::from(vec![
        Span::raw(head.to_string()),
        Span::styled(cursor_cell, Style::default().add_modifier(Modifier::REVERSED)),
        Span::raw(rest.to_string()),
    ])
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let (text, style) = match app.mode {
        AppMode::Normal if app.workflow.is_surface_open() => (
            "Review open | Enter/a: accept | Esc/c: cancel | r: re-translate | t/p: export .txt/.pdf".to_string(),
            Style::default().fg(Color::Magenta),
        ),
        AppMode::Normal => match &app.status {
            Some(notification) => (
                format!("{}: {}", notification.title, notification.description),
                notification_style(notification.level),
            ),
            None => (
                "Tab: switch pane | Enter: edit | Ctrl+T: translate | Ctrl+R: rough -> main | Ctrl+E/P: export | ?: help | q: quit".to_string(),
                Style::default(),
            ),
        },
        AppMode::Editing => (
            format!("Editing {} (Esc to stop, Ctrl+T to translate)", app.focus.title()),
            Style::default().fg(Color::Green),
        ),
        AppMode::Help => (
            "↑↓/jk: scroll | PgUp/PgDn: fast scroll | Home: top | Esc/q: close help".to_string(),
            Style::default().fg(Color::Cyan),
        ),
        AppMode::ExportNotes(format) => (
            format!(
                "Export main notes as .{}: {} (Enter to export, Esc to cancel)",
                format.extension(),
                app.filename_input
            ),
            Style::default().fg(Color::Yellow),
        ),
    };

    let status = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(style);
    f.render_widget(status, area);
}

fn notification_style(level: NotificationLevel) -> Style {
    match level {
        NotificationLevel::Info => Style::default().fg(Color::Green),
        NotificationLevel::Warning => Style::default().fg(Color::Yellow),
        NotificationLevel::Error => Style::default().fg(Color::Red),
    }
}

fn centered(area: Rect, width_pct: u16, height_pct: u16) -> Rect {
    let rows = Layout::vertical([
        Constraint::Percentage((100 - height_pct) / 2),
        Constraint::Percentage(height_pct),
        Constraint::Percentage((100 - height_pct) / 2),
    ])
    .split(area);
    Layout::horizontal([
        Constraint::Percentage((100 - width_pct) / 2),
        Constraint::Percentage(width_pct),
        Constraint::Percentage((100 - width_pct) / 2),
    ])
    .split(rows[1])[1]
}

fn render_review_popup(f: &mut Frame, app: &App) {
    let popup_area = centered(f.area(), 80, 70);
    f.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Translation Suggestion")
        .style(Style::default().fg(Color::White));
    let inner = block.inner(popup_area);
    f.render_widget(block, popup_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(inner);

    let original = app.workflow.original_text().unwrap_or_default();
    match app.workflow.state() {
        WorkflowState::Idle => {}
        WorkflowState::Translating { .. } => {
            let frame = SPINNER[app.spinner_tick % SPINNER.len()];
            let loading = Paragraph::new(format!("{} Translating your text...", frame))
                .style(Style::default().fg(Color::Cyan));
            f.render_widget(loading, chunks[0]);
        }
        WorkflowState::ReviewReady { translated, .. } => {
            render_side_by_side(f, chunks[0], original, Paragraph::new(translated.clone()));
        }
        WorkflowState::ReviewError { message, .. } => {
            let error = Paragraph::new(message.clone()).style(Style::default().fg(Color::Red));
            render_side_by_side(f, chunks[0], original, error);
        }
    }

    let enabled = Style::default().fg(Color::Green);
    let disabled = Style::default().fg(Color::DarkGray);
    let accept_style = if app.workflow.can_accept() { enabled } else { disabled };
    let retry_style = if app.workflow.can_translate() { enabled } else { disabled };
    let footer = Line::from(vec![
        Span::styled("Enter: accept", accept_style),
        Span::raw("  "),
        Span::styled("Esc: cancel", enabled),
        Span::raw("  "),
        Span::styled("r: re-translate", retry_style),
        Span::raw("  "),
        Span::styled("t/p: export .txt/.pdf", accept_style),
    ]);
    f.render_widget(Paragraph::new(footer), chunks[1]);
}

fn render_side_by_side(f: &mut Frame, area: Rect, original: &str, suggestion: Paragraph<'_>) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let original = Paragraph::new(original.to_string())
        .block(Block::default().borders(Borders::ALL).title("Original (Roman Punjabi)"))
        .wrap(Wrap { trim: false });
    f.render_widget(original, columns[0]);

    let suggestion = suggestion
        .block(Block::default().borders(Borders::ALL).title("Suggested (Gurmukhi Punjabi)"))
        .wrap(Wrap { trim: false });
    f.render_widget(suggestion, columns[1]);
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let popup_area = centered(f.area(), 80, 80);
    f.render_widget(Clear, popup_area);

    let help_text = get_help_text();
    let help_lines: Vec<&str> = help_text.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(format!("Lipiantar Help (Line {}/{})", start_line + 1, help_lines.len()))
            .style(Style::default().fg(Color::Cyan)))
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

fn get_help_text() -> String {
    r#"LIPIANTAR - ROMAN PUNJABI TO GURMUKHI

=== PANES ===
Rough Notes            Scratch pad for drafts and lyrics
Main Notes             Final notes, exported with Ctrl+E / Ctrl+P
Roman Punjabi          Text to translate
Main Notes (Gurmukhi)  Receives accepted translations

Panes containing Gurmukhi are marked [pa].

=== NAVIGATION ===
Tab / arrows / hjkl    Move between panes
Enter, i or F2         Edit the selected pane
Esc                    Stop editing
F1 or ?                Show this help
q                      Quit

=== TRANSLATION ===
Ctrl+T                 Translate the Roman Punjabi pane
                       Blank input is rejected without calling the model
Ctrl+B                 Copy Gurmukhi notes back into the input
Ctrl+Y                 Copy Gurmukhi notes to the clipboard

=== REVIEW WINDOW ===
Enter or a             Accept: replaces the Gurmukhi notes
Esc or c               Cancel and discard the suggestion
r or Ctrl+T            Translate again
t / p                  Export the suggestion as lipiantar_export.txt/.pdf

Closing the window while translating discards the late result.

=== NOTES WORKSPACE ===
Ctrl+R                 Copy rough notes into main notes (overwrites)
Ctrl+E                 Export main notes as .txt
Ctrl+P                 Export main notes as .pdf
                       Blank notes are never exported

=== CONFIGURATION ===
~/.lipiantar/config.toml holds the model, API key variable and
export settings. Set GEMINI_API_KEY before starting.
Set [export] pdf_font to a Gurmukhi TTF font for PDF output;
otherwise Helvetica is used.

=== HELP NAVIGATION ===
↑↓ or j/k              Scroll help text up/down one line
Page Up/Down           Scroll help text up/down 5 lines
Home                   Jump to top of help text
Esc/F1/?/q             Close this help window"#.to_string()
}
