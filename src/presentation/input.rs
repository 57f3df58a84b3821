use crate::application::{App, AppMode, TranslationWorker};
use crate::domain::{ExportFormat, TextBuffer};
use crate::infrastructure::{clipboard, NotesExporter};
use crossterm::event::{KeyCode, KeyModifiers};

/// Collaborators the key handlers call out to.
pub struct Services {
    pub worker: TranslationWorker,
    pub exporter: NotesExporter,
}

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, services: &Services, key: KeyCode, modifiers: KeyModifiers) {
        match app.mode {
            AppMode::Help => Self::handle_help_mode(app, key),
            AppMode::ExportNotes(format) => Self::handle_filename_input_mode(app, services, key, format),
            AppMode::Editing => Self::handle_editing_mode(app, services, key, modifiers),
            AppMode::Normal if app.workflow.is_surface_open() => {
                Self::handle_review_mode(app, services, key, modifiers)
            }
            AppMode::Normal => Self::handle_normal_mode(app, services, key, modifiers),
        }
    }

    fn translate(app: &mut App, services: &Services) {
        if let Some(request) = app.request_translation() {
            services.worker.dispatch(request);
        }
    }

    fn handle_normal_mode(app: &mut App, services: &Services, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            match key {
                KeyCode::Char('t') => Self::translate(app, services),
                KeyCode::Char('r') => app.copy_rough_to_main(),
                KeyCode::Char('b') => app.copy_notes_to_input(),
                KeyCode::Char('e') => app.start_notes_export(ExportFormat::Txt),
                KeyCode::Char('p') => app.start_notes_export(ExportFormat::Pdf),
                KeyCode::Char('y') => {
                    let result = clipboard::copy(app.workflow.notes().text());
                    app.set_clipboard_result(result);
                }
                _ => {}
            }
            return;
        }

        app.clear_status();

        match key {
            KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') | KeyCode::Down | KeyCode::Char('j') => {
                app.focus_next();
            }
            KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') | KeyCode::Up | KeyCode::Char('k') => {
                app.focus_previous();
            }
            KeyCode::Enter | KeyCode::F(2) | KeyCode::Char('i') => {
                app.start_editing();
            }
            KeyCode::F(1) | KeyCode::Char('?') => {
                app.mode = AppMode::Help;
                app.help_scroll = 0;
            }
            KeyCode::Char('q') => {
                // Will be handled by main loop
            }
            _ => {}
        }
    }

    fn handle_editing_mode(app: &mut App, services: &Services, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            if key == KeyCode::Char('t') {
                app.finish_editing();
                Self::translate(app, services);
            }
            return;
        }

        match key {
            KeyCode::Esc => app.finish_editing(),
            KeyCode::Tab => {
                app.finish_editing();
                app.focus_next();
            }
            _ => Self::edit_buffer(app.focused_buffer_mut(), key),
        }
    }

    fn edit_buffer(buffer: &mut TextBuffer, key: KeyCode) {
        match key {
            KeyCode::Enter => buffer.insert_char('\n'),
            KeyCode::Backspace => buffer.backspace(),
            KeyCode::Delete => buffer.delete(),
            KeyCode::Left => buffer.move_left(),
            KeyCode::Right => buffer.move_right(),
            KeyCode::Home => buffer.move_home(),
            KeyCode::End => buffer.move_end(),
            KeyCode::Char(c) => buffer.insert_char(c),
            _ => {}
        }
    }

    fn handle_review_mode(app: &mut App, services: &Services, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            if key == KeyCode::Char('t') && app.workflow.can_translate() {
                Self::translate(app, services);
            }
            return;
        }

        match key {
            KeyCode::Esc | KeyCode::Char('c') => app.cancel_translation(),
            // Accept is disabled until there is text to accept
            KeyCode::Enter | KeyCode::Char('a') if app.workflow.can_accept() => {
                app.accept_translation();
            }
            KeyCode::Char('r') if app.workflow.can_translate() => {
                Self::translate(app, services);
            }
            KeyCode::Char('t') if !app.workflow.is_translating() => {
                Self::export_translation(app, services, ExportFormat::Txt);
            }
            KeyCode::Char('p') if !app.workflow.is_translating() => {
                Self::export_translation(app, services, ExportFormat::Pdf);
            }
            _ => {}
        }
    }

    fn export_translation(app: &mut App, services: &Services, format: ExportFormat) {
        let text = app.workflow.translated_text().unwrap_or_default().to_string();
        let result = services.exporter.export(
            "Translation",
            &text,
            &App::review_export_filename(format),
            format,
        );
        app.set_export_result(result);
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('q') => {
                app.mode = AppMode::Normal;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if app.help_scroll > 0 {
                    app.help_scroll -= 1;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.help_scroll += 1;
            }
            KeyCode::PageUp => {
                app.help_scroll = app.help_scroll.saturating_sub(5);
            }
            KeyCode::PageDown => {
                app.help_scroll += 5;
            }
            KeyCode::Home => {
                app.help_scroll = 0;
            }
            _ => {}
        }
    }

    fn handle_filename_input_mode(app: &mut App, services: &Services, key: KeyCode, format: ExportFormat) {
        match key {
            KeyCode::Enter => {
                let filename = app.get_export_filename();
                let result = services.exporter.export(
                    "Main Notes",
                    app.workspace.main.text(),
                    &filename,
                    format,
                );
                app.set_export_result(result);
            }
            KeyCode::Esc => {
                app.cancel_filename_input();
            }
            KeyCode::Backspace => {
                if let Some((prev, _)) = app.filename_input[..app.cursor_position].char_indices().next_back() {
                    app.filename_input.remove(prev);
                    app.cursor_position = prev;
                }
            }
            KeyCode::Delete => {
                if app.cursor_position < app.filename_input.len() {
                    app.filename_input.remove(app.cursor_position);
                }
            }
            KeyCode::Left => {
                if let Some((prev, _)) = app.filename_input[..app.cursor_position].char_indices().next_back() {
                    app.cursor_position = prev;
                }
            }
            KeyCode::Right => {
                if let Some(c) = app.filename_input[app.cursor_position..].chars().next() {
                    app.cursor_position += c.len_utf8();
                }
            }
            KeyCode::Home => {
                app.cursor_position = 0;
            }
            KeyCode::End => {
                app.cursor_position = app.filename_input.len();
            }
            KeyCode::Char(c) => {
                app.filename_input.insert(app.cursor_position, c);
                app.cursor_position += c.len_utf8();
            }
            _ => {}
        }
    }
}
