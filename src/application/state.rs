//! Application state management for the notes and translation workspace.
//!
//! This module contains the main application state, the input modes and
//! the notification history shown in the status bar.

use crate::domain::{
    ExportError, ExportFormat, Notification, NotesWorkspace, Resolution, ReviewWorkflow,
    TextBuffer, TranslationRequest, TranslationResponse, WorkflowError,
};
use std::collections::VecDeque;
use std::path::PathBuf;

const MAX_NOTIFICATIONS: usize = 20;

/// Which pane receives editing keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    RoughNotes,
    MainNotes,
    RomanInput,
    GurmukhiNotes,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::RoughNotes => Focus::MainNotes,
            Focus::MainNotes => Focus::RomanInput,
            Focus::RomanInput => Focus::GurmukhiNotes,
            Focus::GurmukhiNotes => Focus::RoughNotes,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Focus::RoughNotes => Focus::GurmukhiNotes,
            Focus::MainNotes => Focus::RoughNotes,
            Focus::RomanInput => Focus::MainNotes,
            Focus::GurmukhiNotes => Focus::RomanInput,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Focus::RoughNotes => "Rough Notes",
            Focus::MainNotes => "Main Notes",
            Focus::RomanInput => "Roman Punjabi",
            Focus::GurmukhiNotes => "Main Notes (Gurmukhi)",
        }
    }
}

/// Represents the current mode of the application.
///
/// The review surface is not a mode: it is open whenever the
/// [`ReviewWorkflow`] is not idle, and takes over key handling while open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Navigation between panes, shortcuts available
    Normal,
    /// Typing into the focused pane
    Editing,
    /// Help screen is displayed
    Help,
    /// Filename prompt for exporting main notes
    ExportNotes(ExportFormat),
}

/// Main application state.
///
/// # Examples
///
/// ```
/// use lipiantar::application::{App, AppMode, Focus};
///
/// let app = App::default();
/// assert_eq!(app.mode, AppMode::Normal);
/// assert_eq!(app.focus, Focus::RomanInput);
/// ```
#[derive(Debug)]
pub struct App {
    /// Rough and main notes
    pub workspace: NotesWorkspace,
    /// Roman input, Gurmukhi notes and the review state machine
    pub workflow: ReviewWorkflow,
    pub focus: Focus,
    pub mode: AppMode,
    /// Scroll position in help text
    pub help_scroll: usize,
    /// Input buffer for filename entry
    pub filename_input: String,
    /// Cursor position within the filename input (byte offset)
    pub cursor_position: usize,
    /// Notification currently shown in the status bar
    pub status: Option<Notification>,
    /// Recent notifications, oldest first
    pub notifications: VecDeque<Notification>,
    /// Advances while a translation is in flight
    pub spinner_tick: usize,
    /// Name of the model backing translations, shown in the header
    pub provider_name: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            workspace: NotesWorkspace::default(),
            workflow: ReviewWorkflow::default(),
            focus: Focus::RomanInput,
            mode: AppMode::Normal,
            help_scroll: 0,
            filename_input: String::new(),
            cursor_position: 0,
            status: None,
            notifications: VecDeque::new(),
            spinner_tick: 0,
            provider_name: String::new(),
        }
    }
}

impl App {
    pub fn new(provider_name: impl Into<String>) -> Self {
        Self {
            provider_name: provider_name.into(),
            ..Self::default()
        }
    }

    /// Records a notification and shows it in the status bar.
    pub fn notify(&mut self, notification: Notification) {
        self.notifications.push_back(notification.clone());
        if self.notifications.len() > MAX_NOTIFICATIONS {
            self.notifications.pop_front();
        }
        self.status = Some(notification);
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    /// The quit key is only honoured when nothing else is in progress.
    pub fn can_quit(&self) -> bool {
        self.mode == AppMode::Normal && !self.workflow.is_surface_open()
    }

    pub fn tick(&mut self) {
        if self.workflow.is_translating() {
            self.spinner_tick = self.spinner_tick.wrapping_add(1);
        }
    }

    pub fn buffer(&self, focus: Focus) -> &TextBuffer {
        match focus {
            Focus::RoughNotes => &self.workspace.rough,
            Focus::MainNotes => &self.workspace.main,
            Focus::RomanInput => self.workflow.source(),
            Focus::GurmukhiNotes => self.workflow.notes(),
        }
    }

    pub fn focused_buffer_mut(&mut self) -> &mut TextBuffer {
        match self.focus {
            Focus::RoughNotes => &mut self.workspace.rough,
            Focus::MainNotes => &mut self.workspace.main,
            Focus::RomanInput => self.workflow.source_mut(),
            Focus::GurmukhiNotes => self.workflow.notes_mut(),
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_previous(&mut self) {
        self.focus = self.focus.previous();
    }

    pub fn start_editing(&mut self) {
        self.mode = AppMode::Editing;
        self.status = None;
    }

    pub fn finish_editing(&mut self) {
        self.mode = AppMode::Normal;
    }

    /// Starts translating the Roman input.
    ///
    /// Returns the request the caller must dispatch, or `None` when the
    /// input is blank (a warning is shown) or a request is already running.
    pub fn request_translation(&mut self) -> Option<TranslationRequest> {
        match self.workflow.translate() {
            Ok(request) => {
                self.status = None;
                Some(request)
            }
            Err(WorkflowError::EmptyInput) => {
                tracing::warn!("Translate requested with blank input");
                self.notify(Notification::warning(
                    "Input Required",
                    WorkflowError::EmptyInput.to_string(),
                ));
                None
            }
            Err(err) => {
                tracing::debug!("Translate ignored: {}", err);
                None
            }
        }
    }

    /// Applies a finished translation. Responses for superseded requests are
    /// dropped without any visible effect.
    pub fn apply_translation(&mut self, response: TranslationResponse) {
        match self.workflow.resolve(response.token, response.result) {
            Resolution::Ready => {
                tracing::info!(token = response.token.0, "Translation ready for review");
            }
            Resolution::Failed(message) => {
                self.notify(Notification::error("Translation Error", message));
            }
            Resolution::Stale => {
                tracing::debug!(token = response.token.0, "Discarding stale translation");
            }
        }
    }

    pub fn accept_translation(&mut self) {
        match self.workflow.accept() {
            Ok(()) => {
                tracing::info!("Translation accepted");
                self.focus = Focus::GurmukhiNotes;
                self.notify(Notification::info(
                    "Translation Accepted",
                    "The Gurmukhi text has been copied to the Main Notes area.",
                ));
            }
            Err(err) => tracing::debug!("Accept ignored: {}", err),
        }
    }

    pub fn cancel_translation(&mut self) {
        self.workflow.cancel();
    }

    pub fn copy_rough_to_main(&mut self) {
        self.workspace.copy_rough_to_main();
        self.notify(Notification::info(
            "Content Copied",
            "Rough notes have been copied to Main Notes.",
        ));
    }

    /// Copies the Gurmukhi notes back into the Roman input for another pass.
    pub fn copy_notes_to_input(&mut self) {
        if self.workflow.notes().is_blank() {
            return;
        }
        let notes = self.workflow.notes().text().to_string();
        self.workflow.source_mut().set_text(notes);
        self.focus = Focus::RomanInput;
        self.notify(Notification::info(
            "Content Copied",
            "Main Notes content copied to Roman Punjabi input for re-translation.",
        ));
    }

    /// Opens the filename prompt for exporting main notes. Blank notes are
    /// reported instead.
    pub fn start_notes_export(&mut self, format: ExportFormat) {
        if self.workspace.main.is_blank() {
            self.set_export_result(Err(ExportError::NothingToExport(
                Focus::MainNotes.title().to_string(),
            )));
            return;
        }
        self.mode = AppMode::ExportNotes(format);
        self.filename_input = Self::default_notes_filename(format);
        self.cursor_position = self.filename_input.len();
        self.status = None;
    }

    pub fn default_notes_filename(format: ExportFormat) -> String {
        format!("main_notes.{}", format.extension())
    }

    pub fn review_export_filename(format: ExportFormat) -> String {
        format!("lipiantar_export.{}", format.extension())
    }

    /// Gets the filename to use for exporting main notes.
    ///
    /// Falls back to the default name when the input is empty.
    pub fn get_export_filename(&self) -> String {
        match self.mode {
            AppMode::ExportNotes(format) if self.filename_input.trim().is_empty() => {
                Self::default_notes_filename(format)
            }
            AppMode::ExportNotes(_) => self.filename_input.trim().to_string(),
            _ => String::new(),
        }
    }

    pub fn cancel_filename_input(&mut self) {
        self.mode = AppMode::Normal;
        self.filename_input.clear();
        self.cursor_position = 0;
    }

    /// Processes the result of an export and returns to normal mode.
    pub fn set_export_result(&mut self, result: Result<PathBuf, ExportError>) {
        let notification = match result {
            Ok(path) => {
                let name = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                Notification::info(
                    "Export Successful",
                    format!("Notes exported as {} successfully!", name),
                )
            }
            Err(err @ ExportError::NothingToExport(_)) => {
                Notification::warning("Nothing to Export", format!("{}.", err))
            }
            Err(err) => {
                tracing::error!("Export failed: {}", err);
                Notification::error("Export Failed", err.to_string())
            }
        };
        self.notify(notification);

        if matches!(self.mode, AppMode::ExportNotes(_)) {
            self.cancel_filename_input();
        }
    }

    pub fn set_clipboard_result(&mut self, result: anyhow::Result<()>) {
        match result {
            Ok(()) => self.notify(Notification::info(
                "Copied",
                "Main Notes (Gurmukhi) copied to the clipboard.",
            )),
            Err(err) => {
                tracing::warn!("Clipboard unavailable: {}", err);
                self.notify(Notification::error("Clipboard Unavailable", err.to_string()));
            }
        }
    }
}
