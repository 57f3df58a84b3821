use serde::{Deserialize, Serialize};

/// Editable text with a cursor kept on a UTF-8 char boundary.
///
/// Gurmukhi characters are multi-byte, so every cursor movement steps over
/// whole chars rather than bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    text: String,
    cursor: usize,
}

impl TextBuffer {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.len();
        Self { text, cursor }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Byte offset of the cursor.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_blank(&self) -> bool {
        is_blank(&self.text)
    }

    /// Replaces the whole buffer and moves the cursor to the end.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.text.len();
    }

    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.text.replace_range(prev..self.cursor, "");
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if let Some(next) = self.next_boundary() {
            self.text.replace_range(self.cursor..next, "");
        }
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.cursor = prev;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(next) = self.next_boundary() {
            self.cursor = next;
        }
    }

    /// Moves to the start of the current line.
    pub fn move_home(&mut self) {
        self.cursor = self.text[..self.cursor].rfind('\n').map_or(0, |i| i + 1);
    }

    /// Moves to the end of the current line.
    pub fn move_end(&mut self) {
        self.cursor = self.text[self.cursor..]
            .find('\n')
            .map_or(self.text.len(), |i| self.cursor + i);
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.text[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
    }

    fn next_boundary(&self) -> Option<usize> {
        self.text[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
    }
}

/// True when `text` has nothing but whitespace and byte-order marks.
pub fn is_blank(text: &str) -> bool {
    text.chars().all(|c| c.is_whitespace() || c == '\u{FEFF}')
}

/// Returns true when `text` contains any character from the Gurmukhi block.
pub fn contains_gurmukhi(text: &str) -> bool {
    text.chars().any(|c| ('\u{0A00}'..='\u{0A7F}').contains(&c))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Warning,
    Error,
}

/// A transient, user-visible message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn warning(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Warning,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            title: title.into(),
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Txt,
    Pdf,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Txt => "txt",
            ExportFormat::Pdf => "pdf",
        }
    }
}

/// Identifies one dispatched translation. Tokens only ever increase within a
/// workflow, so a response carrying an older token is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(pub u64);

/// A translation the workflow has committed to and that still needs running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub token: RequestToken,
    pub roman_text: String,
}

/// The outcome of a dispatched request, tagged with the token it was issued
/// under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationResponse {
    pub token: RequestToken,
    pub result: TranslationResult,
}

/// Result of the translation boundary call.
///
/// Serializes to `{"gurmukhiText": ...}` or `{"error": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TranslationResult {
    Translated {
        #[serde(rename = "gurmukhiText")]
        gurmukhi_text: String,
    },
    Failed {
        error: String,
    },
}

impl TranslationResult {
    pub fn translated(text: impl Into<String>) -> Self {
        TranslationResult::Translated {
            gurmukhi_text: text.into(),
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        TranslationResult::Failed {
            error: error.into(),
        }
    }
}

/// Input schema of the translation prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateInput {
    pub roman_punjabi_text: String,
}

/// Output schema of the translation prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateOutput {
    pub gurmukhi_punjabi_text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_buffer_editing_gurmukhi() {
        let mut buffer = TextBuffer::new("ਹੋ");
        assert_eq!(buffer.cursor(), "ਹੋ".len());

        buffer.move_left();
        buffer.insert_char('ਜ');
        assert_eq!(buffer.text(), "ਹਜੋ");

        buffer.backspace();
        assert_eq!(buffer.text(), "ਹੋ");

        buffer.move_left();
        buffer.delete();
        assert_eq!(buffer.text(), "ੋ");
        assert_eq!(buffer.cursor(), 0);

        // No movement past either end
        buffer.move_left();
        assert_eq!(buffer.cursor(), 0);
        buffer.move_end();
        buffer.move_right();
        assert_eq!(buffer.cursor(), "ੋ".len());
    }

    #[test]
    fn test_text_buffer_line_navigation() {
        let mut buffer = TextBuffer::new("first\nsecond");

        buffer.move_home();
        assert_eq!(buffer.cursor(), 6);
        buffer.move_left();
        assert_eq!(buffer.cursor(), 5);
        buffer.move_home();
        assert_eq!(buffer.cursor(), 0);
        buffer.move_end();
        assert_eq!(buffer.cursor(), 5);
    }

    #[test]
    fn test_text_buffer_blank() {
        assert!(TextBuffer::default().is_blank());
        assert!(TextBuffer::new(" \n\t").is_blank());
        assert!(!TextBuffer::new(" a ").is_blank());
        // Pasted text often carries a leading BOM
        assert!(TextBuffer::new("\u{FEFF}").is_blank());
        assert!(TextBuffer::new(" \u{FEFF}\n").is_blank());
        assert!(!TextBuffer::new("\u{FEFF}sat").is_blank());
    }

    #[test]
    fn test_contains_gurmukhi() {
        assert!(contains_gurmukhi("ਹੋ ਜਦ ਵੀ ਬੋਲੇ"));
        assert!(contains_gurmukhi("mixed ਸ text"));
        assert!(!contains_gurmukhi("Ho jadd vi bole"));
        assert!(!contains_gurmukhi("नमस्ते"));
    }

    #[test]
    fn test_translation_result_wire_shape() {
        let ok = serde_json::to_value(TranslationResult::translated("ਹੋ")).unwrap();
        assert_eq!(ok, serde_json::json!({ "gurmukhiText": "ਹੋ" }));

        let err = serde_json::to_value(TranslationResult::failed("boom")).unwrap();
        assert_eq!(err, serde_json::json!({ "error": "boom" }));
    }

    #[test]
    fn test_prompt_schema_field_names() {
        let input = TranslateInput {
            roman_punjabi_text: "sat sri akal".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&input).unwrap(),
            serde_json::json!({ "romanPunjabiText": "sat sri akal" })
        );

        let output: TranslateOutput =
            serde_json::from_str(r#"{"gurmukhiPunjabiText":"ਸਤ ਸ੍ਰੀ ਅਕਾਲ"}"#).unwrap();
        assert_eq!(output.gurmukhi_punjabi_text, "ਸਤ ਸ੍ਰੀ ਅਕਾਲ");
    }
}
