use super::models::TextBuffer;

/// The two free-form note buffers. Nothing here talks to the translation
/// workflow.
#[derive(Debug, Clone, Default)]
pub struct NotesWorkspace {
    pub rough: TextBuffer,
    pub main: TextBuffer,
}

impl NotesWorkspace {
    /// Overwrites main notes with rough notes.
    pub fn copy_rough_to_main(&mut self) {
        self.main.set_text(self.rough.text());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_rough_to_main_overwrites() {
        let mut workspace = NotesWorkspace {
            rough: TextBuffer::new("chorus draft"),
            main: TextBuffer::new("older final version"),
        };

        workspace.copy_rough_to_main();

        assert_eq!(workspace.main.text(), "chorus draft");
        assert_eq!(workspace.rough.text(), "chorus draft");
    }

    #[test]
    fn test_copy_empty_rough_clears_main() {
        let mut workspace = NotesWorkspace {
            rough: TextBuffer::default(),
            main: TextBuffer::new("something"),
        };

        workspace.copy_rough_to_main();

        assert!(workspace.main.text().is_empty());
    }
}
