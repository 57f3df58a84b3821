//! Plain-text and PDF export of note buffers.

use crate::domain::{is_blank, ExportError, ExportFormat};
use crate::infrastructure::config::AppConfig;
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// A4 portrait.
const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
/// Space reserved below a row before it counts as overflowing the page.
const ROW_CLEARANCE_MM: f32 = 10.0;
/// Average glyph advance as a fraction of the font size.
const AVG_GLYPH_WIDTH_EM: f32 = 0.5;
const MM_PER_PT: f32 = 0.352_778;

#[derive(Debug, Clone, PartialEq)]
pub struct PdfLayout {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub margin_mm: f32,
    pub font_size: f32,
    pub line_height_mm: f32,
    pub font_path: Option<PathBuf>,
}

impl Default for PdfLayout {
    fn default() -> Self {
        Self {
            page_width_mm: PAGE_WIDTH_MM,
            page_height_mm: PAGE_HEIGHT_MM,
            margin_mm: 15.0,
            font_size: 12.0,
            line_height_mm: 7.0,
            font_path: None,
        }
    }
}

impl PdfLayout {
    /// Characters that fit between the margins at the configured size.
    pub fn chars_per_line(&self) -> usize {
        let printable = self.page_width_mm - self.margin_mm * 2.0;
        let glyph = self.font_size * AVG_GLYPH_WIDTH_EM * MM_PER_PT;
        ((printable / glyph).floor() as usize).max(1)
    }

    /// Splits `text` into pages of rows. Newlines are kept as row breaks and
    /// long lines are word-wrapped to [`Self::chars_per_line`].
    pub fn paginate(&self, text: &str) -> Vec<Vec<String>> {
        let width = self.chars_per_line();
        let mut pages = vec![Vec::new()];
        let mut cursor_y = self.margin_mm;

        for row in text.split('\n').flat_map(|line| wrap_line(line, width)) {
            if cursor_y + ROW_CLEARANCE_MM > self.page_height_mm - self.margin_mm {
                pages.push(Vec::new());
                cursor_y = self.margin_mm;
            }
            if let Some(page) = pages.last_mut() {
                page.push(row);
            }
            cursor_y += self.line_height_mm;
        }

        pages
    }
}

/// Greedy word wrap by character count. Words longer than `width` are split.
pub fn wrap_line(line: &str, width: usize) -> Vec<String> {
    let line = line.trim_end_matches('\r');
    let mut rows = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in line.split(' ') {
        let mut word_len = word.chars().count();
        let mut word = word.to_string();

        if current_len > 0 && current_len + 1 + word_len > width {
            rows.push(std::mem::take(&mut current));
            current_len = 0;
        }

        while word_len > width {
            let split_at = word
                .char_indices()
                .nth(width)
                .map_or(word.len(), |(i, _)| i);
            let rest = word.split_off(split_at);
            if current_len > 0 {
                rows.push(std::mem::take(&mut current));
                current_len = 0;
            }
            rows.push(word);
            word = rest;
            word_len = word.chars().count();
        }

        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(&word);
        current_len += word_len;
    }

    rows.push(current);
    rows
}

/// Writes note buffers to disk.
#[derive(Debug, Clone)]
pub struct NotesExporter {
    directory: PathBuf,
    layout: PdfLayout,
}

impl NotesExporter {
    pub fn new(directory: impl Into<PathBuf>, layout: PdfLayout) -> Self {
        Self {
            directory: directory.into(),
            layout,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let layout = PdfLayout {
            margin_mm: config.export.margin_mm,
            font_size: config.export.font_size,
            line_height_mm: config.export.line_height_mm,
            font_path: config.export.pdf_font.clone(),
            ..PdfLayout::default()
        };
        Self::new(config.export_dir(), layout)
    }

    /// Resolves `filename` against the export directory unless it is
    /// absolute.
    pub fn resolve_path(&self, filename: &str) -> PathBuf {
        let path = Path::new(filename);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.directory.join(path)
        }
    }

    /// Exports `text` and returns the written path.
    ///
    /// `label` names the buffer in the error when it is blank. Blank text
    /// never creates a file.
    pub fn export(
        &self,
        label: &str,
        text: &str,
        filename: &str,
        format: ExportFormat,
    ) -> Result<PathBuf, ExportError> {
        if is_blank(text) {
            return Err(ExportError::NothingToExport(label.to_string()));
        }

        let path = self.resolve_path(filename);
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        match format {
            ExportFormat::Txt => fs::write(&path, text.as_bytes())?,
            ExportFormat::Pdf => self.write_pdf(&path, text)?,
        }

        tracing::info!("Exported {} to {:?}", label, path);
        Ok(path)
    }

    fn write_pdf(&self, path: &Path, text: &str) -> Result<(), ExportError> {
        let layout = &self.layout;
        let (doc, first_page, first_layer) = PdfDocument::new(
            "Lipiantar notes",
            Mm(layout.page_width_mm),
            Mm(layout.page_height_mm),
            "Layer 1",
        );
        let font = self.load_font(&doc)?;

        for (index, rows) in layout.paginate(text).iter().enumerate() {
            let (page, layer) = if index == 0 {
                (first_page, first_layer)
            } else {
                doc.add_page(
                    Mm(layout.page_width_mm),
                    Mm(layout.page_height_mm),
                    format!("Layer {}", index + 1),
                )
            };
            let layer = doc.get_page(page).get_layer(layer);

            for (row, line) in rows.iter().enumerate() {
                // PDF origin is bottom-left
                let y = layout.page_height_mm - layout.margin_mm - row as f32 * layout.line_height_mm;
                layer.use_text(line.clone(), layout.font_size, Mm(layout.margin_mm), Mm(y), &font);
            }
        }

        let bytes = doc
            .save_to_bytes()
            .map_err(|e| ExportError::Pdf(e.to_string()))?;
        fs::write(path, bytes)?;
        Ok(())
    }

    /// Embeds the configured font, or falls back to Helvetica when it is not
    /// set or cannot be loaded.
    fn load_font(&self, doc: &PdfDocumentReference) -> Result<IndirectFontRef, ExportError> {
        if let Some(font_path) = &self.layout.font_path {
            match File::open(font_path) {
                Ok(file) => match doc.add_external_font(file) {
                    Ok(font) => return Ok(font),
                    Err(e) => tracing::warn!(
                        "Font {:?} could not be embedded ({}), falling back to Helvetica",
                        font_path,
                        e
                    ),
                },
                Err(e) => tracing::warn!(
                    "Font {:?} not found ({}), falling back to Helvetica",
                    font_path,
                    e
                ),
            }
        } else {
            tracing::debug!("No Gurmukhi font configured, using Helvetica");
        }

        doc.add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ExportError::Pdf(e.to_string()))
    }
}
