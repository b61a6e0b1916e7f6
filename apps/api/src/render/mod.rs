// Document rendering: generated text and record → downloadable artifact.
// Text and markdown are passthroughs; PDF goes through either the freeform
// line classifier or the structured record layout, then the flow engine and
// the lopdf writer.

pub mod classifier;
pub mod freeform;
pub mod pdf;
pub mod structured;
pub mod styles;

use std::fmt;
use std::str::FromStr;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::layout::{default_page_config, layout};
use crate::models::candidate::{is_present, CandidateRecord};

pub use styles::StyleName;

const DEFAULT_BASE_NAME: &str = "resume";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Error: failed to write PDF: {0}")]
    Pdf(#[from] lopdf::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[serde(rename = "txt")]
    PlainText,
    #[serde(rename = "md")]
    Markdown,
    Pdf,
}

impl Format {
    pub fn extension(self) -> &'static str {
        match self {
            Format::PlainText => "txt",
            Format::Markdown => "md",
            Format::Pdf => "pdf",
        }
    }

    pub fn media_type(self) -> &'static str {
        match self {
            Format::PlainText => "text/plain",
            Format::Markdown => "text/markdown",
            Format::Pdf => "application/pdf",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "txt" => Ok(Format::PlainText),
            "md" => Ok(Format::Markdown),
            "pdf" => Ok(Format::Pdf),
            other => Err(format!("unknown format '{other}' (expected txt, md or pdf)")),
        }
    }
}

/// Which PDF strategy to use. Ignored for text formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PdfLayout {
    /// Classify the generated text line by line.
    #[default]
    Freeform,
    /// Lay out the record fields directly in the given style.
    Structured(StyleName),
}

#[derive(Debug, Clone)]
pub struct Artifact {
    pub file_name: String,
    pub media_type: &'static str,
    pub bytes: Bytes,
}

/// Candidate name with spaces, path separators, quotes and control
/// characters replaced by `_`, so the result is safe inside a quoted
/// `Content-Disposition` filename. Falls back to `resume` when the name is blank.
pub fn base_file_name(name: &str) -> String {
    if !is_present(name) {
        return DEFAULT_BASE_NAME.to_string();
    }
    name.trim()
        .chars()
        .map(|c| match c {
            ' ' | '/' | '\\' | '"' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

pub fn file_name(name: &str, format: Format) -> String {
    format!("{}_resume.{}", base_file_name(name), format.extension())
}

fn render_pdf(
    text: &str,
    record: &CandidateRecord,
    pdf_layout: PdfLayout,
) -> Result<Vec<u8>, RenderError> {
    let flowables = match pdf_layout {
        PdfLayout::Freeform => {
            let (classes, flowables) = freeform::build_flowables(text);
            debug!(lines = classes.len(), "classified generated text");
            flowables
        }
        PdfLayout::Structured(style) => structured::build_flowables(record, style.sheet()),
    };

    let config = default_page_config();
    let pages = layout(&flowables, &config);
    debug!(
        flowables = flowables.len(),
        pages = pages.len(),
        "laid out PDF"
    );

    let title = if is_present(&record.basic_info.name) {
        format!("{} - Resume", record.basic_info.name.trim())
    } else {
        "Resume".to_string()
    };
    Ok(pdf::write_pdf(&pages, &config, &title)?)
}

/// Renders `text` (or, for the structured PDF layout, `record`) into an
/// artifact of the requested format. CPU-bound for PDF output.
pub fn render(
    text: &str,
    record: &CandidateRecord,
    format: Format,
    pdf_layout: PdfLayout,
) -> Result<Artifact, RenderError> {
    let bytes = match format {
        Format::PlainText | Format::Markdown => Bytes::copy_from_slice(text.as_bytes()),
        Format::Pdf => Bytes::from(render_pdf(text, record, pdf_layout)?),
    };

    Ok(Artifact {
        file_name: file_name(&record.basic_info.name, format),
        media_type: format.media_type(),
        bytes,
    })
}
