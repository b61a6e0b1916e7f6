//! Flow layout. Turns a list of styled paragraphs into positioned lines on pages.
//!
//! # Model
//! - `Flowable`s are laid out top to bottom inside the page margins.
//! - Paragraph text is greedy word-wrapped using the static font metrics;
//!   a paragraph may mix fonts across `Span`s.
//! - A line that no longer fits starts a new page. Framed paragraphs (bordered
//!   headings) move to the next page whole.
//! - Justified paragraphs stretch every line but the last through PDF word
//!   spacing, so no extra glyphs are emitted.
//!
//! Coordinates are PDF points with the origin at the bottom-left corner.

use serde::Serialize;

use crate::layout::font_metrics::{get_metrics, StandardFont};

// ────────────────────────────────────────────────────────────────────────────
// Page geometry
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct PageConfig {
    pub width: f32,
    pub height: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,
    pub margin_right: f32,
}

/// US letter, 0.5" top/bottom margins, 1" side margins.
pub fn default_page_config() -> PageConfig {
    PageConfig {
        width: 612.0,
        height: 792.0,
        margin_top: 36.0,
        margin_bottom: 36.0,
        margin_left: 72.0,
        margin_right: 72.0,
    }
}

impl PageConfig {
    pub fn text_width(&self) -> f32 {
        self.width - self.margin_left - self.margin_right
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Input model
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    /// `0x2563eb` → the CSS colour `#2563eb`.
    pub fn from_hex(hex: u32) -> Self {
        Rgb {
            r: ((hex >> 16) & 0xFF) as f32 / 255.0,
            g: ((hex >> 8) & 0xFF) as f32 / 255.0,
            b: (hex & 0xFF) as f32 / 255.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    Left,
    Center,
    /// Stretch every line except the last to the full width.
    Justify,
}

/// A run of text in a single font.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub text: String,
    pub font: StandardFont,
}

impl Span {
    pub fn new(text: impl Into<String>, font: StandardFont) -> Self {
        Self {
            text: text.into(),
            font,
        }
    }
}

/// Glyph drawn in the hanging indent of a paragraph's first line.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub span: Span,
    /// Distance from the left margin.
    pub offset: f32,
}

/// Border box drawn around a paragraph, `padding` outside the text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub color: Rgb,
    pub line_width: f32,
    pub padding: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    pub spans: Vec<Span>,
    pub size: f32,
    pub leading: f32,
    pub color: Rgb,
    pub align: Align,
    /// Left indent of every line.
    pub indent: f32,
    pub marker: Option<Marker>,
    pub space_before: f32,
    pub space_after: f32,
    pub frame: Option<Frame>,
}

impl Paragraph {
    /// Single-font paragraph, black, left-aligned, leading 1.2 × size.
    pub fn new(text: impl Into<String>, font: StandardFont, size: f32) -> Self {
        Self {
            spans: vec![Span::new(text, font)],
            size,
            leading: size * 1.2,
            color: Rgb::BLACK,
            align: Align::Left,
            indent: 0.0,
            marker: None,
            space_before: 0.0,
            space_after: 0.0,
            frame: None,
        }
    }

    pub fn with_span(mut self, text: impl Into<String>, font: StandardFont) -> Self {
        self.spans.push(Span::new(text, font));
        self
    }

    pub fn color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn indent(mut self, indent: f32) -> Self {
        self.indent = indent;
        self
    }

    pub fn marker(mut self, text: impl Into<String>, font: StandardFont, offset: f32) -> Self {
        self.marker = Some(Marker {
            span: Span::new(text, font),
            offset,
        });
        self
    }

    pub fn space_before(mut self, space: f32) -> Self {
        self.space_before = space;
        self
    }

    pub fn space_after(mut self, space: f32) -> Self {
        self.space_after = space;
        self
    }

    pub fn frame(mut self, frame: Option<Frame>) -> Self {
        self.frame = frame;
        self
    }

    /// All span text concatenated.
    #[cfg(test)]
    pub fn plain_text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Flowable {
    Paragraph(Paragraph),
    Spacer(f32),
}

// ────────────────────────────────────────────────────────────────────────────
// Output model
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedRun {
    pub font: StandardFont,
    pub text: String,
}

/// One line of text at a fixed baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub x: f32,
    pub baseline: f32,
    pub size: f32,
    pub color: Rgb,
    /// Extra space added to every space character (PDF `Tw`).
    pub word_spacing: f32,
    pub runs: Vec<PlacedRun>,
}

#[cfg(test)]
impl PlacedLine {
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub line_width: f32,
    pub color: Rgb,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LaidOutPage {
    pub lines: Vec<PlacedLine>,
    pub rects: Vec<PlacedRect>,
}

// ────────────────────────────────────────────────────────────────────────────
// Word wrapping
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
struct Piece {
    font: StandardFont,
    text: String,
}

#[derive(Debug, Clone)]
struct Word {
    pieces: Vec<Piece>,
    width: f32,
}

impl Word {
    fn lead_font(&self) -> StandardFont {
        self.pieces[0].font
    }
}

fn measure_pieces(pieces: &[Piece], size: f32) -> f32 {
    pieces
        .iter()
        .map(|p| get_metrics(p.font).measure_str(&p.text, size))
        .sum()
}

/// Splits spans into words on whitespace. A word may continue across a span
/// boundary when no whitespace separates them.
fn split_words(spans: &[Span], size: f32) -> Vec<Word> {
    let mut words = Vec::new();
    let mut current: Vec<Piece> = Vec::new();

    let finish = |current: &mut Vec<Piece>, words: &mut Vec<Word>| {
        if !current.is_empty() {
            let pieces = std::mem::take(current);
            let width = measure_pieces(&pieces, size);
            words.push(Word { pieces, width });
        }
    };

    for span in spans {
        for c in span.text.chars() {
            if c.is_whitespace() {
                finish(&mut current, &mut words);
                continue;
            }
            match current.last_mut() {
                Some(piece) if piece.font == span.font => piece.text.push(c),
                _ => current.push(Piece {
                    font: span.font,
                    text: c.to_string(),
                }),
            }
        }
    }
    finish(&mut current, &mut words);
    words
}

/// Breaks a word wider than `max_width` into chunks that fit (at least one
/// character per chunk).
fn split_oversized(word: Word, max_width: f32, size: f32) -> Vec<Word> {
    if word.width <= max_width {
        return vec![word];
    }

    let mut chunks = Vec::new();
    let mut pieces: Vec<Piece> = Vec::new();
    let mut width = 0.0_f32;

    for piece in word.pieces {
        let metrics = get_metrics(piece.font);
        for c in piece.text.chars() {
            let mut buf = [0u8; 4];
            let char_w = metrics.measure_str(c.encode_utf8(&mut buf), size);
            if width > 0.0 && width + char_w > max_width {
                chunks.push(Word {
                    pieces: std::mem::take(&mut pieces),
                    width,
                });
                width = 0.0;
            }
            match pieces.last_mut() {
                Some(p) if p.font == piece.font => p.text.push(c),
                _ => pieces.push(Piece {
                    font: piece.font,
                    text: c.to_string(),
                }),
            }
            width += char_w;
        }
    }
    if !pieces.is_empty() {
        chunks.push(Word { pieces, width });
    }
    chunks
}

/// Greedy word wrap. Returns lines of words with their natural width
/// (single spaces between words).
fn wrap_words(words: Vec<Word>, max_width: f32, size: f32) -> Vec<(Vec<Word>, f32)> {
    let mut lines: Vec<(Vec<Word>, f32)> = Vec::new();
    let mut line: Vec<Word> = Vec::new();
    let mut line_width = 0.0_f32;

    for word in words
        .into_iter()
        .flat_map(|w| split_oversized(w, max_width, size))
    {
        let space_w = if line.is_empty() {
            0.0
        } else {
            get_metrics(word.lead_font()).space_width(size)
        };

        if !line.is_empty() && line_width + space_w + word.width > max_width {
            lines.push((std::mem::take(&mut line), line_width));
            line_width = word.width;
            line.push(word);
        } else {
            line_width += space_w + word.width;
            line.push(word);
        }
    }
    if !line.is_empty() {
        lines.push((line, line_width));
    }
    lines
}

/// Merges a line's words into font runs, re-inserting the separating spaces.
fn line_runs(words: Vec<Word>) -> Vec<PlacedRun> {
    let mut runs: Vec<PlacedRun> = Vec::new();
    for (i, word) in words.into_iter().enumerate() {
        for (j, piece) in word.pieces.into_iter().enumerate() {
            let text = if i > 0 && j == 0 {
                format!(" {}", piece.text)
            } else {
                piece.text
            };
            match runs.last_mut() {
                Some(run) if run.font == piece.font => run.text.push_str(&text),
                _ => runs.push(PlacedRun {
                    font: piece.font,
                    text,
                }),
            }
        }
    }
    runs
}

/// Wraps a paragraph into lines of text at the paragraph's available width.
#[cfg(test)]
pub fn wrap_paragraph(paragraph: &Paragraph, config: &PageConfig) -> Vec<String> {
    let available = config.text_width() - paragraph.indent;
    let words = split_words(&paragraph.spans, paragraph.size);
    wrap_words(words, available, paragraph.size)
        .into_iter()
        .map(|(words, _)| line_runs(words).iter().map(|r| r.text.as_str()).collect())
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Page flow
// ────────────────────────────────────────────────────────────────────────────

struct Cursor<'a> {
    config: &'a PageConfig,
    pages: Vec<LaidOutPage>,
    y: f32,
}

impl<'a> Cursor<'a> {
    fn new(config: &'a PageConfig) -> Self {
        Self {
            config,
            pages: vec![LaidOutPage::default()],
            y: config.height - config.margin_top,
        }
    }

    fn top(&self) -> f32 {
        self.config.height - self.config.margin_top
    }

    fn at_top(&self) -> bool {
        (self.y - self.top()).abs() < f32::EPSILON
    }

    fn fits(&self, height: f32) -> bool {
        self.y - height >= self.config.margin_bottom - 0.01
    }

    fn new_page(&mut self) {
        self.pages.push(LaidOutPage::default());
        self.y = self.top();
    }

    fn page(&mut self) -> &mut LaidOutPage {
        // `pages` starts non-empty and only grows.
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn spacer(&mut self, height: f32) {
        if self.at_top() {
            return;
        }
        if self.fits(height) {
            self.y -= height;
        } else {
            self.new_page();
        }
    }

    fn paragraph(&mut self, paragraph: &Paragraph) {
        let config = self.config;
        let size = paragraph.size;
        let available = config.text_width() - paragraph.indent;
        let words = split_words(&paragraph.spans, size);
        if words.is_empty() {
            return;
        }
        let lines = wrap_words(words, available, size);
        let line_count = lines.len();
        let padding = paragraph.frame.map_or(0.0, |f| f.padding);

        if !self.at_top() {
            if self.fits(paragraph.space_before + padding) {
                self.y -= paragraph.space_before;
            } else {
                self.new_page();
            }
        }

        if paragraph.frame.is_some() {
            let block = line_count as f32 * paragraph.leading + 2.0 * padding;
            if !self.fits(block) && !self.at_top() {
                self.new_page();
            }
        }

        self.y -= padding;
        let frame_top = self.y + padding;
        let frame_page = self.pages.len();

        for (index, (words, natural_width)) in lines.into_iter().enumerate() {
            if !self.fits(paragraph.leading) && !self.at_top() {
                self.new_page();
            }
            let baseline = self.y - size;
            self.y -= paragraph.leading;

            let left = config.margin_left + paragraph.indent;
            let gaps = words.len().saturating_sub(1);
            let is_last = index + 1 == line_count;

            let (x, word_spacing) = match paragraph.align {
                Align::Left => (left, 0.0),
                Align::Center => (left + ((available - natural_width) / 2.0).max(0.0), 0.0),
                Align::Justify if !is_last && gaps > 0 => {
                    (left, ((available - natural_width) / gaps as f32).max(0.0))
                }
                Align::Justify => (left, 0.0),
            };

            if index == 0 {
                if let Some(marker) = &paragraph.marker {
                    let marker_line = PlacedLine {
                        x: config.margin_left + marker.offset,
                        baseline,
                        size,
                        color: paragraph.color,
                        word_spacing: 0.0,
                        runs: vec![PlacedRun {
                            font: marker.span.font,
                            text: marker.span.text.clone(),
                        }],
                    };
                    self.page().lines.push(marker_line);
                }
            }

            let line = PlacedLine {
                x,
                baseline,
                size,
                color: paragraph.color,
                word_spacing,
                runs: line_runs(words),
            };
            self.page().lines.push(line);
        }

        self.y -= padding;

        if let Some(frame) = paragraph.frame {
            // Framed blocks never straddle pages (see the fit check above).
            if self.pages.len() == frame_page {
                let rect = PlacedRect {
                    x: config.margin_left - frame.padding,
                    y: self.y,
                    width: config.text_width() + 2.0 * frame.padding,
                    height: frame_top - self.y,
                    line_width: frame.line_width,
                    color: frame.color,
                };
                self.page().rects.push(rect);
            }
        }

        self.y -= paragraph.space_after;
        if self.y < config.margin_bottom {
            self.y = config.margin_bottom;
        }
    }
}

/// Lays out `flowables` onto as many pages as needed. Always returns at least
/// one page.
pub fn layout(flowables: &[Flowable], config: &PageConfig) -> Vec<LaidOutPage> {
    let mut cursor = Cursor::new(config);
    for flowable in flowables {
        match flowable {
            Flowable::Paragraph(p) => cursor.paragraph(p),
            Flowable::Spacer(h) => cursor.spacer(*h),
        }
    }
    cursor.pages
}
