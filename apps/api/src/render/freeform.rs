//! Freeform PDF layout: generated text → classified lines → flowables.

use crate::layout::{Align, Flowable, Paragraph, Rgb, StandardFont};
use crate::render::classifier::{classify_text, LineClass};

const HEADING_SIZE: f32 = 13.0;
const HEADING_COLOR: u32 = 0x1e3a8a;
/// Space below every heading.
const HEADING_SPACING: f32 = 6.0;
const BODY_SIZE: f32 = 10.0;
const EMPHASIS_SIZE: f32 = 10.5;
const BULLET_INDENT: f32 = 15.0;
const BULLET_MARKER_OFFSET: f32 = 4.0;
const BLANK_LINE_SPACING: f32 = 6.0;

/// Maps one classified line to its flowable.
pub fn flowable_for(class: &LineClass) -> Flowable {
    match class {
        LineClass::Spacer => Flowable::Spacer(BLANK_LINE_SPACING),
        LineClass::Heading(text) => Flowable::Paragraph(
            Paragraph::new(text.as_str(), StandardFont::HelveticaBold, HEADING_SIZE)
                .color(Rgb::from_hex(HEADING_COLOR))
                .space_before(4.0)
                .space_after(HEADING_SPACING),
        ),
        LineClass::Bullet(text) => Flowable::Paragraph(
            Paragraph::new(text.as_str(), StandardFont::Helvetica, BODY_SIZE)
                .indent(BULLET_INDENT)
                .marker("-", StandardFont::Helvetica, BULLET_MARKER_OFFSET)
                .space_after(2.0),
        ),
        LineClass::Emphasis(text) => Flowable::Paragraph(
            Paragraph::new(text.as_str(), StandardFont::HelveticaBold, EMPHASIS_SIZE)
                .space_after(3.0),
        ),
        LineClass::Body(text) => Flowable::Paragraph(
            Paragraph::new(text.as_str(), StandardFont::Helvetica, BODY_SIZE)
                .align(Align::Justify)
                .space_after(4.0),
        ),
    }
}

/// Classifies `text` and returns both the classification and the flowables,
/// one flowable per line.
pub fn build_flowables(text: &str) -> (Vec<LineClass>, Vec<Flowable>) {
    let classes = classify_text(text);
    let flowables = classes.iter().map(flowable_for).collect();
    (classes, flowables)
}
