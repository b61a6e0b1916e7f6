//! Serialises laid-out pages into a PDF document with lopdf.
//!
//! Only the six standard Type1 fonts are referenced, so nothing is embedded.
//! Text is written as WinAnsi bytes in hex strings.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};

use crate::layout::encoding::encode_win_ansi;
use crate::layout::font_metrics::StandardFont;
use crate::layout::{LaidOutPage, PageConfig, Rgb};

fn real(v: f32) -> Object {
    Object::Real(v)
}

fn color_operands(color: Rgb) -> Vec<Object> {
    vec![real(color.r), real(color.g), real(color.b)]
}

fn hex_string(text: &str) -> Object {
    Object::String(encode_win_ansi(text), StringFormat::Hexadecimal)
}

/// Content-stream operations for one page.
fn page_operations(page: &LaidOutPage) -> Vec<Operation> {
    let mut ops = Vec::new();

    for rect in &page.rects {
        ops.push(Operation::new("q", vec![]));
        ops.push(Operation::new("RG", color_operands(rect.color)));
        ops.push(Operation::new("w", vec![real(rect.line_width)]));
        ops.push(Operation::new(
            "re",
            vec![real(rect.x), real(rect.y), real(rect.width), real(rect.height)],
        ));
        ops.push(Operation::new("S", vec![]));
        ops.push(Operation::new("Q", vec![]));
    }

    for line in &page.lines {
        ops.push(Operation::new("BT", vec![]));
        ops.push(Operation::new("rg", color_operands(line.color)));
        ops.push(Operation::new("Tw", vec![real(line.word_spacing)]));
        ops.push(Operation::new("Td", vec![real(line.x), real(line.baseline)]));
        for run in &line.runs {
            ops.push(Operation::new(
                "Tf",
                vec![Object::Name(run.font.resource_name().as_bytes().to_vec()), real(line.size)],
            ));
            ops.push(Operation::new("Tj", vec![hex_string(&run.text)]));
        }
        ops.push(Operation::new("ET", vec![]));
    }

    ops
}

fn font_resources(doc: &mut Document) -> Dictionary {
    let mut fonts = Dictionary::new();
    for font in StandardFont::ALL {
        let id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => font.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(font.resource_name(), id);
    }
    fonts
}

/// Writes `pages` to PDF bytes. `title` goes into the document info.
pub fn write_pdf(
    pages: &[LaidOutPage],
    config: &PageConfig,
    title: &str,
) -> Result<Vec<u8>, lopdf::Error> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let fonts = font_resources(&mut doc);
    let resources_id = doc.add_object(dictionary! {
        "Font" => fonts,
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for page in pages {
        let content = Content {
            operations: page_operations(page),
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id: ObjectId = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => vec![real(0.0), real(0.0), real(config.width), real(config.height)],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(encode_win_ansi(title)),
        "Producer" => Object::string_literal("CVReady"),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{default_page_config, layout, Flowable, Paragraph};

    fn pdf_for(flowables: &[Flowable]) -> Vec<u8> {
        let config = default_page_config();
        let pages = layout(flowables, &config);
        write_pdf(&pages, &config, "Test").unwrap()
    }

    #[test]
    fn test_output_is_a_loadable_pdf() {
        let bytes = pdf_for(&[Flowable::Paragraph(Paragraph::new(
            "Hello",
            StandardFont::Helvetica,
            10.0,
        ))]);
        assert!(bytes.starts_with(b"%PDF-1.5"));
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_empty_layout_is_still_one_page() {
        let bytes = pdf_for(&[]);
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_page_count_follows_layout() {
        let flowables: Vec<Flowable> = (0..150)
            .map(|i| {
                Flowable::Paragraph(Paragraph::new(
                    format!("Line {i}"),
                    StandardFont::Helvetica,
                    10.0,
                ))
            })
            .collect();
        let config = default_page_config();
        let pages = layout(&flowables, &config);
        let bytes = write_pdf(&pages, &config, "Test").unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), pages.len());
        assert!(pages.len() >= 2);
    }

    #[test]
    fn test_text_is_extractable() {
        let bytes = pdf_for(&[Flowable::Paragraph(
            Paragraph::new("WORK", StandardFont::HelveticaBold, 12.0)
                .with_span(" EXPERIENCE", StandardFont::Helvetica),
        )]);
        let text = pdf_extract::extract_text_from_mem(&bytes).unwrap();
        assert!(text.contains("WORK"), "{text}");
        assert!(text.contains("EXPERIENCE"), "{text}");
    }
}
