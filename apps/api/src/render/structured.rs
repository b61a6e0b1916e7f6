//! Structured PDF layout: builds the resume straight from `CandidateRecord`
//! fields, styled by a `StyleSheet`. The generated text is not consulted.

use crate::layout::{Align, FontFace, Flowable, Paragraph, Rgb};
use crate::models::candidate::{is_present, CandidateRecord};
use crate::render::styles::StyleSheet;

const INCH: f32 = 72.0;
const BODY_SIZE: f32 = 10.0;
const DETAIL_SIZE: f32 = 9.0;
const DETAIL_COLOR: u32 = 0x6b7280;
const DEFAULT_NAME: &str = "Your Name";

struct Builder<'a> {
    sheet: &'a StyleSheet,
    out: Vec<Flowable>,
}

impl<'a> Builder<'a> {
    fn push(&mut self, paragraph: Paragraph) {
        self.out.push(Flowable::Paragraph(paragraph));
    }

    fn spacer(&mut self, inches: f32) {
        self.out.push(Flowable::Spacer(inches * INCH));
    }

    fn title(&mut self, name: &str) {
        let sheet = self.sheet;
        self.push(
            Paragraph::new(
                name.to_uppercase(),
                sheet.family.face(FontFace::Bold),
                sheet.title_size,
            )
            .color(Rgb::from_hex(sheet.title_color))
            .align(sheet.title_align)
            .space_after(6.0),
        );
    }

    fn contact(&mut self, parts: &[&str]) {
        let sheet = self.sheet;
        self.push(
            Paragraph::new(
                parts.join(" | "),
                sheet.family.face(FontFace::Regular),
                BODY_SIZE,
            )
            .color(Rgb::from_hex(DETAIL_COLOR))
            .align(Align::Center)
            .space_after(12.0),
        );
    }

    fn heading(&mut self, text: &str) {
        let sheet = self.sheet;
        self.push(
            Paragraph::new(
                text,
                sheet.family.face(FontFace::Bold),
                sheet.heading_size,
            )
            .color(Rgb::from_hex(sheet.heading_color))
            .space_before(12.0)
            .space_after(6.0)
            .frame(sheet.heading_border.map(|b| b.frame())),
        );
    }

    fn push_body(&mut self, text: &str) {
        let paragraph = Paragraph::new(text, self.sheet.family.face(FontFace::Regular), BODY_SIZE)
            .align(Align::Justify)
            .space_after(6.0);
        self.push(paragraph);
    }

    /// Bold lead followed by regular text, e.g. `Engineer | Acme`.
    fn lead_line(&mut self, lead: &str, rest: &str) {
        let family = self.sheet.family;
        let paragraph = Paragraph::new(lead, family.face(FontFace::Bold), BODY_SIZE)
            .with_span(rest, family.face(FontFace::Regular))
            .space_after(6.0);
        self.push(paragraph);
    }

    fn detail(&mut self, text: &str, face: FontFace) {
        let paragraph = Paragraph::new(text, self.sheet.family.face(face), DETAIL_SIZE)
            .color(Rgb::from_hex(DETAIL_COLOR))
            .space_after(6.0);
        self.push(paragraph);
    }
}

/// Builds the structured resume layout for `record` in the given style.
pub fn build_flowables(record: &CandidateRecord, sheet: &StyleSheet) -> Vec<Flowable> {
    let basic = &record.basic_info;
    let mut b = Builder {
        sheet,
        out: Vec::new(),
    };

    let name = if is_present(&basic.name) {
        basic.name.trim()
    } else {
        DEFAULT_NAME
    };
    b.title(name);

    let contact = basic.contact_parts();
    if !contact.is_empty() {
        b.contact(&contact);
    }
    b.spacer(0.2);

    if is_present(&basic.summary) {
        b.heading("PROFESSIONAL SUMMARY");
        b.push_body(basic.summary.trim());
        b.spacer(0.15);
    }

    if is_present(&basic.skills) {
        b.heading("SKILLS");
        b.push_body(basic.skills.trim());
        b.spacer(0.15);
    }

    let mut experience = record.meaningful_experience().peekable();
    if experience.peek().is_some() {
        b.heading("WORK EXPERIENCE");
        for exp in experience {
            b.lead_line(exp.title.trim(), &format!(" | {}", exp.company.trim()));
            b.detail(
                &format!("{} - {}", exp.start_date.trim(), exp.end_date.trim()),
                FontFace::Regular,
            );
            for line in exp.responsibilities.lines().filter(|l| is_present(l)) {
                b.push_body(&format!("\u{2022} {}", line.trim()));
            }
            b.spacer(0.1);
        }
    }

    let mut education = record.meaningful_education().peekable();
    if education.peek().is_some() {
        b.heading("EDUCATION");
        for edu in education {
            b.lead_line(
                edu.degree.trim(),
                &format!(" | {} | {}", edu.institution.trim(), edu.year.trim()),
            );
            b.spacer(0.05);
        }
    }

    let mut projects = record.meaningful_projects().peekable();
    if projects.peek().is_some() {
        b.heading("PROJECTS");
        for proj in projects {
            let bold = b.sheet.family.face(FontFace::Bold);
            b.push(Paragraph::new(proj.name.trim(), bold, BODY_SIZE).space_after(6.0));
            if is_present(&proj.description) {
                b.push_body(proj.description.trim());
            }
            if is_present(&proj.technologies) {
                b.detail(
                    &format!("Technologies: {}", proj.technologies.trim()),
                    FontFace::Italic,
                );
            }
            b.spacer(0.1);
        }
    }

    b.out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::StandardFont;
    use crate::models::candidate::{BasicInfo, EducationEntry, ExperienceEntry, ProjectEntry};
    use crate::render::styles::StyleName;

    fn texts(flowables: &[Flowable]) -> Vec<String> {
        flowables
            .iter()
            .filter_map(|f| match f {
                Flowable::Paragraph(p) => Some(p.plain_text()),
                Flowable::Spacer(_) => None,
            })
            .collect()
    }

    fn full_record() -> CandidateRecord {
        CandidateRecord {
            basic_info: BasicInfo {
                name: "Jane Q. Public".to_string(),
                email: "jane@example.com".to_string(),
                phone: "555-0100".to_string(),
                location: "Berlin".to_string(),
                linkedin_url: String::new(),
                target_title: "Engineer".to_string(),
                skills: "Rust, SQL".to_string(),
                summary: "Backend engineer.".to_string(),
            },
            experience: vec![
                ExperienceEntry {
                    title: "Engineer".to_string(),
                    company: "Acme".to_string(),
                    start_date: "2020".to_string(),
                    end_date: "Present".to_string(),
                    responsibilities: "Built APIs\n\n  Cut costs  ".to_string(),
                },
                ExperienceEntry::default(),
            ],
            education: vec![EducationEntry {
                degree: "B.S.".to_string(),
                institution: "TU".to_string(),
                year: "2019".to_string(),
            }],
            projects: vec![ProjectEntry {
                name: "Compiler".to_string(),
                description: String::new(),
                technologies: "Rust".to_string(),
            }],
        }
    }

    #[test]
    fn test_structured_sections_in_order() {
        let flowables = build_flowables(&full_record(), StyleName::Modern.sheet());
        assert_eq!(
            texts(&flowables),
            vec![
                "JANE Q. PUBLIC",
                "jane@example.com | 555-0100 | Berlin",
                "PROFESSIONAL SUMMARY",
                "Backend engineer.",
                "SKILLS",
                "Rust, SQL",
                "WORK EXPERIENCE",
                "Engineer | Acme",
                "2020 - Present",
                "\u{2022} Built APIs",
                "\u{2022} Cut costs",
                "EDUCATION",
                "B.S. | TU | 2019",
                "PROJECTS",
                "Compiler",
                "Technologies: Rust",
            ]
        );
    }

    #[test]
    fn test_empty_record_renders_placeholder_title_only() {
        let flowables = build_flowables(&CandidateRecord::default(), StyleName::Minimal.sheet());
        assert_eq!(texts(&flowables), vec!["YOUR NAME"]);
    }

    #[test]
    fn test_style_parameters_flow_through() {
        let record = full_record();
        let classic = build_flowables(&record, StyleName::Classic.sheet());
        let Flowable::Paragraph(title) = &classic[0] else {
            panic!("title first")
        };
        assert_eq!(title.spans[0].font, StandardFont::TimesBold);
        assert_eq!(title.size, 22.0);

        let heading = classic
            .iter()
            .find_map(|f| match f {
                Flowable::Paragraph(p) if p.plain_text() == "SKILLS" => Some(p),
                _ => None,
            })
            .unwrap();
        assert_eq!(heading.frame.unwrap().line_width, 1.0);

        let minimal = build_flowables(&record, StyleName::Minimal.sheet());
        let Flowable::Paragraph(title) = &minimal[0] else {
            panic!("title first")
        };
        assert_eq!(title.align, Align::Left);
    }

    #[test]
    fn test_job_header_mixes_bold_and_regular() {
        let flowables = build_flowables(&full_record(), StyleName::Creative.sheet());
        let header = flowables
            .iter()
            .find_map(|f| match f {
                Flowable::Paragraph(p) if p.plain_text() == "Engineer | Acme" => Some(p),
                _ => None,
            })
            .unwrap();
        assert_eq!(header.spans[0].font, StandardFont::HelveticaBold);
        assert_eq!(header.spans[1].font, StandardFont::Helvetica);
    }

    #[test]
    fn test_body_paragraphs_are_justified_regular_text() {
        let flowables = build_flowables(&full_record(), StyleName::Classic.sheet());
        for body in ["Backend engineer.", "Rust, SQL", "\u{2022} Cut costs"] {
            let paragraph = flowables
                .iter()
                .find_map(|f| match f {
                    Flowable::Paragraph(p) if p.plain_text() == body => Some(p),
                    _ => None,
                })
                .unwrap();
            assert_eq!(paragraph.align, Align::Justify, "{body}");
            assert_eq!(paragraph.spans[0].font, StandardFont::TimesRoman, "{body}");
            assert_eq!(paragraph.space_after, 6.0, "{body}");
        }
    }
}
