//! Prompt builder: turns a `CandidateRecord` into the resume prompt.
//!
//! Pure and total: blank fields become placeholders, blank list entries are
//! skipped, and identical records always produce byte-identical prompts.

use std::fmt::Write;

use crate::generation::prompts::{
    MISSING_FIELD_PLACEHOLDER, RESUME_INSTRUCTIONS, RESUME_PROMPT_INTRO, SUMMARY_PLACEHOLDER,
};
use crate::models::candidate::{is_present, CandidateRecord};

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if is_present(value) {
        value.trim()
    } else {
        placeholder
    }
}

fn field(value: &str) -> &str {
    or_placeholder(value, MISSING_FIELD_PLACEHOLDER)
}

/// Builds the full prompt for one resume generation.
pub fn build_prompt(record: &CandidateRecord) -> String {
    let basic = &record.basic_info;
    let mut prompt = String::with_capacity(2048);

    // `write!` into a String cannot fail.
    let _ = write!(
        prompt,
        "{RESUME_PROMPT_INTRO}

PERSONAL INFORMATION:
Name: {}
Email: {}
Phone: {}
Location: {}
LinkedIn: {}
Target Job Title: {}

SKILLS:
{}

PROFESSIONAL SUMMARY:
{}

WORK EXPERIENCE:",
        field(&basic.name),
        field(&basic.email),
        field(&basic.phone),
        field(&basic.location),
        field(&basic.linkedin_url),
        field(&basic.target_title),
        field(&basic.skills),
        or_placeholder(&basic.summary, SUMMARY_PLACEHOLDER),
    );

    for exp in record.meaningful_experience() {
        let _ = write!(
            prompt,
            "\n\n{} at {}\n{} - {}\n{}",
            exp.title.trim(),
            field(&exp.company),
            exp.start_date.trim(),
            exp.end_date.trim(),
            exp.responsibilities.trim(),
        );
    }

    prompt.push_str("\n\nEDUCATION:");
    for edu in record.meaningful_education() {
        let _ = write!(
            prompt,
            "\n{}, {}, {}",
            edu.degree.trim(),
            edu.institution.trim(),
            edu.year.trim(),
        );
    }

    let mut projects = record.meaningful_projects().peekable();
    if projects.peek().is_some() {
        prompt.push_str("\n\nPROJECTS:");
        for proj in projects {
            let _ = write!(
                prompt,
                "\n\n{}\n{}\nTechnologies: {}",
                proj.name.trim(),
                proj.description.trim(),
                proj.technologies.trim(),
            );
        }
    }

    prompt.push_str("\n\n");
    prompt.push_str(RESUME_INSTRUCTIONS);
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::candidate::{BasicInfo, EducationEntry, ExperienceEntry, ProjectEntry};

    fn sample_record() -> CandidateRecord {
        CandidateRecord {
            basic_info: BasicInfo {
                name: "Jane Q. Public".to_string(),
                email: "jane@example.com".to_string(),
                phone: "555-0100".to_string(),
                location: "Berlin".to_string(),
                linkedin_url: String::new(),
                target_title: "Backend Engineer".to_string(),
                skills: "Rust, PostgreSQL, Kubernetes".to_string(),
                summary: String::new(),
            },
            experience: vec![
                ExperienceEntry {
                    title: "Software Engineer".to_string(),
                    company: "Acme".to_string(),
                    start_date: "01/2020".to_string(),
                    end_date: "Present".to_string(),
                    responsibilities: "Built billing service\nCut p99 latency".to_string(),
                },
                ExperienceEntry {
                    title: String::new(),
                    company: "Phantom Ltd".to_string(),
                    ..Default::default()
                },
            ],
            education: vec![
                EducationEntry {
                    degree: "B.S. Computer Science".to_string(),
                    institution: "TU Berlin".to_string(),
                    year: "2019".to_string(),
                },
                EducationEntry {
                    degree: "  ".to_string(),
                    institution: "Nowhere College".to_string(),
                    year: "1999".to_string(),
                },
            ],
            projects: vec![],
        }
    }

    #[test]
    fn test_build_prompt_is_deterministic() {
        let record = sample_record();
        assert_eq!(build_prompt(&record), build_prompt(&record.clone()));
    }

    #[test]
    fn test_build_prompt_golden_output() {
        let expected = "Create a professional, ATS-friendly resume for the following candidate:

PERSONAL INFORMATION:
Name: Jane Q. Public
Email: jane@example.com
Phone: 555-0100
Location: Berlin
LinkedIn: N/A
Target Job Title: Backend Engineer

SKILLS:
Rust, PostgreSQL, Kubernetes

PROFESSIONAL SUMMARY:
Generate a compelling 3-4 sentence professional summary

WORK EXPERIENCE:

Software Engineer at Acme
01/2020 - Present
Built billing service
Cut p99 latency

EDUCATION:
B.S. Computer Science, TU Berlin, 2019

Please create a well-structured, professional resume with:
1. A compelling professional summary (if not provided, create one)
2. Optimized work experience with achievement-focused bullet points
3. Relevant skills section
4. Clean formatting suitable for ATS systems
5. Action verbs and quantified achievements (numbers, percentages, time or money saved) wherever the details support them

FORMATTING RULES (follow exactly):
- Do NOT use asterisks (*) anywhere in the output, not for bold and not for bullets
- Start every bullet point with a dash followed by a space (\"- \")
- Write every section header in UPPERCASE on its own line, for example PROFESSIONAL SUMMARY, SKILLS, WORK EXPERIENCE, EDUCATION, PROJECTS
- Put job title, company and dates on one line separated by \" | \"
- Leave one blank line between sections
- Output plain text only, with no markdown headings, tables or code fences";
        assert_eq!(build_prompt(&sample_record()), expected);
    }

    #[test]
    fn test_build_prompt_skips_blank_anchor_entries() {
        let prompt = build_prompt(&sample_record());
        assert!(prompt.contains("Software Engineer at Acme"));
        assert!(!prompt.contains("Phantom Ltd"));
        assert!(prompt.contains("B.S. Computer Science, TU Berlin, 2019"));
        assert!(!prompt.contains("Nowhere College"));
    }

    #[test]
    fn test_build_prompt_omits_projects_section_when_all_unnamed() {
        let mut record = sample_record();
        record.projects = vec![ProjectEntry {
            description: "no name here".to_string(),
            ..Default::default()
        }];
        let prompt = build_prompt(&record);
        assert!(!prompt.contains("PROJECTS:"));
        assert!(!prompt.contains("no name here"));
    }

    #[test]
    fn test_build_prompt_lists_named_projects_only() {
        let mut record = sample_record();
        record.projects = vec![
            ProjectEntry {
                name: "Tiny Compiler".to_string(),
                description: "A toy compiler".to_string(),
                technologies: "Rust, LLVM".to_string(),
            },
            ProjectEntry::default(),
        ];
        let prompt = build_prompt(&record);
        assert!(prompt.contains("PROJECTS:\n\nTiny Compiler\nA toy compiler\nTechnologies: Rust, LLVM"));
        assert_eq!(prompt.matches("Technologies:").count(), 1);
    }

    #[test]
    fn test_build_prompt_empty_record_uses_placeholders() {
        let prompt = build_prompt(&CandidateRecord::default());
        assert!(prompt.contains("Name: N/A\nEmail: N/A\nPhone: N/A"));
        assert!(prompt.contains("SKILLS:\nN/A"));
        assert!(prompt.contains(SUMMARY_PLACEHOLDER));
        assert!(prompt.ends_with(RESUME_INSTRUCTIONS));
    }

    #[test]
    fn test_instructions_carry_formatting_rules() {
        assert!(RESUME_INSTRUCTIONS.contains("Do NOT use asterisks"));
        assert!(RESUME_INSTRUCTIONS.contains("dash followed by a space"));
        assert!(RESUME_INSTRUCTIONS.contains("UPPERCASE"));
        assert!(RESUME_INSTRUCTIONS.contains("quantified achievements"));
    }
}
