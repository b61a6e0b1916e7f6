//! Line classifier for freeform generated text.
//!
//! Each line gets exactly one visual role. Rules run in order and the first
//! match wins:
//! 1. normalise (bullet glyphs → `-`, strip `*`/`**` and leading `#`)
//! 2. blank → `Spacer`
//! 3. all-uppercase (more than 3 chars) or contains a section keyword → `Heading`
//! 4. starts with `-` → `Bullet`
//! 5. contains `|` or an uppercase word longer than 2 chars → `Emphasis`
//! 6. anything else → `Body`

use serde::Serialize;

/// Phrases that mark a line as a section heading wherever they appear.
/// Matched case-sensitively.
pub const SECTION_KEYWORDS: [&str; 5] = [
    "PROFESSIONAL SUMMARY",
    "SKILLS",
    "WORK EXPERIENCE",
    "EDUCATION",
    "PROJECTS",
];

const BULLET_GLYPHS: [char; 6] = ['•', '·', '▪', '●', '◦', '‣'];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum LineClass {
    Spacer,
    Heading(String),
    /// Text after the leading dash.
    Bullet(String),
    Emphasis(String),
    Body(String),
}

/// True when `s` has at least one cased letter and no lowercase letters.
fn is_all_uppercase(s: &str) -> bool {
    s.chars().any(char::is_uppercase) && !s.chars().any(char::is_lowercase)
}

/// Markdown horizontal rules (`---`, `***`, `___`, `===`).
fn is_rule_line(s: &str) -> bool {
    s.chars().count() >= 3 && s.chars().all(|c| matches!(c, '-' | '_' | '=' | '*' | ' '))
}

/// Applies rule 1. Returns the trimmed, normalised line.
pub fn normalize_line(raw: &str) -> String {
    let line = raw.trim();
    if is_rule_line(line) {
        return String::new();
    }

    let line = line.trim_start_matches('#').trim_start();

    let mut chars = line.chars();
    let line = match chars.next() {
        Some(c) if BULLET_GLYPHS.contains(&c) => format!("- {}", chars.as_str().trim_start()),
        Some('*') | Some('+') if chars.as_str().starts_with(' ') => {
            format!("- {}", chars.as_str().trim_start())
        }
        _ => line.to_string(),
    };

    line.replace("**", "").replace('*', "").trim().to_string()
}

/// Classifies one raw line of generated text.
pub fn classify_line(raw: &str) -> LineClass {
    let line = normalize_line(raw);

    if line.is_empty() {
        return LineClass::Spacer;
    }

    let all_upper = line.chars().count() > 3 && is_all_uppercase(&line);
    if all_upper || SECTION_KEYWORDS.iter().any(|k| line.contains(k)) {
        return LineClass::Heading(line);
    }

    if let Some(rest) = line.strip_prefix('-') {
        return LineClass::Bullet(rest.trim_start().to_string());
    }

    let has_upper_word = line
        .split_whitespace()
        .any(|w| w.chars().count() > 2 && is_all_uppercase(w));
    if line.contains('|') || has_upper_word {
        return LineClass::Emphasis(line);
    }

    LineClass::Body(line)
}

/// Classifies every line of `text`, top to bottom.
pub fn classify_text(text: &str) -> Vec<LineClass> {
    text.lines().map(classify_line).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_bullet_body_sequence() {
        let classes = classify_text("PROFESSIONAL SUMMARY\n- Did a thing\nPlain sentence.");
        assert_eq!(
            classes,
            vec![
                LineClass::Heading("PROFESSIONAL SUMMARY".to_string()),
                LineClass::Bullet("Did a thing".to_string()),
                LineClass::Body("Plain sentence.".to_string()),
            ]
        );
    }

    #[test]
    fn test_uppercase_line_with_pipe_is_heading_not_emphasis() {
        assert_eq!(
            classify_line("SENIOR ENGINEER | ACME CORP"),
            LineClass::Heading("SENIOR ENGINEER | ACME CORP".to_string())
        );
    }

    #[test]
    fn test_keyword_inside_mixed_case_line_is_heading() {
        assert_eq!(
            classify_line("Technical SKILLS"),
            LineClass::Heading("Technical SKILLS".to_string())
        );
    }

    #[test]
    fn test_keywords_are_case_sensitive() {
        assert_eq!(
            classify_line("Developed skills in mentoring."),
            LineClass::Body("Developed skills in mentoring.".to_string())
        );
    }

    #[test]
    fn test_short_uppercase_line_is_not_heading() {
        // "SQL" is too short for rule 3 but is an uppercase word for rule 5.
        assert_eq!(classify_line("SQL"), LineClass::Emphasis("SQL".to_string()));
        assert_eq!(classify_line("AB"), LineClass::Body("AB".to_string()));
    }

    #[test]
    fn test_pipe_line_is_emphasis() {
        assert_eq!(
            classify_line("Software Engineer | Acme | 2020 - Present"),
            LineClass::Emphasis("Software Engineer | Acme | 2020 - Present".to_string())
        );
    }

    #[test]
    fn test_uppercase_word_line_is_emphasis() {
        assert_eq!(
            classify_line("Led the AWS migration"),
            LineClass::Emphasis("Led the AWS migration".to_string())
        );
    }

    #[test]
    fn test_bullet_glyphs_and_markdown_bullets_become_dash_bullets() {
        assert_eq!(classify_line("• Shipped v2"), LineClass::Bullet("Shipped v2".to_string()));
        assert_eq!(classify_line("* Shipped v3"), LineClass::Bullet("Shipped v3".to_string()));
        assert_eq!(classify_line("  - Shipped v4"), LineClass::Bullet("Shipped v4".to_string()));
    }

    #[test]
    fn test_markdown_emphasis_is_stripped() {
        assert_eq!(
            classify_line("**Jane** led a *small* team"),
            LineClass::Body("Jane led a small team".to_string())
        );
        assert_eq!(
            classify_line("## **Work Experience**"),
            LineClass::Body("Work Experience".to_string())
        );
    }

    #[test]
    fn test_blank_and_rule_lines_are_spacers() {
        assert_eq!(classify_line(""), LineClass::Spacer);
        assert_eq!(classify_line("   \t"), LineClass::Spacer);
        assert_eq!(classify_line("---"), LineClass::Spacer);
        assert_eq!(classify_line("***"), LineClass::Spacer);
        assert_eq!(classify_line("**"), LineClass::Spacer);
    }

    #[test]
    fn test_dash_led_uppercase_line_is_heading_by_rule_order() {
        assert_eq!(
            classify_line("- AWS, GCP"),
            LineClass::Heading("- AWS, GCP".to_string())
        );
    }

    #[test]
    fn test_one_class_per_line() {
        let text = "JANE DOE\njane@example.com | 555-0100\n\nSKILLS\n- Rust\nWrote code.";
        assert_eq!(classify_text(text).len(), text.lines().count());
    }
}
