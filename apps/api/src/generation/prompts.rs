// All prompt text sent to the generation service lives here.
// The instruction block is part of the contract with the model: the PDF line
// classifier relies on the formatting rules it asks for.

/// Opening line of every resume prompt.
pub const RESUME_PROMPT_INTRO: &str =
    "Create a professional, ATS-friendly resume for the following candidate:";

/// Rendered for any blank basic-info field.
pub const MISSING_FIELD_PLACEHOLDER: &str = "N/A";

/// Rendered in place of a blank professional summary.
pub const SUMMARY_PLACEHOLDER: &str = "Generate a compelling 3-4 sentence professional summary";

/// Fixed instructions appended to every resume prompt.
pub const RESUME_INSTRUCTIONS: &str = "Please create a well-structured, professional resume with:
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
