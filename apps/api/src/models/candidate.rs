use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything the user typed into the form. Held per session and snapshotted
/// into saved entries.
///
/// List entries are kept exactly as entered, blank placeholders included.
/// Consumers filter with the `meaningful_*` iterators.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateRecord {
    pub basic_info: BasicInfo,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub projects: Vec<ProjectEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BasicInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linkedin_url: String,
    pub target_title: String,
    /// Comma-separated, free text.
    pub skills: String,
    pub summary: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceEntry {
    pub title: String,
    pub company: String,
    pub start_date: String,
    pub end_date: String,
    /// One responsibility per line.
    pub responsibilities: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    pub year: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectEntry {
    pub name: String,
    pub description: String,
    pub technologies: String,
}

/// A field counts as present when it holds something other than whitespace.
pub fn is_present(value: &str) -> bool {
    !value.trim().is_empty()
}

impl BasicInfo {
    /// Names of the required fields (name, email, phone) that are blank.
    pub fn missing_required(&self) -> Vec<&'static str> {
        [
            ("name", &self.name),
            ("email", &self.email),
            ("phone", &self.phone),
        ]
        .into_iter()
        .filter(|(_, value)| !is_present(value))
        .map(|(field, _)| field)
        .collect()
    }

    /// Contact details in display order, blanks skipped.
    pub fn contact_parts(&self) -> Vec<&str> {
        [
            self.email.as_str(),
            self.phone.as_str(),
            self.location.as_str(),
            self.linkedin_url.as_str(),
        ]
        .into_iter()
        .filter(|v| is_present(v))
        .map(str::trim)
        .collect()
    }
}

impl CandidateRecord {
    /// Experience entries whose title is filled in.
    pub fn meaningful_experience(&self) -> impl Iterator<Item = &ExperienceEntry> {
        self.experience.iter().filter(|e| is_present(&e.title))
    }

    /// Education entries whose degree is filled in.
    pub fn meaningful_education(&self) -> impl Iterator<Item = &EducationEntry> {
        self.education.iter().filter(|e| is_present(&e.degree))
    }

    /// Project entries whose name is filled in.
    pub fn meaningful_projects(&self) -> impl Iterator<Item = &ProjectEntry> {
        self.projects.iter().filter(|p| is_present(&p.name))
    }
}

/// The output of one successful generation. Never mutated; a new generation
/// replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedDocument {
    pub source_record: CandidateRecord,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl GeneratedDocument {
    pub fn new(source_record: CandidateRecord, text: String) -> Self {
        Self {
            source_record,
            text,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_required_reports_blank_fields() {
        let info = BasicInfo {
            name: "Ada".to_string(),
            email: "   ".to_string(),
            ..Default::default()
        };
        assert_eq!(info.missing_required(), vec!["email", "phone"]);
    }

    #[test]
    fn test_contact_parts_skip_blanks_and_keep_order() {
        let info = BasicInfo {
            email: "ada@example.com".to_string(),
            location: " London ".to_string(),
            linkedin_url: "linkedin.com/in/ada".to_string(),
            ..Default::default()
        };
        assert_eq!(
            info.contact_parts(),
            vec!["ada@example.com", "London", "linkedin.com/in/ada"]
        );
    }

    #[test]
    fn test_meaningful_iterators_skip_blank_anchor_fields() {
        let record = CandidateRecord {
            experience: vec![
                ExperienceEntry {
                    title: "Engineer".to_string(),
                    ..Default::default()
                },
                ExperienceEntry {
                    company: "Ghost Corp".to_string(),
                    ..Default::default()
                },
            ],
            education: vec![EducationEntry::default()],
            projects: vec![
                ProjectEntry {
                    name: " ".to_string(),
                    ..Default::default()
                },
                ProjectEntry {
                    name: "Compiler".to_string(),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };

        assert_eq!(record.meaningful_experience().count(), 1);
        assert_eq!(record.meaningful_education().count(), 0);
        let names: Vec<_> = record.meaningful_projects().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Compiler"]);
    }

    #[test]
    fn test_partial_json_deserializes_with_defaults() {
        let record: CandidateRecord =
            serde_json::from_str(r#"{"basic_info": {"name": "Ada"}, "projects": [{}]}"#).unwrap();
        assert_eq!(record.basic_info.name, "Ada");
        assert!(record.experience.is_empty());
        assert_eq!(record.projects.len(), 1);
        assert!(record.basic_info.email.is_empty());
    }
}
