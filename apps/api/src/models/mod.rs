pub mod candidate;
pub mod saved;

pub use candidate::{
    BasicInfo, CandidateRecord, EducationEntry, ExperienceEntry, GeneratedDocument, ProjectEntry,
};
pub use saved::SavedEntry;
