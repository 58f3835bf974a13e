//! Test fixtures for creating board test data.

use std::sync::Arc;

use board_core::domains::jobs::{
    EmploymentType, ExperienceLevel, JobDraft, JobStore, SalaryType, Skill,
};
use board_core::store::MemoryCollection;

/// Fresh store over in-memory state, with a handle on the raw collection.
pub fn memory_store() -> (JobStore, Arc<MemoryCollection>) {
    let collection = Arc::new(MemoryCollection::new());
    (JobStore::new(collection.clone()), collection)
}

/// A draft with every filterable field populated.
pub fn draft(title: &str, company: &str, location: &str) -> JobDraft {
    JobDraft {
        job_title: title.to_string(),
        company_name: company.to_string(),
        company_logo: String::new(),
        job_location: location.to_string(),
        description: format!("{title} role at {company}"),
        min_price: "60".to_string(),
        max_price: "80".to_string(),
        salary_type: SalaryType::Yearly.to_string(),
        employment_type: EmploymentType::FullTime.to_string(),
        experience_level: ExperienceLevel::MidLevel.to_string(),
        posting_date: "2026-07-01".to_string(),
        skills: vec![],
        posted_by: "poster@example.com".to_string(),
    }
}

/// Drafts titled "Role 00".."Role NN", all in Austin.
pub fn numbered_drafts(count: usize) -> Vec<JobDraft> {
    (0..count)
        .map(|n| draft(&format!("Role {n:02}"), "Acme", "Austin"))
        .collect()
}

pub fn tagged_skill(value: &str) -> Skill {
    Skill::Tagged {
        value: Some(value.to_string()),
        label: Some(value.to_string()),
    }
}
