pub mod cache;
pub mod models;
pub mod search;
pub mod store;

// Re-export domain models
pub use models::job::{
    EmploymentType, ExperienceLevel, JobDraft, JobPatch, JobPosting, SalaryType, Skill,
};

// Re-export the store facade and board query pipeline
pub use cache::BoardCache;
pub use search::{select_page, JobFilter, JobPage, DEFAULT_PAGE_SIZE};
pub use store::{CreatedJob, JobStore};
