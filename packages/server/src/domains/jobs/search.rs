//! Board query pipeline: text filter, category filter, page slice.
//!
//! [`select_page`] is a pure function of the full posting list and one
//! [`JobFilter`]. It holds no state between calls and never fails; every
//! well-typed input produces a valid, possibly empty, page. The caller owns
//! the posting list (see the board cache) and the filter state, and re-runs
//! the pipeline whenever either changes.

use serde::Serialize;

use crate::common::{normalize_page, page_bounds, total_pages, PageInfo};

use super::models::job::{JobPosting, Skill};

/// Postings shown per page.
pub const DEFAULT_PAGE_SIZE: usize = 6;

/// Filter state driving one evaluation of the pipeline.
///
/// `selected` carries whichever category token the caller picked: a location
/// name, a price ceiling like "100", an ISO date floor, a salary type, an
/// experience level, or an employment type. The axes are checked together;
/// the token itself is not typed.
#[derive(Debug, Clone, Default)]
pub struct JobFilter {
    pub query: String,
    pub selected: Option<String>,
    pub page: u32,
}

/// One page of filtered postings plus the numbers the pager needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobPage {
    pub jobs: Vec<JobPosting>,
    #[serde(flatten)]
    pub page_info: PageInfo,
}

/// Run the full pipeline: filter by `query`, then by `selected`, then slice
/// out the requested page.
///
/// Filtered postings keep the order of `all_jobs`; nothing is re-sorted. A
/// page past the end yields an empty slice with the page number echoed back.
pub fn select_page(all_jobs: &[JobPosting], filter: &JobFilter, page_size: usize) -> JobPage {
    let filtered: Vec<&JobPosting> = all_jobs
        .iter()
        .filter(|job| matches_text(job, &filter.query))
        .filter(|job| matches_category(job, filter.selected.as_deref()))
        .collect();

    let page = normalize_page(filter.page);
    if filtered.is_empty() {
        return JobPage {
            jobs: Vec::new(),
            page_info: PageInfo::empty(page),
        };
    }
    let bounds = page_bounds(page, page_size, filtered.len());
    let jobs = filtered[bounds].iter().map(|job| (*job).clone()).collect();

    JobPage {
        jobs,
        page_info: PageInfo {
            current_page: page,
            total_pages: total_pages(filtered.len(), page_size),
            total_count: filtered.len(),
        },
    }
}

// ============================================================================
// Stage 1: free-text filter
// ============================================================================

/// Case-insensitive substring match over every searchable field. An empty
/// query passes everything; an empty field matches nothing.
fn matches_text(job: &JobPosting, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    let fields = [
        &job.job_title,
        &job.company_name,
        &job.job_location,
        &job.description,
        &job.employment_type,
        &job.experience_level,
    ];
    if fields.iter().any(|field| contains_ci(field, &needle)) {
        return true;
    }
    job.skills
        .iter()
        .filter_map(Skill::searchable_text)
        .any(|text| contains_ci(text, &needle))
}

fn contains_ci(haystack: &str, lowered_needle: &str) -> bool {
    !haystack.is_empty() && haystack.to_lowercase().contains(lowered_needle)
}

// ============================================================================
// Stage 2: category filter
// ============================================================================

/// A posting passes when ANY axis accepts the selected token. The axes mix
/// string equality, a numeric ceiling, and a lexical date floor under one
/// control value; that accretion is the board's contract, not an accident
/// to tidy up. A posting whose field is empty fails that axis and no other.
fn matches_category(job: &JobPosting, selected: Option<&str>) -> bool {
    let Some(selected) = selected.filter(|token| !token.is_empty()) else {
        return true;
    };
    location_matches(job, selected)
        || price_within_ceiling(job, selected)
        || posted_on_or_after(job, selected)
        || salary_type_matches(job, selected)
        || experience_matches(job, selected)
        || employment_matches(job, selected)
}

fn location_matches(job: &JobPosting, selected: &str) -> bool {
    eq_ci(&job.job_location, selected)
}

/// `maxPrice` and the token must both parse as integers; anything else
/// fails the axis rather than erroring.
fn price_within_ceiling(job: &JobPosting, selected: &str) -> bool {
    match (parse_price(&job.max_price), parse_price(selected)) {
        (Some(max_price), Some(ceiling)) => max_price <= ceiling,
        _ => false,
    }
}

/// ISO dates compare correctly as strings, so the floor is lexical.
fn posted_on_or_after(job: &JobPosting, selected: &str) -> bool {
    !job.posting_date.is_empty() && job.posting_date.as_str() >= selected
}

fn salary_type_matches(job: &JobPosting, selected: &str) -> bool {
    eq_ci(&job.salary_type, selected)
}

fn experience_matches(job: &JobPosting, selected: &str) -> bool {
    eq_ci(&job.experience_level, selected)
}

fn employment_matches(job: &JobPosting, selected: &str) -> bool {
    eq_ci(&job.employment_type, selected)
}

// Unicode case folding, same as the text stage; tokens like "São Paulo"
// must match regardless of how the non-ASCII letters were cased.
fn eq_ci(field: &str, selected: &str) -> bool {
    !field.is_empty() && field.to_lowercase() == selected.to_lowercase()
}

fn parse_price(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}
