use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// JobPosting - one listing on the board, total with respect to the schema
///
/// Every field except `id` carries a defined default, so a posting built by
/// [`JobPosting::from_document`] never forces callers to branch on "field
/// present". Documents in the backing collection may predate the current
/// schema; normalization absorbs that drift here, in one place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPosting {
    pub id: String,

    // Display
    pub job_title: String,
    pub company_name: String,
    pub company_logo: String,
    pub job_location: String,
    pub description: String,

    // Compensation
    pub min_price: String, // numeric string, e.g. "30"
    pub max_price: String, // numeric string, e.g. "100"
    pub salary_type: String, // 'Hourly', 'Monthly', 'Yearly'

    // Classification
    pub employment_type: String, // 'full-time', 'Part-time', 'Temporary'
    pub experience_level: String, // 'NoExperience', 'Internship', 'Entry', 'Mid-level', 'Senior'
    pub posting_date: String, // ISO date, e.g. "2026-03-14"
    pub skills: Vec<Skill>,

    // Provenance
    pub posted_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl JobPosting {
    /// Build a total posting from a raw stored document.
    ///
    /// Missing or mistyped fields fall back to their defaults instead of
    /// failing the whole record. The row key is authoritative for `id`; a
    /// stored `id` or `_id` field is legacy noise and is never read.
    pub fn from_document(id: impl Into<String>, doc: &Value) -> Self {
        Self {
            id: id.into(),
            job_title: text(doc, "jobTitle"),
            company_name: text(doc, "companyName"),
            company_logo: text(doc, "companyLogo"),
            job_location: text(doc, "jobLocation"),
            description: text(doc, "description"),
            min_price: numeric_text(doc, "minPrice"),
            max_price: numeric_text(doc, "maxPrice"),
            salary_type: text(doc, "salaryType"),
            employment_type: text(doc, "employmentType"),
            experience_level: text(doc, "experienceLevel"),
            posting_date: text(doc, "postingDate"),
            skills: skill_list(doc),
            posted_by: text(doc, "postedBy"),
            created_at: timestamp(doc, "createdAt"),
            updated_at: timestamp(doc, "updatedAt"),
        }
    }
}

fn text(doc: &Value, key: &str) -> String {
    doc.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

// minPrice/maxPrice are numeric strings in the schema, but older documents
// hold bare JSON numbers. Both compare the same once stringified.
fn numeric_text(doc: &Value, key: &str) -> String {
    match doc.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn timestamp(doc: &Value, key: &str) -> Option<DateTime<Utc>> {
    let raw = doc.get(key).and_then(Value::as_str)?;
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc))
}

fn skill_list(doc: &Value) -> Vec<Skill> {
    doc.get("skills")
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| serde_json::from_value(entry.clone()).ok())
                .collect()
        })
        .unwrap_or_default()
}

/// One skill tag on a posting.
///
/// Select widgets submit `{value, label}` pairs while older documents hold
/// plain strings. Both shapes are kept as stored and round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Skill {
    Tagged {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
    Plain(String),
}

impl Skill {
    /// The text a free-text search should match: `value`, else `label`,
    /// else the plain string. Empty text never matches anything.
    pub fn searchable_text(&self) -> Option<&str> {
        match self {
            Skill::Tagged { value, label } => value
                .as_deref()
                .filter(|v| !v.is_empty())
                .or_else(|| label.as_deref().filter(|l| !l.is_empty())),
            Skill::Plain(text) if !text.is_empty() => Some(text),
            Skill::Plain(_) => None,
        }
    }
}

// =============================================================================
// Vocabulary enums for type-safe construction
// =============================================================================

/// Salary period enum
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum SalaryType {
    Hourly,
    Monthly,
    Yearly,
}

impl std::fmt::Display for SalaryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SalaryType::Hourly => write!(f, "Hourly"),
            SalaryType::Monthly => write!(f, "Monthly"),
            SalaryType::Yearly => write!(f, "Yearly"),
        }
    }
}

impl std::str::FromStr for SalaryType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Hourly" => Ok(SalaryType::Hourly),
            "Monthly" => Ok(SalaryType::Monthly),
            "Yearly" => Ok(SalaryType::Yearly),
            _ => Err(anyhow::anyhow!("Invalid salary type: {}", s)),
        }
    }
}

/// Employment type enum
///
/// Tokens keep the exact casing the board has always stored, lowercase
/// 'full-time' included.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum EmploymentType {
    #[serde(rename = "full-time")]
    FullTime,
    #[serde(rename = "Part-time")]
    PartTime,
    Temporary,
}

impl std::fmt::Display for EmploymentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmploymentType::FullTime => write!(f, "full-time"),
            EmploymentType::PartTime => write!(f, "Part-time"),
            EmploymentType::Temporary => write!(f, "Temporary"),
        }
    }
}

impl std::str::FromStr for EmploymentType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "full-time" => Ok(EmploymentType::FullTime),
            "Part-time" => Ok(EmploymentType::PartTime),
            "Temporary" => Ok(EmploymentType::Temporary),
            _ => Err(anyhow::anyhow!("Invalid employment type: {}", s)),
        }
    }
}

/// Experience level enum
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum ExperienceLevel {
    NoExperience,
    Internship,
    Entry,
    #[serde(rename = "Mid-level")]
    MidLevel,
    Senior,
}

impl std::fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExperienceLevel::NoExperience => write!(f, "NoExperience"),
            ExperienceLevel::Internship => write!(f, "Internship"),
            ExperienceLevel::Entry => write!(f, "Entry"),
            ExperienceLevel::MidLevel => write!(f, "Mid-level"),
            ExperienceLevel::Senior => write!(f, "Senior"),
        }
    }
}

impl std::str::FromStr for ExperienceLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "NoExperience" => Ok(ExperienceLevel::NoExperience),
            "Internship" => Ok(ExperienceLevel::Internship),
            "Entry" => Ok(ExperienceLevel::Entry),
            "Mid-level" => Ok(ExperienceLevel::MidLevel),
            "Senior" => Ok(ExperienceLevel::Senior),
            _ => Err(anyhow::anyhow!("Invalid experience level: {}", s)),
        }
    }
}

// =============================================================================
// Write-side shapes
// =============================================================================

/// Input for creating a posting. The store assigns `id` and both timestamps,
/// so neither appears here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDraft {
    pub job_title: String,
    pub company_name: String,
    #[serde(default)]
    pub company_logo: String,
    #[serde(default)]
    pub job_location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub min_price: String,
    #[serde(default)]
    pub max_price: String,
    #[serde(default)]
    pub salary_type: String,
    #[serde(default)]
    pub employment_type: String,
    #[serde(default)]
    pub experience_level: String,
    #[serde(default)]
    pub posting_date: String,
    #[serde(default)]
    pub skills: Vec<Skill>,
    pub posted_by: String,
}

impl JobDraft {
    pub fn to_document(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }
}

/// Partial update for a posting. Absent fields are left untouched by the
/// store's merge; `None` is never written.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employment_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posting_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<Skill>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posted_by: Option<String>,
}

impl JobPatch {
    pub fn to_document(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.to_document().is_empty()
    }
}
