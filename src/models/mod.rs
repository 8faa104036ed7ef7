use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a job listing came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Source {
    Adzuna,
}

/// Derived remote/on-site label for a listing
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Remoteness {
    Remote,
    RemoteOrHybrid,
    OnSite,
}

impl Remoteness {
    pub fn label(&self) -> &'static str {
        match self {
            Remoteness::Remote => "Remote",
            Remoteness::RemoteOrHybrid => "Remote / Hybrid",
            Remoteness::OnSite => "On-site",
        }
    }
}

impl fmt::Display for Remoteness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Normalized job listing, stable regardless of what the source omitted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: String,
    pub source: Source,
    pub title: String,
    pub company_name: String,
    pub location_display: String,
    pub category_label: String,
    pub contract_type: String,
    pub remoteness: Remoteness,
    /// `YYYY-MM-DD`, or "—" when the source has no date
    pub posted_date: String,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub description: String,
    /// "#" when the source has no link
    pub apply_url: String,
    pub fetched_at: DateTime<Utc>,
    pub raw_data: serde_json::Value,
}

impl JobRecord {
    pub fn has_apply_url(&self) -> bool {
        !self.apply_url.is_empty() && self.apply_url != "#"
    }
}
