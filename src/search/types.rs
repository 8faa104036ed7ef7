use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

use crate::models::{JobRecord, Remoteness};

// Defaults table. Every fallback the request builder applies lives here.
//
// | field            | default   | rule                          |
// |------------------|-----------|-------------------------------|
// | results_per_page | 10        | clamp to 1..=50               |
// | page             | 1         | clamp to 1..=100              |
// | country_code     | "us"      | trimmed, lower-cased          |
// | sort_by          | relevance | anything unknown -> relevance |
// | salary_min/max   | absent    | omitted when absent or zero   |
// | distance_miles   | absent    | omitted when absent or zero   |
// | category         | absent    | omitted when blank            |
// | remote           | any       | applied after normalization   |
pub const DEFAULT_RESULTS_PER_PAGE: u32 = 10;
pub const RESULTS_PER_PAGE_RANGE: RangeInclusive<u32> = 1..=50;
pub const DEFAULT_PAGE: u32 = 1;
pub const PAGE_RANGE: RangeInclusive<u32> = 1..=100;
pub const DEFAULT_COUNTRY: &str = "us";

/// Result ordering understood by the search API
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Relevance,
    Date,
}

impl SortBy {
    /// Permissive parse: anything that is not a known value is relevance.
    pub fn parse_lossy(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "date" => SortBy::Date,
            _ => SortBy::Relevance,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Relevance => "relevance",
            SortBy::Date => "date",
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Client-side remote filter. The search API has no such parameter, so it is
/// applied to normalized records.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RemoteFilter {
    #[default]
    Any,
    RemoteOnly,
    OnSiteOnly,
}

impl RemoteFilter {
    pub fn parse_lossy(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().replace(['-', '_', ' '], "").as_str() {
            "remote" | "remoteonly" => RemoteFilter::RemoteOnly,
            "onsite" | "onsiteonly" => RemoteFilter::OnSiteOnly,
            _ => RemoteFilter::Any,
        }
    }

    /// Remote-only keeps fully remote and hybrid listings; on-site-only keeps
    /// the rest.
    pub fn accepts(&self, job: &JobRecord) -> bool {
        match self {
            RemoteFilter::Any => true,
            RemoteFilter::RemoteOnly => job.remoteness != Remoteness::OnSite,
            RemoteFilter::OnSiteOnly => job.remoteness == Remoteness::OnSite,
        }
    }
}

/// Search parameters for one request. Values may be out of range here; the
/// request builder clamps them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchFilters {
    /// Job title / keywords
    pub query: String,
    /// City, state or country text
    pub location: String,
    /// Two-letter country code
    pub country_code: String,
    pub results_per_page: Option<i64>,
    pub page: Option<i64>,
    pub sort_by: SortBy,
    pub salary_min: Option<u64>,
    pub salary_max: Option<u64>,
    /// Taxonomy slug such as `it-jobs`
    pub category: Option<String>,
    pub distance_miles: Option<u64>,
    pub remote: RemoteFilter,
}

impl Default for SearchFilters {
    fn default() -> Self {
        Self {
            query: String::new(),
            location: String::new(),
            country_code: DEFAULT_COUNTRY.to_string(),
            results_per_page: None,
            page: None,
            sort_by: SortBy::Relevance,
            salary_min: None,
            salary_max: None,
            category: None,
            distance_miles: None,
            remote: RemoteFilter::Any,
        }
    }
}

impl SearchFilters {
    pub fn new(query: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            location: location.into(),
            ..Self::default()
        }
    }

    /// Copy of these filters pointing at another page.
    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page: Some(i64::from(page)),
            ..self.clone()
        }
    }

    /// Total conversion from raw form input. Never fails: unparseable numbers
    /// become absent and pick up their defaults downstream.
    pub fn from_form(form: &SearchForm) -> Self {
        Self {
            query: form.query.trim().to_string(),
            location: form.location.trim().to_string(),
            country_code: form.country.trim().to_ascii_lowercase(),
            results_per_page: parse_int(&form.results_per_page),
            page: parse_int(&form.page),
            sort_by: SortBy::parse_lossy(&form.sort_by),
            salary_min: parse_non_negative(&form.salary_min),
            salary_max: parse_non_negative(&form.salary_max),
            category: Some(form.category.trim().to_string()).filter(|c| !c.is_empty()),
            distance_miles: parse_non_negative(&form.distance),
            remote: RemoteFilter::parse_lossy(&form.remote),
        }
    }

    pub fn effective_results_per_page(&self) -> u32 {
        clamp_or_default(
            self.results_per_page,
            DEFAULT_RESULTS_PER_PAGE,
            RESULTS_PER_PAGE_RANGE,
        )
    }

    pub fn effective_page(&self) -> u32 {
        clamp_or_default(self.page, DEFAULT_PAGE, PAGE_RANGE)
    }

    pub fn effective_country(&self) -> String {
        let code = self.country_code.trim().to_ascii_lowercase();
        if code.is_empty() {
            DEFAULT_COUNTRY.to_string()
        } else {
            code
        }
    }
}

/// Filter values exactly as typed by a user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchForm {
    pub query: String,
    pub location: String,
    pub country: String,
    pub results_per_page: String,
    pub page: String,
    pub sort_by: String,
    pub salary_min: String,
    pub salary_max: String,
    pub category: String,
    pub distance: String,
    pub remote: String,
}

fn clamp_or_default(value: Option<i64>, default: u32, range: RangeInclusive<u32>) -> u32 {
    // Zero counts as "not given", like an empty form field.
    let value = match value {
        Some(v) if v != 0 => v,
        _ => i64::from(default),
    };
    value.clamp(i64::from(*range.start()), i64::from(*range.end())) as u32
}

fn parse_int(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    raw.parse::<i64>()
        .ok()
        .or_else(|| raw.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f as i64))
}

fn parse_non_negative(raw: &str) -> Option<u64> {
    parse_int(raw).and_then(|v| u64::try_from(v).ok())
}
