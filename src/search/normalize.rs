//! Normalization of raw search API records into [`JobRecord`].

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::warn;

use crate::models::{JobRecord, Remoteness, Source};

pub const NO_TITLE: &str = "No Title";
pub const UNKNOWN_COMPANY: &str = "Unknown Company";
pub const UNKNOWN_LOCATION: &str = "Location not specified";
pub const NOT_AVAILABLE: &str = "N/A";
pub const NO_DATE: &str = "—";
pub const NO_URL: &str = "#";

const REMOTE_KEYWORDS: [&str; 4] = ["remote", "work from home", "wfh", "hybrid"];

/// Envelope of a search response. A missing or null `results` key means no
/// results.
#[derive(Debug, Default, Deserialize)]
pub struct RawSearchResponse {
    #[serde(default)]
    pub results: Option<Vec<serde_json::Value>>,
    #[serde(default)]
    pub count: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct RawDisplayName {
    display_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawCategory {
    label: Option<String>,
}

/// One listing as the search API sends it. Everything is optional, and a
/// field of the wrong type reads as absent instead of failing the record.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawJob {
    #[serde(deserialize_with = "id_as_string")]
    id: Option<String>,
    #[serde(deserialize_with = "lenient")]
    title: Option<String>,
    #[serde(deserialize_with = "lenient")]
    company: Option<RawDisplayName>,
    #[serde(deserialize_with = "lenient")]
    location: Option<RawDisplayName>,
    #[serde(deserialize_with = "lenient")]
    category: Option<RawCategory>,
    #[serde(deserialize_with = "lenient")]
    contract_time: Option<String>,
    #[serde(deserialize_with = "lenient")]
    created: Option<String>,
    #[serde(deserialize_with = "lenient_number")]
    salary_min: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    salary_max: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    description: Option<String>,
    #[serde(deserialize_with = "lenient")]
    redirect_url: Option<String>,
    #[serde(deserialize_with = "lenient_bool")]
    remote: Option<bool>,
}

fn id_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Numbers, or numeric strings such as `"85000"`.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}

/// Booleans, or `"true"` / `"false"` in any case.
fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Bool(b) => Some(b),
        serde_json::Value::String(s) => s.trim().to_ascii_lowercase().parse::<bool>().ok(),
        _ => None,
    })
}

/// Normalize every record of a response. Records that are not JSON objects
/// are skipped with a warning instead of failing the page.
pub fn normalize_results(results: Vec<serde_json::Value>) -> Vec<JobRecord> {
    let fetched_at = Utc::now();
    results
        .into_iter()
        .enumerate()
        .filter_map(|(idx, raw)| match normalize_job(raw, fetched_at) {
            Ok(job) => Some(job),
            Err(e) => {
                warn!("Skipping malformed result {}: {}", idx, e);
                None
            }
        })
        .collect()
}

/// Map one raw JSON record onto a [`JobRecord`] with defaults applied.
pub fn normalize_job(raw: serde_json::Value, fetched_at: DateTime<Utc>) -> Result<JobRecord, serde_json::Error> {
    let job: RawJob = serde_json::from_value(raw.clone())?;

    let title = non_blank(job.title).unwrap_or_else(|| NO_TITLE.to_string());
    let description = job.description.unwrap_or_default();
    let remoteness = classify_remoteness(job.remote, &title, &description);

    Ok(JobRecord {
        id: job.id.unwrap_or_default(),
        source: Source::Adzuna,
        company_name: job
            .company
            .and_then(|c| non_blank(c.display_name))
            .unwrap_or_else(|| UNKNOWN_COMPANY.to_string()),
        location_display: job
            .location
            .and_then(|l| non_blank(l.display_name))
            .unwrap_or_else(|| UNKNOWN_LOCATION.to_string()),
        category_label: job
            .category
            .and_then(|c| non_blank(c.label))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        contract_type: non_blank(job.contract_time)
            .map(|c| title_case(&c.replace('_', " ")))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        remoteness,
        posted_date: job
            .created
            .as_deref()
            .and_then(posted_date)
            .unwrap_or_else(|| NO_DATE.to_string()),
        salary_min: job.salary_min.filter(|v| v.is_finite()).map(|v| v as i64),
        salary_max: job.salary_max.filter(|v| v.is_finite()).map(|v| v as i64),
        description,
        apply_url: non_blank(job.redirect_url).unwrap_or_else(|| NO_URL.to_string()),
        title,
        fetched_at,
        raw_data: raw,
    })
}

/// Three-state remote label. An explicit `true` flag wins; otherwise the
/// title and description are searched for remote-work keywords.
pub fn classify_remoteness(remote_flag: Option<bool>, title: &str, description: &str) -> Remoteness {
    if remote_flag == Some(true) {
        return Remoteness::Remote;
    }
    let haystack = format!("{description} {title}").to_lowercase();
    if REMOTE_KEYWORDS.iter().any(|k| haystack.contains(k)) {
        Remoteness::RemoteOrHybrid
    } else {
        Remoteness::OnSite
    }
}

/// Date portion of a creation timestamp, `None` when blank.
fn posted_date(created: &str) -> Option<String> {
    let created = created.trim();
    if created.is_empty() {
        return None;
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(created) {
        return Some(ts.date_naive().to_string());
    }
    let date_part = match created.split_once('T') {
        Some((date, _)) => date,
        None => created.get(..10).unwrap_or(created),
    };
    match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        Ok(date) => Some(date.to_string()),
        Err(_) => Some(date_part.to_string()),
    }
}

/// `"full time"` -> `"Full Time"`, `"full-time"` -> `"Full-Time"`. Every
/// non-alphanumeric char starts a new word.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut word_start = true;
    for ch in text.chars() {
        if ch.is_alphanumeric() {
            if word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            word_start = false;
        } else {
            out.push(ch);
            word_start = true;
        }
    }
    out
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
