//! Query parameter builder.
//!
//! Pure mapping from [`SearchFilters`] plus credentials to the search API's
//! wire contract. No I/O happens here, so the exact request can be inspected
//! and tested without a network.

use secrecy::{ExposeSecret, SecretString};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

use crate::credentials::Credentials;
use crate::search::types::SearchFilters;

/// One query parameter value.
#[derive(Clone)]
pub enum ParamValue {
    Text(String),
    Int(u64),
    Secret(SecretString),
}

impl ParamValue {
    pub fn as_int(&self) -> Option<u64> {
        match self {
            ParamValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParamValue::Text(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Debug for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Text(v) => write!(f, "{v:?}"),
            ParamValue::Int(v) => write!(f, "{v}"),
            ParamValue::Secret(_) => f.write_str("[REDACTED]"),
        }
    }
}

impl Serialize for ParamValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ParamValue::Text(v) => serializer.serialize_str(v),
            ParamValue::Int(v) => serializer.serialize_u64(*v),
            ParamValue::Secret(v) => serializer.serialize_str(v.expose_secret()),
        }
    }
}

/// A fully built search request: URL plus query parameters.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    pub url: String,
    pub params: BTreeMap<&'static str, ParamValue>,
}

impl RequestSpec {
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.params.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.params.contains_key(name)
    }
}

/// Build the request for one page of results.
pub fn build_request(base_url: &str, filters: &SearchFilters, credentials: &Credentials) -> RequestSpec {
    let url = format!(
        "{}/{}/search/{}",
        base_url.trim_end_matches('/'),
        filters.effective_country(),
        filters.effective_page()
    );

    let mut params = BTreeMap::new();
    params.insert("app_id", ParamValue::Text(credentials.app_id.clone()));
    params.insert("app_key", ParamValue::Secret(credentials.app_key.clone()));
    params.insert(
        "results_per_page",
        ParamValue::Int(u64::from(filters.effective_results_per_page())),
    );
    params.insert("sort_by", ParamValue::Text(filters.sort_by.as_str().to_string()));

    insert_text(&mut params, "what", &filters.query);
    insert_text(&mut params, "where", &filters.location);
    if let Some(category) = &filters.category {
        insert_text(&mut params, "category", category);
    }

    // Zero and absent are the same thing on the wire: both are omitted.
    insert_positive(&mut params, "salary_min", filters.salary_min);
    insert_positive(&mut params, "salary_max", filters.salary_max);
    insert_positive(&mut params, "distance", filters.distance_miles);

    RequestSpec { url, params }
}

fn insert_text(params: &mut BTreeMap<&'static str, ParamValue>, name: &'static str, value: &str) {
    let value = value.trim();
    if !value.is_empty() {
        params.insert(name, ParamValue::Text(value.to_string()));
    }
}

fn insert_positive(params: &mut BTreeMap<&'static str, ParamValue>, name: &'static str, value: Option<u64>) {
    if let Some(v) = value.filter(|v| *v > 0) {
        params.insert(name, ParamValue::Int(v));
    }
}
