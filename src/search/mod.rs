pub mod adzuna;
pub mod normalize;
pub mod params;
pub mod traits;
pub mod types;

pub use adzuna::{AdzunaClient, PingReport, PingStatus};
pub use normalize::classify_remoteness;
pub use params::{build_request, ParamValue, RequestSpec};
pub use traits::JobSource;
pub use types::{RemoteFilter, SearchFilters, SearchForm, SortBy};

use crate::error::SearchError;
use crate::models::JobRecord;

/// Result of one search call. `jobs` is empty whenever `diagnostic` is set.
#[derive(Debug, Default)]
pub struct SearchOutcome {
    pub jobs: Vec<JobRecord>,
    /// Why the call produced nothing, kept for logs only
    pub diagnostic: Option<SearchError>,
}

impl SearchOutcome {
    pub fn found(jobs: Vec<JobRecord>) -> Self {
        Self { jobs, diagnostic: None }
    }

    pub fn failed(error: SearchError) -> Self {
        Self {
            jobs: Vec::new(),
            diagnostic: Some(error),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.diagnostic.is_some()
    }
}
