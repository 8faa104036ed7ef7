use async_trait::async_trait;

use crate::models::JobRecord;
use crate::search::types::SearchFilters;
use crate::search::SearchOutcome;

/// Common trait for job listing sources.
/// Implementations never fail outward: problems end up as an empty result
/// plus a diagnostic.
#[async_trait]
pub trait JobSource: Send + Sync {
    /// Fetch one page of listings for the given filters
    async fn search(&self, filters: &SearchFilters) -> SearchOutcome;

    /// Name of the listing source
    fn source_name(&self) -> &'static str;

    /// Listings only, diagnostics dropped
    async fn search_jobs(&self, filters: &SearchFilters) -> Vec<JobRecord> {
        self.search(filters).await.jobs
    }
}
