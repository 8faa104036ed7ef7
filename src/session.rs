//! Interactive search state: the current filters, page and result set.

use tracing::debug;

use crate::error::SearchError;
use crate::models::JobRecord;
use crate::search::types::PAGE_RANGE;
use crate::search::{JobSource, SearchFilters};

/// Holds what the user is currently looking at. Every fetch replaces the
/// result set wholesale; nothing is merged across pages.
pub struct SearchSession<S: JobSource> {
    source: S,
    filters: Option<SearchFilters>,
    page: u32,
    jobs: Vec<JobRecord>,
    last_diagnostic: Option<SearchError>,
}

impl<S: JobSource> SearchSession<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            filters: None,
            page: *PAGE_RANGE.start(),
            jobs: Vec::new(),
            last_diagnostic: None,
        }
    }

    /// Start a new search from page one.
    pub async fn search(&mut self, filters: SearchFilters) -> &[JobRecord] {
        self.search_at(filters, *PAGE_RANGE.start()).await
    }

    /// Start a new search on a given page, clamped to the pages the API
    /// serves.
    pub async fn search_at(&mut self, filters: SearchFilters, page: u32) -> &[JobRecord] {
        self.filters = Some(filters);
        let page = page.clamp(*PAGE_RANGE.start(), *PAGE_RANGE.end());
        self.fetch_page(page).await
    }

    /// Move forward one page. Stays put at the last page the API allows.
    pub async fn next_page(&mut self) -> &[JobRecord] {
        let page = (self.page + 1).min(*PAGE_RANGE.end());
        self.fetch_page(page).await
    }

    /// Move back one page. On the first page this keeps the current results
    /// and sends nothing.
    pub async fn previous_page(&mut self) -> &[JobRecord] {
        if self.page <= *PAGE_RANGE.start() {
            return &self.jobs;
        }
        self.fetch_page(self.page - 1).await
    }

    pub fn jobs(&self) -> &[JobRecord] {
        &self.jobs
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn filters(&self) -> Option<&SearchFilters> {
        self.filters.as_ref()
    }

    pub fn last_diagnostic(&self) -> Option<&SearchError> {
        self.last_diagnostic.as_ref()
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    async fn fetch_page(&mut self, page: u32) -> &[JobRecord] {
        let Some(filters) = &self.filters else {
            debug!("No search yet, nothing to fetch");
            return &self.jobs;
        };

        let outcome = self.source.search(&filters.with_page(page)).await;
        self.page = page;
        self.jobs = outcome.jobs;
        self.last_diagnostic = outcome.diagnostic;
        &self.jobs
    }
}
